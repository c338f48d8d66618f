//! Repository layer for the trip service.
//!
//! Provides data access following the Handler -> Service -> Repository
//! architecture. Storage is in-process: each repository guards its map with a
//! `tokio::sync::RwLock` so mutations are atomic per call.

pub mod catalog;
pub mod groups;
pub mod users;

pub use groups::GroupsRepository;
pub use users::UsersRepository;

use std::sync::Arc;

/// Shared repository handles, cloned into application state.
#[derive(Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<UsersRepository>,

    /// Travel groups and everything nested in them.
    pub groups: Arc<GroupsRepository>,
}

impl Stores {
    /// Create empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(UsersRepository::new()),
            groups: Arc::new(GroupsRepository::new()),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}
