//! User accounts repository.
//!
//! # Security
//!
//! - Only bcrypt hashes are stored, never plaintext passwords
//! - Records are not logged; the `Debug` impl redacts the hash

use crate::errors::ApiError;
use crate::models::account_state;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::instrument;

/// Stored user account.
#[derive(Clone)]
pub struct UserRecord {
    /// Numeric user identifier.
    pub id: i64,

    /// Account email; unique across the store.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Profile image reference; empty when none was supplied.
    pub profile_image: String,

    /// Account state (see `models::account_state`).
    pub state: i32,

    /// bcrypt hash of the account password.
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &"[REDACTED]")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Repository for user account operations.
pub struct UsersRepository {
    users: RwLock<HashMap<i64, UserRecord>>,
    next_id: AtomicI64,
}

impl UsersRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if the email is already registered.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn insert(
        &self,
        email: &str,
        name: &str,
        profile_image: Option<&str>,
        password_hash: String,
    ) -> Result<UserRecord, ApiError> {
        let mut users = self.users.write().await;

        // Uniqueness check and insert happen under one write guard.
        if users.values().any(|u| u.email == email) {
            return Err(ApiError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let record = UserRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            email: email.to_string(),
            name: name.to_string(),
            profile_image: profile_image.unwrap_or_default().to_string(),
            state: account_state::ACTIVE,
            password_hash,
        };
        users.insert(record.id, record.clone());

        tracing::info!(target: "trip.repo.users", user_id = record.id, "Registered user");
        Ok(record)
    }

    /// Look up an account by email.
    pub async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        let users = self.users.read().await;
        users.values().find(|u| u.email == email).cloned()
    }

    /// Look up an account by id.
    pub async fn find_by_id(&self, id: i64) -> Option<UserRecord> {
        let users = self.users.read().await;
        users.get(&id).cloned()
    }
}

impl Default for UsersRepository {
    fn default() -> Self {
        Self::new()
    }
}
