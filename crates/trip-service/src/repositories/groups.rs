//! Travel groups repository.
//!
//! A group record owns everything nested in it: members, pending invites, the
//! selected destination and period, itinerary entries, and travelogues. All
//! mutations run under a single write guard via [`GroupsRepository::update`],
//! so cross-field rules (for example "schedule must fall inside the period")
//! are checked atomically.

use crate::errors::ApiError;
use crate::models::{
    Destination, GroupMember, ImageAttachment, MemberRole, ScheduleEntry, TravelPeriod,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

/// A pending invitation into a group.
#[derive(Debug, Clone)]
pub struct InviteRecord {
    /// Invited account email.
    pub email: String,

    /// When the invite was created.
    pub created_at: DateTime<Utc>,
}

/// Stored travelogue entry.
#[derive(Debug, Clone)]
pub struct TravelogueRecord {
    /// Travelogue identifier.
    pub id: Uuid,

    /// Author user id.
    pub author_id: i64,

    /// Title.
    pub title: String,

    /// Journal text.
    pub body: String,

    /// Attached image metadata, if any.
    pub image: Option<ImageAttachment>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Stored travel group.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    /// Group identifier.
    pub id: Uuid,

    /// Group name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// User id of the creator.
    pub created_by: i64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Current members; the creator joins as admin.
    pub members: Vec<GroupMember>,

    /// Pending invitations, keyed by invite id.
    pub invites: HashMap<Uuid, InviteRecord>,

    /// Selected destination, if chosen.
    pub destination: Option<Destination>,

    /// Selected travel period, if chosen.
    pub period: Option<TravelPeriod>,

    /// Itinerary entries.
    pub schedules: Vec<ScheduleEntry>,

    /// Trip journal entries, oldest first.
    pub travelogues: Vec<TravelogueRecord>,
}

impl GroupRecord {
    /// Look up a member by user id.
    #[must_use]
    pub fn member(&self, user_id: i64) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// Whether the user belongs to the group.
    #[must_use]
    pub fn is_member(&self, user_id: i64) -> bool {
        self.member(user_id).is_some()
    }

    /// Whether the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.member(user_id)
            .is_some_and(|m| m.role == MemberRole::Admin)
    }
}

fn group_not_found() -> ApiError {
    ApiError::NotFound("Travel group not found".to_string())
}

/// Repository for travel group operations.
pub struct GroupsRepository {
    groups: RwLock<HashMap<Uuid, GroupRecord>>,
}

impl GroupsRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a new group record.
    #[instrument(skip_all, fields(group_id = %record.id))]
    pub async fn insert(&self, record: GroupRecord) {
        let mut groups = self.groups.write().await;
        groups.insert(record.id, record);
    }

    /// Fetch a group by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no group has this id.
    pub async fn get(&self, id: Uuid) -> Result<GroupRecord, ApiError> {
        let groups = self.groups.read().await;
        groups.get(&id).cloned().ok_or_else(group_not_found)
    }

    /// List the groups a user belongs to.
    pub async fn list_for_user(&self, user_id: i64) -> Vec<GroupRecord> {
        let groups = self.groups.read().await;
        let mut result: Vec<GroupRecord> = groups
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        // HashMap iteration order is unstable; keep listings deterministic.
        result.sort_by_key(|g| g.created_at);
        result
    }

    /// Apply a mutation to a group under the write guard.
    ///
    /// The closure sees the record exclusively; whatever it returns (value or
    /// error) is passed through. Closures validate first and mutate last, so
    /// an `Err` leaves the record untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no group has this id, otherwise the
    /// closure's error.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut GroupRecord) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut groups = self.groups.write().await;
        let record = groups.get_mut(&id).ok_or_else(group_not_found)?;
        f(record)
    }

    /// Delete a group.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no group has this id.
    #[instrument(skip_all, fields(group_id = %id))]
    pub async fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let mut groups = self.groups.write().await;
        groups.remove(&id).map(|_| ()).ok_or_else(group_not_found)
    }

    /// Resolve an invite id to its group, scanning pending invites.
    pub async fn find_group_by_invite(&self, invite_id: Uuid) -> Option<Uuid> {
        let groups = self.groups.read().await;
        groups
            .values()
            .find(|g| g.invites.contains_key(&invite_id))
            .map(|g| g.id)
    }
}

impl Default for GroupsRepository {
    fn default() -> Self {
        Self::new()
    }
}
