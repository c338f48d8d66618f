//! Trip service models.
//!
//! Data types crossing the HTTP boundary: domain DTOs, request bodies with
//! validation, and pagination envelopes.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use common::secret::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum travel group name length.
pub const MAX_GROUP_NAME_LENGTH: usize = 60;

/// Maximum schedule entry title length.
pub const MAX_SCHEDULE_TITLE_LENGTH: usize = 100;

/// Maximum travelogue title length.
pub const MAX_TRAVELOGUE_TITLE_LENGTH: usize = 120;

/// Maximum page size for travelogue listings.
pub const MAX_PAGE_SIZE: usize = 50;

/// Default page size for travelogue listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Account state values carried in token claims.
pub mod account_state {
    /// Normal, usable account.
    pub const ACTIVE: i32 = 1;

    /// Deactivated account; tokens still decode but logins are refused.
    pub const DORMANT: i32 = 0;
}

// ============================================================================
// Membership
// ============================================================================

/// Role of a user inside a travel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Group owner; the only role allowed to mutate group-wide state.
    Admin,

    /// Regular member.
    Member,
}

impl MemberRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }
}

/// A member of a travel group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    /// Numeric user identifier.
    pub user_id: i64,

    /// Display name at join time.
    pub name: String,

    /// Membership role.
    pub role: MemberRole,

    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Travel groups
// ============================================================================

/// Selected destination for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Province name from the location catalog.
    pub province: String,

    /// City name within the province.
    pub city: String,
}

/// Travel period for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPeriod {
    /// First travel day (inclusive).
    pub start_date: NaiveDate,

    /// Last travel day (inclusive).
    pub end_date: NaiveDate,
}

impl TravelPeriod {
    /// Check the period is well-formed (start not after end).
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_date > self.end_date {
            return Err("travel period start date must not be after end date".to_string());
        }
        Ok(())
    }

    /// Whether a day falls inside the period (inclusive bounds).
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Full travel group detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelGroupResponse {
    /// Group identifier.
    pub id: Uuid,

    /// Group name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// User id of the creator.
    pub created_by: i64,

    /// Current members.
    pub members: Vec<GroupMember>,

    /// Selected destination, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,

    /// Selected travel period, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TravelPeriod>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Compact group listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelGroupSummary {
    /// Group identifier.
    pub id: Uuid,

    /// Group name.
    pub name: String,

    /// Selected destination, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,

    /// Selected travel period, if chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TravelPeriod>,

    /// Number of members.
    pub member_count: usize,
}

/// Request body for `POST /travelgroups`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl CreateGroupRequest {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("group name must not be empty".to_string());
        }
        if name.chars().count() > MAX_GROUP_NAME_LENGTH {
            return Err(format!(
                "group name must be at most {MAX_GROUP_NAME_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

/// Request body for `PATCH /travelgroups/{id}`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGroupRequest {
    /// New group name.
    pub name: Option<String>,

    /// New description.
    pub description: Option<String>,
}

impl UpdateGroupRequest {
    /// Whether the request carries any change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.description.is_some()
    }

    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err("group name must not be empty".to_string());
            }
            if name.chars().count() > MAX_GROUP_NAME_LENGTH {
                return Err(format!(
                    "group name must be at most {MAX_GROUP_NAME_LENGTH} characters"
                ));
            }
        }
        Ok(())
    }
}

/// Request body for `PATCH /travelgroups/{id}/admin`.
#[derive(Debug, Clone, Deserialize)]
pub struct DelegateAdminRequest {
    /// Member receiving the admin role.
    pub user_id: i64,
}

/// Request body for `POST /travelgroups/{id}/invites`.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    /// Email of the registered user to invite.
    pub email: String,
}

impl InviteRequest {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err("invite email is not a valid address".to_string());
        }
        Ok(())
    }
}

/// Response body for a created invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    /// Invite identifier, used for acceptance.
    pub invite_id: Uuid,

    /// Target group.
    pub group_id: Uuid,

    /// Invited email.
    pub email: String,
}

/// Request body for `PUT /travelgroups/{id}/location`.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectLocationRequest {
    /// Province name from the catalog.
    pub province: String,

    /// City name within the province.
    pub city: String,
}

/// Request body for `POST /travelgroups/{id}/location/random`.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomLocationRequest {
    /// Province to draw a city from.
    pub province: String,
}

// ============================================================================
// Schedules (itinerary)
// ============================================================================

/// A single itinerary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Entry identifier.
    pub id: Uuid,

    /// Travel day this entry belongs to.
    pub day: NaiveDate,

    /// Start time within the day.
    pub starts_at: NaiveTime,

    /// End time within the day.
    pub ends_at: NaiveTime,

    /// Entry title (place or activity).
    pub title: String,

    /// Optional free-form memo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Request body for `POST /travelgroups/{id}/schedules`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    /// Travel day this entry belongs to.
    pub day: NaiveDate,

    /// Start time within the day.
    pub starts_at: NaiveTime,

    /// End time within the day.
    pub ends_at: NaiveTime,

    /// Entry title (place or activity).
    pub title: String,

    /// Optional free-form memo.
    #[serde(default)]
    pub memo: Option<String>,
}

impl CreateScheduleRequest {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("schedule title must not be empty".to_string());
        }
        if self.title.chars().count() > MAX_SCHEDULE_TITLE_LENGTH {
            return Err(format!(
                "schedule title must be at most {MAX_SCHEDULE_TITLE_LENGTH} characters"
            ));
        }
        if self.starts_at >= self.ends_at {
            return Err("schedule start time must be before end time".to_string());
        }
        Ok(())
    }
}

/// Request body for `PATCH /travelgroups/{id}/schedules/{schedule_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    /// New travel day.
    pub day: Option<NaiveDate>,

    /// New start time.
    pub starts_at: Option<NaiveTime>,

    /// New end time.
    pub ends_at: Option<NaiveTime>,

    /// New title.
    pub title: Option<String>,

    /// New memo.
    pub memo: Option<String>,
}

impl UpdateScheduleRequest {
    /// Whether the request carries any change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.day.is_some()
            || self.starts_at.is_some()
            || self.ends_at.is_some()
            || self.title.is_some()
            || self.memo.is_some()
    }

    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("schedule title must not be empty".to_string());
            }
            if title.chars().count() > MAX_SCHEDULE_TITLE_LENGTH {
                return Err(format!(
                    "schedule title must be at most {MAX_SCHEDULE_TITLE_LENGTH} characters"
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Travelogues
// ============================================================================

/// Metadata of an uploaded travelogue image.
///
/// Only the attachment metadata is kept; binary storage is delegated to an
/// external system and out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Original file name as uploaded.
    pub file_name: String,

    /// Declared content type.
    pub content_type: String,

    /// Upload size in bytes.
    pub size_bytes: usize,
}

/// A trip journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelogueResponse {
    /// Travelogue identifier.
    pub id: Uuid,

    /// Owning group.
    pub group_id: Uuid,

    /// Author user id.
    pub author_id: i64,

    /// Title.
    pub title: String,

    /// Journal text.
    pub body: String,

    /// Attached image metadata, if an image was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Metadata part of a travelogue multipart upload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTravelogue {
    /// Title.
    pub title: String,

    /// Journal text.
    pub body: String,
}

impl NewTravelogue {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("travelogue title must not be empty".to_string());
        }
        if self.title.chars().count() > MAX_TRAVELOGUE_TITLE_LENGTH {
            return Err(format!(
                "travelogue title must be at most {MAX_TRAVELOGUE_TITLE_LENGTH} characters"
            ));
        }
        if self.body.trim().is_empty() {
            return Err("travelogue body must not be empty".to_string());
        }
        Ok(())
    }
}

/// Metadata part of a travelogue update. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTravelogue {
    /// New title.
    pub title: Option<String>,

    /// New body.
    pub body: Option<String>,
}

impl UpdateTravelogue {
    /// Whether the request carries any change (an image part also counts,
    /// checked by the handler).
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.body.is_some()
    }

    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("travelogue title must not be empty".to_string());
            }
            if title.chars().count() > MAX_TRAVELOGUE_TITLE_LENGTH {
                return Err(format!(
                    "travelogue title must be at most {MAX_TRAVELOGUE_TITLE_LENGTH} characters"
                ));
            }
        }
        if let Some(body) = &self.body {
            if body.trim().is_empty() {
                return Err("travelogue body must not be empty".to_string());
            }
        }
        Ok(())
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Query parameters for paginated listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,

    /// Page size; clamped to `1..=MAX_PAGE_SIZE`.
    #[serde(default = "default_page_size")]
    pub size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Page size clamped into the allowed range.
    #[must_use]
    pub fn clamped_size(&self) -> usize {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Zero-based page index.
    pub page: usize,

    /// Requested (clamped) page size.
    pub size: usize,

    /// Total item count across all pages.
    pub total: usize,
}

// ============================================================================
// Authentication bodies
// ============================================================================

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Account email; unique.
    pub email: String,

    /// Plaintext password; hashed with bcrypt before storage.
    pub password: SecretString,

    /// Display name.
    pub name: String,

    /// Optional profile image reference.
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl SignupRequest {
    /// Validate field constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err("email is not a valid address".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Response body for a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Assigned user id.
    pub user_id: i64,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,

    /// Plaintext password.
    pub password: SecretString,
}

/// Health check response for `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status ("healthy").
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_as_str() {
        assert_eq!(MemberRole::Admin.as_str(), "admin");
        assert_eq!(MemberRole::Member.as_str(), "member");
    }

    #[test]
    fn test_travel_period_validate() {
        let ok = TravelPeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
        };
        assert!(ok.validate().is_ok());

        let single_day = TravelPeriod {
            start_date: ok.start_date,
            end_date: ok.start_date,
        };
        assert!(single_day.validate().is_ok());

        let reversed = TravelPeriod {
            start_date: ok.end_date,
            end_date: ok.start_date,
        };
        assert!(reversed.validate().is_err());
    }

    #[test]
    fn test_travel_period_contains_is_inclusive() {
        let period = TravelPeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
        };

        assert!(period.contains(period.start_date));
        assert!(period.contains(period.end_date));
        assert!(period.contains(NaiveDate::from_ymd_opt(2025, 7, 3).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 7, 6).unwrap()));
    }

    #[test]
    fn test_create_group_request_validation() {
        let ok = CreateGroupRequest {
            name: "Jeju 2025".to_string(),
            description: String::new(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateGroupRequest {
            name: "   ".to_string(),
            description: String::new(),
        };
        assert!(empty.validate().is_err());

        let long = CreateGroupRequest {
            name: "x".repeat(MAX_GROUP_NAME_LENGTH + 1),
            description: String::new(),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_update_group_request_has_changes() {
        assert!(!UpdateGroupRequest::default().has_changes());
        assert!(UpdateGroupRequest {
            name: Some("New".to_string()),
            description: None,
        }
        .has_changes());
    }

    #[test]
    fn test_invite_request_validation() {
        assert!(InviteRequest {
            email: "friend@example.com".to_string()
        }
        .validate()
        .is_ok());
        assert!(InviteRequest {
            email: "not-an-email".to_string()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_create_schedule_request_validation() {
        let base = CreateScheduleRequest {
            day: NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            starts_at: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            title: "Hallasan hike".to_string(),
            memo: None,
        };
        assert!(base.validate().is_ok());

        let reversed = CreateScheduleRequest {
            starts_at: base.ends_at,
            ends_at: base.starts_at,
            ..base.clone()
        };
        assert!(reversed.validate().is_err());

        let zero_length = CreateScheduleRequest {
            ends_at: base.starts_at,
            ..base.clone()
        };
        assert!(zero_length.validate().is_err());

        let untitled = CreateScheduleRequest {
            title: " ".to_string(),
            ..base
        };
        assert!(untitled.validate().is_err());
    }

    #[test]
    fn test_new_travelogue_validation() {
        let ok = NewTravelogue {
            title: "Day one".to_string(),
            body: "We arrived.".to_string(),
        };
        assert!(ok.validate().is_ok());

        let no_body = NewTravelogue {
            title: "Day one".to_string(),
            body: "  ".to_string(),
        };
        assert!(no_body.validate().is_err());
    }

    #[test]
    fn test_page_params_clamping() {
        assert_eq!(
            PageParams { page: 0, size: 0 }.clamped_size(),
            1
        );
        assert_eq!(
            PageParams { page: 0, size: 500 }.clamped_size(),
            MAX_PAGE_SIZE
        );
        assert_eq!(PageParams::default().clamped_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_signup_request_debug_redacts_password() {
        let req = SignupRequest {
            email: "new@example.com".to_string(),
            password: SecretString::from("hunter2"),
            name: "New".to_string(),
            profile_image: None,
        };

        let debug_str = format!("{req:?}");
        assert!(!debug_str.contains("hunter2"));
    }
}
