//! Travel period and itinerary management.
//!
//! Rules enforced here:
//! - Period start must not be after period end (admin-only write)
//! - Shrinking the period under existing entries is rejected
//! - Entries must fall inside the period
//! - Two entries on the same day must not overlap in time

use crate::errors::ApiError;
use crate::models::{
    CreateScheduleRequest, ScheduleEntry, TravelPeriod, UpdateScheduleRequest,
};
use crate::repositories::groups::GroupRecord;
use crate::repositories::GroupsRepository;
use tracing::instrument;
use uuid::Uuid;

fn members_only() -> ApiError {
    ApiError::Forbidden("Only group members can access this group".to_string())
}

fn admin_only() -> ApiError {
    ApiError::Forbidden("Only the group admin can do this".to_string())
}

fn entry_not_found() -> ApiError {
    ApiError::NotFound("Schedule entry not found".to_string())
}

/// Set the travel period; admin only.
///
/// # Errors
///
/// - `ApiError::BadRequest` if start is after end
/// - `ApiError::Conflict` if existing entries fall outside the new period
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn set_period(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    period: TravelPeriod,
) -> Result<TravelPeriod, ApiError> {
    period.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_admin(user_id) {
                return Err(admin_only());
            }
            if record.schedules.iter().any(|s| !period.contains(s.day)) {
                return Err(ApiError::Conflict(
                    "Existing schedule entries fall outside the new period".to_string(),
                ));
            }
            record.period = Some(period);
            Ok(period)
        })
        .await
}

/// Whether `candidate` overlaps any same-day entry other than `skip`.
fn overlaps(record: &GroupRecord, candidate: &ScheduleEntry, skip: Option<Uuid>) -> bool {
    record.schedules.iter().any(|other| {
        Some(other.id) != skip
            && other.day == candidate.day
            && candidate.starts_at < other.ends_at
            && other.starts_at < candidate.ends_at
    })
}

/// Add an itinerary entry; members only.
///
/// # Errors
///
/// - `ApiError::Conflict` if no period is set, or the entry overlaps another
///   on the same day
/// - `ApiError::BadRequest` if the day is outside the period or a field is
///   malformed
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn create_schedule(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    request: CreateScheduleRequest,
) -> Result<ScheduleEntry, ApiError> {
    request.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            let period = record.period.ok_or_else(|| {
                ApiError::Conflict(
                    "Set the travel period before adding schedule entries".to_string(),
                )
            })?;
            if !period.contains(request.day) {
                return Err(ApiError::BadRequest(
                    "Schedule day is outside the travel period".to_string(),
                ));
            }

            let entry = ScheduleEntry {
                id: Uuid::new_v4(),
                day: request.day,
                starts_at: request.starts_at,
                ends_at: request.ends_at,
                title: request.title.trim().to_string(),
                memo: request.memo,
            };
            if overlaps(record, &entry, None) {
                return Err(ApiError::Conflict(
                    "Schedule overlaps an existing entry on that day".to_string(),
                ));
            }

            record.schedules.push(entry.clone());
            Ok(entry)
        })
        .await
}

/// List itinerary entries ordered by day, then start time; members only.
///
/// # Errors
///
/// `ApiError::NotFound` / `ApiError::Forbidden` per the access rules.
pub async fn list_schedules(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
) -> Result<Vec<ScheduleEntry>, ApiError> {
    let record = groups.get(group_id).await?;
    if !record.is_member(user_id) {
        return Err(members_only());
    }

    let mut entries = record.schedules;
    entries.sort_by_key(|e| (e.day, e.starts_at));
    Ok(entries)
}

/// Update an itinerary entry; members only. The same period and overlap rules
/// as creation apply to the merged entry.
///
/// # Errors
///
/// See [`create_schedule`]; additionally `ApiError::NotFound` for an unknown
/// entry and `ApiError::BadRequest` for an empty update.
#[instrument(skip_all, fields(group_id = %group_id, schedule_id = %schedule_id))]
pub async fn update_schedule(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    schedule_id: Uuid,
    request: UpdateScheduleRequest,
) -> Result<ScheduleEntry, ApiError> {
    if !request.has_changes() {
        return Err(ApiError::BadRequest("No changes requested".to_string()));
    }
    request.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            let current = record
                .schedules
                .iter()
                .find(|s| s.id == schedule_id)
                .ok_or_else(entry_not_found)?;

            let merged = ScheduleEntry {
                id: current.id,
                day: request.day.unwrap_or(current.day),
                starts_at: request.starts_at.unwrap_or(current.starts_at),
                ends_at: request.ends_at.unwrap_or(current.ends_at),
                title: request
                    .title
                    .as_deref()
                    .map_or_else(|| current.title.clone(), |t| t.trim().to_string()),
                memo: request.memo.clone().or_else(|| current.memo.clone()),
            };

            if merged.starts_at >= merged.ends_at {
                return Err(ApiError::BadRequest(
                    "Schedule start time must be before end time".to_string(),
                ));
            }
            let period = record.period.ok_or_else(|| {
                ApiError::Conflict(
                    "Set the travel period before adding schedule entries".to_string(),
                )
            })?;
            if !period.contains(merged.day) {
                return Err(ApiError::BadRequest(
                    "Schedule day is outside the travel period".to_string(),
                ));
            }
            if overlaps(record, &merged, Some(merged.id)) {
                return Err(ApiError::Conflict(
                    "Schedule overlaps an existing entry on that day".to_string(),
                ));
            }

            for entry in &mut record.schedules {
                if entry.id == schedule_id {
                    *entry = merged.clone();
                }
            }
            Ok(merged)
        })
        .await
}

/// Delete an itinerary entry; members only.
///
/// # Errors
///
/// `ApiError::NotFound` for an unknown entry; access rules as elsewhere.
#[instrument(skip_all, fields(group_id = %group_id, schedule_id = %schedule_id))]
pub async fn delete_schedule(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    schedule_id: Uuid,
) -> Result<(), ApiError> {
    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            let before = record.schedules.len();
            record.schedules.retain(|s| s.id != schedule_id);
            if record.schedules.len() == before {
                return Err(entry_not_found());
            }
            Ok(())
        })
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::auth::UserIdentity;
    use crate::models::CreateGroupRequest;
    use crate::services::group_service;
    use chrono::{NaiveDate, NaiveTime};

    fn identity(user_id: i64) -> UserIdentity {
        UserIdentity {
            user_id,
            email: format!("u{user_id}@example.com"),
            name: format!("User {user_id}"),
            profile_image: String::new(),
            state: 1,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn july_period() -> TravelPeriod {
        TravelPeriod {
            start_date: day(1),
            end_date: day(5),
        }
    }

    fn entry_request(d: u32, start: u32, end: u32) -> CreateScheduleRequest {
        CreateScheduleRequest {
            day: day(d),
            starts_at: time(start),
            ends_at: time(end),
            title: "Activity".to_string(),
            memo: None,
        }
    }

    async fn group_with_period(groups: &GroupsRepository) -> Uuid {
        let group_id = group_service::create_group(
            groups,
            &identity(1),
            CreateGroupRequest {
                name: "Trip".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        set_period(groups, 1, group_id, july_period()).await.unwrap();
        group_id
    }

    #[tokio::test]
    async fn test_set_period_is_admin_only() {
        let groups = GroupsRepository::new();
        let group_id = group_service::create_group(
            &groups,
            &identity(1),
            CreateGroupRequest {
                name: "Trip".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let result = set_period(&groups, 2, group_id, july_period()).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_reversed_period_is_rejected() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;

        let reversed = TravelPeriod {
            start_date: day(5),
            end_date: day(1),
        };
        let result = set_period(&groups, 1, group_id, reversed).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_schedule_requires_period() {
        let groups = GroupsRepository::new();
        let group_id = group_service::create_group(
            &groups,
            &identity(1),
            CreateGroupRequest {
                name: "Trip".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let result = create_schedule(&groups, 1, group_id, entry_request(2, 10, 12)).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_schedule_must_fall_inside_period() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;

        let result = create_schedule(&groups, 1, group_id, entry_request(9, 10, 12)).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_same_day_overlap_is_rejected() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;

        create_schedule(&groups, 1, group_id, entry_request(2, 10, 12))
            .await
            .unwrap();

        // Partial overlap.
        let result = create_schedule(&groups, 1, group_id, entry_request(2, 11, 13)).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        // Back-to-back entries touch but do not overlap.
        create_schedule(&groups, 1, group_id, entry_request(2, 12, 14))
            .await
            .unwrap();

        // Same times on a different day are fine.
        create_schedule(&groups, 1, group_id, entry_request(3, 10, 12))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_listing_orders_by_day_then_time() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;

        create_schedule(&groups, 1, group_id, entry_request(3, 9, 10))
            .await
            .unwrap();
        create_schedule(&groups, 1, group_id, entry_request(2, 15, 16))
            .await
            .unwrap();
        create_schedule(&groups, 1, group_id, entry_request(2, 8, 9))
            .await
            .unwrap();

        let entries = list_schedules(&groups, 1, group_id).await.unwrap();
        let order: Vec<(NaiveDate, NaiveTime)> =
            entries.iter().map(|e| (e.day, e.starts_at)).collect();
        assert_eq!(
            order,
            vec![(day(2), time(8)), (day(2), time(15)), (day(3), time(9))]
        );
    }

    #[tokio::test]
    async fn test_update_merges_and_revalidates() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;

        let first = create_schedule(&groups, 1, group_id, entry_request(2, 10, 12))
            .await
            .unwrap();
        create_schedule(&groups, 1, group_id, entry_request(2, 14, 16))
            .await
            .unwrap();

        // Moving the first entry onto the second must be rejected.
        let result = update_schedule(
            &groups,
            1,
            group_id,
            first.id,
            UpdateScheduleRequest {
                starts_at: Some(time(15)),
                ends_at: Some(time(17)),
                ..UpdateScheduleRequest::default()
            },
        )
        .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        // A clean move succeeds and keeps unmentioned fields.
        let updated = update_schedule(
            &groups,
            1,
            group_id,
            first.id,
            UpdateScheduleRequest {
                day: Some(day(4)),
                ..UpdateScheduleRequest::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.day, day(4));
        assert_eq!(updated.starts_at, time(10));
        assert_eq!(updated.title, "Activity");
    }

    #[tokio::test]
    async fn test_update_empty_request_is_rejected() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;
        let entry = create_schedule(&groups, 1, group_id, entry_request(2, 10, 12))
            .await
            .unwrap();

        let result = update_schedule(
            &groups,
            1,
            group_id,
            entry.id,
            UpdateScheduleRequest::default(),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_shrinking_period_under_entries_conflicts() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;
        create_schedule(&groups, 1, group_id, entry_request(5, 10, 12))
            .await
            .unwrap();

        let shorter = TravelPeriod {
            start_date: day(1),
            end_date: day(3),
        };
        let result = set_period(&groups, 1, group_id, shorter).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_schedule() {
        let groups = GroupsRepository::new();
        let group_id = group_with_period(&groups).await;
        let entry = create_schedule(&groups, 1, group_id, entry_request(2, 10, 12))
            .await
            .unwrap();

        delete_schedule(&groups, 1, group_id, entry.id).await.unwrap();
        assert!(list_schedules(&groups, 1, group_id).await.unwrap().is_empty());

        let again = delete_schedule(&groups, 1, group_id, entry.id).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }
}
