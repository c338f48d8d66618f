//! Travel group lifecycle: creation, membership, invites, admin delegation.
//!
//! Authorization rules:
//! - Viewing a group requires membership
//! - Renaming, deleting, and delegating require the admin role
//! - Any member can invite; invites are bound to the invited email
//! - The admin must delegate before leaving

use crate::auth::UserIdentity;
use crate::errors::ApiError;
use crate::models::{
    CreateGroupRequest, DelegateAdminRequest, GroupMember, InviteRequest, InviteResponse,
    MemberRole, TravelGroupResponse, TravelGroupSummary, UpdateGroupRequest,
};
use crate::repositories::groups::{GroupRecord, InviteRecord};
use crate::repositories::{GroupsRepository, UsersRepository};
use chrono::Utc;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

fn members_only() -> ApiError {
    ApiError::Forbidden("Only group members can access this group".to_string())
}

fn admin_only() -> ApiError {
    ApiError::Forbidden("Only the group admin can do this".to_string())
}

/// Project a stored group into the detail response.
#[must_use]
pub fn to_response(record: &GroupRecord) -> TravelGroupResponse {
    TravelGroupResponse {
        id: record.id,
        name: record.name.clone(),
        description: record.description.clone(),
        created_by: record.created_by,
        members: record.members.clone(),
        destination: record.destination.clone(),
        period: record.period,
        created_at: record.created_at,
    }
}

fn to_summary(record: &GroupRecord) -> TravelGroupSummary {
    TravelGroupSummary {
        id: record.id,
        name: record.name.clone(),
        destination: record.destination.clone(),
        period: record.period,
        member_count: record.members.len(),
    }
}

/// Create a group; the creator joins as admin.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for malformed fields.
#[instrument(skip_all, fields(user_id = identity.user_id))]
pub async fn create_group(
    groups: &GroupsRepository,
    identity: &UserIdentity,
    request: CreateGroupRequest,
) -> Result<Uuid, ApiError> {
    request.validate().map_err(ApiError::BadRequest)?;

    let now = Utc::now();
    let record = GroupRecord {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        description: request.description,
        created_by: identity.user_id,
        created_at: now,
        members: vec![GroupMember {
            user_id: identity.user_id,
            name: identity.name.clone(),
            role: MemberRole::Admin,
            joined_at: now,
        }],
        invites: HashMap::new(),
        destination: None,
        period: None,
        schedules: Vec::new(),
        travelogues: Vec::new(),
    };
    let id = record.id;

    groups.insert(record).await;
    tracing::info!(target: "trip.services.group", group_id = %id, "Created travel group");
    Ok(id)
}

/// List the caller's groups.
pub async fn list_groups(groups: &GroupsRepository, user_id: i64) -> Vec<TravelGroupSummary> {
    groups
        .list_for_user(user_id)
        .await
        .iter()
        .map(to_summary)
        .collect()
}

/// Fetch group detail; members only.
///
/// # Errors
///
/// - `ApiError::NotFound` if the group does not exist
/// - `ApiError::Forbidden` if the caller is not a member
pub async fn get_group(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
) -> Result<TravelGroupResponse, ApiError> {
    let record = groups.get(group_id).await?;
    if !record.is_member(user_id) {
        return Err(members_only());
    }
    Ok(to_response(&record))
}

/// Update name/description; admin only.
///
/// # Errors
///
/// - `ApiError::BadRequest` if no change is requested or a field is malformed
/// - `ApiError::NotFound` / `ApiError::Forbidden` per the access rules
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn update_group(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    request: UpdateGroupRequest,
) -> Result<TravelGroupResponse, ApiError> {
    if !request.has_changes() {
        return Err(ApiError::BadRequest("No changes requested".to_string()));
    }
    request.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_admin(user_id) {
                return Err(admin_only());
            }
            if let Some(name) = request.name {
                record.name = name.trim().to_string();
            }
            if let Some(description) = request.description {
                record.description = description;
            }
            Ok(to_response(record))
        })
        .await
}

/// Delete a group; admin only.
///
/// # Errors
///
/// `ApiError::NotFound` / `ApiError::Forbidden` per the access rules.
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn delete_group(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
) -> Result<(), ApiError> {
    groups
        .update(group_id, |record| {
            if !record.is_admin(user_id) {
                return Err(admin_only());
            }
            Ok(())
        })
        .await?;

    groups.remove(group_id).await?;
    tracing::info!(target: "trip.services.group", group_id = %group_id, "Deleted travel group");
    Ok(())
}

/// Hand the admin role to another member.
///
/// # Errors
///
/// - `ApiError::Forbidden` if the caller is not the admin
/// - `ApiError::NotFound` if the target is not a member
/// - `ApiError::BadRequest` if the target already holds the role
#[instrument(skip_all, fields(group_id = %group_id, target = request.user_id))]
pub async fn delegate_admin(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    request: DelegateAdminRequest,
) -> Result<TravelGroupResponse, ApiError> {
    groups
        .update(group_id, |record| {
            if !record.is_admin(user_id) {
                return Err(admin_only());
            }
            if request.user_id == user_id {
                return Err(ApiError::BadRequest(
                    "User already holds the admin role".to_string(),
                ));
            }
            if !record.is_member(request.user_id) {
                return Err(ApiError::NotFound(
                    "Target user is not a member of this group".to_string(),
                ));
            }

            for member in &mut record.members {
                if member.user_id == user_id {
                    member.role = MemberRole::Member;
                } else if member.user_id == request.user_id {
                    member.role = MemberRole::Admin;
                }
            }
            Ok(to_response(record))
        })
        .await
}

/// Invite a registered user by email; members only.
///
/// # Errors
///
/// - `ApiError::NotFound` if no account has this email
/// - `ApiError::Conflict` if the user is already a member or already invited
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn invite(
    groups: &GroupsRepository,
    users: &UsersRepository,
    user_id: i64,
    group_id: Uuid,
    request: InviteRequest,
) -> Result<InviteResponse, ApiError> {
    request.validate().map_err(ApiError::BadRequest)?;

    let invited = users
        .find_by_email(&request.email)
        .await
        .ok_or_else(|| ApiError::NotFound("No account with this email".to_string()))?;

    let invite_id = Uuid::new_v4();
    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            if record.is_member(invited.id) {
                return Err(ApiError::Conflict(
                    "User is already a member of this group".to_string(),
                ));
            }
            if record.invites.values().any(|i| i.email == invited.email) {
                return Err(ApiError::Conflict(
                    "An invite for this email is already pending".to_string(),
                ));
            }

            record.invites.insert(
                invite_id,
                InviteRecord {
                    email: invited.email.clone(),
                    created_at: Utc::now(),
                },
            );
            Ok(InviteResponse {
                invite_id,
                group_id: record.id,
                email: invited.email.clone(),
            })
        })
        .await
}

/// Accept an invite; the caller joins as a regular member.
///
/// # Errors
///
/// - `ApiError::NotFound` if the invite does not exist
/// - `ApiError::Forbidden` if the invite was issued to a different email
/// - `ApiError::Conflict` if the caller is already a member
#[instrument(skip_all, fields(invite_id = %invite_id, user_id = identity.user_id))]
pub async fn accept_invite(
    groups: &GroupsRepository,
    identity: &UserIdentity,
    invite_id: Uuid,
) -> Result<TravelGroupResponse, ApiError> {
    let group_id = groups
        .find_group_by_invite(invite_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Invite not found".to_string()))?;

    groups
        .update(group_id, |record| {
            let invite = record
                .invites
                .get(&invite_id)
                .ok_or_else(|| ApiError::NotFound("Invite not found".to_string()))?;
            if invite.email != identity.email {
                return Err(ApiError::Forbidden(
                    "This invite was issued to a different account".to_string(),
                ));
            }
            if record.is_member(identity.user_id) {
                record.invites.remove(&invite_id);
                return Err(ApiError::Conflict(
                    "User is already a member of this group".to_string(),
                ));
            }

            record.invites.remove(&invite_id);
            record.members.push(GroupMember {
                user_id: identity.user_id,
                name: identity.name.clone(),
                role: MemberRole::Member,
                joined_at: Utc::now(),
            });
            Ok(to_response(record))
        })
        .await
}

/// Leave a group. The admin must delegate first; the last member leaving
/// deletes the group.
///
/// # Errors
///
/// - `ApiError::Forbidden` if the caller is not a member
/// - `ApiError::Conflict` if the caller is the admin of a group with other
///   members
#[instrument(skip_all, fields(group_id = %group_id, user_id = user_id))]
pub async fn leave_group(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
) -> Result<(), ApiError> {
    let now_empty = groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            if record.is_admin(user_id) && record.members.len() > 1 {
                return Err(ApiError::Conflict(
                    "Delegate the admin role before leaving".to_string(),
                ));
            }

            record.members.retain(|m| m.user_id != user_id);
            Ok(record.members.is_empty())
        })
        .await?;

    if now_empty {
        groups.remove(group_id).await?;
        tracing::info!(
            target: "trip.services.group",
            group_id = %group_id,
            "Removed empty travel group"
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn identity(user_id: i64, email: &str) -> UserIdentity {
        UserIdentity {
            user_id,
            email: email.to_string(),
            name: format!("User {user_id}"),
            profile_image: String::new(),
            state: 1,
        }
    }

    async fn seeded_users(users: &UsersRepository, emails: &[&str]) {
        for email in emails {
            users
                .insert(email, "Name", None, "hash".to_string())
                .await
                .unwrap();
        }
    }

    async fn group_with_admin(groups: &GroupsRepository, admin: &UserIdentity) -> Uuid {
        create_group(
            groups,
            admin,
            CreateGroupRequest {
                name: "Jeju 2025".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap()
    }

    /// Invite `member` into the group and accept as them.
    async fn join(
        groups: &GroupsRepository,
        users: &UsersRepository,
        admin_id: i64,
        group_id: Uuid,
        member: &UserIdentity,
    ) {
        let invite_response = invite(
            groups,
            users,
            admin_id,
            group_id,
            InviteRequest {
                email: member.email.clone(),
            },
        )
        .await
        .unwrap();
        accept_invite(groups, member, invite_response.invite_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_creator_becomes_admin() {
        let groups = GroupsRepository::new();
        let admin = identity(1, "a@example.com");

        let group_id = group_with_admin(&groups, &admin).await;

        let detail = get_group(&groups, 1, group_id).await.unwrap();
        assert_eq!(detail.members.len(), 1);
        assert_eq!(detail.members[0].role, MemberRole::Admin);
        assert_eq!(detail.created_by, 1);
    }

    #[tokio::test]
    async fn test_non_member_cannot_view_detail() {
        let groups = GroupsRepository::new();
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        let result = get_group(&groups, 2, group_id).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_requires_admin() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let admin = identity(1, "a@example.com");
        let member = identity(2, "b@example.com");
        let group_id = group_with_admin(&groups, &admin).await;
        join(&groups, &users, 1, group_id, &member).await;

        let request = UpdateGroupRequest {
            name: Some("Busan 2025".to_string()),
            description: None,
        };
        let result = update_group(&groups, member.user_id, group_id, request.clone()).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let updated = update_group(&groups, 1, group_id, request).await.unwrap();
        assert_eq!(updated.name, "Busan 2025");
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let groups = GroupsRepository::new();
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        let result = update_group(&groups, 1, group_id, UpdateGroupRequest::default()).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_invite_and_accept_flow() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let admin = identity(1, "a@example.com");
        let invitee = identity(2, "b@example.com");
        let group_id = group_with_admin(&groups, &admin).await;

        let invite_response = invite(
            &groups,
            &users,
            1,
            group_id,
            InviteRequest {
                email: "b@example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(invite_response.group_id, group_id);

        let detail = accept_invite(&groups, &invitee, invite_response.invite_id)
            .await
            .unwrap();
        assert_eq!(detail.members.len(), 2);
        assert!(detail
            .members
            .iter()
            .any(|m| m.user_id == 2 && m.role == MemberRole::Member));

        // Invite is consumed.
        let again = accept_invite(&groups, &invitee, invite_response.invite_id).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invite_requires_registered_email() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        let result = invite(
            &groups,
            &users,
            1,
            group_id,
            InviteRequest {
                email: "ghost@example.com".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invite_for_wrong_account_cannot_be_accepted() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        let invite_response = invite(
            &groups,
            &users,
            1,
            group_id,
            InviteRequest {
                email: "b@example.com".to_string(),
            },
        )
        .await
        .unwrap();

        let stranger = identity(99, "stranger@example.com");
        let result = accept_invite(&groups, &stranger, invite_response.invite_id).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delegate_admin_swaps_roles() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let admin = identity(1, "a@example.com");
        let member = identity(2, "b@example.com");
        let group_id = group_with_admin(&groups, &admin).await;
        join(&groups, &users, 1, group_id, &member).await;

        let detail = delegate_admin(
            &groups,
            1,
            group_id,
            DelegateAdminRequest { user_id: 2 },
        )
        .await
        .unwrap();

        let roles: Vec<(i64, MemberRole)> = detail
            .members
            .iter()
            .map(|m| (m.user_id, m.role))
            .collect();
        assert!(roles.contains(&(1, MemberRole::Member)));
        assert!(roles.contains(&(2, MemberRole::Admin)));
    }

    #[tokio::test]
    async fn test_delegate_to_non_member_fails() {
        let groups = GroupsRepository::new();
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        let result =
            delegate_admin(&groups, 1, group_id, DelegateAdminRequest { user_id: 42 }).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_must_delegate_before_leaving() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let admin = identity(1, "a@example.com");
        let member = identity(2, "b@example.com");
        let group_id = group_with_admin(&groups, &admin).await;
        join(&groups, &users, 1, group_id, &member).await;

        let result = leave_group(&groups, 1, group_id).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        // Regular members may leave freely.
        leave_group(&groups, 2, group_id).await.unwrap();
        let detail = get_group(&groups, 1, group_id).await.unwrap();
        assert_eq!(detail.members.len(), 1);
    }

    #[tokio::test]
    async fn test_last_member_leaving_deletes_group() {
        let groups = GroupsRepository::new();
        let group_id = group_with_admin(&groups, &identity(1, "a@example.com")).await;

        leave_group(&groups, 1, group_id).await.unwrap();

        let result = get_group(&groups, 1, group_id).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_group_requires_admin() {
        let groups = GroupsRepository::new();
        let users = UsersRepository::new();
        seeded_users(&users, &["a@example.com", "b@example.com"]).await;
        let admin = identity(1, "a@example.com");
        let member = identity(2, "b@example.com");
        let group_id = group_with_admin(&groups, &admin).await;
        join(&groups, &users, 1, group_id, &member).await;

        assert!(matches!(
            delete_group(&groups, 2, group_id).await,
            Err(ApiError::Forbidden(_))
        ));

        delete_group(&groups, 1, group_id).await.unwrap();
        assert!(matches!(
            get_group(&groups, 1, group_id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_groups_only_shows_memberships() {
        let groups = GroupsRepository::new();
        let a = identity(1, "a@example.com");
        let b = identity(2, "b@example.com");
        group_with_admin(&groups, &a).await;
        group_with_admin(&groups, &a).await;
        group_with_admin(&groups, &b).await;

        assert_eq!(list_groups(&groups, 1).await.len(), 2);
        assert_eq!(list_groups(&groups, 2).await.len(), 1);
        assert!(list_groups(&groups, 3).await.is_empty());
    }
}
