//! Travel group handlers.
//!
//! - `POST /travelgroups` - create group
//! - `GET /travelgroups` - list the caller's groups
//! - `GET /travelgroups/{id}` - group detail (members only)
//! - `PATCH /travelgroups/{id}` - update (admin only)
//! - `DELETE /travelgroups/{id}` - delete (admin only)
//! - `PATCH /travelgroups/{id}/admin` - delegate admin (admin only)
//! - `POST /travelgroups/{id}/invites` - invite by email (members only)
//! - `POST /travelgroups/invites/{invite_id}/accept` - accept an invite
//! - `DELETE /travelgroups/{id}/members/me` - leave the group

use crate::auth::AccessTokenClaims;
use crate::errors::ApiError;
use crate::models::{
    CreateGroupRequest, DelegateAdminRequest, InviteRequest, InviteResponse, TravelGroupResponse,
    TravelGroupSummary, UpdateGroupRequest,
};
use crate::routes::AppState;
use crate::services::group_service;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Handler for POST /travelgroups
#[instrument(skip_all)]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, String), ApiError> {
    group_service::create_group(&state.stores.groups, &claims.identity, request).await?;
    Ok((StatusCode::CREATED, "모임 생성이 완료되었습니다.".to_string()))
}

/// Handler for GET /travelgroups
#[instrument(skip_all)]
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
) -> Json<Vec<TravelGroupSummary>> {
    Json(group_service::list_groups(&state.stores.groups, claims.user_id()).await)
}

/// Handler for GET /travelgroups/{id}
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<TravelGroupResponse>, ApiError> {
    let detail = group_service::get_group(&state.stores.groups, claims.user_id(), group_id).await?;
    Ok(Json(detail))
}

/// Handler for PATCH /travelgroups/{id}
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<TravelGroupResponse>, ApiError> {
    let detail =
        group_service::update_group(&state.stores.groups, claims.user_id(), group_id, request)
            .await?;
    Ok(Json(detail))
}

/// Handler for DELETE /travelgroups/{id}
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    group_service::delete_group(&state.stores.groups, claims.user_id(), group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PATCH /travelgroups/{id}/admin
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn delegate_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<DelegateAdminRequest>,
) -> Result<Json<TravelGroupResponse>, ApiError> {
    let detail =
        group_service::delegate_admin(&state.stores.groups, claims.user_id(), group_id, request)
            .await?;
    Ok(Json(detail))
}

/// Handler for POST /travelgroups/{id}/invites
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn invite(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), ApiError> {
    let invite = group_service::invite(
        &state.stores.groups,
        &state.stores.users,
        claims.user_id(),
        group_id,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(invite)))
}

/// Handler for POST /travelgroups/invites/{invite_id}/accept
#[instrument(skip_all, fields(invite_id = %invite_id))]
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(invite_id): Path<Uuid>,
) -> Result<Json<TravelGroupResponse>, ApiError> {
    let detail =
        group_service::accept_invite(&state.stores.groups, &claims.identity, invite_id).await?;
    Ok(Json(detail))
}

/// Handler for DELETE /travelgroups/{id}/members/me
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn leave_group(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    group_service::leave_group(&state.stores.groups, claims.user_id(), group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
