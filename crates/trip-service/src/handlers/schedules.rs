//! Travel period and itinerary handlers.
//!
//! - `PUT /travelgroups/{id}/period` - set travel period (admin only)
//! - `POST /travelgroups/{id}/schedules` - add itinerary entry
//! - `GET /travelgroups/{id}/schedules` - day-ordered listing
//! - `PATCH /travelgroups/{id}/schedules/{schedule_id}` - update entry
//! - `DELETE /travelgroups/{id}/schedules/{schedule_id}` - delete entry

use crate::auth::AccessTokenClaims;
use crate::errors::ApiError;
use crate::models::{
    CreateScheduleRequest, ScheduleEntry, TravelPeriod, UpdateScheduleRequest,
};
use crate::routes::AppState;
use crate::services::schedule_service;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Handler for PUT /travelgroups/{id}/period
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn set_period(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(period): Json<TravelPeriod>,
) -> Result<Json<TravelPeriod>, ApiError> {
    let period =
        schedule_service::set_period(&state.stores.groups, claims.user_id(), group_id, period)
            .await?;
    Ok(Json(period))
}

/// Handler for POST /travelgroups/{id}/schedules
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleEntry>), ApiError> {
    let entry = schedule_service::create_schedule(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        request,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handler for GET /travelgroups/{id}/schedules
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleEntry>>, ApiError> {
    let entries =
        schedule_service::list_schedules(&state.stores.groups, claims.user_id(), group_id).await?;
    Ok(Json(entries))
}

/// Handler for PATCH /travelgroups/{id}/schedules/{schedule_id}
#[instrument(skip_all, fields(group_id = %group_id, schedule_id = %schedule_id))]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path((group_id, schedule_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleEntry>, ApiError> {
    let entry = schedule_service::update_schedule(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        schedule_id,
        request,
    )
    .await?;
    Ok(Json(entry))
}

/// Handler for DELETE /travelgroups/{id}/schedules/{schedule_id}
#[instrument(skip_all, fields(group_id = %group_id, schedule_id = %schedule_id))]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path((group_id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    schedule_service::delete_schedule(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        schedule_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
