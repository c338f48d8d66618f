//! Destination handlers.
//!
//! - `GET /travelgroups/locations/provinces` - province list
//! - `GET /travelgroups/locations/provinces/{province}/cities` - city list
//! - `PUT /travelgroups/{id}/location` - select destination (admin only)
//! - `POST /travelgroups/{id}/location/random` - random city pick (admin only)

use crate::auth::AccessTokenClaims;
use crate::errors::ApiError;
use crate::models::{Destination, RandomLocationRequest, SelectLocationRequest};
use crate::routes::AppState;
use crate::services::location_service;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Handler for GET /travelgroups/locations/provinces
#[instrument(skip_all)]
pub async fn list_provinces() -> Json<Vec<&'static str>> {
    Json(location_service::provinces())
}

/// Handler for GET /travelgroups/locations/provinces/{province}/cities
#[instrument(skip_all, fields(province = %province))]
pub async fn list_cities(
    Path(province): Path<String>,
) -> Result<Json<Vec<&'static str>>, ApiError> {
    Ok(Json(location_service::cities(&province)?))
}

/// Handler for PUT /travelgroups/{id}/location
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn select_location(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<SelectLocationRequest>,
) -> Result<Json<Destination>, ApiError> {
    let destination = location_service::select_location(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        request,
    )
    .await?;
    Ok(Json(destination))
}

/// Handler for POST /travelgroups/{id}/location/random
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn random_location(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Json(request): Json<RandomLocationRequest>,
) -> Result<Json<Destination>, ApiError> {
    let destination = location_service::random_location(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        request,
    )
    .await?;
    Ok(Json(destination))
}
