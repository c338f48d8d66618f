//! Destination selection.
//!
//! The catalog is static; selection writes the chosen province/city onto the
//! group. Picking a random city within a province is the tie-breaker feature
//! for indecisive groups. Both writes are admin-only.

use crate::errors::ApiError;
use crate::models::{Destination, RandomLocationRequest, SelectLocationRequest};
use crate::repositories::{catalog, GroupsRepository};
use rand::seq::SliceRandom;
use tracing::instrument;
use uuid::Uuid;

fn admin_only() -> ApiError {
    ApiError::Forbidden("Only the group admin can do this".to_string())
}

/// Province names, in catalog order.
#[must_use]
pub fn provinces() -> Vec<&'static str> {
    catalog::provinces()
}

/// Cities of a province.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown province.
pub fn cities(province: &str) -> Result<Vec<&'static str>, ApiError> {
    catalog::cities(province)
        .map(<[&str]>::to_vec)
        .ok_or_else(|| ApiError::NotFound("Unknown province".to_string()))
}

/// Select a destination for the group; admin only.
///
/// # Errors
///
/// - `ApiError::BadRequest` if the province/city pair is not in the catalog
/// - `ApiError::NotFound` / `ApiError::Forbidden` per the access rules
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn select_location(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    request: SelectLocationRequest,
) -> Result<Destination, ApiError> {
    if !catalog::contains(&request.province, &request.city) {
        return Err(ApiError::BadRequest(
            "Unknown province or city".to_string(),
        ));
    }

    set_destination(
        groups,
        user_id,
        group_id,
        Destination {
            province: request.province,
            city: request.city,
        },
    )
    .await
}

/// Pick a random city in a province and select it; admin only.
///
/// # Errors
///
/// - `ApiError::NotFound` for an unknown province
/// - `ApiError::Forbidden` per the access rules
#[instrument(skip_all, fields(group_id = %group_id, province = %request.province))]
pub async fn random_location(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    request: RandomLocationRequest,
) -> Result<Destination, ApiError> {
    let cities = catalog::cities(&request.province)
        .ok_or_else(|| ApiError::NotFound("Unknown province".to_string()))?;

    // Catalog provinces always carry at least one city.
    let city = cities
        .choose(&mut rand::thread_rng())
        .ok_or(ApiError::Internal)?;

    set_destination(
        groups,
        user_id,
        group_id,
        Destination {
            province: request.province,
            city: (*city).to_string(),
        },
    )
    .await
}

async fn set_destination(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    destination: Destination,
) -> Result<Destination, ApiError> {
    groups
        .update(group_id, |record| {
            if !record.is_admin(user_id) {
                return Err(admin_only());
            }
            record.destination = Some(destination.clone());
            Ok(destination)
        })
        .await
}
