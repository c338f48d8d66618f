//! Travelogue handlers.
//!
//! - `POST /travelgroups/{id}/travelogues` - create (multipart)
//! - `PATCH /travelgroups/{id}/travelogues/{travelogue_id}` - update (author
//!   only, multipart)
//! - `GET /travelgroups/{id}/travelogues?page=&size=` - paginated listing
//!
//! Uploads are `multipart/form-data` with a `metadata` part carrying the JSON
//! body and an optional `image` part. Only the image's metadata (name, type,
//! size) is retained.

use crate::auth::AccessTokenClaims;
use crate::errors::ApiError;
use crate::models::{
    ImageAttachment, NewTravelogue, Page, PageParams, TravelogueResponse, UpdateTravelogue,
};
use crate::routes::AppState;
use crate::services::travelogue_service;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Multipart part carrying the JSON body.
const METADATA_PART: &str = "metadata";

/// Multipart part carrying the optional image upload.
const IMAGE_PART: &str = "image";

/// Collected parts of a travelogue upload. The metadata part is required on
/// creation but optional on update (an image-only update is legal).
struct UploadParts<M> {
    metadata: Option<M>,
    image: Option<ImageAttachment>,
}

/// Pull the `metadata` and optional `image` parts out of a multipart body.
async fn read_upload_parts<M: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<UploadParts<M>, ApiError> {
    let mut metadata: Option<M> = None;
    let mut image: Option<ImageAttachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(target: "trip.handlers.travelogues", error = %e, "Malformed multipart body");
        ApiError::BadRequest("Malformed multipart body".to_string())
    })? {
        match field.name() {
            Some(METADATA_PART) => {
                let bytes = field.bytes().await.map_err(|_| {
                    ApiError::BadRequest("Unreadable metadata part".to_string())
                })?;
                metadata = Some(serde_json::from_slice(&bytes).map_err(|e| {
                    ApiError::BadRequest(format!("Invalid travelogue metadata: {e}"))
                })?);
            }
            Some(IMAGE_PART) => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| {
                    ApiError::BadRequest("Unreadable image part".to_string())
                })?;
                image = Some(ImageAttachment {
                    file_name,
                    content_type,
                    size_bytes: bytes.len(),
                });
            }
            // Unknown parts are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(UploadParts { metadata, image })
}

/// Handler for POST /travelgroups/{id}/travelogues
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn create_travelogue(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<TravelogueResponse>), ApiError> {
    let parts: UploadParts<NewTravelogue> = read_upload_parts(multipart).await?;
    let metadata = parts
        .metadata
        .ok_or_else(|| ApiError::BadRequest("Missing metadata part".to_string()))?;

    let created = travelogue_service::create_travelogue(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        metadata,
        parts.image,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PATCH /travelgroups/{id}/travelogues/{travelogue_id}
#[instrument(skip_all, fields(group_id = %group_id, travelogue_id = %travelogue_id))]
pub async fn update_travelogue(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path((group_id, travelogue_id)): Path<(Uuid, Uuid)>,
    multipart: Multipart,
) -> Result<Json<TravelogueResponse>, ApiError> {
    let parts: UploadParts<UpdateTravelogue> = read_upload_parts(multipart).await?;

    let updated = travelogue_service::update_travelogue(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        travelogue_id,
        parts.metadata.unwrap_or_default(),
        parts.image,
    )
    .await?;
    Ok(Json(updated))
}

/// Handler for GET /travelgroups/{id}/travelogues
#[instrument(skip_all, fields(group_id = %group_id))]
pub async fn list_travelogues(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<AccessTokenClaims>,
    Path(group_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<TravelogueResponse>>, ApiError> {
    let page = travelogue_service::list_travelogues(
        &state.stores.groups,
        claims.user_id(),
        group_id,
        params,
    )
    .await?;
    Ok(Json(page))
}
