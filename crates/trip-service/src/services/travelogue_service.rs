//! Trip journals (travelogues).
//!
//! Members write travelogues into their group; only the author may edit one
//! afterwards. Uploaded images are kept as attachment metadata. Listings are
//! paginated newest-first.

use crate::errors::ApiError;
use crate::models::{
    ImageAttachment, NewTravelogue, Page, PageParams, TravelogueResponse, UpdateTravelogue,
};
use crate::repositories::groups::TravelogueRecord;
use crate::repositories::GroupsRepository;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

fn members_only() -> ApiError {
    ApiError::Forbidden("Only group members can access this group".to_string())
}

fn travelogue_not_found() -> ApiError {
    ApiError::NotFound("Travelogue not found".to_string())
}

fn to_response(group_id: Uuid, record: &TravelogueRecord) -> TravelogueResponse {
    TravelogueResponse {
        id: record.id,
        group_id,
        author_id: record.author_id,
        title: record.title.clone(),
        body: record.body.clone(),
        image: record.image.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Create a travelogue; members only.
///
/// # Errors
///
/// - `ApiError::BadRequest` for malformed fields
/// - `ApiError::NotFound` / `ApiError::Forbidden` per the access rules
#[instrument(skip_all, fields(group_id = %group_id, user_id = user_id))]
pub async fn create_travelogue(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    metadata: NewTravelogue,
    image: Option<ImageAttachment>,
) -> Result<TravelogueResponse, ApiError> {
    metadata.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }

            let now = Utc::now();
            let travelogue = TravelogueRecord {
                id: Uuid::new_v4(),
                author_id: user_id,
                title: metadata.title.trim().to_string(),
                body: metadata.body,
                image,
                created_at: now,
                updated_at: now,
            };
            let response = to_response(group_id, &travelogue);
            record.travelogues.push(travelogue);
            Ok(response)
        })
        .await
}

/// Update a travelogue; author only. Supplying a new image replaces the old
/// attachment metadata.
///
/// # Errors
///
/// - `ApiError::BadRequest` for an empty update or malformed fields
/// - `ApiError::Forbidden` if the caller is not the author
/// - `ApiError::NotFound` for an unknown travelogue
#[instrument(skip_all, fields(group_id = %group_id, travelogue_id = %travelogue_id))]
pub async fn update_travelogue(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    travelogue_id: Uuid,
    metadata: UpdateTravelogue,
    image: Option<ImageAttachment>,
) -> Result<TravelogueResponse, ApiError> {
    if !metadata.has_changes() && image.is_none() {
        return Err(ApiError::BadRequest("No changes requested".to_string()));
    }
    metadata.validate().map_err(ApiError::BadRequest)?;

    groups
        .update(group_id, |record| {
            if !record.is_member(user_id) {
                return Err(members_only());
            }
            let travelogue = record
                .travelogues
                .iter_mut()
                .find(|t| t.id == travelogue_id)
                .ok_or_else(travelogue_not_found)?;
            if travelogue.author_id != user_id {
                return Err(ApiError::Forbidden(
                    "Only the author can edit a travelogue".to_string(),
                ));
            }

            if let Some(title) = metadata.title {
                travelogue.title = title.trim().to_string();
            }
            if let Some(body) = metadata.body {
                travelogue.body = body;
            }
            if let Some(image) = image {
                travelogue.image = Some(image);
            }
            travelogue.updated_at = Utc::now();

            Ok(to_response(group_id, travelogue))
        })
        .await
}

/// List travelogues newest-first with in-memory pagination; members only.
///
/// An out-of-range page returns an empty page, not an error.
///
/// # Errors
///
/// `ApiError::NotFound` / `ApiError::Forbidden` per the access rules.
pub async fn list_travelogues(
    groups: &GroupsRepository,
    user_id: i64,
    group_id: Uuid,
    params: PageParams,
) -> Result<Page<TravelogueResponse>, ApiError> {
    let record = groups.get(group_id).await?;
    if !record.is_member(user_id) {
        return Err(members_only());
    }

    let mut travelogues = record.travelogues;
    travelogues.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let size = params.clamped_size();
    let total = travelogues.len();
    let items = travelogues
        .iter()
        .skip(params.page.saturating_mul(size))
        .take(size)
        .map(|t| to_response(group_id, t))
        .collect();

    Ok(Page {
        items,
        page: params.page,
        size,
        total,
    })
}
