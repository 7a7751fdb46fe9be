use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use common::{AssetStore, AssetUpload, ResourceType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{instrument, warn};

use crate::entity::{category, media};
use crate::error::{AppError, ErrorBody};
use crate::models::media::{MediaBatchResponse, MediaItemResponse, MediaListQuery, MediaListResponse};
use crate::state::AppState;

/// Per-file ceiling for gallery uploads.
pub const MAX_MEDIA_FILE_SIZE: usize = 10 * 1024 * 1024; // 10 MiB

const DEFAULT_LIST_LIMIT: u64 = 20;

pub fn media_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(128 * 1024 * 1024) // 128 MB, batch of up to ~12 files
}

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "Media",
    operation_id = "listMedia",
    summary = "List media items, most recent first",
    description = "Each item carries its joined category names for bilingual display. \
        Defaults to the 20 most recent items.",
    params(MediaListQuery),
    responses(
        (status = 200, description = "Media list", body = MediaListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<MediaListQuery>,
) -> Result<Json<MediaListResponse>, AppError> {
    let mut select = media::Entity::find()
        .find_also_related(category::Entity)
        .order_by_desc(media::Column::CreatedAt)
        .limit(query.limit.unwrap_or(DEFAULT_LIST_LIMIT));

    if let Some(category_id) = query.category_id {
        select = select.filter(media::Column::CategoryId.eq(category_id));
    }

    let rows = select.all(&state.db).await?;

    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .map(|(item, cat)| MediaItemResponse::from_joined(item, cat))
        .collect();

    Ok(Json(MediaListResponse { items, total }))
}

#[utoipa::path(
    post,
    path = "/api/v1/media",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload a batch of media files into a category",
    description = "Multipart form with `category_id` and one or more `files` fields. The \
        whole batch is validated before the first upload starts: every file must be an \
        image or a video, at most 10 MiB, with no duplicate filename+size within the \
        batch. Uploads then run one at a time; a failure aborts the rest of the batch \
        while everything already uploaded stays persisted. The 1-based index of the \
        failed file is reported so the client can retry from there.",
    request_body(content_type = "multipart/form-data", description = "Category ID and files"),
    responses(
        (status = 201, description = "Whole batch uploaded", body = MediaBatchResponse),
        (status = 200, description = "Batch aborted partway; see failed_index", body = MediaBatchResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut category_id: Option<i32> = None;
    let mut files: Vec<AssetUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("category_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read category_id: {e}")))?;
                category_id = Some(text.trim().parse().map_err(|_| {
                    AppError::Validation("category_id must be an integer".into())
                })?);
            }
            Some("files") => files.push(super::upload_from_field(field).await?),
            _ => {}
        }
    }

    let category_id =
        category_id.ok_or_else(|| AppError::Validation("Missing 'category_id' field".into()))?;
    if files.is_empty() {
        return Err(AppError::Validation("No files provided".into()));
    }

    let cat = category::Entity::find_by_id(category_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    let response = upload_batch(&state.db, &*state.assets, &cat, files).await?;

    let status = if response.failed_index.is_none() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Validate then upload a batch of files into one category.
///
/// The validation pass completes before any upload begins, so an invalid
/// batch costs no network traffic. Uploads run sequentially; the first
/// failure aborts the remainder. Already-persisted items are never rolled
/// back.
pub async fn upload_batch<C: ConnectionTrait>(
    db: &C,
    assets: &dyn AssetStore,
    cat: &category::Model,
    files: Vec<AssetUpload>,
) -> Result<MediaBatchResponse, AppError> {
    validate_batch(&files)?;

    let mut uploaded = Vec::with_capacity(files.len());
    let mut failed_index = None;
    let mut error = None;

    for (i, file) in files.into_iter().enumerate() {
        let title = file.title_stem().to_string();
        let resource_type = file
            .resource_type()
            .ok_or_else(|| AppError::Internal("validated file lost its type".into()))?;

        let asset = match assets.upload(file).await {
            Ok(asset) => asset,
            Err(err) => {
                warn!(index = i + 1, error = %err, "batch upload aborted");
                failed_index = Some((i + 1) as u32);
                error = Some(err.to_string());
                break;
            }
        };

        let item = media::ActiveModel {
            title: Set(title),
            media_type: Set(resource_type.as_str().to_string()),
            file_url: Set(asset.url),
            public_id: Set(asset.public_id),
            category_id: Set(cat.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await;

        let item = match item {
            Ok(item) => item,
            Err(err) => {
                warn!(index = i + 1, error = %err, "media row insert failed; batch aborted");
                failed_index = Some((i + 1) as u32);
                error = Some(err.to_string());
                break;
            }
        };

        uploaded.push(MediaItemResponse::from_joined(item, Some(cat.clone())));
    }

    Ok(MediaBatchResponse {
        uploaded,
        failed_index,
        error,
    })
}

/// Reject the whole batch before any upload: MIME class, size ceiling and
/// in-batch duplicates.
fn validate_batch(files: &[AssetUpload]) -> Result<(), AppError> {
    let mut seen: Vec<(&str, usize)> = Vec::with_capacity(files.len());

    for file in files {
        if file.resource_type().is_none() {
            return Err(AppError::Validation(format!(
                "{}: only image and video files are allowed",
                file.filename
            )));
        }
        if file.bytes.len() > MAX_MEDIA_FILE_SIZE {
            return Err(AppError::Validation(format!(
                "{}: file exceeds the 10 MiB limit",
                file.filename
            )));
        }
        let key = (file.filename.as_str(), file.bytes.len());
        if seen.contains(&key) {
            return Err(AppError::Validation(format!(
                "{}: duplicate file in batch",
                file.filename
            )));
        }
        seen.push(key);
    }

    Ok(())
}

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media item",
    description = "Deletes the hosted asset first; a host failure aborts the request and \
        keeps the row, so the gallery never points at a file that was lost track of. An \
        asset the host no longer knows counts as deleted.",
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 404, description = "Media not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Host deletion failed; row kept (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = media::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".into()))?;

    let resource_type = ResourceType::parse(&model.media_type).unwrap_or(ResourceType::Image);
    state.assets.delete(&model.public_id, resource_type).await?;

    media::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> AssetUpload {
        AssetUpload {
            bytes: vec![0u8; size],
            filename: name.into(),
            content_type: mime.into(),
        }
    }

    #[test]
    fn batch_rejects_unsupported_mime() {
        let files = vec![file("a.png", "image/png", 10), file("b.pdf", "application/pdf", 10)];
        assert!(matches!(
            validate_batch(&files),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn batch_rejects_oversized_file() {
        let files = vec![file("big.mp4", "video/mp4", MAX_MEDIA_FILE_SIZE + 1)];
        assert!(matches!(
            validate_batch(&files),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn batch_rejects_duplicate_name_and_size() {
        let files = vec![file("a.png", "image/png", 10), file("a.png", "image/png", 10)];
        assert!(matches!(
            validate_batch(&files),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn batch_allows_same_name_different_size() {
        let files = vec![file("a.png", "image/png", 10), file("a.png", "image/png", 11)];
        assert!(validate_batch(&files).is_ok());
    }
}
