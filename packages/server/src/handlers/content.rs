use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::EntityTrait;
use tracing::instrument;

use crate::editor::{AssetFieldEditor, BilingualEditor, RemoveOutcome, SaveOutcome};
use crate::entity::home_content;
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::fields::{AssetField, LangPair, TextField};
use crate::models::content::{
    AssetPairResponse, AssetRemoveResponse, AssetUploadResponse, SaveTextRequest, SaveTextResponse,
    TextPairResponse,
};
use crate::state::AppState;

pub fn asset_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(12 * 1024 * 1024) // 12 MB, headroom over the 10 MiB file ceiling
}

fn parse_text_field(name: &str) -> Result<TextField, AppError> {
    TextField::parse(name).ok_or_else(|| AppError::NotFound(format!("Unknown text field: {name}")))
}

fn parse_asset_field(name: &str) -> Result<AssetField, AppError> {
    AssetField::parse(name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown asset field: {name}")))
}

#[utoipa::path(
    get,
    path = "/api/v1/content/{id}/text/{field}",
    tag = "Content",
    operation_id = "getTextPair",
    summary = "Read both language values of a bilingual field",
    description = "Returns the English and Arabic values of one bilingual text field. \
        A record that does not exist yet reads as an empty pair, not as an error.",
    params(
        ("id" = String, Path, description = "Content record ID"),
        ("field" = String, Path, description = "Field name: title, subtitle or description"),
    ),
    responses(
        (status = 200, description = "Current pair", body = TextPairResponse),
        (status = 404, description = "Unknown field (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id, field))]
pub async fn get_text(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
) -> Result<Json<TextPairResponse>, AppError> {
    let field = parse_text_field(&field)?;

    let row = home_content::Entity::find_by_id(id).one(&state.db).await?;
    let pair = row.map(|m| field.read(&m)).unwrap_or_default();

    Ok(Json(TextPairResponse {
        en: pair.en,
        ar: pair.ar,
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/content/{id}/text/{field}",
    tag = "Content",
    operation_id = "saveTextPair",
    summary = "Save both language values of a bilingual field",
    description = "Trims both values and persists them together, creating the record row \
        on first save. Rejects a save where both languages are blank before any storage \
        call is made. Saving values identical to what is stored is a no-op.",
    params(
        ("id" = String, Path, description = "Content record ID"),
        ("field" = String, Path, description = "Field name: title, subtitle or description"),
    ),
    request_body = SaveTextRequest,
    responses(
        (status = 200, description = "Saved (or unchanged)", body = SaveTextResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, body), fields(id, field))]
pub async fn save_text(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
    AppJson(body): AppJson<SaveTextRequest>,
) -> Result<Json<SaveTextResponse>, AppError> {
    let field = parse_text_field(&field)?;

    let mut editor = BilingualEditor::new(id, field);
    editor.load(&state.db).await?;
    editor.edit();
    editor.set_draft(LangPair {
        en: body.en,
        ar: body.ar,
    });
    let outcome = editor.save(&state.db).await?;

    let saved = editor.buffer().displayed().clone();
    Ok(Json(SaveTextResponse {
        en: saved.en,
        ar: saved.ar,
        changed: outcome == SaveOutcome::Saved,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/content/{id}/asset/{field}",
    tag = "Content",
    operation_id = "getAssetPair",
    summary = "Read an asset column pair",
    params(
        ("id" = String, Path, description = "Content record ID"),
        ("field" = String, Path, description = "Field name: image or logo"),
    ),
    responses(
        (status = 200, description = "Current URL and public id, both null when unset", body = AssetPairResponse),
        (status = 404, description = "Unknown field (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id, field))]
pub async fn get_asset(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
) -> Result<Json<AssetPairResponse>, AppError> {
    let field = parse_asset_field(&field)?;

    let row = home_content::Entity::find_by_id(id).one(&state.db).await?;
    let pair = row.map(|m| field.read(&m)).unwrap_or_default();

    Ok(Json(AssetPairResponse {
        url: pair.url,
        public_id: pair.public_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/content/{id}/asset/{field}",
    tag = "Content",
    operation_id = "uploadAsset",
    summary = "Upload a file into an asset field",
    description = "Uploads the `file` multipart field to the asset host and writes the \
        resulting URL and public id to the record as one pair. A file that is neither \
        an image nor a video is rejected before any upload begins. An upload failure \
        leaves the record untouched.",
    params(
        ("id" = String, Path, description = "Content record ID"),
        ("field" = String, Path, description = "Field name: image or logo"),
    ),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "Asset hosted and record updated", body = AssetUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Asset host rejected the upload (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(id, field))]
pub async fn upload_asset(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = parse_asset_field(&field)?;

    let mut file = None;
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if part.name() == Some("file") {
            file = Some(super::upload_from_field(part).await?);
        }
    }
    let file = file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let mut editor = AssetFieldEditor::new(id, field);
    editor.load(&state.db).await?;
    editor.select_file(file)?;
    let asset = editor.commit(&state.db, &*state.assets).await?;

    Ok((
        StatusCode::CREATED,
        Json(AssetUploadResponse {
            url: asset.url,
            public_id: asset.public_id,
            resource_type: asset.resource_type,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/content/{id}/asset/{field}",
    tag = "Content",
    operation_id = "removeAsset",
    summary = "Clear an asset field",
    description = "Deletes the hosted asset best-effort and nulls both record columns. \
        A host deletion failure does not block the record update; the response reports \
        it as `degraded`.",
    params(
        ("id" = String, Path, description = "Content record ID"),
        ("field" = String, Path, description = "Field name: image or logo"),
    ),
    responses(
        (status = 200, description = "Columns cleared", body = AssetRemoveResponse),
        (status = 404, description = "Unknown field (NOT_FOUND)", body = ErrorBody),
        (status = 404, description = "Field holds no asset (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id, field))]
pub async fn remove_asset(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
) -> Result<Json<AssetRemoveResponse>, AppError> {
    let field = parse_asset_field(&field)?;

    let mut editor = AssetFieldEditor::new(id, field);
    editor.load(&state.db).await?;
    let outcome = editor.remove(&state.db, &*state.assets).await?;

    Ok(Json(AssetRemoveResponse {
        degraded: outcome == RemoveOutcome::Degraded,
    }))
}
