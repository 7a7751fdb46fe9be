use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{AssetError, DeleteOutcome, ResourceType};
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

use crate::state::AppState;

/// Deletion request forwarded by a trusted frontend.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeleteAssetRequest {
    pub public_id: Option<String>,
    /// "image" or "video".
    pub resource_type: Option<String>,
}

/// Server-side deletion proxy for the asset host.
///
/// Exists so the host's API secret never reaches a browser. The response
/// shapes are a fixed contract with existing frontend code and bypass the
/// usual error envelope: ad-hoc `{error}` / `{success}` JSON bodies.
#[utoipa::path(
    post,
    path = "/delete-media-asset",
    tag = "Proxy",
    operation_id = "deleteMediaAsset",
    summary = "Delete a hosted asset on behalf of the frontend",
    request_body = DeleteAssetRequest,
    responses(
        (status = 200, description = "Asset deleted: {\"success\": true}"),
        (status = 400, description = "Missing or invalid field: {\"error\": ...}"),
        (status = 500, description = "Host refused or transport failed: {\"error\": ...}"),
    ),
)]
#[instrument(skip(state, body))]
pub async fn delete_media_asset(
    State(state): State<AppState>,
    Json(body): Json<DeleteAssetRequest>,
) -> Response {
    let (Some(public_id), Some(resource_type)) = (body.public_id, body.resource_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing public_id or resource_type" })),
        )
            .into_response();
    };

    let Some(resource_type) = ResourceType::parse(&resource_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "resource_type must be image or video" })),
        )
            .into_response();
    };

    match state.assets.delete(&public_id, resource_type).await {
        Ok(DeleteOutcome::Deleted) => {
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Ok(DeleteOutcome::NotFound) => {
            warn!(%public_id, "asset host does not know this public id");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Asset deletion failed", "result": "not found" })),
            )
                .into_response()
        }
        Err(AssetError::Rejected { result }) => {
            warn!(%public_id, %result, "asset host refused deletion");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Asset deletion failed", "result": result })),
            )
                .into_response()
        }
        Err(err) => {
            warn!(%public_id, error = %err, "asset host deletion errored");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error" })),
            )
                .into_response()
        }
    }
}
