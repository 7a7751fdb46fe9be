pub mod brand;
pub mod category;
pub mod content;
pub mod media;
pub mod proxy;

use axum::extract::multipart::Field;
use common::AssetUpload;

use crate::error::AppError;

/// Read one multipart file field fully into an [`AssetUpload`].
///
/// The field must carry a filename. A missing content type falls back to
/// `application/octet-stream`, which the MIME gate downstream will reject.
pub(crate) async fn upload_from_field(field: Field<'_>) -> Result<AssetUpload, AppError> {
    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;

    Ok(AssetUpload {
        bytes: bytes.to_vec(),
        filename,
        content_type,
    })
}
