use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::AssetError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

use crate::editor::EditorError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `NOT_FOUND`, `CONSTRAINT_VIOLATED`, `UPLOAD_FAILED`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Both name_ar and name_en are required")]
    pub message: String,
}

/// Application-level error type.
///
/// Every failure is scoped to the single request that triggered it; nothing
/// here is fatal to the process and nothing is retried.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Foreign-key or uniqueness violation from the record store.
    ConstraintViolated(String),
    /// The asset host rejected a call or was unreachable.
    UploadFailed(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::ConstraintViolated(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONSTRAINT_VIOLATED",
                    message: msg,
                },
            ),
            AppError::UploadFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    code: "UPLOAD_FAILED",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                AppError::ConstraintViolated(msg.to_string())
            }
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                AppError::ConstraintViolated(msg.to_string())
            }
            _ => {
                // Fallback on the raw Postgres error code; mocked connections
                // and some driver paths don't expose a typed SqlErr.
                let text = err.to_string();
                if text.contains("23503") || text.to_lowercase().contains("foreign key") {
                    AppError::ConstraintViolated(text)
                } else {
                    AppError::Internal(text)
                }
            }
        }
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::UnsupportedMediaType(mime) => {
                AppError::Validation(format!("Unsupported media type: {mime}"))
            }
            other => AppError::UploadFailed(other.to_string()),
        }
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Validation(msg) => AppError::Validation(msg),
            EditorError::InvalidFileType(mime) => {
                AppError::Validation(format!("Unsupported media type: {mime}"))
            }
            EditorError::Busy => {
                AppError::Validation("Another operation is already in progress".into())
            }
            EditorError::InvalidState => AppError::NotFound("No asset to operate on".into()),
            EditorError::Upload(e) => AppError::UploadFailed(e.to_string()),
            EditorError::Persist(e) | EditorError::Store(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn foreign_key_violation_maps_to_constraint_violated() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "update or delete on table \"categories\" violates foreign key constraint \
             \"brand_category_id_fkey\" (SQLSTATE 23503)"
                .into(),
        ));
        assert!(matches!(
            AppError::from(err),
            AppError::ConstraintViolated(_)
        ));
    }

    #[test]
    fn other_db_errors_map_to_internal() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection refused".into()));
        assert!(matches!(AppError::from(err), AppError::Internal(_)));
    }

    #[test]
    fn upload_errors_map_to_upload_failed() {
        let err = AssetError::Rejected {
            result: "rate limited".into(),
        };
        assert!(matches!(AppError::from(err), AppError::UploadFailed(_)));
    }
}
