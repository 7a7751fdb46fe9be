mod asset_field;
mod bilingual;
mod buffer;

pub use asset_field::{
    AssetFieldEditor, AssetFieldState, PendingUpload, PreviewHandle, PreviewProbe, RemoveOutcome,
};
pub use bilingual::{BilingualEditor, SaveOutcome};
pub use buffer::{EditBuffer, SaveState};

use common::AssetError;
use sea_orm::DbErr;

/// Failures surfaced by the editor core.
///
/// Validation and state errors never reach the stores; transport and
/// constraint errors from a single step are surfaced immediately without
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("{0}")]
    Validation(String),

    #[error("unsupported media type: {0}")]
    InvalidFileType(String),

    /// A commit or remove is already in flight on this instance.
    #[error("operation already in progress")]
    Busy,

    /// The operation is not valid in the editor's current state.
    #[error("no asset to operate on in the current state")]
    InvalidState,

    #[error("asset upload failed: {0}")]
    Upload(#[source] AssetError),

    /// The asset was hosted but the record could not be written. The hosted
    /// asset is orphaned; see `AssetFieldEditor::commit`.
    #[error("record store rejected the update: {0}")]
    Persist(#[source] DbErr),

    #[error(transparent)]
    Store(#[from] DbErr),
}
