use common::ResourceType;
use serde::{Deserialize, Serialize};

/// Both language values of a bilingual field.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TextPairResponse {
    pub en: String,
    pub ar: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SaveTextRequest {
    #[schema(example = "Welcome")]
    pub en: String,
    #[schema(example = "أهلاً بكم")]
    pub ar: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SaveTextResponse {
    /// Persisted (trimmed) English value.
    pub en: String,
    /// Persisted (trimmed) Arabic value.
    pub ar: String,
    /// False when the trimmed drafts matched the stored values and no
    /// write was issued.
    pub changed: bool,
}

/// Current value of an asset column pair. Both fields are set or both are
/// null.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetPairResponse {
    pub url: Option<String>,
    pub public_id: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetUploadResponse {
    pub url: String,
    pub public_id: String,
    pub resource_type: ResourceType,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetRemoveResponse {
    /// True when the record columns were nulled but the host deletion
    /// failed, leaving an orphaned asset on the host.
    pub degraded: bool,
}
