use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{category, media};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MediaListQuery {
    /// Restrict to one category.
    pub category_id: Option<i32>,
    /// Maximum number of items. Default 20.
    pub limit: Option<u64>,
}

/// Joined category display fields.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MediaCategory {
    pub id: i32,
    pub name_ar: String,
    pub name_en: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MediaItemResponse {
    pub id: i32,
    pub title: String,
    /// "image" or "video".
    #[serde(rename = "type")]
    #[schema(example = "image")]
    pub media_type: String,
    pub file_url: String,
    pub public_id: String,
    pub category_id: i32,
    pub category: Option<MediaCategory>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaListResponse {
    pub items: Vec<MediaItemResponse>,
    pub total: u64,
}

/// Result of a batch upload. Uploads are sequential; a failure at
/// `failed_index` (1-based) aborts the rest of the queue, and everything
/// before it stays persisted.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MediaBatchResponse {
    pub uploaded: Vec<MediaItemResponse>,
    #[schema(example = 2)]
    pub failed_index: Option<u32>,
    pub error: Option<String>,
}

impl MediaItemResponse {
    pub fn from_joined(model: media::Model, cat: Option<category::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            media_type: model.media_type,
            file_url: model.file_url,
            public_id: model.public_id,
            category_id: model.category_id,
            category: cat.map(|c| MediaCategory {
                id: c.id,
                name_ar: c.name_ar,
                name_en: c.name_en,
            }),
            created_at: model.created_at,
        }
    }
}
