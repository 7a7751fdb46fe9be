use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::brand;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BrandListQuery {
    /// Category whose brands to list.
    pub category_id: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BrandResponse {
    pub id: i32,
    pub name_ar: String,
    pub name_en: String,
    pub category_id: i32,
    /// Logo URL, if a logo was uploaded.
    pub logo: Option<String>,
    pub logo_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response for brand creation. The brand row is always persisted when this
/// is returned; a failed logo upload is reported separately and does not
/// undo the row.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BrandCreatedResponse {
    pub brand: BrandResponse,
    /// Set when the brand was created but its logo could not be attached.
    pub logo_error: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BrandListResponse {
    pub brands: Vec<BrandResponse>,
    pub total: u64,
}

impl From<brand::Model> for BrandResponse {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            name_ar: model.name_ar,
            name_en: model.name_en,
            category_id: model.category_id,
            logo: model.logo,
            logo_public_id: model.logo_public_id,
            created_at: model.created_at,
        }
    }
}
