use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::category;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    /// Arabic name. Required, non-blank.
    #[schema(example = "أحذية")]
    pub name_ar: String,
    /// English name. Required, non-blank.
    #[schema(example = "Shoes")]
    pub name_en: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    #[schema(example = "أحذية")]
    pub name_ar: String,
    #[schema(example = "Shoes")]
    pub name_en: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name_ar: String,
    pub name_en: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
    pub total: u64,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name_ar: model.name_ar,
            name_en: model.name_en,
            created_at: model.created_at,
        }
    }
}
