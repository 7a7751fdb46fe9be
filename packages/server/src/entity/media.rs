use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display title, defaulting to the uploaded filename stem.
    pub title: String,

    /// "image" or "video", validated at the boundary by `ResourceType`.
    #[sea_orm(column_name = "type")]
    pub media_type: String,

    pub file_url: String,
    pub public_id: String,

    pub category_id: i32,

    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: BelongsTo<super::category::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
