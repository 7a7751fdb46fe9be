use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brand")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At least one of the two names is non-empty; a brand may exist in a
    /// single language.
    pub name_ar: String,
    pub name_en: String,

    pub category_id: i32,

    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: BelongsTo<super::category::Entity>,

    /// Logo URL and host identifier. Both set or both NULL.
    pub logo: Option<String>,
    pub logo_public_id: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
