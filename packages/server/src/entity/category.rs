use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Both names are required; a category always exists in both languages.
    pub name_ar: String,
    pub name_en: String,

    #[sea_orm(has_many)]
    pub brands: HasMany<super::brand::Entity>,

    #[sea_orm(has_many)]
    pub media: HasMany<super::media::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
