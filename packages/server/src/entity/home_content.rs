use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Singleton-style content rows keyed by section name (e.g. "hero-section").
///
/// Rows are created lazily on first save, so every content column is
/// nullable. Asset columns come in `(url, _public_id)` pairs that are either
/// both set or both NULL, except transiently while an upload is being
/// persisted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "home_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub subtitle_en: Option<String>,
    pub subtitle_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,

    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub logo: Option<String>,
    pub logo_public_id: Option<String>,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
