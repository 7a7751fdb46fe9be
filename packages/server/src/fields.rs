//! Typed descriptors for the `home_content` column pairs.
//!
//! Every editable piece of home content is either a bilingual text pair
//! `(column_en, column_ar)` or an asset pair `(column, column_public_id)`.
//! Editors address fields through these enums instead of raw column-name
//! strings, so an unknown field is a routing 404 rather than a silent NULL
//! read.

use sea_orm::Set;

use crate::entity::home_content;

/// One logical value in both languages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangPair {
    pub en: String,
    pub ar: String,
}

impl LangPair {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            en: self.en.trim().to_string(),
            ar: self.ar.trim().to_string(),
        }
    }

    /// True when both languages are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty() && self.ar.trim().is_empty()
    }
}

/// URL + host identifier read from an asset column pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPair {
    pub url: Option<String>,
    pub public_id: Option<String>,
}

/// Bilingual text pairs of `home_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Subtitle,
    Description,
}

impl TextField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "subtitle" => Some(Self::Subtitle),
            "description" => Some(Self::Description),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Description => "description",
        }
    }

    pub fn read(&self, model: &home_content::Model) -> LangPair {
        let (en, ar) = match self {
            Self::Title => (&model.title_en, &model.title_ar),
            Self::Subtitle => (&model.subtitle_en, &model.subtitle_ar),
            Self::Description => (&model.description_en, &model.description_ar),
        };
        LangPair {
            en: en.clone().unwrap_or_default(),
            ar: ar.clone().unwrap_or_default(),
        }
    }

    /// Write both language columns into an active model.
    pub fn apply(&self, am: &mut home_content::ActiveModel, pair: &LangPair) {
        let en = Set(Some(pair.en.clone()));
        let ar = Set(Some(pair.ar.clone()));
        match self {
            Self::Title => {
                am.title_en = en;
                am.title_ar = ar;
            }
            Self::Subtitle => {
                am.subtitle_en = en;
                am.subtitle_ar = ar;
            }
            Self::Description => {
                am.description_en = en;
                am.description_ar = ar;
            }
        }
    }
}

/// Asset column pairs of `home_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    HeroImage,
    Logo,
}

impl AssetField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "image" => Some(Self::HeroImage),
            "logo" => Some(Self::Logo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeroImage => "image",
            Self::Logo => "logo",
        }
    }

    pub fn read(&self, model: &home_content::Model) -> AssetPair {
        let (url, public_id) = match self {
            Self::HeroImage => (&model.image, &model.image_public_id),
            Self::Logo => (&model.logo, &model.logo_public_id),
        };
        AssetPair {
            url: url.clone(),
            public_id: public_id.clone(),
        }
    }

    /// Write both halves of the pair. Callers always set or clear them
    /// together, which is what keeps the pairing invariant.
    pub fn apply(
        &self,
        am: &mut home_content::ActiveModel,
        url: Option<String>,
        public_id: Option<String>,
    ) {
        match self {
            Self::HeroImage => {
                am.image = Set(url);
                am.image_public_id = Set(public_id);
            }
            Self::Logo => {
                am.logo = Set(url);
                am.logo_public_id = Set(public_id);
            }
        }
    }
}
