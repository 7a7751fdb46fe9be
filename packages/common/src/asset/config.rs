use serde::Deserialize;

/// Media host connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct AssetHostConfig {
    /// API root. Default: the hosted v1_1 endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account identifier, part of every endpoint path.
    pub cloud_name: String,
    /// Unsigned upload preset name.
    pub upload_preset: String,
    /// Server credential. Only needed for deletion.
    #[serde(default)]
    pub api_key: String,
    /// Server secret. Only needed for deletion; never exposed to clients.
    #[serde(default)]
    pub api_secret: String,
}

fn default_base_url() -> String {
    "https://api.cloudinary.com/v1_1".into()
}
