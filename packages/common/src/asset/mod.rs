mod config;
mod error;
mod traits;
mod types;

pub mod hosted;

pub use config::AssetHostConfig;
pub use error::AssetError;
pub use hosted::HostedAssetStore;
pub use traits::AssetStore;
pub use types::{AssetUpload, DeleteOutcome, ResourceType, UploadedAsset, derive_public_id};
