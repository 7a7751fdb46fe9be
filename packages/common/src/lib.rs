pub mod asset;

pub use asset::{
    AssetError, AssetHostConfig, AssetStore, AssetUpload, DeleteOutcome, HostedAssetStore,
    ResourceType, UploadedAsset, derive_public_id,
};
