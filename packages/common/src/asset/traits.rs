use async_trait::async_trait;

use super::error::AssetError;
use super::types::{AssetUpload, DeleteOutcome, ResourceType, UploadedAsset};

/// External media host storing uploaded images and videos.
///
/// Uploads are unauthenticated preset uploads; deletion requires server
/// credentials, which is why clients never call `delete` directly and go
/// through the deletion proxy endpoint instead.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload a file and return its stable URL and identifier.
    async fn upload(&self, upload: AssetUpload) -> Result<UploadedAsset, AssetError>;

    /// Delete an asset by its host identifier.
    async fn delete(
        &self,
        public_id: &str,
        resource_type: ResourceType,
    ) -> Result<DeleteOutcome, AssetError>;
}
