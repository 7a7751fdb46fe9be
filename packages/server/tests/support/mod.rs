// Shared across test targets; not every target uses every helper.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{
    AssetError, AssetStore, AssetUpload, DeleteOutcome, ResourceType, UploadedAsset,
};

/// What `delete` answers after recording the call.
#[derive(Default)]
enum DeleteBehavior {
    #[default]
    Deleted,
    /// Host acknowledges but does not know the public id.
    Unknown,
    /// Host acknowledges with a non-"ok" result.
    Rejected,
    /// Host never answers usefully at all.
    Unreachable,
}

/// Test double for the asset host: records every call and can be told to
/// fail a specific upload or to answer deletions a particular way.
#[derive(Default)]
pub struct RecordingAssetStore {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<(String, ResourceType)>>,
    upload_calls: AtomicUsize,
    fail_upload_at: Option<usize>,
    delete_behavior: DeleteBehavior,
}

impl RecordingAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th upload call (1-based); earlier calls succeed.
    pub fn failing_upload_at(n: usize) -> Self {
        Self {
            fail_upload_at: Some(n),
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            delete_behavior: DeleteBehavior::Rejected,
            ..Self::default()
        }
    }

    /// Deletions answer "not found".
    pub fn unknown_on_delete() -> Self {
        Self {
            delete_behavior: DeleteBehavior::Unknown,
            ..Self::default()
        }
    }

    /// Deletions fail at the transport level.
    pub fn unreachable_on_delete() -> Self {
        Self {
            delete_behavior: DeleteBehavior::Unreachable,
            ..Self::default()
        }
    }

    /// Filenames passed to `upload`, in call order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(String, ResourceType)> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn upload(&self, upload: AssetUpload) -> Result<UploadedAsset, AssetError> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.uploads.lock().unwrap().push(upload.filename.clone());

        if self.fail_upload_at == Some(call) {
            return Err(AssetError::Rejected {
                result: "simulated host failure".into(),
            });
        }

        let resource_type = upload
            .resource_type()
            .ok_or_else(|| AssetError::UnsupportedMediaType(upload.content_type.clone()))?;
        Ok(UploadedAsset {
            url: format!(
                "https://res.host.test/demo/{}/upload/v1/{}",
                resource_type.as_str(),
                upload.filename
            ),
            public_id: format!("{}-{call}", upload.title_stem()),
            resource_type,
        })
    }

    async fn delete(
        &self,
        public_id: &str,
        resource_type: ResourceType,
    ) -> Result<DeleteOutcome, AssetError> {
        self.deletes
            .lock()
            .unwrap()
            .push((public_id.to_string(), resource_type));

        match self.delete_behavior {
            DeleteBehavior::Deleted => Ok(DeleteOutcome::Deleted),
            DeleteBehavior::Unknown => Ok(DeleteOutcome::NotFound),
            DeleteBehavior::Rejected => Err(AssetError::Rejected {
                result: "simulated host failure".into(),
            }),
            DeleteBehavior::Unreachable => Err(AssetError::UnexpectedStatus {
                status: 503,
                body: "upstream unavailable".into(),
            }),
        }
    }
}
