use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use super::config::AssetHostConfig;
use super::error::AssetError;
use super::traits::AssetStore;
use super::types::{AssetUpload, DeleteOutcome, ResourceType, UploadedAsset};

/// reqwest-backed client for the hosted media API.
///
/// Uploads go to `{base}/{cloud}/{image|video}/upload` as unsigned preset
/// uploads; deletions go to `{base}/{cloud}/{resource_type}/destroy` signed
/// with the account secret.
pub struct HostedAssetStore {
    http: reqwest::Client,
    config: AssetHostConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

impl HostedAssetStore {
    pub fn new(config: AssetHostConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, resource_type: ResourceType, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.base_url,
            self.config.cloud_name,
            resource_type.as_str(),
            action
        )
    }
}

/// Signature over the sorted destroy parameters plus the account secret,
/// using the host's sha256 mode.
pub fn destroy_signature(public_id: &str, timestamp: i64, api_secret: &str) -> String {
    let to_sign = format!(
        "public_id={public_id}&signature_algorithm=sha256&timestamp={timestamp}{api_secret}"
    );
    hex::encode(Sha256::digest(to_sign.as_bytes()))
}

#[async_trait]
impl AssetStore for HostedAssetStore {
    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    async fn upload(&self, upload: AssetUpload) -> Result<UploadedAsset, AssetError> {
        let resource_type = upload
            .resource_type()
            .ok_or_else(|| AssetError::UnsupportedMediaType(upload.content_type.clone()))?;

        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename.clone())
            .mime_str(&upload.content_type)
            .map_err(AssetError::Transport)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .http
            .post(self.endpoint(resource_type, "upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AssetError::MalformedResponse(e.to_string()))?;

        debug!(public_id = %body.public_id, "asset uploaded");

        Ok(UploadedAsset {
            url: body.secure_url,
            public_id: body.public_id,
            resource_type,
        })
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        public_id: &str,
        resource_type: ResourceType,
    ) -> Result<DeleteOutcome, AssetError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = destroy_signature(public_id, timestamp, &self.config.api_secret);

        let response = self
            .http
            .post(self.endpoint(resource_type, "destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", &timestamp.to_string()),
                ("signature_algorithm", "sha256"),
                ("signature", &signature),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AssetError::MalformedResponse(e.to_string()))?;

        match body.result.as_str() {
            "ok" => Ok(DeleteOutcome::Deleted),
            "not found" => Ok(DeleteOutcome::NotFound),
            other => Err(AssetError::Rejected {
                result: other.to_string(),
            }),
        }
    }
}
