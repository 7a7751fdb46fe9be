use serde::{Deserialize, Serialize};

/// Media host resource class. Determines the upload endpoint and is required
/// by the host's destroy call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Image,
    Video,
}

impl ResourceType {
    /// Classify a MIME type the way the upload routing does: any `video/*`
    /// goes to the video endpoint, any `image/*` to the image endpoint.
    /// Everything else is not uploadable.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("video/") {
            Some(Self::Video)
        } else if mime.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A file handed to the asset store for upload.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl AssetUpload {
    /// Resource class of this upload, or `None` for unsupported MIME types.
    pub fn resource_type(&self) -> Option<ResourceType> {
        ResourceType::from_mime(&self.content_type)
    }

    /// Filename without its extension, used as the default media title.
    pub fn title_stem(&self) -> &str {
        self.filename
            .split_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.filename)
    }
}

/// A successfully hosted asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    /// Stable HTTPS URL served by the host.
    pub url: String,
    /// Host-side identifier used for deletion.
    pub public_id: String,
    pub resource_type: ResourceType,
}

/// Host acknowledgment of a destroy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The host no longer knows the identifier. Treated as success by
    /// callers since the end state is the same.
    NotFound,
}

/// Derive a public id from an asset URL by taking the final path segment and
/// stripping its extension.
///
/// Fallback for legacy rows that stored a URL without its paired public id.
/// The upload response's `public_id` is the primary source of truth.
pub fn derive_public_id(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next()?;
    let stem = segment.split_once('.').map(|(s, _)| s).unwrap_or(segment);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mime_routes_video_prefix_to_video() {
        assert_eq!(ResourceType::from_mime("video/mp4"), Some(ResourceType::Video));
        assert_eq!(
            ResourceType::from_mime("video/quicktime"),
            Some(ResourceType::Video)
        );
    }

    #[test]
    fn from_mime_routes_images_to_image() {
        assert_eq!(ResourceType::from_mime("image/png"), Some(ResourceType::Image));
        assert_eq!(ResourceType::from_mime("image/webp"), Some(ResourceType::Image));
    }

    #[test]
    fn from_mime_rejects_other_types() {
        assert_eq!(ResourceType::from_mime("application/pdf"), None);
        assert_eq!(ResourceType::from_mime("text/plain"), None);
        assert_eq!(ResourceType::from_mime(""), None);
    }

    #[test]
    fn derive_public_id_strips_extension() {
        assert_eq!(
            derive_public_id("https://res.host.com/demo/image/upload/v1/zwdxmjldqrqpanl3wyeh.png"),
            Some("zwdxmjldqrqpanl3wyeh".to_string())
        );
    }

    #[test]
    fn derive_public_id_handles_missing_extension() {
        assert_eq!(
            derive_public_id("https://res.host.com/demo/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn derive_public_id_rejects_trailing_slash() {
        assert_eq!(derive_public_id("https://res.host.com/demo/"), None);
    }

    #[test]
    fn title_stem_drops_extension_only() {
        let upload = AssetUpload {
            bytes: vec![],
            filename: "team.photo.jpg".into(),
            content_type: "image/jpeg".into(),
        };
        assert_eq!(upload.title_stem(), "team");

        let no_ext = AssetUpload {
            bytes: vec![],
            filename: "raw".into(),
            content_type: "image/png".into(),
        };
        assert_eq!(no_ext.title_stem(), "raw");
    }
}
