use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::{AssetStore, AssetUpload, ResourceType, UploadedAsset, derive_public_id};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::warn;

use crate::entity::home_content;
use crate::fields::AssetField;

use super::EditorError;

/// Local preview reference for a not-yet-committed file.
///
/// Stands in for an object URL: it must be released exactly once, when the
/// preview is superseded, cancelled, or committed. Dropping the handle
/// releases it.
#[derive(Debug)]
pub struct PreviewHandle {
    released: Arc<AtomicBool>,
}

/// Read-only view onto a preview handle's lifetime.
#[derive(Debug, Clone)]
pub struct PreviewProbe(Arc<AtomicBool>);

impl PreviewProbe {
    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl PreviewHandle {
    pub fn new() -> Self {
        Self {
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    pub fn probe(&self) -> PreviewProbe {
        PreviewProbe(Arc::clone(&self.released))
    }
}

impl Default for PreviewHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// A selected file waiting to be committed.
#[derive(Debug)]
pub struct PendingUpload {
    pub file: AssetUpload,
    pub preview: PreviewHandle,
}

/// Observable editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFieldState {
    Empty,
    Previewing,
    Uploading,
    HasAsset,
    Deleting,
}

/// Outcome of a remove that nulled the record columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Host asset deleted and record columns nulled.
    Clean,
    /// Record columns nulled but the host deletion failed; an orphaned
    /// asset may remain on the host. Accepted inconsistency window.
    Degraded,
}

#[derive(Debug, Clone)]
struct StoredAsset {
    url: String,
    public_id: Option<String>,
    resource_type: ResourceType,
}

enum Slot {
    Empty,
    Previewing {
        pending: PendingUpload,
        /// Persisted asset the preview would replace, kept for cancel.
        prior: Option<StoredAsset>,
    },
    Uploading {
        prior: Option<StoredAsset>,
    },
    HasAsset(StoredAsset),
    Deleting(StoredAsset),
}

/// Keeps exactly one `(url, public_id)` column pair of one `home_content`
/// row in sync with a user-selected file.
///
/// State machine: `Empty → Previewing → Uploading → HasAsset` and
/// `HasAsset → Deleting → Empty`. Commit and remove are single-flight per
/// instance: a second invocation while one is in flight gets `Busy`, it is
/// never queued.
pub struct AssetFieldEditor {
    record_id: String,
    field: AssetField,
    slot: Slot,
}

impl AssetFieldEditor {
    pub fn new(record_id: impl Into<String>, field: AssetField) -> Self {
        Self {
            record_id: record_id.into(),
            field,
            slot: Slot::Empty,
        }
    }

    pub fn state(&self) -> AssetFieldState {
        match &self.slot {
            Slot::Empty => AssetFieldState::Empty,
            Slot::Previewing { .. } => AssetFieldState::Previewing,
            Slot::Uploading { .. } => AssetFieldState::Uploading,
            Slot::HasAsset(_) => AssetFieldState::HasAsset,
            Slot::Deleting(_) => AssetFieldState::Deleting,
        }
    }

    /// URL of the persisted asset, if any (including while previewing its
    /// replacement).
    pub fn current_url(&self) -> Option<&str> {
        match &self.slot {
            Slot::HasAsset(stored) | Slot::Deleting(stored) => Some(&stored.url),
            Slot::Previewing { prior, .. } | Slot::Uploading { prior } => {
                prior.as_ref().map(|s| s.url.as_str())
            }
            Slot::Empty => None,
        }
    }

    /// Probe for the pending preview's lifetime, if a file is staged.
    pub fn preview_probe(&self) -> Option<PreviewProbe> {
        match &self.slot {
            Slot::Previewing { pending, .. } => Some(pending.preview.probe()),
            _ => None,
        }
    }

    /// Seed from the record: a populated column transitions straight to
    /// `HasAsset` with no local file.
    pub async fn load<C: ConnectionTrait>(&mut self, db: &C) -> Result<(), DbErr> {
        let row = home_content::Entity::find_by_id(self.record_id.clone())
            .one(db)
            .await?;
        let pair = row.map(|m| self.field.read(&m)).unwrap_or_default();
        self.slot = match pair.url {
            Some(url) => Slot::HasAsset(StoredAsset {
                resource_type: infer_resource_type(&url),
                url,
                public_id: pair.public_id,
            }),
            None => Slot::Empty,
        };
        Ok(())
    }

    /// Stage a file for upload. Replaces any existing not-yet-committed
    /// preview, releasing its handle.
    pub fn select_file(&mut self, file: AssetUpload) -> Result<(), EditorError> {
        if file.resource_type().is_none() {
            return Err(EditorError::InvalidFileType(file.content_type));
        }
        let prior = match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Empty => None,
            Slot::HasAsset(stored) => Some(stored),
            Slot::Previewing { pending, prior } => {
                pending.preview.release();
                prior
            }
            busy @ (Slot::Uploading { .. } | Slot::Deleting(_)) => {
                self.slot = busy;
                return Err(EditorError::Busy);
            }
        };
        self.slot = Slot::Previewing {
            pending: PendingUpload {
                file,
                preview: PreviewHandle::new(),
            },
            prior,
        };
        Ok(())
    }

    /// Discard a staged file, releasing its preview handle.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Previewing { pending, prior } => {
                pending.preview.release();
                self.slot = match prior {
                    Some(stored) => Slot::HasAsset(stored),
                    None => Slot::Empty,
                };
                Ok(())
            }
            busy @ (Slot::Uploading { .. } | Slot::Deleting(_)) => {
                self.slot = busy;
                Err(EditorError::Busy)
            }
            other => {
                self.slot = other;
                Ok(())
            }
        }
    }

    /// Upload the staged file, then upsert the record's column pair.
    ///
    /// An upload failure leaves the record untouched and the file staged.
    /// A persist failure after a successful upload leaves the asset
    /// orphaned on the host; this is logged and not auto-remedied.
    pub async fn commit<C: ConnectionTrait>(
        &mut self,
        db: &C,
        assets: &dyn AssetStore,
    ) -> Result<UploadedAsset, EditorError> {
        let (pending, prior) = match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Previewing { pending, prior } => (pending, prior),
            busy @ (Slot::Uploading { .. } | Slot::Deleting(_)) => {
                self.slot = busy;
                return Err(EditorError::Busy);
            }
            other => {
                self.slot = other;
                return Err(EditorError::InvalidState);
            }
        };

        self.slot = Slot::Uploading {
            prior: prior.clone(),
        };

        let asset = match assets.upload(pending.file.clone()).await {
            Ok(asset) => asset,
            Err(err) => {
                self.slot = Slot::Previewing { pending, prior };
                return Err(EditorError::Upload(err));
            }
        };

        let persisted = upsert_asset_pair(
            db,
            &self.record_id,
            self.field,
            Some(asset.url.clone()),
            Some(asset.public_id.clone()),
        )
        .await;

        if let Err(err) = persisted {
            warn!(
                public_id = %asset.public_id,
                field = self.field.as_str(),
                "asset hosted but record update failed; asset orphaned on host"
            );
            self.slot = Slot::Previewing { pending, prior };
            return Err(EditorError::Persist(err));
        }

        pending.preview.release();
        self.slot = Slot::HasAsset(StoredAsset {
            url: asset.url.clone(),
            public_id: Some(asset.public_id.clone()),
            resource_type: asset.resource_type,
        });
        Ok(asset)
    }

    /// Null the column pair, deleting the hosted asset best-effort first.
    ///
    /// Host deletion failure is logged and degrades the outcome but never
    /// blocks the record update: record consistency wins over host
    /// consistency. Only a record update failure is fatal.
    pub async fn remove<C: ConnectionTrait>(
        &mut self,
        db: &C,
        assets: &dyn AssetStore,
    ) -> Result<RemoveOutcome, EditorError> {
        let stored = match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::HasAsset(stored) => stored,
            busy @ (Slot::Uploading { .. } | Slot::Deleting(_)) => {
                self.slot = busy;
                return Err(EditorError::Busy);
            }
            other => {
                self.slot = other;
                return Err(EditorError::InvalidState);
            }
        };
        self.slot = Slot::Deleting(stored.clone());

        // Re-read the stored public id; fall back to deriving it from the
        // URL for legacy rows that never stored one.
        let row = match home_content::Entity::find_by_id(self.record_id.clone())
            .one(db)
            .await
        {
            Ok(row) => row,
            Err(err) => {
                self.slot = Slot::HasAsset(stored);
                return Err(EditorError::Store(err));
            }
        };
        let pair = row.map(|m| self.field.read(&m)).unwrap_or_default();
        let public_id = pair
            .public_id
            .or_else(|| pair.url.as_deref().and_then(derive_public_id));

        let mut degraded = false;
        if let Some(ref public_id) = public_id {
            if let Err(err) = assets.delete(public_id, stored.resource_type).await {
                warn!(
                    %public_id,
                    field = self.field.as_str(),
                    error = %err,
                    "host deletion failed; proceeding with record update"
                );
                degraded = true;
            }
        }

        if let Err(err) = upsert_asset_pair(db, &self.record_id, self.field, None, None).await {
            self.slot = Slot::HasAsset(stored);
            return Err(EditorError::Persist(err));
        }

        self.slot = Slot::Empty;
        Ok(if degraded {
            RemoveOutcome::Degraded
        } else {
            RemoveOutcome::Clean
        })
    }
}

/// Insert-or-update one asset column pair by record key. URL and public id
/// are always written together.
pub async fn upsert_asset_pair<C: ConnectionTrait>(
    db: &C,
    record_id: &str,
    field: AssetField,
    url: Option<String>,
    public_id: Option<String>,
) -> Result<(), DbErr> {
    let existing = home_content::Entity::find_by_id(record_id.to_owned())
        .one(db)
        .await?;

    let mut am = home_content::ActiveModel {
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    field.apply(&mut am, url, public_id);

    if existing.is_none() {
        am.id = Set(record_id.to_owned());
        home_content::Entity::insert(am)
            .exec_without_returning(db)
            .await?;
    } else {
        home_content::Entity::update_many()
            .set(am)
            .filter(home_content::Column::Id.eq(record_id))
            .exec(db)
            .await?;
    }

    Ok(())
}

/// The host encodes the resource class in the delivery URL path, as the
/// `/{resource_type}/upload/` segment. Rows only store the URL, so this is
/// how a loaded editor knows which destroy endpoint to use. Matching the
/// full segment keeps a folder named `video` from flipping the class.
fn infer_resource_type(url: &str) -> ResourceType {
    if url.contains("/video/upload/") {
        ResourceType::Video
    } else {
        ResourceType::Image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> AssetUpload {
        AssetUpload {
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            filename: "hero.png".into(),
            content_type: "image/png".into(),
        }
    }

    #[test]
    fn select_file_rejects_non_media_types() {
        let mut editor = AssetFieldEditor::new("hero-section", AssetField::HeroImage);
        let result = editor.select_file(AssetUpload {
            bytes: vec![],
            filename: "notes.pdf".into(),
            content_type: "application/pdf".into(),
        });
        assert!(matches!(result, Err(EditorError::InvalidFileType(_))));
        assert_eq!(editor.state(), AssetFieldState::Empty);
    }

    #[test]
    fn select_file_transitions_to_previewing() {
        let mut editor = AssetFieldEditor::new("hero-section", AssetField::HeroImage);
        editor.select_file(png()).unwrap();
        assert_eq!(editor.state(), AssetFieldState::Previewing);
    }

    #[test]
    fn reselect_releases_previous_preview() {
        let mut editor = AssetFieldEditor::new("hero-section", AssetField::HeroImage);
        editor.select_file(png()).unwrap();
        let first = editor.preview_probe().unwrap();
        editor.select_file(png()).unwrap();
        assert!(first.is_released());
        assert!(!editor.preview_probe().unwrap().is_released());
    }

    #[test]
    fn cancel_releases_preview_and_restores_prior_state() {
        let mut editor = AssetFieldEditor::new("hero-section", AssetField::HeroImage);
        editor.select_file(png()).unwrap();
        let probe = editor.preview_probe().unwrap();
        editor.cancel().unwrap();
        assert!(probe.is_released());
        assert_eq!(editor.state(), AssetFieldState::Empty);
    }

    #[test]
    fn commit_from_empty_is_invalid() {
        let mut editor = AssetFieldEditor::new("hero-section", AssetField::HeroImage);
        // No database call happens before state validation, so a mock
        // connection is not needed here.
        let db = sea_orm::MockDatabase::new(sea_orm::DatabaseBackend::Postgres).into_connection();
        let assets = NoopStore;
        let result = futures_block_on(editor.commit(&db, &assets));
        assert!(matches!(result, Err(EditorError::InvalidState)));
    }

    #[test]
    fn infer_resource_type_from_delivery_url() {
        assert_eq!(
            infer_resource_type("https://res.host.com/demo/video/upload/v1/clip.mp4"),
            ResourceType::Video
        );
        assert_eq!(
            infer_resource_type("https://res.host.com/demo/image/upload/v1/pic.png"),
            ResourceType::Image
        );
        // An asset folder named "video" must not flip an image's class.
        assert_eq!(
            infer_resource_type("https://res.host.com/demo/image/upload/v1/video/teaser.png"),
            ResourceType::Image
        );
    }

    struct NoopStore;

    #[async_trait::async_trait]
    impl AssetStore for NoopStore {
        async fn upload(
            &self,
            _upload: AssetUpload,
        ) -> Result<UploadedAsset, common::AssetError> {
            unreachable!("not called in these tests")
        }

        async fn delete(
            &self,
            _public_id: &str,
            _resource_type: ResourceType,
        ) -> Result<common::DeleteOutcome, common::AssetError> {
            unreachable!("not called in these tests")
        }
    }

    fn futures_block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }
}
