use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::entity::home_content;
use crate::fields::{LangPair, TextField};

use super::buffer::EditBuffer;
use super::EditorError;

/// Result of a save attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Trimmed drafts already match the displayed values; no call was made.
    NoChanges,
}

/// Synchronizes one bilingual text pair of a `home_content` row with an
/// edit buffer.
///
/// The row may not exist yet; it is created on first save. Saving with both
/// languages blank is rejected client-side before any query is issued, so an
/// all-blank record can never be created.
pub struct BilingualEditor {
    record_id: String,
    field: TextField,
    buffer: EditBuffer<LangPair>,
}

impl BilingualEditor {
    pub fn new(record_id: impl Into<String>, field: TextField) -> Self {
        Self {
            record_id: record_id.into(),
            field,
            buffer: EditBuffer::default(),
        }
    }

    /// Fetch both columns and seed the buffer. A missing row is not an
    /// error: both languages are seeded empty.
    pub async fn load<C: ConnectionTrait>(&mut self, db: &C) -> Result<(), DbErr> {
        let row = home_content::Entity::find_by_id(self.record_id.clone())
            .one(db)
            .await?;
        let pair = row.map(|m| self.field.read(&m)).unwrap_or_default();
        self.buffer.seed(pair);
        Ok(())
    }

    pub fn edit(&mut self) {
        self.buffer.edit();
    }

    pub fn set_draft(&mut self, draft: LangPair) {
        self.buffer.set_draft(draft);
    }

    pub fn cancel(&mut self) {
        self.buffer.cancel();
    }

    pub fn buffer(&self) -> &EditBuffer<LangPair> {
        &self.buffer
    }

    pub fn field(&self) -> TextField {
        self.field
    }

    /// Persist the trimmed drafts, inserting the row if it does not exist.
    ///
    /// On success the displayed values take the trimmed drafts and edit mode
    /// exits. On store failure the buffer keeps its pre-attempt values with
    /// an `Error` save state.
    pub async fn save<C: ConnectionTrait>(&mut self, db: &C) -> Result<SaveOutcome, EditorError> {
        let trimmed = self.buffer.draft().trimmed();
        if trimmed.is_blank() {
            return Err(EditorError::Validation(
                "At least one language must have a value".into(),
            ));
        }
        if &trimmed == self.buffer.displayed() {
            return Ok(SaveOutcome::NoChanges);
        }
        if !self.buffer.begin_save() {
            return Err(EditorError::Busy);
        }

        match upsert_pair(db, &self.record_id, self.field, &trimmed).await {
            Ok(()) => {
                self.buffer.commit_save(trimmed);
                Ok(SaveOutcome::Saved)
            }
            Err(err) => {
                self.buffer.fail_save();
                Err(EditorError::Store(err))
            }
        }
    }
}

/// Insert-or-update both language columns of one field by record key.
pub async fn upsert_pair<C: ConnectionTrait>(
    db: &C,
    record_id: &str,
    field: TextField,
    pair: &LangPair,
) -> Result<(), DbErr> {
    let existing = home_content::Entity::find_by_id(record_id.to_owned())
        .one(db)
        .await?;

    let mut am = home_content::ActiveModel {
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    field.apply(&mut am, pair);

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
