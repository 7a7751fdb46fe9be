/// Save lifecycle of an edit buffer.
///
/// `Success` and `Error` are transient display states; callers move them
/// back to `Idle` with [`EditBuffer::acknowledge`] once shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Success,
    Error,
}

/// Per-field edit state: the value as last persisted (`displayed`) and the
/// value being typed (`draft`).
///
/// The buffer is ephemeral and owned by exactly one editor instance; it is
/// never persisted. All editors share this one type instead of re-declaring
/// the displayed/draft/dirty triple ad hoc.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer<T: Clone + PartialEq> {
    displayed: T,
    draft: T,
    editing: bool,
    save_state: SaveState,
}

impl<T: Clone + PartialEq> EditBuffer<T> {
    /// Seed both values from the persisted record.
    pub fn seed(&mut self, value: T) {
        self.displayed = value.clone();
        self.draft = value;
    }

    /// Enter edit mode, copying the displayed value into the draft.
    /// Idempotent: re-entering keeps the current draft.
    pub fn edit(&mut self) {
        if !self.editing {
            self.draft = self.displayed.clone();
            self.editing = true;
        }
    }

    /// Discard the draft, exit edit mode and clear any error state.
    pub fn cancel(&mut self) {
        self.draft = self.displayed.clone();
        self.editing = false;
        self.save_state = SaveState::Idle;
    }

    pub fn set_draft(&mut self, draft: T) {
        self.draft = draft;
        self.editing = true;
    }

    pub fn displayed(&self) -> &T {
        &self.displayed
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    pub fn has_changes(&self) -> bool {
        self.draft != self.displayed
    }

    /// Mark a save as started. Refuses while another save is in flight
    /// (single-flight per buffer).
    pub fn begin_save(&mut self) -> bool {
        if self.save_state == SaveState::Saving {
            return false;
        }
        self.save_state = SaveState::Saving;
        true
    }

    /// The save was persisted: the draft becomes the displayed value and
    /// edit mode exits.
    pub fn commit_save(&mut self, saved: T) {
        self.displayed = saved.clone();
        self.draft = saved;
        self.editing = false;
        self.save_state = SaveState::Success;
    }

    /// The save failed: draft and displayed values are left exactly as they
    /// were before the attempt.
    pub fn fail_save(&mut self) {
        self.save_state = SaveState::Error;
    }

    /// Reset a transient `Success`/`Error` state back to `Idle`.
    pub fn acknowledge(&mut self) {
        if matches!(self.save_state, SaveState::Success | SaveState::Error) {
            self.save_state = SaveState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> EditBuffer<String> {
        let mut b = EditBuffer::default();
        b.seed("hello".to_string());
        b
    }

    #[test]
    fn edit_is_idempotent() {
        let mut b = buffer();
        b.edit();
        b.set_draft("draft".into());
        b.edit();
        assert_eq!(b.draft(), "draft");
        assert!(b.is_editing());
    }

    #[test]
    fn cancel_restores_displayed_value() {
        let mut b = buffer();
        b.set_draft("changed".into());
        b.fail_save();
        b.cancel();
        assert_eq!(b.draft(), "hello");
        assert!(!b.is_editing());
        assert_eq!(b.save_state(), SaveState::Idle);
    }

    #[test]
    fn has_changes_compares_draft_to_displayed() {
        let mut b = buffer();
        assert!(!b.has_changes());
        b.set_draft("other".into());
        assert!(b.has_changes());
        b.set_draft("hello".into());
        assert!(!b.has_changes());
    }

    #[test]
    fn begin_save_is_single_flight() {
        let mut b = buffer();
        assert!(b.begin_save());
        assert!(!b.begin_save());
        b.commit_save("saved".into());
        assert!(b.begin_save());
    }

    #[test]
    fn commit_save_exits_edit_mode() {
        let mut b = buffer();
        b.set_draft("new".into());
        assert!(b.begin_save());
        b.commit_save("new".into());
        assert_eq!(b.displayed(), "new");
        assert!(!b.is_editing());
        assert_eq!(b.save_state(), SaveState::Success);
        b.acknowledge();
        assert_eq!(b.save_state(), SaveState::Idle);
    }

    #[test]
    fn fail_save_keeps_pre_attempt_values() {
        let mut b = buffer();
        b.set_draft("attempt".into());
        assert!(b.begin_save());
        b.fail_save();
        assert_eq!(b.displayed(), "hello");
        assert_eq!(b.draft(), "attempt");
        assert_eq!(b.save_state(), SaveState::Error);
    }
}
