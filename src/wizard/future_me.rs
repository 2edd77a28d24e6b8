// ABOUTME: Future-self letter step: one long-form text with autosave and a
// minimum-length finish gate

use crate::app::editor::TextEditor;
use crate::models::WantsDraft;
use chrono::{DateTime, Utc};

/// Letters shorter than this cannot be submitted as finished
pub const MIN_LETTER_CHARS: usize = 50;

#[derive(Debug)]
pub struct FutureMeState {
    pub editor: TextEditor,
    pub saving: bool,
    pub finishing: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Content at the time of the last successful save; used to skip no-op
    /// autosaves
    saved_text: String,
}

impl FutureMeState {
    pub fn new() -> Self {
        Self {
            editor: TextEditor::new(),
            saving: false,
            finishing: false,
            last_saved_at: None,
            saved_text: String::new(),
        }
    }

    pub fn from_draft(draft: &WantsDraft) -> Self {
        let text = draft.raw_future_me.as_deref().unwrap_or_default();
        Self {
            editor: TextEditor::from_string(text),
            saving: false,
            finishing: false,
            last_saved_at: None,
            saved_text: text.to_string(),
        }
    }

    /// Whether an autosave would persist anything new
    pub fn is_dirty(&self) -> bool {
        self.editor.text() != self.saved_text
    }

    pub fn can_finish(&self) -> bool {
        !self.finishing && self.editor.trimmed_len() >= MIN_LETTER_CHARS
    }

    /// Characters still needed before the letter can be finished
    pub fn chars_missing(&self) -> usize {
        MIN_LETTER_CHARS.saturating_sub(self.editor.trimmed_len())
    }

    pub fn save_succeeded(&mut self) {
        self.saving = false;
        self.saved_text = self.editor.text();
        self.last_saved_at = Some(Utc::now());
    }

    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    pub fn finish_failed(&mut self) {
        self.finishing = false;
    }
}

impl Default for FutureMeState {
    fn default() -> Self {
        Self::new()
    }
}
