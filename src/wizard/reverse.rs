// ABOUTME: Reverse-engineering step: three reflection answers saved together
// Finish is gated locally on non-blank fields; the server remains the arbiter

use crate::app::editor::TextEditor;
use crate::models::WantsDraft;

/// The three reverse questions, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseField {
    Envy,
    Regrets,
    Plan5y,
}

impl ReverseField {
    pub fn all() -> &'static [ReverseField] {
        &[Self::Envy, Self::Regrets, Self::Plan5y]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Envy => "1. Envy",
            Self::Regrets => "2. Regrets",
            Self::Plan5y => "3. Five-year plan",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Envy => "Who or what do you envy? Benign envy points at hidden wants.",
            Self::Regrets => "What will you regret in ten years if you do not act now?",
            Self::Plan5y => "What exactly should you do over the next five years?",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Envy => Self::Regrets,
            Self::Regrets => Self::Plan5y,
            Self::Plan5y => Self::Envy,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Envy => Self::Plan5y,
            Self::Regrets => Self::Envy,
            Self::Plan5y => Self::Regrets,
        }
    }
}

#[derive(Debug)]
pub struct ReverseState {
    pub envy: TextEditor,
    pub regrets: TextEditor,
    pub plan: TextEditor,
    pub focus: ReverseField,
    pub saving: bool,
    pub finishing: bool,
}

impl ReverseState {
    pub fn new() -> Self {
        Self {
            envy: TextEditor::new(),
            regrets: TextEditor::new(),
            plan: TextEditor::new(),
            focus: ReverseField::Envy,
            saving: false,
            finishing: false,
        }
    }

    pub fn from_draft(draft: &WantsDraft) -> Self {
        Self {
            envy: TextEditor::from_string(draft.raw_envy.as_deref().unwrap_or_default()),
            regrets: TextEditor::from_string(draft.raw_regrets.as_deref().unwrap_or_default()),
            plan: TextEditor::from_string(draft.raw_what_to_do_5y.as_deref().unwrap_or_default()),
            focus: ReverseField::Envy,
            saving: false,
            finishing: false,
        }
    }

    pub fn editor(&self, field: ReverseField) -> &TextEditor {
        match field {
            ReverseField::Envy => &self.envy,
            ReverseField::Regrets => &self.regrets,
            ReverseField::Plan5y => &self.plan,
        }
    }

    pub fn focused_editor_mut(&mut self) -> &mut TextEditor {
        match self.focus {
            ReverseField::Envy => &mut self.envy,
            ReverseField::Regrets => &mut self.regrets,
            ReverseField::Plan5y => &mut self.plan,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Finish is enabled iff all three answers are non-blank after trimming.
    /// This is a UX gate only; the server recomputes stage completion itself.
    pub fn can_finish(&self) -> bool {
        !self.finishing
            && !self.saving
            && !self.envy.is_blank()
            && !self.regrets.is_blank()
            && !self.plan.is_blank()
    }

    /// The three answers as they would be sent to the backend
    pub fn payload(&self) -> (String, String, String) {
        (self.envy.text(), self.regrets.text(), self.plan.text())
    }

    pub fn save_succeeded(&mut self) {
        self.saving = false;
    }

    pub fn save_failed(&mut self) {
        self.saving = false;
        self.finishing = false;
    }

    pub fn finish_done(&mut self) {
        self.finishing = false;
    }
}

impl Default for ReverseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReverseState {
        ReverseState {
            envy: TextEditor::from_string("calm people"),
            regrets: TextEditor::from_string("not moving abroad"),
            plan: TextEditor::from_string("learn, save, relocate"),
            ..ReverseState::new()
        }
    }

    #[test]
    fn test_finish_requires_all_three_fields() {
        let mut state = ReverseState::new();
        assert!(!state.can_finish());

        state.envy = TextEditor::from_string("freedom");
        assert!(!state.can_finish());

        state.regrets = TextEditor::from_string("playing it safe");
        assert!(!state.can_finish());

        state.plan = TextEditor::from_string("start the company");
        assert!(state.can_finish());
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut state = filled();
        state.regrets = TextEditor::from_string("   \n\t  ");
        assert!(!state.can_finish());
    }

    #[test]
    fn test_finish_disabled_while_request_in_flight() {
        let mut state = filled();
        assert!(state.can_finish());
        state.finishing = true;
        assert!(!state.can_finish());
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut state = ReverseState::new();
        assert_eq!(state.focus, ReverseField::Envy);
        state.focus_next();
        assert_eq!(state.focus, ReverseField::Regrets);
        state.focus_next();
        assert_eq!(state.focus, ReverseField::Plan5y);
        state.focus_next();
        assert_eq!(state.focus, ReverseField::Envy);
        state.focus_previous();
        assert_eq!(state.focus, ReverseField::Plan5y);
    }

    #[test]
    fn test_from_draft_prefills_answers() {
        let draft: WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "raw_envy": "e", "raw_regrets": "r", "raw_what_to_do_5y": "p",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        let state = ReverseState::from_draft(&draft);
        let (envy, regrets, plan) = state.payload();
        assert_eq!((envy.as_str(), regrets.as_str(), plan.as_str()), ("e", "r", "p"));
    }
}
