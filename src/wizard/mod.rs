// ABOUTME: The wants wizard core: controller, step state machines, history
// Pure client-side state; all I/O lives in the app layer

pub mod controller;
pub mod future_me;
pub mod history;
pub mod reverse;
pub mod stream;

pub use controller::{derive_step, WizardController, WizardStep};
pub use future_me::{FutureMeState, MIN_LETTER_CHARS};
pub use history::HistoryState;
pub use reverse::{ReverseField, ReverseState};
pub use stream::{CountdownTimer, EntryStatus, StreamEntry, StreamPhase, StreamState, TimerTick};

use crate::models::{WantsAnalysis, WantsDraft, WantsProgress};

/// The controller plus per-step component state, rebuilt together whenever
/// fresh server data arrives.
#[derive(Debug, Default)]
pub struct WizardState {
    pub controller: WizardController,
    pub stream: StreamState,
    pub future_me: FutureMeState,
    pub reverse: ReverseState,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            controller: WizardController::new(),
            stream: StreamState::new(),
            future_me: FutureMeState::new(),
            reverse: ReverseState::new(),
        }
    }

    /// Install a full load/refresh result. Step states are rebuilt from the
    /// draft so a half-finished stage resumes where it left off. Local work
    /// the server has not seen survives the rebuild: unconfirmed stream
    /// entries are re-queued and a dirty letter keeps its edits.
    pub fn apply_loaded(
        &mut self,
        draft: WantsDraft,
        progress: WantsProgress,
        analysis: Option<WantsAnalysis>,
    ) {
        let mut stream = StreamState::from_draft(&draft);
        stream.adopt_unconfirmed(&self.stream);
        self.stream = stream;

        if !self.future_me.is_dirty() {
            self.future_me = FutureMeState::from_draft(&draft);
        }
        self.reverse = ReverseState::from_draft(&draft);
        self.controller.apply_loaded(draft, progress, analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftStatus;

    #[test]
    fn test_apply_loaded_resumes_step_states() {
        let draft: WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "stream_started_at": "2026-01-10T09:00:00Z",
                "stream_completed_at": "2026-01-10T09:10:00Z",
                "raw_wants_stream": "sail the Aegean",
                "raw_future_me": "I am forty.",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        let progress = WantsProgress {
            raw_id: "d-1".to_string(),
            status: DraftStatus::Draft,
            stream_done: true,
            future_me_done: false,
            reverse_done: false,
            all_done: false,
        };

        let mut wizard = WizardState::new();
        wizard.apply_loaded(draft, progress, None);

        assert_eq!(wizard.controller.current_step(), WizardStep::FutureMe);
        assert_eq!(wizard.stream.phase, StreamPhase::Finished);
        assert_eq!(wizard.future_me.editor.text(), "I am forty.");
    }

    fn draft_and_progress() -> (WantsDraft, WantsProgress) {
        let draft: WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "stream_started_at": "2026-01-10T09:00:00Z",
                "raw_future_me": "Dear me,",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        let progress = WantsProgress {
            raw_id: "d-1".to_string(),
            status: DraftStatus::Draft,
            stream_done: false,
            future_me_done: false,
            reverse_done: false,
            all_done: false,
        };
        (draft, progress)
    }

    #[test]
    fn test_reload_keeps_dirty_letter_edits() {
        let (draft, progress) = draft_and_progress();
        let mut wizard = WizardState::new();
        wizard.apply_loaded(draft.clone(), progress.clone(), None);

        for ch in " I made it.".chars() {
            wizard.future_me.editor.insert_char(ch);
        }
        assert!(wizard.future_me.is_dirty());

        // The server draft still holds the old text; the local edits win
        wizard.apply_loaded(draft, progress, None);
        assert_eq!(wizard.future_me.editor.text(), "Dear me, I made it.");
        assert!(wizard.future_me.is_dirty());
    }

    #[test]
    fn test_reload_requeues_unconfirmed_stream_entries() {
        let (draft, progress) = draft_and_progress();
        let mut wizard = WizardState::new();
        wizard.apply_loaded(draft.clone(), progress.clone(), None);
        assert_eq!(wizard.stream.phase, StreamPhase::Active);

        wizard.stream.input = "be outside more".to_string();
        let id = wizard.stream.submit_line().unwrap();
        let _ = wizard.stream.next_queued();
        wizard.stream.append_failed(id);
        assert_eq!(wizard.stream.failed_count(), 1);

        // A refresh rebuilds the stream from the draft, but the unsaved line
        // comes along and goes back on the wire
        wizard.apply_loaded(draft, progress, None);
        assert!(wizard.stream.has_queued());
        let (_, text) = wizard.stream.next_queued().unwrap();
        assert_eq!(text, "be outside more");
    }
}
