// ABOUTME: Wizard controller state: which step the user is on, loaded server
// data, and finalization guards

use crate::models::{DraftStatus, WantsAnalysis, WantsDraft, WantsProgress};

/// Presentation order of the wizard. Stage completion timestamps may arrive
/// in any order from the backend; this fixed order is what the user walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Stream,
    FutureMe,
    Reverse,
    Analysis,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::Stream,
            Self::FutureMe,
            Self::Reverse,
            Self::Analysis,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Stream => 0,
            Self::FutureMe => 1,
            Self::Reverse => 2,
            Self::Analysis => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Stream => "Stream",
            Self::FutureMe => "Future me",
            Self::Reverse => "Reverse",
            Self::Analysis => "Analysis",
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Stream => None,
            Self::FutureMe => Some(Self::Stream),
            Self::Reverse => Some(Self::FutureMe),
            Self::Analysis => None,
        }
    }
}

/// Derive the active step from server-side progress.
///
/// Total over every flag combination: a completed draft always lands on
/// Analysis; otherwise the first unfinished stage wins; a draft whose three
/// stages are all done but which is not yet completed stays on Reverse so the
/// finalize action remains visible.
pub fn derive_step(progress: &WantsProgress) -> WizardStep {
    if progress.status == DraftStatus::Completed {
        WizardStep::Analysis
    } else if !progress.stream_done {
        WizardStep::Stream
    } else if !progress.future_me_done {
        WizardStep::FutureMe
    } else {
        WizardStep::Reverse
    }
}

/// Owns the server-sourced wizard data and the active-step decision.
///
/// Progress is never recomputed locally from draft fields; it is re-fetched
/// after every mutation so server-side completion rules stay authoritative.
#[derive(Debug, Default)]
pub struct WizardController {
    pub draft: Option<WantsDraft>,
    pub progress: Option<WantsProgress>,
    pub analysis: Option<WantsAnalysis>,
    current_step: WizardStep,
    pub loading: bool,
    pub load_failed: bool,
    finalizing: bool,
    /// Set when complete-draft succeeded but the analysis request failed.
    /// Retry then re-issues only the analysis call; completion is not rolled
    /// back server-side.
    pub analysis_pending_retry: bool,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Stream
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Install freshly loaded server state and recompute the active step.
    pub fn apply_loaded(
        &mut self,
        draft: WantsDraft,
        progress: WantsProgress,
        analysis: Option<WantsAnalysis>,
    ) {
        self.current_step = derive_step(&progress);
        self.draft = Some(draft);
        self.progress = Some(progress);
        if analysis.is_some() {
            self.analysis = analysis;
        }
        self.loading = false;
        self.load_failed = false;
    }

    pub fn load_failed(&mut self) {
        // Prior state stays visible; the user can refresh manually
        self.loading = false;
        self.load_failed = true;
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Step back one step for viewing. The derived step wins again on the
    /// next refresh.
    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.current_step.previous() {
            self.current_step = prev;
            true
        } else {
            false
        }
    }

    pub fn show_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    /// The finalize action is offered only when every stage is done and the
    /// draft has not yet been completed.
    pub fn can_finalize(&self) -> bool {
        !self.finalizing
            && !self.analysis_pending_retry
            && self
                .progress
                .as_ref()
                .is_some_and(|p| p.all_done && p.status != DraftStatus::Completed)
    }

    /// Claim the finalize action. Returns false while a prior finalize is
    /// still in flight, so a second trigger never issues a second
    /// complete-draft call.
    pub fn begin_finalize(&mut self) -> bool {
        if !self.can_finalize() {
            return false;
        }
        self.finalizing = true;
        true
    }

    pub fn is_finalizing(&self) -> bool {
        self.finalizing
    }

    /// Complete-draft and request-analysis both succeeded.
    pub fn finalize_succeeded(&mut self, draft: WantsDraft, analysis: WantsAnalysis) {
        self.draft = Some(draft);
        self.analysis = Some(analysis);
        self.finalizing = false;
        self.analysis_pending_retry = false;
        if let Some(progress) = self.progress.as_mut() {
            progress.status = DraftStatus::Completed;
        }
        self.current_step = WizardStep::Analysis;
    }

    /// Complete-draft succeeded but the analysis request failed. The draft is
    /// already completed server-side; stay on Reverse and offer a retry of
    /// the analysis call only.
    pub fn finalize_analysis_failed(&mut self, draft: WantsDraft) {
        self.draft = Some(draft);
        self.finalizing = false;
        self.analysis_pending_retry = true;
        self.current_step = WizardStep::Reverse;
    }

    /// Complete-draft itself failed; nothing changed server-side.
    pub fn finalize_failed(&mut self) {
        self.finalizing = false;
    }

    pub fn begin_analysis_retry(&mut self) -> bool {
        if !self.analysis_pending_retry || self.finalizing {
            return false;
        }
        self.finalizing = true;
        true
    }

    pub fn analysis_retry_succeeded(&mut self, analysis: WantsAnalysis) {
        self.analysis = Some(analysis);
        self.finalizing = false;
        self.analysis_pending_retry = false;
        self.current_step = WizardStep::Analysis;
    }

    pub fn analysis_retry_failed(&mut self) {
        self.finalizing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(
        status: DraftStatus,
        stream: bool,
        future_me: bool,
        reverse: bool,
    ) -> WantsProgress {
        WantsProgress {
            raw_id: "r-1".to_string(),
            status,
            stream_done: stream,
            future_me_done: future_me,
            reverse_done: reverse,
            all_done: stream && future_me && reverse,
        }
    }

    #[test]
    fn test_derive_step_all_combinations() {
        for stream in [false, true] {
            for future_me in [false, true] {
                for reverse in [false, true] {
                    for status in [DraftStatus::Draft, DraftStatus::Completed] {
                        let step = derive_step(&progress(status, stream, future_me, reverse));
                        let expected = if status == DraftStatus::Completed {
                            WizardStep::Analysis
                        } else if !stream {
                            WizardStep::Stream
                        } else if !future_me {
                            WizardStep::FutureMe
                        } else {
                            WizardStep::Reverse
                        };
                        assert_eq!(step, expected, "({status:?}, {stream}, {future_me}, {reverse})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_all_done_but_not_completed_stays_on_reverse() {
        let step = derive_step(&progress(DraftStatus::Draft, true, true, true));
        assert_eq!(step, WizardStep::Reverse);
    }

    #[test]
    fn test_finalize_is_not_reentrant() {
        let mut controller = WizardController::new();
        let draft: crate::models::WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        controller.apply_loaded(draft, progress(DraftStatus::Draft, true, true, true), None);

        assert!(controller.begin_finalize());
        // Second trigger while the first is in flight must be rejected
        assert!(!controller.begin_finalize());

        controller.finalize_failed();
        assert!(controller.begin_finalize());
    }

    #[test]
    fn test_finalize_not_offered_before_all_done() {
        let mut controller = WizardController::new();
        let draft: crate::models::WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        controller.apply_loaded(draft, progress(DraftStatus::Draft, true, true, false), None);
        assert!(!controller.begin_finalize());
    }

    #[test]
    fn test_analysis_failure_keeps_reverse_and_offers_retry() {
        let mut controller = WizardController::new();
        let draft: crate::models::WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        controller.apply_loaded(
            draft.clone(),
            progress(DraftStatus::Draft, true, true, true),
            None,
        );

        assert!(controller.begin_finalize());
        controller.finalize_analysis_failed(draft);
        assert_eq!(controller.current_step(), WizardStep::Reverse);
        // complete-draft must not be re-issued, only the analysis call
        assert!(!controller.begin_finalize());
        assert!(controller.begin_analysis_retry());
    }

    #[test]
    fn test_go_back_and_refresh_snaps_to_derived_step() {
        let mut controller = WizardController::new();
        let draft: crate::models::WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        controller.apply_loaded(
            draft.clone(),
            progress(DraftStatus::Draft, true, false, false),
            None,
        );
        assert_eq!(controller.current_step(), WizardStep::FutureMe);

        assert!(controller.go_back());
        assert_eq!(controller.current_step(), WizardStep::Stream);
        assert!(!controller.go_back());

        controller.apply_loaded(draft, progress(DraftStatus::Draft, true, true, false), None);
        assert_eq!(controller.current_step(), WizardStep::Reverse);
    }
}
