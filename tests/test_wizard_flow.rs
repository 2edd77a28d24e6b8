// ABOUTME: Integration tests walking the wizard through a full capture cycle

use mechta::models::{DraftStatus, WantsAnalysis, WantsDraft, WantsProgress};
use mechta::wizard::{StreamPhase, WizardState, WizardStep};
use pretty_assertions::assert_eq;

fn draft_json(extra: &str) -> WantsDraft {
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!("{extra},")
    };
    serde_json::from_str(&format!(
        r#"{{
            "id": "d-1", "user_id": "u-1", "status": "draft",
            {extra}
            "created_at": "2026-02-01T08:00:00Z",
            "updated_at": "2026-02-01T08:00:00Z"
        }}"#
    ))
    .unwrap()
}

fn progress(stream: bool, future_me: bool, reverse: bool) -> WantsProgress {
    WantsProgress {
        raw_id: "d-1".to_string(),
        status: DraftStatus::Draft,
        stream_done: stream,
        future_me_done: future_me,
        reverse_done: reverse,
        all_done: stream && future_me && reverse,
    }
}

fn analysis() -> WantsAnalysis {
    serde_json::from_str(
        r#"{
            "id": "a-1", "user_id": "u-1",
            "top_wants": [], "top_pains": [], "focus_areas": [], "patterns": [],
            "summary_comment": "You want calm and autonomy.",
            "suggested_questions": null,
            "created_at": "2026-02-01T09:00:00Z"
        }"#,
    )
    .unwrap()
}

#[test]
fn test_fresh_draft_starts_on_stream() {
    let mut wizard = WizardState::new();
    wizard.apply_loaded(draft_json(""), progress(false, false, false), None);

    assert_eq!(wizard.controller.current_step(), WizardStep::Stream);
    assert_eq!(wizard.stream.phase, StreamPhase::NotStarted);
}

#[test]
fn test_interrupted_stream_resumes_active() {
    let draft = draft_json(
        r#""stream_started_at": "2026-02-01T08:00:00Z",
           "raw_wants_stream": "travel more\nlearn piano""#,
    );
    let mut wizard = WizardState::new();
    wizard.apply_loaded(draft, progress(false, false, false), None);

    assert_eq!(wizard.stream.phase, StreamPhase::Active);
    assert_eq!(wizard.stream.entries.len(), 2);
    assert!(wizard.stream.timer.is_running());
}

#[test]
fn test_stage_completion_advances_step_on_refresh() {
    let mut wizard = WizardState::new();
    wizard.apply_loaded(draft_json(""), progress(true, false, false), None);
    assert_eq!(wizard.controller.current_step(), WizardStep::FutureMe);

    wizard.apply_loaded(draft_json(""), progress(true, true, false), None);
    assert_eq!(wizard.controller.current_step(), WizardStep::Reverse);
}

#[test]
fn test_full_cycle_finalize_lands_on_analysis() {
    let mut wizard = WizardState::new();
    wizard.apply_loaded(draft_json(""), progress(true, true, true), None);
    assert_eq!(wizard.controller.current_step(), WizardStep::Reverse);
    assert!(wizard.controller.can_finalize());

    assert!(wizard.controller.begin_finalize());
    let completed: WantsDraft = serde_json::from_str(
        r#"{
            "id": "d-1", "user_id": "u-1", "status": "completed",
            "completed_at": "2026-02-01T09:00:00Z",
            "created_at": "2026-02-01T08:00:00Z",
            "updated_at": "2026-02-01T09:00:00Z"
        }"#,
    )
    .unwrap();
    wizard.controller.finalize_succeeded(completed, analysis());

    assert_eq!(wizard.controller.current_step(), WizardStep::Analysis);
    assert!(!wizard.controller.can_finalize());
    assert!(wizard.controller.analysis.is_some());
}

#[test]
fn test_analysis_failure_path_retries_without_completing_again() {
    let mut wizard = WizardState::new();
    wizard.apply_loaded(draft_json(""), progress(true, true, true), None);

    assert!(wizard.controller.begin_finalize());
    wizard.controller.finalize_analysis_failed(draft_json(""));

    assert_eq!(wizard.controller.current_step(), WizardStep::Reverse);
    assert!(!wizard.controller.can_finalize());
    assert!(wizard.controller.begin_analysis_retry());
    wizard.controller.analysis_retry_succeeded(analysis());
    assert_eq!(wizard.controller.current_step(), WizardStep::Analysis);
}

#[test]
fn test_completed_draft_loads_straight_to_analysis() {
    let completed: WantsDraft = serde_json::from_str(
        r#"{
            "id": "d-1", "user_id": "u-1", "status": "completed",
            "completed_at": "2026-02-01T09:00:00Z",
            "created_at": "2026-02-01T08:00:00Z",
            "updated_at": "2026-02-01T09:00:00Z"
        }"#,
    )
    .unwrap();
    let progress = WantsProgress {
        raw_id: "d-1".to_string(),
        status: DraftStatus::Completed,
        stream_done: true,
        future_me_done: true,
        reverse_done: true,
        all_done: true,
    };

    let mut wizard = WizardState::new();
    wizard.apply_loaded(completed, progress, Some(analysis()));
    assert_eq!(wizard.controller.current_step(), WizardStep::Analysis);
}
