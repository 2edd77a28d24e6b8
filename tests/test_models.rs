// ABOUTME: Integration tests decoding realistic API payloads into models

use mechta::config::AppConfig;
use mechta::models::{DraftStatus, WantsAnalysis, WantsDraft, WantsProgress};
use pretty_assertions::assert_eq;

#[test]
fn test_full_draft_payload() {
    let draft: WantsDraft = serde_json::from_str(
        r#"{
            "id": "raw-42",
            "user_id": "u-7",
            "status": "draft",
            "stream_started_at": "2026-03-01T10:00:00Z",
            "stream_timer_seconds": 600,
            "raw_wants_stream": "больше свободы\nжить у моря\n\nсвой проект",
            "stream_completed_at": "2026-03-01T10:10:00Z",
            "raw_future_me": "Мне сорок, я спокоен и свободен.",
            "future_me_completed_at": null,
            "raw_envy": null,
            "raw_regrets": null,
            "raw_what_to_do_5y": null,
            "reverse_completed_at": null,
            "completed_at": null,
            "created_at": "2026-03-01T10:00:00Z",
            "updated_at": "2026-03-01T10:12:00Z"
        }"#,
    )
    .unwrap();

    assert_eq!(draft.status, DraftStatus::Draft);
    assert!(!draft.is_completed());
    // Blank lines are dropped when splitting the stored stream
    assert_eq!(
        draft.stream_lines(),
        vec!["больше свободы", "жить у моря", "свой проект"]
    );
    assert!(!draft.stream_in_progress());
}

#[test]
fn test_missing_timer_falls_back_to_ten_minutes() {
    let draft: WantsDraft = serde_json::from_str(
        r#"{
            "id": "raw-1", "user_id": "u-1", "status": "draft",
            "created_at": "2026-03-01T10:00:00Z",
            "updated_at": "2026-03-01T10:00:00Z"
        }"#,
    )
    .unwrap();
    assert_eq!(draft.stream_timer_seconds, 600);
}

#[test]
fn test_progress_payload() {
    let progress: WantsProgress = serde_json::from_str(
        r#"{
            "raw_id": "raw-42",
            "status": "draft",
            "stream_done": true,
            "future_me_done": true,
            "reverse_done": false,
            "all_done": false
        }"#,
    )
    .unwrap();
    assert!(progress.stream_done);
    assert!(!progress.all_done);
}

#[test]
fn test_analysis_payload_with_sections() {
    let analysis: WantsAnalysis = serde_json::from_str(
        r#"{
            "id": "an-1",
            "user_id": "u-7",
            "top_wants": [
                {"id": "w-1", "text": "свой проект", "area_id": "career", "horizon": "5y", "priority": 1}
            ],
            "top_pains": [
                {"id": "p-1", "text": "усталость", "area_id": null, "intensity": 3}
            ],
            "focus_areas": [
                {"area_id": "health", "reason": "recurring theme", "weight": 0.8}
            ],
            "patterns": [],
            "summary_comment": "Freedom and energy dominate.",
            "suggested_questions": ["What would a first step look like?"],
            "created_at": "2026-03-01T11:00:00Z"
        }"#,
    )
    .unwrap();

    assert_eq!(analysis.top_wants.len(), 1);
    assert_eq!(analysis.top_wants[0].horizon, "5y");
    assert_eq!(analysis.focus_areas[0].area_id, "health");
    assert!(analysis.patterns.is_empty());
    assert_eq!(analysis.suggested_questions.unwrap().len(), 1);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = AppConfig {
        api_base_url: "http://localhost:8000".to_string(),
        history_page_size: 10,
        login_poll_interval_secs: 1,
    };
    std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

    let loaded: AppConfig =
        toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.api_base_url, "http://localhost:8000");
    assert_eq!(loaded.history_page_size, 10);
}
