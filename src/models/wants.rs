// ABOUTME: Data models for the Wants capture flow
// Mirrors the MechtaAI backend schemas for drafts, progress, and analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a wants draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Draft,
    Completed,
}

/// One open draft per user: raw answers for the three wants exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantsDraft {
    pub id: String,
    pub user_id: String,
    pub status: DraftStatus,

    // Stream-of-thought stage
    pub stream_started_at: Option<DateTime<Utc>>,
    #[serde(default = "default_timer_seconds")]
    pub stream_timer_seconds: u32,
    pub raw_wants_stream: Option<String>,
    pub stream_completed_at: Option<DateTime<Utc>>,

    // Future-self letter stage
    pub raw_future_me: Option<String>,
    pub future_me_completed_at: Option<DateTime<Utc>>,

    // Reverse-engineering stage
    pub raw_envy: Option<String>,
    pub raw_regrets: Option<String>,
    pub raw_what_to_do_5y: Option<String>,
    pub reverse_completed_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_timer_seconds() -> u32 {
    600
}

impl WantsDraft {
    pub fn is_completed(&self) -> bool {
        self.status == DraftStatus::Completed
    }

    /// Split the accumulated stream text into its individual entries.
    /// The backend stores one entry per line.
    pub fn stream_lines(&self) -> Vec<String> {
        self.raw_wants_stream
            .as_deref()
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// A stream stage that was started but never finished can be resumed.
    pub fn stream_in_progress(&self) -> bool {
        self.stream_started_at.is_some() && self.stream_completed_at.is_none()
    }
}

/// Server-derived stage completion flags.
///
/// Always fetched fresh after a mutation; completion rules (for example
/// "reverse is done only when all three answers are non-empty") live on the
/// backend and are not replicated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantsProgress {
    pub raw_id: String,
    pub status: DraftStatus,
    pub stream_done: bool,
    pub future_me_done: bool,
    pub reverse_done: bool,
    pub all_done: bool,
}

/// A single ranked want extracted by the analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopWant {
    pub id: String,
    pub text: String,
    pub area_id: Option<String>,
    pub horizon: String,
    pub priority: i32,
}

/// A single ranked pain point extracted by the analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPain {
    pub id: String,
    pub text: String,
    pub area_id: Option<String>,
    pub intensity: i32,
}

/// A life area the analysis suggests focusing on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusArea {
    pub area_id: String,
    pub reason: String,
    pub weight: f64,
}

/// A recurring theme the analysis spotted across the raw answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantsPattern {
    pub id: String,
    pub text: String,
}

/// Structured AI output produced once per finalized draft. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantsAnalysis {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub top_wants: Vec<TopWant>,
    #[serde(default)]
    pub top_pains: Vec<TopPain>,
    #[serde(default)]
    pub focus_areas: Vec<FocusArea>,
    #[serde(default)]
    pub patterns: Vec<WantsPattern>,
    pub summary_comment: String,
    pub suggested_questions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Response to starting the timed stream stage. The timer budget is
/// server-authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamStartResponse {
    pub raw_id: String,
    pub stream_started_at: Option<DateTime<Utc>>,
    pub stream_timer_seconds: u32,
    pub stream_completed_at: Option<DateTime<Utc>>,
}

/// Response to appending one stream line. `is_completed` lets the server
/// close the stage on its own criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamAppendResponse {
    pub raw_id: String,
    pub is_completed: bool,
    pub raw_wants_stream_preview: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_json(status: &str) -> String {
        format!(
            r#"{{
                "id": "d-1",
                "user_id": "u-1",
                "status": "{status}",
                "stream_started_at": null,
                "stream_timer_seconds": 600,
                "raw_wants_stream": "learn piano\ntravel more\n",
                "stream_completed_at": null,
                "raw_future_me": null,
                "future_me_completed_at": null,
                "raw_envy": null,
                "raw_regrets": null,
                "raw_what_to_do_5y": null,
                "reverse_completed_at": null,
                "completed_at": null,
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:05:00Z"
            }}"#
        )
    }

    #[test]
    fn test_draft_deserializes_with_status() {
        let draft: WantsDraft = serde_json::from_str(&draft_json("draft")).unwrap();
        assert_eq!(draft.status, DraftStatus::Draft);
        assert!(!draft.is_completed());

        let done: WantsDraft = serde_json::from_str(&draft_json("completed")).unwrap();
        assert!(done.is_completed());
    }

    #[test]
    fn test_stream_lines_skips_blanks() {
        let mut draft: WantsDraft = serde_json::from_str(&draft_json("draft")).unwrap();
        draft.raw_wants_stream = Some("one\n\n  \ntwo\nthree".to_string());
        assert_eq!(draft.stream_lines(), vec!["one", "two", "three"]);

        draft.raw_wants_stream = None;
        assert!(draft.stream_lines().is_empty());
    }

    #[test]
    fn test_stream_in_progress() {
        let mut draft: WantsDraft = serde_json::from_str(&draft_json("draft")).unwrap();
        assert!(!draft.stream_in_progress());

        draft.stream_started_at = Some(Utc::now());
        assert!(draft.stream_in_progress());

        draft.stream_completed_at = Some(Utc::now());
        assert!(!draft.stream_in_progress());
    }

    #[test]
    fn test_timer_seconds_defaults_when_missing() {
        let json = r#"{
            "id": "d-2",
            "user_id": "u-1",
            "status": "draft",
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        }"#;
        let draft: WantsDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.stream_timer_seconds, 600);
    }
}
