// ABOUTME: Keyboard handling: raw key events become AppEvents, AppEvents
// mutate state and queue async API actions

use crate::app::state::{AppState, AsyncAction, LoginFlow, ToastLevel, View};
use crate::wizard::{StreamPhase, WizardStep};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    Refresh,
    // Login screen
    LoginRestart,
    // Wizard navigation
    StepBack,
    OpenHistory,
    StartNewCycle,
    // Stream step
    StreamStart,
    StreamInputChar(char),
    StreamBackspace,
    StreamSubmit,
    StreamRetryFailed,
    StreamFinish,
    // Editor events for the letter and reverse steps
    EditorChar(char),
    EditorNewline,
    EditorBackspace,
    EditorCursorLeft,
    EditorCursorRight,
    EditorCursorUp,
    EditorCursorDown,
    EditorLineStart,
    EditorLineEnd,
    // Future-me step
    FutureMeSave,
    FutureMeFinish,
    // Reverse step
    ReverseNextField,
    ReversePreviousField,
    ReverseSave,
    ReverseFinish,
    Finalize,
    RetryAnalysis,
    // History view
    HistoryUp,
    HistoryDown,
    HistoryOpenDetail,
    HistoryLoadMore,
    HistoryBack,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Ctrl+C always quits, even mid-edit
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::F(1) | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if key_event.code == KeyCode::F(1) {
            return Some(AppEvent::ToggleHelp);
        }

        match state.view {
            View::Login => Self::handle_login_keys(key_event),
            View::Wizard => Self::handle_wizard_keys(key_event, state),
            View::History => Self::handle_history_keys(key_event, state),
        }
    }

    fn handle_login_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(AppEvent::LoginRestart),
            _ => None,
        }
    }

    fn handle_wizard_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // View-level keys that never collide with text entry
        match key_event.code {
            KeyCode::F(5) => return Some(AppEvent::Refresh),
            KeyCode::F(6) => return Some(AppEvent::OpenHistory),
            KeyCode::F(4) => {
                if state.wizard.controller.analysis_pending_retry {
                    return Some(AppEvent::RetryAnalysis);
                }
                if state.wizard.controller.can_finalize() {
                    return Some(AppEvent::Finalize);
                }
            }
            KeyCode::Char('b') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(AppEvent::StepBack);
            }
            _ => {}
        }

        match state.wizard.controller.current_step() {
            WizardStep::Stream => Self::handle_stream_keys(key_event, state),
            WizardStep::FutureMe => Self::handle_future_me_keys(key_event),
            WizardStep::Reverse => Self::handle_reverse_keys(key_event),
            WizardStep::Analysis => Self::handle_analysis_keys(key_event),
        }
    }

    fn handle_stream_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        match state.wizard.stream.phase {
            StreamPhase::NotStarted => match key_event.code {
                KeyCode::Enter => Some(AppEvent::StreamStart),
                KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
                _ => None,
            },
            StreamPhase::Active => match key_event.code {
                KeyCode::Char('r') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(AppEvent::StreamRetryFailed)
                }
                KeyCode::Char(c) => Some(AppEvent::StreamInputChar(c)),
                KeyCode::Backspace => Some(AppEvent::StreamBackspace),
                KeyCode::Enter => Some(AppEvent::StreamSubmit),
                KeyCode::F(2) => Some(AppEvent::StreamFinish),
                _ => None,
            },
            StreamPhase::Finished => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
                _ => None,
            },
        }
    }

    fn handle_future_me_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('s') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::FutureMeSave)
            }
            KeyCode::F(2) => Some(AppEvent::FutureMeFinish),
            _ => Self::editor_event(key_event),
        }
    }

    fn handle_reverse_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Tab => Some(AppEvent::ReverseNextField),
            KeyCode::BackTab => Some(AppEvent::ReversePreviousField),
            KeyCode::Char('s') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::ReverseSave)
            }
            KeyCode::F(2) => Some(AppEvent::ReverseFinish),
            _ => Self::editor_event(key_event),
        }
    }

    fn handle_analysis_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('n') => Some(AppEvent::StartNewCycle),
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            _ => None,
        }
    }

    /// Shared multi-line editor bindings for the letter and reverse steps
    fn editor_event(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char(c) if key_event.modifiers.is_empty()
                || key_event.modifiers == KeyModifiers::SHIFT =>
            {
                Some(AppEvent::EditorChar(c))
            }
            KeyCode::Enter => Some(AppEvent::EditorNewline),
            KeyCode::Backspace => Some(AppEvent::EditorBackspace),
            KeyCode::Left => Some(AppEvent::EditorCursorLeft),
            KeyCode::Right => Some(AppEvent::EditorCursorRight),
            KeyCode::Up => Some(AppEvent::EditorCursorUp),
            KeyCode::Down => Some(AppEvent::EditorCursorDown),
            KeyCode::Home => Some(AppEvent::EditorLineStart),
            KeyCode::End => Some(AppEvent::EditorLineEnd),
            _ => None,
        }
    }

    fn handle_history_keys(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::HistoryUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::HistoryDown),
            KeyCode::Enter => Some(AppEvent::HistoryOpenDetail),
            KeyCode::Char('m') if state.history.has_more => Some(AppEvent::HistoryLoadMore),
            KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::HistoryBack),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing event: {:?}", event);
        match event {
            AppEvent::Quit => {
                state.should_quit = true;
            }
            AppEvent::ToggleHelp => {
                state.help_visible = !state.help_visible;
            }
            AppEvent::Refresh => {
                Self::autosave_letter(state);
                state.wizard.controller.begin_refresh();
                state.queue_action(AsyncAction::LoadWizard);
            }

            AppEvent::LoginRestart => {
                if !matches!(state.login, LoginFlow::Exchanging) {
                    state.login = LoginFlow::Initializing;
                    state.queue_action(AsyncAction::InitLogin);
                }
            }

            AppEvent::StepBack => {
                Self::autosave_letter(state);
                state.wizard.controller.go_back();
            }
            AppEvent::OpenHistory => {
                Self::autosave_letter(state);
                state.view = View::History;
                // Reopening always reloads the first page
                state.history.begin_load();
                state.queue_action(AsyncAction::LoadHistoryPage(1));
            }
            AppEvent::StartNewCycle => {
                state.queue_action(AsyncAction::StartNewCycle);
            }

            AppEvent::StreamStart => {
                if !state.wizard.stream.starting {
                    state.wizard.stream.starting = true;
                    state.queue_action(AsyncAction::StartStream);
                }
            }
            AppEvent::StreamInputChar(c) => {
                state.wizard.stream.input.push(c);
            }
            AppEvent::StreamBackspace => {
                state.wizard.stream.input.pop();
            }
            AppEvent::StreamSubmit => {
                // The append queue is pumped from the tick loop
                state.wizard.stream.submit_line();
            }
            AppEvent::StreamRetryFailed => {
                if state.wizard.stream.retry_failed().is_none() {
                    state.toast(ToastLevel::Info, "Nothing to retry");
                }
            }
            AppEvent::StreamFinish => {
                if state.wizard.stream.request_finish() {
                    state.queue_action(AsyncAction::FinishStream);
                }
            }

            AppEvent::EditorChar(c) => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.insert_char(c);
                }
            }
            AppEvent::EditorNewline => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.insert_newline();
                }
            }
            AppEvent::EditorBackspace => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.backspace();
                }
            }
            AppEvent::EditorCursorLeft => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_left();
                }
            }
            AppEvent::EditorCursorRight => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_right();
                }
            }
            AppEvent::EditorCursorUp => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_up();
                }
            }
            AppEvent::EditorCursorDown => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_down();
                }
            }
            AppEvent::EditorLineStart => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_line_start();
                }
            }
            AppEvent::EditorLineEnd => {
                if let Some(editor) = Self::focused_editor(state) {
                    editor.move_cursor_line_end();
                }
            }

            AppEvent::FutureMeSave => {
                if !state.wizard.future_me.saving && state.wizard.future_me.is_dirty() {
                    state.wizard.future_me.saving = true;
                    state.queue_action(AsyncAction::SaveFutureMe { silent: false });
                }
            }
            AppEvent::FutureMeFinish => {
                if state.wizard.future_me.can_finish() {
                    state.wizard.future_me.finishing = true;
                    state.queue_action(AsyncAction::FinishFutureMe);
                } else {
                    let missing = state.wizard.future_me.chars_missing();
                    state.toast(
                        ToastLevel::Info,
                        format!("The letter needs {} more characters", missing),
                    );
                }
            }

            AppEvent::ReverseNextField => {
                state.wizard.reverse.focus_next();
            }
            AppEvent::ReversePreviousField => {
                state.wizard.reverse.focus_previous();
            }
            AppEvent::ReverseSave => {
                if !state.wizard.reverse.saving {
                    state.wizard.reverse.saving = true;
                    state.queue_action(AsyncAction::SaveReverse);
                }
            }
            AppEvent::ReverseFinish => {
                if state.wizard.reverse.can_finish() {
                    state.wizard.reverse.finishing = true;
                    state.queue_action(AsyncAction::FinishReverse);
                } else {
                    state.toast(
                        ToastLevel::Info,
                        "Answer all three questions before finishing",
                    );
                }
            }

            AppEvent::Finalize => {
                if state.wizard.controller.begin_finalize() {
                    state.queue_action(AsyncAction::Finalize);
                }
            }
            AppEvent::RetryAnalysis => {
                if state.wizard.controller.begin_analysis_retry() {
                    state.queue_action(AsyncAction::RetryAnalysis);
                }
            }

            AppEvent::HistoryUp => {
                state.history.select_previous();
            }
            AppEvent::HistoryDown => {
                state.history.select_next();
            }
            AppEvent::HistoryOpenDetail => {
                state.history.open_detail();
            }
            AppEvent::HistoryLoadMore => {
                if state.history.has_more && !state.history.loading {
                    state.history.begin_load();
                    state.queue_action(AsyncAction::LoadHistoryPage(state.history.next_page()));
                }
            }
            AppEvent::HistoryBack => {
                // Esc closes the detail pane first, then the view
                if !state.history.close_detail() {
                    state.view = View::Wizard;
                }
            }
        }
    }

    /// Autosave the letter before navigating away from it. Queued ahead of
    /// any reload so the server has the text before the state is rebuilt;
    /// failures are logged only.
    fn autosave_letter(state: &mut AppState) {
        if state.wizard.controller.current_step() == WizardStep::FutureMe
            && state.wizard.future_me.is_dirty()
            && !state.wizard.future_me.saving
        {
            state.wizard.future_me.saving = true;
            state.queue_action(AsyncAction::SaveFutureMe { silent: true });
        }
    }

    /// The editor that text-entry events land in for the current step
    fn focused_editor(state: &mut AppState) -> Option<&mut crate::app::editor::TextEditor> {
        match state.wizard.controller.current_step() {
            WizardStep::FutureMe => Some(&mut state.wizard.future_me.editor),
            WizardStep::Reverse => Some(state.wizard.reverse.focused_editor_mut()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{DraftStatus, WantsProgress};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn wizard_state_at(step_flags: (bool, bool, bool)) -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.view = View::Wizard;
        let draft: crate::models::WantsDraft = serde_json::from_str(
            r#"{
                "id": "d-1", "user_id": "u-1", "status": "draft",
                "created_at": "2026-01-10T09:00:00Z",
                "updated_at": "2026-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        let (stream, future_me, reverse) = step_flags;
        let progress = WantsProgress {
            raw_id: "d-1".to_string(),
            status: DraftStatus::Draft,
            stream_done: stream,
            future_me_done: future_me,
            reverse_done: reverse,
            all_done: stream && future_me && reverse,
        };
        state.wizard.apply_loaded(draft, progress, None);
        state
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let state = wizard_state_at((true, false, false));
        let event = EventHandler::handle_key_event(ctrl('c'), &state);
        assert!(matches!(event, Some(AppEvent::Quit)));
    }

    #[test]
    fn test_typing_goes_to_letter_editor_on_future_me_step() {
        let mut state = wizard_state_at((true, false, false));
        let event = EventHandler::handle_key_event(key(KeyCode::Char('x')), &state);
        assert!(matches!(event, Some(AppEvent::EditorChar('x'))));

        EventHandler::process_event(AppEvent::EditorChar('x'), &mut state);
        assert_eq!(state.wizard.future_me.editor.text(), "x");
    }

    #[test]
    fn test_stream_submit_enqueues_line() {
        let mut state = wizard_state_at((false, false, false));
        state.wizard.stream.started(600);

        for c in "learn to sail".chars() {
            EventHandler::process_event(AppEvent::StreamInputChar(c), &mut state);
        }
        EventHandler::process_event(AppEvent::StreamSubmit, &mut state);

        assert!(state.wizard.stream.has_queued());
        assert_eq!(state.wizard.stream.entries.len(), 1);
        assert!(state.wizard.stream.input.is_empty());
    }

    #[test]
    fn test_finish_blocked_below_letter_minimum() {
        let mut state = wizard_state_at((true, false, false));
        EventHandler::process_event(AppEvent::FutureMeFinish, &mut state);
        assert!(state.pending_actions.is_empty());
        assert!(!state.toasts.is_empty());
    }

    #[test]
    fn test_reverse_finish_requires_all_fields() {
        let mut state = wizard_state_at((true, true, false));
        EventHandler::process_event(AppEvent::ReverseFinish, &mut state);
        assert!(state.pending_actions.is_empty());

        for editor_text in ["envy", "regrets", "plan"] {
            let editor = state.wizard.reverse.focused_editor_mut();
            for c in editor_text.chars() {
                editor.insert_char(c);
            }
            state.wizard.reverse.focus_next();
        }
        EventHandler::process_event(AppEvent::ReverseFinish, &mut state);
        assert!(state
            .pending_actions
            .contains(&AsyncAction::FinishReverse));
    }

    #[test]
    fn test_finalize_key_only_fires_when_offered() {
        let mut state = wizard_state_at((true, true, false));
        let event = EventHandler::handle_key_event(key(KeyCode::F(4)), &state);
        assert!(event.is_none());

        state = wizard_state_at((true, true, true));
        let event = EventHandler::handle_key_event(key(KeyCode::F(4)), &state);
        assert!(matches!(event, Some(AppEvent::Finalize)));

        EventHandler::process_event(AppEvent::Finalize, &mut state);
        assert!(state.pending_actions.contains(&AsyncAction::Finalize));
        // A second press while in flight queues nothing new
        EventHandler::process_event(AppEvent::Finalize, &mut state);
        assert_eq!(
            state
                .pending_actions
                .iter()
                .filter(|a| **a == AsyncAction::Finalize)
                .count(),
            1
        );
    }

    #[test]
    fn test_refresh_autosaves_dirty_letter_first() {
        let mut state = wizard_state_at((true, false, false));
        EventHandler::process_event(AppEvent::EditorChar('x'), &mut state);
        EventHandler::process_event(AppEvent::Refresh, &mut state);

        // The save is queued ahead of the reload so the edit survives it
        assert_eq!(
            state.pending_actions.front(),
            Some(&AsyncAction::SaveFutureMe { silent: true })
        );
        assert!(state.pending_actions.contains(&AsyncAction::LoadWizard));

        // A clean letter queues no save
        let mut clean = wizard_state_at((true, false, false));
        EventHandler::process_event(AppEvent::Refresh, &mut clean);
        assert_eq!(clean.pending_actions.front(), Some(&AsyncAction::LoadWizard));
    }

    #[test]
    fn test_open_history_autosaves_dirty_letter() {
        let mut state = wizard_state_at((true, false, false));
        EventHandler::process_event(AppEvent::EditorChar('x'), &mut state);
        EventHandler::process_event(AppEvent::OpenHistory, &mut state);

        assert_eq!(state.view, View::History);
        assert_eq!(
            state.pending_actions.front(),
            Some(&AsyncAction::SaveFutureMe { silent: true })
        );
    }

    #[test]
    fn test_history_esc_closes_detail_before_view() {
        let mut state = wizard_state_at((true, false, false));
        EventHandler::process_event(AppEvent::OpenHistory, &mut state);
        assert_eq!(state.view, View::History);

        state.history.apply_page(
            1,
            vec![serde_json::from_str(
                r#"{
                    "id": "h-1", "user_id": "u-1", "status": "completed",
                    "created_at": "2026-01-10T09:00:00Z",
                    "updated_at": "2026-01-10T09:00:00Z"
                }"#,
            )
            .unwrap()],
        );
        EventHandler::process_event(AppEvent::HistoryOpenDetail, &mut state);
        EventHandler::process_event(AppEvent::HistoryBack, &mut state);
        assert_eq!(state.view, View::History);
        EventHandler::process_event(AppEvent::HistoryBack, &mut state);
        assert_eq!(state.view, View::Wizard);
    }
}
