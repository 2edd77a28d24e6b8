// ABOUTME: Application state, async action queue, and the tick-driven App
// runtime that talks to the MechtaAI API

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::models::{LoginAttempt, LoginState, User};
use crate::session;
use crate::wizard::{HistoryState, StreamPhase, TimerTick, WizardState};
use anyhow::Result;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const TOAST_TTL: Duration = Duration::from_secs(4);

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Wizard,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// Non-blocking notification rendered as an overlay; expires on its own
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

/// Progress of the QR/Telegram login exchange
#[derive(Debug)]
pub enum LoginFlow {
    Idle,
    Initializing,
    Waiting {
        attempt: LoginAttempt,
        last_poll: Instant,
    },
    Exchanging,
}

/// Deferred API work queued by the event handler and drained by `App::tick`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    InitLogin,
    PollLogin,
    LoadWizard,
    StartStream,
    FinishStream,
    SaveFutureMe { silent: bool },
    FinishFutureMe,
    SaveReverse,
    FinishReverse,
    Finalize,
    RetryAnalysis,
    LoadHistoryPage(u32),
    StartNewCycle,
}

pub struct AppState {
    pub config: AppConfig,
    pub view: View,
    pub should_quit: bool,
    pub help_visible: bool,
    pub token: Option<String>,
    pub user: Option<User>,
    pub login: LoginFlow,
    pub wizard: WizardState,
    pub history: HistoryState,
    pub toasts: Vec<Toast>,
    pub pending_actions: VecDeque<AsyncAction>,
    last_second_tick: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let history_page_size = config.history_page_size;
        Self {
            config,
            view: View::Login,
            should_quit: false,
            help_visible: false,
            token: None,
            user: None,
            login: LoginFlow::Idle,
            wizard: WizardState::new(),
            history: HistoryState::new(history_page_size),
            toasts: Vec::new(),
            pending_actions: VecDeque::new(),
            last_second_tick: Instant::now(),
        }
    }

    pub fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            created_at: Instant::now(),
        });
    }

    pub fn prune_toasts(&mut self) {
        let now = Instant::now();
        self.toasts
            .retain(|toast| now.duration_since(toast.created_at) < TOAST_TTL);
    }

    /// Queue an action unless an identical one is already waiting
    pub fn queue_action(&mut self, action: AsyncAction) {
        if !self.pending_actions.contains(&action) {
            self.pending_actions.push_back(action);
        }
    }

    /// Drop the session and return to the login screen. Called on any 401.
    pub fn logout(&mut self) {
        if let Err(e) = session::clear_session() {
            warn!("Failed to clear stored session: {}", e);
        }
        self.token = None;
        self.user = None;
        self.login = LoginFlow::Idle;
        self.view = View::Login;
        self.wizard = WizardState::new();
        self.pending_actions.clear();
        self.queue_action(AsyncAction::InitLogin);
        self.toast(ToastLevel::Error, "Session expired, please log in again");
    }

    /// Time-driven work: countdown ticks and login polling. Called from the
    /// main loop on every iteration.
    pub fn on_tick(&mut self, now: Instant) {
        self.prune_toasts();

        // The stream countdown advances at one-second granularity
        if now.duration_since(self.last_second_tick) >= Duration::from_secs(1) {
            self.last_second_tick = now;
            if self.view == View::Wizard
                && self.wizard.stream.phase == StreamPhase::Active
                && self.wizard.stream.tick_second() == TimerTick::Expired
            {
                info!("Stream timer expired, finishing stage");
                self.toast(ToastLevel::Info, "Time is up, finishing the exercise");
                if self.wizard.stream.request_finish() {
                    self.queue_action(AsyncAction::FinishStream);
                }
            }
        }

        // Poll the pending QR login at the configured interval
        if self.view == View::Login {
            let interval = Duration::from_secs(self.config.login_poll_interval_secs.max(1));
            if let LoginFlow::Waiting { last_poll, .. } = &self.login {
                if now.duration_since(*last_poll) >= interval {
                    self.queue_action(AsyncAction::PollLogin);
                }
            }
        }
    }
}

pub struct App {
    pub state: AppState,
    api: ApiClient,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });
        let api = ApiClient::new(&config.api_base_url)?;
        Ok(Self {
            state: AppState::new(config),
            api,
        })
    }

    /// Pick the starting view from the stored session
    pub fn init(&mut self) {
        match session::access_token() {
            Some(token) => {
                self.state.token = Some(token);
                self.state.view = View::Wizard;
                self.state.queue_action(AsyncAction::LoadWizard);
            }
            None => {
                self.state.view = View::Login;
                self.state.login = LoginFlow::Initializing;
                self.state.queue_action(AsyncAction::InitLogin);
            }
        }
    }

    /// Pump the stream append queue, then drain queued actions. Appends go
    /// first so a line submitted this tick reaches the server before a
    /// finish or reload rebuilds the stream state. Each action awaits its
    /// API call; failures become toasts, never panics.
    pub async fn tick(&mut self) -> Result<()> {
        self.state.on_tick(Instant::now());

        self.pump_stream_appends().await;

        while let Some(action) = self.state.pending_actions.pop_front() {
            self.run_action(action).await;
        }

        Ok(())
    }

    fn bearer(&self) -> Option<String> {
        self.state.token.clone()
    }

    /// Central 401 handling: any unauthorized response logs the user out
    fn handle_api_error(&mut self, context: &str, err: &ApiError) {
        error!("{} failed: {}", context, err);
        if err.is_unauthorized() {
            self.state.logout();
        }
    }

    async fn run_action(&mut self, action: AsyncAction) {
        debug!("Running async action: {:?}", action);
        match action {
            AsyncAction::InitLogin => self.init_login().await,
            AsyncAction::PollLogin => self.poll_login().await,
            AsyncAction::LoadWizard => self.load_wizard().await,
            AsyncAction::StartStream => self.start_stream().await,
            AsyncAction::FinishStream => self.finish_stream().await,
            AsyncAction::SaveFutureMe { silent } => self.save_future_me(silent).await,
            AsyncAction::FinishFutureMe => self.finish_future_me().await,
            AsyncAction::SaveReverse => self.save_reverse().await,
            AsyncAction::FinishReverse => self.finish_reverse().await,
            AsyncAction::Finalize => self.finalize().await,
            AsyncAction::RetryAnalysis => self.retry_analysis().await,
            AsyncAction::LoadHistoryPage(page) => self.load_history_page(page).await,
            AsyncAction::StartNewCycle => self.start_new_cycle().await,
        }
    }

    // --- Login flow ---

    async fn init_login(&mut self) {
        self.state.login = LoginFlow::Initializing;
        match self.api.qr_init().await {
            Ok(attempt) => {
                info!("QR login attempt created");
                self.state.login = LoginFlow::Waiting {
                    attempt,
                    last_poll: Instant::now(),
                };
            }
            Err(e) => {
                error!("QR login init failed: {}", e);
                self.state.login = LoginFlow::Idle;
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    async fn poll_login(&mut self) {
        let login_token = match &self.state.login {
            LoginFlow::Waiting { attempt, .. } => attempt.login_token.clone(),
            _ => return,
        };

        match self.api.qr_status(&login_token).await {
            Ok(status) => match status.status {
                LoginState::Confirmed => {
                    if let Some(secret) = status.one_time_secret {
                        self.exchange_secret(&secret).await;
                    } else {
                        warn!("Login confirmed but no one-time secret returned");
                    }
                }
                LoginState::Expired => {
                    self.state
                        .toast(ToastLevel::Info, "Login code expired, issuing a new one");
                    self.state.queue_action(AsyncAction::InitLogin);
                }
                LoginState::Pending => {
                    if let LoginFlow::Waiting { last_poll, .. } = &mut self.state.login {
                        *last_poll = Instant::now();
                    }
                }
            },
            Err(e) => {
                warn!("QR login poll failed: {}", e);
                if let LoginFlow::Waiting { last_poll, .. } = &mut self.state.login {
                    *last_poll = Instant::now();
                }
            }
        }
    }

    async fn exchange_secret(&mut self, secret: &str) {
        self.state.login = LoginFlow::Exchanging;
        match self.api.qr_exchange(secret).await {
            Ok(tokens) => {
                if let Err(e) = session::store_session(&tokens.access_token, &tokens.refresh_token)
                {
                    warn!("Failed to persist session: {}", e);
                }
                self.state.token = Some(tokens.access_token);
                self.state.user = Some(tokens.user);
                self.state.login = LoginFlow::Idle;
                self.state.view = View::Wizard;
                self.state.wizard = WizardState::new();
                self.state.queue_action(AsyncAction::LoadWizard);
                self.state.toast(ToastLevel::Success, "Logged in");
            }
            Err(e) => {
                error!("QR login exchange failed: {}", e);
                self.state.toast(ToastLevel::Error, e.user_message());
                self.state.queue_action(AsyncAction::InitLogin);
            }
        }
    }

    // --- Wizard load/refresh ---

    /// Fetch the draft (creating one on first access), the stage progress,
    /// and the analysis for completed drafts.
    async fn load_wizard(&mut self) {
        let Some(token) = self.bearer() else {
            self.state.logout();
            return;
        };

        let draft = match self.api.get_draft(&token).await {
            Ok(draft) => draft,
            Err(e) if e.is_not_found() => {
                info!("No active draft, creating one");
                match self.api.create_draft(&token).await {
                    Ok(draft) => draft,
                    Err(e) => {
                        self.handle_api_error("Draft creation", &e);
                        self.state.wizard.controller.load_failed();
                        self.state.toast(ToastLevel::Error, e.user_message());
                        return;
                    }
                }
            }
            Err(e) => {
                self.handle_api_error("Draft load", &e);
                self.state.wizard.controller.load_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
                return;
            }
        };

        let progress = match self.api.get_progress(&token).await {
            Ok(progress) => progress,
            Err(e) => {
                self.handle_api_error("Progress load", &e);
                self.state.wizard.controller.load_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
                return;
            }
        };

        let analysis = if draft.is_completed() {
            match self.api.get_analysis(&token).await {
                Ok(analysis) => Some(analysis),
                Err(e) if e.is_not_found() => None,
                Err(e) => {
                    self.handle_api_error("Analysis load", &e);
                    None
                }
            }
        } else {
            None
        };

        self.state.wizard.apply_loaded(draft, progress, analysis);
    }

    // --- Stream stage ---

    async fn start_stream(&mut self) {
        let Some(token) = self.bearer() else { return };
        match self.api.start_stream(&token).await {
            Ok(resp) => {
                info!(
                    "Stream stage started with {} seconds on the clock",
                    resp.stream_timer_seconds
                );
                self.state.wizard.stream.started(resp.stream_timer_seconds);
            }
            Err(e) => {
                self.handle_api_error("Stream start", &e);
                self.state.wizard.stream.start_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    /// Send queued lines one at a time, in submission order. Stops for this
    /// tick on the first failure so the user can retry.
    async fn pump_stream_appends(&mut self) {
        let Some(token) = self.bearer() else { return };

        while let Some((id, text)) = self.state.wizard.stream.next_queued() {
            match self.api.append_stream(&token, &text).await {
                Ok(resp) => {
                    self.state.wizard.stream.append_confirmed(id);
                    if resp.is_completed {
                        info!("Server marked the stream stage complete");
                        self.state.wizard.stream.server_completed();
                        self.state.queue_action(AsyncAction::LoadWizard);
                        return;
                    }
                }
                Err(e) => {
                    self.state.wizard.stream.append_failed(id);
                    self.handle_api_error("Stream append", &e);
                    self.state.toast(
                        ToastLevel::Error,
                        "A thought was not saved, press Ctrl+R to retry",
                    );
                    return;
                }
            }
        }
    }

    async fn finish_stream(&mut self) {
        let Some(token) = self.bearer() else { return };
        match self.api.finish_stream(&token).await {
            Ok(_) => {
                self.state.wizard.stream.finish_confirmed();
                self.state.queue_action(AsyncAction::LoadWizard);
            }
            Err(e) => {
                self.handle_api_error("Stream finish", &e);
                self.state.wizard.stream.finish_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    // --- Future-me stage ---

    async fn save_future_me(&mut self, silent: bool) {
        let Some(token) = self.bearer() else { return };
        let text = self.state.wizard.future_me.editor.text();
        if text.trim().is_empty() {
            self.state.wizard.future_me.save_failed();
            return;
        }

        match self.api.update_future_me(&token, &text).await {
            Ok(_) => {
                self.state.wizard.future_me.save_succeeded();
                if !silent {
                    self.state.toast(ToastLevel::Success, "Draft saved");
                }
            }
            Err(e) => {
                self.handle_api_error("Future-me save", &e);
                self.state.wizard.future_me.save_failed();
                // Autosave failures stay quiet; explicit saves surface
                if !silent {
                    self.state.toast(ToastLevel::Error, e.user_message());
                }
            }
        }
    }

    async fn finish_future_me(&mut self) {
        let Some(token) = self.bearer() else { return };
        let text = self.state.wizard.future_me.editor.text();

        // Save the latest content first, silently
        if let Err(e) = self.api.update_future_me(&token, &text).await {
            self.handle_api_error("Future-me save before finish", &e);
            self.state.wizard.future_me.finish_failed();
            self.state.toast(ToastLevel::Error, e.user_message());
            return;
        }

        match self.api.finish_future_me(&token).await {
            Ok(_) => {
                self.state.queue_action(AsyncAction::LoadWizard);
            }
            Err(e) => {
                self.handle_api_error("Future-me finish", &e);
                self.state.wizard.future_me.finish_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    // --- Reverse stage ---

    async fn save_reverse(&mut self) {
        let Some(token) = self.bearer() else { return };
        let (envy, regrets, plan) = self.state.wizard.reverse.payload();

        match self.api.update_reverse(&token, &envy, &regrets, &plan).await {
            Ok(_) => {
                self.state.wizard.reverse.save_succeeded();
                self.state.toast(ToastLevel::Success, "Answers saved");
            }
            Err(e) => {
                self.handle_api_error("Reverse save", &e);
                self.state.wizard.reverse.save_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    /// Save all three answers, then advance only once the server has
    /// confirmed the stage. An unconfirmed finish is surfaced as a
    /// validation failure, not waved through.
    async fn finish_reverse(&mut self) {
        let Some(token) = self.bearer() else { return };
        let (envy, regrets, plan) = self.state.wizard.reverse.payload();

        match self.api.update_reverse(&token, &envy, &regrets, &plan).await {
            Ok(draft) => {
                self.state.wizard.reverse.finish_done();
                if draft.reverse_completed_at.is_some() {
                    self.state.queue_action(AsyncAction::LoadWizard);
                } else {
                    warn!("Server did not confirm reverse completion");
                    self.state.toast(
                        ToastLevel::Error,
                        "Fill in all three answers to finish this stage",
                    );
                }
            }
            Err(e) => {
                self.handle_api_error("Reverse finish", &e);
                self.state.wizard.reverse.save_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    // --- Finalization ---

    /// Complete the draft, then request the analysis. Completion is not
    /// rolled back when the analysis call fails; the retry re-issues only
    /// the analysis request.
    async fn finalize(&mut self) {
        let Some(token) = self.bearer() else {
            self.state.wizard.controller.finalize_failed();
            return;
        };

        let draft = match self.api.complete_draft(&token).await {
            Ok(draft) => draft,
            Err(e) => {
                self.handle_api_error("Draft completion", &e);
                self.state.wizard.controller.finalize_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
                return;
            }
        };

        match self.api.request_analysis(&token).await {
            Ok(analysis) => {
                info!("Draft finalized and analysis received");
                self.state
                    .wizard
                    .controller
                    .finalize_succeeded(draft, analysis);
                self.state.toast(ToastLevel::Success, "Analysis ready");
            }
            Err(e) => {
                self.handle_api_error("Analysis request", &e);
                self.state.wizard.controller.finalize_analysis_failed(draft);
                self.state.toast(
                    ToastLevel::Error,
                    "Draft completed, but the analysis failed. Press F4 to retry.",
                );
            }
        }
    }

    async fn retry_analysis(&mut self) {
        let Some(token) = self.bearer() else {
            self.state.wizard.controller.analysis_retry_failed();
            return;
        };
        match self.api.request_analysis(&token).await {
            Ok(analysis) => {
                self.state
                    .wizard
                    .controller
                    .analysis_retry_succeeded(analysis);
                self.state.toast(ToastLevel::Success, "Analysis ready");
            }
            Err(e) => {
                self.handle_api_error("Analysis retry", &e);
                self.state.wizard.controller.analysis_retry_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    // --- History ---

    async fn load_history_page(&mut self, page: u32) {
        let Some(token) = self.bearer() else { return };
        let page_size = self.state.history.page_size();
        match self.api.get_history(&token, page, page_size).await {
            Ok(items) => {
                debug!("History page {} loaded with {} items", page, items.len());
                self.state.history.apply_page(page, items);
            }
            Err(e) => {
                self.handle_api_error("History load", &e);
                self.state.history.load_failed();
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }

    // --- New cycle ---

    /// After a completed cycle, start a fresh draft. History keeps the old
    /// one.
    async fn start_new_cycle(&mut self) {
        let Some(token) = self.bearer() else { return };
        match self.api.create_draft(&token).await {
            Ok(_) => {
                self.state.wizard = WizardState::new();
                self.state.queue_action(AsyncAction::LoadWizard);
                self.state.toast(ToastLevel::Success, "New cycle started");
            }
            Err(e) => {
                self.handle_api_error("New cycle", &e);
                self.state.toast(ToastLevel::Error, e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_deduplicates_actions() {
        let mut state = AppState::new(AppConfig::default());
        state.queue_action(AsyncAction::LoadWizard);
        state.queue_action(AsyncAction::LoadWizard);
        state.queue_action(AsyncAction::LoadHistoryPage(1));
        assert_eq!(state.pending_actions.len(), 2);
    }

    #[test]
    fn test_logout_resets_to_login_view() {
        let mut state = AppState::new(AppConfig::default());
        state.view = View::Wizard;
        state.token = Some("t".to_string());
        state.logout();

        assert_eq!(state.view, View::Login);
        assert!(state.token.is_none());
        assert!(state.pending_actions.contains(&AsyncAction::InitLogin));
        assert!(!state.toasts.is_empty());
    }

    #[test]
    fn test_toast_pruning() {
        let mut state = AppState::new(AppConfig::default());
        state.toast(ToastLevel::Info, "hello");
        state.prune_toasts();
        assert_eq!(state.toasts.len(), 1);

        state.toasts[0].created_at = Instant::now() - TOAST_TTL - Duration::from_millis(1);
        state.prune_toasts();
        assert!(state.toasts.is_empty());
    }
}
