// ABOUTME: UI components for the TUI: login screen, wizard steps, analysis
// report, history browser, and shared overlays

pub mod analysis_view;
pub mod future_me_step;
pub mod help;
pub mod history_view;
pub mod layout;
pub mod login_screen;
pub mod reverse_step;
pub mod stream_step;
pub mod wizard_view;

pub use analysis_view::AnalysisViewComponent;
pub use future_me_step::FutureMeStepComponent;
pub use help::HelpComponent;
pub use history_view::HistoryViewComponent;
pub use layout::LayoutComponent;
pub use login_screen::LoginScreenComponent;
pub use reverse_step::ReverseStepComponent;
pub use stream_step::StreamStepComponent;
pub use wizard_view::WizardViewComponent;
