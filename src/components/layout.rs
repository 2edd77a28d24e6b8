// ABOUTME: Top-level layout: dispatches the active view and draws the toast
// and help overlays on top

use crate::app::{AppState, ToastLevel, View};
use ratatui::{
    prelude::*,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::{HelpComponent, HistoryViewComponent, LoginScreenComponent, WizardViewComponent};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const ERROR_RED: Color = Color::Rgb(230, 100, 100);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);

pub struct LayoutComponent {
    login_screen: LoginScreenComponent,
    wizard_view: WizardViewComponent,
    history_view: HistoryViewComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            login_screen: LoginScreenComponent::new(),
            wizard_view: WizardViewComponent::new(),
            history_view: HistoryViewComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();

        match state.view {
            View::Login => self.login_screen.render(frame, area, state),
            View::Wizard => self.wizard_view.render(frame, area, state),
            View::History => self.history_view.render(frame, area, &state.history),
        }

        self.render_toasts(frame, area, state);

        if state.help_visible {
            self.help.render(frame, area);
        }
    }

    /// Toasts stack in the top-right corner, newest first
    fn render_toasts(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.toasts.is_empty() {
            return;
        }

        let toast_width = 46.min(area.width.saturating_sub(2));
        for (i, toast) in state.toasts.iter().rev().enumerate() {
            let y = 1 + (i as u16) * 3;
            if y + 3 > area.height {
                break;
            }
            let toast_area = Rect {
                x: area.width.saturating_sub(toast_width + 1),
                y,
                width: toast_width,
                height: 3,
            };

            let (icon, color) = match toast.level {
                ToastLevel::Success => ("✓ ", SELECTION_GREEN),
                ToastLevel::Error => ("✗ ", ERROR_RED),
                ToastLevel::Info => ("ℹ ", CORNFLOWER_BLUE),
            };

            let widget = Paragraph::new(Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::styled(toast.message.as_str(), Style::default().fg(color)),
            ]))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(PANEL_BG)),
            );
            frame.render_widget(widget, toast_area);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
