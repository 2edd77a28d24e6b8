// ABOUTME: Wizard shell: step progress header, per-step dispatch, and the
// finalize prompt once every stage is done

use crate::app::AppState;
use crate::components::{
    AnalysisViewComponent, FutureMeStepComponent, ReverseStepComponent, StreamStepComponent,
};
use crate::wizard::WizardStep;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const ERROR_RED: Color = Color::Rgb(230, 100, 100);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct WizardViewComponent {
    stream: StreamStepComponent,
    future_me: FutureMeStepComponent,
    reverse: ReverseStepComponent,
    analysis: AnalysisViewComponent,
}

impl WizardViewComponent {
    pub fn new() -> Self {
        Self {
            stream: StreamStepComponent::new(),
            future_me: FutureMeStepComponent::new(),
            reverse: ReverseStepComponent::new(),
            analysis: AnalysisViewComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_progress(frame, chunks[0], state);

        let controller = &state.wizard.controller;
        if controller.loading && controller.draft.is_none() {
            let loading = Paragraph::new("Loading your cycle...")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
            return;
        }
        if controller.load_failed && controller.draft.is_none() {
            let failed = Paragraph::new("Could not reach the server. Press F5 to retry.")
                .style(Style::default().fg(ERROR_RED))
                .alignment(Alignment::Center);
            frame.render_widget(failed, chunks[1]);
            return;
        }

        match controller.current_step() {
            WizardStep::Stream => self.stream.render(frame, chunks[1], &state.wizard.stream),
            WizardStep::FutureMe => {
                self.future_me
                    .render(frame, chunks[1], &state.wizard.future_me)
            }
            WizardStep::Reverse => self.reverse.render(frame, chunks[1], &state.wizard.reverse),
            WizardStep::Analysis => {
                self.analysis
                    .render(frame, chunks[1], controller.analysis.as_ref())
            }
        }

        self.render_footer(frame, chunks[2], state);
    }

    /// One dot per step: done steps green, the active step gold
    fn render_progress(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let controller = &state.wizard.controller;
        let current = controller.current_step();
        let derived = controller
            .progress
            .as_ref()
            .map(|p| crate::wizard::derive_step(p))
            .unwrap_or(current);

        let mut spans: Vec<Span> = Vec::new();
        for step in WizardStep::all() {
            let (dot, color) = if *step == current {
                ("● ", GOLD)
            } else if step.index() < derived.index() {
                ("● ", SELECTION_GREEN)
            } else {
                ("○ ", MUTED_GRAY)
            };
            spans.push(Span::styled(dot, Style::default().fg(color)));
            spans.push(Span::styled(
                format!("{}  ", step.title()),
                Style::default().fg(if *step == current { SOFT_WHITE } else { MUTED_GRAY }),
            ));
        }
        if controller.loading {
            spans.push(Span::styled("refreshing...", Style::default().fg(MUTED_GRAY)));
        }

        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .title(Span::styled(
                        " Wants capture ",
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(header, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let controller = &state.wizard.controller;
        let line = if controller.analysis_pending_retry {
            Line::from(vec![
                Span::styled("F4", Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)),
                Span::styled(
                    " retry analysis (the cycle is already saved)",
                    Style::default().fg(MUTED_GRAY),
                ),
            ])
        } else if controller.can_finalize() {
            Line::from(vec![
                Span::styled(
                    "F4",
                    Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    " all stages done - finalize and get your analysis",
                    Style::default().fg(SOFT_WHITE),
                ),
            ])
        } else if controller.is_finalizing() {
            Line::from(Span::styled("Finalizing...", Style::default().fg(MUTED_GRAY)))
        } else {
            Line::from(vec![
                Span::styled("F1", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                Span::styled(" help  ", Style::default().fg(MUTED_GRAY)),
                Span::styled("F5", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                Span::styled(" refresh  ", Style::default().fg(MUTED_GRAY)),
                Span::styled("F6", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                Span::styled(" history", Style::default().fg(MUTED_GRAY)),
            ])
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

impl Default for WizardViewComponent {
    fn default() -> Self {
        Self::new()
    }
}
