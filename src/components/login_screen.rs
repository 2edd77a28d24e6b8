// ABOUTME: Telegram QR login screen: shows the QR payload and deep link,
// reflects the poll state while waiting for confirmation

use crate::app::{AppState, LoginFlow};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);

pub struct LoginScreenComponent;

impl LoginScreenComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(Line::from(Span::styled(
                " MechtaAI - Sign in with Telegram ",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(inner);

        let status_line = match &state.login {
            LoginFlow::Idle => Line::from(Span::styled(
                "Press r to request a login code",
                Style::default().fg(MUTED_GRAY),
            )),
            LoginFlow::Initializing => Line::from(Span::styled(
                "Requesting a login code...",
                Style::default().fg(MUTED_GRAY),
            )),
            LoginFlow::Waiting { .. } => Line::from(vec![
                Span::styled("● ", Style::default().fg(GOLD)),
                Span::styled(
                    "Waiting for confirmation in Telegram",
                    Style::default().fg(SOFT_WHITE),
                ),
            ]),
            LoginFlow::Exchanging => Line::from(vec![
                Span::styled("● ", Style::default().fg(SELECTION_GREEN)),
                Span::styled("Confirmed, signing in...", Style::default().fg(SOFT_WHITE)),
            ]),
        };
        frame.render_widget(
            Paragraph::new(status_line).alignment(Alignment::Center),
            chunks[0],
        );

        if let LoginFlow::Waiting { attempt, .. } = &state.login {
            // The QR payload is rendered as text; most terminals cannot draw
            // the actual image, so the deep link is the primary path
            let qr = Paragraph::new(attempt.qr_code_data.as_str())
                .style(Style::default().fg(SOFT_WHITE))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(MUTED_GRAY))
                        .title(" Scan in Telegram "),
                );
            frame.render_widget(qr, chunks[1]);

            let link = Paragraph::new(Line::from(vec![
                Span::styled("Or open: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(
                    attempt.deep_link.as_str(),
                    Style::default()
                        .fg(CORNFLOWER_BLUE)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(link, chunks[2]);
        }

        let hints = Paragraph::new(Line::from(vec![
            Span::styled("r", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" new code ", Style::default().fg(MUTED_GRAY)),
            Span::styled("q", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" quit", Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[3]);
    }
}

impl Default for LoginScreenComponent {
    fn default() -> Self {
        Self::new()
    }
}
