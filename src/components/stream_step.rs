// ABOUTME: Stream-of-thought step: countdown, submitted thoughts with their
// save status, and the single-line input

use crate::wizard::{EntryStatus, StreamPhase, StreamState};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const ERROR_RED: Color = Color::Rgb(230, 100, 100);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct StreamStepComponent;

impl StreamStepComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, stream: &StreamState) {
        match stream.phase {
            StreamPhase::NotStarted => self.render_intro(frame, area, stream),
            StreamPhase::Active => self.render_active(frame, area, stream),
            StreamPhase::Finished => self.render_finished(frame, area),
        }
    }

    fn render_intro(&self, frame: &mut Frame, area: Rect, stream: &StreamState) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Stream of thought",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "For ten minutes, write down every want that comes to mind.",
                Style::default().fg(SOFT_WHITE),
            )),
            Line::from(Span::styled(
                "One thought per line. Do not filter, do not judge.",
                Style::default().fg(SOFT_WHITE),
            )),
            Line::from(""),
            Line::from(if stream.starting {
                Span::styled("Starting...", Style::default().fg(MUTED_GRAY))
            } else {
                Span::styled(
                    "Press Enter to start the timer",
                    Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
                )
            }),
        ];

        let intro = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER)),
            );
        frame.render_widget(intro, area);
    }

    fn render_active(&self, frame: &mut Frame, area: Rect, stream: &StreamState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        // Timer turns orange on the last minute
        let timer_color = if stream.timer.remaining() <= 60 {
            WARNING_ORANGE
        } else {
            SELECTION_GREEN
        };
        let mut timer_spans = vec![
            Span::styled("⏱ ", Style::default().fg(timer_color)),
            Span::styled(
                stream.timer.format(),
                Style::default().fg(timer_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   {} thoughts", stream.entries.len()),
                Style::default().fg(MUTED_GRAY),
            ),
        ];
        if stream.failed_count() > 0 {
            timer_spans.push(Span::styled(
                format!("   {} unsaved (Ctrl+R)", stream.failed_count()),
                Style::default().fg(ERROR_RED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(timer_spans)), chunks[0]);

        // Most recent thoughts, newest at the bottom
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let skip = stream.entries.len().saturating_sub(visible);
        let items: Vec<ListItem> = stream
            .entries
            .iter()
            .skip(skip)
            .map(|entry| {
                let (marker, color) = match entry.status {
                    EntryStatus::Confirmed => ("✓ ", SELECTION_GREEN),
                    EntryStatus::Pending => ("… ", MUTED_GRAY),
                    EntryStatus::Failed => ("✗ ", ERROR_RED),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(color)),
                    Span::styled(entry.text.as_str(), Style::default().fg(SOFT_WHITE)),
                ]))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER))
                .title(" Your wants "),
        );
        frame.render_widget(list, chunks[1]);

        let input_line = Line::from(vec![
            Span::styled(stream.input.as_str(), Style::default().fg(SOFT_WHITE)),
            Span::styled("█", Style::default().fg(SELECTION_GREEN)),
        ]);
        let input = Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SELECTION_GREEN))
                .title(" I want... (Enter to submit, F2 to finish early) "),
        );
        frame.render_widget(input, chunks[2]);
    }

    fn render_finished(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Stream stage complete",
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Loading the next stage...",
                Style::default().fg(MUTED_GRAY),
            )),
        ];
        let done = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER)),
            );
        frame.render_widget(done, area);
    }
}

impl Default for StreamStepComponent {
    fn default() -> Self {
        Self::new()
    }
}
