// ABOUTME: History browser: paginated list of past cycles with a detail pane
// for the selected one

use crate::models::{DraftStatus, WantsDraft};
use crate::wizard::HistoryState;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);

pub struct HistoryViewComponent;

impl HistoryViewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, history: &HistoryState) {
        // Narrow terminals collapse to a single pane
        let show_split = history.detail.is_some() && area.width >= 80;

        let chunks = if show_split {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area)
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(area)
        };

        if history.detail.is_some() && !show_split {
            self.render_detail(frame, chunks[0], history);
        } else {
            self.render_list(frame, chunks[0], history);
            if show_split {
                self.render_detail(frame, chunks[1], history);
            }
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, history: &HistoryState) {
        let mut items: Vec<ListItem> = history
            .items
            .iter()
            .map(|draft| {
                let status_span = match draft.status {
                    DraftStatus::Completed => {
                        Span::styled("done  ", Style::default().fg(SELECTION_GREEN))
                    }
                    DraftStatus::Draft => Span::styled("draft ", Style::default().fg(MUTED_GRAY)),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        draft.created_at.format("%Y-%m-%d ").to_string(),
                        Style::default().fg(SOFT_WHITE),
                    ),
                    status_span,
                    Span::styled(snippet(draft), Style::default().fg(MUTED_GRAY)),
                ]))
            })
            .collect();

        if history.loading {
            items.push(ListItem::new(Span::styled(
                "loading...",
                Style::default().fg(MUTED_GRAY),
            )));
        } else if history.has_more {
            items.push(ListItem::new(Span::styled(
                "m  load more",
                Style::default().fg(GOLD),
            )));
        }

        let title = if history.items.is_empty() && !history.loading {
            " History - nothing here yet "
        } else {
            " History "
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG))
                    .title(Span::styled(
                        title,
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    )),
            )
            .highlight_style(
                Style::default()
                    .fg(SELECTION_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(history.selected);
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, history: &HistoryState) {
        let Some(draft) = history.detail_item() else {
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        let mut push_section = |title: &str, content: Option<&str>| {
            lines.push(Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )));
            let body = content.unwrap_or("(empty)");
            for text_line in body.lines() {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    Style::default().fg(SOFT_WHITE),
                )));
            }
            lines.push(Line::from(""));
        };

        push_section("Stream of thought", draft.raw_wants_stream.as_deref());
        push_section("Letter from the future", draft.raw_future_me.as_deref());
        push_section("Envy", draft.raw_envy.as_deref());
        push_section("Regrets", draft.raw_regrets.as_deref());
        push_section("Five-year plan", draft.raw_what_to_do_5y.as_deref());

        let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER))
                .style(Style::default().bg(PANEL_BG))
                .title(format!(
                    " {} - Esc to close ",
                    draft.created_at.format("%Y-%m-%d %H:%M")
                )),
        );
        frame.render_widget(detail, area);
    }
}

impl Default for HistoryViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-blank stream line, shortened for the list row
fn snippet(draft: &WantsDraft) -> String {
    let first = draft.stream_lines().into_iter().next().unwrap_or_default();
    if first.chars().count() > 40 {
        let cut: String = first.chars().take(39).collect();
        format!("{cut}…")
    } else {
        first
    }
}
