// ABOUTME: Reverse-engineering step: three stacked answer editors with focus
// cycling and a combined save/finish status line

use crate::components::future_me_step::editor_lines;
use crate::wizard::{ReverseField, ReverseState};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct ReverseStepComponent;

impl ReverseStepComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &ReverseState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        for (field, chunk) in ReverseField::all().iter().zip(chunks.iter()) {
            self.render_field(frame, *chunk, state, *field);
        }

        let mut status_spans = vec![Span::styled(
            "Tab next field   Ctrl+S save   F2 finish",
            Style::default().fg(MUTED_GRAY),
        )];
        if state.saving {
            status_spans.push(Span::styled("   saving...", Style::default().fg(MUTED_GRAY)));
        }
        frame.render_widget(Paragraph::new(Line::from(status_spans)), chunks[3]);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &ReverseState,
        field: ReverseField,
    ) {
        let focused = state.focus == field;
        let border_color = if focused { SELECTION_GREEN } else { SUBDUED_BORDER };
        let title_color = if focused { GOLD } else { MUTED_GRAY };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Line::from(vec![
                Span::styled(
                    format!(" {} ", field.title()),
                    Style::default().fg(title_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", field.prompt()),
                    Style::default().fg(MUTED_GRAY),
                ),
            ]));

        let editor = Paragraph::new(editor_lines(state.editor(field), focused)).block(block);
        frame.render_widget(editor, area);
    }
}

impl Default for ReverseStepComponent {
    fn default() -> Self {
        Self::new()
    }
}
