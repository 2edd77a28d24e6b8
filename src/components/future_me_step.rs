// ABOUTME: Future-self letter step: multi-line editor with autosave status
// and a minimum-length indicator

use crate::app::editor::TextEditor;
use crate::wizard::{FutureMeState, MIN_LETTER_CHARS};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct FutureMeStepComponent;

impl FutureMeStepComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &FutureMeState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        let prompt = Paragraph::new(
            "Imagine yourself ten years from now, living the life you want. \
             Write a letter from that person back to today's you.",
        )
        .style(Style::default().fg(SOFT_WHITE))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER))
                .title(Span::styled(
                    " Letter from your future self ",
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                )),
        );
        frame.render_widget(prompt, chunks[0]);

        let editor = Paragraph::new(editor_lines(&state.editor, true))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SELECTION_GREEN)),
            );
        frame.render_widget(editor, chunks[1]);

        let written = state.editor.trimmed_len();
        let count_color = if written >= MIN_LETTER_CHARS {
            SELECTION_GREEN
        } else {
            WARNING_ORANGE
        };
        let mut status_spans = vec![Span::styled(
            format!("{}/{} characters", written, MIN_LETTER_CHARS),
            Style::default().fg(count_color),
        )];
        if state.saving {
            status_spans.push(Span::styled("   saving...", Style::default().fg(MUTED_GRAY)));
        } else if let Some(saved_at) = state.last_saved_at {
            status_spans.push(Span::styled(
                format!("   saved {}", saved_at.format("%H:%M:%S")),
                Style::default().fg(MUTED_GRAY),
            ));
        }
        status_spans.push(Span::styled(
            "   Ctrl+S save   F2 finish",
            Style::default().fg(MUTED_GRAY),
        ));
        frame.render_widget(Paragraph::new(Line::from(status_spans)), chunks[2]);
    }
}

impl Default for FutureMeStepComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Editor content as styled lines, with a block cursor when focused
pub fn editor_lines(editor: &TextEditor, focused: bool) -> Vec<Line<'static>> {
    let (cursor_line, cursor_col) = editor.cursor();
    editor
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if focused && idx == cursor_line {
                let before: String = line.chars().take(cursor_col).collect();
                let after: String = line.chars().skip(cursor_col).collect();
                Line::from(vec![
                    Span::styled(before, Style::default().fg(SOFT_WHITE)),
                    Span::styled("█", Style::default().fg(SELECTION_GREEN)),
                    Span::styled(after, Style::default().fg(SOFT_WHITE)),
                ])
            } else {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default().fg(SOFT_WHITE),
                ))
            }
        })
        .collect()
}
