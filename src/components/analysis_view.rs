// ABOUTME: Analysis report for a completed cycle: top wants, pains, focus
// areas, patterns, and the summary comment

use crate::models::WantsAnalysis;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct AnalysisViewComponent;

impl AnalysisViewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, analysis: Option<&WantsAnalysis>) {
        let Some(analysis) = analysis else {
            let waiting = Paragraph::new("The analysis is not ready yet. Press F5 to refresh.")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(SUBDUED_BORDER)),
                );
            frame.render_widget(waiting, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(Span::styled(
            analysis.summary_comment.clone(),
            Style::default().fg(SOFT_WHITE),
        )));
        lines.push(Line::from(""));

        if !analysis.top_wants.is_empty() {
            lines.push(section_header("Top wants", SELECTION_GREEN));
            for want in &analysis.top_wants {
                lines.push(Line::from(vec![
                    Span::styled("  ◆ ", Style::default().fg(SELECTION_GREEN)),
                    Span::styled(want.text.clone(), Style::default().fg(SOFT_WHITE)),
                    Span::styled(
                        format!("  ({})", want.horizon),
                        Style::default().fg(MUTED_GRAY),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }

        if !analysis.top_pains.is_empty() {
            lines.push(section_header("Top pains", WARNING_ORANGE));
            for pain in &analysis.top_pains {
                lines.push(Line::from(vec![
                    Span::styled("  ◆ ", Style::default().fg(WARNING_ORANGE)),
                    Span::styled(pain.text.clone(), Style::default().fg(SOFT_WHITE)),
                ]));
            }
            lines.push(Line::from(""));
        }

        if !analysis.focus_areas.is_empty() {
            lines.push(section_header("Suggested focus areas", CORNFLOWER_BLUE));
            for focus in &analysis.focus_areas {
                lines.push(Line::from(vec![
                    Span::styled("  ◆ ", Style::default().fg(CORNFLOWER_BLUE)),
                    Span::styled(focus.area_id.clone(), Style::default().fg(SOFT_WHITE)),
                    Span::styled(
                        format!("  {}", focus.reason),
                        Style::default().fg(MUTED_GRAY),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }

        if !analysis.patterns.is_empty() {
            lines.push(section_header("Patterns", GOLD));
            for pattern in &analysis.patterns {
                lines.push(Line::from(vec![
                    Span::styled("  ◆ ", Style::default().fg(GOLD)),
                    Span::styled(pattern.text.clone(), Style::default().fg(SOFT_WHITE)),
                ]));
            }
            lines.push(Line::from(""));
        }

        if let Some(questions) = analysis
            .suggested_questions
            .as_ref()
            .filter(|questions| !questions.is_empty())
        {
            lines.push(section_header("Questions to sit with", SOFT_WHITE));
            for question in questions {
                lines.push(Line::from(vec![
                    Span::styled("  ◆ ", Style::default().fg(SOFT_WHITE)),
                    Span::styled(question.clone(), Style::default().fg(MUTED_GRAY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "n  start a new cycle   F6 history",
            Style::default().fg(MUTED_GRAY),
        )));

        let report = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SUBDUED_BORDER))
                .title(Span::styled(
                    " Your wants, analyzed ",
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                )),
        );
        frame.render_widget(report, area);
    }
}

impl Default for AnalysisViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn section_header(title: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}
