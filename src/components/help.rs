// ABOUTME: Help overlay component displaying keyboard shortcuts per view

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let help_items = vec![
            ListItem::new("Wizard:")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ListItem::new("  Enter      Begin the stream / submit a thought"),
            ListItem::new("  F2         Finish the current stage"),
            ListItem::new("  F4         Finalize the cycle / retry analysis"),
            ListItem::new("  F5         Refresh from the server"),
            ListItem::new("  F6         Open history"),
            ListItem::new("  Ctrl+S     Save without finishing"),
            ListItem::new("  Ctrl+R     Retry unsaved thoughts"),
            ListItem::new("  Ctrl+B     View the previous step"),
            ListItem::new("  Tab        Next answer field (reverse step)"),
            ListItem::new(""),
            ListItem::new("History:")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ListItem::new("  j/↓ k/↑    Move selection"),
            ListItem::new("  Enter      Open the selected cycle"),
            ListItem::new("  m          Load more"),
            ListItem::new("  Esc        Close detail / back to wizard"),
            ListItem::new(""),
            ListItem::new("General:")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ListItem::new("  F1         Toggle this help"),
            ListItem::new("  Ctrl+C     Quit"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press F1 or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
