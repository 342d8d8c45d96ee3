//! Loading indicator and error panel rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, Palette};
use crate::app::ErrorPanel;

/// Renders a loading message while the itinerary is being generated
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Percentage(40),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            format!("\u{23F3} {}", message), // ⏳
            Style::default().fg(palette.header),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This can take a minute for popular destinations.",
            Style::default().fg(palette.secondary),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );
}

/// Builds the action buttons, highlighting the selected one
fn action_line(panel: &ErrorPanel, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, action) in panel.actions.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if i == panel.selected {
            Style::default()
                .fg(palette.background)
                .bg(palette.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.primary)
        };
        spans.push(Span::styled(format!("[ {} ]", action.label()), style));
    }
    Line::from(spans)
}

/// Renders the error panel with Retry / Start Over actions
pub fn render_error(frame: &mut Frame, area: Rect, panel: &ErrorPanel, palette: &Palette) {
    let width = area.width.saturating_sub(4).min(64);
    let panel_area = centered_rect(width, 10, area);

    frame.render_widget(Clear, panel_area);

    let lines = vec![
        Line::from(Span::styled(
            "\u{26A0} Something went wrong", // ⚠
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            panel.message.clone(),
            Style::default().fg(palette.primary),
        )),
        Line::from(""),
        action_line(panel, palette),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ select  Enter confirm  r retry  s start over",
            Style::default().fg(palette.secondary),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error))
                .style(Style::default().bg(palette.background)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, panel_area);
}
