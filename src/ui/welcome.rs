//! Welcome screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Palette;
use crate::app::App;
use crate::data::fallback::bundled_cities;

/// Builds the welcome text
fn welcome_lines(app: &App, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "\u{2708}  Trip Guide", // ✈
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Plan a personalized trip with real attractions, restaurants and local tips.",
            Style::default().fg(palette.primary),
        )),
        Line::from(Span::styled(
            "Tell us where and when, what you enjoy and how you like to travel.",
            Style::default().fg(palette.secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(palette.secondary)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start planning", Style::default().fg(palette.secondary)),
        ]),
    ];

    if app.demo {
        let cities: Vec<&str> = bundled_cities().collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Demo mode: itineraries come from the bundled guides ({})",
                cities.join(", ")
            ),
            Style::default().fg(palette.accent),
        )));
    }

    lines
}

/// Renders the welcome screen
pub fn render(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Min(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let paragraph = Paragraph::new(welcome_lines(app, palette))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.header)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[1]);
}
