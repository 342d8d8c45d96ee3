//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, Palette};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let overlay_area = centered_rect(54, 28, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
    };

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Planning form"),
        help_line("Enter", "Next step / generate itinerary", palette),
        help_line("Esc", "Previous step / cancel", palette),
        help_line("Tab", "Switch check-in / check-out", palette),
        help_line("↑/k, ↓/j", "Move through options", palette),
        help_line("Space", "Select option", palette),
        Line::from(""),
        section("Results"),
        help_line("Tab, ←/→", "Switch tab", palette),
        help_line("1 2 3", "Itinerary / Restaurants / Tips", palette),
        help_line("↑/k, ↓/j", "Move focus", palette),
        help_line("Space", "Collapse / expand day", palette),
        help_line("[ / ]", "Previous / next photo", palette),
        help_line("n", "Plan a new trip", palette),
        Line::from(""),
        section("Error panel"),
        help_line("r", "Retry", palette),
        help_line("s", "Start over", palette),
        Line::from(""),
        section("Other"),
        help_line("t", "Toggle light / dark theme", palette),
        help_line("?", "Toggle this help", palette),
        help_line("q, Ctrl+C", "Quit application", palette),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(palette.secondary),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header))
        .style(Style::default().bg(palette.background).fg(palette.primary));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(palette.highlight)),
        Span::raw(description.to_string()),
    ])
}
