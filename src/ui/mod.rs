//! UI rendering module for Trip Guide
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Screens read the [`App`] state
//! and never mutate it.

pub mod feedback;
pub mod help_overlay;
pub mod results;
pub mod welcome;
pub mod widgets;
pub mod wizard;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::{App, Screen, Theme};
use crate::background::Connectivity;

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    /// Section headers and titles
    pub header: Color,
    /// Primary text
    pub primary: Color,
    /// Secondary/dimmed text
    pub secondary: Color,
    /// Badges and decorations
    pub accent: Color,
    /// Focus marker and selected items
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                header: Color::Cyan,
                primary: Color::White,
                secondary: Color::Gray,
                accent: Color::Magenta,
                highlight: Color::Yellow,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
            Theme::Light => Self {
                background: Color::White,
                header: Color::Blue,
                primary: Color::Black,
                secondary: Color::DarkGray,
                accent: Color::Magenta,
                highlight: Color::Blue,
                success: Color::Green,
                warning: Color::Rgb(176, 110, 0),
                error: Color::Red,
            },
        }
    }
}

/// Renders the current screen, the status bar and the help overlay
pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.primary)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match &app.screen {
        Screen::Welcome => welcome::render(frame, app, chunks[0], &palette),
        Screen::Form => wizard::render(frame, app, chunks[0], &palette),
        Screen::Loading { message } => feedback::render_loading(frame, chunks[0], message, &palette),
        Screen::Results => results::render(frame, app, chunks[0], &palette),
        Screen::Error(panel) => feedback::render_error(frame, chunks[0], panel, &palette),
    }

    render_status_bar(frame, app, chunks[1], &palette);

    if app.show_help {
        help_overlay::render(frame, &palette);
    }
}

/// Color of the connectivity badge
fn connectivity_color(status: Connectivity, palette: &Palette) -> Color {
    match status {
        Connectivity::Connected => palette.success,
        Connectivity::Disconnected => palette.error,
        Connectivity::Unknown => palette.secondary,
    }
}

/// Builds the one-line status bar
fn status_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            " \u{25CF} ", // ●
            Style::default().fg(connectivity_color(app.connectivity, palette)),
        ),
        Span::styled(
            app.connectivity.label().to_string(),
            Style::default().fg(palette.primary),
        ),
        Span::styled(" \u{2502} ", Style::default().fg(palette.secondary)),
        Span::styled(
            format!("Theme: {}", app.theme.label()),
            Style::default().fg(palette.secondary),
        ),
    ];

    if app.demo {
        spans.push(Span::styled(" \u{2502} ", Style::default().fg(palette.secondary)));
        spans.push(Span::styled(
            "DEMO",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        "   ?: help  Ctrl+C: quit",
        Style::default().fg(palette.secondary),
    ));

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    frame.render_widget(Paragraph::new(status_line(app, palette)), area);
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Greedy word wrap; words longer than `width` are kept whole
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(10);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::app::App;

    /// Draws the whole UI into a test terminal of the given size
    pub fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    pub fn buffer_to_string(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }
}
