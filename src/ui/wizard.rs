//! Planning form rendering
//!
//! Renders the active step of the six-step form with a progress track, the
//! step's input (text fields or an option list), the inline validation
//! message and a help bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets::StepTrack;
use super::Palette;
use crate::app::{App, DateField};
use crate::data::{GroupType, TravelStyle};
use crate::form::{ACCESSIBILITY_OPTIONS, INTEREST_OPTIONS, STEP_COUNT};

/// Heading of each step, indexed by step - 1
const STEP_TITLES: [&str; STEP_COUNT as usize] = [
    "Where are you going?",
    "When are you traveling?",
    "What are you interested in?",
    "What's your travel style?",
    "Who's coming along?",
    "Any accessibility needs?",
];

/// Text cursor drawn after the focused field
const CURSOR: &str = "\u{258F}"; // ▏

pub fn step_title(step: u8) -> &'static str {
    STEP_TITLES
        .get(usize::from(step.saturating_sub(1)))
        .copied()
        .unwrap_or("")
}

/// Builds a labelled text field line
fn field_line(label: &str, value: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let marker = if focused { "\u{203A} " } else { "  " }; // ›
    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(palette.highlight)),
        Span::styled(format!("{:<12}", label), Style::default().fg(palette.secondary)),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(palette.highlight)));
    }
    Line::from(spans)
}

/// Builds one option row with its check or radio mark
fn option_line(label: &str, mark: &str, under_cursor: bool, palette: &Palette) -> Line<'static> {
    let marker = if under_cursor { "\u{203A} " } else { "  " };
    let style = if under_cursor {
        Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.primary)
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(palette.highlight)),
        Span::styled(format!("{} {}", mark, label), style),
    ])
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn radio(selected: bool) -> &'static str {
    if selected {
        "(\u{2022})" // (•)
    } else {
        "( )"
    }
}

/// Builds the body of the active step
pub fn step_lines(app: &App, palette: &Palette) -> Vec<Line<'static>> {
    let draft = &app.wizard.draft;
    let cursor = app.option_cursor;
    let hint = |text: &str| Line::from(Span::styled(text.to_string(), Style::default().fg(palette.secondary)));

    match app.wizard.active() {
        1 => vec![
            field_line("Destination", &draft.destination, true, palette),
            Line::from(""),
            hint("City name, e.g. Tokyo or Paris"),
        ],
        2 => vec![
            field_line(
                "Check-in",
                &draft.check_in,
                app.date_field == DateField::CheckIn,
                palette,
            ),
            field_line(
                "Check-out",
                &draft.check_out,
                app.date_field == DateField::CheckOut,
                palette,
            ),
            Line::from(""),
            hint("Optional, YYYY-MM-DD. Without dates the trip lasts 3 days."),
        ],
        3 => INTEREST_OPTIONS
            .iter()
            .enumerate()
            .map(|(i, (tag, label))| {
                option_line(label, checkbox(draft.interests.contains(*tag)), i == cursor, palette)
            })
            .collect(),
        4 => {
            let mut lines: Vec<Line<'static>> = TravelStyle::ALL
                .iter()
                .enumerate()
                .map(|(i, style)| {
                    option_line(style.label(), radio(draft.travel_style == Some(*style)), i == cursor, palette)
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(hint(&format!("Default: {}", TravelStyle::default().label())));
            lines
        }
        5 => {
            let mut lines: Vec<Line<'static>> = GroupType::ALL
                .iter()
                .enumerate()
                .map(|(i, group)| {
                    option_line(group.label(), radio(draft.group_type == Some(*group)), i == cursor, palette)
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(hint(&format!("Default: {}", GroupType::default().label())));
            lines
        }
        _ => {
            let mut lines: Vec<Line<'static>> = ACCESSIBILITY_OPTIONS
                .iter()
                .enumerate()
                .map(|(i, (tag, label))| {
                    option_line(label, checkbox(draft.accessibility.contains(*tag)), i == cursor, palette)
                })
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Enter to generate your itinerary",
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            )));
            lines
        }
    }
}

/// Key hints for the active step
fn help_text(step: u8) -> &'static str {
    match step {
        1 => "Type destination  Enter: next  Esc: cancel",
        2 => "Type date  Tab: switch field  Enter: next  Esc: back",
        STEP_COUNT => "↑/↓: move  Space: toggle  Enter: generate  Esc: back",
        _ => "↑/↓: move  Space: select  Enter: next  Esc: back",
    }
}

/// Renders the planning form
pub fn render(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let step = app.wizard.active();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Step heading
            Constraint::Length(1), // Progress track
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Step body
            Constraint::Length(1), // Validation message
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let heading = vec![
        Line::from(vec![
            Span::styled(
                format!(" Step {} of {}: ", step, STEP_COUNT),
                Style::default().fg(palette.secondary),
            ),
            Span::styled(
                step_title(step),
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {:.0}% complete", app.wizard.progress()),
            Style::default().fg(palette.secondary),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let track_area = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    frame.render_widget(
        StepTrack::new(step, STEP_COUNT)
            .filled_style(Style::default().fg(palette.header))
            .empty_style(Style::default().fg(palette.secondary)),
        track_area,
    );

    let body = Paragraph::new(step_lines(app, palette)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.header)),
    );
    frame.render_widget(body, chunks[3]);

    if let Some(message) = &app.validation_message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" \u{26A0} {}", message), // ⚠
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[4],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", help_text(step)),
            Style::default().fg(palette.secondary),
        ))),
        chunks[5],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::ui::test_support::{buffer_to_string, draw};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn form_app() -> App {
        let mut app = App::new();
        app.screen = Screen::Form;
        app
    }

    fn lines_text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_step_titles_cover_all_steps() {
        for step in 1..=STEP_COUNT {
            assert!(!step_title(step).is_empty());
        }
        assert_eq!(step_title(0), "");
        assert_eq!(step_title(7), "");
    }

    #[test]
    fn test_first_step_renders_destination_field() {
        let mut app = form_app();
        for c in "Kyoto".chars() {
            press(&mut app, KeyCode::Char(c));
        }

        let content = buffer_to_string(&draw(&app, 80, 24));

        assert!(content.contains("Step 1 of 6"));
        assert!(content.contains("Where are you going?"));
        assert!(content.contains("Kyoto"));
        assert!(content.contains("17% complete"));
    }

    #[test]
    fn test_validation_message_is_rendered() {
        let mut app = form_app();
        press(&mut app, KeyCode::Enter);

        let content = buffer_to_string(&draw(&app, 80, 24));

        assert!(content.contains("Please enter a city name"));
    }

    #[test]
    fn test_interest_checkboxes_reflect_draft() {
        let mut app = form_app();
        app.wizard.draft.destination = "Kyoto".to_string();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));

        let palette = Palette::for_theme(app.theme);
        let text = lines_text(&step_lines(&app, &palette));

        assert_eq!(text.len(), INTEREST_OPTIONS.len());
        assert!(text[0].contains("[x]"));
        assert!(text[0].starts_with('\u{203A}'));
        assert!(text[1].contains("[ ]"));
    }

    #[test]
    fn test_radio_marks_selected_style() {
        let mut app = form_app();
        app.wizard.draft.destination = "Kyoto".to_string();
        app.wizard.advance(4).unwrap();
        app.wizard.draft.travel_style = Some(TravelStyle::Luxury);

        let palette = Palette::for_theme(app.theme);
        let text = lines_text(&step_lines(&app, &palette)).join("\n");

        assert!(text.contains("(\u{2022}) Luxury"));
        assert!(text.contains("Default: Cultural"));
    }

    #[test]
    fn test_last_step_prompts_for_submit() {
        let mut app = form_app();
        app.wizard.draft.destination = "Kyoto".to_string();
        app.wizard.advance(STEP_COUNT).unwrap();

        let content = buffer_to_string(&draw(&app, 80, 24));

        assert!(content.contains("Press Enter to generate your itinerary"));
        assert!(content.contains("100% complete"));
    }
}
