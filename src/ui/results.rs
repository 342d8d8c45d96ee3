//! Results screen rendering
//!
//! Renders the trip header, the tab bar and the active fragment. Only the
//! active tab is drawn. The body scrolls so the focused item stays visible.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::{wrap_text, Palette};
use crate::app::App;
use crate::render::{
    Card, CardSection, ItineraryFragment, MetaItem, RenderedResults, RestaurantFragment,
    TipsFragment,
};
use crate::view::{FocusTarget, ResultsView, Tab};

/// Indent of card sections under the card title
const INDENT: &str = "    ";

/// Marker drawn in front of the focused item
const FOCUS_MARKER: &str = "\u{203A} "; // ›

fn meta_text(item: &MetaItem) -> String {
    match item {
        MetaItem::Address(address) => format!("\u{1F4CD} {}", address), // 📍
        MetaItem::Duration(duration) => format!("\u{23F1} {}", duration), // ⏱
        MetaItem::Rating(rating) => format!("\u{2B50} {}", rating),     // ⭐
        MetaItem::Cuisine(cuisine) => format!("\u{1F374} {}", cuisine), // 🍴
        MetaItem::Transport(transport) => format!("\u{1F687} {}", transport), // 🚇
    }
}

/// Pushes `text` wrapped to `width`, each line prefixed with `indent`
fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, indent: &str, width: usize, style: Style) {
    for row in wrap_text(text, width.saturating_sub(indent.len())) {
        lines.push(Line::from(Span::styled(format!("{}{}", indent, row), style)));
    }
}

/// Builds the lines of one card
pub fn card_lines(card: &Card, focused: bool, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let marker = if focused { FOCUS_MARKER } else { "  " };
    let title_style = if focused {
        Style::default()
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    };
    let mut title = vec![
        Span::styled(format!("  {}", marker), Style::default().fg(palette.highlight)),
        Span::styled(card.title.clone(), title_style),
    ];
    if let Some(badge) = &card.badge {
        title.push(Span::styled(format!("  [{}]", badge), Style::default().fg(palette.accent)));
    }
    if let Some(price) = &card.price {
        title.push(Span::styled(format!("  {}", price), Style::default().fg(palette.success)));
    }
    lines.push(Line::from(title));

    let text = Style::default().fg(palette.primary);
    let dim = Style::default().fg(palette.secondary);

    for section in &card.sections {
        match section {
            CardSection::Photos(carousel) => {
                let mut spans = vec![
                    Span::styled(
                        format!("{}\u{1F4F7} {}/{} ", INDENT, carousel.index() + 1, carousel.len()), // 📷
                        dim,
                    ),
                    Span::styled(carousel.current().to_string(), Style::default().fg(palette.header)),
                ];
                if carousel.has_controls() {
                    spans.push(Span::styled("  \u{25C0} [ ] \u{25B6}", dim)); // ◀ ▶
                }
                lines.push(Line::from(spans));
            }
            CardSection::Description { label, text: body } => {
                let body = match label {
                    Some(label) => format!("{}: {}", label, body),
                    None => body.clone(),
                };
                push_wrapped(&mut lines, &body, INDENT, width, text);
            }
            CardSection::Meta(items) => {
                let row = items.iter().map(meta_text).collect::<Vec<_>>().join("  \u{00B7}  ");
                push_wrapped(&mut lines, &row, INDENT, width, dim);
            }
            CardSection::Contact { phone, website } => {
                let mut spans = vec![Span::raw(INDENT)];
                if let Some(phone) = phone {
                    spans.push(Span::styled(format!("\u{260E} tel:{}", phone), text)); // ☎
                }
                if let Some(website) = website {
                    if phone.is_some() {
                        spans.push(Span::raw("   "));
                    }
                    spans.push(Span::styled(
                        format!("\u{1F310} {}", website), // 🌐
                        Style::default()
                            .fg(palette.header)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                }
                lines.push(Line::from(spans));
            }
            CardSection::OpeningHours(hours) => {
                lines.push(Line::from(Span::styled(format!("{}\u{1F552} Opening hours", INDENT), dim))); // 🕒
                for entry in hours {
                    lines.push(Line::from(Span::styled(format!("{}  {}", INDENT, entry), dim)));
                }
            }
            CardSection::Reviews(reviews) => {
                lines.push(Line::from(Span::styled(format!("{}Reviews", INDENT), dim)));
                for review in reviews {
                    let mut header = vec![
                        Span::styled(format!("{}  \u{2605} {} ", INDENT, review.rating), Style::default().fg(palette.warning)), // ★
                        Span::styled(review.author.clone(), text.add_modifier(Modifier::BOLD)),
                    ];
                    if let Some(time) = &review.time {
                        header.push(Span::styled(format!(" ({})", time), dim));
                    }
                    lines.push(Line::from(header));
                    if !review.text.is_empty() {
                        push_wrapped(&mut lines, &format!("\"{}\"", review.text), &format!("{}    ", INDENT), width, dim);
                    }
                }
            }
            CardSection::Tip(tip) => {
                push_wrapped(
                    &mut lines,
                    &format!("\u{1F4A1} Tip: {}", tip), // 💡
                    INDENT,
                    width,
                    Style::default().fg(palette.accent),
                );
            }
        }
    }

    lines
}

fn placeholder(text: &str, palette: &Palette) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(palette.secondary),
    ))]
}

/// Lines of the active tab plus the line index of the focused item
pub fn body_lines(
    results: &RenderedResults,
    view: &ResultsView,
    palette: &Palette,
    width: usize,
) -> (Vec<Line<'static>>, Option<usize>) {
    let focused = view.focused(results);
    let mut focus_line = None;
    let mut lines = Vec::new();

    match view.active() {
        Tab::Itinerary => match &results.itinerary {
            ItineraryFragment::Empty => lines = placeholder(ItineraryFragment::placeholder(), palette),
            ItineraryFragment::Days(days) => {
                for (day_index, day) in days.iter().enumerate() {
                    let day_focused = matches!(focused, Some(FocusTarget::Day { day_index: d, .. }) if d == day_index);
                    if day_focused {
                        focus_line = Some(lines.len());
                    }
                    let stops = match day.cards.len() {
                        1 => "1 stop".to_string(),
                        n => format!("{} stops", n),
                    };
                    lines.push(Line::from(vec![
                        Span::styled(
                            if day_focused { FOCUS_MARKER } else { "  " },
                            Style::default().fg(palette.highlight),
                        ),
                        Span::styled(
                            format!("{} {}", view.glyph(day_index), day.label),
                            Style::default()
                                .fg(if day_focused { palette.highlight } else { palette.header })
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  ({})", stops), Style::default().fg(palette.secondary)),
                    ]));

                    if view.is_collapsed(day_index) {
                        continue;
                    }
                    for (card_index, card) in day.cards.iter().enumerate() {
                        let card_focused = focused
                            == Some(FocusTarget::Activity {
                                day_index,
                                card_index,
                            });
                        if card_focused {
                            focus_line = Some(lines.len());
                        }
                        lines.extend(card_lines(card, card_focused, palette, width));
                    }
                    lines.push(Line::from(""));
                }
            }
        },
        Tab::Restaurants => match &results.restaurants {
            RestaurantFragment::Empty => lines = placeholder(RestaurantFragment::placeholder(), palette),
            RestaurantFragment::List { heading, cards } => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", heading),
                    Style::default()
                        .fg(palette.header)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                for (index, card) in cards.iter().enumerate() {
                    let card_focused = focused == Some(FocusTarget::Restaurant(index));
                    if card_focused {
                        focus_line = Some(lines.len());
                    }
                    lines.extend(card_lines(card, card_focused, palette, width));
                    lines.push(Line::from(""));
                }
            }
        },
        Tab::Tips => match &results.tips {
            TipsFragment::Empty => lines = placeholder(TipsFragment::placeholder(), palette),
            TipsFragment::List { heading, tips } => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", heading),
                    Style::default()
                        .fg(palette.header)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                for tip in tips {
                    let rows = wrap_text(&tip.text, width.saturating_sub(8));
                    for (i, row) in rows.into_iter().enumerate() {
                        let lead = if i == 0 {
                            format!("  {} ", tip.icon)
                        } else {
                            "     ".to_string()
                        };
                        lines.push(Line::from(vec![
                            Span::raw(lead),
                            Span::styled(row, Style::default().fg(palette.primary)),
                        ]));
                    }
                }
            }
        },
    }

    (lines, focus_line)
}

/// Scroll offset that keeps `focus_line` in the upper half of the viewport
pub fn scroll_offset(focus_line: Option<usize>, total: usize, height: usize) -> usize {
    let Some(focus) = focus_line else {
        return 0;
    };
    let max_offset = total.saturating_sub(height);
    focus.saturating_sub(height / 3).min(max_offset)
}

/// Renders the results screen
pub fn render(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let Some(results) = &app.results else {
        frame.render_widget(Paragraph::new(placeholder("No results yet.", palette)), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title and subtitle
            Constraint::Length(1), // Tabs
            Constraint::Min(3),    // Active fragment
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let mut title = vec![Span::styled(
        format!(" {}", results.header.title),
        Style::default()
            .fg(palette.header)
            .add_modifier(Modifier::BOLD),
    )];
    if results.demo {
        title.push(Span::styled("  (demo data)", Style::default().fg(palette.accent)));
    }
    let header = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!(" {}", results.header.subtitle),
            Style::default().fg(palette.secondary),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.label()).collect::<Vec<_>>())
        .select(app.view.active().index())
        .style(Style::default().fg(palette.secondary))
        .highlight_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("\u{2502}");
    frame.render_widget(tabs, chunks[1]);

    let body_area = chunks[2];
    let inner_width = usize::from(body_area.width.saturating_sub(2));
    let inner_height = usize::from(body_area.height.saturating_sub(2));
    let (lines, focus_line) = body_lines(results, &app.view, palette, inner_width);
    let offset = scroll_offset(focus_line, lines.len(), inner_height);

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.header)),
        )
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(body, body_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Tab: switch  ↑/↓: focus  Space: fold day  [ ]: photos  n: new trip  q: quit",
            Style::default().fg(palette.secondary),
        ))),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Screen, Theme};
    use crate::data::{Activity, DayPlan, ItineraryResponse, Restaurant, Review, Tip, TripRequest};
    use crate::render::{activity_card, render_results};
    use crate::ui::test_support::{buffer_to_string, draw};

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(response: ItineraryResponse) -> App {
        let mut app = App::new();
        let request = TripRequest {
            destination: "Lisbon".to_string(),
            ..Default::default()
        };
        app.results = Some(render_results(&response, &request));
        app.screen = Screen::Results;
        app
    }

    fn full_activity() -> Activity {
        Activity {
            name: "Belem Tower".to_string(),
            category: Some("Landmark".to_string()),
            description: Some("Fortified tower on the Tagus".to_string()),
            address: Some("Av. Brasilia".to_string()),
            duration: Some("1-2 hours".to_string()),
            rating: Some(4.6),
            transport: Some("Tram 15".to_string()),
            photos: vec!["one.jpg".into(), "two.jpg".into()],
            phone: Some("+351 213 620 034".to_string()),
            website: Some("https://example.pt".to_string()),
            opening_hours: vec!["Mon: 10-18".to_string()],
            reviews: vec![Review {
                author: Some("Ana".to_string()),
                rating: Some(5.0),
                text: Some("Worth the queue".to_string()),
                ..Default::default()
            }],
            tip: Some("Go early".to_string()),
        }
    }

    #[test]
    fn test_bare_card_is_title_only() {
        let card = activity_card(&Activity {
            name: "Miradouro".to_string(),
            ..Default::default()
        });

        let lines = card_lines(&card, false, &palette(), 60);

        assert_eq!(lines.len(), 1);
        assert!(text_of(&lines).contains("Miradouro"));
    }

    #[test]
    fn test_full_card_renders_every_section() {
        let card = activity_card(&full_activity());
        let text = text_of(&card_lines(&card, true, &palette(), 80));

        assert!(text.contains(FOCUS_MARKER));
        assert!(text.contains("[Landmark]"));
        assert!(text.contains("1/2 one.jpg"));
        assert!(text.contains("\u{25C0} [ ] \u{25B6}"));
        assert!(text.contains("Fortified tower"));
        assert!(text.contains("Av. Brasilia"));
        assert!(text.contains("\u{1F687} Tram 15"));
        assert!(text.contains("tel:+351 213 620 034"));
        assert!(text.contains("https://example.pt"));
        assert!(text.contains("Mon: 10-18"));
        assert!(text.contains("Ana"));
        assert!(text.contains("\"Worth the queue\""));
        assert!(text.contains("Tip: Go early"));
    }

    #[test]
    fn test_single_photo_has_no_controls() {
        let mut activity = full_activity();
        activity.photos.truncate(1);
        let text = text_of(&card_lines(&activity_card(&activity), false, &palette(), 80));

        assert!(text.contains("1/1"));
        assert!(!text.contains('\u{25C0}'));
    }

    #[test]
    fn test_empty_itinerary_shows_placeholder() {
        let app = app_with(ItineraryResponse::default());
        let results = app.results.as_ref().unwrap();

        let (lines, focus) = body_lines(results, &app.view, &palette(), 60);

        assert_eq!(focus, None);
        assert!(text_of(&lines).contains("No itinerary data available."));
    }

    #[test]
    fn test_collapsed_day_hides_cards_and_flips_glyph() {
        let mut app = app_with(ItineraryResponse {
            itinerary: vec![DayPlan {
                day_number: Some(1),
                activities: vec![full_activity()],
                ..Default::default()
            }],
            ..Default::default()
        });
        let results = app.results.clone().unwrap();

        let (expanded, _) = body_lines(&results, &app.view, &palette(), 80);
        assert!(text_of(&expanded).contains("\u{25BC} Day 1"));
        assert!(text_of(&expanded).contains("Belem Tower"));

        app.view.toggle_day(0);
        let (collapsed, _) = body_lines(&results, &app.view, &palette(), 80);
        assert!(text_of(&collapsed).contains("\u{25B6} Day 1"));
        assert!(!text_of(&collapsed).contains("Belem Tower"));
    }

    #[test]
    fn test_restaurant_tab_lists_cards_in_day_major_order() {
        let restaurant = |name: &str| Restaurant {
            name: name.to_string(),
            ..Default::default()
        };
        let mut app = app_with(ItineraryResponse {
            itinerary: vec![
                DayPlan {
                    restaurants: vec![restaurant("A"), restaurant("B")],
                    ..Default::default()
                },
                DayPlan {
                    restaurants: vec![restaurant("C")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        app.view.switch_to(Tab::Restaurants);
        let results = app.results.as_ref().unwrap();

        let text = text_of(&body_lines(results, &app.view, &palette(), 60).0);

        let a = text.find("  A").unwrap();
        let b = text.find("  B").unwrap();
        let c = text.find("  C").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_tips_tab_shows_icons() {
        let mut app = app_with(ItineraryResponse {
            tips: vec![Tip::Text("Buy a Viva Viagem card".to_string())],
            ..Default::default()
        });
        app.view.switch_to(Tab::Tips);

        let content = buffer_to_string(&draw(&app, 100, 24));

        assert!(content.contains("Buy a Viva Viagem card"));
    }

    #[test]
    fn test_empty_restaurants_and_tips_show_placeholders() {
        let mut app = app_with(ItineraryResponse::default());
        let results = app.results.clone().unwrap();

        app.view.switch_to(Tab::Restaurants);
        let restaurants = text_of(&body_lines(&results, &app.view, &palette(), 60).0);
        app.view.switch_to(Tab::Tips);
        let tips = text_of(&body_lines(&results, &app.view, &palette(), 60).0);

        assert!(restaurants.contains("No restaurant recommendations available."));
        assert!(tips.contains("No tips available."));
    }

    #[test]
    fn test_header_and_tabs_render() {
        let app = app_with(ItineraryResponse {
            city: Some("Lisbon".to_string()),
            duration_days: Some(2),
            ..Default::default()
        });

        let content = buffer_to_string(&draw(&app, 100, 24));

        assert!(content.contains("Your Lisbon Adventure"));
        assert!(content.contains("2 day trip"));
        assert!(content.contains("Itinerary"));
        assert!(content.contains("Restaurants"));
        assert!(content.contains("Tips"));
    }

    #[test]
    fn test_scroll_offset_keeps_focus_visible() {
        assert_eq!(scroll_offset(None, 100, 20), 0);
        assert_eq!(scroll_offset(Some(3), 100, 20), 0);
        assert_eq!(scroll_offset(Some(50), 100, 21), 43);
        // Never scrolls past the end
        assert_eq!(scroll_offset(Some(99), 100, 20), 80);
    }

    #[test]
    fn test_focus_line_tracks_focused_card() {
        let mut app = app_with(ItineraryResponse {
            itinerary: vec![DayPlan {
                activities: vec![full_activity(), full_activity()],
                ..Default::default()
            }],
            ..Default::default()
        });
        let results = app.results.clone().unwrap();

        assert_eq!(body_lines(&results, &app.view, &palette(), 80).1, Some(0));
        app.view.focus_next(&results);
        assert_eq!(body_lines(&results, &app.view, &palette(), 80).1, Some(1));
        app.view.focus_next(&results);
        let (lines, focus) = body_lines(&results, &app.view, &palette(), 80);
        let focus = focus.unwrap();
        assert!(focus > 1);
        assert!(text_of(&lines[focus..=focus]).contains(FOCUS_MARKER));
    }

    #[test]
    fn test_results_render_without_results_does_not_panic() {
        let mut app = App::new();
        app.screen = Screen::Results;
        let content = buffer_to_string(&draw(&app, 60, 20));
        assert!(content.contains("No results yet."));
    }
}
