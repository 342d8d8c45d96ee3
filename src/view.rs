//! Results view controller
//!
//! Tracks which of the three result fragments is visible, which day sections
//! are collapsed, and which item has keyboard focus.

use std::collections::BTreeMap;

use crate::render::RenderedResults;

/// Disclosure glyph for an expanded day
pub const EXPANDED_GLYPH: &str = "\u{25BC}"; // ▼

/// Disclosure glyph for a collapsed day
pub const COLLAPSED_GLYPH: &str = "\u{25B6}"; // ▶

/// The three mutually exclusive result views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Itinerary,
    Restaurants,
    Tips,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Itinerary, Tab::Restaurants, Tab::Tips];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Itinerary => "Itinerary",
            Tab::Restaurants => "Restaurants",
            Tab::Tips => "Tips",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Itinerary => 0,
            Tab::Restaurants => 1,
            Tab::Tips => 2,
        }
    }

    /// Following tab, wrapping around
    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Preceding tab, wrapping around
    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Description of a tab switch for the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChange {
    pub from: Tab,
    pub to: Tab,
}

/// Something on the active tab that can hold focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A day header; `day_index` is its position in the itinerary
    Day { day_number: u32, day_index: usize },
    /// An activity card inside an expanded day
    Activity { day_index: usize, card_index: usize },
    /// A restaurant card
    Restaurant(usize),
}

/// View state of the results screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    active: Tab,
    /// Collapse flags keyed by day position; day numbers may repeat
    collapsed: BTreeMap<usize, bool>,
    cursor: usize,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently visible tab
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Focus position within the active tab
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Makes `tab` the only visible view
    pub fn switch_to(&mut self, tab: Tab) -> TabChange {
        let from = self.active;
        self.active = tab;
        if from != tab {
            self.cursor = 0;
        }
        TabChange { from, to: tab }
    }

    /// Whether a day section is collapsed; days start expanded
    pub fn is_collapsed(&self, day_index: usize) -> bool {
        self.collapsed.get(&day_index).copied().unwrap_or(false)
    }

    /// Disclosure glyph for a day section
    pub fn glyph(&self, day_index: usize) -> &'static str {
        if self.is_collapsed(day_index) {
            COLLAPSED_GLYPH
        } else {
            EXPANDED_GLYPH
        }
    }

    /// Flips a day between expanded and collapsed, returning the new glyph
    pub fn toggle_day(&mut self, day_index: usize) -> &'static str {
        let collapsed = !self.is_collapsed(day_index);
        self.collapsed.insert(day_index, collapsed);
        self.glyph(day_index)
    }

    /// Focusable items of the active tab, in display order
    pub fn focus_targets(&self, results: &RenderedResults) -> Vec<FocusTarget> {
        match self.active {
            Tab::Itinerary => {
                let mut targets = Vec::new();
                for (day_index, day) in results.itinerary.days().iter().enumerate() {
                    targets.push(FocusTarget::Day {
                        day_number: day.day_number,
                        day_index,
                    });
                    if !self.is_collapsed(day_index) {
                        targets.extend((0..day.cards.len()).map(|card_index| {
                            FocusTarget::Activity {
                                day_index,
                                card_index,
                            }
                        }));
                    }
                }
                targets
            }
            Tab::Restaurants => (0..results.restaurants.cards().len())
                .map(FocusTarget::Restaurant)
                .collect(),
            Tab::Tips => Vec::new(),
        }
    }

    /// The focused item, if the active tab has any
    pub fn focused(&self, results: &RenderedResults) -> Option<FocusTarget> {
        let targets = self.focus_targets(results);
        targets.get(self.cursor.min(targets.len().saturating_sub(1))).copied()
    }

    /// Moves focus down, stopping at the last item
    pub fn focus_next(&mut self, results: &RenderedResults) {
        let count = self.focus_targets(results).len();
        if count > 0 {
            self.cursor = (self.cursor + 1).min(count - 1);
        }
    }

    /// Moves focus up, stopping at the first item
    pub fn focus_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keeps the cursor inside the current focus list
    pub fn clamp_cursor(&mut self, results: &RenderedResults) {
        let count = self.focus_targets(results).len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Activity, DayPlan, ItineraryResponse, TripRequest};
    use crate::render::{render_fallback, render_results};

    fn tokyo() -> RenderedResults {
        render_fallback(&TripRequest {
            destination: "Tokyo".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_initial_tab_is_itinerary() {
        let view = ResultsView::new();
        assert_eq!(view.active(), Tab::Itinerary);
    }

    #[test]
    fn test_switch_to_is_exclusive() {
        let mut view = ResultsView::new();
        let change = view.switch_to(Tab::Tips);
        assert_eq!(change, TabChange { from: Tab::Itinerary, to: Tab::Tips });
        assert_eq!(view.active(), Tab::Tips);

        view.switch_to(Tab::Restaurants);
        assert_eq!(view.active(), Tab::Restaurants);
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(Tab::Itinerary.next(), Tab::Restaurants);
        assert_eq!(Tab::Tips.next(), Tab::Itinerary);
        assert_eq!(Tab::Itinerary.prev(), Tab::Tips);
    }

    #[test]
    fn test_days_start_expanded() {
        let view = ResultsView::new();
        assert!(!view.is_collapsed(0));
        assert_eq!(view.glyph(0), EXPANDED_GLYPH);
    }

    #[test]
    fn test_toggle_day_flips_glyph() {
        let mut view = ResultsView::new();
        assert_eq!(view.toggle_day(1), COLLAPSED_GLYPH);
        assert!(view.is_collapsed(1));
        assert!(!view.is_collapsed(0));
        assert_eq!(view.toggle_day(1), EXPANDED_GLYPH);
        assert!(!view.is_collapsed(1));
    }

    #[test]
    fn test_focus_targets_skip_collapsed_cards() {
        let results = tokyo();
        let mut view = ResultsView::new();

        // 3 day headers + 5 activities
        assert_eq!(view.focus_targets(&results).len(), 8);

        view.toggle_day(0);
        let targets = view.focus_targets(&results);
        assert_eq!(targets.len(), 6);
        assert_eq!(
            targets[1],
            FocusTarget::Day {
                day_number: 2,
                day_index: 1
            }
        );
    }

    #[test]
    fn test_focus_moves_within_bounds() {
        let results = tokyo();
        let mut view = ResultsView::new();
        view.switch_to(Tab::Restaurants);

        view.focus_prev();
        assert_eq!(view.cursor(), 0);
        for _ in 0..10 {
            view.focus_next(&results);
        }
        assert_eq!(view.cursor(), 2);
        assert_eq!(view.focused(&results), Some(FocusTarget::Restaurant(2)));
    }

    #[test]
    fn test_tips_tab_has_no_focus() {
        let results = tokyo();
        let mut view = ResultsView::new();
        view.switch_to(Tab::Tips);
        assert_eq!(view.focused(&results), None);
    }

    #[test]
    fn test_switching_tab_resets_cursor() {
        let results = tokyo();
        let mut view = ResultsView::new();
        view.focus_next(&results);
        view.switch_to(Tab::Restaurants);
        assert_eq!(view.cursor(), 0);
    }

    #[test]
    fn test_clamp_cursor_after_collapse() {
        let results = tokyo();
        let mut view = ResultsView::new();
        for _ in 0..7 {
            view.focus_next(&results);
        }
        assert_eq!(view.cursor(), 7);
        view.toggle_day(0);
        view.toggle_day(1);
        view.clamp_cursor(&results);
        assert_eq!(view.cursor(), 3);
    }

    #[test]
    fn test_repeated_day_numbers_collapse_independently() {
        let day = |day_number: Option<u32>, name: &str| DayPlan {
            day_number,
            activities: vec![Activity {
                name: name.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let response = ItineraryResponse {
            itinerary: vec![day(Some(2), "Castle"), day(None, "Harbour")],
            ..Default::default()
        };
        let results = render_results(&response, &TripRequest::default());
        let numbers: Vec<u32> = results.itinerary.days().iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, [2, 2]);

        let mut view = ResultsView::new();
        assert_eq!(view.focus_targets(&results).len(), 4);

        view.toggle_day(0);

        assert!(view.is_collapsed(0));
        assert!(!view.is_collapsed(1));
        assert_eq!(view.glyph(1), EXPANDED_GLYPH);
        assert_eq!(
            view.focus_targets(&results),
            [
                FocusTarget::Day { day_number: 2, day_index: 0 },
                FocusTarget::Day { day_number: 2, day_index: 1 },
                FocusTarget::Activity { day_index: 1, card_index: 0 },
            ]
        );
    }
}
