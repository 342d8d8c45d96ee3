//! Trip form state and step navigation
//!
//! The planning form is a linear six-step wizard. `FormDraft` holds the raw
//! selections as the user enters them and `Wizard` tracks which step is active,
//! refusing to leave the first step until a destination has been entered.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{GroupType, TravelStyle, TripRequest};

/// Number of steps in the planning wizard
pub const STEP_COUNT: u8 = 6;

/// Interest tags offered on step 3 as (value, label)
pub const INTEREST_OPTIONS: [(&str, &str); 8] = [
    ("history", "History & Heritage"),
    ("art", "Art & Museums"),
    ("food", "Food & Dining"),
    ("nature", "Nature & Parks"),
    ("nightlife", "Nightlife"),
    ("shopping", "Shopping"),
    ("adventure", "Adventure & Sports"),
    ("relaxation", "Relaxation & Wellness"),
];

/// Accessibility tags offered on step 6 as (value, label)
pub const ACCESSIBILITY_OPTIONS: [(&str, &str); 5] = [
    ("wheelchair", "Wheelchair accessible"),
    ("limited-mobility", "Limited walking"),
    ("visual", "Visual impairment"),
    ("hearing", "Hearing impairment"),
    ("dietary", "Dietary restrictions"),
];

/// Errors that block a forward step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Step 1 was left without a destination
    #[error("Please enter a city name")]
    MissingDestination,
}

/// Description of a step transition for the view layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepChange {
    /// Step whose view should be hidden
    pub from: u8,
    /// Step whose view should be shown
    pub to: u8,
    /// Progress after the transition, in percent
    pub progress: f64,
}

/// Raw form selections, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub interests: BTreeSet<String>,
    pub travel_style: Option<TravelStyle>,
    pub group_type: Option<GroupType>,
    pub accessibility: BTreeSet<String>,
}

impl FormDraft {
    /// Flips an interest tag on or off
    pub fn toggle_interest(&mut self, tag: &str) {
        toggle(&mut self.interests, tag);
    }

    /// Flips an accessibility tag on or off
    pub fn toggle_accessibility(&mut self, tag: &str) {
        toggle(&mut self.accessibility, tag);
    }

    /// Builds the request sent to the service
    ///
    /// Blank or unreadable dates become `None`; unset radio groups fall back to
    /// `cultural` and `solo`.
    pub fn materialize(&self) -> TripRequest {
        TripRequest {
            destination: self.destination.trim().to_string(),
            check_in: parse_date("check-in", &self.check_in),
            check_out: parse_date("check-out", &self.check_out),
            interests: self.interests.clone(),
            travel_style: self.travel_style.unwrap_or_default(),
            group_type: self.group_type.unwrap_or_default(),
            accessibility_needs: self.accessibility.clone(),
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, tag: &str) {
    if !set.remove(tag) {
        set.insert(tag.to_string());
    }
}

fn parse_date(field: &str, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(field, value = raw, error = %err, "Ignoring unreadable date");
            None
        }
    }
}

/// Linear step navigator over the planning form
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    active: u8,
    /// Selections entered so far
    pub draft: FormDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Creates a wizard on step 1 with an empty draft
    pub fn new() -> Self {
        Self {
            active: 1,
            draft: FormDraft::default(),
        }
    }

    /// Currently active step (1-based)
    pub fn active(&self) -> u8 {
        self.active
    }

    /// Whether the active step is the last one
    pub fn is_last_step(&self) -> bool {
        self.active == STEP_COUNT
    }

    /// Completion in percent: active / STEP_COUNT * 100
    pub fn progress(&self) -> f64 {
        f64::from(self.active) / f64::from(STEP_COUNT) * 100.0
    }

    /// Moves forward to `target`, validating the destination when leaving step 1
    pub fn advance(&mut self, target: u8) -> Result<StepChange, ValidationError> {
        if self.active == 1 {
            let destination = self.draft.destination.trim();
            if destination.is_empty() {
                return Err(ValidationError::MissingDestination);
            }
            self.draft.destination = destination.to_string();
        }
        Ok(self.go_to(target))
    }

    /// Moves back to `target`; always allowed
    pub fn retreat(&mut self, target: u8) -> StepChange {
        self.go_to(target)
    }

    /// Advances to the following step, if any
    pub fn next(&mut self) -> Result<Option<StepChange>, ValidationError> {
        if self.is_last_step() {
            return Ok(None);
        }
        self.advance(self.active + 1).map(Some)
    }

    /// Returns to the preceding step, if any
    pub fn previous(&mut self) -> Option<StepChange> {
        (self.active > 1).then(|| self.retreat(self.active - 1))
    }

    /// Returns to step 1 with an empty draft
    pub fn reset(&mut self) -> StepChange {
        let from = self.active;
        *self = Self::new();
        StepChange {
            from,
            to: 1,
            progress: self.progress(),
        }
    }

    fn go_to(&mut self, target: u8) -> StepChange {
        let from = self.active;
        self.active = target.clamp(1, STEP_COUNT);
        tracing::debug!(from, to = self.active, "Wizard step changed");
        StepChange {
            from,
            to: self.active,
            progress: self.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_with(destination: &str) -> Wizard {
        let mut wizard = Wizard::new();
        wizard.draft.destination = destination.to_string();
        wizard
    }

    #[test]
    fn test_initial_state() {
        let wizard = Wizard::new();
        assert_eq!(wizard.active(), 1);
        assert_eq!(wizard.draft, FormDraft::default());
        assert!((wizard.progress() - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_from_step_one_requires_destination() {
        for blank in ["", "   ", "\t\n"] {
            let mut wizard = wizard_with(blank);
            let before = wizard.progress();

            let result = wizard.advance(2);

            assert_eq!(result, Err(ValidationError::MissingDestination));
            assert_eq!(wizard.active(), 1);
            assert_eq!(wizard.progress(), before);
        }
    }

    #[test]
    fn test_advance_with_destination_trims_and_moves() {
        let mut wizard = wizard_with("  Rome ");

        let change = wizard.advance(2).unwrap();

        assert_eq!(change.from, 1);
        assert_eq!(change.to, 2);
        assert!((change.progress - 2.0 / 6.0 * 100.0).abs() < 1e-9);
        assert_eq!(wizard.draft.destination, "Rome");
    }

    #[test]
    fn test_validation_error_message() {
        assert_eq!(
            ValidationError::MissingDestination.to_string(),
            "Please enter a city name"
        );
    }

    #[test]
    fn test_advance_past_step_one_skips_validation() {
        let mut wizard = wizard_with("Rome");
        wizard.advance(3).unwrap();
        wizard.draft.destination.clear();

        assert!(wizard.advance(4).is_ok());
        assert_eq!(wizard.active(), 4);
    }

    #[test]
    fn test_retreat_always_allowed() {
        let mut wizard = wizard_with("Rome");
        wizard.advance(5).unwrap();

        let change = wizard.retreat(1);

        assert_eq!(change.from, 5);
        assert_eq!(change.to, 1);
        assert_eq!(wizard.active(), 1);
    }

    #[test]
    fn test_targets_are_clamped() {
        let mut wizard = wizard_with("Rome");
        assert_eq!(wizard.advance(42).unwrap().to, STEP_COUNT);
        assert_eq!(wizard.retreat(0).to, 1);
    }

    #[test]
    fn test_progress_at_last_step_is_full() {
        let mut wizard = wizard_with("Rome");
        wizard.advance(STEP_COUNT).unwrap();
        assert!((wizard.progress() - 100.0).abs() < 1e-9);
        assert!(wizard.is_last_step());
        assert_eq!(wizard.next(), Ok(None));
    }

    #[test]
    fn test_next_and_previous() {
        let mut wizard = wizard_with("Rome");
        assert_eq!(wizard.previous(), None);
        assert_eq!(wizard.next().unwrap().map(|c| c.to), Some(2));
        assert_eq!(wizard.previous().map(|c| c.to), Some(1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wizard = wizard_with("Rome");
        wizard.draft.toggle_interest("food");
        wizard.draft.travel_style = Some(TravelStyle::Luxury);
        wizard.advance(4).unwrap();

        let change = wizard.reset();

        assert_eq!(change.from, 4);
        assert_eq!(change.to, 1);
        assert_eq!(wizard, Wizard::new());
    }

    #[test]
    fn test_toggle_tags() {
        let mut draft = FormDraft::default();
        draft.toggle_interest("art");
        draft.toggle_interest("food");
        draft.toggle_interest("art");
        draft.toggle_accessibility("wheelchair");

        assert_eq!(draft.interests.iter().collect::<Vec<_>>(), vec!["food"]);
        assert!(draft.accessibility.contains("wheelchair"));
    }

    #[test]
    fn test_materialize_applies_defaults() {
        let draft = FormDraft {
            destination: " Rome ".to_string(),
            ..Default::default()
        };

        let request = draft.materialize();

        assert_eq!(request.destination, "Rome");
        assert_eq!(request.check_in, None);
        assert_eq!(request.check_out, None);
        assert_eq!(request.travel_style, TravelStyle::Cultural);
        assert_eq!(request.group_type, GroupType::Solo);
        assert!(request.interests.is_empty());
    }

    #[test]
    fn test_materialize_parses_dates_and_selections() {
        let mut draft = FormDraft {
            destination: "Rome".to_string(),
            check_in: "2025-06-01".to_string(),
            check_out: "not a date".to_string(),
            travel_style: Some(TravelStyle::Budget),
            group_type: Some(GroupType::Couple),
            ..Default::default()
        };
        draft.toggle_accessibility("dietary");

        let request = draft.materialize();

        assert_eq!(request.check_in, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(request.check_out, None);
        assert_eq!(request.travel_style, TravelStyle::Budget);
        assert_eq!(request.group_type, GroupType::Couple);
        assert!(request.accessibility_needs.contains("dietary"));
    }

    #[test]
    fn test_option_catalogs() {
        assert_eq!(INTEREST_OPTIONS.len(), 8);
        assert_eq!(ACCESSIBILITY_OPTIONS.len(), 5);
    }
}
