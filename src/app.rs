//! Application state management for Trip Guide
//!
//! This module contains the main application state, handling keyboard input
//! and the transitions between the welcome screen, the planning form, the
//! loading indicator, the results tabs and the error panel. Handlers never
//! perform I/O; work that needs the network is returned as a [`Command`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::background::Connectivity;
use crate::cli::StartupConfig;
use crate::data::{GroupType, ItineraryError, ItineraryResponse, TravelStyle, TripRequest};
use crate::form::{StepChange, ValidationError, Wizard, ACCESSIBILITY_OPTIONS, INTEREST_OPTIONS};
use crate::render::card::Card;
use crate::render::{render_fallback, render_results, RenderedResults};
use crate::view::{FocusTarget, ResultsView, Tab};

/// Loading message shown while the itinerary request is outstanding
pub const LOADING_MESSAGE: &str = "Fetching real data from Google Places API...";

/// Color theme, kept for the session only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Derives the theme from a `COLORFGBG` value such as `"15;0"`
    ///
    /// The last field is the background color index. Indices 0-6 and 8 are
    /// dark backgrounds; anything else, or no value, means light.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());

        match background {
            Some(0..=6) | Some(8) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Reads the terminal background preference from the environment
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Actions offered by the error panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    Retry,
    StartOver,
}

impl ErrorAction {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorAction::Retry => "Retry",
            ErrorAction::StartOver => "Start Over",
        }
    }
}

/// Full-screen panel shown when the itinerary request fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
    pub actions: [ErrorAction; 2],
    /// Index into `actions` of the highlighted button
    pub selected: usize,
}

impl ErrorPanel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            actions: [ErrorAction::Retry, ErrorAction::StartOver],
            selected: 0,
        }
    }

    pub fn selected_action(&self) -> ErrorAction {
        self.actions[self.selected % self.actions.len()]
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.actions.len();
    }
}

/// The screen currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Entry screen with the start prompt
    Welcome,
    /// The six-step planning form
    Form,
    /// A request is outstanding
    Loading { message: String },
    /// Rendered itinerary, restaurants and tips
    Results,
    /// The request failed
    Error(ErrorPanel),
}

/// Work requested by a key handler
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send the trip request to the itinerary service
    SubmitItinerary(TripRequest),
}

/// Which date field has input focus on the dates step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    #[default]
    CheckIn,
    CheckOut,
}

/// Main application struct managing state and data
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Planning form and its step navigator
    pub wizard: Wizard,
    /// Cursor inside the option list of the active form step
    pub option_cursor: usize,
    /// Focused field on the dates step
    pub date_field: DateField,
    /// Inline validation message on the form
    pub validation_message: Option<String>,
    /// Rendered fragments of the last successful request
    pub results: Option<RenderedResults>,
    /// Tab, collapse and focus state of the results screen
    pub view: ResultsView,
    /// Connectivity badge
    pub connectivity: Connectivity,
    pub theme: Theme,
    /// Set while an itinerary request is outstanding
    pub in_flight: bool,
    /// Request sent by the last submission, re-sent by Retry
    pub last_request: Option<TripRequest>,
    /// Render from the bundled dataset instead of calling the service
    pub demo: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
}

impl App {
    /// Creates a new App on the welcome screen
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            wizard: Wizard::new(),
            option_cursor: 0,
            date_field: DateField::default(),
            validation_message: None,
            results: None,
            view: ResultsView::new(),
            connectivity: Connectivity::default(),
            theme: Theme::detect(),
            in_flight: false,
            last_request: None,
            demo: false,
            should_quit: false,
            show_help: false,
        }
    }

    /// Creates a new App instance with the given startup configuration.
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        let mut app = Self::new();
        app.demo = config.demo;
        app
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Returns
    /// A [`Command`] when the key asks for network work, `None` otherwise.
    ///
    /// # Key Bindings
    /// - `Ctrl+C`: Quit from anywhere
    /// - `Enter`: Start planning / next step / submit / activate
    /// - `Esc`: Previous step; on step 1 cancel back to the welcome screen
    /// - `Tab`/`Shift+Tab` (results): Switch tabs
    /// - `↑/k`, `↓/j` (results): Move focus
    /// - `Space` (results): Collapse or expand the focused day
    /// - `[` / `]` (results): Previous / next photo on the focused card
    /// - `r` / `s` (error panel): Retry / Start over
    /// - `t`: Toggle theme, `?`: Toggle help, `q`: Quit (outside text entry)
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Command> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return None;
        }

        if !self.is_text_entry() {
            match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return None;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return None;
                }
                KeyCode::Char('t') => {
                    self.toggle_theme();
                    return None;
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Welcome => {
                match key_event.code {
                    KeyCode::Enter => self.screen = Screen::Form,
                    KeyCode::Esc => self.should_quit = true,
                    _ => {}
                }
                None
            }
            Screen::Form => self.handle_form_key(key_event),
            // Input is frozen until the request settles
            Screen::Loading { .. } => None,
            Screen::Results => {
                self.handle_results_key(key_event);
                None
            }
            Screen::Error(_) => self.handle_error_key(key_event),
        }
    }

    /// Whether typed characters go into a text field
    pub fn is_text_entry(&self) -> bool {
        self.screen == Screen::Form && matches!(self.wizard.active(), 1 | 2)
    }

    fn handle_form_key(&mut self, key_event: KeyEvent) -> Option<Command> {
        match key_event.code {
            KeyCode::Enter => {
                if self.wizard.is_last_step() {
                    return self.begin_submission();
                }
                self.next_step();
            }
            KeyCode::Esc => {
                if self.wizard.previous().is_some() {
                    self.on_step_change();
                } else {
                    self.cancel_form();
                }
            }
            _ => match self.wizard.active() {
                1 => self.edit_text(key_event.code),
                2 => match key_event.code {
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        self.date_field = match self.date_field {
                            DateField::CheckIn => DateField::CheckOut,
                            DateField::CheckOut => DateField::CheckIn,
                        };
                    }
                    code => self.edit_text(code),
                },
                _ => self.handle_option_key(key_event.code),
            },
        }
        None
    }

    /// Applies a character or backspace to the focused text field
    fn edit_text(&mut self, code: KeyCode) {
        let field = match (self.wizard.active(), self.date_field) {
            (1, _) => &mut self.wizard.draft.destination,
            (2, DateField::CheckIn) => &mut self.wizard.draft.check_in,
            (2, DateField::CheckOut) => &mut self.wizard.draft.check_out,
            _ => return,
        };
        match code {
            KeyCode::Char(c) => {
                field.push(c);
                self.validation_message = None;
            }
            KeyCode::Backspace => {
                field.pop();
            }
            _ => {}
        }
    }

    /// Number of selectable options on the active step
    pub fn option_count(&self) -> usize {
        match self.wizard.active() {
            3 => INTEREST_OPTIONS.len(),
            4 => TravelStyle::ALL.len(),
            5 => GroupType::ALL.len(),
            6 => ACCESSIBILITY_OPTIONS.len(),
            _ => 0,
        }
    }

    fn handle_option_key(&mut self, code: KeyCode) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.option_cursor = (self.option_cursor + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.option_cursor = (self.option_cursor + 1) % count;
            }
            KeyCode::Char(' ') => self.select_option(),
            _ => {}
        }
    }

    /// Toggles a tag or picks a radio value at the option cursor
    fn select_option(&mut self) {
        let cursor = self.option_cursor;
        let step = self.wizard.active();
        let draft = &mut self.wizard.draft;
        match step {
            3 => {
                if let Some((tag, _)) = INTEREST_OPTIONS.get(cursor) {
                    draft.toggle_interest(tag);
                }
            }
            4 => draft.travel_style = TravelStyle::ALL.get(cursor).copied(),
            5 => draft.group_type = GroupType::ALL.get(cursor).copied(),
            6 => {
                if let Some((tag, _)) = ACCESSIBILITY_OPTIONS.get(cursor) {
                    draft.toggle_accessibility(tag);
                }
            }
            _ => {}
        }
    }

    /// Advances the form, showing the validation message on failure
    pub fn next_step(&mut self) -> Option<StepChange> {
        match self.wizard.next() {
            Ok(change) => {
                if change.is_some() {
                    self.on_step_change();
                }
                change
            }
            Err(err) => {
                self.validation_message = Some(err.to_string());
                None
            }
        }
    }

    fn on_step_change(&mut self) {
        self.option_cursor = 0;
        self.date_field = DateField::CheckIn;
        self.validation_message = None;
    }

    fn cancel_form(&mut self) {
        self.wizard.reset();
        self.on_step_change();
        self.screen = Screen::Welcome;
    }

    /// Materializes the form and starts a request
    ///
    /// Returns `None` while another request is outstanding. In demo mode the
    /// bundled dataset is rendered immediately and no command is issued.
    pub fn begin_submission(&mut self) -> Option<Command> {
        if self.in_flight {
            tracing::debug!("Submission ignored; request already in flight");
            return None;
        }

        let request = self.wizard.draft.materialize();
        if request.destination.is_empty() {
            self.validation_message = Some(ValidationError::MissingDestination.to_string());
            return None;
        }

        tracing::info!(city = %request.destination, demo = self.demo, "Submitting trip request");
        self.last_request = Some(request.clone());

        if self.demo {
            self.show_results(render_fallback(&request));
            return None;
        }

        self.in_flight = true;
        self.screen = Screen::Loading {
            message: LOADING_MESSAGE.to_string(),
        };
        Some(Command::SubmitItinerary(request))
    }

    /// Applies the settled itinerary request
    ///
    /// Success renders all three fragments; failure shows only the error panel.
    pub fn apply_itinerary(&mut self, result: Result<ItineraryResponse, ItineraryError>) {
        if !self.in_flight {
            tracing::debug!("Ignoring itinerary result with no request in flight");
            return;
        }
        self.in_flight = false;

        match result {
            Ok(response) => {
                let request = self.last_request.clone().unwrap_or_default();
                let rendered = render_results(&response, &request);
                tracing::info!(
                    city = %request.destination,
                    days = rendered.itinerary.days().len(),
                    restaurants = rendered.restaurants.cards().len(),
                    "Itinerary rendered"
                );
                self.show_results(rendered);
            }
            Err(err) => {
                self.results = None;
                self.screen = Screen::Error(ErrorPanel::new(err.user_message()));
            }
        }
    }

    fn show_results(&mut self, results: RenderedResults) {
        self.results = Some(results);
        self.view = ResultsView::new();
        self.screen = Screen::Results;
    }

    /// Re-sends the last request, subject to the busy guard
    pub fn retry(&mut self) -> Option<Command> {
        if self.in_flight {
            return None;
        }
        let request = self.last_request.clone()?;
        tracing::info!(city = %request.destination, "Retrying trip request");

        if self.demo {
            self.show_results(render_fallback(&request));
            return None;
        }

        self.in_flight = true;
        self.screen = Screen::Loading {
            message: LOADING_MESSAGE.to_string(),
        };
        Some(Command::SubmitItinerary(request))
    }

    /// Clears the form and results and returns to the welcome screen
    pub fn start_over(&mut self) {
        self.wizard.reset();
        self.on_step_change();
        self.results = None;
        self.view = ResultsView::new();
        self.last_request = None;
        self.screen = Screen::Welcome;
    }

    /// Updates the connectivity badge; never changes the screen
    pub fn apply_health(&mut self, status: Connectivity) {
        if self.connectivity != status {
            tracing::info!(from = self.connectivity.label(), to = status.label(), "Connectivity changed");
        }
        self.connectivity = status;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    fn handle_error_key(&mut self, key_event: KeyEvent) -> Option<Command> {
        let Screen::Error(panel) = &mut self.screen else {
            return None;
        };
        match key_event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                panel.select_next();
                None
            }
            KeyCode::Enter => match panel.selected_action() {
                ErrorAction::Retry => self.retry(),
                ErrorAction::StartOver => {
                    self.start_over();
                    None
                }
            },
            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('s') | KeyCode::Esc => {
                self.start_over();
                None
            }
            _ => None,
        }
    }

    fn handle_results_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.view.switch_to(self.view.active().next());
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.view.switch_to(self.view.active().prev());
            }
            KeyCode::Char('1') => {
                self.view.switch_to(Tab::Itinerary);
            }
            KeyCode::Char('2') => {
                self.view.switch_to(Tab::Restaurants);
            }
            KeyCode::Char('3') => {
                self.view.switch_to(Tab::Tips);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(results) = &self.results {
                    self.view.focus_next(results);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.view.focus_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_focused_day(),
            KeyCode::Char(']') => {
                self.next_photo();
            }
            KeyCode::Char('[') => {
                self.prev_photo();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.start_over(),
            _ => {}
        }
    }

    /// Collapses or expands the focused day section
    pub fn toggle_focused_day(&mut self) {
        let Some(results) = &self.results else {
            return;
        };
        if let Some(FocusTarget::Day { day_index, .. }) = self.view.focused(results) {
            self.view.toggle_day(day_index);
            self.view.clamp_cursor(results);
        }
    }

    /// The card holding focus on the results screen, if any
    pub fn focused_card_mut(&mut self) -> Option<&mut Card> {
        let results = self.results.as_mut()?;
        match self.view.focused(results)? {
            FocusTarget::Activity {
                day_index,
                card_index,
            } => results.itinerary.card_mut(day_index, card_index),
            FocusTarget::Restaurant(index) => results.restaurants.card_mut(index),
            FocusTarget::Day { .. } => None,
        }
    }

    /// Shows the next photo of the focused card, returning the new index
    pub fn next_photo(&mut self) -> Option<usize> {
        let carousel = self.focused_card_mut()?.photos_mut()?;
        carousel.has_controls().then(|| carousel.next())
    }

    /// Shows the previous photo of the focused card, returning the new index
    pub fn prev_photo(&mut self) -> Option<usize> {
        let carousel = self.focused_card_mut()?.photos_mut()?;
        carousel.has_controls().then(|| carousel.prev())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
