//! Result rendering
//!
//! Turns an itinerary response into three independent view fragments: the
//! day-by-day itinerary, the aggregated restaurant list and the tips list.
//! Everything here is a plain view-model; the terminal drawing lives in `ui`.

pub mod card;

pub use card::{
    activity_card, restaurant_card, Card, CardSection, MetaItem, PhotoCarousel, ReviewView,
};

use crate::data::fallback::{self, format_date};
use crate::data::{DayPlan, ItineraryResponse, Restaurant, Tip, TripRequest};

/// Icons assigned to tips by position, cycling
pub const TIP_ICONS: [&str; 8] = [
    "\u{1F4A1}",         // 💡
    "\u{1F3AF}",         // 🎯
    "\u{26A0}\u{FE0F}",  // ⚠️
    "\u{1F31F}",         // 🌟
    "\u{1F4CC}",         // 📌
    "\u{1F514}",         // 🔔
    "\u{2728}",          // ✨
    "\u{1F4B0}",         // 💰
];

/// Heading of the restaurant fragment
pub const RESTAURANTS_HEADING: &str = "Recommended Restaurants";

/// Heading of the tips fragment
pub const TIPS_HEADING: &str = "Tips & Local Insights";

/// Title and subtitle of the results screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsHeader {
    pub title: String,
    pub subtitle: String,
}

/// One collapsible day of the itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct DaySection {
    pub day_number: u32,
    pub label: String,
    pub cards: Vec<Card>,
}

/// The day-by-day itinerary view
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryFragment {
    Empty,
    Days(Vec<DaySection>),
}

impl ItineraryFragment {
    /// Placeholder shown instead of an empty container
    pub fn placeholder() -> &'static str {
        "No itinerary data available."
    }

    /// Day sections, empty for the placeholder
    pub fn days(&self) -> &[DaySection] {
        match self {
            ItineraryFragment::Empty => &[],
            ItineraryFragment::Days(days) => days,
        }
    }

    /// Mutable card lookup by day index and card position
    pub fn card_mut(&mut self, day_index: usize, card_index: usize) -> Option<&mut Card> {
        match self {
            ItineraryFragment::Empty => None,
            ItineraryFragment::Days(days) => days.get_mut(day_index)?.cards.get_mut(card_index),
        }
    }
}

/// The aggregated restaurant view
#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantFragment {
    Empty,
    List {
        heading: &'static str,
        cards: Vec<Card>,
    },
}

impl RestaurantFragment {
    /// Placeholder shown when no day carries restaurants
    pub fn placeholder() -> &'static str {
        "No restaurant recommendations available."
    }

    /// Restaurant cards, empty for the placeholder
    pub fn cards(&self) -> &[Card] {
        match self {
            RestaurantFragment::Empty => &[],
            RestaurantFragment::List { cards, .. } => cards,
        }
    }

    /// Mutable card lookup
    pub fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        match self {
            RestaurantFragment::Empty => None,
            RestaurantFragment::List { cards, .. } => cards.get_mut(index),
        }
    }
}

/// A tip ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipView {
    pub icon: &'static str,
    pub text: String,
}

/// The tips view
#[derive(Debug, Clone, PartialEq)]
pub enum TipsFragment {
    Empty,
    List {
        heading: &'static str,
        tips: Vec<TipView>,
    },
}

impl TipsFragment {
    /// Placeholder shown when there are no tips
    pub fn placeholder() -> &'static str {
        "No tips available."
    }
}

/// Everything the results screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub header: ResultsHeader,
    pub itinerary: ItineraryFragment,
    pub restaurants: RestaurantFragment,
    pub tips: TipsFragment,
    /// Rendered from the bundled dataset rather than the service
    pub demo: bool,
}

/// Icon for the tip at `index`, cycling through the palette
pub fn tip_icon(index: usize) -> &'static str {
    TIP_ICONS[index % TIP_ICONS.len()]
}

/// Builds the view for the tip at `index`; tips without text yield `None`
pub fn tip_view(index: usize, tip: &Tip) -> Option<TipView> {
    tip.text().map(|text| TipView {
        icon: tip_icon(index),
        text: text.to_string(),
    })
}

/// All restaurants across all days, day-major
pub fn flatten_restaurants(days: &[DayPlan]) -> Vec<&Restaurant> {
    days.iter().flat_map(|day| day.restaurants.iter()).collect()
}

/// Renders the itinerary fragment
pub fn render_itinerary(days: &[DayPlan]) -> ItineraryFragment {
    if days.is_empty() {
        return ItineraryFragment::Empty;
    }

    ItineraryFragment::Days(
        days.iter()
            .enumerate()
            .map(|(position, day)| {
                let day_number = day.number_or(position);
                DaySection {
                    day_number,
                    label: day
                        .date
                        .clone()
                        .unwrap_or_else(|| format!("Day {}", day_number)),
                    cards: day.activities.iter().map(activity_card).collect(),
                }
            })
            .collect(),
    )
}

/// Renders the restaurant fragment
pub fn render_restaurants(days: &[DayPlan]) -> RestaurantFragment {
    let restaurants = flatten_restaurants(days);
    if restaurants.is_empty() {
        return RestaurantFragment::Empty;
    }

    RestaurantFragment::List {
        heading: RESTAURANTS_HEADING,
        cards: restaurants.into_iter().map(restaurant_card).collect(),
    }
}

/// Renders the tips fragment
pub fn render_tips(tips: &[Tip]) -> TipsFragment {
    let views: Vec<TipView> = tips
        .iter()
        .enumerate()
        .filter_map(|(index, tip)| tip_view(index, tip))
        .collect();
    if views.is_empty() {
        return TipsFragment::Empty;
    }

    TipsFragment::List {
        heading: TIPS_HEADING,
        tips: views,
    }
}

/// Builds the results header
///
/// The city falls back to the requested destination, and the subtitle shows
/// the date range when both dates were given, otherwise the trip length.
pub fn render_header(response: &ItineraryResponse, request: &TripRequest) -> ResultsHeader {
    let city = response
        .city
        .as_deref()
        .unwrap_or(request.destination.as_str());

    let subtitle = match (request.check_in, request.check_out) {
        (Some(start), Some(end)) => format!("{} - {}", format_date(start), format_date(end)),
        _ => {
            let days = response
                .duration_days
                .filter(|d| *d > 0)
                .unwrap_or(response.itinerary.len() as u32);
            format!("{} day trip", days)
        }
    };

    ResultsHeader {
        title: format!("Your {} Adventure", city),
        subtitle,
    }
}

/// Renders a service response into all three fragments
pub fn render_results(response: &ItineraryResponse, request: &TripRequest) -> RenderedResults {
    RenderedResults {
        header: render_header(response, request),
        itinerary: render_itinerary(&response.itinerary),
        restaurants: render_restaurants(&response.itinerary),
        tips: render_tips(&response.tips),
        demo: false,
    }
}

/// Renders the bundled demo dataset for the requested city
///
/// The title names the requested destination even when another city's guide
/// stands in for it.
pub fn render_fallback(request: &TripRequest) -> RenderedResults {
    let mut response = fallback::fallback_itinerary(request);
    let destination = request.destination.trim();
    if !destination.is_empty() {
        response.city = Some(destination.to_string());
    }
    RenderedResults {
        demo: true,
        ..render_results(&response, request)
    }
}
