//! Core data models for Trip Guide
//!
//! This module contains the trip request sent to the itinerary service and the
//! itinerary response it returns, along with the HTTP client and the bundled
//! demo dataset.

pub mod client;
pub mod fallback;
mod lenient;

pub use client::{Endpoint, ItineraryClient, ItineraryError};
pub use fallback::fallback_itinerary;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Preferred pace and flavour of the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    #[default]
    Cultural,
    Adventure,
    Relaxation,
    Luxury,
    Budget,
}

impl TravelStyle {
    /// Every travel style in display order
    pub const ALL: [TravelStyle; 5] = [
        TravelStyle::Cultural,
        TravelStyle::Adventure,
        TravelStyle::Relaxation,
        TravelStyle::Luxury,
        TravelStyle::Budget,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TravelStyle::Cultural => "Cultural",
            TravelStyle::Adventure => "Adventure",
            TravelStyle::Relaxation => "Relaxation",
            TravelStyle::Luxury => "Luxury",
            TravelStyle::Budget => "Budget",
        }
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    Solo,
    Couple,
    Family,
    Friends,
    Business,
}

impl GroupType {
    /// Every group type in display order
    pub const ALL: [GroupType; 5] = [
        GroupType::Solo,
        GroupType::Couple,
        GroupType::Family,
        GroupType::Friends,
        GroupType::Business,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            GroupType::Solo => "Solo",
            GroupType::Couple => "Couple",
            GroupType::Family => "Family",
            GroupType::Friends => "Friends",
            GroupType::Business => "Business",
        }
    }
}

/// A complete trip request as sent to `/api/generate-itinerary`
///
/// Field names on the wire follow the service contract (`city`, `start_date`,
/// `end_date`, ...). Absent dates serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination city (required, non-empty)
    #[serde(rename = "city")]
    pub destination: String,
    /// Arrival date
    #[serde(rename = "start_date")]
    pub check_in: Option<NaiveDate>,
    /// Departure date
    #[serde(rename = "end_date")]
    pub check_out: Option<NaiveDate>,
    /// Interest tags
    pub interests: BTreeSet<String>,
    /// Travel style
    pub travel_style: TravelStyle,
    /// Group type
    pub group_type: GroupType,
    /// Accessibility needs tags
    pub accessibility_needs: BTreeSet<String>,
}

/// The structured itinerary returned by the service
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ItineraryResponse {
    /// City the itinerary was generated for
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: Option<String>,
    /// Trip length in days
    #[serde(default, deserialize_with = "lenient::count")]
    pub duration_days: Option<u32>,
    /// Day plans in trip order
    #[serde(default, deserialize_with = "lenient::list")]
    pub itinerary: Vec<DayPlan>,
    /// City tips
    #[serde(default, deserialize_with = "lenient::list")]
    pub tips: Vec<Tip>,
    /// Number of attractions the service found
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_attractions: Option<u32>,
    /// Number of restaurants the service found
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_restaurants: Option<u32>,
}

/// A single day of the itinerary
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DayPlan {
    /// 1-based day number, if the service sent one
    #[serde(default, rename = "day", deserialize_with = "lenient::count")]
    pub day_number: Option<u32>,
    /// Display label for the day (usually a date)
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    /// Activities in visiting order
    #[serde(default, deserialize_with = "lenient::list")]
    pub activities: Vec<Activity>,
    /// Restaurants recommended for this day
    #[serde(default, deserialize_with = "lenient::list")]
    pub restaurants: Vec<Restaurant>,
}

impl DayPlan {
    /// Day number, falling back to the 1-based position in the itinerary
    pub fn number_or(&self, position: usize) -> u32 {
        self.day_number
            .filter(|n| *n > 0)
            .unwrap_or_else(|| u32::try_from(position + 1).unwrap_or(u32::MAX))
    }
}

/// An attraction or activity on a day plan
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: Option<f64>,
    /// How to get there, e.g. "Metro line"
    #[serde(default, deserialize_with = "lenient::text")]
    pub transport: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub opening_hours: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub reviews: Vec<Review>,
    /// Insider tip for the visit
    #[serde(default, deserialize_with = "lenient::text")]
    pub tip: Option<String>,
}

/// A restaurant recommendation
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    /// Price level from 1 (cheap) to 4 (expensive)
    #[serde(default, deserialize_with = "lenient::price_level")]
    pub price_level: Option<u8>,
    /// Preformatted price tier such as `"$$"`
    #[serde(default, rename = "price", deserialize_with = "lenient::text")]
    pub price_tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub opening_hours: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tip: Option<String>,
}

/// A visitor review attached to an activity or restaurant
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: Option<String>,
    /// Alternate field some responses use for the review body
    #[serde(default, deserialize_with = "lenient::text")]
    pub review: Option<String>,
    /// Relative time description, e.g. "2 weeks ago"
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

/// A city tip, either a bare string or an object carrying `text` or `tip`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Tip {
    Text(String),
    Detailed {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        tip: Option<String>,
    },
}

impl Tip {
    /// The tip text, if it carries any non-blank text
    pub fn text(&self) -> Option<&str> {
        let raw = match self {
            Tip::Text(text) => Some(text.as_str()),
            Tip::Detailed { text, tip } => text
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .or(tip.as_deref()),
        };
        raw.map(str::trim).filter(|t| !t.is_empty())
    }
}
