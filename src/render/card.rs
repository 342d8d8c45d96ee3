//! Card view-models for activities and restaurants
//!
//! A card is a title plus an ordered list of optional sections. A section is
//! only produced when the underlying field carries data, so a place with no
//! details renders as a bare title.

use crate::data::{Activity, Restaurant, Review};

/// Maximum opening-hours lines shown on a card
pub const MAX_OPENING_HOURS: usize = 7;

/// Maximum reviews shown on a card
pub const MAX_REVIEWS: usize = 3;

/// Glyph repeated once per price level
pub const PRICE_GLYPH: &str = "$";

/// A rendered activity or restaurant
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    /// Category badge shown next to the title
    pub badge: Option<String>,
    /// Price indicator shown next to the title
    pub price: Option<String>,
    pub sections: Vec<CardSection>,
}

impl Card {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            badge: None,
            price: None,
            sections: Vec::new(),
        }
    }

    /// The photo carousel, if the card has photos
    pub fn photos(&self) -> Option<&PhotoCarousel> {
        self.sections.iter().find_map(|section| match section {
            CardSection::Photos(carousel) => Some(carousel),
            _ => None,
        })
    }

    /// Mutable access to the photo carousel
    pub fn photos_mut(&mut self) -> Option<&mut PhotoCarousel> {
        self.sections.iter_mut().find_map(|section| match section {
            CardSection::Photos(carousel) => Some(carousel),
            _ => None,
        })
    }
}

/// One optional block of a card, in display order
#[derive(Debug, Clone, PartialEq)]
pub enum CardSection {
    Photos(PhotoCarousel),
    Description {
        label: Option<&'static str>,
        text: String,
    },
    Meta(Vec<MetaItem>),
    Contact {
        phone: Option<String>,
        website: Option<String>,
    },
    OpeningHours(Vec<String>),
    Reviews(Vec<ReviewView>),
    Tip(String),
}

/// One entry of a card's meta row
#[derive(Debug, Clone, PartialEq)]
pub enum MetaItem {
    Address(String),
    Duration(String),
    Rating(String),
    Cuisine(String),
    Transport(String),
}

/// A review ready for display, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub author: String,
    pub rating: String,
    pub text: String,
    pub time: Option<String>,
}

/// Circular photo browser over a card's photos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCarousel {
    photos: Vec<String>,
    index: usize,
}

impl PhotoCarousel {
    /// Creates a carousel at the first photo; `None` if there are no photos
    pub fn new(photos: Vec<String>) -> Option<Self> {
        (!photos.is_empty()).then_some(Self { photos, index: 0 })
    }

    /// Index of the photo being shown
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of photos
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Always false; carousels are only built with at least one photo
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// URL of the photo being shown
    pub fn current(&self) -> &str {
        &self.photos[self.index]
    }

    /// Whether prev/next controls are shown
    pub fn has_controls(&self) -> bool {
        self.photos.len() > 1
    }

    /// Moves to the next photo, wrapping to the first
    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.photos.len();
        self.index
    }

    /// Moves to the previous photo, wrapping to the last
    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.photos.len() - 1) % self.photos.len();
        self.index
    }
}

/// Formats a rating; zero or missing ratings are not shown
fn rating_text(rating: Option<f64>) -> Option<String> {
    rating.filter(|r| *r > 0.0).map(|r| r.to_string())
}

fn review_view(review: &Review) -> ReviewView {
    ReviewView {
        author: review
            .author
            .clone()
            .unwrap_or_else(|| "Anonymous".to_string()),
        rating: rating_text(review.rating).unwrap_or_else(|| "N/A".to_string()),
        text: review
            .text
            .clone()
            .or_else(|| review.review.clone())
            .unwrap_or_default(),
        time: review.time.clone(),
    }
}

/// Shared optional-field layout for activities and restaurants
struct Details<'a> {
    photos: &'a [String],
    description: Option<&'a str>,
    description_label: Option<&'static str>,
    meta: Vec<MetaItem>,
    phone: Option<&'a str>,
    website: Option<&'a str>,
    opening_hours: &'a [String],
    reviews: &'a [Review],
    tip: Option<&'a str>,
}

impl Details<'_> {
    fn into_sections(self) -> Vec<CardSection> {
        let mut sections = Vec::new();

        if let Some(carousel) = PhotoCarousel::new(self.photos.to_vec()) {
            sections.push(CardSection::Photos(carousel));
        }
        if let Some(text) = self.description {
            sections.push(CardSection::Description {
                label: self.description_label,
                text: text.to_string(),
            });
        }
        if !self.meta.is_empty() {
            sections.push(CardSection::Meta(self.meta));
        }
        if self.phone.is_some() || self.website.is_some() {
            sections.push(CardSection::Contact {
                phone: self.phone.map(str::to_string),
                website: self.website.map(str::to_string),
            });
        }
        if !self.opening_hours.is_empty() {
            sections.push(CardSection::OpeningHours(
                self.opening_hours
                    .iter()
                    .take(MAX_OPENING_HOURS)
                    .cloned()
                    .collect(),
            ));
        }
        if !self.reviews.is_empty() {
            sections.push(CardSection::Reviews(
                self.reviews.iter().take(MAX_REVIEWS).map(review_view).collect(),
            ));
        }
        if let Some(tip) = self.tip {
            sections.push(CardSection::Tip(tip.to_string()));
        }

        sections
    }
}

/// Builds the card for an activity
pub fn activity_card(activity: &Activity) -> Card {
    let mut meta = Vec::new();
    if let Some(address) = &activity.address {
        meta.push(MetaItem::Address(address.clone()));
    }
    if let Some(duration) = &activity.duration {
        meta.push(MetaItem::Duration(duration.clone()));
    }
    if let Some(rating) = rating_text(activity.rating) {
        meta.push(MetaItem::Rating(rating));
    }
    if let Some(transport) = &activity.transport {
        meta.push(MetaItem::Transport(transport.clone()));
    }

    let mut card = Card::titled(&activity.name);
    card.badge = activity.category.clone();
    card.sections = Details {
        photos: &activity.photos,
        description: activity.description.as_deref(),
        description_label: None,
        meta,
        phone: activity.phone.as_deref(),
        website: activity.website.as_deref(),
        opening_hours: &activity.opening_hours,
        reviews: &activity.reviews,
        tip: activity.tip.as_deref(),
    }
    .into_sections();
    card
}

/// Builds the card for a restaurant
pub fn restaurant_card(restaurant: &Restaurant) -> Card {
    let mut meta = Vec::new();
    if let Some(cuisine) = &restaurant.cuisine {
        meta.push(MetaItem::Cuisine(cuisine.clone()));
    }
    if let Some(address) = &restaurant.address {
        meta.push(MetaItem::Address(address.clone()));
    }
    if let Some(rating) = rating_text(restaurant.rating) {
        meta.push(MetaItem::Rating(rating));
    }

    let mut card = Card::titled(&restaurant.name);
    card.price = restaurant
        .price_level
        .map(|level| PRICE_GLYPH.repeat(usize::from(level)))
        .or_else(|| restaurant.price_tier.clone());
    card.sections = Details {
        photos: &restaurant.photos,
        description: restaurant.description.as_deref(),
        description_label: Some("About"),
        meta,
        phone: restaurant.phone.as_deref(),
        website: restaurant.website.as_deref(),
        opening_hours: &restaurant.opening_hours,
        reviews: &restaurant.reviews,
        tip: restaurant.tip.as_deref(),
    }
    .into_sections();
    card
}
