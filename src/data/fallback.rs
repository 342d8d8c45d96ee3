//! Bundled demo dataset
//!
//! A small static guide for a couple of cities, used when the itinerary is
//! rendered in demo mode without contacting the service. Unknown cities fall
//! back to the first city in the dataset.

use chrono::{Duration, NaiveDate};

use super::{Activity, DayPlan, ItineraryResponse, Restaurant, Tip, TripRequest};

/// Trip length used when the request carries no complete date range
const DEFAULT_TRIP_DAYS: u32 = 3;

/// Longest trip the bundled dataset is spread over
pub const MAX_TRIP_DAYS: u32 = 30;

/// A static attraction entry
#[derive(Debug, Clone, Copy)]
struct AttractionSeed {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    location: &'static str,
    duration: &'static str,
    rating: f64,
    transport: &'static str,
    tip: &'static str,
}

/// A static restaurant entry
#[derive(Debug, Clone, Copy)]
struct RestaurantSeed {
    name: &'static str,
    cuisine: &'static str,
    location: &'static str,
    price: &'static str,
    rating: f64,
    specialties: &'static str,
    tip: &'static str,
}

/// Static guide for one city
#[derive(Debug, Clone, Copy)]
struct CityGuide {
    city: &'static str,
    attractions: &'static [AttractionSeed],
    restaurants: &'static [RestaurantSeed],
    tips: &'static [&'static str],
}

/// Static array of bundled city guides; the first entry is the default
static GUIDES: [CityGuide; 2] = [
    CityGuide {
        city: "Tokyo",
        attractions: &[
            AttractionSeed {
                name: "Senso-ji Temple",
                category: "Sightseeing",
                description: "Historic Buddhist temple with a vibrant lantern gate and traditional architecture, surrounded by busy streets selling local snacks and souvenirs.",
                location: "Asakusa, Tokyo",
                duration: "2h",
                rating: 4.7,
                transport: "Metro line",
                tip: "Arrive early to avoid crowds and try the snacks on Nakamise street.",
            },
            AttractionSeed {
                name: "Ueno Park",
                category: "Park",
                description: "Large urban park with museums, a zoo and cherry blossoms in spring.",
                location: "Ueno, Tokyo",
                duration: "3h",
                rating: 4.6,
                transport: "Walking or bike",
                tip: "Rent a bike to explore; late March to early April is cherry blossom season.",
            },
            AttractionSeed {
                name: "Shinjuku District",
                category: "Shopping/Nightlife",
                description: "Bustling commercial and entertainment district with neon signs, shopping malls and lively nightlife.",
                location: "Shinjuku, Tokyo",
                duration: "2.5h",
                rating: 4.5,
                transport: "Metro or walking",
                tip: "Visit at night for the best atmosphere and avoid the rush hours.",
            },
            AttractionSeed {
                name: "Tokyo Tower",
                category: "Sightseeing",
                description: "Iconic 333 meter red tower offering panoramic views of the city.",
                location: "Minato, Tokyo",
                duration: "1.5h",
                rating: 4.4,
                transport: "Metro",
                tip: "Buy tickets in advance; it is less crowded after 6 PM.",
            },
            AttractionSeed {
                name: "Harajuku",
                category: "Shopping/Culture",
                description: "Centre of youth culture with fashion boutiques and quirky shops along Takeshita Street.",
                location: "Harajuku, Tokyo",
                duration: "2h",
                rating: 4.3,
                transport: "Metro",
                tip: "Go on a weekend to see the full energy of the street.",
            },
        ],
        restaurants: &[
            RestaurantSeed {
                name: "Sukiyabashi Jiro",
                cuisine: "Sushi",
                location: "Ginza, Tokyo",
                price: "$$$",
                rating: 4.8,
                specialties: "Omakase sushi with premium ingredients",
                tip: "Reservations are required months in advance.",
            },
            RestaurantSeed {
                name: "Tsukiji Outer Market",
                cuisine: "Japanese/Seafood",
                location: "Tsukiji, Tokyo",
                price: "$",
                rating: 4.6,
                specialties: "Fresh sushi, ramen and street food",
                tip: "Go early in the morning for the freshest seafood.",
            },
            RestaurantSeed {
                name: "Nabezo",
                cuisine: "Japanese Hot Pot",
                location: "Shinjuku, Tokyo",
                price: "$$",
                rating: 4.5,
                specialties: "Wagyu hot pot with vegetables and broths",
                tip: "Great for groups; you cook at the table.",
            },
        ],
        tips: &[
            "Use a Suica or Pasmo card for easy public transport payment",
            "Peak seasons are spring (cherry blossoms) and autumn (fall foliage)",
            "Learn a few basic Japanese phrases",
            "Public restrooms are clean and easy to find",
            "Tipping is not customary in Japan",
            "Buildings are earthquake-proof, but know your hotel's evacuation route",
            "Remove your shoes where temples ask you to",
            "Japanese cuisine follows the seasons; try seasonal dishes",
        ],
    },
    CityGuide {
        city: "Paris",
        attractions: &[
            AttractionSeed {
                name: "Eiffel Tower",
                category: "Sightseeing",
                description: "Iconic iron lattice tower with views from several levels, restaurants and shops.",
                location: "Champ de Mars, Paris",
                duration: "2h",
                rating: 4.8,
                transport: "Metro or walking",
                tip: "Book online to skip the queues; the evening light show is worth staying for.",
            },
            AttractionSeed {
                name: "Louvre Museum",
                category: "Museum",
                description: "The world's largest art museum, home to the Mona Lisa and the Venus de Milo.",
                location: "Rue de Rivoli, Paris",
                duration: "3-4h",
                rating: 4.7,
                transport: "Metro",
                tip: "Wednesday and Friday evenings are less crowded.",
            },
            AttractionSeed {
                name: "Notre-Dame Cathedral",
                category: "Sightseeing",
                description: "Medieval Gothic cathedral on the Ile de la Cite.",
                location: "Ile de la Cite, Paris",
                duration: "1.5h",
                rating: 4.6,
                transport: "Metro",
                tip: "Walk around the whole island for the complete experience.",
            },
            AttractionSeed {
                name: "Latin Quarter",
                category: "Culture/Food",
                description: "Historic district of bookstores, cafes and narrow streets around the Sorbonne.",
                location: "Latin Quarter, Paris",
                duration: "2.5h",
                rating: 4.5,
                transport: "Walking",
                tip: "Explore on foot and skip the peak lunch hours.",
            },
            AttractionSeed {
                name: "Montmartre",
                category: "Culture/Nightlife",
                description: "Hilltop neighbourhood with bohemian charm, the Sacre-Coeur basilica and artistic heritage.",
                location: "Montmartre, Paris",
                duration: "2.5h",
                rating: 4.6,
                transport: "Metro and walking",
                tip: "Walk up early in the morning for fewer tourists.",
            },
        ],
        restaurants: &[
            RestaurantSeed {
                name: "L'Astrance",
                cuisine: "French Fine Dining",
                location: "Passy, Paris",
                price: "$$$",
                rating: 4.8,
                specialties: "Contemporary French cuisine with artistic presentation",
                tip: "Reservation essential.",
            },
            RestaurantSeed {
                name: "Cafe de Flore",
                cuisine: "French Cafe",
                location: "Saint-Germain-des-Pres, Paris",
                price: "$$",
                rating: 4.5,
                specialties: "Coffee, pastries and light meals",
                tip: "Historic cafe since 1887 and a prime people-watching spot.",
            },
            RestaurantSeed {
                name: "Marche Bastille",
                cuisine: "French Market",
                location: "Bastille, Paris",
                price: "$",
                rating: 4.4,
                specialties: "Fresh produce, cheese and local specialties",
                tip: "Open Thursdays and Sundays; great for picnic supplies.",
            },
        ],
        tips: &[
            "Always greet people in French before switching languages",
            "Dinner starts late, typically 8 PM or later",
            "Some public restrooms require coins",
            "A metro pass is cheaper than single tickets",
            "Watch for pickpockets in crowded areas and metro stations",
            "Prices are higher in tourist areas; explore local neighbourhoods",
            "Many museums are free for EU residents under 26",
            "Spring and autumn offer the best weather",
        ],
    },
];

/// Returns the names of the cities in the bundled dataset
pub fn bundled_cities() -> impl Iterator<Item = &'static str> {
    GUIDES.iter().map(|guide| guide.city)
}

/// Looks up the guide for a city, falling back to the default city
fn guide_for(city: &str) -> &'static CityGuide {
    let wanted = city.trim();
    GUIDES
        .iter()
        .find(|guide| guide.city.eq_ignore_ascii_case(wanted))
        .unwrap_or(&GUIDES[0])
}

/// Number of days covered by the request, between 1 and `MAX_TRIP_DAYS`
pub fn trip_days(request: &TripRequest) -> u32 {
    match (request.check_in, request.check_out) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days() + 1;
            u32::try_from(days.clamp(1, i64::from(MAX_TRIP_DAYS))).unwrap_or(MAX_TRIP_DAYS)
        }
        _ => DEFAULT_TRIP_DAYS,
    }
}

/// Formats a date the way day headers and the results subtitle show it
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

impl AttractionSeed {
    fn to_activity(self) -> Activity {
        Activity {
            name: self.name.to_string(),
            category: Some(self.category.to_string()),
            description: Some(self.description.to_string()),
            address: Some(self.location.to_string()),
            duration: Some(self.duration.to_string()),
            rating: Some(self.rating),
            transport: Some(self.transport.to_string()),
            tip: Some(self.tip.to_string()),
            ..Default::default()
        }
    }
}

impl RestaurantSeed {
    fn to_restaurant(self) -> Restaurant {
        Restaurant {
            name: self.name.to_string(),
            cuisine: Some(self.cuisine.to_string()),
            address: Some(self.location.to_string()),
            price_tier: Some(self.price.to_string()),
            rating: Some(self.rating),
            description: Some(self.specialties.to_string()),
            tip: Some(self.tip.to_string()),
            ..Default::default()
        }
    }
}

/// Builds an itinerary for the request from the bundled dataset
///
/// Attractions are split into equal consecutive chunks across the trip days
/// and all restaurants are attached to the first day.
pub fn fallback_itinerary(request: &TripRequest) -> ItineraryResponse {
    let guide = guide_for(&request.destination);
    let days = trip_days(request);
    let per_day = guide.attractions.len().div_ceil(days as usize).max(1);

    let itinerary = (1..=days)
        .map(|day| {
            let start = ((day - 1) as usize * per_day).min(guide.attractions.len());
            let end = (start + per_day).min(guide.attractions.len());
            let date = match request.check_in {
                Some(check_in) => format_date(check_in + Duration::days(i64::from(day) - 1)),
                None => format!("Day {}", day),
            };
            let restaurants = if day == 1 {
                guide.restaurants.iter().map(|r| r.to_restaurant()).collect()
            } else {
                Vec::new()
            };

            DayPlan {
                day_number: Some(day),
                date: Some(date),
                activities: guide.attractions[start..end]
                    .iter()
                    .map(|a| a.to_activity())
                    .collect(),
                restaurants,
            }
        })
        .collect();

    ItineraryResponse {
        city: Some(guide.city.to_string()),
        duration_days: Some(days),
        itinerary,
        tips: guide.tips.iter().map(|t| Tip::Text(t.to_string())).collect(),
        total_attractions: Some(guide.attractions.len() as u32),
        total_restaurants: Some(guide.restaurants.len() as u32),
    }
}
