//! Itinerary service API client
//!
//! Sends the collected trip request to the travel guide backend and parses the
//! structured itinerary it returns. Also exposes the lightweight health probe
//! used by the connectivity badge.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::{ItineraryResponse, TripRequest};

/// Default base URL for a locally running itinerary service
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Timeout for the itinerary request; generation does many place lookups
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for the health probe
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Endpoints exposed by the itinerary service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    GenerateItinerary,
    Health,
    /// Reserved; not used by the planning flow
    SearchAttractions,
    /// Reserved; not used by the planning flow
    SearchRestaurants,
    /// Reserved; not used by the planning flow
    GetDirections,
    /// Reserved; not used by the planning flow
    CityTips,
}

impl Endpoint {
    /// Path of the endpoint relative to the service base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::GenerateItinerary => "/api/generate-itinerary",
            Endpoint::Health => "/api/health",
            Endpoint::SearchAttractions => "/api/search-attractions",
            Endpoint::SearchRestaurants => "/api/search-restaurants",
            Endpoint::GetDirections => "/api/get-directions",
            Endpoint::CityTips => "/api/city-tips",
        }
    }

    /// Full URL for the endpoint on the given base URL
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Errors that can occur when talking to the itinerary service
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// The service could not be reached (connection refused, DNS, timeout)
    #[error("Itinerary service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The service does not know the requested destination (HTTP 404)
    #[error("Destination not found: {city}")]
    NotFound { city: String },

    /// The service answered with a non-2xx status
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// The service answered 2xx but the body was not a valid itinerary
    #[error("Failed to parse itinerary response: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl ItineraryError {
    /// Message shown on the error panel
    pub fn user_message(&self) -> String {
        match self {
            ItineraryError::NotFound { city } => format!(
                "Sorry, we couldn't find information about {}. Try another city.",
                city
            ),
            ItineraryError::Server { status } => format!(
                "Server error: {}. Cannot reach the itinerary service right now; make sure it is running and try again.",
                status
            ),
            ItineraryError::Unreachable(_) | ItineraryError::InvalidBody(_) => {
                "Cannot connect to the itinerary service. Make sure it is running and reachable, then try again."
                    .to_string()
            }
        }
    }
}

/// Client for the itinerary generation service
#[derive(Debug, Clone)]
pub struct ItineraryClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    health_timeout: Duration,
}

impl Default for ItineraryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ItineraryClient {
    /// Create a new ItineraryClient for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new ItineraryClient with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            request_timeout: REQUEST_TIMEOUT,
            health_timeout: HEALTH_TIMEOUT,
        }
    }

    /// Override the itinerary and health request timeouts
    pub fn with_timeouts(mut self, request: Duration, health: Duration) -> Self {
        self.request_timeout = request;
        self.health_timeout = health;
        self
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange a trip request for a generated itinerary
    ///
    /// # Returns
    /// * `Ok(ItineraryResponse)` - on HTTP 2xx with a JSON itinerary body
    /// * `Err(ItineraryError::NotFound)` - on HTTP 404
    /// * `Err(ItineraryError::Server)` - on any other non-2xx status
    /// * `Err(ItineraryError::Unreachable)` - if the request never completes
    pub async fn request_itinerary(
        &self,
        request: &TripRequest,
    ) -> Result<ItineraryResponse, ItineraryError> {
        let url = Endpoint::GenerateItinerary.url(&self.base_url);
        tracing::info!(city = %request.destination, endpoint = %url, "Requesting itinerary");

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(city = %request.destination, "Destination not found");
            return Err(ItineraryError::NotFound {
                city: request.destination.clone(),
            });
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Itinerary request failed");
            return Err(ItineraryError::Server {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let itinerary: ItineraryResponse = serde_json::from_str(&text)?;

        tracing::info!(
            city = %request.destination,
            days = itinerary.itinerary.len(),
            tips = itinerary.tips.len(),
            "Received itinerary"
        );
        Ok(itinerary)
    }

    /// Probe the health endpoint, reporting why it failed
    pub async fn probe_health(&self) -> Result<(), ItineraryError> {
        let url = Endpoint::Health.url(&self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ItineraryError::Server {
                status: status.as_u16(),
            })
        }
    }

    /// Whether the service currently answers its health check
    ///
    /// Failures are logged and reported as `false`; they never propagate.
    pub async fn check_health(&self) -> bool {
        match self.probe_health().await {
            Ok(()) => {
                tracing::debug!(base_url = %self.base_url, "Health check passed");
                true
            }
            Err(err) => {
                tracing::warn!(base_url = %self.base_url, error = %err, "Health check failed");
                false
            }
        }
    }
}
