//! Best-effort remote refinement of a ranked shortlist.
//!
//! The refine endpoint accepts the local top-5 plus filter criteria and
//! returns a re-filtered list. It is strictly optional: any transport or
//! decode failure leaves the caller's prior result set unchanged, and rows
//! the caller did not send are ignored on the way back.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use stayfinder_core::{Hotel, HotelKey, Persona};

use crate::ProviderBuildError;

/// Default user agent for refine requests.
pub const DEFAULT_USER_AGENT: &str = "stayfinder-refine/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the filter endpoint under the base URL.
const FILTER_PATH: &str = "/filter";

/// Criteria forwarded alongside the shortlist.
#[derive(Debug, Clone, Default)]
pub struct RefineCriteria {
    /// Traveler archetype, sent as the endpoint's customer segment.
    pub persona: Option<Persona>,
    /// Address substring restriction.
    pub address: Option<String>,
    /// Minimum price, inclusive.
    pub price_min: Option<f64>,
    /// Maximum price, inclusive.
    pub price_max: Option<f64>,
    /// Exact star rating restriction.
    pub hotel_star_rating: Option<f64>,
    /// Minimum average rating, inclusive.
    pub average_rating_min: Option<f64>,
}

/// Configuration for [`HttpRefineClient`].
#[derive(Debug, Clone)]
pub struct HttpRefineClientConfig {
    /// Base URL of the refine service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpRefineClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Best-effort client for the remote filter endpoint.
#[derive(Debug)]
pub struct HttpRefineClient {
    client: Client,
    config: HttpRefineClientConfig,
}

impl HttpRefineClient {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRefineClientConfig::new(base_url))
    }

    /// Create a new client with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpRefineClientConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    fn filter_url(&self) -> String {
        format!("{}{FILTER_PATH}", self.config.base_url.trim_end_matches('/'))
    }

    /// Submit the shortlist for remote refinement.
    ///
    /// On success the returned rows are mapped back onto the caller's
    /// records by composite key, preserving the endpoint's ordering. On any
    /// failure the input is returned unchanged.
    pub async fn refine(&self, hotels: &[Hotel], criteria: &RefineCriteria) -> Vec<Hotel> {
        if hotels.is_empty() {
            return Vec::new();
        }
        let url = self.filter_url();
        let request = RefineRequest::build(hotels, criteria);

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("refine service unreachable at {url}: {err}; keeping local results");
                return hotels.to_vec();
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                log::warn!("refine service error from {url}: {err}; keeping local results");
                return hotels.to_vec();
            }
        };
        let rows: Vec<HotelRow> = match response.json().await {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!("refine response from {url} undecodable: {err}; keeping local results");
                return hotels.to_vec();
            }
        };
        apply_rows(hotels, &rows)
    }
}

/// Request body for the filter endpoint.
#[derive(Debug, Serialize)]
struct RefineRequest {
    hotels: Vec<HotelRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hotel_star_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_rating_min: Option<f64>,
}

impl RefineRequest {
    fn build(hotels: &[Hotel], criteria: &RefineCriteria) -> Self {
        Self {
            hotels: hotels.iter().map(HotelRow::from_hotel).collect(),
            customer_segment: criteria
                .persona
                .map(|persona| persona.segment_label().to_owned()),
            address: criteria.address.clone(),
            price_min: criteria.price_min,
            price_max: criteria.price_max,
            hotel_star_rating: criteria.hotel_star_rating,
            average_rating_min: criteria.average_rating_min,
        }
    }
}

/// One hotel as the filter endpoint sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HotelRow {
    property_name: String,
    city: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    hotel_star_rating: Option<f64>,
    #[serde(default)]
    average_rating: Option<f64>,
    #[serde(default)]
    price: Option<f64>,
}

impl HotelRow {
    fn from_hotel(hotel: &Hotel) -> Self {
        Self {
            property_name: hotel.name.clone(),
            city: hotel.city.clone(),
            address: hotel.address.clone(),
            hotel_star_rating: hotel.hotel_star_rating,
            average_rating: hotel.average_platform_rating,
            price: hotel.price_range,
        }
    }
}

/// Map returned rows back onto the caller's records by composite key.
fn apply_rows(hotels: &[Hotel], rows: &[HotelRow]) -> Vec<Hotel> {
    let by_key: HashMap<HotelKey, &Hotel> = hotels
        .iter()
        .map(|hotel| (hotel.key(), hotel))
        .collect();
    rows.iter()
        .filter_map(|row| {
            by_key
                .get(&HotelKey::new(row.property_name.clone(), row.city.clone()))
                .map(|hotel| (*hotel).clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stayfinder_core::test_support::sample_hotels;

    #[rstest]
    fn apply_rows_preserves_endpoint_order_and_drops_unknowns() {
        let hotels = sample_hotels();
        let rows = vec![
            HotelRow {
                property_name: "Bloom Hotel".to_owned(),
                city: "New Delhi".to_owned(),
                address: String::new(),
                hotel_star_rating: None,
                average_rating: None,
                price: None,
            },
            HotelRow {
                property_name: "Phantom Inn".to_owned(),
                city: "New Delhi".to_owned(),
                address: String::new(),
                hotel_star_rating: None,
                average_rating: None,
                price: None,
            },
            HotelRow {
                property_name: "The Imperial".to_owned(),
                city: "New Delhi".to_owned(),
                address: String::new(),
                hotel_star_rating: None,
                average_rating: None,
                price: None,
            },
        ];

        let refined = apply_rows(&hotels, &rows);

        let names: Vec<&str> = refined.iter().map(|hotel| hotel.name.as_str()).collect();
        assert_eq!(names, ["Bloom Hotel", "The Imperial"]);
    }

    #[rstest]
    fn request_carries_segment_and_criteria() {
        let hotels = sample_hotels();
        let criteria = RefineCriteria {
            persona: Some(Persona::Business),
            price_min: Some(1000.0),
            price_max: Some(8000.0),
            ..RefineCriteria::default()
        };
        let request = RefineRequest::build(&hotels, &criteria);
        let json = serde_json::to_value(&request).expect("should serialise");

        assert_eq!(json["customer_segment"], "Business Traveler");
        assert_eq!(json["price_min"], 1000.0);
        assert!(json.get("address").is_none());
        assert_eq!(
            json["hotels"].as_array().map(Vec::len),
            Some(hotels.len())
        );
    }

    #[tokio::test]
    async fn transport_failure_keeps_local_results() {
        let client = HttpRefineClient::with_config(
            HttpRefineClientConfig::new("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(1)),
        )
        .expect("should build");
        let hotels = sample_hotels();

        let refined = client.refine(&hotels, &RefineCriteria::default()).await;

        assert_eq!(refined, hotels);
    }

    #[tokio::test]
    async fn empty_shortlist_skips_the_request_entirely() {
        let client = HttpRefineClient::new("http://127.0.0.1:1").expect("should build");
        let refined = client.refine(&[], &RefineCriteria::default()).await;
        assert!(refined.is_empty());
    }
}
