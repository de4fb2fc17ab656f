//! HTTP-backed [`Geocoder`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use reqwest::Client;
use stayfinder_core::{GeocodeError, Geocoder};
use url::form_urlencoded;

use super::nominatim::SearchHit;
use crate::ProviderBuildError;

/// Default base URL for the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default user agent for geocode requests.
pub const DEFAULT_USER_AGENT: &str = "stayfinder-geocode/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpGeocoderConfig {
    /// Base URL of the search service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
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

/// Geocoder backed by a Nominatim-style HTTP search API.
///
/// The client is built once per provider and reused across lookups.
#[derive(Debug)]
pub struct HttpGeocoder {
    client: Client,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a new geocoder with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a new geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Build the search URL for a lookup text.
    fn build_search_url(&self, text: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", text)
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .finish();
        format!(
            "{}/search?{query}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Convert a reqwest error to a `GeocodeError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeocodeError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        GeocodeError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Take the first hit, if any, and parse its coordinate.
    fn convert_response(hits: Vec<SearchHit>) -> Result<Option<Coord<f64>>, GeocodeError> {
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        hit.coordinate()
            .map(Some)
            .map_err(|err| GeocodeError::Parse {
                message: format!("invalid coordinate in geocode hit: {err}"),
            })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, text: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let url = self.build_search_url(text);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let hits: Vec<SearchHit> = response.json().await.map_err(|err| GeocodeError::Parse {
            message: err.to_string(),
        })?;
        Self::convert_response(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn geocoder() -> HttpGeocoder {
        HttpGeocoder::new("http://nominatim.example.org").expect("provider should build")
    }

    #[rstest]
    fn build_search_url_encodes_the_query(geocoder: HttpGeocoder) {
        let url = geocoder.build_search_url("India Gate, New Delhi");
        assert_eq!(
            url,
            "http://nominatim.example.org/search?q=India+Gate%2C+New+Delhi&format=json&limit=1"
        );
    }

    #[rstest]
    fn build_search_url_strips_trailing_slash() {
        let geocoder =
            HttpGeocoder::new("http://nominatim.example.org/").expect("provider should build");
        let url = geocoder.build_search_url("Paharganj");
        assert!(url.starts_with("http://nominatim.example.org/search?"));
        assert!(!url.contains("//search"));
    }

    #[rstest]
    fn convert_response_takes_the_first_hit() {
        let hits = vec![
            SearchHit {
                lat: "28.6129".to_owned(),
                lon: "77.2295".to_owned(),
                display_name: None,
            },
            SearchHit {
                lat: "0.0".to_owned(),
                lon: "0.0".to_owned(),
                display_name: None,
            },
        ];
        let centre = HttpGeocoder::convert_response(hits).expect("should parse");
        assert_eq!(
            centre,
            Some(Coord {
                x: 77.2295,
                y: 28.6129
            })
        );
    }

    #[rstest]
    fn convert_response_maps_no_hits_to_none() {
        assert_eq!(HttpGeocoder::convert_response(Vec::new()), Ok(None));
    }

    #[rstest]
    fn convert_response_surfaces_bad_coordinates_as_parse_errors() {
        let hits = vec![SearchHit {
            lat: "north".to_owned(),
            lon: "77.2295".to_owned(),
            display_name: None,
        }];
        assert!(matches!(
            HttpGeocoder::convert_response(hits),
            Err(GeocodeError::Parse { .. })
        ));
    }
}
