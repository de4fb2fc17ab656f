//! Catalog loading and outward-facing adapters for the Stayfinder engine.
//!
//! Everything here sits at the system boundary: reading the hotel catalog
//! from JSON, geocoding free text against a Nominatim-style service,
//! classifying review text against a sentiment inference endpoint, and the
//! best-effort remote refine client. Adapter failures are converted into
//! the core's domain errors (or recovered with documented fallbacks) and
//! never surface as panics.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod geocode;
pub mod refine;
pub mod sentiment;

pub use catalog::{CatalogError, load_catalog};
pub use geocode::{HttpGeocoder, HttpGeocoderConfig};
pub use refine::{HttpRefineClient, HttpRefineClientConfig, RefineCriteria};
pub use sentiment::{HttpSentimentClassifier, HttpSentimentClassifierConfig};

/// Error type for adapter construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
        }
    }
}
