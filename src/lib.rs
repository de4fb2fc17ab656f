//! Facade crate for the Stayfinder recommendation engine.
//!
//! This crate re-exports the core domain types, the fuzzy matcher and
//! area-query resolver, and (behind the default-on `http-adapters`
//! feature) the HTTP adapter implementations.

#![forbid(unsafe_code)]

pub use stayfinder_core::{
    FallbackClassifier, GeocodeError, Geocoder, Hotel, HotelKey, Persona, PlatformRating,
    PriceRange, RankCriteria, ScoreBundle, ScoredHotel, Sentiment, SentimentClassifier,
    SentimentError, SentimentLabel, SortKey, haversine_km, rank, score_hotels,
};

pub use stayfinder_search::{AreaResolution, ResolutionOutcome, SearchSession, close_matches};

#[cfg(feature = "http-adapters")]
pub use stayfinder_data::{
    CatalogError, HttpGeocoder, HttpGeocoderConfig, HttpRefineClient, HttpRefineClientConfig,
    HttpSentimentClassifier, HttpSentimentClassifierConfig, ProviderBuildError, RefineCriteria,
    load_catalog,
};
