//! Core domain types for the Stayfinder engine.
//!
//! The crate holds the hotel catalog model, the score-fusion and
//! ranking-pipeline algorithms, the great-circle distance utility, and the
//! async service traits ([`Geocoder`], [`SentimentClassifier`]) implemented
//! by the adapter crate. Everything here is deterministic and free of I/O;
//! the only suspension points in the system are the two service traits.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod geocode;
pub mod hotel;
pub mod persona;
pub mod pipeline;
pub mod score;
pub mod sentiment;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::haversine_km;
pub use geocode::{GeocodeError, Geocoder};
pub use hotel::{Hotel, HotelKey, PlatformRating};
pub use persona::{Persona, PersonaParseError};
pub use pipeline::{
    CITY_ALL, DEFAULT_PRICE, PriceRange, PriceRangeError, RESULT_LIMIT, RankCriteria, SortKey,
    SortKeyParseError, rank,
};
pub use score::{
    FALLBACK_SENTIMENT_SCORE, SENTIMENT_MAX_LENGTH, ScoreBundle, ScoredHotel, score_hotels,
};
pub use sentiment::{
    FallbackClassifier, Sentiment, SentimentClassifier, SentimentError, SentimentLabel,
};
