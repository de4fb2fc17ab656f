//! Test-only service doubles and catalog fixtures shared across the
//! workspace's unit and behaviour tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use geo::Coord;

use crate::geocode::{GeocodeError, Geocoder};
use crate::hotel::{Hotel, PlatformRating};
use crate::sentiment::{Sentiment, SentimentClassifier, SentimentError};

/// Deterministic [`Geocoder`] returning a pre-configured response.
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    response: Result<Option<Coord<f64>>, GeocodeError>,
}

impl StaticGeocoder {
    /// Always resolve to `center`.
    #[must_use]
    pub fn with_center(center: Coord<f64>) -> Self {
        Self {
            response: Ok(Some(center)),
        }
    }

    /// Always answer "no centre resolved".
    #[must_use]
    pub fn with_no_match() -> Self {
        Self { response: Ok(None) }
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: GeocodeError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, _text: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        self.response.clone()
    }
}

/// [`Geocoder`] wrapper that counts lookups, for asserting a path was (or
/// was not) taken.
#[derive(Debug)]
pub struct CountingGeocoder {
    inner: StaticGeocoder,
    calls: AtomicUsize,
}

impl CountingGeocoder {
    /// Wrap `inner`, starting the counter at zero.
    #[must_use]
    pub fn new(inner: StaticGeocoder) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `geocode` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn geocode(&self, text: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.geocode(text).await
    }
}

/// Deterministic [`SentimentClassifier`] returning a pre-configured
/// response.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    response: Result<Sentiment, SentimentError>,
}

impl StaticClassifier {
    /// Always classify as `sentiment`.
    #[must_use]
    pub fn with_sentiment(sentiment: Sentiment) -> Self {
        Self {
            response: Ok(sentiment),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: SentimentError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl SentimentClassifier for StaticClassifier {
    async fn classify(&self, _text: &str, _max_length: usize) -> Result<Sentiment, SentimentError> {
        self.response.clone()
    }
}

/// A small Delhi-centric catalog exercising truncation, price spread, and
/// duplicate-city pools.
#[must_use]
pub fn sample_hotels() -> Vec<Hotel> {
    vec![
        Hotel::new("The Imperial", "New Delhi")
            .with_address("Connaught Place, New Delhi")
            .with_coordinates(Coord {
                x: 77.2186,
                y: 28.6253,
            })
            .with_overall_score(9.2)
            .with_price_range(11_000.0)
            .with_star_rating(5.0)
            .with_average_platform_rating(4.6)
            .with_reviews_summary("Colonial grandeur, impeccable service, superb location.")
            .with_platform_rating("agoda", PlatformRating::new(4.6, 2180)),
        Hotel::new("Taj Mahal Hotel", "New Delhi")
            .with_address("1 Mansingh Road, New Delhi")
            .with_coordinates(Coord {
                x: 77.2232,
                y: 28.6057,
            })
            .with_overall_score(9.0)
            .with_price_range(13_500.0)
            .with_star_rating(5.0)
            .with_average_platform_rating(4.5)
            .with_reviews_summary("Elegant rooms and excellent dining; service can be slow."),
        Hotel::new("Bloom Hotel", "New Delhi")
            .with_address("Link Road, Karol Bagh, New Delhi")
            .with_coordinates(Coord {
                x: 77.1910,
                y: 28.6442,
            })
            .with_overall_score(7.8)
            .with_price_range(3200.0)
            .with_star_rating(3.0)
            .with_average_platform_rating(4.1)
            .with_reviews_summary("Compact, clean, and close to the metro."),
        Hotel::new("Hotel Tara Palace", "New Delhi")
            .with_address("419 Esplanade Road, Chandni Chowk, New Delhi")
            .with_coordinates(Coord {
                x: 77.2303,
                y: 28.6562,
            })
            .with_overall_score(7.1)
            .with_price_range(2100.0)
            .with_star_rating(2.0)
            .with_average_platform_rating(3.9),
        Hotel::new("The Leela Palace", "New Delhi")
            .with_address("Diplomatic Enclave, Chanakyapuri, New Delhi")
            .with_coordinates(Coord {
                x: 77.1860,
                y: 28.5980,
            })
            .with_overall_score(9.4)
            .with_price_range(15_500.0)
            .with_star_rating(5.0)
            .with_average_platform_rating(4.7)
            .with_reviews_summary("Opulent stay with flawless hospitality."),
        Hotel::new("Zostel Delhi", "New Delhi")
            .with_address("5 Arakashan Road, Paharganj, New Delhi")
            .with_coordinates(Coord {
                x: 77.2159,
                y: 28.6466,
            })
            .with_overall_score(6.5)
            .with_price_range(900.0)
            .with_star_rating(1.0)
            .with_average_platform_rating(3.8)
            .with_reviews_summary("Lively hostel, noisy at night."),
        Hotel::new("Trident Nariman Point", "Mumbai")
            .with_address("Nariman Point, Mumbai")
            .with_coordinates(Coord {
                x: 72.8212,
                y: 18.9256,
            })
            .with_overall_score(8.8)
            .with_price_range(9800.0)
            .with_star_rating(5.0)
            .with_average_platform_rating(4.4)
            .with_reviews_summary("Sea-facing rooms with gracious staff."),
    ]
}
