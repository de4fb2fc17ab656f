//! Candidate filter/sort/truncate pipeline.
//!
//! The stages run in a fixed, documented order: city filter, stable sort by
//! the chosen key, truncation to the top [`RESULT_LIMIT`], price-range
//! filter, then the star filter. Truncation happens *before* the price
//! filter on purpose — the price stage narrows within the already-truncated
//! head and never re-expands the candidate pool. An empty result is valid
//! output, not an error.

use std::str::FromStr;

use thiserror::Error;

use crate::hotel::Hotel;

/// Number of candidates surfaced by the pipeline and the resolver.
pub const RESULT_LIMIT: usize = 5;

/// Price substituted when a hotel has no price, for filtering purposes.
pub const DEFAULT_PRICE: f64 = 2500.0;

/// City filter sentinel meaning "no city restriction".
pub const CITY_ALL: &str = "all";

/// Sort key for the pipeline's ordering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortKey {
    /// Pre-computed overall score, descending (missing counts as 0).
    #[default]
    AiScore,
    /// Nightly price, ascending (missing counts as 0).
    Price,
    /// Official star rating, descending (missing counts as 0).
    Star,
}

/// Error returned when parsing an unknown sort key name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected ai_score, price, or star)")]
pub struct SortKeyParseError(pub String);

impl SortKey {
    /// Return the sort key as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AiScore => "ai_score",
            Self::Price => "price",
            Self::Star => "star",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ai_score" | "ai-score" => Ok(Self::AiScore),
            "price" => Ok(Self::Price),
            "star" => Ok(Self::Star),
            _ => Err(SortKeyParseError(value.to_owned())),
        }
    }
}

/// Inclusive price bounds for the price-range stage.
///
/// # Examples
/// ```
/// use stayfinder_core::PriceRange;
///
/// let range = PriceRange::new(1000.0, 5000.0)?;
/// assert!(range.contains(2500.0));
/// assert!(!range.contains(5000.01));
/// # Ok::<(), stayfinder_core::PriceRangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

/// Errors returned by [`PriceRange::new`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("price range minimum {min} exceeds maximum {max}")]
pub struct PriceRangeError {
    /// Rejected lower bound.
    pub min: f64,
    /// Rejected upper bound.
    pub max: f64,
}

impl PriceRange {
    /// Validate and construct a price range.
    pub fn new(min: f64, max: f64) -> Result<Self, PriceRangeError> {
        if min > max {
            return Err(PriceRangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Whether `price` lies within the bounds, inclusive.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Filter and sort criteria for one [`rank`] pass.
#[derive(Debug, Clone, Default)]
pub struct RankCriteria {
    /// Case-insensitive city restriction; `None`, empty, or [`CITY_ALL`]
    /// means no restriction.
    pub city: Option<String>,
    /// Optional inclusive price bounds.
    pub price: Option<PriceRange>,
    /// Exact star rating, applied only when sorting by star.
    pub star_rating: Option<f64>,
    /// Ordering stage key.
    pub sort: SortKey,
}

/// Apply the pipeline stages in their contractual order.
///
/// Pure: the input is untouched and a fresh list is returned.
///
/// # Examples
/// ```
/// use stayfinder_core::{Hotel, RankCriteria, SortKey, rank};
///
/// let hotels = vec![
///     Hotel::new("Pricey", "New Delhi").with_price_range(9000.0),
///     Hotel::new("Budget", "New Delhi").with_price_range(1200.0),
/// ];
/// let criteria = RankCriteria {
///     sort: SortKey::Price,
///     ..RankCriteria::default()
/// };
/// let ranked = rank(&hotels, &criteria);
/// assert_eq!(ranked[0].name, "Budget");
/// ```
#[must_use]
pub fn rank(hotels: &[Hotel], criteria: &RankCriteria) -> Vec<Hotel> {
    let mut ranked = filter_city(hotels, criteria.city.as_deref());
    sort_by_key(&mut ranked, criteria.sort);
    ranked.truncate(RESULT_LIMIT);
    filter_price(&mut ranked, criteria.price);
    filter_star(&mut ranked, criteria.sort, criteria.star_rating);
    ranked
}

/// Stage 1: case-insensitive exact city match, skipped for the sentinel.
fn filter_city(hotels: &[Hotel], city: Option<&str>) -> Vec<Hotel> {
    match city {
        Some(city) if !city.is_empty() && !city.eq_ignore_ascii_case(CITY_ALL) => hotels
            .iter()
            .filter(|hotel| hotel.city.eq_ignore_ascii_case(city))
            .cloned()
            .collect(),
        _ => hotels.to_vec(),
    }
}

/// Stage 2: stable sort; ties retain relative input order.
fn sort_by_key(hotels: &mut [Hotel], sort: SortKey) {
    match sort {
        SortKey::AiScore => hotels.sort_by(|a, b| {
            b.overall_score
                .unwrap_or(0.0)
                .total_cmp(&a.overall_score.unwrap_or(0.0))
        }),
        SortKey::Price => hotels.sort_by(|a, b| {
            a.price_range
                .unwrap_or(0.0)
                .total_cmp(&b.price_range.unwrap_or(0.0))
        }),
        SortKey::Star => hotels.sort_by(|a, b| {
            b.hotel_star_rating
                .unwrap_or(0.0)
                .total_cmp(&a.hotel_star_rating.unwrap_or(0.0))
        }),
    }
}

/// Stage 4: inclusive price bounds over the truncated head.
fn filter_price(hotels: &mut Vec<Hotel>, price: Option<PriceRange>) {
    if let Some(range) = price {
        hotels.retain(|hotel| range.contains(hotel.price_range.unwrap_or(DEFAULT_PRICE)));
    }
}

/// Stage 5: exact star match, only when the ordering stage sorted by star.
fn filter_star(hotels: &mut Vec<Hotel>, sort: SortKey, star_rating: Option<f64>) {
    if sort != SortKey::Star {
        return;
    }
    if let Some(star) = star_rating {
        hotels.retain(|hotel| hotel.hotel_star_rating.unwrap_or(0.0) == star);
    }
}
