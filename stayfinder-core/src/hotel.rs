//! Hotel catalog records.
//!
//! A [`Hotel`] is a read-only catalog entry; every derived structure in the
//! engine (scores, filtered lists, distance maps) is built from fresh copies
//! and never mutates the source record. Coordinates follow the `geo`
//! convention: `x = longitude`, `y = latitude`.

use std::collections::HashMap;

use geo::Coord;

/// A per-platform rating aggregate.
///
/// Catalog loading normalises missing or non-numeric entries to
/// `PlatformRating::zero()`, so downstream code never sees raw input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformRating {
    /// Rating on the platform's own scale.
    pub rating: f64,
    /// Number of reviews backing the rating.
    pub reviews_count: u64,
}

impl PlatformRating {
    /// Construct a rating aggregate.
    #[must_use]
    pub const fn new(rating: f64, reviews_count: u64) -> Self {
        Self {
            rating,
            reviews_count,
        }
    }

    /// The normalised placeholder for missing or invalid entries.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0)
    }
}

/// Composite identity for a hotel.
///
/// Address text is not unique across a catalog, so the distance map and the
/// fuzzy-match dedup key hotels by name plus city instead.
///
/// # Examples
/// ```
/// use stayfinder_core::HotelKey;
///
/// let key = HotelKey::new("The Imperial", "New Delhi");
/// assert_eq!(key.to_string(), "The Imperial, New Delhi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotelKey {
    /// Hotel name.
    pub name: String,
    /// City the hotel is in.
    pub city: String,
}

impl HotelKey {
    /// Build a composite key from name and city.
    #[must_use]
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }
}

impl std::fmt::Display for HotelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.city)
    }
}

/// A single hotel in the candidate catalog.
///
/// Numeric attributes are optional because source catalogs are patchy; the
/// ranking pipeline substitutes documented defaults instead of failing.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stayfinder_core::Hotel;
///
/// let hotel = Hotel::new("The Imperial", "New Delhi")
///     .with_address("Connaught Place, New Delhi")
///     .with_coordinates(Coord { x: 77.2186, y: 28.6253 })
///     .with_price_range(11_000.0);
/// assert_eq!(hotel.key().to_string(), "The Imperial, New Delhi");
/// assert_eq!(hotel.price_range, Some(11_000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotel {
    /// Display name.
    pub name: String,
    /// City the hotel is in.
    pub city: String,
    /// Free-text street address.
    pub address: String,
    /// Aggregated review text used as the sentiment input.
    pub reviews_summary: String,
    /// Pre-computed quality score shown as the "AI score".
    pub overall_score: Option<f64>,
    /// Nightly price in catalog currency units.
    pub price_range: Option<f64>,
    /// Official star rating.
    pub hotel_star_rating: Option<f64>,
    /// Mean rating across platforms, out of 5.
    pub average_platform_rating: Option<f64>,
    /// Geographic position (`x = lon`, `y = lat`).
    pub coordinates: Option<Coord<f64>>,
    /// Per-platform rating aggregates keyed by platform name.
    pub platform_ratings: HashMap<String, PlatformRating>,
}

impl Hotel {
    /// Construct a hotel with the given identity and no other attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    /// The composite `name + city` key for this hotel.
    #[must_use]
    pub fn key(&self) -> HotelKey {
        HotelKey::new(self.name.clone(), self.city.clone())
    }

    /// Set the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the review summary text.
    #[must_use]
    pub fn with_reviews_summary(mut self, reviews_summary: impl Into<String>) -> Self {
        self.reviews_summary = reviews_summary.into();
        self
    }

    /// Set the pre-computed overall score.
    #[must_use]
    pub fn with_overall_score(mut self, overall_score: f64) -> Self {
        self.overall_score = Some(overall_score);
        self
    }

    /// Set the nightly price.
    #[must_use]
    pub fn with_price_range(mut self, price_range: f64) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Set the official star rating.
    #[must_use]
    pub fn with_star_rating(mut self, hotel_star_rating: f64) -> Self {
        self.hotel_star_rating = Some(hotel_star_rating);
        self
    }

    /// Set the mean platform rating out of 5.
    #[must_use]
    pub fn with_average_platform_rating(mut self, average_platform_rating: f64) -> Self {
        self.average_platform_rating = Some(average_platform_rating);
        self
    }

    /// Set the geographic position.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coord<f64>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Insert a per-platform rating aggregate.
    #[must_use]
    pub fn with_platform_rating(
        mut self,
        platform: impl Into<String>,
        rating: PlatformRating,
    ) -> Self {
        self.platform_ratings.insert(platform.into(), rating);
        self
    }
}
