//! Load and normalise the hotel catalog from a JSON file.
//!
//! Source catalogs are patchy: numbers arrive as strings, platform rating
//! entries are sometimes missing fields or are not objects at all.
//! Normalisation happens here, once, so the rest of the engine only ever
//! sees validated records — invalid `platform_ratings` entries become
//! `{0.0, 0}` and unparsable numerics become absent.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use geo::Coord;
use serde::Deserialize;
use serde_json::Value;
use stayfinder_core::{Hotel, PlatformRating};
use thiserror::Error;

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Opening the catalog file failed.
    #[error("failed to open catalog at {path:?}")]
    Open {
        /// Requested catalog path.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The catalog JSON could not be decoded.
    #[error("failed to parse catalog JSON at {path:?}")]
    Parse {
        /// Requested catalog path.
        path: PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array of hotel records from `path`.
///
/// # Errors
/// Returns [`CatalogError`] when the file cannot be opened or the JSON
/// cannot be decoded. Individually odd field values are normalised, not
/// rejected.
pub fn load_catalog(path: &Path) -> Result<Vec<Hotel>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawHotel> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw.into_iter().map(RawHotel::into_hotel).collect())
}

/// Catalog record as it appears on disk, before normalisation.
#[derive(Debug, Deserialize)]
struct RawHotel {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    reviews_summary: String,
    #[serde(default)]
    overall_score: Option<Value>,
    #[serde(default)]
    price_range: Option<Value>,
    #[serde(default)]
    hotel_star_rating: Option<Value>,
    #[serde(default)]
    average_platform_rating: Option<Value>,
    #[serde(default)]
    coordinates: Option<RawCoordinates>,
    #[serde(default)]
    platform_ratings: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    #[serde(default)]
    lat: Option<Value>,
    #[serde(default)]
    lng: Option<Value>,
}

impl RawHotel {
    fn into_hotel(self) -> Hotel {
        let coordinates = self.coordinates.and_then(|raw| {
            let lat = raw.lat.as_ref().and_then(numeric)?;
            let lng = raw.lng.as_ref().and_then(numeric)?;
            Some(Coord { x: lng, y: lat })
        });
        let platform_ratings = self
            .platform_ratings
            .into_iter()
            .map(|(platform, value)| (platform, platform_rating(&value)))
            .collect();
        Hotel {
            name: self.name,
            city: self.city,
            address: self.address,
            reviews_summary: self.reviews_summary,
            overall_score: self.overall_score.as_ref().and_then(numeric),
            price_range: self.price_range.as_ref().and_then(numeric),
            hotel_star_rating: self.hotel_star_rating.as_ref().and_then(numeric),
            average_platform_rating: self.average_platform_rating.as_ref().and_then(numeric),
            coordinates,
            platform_ratings,
        }
    }
}

/// Coerce a JSON value to a number, tolerating numbers-as-strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Normalise one `platform_ratings` entry; anything invalid becomes zero.
fn platform_rating(value: &Value) -> PlatformRating {
    let Some(entry) = value.as_object() else {
        return PlatformRating::zero();
    };
    let rating = entry.get("rating").and_then(numeric).unwrap_or(0.0);
    let reviews_count = entry
        .get("reviews_count")
        .and_then(|value| match value {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(0);
    PlatformRating::new(rating, reviews_count)
}
