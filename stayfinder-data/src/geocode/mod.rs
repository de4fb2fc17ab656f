//! HTTP geocoding against a Nominatim-style search API.
//!
//! [`HttpGeocoder`] implements [`stayfinder_core::Geocoder`] by querying
//! `{base_url}/search?q=<text>&format=json&limit=1` and taking the first
//! hit. An empty hit list is `Ok(None)` — "no centre resolved" is a normal
//! outcome, not an error.
//!
//! # Example
//!
//! ```no_run
//! use stayfinder_core::Geocoder;
//! use stayfinder_data::{HttpGeocoder, HttpGeocoderConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpGeocoderConfig::new("https://nominatim.openstreetmap.org")
//!     .with_timeout(Duration::from_secs(10));
//! let geocoder = HttpGeocoder::with_config(config)?;
//! let centre = geocoder.geocode("India Gate, New Delhi").await?;
//! println!("{centre:?}");
//! # Ok(())
//! # }
//! ```

mod nominatim;
mod provider;

pub use provider::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpGeocoder, HttpGeocoderConfig};
