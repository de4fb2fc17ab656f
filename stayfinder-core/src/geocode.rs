//! Resolve free text to a coordinate via an external service.
//!
//! The `Geocoder` trait abstracts a fallible, asynchronous lookup. Absence
//! of a result is a normal outcome (`Ok(None)`); transport failures map to
//! [`GeocodeError`] so the resolver can recover with a fallback result set
//! rather than surfacing a hard error.

use async_trait::async_trait;
use geo::Coord;
use thiserror::Error;

/// Errors from [`Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The request exceeded the configured timeout.
    #[error("geocode request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("geocode request to {url} failed with status {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Status or body text from the service.
        message: String,
    },
    /// The request could not reach the service.
    #[error("geocode request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse geocode response: {message}")]
    Parse {
        /// Decode error description.
        message: String,
    },
}

/// Look up a coordinate for a free-text place description.
///
/// Implementations must be `Send + Sync` so a single handle can be shared
/// across a search session. `Ok(None)` means the service answered but found
/// nothing; callers treat that as "no centre resolved", not as a failure.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `text` to a coordinate (`x = lon`, `y = lat`), if any.
    async fn geocode(&self, text: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}
