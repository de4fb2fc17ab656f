//! Error types emitted by the Stayfinder CLI.

use stayfinder_core::{PersonaParseError, PriceRangeError, SortKeyParseError};
use stayfinder_data::{CatalogError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the Stayfinder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// The catalog file could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The persona flag did not name a known archetype.
    #[error(transparent)]
    InvalidPersona(#[from] PersonaParseError),
    /// The sort flag did not name a known key.
    #[error(transparent)]
    InvalidSortKey(#[from] SortKeyParseError),
    /// The price bounds were inverted.
    #[error(transparent)]
    InvalidPriceRange(#[from] PriceRangeError),
    /// The output format flag was not recognised.
    #[error("unknown output format '{0}' (expected text or json)")]
    InvalidOutputFormat(String),
    /// An HTTP adapter could not be constructed.
    #[error(transparent)]
    BuildProvider(#[from] ProviderBuildError),
    /// Serialising the JSON output failed.
    #[error("failed to serialise output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
}
