//! Command-line interface for the Stayfinder engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;

pub use error::CliError;

/// Run the Stayfinder CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns [`CliError`] when argument validation, catalog loading, or
/// output serialisation fails. Adapter outages are not errors; they
/// degrade to documented fallbacks.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => recommend::run(args).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stayfinder",
    about = "Rank and retrieve hotel candidates for a traveler",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the catalog and optionally resolve an area query.
    Recommend(recommend::RecommendArgs),
}
