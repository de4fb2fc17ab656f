//! HTTP sentiment classification against an inference endpoint.
//!
//! [`HttpSentimentClassifier`] implements
//! [`stayfinder_core::SentimentClassifier`] by POSTing review text to
//! `{base_url}/classify`. The adapter is best-effort by contract: transport
//! failures are recovered with the fixed fallback classification
//! (`POSITIVE, 0.85`) instead of erroring, so sentiment never blocks a
//! recommendation. Malformed response bodies do surface as parse errors —
//! the scoring call site applies its own fallback for those.
//!
//! # Example
//!
//! ```no_run
//! use stayfinder_core::SentimentClassifier;
//! use stayfinder_data::HttpSentimentClassifier;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = HttpSentimentClassifier::new("http://localhost:8000")?;
//! let sentiment = classifier.classify("Spotless rooms, lovely staff", 512).await?;
//! println!("{sentiment:?}");
//! # Ok(())
//! # }
//! ```

mod api;
mod provider;

pub use provider::{DEFAULT_USER_AGENT, HttpSentimentClassifier, HttpSentimentClassifierConfig};
