//! Sentiment classification of review text.
//!
//! The external model is a black box behind the [`SentimentClassifier`]
//! trait. Classification is best-effort throughout: the HTTP adapter
//! substitutes [`Sentiment::fallback`] when the service is unreachable, and
//! the scoring call site applies its own fixed fallback when a classifier
//! errors. Nothing on this path ever blocks a recommendation.

use async_trait::async_trait;
use thiserror::Error;

/// Confidence score of the fixed fallback classification.
pub const FALLBACK_CLASSIFICATION_SCORE: f64 = 0.85;

/// Polarity of a classified text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SentimentLabel {
    /// The text reads favourably.
    Positive,
    /// The text reads unfavourably.
    Negative,
}

impl SentimentLabel {
    /// Return the label in the classifier's wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification: polarity plus the model's confidence in `[0, 1]`.
///
/// # Examples
/// ```
/// use stayfinder_core::{Sentiment, SentimentLabel};
///
/// let positive = Sentiment::new(SentimentLabel::Positive, 0.9);
/// let negative = Sentiment::new(SentimentLabel::Negative, 0.9);
/// assert_eq!(positive.signal(), 0.9);
/// assert!((negative.signal() - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentiment {
    /// Predicted polarity.
    pub label: SentimentLabel,
    /// Model confidence in the predicted polarity.
    pub score: f64,
}

impl Sentiment {
    /// Construct a classification.
    #[must_use]
    pub const fn new(label: SentimentLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// The fixed classification substituted when the model is unavailable.
    #[must_use]
    pub const fn fallback() -> Self {
        Self::new(SentimentLabel::Positive, FALLBACK_CLASSIFICATION_SCORE)
    }

    /// Collapse the classification into a single favourability value.
    ///
    /// A POSITIVE label contributes its confidence directly; a NEGATIVE
    /// label with confidence `s` contributes `1 - s`. Non-finite confidence
    /// is treated as zero and the result is clamped to `[0, 1]`.
    #[must_use]
    pub fn signal(&self) -> f64 {
        let score = if self.score.is_finite() {
            self.score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self.label {
            SentimentLabel::Positive => score,
            SentimentLabel::Negative => 1.0 - score,
        }
    }
}

/// Errors from [`SentimentClassifier::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentimentError {
    /// The request exceeded the configured timeout.
    #[error("sentiment request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("sentiment request to {url} failed with status {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Status or body text from the service.
        message: String,
    },
    /// The request could not reach the service.
    #[error("sentiment request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse sentiment response: {message}")]
    Parse {
        /// Decode error description.
        message: String,
    },
}

/// Classify free text into a [`Sentiment`].
///
/// One handle is constructed per process and shared read-only (`Arc`);
/// construction failures degrade to [`FallbackClassifier`] rather than
/// failing the caller.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify `text`, considering at most `max_length` characters.
    async fn classify(&self, text: &str, max_length: usize) -> Result<Sentiment, SentimentError>;
}

/// Degraded-mode classifier returning [`Sentiment::fallback`] for any input.
///
/// Used when no classification endpoint is configured or the real
/// classifier failed to initialise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackClassifier;

#[async_trait]
impl SentimentClassifier for FallbackClassifier {
    async fn classify(&self, _text: &str, _max_length: usize) -> Result<Sentiment, SentimentError> {
        Ok(Sentiment::fallback())
    }
}
