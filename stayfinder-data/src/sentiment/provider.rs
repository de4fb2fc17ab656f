//! HTTP-backed [`SentimentClassifier`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use stayfinder_core::{Sentiment, SentimentClassifier, SentimentError, SentimentLabel};

use super::api::{ClassifyRequest, ClassifyResponse};
use crate::ProviderBuildError;

/// Default user agent for sentiment requests.
pub const DEFAULT_USER_AGENT: &str = "stayfinder-sentiment/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the classify endpoint under the base URL.
const CLASSIFY_PATH: &str = "/classify";

/// Configuration for [`HttpSentimentClassifier`].
#[derive(Debug, Clone)]
pub struct HttpSentimentClassifierConfig {
    /// Base URL of the inference service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpSentimentClassifierConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Sentiment classifier backed by an HTTP inference endpoint.
///
/// Construct one per process and share it behind an `Arc`; the HTTP client
/// is built once and reused. Transport failures degrade to
/// [`Sentiment::fallback`] — the classifier is best-effort and never blocks
/// the caller on an unreachable model.
#[derive(Debug)]
pub struct HttpSentimentClassifier {
    client: Client,
    config: HttpSentimentClassifierConfig,
}

impl HttpSentimentClassifier {
    /// Create a new classifier with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpSentimentClassifierConfig::new(base_url))
    }

    /// Create a new classifier with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpSentimentClassifierConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    fn classify_url(&self) -> String {
        format!(
            "{}{CLASSIFY_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Map a response body onto the core sentiment type.
    fn convert_response(body: &ClassifyResponse) -> Result<Sentiment, SentimentError> {
        let label = match body.label.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => SentimentLabel::Positive,
            "NEGATIVE" => SentimentLabel::Negative,
            other => {
                return Err(SentimentError::Parse {
                    message: format!("unknown sentiment label '{other}'"),
                });
            }
        };
        if !body.score.is_finite() {
            return Err(SentimentError::Parse {
                message: format!("non-finite sentiment score {}", body.score),
            });
        }
        Ok(Sentiment::new(label, body.score.clamp(0.0, 1.0)))
    }
}

/// Truncate text to at most `max_length` characters on a char boundary.
fn truncate_text(text: &str, max_length: usize) -> &str {
    match text.char_indices().nth(max_length) {
        Some((boundary, _)) => &text[..boundary],
        None => text,
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    async fn classify(&self, text: &str, max_length: usize) -> Result<Sentiment, SentimentError> {
        let url = self.classify_url();
        let request = ClassifyRequest {
            text: truncate_text(text, max_length),
            max_length,
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!(
                    "sentiment service unreachable at {url}: {err}; using fallback classification"
                );
                return Ok(Sentiment::fallback());
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                log::warn!("sentiment service error from {url}: {err}; using fallback classification");
                return Ok(Sentiment::fallback());
            }
        };

        let body: ClassifyResponse =
            response.json().await.map_err(|err| SentimentError::Parse {
                message: err.to_string(),
            })?;
        Self::convert_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn classify_url_strips_trailing_slash() {
        let classifier =
            HttpSentimentClassifier::new("http://sentiment.example.org/").expect("should build");
        assert_eq!(
            classifier.classify_url(),
            "http://sentiment.example.org/classify"
        );
    }

    #[rstest]
    #[case("POSITIVE", 0.9, SentimentLabel::Positive, 0.9)]
    #[case("negative", 0.8, SentimentLabel::Negative, 0.8)]
    #[case(" Positive ", 1.7, SentimentLabel::Positive, 1.0)]
    fn convert_response_parses_labels(
        #[case] label: &str,
        #[case] score: f64,
        #[case] expected_label: SentimentLabel,
        #[case] expected_score: f64,
    ) {
        let body = ClassifyResponse {
            label: label.to_owned(),
            score,
        };
        let sentiment = HttpSentimentClassifier::convert_response(&body).expect("should parse");
        assert_eq!(sentiment.label, expected_label);
        assert_eq!(sentiment.score, expected_score);
    }

    #[rstest]
    #[case("NEUTRAL", 0.5)]
    #[case("POSITIVE", f64::NAN)]
    fn convert_response_rejects_malformed_bodies(#[case] label: &str, #[case] score: f64) {
        let body = ClassifyResponse {
            label: label.to_owned(),
            score,
        };
        assert!(matches!(
            HttpSentimentClassifier::convert_response(&body),
            Err(SentimentError::Parse { .. })
        ));
    }

    #[rstest]
    fn truncate_text_respects_char_boundaries() {
        assert_eq!(truncate_text("délhi stay", 3), "dél");
        assert_eq!(truncate_text("short", 512), "short");
    }

    #[tokio::test]
    async fn unreachable_service_degrades_to_fallback() {
        let classifier = HttpSentimentClassifier::with_config(
            HttpSentimentClassifierConfig::new("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(1)),
        )
        .expect("should build");

        let sentiment = classifier
            .classify("friendly staff", 512)
            .await
            .expect("transport failure must not surface");

        assert_eq!(sentiment, Sentiment::fallback());
    }
}
