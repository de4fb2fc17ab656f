//! Fuse a sentiment signal with normalised platform ratings.
//!
//! Each hotel gets one [`ScoreBundle`] per recommendation run, computed
//! once and never mutated; the bundle's combined score is the primary
//! ranking key for generated recommendations. Sentiment acquisition is
//! best-effort: any classifier failure is replaced by a documented
//! fallback value so scoring never blocks or errors.

use crate::hotel::Hotel;
use crate::sentiment::SentimentClassifier;

/// Sentiment value substituted when classification fails or there is no
/// review text to classify.
pub const FALLBACK_SENTIMENT_SCORE: f64 = 0.7;

/// Normalised rating used when a hotel has no average platform rating.
pub const DEFAULT_NORMALIZED_RATING: f64 = 0.5;

/// Maximum number of characters of review text passed to the classifier.
pub const SENTIMENT_MAX_LENGTH: usize = 512;

/// Per-hotel fused score components, each in `[0, 1]`.
///
/// # Examples
/// ```
/// use stayfinder_core::ScoreBundle;
///
/// let bundle = ScoreBundle::fuse(0.8, Some(4.0));
/// assert_eq!(bundle.normalized_rating, 0.8);
/// assert!((bundle.combined_score - 0.8).abs() < 1e-12);
///
/// let unrated = ScoreBundle::fuse(0.8, None);
/// assert_eq!(unrated.normalized_rating, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBundle {
    /// Favourability derived from review text.
    pub sentiment_score: f64,
    /// Average platform rating scaled from out-of-5 to `[0, 1]`.
    pub normalized_rating: f64,
    /// Mean of the two components; the ranking key.
    pub combined_score: f64,
}

impl ScoreBundle {
    /// Combine a sentiment score with an average rating out of 5.
    ///
    /// The rating is normalised as `clamp(average / 5, 0, 1)` when present
    /// and finite, else [`DEFAULT_NORMALIZED_RATING`]. The sentiment score
    /// is clamped to `[0, 1]` (non-finite values count as zero). The
    /// combined score is the arithmetic mean of the two, so it stays in
    /// `[0, 1]` by construction.
    #[must_use]
    pub fn fuse(sentiment_score: f64, average_rating: Option<f64>) -> Self {
        let sentiment_score = sanitise_unit(sentiment_score);
        let normalized_rating = match average_rating {
            Some(average) if average.is_finite() => (average / 5.0).clamp(0.0, 1.0),
            _ => DEFAULT_NORMALIZED_RATING,
        };
        Self {
            sentiment_score,
            normalized_rating,
            combined_score: (sentiment_score + normalized_rating) / 2.0,
        }
    }
}

/// A hotel paired with its fused scores for one recommendation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredHotel {
    /// The catalog record.
    pub hotel: Hotel,
    /// Scores derived for this run.
    pub scores: ScoreBundle,
}

/// Score every hotel and return them ordered by combined score, descending.
///
/// Hotels are classified one at a time; the classifier call is the only
/// suspension point. Ties keep the input order (stable sort).
pub async fn score_hotels(
    hotels: &[Hotel],
    classifier: &dyn SentimentClassifier,
) -> Vec<ScoredHotel> {
    let mut scored = Vec::with_capacity(hotels.len());
    for hotel in hotels {
        let sentiment_score = sentiment_signal(hotel, classifier).await;
        scored.push(ScoredHotel {
            hotel: hotel.clone(),
            scores: ScoreBundle::fuse(sentiment_score, hotel.average_platform_rating),
        });
    }
    scored.sort_by(|a, b| b.scores.combined_score.total_cmp(&a.scores.combined_score));
    scored
}

/// Best-effort sentiment for one hotel's review text.
///
/// Blank review text skips the classifier entirely; classifier errors are
/// logged and replaced by [`FALLBACK_SENTIMENT_SCORE`].
async fn sentiment_signal(hotel: &Hotel, classifier: &dyn SentimentClassifier) -> f64 {
    let text = hotel.reviews_summary.trim();
    if text.is_empty() {
        return FALLBACK_SENTIMENT_SCORE;
    }
    match classifier.classify(text, SENTIMENT_MAX_LENGTH).await {
        Ok(sentiment) => sentiment.signal(),
        Err(err) => {
            log::warn!(
                "sentiment classification failed for {}: {err}; using fallback score",
                hotel.key()
            );
            FALLBACK_SENTIMENT_SCORE
        }
    }
}

fn sanitise_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{Sentiment, SentimentError, SentimentLabel};
    use crate::test_support::StaticClassifier;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    #[rstest]
    #[case(0.8, Some(4.0), 0.8, 0.8)]
    #[case(0.6, Some(10.0), 1.0, 0.8)]
    #[case(0.6, Some(-1.0), 0.0, 0.3)]
    #[case(0.4, None, 0.5, 0.45)]
    #[case(0.4, Some(f64::NAN), 0.5, 0.45)]
    #[case(f64::NAN, Some(5.0), 1.0, 0.5)]
    fn fuse_scenarios(
        #[case] sentiment: f64,
        #[case] average: Option<f64>,
        #[case] expected_rating: f64,
        #[case] expected_combined: f64,
    ) {
        let bundle = ScoreBundle::fuse(sentiment, average);
        assert!((bundle.normalized_rating - expected_rating).abs() < TOLERANCE);
        assert!((bundle.combined_score - expected_combined).abs() < TOLERANCE);
        assert!((0.0..=1.0).contains(&bundle.combined_score));
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.5)]
    #[case(1.0)]
    fn fuse_without_rating_uses_exact_default(#[case] sentiment: f64) {
        let bundle = ScoreBundle::fuse(sentiment, None);
        assert_eq!(bundle.normalized_rating, DEFAULT_NORMALIZED_RATING);
    }

    #[tokio::test]
    async fn classifier_error_falls_back_without_escaping() {
        let classifier = StaticClassifier::with_error(SentimentError::Parse {
            message: "bad body".to_owned(),
        });
        let hotels = vec![
            Hotel::new("Bloom Hotel", "New Delhi")
                .with_reviews_summary("clean rooms, friendly staff")
                .with_average_platform_rating(4.0),
        ];

        let scored = score_hotels(&hotels, &classifier).await;

        assert_eq!(scored.len(), 1);
        let bundle = scored[0].scores;
        assert_eq!(bundle.sentiment_score, FALLBACK_SENTIMENT_SCORE);
        assert!((bundle.combined_score - 0.75).abs() < TOLERANCE);
    }

    #[tokio::test]
    async fn blank_review_text_skips_classification() {
        let classifier = StaticClassifier::with_sentiment(Sentiment::new(
            SentimentLabel::Negative,
            1.0,
        ));
        let hotels = vec![Hotel::new("Bloom Hotel", "New Delhi").with_reviews_summary("   ")];

        let scored = score_hotels(&hotels, &classifier).await;

        assert_eq!(scored[0].scores.sentiment_score, FALLBACK_SENTIMENT_SCORE);
    }

    #[tokio::test]
    async fn orders_by_combined_score_descending() {
        let classifier = StaticClassifier::with_sentiment(Sentiment::new(
            SentimentLabel::Positive,
            0.9,
        ));
        let hotels = vec![
            Hotel::new("Low", "New Delhi")
                .with_reviews_summary("fine")
                .with_average_platform_rating(2.0),
            Hotel::new("High", "New Delhi")
                .with_reviews_summary("fine")
                .with_average_platform_rating(5.0),
        ];

        let scored = score_hotels(&hotels, &classifier).await;

        assert_eq!(scored[0].hotel.name, "High");
        assert_eq!(scored[1].hotel.name, "Low");
    }
}
