//! End-to-end behaviour of the area-query resolver.

use std::sync::Arc;

use async_trait::async_trait;
use geo::Coord;
use rstest::rstest;
use stayfinder_core::test_support::{CountingGeocoder, StaticGeocoder, sample_hotels};
use stayfinder_core::{GeocodeError, Geocoder, Hotel, RESULT_LIMIT};
use stayfinder_search::{AreaResolution, NO_MATCH_ADVISORY, ResolutionOutcome, SearchSession};
use tokio::sync::{Mutex, oneshot};

const CONNAUGHT_PLACE: Coord<f64> = Coord {
    x: 77.2167,
    y: 28.6315,
};

async fn resolve(
    query: &str,
    candidates: &[Hotel],
    geocoder: &dyn Geocoder,
) -> AreaResolution {
    SearchSession::new()
        .resolve(query, Some("New Delhi"), candidates, geocoder)
        .await
        .expect("single resolution cannot be superseded")
}

#[tokio::test]
async fn fuzzy_match_never_consults_the_geocoder() {
    let candidates = sample_hotels();
    let geocoder = CountingGeocoder::new(StaticGeocoder::with_center(CONNAUGHT_PLACE));

    let resolution = resolve("Connaught Place", &candidates, &geocoder).await;

    assert_eq!(resolution.outcome, ResolutionOutcome::Matched);
    assert_eq!(resolution.hotels[0].name, "The Imperial");
    assert_eq!(geocoder.calls(), 0);
}

#[tokio::test]
async fn unmatched_query_without_centre_falls_back_to_candidate_head() {
    let candidates = sample_hotels();
    let geocoder = StaticGeocoder::with_no_match();

    let resolution = resolve("asdkjasd", &candidates, &geocoder).await;

    assert_eq!(resolution.outcome, ResolutionOutcome::NoMatchFallback);
    assert_eq!(resolution.advisory().as_deref(), Some(NO_MATCH_ADVISORY));
    let expected: Vec<String> = candidates
        .iter()
        .take(RESULT_LIMIT)
        .map(|hotel| hotel.name.clone())
        .collect();
    let got: Vec<String> = resolution
        .hotels
        .iter()
        .map(|hotel| hotel.name.clone())
        .collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn resolved_centre_ranks_candidates_by_ascending_distance() {
    let candidates = sample_hotels();
    let geocoder = StaticGeocoder::with_center(CONNAUGHT_PLACE);

    let resolution = resolve("asdkjasd", &candidates, &geocoder).await;

    let ResolutionOutcome::DistanceRanked { center, distances } = &resolution.outcome else {
        panic!("expected distance ranking, got {:?}", resolution.outcome);
    };
    assert_eq!(*center, CONNAUGHT_PLACE);
    assert_eq!(resolution.hotels.len(), RESULT_LIMIT);
    assert_eq!(distances.len(), candidates.len());

    let ordered: Vec<f64> = resolution
        .hotels
        .iter()
        .map(|hotel| distances[&hotel.key()])
        .collect();
    assert!(ordered.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(resolution.hotels[0].name, "The Imperial");
    assert!(resolution.hotels.iter().all(|hotel| hotel.city == "New Delhi"));
}

#[tokio::test]
async fn geocoder_failure_degrades_to_candidate_head() {
    let candidates = sample_hotels();
    let geocoder = StaticGeocoder::with_error(GeocodeError::Network {
        url: "http://geocoder.invalid/search".to_owned(),
        message: "connection refused".to_owned(),
    });

    let resolution = resolve("asdkjasd", &candidates, &geocoder).await;

    assert!(matches!(
        resolution.outcome,
        ResolutionOutcome::SearchFailed { .. }
    ));
    assert_eq!(resolution.hotels.len(), RESULT_LIMIT);
    assert!(resolution.advisory().is_some());
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_query_means_no_active_search(#[case] query: &str) {
    let candidates = sample_hotels();
    let geocoder = StaticGeocoder::with_no_match();

    let resolution = resolve(query, &candidates, &geocoder).await;

    assert_eq!(resolution.outcome, ResolutionOutcome::Idle);
    assert!(resolution.hotels.is_empty());
}

/// Geocoder that parks until released, so a test can hold a resolution at
/// its suspension point.
struct GatedGeocoder {
    release: Mutex<Option<oneshot::Receiver<()>>>,
    center: Coord<f64>,
}

#[async_trait]
impl Geocoder for GatedGeocoder {
    async fn geocode(&self, _text: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let release = self.release.lock().await.take();
        if let Some(release) = release {
            let _ = release.await;
        }
        Ok(Some(self.center))
    }
}

#[tokio::test]
async fn newer_query_supersedes_a_suspended_resolution() {
    let session = Arc::new(SearchSession::new());
    let candidates = sample_hotels();
    let (release_tx, release_rx) = oneshot::channel();
    let gated = Arc::new(GatedGeocoder {
        release: Mutex::new(Some(release_rx)),
        center: CONNAUGHT_PLACE,
    });

    let first = tokio::spawn({
        let session = Arc::clone(&session);
        let candidates = candidates.clone();
        let gated = Arc::clone(&gated);
        async move {
            session
                .resolve("qwerty landmark", None, &candidates, gated.as_ref())
                .await
        }
    });
    // Let the first resolution reach the geocoder and suspend.
    tokio::task::yield_now().await;

    let second = session
        .resolve("zxcvb landmark", None, &candidates, &StaticGeocoder::with_no_match())
        .await;
    assert!(second.is_some(), "newest resolution must commit");

    release_tx.send(()).expect("gated geocoder still waiting");
    let stale = first.await.expect("resolution task panicked");
    assert!(stale.is_none(), "superseded resolution must be discarded");
}
