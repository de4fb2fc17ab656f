//! Area-query resolution with staged fallbacks and supersession.
//!
//! A resolution walks `FUZZY_ATTEMPT → GEOCODE_ATTEMPT → fallback`: a fuzzy
//! hit over the candidates' address/city pool is terminal success and the
//! geocoder is never consulted; otherwise the query is geocoded and the
//! candidates ranked by great-circle distance from the resolved centre; a
//! missing centre or an adapter failure degrades to the head of the
//! candidate list with an advisory status. Every failure path yields a
//! well-formed result set.
//!
//! Each [`SearchSession::resolve`] call captures a generation number at
//! start and re-checks it before committing, so a newer query always
//! supersedes an older, still-suspended one and stale results are discarded
//! silently.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use geo::Coord;
use stayfinder_core::{CITY_ALL, Geocoder, Hotel, HotelKey, RESULT_LIMIT, haversine_km};

use crate::fuzzy::close_matches;

/// Maximum number of fuzzy matches considered per attempt.
pub const MAX_FUZZY_MATCHES: usize = 10;

/// Minimum similarity for a fuzzy match to count.
pub const MIN_FUZZY_SIMILARITY: f64 = 0.6;

/// Advisory shown when no exact match was found.
pub const NO_MATCH_ADVISORY: &str = "no exact match; showing top results";

/// How a resolution concluded.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// Blank query: no active search.
    Idle,
    /// Fuzzy match succeeded; the geocoder was not consulted.
    Matched,
    /// Geocoding succeeded; hotels are ordered by distance from `center`.
    DistanceRanked {
        /// Resolved centre (`x = lon`, `y = lat`).
        center: Coord<f64>,
        /// Distance in kilometres from `center` per candidate hotel.
        distances: HashMap<HotelKey, f64>,
    },
    /// Nothing matched and no centre resolved; showing the candidate head.
    NoMatchFallback,
    /// An adapter failed; showing the candidate head.
    SearchFailed {
        /// User-facing failure description.
        message: String,
    },
}

/// Result of one area-query resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaResolution {
    /// The trimmed query that produced this resolution.
    pub query: String,
    /// Hotels to present, at most [`RESULT_LIMIT`].
    pub hotels: Vec<Hotel>,
    /// How the resolution concluded.
    pub outcome: ResolutionOutcome,
}

impl AreaResolution {
    /// Advisory message for non-exact outcomes, if any.
    #[must_use]
    pub fn advisory(&self) -> Option<String> {
        match &self.outcome {
            ResolutionOutcome::NoMatchFallback => Some(NO_MATCH_ADVISORY.to_owned()),
            ResolutionOutcome::SearchFailed { message } => Some(message.clone()),
            _ => None,
        }
    }
}

/// Scope within which area resolutions supersede each other.
///
/// The session holds only a generation counter; resolution state itself is
/// returned to the caller and replaced wholesale, never merged.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    /// Create a session with no resolutions yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an area query against the already-filtered candidate set.
    ///
    /// Returns `None` when a newer query superseded this one while it was
    /// suspended; callers must discard that silently. A blank query
    /// resolves to [`ResolutionOutcome::Idle`] with no hotels.
    pub async fn resolve(
        &self,
        query: &str,
        city: Option<&str>,
        candidates: &[Hotel],
        geocoder: &dyn Geocoder,
    ) -> Option<AreaResolution> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.is_empty() {
            return self.commit(
                generation,
                AreaResolution {
                    query: String::new(),
                    hotels: Vec::new(),
                    outcome: ResolutionOutcome::Idle,
                },
            );
        }

        if let Some(hotels) = fuzzy_attempt(query, candidates) {
            return self.commit(
                generation,
                AreaResolution {
                    query: query.to_owned(),
                    hotels,
                    outcome: ResolutionOutcome::Matched,
                },
            );
        }

        let lookup = compose_lookup(query, city);
        let (hotels, outcome) = match geocoder.geocode(&lookup).await {
            Ok(Some(center)) => distance_ranked(center, candidates),
            Ok(None) => {
                log::debug!("no geocode result for '{lookup}'");
                (candidate_head(candidates), ResolutionOutcome::NoMatchFallback)
            }
            Err(err) => {
                log::warn!("area geocoding failed for '{lookup}': {err}");
                (
                    candidate_head(candidates),
                    ResolutionOutcome::SearchFailed {
                        message: format!("search failed: {err}"),
                    },
                )
            }
        };
        self.commit(
            generation,
            AreaResolution {
                query: query.to_owned(),
                hotels,
                outcome,
            },
        )
    }

    fn commit(&self, generation: u64, resolution: AreaResolution) -> Option<AreaResolution> {
        if self.generation.load(Ordering::SeqCst) == generation {
            Some(resolution)
        } else {
            log::debug!("discarding superseded resolution for '{}'", resolution.query);
            None
        }
    }
}

/// Fuzzy-match the query against the candidates' address/city pool.
///
/// Matches are deduplicated by owning hotel (composite key, so duplicate
/// address text across hotels is tolerated), kept in first-seen order, and
/// truncated to [`RESULT_LIMIT`]. `None` means the attempt produced no
/// matches and the resolver should fall through to geocoding.
fn fuzzy_attempt(query: &str, candidates: &[Hotel]) -> Option<Vec<Hotel>> {
    let pool: Vec<String> = candidates
        .iter()
        .flat_map(|hotel| [hotel.address.as_str(), hotel.city.as_str()])
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
        .collect();

    let matches = close_matches(query, &pool, MAX_FUZZY_MATCHES, MIN_FUZZY_SIMILARITY);
    if matches.is_empty() {
        return None;
    }

    let mut seen: HashSet<HotelKey> = HashSet::new();
    let mut hotels = Vec::new();
    for text in matches {
        for hotel in candidates
            .iter()
            .filter(|hotel| hotel.address == text || hotel.city == text)
        {
            if seen.insert(hotel.key()) {
                hotels.push(hotel.clone());
            }
        }
    }
    hotels.truncate(RESULT_LIMIT);
    Some(hotels)
}

/// Compose the geocoder lookup text, scoping to the selected city.
fn compose_lookup(query: &str, city: Option<&str>) -> String {
    match city {
        Some(city) if !city.is_empty() && !city.eq_ignore_ascii_case(CITY_ALL) => {
            format!("{query}, {city}")
        }
        _ => query.to_owned(),
    }
}

/// Rank candidates by distance from the resolved centre.
///
/// Hotels without coordinates cannot be measured and are left out of both
/// the distance map and the ranked list.
fn distance_ranked(center: Coord<f64>, candidates: &[Hotel]) -> (Vec<Hotel>, ResolutionOutcome) {
    let mut measured: Vec<(f64, &Hotel)> = candidates
        .iter()
        .filter_map(|hotel| {
            hotel
                .coordinates
                .map(|coords| (haversine_km(center, coords), hotel))
        })
        .collect();
    let distances: HashMap<HotelKey, f64> = measured
        .iter()
        .map(|(km, hotel)| (hotel.key(), *km))
        .collect();
    measured.sort_by(|a, b| a.0.total_cmp(&b.0));
    let hotels = measured
        .into_iter()
        .take(RESULT_LIMIT)
        .map(|(_, hotel)| hotel.clone())
        .collect();
    (hotels, ResolutionOutcome::DistanceRanked { center, distances })
}

/// The unranked fallback: the head of the candidate list.
fn candidate_head(candidates: &[Hotel]) -> Vec<Hotel> {
    candidates.iter().take(RESULT_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("New Delhi"), "India Gate, New Delhi")]
    #[case(Some("all"), "India Gate")]
    #[case(Some("ALL"), "India Gate")]
    #[case(Some(""), "India Gate")]
    #[case(None, "India Gate")]
    fn lookup_scopes_to_selected_city(#[case] city: Option<&str>, #[case] expected: &str) {
        assert_eq!(compose_lookup("India Gate", city), expected);
    }

    #[rstest]
    fn duplicate_address_text_dedups_by_owning_hotel() {
        let candidates = vec![
            Hotel::new("Bloom Hotel", "New Delhi").with_address("Link Road, Karol Bagh"),
            Hotel::new("Bloom Suites", "New Delhi").with_address("Link Road, Karol Bagh"),
        ];
        let hotels = fuzzy_attempt("Link Road Karol Bagh", &candidates).unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].name, "Bloom Hotel");
        assert_eq!(hotels[1].name, "Bloom Suites");
    }

    #[rstest]
    fn fuzzy_attempt_truncates_to_result_limit() {
        let candidates: Vec<Hotel> = (0..8)
            .map(|i| Hotel::new(format!("Hotel {i}"), "New Delhi").with_address("Connaught Place"))
            .collect();
        let hotels = fuzzy_attempt("Connaught Place", &candidates).unwrap();
        assert_eq!(hotels.len(), RESULT_LIMIT);
    }

    #[rstest]
    fn fuzzy_attempt_ignores_blank_pool_entries() {
        let candidates = vec![Hotel::new("Nameless", "")];
        assert!(fuzzy_attempt("anything", &candidates).is_none());
    }
}
