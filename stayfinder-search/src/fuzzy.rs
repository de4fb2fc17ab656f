//! Approximate string matching for area queries.
//!
//! Similarity is Sørensen–Dice over character bigrams of the lowercased
//! strings (whitespace ignored), which rewards a landmark query contained
//! in a longer address the way a plain edit-distance ratio does not.

/// Similarity between two strings, in `[0, 1]`.
///
/// Deterministic and dependent only on the two strings; case differences
/// are ignored.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase())
}

/// Return the pool entries closest to `query`, best first.
///
/// Candidates scoring below `min_similarity` are excluded; the result is
/// truncated to `max_results`. Ordering is deterministic: descending
/// similarity with ties broken by original pool order (stable sort). A
/// blank query or an empty pool yields an empty result, not an error.
///
/// # Examples
/// ```
/// use stayfinder_search::close_matches;
///
/// let pool = vec![
///     "Connaught Place, New Delhi".to_owned(),
///     "Nariman Point, Mumbai".to_owned(),
/// ];
/// let matches = close_matches("connaught place", &pool, 10, 0.6);
/// assert_eq!(matches, ["Connaught Place, New Delhi"]);
/// ```
#[must_use]
pub fn close_matches<'p>(
    query: &str,
    pool: &'p [String],
    max_results: usize,
    min_similarity: f64,
) -> Vec<&'p str> {
    let query = query.trim();
    if query.is_empty() || pool.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&'p str, f64)> = pool
        .iter()
        .map(|candidate| (candidate.as_str(), similarity(query, candidate)))
        .filter(|(_, score)| *score >= min_similarity)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(max_results);
    scored.into_iter().map(|(candidate, _)| candidate).collect()
}
