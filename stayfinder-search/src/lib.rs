//! Fuzzy matching and area-query resolution for the Stayfinder engine.
//!
//! [`close_matches`] approximates a free-text landmark query against a pool
//! of address and city strings; [`SearchSession::resolve`] orchestrates the
//! three-stage fallback (fuzzy match, geocode-and-distance, unranked
//! default) and guarantees that a newer query always supersedes an older,
//! still-suspended one.

#![forbid(unsafe_code)]

pub mod fuzzy;
pub mod resolver;

pub use fuzzy::{close_matches, similarity};
pub use resolver::{
    AreaResolution, MAX_FUZZY_MATCHES, MIN_FUZZY_SIMILARITY, NO_MATCH_ADVISORY, ResolutionOutcome,
    SearchSession,
};
