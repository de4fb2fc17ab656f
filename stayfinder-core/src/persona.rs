//! Traveler archetypes biasing recommendation requests.
//!
//! Personas do not influence local ranking; they are carried through to the
//! remote refine endpoint as its customer segment.
//!
//! # Examples
//! ```
//! use stayfinder_core::Persona;
//!
//! assert_eq!(Persona::Business.as_str(), "business");
//! assert_eq!(Persona::Luxury.to_string(), "luxury");
//! ```

use std::str::FromStr;

use thiserror::Error;

/// A traveler archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Persona {
    /// Traveling with children.
    Family,
    /// Traveling as a pair.
    Couple,
    /// Traveling alone.
    Solo,
    /// Traveling for work.
    Business,
    /// Prioritising premium stays.
    Luxury,
}

/// Error returned when parsing an unknown persona name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown persona '{0}' (expected family, couple, solo, business, or luxury)")]
pub struct PersonaParseError(pub String);

impl Persona {
    /// All personas, in display order.
    pub const ALL: [Self; 5] = [
        Self::Family,
        Self::Couple,
        Self::Solo,
        Self::Business,
        Self::Luxury,
    ];

    /// Return the persona as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Couple => "couple",
            Self::Solo => "solo",
            Self::Business => "business",
            Self::Luxury => "luxury",
        }
    }

    /// The customer-segment label used by the remote refine endpoint.
    #[must_use]
    pub const fn segment_label(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Couple => "Couple",
            Self::Solo => "Solo Traveler",
            Self::Business => "Business Traveler",
            Self::Luxury => "Luxury Traveler",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = PersonaParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|persona| persona.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| PersonaParseError(value.to_owned()))
    }
}
