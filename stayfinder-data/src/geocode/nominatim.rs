//! Nominatim search API response types.
//!
//! The search endpoint returns a JSON array of hits; coordinates arrive as
//! strings and are parsed on demand.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use std::num::ParseFloatError;

use geo::Coord;
use serde::Deserialize;

/// One hit from the Nominatim search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Human-readable place name, when provided.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchHit {
    /// Parse the hit into a coordinate (`x = lon`, `y = lat`).
    pub fn coordinate(&self) -> Result<Coord<f64>, ParseFloatError> {
        Ok(Coord {
            x: self.lon.trim().parse()?,
            y: self.lat.trim().parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_search_hit() {
        let json = r#"[{
            "lat": "28.6129",
            "lon": "77.2295",
            "display_name": "India Gate, New Delhi, India"
        }]"#;

        let hits: Vec<SearchHit> = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(hits.len(), 1);
        let coord = hits[0].coordinate().expect("should parse");
        assert_eq!(coord.y, 28.6129);
        assert_eq!(coord.x, 77.2295);
        assert_eq!(
            hits[0].display_name.as_deref(),
            Some("India Gate, New Delhi, India")
        );
    }

    #[test]
    fn deserialise_empty_result() {
        let hits: Vec<SearchHit> = serde_json::from_str("[]").expect("should deserialise");
        assert!(hits.is_empty());
    }

    #[test]
    fn invalid_coordinate_reports_parse_error() {
        let hit = SearchHit {
            lat: "not-a-number".to_owned(),
            lon: "77.2295".to_owned(),
            display_name: None,
        };
        assert!(hit.coordinate().is_err());
    }
}
