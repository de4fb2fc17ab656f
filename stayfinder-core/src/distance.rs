//! Great-circle distance between two coordinates.
//!
//! The haversine formula on a spherical Earth approximation is accurate to
//! well under a percent at city scale, which is all the "nearest hotels"
//! ranking needs.

use geo::Coord;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two WGS84 coordinates, in kilometres.
///
/// Non-negative and symmetric; identical coordinates yield exactly `0.0`.
/// Coordinates use `x = longitude`, `y = latitude` in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stayfinder_core::haversine_km;
///
/// let connaught_place = Coord { x: 77.2167, y: 28.6315 };
/// assert_eq!(haversine_km(connaught_place, connaught_place), 0.0);
/// ```
#[must_use]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lon = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
