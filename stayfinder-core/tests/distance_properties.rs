//! Property coverage for the great-circle distance utility.

use geo::Coord;
use proptest::prelude::*;
use stayfinder_core::haversine_km;

proptest! {
    #[test]
    fn distance_is_symmetric_and_non_negative(
        lon_a in -180.0..180.0f64,
        lat_a in -90.0..90.0f64,
        lon_b in -180.0..180.0f64,
        lat_b in -90.0..90.0f64,
    ) {
        let a = Coord { x: lon_a, y: lat_a };
        let b = Coord { x: lon_b, y: lat_b };
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn self_distance_is_exactly_zero(
        lon in -180.0..180.0f64,
        lat in -90.0..90.0f64,
    ) {
        let point = Coord { x: lon, y: lat };
        prop_assert_eq!(haversine_km(point, point), 0.0);
    }
}
