//! Property coverage for the filter/sort/truncate pipeline.

use proptest::prelude::*;
use stayfinder_core::{DEFAULT_PRICE, Hotel, PriceRange, RESULT_LIMIT, RankCriteria, rank};

fn arb_hotel() -> impl Strategy<Value = Hotel> {
    (
        any::<u32>(),
        prop::option::of(0.0..10.0f64),
        prop::option::of(100.0..20_000.0f64),
        prop::option::of(1.0..5.0f64),
    )
        .prop_map(|(id, overall_score, price_range, hotel_star_rating)| {
            let mut hotel = Hotel::new(format!("Hotel {id}"), "New Delhi");
            hotel.overall_score = overall_score;
            hotel.price_range = price_range;
            hotel.hotel_star_rating = hotel_star_rating;
            hotel
        })
}

proptest! {
    #[test]
    fn ai_score_order_is_non_increasing(
        hotels in prop::collection::vec(arb_hotel(), 0..12),
    ) {
        let ranked = rank(&hotels, &RankCriteria::default());
        prop_assert!(ranked.len() <= RESULT_LIMIT);
        let scores: Vec<f64> = ranked
            .iter()
            .map(|hotel| hotel.overall_score.unwrap_or(0.0))
            .collect();
        prop_assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn price_filter_bounds_every_result(
        hotels in prop::collection::vec(arb_hotel(), 0..12),
        min in 0.0..10_000.0f64,
        span in 0.0..10_000.0f64,
    ) {
        let range = PriceRange::new(min, min + span).unwrap();
        let criteria = RankCriteria {
            price: Some(range),
            ..RankCriteria::default()
        };
        let ranked = rank(&hotels, &criteria);
        prop_assert!(ranked.len() <= RESULT_LIMIT);
        for hotel in &ranked {
            prop_assert!(range.contains(hotel.price_range.unwrap_or(DEFAULT_PRICE)));
        }
    }

    #[test]
    fn ranking_never_mutates_the_input(
        hotels in prop::collection::vec(arb_hotel(), 0..12),
    ) {
        let before = hotels.clone();
        let _ranked = rank(&hotels, &RankCriteria::default());
        prop_assert_eq!(hotels, before);
    }
}
