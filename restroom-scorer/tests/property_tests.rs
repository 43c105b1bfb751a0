#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Property-based tests for the ranking engine.
//!
//! # Invariants tested
//!
//! - **Bounded output:** never more than `top_k` results, and never more
//!   than the number of located candidates.
//! - **Ordering:** scores are non-increasing and finite.
//! - **Determinism:** ranking the same input twice yields the same order.
//! - **Monotonicity:** a cleaner site never scores lower than an otherwise
//!   identical one.

use geo::Coord;
use proptest::prelude::*;
use restroom_core::{FixedClock, Site, SiteBuilder, UserContext};
use restroom_scorer::RankingEngine;

const AMENITIES: [&str; 4] = ["wheelchair", "baby_changing", "gender_neutral", "shower"];
const HOURS: [&str; 5] = ["00:00-23:59", "08:00-17:00", "22:00-06:00", "garbage", ""];
const CROWDS: [&str; 4] = ["low", "medium", "HIGH", "packed"];

fn engine() -> RankingEngine {
    RankingEngine::default().with_clock(FixedClock::at(12, 0))
}

fn user() -> UserContext {
    UserContext::new(Coord {
        x: -117.82,
        y: 33.68,
    })
    .with_time("12:00")
    .with_preferences(["wheelchair", "shower"])
}

prop_compose! {
    fn site_strategy(index: usize)(
        located in prop::bool::weighted(0.9),
        lat in 33.0_f64..34.5,
        lon in -118.5_f64..-117.0,
        amenities in prop::sample::subsequence(AMENITIES.to_vec(), 0..=AMENITIES.len()),
        cleanliness in 0.0_f64..5.0,
        safety in 0.0_f64..5.0,
        hours in prop::sample::select(HOURS.to_vec()),
        crowd in prop::sample::select(CROWDS.to_vec()),
    ) -> Site {
        let builder = SiteBuilder::new(format!("site-{index}"))
            .amenities(amenities)
            .cleanliness(cleanliness)
            .safety(safety)
            .hours(hours)
            .crowd(crowd);
        if located {
            builder.at(lat, lon).build()
        } else {
            builder.without_location().build()
        }
    }
}

fn sites_strategy() -> impl Strategy<Value = Vec<Site>> {
    (0_usize..12).prop_flat_map(|len| (0..len).map(site_strategy).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: output length is `min(top_k, located candidates)`.
    #[test]
    fn output_is_bounded(sites in sites_strategy(), top_k in 0_usize..15) {
        let located = sites.iter().filter(|site| site.is_rankable()).count();
        let ranked = engine()
            .rank(&sites, &user(), None, top_k)
            .expect("valid context");
        prop_assert_eq!(ranked.len(), top_k.min(located));
    }

    /// Property: scores come back best first and are always finite.
    #[test]
    fn scores_are_ordered_and_finite(sites in sites_strategy()) {
        let outcome = engine()
            .rank_detailed(&sites, &user(), None, sites.len())
            .expect("valid context");
        for entry in &outcome.ranked {
            prop_assert!(entry.score.is_finite());
        }
        for pair in outcome.ranked.windows(2) {
            if let [first, second] = pair {
                prop_assert!(first.score >= second.score);
            }
        }
    }

    /// Property: ranking is a pure function of its inputs.
    #[test]
    fn ranking_is_deterministic(sites in sites_strategy()) {
        let engine = engine();
        let first = engine
            .rank(&sites, &user(), None, sites.len())
            .expect("valid context");
        let second = engine
            .rank(&sites, &user(), None, sites.len())
            .expect("valid context");
        let first_ids: Vec<&str> = first.iter().map(|site| site.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|site| site.id.as_str()).collect();
        prop_assert_eq!(first_ids, second_ids);
    }

    /// Property: raising cleanliness never lowers a site's score.
    #[test]
    fn cleaner_sites_never_score_lower(
        base in site_strategy(0),
        extra in 0.0_f64..5.0,
    ) {
        let mut cleaner = base.clone();
        cleaner.id = "cleaner".to_owned();
        cleaner.ratings.cleanliness = base.ratings.cleanliness.max(0.0).max(extra);
        let sites = vec![base, cleaner];
        let outcome = engine()
            .rank_detailed(&sites, &user(), None, 2)
            .expect("valid context");
        let score_of = |id: &str| {
            outcome
                .ranked
                .iter()
                .find(|entry| entry.site.id == id)
                .map(|entry| entry.score)
        };
        if let (Some(base_score), Some(cleaner_score)) = (score_of("site-0"), score_of("cleaner")) {
            prop_assert!(cleaner_score >= base_score);
        }
    }
}
