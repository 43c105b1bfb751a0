//! Individual scoring rules.
//!
//! Each rule computes one contribution in isolation so it can be tested and
//! tuned without touching the others.

use std::collections::BTreeSet;

use geo::{Coord, Distance, Euclidean, Point};
use restroom_core::{ClockTime, CrowdLevel, OpeningHours, Site};

use crate::ScoreWeights;

/// Fixed crowd table: quiet sites earn the most.
///
/// # Examples
/// ```
/// use restroom_core::CrowdLevel;
/// use restroom_scorer::crowd_bonus;
///
/// assert_eq!(crowd_bonus(CrowdLevel::Low), 3.0);
/// assert_eq!(crowd_bonus(CrowdLevel::High), 0.0);
/// ```
#[must_use]
pub const fn crowd_bonus(level: CrowdLevel) -> f64 {
    match level {
        CrowdLevel::Low => 3.0,
        CrowdLevel::Medium => 1.0,
        CrowdLevel::High => 0.0,
    }
}

/// Straight-line distance between two coordinates in raw degrees.
///
/// Longitude degrees shrink towards the poles, so this overstates east-west
/// separation away from the equator. Ranking only needs a consistent
/// ordering over nearby candidates.
#[must_use]
pub fn degree_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

pub(crate) fn open_bonus(site: &Site, now: ClockTime, weights: &ScoreWeights) -> f64 {
    let status = OpeningHours::status(site.opening_hours.as_deref(), now);
    if weights.hours_policy.is_open(status) {
        weights.open_bonus
    } else {
        0.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "amenity bonus scales the match count by its weight"
)]
pub(crate) fn amenity_bonus(
    site: &Site,
    preferences: &BTreeSet<String>,
    weights: &ScoreWeights,
) -> f64 {
    let matched = site.amenities.intersection(preferences).count();
    weights.amenity_match * count_to_f64(u64::try_from(matched).unwrap_or(u64::MAX))
}

#[expect(
    clippy::float_arithmetic,
    reason = "ratings contribute linearly to the score"
)]
pub(crate) const fn rating_bonus(rating: f64, weight: f64) -> f64 {
    weight * rating
}

#[expect(
    clippy::float_arithmetic,
    reason = "proximity reward decays linearly with distance"
)]
pub(crate) fn proximity_bonus(distance: f64, weights: &ScoreWeights) -> f64 {
    (weights.proximity_max - weights.proximity_decay * distance).max(0.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "affinity scales the visit count by its weight"
)]
pub(crate) fn affinity_bonus(visits: u64, weights: &ScoreWeights) -> f64 {
    weights.affinity_per_visit * count_to_f64(visits)
}

// Counts beyond `u32::MAX` saturate; f64 represents every u32 exactly.
fn count_to_f64(count: u64) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating point values"
)]
mod tests {
    use super::*;
    use restroom_core::{HoursPolicy, SiteBuilder};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    fn noon() -> ClockTime {
        ClockTime::new(12, 0).expect("valid time")
    }

    #[rstest]
    #[case(Some("00:00-23:59"), 5.0)]
    #[case(Some("13:00-18:00"), 0.0)]
    #[case(Some("13:00-24:00"), 0.0)]
    #[case(Some("06:00-24:00"), 5.0)]
    #[case(Some("garbage"), 5.0)]
    #[case(Some(""), 5.0)]
    #[case(None, 5.0)]
    fn open_bonus_fails_open(#[case] hours: Option<&str>, #[case] expected: f64) {
        let mut site = SiteBuilder::new("s").build();
        site.opening_hours = hours.map(str::to_owned);
        let bonus = open_bonus(&site, noon(), &ScoreWeights::default());
        assert!((bonus - expected).abs() < TOLERANCE);
    }

    #[rstest]
    fn fail_closed_policy_withholds_bonus() {
        let site = SiteBuilder::new("s").hours("garbage").build();
        let weights = ScoreWeights::default().with_hours_policy(HoursPolicy::FailClosed);
        assert!(open_bonus(&site, noon(), &weights).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(&["wheelchair"], &["wheelchair"], 3.0)]
    #[case(&["wheelchair", "baby_changing"], &["wheelchair", "baby_changing"], 6.0)]
    #[case(&["wheelchair"], &["gender_neutral"], 0.0)]
    #[case(&[], &["wheelchair"], 0.0)]
    #[case(&["wheelchair"], &[], 0.0)]
    fn amenity_bonus_counts_overlap(
        #[case] offered: &[&str],
        #[case] wanted: &[&str],
        #[case] expected: f64,
    ) {
        let site = SiteBuilder::new("s").amenities(offered.iter().copied()).build();
        let preferences = wanted.iter().map(|&tag| tag.to_owned()).collect();
        let bonus = amenity_bonus(&site, &preferences, &ScoreWeights::default());
        assert!((bonus - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(CrowdLevel::Low, 3.0)]
    #[case(CrowdLevel::Medium, 1.0)]
    #[case(CrowdLevel::High, 0.0)]
    fn crowd_table(#[case] level: CrowdLevel, #[case] expected: f64) {
        assert!((crowd_bonus(level) - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(0.05, 5.0)]
    #[case(0.1, 0.0)]
    #[case(7.5, 0.0)]
    fn proximity_decays_to_zero(#[case] distance: f64, #[case] expected: f64) {
        let bonus = proximity_bonus(distance, &ScoreWeights::default());
        assert!((bonus - expected).abs() < TOLERANCE);
    }

    #[rstest]
    fn distance_is_euclidean_in_degrees() {
        let d = degree_distance(Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 });
        assert!((d - 5.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn affinity_is_disabled_by_default() {
        assert!(affinity_bonus(12, &ScoreWeights::default()).abs() < TOLERANCE);
        let weights = ScoreWeights::default().with_affinity_per_visit(0.5);
        assert!((affinity_bonus(4, &weights) - 2.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn huge_counts_saturate() {
        assert!((count_to_f64(u64::MAX) - f64::from(u32::MAX)).abs() < TOLERANCE);
    }
}
