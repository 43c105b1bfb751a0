//! Per-factor view of a site's score.
#![forbid(unsafe_code)]

/// Individual contributions that add up to a site's score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Open-now bonus.
    pub open: f64,
    /// Amenity match bonus.
    pub amenities: f64,
    /// Cleanliness contribution.
    pub cleanliness: f64,
    /// Safety contribution.
    pub safety: f64,
    /// Crowd level contribution.
    pub crowd: f64,
    /// Proximity reward.
    pub proximity: f64,
    /// Visit-history affinity.
    pub affinity: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions.
    ///
    /// Returns `0.0` when the sum is not finite, which can only happen when
    /// a rating overflowed upstream.
    ///
    /// # Examples
    /// ```
    /// use restroom_scorer::ScoreBreakdown;
    ///
    /// let breakdown = ScoreBreakdown {
    ///     open: 5.0,
    ///     crowd: 1.0,
    ///     ..ScoreBreakdown::default()
    /// };
    /// assert_eq!(breakdown.total(), 6.0);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the score is the sum of its contributions"
    )]
    pub const fn total(&self) -> f64 {
        let sum = self.open
            + self.amenities
            + self.cleanliness
            + self.safety
            + self.crowd
            + self.proximity
            + self.affinity;
        if sum.is_finite() { sum } else { 0.0 }
    }
}
