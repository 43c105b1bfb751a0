//! Tunable weights for each scoring contribution.
#![forbid(unsafe_code)]

use restroom_core::{HoursPolicy, UNPARSABLE_HOURS_POLICY};

use crate::ScoreWeightsError;

/// Weights applied to each scoring contribution.
///
/// The defaults reproduce the production scoring model: +5 when open, +3 per
/// matched amenity, twice the cleanliness and safety ratings, and a
/// proximity reward of `10 - 100 * d` floored at zero. Visit affinity is off
/// until a weight is chosen for it.
///
/// # Examples
/// ```
/// use restroom_scorer::ScoreWeights;
///
/// let weights = ScoreWeights::default().with_affinity_per_visit(0.5);
/// assert_eq!(weights.open_bonus, 5.0);
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Flat bonus for a site that is open at the request time.
    pub open_bonus: f64,
    /// Bonus per preferred amenity offered by the site.
    pub amenity_match: f64,
    /// Multiplier applied to the cleanliness rating.
    pub cleanliness: f64,
    /// Multiplier applied to the safety rating.
    pub safety: f64,
    /// Proximity reward at zero distance.
    pub proximity_max: f64,
    /// Reward lost per degree of distance.
    pub proximity_decay: f64,
    /// Bonus per recorded visit to the site.
    pub affinity_per_visit: f64,
    /// How to treat sites whose opening hours cannot be read.
    pub hours_policy: HoursPolicy,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            open_bonus: 5.0,
            amenity_match: 3.0,
            cleanliness: 2.0,
            safety: 2.0,
            proximity_max: 10.0,
            proximity_decay: 100.0,
            affinity_per_visit: 0.0,
            hours_policy: UNPARSABLE_HOURS_POLICY,
        }
    }
}

impl ScoreWeights {
    /// Set the per-visit affinity weight while returning `self` for chaining.
    #[must_use]
    pub const fn with_affinity_per_visit(mut self, weight: f64) -> Self {
        self.affinity_per_visit = weight;
        self
    }

    /// Set the unparsable-hours policy while returning `self` for chaining.
    #[must_use]
    pub const fn with_hours_policy(mut self, policy: HoursPolicy) -> Self {
        self.hours_policy = policy;
        self
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError::Invalid`] naming the first weight that is
    /// negative or not finite.
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        match self
            .named()
            .into_iter()
            .find(|&(_, value)| !value.is_finite() || value < 0.0)
        {
            Some((field, value)) => Err(ScoreWeightsError::Invalid { field, value }),
            None => Ok(self),
        }
    }

    const fn named(self) -> [(&'static str, f64); 7] {
        [
            ("open_bonus", self.open_bonus),
            ("amenity_match", self.amenity_match),
            ("cleanliness", self.cleanliness),
            ("safety", self.safety),
            ("proximity_max", self.proximity_max),
            ("proximity_decay", self.proximity_decay),
            ("affinity_per_visit", self.affinity_per_visit),
        ]
    }
}
