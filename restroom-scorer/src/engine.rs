//! The ranking engine: score, sort and truncate.
#![forbid(unsafe_code)]

use std::{cmp::Ordering, collections::HashSet, fmt, sync::Arc};

use log::debug;
use restroom_core::{
    Clock, ScoringContext, Scorer, Site, SystemClock, UserContext, VisitHistory,
};

use crate::{
    RankError, ScoreBreakdown, ScoreWeights, ScoreWeightsError,
    rules::{
        affinity_bonus, amenity_bonus, crowd_bonus, degree_distance, open_bonus, proximity_bonus,
        rating_bonus,
    },
};

/// A ranked site together with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedSite<'a> {
    /// The candidate, borrowed from the caller's input.
    pub site: &'a Site,
    /// Per-factor contributions.
    pub breakdown: ScoreBreakdown,
    /// Total score used for ordering.
    pub score: f64,
}

/// Result of a ranking call, including what was left out and why.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankOutcome<'a> {
    /// Best matches first, at most `top_k` long.
    pub ranked: Vec<RankedSite<'a>>,
    /// Candidates skipped because they had no usable location.
    pub unlocated: usize,
    /// Candidates skipped because an earlier ranked candidate had the same
    /// id.
    pub duplicates: usize,
}

impl<'a> RankOutcome<'a> {
    /// Drop the scores and keep the ordered sites.
    #[must_use]
    pub fn into_sites(self) -> Vec<&'a Site> {
        self.ranked.into_iter().map(|entry| entry.site).collect()
    }
}

/// Deterministic multi-factor ranking of candidate sites.
///
/// The engine holds no per-request state and can be shared across threads.
/// Its clock is only consulted for requests that omit a time.
#[derive(Clone)]
pub struct RankingEngine {
    weights: ScoreWeights,
    clock: Arc<dyn Clock>,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankingEngine")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl RankingEngine {
    /// Construct an engine using the system clock.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when any weight is negative or not
    /// finite.
    pub fn new(weights: ScoreWeights) -> Result<Self, ScoreWeightsError> {
        Ok(Self {
            weights: weights.validate()?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for requests without a time.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Weights in effect.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score `site` factor by factor.
    ///
    /// Returns `None` when the site has no usable location.
    #[must_use]
    pub fn breakdown(&self, site: &Site, context: &ScoringContext<'_>) -> Option<ScoreBreakdown> {
        let location = site.location?;
        let weights = &self.weights;
        Some(ScoreBreakdown {
            open: open_bonus(site, context.now, weights),
            amenities: amenity_bonus(site, context.preferences, weights),
            cleanliness: rating_bonus(site.ratings.cleanliness, weights.cleanliness),
            safety: rating_bonus(site.ratings.safety, weights.safety),
            crowd: crowd_bonus(site.crowd_level()),
            proximity: proximity_bonus(degree_distance(context.origin, location), weights),
            affinity: affinity_bonus(context.visits(&site.id), weights),
        })
    }

    /// Return the `top_k` best candidates, best first.
    ///
    /// Candidates without a usable location and repeated ids are skipped
    /// rather than failing the call. Equal scores keep their input order.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidContext`] when the context has no usable
    /// location or an unparsable time.
    pub fn rank<'a, I>(
        &self,
        candidates: I,
        context: &UserContext,
        history: Option<&dyn VisitHistory>,
        top_k: usize,
    ) -> Result<Vec<&'a Site>, RankError>
    where
        I: IntoIterator<Item = &'a Site>,
    {
        self.rank_detailed(candidates, context, history, top_k)
            .map(RankOutcome::into_sites)
    }

    /// Like [`RankingEngine::rank`], but keeps scores and skip counts.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidContext`] when the context has no usable
    /// location or an unparsable time.
    pub fn rank_detailed<'a, I>(
        &self,
        candidates: I,
        context: &UserContext,
        history: Option<&dyn VisitHistory>,
        top_k: usize,
    ) -> Result<RankOutcome<'a>, RankError>
    where
        I: IntoIterator<Item = &'a Site>,
    {
        let scoring = context.resolve(self.clock.as_ref(), history)?;
        let mut outcome = RankOutcome::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for site in candidates {
            // Only ranked records claim their id, so an unlocated record
            // cannot shadow a later usable one.
            let Some(breakdown) = self.breakdown(site, &scoring) else {
                debug!("skipping site {:?}: no usable location", site.id);
                outcome.unlocated += 1;
                continue;
            };
            if !site.id.is_empty() && !seen.insert(site.id.as_str()) {
                debug!("skipping site {:?}: duplicate id", site.id);
                outcome.duplicates += 1;
                continue;
            }
            outcome.ranked.push(RankedSite {
                site,
                breakdown,
                score: <Self as Scorer>::sanitise(breakdown.total()),
            });
        }

        // `sort_by` is stable, so ties keep their input order.
        outcome.ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
        });
        let scored = outcome.ranked.len();
        outcome.ranked.truncate(top_k);
        debug!(
            "ranked {scored} sites at {}, returning {} (skipped {} unlocated, {} duplicate)",
            scoring.now,
            outcome.ranked.len(),
            outcome.unlocated,
            outcome.duplicates
        );
        Ok(outcome)
    }
}

impl Scorer for RankingEngine {
    fn score(&self, site: &Site, context: &ScoringContext<'_>) -> f64 {
        self.breakdown(site, context)
            .map_or(0.0, |breakdown| <Self as Scorer>::sanitise(breakdown.total()))
    }
}
