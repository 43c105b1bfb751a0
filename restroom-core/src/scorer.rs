//! Score sites for a user context.
//!
//! The `Scorer` trait assigns a relevance score to a [`Site`](crate::Site)
//! given a validated [`ScoringContext`](crate::ScoringContext).

use crate::{ScoringContext, Site};

/// Calculate a relevance score for a site.
///
/// Higher scores indicate a better match for the requesting user.
/// Implementations must be thread-safe (`Send` + `Sync`) so one scorer can
/// serve concurrent requests. The method is infallible; implementers must
/// return `0.0` when no information is available.
///
/// Implementations must produce finite (`f64::is_finite`) scores. Use
/// [`Scorer::sanitise`] to apply this guard.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use restroom_core::{ScoringContext, Scorer, Site, SystemClock, UserContext};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _site: &Site, _context: &ScoringContext<'_>) -> f64 {
///         1.0
///     }
/// }
///
/// let site = Site::new("a1", Coord { x: 0.0, y: 0.0 });
/// let user = UserContext::new(Coord { x: 0.0, y: 0.0 }).with_time("08:00");
/// let context = user.resolve(&SystemClock, None).unwrap();
/// assert_eq!(UnitScorer.score(&site, &context), 1.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `site` according to `context`.
    fn score(&self, site: &Site, context: &ScoringContext<'_>) -> f64;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and normalises `-0.0` to `0.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() || score == 0.0 {
            return 0.0;
        }
        score
    }
}
