//! Facade crate for the restroom ranking engine.
//!
//! This crate re-exports the domain types from `restroom-core` and the
//! ranking engine from `restroom-scorer`, so callers need a single
//! dependency.
//!
//! ```
//! use geo::Coord;
//! use restroom_ranker::{DEFAULT_TOP_K, RankingEngine, Site, UserContext};
//!
//! let sites = vec![
//!     Site::new("far", Coord { x: -70.0, y: 40.0 }),
//!     Site::new("near", Coord { x: -117.82, y: 33.68 }),
//! ];
//! let context = UserContext::new(Coord { x: -117.82, y: 33.68 }).with_time("12:00");
//! let ranked = RankingEngine::default()
//!     .rank(&sites, &context, None, DEFAULT_TOP_K)
//!     .expect("context has a location and a valid time");
//! assert_eq!(ranked.first().map(|site| site.id.as_str()), Some("near"));
//! ```

#![forbid(unsafe_code)]

pub use restroom_core::{
    Clock, ClockTime, ClockTimeError, ContextError, CrowdLevel, HoursPolicy,
    InMemoryVisitHistory, OpenStatus, OpeningHours, ParseCrowdLevelError, Ratings, Scorer,
    ScoringContext, Site, SiteFilter, SystemClock, UNPARSABLE_HOURS_POLICY, UserContext,
    VisitHistory,
};
pub use restroom_scorer::{
    DEFAULT_TOP_K, RankError, RankOutcome, RankedSite, RankingEngine, ScoreBreakdown,
    ScoreWeights, ScoreWeightsError,
};

#[cfg(feature = "test-support")]
pub use restroom_core::{FixedClock, SiteBuilder};
