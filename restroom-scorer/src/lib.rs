//! Ranking engine for restroom sites.
//!
//! The engine scores every rankable candidate against a user's context and
//! returns the best matches first. A score is the sum of independent,
//! separately tunable contributions:
//!
//! - **Open now**: a flat bonus when the request time falls inside the
//!   site's opening hours. Missing or unparsable hours follow
//!   [`UNPARSABLE_HOURS_POLICY`](restroom_core::UNPARSABLE_HOURS_POLICY).
//! - **Amenity match**: a bonus per preferred amenity the site offers.
//! - **Cleanliness and safety**: linear in the site's ratings.
//! - **Crowd**: a fixed table favouring quiet sites.
//! - **Proximity**: a reward that decays linearly with the straight-line
//!   distance in raw degrees. This is a flat-earth approximation, adequate
//!   at city scale and cheaper than a geodesic.
//! - **Affinity**: a bonus per recorded visit, disabled by default.
//!
//! Ties keep their input order, so results are reproducible.
//!
//! # Examples
//!
//! ```
//! use restroom_core::{Site, UserContext};
//! use restroom_scorer::{DEFAULT_TOP_K, RankingEngine};
//!
//! let sites: Vec<Site> = serde_json::from_str(
//!     r#"[{"id": "near", "location": [33.68, -117.82]},
//!         {"id": "far", "location": [40.0, -70.0]}]"#,
//! )
//! .unwrap();
//! let context: UserContext =
//!     serde_json::from_str(r#"{"location": [33.68, -117.82], "time": "12:00"}"#).unwrap();
//!
//! let engine = RankingEngine::default();
//! let ranked = engine.rank(&sites, &context, None, DEFAULT_TOP_K).unwrap();
//! assert_eq!(ranked[0].id, "near");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breakdown;
mod engine;
mod error;
mod rules;
mod weights;

pub use breakdown::ScoreBreakdown;
pub use engine::{RankOutcome, RankedSite, RankingEngine};
pub use error::{RankError, ScoreWeightsError};
pub use rules::{crowd_bonus, degree_distance};
pub use weights::ScoreWeights;

/// Number of results returned when the caller does not ask for a limit.
pub const DEFAULT_TOP_K: usize = 10;
