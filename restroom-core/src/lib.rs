//! Core domain types for the restroom ranker.
//!
//! These models describe candidate sites, the requesting user's context and
//! the visit history consulted during ranking. Deserialization is lenient:
//! malformed optional fields fall back to documented defaults so one bad
//! record never fails a whole batch.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod context;
pub mod crowd;
pub mod filter;
pub mod history;
pub mod hours;
mod json;
pub mod scorer;
pub mod site;

pub use clock::{Clock, SystemClock};
pub use context::{ContextError, ScoringContext, UserContext};
pub use crowd::{CrowdLevel, ParseCrowdLevelError};
pub use filter::SiteFilter;
pub use history::{InMemoryVisitHistory, VisitHistory};
pub use hours::{
    ClockTime, ClockTimeError, HoursPolicy, OpenStatus, OpeningHours, UNPARSABLE_HOURS_POLICY,
};
pub use scorer::Scorer;
pub use site::{Ratings, Site};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use test_support::{FixedClock, SiteBuilder};
