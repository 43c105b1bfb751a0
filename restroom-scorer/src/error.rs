//! Error types raised while configuring or running the ranking engine.
#![forbid(unsafe_code)]

use restroom_core::ContextError;
use thiserror::Error;

/// Errors returned by [`RankingEngine::rank`](crate::RankingEngine::rank).
///
/// Malformed candidates never surface here: they are skipped and counted in
/// [`RankOutcome`](crate::RankOutcome) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The user context cannot be used for ranking.
    #[error("invalid user context: {0}")]
    InvalidContext(#[from] ContextError),
}

/// Errors returned when validating [`ScoreWeights`](crate::ScoreWeights).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreWeightsError {
    /// A weight was negative or not finite.
    #[error("weight `{field}` must be finite and non-negative, got {value}")]
    Invalid {
        /// Name of the offending weight.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}
