//! The requesting user's context for one ranking call.

use std::collections::BTreeSet;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Clock, ClockTime, ClockTimeError, SiteFilter, VisitHistory, json};

/// Location, time and preferences supplied with a ranking request.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use restroom_core::UserContext;
///
/// let context = UserContext::new(Coord { x: -117.82, y: 33.68 })
///     .with_time("12:00")
///     .with_preferences(["wheelchair"]);
/// assert_eq!(context.time.as_deref(), Some("12:00"));
/// assert!(context.preferences.contains("wheelchair"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Where the user is. Required for ranking.
    #[serde(
        default,
        deserialize_with = "json::deserialize_location",
        serialize_with = "json::serialize_location"
    )]
    pub location: Option<Coord<f64>>,
    /// Current time as `HH:MM`. The engine's clock is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Amenity tags the user cares about.
    #[serde(default)]
    pub preferences: BTreeSet<String>,
    /// Optional pre-ranking constraints. Never used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SiteFilter>,
}

/// Reasons a [`UserContext`] cannot be used for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// No usable location was supplied, so proximity cannot be computed.
    #[error("user context has no usable location")]
    MissingLocation,
    /// The supplied time was not a valid `HH:MM` value.
    #[error("user context time is invalid: {source}")]
    InvalidTime {
        /// Parse failure for the supplied time.
        #[source]
        source: ClockTimeError,
    },
}

impl UserContext {
    /// Create a context at `location` with no time, preferences or filters.
    pub fn new(location: Coord<f64>) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    /// Set the request time while returning `self` for chaining.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Add amenity preferences while returning `self` for chaining.
    #[must_use]
    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences
            .extend(preferences.into_iter().map(Into::into));
        self
    }

    /// Attach a pre-ranking filter while returning `self` for chaining.
    #[must_use]
    pub fn with_filters(mut self, filters: SiteFilter) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Validate the context and resolve the request time.
    ///
    /// `clock` is consulted only when [`UserContext::time`] is absent.
    ///
    /// # Errors
    /// Returns [`ContextError::MissingLocation`] without a location and
    /// [`ContextError::InvalidTime`] when the supplied time does not parse.
    pub fn resolve<'a>(
        &'a self,
        clock: &dyn Clock,
        history: Option<&'a dyn VisitHistory>,
    ) -> Result<ScoringContext<'a>, ContextError> {
        let origin = self.location.ok_or(ContextError::MissingLocation)?;
        let now = match self.time.as_deref() {
            Some(text) => text
                .parse::<ClockTime>()
                .map_err(|source| ContextError::InvalidTime { source })?,
            None => clock.now(),
        };
        Ok(ScoringContext {
            origin,
            now,
            preferences: &self.preferences,
            history,
        })
    }
}

/// A validated [`UserContext`] ready for scoring.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    /// The user's position.
    pub origin: Coord<f64>,
    /// Time used for open-now checks.
    pub now: ClockTime,
    /// Amenity tags the user cares about.
    pub preferences: &'a BTreeSet<String>,
    /// Visit counts for affinity, when available.
    pub history: Option<&'a dyn VisitHistory>,
}

impl ScoringContext<'_> {
    /// Recorded visits to `site_id`, or `0` without history.
    pub fn visits(&self, site_id: &str) -> u64 {
        self.history.map_or(0, |history| history.visits(site_id))
    }
}

impl std::fmt::Debug for ScoringContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringContext")
            .field("origin", &self.origin)
            .field("now", &self.now)
            .field("preferences", &self.preferences)
            .field("has_history", &self.history.is_some())
            .finish()
    }
}
