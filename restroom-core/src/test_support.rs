//! Test-only helpers: a fixed [`Clock`] and a fluent [`Site`] builder used by
//! unit and behaviour tests across the workspace.

use geo::Coord;

use crate::{Clock, ClockTime, Site};

/// [`Clock`] that always reports the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub ClockTime);

impl FixedClock {
    /// Create a clock frozen at `hour:minute`.
    ///
    /// Out-of-range values freeze the clock at midnight.
    pub fn at(hour: u8, minute: u8) -> Self {
        Self(ClockTime::new(hour, minute).unwrap_or(ClockTime::MIDNIGHT))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}

/// Fluent constructor for [`Site`] fixtures.
///
/// Sites start at the origin with no amenities, zero ratings, no opening
/// hours and no crowd report.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    site: Site,
}

impl SiteBuilder {
    /// Start building a site with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            site: Site::new(id, Coord { x: 0.0, y: 0.0 }),
        }
    }

    /// Place the site at `[latitude, longitude]`.
    #[must_use]
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.site.location = Some(Coord { x: lon, y: lat });
        self
    }

    /// Remove the site's location, making it unrankable.
    #[must_use]
    pub fn without_location(mut self) -> Self {
        self.site.location = None;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.site.name = name.into();
        self
    }

    /// Add amenity tags.
    #[must_use]
    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.site
            .amenities
            .extend(amenities.into_iter().map(Into::into));
        self
    }

    /// Set the cleanliness rating.
    #[must_use]
    pub fn cleanliness(mut self, rating: f64) -> Self {
        self.site.ratings.cleanliness = rating;
        self
    }

    /// Set the safety rating.
    #[must_use]
    pub fn safety(mut self, rating: f64) -> Self {
        self.site.ratings.safety = rating;
        self
    }

    /// Set the raw opening hours string.
    #[must_use]
    pub fn hours(mut self, hours: impl Into<String>) -> Self {
        self.site.opening_hours = Some(hours.into());
        self
    }

    /// Set the raw crowd report.
    #[must_use]
    pub fn crowd(mut self, crowd: impl Into<String>) -> Self {
        self.site.crowd_updates = Some(crowd.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> Site {
        self.site
    }
}
