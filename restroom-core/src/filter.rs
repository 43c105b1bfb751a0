//! Pre-ranking predicate filter.
//!
//! Filtering is independent of scoring: it only narrows the candidate list
//! handed to the ranking engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CrowdLevel, Site};

/// Hard constraints a site must satisfy to be ranked at all.
///
/// An empty filter matches every site.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use restroom_core::{CrowdLevel, Site, SiteFilter};
///
/// let mut site = Site::new("a1", Coord { x: 0.0, y: 0.0 });
/// site.amenities.insert("wheelchair".into());
/// site.crowd_updates = Some("Low".into());
///
/// let filter = SiteFilter::default()
///     .require_amenity("wheelchair")
///     .with_crowd(CrowdLevel::Low);
/// assert!(filter.matches(&site));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteFilter {
    /// Amenities every matching site must offer.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub amenities: BTreeSet<String>,
    /// Exact crowd level a matching site must report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd: Option<CrowdLevel>,
}

impl SiteFilter {
    /// Add a required amenity while returning `self` for chaining.
    #[must_use]
    pub fn require_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenities.insert(amenity.into());
        self
    }

    /// Require a crowd level while returning `self` for chaining.
    #[must_use]
    pub fn with_crowd(mut self, crowd: CrowdLevel) -> Self {
        self.crowd = Some(crowd);
        self
    }

    /// Whether the filter places no constraints.
    pub fn is_empty(&self) -> bool {
        self.amenities.is_empty() && self.crowd.is_none()
    }

    /// Whether `site` satisfies every constraint.
    ///
    /// Sites without a usable crowd report are compared as
    /// [`CrowdLevel::Medium`].
    pub fn matches(&self, site: &Site) -> bool {
        let amenities_ok = self.amenities.is_subset(&site.amenities);
        let crowd_ok = self.crowd.is_none_or(|crowd| site.crowd_level() == crowd);
        amenities_ok && crowd_ok
    }

    /// Return the matching sites in input order.
    pub fn apply<'a, I>(&self, sites: I) -> Vec<&'a Site>
    where
        I: IntoIterator<Item = &'a Site>,
    {
        sites.into_iter().filter(|site| self.matches(site)).collect()
    }
}
