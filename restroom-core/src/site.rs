//! Candidate restroom sites.

use std::collections::BTreeSet;

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeStruct};
use serde_json::{Map, Value};

use crate::{CrowdLevel, json};

/// Numeric quality ratings attached to a site.
///
/// Values that were absent or not numeric in the source record are `0.0`.
/// Ratings decoded from a record serialize back to the record's original
/// `ratings` value, so coercions made for scoring never leak into output.
/// Ratings built in code serialize their three fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ratings {
    /// Cleanliness rating.
    pub cleanliness: f64,
    /// Safety rating.
    pub safety: f64,
    /// Aggregate rating reported by the data source. Not used for scoring.
    pub overall: f64,
    pub(crate) source: Option<Value>,
}

impl Ratings {
    /// Ratings with the given cleanliness and safety and no overall score.
    pub const fn new(cleanliness: f64, safety: f64) -> Self {
        Self {
            cleanliness,
            safety,
            overall: 0.0,
            source: None,
        }
    }

    /// Remember the value these ratings were decoded from.
    pub(crate) fn with_source(mut self, source: Value) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether these ratings carry nothing worth writing out: no source
    /// value and every field zero.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

impl Serialize for Ratings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(source) = &self.source {
            return source.serialize(serializer);
        }
        let mut state = serializer.serialize_struct("Ratings", 3)?;
        state.serialize_field("cleanliness", &self.cleanliness)?;
        state.serialize_field("safety", &self.safety)?;
        state.serialize_field("overall", &self.overall)?;
        state.end()
    }
}

/// A restroom location that can be ranked for a user.
///
/// Coordinates are stored with `x = longitude` and `y = latitude`, matching
/// `geo` conventions, while the JSON form keeps the `[latitude, longitude]`
/// order used by the persisted dataset. Fields the ranker does not model are
/// kept in [`Site::extra`] so a ranked site serializes back to the full
/// record it was read from.
///
/// # Examples
/// ```
/// use restroom_core::Site;
///
/// let site: Site = serde_json::from_str(
///     r#"{"id": "a1", "name": "Library", "location": [33.68, -117.82],
///         "amenities": ["wheelchair", "wheelchair"], "ratings": {"cleanliness": "4"}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(site.location.map(|c| c.y), Some(33.68));
/// assert_eq!(site.amenities.len(), 1);
/// assert_eq!(site.ratings.cleanliness, 4.0);
/// assert_eq!(site.ratings.safety, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Site {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Position, or `None` when the record's location is missing or invalid.
    #[serde(serialize_with = "json::serialize_location")]
    pub location: Option<Coord<f64>>,
    /// Amenity tags such as `wheelchair` or `baby_changing`.
    pub amenities: BTreeSet<String>,
    /// Quality ratings.
    #[serde(skip_serializing_if = "Ratings::is_unset")]
    pub ratings: Ratings,
    /// Opening hours as `HH:MM-HH:MM`. `None` means always open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Free-form crowd report, usually `low`, `medium` or `high`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crowd_updates: Option<String>,
    /// Source fields the ranker does not interpret.
    ///
    /// Non-string `opening_hours` and `crowd_updates` values also land here
    /// under their own key, so they are written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of [`Site`], decoded field by field without failing.
#[derive(Deserialize)]
struct SiteRecord {
    #[serde(default, deserialize_with = "json::deserialize_identifier")]
    id: String,
    #[serde(default, deserialize_with = "json::deserialize_identifier")]
    name: String,
    #[serde(default, deserialize_with = "json::deserialize_location")]
    location: Option<Coord<f64>>,
    #[serde(default, deserialize_with = "json::deserialize_tags")]
    amenities: BTreeSet<String>,
    #[serde(default, deserialize_with = "json::deserialize_ratings")]
    ratings: Ratings,
    #[serde(default, deserialize_with = "json::deserialize_present")]
    opening_hours: Option<Value>,
    #[serde(default, deserialize_with = "json::deserialize_present")]
    crowd_updates: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Take a string field, or park any other value in `extra` under `key`.
fn text_or_keep(
    key: &str,
    value: Option<Value>,
    extra: &mut Map<String, Value>,
) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        other => {
            extra.insert(key.to_owned(), other);
            None
        }
    }
}

impl From<SiteRecord> for Site {
    fn from(record: SiteRecord) -> Self {
        let SiteRecord {
            id,
            name,
            location,
            amenities,
            ratings,
            opening_hours,
            crowd_updates,
            mut extra,
        } = record;
        let opening_hours = text_or_keep("opening_hours", opening_hours, &mut extra);
        let crowd_updates = text_or_keep("crowd_updates", crowd_updates, &mut extra);
        Self {
            id,
            name,
            location,
            amenities,
            ratings,
            opening_hours,
            crowd_updates,
            extra,
        }
    }
}

impl<'de> Deserialize<'de> for Site {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SiteRecord::deserialize(deserializer).map(Self::from)
    }
}

impl Site {
    /// Construct a site with the given identifier and location.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use restroom_core::Site;
    ///
    /// let site = Site::new("a1", Coord { x: -117.82, y: 33.68 });
    /// assert_eq!(site.id, "a1");
    /// assert!(site.amenities.is_empty());
    /// ```
    pub fn new(id: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            location: Some(location),
            ..Self::default()
        }
    }

    /// Crowd level parsed from [`Site::crowd_updates`].
    ///
    /// Missing or unrecognised reports count as [`CrowdLevel::Medium`].
    pub fn crowd_level(&self) -> CrowdLevel {
        CrowdLevel::from_report(self.crowd_updates.as_deref())
    }

    /// Whether the site carries a usable location and can be ranked.
    pub fn is_rankable(&self) -> bool {
        self.location.is_some()
    }
}
