//! Lenient JSON field codecs shared by [`Site`](crate::Site) and
//! [`UserContext`](crate::UserContext).
//!
//! Persisted records come from upstream scrapers and are not trusted. Every
//! decoder here accepts any JSON value and maps the unusable ones to the
//! field's default instead of failing the surrounding document.

use std::collections::BTreeSet;

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::Ratings;

/// Read a finite number, accepting numeric strings such as `"4.5"`.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Decode `[latitude, longitude]` into a coordinate with `x = longitude`.
pub(crate) fn coord(value: &Value) -> Option<Coord<f64>> {
    let Value::Array(items) = value else {
        return None;
    };
    let [lat, lon, ..] = items.as_slice() else {
        return None;
    };
    Some(Coord {
        x: number(lon)?,
        y: number(lat)?,
    })
}

pub(crate) fn deserialize_location<'de, D>(deserializer: D) -> Result<Option<Coord<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coord(&value))
}

/// Encode a coordinate back into the persisted `[latitude, longitude]` order.
pub(crate) fn serialize_location<S>(
    location: &Option<Coord<f64>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    location.map(|c| [c.y, c.x]).serialize(serializer)
}

pub(crate) fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(BTreeSet::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(tag) => Some(tag),
            _ => None,
        })
        .collect())
}

/// Keep whatever value is present, including `null`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Identifiers are strings, but some feeds emit bare numbers.
pub(crate) fn deserialize_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

pub(crate) fn deserialize_ratings<'de, D>(deserializer: D) -> Result<Ratings, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let read = |key: &str| value.get(key).and_then(number).unwrap_or(0.0);
    let ratings = Ratings {
        overall: read("overall"),
        ..Ratings::new(read("cleanliness"), read("safety"))
    };
    Ok(ratings.with_source(value))
}
