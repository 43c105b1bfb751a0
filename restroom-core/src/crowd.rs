//! Crowd levels reported for a site.
//!
//! # Examples
//! ```
//! use restroom_core::CrowdLevel;
//!
//! assert_eq!("LOW".parse::<CrowdLevel>(), Ok(CrowdLevel::Low));
//! assert_eq!(CrowdLevel::from_report(Some("packed")), CrowdLevel::Medium);
//! assert_eq!(CrowdLevel::High.to_string(), "high");
//! ```

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// How busy a site is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CrowdLevel {
    /// Few or no other visitors.
    Low,
    /// Typical occupancy. Also used when no usable report exists.
    #[default]
    Medium,
    /// Queues are likely.
    High,
}

/// Error returned when a crowd level string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown crowd level '{0}' (expected low, medium or high)")]
pub struct ParseCrowdLevelError(pub String);

impl CrowdLevel {
    /// Return the level as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Interpret a free-form crowd report.
    ///
    /// Missing and unrecognised reports fall back to [`CrowdLevel::Medium`].
    pub fn from_report(report: Option<&str>) -> Self {
        report
            .and_then(|text| text.parse().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CrowdLevel {
    type Err = ParseCrowdLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseCrowdLevelError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for CrowdLevel {
    type Error = ParseCrowdLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for CrowdLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("low", CrowdLevel::Low)]
    #[case("Medium", CrowdLevel::Medium)]
    #[case(" HIGH ", CrowdLevel::High)]
    fn parsing_ignores_case(#[case] input: &str, #[case] expected: CrowdLevel) {
        assert_eq!(CrowdLevel::from_str(input), Ok(expected));
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = CrowdLevel::from_str("unknown").unwrap_err();
        assert!(err.to_string().contains("unknown crowd level"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("wheelchair ramp out of order"))]
    fn unusable_reports_default_to_medium(#[case] report: Option<&str>) {
        assert_eq!(CrowdLevel::from_report(report), CrowdLevel::Medium);
    }

    #[rstest]
    fn display_matches_as_str() {
        assert_eq!(CrowdLevel::Low.to_string(), CrowdLevel::Low.as_str());
    }

    #[rstest]
    fn serde_uses_lowercase_names() {
        let level: CrowdLevel = serde_json::from_str("\"High\"").expect("decode");
        assert_eq!(level, CrowdLevel::High);
        assert_eq!(serde_json::to_string(&level).expect("encode"), "\"high\"");
        assert!(serde_json::from_str::<CrowdLevel>("\"packed\"").is_err());
    }
}
