//! Wall-clock times and daily opening windows.
//!
//! Times are zero-padded `HH:MM` strings. Within a single day their
//! chronological order matches their lexicographic order, so an opening
//! window is a plain inclusive range check. A window may end at `24:00`,
//! which covers the rest of the day. Windows that wrap past midnight
//! (`22:00-06:00`) never contain any time.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Policy applied when a site's opening hours cannot be interpreted.
///
/// Records from upstream feeds often carry free-text hours. The ranker
/// currently gives such sites the benefit of the doubt; see
/// [`UNPARSABLE_HOURS_POLICY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoursPolicy {
    /// Treat the site as open.
    #[default]
    FailOpen,
    /// Treat the site as closed.
    FailClosed,
}

/// Policy used by default for missing or unparsable opening hours.
pub const UNPARSABLE_HOURS_POLICY: HoursPolicy = HoursPolicy::FailOpen;

impl HoursPolicy {
    /// Resolve an [`OpenStatus`] into a yes/no answer under this policy.
    pub const fn is_open(self, status: OpenStatus) -> bool {
        match status {
            OpenStatus::Open => true,
            OpenStatus::Closed => false,
            OpenStatus::Unknown => matches!(self, Self::FailOpen),
        }
    }
}

/// Whether a site is open at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// The time falls inside the opening window.
    Open,
    /// The time falls outside the opening window.
    Closed,
    /// The opening hours were missing or could not be parsed.
    Unknown,
}

/// A time of day with minute precision.
///
/// # Examples
/// ```
/// use restroom_core::ClockTime;
///
/// let noon: ClockTime = "12:00".parse().unwrap();
/// assert_eq!(noon, ClockTime::new(12, 0).unwrap());
/// assert_eq!(noon.to_string(), "12:00");
/// assert!("9:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

/// Errors returned when parsing a [`ClockTime`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockTimeError {
    /// The text was not two zero-padded fields separated by a colon.
    #[error("time '{0}' is not in HH:MM form")]
    Format(String),
    /// Hour or minute was outside the 24-hour clock.
    #[error("time '{0}' is outside 00:00-23:59")]
    OutOfRange(String),
}

impl ClockTime {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// The last minute of the day, `23:59`.
    pub const LAST_MINUTE: Self = Self {
        hour: 23,
        minute: 59,
    };

    /// Construct a time, returning `None` outside `00:00..=23:59`.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour component.
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute component.
    pub const fn minute(self) -> u8 {
        self.minute
    }
}

fn two_digits(field: &str) -> Option<u8> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (hour, minute) = text
            .split_once(':')
            .and_then(|(h, m)| Some((two_digits(h)?, two_digits(m)?)))
            .ok_or_else(|| ClockTimeError::Format(s.to_owned()))?;
        Self::new(hour, minute).ok_or_else(|| ClockTimeError::OutOfRange(s.to_owned()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An inclusive daily opening window.
///
/// # Examples
/// ```
/// use restroom_core::{ClockTime, OpeningHours};
///
/// let hours = OpeningHours::parse("08:00-17:30").unwrap();
/// assert!(hours.contains(ClockTime::new(17, 30).unwrap()));
/// assert!(!hours.contains(ClockTime::new(7, 59).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    /// First minute the site is open.
    pub start: ClockTime,
    /// Last minute the site is open. A `24:00` end is stored as
    /// [`ClockTime::LAST_MINUTE`].
    pub end: ClockTime,
}

/// End-of-day spelling accepted as the closing endpoint of a window.
const END_OF_DAY: &str = "24:00";

impl OpeningHours {
    /// Parse an `HH:MM-HH:MM` range. Whitespace around either endpoint is
    /// ignored, and the end may be `24:00`.
    ///
    /// Returns `None` for anything else, including empty strings and ranges
    /// with more than one separator.
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.split_once('-')?;
        if end.contains('-') {
            return None;
        }
        let end = if end.trim() == END_OF_DAY {
            ClockTime::LAST_MINUTE
        } else {
            end.parse().ok()?
        };
        Some(Self {
            start: start.parse().ok()?,
            end,
        })
    }

    /// Whether `time` lies within `start..=end`.
    pub fn contains(&self, time: ClockTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// Classify a site's raw opening hours at `time`.
    pub fn status(raw: Option<&str>, time: ClockTime) -> OpenStatus {
        match raw.and_then(Self::parse) {
            Some(hours) if hours.contains(time) => OpenStatus::Open,
            Some(_) => OpenStatus::Closed,
            None => OpenStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).expect("valid time")
    }

    #[rstest]
    #[case("00:00", at(0, 0))]
    #[case("23:59", at(23, 59))]
    #[case(" 07:05 ", at(7, 5))]
    fn parses_zero_padded_times(#[case] input: &str, #[case] expected: ClockTime) {
        assert_eq!(input.parse::<ClockTime>(), Ok(expected));
    }

    #[rstest]
    #[case("7:05")]
    #[case("0705")]
    #[case("07:5")]
    #[case("+7:05")]
    #[case("")]
    fn rejects_malformed_times(#[case] input: &str) {
        assert!(matches!(
            input.parse::<ClockTime>(),
            Err(ClockTimeError::Format(_))
        ));
    }

    #[rstest]
    #[case("24:00")]
    #[case("12:60")]
    fn rejects_out_of_range_times(#[case] input: &str) {
        assert!(matches!(
            input.parse::<ClockTime>(),
            Err(ClockTimeError::OutOfRange(_))
        ));
    }

    #[rstest]
    fn ordering_is_chronological() {
        assert!(at(9, 0) < at(10, 0));
        assert!(at(9, 59) < at(10, 0));
    }

    #[rstest]
    #[case("08:00-17:00", at(8, 0), OpenStatus::Open)]
    #[case("08:00-17:00", at(17, 0), OpenStatus::Open)]
    #[case("08:00-17:00", at(17, 1), OpenStatus::Closed)]
    #[case("08:00 - 17:00", at(12, 0), OpenStatus::Open)]
    #[case("22:00-06:00", at(23, 0), OpenStatus::Closed)]
    #[case("06:00-24:00", at(3, 0), OpenStatus::Closed)]
    #[case("06:00-24:00", at(23, 59), OpenStatus::Open)]
    #[case("00:00 - 24:00", at(0, 0), OpenStatus::Open)]
    #[case("24:00-06:00", at(12, 0), OpenStatus::Unknown)]
    #[case("garbage", at(12, 0), OpenStatus::Unknown)]
    #[case("", at(12, 0), OpenStatus::Unknown)]
    #[case("08:00", at(12, 0), OpenStatus::Unknown)]
    #[case("08:00-12:00-17:00", at(12, 0), OpenStatus::Unknown)]
    fn classifies_opening_hours(
        #[case] raw: &str,
        #[case] time: ClockTime,
        #[case] expected: OpenStatus,
    ) {
        assert_eq!(OpeningHours::status(Some(raw), time), expected);
    }

    #[rstest]
    fn missing_hours_are_unknown() {
        assert_eq!(OpeningHours::status(None, at(3, 0)), OpenStatus::Unknown);
    }

    #[rstest]
    #[case(HoursPolicy::FailOpen, true)]
    #[case(HoursPolicy::FailClosed, false)]
    fn policy_decides_unknown_status(#[case] policy: HoursPolicy, #[case] open: bool) {
        assert_eq!(policy.is_open(OpenStatus::Unknown), open);
        assert!(policy.is_open(OpenStatus::Open));
        assert!(!policy.is_open(OpenStatus::Closed));
    }

    #[rstest]
    fn default_policy_fails_open() {
        assert_eq!(UNPARSABLE_HOURS_POLICY, HoursPolicy::FailOpen);
    }
}
