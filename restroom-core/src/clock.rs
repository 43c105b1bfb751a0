//! Source of the current time of day.
//!
//! Ranking substitutes the wall-clock time when a request omits it. The
//! [`Clock`] trait keeps that dependency injectable so tests stay
//! deterministic.

use chrono::{Local, Timelike};

use crate::ClockTime;

/// Provide the current local time of day.
///
/// Implementations must be `Send + Sync` so a ranking engine holding one can
/// be shared across request threads.
pub trait Clock: Send + Sync {
    /// Return the current time of day.
    fn now(&self) -> ClockTime;
}

/// [`Clock`] backed by the host's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ClockTime {
        let now = Local::now();
        let hour = u8::try_from(now.hour()).ok();
        let minute = u8::try_from(now.minute()).ok();
        hour.zip(minute)
            .and_then(|(h, m)| ClockTime::new(h, m))
            .unwrap_or(ClockTime::MIDNIGHT)
    }
}
