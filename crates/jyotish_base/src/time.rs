//! UTC instants as integer milliseconds.
//!
//! All period arithmetic runs on whole milliseconds so that boundaries
//! computed centuries apart never accumulate floating-point drift.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::JyotishError;

/// Milliseconds in one civil day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// A UTC instant, stored as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    pub const fn from_unix_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub const fn unix_millis(self) -> i64 {
        self.0
    }

    /// Convert a UTC Julian Day, rounding to the nearest millisecond.
    pub fn from_jd(jd: f64) -> Result<Self, JyotishError> {
        if !jd.is_finite() {
            return Err(JyotishError::InvalidInput("julian day is not finite"));
        }
        let ms = ((jd - JD_UNIX_EPOCH) * MS_PER_DAY as f64).round();
        if ms < i64::MIN as f64 || ms >= i64::MAX as f64 {
            return Err(JyotishError::InvalidInput("julian day out of range"));
        }
        Ok(Self(ms as i64))
    }

    /// UTC Julian Day of this instant.
    pub fn to_jd(self) -> f64 {
        JD_UNIX_EPOCH + self.0 as f64 / MS_PER_DAY as f64
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// `None` when the instant lies outside chrono's calendar range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    pub fn checked_add_millis(self, ms: i64) -> Option<Self> {
        self.0.checked_add(ms).map(Self)
    }

    /// Whole days since the Unix epoch (floor).
    pub fn unix_day(self) -> i64 {
        self.0.div_euclid(MS_PER_DAY)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{} ms", self.0),
        }
    }
}
