//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp type truncated to seconds
//! precision, rendered as ISO8601 with Z suffix.
//!
//! Escalation thresholds and deadline display both operate on **whole
//! minutes**: partial minutes are truncated toward the past, i.e. rounding
//! always behaves as if more time has elapsed toward the next minute
//! boundary has not yet been reached. `minutes_since()` implements that
//! floor-division rule in one place so the rule evaluator and the deadline
//! calculator cannot disagree about it.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RostraError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an RFC 3339 string, converting to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any timezone
    /// offset and converting to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339.
    pub fn parse(s: &str) -> Result<Self, RostraError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            RostraError::Temporal(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, RostraError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| RostraError::Temporal(format!("invalid Unix timestamp: {secs}")))?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole minutes elapsed from `earlier` to `self`, truncated toward the
    /// past.
    ///
    /// 59 seconds of elapsed time is 0 whole minutes; 61 seconds is 1.
    /// Negative when `self` precedes `earlier` (floor division, so 59
    /// seconds *before* `earlier` is -1 whole minutes).
    pub fn minutes_since(&self, earlier: Timestamp) -> i64 {
        (self.epoch_secs() - earlier.epoch_secs()).div_euclid(60)
    }

    /// The timestamp `minutes` whole minutes after `self`.
    pub fn plus_minutes(&self, minutes: i64) -> Timestamp {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-08-06T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
