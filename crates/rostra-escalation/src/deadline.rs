//! # Deadline Calculator
//!
//! Remaining/overdue time against a response deadline, for UI display and
//! for rule evaluation context. Pure and total: any deadline value (past,
//! present, future) is handled.

use serde::{Deserialize, Serialize};

use rostra_core::Timestamp;

/// Remaining or overdue time against a deadline, in whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    /// Magnitude in whole minutes; direction is carried by `is_overdue`.
    pub minutes: i64,
    /// Whether the deadline has passed (or is exactly now).
    pub is_overdue: bool,
    /// Human-readable rendering, e.g. `2h 5m remaining` or `10m overdue`.
    pub display: String,
}

/// Compute time remaining until `deadline` as of `now`.
///
/// The difference is truncated to whole minutes toward the past: partial
/// minutes round down, as if more time had already passed. A deadline
/// exactly now is overdue with magnitude 0.
pub fn time_remaining(deadline: Timestamp, now: Timestamp) -> TimeRemaining {
    let diff = deadline.minutes_since(now);
    if diff <= 0 {
        let minutes = diff.abs();
        return TimeRemaining {
            minutes,
            is_overdue: true,
            display: format!("{minutes}m overdue"),
        };
    }
    let display = if diff < 60 {
        format!("{diff}m remaining")
    } else {
        format!("{}h {}m remaining", diff / 60, diff % 60)
    };
    TimeRemaining {
        minutes: diff,
        is_overdue: false,
        display,
    }
}
