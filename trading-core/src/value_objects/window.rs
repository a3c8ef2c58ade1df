use chrono::{DurationRound, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timestamp;

/// Half-open time range `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl TimeWindow {
    pub fn new(from: Timestamp, to: Timestamp) -> Self {
        TimeWindow { from, to }
    }

    /// Window of `length` starting at `from`
    pub fn starting_at(from: Timestamp, length: TimeDelta) -> Self {
        TimeWindow {
            from,
            to: from + length,
        }
    }

    /// Window of `length` ending at `to`
    pub fn ending_at(to: Timestamp, length: TimeDelta) -> Self {
        TimeWindow {
            from: to - length,
            to,
        }
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.from <= at && at < self.to
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

/// Drop seconds and sub-second precision
pub fn truncate_to_minute(at: Timestamp) -> Timestamp {
    at.duration_trunc(TimeDelta::minutes(1)).unwrap_or(at)
}
