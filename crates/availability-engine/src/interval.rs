//! Time windows and busy intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// The caller-specified range over which availability is computed.
///
/// Always satisfies `start < end`; construct through [`Window::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    /// Build a window, rejecting empty or inverted ranges.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidWindow` if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(AvailabilityError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The whole window as a single busy interval.
    pub fn as_interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// Clip `[start, end)` to this window.
    ///
    /// Returns `None` when the range does not overlap the window. Touching
    /// the boundary (`end == window.start` or `start == window.end`) is not
    /// an overlap.
    pub fn clip(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Interval> {
        if end <= self.start || start >= self.end || end <= start {
            return None;
        }
        Some(Interval {
            start: start.max(self.start),
            end: end.min(self.end),
        })
    }
}

/// A busy span, already clipped to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
