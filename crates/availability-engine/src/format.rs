//! Request/response formatting at the boundary of the engine.
//!
//! Requests carry naive local datetimes (`YYYY-MM-DDTHH:MM`, seconds accepted
//! and truncated) or a date plus two `HH:MM` times; responses carry
//! `{start_time, end_time}` pairs formatted as `YYYY-MM-DD HH:MM`. Naive values
//! are read and written in a single IANA timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};
use crate::freebusy::FreeSlot;
use crate::interval::{Interval, Window};

const REQUEST_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const RESPONSE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One interval as returned to the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedInterval {
    pub start_time: String,
    pub end_time: String,
}

/// Parse an IANA timezone name such as `"America/New_York"` or `"UTC"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| AvailabilityError::InvalidTimezone(name.to_string()))
}

/// Parse a request datetime into UTC.
///
/// Accepts RFC 3339 (offset included) or a naive `YYYY-MM-DDTHH:MM[:SS]`
/// interpreted in `tz`. Ambiguous local times resolve to the earliest instant.
/// Seconds are dropped: responses only carry minutes, so every boundary the
/// engine sees must fall on a whole minute.
///
/// # Errors
/// Returns `AvailabilityError::InvalidDateTime` if the string matches no
/// accepted format, or names a local time skipped by a DST transition.
pub fn parse_datetime(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(truncate_to_minute(dt.with_timezone(&Utc)));
    }

    let naive = REQUEST_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            AvailabilityError::InvalidDateTime(format!(
                "'{}' (expected YYYY-MM-DDTHH:MM)",
                s
            ))
        })?;

    resolve_local(naive, tz).map(truncate_to_minute)
}

fn truncate_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt - Duration::seconds(i64::from(dt.second()))
        - Duration::nanoseconds(i64::from(dt.nanosecond()))
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AvailabilityError::InvalidDateTime(format!(
                "{} does not exist in {}",
                naive.format("%Y-%m-%dT%H:%M"),
                tz.name()
            ))
        })
}

/// Build a window from two request datetimes.
pub fn parse_window(start: &str, end: &str, tz: Tz) -> Result<Window> {
    Window::new(parse_datetime(start, tz)?, parse_datetime(end, tz)?)
}

/// Build a window from a date (`YYYY-MM-DD`) and a `HH:MM` time range on it.
pub fn parse_window_on_date(date: &str, from: &str, to: &str, tz: Tz) -> Result<Window> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AvailabilityError::InvalidDateTime(format!("'{}' (expected YYYY-MM-DD)", date))
    })?;
    let start = resolve_local(day.and_time(parse_time(from)?), tz)?;
    let end = resolve_local(day.and_time(parse_time(to)?), tz)?;
    Window::new(start, end)
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| AvailabilityError::InvalidDateTime(format!("'{}' (expected HH:MM)", s)))
}

/// Format a UTC instant as `YYYY-MM-DD HH:MM` in `tz`.
pub fn format_datetime(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format(RESPONSE_FORMAT).to_string()
}

pub fn format_free_slots(slots: &[FreeSlot], tz: Tz) -> Vec<FormattedInterval> {
    slots
        .iter()
        .map(|slot| FormattedInterval {
            start_time: format_datetime(slot.start, tz),
            end_time: format_datetime(slot.end, tz),
        })
        .collect()
}

pub fn format_intervals(intervals: &[Interval], tz: Tz) -> Vec<FormattedInterval> {
    intervals
        .iter()
        .map(|iv| FormattedInterval {
            start_time: format_datetime(iv.start, tz),
            end_time: format_datetime(iv.end, tz),
        })
        .collect()
}
