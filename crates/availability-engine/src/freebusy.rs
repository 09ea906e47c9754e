//! Merge busy intervals and derive the free time left in a window.
//!
//! Sorts busy intervals by start time, merges overlapping or touching periods,
//! then computes the gaps between merged periods within the window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::{Interval, Window};

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    pub fn lasts_at_least(&self, minutes: i64) -> bool {
        self.duration_minutes >= minutes
    }

    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Merge overlapping or adjacent busy intervals.
///
/// Returns a sorted list where every pair of neighbours satisfies
/// `merged[i].end < merged[i + 1].start`. Merging an already merged list
/// returns it unchanged.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                // Overlapping or adjacent: extend the current interval.
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

/// Find free time slots within `window`, given merged busy intervals.
///
/// `merged` must be sorted by start time (the output of [`merge_intervals`]).
/// Returns free slots sorted by start time, each with positive duration.
pub fn find_free_slots(window: &Window, merged: &[Interval]) -> Vec<FreeSlot> {
    let mut free_slots = Vec::new();
    let mut cursor = window.start();

    for busy in merged {
        if cursor < busy.start {
            free_slots.push(FreeSlot::between(cursor, busy.start.min(window.end())));
        }
        cursor = cursor.max(busy.end);
        if cursor >= window.end() {
            break;
        }
    }

    // Trailing free slot after the last busy period.
    if cursor < window.end() {
        free_slots.push(FreeSlot::between(cursor, window.end()));
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` within the window.
///
/// Delegates to [`find_free_slots`] and returns the first slot meeting the minimum
/// duration requirement.
pub fn find_first_free_slot(
    window: &Window,
    merged: &[Interval],
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(window, merged)
        .into_iter()
        .find(|slot| slot.lasts_at_least(min_duration_minutes))
}
