//! Property-based tests for interval merging and free-slot derivation.
//!
//! Timestamps are minute offsets from a fixed base so that coverage can be
//! checked minute by minute.

use availability_engine::freebusy::{find_free_slots, merge_intervals};
use availability_engine::interval::{Interval, Window};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const HORIZON: i64 = 24 * 60;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}

fn minute(m: i64) -> DateTime<Utc> {
    base() + Duration::minutes(m)
}

/// A window somewhere inside the day, at least one minute long.
fn arb_window() -> impl Strategy<Value = (i64, i64)> {
    (0i64..HORIZON - 1).prop_flat_map(|start| (Just(start), (start + 1)..=HORIZON))
}

/// A positive-length interval that may fall partly or wholly outside any window.
fn arb_interval() -> impl Strategy<Value = (i64, i64)> {
    (0i64..HORIZON - 1, 1i64..=240).prop_map(|(start, len)| (start, (start + len).min(HORIZON)))
}

fn arb_intervals() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(arb_interval(), 0..20)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_intervals(raw: &[(i64, i64)]) -> Vec<Interval> {
    raw.iter()
        .map(|&(s, e)| Interval {
            start: minute(s),
            end: minute(e),
        })
        .collect()
}

fn clip_all(window: &Window, raw: &[(i64, i64)]) -> Vec<Interval> {
    raw.iter()
        .filter_map(|&(s, e)| window.clip(minute(s), minute(e)))
        .collect()
}

fn covers(intervals: &[Interval], at: DateTime<Utc>) -> bool {
    intervals.iter().any(|iv| iv.start <= at && at < iv.end)
}

// ---------------------------------------------------------------------------
// Property 1: merging is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merge_is_idempotent(raw in arb_intervals()) {
        let once = merge_intervals(to_intervals(&raw));
        let twice = merge_intervals(once.clone());
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Property 2: merged intervals are sorted and never touch
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merged_intervals_are_disjoint(raw in arb_intervals()) {
        let merged = merge_intervals(to_intervals(&raw));
        for pair in merged.windows(2) {
            prop_assert!(
                pair[0].end < pair[1].start,
                "merged intervals touch or overlap: {:?} / {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: merging preserves coverage
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn merge_preserves_coverage(raw in arb_intervals()) {
        let input = to_intervals(&raw);
        let merged = merge_intervals(input.clone());
        for m in 0..HORIZON {
            let at = minute(m);
            prop_assert_eq!(
                covers(&input, at),
                covers(&merged, at),
                "coverage differs at minute {}",
                m
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: free ∪ busy == window, free ∩ busy == ∅
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn free_is_complement_of_busy(
        (ws, we) in arb_window(),
        raw in arb_intervals(),
    ) {
        let window = Window::new(minute(ws), minute(we)).unwrap();
        let merged = merge_intervals(clip_all(&window, &raw));
        let free: Vec<Interval> = find_free_slots(&window, &merged)
            .into_iter()
            .map(|slot| Interval { start: slot.start, end: slot.end })
            .collect();

        for m in ws..we {
            let at = minute(m);
            let is_free = covers(&free, at);
            let is_busy = covers(&merged, at);
            prop_assert!(is_free ^ is_busy, "minute {} free={} busy={}", m, is_free, is_busy);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: free slots are ordered, inside the window, with positive length
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn free_slots_are_ordered_and_within_window(
        (ws, we) in arb_window(),
        raw in arb_intervals(),
    ) {
        let window = Window::new(minute(ws), minute(we)).unwrap();
        let merged = merge_intervals(clip_all(&window, &raw));
        let free = find_free_slots(&window, &merged);

        for slot in &free {
            prop_assert!(slot.start < slot.end);
            prop_assert!(slot.start >= window.start());
            prop_assert!(slot.end <= window.end());
            prop_assert_eq!(slot.duration_minutes, (slot.end - slot.start).num_minutes());
        }
        for pair in free.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }
}
