//! Merge and free-slot benchmarks.
//!
//! Run with: `cargo bench --bench merge -p availability-engine`

use std::hint::black_box;

use availability_engine::freebusy::{find_free_slots, merge_intervals};
use availability_engine::interval::{Interval, Window};
use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// `n` staggered intervals across a week; every third one runs two hours and
/// overlaps its neighbour.
fn intervals(n: usize) -> Vec<Interval> {
    let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let start = base + Duration::minutes((i as i64 * 97) % (7 * 24 * 60));
            let len = if i % 3 == 0 { 120 } else { 45 };
            Interval {
                start,
                end: start + Duration::minutes(len),
            }
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_intervals");
    for &n in &[10usize, 100, 1_000] {
        let input = intervals(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| merge_intervals(black_box(input.clone())))
        });
    }
    group.finish();
}

fn bench_free_slots(c: &mut Criterion) {
    let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let window = Window::new(base, base + Duration::days(7)).unwrap();
    let mut group = c.benchmark_group("find_free_slots");
    for &n in &[10usize, 100, 1_000] {
        let merged = merge_intervals(intervals(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &merged, |b, merged| {
            b.iter(|| find_free_slots(black_box(&window), black_box(merged)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge, bench_free_slots);
criterion_main!(benches);
