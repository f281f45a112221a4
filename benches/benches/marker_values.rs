// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use timeladder_position::{TimeScale, marker_value, tick_timestamp};

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 2)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// One timestamp every `step_minutes`, ending at the reference.
fn timestamps(n: usize, step_minutes: i64) -> Vec<NaiveDateTime> {
    let end = reference();
    (0..n as i64)
        .map(|i| end - TimeDelta::minutes(i * step_minutes))
        .collect()
}

fn bench_marker_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("position/marker_value");
    let reference = reference();
    let stamps = timestamps(10_000, 97);
    group.throughput(Throughput::Elements(stamps.len() as u64));

    for scale in [TimeScale::Day, TimeScale::Week, TimeScale::Month, TimeScale::Year] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{scale:?}")),
            &stamps,
            |b, stamps| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for ts in stamps {
                        acc += marker_value(Some(*ts), scale, reference).unwrap_or(0.0);
                    }
                    black_box(acc)
                });
            },
        );
    }
    group.finish();
}

fn bench_tick_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("position/tick_timestamp");
    let reference = reference();
    group.throughput(Throughput::Elements(2_001));

    for scale in [TimeScale::Day, TimeScale::Month, TimeScale::Year] {
        group.bench_function(format!("{scale:?}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for i in -1_000_i64..=1_000 {
                    hits += usize::from(tick_timestamp(black_box(i), scale, reference).is_some());
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_marker_value, bench_tick_timestamp);
criterion_main!(benches);
