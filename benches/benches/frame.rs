// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use timeladder::{
    Category, CountingScheduler, Event, EventId, Intent, Millis, Timeline, TimelineConfig,
    VoteTally,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 2)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn timeline(n: u64) -> Timeline {
    let mut tl = Timeline::new(
        TimelineConfig::default(),
        now(),
        Millis(0),
        CountingScheduler::default(),
    );
    let events = (0..n)
        .map(|i| {
            let ts = now() - TimeDelta::minutes(i64::try_from(i * 7).unwrap());
            Event::new(EventId(i), Some(ts), Category::Remark)
        })
        .collect();
    tl.set_events(events);
    tl.resize(Size::new(1_200.0, 120.0));
    if let Some(ticket) = tl.tick(Millis(0), now()).vote_request {
        let results: Vec<_> = ticket
            .ids
            .iter()
            .map(|id| {
                let promote = u32::try_from(id.0 % 23).unwrap();
                (*id, Ok(VoteTally::new(promote, promote / 3)))
            })
            .collect();
        tl.complete_votes(ticket.generation, results, Millis(0));
    }
    tl
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline/frame");
    for n in [100_u64, 1_000, 10_000] {
        group.bench_function(BenchmarkId::new("static", n), |b| {
            let mut tl = timeline(n);
            let mut t = 0;
            b.iter(|| {
                t += 16;
                black_box(tl.frame(Millis(t)).map(|s| s.ops().len()))
            });
        });
        group.bench_function(BenchmarkId::new("panning", n), |b| {
            let mut tl = timeline(n);
            let mut t = 0;
            b.iter(|| {
                t += 16;
                tl.apply(Intent::PanBy(3.0), Millis(t)).unwrap();
                black_box(tl.frame(Millis(t)).map(|s| s.ops().len()))
            });
        });
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let mut tl = timeline(1_000);
    tl.frame(Millis(0));
    c.bench_function("timeline/hover_hit_test", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.0) % 1_200.0;
            black_box(tl.pointer_move(Point::new(x, 80.0), Millis(16)))
        });
    });
}

criterion_group!(benches, bench_frame, bench_hover);
criterion_main!(benches);
