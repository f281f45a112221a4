// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use timeladder_declutter::{DeclutterConfig, DeclutterInput, declutter};
use timeladder_position::ViewMode;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// `n` markers scattered over `width` pixels.
fn scatter(n: usize, width: f64, seed: u64) -> Vec<DeclutterInput<u64>> {
    let mut rng = Lcg(seed);
    (0..n as u64)
        .map(|id| {
            let x = rng.next_f64() * width;
            DeclutterInput::new(id, x / 48.0, x)
        })
        .collect()
}

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("declutter/pairwise");
    let config = DeclutterConfig::default();

    for n in [64_usize, 512, 4_096] {
        let items = scatter(n, 1_200.0, 7);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(declutter(items, ViewMode::Day, &config)));
        });
    }
    group.finish();
}

fn bench_coarse(c: &mut Criterion) {
    let mut group = c.benchmark_group("declutter/coarse");
    let config = DeclutterConfig::default();

    // Everything piled into a few pixels: the case bucketing exists for.
    for n in [40_usize, 500, 5_000] {
        let items = scatter(n, 8.0, 11);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("year", n), &items, |b, items| {
            b.iter(|| black_box(declutter(items, ViewMode::Year, &config)));
        });
        group.bench_with_input(BenchmarkId::new("day_pairwise", n), &items, |b, items| {
            b.iter(|| black_box(declutter(items, ViewMode::Day, &config)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pairwise, bench_coarse);
criterion_main!(benches);
