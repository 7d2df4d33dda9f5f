//! Benchmarks for the regularity decomposition pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use regulus::prelude::*;

/// The wheel W_k: spokes as basis rows, rim edges as columns.
fn wheel(k: usize) -> Matrix {
    let mut rows = vec![vec![0; k]; k];
    for i in 0..k {
        rows[i][i] = 1;
        rows[(i + 1) % k][i] = 1;
    }
    Matrix::from_rows(rows)
}

/// Block diagonal of `count` copies of the wheel W3.
fn wheel_blocks(count: usize) -> Matrix {
    let w = wheel(3);
    let n = 3 * count;
    let mut rows = vec![vec![0; n]; n];
    for b in 0..count {
        for i in 0..3 {
            for j in 0..3 {
                rows[3 * b + i][3 * b + j] = w[(i, j)];
            }
        }
    }
    Matrix::from_rows(rows)
}

fn bench_wheels(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_regularity");
    for k in [4, 6, 8] {
        let matrix = wheel(k);
        group.bench_with_input(BenchmarkId::new("wheel", k), &k, |b, _| {
            b.iter(|| {
                let outcome =
                    test_regularity(black_box(&matrix), false, &RegularParams::default(), None)
                        .unwrap();
                black_box(outcome.is_regular)
            });
        });
    }
    group.finish();
}

fn bench_one_sums(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_sum_regularity");
    for count in [2, 4, 8] {
        let matrix = wheel_blocks(count);
        group.bench_with_input(BenchmarkId::new("blocks", count), &count, |b, _| {
            b.iter(|| {
                let outcome =
                    test_regularity(black_box(&matrix), false, &RegularParams::default(), None)
                        .unwrap();
                black_box(outcome.is_regular)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wheels, bench_one_sums);
criterion_main!(benches);
