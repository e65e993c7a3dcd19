//! Benchmark for DynamicArray vs standard Vec.
//!
//! Measures the cost of the explicit doubling policy against Vec's own
//! growth, and the effect of reserving up front.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rbcollections::array::DynamicArray;
use std::hint::black_box;

// =============================================================================
// push_back Benchmark
// =============================================================================

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for size in [100, 1000, 10000, 100_000] {
        // DynamicArray push_back
        group.bench_with_input(
            BenchmarkId::new("DynamicArray", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut array = DynamicArray::new();
                    for index in 0..size {
                        array.push_back(black_box(index));
                    }
                    black_box(array)
                });
            },
        );

        // DynamicArray push_back after reserve
        group.bench_with_input(
            BenchmarkId::new("DynamicArray/reserved", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut array = DynamicArray::new();
                    if array.reserve(size).is_ok() {
                        for index in 0..size {
                            array.push_back(black_box(index));
                        }
                    }
                    black_box(array)
                });
            },
        );

        // Standard Vec push
        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert_front(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_front");

    for size in [100, 1000] {
        // DynamicArray insert at 0
        group.bench_with_input(
            BenchmarkId::new("DynamicArray", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut array = DynamicArray::new();
                    for index in 0..size {
                        array.insert(0, black_box(index));
                    }
                    black_box(array)
                });
            },
        );

        // Standard Vec insert at 0
        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.insert(0, black_box(index));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_push_back, benchmark_insert_front);

criterion_main!(benches);
