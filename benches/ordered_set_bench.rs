//! Benchmark for OrderedSet vs standard BTreeSet.
//!
//! Covers insertion, membership tests and the merge-based set algebra.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rbcollections::set::OrderedSet;
use std::collections::BTreeSet;
use std::hint::black_box;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_insert");

    for size in [100, 1000, 10000] {
        // OrderedSet insert
        group.bench_with_input(BenchmarkId::new("OrderedSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = OrderedSet::new();
                for index in (0..size).rev() {
                    set.insert(black_box(index));
                }
                black_box(set)
            });
        });

        // Standard BTreeSet insert
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for index in (0..size).rev() {
                    set.insert(black_box(index));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_contains");

    for size in [100, 1000, 10000] {
        let ordered_set: OrderedSet<i32> = (0..size).map(|index| index * 2).collect();
        let standard_set: BTreeSet<i32> = (0..size).map(|index| index * 2).collect();

        // OrderedSet contains (half hits, half misses)
        group.bench_with_input(BenchmarkId::new("OrderedSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let hits = (0..size * 2)
                    .filter(|value| ordered_set.contains(&black_box(*value)))
                    .count();
                black_box(hits)
            });
        });

        // Standard BTreeSet contains
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let hits = (0..size * 2)
                    .filter(|value| standard_set.contains(&black_box(*value)))
                    .count();
                black_box(hits)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Set Algebra Benchmark
// =============================================================================

fn benchmark_intersection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_intersection");

    for size in [100, 1000, 10000] {
        let ordered_left: OrderedSet<i32> = (0..size).collect();
        let ordered_right: OrderedSet<i32> = (size / 2..size + size / 2).collect();
        let standard_left: BTreeSet<i32> = (0..size).collect();
        let standard_right: BTreeSet<i32> = (size / 2..size + size / 2).collect();

        // OrderedSet intersection
        group.bench_with_input(BenchmarkId::new("OrderedSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(ordered_left.intersection(&ordered_right).count()));
        });

        // Standard BTreeSet intersection
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_left.intersection(&standard_right).count()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_contains,
    benchmark_intersection
);

criterion_main!(benches);
