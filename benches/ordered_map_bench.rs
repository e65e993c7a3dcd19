//! Benchmark for OrderedMap vs standard BTreeMap.
//!
//! Compares the arena red-black tree against Rust's standard B-tree for
//! insertion, lookup, removal and in-order traversal.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rbcollections::map::OrderedMap;
use std::collections::BTreeMap;
use std::hint::black_box;

/// Deterministic pseudo-random permutation of `0..size`.
fn shuffled_keys(size: i32) -> Vec<i32> {
    let modulus = i64::from(size);
    (0..i64::from(size))
        .map(|index| (index * 7919 % modulus) as i32)
        .collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys = shuffled_keys(size);

        // OrderedMap insert
        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = OrderedMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        // Standard BTreeMap insert
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert_with_hint Benchmark
// =============================================================================

fn benchmark_insert_sorted(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert_sorted");

    for size in [100, 1000, 10000] {
        // Hinted insert at end()
        group.bench_with_input(
            BenchmarkId::new("OrderedMap/hint", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in 0..size {
                        map.insert_with_hint(map.end(), black_box(key), key);
                    }
                    black_box(map)
                });
            },
        );

        // Unhinted insert of the same keys
        group.bench_with_input(
            BenchmarkId::new("OrderedMap/plain", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = OrderedMap::new();
                    for key in 0..size {
                        map.insert(black_box(key), key);
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let ordered_map: OrderedMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        // OrderedMap get
        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = ordered_map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });

        // Standard BTreeMap get
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [100, 1000, 10000] {
        let keys = shuffled_keys(size);
        let ordered_map: OrderedMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();
        let standard_map: BTreeMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();

        // OrderedMap remove
        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = ordered_map.clone();
                for key in keys {
                    map.remove(black_box(key));
                }
                black_box(map)
            });
        });

        // Standard BTreeMap remove
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = standard_map.clone();
                for key in keys {
                    map.remove(black_box(key));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [100, 1000, 10000] {
        let ordered_map: OrderedMap<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        // OrderedMap iteration
        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = ordered_map.values().map(|&value| i64::from(value)).sum();
                black_box(sum)
            });
        });

        // Standard BTreeMap iteration
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard_map.values().map(|&value| i64::from(value)).sum();
                black_box(sum)
            });
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
    benchmark_insert_sorted,
    benchmark_get,
    benchmark_remove,
    benchmark_iteration
);

criterion_main!(benches);
