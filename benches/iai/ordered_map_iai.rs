//! IAI-Callgrind benchmark for OrderedMap construction and removal.
//!
//! Measures instruction counts for random-order insert, hinted sorted insert
//! and erasing every key. Data sizes: 100, 1000 and 10000.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use rbcollections::map::OrderedMap;
use std::hint::black_box;

// Setup functions for different data sizes
fn setup_shuffled_100() -> Vec<u32> {
    shuffled(100)
}

fn setup_shuffled_1000() -> Vec<u32> {
    shuffled(1000)
}

fn setup_shuffled_10000() -> Vec<u32> {
    shuffled(10000)
}

fn shuffled(size: u32) -> Vec<u32> {
    (0..size).map(|index| index * 7919 % size).collect()
}

fn setup_map_1000() -> OrderedMap<u32, u32> {
    (0..1000).map(|key| (key, key)).collect()
}

// insert benchmarks
#[library_benchmark]
#[bench::with_setup(setup_shuffled_100())]
fn insert_shuffled_100(keys: Vec<u32>) -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in black_box(keys) {
        map.insert(key, key);
    }
    black_box(map)
}

#[library_benchmark]
#[bench::with_setup(setup_shuffled_1000())]
fn insert_shuffled_1000(keys: Vec<u32>) -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in black_box(keys) {
        map.insert(key, key);
    }
    black_box(map)
}

#[library_benchmark]
#[bench::with_setup(setup_shuffled_10000())]
fn insert_shuffled_10000(keys: Vec<u32>) -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in black_box(keys) {
        map.insert(key, key);
    }
    black_box(map)
}

// hinted insert benchmark (baseline for sorted input)
#[library_benchmark]
fn insert_with_hint_sorted_1000() -> OrderedMap<u32, u32> {
    let mut map = OrderedMap::new();
    for key in 0..black_box(1000u32) {
        map.insert_with_hint(map.end(), key, key);
    }
    black_box(map)
}

// erase benchmark
#[library_benchmark]
#[bench::with_setup(setup_map_1000())]
fn erase_all_1000(mut map: OrderedMap<u32, u32>) -> usize {
    let mut erased = 0;
    for key in 0..1000u32 {
        erased += map.erase(&black_box(key));
    }
    black_box(erased)
}

library_benchmark_group!(
    name = ordered_map_group;
    benchmarks =
        insert_shuffled_100, insert_shuffled_1000, insert_shuffled_10000,
        insert_with_hint_sorted_1000,
        erase_all_1000
);

main!(library_benchmark_groups = ordered_map_group);
