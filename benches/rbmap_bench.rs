//! Benchmark for RbMap vs standard BTreeMap.
//!
//! Compares insertion, lookup, erasure and in-order iteration.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rbmap::RbMap;
use std::collections::BTreeMap;

/// Keys in a scrambled but deterministic order.
fn scrambled_keys(size: i64) -> Vec<i64> {
    (0..size).map(|index| (index * 7919) % size).collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        let keys = scrambled_keys(size);

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = RbMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.entry(black_box(key)).or_insert(black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// find Benchmark
// =============================================================================

fn benchmark_find(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find");

    for size in [100, 1000, 10000] {
        let keys = scrambled_keys(size);
        let rbmap: RbMap<i64, i64> = keys.iter().map(|&key| (key, key)).collect();
        let btreemap: BTreeMap<i64, i64> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                for key in keys {
                    black_box(rbmap.get(black_box(key)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                for key in keys {
                    black_box(btreemap.get(black_box(key)));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// erase Benchmark
// =============================================================================

fn benchmark_erase(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("erase");

    for size in [100, 1000, 10000] {
        let keys = scrambled_keys(size);
        let rbmap: RbMap<i64, i64> = keys.iter().map(|&key| (key, key)).collect();
        let btreemap: BTreeMap<i64, i64> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = rbmap.clone();
                for key in keys {
                    let position = map.find(key);
                    black_box(map.erase(position).ok());
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = btreemap.clone();
                for key in keys {
                    black_box(map.remove(key));
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
        let rbmap: RbMap<i64, i64> = (0..size).map(|key| (key, key)).collect();
        let btreemap: BTreeMap<i64, i64> = (0..size).map(|key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("RbMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(rbmap.iter().map(|(_, value)| value).sum::<i64>()));
        });

        group.bench_with_input(BenchmarkId::new("RbMap_cursor", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut cursor = rbmap.cursor_front();
                let mut sum = 0;
                while let Ok(value) = cursor.value() {
                    sum += value;
                    let _ = cursor.move_next();
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(btreemap.values().sum::<i64>()));
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
    benchmark_find,
    benchmark_erase,
    benchmark_iteration
);

criterion_main!(benches);
