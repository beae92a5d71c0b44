//! Insert, lookup and iteration through `HashBackend` for both engines.

use std::hint::black_box;

use champ_chain::{ChainedHashMap, ChampMap, HashBackend};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const SIZES: [u64; 3] = [1_000, 10_000, 100_000];

fn filled<B: HashBackend<u64, u64> + Default>(n: u64) -> B {
    let mut backend = B::default();
    for i in 0..n {
        backend.insert(i, i);
    }
    backend
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("chained", n), &n, |b, &n| {
            b.iter(|| filled::<ChainedHashMap<u64, u64>>(black_box(n)));
        });
        group.bench_with_input(BenchmarkId::new("champ", n), &n, |b, &n| {
            b.iter(|| filled::<ChampMap<u64, u64>>(black_box(n)));
        });
    }
    group.finish();
}

fn lookup_all<B: HashBackend<u64, u64>>(backend: &B, n: u64) -> u64 {
    (0..n).filter_map(|i| backend.get(&i)).sum()
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for n in SIZES {
        let chained: ChainedHashMap<u64, u64> = filled(n);
        let champ: ChampMap<u64, u64> = filled(n);
        group.bench_with_input(BenchmarkId::new("chained", n), &n, |b, &n| {
            b.iter(|| lookup_all(&chained, black_box(n)));
        });
        group.bench_with_input(BenchmarkId::new("champ", n), &n, |b, &n| {
            b.iter(|| lookup_all(&champ, black_box(n)));
        });
    }
    group.finish();
}

fn sum_values<B: HashBackend<u64, u64>>(backend: &B) -> u64 {
    backend.iter().map(|(_, v)| *v).sum()
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    for n in SIZES {
        let chained: ChainedHashMap<u64, u64> = filled(n);
        let champ: ChampMap<u64, u64> = filled(n);
        group.bench_function(BenchmarkId::new("chained", n), |b| {
            b.iter(|| sum_values(black_box(&chained)));
        });
        group.bench_function(BenchmarkId::new("champ", n), |b| {
            b.iter(|| sum_values(black_box(&champ)));
        });
    }
    group.finish();
}

fn bench_deep_clone(c: &mut Criterion) {
    let chained: ChainedHashMap<u64, u64> = filled(100_000);
    c.bench_function("chained/clone/100000", |b| b.iter(|| black_box(&chained).clone()));
}

criterion_group!(benches, bench_insert, bench_get, bench_iter, bench_deep_clone);
criterion_main!(benches);
