//! Bump-allocation performance benchmarks.
//!
//! Measures raw allocation throughput, checkpoint/restore overhead, and
//! reset cost against a fixed-capacity arena.

use arenac_mem::arena::Arena;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_alloc_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_small");
    for size in [8usize, 16, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut arena = Arena::new(1 << 20);
                for _ in 0..1000 {
                    black_box(arena.alloc(size).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_checkpoint_restore(c: &mut Criterion) {
    c.bench_function("checkpoint_restore", |b| {
        let mut arena = Arena::new(1 << 20);
        b.iter(|| {
            let checkpoint = arena.checkpoint();
            for _ in 0..100 {
                black_box(arena.alloc(32).unwrap());
            }
            arena.restore(checkpoint);
        });
    });
}

fn bench_reset(c: &mut Criterion) {
    c.bench_function("reset", |b| {
        let mut arena = Arena::new(1 << 20);
        b.iter(|| {
            for _ in 0..256 {
                arena.alloc(64).unwrap();
            }
            arena.reset();
        });
    });
}

fn bench_zone_switch(c: &mut Criterion) {
    c.bench_function("zone_switch", |b| {
        let mut arena = Arena::new(1 << 20);
        let zone = arena.add_zone(1 << 16).unwrap();
        b.iter(|| {
            arena.switch_zone(zone).unwrap();
            black_box(arena.alloc(32).unwrap());
            arena.switch_zone(0).unwrap();
            black_box(arena.alloc(32).unwrap());
        });
    });
}

criterion_group!(benches, bench_alloc_small, bench_checkpoint_restore, bench_reset, bench_zone_switch);
criterion_main!(benches);
