//! String interning performance benchmarks.
//!
//! Measures the performance of string interning operations including:
//! - Interning new strings (hash insert)
//! - Interning duplicate strings (hash lookup)
//! - Reference resolution (arena slice reconstruction)
//! - Preloaded-vocabulary lookup overhead

use arenac_mem::interner::StringInterner;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_intern_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern_new");

    for size in [10, 100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let strings: Vec<String> = (0..size).map(|i| format!("http://example.org/e{i}")).collect();

            b.iter(|| {
                let mut interner = StringInterner::new();
                for s in &strings {
                    black_box(interner.intern(s));
                }
            });
        });
    }

    group.finish();
}

fn bench_intern_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern_duplicates");

    for size in [10, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let strings: Vec<String> = (0..size).map(|i| format!("http://example.org/e{i}")).collect();

            b.iter(|| {
                let mut interner = StringInterner::new();
                for s in &strings {
                    interner.intern(s);
                }
                for s in &strings {
                    black_box(interner.intern(s));
                }
            });
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for size in [10, 100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut interner = StringInterner::new();
            let refs: Vec<_> = (0..size)
                .map(|i| interner.intern(&format!("http://example.org/e{i}")))
                .collect();

            b.iter(|| {
                for &r in &refs {
                    black_box(interner.resolve(r));
                }
            });
        });
    }

    group.finish();
}

fn bench_preloaded_vocabulary_lookup(c: &mut Criterion) {
    c.bench_function("preloaded_vocabulary_lookup", |b| {
        let mut interner = StringInterner::new();
        let terms = [
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            "http://www.w3.org/2001/XMLSchema#integer",
            "http://www.w3.org/2001/XMLSchema#string",
        ];

        b.iter(|| {
            for term in &terms {
                let r = interner.intern(term);
                black_box(interner.resolve(r));
            }
        });
    });
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_workload");

    for size in [100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let strings: Vec<String> = (0..size)
                .map(|i| {
                    if i % 3 == 0 {
                        "http://www.w3.org/1999/02/22-rdf-syntax-ns#type".to_string()
                    } else if i % 2 == 0 {
                        format!("http://example.org/shared{}", i % 100)
                    } else {
                        format!("http://example.org/unique{i}")
                    }
                })
                .collect();

            b.iter(|| {
                let mut interner = StringInterner::new();
                for (i, s) in strings.iter().enumerate() {
                    let r = interner.intern(s);
                    if i % 10 == 0 {
                        black_box(interner.resolve(r));
                    }
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_intern_new,
    bench_intern_duplicates,
    bench_resolve,
    bench_preloaded_vocabulary_lookup,
    bench_mixed_workload
);
criterion_main!(benches);
