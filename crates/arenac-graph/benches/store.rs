//! Triple store performance benchmarks.

use arenac_graph::{Graph, ObjectKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_triple");
    for size in [100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut graph = Graph::new();
                for i in 0..size {
                    let s = graph.intern(&format!("http://example.org/s{i}"));
                    let p = graph.intern("http://example.org/knows");
                    let o = graph.intern(&format!("http://example.org/o{i}"));
                    black_box(graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_find_by_subject(c: &mut Criterion) {
    c.bench_function("find_triples_by_subject", |b| {
        let mut graph = Graph::new();
        let s = graph.intern("http://example.org/hub");
        for i in 0..1_000 {
            let p = graph.intern(&format!("http://example.org/p{i}"));
            let o = graph.intern(&format!("http://example.org/o{i}"));
            graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap();
        }
        b.iter(|| black_box(graph.find_triples(Some(s), None, None)));
    });
}

fn bench_contains(c: &mut Criterion) {
    c.bench_function("contains_triple", |b| {
        let mut graph = Graph::new();
        let s = graph.intern("http://example.org/s");
        let p = graph.intern("http://example.org/p");
        let o = graph.intern("http://example.org/o");
        graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap();
        b.iter(|| black_box(graph.contains_triple(s, p, o)));
    });
}

criterion_group!(benches, bench_insert, bench_find_by_subject, bench_contains);
criterion_main!(benches);
