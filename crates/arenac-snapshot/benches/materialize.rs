//! Snapshot write/read performance benchmarks.

use arenac_graph::{Graph, ObjectKind};
use arenac_snapshot::{materialize, view};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sample_graph(size: u32) -> Graph {
    let mut graph = Graph::new();
    let knows = graph.intern("http://example.org/knows");
    for i in 0..size {
        let s = graph.intern(&format!("http://example.org/s{i}"));
        let o = graph.intern(&format!("http://example.org/o{i}"));
        graph.insert_triple(s, knows, o, ObjectKind::Iri).unwrap();
    }
    graph
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    for size in [100, 1_000, 10_000].iter() {
        let graph = sample_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(materialize(&graph)));
        });
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    c.bench_function("view_1000_triples", |b| {
        let graph = sample_graph(1_000);
        let blob = materialize(&graph);
        b.iter(|| black_box(view(&blob).unwrap().triple_count()));
    });
}

criterion_group!(benches, bench_materialize, bench_view);
criterion_main!(benches);
