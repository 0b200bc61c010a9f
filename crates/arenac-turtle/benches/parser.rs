// Parser throughput benchmarks: full source-to-graph streaming, including
// node/triple insertion, not just tokenization.

use arenac_graph::Graph;
use arenac_turtle::parser::parse_str;
use criterion::{black_box, criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};

fn parse_into_fresh_graph(source: &str) {
    let mut graph = Graph::new();
    parse_str(source, &mut graph).unwrap();
}

fn bench_single_triple(c: &mut Criterion) {
    let source = "<http://ex/a> <http://ex/p> <http://ex/b> .";
    c.bench_function("single_triple", |b: &mut Bencher| {
        b.iter(|| parse_into_fresh_graph(black_box(source)));
    });
}

fn bench_prefixed_document(c: &mut Criterion) {
    let source = "@prefix ex: <http://ex/> .\nex:a ex:p ex:b, ex:c ; ex:q ex:d .";
    c.bench_function("prefixed_document", |b: &mut Bencher| {
        b.iter(|| parse_into_fresh_graph(black_box(source)));
    });
}

fn bench_collection(c: &mut Criterion) {
    let source = "@prefix ex: <http://ex/> .\nex:a ex:p ( 1 2 3 4 5 ) .";
    c.bench_function("collection", |b: &mut Bencher| {
        b.iter(|| parse_into_fresh_graph(black_box(source)));
    });
}

fn bench_blank_node_property_list(c: &mut Criterion) {
    let source = "@prefix ex: <http://ex/> .\nex:a ex:p [ ex:q ex:r ; ex:s ex:t ] .";
    c.bench_function("blank_node_property_list", |b: &mut Bencher| {
        b.iter(|| parse_into_fresh_graph(black_box(source)));
    });
}

fn bench_document_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_size");
    let base_statement = "ex:a ex:p ex:b, ex:c, ex:d .\n";
    let sizes = [1, 10, 50, 100, 500];

    for size in sizes {
        let mut source = String::from("@prefix ex: <http://ex/> .\n");
        source.push_str(&base_statement.repeat(size));
        let triple_count = size * 3;

        group.bench_with_input(BenchmarkId::from_parameter(triple_count), &triple_count, |b: &mut Bencher, _| {
            b.iter(|| parse_into_fresh_graph(black_box(&source)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_triple,
    bench_prefixed_document,
    bench_collection,
    bench_blank_node_property_list,
    bench_document_size,
);

criterion_main!(benches);
