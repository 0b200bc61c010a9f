// Lexer performance benchmarks for the Turtle-subset tokenizer.
//
// These measure token throughput on a handful of representative shapes: a
// single directive, a short triple, a triple with a literal, and a few
// input sizes to check throughput scales linearly with source length.

use arenac_mem::StringInterner;
use arenac_turtle::lexer::Lexer;
use criterion::{black_box, criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};

fn lex_all(source: &str) {
    let mut interner = StringInterner::new();
    let mut lexer = Lexer::new(source.as_bytes(), &mut interner);
    lexer.tokenize_all().unwrap();
}

fn bench_prefix_directive(c: &mut Criterion) {
    let source = "@prefix ex: <http://example.org/> .";
    c.bench_function("prefix_directive", |b: &mut Bencher| {
        b.iter(|| lex_all(black_box(source)));
    });
}

fn bench_simple_triple(c: &mut Criterion) {
    let source = "<http://ex/a> <http://ex/p> <http://ex/b> .";
    c.bench_function("simple_triple", |b: &mut Bencher| {
        b.iter(|| lex_all(black_box(source)));
    });
}

fn bench_literal_objects(c: &mut Criterion) {
    let source = r#"<http://ex/a> <http://ex/p> "hello world"@en, 42, 3.14, 1.5e10, true ."#;
    c.bench_function("literal_objects", |b: &mut Bencher| {
        b.iter(|| lex_all(black_box(source)));
    });
}

fn bench_blank_node_property_list(c: &mut Criterion) {
    let source = "<http://ex/a> <http://ex/p> [ <http://ex/q> <http://ex/r> ; <http://ex/s> <http://ex/t> ] .";
    c.bench_function("blank_node_property_list", |b: &mut Bencher| {
        b.iter(|| lex_all(black_box(source)));
    });
}

fn bench_input_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_size");
    let base_line = "@prefix ex: <http://ex/> .\nex:a ex:p ex:b, ex:c, ex:d .\n";
    let sizes = [1, 10, 50, 100, 500, 1000];

    for size in sizes {
        let source = base_line.repeat(size);
        let triple_count = size * 3;
        group.bench_with_input(BenchmarkId::from_parameter(triple_count), &triple_count, |b: &mut Bencher, _| {
            b.iter(|| lex_all(black_box(&source)));
        });
    }

    group.finish();
}

fn bench_numeric_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_literals");

    group.bench_function("integer", |b: &mut Bencher| {
        let source = "<http://ex/a> <http://ex/p> 1234567890 .";
        b.iter(|| lex_all(black_box(source)));
    });

    group.bench_function("decimal", |b: &mut Bencher| {
        let source = "<http://ex/a> <http://ex/p> 3.1415926535 .";
        b.iter(|| lex_all(black_box(source)));
    });

    group.bench_function("double_with_exponent", |b: &mut Bencher| {
        let source = "<http://ex/a> <http://ex/p> 1.5e10 .";
        b.iter(|| lex_all(black_box(source)));
    });

    group.finish();
}

fn bench_prefixed_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefixed_names");

    group.bench_function("short", |b: &mut Bencher| {
        let source = "ex:a ex:p ex:b .";
        b.iter(|| lex_all(black_box(source)));
    });

    group.bench_function("many", |b: &mut Bencher| {
        let source = "ex:a ex:p ex:b, ex:c, ex:d, ex:e, ex:f .";
        b.iter(|| lex_all(black_box(source)));
    });

    group.finish();
}

fn bench_comments(c: &mut Criterion) {
    let source = "# leading comment\n<http://ex/a> <http://ex/p> <http://ex/b> . # trailing comment\n";
    c.bench_function("comment_skipping", |b: &mut Bencher| {
        b.iter(|| lex_all(black_box(source)));
    });
}

criterion_group!(
    benches,
    bench_prefix_directive,
    bench_simple_triple,
    bench_literal_objects,
    bench_blank_node_property_list,
    bench_input_size,
    bench_numeric_literals,
    bench_prefixed_names,
    bench_comments,
);

criterion_main!(benches);
