//! End-to-end pipeline benchmark: parse Turtle, validate, materialize.

use arenac_graph::Graph;
use arenac_shacl::{validate, Constraint, PropertyShape, Shape, ShapeRegistry};
use arenac_snapshot::materialize;
use arenac_turtle::parser::parse_str;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn turtle_source(size: usize) -> String {
    let mut source = String::from("@prefix ex: <http://example.org/> .\n");
    for i in 0..size {
        source.push_str(&format!("ex:p{i} a ex:Person ; ex:name \"Person {i}\" .\n"));
    }
    source
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_validate_materialize");
    for size in [100, 1_000, 10_000] {
        let source = turtle_source(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let mut graph = Graph::new();
                parse_str(source, &mut graph).unwrap();

                let name = graph.intern("http://example.org/name");
                let person = graph.intern("http://example.org/Person");
                let shape_iri = graph.intern("http://example.org/PersonShape");
                let mut registry = ShapeRegistry::new();
                registry
                    .register(
                        Shape::new(shape_iri, person)
                            .with_property_shape(PropertyShape::new(name).with_constraint(Constraint::MinCount(1))),
                    )
                    .unwrap();

                let report = black_box(validate(&graph, &registry));
                assert!(report.conforms);

                black_box(materialize(&graph));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
