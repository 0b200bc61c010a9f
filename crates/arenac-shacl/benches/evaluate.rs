//! Validator performance benchmarks.

use arenac_graph::{Graph, ObjectKind};
use arenac_shacl::{validate, Constraint, PropertyShape, Shape, ShapeRegistry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_graph_and_registry(size: usize) -> (Graph, ShapeRegistry) {
    let mut graph = Graph::new();
    let rdf_type = graph.intern("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    let person = graph.intern("http://example.org/Person");
    let name = graph.intern("http://example.org/name");

    for i in 0..size {
        let instance = graph.intern(&format!("http://example.org/person{i}"));
        graph.insert_triple(instance, rdf_type, person, ObjectKind::Iri).unwrap();
        let literal = graph.intern(&format!("\"Person {i}\""));
        graph.insert_triple(instance, name, literal, ObjectKind::Literal).unwrap();
    }

    let shape_iri = graph.intern("http://example.org/PersonShape");
    let shape = Shape::new(shape_iri, person)
        .with_property_shape(PropertyShape::new(name).with_constraint(Constraint::MinCount(1)));
    let mut registry = ShapeRegistry::new();
    registry.register(shape).unwrap();

    (graph, registry)
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for size in [100, 1_000, 10_000] {
        let (graph, registry) = build_graph_and_registry(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(validate(&graph, &registry)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
