//! End-to-end scenarios chaining the parser, validator, and materializer
//! over one shared document, mirroring the seed scenarios every component
//! crate also covers in isolation (arena, interner, and bare graph
//! insert/query are exercised by each leaf crate's own unit tests).

use arenac_graph::{Graph, NodeKind};
use arenac_shacl::{literal_datatype, validate, Constraint, PropertyShape, Shape, ShapeRegistry};
use arenac_snapshot::{materialize, view};
use arenac_turtle::parser::parse_str;

const DOCUMENT: &str = "\
@prefix ex: <http://example.org/> .
ex:a a ex:Person ;
     ex:name \"Alice\" ;
     ex:knows ex:b .
";

fn person_shape_registry(graph: &mut Graph, name_min_count: u32) -> ShapeRegistry {
    let name = graph.intern("http://example.org/name");
    let person = graph.intern("http://example.org/Person");
    let shape_iri = graph.intern("http://example.org/PersonShape");
    let mut registry = ShapeRegistry::new();
    registry
        .register(
            Shape::new(shape_iri, person)
                .with_property_shape(PropertyShape::new(name).with_constraint(Constraint::MinCount(name_min_count))),
        )
        .unwrap();
    registry
}

#[test]
fn turtle_round_trip_matches_s4() {
    let mut graph = Graph::new();
    let inserted = parse_str(DOCUMENT, &mut graph).unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(graph.triples().len(), 3);

    let a = graph.intern("http://example.org/a");
    let name_node = graph.get_node_index(a, NodeKind::Iri).and_then(|idx| graph.node(idx)).unwrap();
    assert_eq!(name_node.out_degree, 3);

    let alice = graph.intern("Alice");
    let literal_node = graph.get_node_index(alice, NodeKind::Literal).and_then(|idx| graph.node(idx)).unwrap();
    assert_eq!(literal_node.kind, NodeKind::Literal);
    assert_eq!(literal_datatype(graph.resolve(alice)), "http://www.w3.org/2001/XMLSchema#string");
}

#[test]
fn validator_conforms_against_s4_document() {
    let mut graph = Graph::new();
    parse_str(DOCUMENT, &mut graph).unwrap();
    let registry = person_shape_registry(&mut graph, 1);

    let report = validate(&graph, &registry);
    assert!(report.conforms);
    assert_eq!(report.violation_count, 0);
}

#[test]
fn missing_required_property_is_an_s5_violation() {
    let document = "\
@prefix ex: <http://example.org/> .
ex:a a ex:Person ;
     ex:knows ex:b .
";
    let mut graph = Graph::new();
    parse_str(document, &mut graph).unwrap();
    let registry = person_shape_registry(&mut graph, 1);

    let report = validate(&graph, &registry);
    assert!(!report.conforms);
    assert_eq!(report.violation_count, 1);

    let a = graph.intern("http://example.org/a");
    let result = &report.results[0];
    assert_eq!(result.constraint_kind, arenac_shacl::ConstraintKind::MinCount);
    assert_eq!(result.focus_node, a);
}

#[test]
fn memory_bound_violation_is_reported_separately_s6() {
    let mut graph = Graph::new();
    parse_str(DOCUMENT, &mut graph).unwrap();

    let name = graph.intern("http://example.org/name");
    let person = graph.intern("http://example.org/Person");
    let shape_iri = graph.intern("http://example.org/PersonMemoryShape");
    let mut registry = ShapeRegistry::new();
    registry
        .register(
            Shape::new(shape_iri, person)
                .with_node_constraint(Constraint::MemoryBound(1))
                .with_property_shape(PropertyShape::new(name).with_constraint(Constraint::MinCount(1))),
        )
        .unwrap();

    let report = validate(&graph, &registry);
    assert!(!report.conforms);
    assert_eq!(report.memory_violation_count, 1);
    assert!(report.results.iter().any(|r| r.severity == arenac_shacl::Severity::MemoryViolation));
}

#[test]
fn snapshot_round_trips_s4_document_s7() {
    let mut graph = Graph::new();
    parse_str(DOCUMENT, &mut graph).unwrap();

    let blob = materialize(&graph);
    assert_eq!(&blob[0..4], b"PLAN");
    assert_eq!(&blob[4..6], &[0x00, 0x01]);
    assert_eq!(&blob[6..8], &[0x00, 0x00]); // flags
    assert_eq!(u32::from_le_bytes(blob[8..12].try_into().unwrap()), 3);

    let snapshot = view(&blob).unwrap();
    assert_eq!(snapshot.triple_count(), 3);

    let mut seen = 0;
    for (subject, predicate, _object) in snapshot.triples() {
        assert_eq!(subject, "http://example.org/a");
        assert!(predicate.starts_with("http://example.org/") || predicate.starts_with("http://www.w3.org/"));
        seen += 1;
    }
    assert_eq!(seen, 3);
}
