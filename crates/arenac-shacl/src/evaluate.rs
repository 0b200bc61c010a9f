//! The three-step evaluation algorithm from §4.5: target indexing, per-shape
//! constraint evaluation, and report accumulation.

use std::collections::HashSet;

use arenac_graph::{Edge, Graph, Node, NodeKind};
use arenac_mem::StringRef;

use crate::pattern::glob_match;
use crate::registry::ShapeRegistry;
use crate::report::{Severity, ValidationReport, ValidationResult};
use crate::shape::{Constraint, ConstraintKind, Shape};

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

/// Validates every node targeted by a shape in `registry` against that
/// shape's constraints, in (focus_node insertion, shape declaration,
/// constraint declaration, value encountered) order.
#[must_use]
pub fn validate(graph: &Graph, registry: &ShapeRegistry) -> ValidationReport {
    let mut report = ValidationReport::new();
    let Some(rdf_type) = graph.lookup(RDF_TYPE) else {
        return report;
    };

    let mut seen = HashSet::new();
    for type_triple_id in graph.find_triples(None, Some(rdf_type), None) {
        let Some(triple) = graph.triple(type_triple_id) else { continue };
        let focus = triple.subject;
        let class = triple.object;
        for &shape_idx in registry.shapes_for_class(class) {
            if !seen.insert((focus, shape_idx)) {
                continue;
            }
            let shape = registry.shape(shape_idx).expect("index from shapes_for_class is always valid");
            evaluate_shape(graph, rdf_type, shape, focus, &mut report);
        }
    }
    report
}

fn evaluate_shape(graph: &Graph, rdf_type: StringRef, shape: &Shape, focus: StringRef, report: &mut ValidationReport) {
    for constraint in &shape.node_constraints {
        evaluate_node_constraint(graph, rdf_type, shape, constraint, focus, report);
    }
    for property in &shape.property_shapes {
        let values = property_values(graph, focus, property.path);
        for constraint in &property.constraints {
            evaluate_property_constraint(graph, rdf_type, constraint, focus, property.path, &values, report);
        }
    }
}

fn property_values(graph: &Graph, focus: StringRef, path: StringRef) -> Vec<(StringRef, NodeKind)> {
    graph
        .find_triples(Some(focus), Some(path), None)
        .into_iter()
        .filter_map(|id| graph.triple(id))
        .map(|t| (t.object, t.object_kind.as_node_kind()))
        .collect()
}

fn node_kind_of(graph: &Graph, iri: StringRef) -> NodeKind {
    for kind in [NodeKind::Iri, NodeKind::Blank, NodeKind::Literal] {
        if let Some(idx) = graph.get_node_index(iri, kind) {
            if let Some(node) = graph.node(idx) {
                return node.kind;
            }
        }
    }
    NodeKind::Iri
}

fn evaluate_node_constraint(
    graph: &Graph,
    rdf_type: StringRef,
    shape: &Shape,
    constraint: &Constraint,
    focus: StringRef,
    report: &mut ValidationReport,
) {
    match constraint {
        Constraint::Closed { ignored } => {
            let allowed: HashSet<StringRef> =
                shape.property_shapes.iter().map(|p| p.path).chain(ignored.iter().copied()).collect();
            for triple_id in graph.find_triples(Some(focus), None, None) {
                let Some(triple) = graph.triple(triple_id) else { continue };
                if !allowed.contains(&triple.predicate) {
                    report.push(ValidationResult {
                        focus_node: focus,
                        property_path: Some(triple.predicate),
                        value: Some(triple.object),
                        constraint_kind: ConstraintKind::Closed,
                        severity: Severity::Violation,
                        message: "property not permitted by closed shape".to_owned(),
                        memory_footprint: None,
                    });
                }
            }
        }
        Constraint::MemoryBound(limit) => {
            let footprint = memory_footprint(graph, focus);
            if footprint > *limit {
                report.push(ValidationResult {
                    focus_node: focus,
                    property_path: None,
                    value: None,
                    constraint_kind: ConstraintKind::MemoryBound,
                    severity: Severity::MemoryViolation,
                    message: format!("memory footprint {footprint} exceeds limit {limit}"),
                    memory_footprint: Some(footprint),
                });
            }
        }
        Constraint::MinCount(_) | Constraint::MaxCount(_) | Constraint::HasValue(_) => {
            // Whole-set constraints are only meaningful against a property
            // path's value multiset, never against a bare focus node.
        }
        _ => {
            let kind = node_kind_of(graph, focus);
            if let Err(message) = check_value_constraint(graph, rdf_type, constraint, focus, kind) {
                report.push(ValidationResult {
                    focus_node: focus,
                    property_path: None,
                    value: None,
                    constraint_kind: constraint.kind(),
                    severity: Severity::Violation,
                    message,
                    memory_footprint: None,
                });
            }
        }
    }
}

fn evaluate_property_constraint(
    graph: &Graph,
    rdf_type: StringRef,
    constraint: &Constraint,
    focus: StringRef,
    path: StringRef,
    values: &[(StringRef, NodeKind)],
    report: &mut ValidationReport,
) {
    match constraint {
        Constraint::MinCount(min) => {
            if (values.len() as u32) < *min {
                report.push(ValidationResult {
                    focus_node: focus,
                    property_path: Some(path),
                    value: None,
                    constraint_kind: ConstraintKind::MinCount,
                    severity: Severity::Violation,
                    message: format!("expected at least {min} value(s), found {}", values.len()),
                    memory_footprint: None,
                });
            }
        }
        Constraint::MaxCount(max) => {
            if (values.len() as u32) > *max {
                report.push(ValidationResult {
                    focus_node: focus,
                    property_path: Some(path),
                    value: None,
                    constraint_kind: ConstraintKind::MaxCount,
                    severity: Severity::Violation,
                    message: format!("expected at most {max} value(s), found {}", values.len()),
                    memory_footprint: None,
                });
            }
        }
        Constraint::HasValue(target) => {
            if !values.iter().any(|(v, _)| v == target) {
                report.push(ValidationResult {
                    focus_node: focus,
                    property_path: Some(path),
                    value: None,
                    constraint_kind: ConstraintKind::HasValue,
                    severity: Severity::Violation,
                    message: "required value is not present on this property".to_owned(),
                    memory_footprint: None,
                });
            }
        }
        _ => {
            for &(value, kind) in values {
                if let Err(message) = check_value_constraint(graph, rdf_type, constraint, value, kind) {
                    report.push(ValidationResult {
                        focus_node: focus,
                        property_path: Some(path),
                        value: Some(value),
                        constraint_kind: constraint.kind(),
                        severity: Severity::Violation,
                        message,
                        memory_footprint: None,
                    });
                }
            }
        }
    }
}

fn check_value_constraint(
    graph: &Graph,
    rdf_type: StringRef,
    constraint: &Constraint,
    value: StringRef,
    kind: NodeKind,
) -> Result<(), String> {
    match constraint {
        Constraint::Class(target) => {
            if graph.find_triples(Some(value), Some(rdf_type), Some(*target)).is_empty() {
                Err(format!("value does not carry required rdf:type {}", graph.resolve(*target)))
            } else {
                Ok(())
            }
        }
        Constraint::Datatype(target) => {
            if kind != NodeKind::Literal {
                return Err("value is not a literal".to_owned());
            }
            let lexical = graph.resolve(value);
            let inferred = literal_datatype(lexical);
            let target_str = graph.resolve(*target);
            if inferred == target_str {
                Ok(())
            } else {
                Err(format!("literal '{lexical}' has inferred datatype {inferred}, expected {target_str}"))
            }
        }
        Constraint::NodeKind(set) => {
            if set.accepts(kind) {
                Ok(())
            } else {
                Err("value's node kind is not one of the accepted kinds".to_owned())
            }
        }
        Constraint::MinLength(min) => {
            let len = graph.resolve(value).chars().count() as u32;
            if len >= *min {
                Ok(())
            } else {
                Err(format!("value length {len} is below minimum {min}"))
            }
        }
        Constraint::MaxLength(max) => {
            let len = graph.resolve(value).chars().count() as u32;
            if len <= *max {
                Ok(())
            } else {
                Err(format!("value length {len} exceeds maximum {max}"))
            }
        }
        Constraint::Pattern(pattern) => {
            let text = graph.resolve(value);
            if glob_match(pattern, text) {
                Ok(())
            } else {
                Err(format!("value '{text}' does not match pattern '{pattern}'"))
            }
        }
        Constraint::In(set) => {
            if set.contains(&value) {
                Ok(())
            } else {
                Err("value is not a member of the enumerated set".to_owned())
            }
        }
        Constraint::MinCount(_) | Constraint::MaxCount(_) | Constraint::HasValue(_) | Constraint::Closed { .. } | Constraint::MemoryBound(_) => {
            // Dispatched by dedicated handlers in the callers above.
            Ok(())
        }
    }
}

fn memory_footprint(graph: &Graph, focus: StringRef) -> usize {
    let node_size = std::mem::size_of::<Node>();
    let edge_size = std::mem::size_of::<Edge>();
    let mut total = 0usize;
    for triple_id in graph.find_triples(Some(focus), None, None) {
        let Some(triple) = graph.triple(triple_id) else { continue };
        total += node_size + edge_size;
        total += graph.resolve(triple.subject).len();
        total += graph.resolve(triple.predicate).len();
        total += graph.resolve(triple.object).len();
    }
    total
}

/// Infers a literal's XSD datatype IRI from its lexical form.
///
/// This subset's graph carries no separate per-literal datatype record
/// (see [`arenac_graph::ObjectKind`]), so the `Datatype` constraint recovers
/// it the same way the Turtle parser classified the literal on the way in:
/// boolean spellings, then integer/decimal/double numeric shapes, and
/// `xsd:string` otherwise.
#[must_use]
pub fn literal_datatype(lexical: &str) -> &'static str {
    if lexical == "true" || lexical == "false" {
        return XSD_BOOLEAN;
    }
    if is_integer(lexical) {
        return XSD_INTEGER;
    }
    if is_decimal(lexical) {
        return XSD_DECIMAL;
    }
    if is_double(lexical) {
        return XSD_DOUBLE;
    }
    XSD_STRING
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    match body.split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn is_double(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let Some(exp_pos) = body.find(['e', 'E']) else { return false };
    let (mantissa, exponent) = body.split_at(exp_pos);
    let exponent = exponent[1..].strip_prefix(['+', '-']).unwrap_or(&exponent[1..]);
    if exponent.is_empty() || !exponent.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    is_integer(mantissa) || is_decimal(mantissa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenac_graph::ObjectKind;

    const PERSON: &str = "http://example.org/Person";
    const NAME: &str = "http://example.org/name";
    const ALICE: &str = "http://example.org/alice";

    fn person_shape_min_name(graph: &mut Graph) -> ShapeRegistry {
        let shape_iri = graph.intern("http://example.org/PersonShape");
        let target_class = graph.intern(PERSON);
        let name_path = graph.intern(NAME);
        let shape = Shape::new(shape_iri, target_class)
            .with_property_shape(crate::shape::PropertyShape::new(name_path).with_constraint(Constraint::MinCount(1)));
        let mut registry = ShapeRegistry::new();
        registry.register(shape).unwrap();
        registry
    }

    #[test]
    fn literal_datatype_infers_numeric_and_boolean_kinds() {
        assert_eq!(literal_datatype("42"), XSD_INTEGER);
        assert_eq!(literal_datatype("-7"), XSD_INTEGER);
        assert_eq!(literal_datatype("3.14"), XSD_DECIMAL);
        assert_eq!(literal_datatype("1.0e3"), XSD_DOUBLE);
        assert_eq!(literal_datatype("true"), XSD_BOOLEAN);
        assert_eq!(literal_datatype("false"), XSD_BOOLEAN);
        assert_eq!(literal_datatype("hello"), XSD_STRING);
    }

    #[test]
    fn s5_mincount_violation_when_property_missing() {
        let mut graph = Graph::new();
        let rdf_type = graph.intern(RDF_TYPE);
        let person = graph.intern(PERSON);
        let alice = graph.intern(ALICE);
        graph.insert_triple(alice, rdf_type, person, ObjectKind::Iri).unwrap();

        let registry = person_shape_min_name(&mut graph);
        let report = validate(&graph, &registry);

        assert!(!report.conforms);
        assert_eq!(report.violation_count, 1);
        let result = &report.results[0];
        assert_eq!(result.constraint_kind, ConstraintKind::MinCount);
        assert_eq!(result.focus_node, alice);
        assert_eq!(result.severity, Severity::Violation);
    }

    #[test]
    fn conforms_when_required_property_present() {
        let mut graph = Graph::new();
        let rdf_type = graph.intern(RDF_TYPE);
        let person = graph.intern(PERSON);
        let alice = graph.intern(ALICE);
        let name = graph.intern(NAME);
        let alice_name = graph.intern("Alice");
        graph.insert_triple(alice, rdf_type, person, ObjectKind::Iri).unwrap();
        graph.insert_triple(alice, name, alice_name, ObjectKind::Literal).unwrap();

        let registry = person_shape_min_name(&mut graph);
        let report = validate(&graph, &registry);

        assert!(report.conforms);
        assert_eq!(report.violation_count, 0);
    }

    #[test]
    fn s6_memory_bound_violation() {
        let mut graph = Graph::new();
        let rdf_type = graph.intern(RDF_TYPE);
        let person = graph.intern(PERSON);
        let alice = graph.intern(ALICE);
        let knows = graph.intern("http://example.org/knows");
        graph.insert_triple(alice, rdf_type, person, ObjectKind::Iri).unwrap();
        for i in 0..5 {
            let friend = graph.intern(&format!("http://example.org/friend{i}"));
            graph.insert_triple(alice, knows, friend, ObjectKind::Iri).unwrap();
        }

        let shape_iri = graph.intern("http://example.org/PersonMemShape");
        let target_class = graph.intern(PERSON);
        let shape = Shape::new(shape_iri, target_class).with_node_constraint(Constraint::MemoryBound(64));
        let mut registry = ShapeRegistry::new();
        registry.register(shape).unwrap();

        let report = validate(&graph, &registry);
        assert!(!report.conforms);
        assert_eq!(report.memory_violation_count, 1);
        assert_eq!(report.results[0].constraint_kind, ConstraintKind::MemoryBound);
    }

    #[test]
    fn class_constraint_checks_value_rdf_type() {
        let mut graph = Graph::new();
        let rdf_type = graph.intern(RDF_TYPE);
        let person = graph.intern(PERSON);
        let animal = graph.intern("http://example.org/Animal");
        let alice = graph.intern(ALICE);
        let pet = graph.intern("http://example.org/rex");
        let has_pet = graph.intern("http://example.org/hasPet");
        graph.insert_triple(alice, rdf_type, person, ObjectKind::Iri).unwrap();
        graph.insert_triple(alice, has_pet, pet, ObjectKind::Iri).unwrap();
        // `pet` is never asserted to be an Animal.

        let shape_iri = graph.intern("http://example.org/PersonPetShape");
        let shape = Shape::new(shape_iri, person).with_property_shape(
            crate::shape::PropertyShape::new(has_pet).with_constraint(Constraint::Class(animal)),
        );
        let mut registry = ShapeRegistry::new();
        registry.register(shape).unwrap();

        let report = validate(&graph, &registry);
        assert!(!report.conforms);
        assert_eq!(report.results[0].constraint_kind, ConstraintKind::Class);
        assert_eq!(report.results[0].value, Some(pet));
    }

    #[test]
    fn closed_shape_rejects_undeclared_property() {
        let mut graph = Graph::new();
        let rdf_type = graph.intern(RDF_TYPE);
        let person = graph.intern(PERSON);
        let alice = graph.intern(ALICE);
        let name = graph.intern(NAME);
        let alice_name = graph.intern("Alice");
        let extra = graph.intern("http://example.org/extra");
        let extra_val = graph.intern("surprise");
        graph.insert_triple(alice, rdf_type, person, ObjectKind::Iri).unwrap();
        graph.insert_triple(alice, name, alice_name, ObjectKind::Literal).unwrap();
        graph.insert_triple(alice, extra, extra_val, ObjectKind::Literal).unwrap();

        let shape_iri = graph.intern("http://example.org/ClosedPersonShape");
        let shape = Shape::new(shape_iri, person)
            .with_node_constraint(Constraint::Closed { ignored: vec![rdf_type] })
            .with_property_shape(crate::shape::PropertyShape::new(name));
        let mut registry = ShapeRegistry::new();
        registry.register(shape).unwrap();

        let report = validate(&graph, &registry);
        assert!(!report.conforms);
        assert_eq!(report.violation_count, 1);
        assert_eq!(report.results[0].constraint_kind, ConstraintKind::Closed);
        assert_eq!(report.results[0].property_path, Some(extra));
    }
}
