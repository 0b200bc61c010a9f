//! The closed constraint-kind set and the shape structure built from it.

use arenac_mem::StringRef;
use arenac_graph::NodeKind;

/// Which [`NodeKind`]s a `sh:nodeKind`-style constraint accepts.
///
/// A plain field-per-kind set rather than a bitflags crate: the corpus pulls
/// in no flags dependency anywhere, and three booleans read exactly as
/// clearly at the one or two call sites that build one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKindSet {
    /// Accepts IRI-identified resources.
    pub iri: bool,
    /// Accepts blank nodes.
    pub blank: bool,
    /// Accepts literals.
    pub literal: bool,
}

impl NodeKindSet {
    /// A set accepting exactly one kind.
    #[must_use]
    pub const fn only(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Iri => Self { iri: true, blank: false, literal: false },
            NodeKind::Blank => Self { iri: false, blank: true, literal: false },
            NodeKind::Literal => Self { iri: false, blank: false, literal: true },
        }
    }

    /// A set accepting every kind (the union of all three).
    #[must_use]
    pub const fn any() -> Self {
        Self { iri: true, blank: true, literal: true }
    }

    /// True if `kind` is one of the accepted kinds.
    #[must_use]
    pub const fn accepts(self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Iri => self.iri,
            NodeKind::Blank => self.blank,
            NodeKind::Literal => self.literal,
        }
    }
}

/// A discriminant-only view of [`Constraint`], used for report attribution
/// (the telemetry `constraint` attribute and `ValidationResult::constraint_kind`)
/// without cloning the constraint's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `Class`
    Class,
    /// `Datatype`
    Datatype,
    /// `NodeKind`
    NodeKind,
    /// `MinCount`
    MinCount,
    /// `MaxCount`
    MaxCount,
    /// `MinLength`
    MinLength,
    /// `MaxLength`
    MaxLength,
    /// `Pattern`
    Pattern,
    /// `In`
    In,
    /// `HasValue`
    HasValue,
    /// `Closed`
    Closed,
    /// `MemoryBound`
    MemoryBound,
}

impl ConstraintKind {
    /// Short name used in diagnostic messages and telemetry attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Datatype => "Datatype",
            Self::NodeKind => "NodeKind",
            Self::MinCount => "MinCount",
            Self::MaxCount => "MaxCount",
            Self::MinLength => "MinLength",
            Self::MaxLength => "MaxLength",
            Self::Pattern => "Pattern",
            Self::In => "In",
            Self::HasValue => "HasValue",
            Self::Closed => "Closed",
            Self::MemoryBound => "MemoryBound",
        }
    }
}

/// One atomic check, drawn from §4.5's closed constraint-kind set.
///
/// Class/Datatype/NodeKind/Pattern/In/HasValue/MinLength/MaxLength are
/// "value-style": evaluated once per value reachable on a property path (or,
/// as a node constraint, once against the focus node itself).
/// MinCount/MaxCount are "count-style": evaluated once against the size of
/// the value multiset. Closed and MemoryBound are node-only.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The value's `rdf:type` chain (direct, non-transitive) must contain
    /// this class.
    Class(StringRef),
    /// The value must be a literal carrying exactly this datatype IRI.
    ///
    /// This subset has no separate literal/datatype record: a literal's
    /// datatype is recovered from how the Turtle parser interned its
    /// lexical form (see [`crate::evaluate::literal_datatype`]).
    Datatype(StringRef),
    /// The value's node kind must be one of the accepted kinds.
    NodeKind(NodeKindSet),
    /// The property path must have at least this many values.
    MinCount(u32),
    /// The property path must have at most this many values.
    MaxCount(u32),
    /// Every literal value's lexical length must be at least this.
    MinLength(u32),
    /// Every literal value's lexical length must be at most this.
    MaxLength(u32),
    /// Every literal value's lexical form must match this glob-like pattern
    /// (see [`crate::pattern::glob_match`]).
    Pattern(String),
    /// Every value must be one of this enumerated set.
    In(Vec<StringRef>),
    /// The value set must contain this exact term.
    HasValue(StringRef),
    /// The focus node may carry no properties outside `allowed` (the
    /// shape's own property-shape paths) union `ignored`.
    Closed {
        /// Additional predicates tolerated even though no property shape
        /// declares them (`sh:ignoredProperties`).
        ignored: Vec<StringRef>,
    },
    /// The arena footprint reachable from the focus node (sum of its
    /// outgoing triples' node/edge/string contribution) must not exceed
    /// this many bytes.
    MemoryBound(usize),
}

impl Constraint {
    /// This constraint's discriminant, for reporting.
    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::Class(_) => ConstraintKind::Class,
            Self::Datatype(_) => ConstraintKind::Datatype,
            Self::NodeKind(_) => ConstraintKind::NodeKind,
            Self::MinCount(_) => ConstraintKind::MinCount,
            Self::MaxCount(_) => ConstraintKind::MaxCount,
            Self::MinLength(_) => ConstraintKind::MinLength,
            Self::MaxLength(_) => ConstraintKind::MaxLength,
            Self::Pattern(_) => ConstraintKind::Pattern,
            Self::In(_) => ConstraintKind::In,
            Self::HasValue(_) => ConstraintKind::HasValue,
            Self::Closed { .. } => ConstraintKind::Closed,
            Self::MemoryBound(_) => ConstraintKind::MemoryBound,
        }
    }

    /// True for constraints evaluated once against the whole value multiset
    /// (vs. once per individual value).
    #[must_use]
    pub const fn is_count_style(&self) -> bool {
        matches!(self, Self::MinCount(_) | Self::MaxCount(_))
    }
}

/// A single property path (this subset: one predicate) and the constraints
/// evaluated against the multiset of its values.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyShape {
    /// The predicate identifying this property.
    pub path: StringRef,
    /// Constraints evaluated against this property's values.
    pub constraints: Vec<Constraint>,
}

impl PropertyShape {
    /// Builds a property shape targeting `path` with no constraints yet.
    #[must_use]
    pub const fn new(path: StringRef) -> Self {
        Self { path, constraints: Vec::new() }
    }

    /// Appends a constraint, returning `self` for chained construction.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// A named set of constraints applying to instances of `target_class`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// This shape's own identifying IRI.
    pub shape_iri: StringRef,
    /// Focus nodes are every node whose `rdf:type` chain contains this
    /// class (simplified targeting: no SPARQL-based or logical targets).
    pub target_class: StringRef,
    /// Constraints evaluated directly against the focus node.
    pub node_constraints: Vec<Constraint>,
    /// Constraints evaluated against a property path's values.
    pub property_shapes: Vec<PropertyShape>,
}

impl Shape {
    /// Builds an empty shape targeting `target_class`.
    #[must_use]
    pub const fn new(shape_iri: StringRef, target_class: StringRef) -> Self {
        Self { shape_iri, target_class, node_constraints: Vec::new(), property_shapes: Vec::new() }
    }

    /// Appends a node-level constraint, returning `self` for chaining.
    #[must_use]
    pub fn with_node_constraint(mut self, constraint: Constraint) -> Self {
        self.node_constraints.push(constraint);
        self
    }

    /// Appends a property shape, returning `self` for chaining.
    #[must_use]
    pub fn with_property_shape(mut self, property: PropertyShape) -> Self {
        self.property_shapes.push(property);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_set_only_accepts_one_kind() {
        let set = NodeKindSet::only(NodeKind::Iri);
        assert!(set.accepts(NodeKind::Iri));
        assert!(!set.accepts(NodeKind::Blank));
        assert!(!set.accepts(NodeKind::Literal));
    }

    #[test]
    fn node_kind_set_any_accepts_everything() {
        let set = NodeKindSet::any();
        assert!(set.accepts(NodeKind::Iri));
        assert!(set.accepts(NodeKind::Blank));
        assert!(set.accepts(NodeKind::Literal));
    }

    #[test]
    fn constraint_kind_round_trips() {
        assert_eq!(Constraint::MinCount(1).kind(), ConstraintKind::MinCount);
        assert!(Constraint::MinCount(1).is_count_style());
        assert!(!Constraint::MinLength(1).is_count_style());
    }

    #[test]
    fn shape_builder_accumulates() {
        let shape_iri = StringRef::new(1, 0, 1);
        let class = StringRef::new(2, 1, 1);
        let path = StringRef::new(3, 2, 1);
        let shape = Shape::new(shape_iri, class)
            .with_node_constraint(Constraint::MemoryBound(64))
            .with_property_shape(PropertyShape::new(path).with_constraint(Constraint::MinCount(1)));
        assert_eq!(shape.node_constraints.len(), 1);
        assert_eq!(shape.property_shapes.len(), 1);
        assert_eq!(shape.property_shapes[0].constraints.len(), 1);
    }
}
