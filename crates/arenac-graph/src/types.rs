//! Dense, index-addressed records making up a [`crate::store::Graph`].
//!
//! No raw pointers appear anywhere in this module: adjacency is expressed
//! with `u32` indices into the owning `Graph`'s dense arrays, valid only as
//! long as that `Graph` has not been cleared.

use arenac_mem::StringRef;

/// Sentinel meaning "no such index" — used for absent adjacency links and
/// absent lookups.
pub const INVALID_INDEX: u32 = u32::MAX;

/// The kind of entity a [`Node`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An IRI-identified resource.
    Iri,
    /// A blank node.
    Blank,
    /// A literal value.
    Literal,
}

/// The kind of an object position in a [`Triple`]; mirrors [`NodeKind`] but
/// names the role rather than the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// An IRI-identified resource.
    Iri,
    /// A blank node.
    Blank,
    /// A literal value.
    Literal,
}

impl ObjectKind {
    /// The [`NodeKind`] an object of this kind is recorded under.
    #[must_use]
    pub const fn as_node_kind(self) -> NodeKind {
        match self {
            Self::Iri => NodeKind::Iri,
            Self::Blank => NodeKind::Blank,
            Self::Literal => NodeKind::Literal,
        }
    }
}

/// An entity in the graph: an IRI, blank node, or literal, with its
/// adjacency heads.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// The entity's identifying string (an IRI, a blank node label, or a
    /// literal's lexical form).
    pub iri: StringRef,
    /// Which kind of entity this is.
    pub kind: NodeKind,
    /// Number of edges with this node as their target.
    pub in_degree: u32,
    /// Number of edges with this node as their source.
    pub out_degree: u32,
    /// Index of the first edge in this node's outgoing adjacency list, or
    /// [`INVALID_INDEX`] if none.
    pub first_out_edge: u32,
    /// Index of the first edge in this node's incoming adjacency list, or
    /// [`INVALID_INDEX`] if none.
    pub first_in_edge: u32,
}

impl Node {
    pub(crate) fn new(iri: StringRef, kind: NodeKind) -> Self {
        Self {
            iri,
            kind,
            in_degree: 0,
            out_degree: 0,
            first_out_edge: INVALID_INDEX,
            first_in_edge: INVALID_INDEX,
        }
    }
}

/// A directed link between two nodes, intrusively chained into both
/// endpoints' adjacency lists.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Index of the source node.
    pub source: u32,
    /// Index of the target node.
    pub target: u32,
    /// The predicate labeling this edge.
    pub predicate: StringRef,
    /// Index of the [`Triple`] this edge was derived from.
    pub triple_id: u32,
    /// Next edge in the source's outgoing list, or [`INVALID_INDEX`].
    pub next_out: u32,
    /// Next edge in the target's incoming list, or [`INVALID_INDEX`].
    pub next_in: u32,
}

/// One RDF statement, with a dense, insertion-order `triple_id`.
#[derive(Debug, Clone, Copy)]
pub struct Triple {
    /// Subject term.
    pub subject: StringRef,
    /// Predicate term.
    pub predicate: StringRef,
    /// Object term.
    pub object: StringRef,
    /// Kind of the object term.
    pub object_kind: ObjectKind,
    /// Named graph this triple belongs to; 0 is the default graph.
    pub graph_id: u32,
    /// Caller-defined bit flags, untouched by the store itself.
    pub flags: u32,
    /// This triple's dense index, stable for the life of the graph.
    pub triple_id: u32,
}

/// A named graph partitioning a subset of the triple set.
#[derive(Debug, Clone, Copy)]
pub struct NamedGraph {
    /// The graph's identifying IRI.
    pub iri: StringRef,
    /// Number of triples currently assigned to this graph.
    pub triple_count: u32,
    /// Caller-defined bit flags.
    pub flags: u32,
}
