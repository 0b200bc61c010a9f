//! In-memory RDF triple store.
//!
//! [`Graph`] owns its node, edge, triple, and named-graph arrays plus a
//! private string interner; adjacency between nodes is expressed with `u32`
//! indices rather than pointers, following intrusive singly-linked
//! outgoing/incoming lists per node.
//!
//! # Examples
//!
//! ```
//! use arenac_graph::{Graph, ObjectKind};
//!
//! let mut graph = Graph::new();
//! let s = graph.intern("http://example.org/alice");
//! let p = graph.intern("http://example.org/knows");
//! let o = graph.intern("http://example.org/bob");
//! graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap();
//! assert!(graph.contains_triple(s, p, o));
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::GraphError;
pub use store::{Graph, GraphConfig, GraphStats, DEFAULT_GRAPH_ID};
pub use types::{Edge, NamedGraph, Node, NodeKind, ObjectKind, Triple, INVALID_INDEX};
