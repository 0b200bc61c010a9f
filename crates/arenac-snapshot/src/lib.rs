//! Zero-copy binary materializer for [`arenac_graph::Graph`] snapshots.
//!
//! [`materialize`] packs a graph into the `.plan.bin` layout from §6: a
//! 64-byte header followed by 64-byte-aligned triples, nodes, predicate-index,
//! and string-pool sections. [`view`] validates a blob's magic, version, and
//! CRC32 and returns borrowing accessors over it — no bytes are copied out
//! except where a caller reads a record into an owned value.
//!
//! # Examples
//!
//! ```
//! use arenac_graph::{Graph, ObjectKind};
//! use arenac_snapshot::{materialize, view};
//!
//! let mut graph = Graph::new();
//! let (s, p, o) = (graph.intern("s"), graph.intern("p"), graph.intern("o"));
//! graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap();
//!
//! let blob = materialize(&graph);
//! let snapshot = view(&blob).unwrap();
//! assert_eq!(snapshot.triple_count(), 1);
//! ```

pub mod error;
pub mod header;
pub mod view;
pub mod writer;

pub use error::SnapshotError;
pub use header::Header;
pub use view::{view, NodeView, SnapshotView, TripleView};
pub use writer::{materialize, write_file};
