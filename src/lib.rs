//! ARENAC: an in-process semantic-data substrate.
//!
//! This crate is a thin facade over six independently-developed components,
//! each its own workspace member: a bounded [`arenac_mem`] arena and string
//! interner, an [`arenac_graph`] RDF triple store, a single-pass
//! [`arenac_turtle`] parser that streams directly into a `Graph`, an
//! [`arenac_shacl`] constraint validator, an [`arenac_telemetry`] hook for
//! cycle-budgeted spans and metrics, and an [`arenac_snapshot`] binary
//! materializer. All five data-plane components (arena, interner, graph,
//! parser, validator) are designed around a 7-cycle ("7-tick") budget per
//! hot-path operation; the telemetry hook is how that budget is measured
//! and enforced at the call site.
//!
//! This crate itself adds nothing to any one component's behavior: it
//! re-exports their public types and aggregates their configuration structs
//! into one [`ArenacConfig`], and its own [`Error`] lets a caller driving
//! the whole pipeline propagate any stage's failure with a single `?`.
//!
//! # Example
//!
//! ```
//! use arenac::{ArenacConfig, Error};
//! use arenac_graph::Graph;
//! use arenac_turtle::parser::parse_str;
//! use arenac_shacl::{validate, Constraint, PropertyShape, Shape, ShapeRegistry};
//!
//! fn run() -> Result<(), Error> {
//!     let _config = ArenacConfig::default();
//!     let mut graph = Graph::new();
//!     let source = "@prefix ex: <http://example.org/> .\nex:alice ex:name \"Alice\" .";
//!     parse_str(source, &mut graph)?;
//!
//!     let name = graph.intern("http://example.org/name");
//!     let person = graph.intern("http://example.org/Person");
//!     let shape_iri = graph.intern("http://example.org/PersonShape");
//!     let mut registry = ShapeRegistry::new();
//!     registry.register(
//!         Shape::new(shape_iri, person)
//!             .with_property_shape(PropertyShape::new(name).with_constraint(Constraint::MinCount(1))),
//!     )?;
//!
//!     let report = validate(&graph, &registry);
//!     assert!(report.conforms);
//!     Ok(())
//! }
//! run().unwrap();
//! ```

pub mod config;
pub mod error;

pub use arenac_graph as graph;
pub use arenac_mem as mem;
pub use arenac_shacl as shacl;
pub use arenac_snapshot as snapshot;
pub use arenac_telemetry as telemetry;
pub use arenac_turtle as turtle;

pub use config::ArenacConfig;
pub use error::{Error, Result};
