//! A pragmatic SHACL-subset validator evaluated directly over an
//! `arenac-graph` [`arenac_graph::Graph`].
//!
//! Shapes are registered per target class in a [`ShapeRegistry`] and
//! evaluated in a fixed three-step order (node selection, then per-property
//! constraints, then node-level `Closed`/custom constraints) by
//! [`validate`], which produces a [`ValidationReport`] of zero or more
//! [`ValidationResult`]s.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod evaluate;
pub mod pattern;
pub mod registry;
pub mod report;
pub mod shape;

pub use config::ValidatorConfig;
pub use error::ShaclError;
pub use evaluate::{literal_datatype, validate};
pub use pattern::glob_match;
pub use registry::ShapeRegistry;
pub use report::{Severity, ValidationReport, ValidationResult};
pub use shape::{Constraint, ConstraintKind, NodeKindSet, PropertyShape, Shape};
