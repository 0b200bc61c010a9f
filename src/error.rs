//! Workspace-wide error type.
//!
//! One variant per sub-crate error, each convertible via `?` through a
//! `From` impl, so a caller driving the whole pipeline (parse, then
//! validate, then materialize) can propagate any stage's failure through a
//! single `Result<T, Error>`.

use std::fmt;

/// Any error surfaced by the `arenac` pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An arena or interner operation failed.
    Mem(arenac_mem::MemError),
    /// A graph store operation failed.
    Graph(arenac_graph::GraphError),
    /// A Turtle parse failed.
    Turtle(arenac_turtle::TurtleError),
    /// A shape registration failed.
    Shacl(arenac_shacl::ShaclError),
    /// A snapshot blob failed to decode.
    Snapshot(arenac_snapshot::SnapshotError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mem(e) => write!(f, "{e}"),
            Self::Graph(e) => write!(f, "{e}"),
            Self::Turtle(e) => write!(f, "{e}"),
            Self::Shacl(e) => write!(f, "{e}"),
            Self::Snapshot(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<arenac_mem::MemError> for Error {
    fn from(e: arenac_mem::MemError) -> Self {
        Self::Mem(e)
    }
}

impl From<arenac_graph::GraphError> for Error {
    fn from(e: arenac_graph::GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<arenac_turtle::TurtleError> for Error {
    fn from(e: arenac_turtle::TurtleError) -> Self {
        Self::Turtle(e)
    }
}

impl From<arenac_shacl::ShaclError> for Error {
    fn from(e: arenac_shacl::ShaclError) -> Self {
        Self::Shacl(e)
    }
}

impl From<arenac_snapshot::SnapshotError> for Error {
    fn from(e: arenac_snapshot::SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

/// Result type for `arenac` pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
