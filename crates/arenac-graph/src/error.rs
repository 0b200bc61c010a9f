//! Error type for graph store operations.

use std::fmt;

use arenac_mem::MemError;

/// Failure modes for [`crate::store::Graph`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// The nodes, edges, triples, or named-graphs array is at its
    /// configured maximum.
    OutOfCapacity,
    /// A caller-supplied argument violated a documented precondition.
    InvalidArgument,
    /// The graph's underlying string arena ran out of capacity.
    Mem(MemError),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfCapacity => write!(f, "graph store reached its configured capacity"),
            Self::InvalidArgument => write!(f, "invalid argument to a graph operation"),
            Self::Mem(err) => write!(f, "graph string storage error: {err}"),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemError> for GraphError {
    fn from(err: MemError) -> Self {
        Self::Mem(err)
    }
}
