//! Setup-time errors for shape registration.
//!
//! These are distinct from the runtime [`crate::report::ValidationResult`]
//! path: a malformed constraint discovered while *evaluating* a shape is
//! recorded as an `Info`-level result (§7's "not fatal" rule), but a
//! conflict discovered while *registering* a shape — a duplicate shape IRI —
//! is a programmer error the caller must fix before validation can run.

use std::fmt;

use arenac_mem::MemError;

/// Failure modes for [`crate::registry::ShapeRegistry`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaclError {
    /// `register` was called twice with the same shape IRI.
    DuplicateShape,
    /// A caller-supplied argument violated a documented precondition.
    InvalidArgument,
    /// The registry's underlying string storage ran out of capacity.
    Mem(MemError),
}

impl fmt::Display for ShaclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateShape => write!(f, "a shape with this IRI is already registered"),
            Self::InvalidArgument => write!(f, "invalid argument to a SHACL operation"),
            Self::Mem(err) => write!(f, "shape registry string storage error: {err}"),
        }
    }
}

impl std::error::Error for ShaclError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemError> for ShaclError {
    fn from(err: MemError) -> Self {
        Self::Mem(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        assert!(!ShaclError::DuplicateShape.to_string().is_empty());
        assert!(!ShaclError::InvalidArgument.to_string().is_empty());
    }
}
