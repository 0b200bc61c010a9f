//! Bounded arena allocation and content-addressed string interning.
//!
//! This crate is the memory substrate the rest of the workspace is built on:
//! a fixed-capacity, multi-zone [`arena::Arena`] with checkpoint/restore, and
//! a [`interner::StringInterner`] built on top of one. Neither type grows
//! past the capacity it was given; both report [`MemError::OutOfCapacity`]
//! instead of reallocating.
//!
//! # Examples
//!
//! ```
//! use arenac_mem::arena::Arena;
//! use arenac_mem::interner::StringInterner;
//!
//! let mut arena = Arena::new(4096);
//! let checkpoint = arena.checkpoint();
//! arena.alloc(128).unwrap();
//! arena.restore(checkpoint);
//!
//! let mut interner = StringInterner::new();
//! let iri = interner.intern("http://example.org/subject");
//! assert_eq!(interner.resolve(iri), "http://example.org/subject");
//! ```

pub mod arena;
pub mod factory;
pub mod interner;
pub mod stringref;

use std::fmt;

pub use arena::{Arena, ArenaAllocError, ArenaConfig, Checkpoint, SyncArena};
pub use factory::ArenaFactory;
pub use interner::{Interns, InternerConfig, StringInterner};
pub use stringref::StringRef;

/// Errors surfaced by this crate's public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemError {
    /// An arena or interner ran out of its fixed capacity.
    OutOfCapacity,
    /// An arena operation received an invalid argument.
    InvalidArgument,
    /// `Arena::add_zone` was called after the zone table was full.
    TooManyZones,
}

impl fmt::Display for MemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfCapacity => write!(f, "memory region exhausted its fixed capacity"),
            Self::InvalidArgument => write!(f, "invalid argument to a memory operation"),
            Self::TooManyZones => write!(f, "arena zone table is full"),
        }
    }
}

impl std::error::Error for MemError {}

impl From<ArenaAllocError> for MemError {
    fn from(err: ArenaAllocError) -> Self {
        match err {
            ArenaAllocError::OutOfCapacity => Self::OutOfCapacity,
            ArenaAllocError::BadArg => Self::InvalidArgument,
            ArenaAllocError::TooManyZones => Self::TooManyZones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_error_from_arena_alloc_error() {
        assert_eq!(MemError::from(ArenaAllocError::OutOfCapacity), MemError::OutOfCapacity);
        assert_eq!(MemError::from(ArenaAllocError::BadArg), MemError::InvalidArgument);
        assert_eq!(MemError::from(ArenaAllocError::TooManyZones), MemError::TooManyZones);
    }
}
