//! `StringRef`: a handle into the interner's arena-backed string table.
//!
//! Unlike a bare index, a `StringRef` carries its own hash and length
//! alongside the byte offset, so equality and re-hashing after a lookup never
//! need to dereference the arena.
//!
//! # Examples
//!
//! ```
//! use arenac_mem::stringref::StringRef;
//!
//! let r1 = StringRef::new(0xdead_beef, 0, 5);
//! let r2 = StringRef::new(0xdead_beef, 0, 5);
//! let r3 = StringRef::invalid();
//!
//! assert_eq!(r1, r2);
//! assert!(r3.is_invalid());
//! ```

use std::fmt;

/// A handle to an interned string: its hash, its byte offset into the
/// interner's arena, and its length.
///
/// Two `StringRef`s compare equal iff all three fields match, which holds
/// for any pair produced by the same interner for equal input strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringRef {
    hash32: u32,
    offset32: u32,
    length16: u16,
}

impl StringRef {
    /// Builds a reference from its three components.
    #[must_use]
    pub const fn new(hash32: u32, offset32: u32, length16: u16) -> Self {
        Self { hash32, offset32, length16 }
    }

    /// The precomputed hash of the referenced string.
    #[must_use]
    pub const fn hash(self) -> u32 {
        self.hash32
    }

    /// Byte offset of the referenced string within the interner's arena.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset32
    }

    /// Length of the referenced string, in bytes.
    #[must_use]
    pub const fn len(self) -> u16 {
        self.length16
    }

    /// Returns true if this reference refers to a zero-length string.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.length16 == 0
    }

    /// Returns true if this is the invalid/placeholder reference.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.offset32 == u32::MAX && self.length16 == u16::MAX
    }

    /// The invalid/placeholder reference, usable as a sentinel value.
    #[must_use]
    pub const fn invalid() -> Self {
        Self { hash32: 0, offset32: u32::MAX, length16: u16::MAX }
    }
}

impl fmt::Display for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringRef(hash={:#010x}, offset={}, len={})", self.hash32, self.offset32, self.length16)
    }
}

impl Default for StringRef {
    fn default() -> Self {
        Self::invalid()
    }
}
