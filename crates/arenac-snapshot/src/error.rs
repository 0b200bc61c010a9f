//! Failure modes for writing and reading a snapshot blob.

use std::fmt;

/// Errors raised by [`crate::write`] and [`crate::view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// The blob is shorter than a header, or a section offset runs past the
    /// end of the blob.
    Truncated,
    /// The header's magic bytes do not read `PLAN`.
    BadMagic,
    /// The header's version is not one this crate understands.
    UnsupportedVersion(u16),
    /// The stored CRC32 does not match the payload.
    ChecksumMismatch,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "snapshot blob is truncated"),
            Self::BadMagic => write!(f, "snapshot blob has an invalid magic header"),
            Self::UnsupportedVersion(v) => write!(f, "snapshot blob has unsupported version {v:#06x}"),
            Self::ChecksumMismatch => write!(f, "snapshot blob failed its CRC32 checksum"),
        }
    }
}

impl std::error::Error for SnapshotError {}
