//! The 64-byte fixed header shared by the writer and the reader.

/// `PLAN`, written as literal bytes rather than a byte-swapped integer so a
/// hex dump reads `50 4C 41 4E` exactly as the format doc describes.
pub const MAGIC: [u8; 4] = *b"PLAN";

/// Current format version, stored little-endian (`00 01` on the wire).
pub const VERSION: u16 = 0x0100;

/// Fixed size of the header in bytes.
pub const HEADER_LEN: usize = 64;

/// Every section starts on a 64-byte boundary within the blob.
pub const SECTION_ALIGN: usize = 64;

/// Fixed size of one packed triple record.
pub const TRIPLE_RECORD_LEN: usize = 24;

/// Fixed size of one packed node record.
pub const NODE_RECORD_LEN: usize = 16;

/// Fixed size of one predicate index entry (`string_offset`, `string_length`).
pub const INDEX_RECORD_LEN: usize = 8;

/// Parsed view of the 64-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version the blob claims to be.
    pub version: u16,
    /// Caller-defined bit flags; unused by this crate today.
    pub flags: u16,
    /// Number of [`crate::writer::Triple`]-shaped records in the triples
    /// section.
    pub triple_count: u32,
    /// Number of node records in the nodes section.
    pub node_count: u32,
    /// Absolute byte offset of the triples section.
    pub triples_offset: u64,
    /// Absolute byte offset of the nodes section.
    pub nodes_offset: u64,
    /// Absolute byte offset of the string pool section.
    pub strings_offset: u64,
    /// Absolute byte offset of the predicate index section.
    pub index_offset: u64,
    /// CRC32 of every byte after the header.
    pub crc32: u32,
}

/// Rounds `len` up to the next multiple of [`SECTION_ALIGN`].
#[must_use]
pub const fn align_up(len: usize) -> usize {
    (len + SECTION_ALIGN - 1) & !(SECTION_ALIGN - 1)
}

impl Header {
    pub(crate) fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..6].copy_from_slice(&self.version.to_le_bytes());
        buf[6..8].copy_from_slice(&self.flags.to_le_bytes());
        buf[8..12].copy_from_slice(&self.triple_count.to_le_bytes());
        buf[12..16].copy_from_slice(&self.node_count.to_le_bytes());
        buf[16..24].copy_from_slice(&self.triples_offset.to_le_bytes());
        buf[24..32].copy_from_slice(&self.nodes_offset.to_le_bytes());
        buf[32..40].copy_from_slice(&self.strings_offset.to_le_bytes());
        buf[40..48].copy_from_slice(&self.index_offset.to_le_bytes());
        buf[48..52].copy_from_slice(&self.crc32.to_le_bytes());
        // buf[52..64] stays reserved/zeroed.
        buf
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, crate::error::SnapshotError> {
        use crate::error::SnapshotError;

        if bytes.len() < HEADER_LEN {
            return Err(SnapshotError::Truncated);
        }
        if bytes[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        let triple_count = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let node_count = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
        let triples_offset = u64::from_le_bytes(bytes[16..24].try_into().unwrap());
        let nodes_offset = u64::from_le_bytes(bytes[24..32].try_into().unwrap());
        let strings_offset = u64::from_le_bytes(bytes[32..40].try_into().unwrap());
        let index_offset = u64::from_le_bytes(bytes[40..48].try_into().unwrap());
        let crc32 = u32::from_le_bytes(bytes[48..52].try_into().unwrap());
        Ok(Self {
            version,
            flags,
            triple_count,
            node_count,
            triples_offset,
            nodes_offset,
            strings_offset,
            index_offset,
            crc32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_64() {
        assert_eq!(align_up(0), 0);
        assert_eq!(align_up(1), 64);
        assert_eq!(align_up(64), 64);
        assert_eq!(align_up(65), 128);
    }

    #[test]
    fn header_round_trips_through_bytes() {
        let header = Header {
            version: VERSION,
            flags: 0,
            triple_count: 3,
            node_count: 5,
            triples_offset: 64,
            nodes_offset: 256,
            strings_offset: 512,
            index_offset: 960,
            crc32: 0xdead_beef,
        };
        let bytes = header.encode();
        assert_eq!(&bytes[0..4], b"PLAN");
        assert_eq!(&bytes[4..6], &[0x00, 0x01]);
        assert_eq!(&bytes[8..12], &3u32.to_le_bytes());
        let decoded = Header::decode(&bytes).unwrap();
        assert_eq!(decoded, header);
    }
}
