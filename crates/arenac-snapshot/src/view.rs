//! Zero-copy, read-only accessors over a materialized blob.

use crate::error::SnapshotError;
use crate::header::{Header, HEADER_LEN, INDEX_RECORD_LEN, NODE_RECORD_LEN, TRIPLE_RECORD_LEN};

/// One triple record as stored in the blob.
///
/// `subject`/`object` are node indices into [`SnapshotView::node`];
/// `predicate` is a predicate index into [`SnapshotView::predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleView {
    /// Node index of the subject.
    pub subject: u32,
    /// Predicate index (not a node index; resolve with
    /// [`SnapshotView::predicate`]).
    pub predicate: u32,
    /// Node index of the object.
    pub object: u32,
    /// Named graph id this triple belonged to (0 = default graph).
    pub graph_id: u32,
    /// The triple's original caller-defined flags.
    pub flags: u32,
}

/// One node record as stored in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a> {
    /// `0` = IRI, `1` = blank node, `2` = literal.
    pub kind: u16,
    /// This node's lexical form.
    pub iri: &'a str,
}

/// A read-only, zero-copy view over a blob produced by
/// [`crate::writer::materialize`].
///
/// `view` borrows the input slice for its entire lifetime; no bytes are
/// copied except when a record happens to be read out into an owned type.
pub struct SnapshotView<'a> {
    blob: &'a [u8],
    header: Header,
}

/// Validates `blob`'s header, magic, version, and CRC32, then returns a
/// borrowing view over it.
///
/// # Errors
///
/// Returns [`SnapshotError::Truncated`] if the blob or any section runs
/// past the slice's end, [`SnapshotError::BadMagic`] or
/// [`SnapshotError::UnsupportedVersion`] for a header that doesn't match
/// this crate's format, and [`SnapshotError::ChecksumMismatch`] if the
/// payload was altered after writing.
pub fn view(blob: &[u8]) -> Result<SnapshotView<'_>, SnapshotError> {
    let header = Header::decode(blob)?;

    let triples_end = header.triples_offset as usize + header.triple_count as usize * TRIPLE_RECORD_LEN;
    let nodes_end = header.nodes_offset as usize + header.node_count as usize * NODE_RECORD_LEN;
    if blob.len() < triples_end || blob.len() < nodes_end || blob.len() < header.strings_offset as usize {
        return Err(SnapshotError::Truncated);
    }

    let actual_crc32 = crc32fast::hash(&blob[HEADER_LEN..]);
    if actual_crc32 != header.crc32 {
        return Err(SnapshotError::ChecksumMismatch);
    }

    Ok(SnapshotView { blob, header })
}

impl<'a> SnapshotView<'a> {
    /// Number of triples in the blob.
    #[must_use]
    pub fn triple_count(&self) -> u32 {
        self.header.triple_count
    }

    /// Number of nodes in the blob.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.header.node_count
    }

    /// Reads the triple at `index`, or `None` past `triple_count`.
    #[must_use]
    pub fn triple(&self, index: u32) -> Option<TripleView> {
        if index >= self.header.triple_count {
            return None;
        }
        let base = self.header.triples_offset as usize + index as usize * TRIPLE_RECORD_LEN;
        let bytes = &self.blob[base..base + TRIPLE_RECORD_LEN];
        Some(TripleView {
            subject: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            predicate: u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            object: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
            graph_id: u32::from_le_bytes(bytes[12..16].try_into().unwrap()),
            flags: u32::from_le_bytes(bytes[16..20].try_into().unwrap()),
        })
    }

    /// Reads the node at `index`, or `None` past `node_count`.
    #[must_use]
    pub fn node(&self, index: u32) -> Option<NodeView<'a>> {
        if index >= self.header.node_count {
            return None;
        }
        let base = self.header.nodes_offset as usize + index as usize * NODE_RECORD_LEN;
        let bytes = &self.blob[base..base + NODE_RECORD_LEN];
        let kind = u16::from_le_bytes(bytes[4..6].try_into().unwrap());
        let string_offset = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
        let string_length = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
        let text = std::str::from_utf8(&self.blob[string_offset..string_offset + string_length]).ok()?;
        Some(NodeView { kind, iri: text })
    }

    /// Resolves a predicate index (as stored in [`TripleView::predicate`])
    /// back to its string, or `None` if `predicate_id` is out of range.
    #[must_use]
    pub fn predicate(&self, predicate_id: u32) -> Option<&'a str> {
        let base = self.header.index_offset as usize + predicate_id as usize * INDEX_RECORD_LEN;
        let bytes = self.blob.get(base..base + INDEX_RECORD_LEN)?;
        let string_offset = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
        let string_length = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        std::str::from_utf8(self.blob.get(string_offset..string_offset + string_length)?).ok()
    }

    /// Iterates every triple, resolving subject/object node text and the
    /// predicate string, in the triples section's stored order (insertion
    /// order at write time).
    pub fn triples(&self) -> impl Iterator<Item = (&'a str, &'a str, &'a str)> + '_ {
        (0..self.header.triple_count).filter_map(move |i| {
            let t = self.triple(i)?;
            let subject = self.node(t.subject)?.iri;
            let predicate = self.predicate(t.predicate)?;
            let object = self.node(t.object)?.iri;
            Some((subject, predicate, object))
        })
    }
}
