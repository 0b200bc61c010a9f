//! Serializes a [`Graph`] into the packed binary layout described in §6.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use arenac_graph::{Graph, NodeKind};
use arenac_mem::StringRef;

use crate::header::{align_up, Header, HEADER_LEN, INDEX_RECORD_LEN, NODE_RECORD_LEN, TRIPLE_RECORD_LEN, VERSION};

/// Encodes `graph` into a self-contained byte buffer per §6's binary
/// snapshot format: a 64-byte header followed by 64-byte-aligned triples,
/// nodes, predicate-index, and string-pool sections.
///
/// Subject and object ids in the triples section are the graph's own node
/// indices (every subject and object already has a backing node record, so
/// no separate id layer is needed for them). Predicates are not graph nodes,
/// so they get their own dense id space, resolved through the predicate
/// index section into the shared string pool.
#[must_use]
pub fn materialize(graph: &Graph) -> Vec<u8> {
    let nodes = graph.nodes();
    let triples = graph.triples();

    let mut iri_to_index: HashMap<(StringRef, NodeKind), u32> = HashMap::with_capacity(nodes.len());
    let mut pool = Vec::new();
    let mut node_spans = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        iri_to_index.entry((node.iri, node.kind)).or_insert(index as u32);
        let bytes = graph.resolve(node.iri).as_bytes();
        node_spans.push((pool.len() as u32, bytes.len() as u32));
        pool.extend_from_slice(bytes);
    }

    let mut predicate_ids: HashMap<StringRef, u32> = HashMap::new();
    let mut predicate_spans: Vec<(u32, u32)> = Vec::new();
    let mut triple_ids = Vec::with_capacity(triples.len());
    for triple in triples {
        // Subjects are always IRI or blank nodes; classify the same way
        // `Graph::insert_triple` does to find the matching node entry.
        let subject_kind = if graph.resolve(triple.subject).starts_with("_:") {
            NodeKind::Blank
        } else {
            NodeKind::Iri
        };
        let subject_id = *iri_to_index.get(&(triple.subject, subject_kind)).unwrap_or(&0);
        let object_id = *iri_to_index.get(&(triple.object, triple.object_kind.as_node_kind())).unwrap_or(&0);
        let predicate_id = *predicate_ids.entry(triple.predicate).or_insert_with(|| {
            let bytes = graph.resolve(triple.predicate).as_bytes();
            let span = (pool.len() as u32, bytes.len() as u32);
            pool.extend_from_slice(bytes);
            let id = predicate_spans.len() as u32;
            predicate_spans.push(span);
            id
        });
        triple_ids.push((subject_id, predicate_id, object_id, triple.graph_id, triple.flags));
    }

    let triples_len = triples.len() * TRIPLE_RECORD_LEN;
    let nodes_len = nodes.len() * NODE_RECORD_LEN;
    let index_len = predicate_spans.len() * INDEX_RECORD_LEN;
    let pool_len = pool.len();

    let triples_offset = HEADER_LEN;
    let nodes_offset = triples_offset + align_up(triples_len);
    let index_offset = nodes_offset + align_up(nodes_len);
    let strings_offset = index_offset + align_up(index_len);
    let total_len = strings_offset + align_up(pool_len);

    let mut blob = vec![0u8; total_len];

    for (i, (subject_id, predicate_id, object_id, graph_id, flags)) in triple_ids.iter().enumerate() {
        let base = triples_offset + i * TRIPLE_RECORD_LEN;
        blob[base..base + 4].copy_from_slice(&subject_id.to_le_bytes());
        blob[base + 4..base + 8].copy_from_slice(&predicate_id.to_le_bytes());
        blob[base + 8..base + 12].copy_from_slice(&object_id.to_le_bytes());
        blob[base + 12..base + 16].copy_from_slice(&graph_id.to_le_bytes());
        blob[base + 16..base + 20].copy_from_slice(&flags.to_le_bytes());
        blob[base + 20..base + 24].copy_from_slice(&0u32.to_le_bytes());
    }

    for (i, node) in nodes.iter().enumerate() {
        let base = nodes_offset + i * NODE_RECORD_LEN;
        let (rel_offset, length) = node_spans[i];
        let string_offset = strings_offset as u32 + rel_offset;
        blob[base..base + 4].copy_from_slice(&(i as u32).to_le_bytes());
        blob[base + 4..base + 6].copy_from_slice(&node_kind_tag(node.kind).to_le_bytes());
        blob[base + 6..base + 8].copy_from_slice(&0u16.to_le_bytes());
        blob[base + 8..base + 12].copy_from_slice(&string_offset.to_le_bytes());
        blob[base + 12..base + 16].copy_from_slice(&length.to_le_bytes());
    }

    for (i, (rel_offset, length)) in predicate_spans.iter().enumerate() {
        let base = index_offset + i * INDEX_RECORD_LEN;
        let string_offset = strings_offset as u32 + rel_offset;
        blob[base..base + 4].copy_from_slice(&string_offset.to_le_bytes());
        blob[base + 4..base + 8].copy_from_slice(&length.to_le_bytes());
    }

    blob[strings_offset..strings_offset + pool_len].copy_from_slice(&pool);

    let crc32 = crc32fast::hash(&blob[HEADER_LEN..]);
    let header = Header {
        version: VERSION,
        flags: 0,
        triple_count: triples.len() as u32,
        node_count: nodes.len() as u32,
        triples_offset: triples_offset as u64,
        nodes_offset: nodes_offset as u64,
        strings_offset: strings_offset as u64,
        index_offset: index_offset as u64,
        crc32,
    };
    blob[0..HEADER_LEN].copy_from_slice(&header.encode());

    blob
}

fn node_kind_tag(kind: arenac_graph::NodeKind) -> u16 {
    match kind {
        arenac_graph::NodeKind::Iri => 0,
        arenac_graph::NodeKind::Blank => 1,
        arenac_graph::NodeKind::Literal => 2,
    }
}

/// Writes `graph`'s materialized snapshot to `path` in a single buffered
/// write.
///
/// # Errors
///
/// Propagates any `io::Error` from the underlying filesystem write.
pub fn write_file(graph: &Graph, path: impl AsRef<Path>) -> io::Result<()> {
    let blob = materialize(graph);
    std::fs::write(path, blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenac_graph::ObjectKind;

    #[test]
    fn s7_header_fields_match_spec_example() {
        let mut graph = Graph::new();
        let ex = |s: &str| format!("http://example.org/{s}");
        let a = graph.intern(&ex("a"));
        let rdf_type = graph.intern("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
        let person = graph.intern(&ex("Person"));
        let name = graph.intern(&ex("name"));
        let alice = graph.intern("Alice");
        let knows = graph.intern(&ex("knows"));
        let b = graph.intern(&ex("b"));
        graph.insert_triple(a, rdf_type, person, ObjectKind::Iri).unwrap();
        graph.insert_triple(a, name, alice, ObjectKind::Literal).unwrap();
        graph.insert_triple(a, knows, b, ObjectKind::Iri).unwrap();

        let blob = materialize(&graph);
        assert_eq!(&blob[0..4], b"PLAN");
        assert_eq!(&blob[4..6], &[0x00, 0x01]);
        assert_eq!(&blob[8..12], &3u32.to_le_bytes());
    }

    #[test]
    fn distinguishes_iri_and_literal_nodes_sharing_lexical_text() {
        // An IRI node and a literal node can intern to the same `StringRef`
        // (the interner only sees bytes); the snapshot must still keep them
        // as two distinct node records rather than collapsing them onto one.
        let mut graph = Graph::new();
        let shared_text = "http://example.org/a";
        let iri_a = graph.intern(shared_text);
        let p = graph.intern("http://example.org/label");
        let literal_a = graph.intern(shared_text);
        let s = graph.intern("http://example.org/s");
        graph.insert_triple(s, p, iri_a, ObjectKind::Iri).unwrap();
        let q = graph.intern("http://example.org/q");
        graph.insert_triple(s, q, literal_a, ObjectKind::Literal).unwrap();

        let blob = materialize(&graph);
        let view = crate::view::view(&blob).unwrap();
        assert_eq!(view.node_count(), 3); // s, iri-kind a, literal-kind a
        let kinds: std::collections::HashSet<u16> =
            (0..view.node_count()).filter_map(|i| view.node(i)).map(|n| n.kind).collect();
        assert!(kinds.contains(&0)); // Iri
        assert!(kinds.contains(&2)); // Literal
    }

    #[test]
    fn blob_length_is_section_aligned() {
        let mut graph = Graph::new();
        let (s, p, o) = (graph.intern("s"), graph.intern("p"), graph.intern("o"));
        graph.insert_triple(s, p, o, ObjectKind::Iri).unwrap();
        let blob = materialize(&graph);
        assert_eq!(blob.len() % 64, 0);
    }
}
