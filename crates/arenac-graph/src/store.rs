//! The triple store: dense record arrays plus two open-addressed indices.

use arenac_mem::{Interns, StringInterner, StringRef};

use crate::error::GraphError;
use crate::types::{Edge, NamedGraph, Node, NodeKind, ObjectKind, Triple, INVALID_INDEX};

/// Default graph id assigned to triples not placed in a named graph.
pub const DEFAULT_GRAPH_ID: u32 = 0;

const INITIAL_INDEX_SLOTS: usize = 64;
const MAX_LOAD_FACTOR: f32 = 0.75;

/// Capacity and behavior limits for a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Maximum number of distinct nodes.
    pub max_nodes: u32,
    /// Maximum number of edges (bounded by `2 * max_triples` in practice).
    pub max_edges: u32,
    /// Maximum number of triples.
    pub max_triples: u32,
    /// Maximum number of named graphs (the default graph does not count).
    pub max_named_graphs: u32,
    /// If false, inserting a triple equal to an existing one returns the
    /// existing `triple_id` instead of appending a duplicate.
    pub allow_duplicate_triples: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: 1 << 20,
            max_edges: 1 << 21,
            max_triples: 1 << 20,
            max_named_graphs: 1 << 12,
            allow_duplicate_triples: false,
        }
    }
}

/// Snapshot of graph occupancy, backing both `Graph::stats` and the SHACL
/// validator's `MemoryBound` constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    /// Number of distinct nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Number of triples.
    pub triple_count: usize,
    /// Number of named graphs, excluding the default graph.
    pub named_graph_count: usize,
    /// `edge_count as f64 / node_count as f64`, or 0 if there are no nodes.
    pub average_out_degree: f64,
    /// Rough byte footprint of the dense arrays and string arena.
    pub estimated_bytes: usize,
}

#[derive(Debug, Clone, Copy)]
struct IndexSlot {
    occupied: bool,
    hash: u32,
    index: u32,
}

impl IndexSlot {
    const EMPTY: Self = Self { occupied: false, hash: 0, index: 0 };
}

struct IndexTable {
    slots: Vec<IndexSlot>,
    mask: usize,
    len: usize,
}

impl IndexTable {
    fn new() -> Self {
        Self { slots: vec![IndexSlot::EMPTY; INITIAL_INDEX_SLOTS], mask: INITIAL_INDEX_SLOTS - 1, len: 0 }
    }

    fn find(&self, hash: u32, mut matches: impl FnMut(u32) -> bool) -> Option<u32> {
        let mut index = hash as usize & self.mask;
        for _ in 0..self.slots.len() {
            let slot = self.slots[index];
            if !slot.occupied {
                return None;
            }
            if slot.hash == hash && matches(slot.index) {
                return Some(slot.index);
            }
            index = (index + 1) & self.mask;
        }
        None
    }

    fn insert_raw(slots: &mut [IndexSlot], mask: usize, hash: u32, value: u32) {
        let mut index = hash as usize & mask;
        loop {
            if !slots[index].occupied {
                slots[index] = IndexSlot { occupied: true, hash, index: value };
                return;
            }
            index = (index + 1) & mask;
        }
    }

    fn insert(&mut self, hash: u32, value: u32) {
        if (self.len + 1) as f32 > self.slots.len() as f32 * MAX_LOAD_FACTOR {
            self.grow();
        }
        Self::insert_raw(&mut self.slots, self.mask, hash, value);
        self.len += 1;
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let new_mask = new_capacity - 1;
        let mut new_slots = vec![IndexSlot::EMPTY; new_capacity];
        for slot in &self.slots {
            if slot.occupied {
                Self::insert_raw(&mut new_slots, new_mask, slot.hash, slot.index);
            }
        }
        self.slots = new_slots;
        self.mask = new_mask;
    }
}

fn combine_hashes(values: &[u32]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &value in values {
        hash ^= value;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

fn node_key_hash(iri: StringRef, kind: NodeKind) -> u32 {
    combine_hashes(&[iri.hash(), kind as u32])
}

fn triple_key_hash(s: StringRef, p: StringRef, o: StringRef, graph_id: u32) -> u32 {
    combine_hashes(&[s.hash(), p.hash(), o.hash(), graph_id])
}

/// An in-memory RDF triple store.
///
/// Owns a private [`StringInterner`] so callers never juggle a separate
/// interner handle for graph-facing operations.
pub struct Graph {
    interner: StringInterner,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    triples: Vec<Triple>,
    named_graphs: Vec<NamedGraph>,
    node_table: IndexTable,
    triple_table: IndexTable,
    named_graph_table: IndexTable,
    config: GraphConfig,
}

impl Graph {
    /// Creates a graph with default capacity limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates a graph with explicit capacity limits.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            interner: StringInterner::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            triples: Vec::new(),
            named_graphs: Vec::new(),
            node_table: IndexTable::new(),
            triple_table: IndexTable::new(),
            named_graph_table: IndexTable::new(),
            config,
        }
    }

    /// Interns a string into this graph's string table.
    pub fn intern(&mut self, s: &str) -> StringRef {
        self.interner.intern(s)
    }

    /// Resolves a previously interned reference back to its string.
    #[must_use]
    pub fn resolve(&self, r: StringRef) -> &str {
        self.interner.resolve(r)
    }

    /// Looks up a previously interned string without inserting it.
    #[must_use]
    pub fn lookup(&self, s: &str) -> Option<StringRef> {
        self.interner.lookup(s)
    }

    /// Classifies a subject term as an IRI or a blank node by its lexical
    /// form (blank node labels are interned with a leading `_:`).
    fn classify_subject(&self, subject: StringRef) -> NodeKind {
        if self.interner.resolve(subject).starts_with("_:") {
            NodeKind::Blank
        } else {
            NodeKind::Iri
        }
    }

    fn get_or_create_node(&mut self, iri: StringRef, kind: NodeKind) -> Result<u32, GraphError> {
        let hash = node_key_hash(iri, kind);
        if let Some(idx) = self.node_table.find(hash, |idx| {
            let node = self.nodes[idx as usize];
            node.iri == iri && node.kind == kind
        }) {
            return Ok(idx);
        }
        if self.nodes.len() as u32 >= self.config.max_nodes {
            return Err(GraphError::OutOfCapacity);
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(iri, kind));
        self.node_table.insert(hash, index);
        Ok(index)
    }

    /// Looks up an existing node without creating one.
    #[must_use]
    pub fn get_node_index(&self, iri: StringRef, kind: NodeKind) -> Option<u32> {
        let hash = node_key_hash(iri, kind);
        self.node_table.find(hash, |idx| {
            let node = self.nodes[idx as usize];
            node.iri == iri && node.kind == kind
        })
    }

    /// Returns the node record at `index`, if any.
    #[must_use]
    pub fn node(&self, index: u32) -> Option<&Node> {
        self.nodes.get(index as usize)
    }

    fn splice_edge(&mut self, source: u32, target: u32, predicate: StringRef, triple_id: u32) -> u32 {
        let edge_index = self.edges.len() as u32;
        let source_head = self.nodes[source as usize].first_out_edge;
        let target_head = self.nodes[target as usize].first_in_edge;
        self.edges.push(Edge {
            source,
            target,
            predicate,
            triple_id,
            next_out: source_head,
            next_in: target_head,
        });
        self.nodes[source as usize].first_out_edge = edge_index;
        self.nodes[source as usize].out_degree += 1;
        self.nodes[target as usize].first_in_edge = edge_index;
        self.nodes[target as usize].in_degree += 1;
        edge_index
    }

    /// Inserts a triple into the default graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfCapacity`] if the nodes, edges, or triples
    /// array is at its configured maximum.
    pub fn insert_triple(
        &mut self,
        subject: StringRef,
        predicate: StringRef,
        object: StringRef,
        object_kind: ObjectKind,
    ) -> Result<u32, GraphError> {
        self.insert_triple_in_graph(subject, predicate, object, object_kind, DEFAULT_GRAPH_ID)
    }

    /// Inserts a triple into the named graph identified by `graph_iri`,
    /// creating that named graph if it does not yet exist.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfCapacity`] if any backing array is full.
    pub fn insert_triple_named(
        &mut self,
        subject: StringRef,
        predicate: StringRef,
        object: StringRef,
        object_kind: ObjectKind,
        graph_iri: StringRef,
    ) -> Result<u32, GraphError> {
        let graph_id = match self.lookup_named_graph(graph_iri) {
            Some(id) => id,
            None => self.create_named_graph(graph_iri)?,
        };
        self.insert_triple_in_graph(subject, predicate, object, object_kind, graph_id)
    }

    fn insert_triple_in_graph(
        &mut self,
        subject: StringRef,
        predicate: StringRef,
        object: StringRef,
        object_kind: ObjectKind,
        graph_id: u32,
    ) -> Result<u32, GraphError> {
        let hash = triple_key_hash(subject, predicate, object, graph_id);
        if !self.config.allow_duplicate_triples {
            if let Some(existing) = self.triple_table.find(hash, |idx| {
                let t = self.triples[idx as usize];
                t.subject == subject && t.predicate == predicate && t.object == object && t.graph_id == graph_id
            }) {
                return Ok(existing);
            }
        }
        if self.triples.len() as u32 >= self.config.max_triples {
            return Err(GraphError::OutOfCapacity);
        }
        if self.edges.len() as u32 >= self.config.max_edges {
            return Err(GraphError::OutOfCapacity);
        }

        let subject_kind = self.classify_subject(subject);
        let subject_node = self.get_or_create_node(subject, subject_kind)?;
        let object_node = self.get_or_create_node(object, object_kind.as_node_kind())?;

        let triple_id = self.triples.len() as u32;
        self.triples.push(Triple {
            subject,
            predicate,
            object,
            object_kind,
            graph_id,
            flags: 0,
            triple_id,
        });
        self.triple_table.insert(hash, triple_id);
        self.splice_edge(subject_node, object_node, predicate, triple_id);

        if graph_id != DEFAULT_GRAPH_ID {
            if let Some(graph) = self.named_graphs.get_mut((graph_id - 1) as usize) {
                graph.triple_count += 1;
            }
        }

        Ok(triple_id)
    }

    /// Inserts many triples into the default graph in one call.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] encountered; triples before it have
    /// already been inserted.
    pub fn insert_triples_batch(
        &mut self,
        triples: &[(StringRef, StringRef, StringRef, ObjectKind)],
    ) -> Result<Vec<u32>, GraphError> {
        let mut ids = Vec::with_capacity(triples.len());
        for &(s, p, o, kind) in triples {
            ids.push(self.insert_triple(s, p, o, kind)?);
        }
        Ok(ids)
    }

    /// True if a triple with these exact terms exists in the default graph.
    #[must_use]
    pub fn contains_triple(&self, subject: StringRef, predicate: StringRef, object: StringRef) -> bool {
        let hash = triple_key_hash(subject, predicate, object, DEFAULT_GRAPH_ID);
        self.triple_table
            .find(hash, |idx| {
                let t = self.triples[idx as usize];
                t.subject == subject
                    && t.predicate == predicate
                    && t.object == object
                    && t.graph_id == DEFAULT_GRAPH_ID
            })
            .is_some()
    }

    /// Returns the triple record for `triple_id`, if any.
    #[must_use]
    pub fn triple(&self, triple_id: u32) -> Option<&Triple> {
        self.triples.get(triple_id as usize)
    }

    fn outgoing_edges(&self, node: u32) -> impl Iterator<Item = &Edge> + '_ {
        let mut cursor = self.nodes.get(node as usize).map_or(INVALID_INDEX, |n| n.first_out_edge);
        std::iter::from_fn(move || {
            if cursor == INVALID_INDEX {
                return None;
            }
            let edge = &self.edges[cursor as usize];
            cursor = edge.next_out;
            Some(edge)
        })
    }

    fn incoming_edges(&self, node: u32) -> impl Iterator<Item = &Edge> + '_ {
        let mut cursor = self.nodes.get(node as usize).map_or(INVALID_INDEX, |n| n.first_in_edge);
        std::iter::from_fn(move || {
            if cursor == INVALID_INDEX {
                return None;
            }
            let edge = &self.edges[cursor as usize];
            cursor = edge.next_in;
            Some(edge)
        })
    }

    /// Finds triple ids matching a pattern where any term may be `None`
    /// (wildcard), restricted to the default graph.
    #[must_use]
    pub fn find_triples(
        &self,
        subject: Option<StringRef>,
        predicate: Option<StringRef>,
        object: Option<StringRef>,
    ) -> Vec<u32> {
        let mut results = Vec::new();
        match (subject, object, predicate) {
            (Some(s), _, _) => {
                let Some(node) = self.get_node_index(s, NodeKind::Iri).or_else(|| self.get_node_index(s, NodeKind::Blank)) else {
                    return results;
                };
                for edge in self.outgoing_edges(node) {
                    let triple = self.triples[edge.triple_id as usize];
                    if predicate.is_some_and(|p| p != triple.predicate) {
                        continue;
                    }
                    if object.is_some_and(|o| o != triple.object) {
                        continue;
                    }
                    results.push(edge.triple_id);
                }
            }
            (None, Some(o), _) => {
                let Some(node) = [NodeKind::Iri, NodeKind::Blank, NodeKind::Literal]
                    .into_iter()
                    .find_map(|kind| self.get_node_index(o, kind))
                else {
                    return results;
                };
                for edge in self.incoming_edges(node) {
                    let triple = self.triples[edge.triple_id as usize];
                    if predicate.is_some_and(|p| p != triple.predicate) {
                        continue;
                    }
                    results.push(edge.triple_id);
                }
            }
            (None, None, Some(p)) => {
                for triple in &self.triples {
                    if triple.predicate == p {
                        results.push(triple.triple_id);
                    }
                }
            }
            (None, None, None) => {
                results.extend(self.triples.iter().map(|t| t.triple_id));
            }
        }
        results.sort_unstable();
        results
    }

    /// Evaluates successive patterns as a left-to-right nested-loop join,
    /// binding `?var` placeholders (by position, shared across patterns)
    /// with the triple terms seen so far.
    ///
    /// Each pattern element is `None` (wildcard, unbound) or `Some(value)`
    /// (bound literal term). This is intentionally a minimal planner: no
    /// cost-based reordering, no indices beyond the ones `find_triples`
    /// already uses.
    #[must_use]
    pub fn join_patterns(
        &self,
        patterns: &[(Option<StringRef>, Option<StringRef>, Option<StringRef>)],
    ) -> Vec<Vec<u32>> {
        let mut solutions: Vec<Vec<u32>> = vec![Vec::new()];
        for &(s, p, o) in patterns {
            let matches = self.find_triples(s, p, o);
            let mut next = Vec::new();
            for solution in &solutions {
                for &triple_id in &matches {
                    let mut extended = solution.clone();
                    extended.push(triple_id);
                    next.push(extended);
                }
            }
            solutions = next;
        }
        solutions
    }

    /// Depth-first traversal over outgoing edges from `start`, calling
    /// `visitor` with each visited node index. `visitor` returning `false`
    /// stops the traversal early.
    pub fn traverse_dfs(&self, start: u32, mut visitor: impl FnMut(u32) -> bool) {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            let Some(seen) = visited.get_mut(node as usize) else { continue };
            if *seen {
                continue;
            }
            *seen = true;
            if !visitor(node) {
                return;
            }
            for edge in self.outgoing_edges(node) {
                stack.push(edge.target);
            }
        }
    }

    /// Breadth-first traversal over outgoing edges from `start`.
    pub fn traverse_bfs(&self, start: u32, mut visitor: impl FnMut(u32) -> bool) {
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            let Some(seen) = visited.get_mut(node as usize) else { continue };
            if *seen {
                continue;
            }
            *seen = true;
            if !visitor(node) {
                return;
            }
            for edge in self.outgoing_edges(node) {
                queue.push_back(edge.target);
            }
        }
    }

    /// Creates a named graph, failing if one with the same IRI already
    /// exists or the named-graph table is full.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfCapacity`] past the configured maximum.
    pub fn create_named_graph(&mut self, iri: StringRef) -> Result<u32, GraphError> {
        if self.lookup_named_graph(iri).is_some() {
            return Err(GraphError::InvalidArgument);
        }
        if self.named_graphs.len() as u32 >= self.config.max_named_graphs {
            return Err(GraphError::OutOfCapacity);
        }
        let graph_id = self.named_graphs.len() as u32 + 1;
        self.named_graphs.push(NamedGraph { iri, triple_count: 0, flags: 0 });
        self.named_graph_table.insert(iri.hash(), graph_id);
        Ok(graph_id)
    }

    /// Looks up a named graph's id by its IRI.
    #[must_use]
    pub fn lookup_named_graph(&self, iri: StringRef) -> Option<u32> {
        self.named_graph_table.find(iri.hash(), |graph_id| {
            self.named_graphs[(graph_id - 1) as usize].iri == iri
        })
    }

    /// Lists the triple ids belonging to `graph_id` (use
    /// [`DEFAULT_GRAPH_ID`] for the default graph).
    #[must_use]
    pub fn triples_in_graph(&self, graph_id: u32) -> Vec<u32> {
        self.triples.iter().filter(|t| t.graph_id == graph_id).map(|t| t.triple_id).collect()
    }

    /// All triples, in insertion (`triple_id`) order.
    #[must_use]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// All nodes, in creation order; a node's position here is its
    /// `get_node_index` value.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All named graphs, in creation order (position `i` has `graph_id`
    /// `i + 1`).
    #[must_use]
    pub fn named_graphs(&self) -> &[NamedGraph] {
        &self.named_graphs
    }

    /// Current occupancy and shape statistics.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let node_count = self.nodes.len();
        let edge_count = self.edges.len();
        let estimated_bytes = node_count * std::mem::size_of::<Node>()
            + edge_count * std::mem::size_of::<Edge>()
            + self.triples.len() * std::mem::size_of::<Triple>();
        GraphStats {
            node_count,
            edge_count,
            triple_count: self.triples.len(),
            named_graph_count: self.named_graphs.len(),
            average_out_degree: if node_count == 0 { 0.0 } else { edge_count as f64 / node_count as f64 },
            estimated_bytes,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Interns for Graph {
    fn intern_str(&mut self, s: &str) -> StringRef {
        self.intern(s)
    }

    fn resolve_str(&self, r: StringRef) -> &str {
        self.resolve(r)
    }
}
