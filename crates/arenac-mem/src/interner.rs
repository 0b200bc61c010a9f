//! Content-addressed string interner.
//!
//! Bytes live in a single owned [`Arena`]; identity lives in one
//! open-addressed hash table keyed by an FNV-1a hash of the string. Lookups
//! and inserts share one linear-probe loop. The table doubles (and every
//! live entry is rehashed in place, without touching the underlying bytes)
//! once the load factor crosses [`InternerConfig::max_load_factor`].
//!
//! # Examples
//!
//! ```
//! use arenac_mem::interner::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let a = interner.intern("http://example.org/Alice");
//! let b = interner.intern("http://example.org/Alice");
//! assert_eq!(a, b);
//! assert_eq!(interner.resolve(a), "http://example.org/Alice");
//! ```

use crate::arena::{Arena, ArenaConfig};
use crate::stringref::StringRef;

const INITIAL_SLOTS: usize = 64;
const DEFAULT_BYTE_CAPACITY: usize = 1 << 20;

/// RDF vocabulary interned eagerly at construction, mirroring a compiler
/// front end's keyword preload.
const PRELOADED_IRIS: &[&str] = &[
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#first",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil",
    "http://www.w3.org/2001/XMLSchema#string",
    "http://www.w3.org/2001/XMLSchema#boolean",
    "http://www.w3.org/2001/XMLSchema#integer",
    "http://www.w3.org/2001/XMLSchema#decimal",
    "http://www.w3.org/2001/XMLSchema#double",
    "http://www.w3.org/2001/XMLSchema#dateTime",
    "http://www.w3.org/2001/XMLSchema#anyURI",
];

/// Configuration for a [`StringInterner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternerConfig {
    /// Fold ASCII case before hashing and comparing.
    pub case_sensitive: bool,
    /// Hint that this interner will be shared across threads (the interner
    /// itself has no internal locking; callers wrap it, e.g. in a `Mutex`).
    pub thread_safe: bool,
    /// Reserved for a future reclamation pass; entries are never evicted
    /// today regardless of this flag.
    pub gc_enabled: bool,
    /// Callers that already know a string's hash (e.g. the Turtle lexer,
    /// which hashes while scanning) can skip re-hashing via
    /// `intern_with_hash`; this flag only documents the intent.
    pub precompute_hash: bool,
    /// Resize threshold as a fraction of table capacity, in `(0.0, 1.0)`.
    pub max_load_factor: f32,
}

impl Default for InternerConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            thread_safe: false,
            gc_enabled: false,
            precompute_hash: false,
            max_load_factor: 0.75,
        }
    }
}

/// Snapshot of interner occupancy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternerStats {
    /// Number of distinct strings interned.
    pub len: usize,
    /// Number of slots in the hash table.
    pub table_capacity: usize,
    /// `len as f32 / table_capacity as f32`.
    pub load_factor: f32,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    occupied: bool,
    string_ref: StringRef,
}

impl Slot {
    const EMPTY: Slot = Slot { occupied: false, string_ref: StringRef::invalid() };
}

fn fnv1a_hash(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// A content-addressed string table backed by one owned [`Arena`].
pub struct StringInterner {
    arena: Arena,
    table: Vec<Slot>,
    mask: usize,
    len: usize,
    config: InternerConfig,
}

impl StringInterner {
    /// Creates an interner with a default byte capacity and table size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BYTE_CAPACITY, InternerConfig::default())
    }

    /// Creates an interner with an explicit arena byte capacity and
    /// configuration.
    #[must_use]
    pub fn with_config(byte_capacity: usize, config: InternerConfig) -> Self {
        let arena = Arena::with_config(byte_capacity, ArenaConfig::default());
        let mut interner = Self {
            arena,
            table: vec![Slot::EMPTY; INITIAL_SLOTS],
            mask: INITIAL_SLOTS - 1,
            len: 0,
            config,
        };
        for iri in PRELOADED_IRIS {
            interner.intern(iri);
        }
        interner
    }

    fn normalized_hash(&self, s: &str) -> u32 {
        if self.config.case_sensitive {
            fnv1a_hash(s.as_bytes())
        } else {
            let lower: Vec<u8> = s.bytes().map(|b| b.to_ascii_lowercase()).collect();
            fnv1a_hash(&lower)
        }
    }

    fn bytes_equal(&self, existing: StringRef, s: &str) -> bool {
        // SAFETY: existing was produced by this interner's own alloc calls.
        let stored = unsafe { self.arena.slice_at(existing.offset() as usize, existing.len() as usize) };
        if self.config.case_sensitive {
            stored == s.as_bytes()
        } else {
            stored.eq_ignore_ascii_case(s.as_bytes())
        }
    }

    fn find_slot(&self, s: &str, hash: u32) -> Option<usize> {
        if self.table.is_empty() {
            return None;
        }
        let mut index = hash as usize & self.mask;
        for _ in 0..self.table.len() {
            let slot = self.table[index];
            if !slot.occupied {
                return None;
            }
            if slot.string_ref.hash() == hash && self.bytes_equal(slot.string_ref, s) {
                return Some(index);
            }
            index = (index + 1) & self.mask;
        }
        None
    }

    fn insert_slot(table: &mut [Slot], mask: usize, string_ref: StringRef) {
        let mut index = string_ref.hash() as usize & mask;
        loop {
            if !table[index].occupied {
                table[index] = Slot { occupied: true, string_ref };
                return;
            }
            index = (index + 1) & mask;
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.table.len() * 2;
        let new_mask = new_capacity - 1;
        let mut new_table = vec![Slot::EMPTY; new_capacity];
        for slot in &self.table {
            if slot.occupied {
                Self::insert_slot(&mut new_table, new_mask, slot.string_ref);
            }
        }
        self.table = new_table;
        self.mask = new_mask;
    }

    /// Looks up `s` without inserting it.
    #[must_use]
    pub fn lookup(&self, s: &str) -> Option<StringRef> {
        let hash = self.normalized_hash(s);
        self.find_slot(s, hash).map(|idx| self.table[idx].string_ref)
    }

    /// Interns `s`, computing its hash.
    pub fn intern(&mut self, s: &str) -> StringRef {
        let hash = self.normalized_hash(s);
        self.intern_with_hash(s, hash)
    }

    /// Interns `s` using a caller-supplied hash, skipping the re-hash.
    ///
    /// `hash` must equal what this interner's own hashing would compute for
    /// `s` under its configuration; passing a mismatched hash will not
    /// corrupt the table but will make `s` unfindable by later lookups.
    pub fn intern_with_hash(&mut self, s: &str, hash: u32) -> StringRef {
        if let Some(idx) = self.find_slot(s, hash) {
            return self.table[idx].string_ref;
        }

        if (self.len + 1) as f32 > self.table.len() as f32 * self.config.max_load_factor {
            self.grow();
        }

        let bytes = s.as_bytes();
        let ptr = self
            .arena
            .alloc_slice_copy(bytes)
            .expect("string interner arena exhausted");
        let offset = ptr.as_ptr() as *const u8 as usize - self.arena.base_ptr() as usize;
        let string_ref = StringRef::new(hash, offset as u32, bytes.len() as u16);

        Self::insert_slot(&mut self.table, self.mask, string_ref);
        self.len += 1;
        string_ref
    }

    /// Resolves a reference back to its string.
    ///
    /// `resolve(StringRef::invalid())` is valid and yields `""`, per the
    /// interner's null-ref contract.
    ///
    /// # Panics
    ///
    /// Panics if `r` is non-invalid but was not produced by this interner.
    #[must_use]
    pub fn resolve(&self, r: StringRef) -> &str {
        if r.is_invalid() {
            return "";
        }
        // SAFETY: r is non-invalid; the arena only ever stores bytes written
        // by `intern_with_hash` above, which are valid utf-8 because they
        // were copied directly from a `&str`.
        let bytes = unsafe { self.arena.slice_at(r.offset() as usize, r.len() as usize) };
        std::str::from_utf8(bytes).expect("interner arena held non-utf8 bytes")
    }

    /// Number of distinct strings interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no strings have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `s` is one of the eagerly preloaded RDF/XSD vocabulary terms.
    #[must_use]
    pub fn is_well_known(s: &str) -> bool {
        PRELOADED_IRIS.contains(&s)
    }

    /// Current occupancy statistics.
    #[must_use]
    pub fn stats(&self) -> InternerStats {
        InternerStats {
            len: self.len,
            table_capacity: self.table.len(),
            load_factor: self.len as f32 / self.table.len() as f32,
        }
    }

    /// Iterates over every interned reference, in table order.
    pub fn iter(&self) -> impl Iterator<Item = StringRef> + '_ {
        self.table.iter().filter(|slot| slot.occupied).map(|slot| slot.string_ref)
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interning surface so callers that only hold a `StringInterner` and
/// callers that hold something built on top of one (e.g. a graph store with
/// a private interner) can be driven by the same code, such as the Turtle
/// lexer writing tokens directly into whichever one it was given.
pub trait Interns {
    /// Interns `s`, returning a stable reference.
    fn intern_str(&mut self, s: &str) -> StringRef;
    /// Resolves a previously interned reference back to its string.
    fn resolve_str(&self, r: StringRef) -> &str;
}

impl Interns for StringInterner {
    fn intern_str(&mut self, s: &str) -> StringRef {
        self.intern(s)
    }

    fn resolve_str(&self, r: StringRef) -> &str {
        self.resolve(r)
    }
}
