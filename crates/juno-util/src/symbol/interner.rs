//! String interner implementation using DashMap for concurrent access.
//!
//! The interner is fully thread-safe (`Sync + Send`). Multiple threads can
//! intern strings concurrently without blocking each other. Interned
//! strings are leaked on purpose: the table lives for the program's whole
//! lifetime, entries are never removed, and the `'static` references avoid
//! lifetime plumbing in tokens and AST nodes.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{LazyLock, RwLock};

use super::Symbol;

/// Global string table instance.
///
/// Initialized on first use via `LazyLock`. All Juno keywords are
/// pre-interned during initialization so they have stable, predictable
/// indices.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Strings pre-interned at table initialization.
///
/// The Juno reserved words come first, followed by a few names the parser
/// itself looks for (`get`/`set` accessors).
const KNOWN_SYMBOLS: &[&str] = &[
    "async", "await", "break", "case", "catch", "const", "continue", "debugger", "default",
    "delete", "do", "else", "false", "finally", "for", "function", "if", "in", "instanceof",
    "let", "new", "null", "return", "super", "switch", "this", "throw", "true", "try", "typeof",
    "var", "void", "while", "with", "yield", "get", "set",
];

/// Thread-safe string table.
///
/// Lookup by string goes through a `DashMap` keyed on the string hash;
/// lookup by index goes through a plain vector guarded by an `RwLock`
/// (reads vastly outnumber writes, and writes only append).
pub struct StringTable {
    /// Maps string hash to (string, symbol index).
    map: DashMap<u64, (&'static str, u32)>,

    /// Strings by symbol index, for `Symbol::as_str`.
    strings: RwLock<Vec<&'static str>>,

    /// Counter for the next index (atomic for lock-free reservation).
    next_index: AtomicU32,

    /// Number of hash collisions encountered.
    collisions: AtomicUsize,

    /// Number of intern calls that found an existing entry.
    hits: AtomicUsize,

    /// Number of intern calls that allocated a new entry.
    misses: AtomicUsize,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            strings: RwLock::new(Vec::with_capacity(256)),
            next_index: AtomicU32::new(0),
            collisions: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Pre-intern all known symbols.
    ///
    /// Called exactly once during initialization, before any concurrent
    /// access is possible.
    fn initialize_known_symbols(&self) {
        for symbol in KNOWN_SYMBOLS {
            self.intern(symbol);
        }
    }

    /// Intern a string, returning its symbol.
    ///
    /// Fast path is a single hash lookup; the slow path allocates the
    /// string with a `'static` lifetime and reserves the next index.
    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol {
                    index: entry.value().1,
                };
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == string {
                    return Symbol {
                        index: entry.get().1,
                    };
                }
                self.handle_collision(string, hash)
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let (interned, index) = self.allocate(string);
                entry.insert((interned, index));
                Symbol { index }
            }
        }
    }

    /// Allocate a new `'static` copy of the string and record it in the
    /// index vector.
    fn allocate(&self, string: &str) -> (&'static str, u32) {
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        let mut strings = self.strings.write().expect("string table poisoned");
        let slot = index as usize;
        if strings.len() <= slot {
            strings.resize(slot + 1, "");
        }
        strings[slot] = interned;
        (interned, index)
    }

    /// Handle hash collisions by probing with modified hashes.
    fn handle_collision(&self, string: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_PRIME: u64 = 0x9e37_79b9_7f4a_7c15;

        for i in 1u64..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));

            if let Some(entry) = self.map.get(&probe_hash) {
                if entry.value().0 == string {
                    return Symbol {
                        index: entry.value().1,
                    };
                }
            } else {
                self.collisions.fetch_add(1, Ordering::Relaxed);
                let (interned, index) = self.allocate(string);
                self.map.insert(probe_hash, (interned, index));
                return Symbol { index };
            }
        }

        // Probe budget exhausted; accept the overwrite.
        self.collisions.fetch_add(1, Ordering::Relaxed);
        let (interned, index) = self.allocate(string);
        self.map.insert(original_hash, (interned, index));
        Symbol { index }
    }

    /// Get string by symbol.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings
            .read()
            .expect("string table poisoned")
            .get(symbol.index as usize)
            .copied()
    }

    /// Returns true if the symbol index belongs to the pre-interned range.
    pub fn is_known(&self, symbol: Symbol) -> bool {
        (symbol.index as usize) < KNOWN_SYMBOLS.len()
    }

    /// Compute the hash of a string using AHasher.
    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }

    /// Get statistics about the table for profiling.
    pub fn stats(&self) -> InternerStats {
        InternerStats {
            count: self.next_index.load(Ordering::Relaxed) as usize,
            collisions: self.collisions.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Interner statistics, mostly useful in benchmarks.
#[derive(Clone, Copy, Debug)]
pub struct InternerStats {
    /// Number of distinct interned strings.
    pub count: usize,
    /// Number of hash collisions encountered.
    pub collisions: usize,
    /// Number of intern calls resolved by lookup.
    pub hits: usize,
    /// Number of intern calls that allocated.
    pub misses: usize,
}
