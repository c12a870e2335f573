//! String interning for identifier deduplication.
//!
//! Qualified names (`typing.Awaitable`, `trio_typing.YieldType`) and parameter
//! names are compared constantly while rules pattern-match type trees, so they
//! are stored once and referred to by a 4-byte `Atom`.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, RwLock};

/// Interned string handle.
///
/// Two atoms from the same `Interner` are equal iff their strings are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty string; always pre-registered at index 0.
    pub const EMPTY: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Thread-safe string interner.
///
/// Lookups by string go through a sharded map; resolution by atom takes a
/// read lock on the backing vector.
pub struct Interner {
    map: DashMap<Arc<str>, Atom, FxBuildHasher>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        let interner = Self {
            map: DashMap::with_hasher(FxBuildHasher),
            strings: RwLock::new(Vec::with_capacity(64)),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Atom::EMPTY);
        interner
    }

    /// Intern a string, returning its atom.
    pub fn intern(&self, s: &str) -> Atom {
        if let Some(atom) = self.map.get(s) {
            return *atom;
        }

        let key: Arc<str> = Arc::from(s);
        *self.map.entry(key.clone()).or_insert_with(|| {
            let mut strings = match self.strings.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let atom = Atom(strings.len() as u32);
            strings.push(key);
            atom
        })
    }

    /// Resolve an atom back to its string.
    ///
    /// Unknown atoms resolve to the empty string.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let strings = match self.strings.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        strings
            .get(atom.index())
            .cloned()
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Look up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Atom> {
        self.map.get(s).map(|atom| *atom)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/interner_tests.rs"]
mod tests;
