//! Nominal class hierarchy.
//!
//! Instances are related by name: `CompatAsyncGenerator[Y, S, R]` is an
//! `AsyncIterable[Y]` because the host declared the base. Base classes are
//! assumed to take a prefix of the derived class's type arguments, which is
//! how the generator and stream classes this plugin deals with are declared.
//!
//! Cycle detection is the host's job; lookups here still carry a visited set
//! so a malformed hierarchy cannot loop.

use crate::db::TypeDatabase;
use atp_common::interner::Atom;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

pub const OBJECT_TYPE_NAME: &str = "builtins.object";

#[derive(Debug, Default)]
pub struct ClassHierarchy {
    bases: FxHashMap<Atom, SmallVec<[Atom; 2]>>,
}

impl ClassHierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `base` as a direct base class of `derived`.
    pub fn add_base(&mut self, db: &dyn TypeDatabase, derived: &str, base: &str) {
        let derived = db.intern_string(derived);
        let base = db.intern_string(base);
        let entry = self.bases.entry(derived).or_default();
        if !entry.contains(&base) {
            entry.push(base);
        }
    }

    pub fn direct_bases(&self, class: Atom) -> &[Atom] {
        self.bases
            .get(&class)
            .map(|bases| bases.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `derived` names `base` or (transitively) inherits from it.
    pub fn is_nominal_subclass(&self, derived: Atom, base: Atom) -> bool {
        if derived == base {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut stack: SmallVec<[Atom; 8]> = SmallVec::new();
        stack.push(derived);
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for &next in self.direct_bases(current) {
                if next == base {
                    return true;
                }
                stack.push(next);
            }
        }
        false
    }

    /// The hierarchy the stock async stubs declare.
    pub fn with_async_defaults(db: &dyn TypeDatabase) -> Self {
        let mut hierarchy = Self::new();
        for (derived, base) in [
            ("builtins.bool", "builtins.int"),
            ("trio_typing.CompatAsyncGenerator", "trio_typing.AsyncGenerator"),
            ("trio_typing.AsyncGenerator", "typing.AsyncGenerator"),
            ("typing.AsyncGenerator", "typing.AsyncIterator"),
            ("typing.AsyncIterator", "typing.AsyncIterable"),
            ("typing.Coroutine", "typing.Awaitable"),
            ("trio._AsyncRawIOBase", "trio._AsyncIOBase"),
            ("trio._AsyncBufferedIOBase", "trio._AsyncIOBase"),
            ("trio._AsyncTextIOBase", "trio._AsyncIOBase"),
        ] {
            hierarchy.add_base(db, derived, base);
        }
        hierarchy
    }
}
