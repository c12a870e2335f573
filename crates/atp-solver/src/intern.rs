//! Type interning.
//!
//! Every `TypeData`, type list and callable shape is stored exactly once.
//! Interning is thread-safe: the host may run rules for independent call
//! sites concurrently against one `TypeInterner`.

use crate::db::TypeDatabase;
use crate::types::{
    AnyReason, CallableShape, CallableShapeId, TypeData, TypeId, TypeListId, TypeVarRef,
};
use atp_common::interner::{Atom, Interner};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use tracing::trace;

/// Hash-consing table: value -> dense index, index -> value.
struct InternTable<T: ?Sized + Hash + Eq> {
    map: DashMap<Arc<T>, u32, FxBuildHasher>,
    items: RwLock<Vec<Arc<T>>>,
}

impl<T: ?Sized + Hash + Eq> InternTable<T> {
    fn new() -> Self {
        Self {
            map: DashMap::with_hasher(FxBuildHasher),
            items: RwLock::new(Vec::new()),
        }
    }

    /// Return the index of `probe`, creating the entry with `make` on a miss.
    fn intern_with(&self, probe: &T, make: impl FnOnce() -> Arc<T>) -> u32 {
        if let Some(idx) = self.map.get(probe) {
            return *idx;
        }

        let value = make();
        *self.map.entry(value.clone()).or_insert_with(|| {
            let mut items = match self.items.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let idx = items.len() as u32;
            items.push(value);
            idx
        })
    }

    fn get(&self, idx: u32) -> Option<Arc<T>> {
        let items = match self.items.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        items.get(idx as usize).cloned()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// The default `TypeDatabase` implementation.
pub struct TypeInterner {
    atoms: Interner,
    types: InternTable<TypeData>,
    lists: InternTable<[TypeId]>,
    callables: InternTable<CallableShape>,
}

impl TypeInterner {
    #[must_use]
    pub fn new() -> Self {
        let interner = Self {
            atoms: Interner::new(),
            types: InternTable::new(),
            lists: InternTable::new(),
            callables: InternTable::new(),
        };
        interner.register_intrinsics();
        interner
    }

    fn register_intrinsics(&self) {
        // Order must match the TypeId constants.
        let intrinsics = [
            (TypeData::None, TypeId::NONE),
            (TypeData::Uninhabited { is_noreturn: false }, TypeId::NEVER),
            (TypeData::Uninhabited { is_noreturn: true }, TypeId::NO_RETURN),
            (TypeData::Any(AnyReason::Explicit), TypeId::ANY),
            (TypeData::Any(AnyReason::Unannotated), TypeId::ANY_UNANNOTATED),
            (TypeData::Any(AnyReason::FromError), TypeId::ANY_ERROR),
            (
                TypeData::Any(AnyReason::ImplementationArtifact),
                TypeId::ANY_ARTIFACT,
            ),
            (TypeData::Any(AnyReason::SpecialForm), TypeId::ANY_SPECIAL),
        ];
        for (data, expected) in intrinsics {
            let id = self.intern(data);
            debug_assert_eq!(id, expected);
        }
    }

    /// Number of distinct types interned so far (intrinsics included).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.len() == 0
    }

    /// Walk `members`, flattening nested unions into `out`.
    ///
    /// Returns the first `Any` member encountered, if any: an `Any` arm
    /// absorbs the whole union.
    fn collect_union_members(
        &self,
        members: &[TypeId],
        out: &mut SmallVec<[TypeId; 8]>,
    ) -> Option<TypeId> {
        let mut any_member = None;
        for &member in members {
            match self.lookup(member) {
                Some(TypeData::Union(list)) => {
                    let nested = self.type_list_items(list);
                    if let Some(any) = self.collect_union_members(&nested, out) {
                        any_member.get_or_insert(any);
                    }
                }
                Some(TypeData::Uninhabited { .. }) => {}
                Some(TypeData::Any(_)) => {
                    any_member.get_or_insert(member);
                }
                _ => {
                    if !out.contains(&member) {
                        out.push(member);
                    }
                }
            }
        }
        any_member
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDatabase for TypeInterner {
    fn intern(&self, data: TypeData) -> TypeId {
        TypeId(self.types.intern_with(&data, || Arc::new(data.clone())))
    }

    fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.get(id.0).map(|data| (*data).clone())
    }

    fn intern_string(&self, s: &str) -> Atom {
        self.atoms.intern(s)
    }

    fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.atoms.resolve(atom)
    }

    fn type_list(&self, items: &[TypeId]) -> TypeListId {
        TypeListId(self.lists.intern_with(items, || Arc::from(items)))
    }

    fn type_list_items(&self, id: TypeListId) -> Arc<[TypeId]> {
        self.lists.get(id.0).unwrap_or_else(|| Arc::from(Vec::new()))
    }

    fn callable_shape(&self, id: CallableShapeId) -> Option<Arc<CallableShape>> {
        self.callables.get(id.0)
    }

    fn instance(&self, name: &str, args: Vec<TypeId>) -> TypeId {
        let name = self.intern_string(name);
        let args = self.type_list(&args);
        self.intern(TypeData::Instance { name, args })
    }

    fn callable(&self, shape: CallableShape) -> TypeId {
        let shape_id =
            CallableShapeId(self.callables.intern_with(&shape, || Arc::new(shape.clone())));
        self.intern(TypeData::Callable(shape_id))
    }

    fn overloaded(&self, items: Vec<TypeId>) -> TypeId {
        if items.len() == 1 {
            return items[0];
        }
        let list = self.type_list(&items);
        self.intern(TypeData::Overloaded(list))
    }

    fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        if let Some(any) = self.collect_union_members(&members, &mut flat) {
            trace!(members = members.len(), "union absorbed by Any member");
            return any;
        }

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let list = self.type_list(&flat);
                self.intern(TypeData::Union(list))
            }
        }
    }

    fn union_declared(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        let mut pending: Vec<TypeId> = members.into_iter().rev().collect();
        while let Some(member) = pending.pop() {
            if let Some(TypeData::Union(list)) = self.lookup(member) {
                pending.extend(self.type_list_items(list).iter().rev().copied());
            } else if !flat.contains(&member) {
                flat.push(member);
            }
        }

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let list = self.type_list(&flat);
                self.intern(TypeData::Union(list))
            }
        }
    }

    fn type_var(&self, var: TypeVarRef) -> TypeId {
        self.intern(TypeData::TypeVar(var))
    }

    fn opaque(&self, name: &str) -> TypeId {
        let name = self.intern_string(name);
        self.intern(TypeData::Opaque(name))
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
