//! The type database boundary.
//!
//! Rules and queries take `&dyn TypeDatabase` rather than a concrete interner
//! so a host can back the plugin with its own type store.

use crate::types::{
    CallableShape, CallableShapeId, TypeData, TypeId, TypeListId, TypeVarRef,
};
use atp_common::interner::Atom;
use std::sync::Arc;

pub trait TypeDatabase: Send + Sync {
    /// Intern raw type data. Prefer the typed constructors below; this one
    /// performs no normalization.
    fn intern(&self, data: TypeData) -> TypeId;
    fn lookup(&self, id: TypeId) -> Option<TypeData>;

    fn intern_string(&self, s: &str) -> Atom;
    fn resolve_atom(&self, atom: Atom) -> Arc<str>;

    fn type_list(&self, items: &[TypeId]) -> TypeListId;
    /// Items of an interned list; unknown ids yield an empty slice.
    fn type_list_items(&self, id: TypeListId) -> Arc<[TypeId]>;
    fn callable_shape(&self, id: CallableShapeId) -> Option<Arc<CallableShape>>;

    /// `Name[Args...]` by fully-qualified name.
    fn instance(&self, name: &str, args: Vec<TypeId>) -> TypeId;
    fn callable(&self, shape: CallableShape) -> TypeId;
    /// Ordered overload set. A single item collapses to that item.
    fn overloaded(&self, items: Vec<TypeId>) -> TypeId;
    /// Simplified union: flattened, deduplicated, uninhabited arms dropped.
    fn union(&self, members: Vec<TypeId>) -> TypeId;
    /// Union as written in an annotation: flattened and deduplicated, but
    /// `Any` and uninhabited arms are kept.
    fn union_declared(&self, members: Vec<TypeId>) -> TypeId;
    fn type_var(&self, var: TypeVarRef) -> TypeId;
    fn opaque(&self, name: &str) -> TypeId;
}
