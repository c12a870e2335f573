//! Structural queries over interned types.
//!
//! Rules never match on `TypeData` directly; they ask these helpers for the
//! shape they expect and treat `None` as "rule does not apply".

use crate::db::TypeDatabase;
use crate::types::{CallableShape, TypeData, TypeId};
use atp_common::interner::Atom;
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// A `Name[Args...]` instance, decomposed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceParts {
    pub name: Atom,
    pub args: Arc<[TypeId]>,
}

pub fn instance_parts(db: &dyn TypeDatabase, type_id: TypeId) -> Option<InstanceParts> {
    match db.lookup(type_id)? {
        TypeData::Instance { name, args } => Some(InstanceParts {
            name,
            args: db.type_list_items(args),
        }),
        _ => None,
    }
}

/// Fully-qualified name of an instance type.
pub fn instance_name(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<str>> {
    match db.lookup(type_id)? {
        TypeData::Instance { name, .. } => Some(db.resolve_atom(name)),
        _ => None,
    }
}

/// Instance args when `type_id` is an instance named `name`.
pub fn instance_args_if_named(
    db: &dyn TypeDatabase,
    type_id: TypeId,
    name: &str,
) -> Option<Arc<[TypeId]>> {
    let parts = instance_parts(db, type_id)?;
    (&*db.resolve_atom(parts.name) == name).then_some(parts.args)
}

pub fn callable_shape(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<CallableShape>> {
    match db.lookup(type_id)? {
        TypeData::Callable(shape_id) => db.callable_shape(shape_id),
        _ => None,
    }
}

pub fn is_callable_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Callable(_)))
}

pub fn union_members(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<[TypeId]>> {
    match db.lookup(type_id)? {
        TypeData::Union(list) => Some(db.type_list_items(list)),
        _ => None,
    }
}

/// Union members, or the type itself as a single arm.
pub fn union_arms(db: &dyn TypeDatabase, type_id: TypeId) -> SmallVec<[TypeId; 4]> {
    match union_members(db, type_id) {
        Some(members) => members.iter().copied().collect(),
        None => smallvec![type_id],
    }
}

pub fn overload_items(db: &dyn TypeDatabase, type_id: TypeId) -> Option<Arc<[TypeId]>> {
    match db.lookup(type_id)? {
        TypeData::Overloaded(list) => Some(db.type_list_items(list)),
        _ => None,
    }
}

pub fn is_none_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::None))
}

pub fn is_any_type(db: &dyn TypeDatabase, type_id: TypeId) -> bool {
    matches!(db.lookup(type_id), Some(TypeData::Any(_)))
}

/// Replace the return type of a callable, leaving everything else untouched.
///
/// Non-callables are returned unchanged.
pub fn replace_callable_return_type(
    db: &dyn TypeDatabase,
    type_id: TypeId,
    return_type: TypeId,
) -> TypeId {
    match callable_shape(db, type_id) {
        Some(shape) => db.callable(shape.with_return_type(return_type)),
        None => type_id,
    }
}

/// `target` with its argument portion (params, type params, ellipsis flag)
/// taken from `source`. `None` unless both are callables.
pub fn callable_with_signature_of(
    db: &dyn TypeDatabase,
    target: TypeId,
    source: TypeId,
) -> Option<TypeId> {
    let target_shape = callable_shape(db, target)?;
    let source_shape = callable_shape(db, source)?;
    Some(db.callable(target_shape.with_signature_of(&source_shape)))
}

/// Replace the args of an instance, keeping its name.
///
/// Non-instances are returned unchanged.
pub fn replace_instance_args(db: &dyn TypeDatabase, type_id: TypeId, args: &[TypeId]) -> TypeId {
    match db.lookup(type_id) {
        Some(TypeData::Instance { name, .. }) => {
            let args = db.type_list(args);
            db.intern(TypeData::Instance { name, args })
        }
        _ => type_id,
    }
}

#[cfg(test)]
#[path = "tests/type_queries_tests.rs"]
mod tests;
