//! Type solver for the atp plugin.
//!
//! Types are immutable trees stored in a hash-consing interner:
//!
//! - **`TypeId`**: copyable handle; equal structure means equal id
//! - **`TypeData`**: the variants rules pattern-match on
//! - **`TypeDatabase`**: the object-safe boundary rules are written against
//!
//! Alongside the model it provides union simplification, structural queries,
//! formatting for diagnostics, and a reference subtype checker.

mod class_hierarchy;
mod db;
mod format;
mod intern;
mod subtype;
pub mod type_queries;
pub mod types;

pub use class_hierarchy::{ClassHierarchy, OBJECT_TYPE_NAME};
pub use db::TypeDatabase;
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use subtype::{SubtypeChecker, SubtypeResult, is_subtype_of};
pub use types::{
    AnyReason, CallableShape, CallableShapeId, ParamInfo, ParamKind, TypeData, TypeId,
    TypeListId, TypeParamInfo, TypeVarId, TypeVarRef,
};
