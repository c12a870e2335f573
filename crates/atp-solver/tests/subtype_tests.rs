use super::*;
use crate::TypeInterner;
use crate::types::{ParamInfo, TypeVarId, TypeVarRef};

struct Fixture {
    db: TypeInterner,
    hierarchy: ClassHierarchy,
}

impl Fixture {
    fn new() -> Self {
        let db = TypeInterner::new();
        let hierarchy = ClassHierarchy::with_async_defaults(&db);
        Self { db, hierarchy }
    }

    fn named(&self, name: &str) -> TypeId {
        self.db.instance(name, vec![])
    }

    fn is_subtype(&self, source: TypeId, target: TypeId) -> bool {
        is_subtype_of(&self.db, Some(&self.hierarchy), source, target)
    }
}

#[test]
fn test_reflexive_and_any() {
    let f = Fixture::new();
    let int_ty = f.named("builtins.int");
    assert!(f.is_subtype(int_ty, int_ty));
    assert!(f.is_subtype(TypeId::ANY_ERROR, int_ty));
    assert!(f.is_subtype(int_ty, TypeId::ANY_UNANNOTATED));
    assert!(f.is_subtype(TypeId::NO_RETURN, int_ty));
    assert!(!f.is_subtype(TypeId::NONE, int_ty));
}

#[test]
fn test_nominal_bases() {
    let f = Fixture::new();
    let bool_ty = f.named("builtins.bool");
    let int_ty = f.named("builtins.int");
    let str_ty = f.named("builtins.str");
    assert!(f.is_subtype(bool_ty, int_ty));
    assert!(!f.is_subtype(int_ty, bool_ty));
    assert!(!f.is_subtype(str_ty, int_ty));
    assert!(f.is_subtype(str_ty, f.named("builtins.object")));
    assert!(f.is_subtype(TypeId::NONE, f.named("builtins.object")));
}

#[test]
fn test_generic_args_are_covariant_and_prefix_matched() {
    let f = Fixture::new();
    let bool_ty = f.named("builtins.bool");
    let int_ty = f.named("builtins.int");
    let str_ty = f.named("builtins.str");

    let generator = f.db.instance(
        "trio_typing.CompatAsyncGenerator",
        vec![bool_ty, TypeId::NONE, str_ty],
    );
    let iterable_int = f.db.instance("typing.AsyncIterable", vec![int_ty]);
    let iterable_str = f.db.instance("typing.AsyncIterable", vec![str_ty]);

    assert!(f.is_subtype(generator, iterable_int));
    assert!(!f.is_subtype(generator, iterable_str));

    let list_int = f.db.instance("builtins.list", vec![int_ty]);
    let list_bool = f.db.instance("builtins.list", vec![bool_ty]);
    assert!(f.is_subtype(list_bool, list_int));
    assert!(!f.is_subtype(list_int, list_bool));
}

#[test]
fn test_union_source_and_target() {
    let f = Fixture::new();
    let int_ty = f.named("builtins.int");
    let str_ty = f.named("builtins.str");
    let bool_ty = f.named("builtins.bool");
    let int_or_str = f.db.union(vec![int_ty, str_ty]);

    assert!(f.is_subtype(bool_ty, int_or_str));
    assert!(f.is_subtype(f.db.union(vec![bool_ty, str_ty]), int_or_str));
    assert!(!f.is_subtype(int_or_str, int_ty));
}

#[test]
fn test_type_var_uses_upper_bound() {
    let f = Fixture::new();
    let int_ty = f.named("builtins.int");
    let object = f.named("builtins.object");
    let t = f.db.type_var(TypeVarRef {
        id: TypeVarId(-1),
        name: f.db.intern_string("__T1"),
        upper_bound: object,
    });
    let bounded = f.db.type_var(TypeVarRef {
        id: TypeVarId(-2),
        name: f.db.intern_string("B"),
        upper_bound: int_ty,
    });

    assert!(f.is_subtype(t, object));
    assert!(!f.is_subtype(t, int_ty));
    assert!(f.is_subtype(bounded, int_ty));
}

#[test]
fn test_callables_contravariant_params() {
    let f = Fixture::new();
    let int_ty = f.named("builtins.int");
    let bool_ty = f.named("builtins.bool");

    let takes_int = f
        .db
        .callable(CallableShape::new(vec![ParamInfo::unnamed(int_ty)], TypeId::NONE));
    let takes_bool = f
        .db
        .callable(CallableShape::new(vec![ParamInfo::unnamed(bool_ty)], TypeId::NONE));

    assert!(f.is_subtype(takes_int, takes_bool));
    assert!(!f.is_subtype(takes_bool, takes_int));
}

#[test]
fn test_checker_without_hierarchy_is_purely_structural() {
    let db = TypeInterner::new();
    let bool_ty = db.instance("builtins.bool", vec![]);
    let int_ty = db.instance("builtins.int", vec![]);
    assert!(!is_subtype_of(&db, None, bool_ty, int_ty));
}
