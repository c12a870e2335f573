use super::*;
use crate::TypeInterner;
use crate::types::{ParamInfo, TypeParamInfo, TypeVarId, TypeVarRef};

fn fmt(db: &TypeInterner, ty: TypeId) -> String {
    TypeFormatter::new(db).format(ty)
}

#[test]
fn formats_intrinsics() {
    let db = TypeInterner::new();
    assert_eq!(fmt(&db, TypeId::NONE), "None");
    assert_eq!(fmt(&db, TypeId::NO_RETURN), "NoReturn");
    assert_eq!(fmt(&db, TypeId::ANY_ERROR), "Any");
}

#[test]
fn formats_generic_instances_with_short_names() {
    let db = TypeInterner::new();
    let raw = db.instance("trio._AsyncRawIOBase", vec![]);
    let awaitable = db.instance("typing.Awaitable", vec![raw]);
    assert_eq!(fmt(&db, awaitable), "Awaitable[_AsyncRawIOBase]");
}

#[test]
fn formats_unions_in_member_order() {
    let db = TypeInterner::new();
    let bool_ty = db.instance("builtins.bool", vec![]);
    let str_ty = db.instance("builtins.str", vec![]);
    let union = db.union(vec![bool_ty, str_ty, TypeId::NONE]);
    assert_eq!(fmt(&db, union), "Union[bool, str, None]");
}

#[test]
fn formats_callables() {
    let db = TypeInterner::new();
    let int_ty = db.instance("builtins.int", vec![]);
    let object = db.instance("builtins.object", vec![]);
    let t = TypeParamInfo {
        name: db.intern_string("T"),
        id: TypeVarId(1),
        upper_bound: object,
        values: vec![],
    };
    let t_ty = db.type_var(TypeVarRef {
        id: t.id,
        name: t.name,
        upper_bound: object,
    });

    let mut shape = CallableShape::new(
        vec![
            ParamInfo::positional(Some(db.intern_string("x")), t_ty),
            ParamInfo::unnamed(int_ty),
            ParamInfo::star(Some(db.intern_string("args")), TypeId::ANY),
        ],
        TypeId::NONE,
    );
    shape.type_params.push(t);
    let callable = db.callable(shape);
    assert_eq!(fmt(&db, callable), "def [T] (x: T, int, *args: Any) -> None");

    let mut ellipsis = CallableShape::new(vec![], int_ty);
    ellipsis.is_ellipsis_args = true;
    assert_eq!(fmt(&db, db.callable(ellipsis)), "def (...) -> int");
}

#[test]
fn formats_overload_sets() {
    let db = TypeInterner::new();
    let a = db.callable(CallableShape::new(vec![], TypeId::NONE));
    let b = db.callable(CallableShape::new(vec![ParamInfo::unnamed(TypeId::ANY)], TypeId::NONE));
    let set = db.overloaded(vec![a, b]);
    assert_eq!(fmt(&db, set), "Overload(def () -> None, def (Any) -> None)");
}
