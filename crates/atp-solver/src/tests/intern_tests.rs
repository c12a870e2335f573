use super::*;
use crate::types::{ParamInfo, TypeVarId};

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    assert_eq!(interner.lookup(TypeId::NONE), Some(TypeData::None));
    assert_eq!(
        interner.lookup(TypeId::NO_RETURN),
        Some(TypeData::Uninhabited { is_noreturn: true })
    );
    assert_eq!(
        interner.lookup(TypeId::ANY_ERROR),
        Some(TypeData::Any(AnyReason::FromError))
    );
    assert_eq!(interner.len(), TypeId::FIRST_DYNAMIC as usize);
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let int = interner.instance("builtins.int", vec![]);
    let id1 = interner.instance("typing.Awaitable", vec![int]);
    let id2 = interner.instance("typing.Awaitable", vec![int]);
    let id3 = interner.instance("typing.AsyncIterable", vec![int]);

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
}

#[test]
fn test_interner_union_normalization() {
    let interner = TypeInterner::new();
    let str_ty = interner.instance("builtins.str", vec![]);

    // Union with single member should return that member
    let single = interner.union(vec![str_ty]);
    assert_eq!(single, str_ty);

    // Empty union is never
    let empty = interner.union(vec![]);
    assert_eq!(empty, TypeId::NEVER);

    // Uninhabited arms are dropped
    let with_never = interner.union(vec![str_ty, TypeId::NO_RETURN]);
    assert_eq!(with_never, str_ty);

    // Any absorbs the union, keeping its reason
    let with_any = interner.union(vec![str_ty, TypeId::ANY_UNANNOTATED]);
    assert_eq!(with_any, TypeId::ANY_UNANNOTATED);
}

#[test]
fn test_interner_union_dedups_and_flattens() {
    let interner = TypeInterner::new();
    let str_ty = interner.instance("builtins.str", vec![]);
    let int_ty = interner.instance("builtins.int", vec![]);

    let nested = interner.union(vec![str_ty, int_ty]);
    let flattened = interner.union(vec![str_ty, nested, str_ty, TypeId::NONE]);
    let expected = interner.union(vec![str_ty, int_ty, TypeId::NONE]);

    assert_eq!(flattened, expected);
    match interner.lookup(flattened) {
        Some(TypeData::Union(list)) => {
            let items = interner.type_list_items(list);
            assert_eq!(&*items, &[str_ty, int_ty, TypeId::NONE]);
            assert!(
                items
                    .iter()
                    .all(|&m| !matches!(interner.lookup(m), Some(TypeData::Union(_))))
            );
        }
        other => panic!("Expected union, got {other:?}"),
    }
}

#[test]
fn test_interner_callable_shapes_are_shared() {
    let interner = TypeInterner::new();
    let int_ty = interner.instance("builtins.int", vec![]);
    let x = interner.intern_string("x");

    let a = interner.callable(CallableShape::new(
        vec![ParamInfo::positional(Some(x), int_ty)],
        TypeId::NONE,
    ));
    let b = interner.callable(CallableShape::new(
        vec![ParamInfo::positional(Some(x), int_ty)],
        TypeId::NONE,
    ));
    let c = interner.callable(CallableShape::new(vec![], TypeId::NONE));

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_interner_single_overload_collapses() {
    let interner = TypeInterner::new();
    let sig = interner.callable(CallableShape::new(vec![], TypeId::NONE));
    assert_eq!(interner.overloaded(vec![sig]), sig);

    let other = interner.callable(CallableShape::new(vec![], TypeId::NO_RETURN));
    let set = interner.overloaded(vec![sig, other]);
    assert!(matches!(interner.lookup(set), Some(TypeData::Overloaded(_))));
}

#[test]
fn test_interner_type_vars_distinguished_by_id() {
    let interner = TypeInterner::new();
    let object = interner.instance("builtins.object", vec![]);
    let name = interner.intern_string("__T1");

    let a = interner.type_var(TypeVarRef {
        id: TypeVarId(-1),
        name,
        upper_bound: object,
    });
    let b = interner.type_var(TypeVarRef {
        id: TypeVarId(-2),
        name,
        upper_bound: object,
    });
    assert_ne!(a, b);
}

#[test]
fn test_interner_concurrent_interning_agrees() {
    let interner = TypeInterner::new();
    let ids: Vec<TypeId> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| interner.instance("trio._AsyncRawIOBase", vec![])))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_interner_declared_union_keeps_any_arms() {
    let interner = TypeInterner::new();
    let marker = interner.instance("trio_typing.YieldType", vec![TypeId::ANY]);
    let nested = interner.union_declared(vec![marker, TypeId::ANY]);
    let declared = interner.union_declared(vec![nested, TypeId::NO_RETURN, marker]);

    let Some(TypeData::Union(list)) = interner.lookup(declared) else {
        panic!("expected a union");
    };
    assert_eq!(
        &*interner.type_list_items(list),
        &[marker, TypeId::ANY, TypeId::NO_RETURN]
    );
    assert_eq!(interner.union(vec![marker, TypeId::ANY]), TypeId::ANY);
    assert_eq!(interner.union_declared(vec![marker]), marker);
}
