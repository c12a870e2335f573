use super::*;
use crate::context::EnclosingFunction;
use crate::test_support::{Fixture, messages};
use atp_common::diagnostics::diagnostic_codes;

fn resolve(f: &Fixture, ctx: &CallContext) -> (Resolution, Vec<String>) {
    let mut checker = f.checker();
    let resolution = resolve_enclosing_generator_types(&mut checker, &f.config, ctx);
    (resolution, messages(&checker))
}

#[test]
fn decodes_the_coroutine_result_type() {
    let f = Fixture::new();
    let composite = f.declared(vec![f.yield_marker(f.int()), f.send_marker(f.str()), TypeId::NONE]);
    let ctx = f
        .call(TypeId::ANY)
        .with_enclosing_function(f.async_generator_function(composite));

    let (resolution, diagnostics) = resolve(&f, &ctx);
    assert_eq!(
        resolution,
        Resolution::Declared(GeneratorTypes::new(f.int(), f.str()))
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn unmarked_result_type_is_unannotated() {
    let f = Fixture::new();
    let ctx = f
        .call(TypeId::ANY)
        .with_enclosing_function(f.async_generator_function(TypeId::NONE));

    let (resolution, _) = resolve(&f, &ctx);
    assert_eq!(
        resolution.types(),
        GeneratorTypes::new(TypeId::ANY_UNANNOTATED, TypeId::ANY_UNANNOTATED)
    );
}

#[test]
fn outside_any_function_fails() {
    let f = Fixture::new();
    let mut checker = f.checker();
    let resolution =
        resolve_enclosing_generator_types(&mut checker, &f.config, &f.call(TypeId::ANY));

    assert_eq!(resolution, Resolution::Failed);
    assert_eq!(
        resolution.types(),
        GeneratorTypes::new(TypeId::ANY_ERROR, TypeId::ANY_ERROR)
    );
    assert_eq!(checker.diagnostics().len(), 1);
    assert_eq!(
        checker.diagnostics()[0].code,
        diagnostic_codes::YIELD_OUTSIDE_ASYNC_GENERATOR
    );
}

#[test]
fn plain_or_undecorated_functions_fail() {
    let f = Fixture::new();
    let generator = f.async_generator_function(TypeId::NONE);
    for function in [
        EnclosingFunction {
            is_coroutine: false,
            ..generator
        },
        EnclosingFunction {
            is_decorated: false,
            ..generator
        },
    ] {
        let ctx = f.call(TypeId::ANY).with_enclosing_function(function);
        let (resolution, diagnostics) = resolve(&f, &ctx);
        assert!(resolution.is_failed());
        assert_eq!(
            diagnostics,
            vec!["async_generator.yield_() outside an @async_generator func"]
        );
    }
}

#[test]
fn unexpected_signature_shape_is_tolerated() {
    let f = Fixture::new();
    let unannotated = EnclosingFunction {
        is_coroutine: true,
        is_decorated: true,
        signature: None,
    };
    let two_arg_coroutine = EnclosingFunction {
        signature: Some(f.callable(
            vec![],
            f.generic("typing.Coroutine", vec![TypeId::ANY, TypeId::ANY]),
        )),
        ..unannotated
    };
    let not_a_coroutine = EnclosingFunction {
        signature: Some(f.callable(vec![], f.int())),
        ..unannotated
    };

    for function in [unannotated, two_arg_coroutine, not_a_coroutine] {
        let ctx = f.call(TypeId::ANY).with_enclosing_function(function);
        let (resolution, diagnostics) = resolve(&f, &ctx);
        assert_eq!(resolution, Resolution::Untyped);
        assert_eq!(
            resolution.types(),
            GeneratorTypes::new(TypeId::ANY_ARTIFACT, TypeId::ANY_ARTIFACT)
        );
        assert!(diagnostics.is_empty());
    }
}

#[test]
fn malformed_composite_fails_with_one_error() {
    let f = Fixture::new();
    let composite = f.declared(vec![f.send_marker(f.int()), f.send_marker(f.str())]);
    let ctx = f
        .call(TypeId::ANY)
        .with_enclosing_function(f.async_generator_function(composite));

    let (resolution, diagnostics) = resolve(&f, &ctx);
    assert_eq!(resolution, Resolution::Failed);
    assert_eq!(
        diagnostics,
        vec!["invalid @async_generator return type: SendType specified multiple times"]
    );
}
