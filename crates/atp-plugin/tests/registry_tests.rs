use super::*;
use crate::context::ArgExpr;
use crate::test_support::{Fixture, messages};

#[test]
fn stock_names_are_registered() {
    let plugin = Plugin::default();
    assert_eq!(
        plugin.function_names(),
        vec![
            "async_generator.async_generator",
            "async_generator.asynccontextmanager",
            "async_generator.yield_",
            "async_generator.yield_from_",
            "contextlib.asynccontextmanager",
            "trio.open_file",
            "trio_typing.takes_callable_and_args",
        ]
    );
    assert_eq!(
        plugin.method_names(),
        vec!["trio.Path.open", "trio_typing.TaskStatus.started"]
    );
}

#[test]
fn lookup_is_exact() {
    let plugin = Plugin::default();
    assert_eq!(plugin.function_hook("trio.open_file"), Some(FunctionRule::OpenFile));
    assert_eq!(plugin.function_hook("open_file"), None);
    assert_eq!(plugin.function_hook("trio.open_file "), None);
    assert_eq!(
        plugin.method_hook("trio_typing.TaskStatus.started"),
        Some(MethodRule::TaskStatusStarted)
    );
    assert_eq!(plugin.method_hook("trio.open_file"), None);
}

#[test]
fn hosts_can_register_aliases() {
    let mut plugin = Plugin::empty(PluginConfig::default());
    assert!(plugin.function_hook("trio.open_file").is_none());

    plugin.register_function("mylib.open", FunctionRule::OpenFile);
    plugin.register_method("mylib.Path.open", MethodRule::PathOpen);
    assert_eq!(plugin.function_hook("mylib.open"), Some(FunctionRule::OpenFile));
    assert_eq!(plugin.method_hook("mylib.Path.open"), Some(MethodRule::PathOpen));
}

#[test]
fn infer_function_call_dispatches_and_defaults() {
    let f = Fixture::new();
    let plugin = Plugin::new(f.config.clone());
    let mut checker = f.checker();
    let default = TypeId::ANY_SPECIAL;
    let ctx = f
        .call(default)
        .with_arg(f.str())
        .with_arg_group(vec![f.str()], vec![ArgExpr::StrLiteral("rb".to_string())])
        .with_arg_group(vec![f.int()], vec![ArgExpr::IntLiteral(0)]);

    let raw = f.generic("typing.Awaitable", vec![f.named("trio._AsyncRawIOBase")]);
    assert_eq!(plugin.infer_function_call(&mut checker, "trio.open_file", &ctx), raw);
    assert_eq!(plugin.infer_function_call(&mut checker, "builtins.open", &ctx), default);
    assert_eq!(plugin.check_function_call(&mut checker, "builtins.open", &ctx), None);
}

#[test]
fn degraded_outcomes_use_their_placeholder() {
    let f = Fixture::new();
    let plugin = Plugin::new(f.config.clone());
    let mut checker = f.checker();
    let ctx = f.call(TypeId::ANY_SPECIAL).with_arg(f.int());

    let outcome = plugin.check_function_call(&mut checker, "async_generator.yield_", &ctx);
    assert_eq!(outcome, Some(RuleOutcome::Degraded(TypeId::ANY_SPECIAL)));
    assert_eq!(messages(&checker).len(), 1);
}

#[test]
fn method_rules_dispatch() {
    let f = Fixture::new();
    let plugin = Plugin::new(f.config.clone());
    let mut checker = f.checker();

    let receiver = f.generic("trio_typing.TaskStatus", vec![f.int()]);
    let started = MethodContext::new(f.call(TypeId::NONE), receiver);
    assert_eq!(
        plugin.infer_method_call(&mut checker, "trio_typing.TaskStatus.started", &started),
        TypeId::NONE
    );
    assert_eq!(checker.diagnostics().len(), 1);

    let open = MethodContext::new(f.call(TypeId::ANY_SPECIAL), f.named("trio.Path"));
    assert_eq!(
        plugin.infer_method_call(&mut checker, "trio.Path.open", &open),
        f.generic("typing.Awaitable", vec![f.named("trio._AsyncTextIOBase")])
    );
}
