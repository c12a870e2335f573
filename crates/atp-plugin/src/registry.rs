//! Name → rule registry.
//!
//! The host resolves a call to a fully-qualified name and asks for the rule
//! registered under exactly that name. At most one rule runs per call site.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::{CallContext, MethodContext};
use crate::decorator::{async_generator_decorator, signature_transporter};
use crate::forwarding::takes_callable_and_args;
use crate::open_mode::{open_file, path_open};
use crate::outcome::RuleOutcome;
use crate::task_status::task_status_started;
use crate::yield_sites::{yield_from_site, yield_site};
use atp_solver::TypeId;
use rustc_hash::FxHashMap;
use tracing::debug_span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionRule {
    SignatureTransporter,
    AsyncGeneratorDecorator,
    OpenFile,
    TakesCallableAndArgs,
    Yield,
    YieldFrom,
}

impl FunctionRule {
    pub fn apply(
        self,
        api: &mut dyn CheckerApi,
        config: &PluginConfig,
        ctx: &CallContext,
    ) -> RuleOutcome {
        match self {
            Self::SignatureTransporter => signature_transporter(api, config, ctx),
            Self::AsyncGeneratorDecorator => async_generator_decorator(api, config, ctx),
            Self::OpenFile => open_file(api, config, ctx),
            Self::TakesCallableAndArgs => takes_callable_and_args(api, config, ctx),
            Self::Yield => yield_site(api, config, ctx),
            Self::YieldFrom => yield_from_site(api, config, ctx),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodRule {
    TaskStatusStarted,
    PathOpen,
}

impl MethodRule {
    pub fn apply(
        self,
        api: &mut dyn CheckerApi,
        config: &PluginConfig,
        ctx: &MethodContext,
    ) -> RuleOutcome {
        match self {
            Self::TaskStatusStarted => task_status_started(api, config, ctx),
            Self::PathOpen => path_open(api, config, ctx),
        }
    }
}

const DEFAULT_FUNCTION_RULES: &[(&str, FunctionRule)] = &[
    (
        "contextlib.asynccontextmanager",
        FunctionRule::SignatureTransporter,
    ),
    (
        "async_generator.asynccontextmanager",
        FunctionRule::SignatureTransporter,
    ),
    ("async_generator.async_generator", FunctionRule::AsyncGeneratorDecorator),
    ("async_generator.yield_", FunctionRule::Yield),
    ("async_generator.yield_from_", FunctionRule::YieldFrom),
    ("trio.open_file", FunctionRule::OpenFile),
    (
        "trio_typing.takes_callable_and_args",
        FunctionRule::TakesCallableAndArgs,
    ),
];

const DEFAULT_METHOD_RULES: &[(&str, MethodRule)] = &[
    ("trio_typing.TaskStatus.started", MethodRule::TaskStatusStarted),
    ("trio.Path.open", MethodRule::PathOpen),
];

pub struct Plugin {
    config: PluginConfig,
    function_rules: FxHashMap<String, FunctionRule>,
    method_rules: FxHashMap<String, MethodRule>,
}

impl Plugin {
    /// A plugin with the stock name table.
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        let mut plugin = Self::empty(config);
        for &(name, rule) in DEFAULT_FUNCTION_RULES {
            plugin.register_function(name, rule);
        }
        for &(name, rule) in DEFAULT_METHOD_RULES {
            plugin.register_method(name, rule);
        }
        plugin
    }

    /// A plugin with no names registered.
    #[must_use]
    pub fn empty(config: PluginConfig) -> Self {
        Self {
            config,
            function_rules: FxHashMap::default(),
            method_rules: FxHashMap::default(),
        }
    }

    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Register (or replace) the rule for a function or decorator name.
    pub fn register_function(&mut self, fullname: impl Into<String>, rule: FunctionRule) {
        self.function_rules.insert(fullname.into(), rule);
    }

    pub fn register_method(&mut self, fullname: impl Into<String>, rule: MethodRule) {
        self.method_rules.insert(fullname.into(), rule);
    }

    pub fn function_hook(&self, fullname: &str) -> Option<FunctionRule> {
        self.function_rules.get(fullname).copied()
    }

    pub fn method_hook(&self, fullname: &str) -> Option<MethodRule> {
        self.method_rules.get(fullname).copied()
    }

    /// Registered function names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.function_rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.method_rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the rule for `fullname`, if any. `None` when nothing is registered.
    pub fn check_function_call(
        &self,
        api: &mut dyn CheckerApi,
        fullname: &str,
        ctx: &CallContext,
    ) -> Option<RuleOutcome> {
        let rule = self.function_hook(fullname)?;
        let _span = debug_span!("function_rule", fullname, ?rule).entered();
        let outcome = rule.apply(api, &self.config, ctx);
        tracing::debug!(?outcome, "rule finished");
        Some(outcome)
    }

    pub fn check_method_call(
        &self,
        api: &mut dyn CheckerApi,
        fullname: &str,
        ctx: &MethodContext,
    ) -> Option<RuleOutcome> {
        let rule = self.method_hook(fullname)?;
        let _span = debug_span!("method_rule", fullname, ?rule).entered();
        let outcome = rule.apply(api, &self.config, ctx);
        tracing::debug!(?outcome, "rule finished");
        Some(outcome)
    }

    /// The type the host should use for a function call: the rule's result,
    /// or `ctx.default_return_type` when no rule applies.
    pub fn infer_function_call(
        &self,
        api: &mut dyn CheckerApi,
        fullname: &str,
        ctx: &CallContext,
    ) -> TypeId {
        self.check_function_call(api, fullname, ctx)
            .map_or(ctx.default_return_type, |outcome| {
                outcome.into_type(ctx.default_return_type)
            })
    }

    pub fn infer_method_call(
        &self,
        api: &mut dyn CheckerApi,
        fullname: &str,
        ctx: &MethodContext,
    ) -> TypeId {
        let default = ctx.call.default_return_type;
        self.check_method_call(api, fullname, ctx)
            .map_or(default, |outcome| outcome.into_type(default))
    }
}

impl Default for Plugin {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
