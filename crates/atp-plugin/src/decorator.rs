//! Decorators whose declared signature loses the wrapped function's parameters.
//!
//! `asynccontextmanager` is declared roughly as
//! `(Callable[..., AsyncIterator[T]]) -> Callable[..., AsyncContextManager[T]]`;
//! the transporter puts the decorated function's parameters back.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::CallContext;
use crate::outcome::RuleOutcome;
use crate::packed::decode_reported;
use atp_solver::type_queries::{
    callable_shape, callable_with_signature_of, instance_args_if_named,
    replace_callable_return_type, replace_instance_args,
};
use atp_solver::{TypeDatabase, TypeId};
use tracing::trace;

/// The decorator's result with the argument portion of the decorated
/// function. `None` when the call is not a one-argument application of a
/// callable-returning decorator to a callable.
pub fn transport_signature(db: &dyn TypeDatabase, ctx: &CallContext) -> Option<TypeId> {
    let decorated = ctx.single_arg_type(0)?;
    callable_with_signature_of(db, ctx.default_return_type, decorated)
}

pub fn signature_transporter(
    api: &mut dyn CheckerApi,
    _config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    match transport_signature(api.types(), ctx) {
        Some(ty) => RuleOutcome::Refined(ty),
        None => {
            trace!("decorator call is not callable-to-callable");
            RuleOutcome::NoOpinion
        }
    }
}

/// `@async_generator`: transport the signature, then unpack the
/// `CompatAsyncGenerator[_, _, Composite]` return type into
/// `CompatAsyncGenerator[Yield, Send, Return]`.
pub fn async_generator_decorator(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    let transported = transport_signature(api.types(), ctx);
    let callable = transported.unwrap_or(ctx.default_return_type);

    let generator = callable_shape(api.types(), callable).and_then(|shape| {
        let args =
            instance_args_if_named(api.types(), shape.return_type, &config.compat_async_generator)?;
        match *args {
            [_, _, composite] => Some((shape.return_type, composite)),
            _ => None,
        }
    });
    let Some((generator, composite)) = generator else {
        return transported.map_or(RuleOutcome::NoOpinion, RuleOutcome::Refined);
    };

    let (params, degraded) = decode_reported(api, config, composite, ctx.location);
    let db = api.types();
    let generator = replace_instance_args(
        db,
        generator,
        &[params.yield_type, params.send_type, params.return_type],
    );
    let refined = replace_callable_return_type(db, callable, generator);
    if degraded {
        RuleOutcome::Degraded(refined)
    } else {
        RuleOutcome::Refined(refined)
    }
}

#[cfg(test)]
#[path = "../tests/decorator_tests.rs"]
mod tests;
