//! `yield_(value)` and `yield_from_(agen)` inside a decorated async generator.

use crate::api::{CheckerApi, SubtypeLabels};
use crate::config::PluginConfig;
use crate::context::CallContext;
use crate::enclosing::{Resolution, resolve_enclosing_generator_types};
use crate::outcome::RuleOutcome;
use atp_solver::type_queries::instance_parts;
use atp_solver::{TypeDatabase, TypeId};
use tracing::debug;

/// The value yielded must match the declared yield type; the call itself
/// evaluates to `Awaitable[send type]`.
pub fn yield_site(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    let value_type = if ctx.is_group_empty(0) {
        TypeId::NONE
    } else if let Some(ty) = ctx.single_arg_type(0) {
        ty
    } else {
        return RuleOutcome::NoOpinion;
    };

    let resolution = resolve_enclosing_generator_types(api, config, ctx);
    if resolution.is_failed() {
        return RuleOutcome::Degraded(ctx.default_return_type);
    }
    let types = resolution.types();
    api.check_subtype(
        value_type,
        types.yield_type,
        ctx.location,
        SubtypeLabels::new("yield_ argument", "declared YieldType"),
    );
    RuleOutcome::Refined(api.named_generic_type(&config.awaitable, vec![types.send_type]))
}

enum Delegate {
    Generator { yield_type: TypeId, send_type: TypeId },
    Iterable,
    Unknown,
}

fn classify_delegate(db: &dyn TypeDatabase, config: &PluginConfig, ty: TypeId) -> Delegate {
    let Some(parts) = instance_parts(db, ty) else {
        return Delegate::Unknown;
    };
    let name = db.resolve_atom(parts.name);
    let is_generator = config.generator_shapes.iter().any(|shape| **shape == *name);
    match *parts.args {
        [yield_type, send_type, ..] if is_generator => Delegate::Generator {
            yield_type,
            send_type,
        },
        _ => Delegate::Iterable,
    }
}

/// Delegating to another async generator: its yields must fit ours and our
/// sends must fit its (contravariant). Anything else must at least be an
/// async iterable of our yield type. The call's own type is left alone.
pub fn yield_from_site(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    let Some(delegate_type) = ctx.single_arg_type(0) else {
        return RuleOutcome::NoOpinion;
    };

    let resolution = resolve_enclosing_generator_types(api, config, ctx);
    if let Resolution::Failed = resolution {
        return RuleOutcome::Degraded(ctx.default_return_type);
    }
    let ours = resolution.types();

    match classify_delegate(api.types(), config, delegate_type) {
        Delegate::Generator {
            yield_type,
            send_type,
        } => {
            api.check_subtype(
                yield_type,
                ours.yield_type,
                ctx.location,
                SubtypeLabels::new("yield_from_ argument YieldType", "local declared YieldType"),
            );
            api.check_subtype(
                ours.send_type,
                send_type,
                ctx.location,
                SubtypeLabels::new("local declared SendType", "yield_from_ argument SendType"),
            );
        }
        Delegate::Iterable => {
            let expected = api.named_generic_type(&config.async_iterable, vec![ours.yield_type]);
            api.check_subtype(
                delegate_type,
                expected,
                ctx.location,
                SubtypeLabels::new("yield_from_ argument type", "expected iterable type"),
            );
        }
        Delegate::Unknown => debug!("yield_from_ argument is not an instance; skipped"),
    }
    RuleOutcome::NoOpinion
}

#[cfg(test)]
#[path = "../tests/yield_sites_tests.rs"]
mod tests;
