//! `@takes_callable_and_args`: variadic forwarding as a family of overloads.
//!
//! The decorated function declares
//!
//! ```text
//! def start_soon(fn: Callable[[ArgsForCallable], R], *args: ArgsForCallable) -> ...
//! ```
//!
//! and the decorator result becomes an overload set where arity `k` replaces
//! both marker slots with the same `k` fresh type variables:
//!
//! ```text
//! def [__T1] start_soon(fn: Callable[[__T1], R], __T1) -> ...
//! ```
//!
//! Arities run from zero to `PluginConfig::max_forwarded_arity`.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::CallContext;
use crate::outcome::RuleOutcome;
use atp_common::diagnostics::{diagnostic_messages, format_message};
use atp_solver::type_queries::{callable_shape, instance_name};
use atp_solver::{
    CallableShape, ParamInfo, ParamKind, TypeDatabase, TypeId, TypeParamInfo, TypeVarId,
};
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ForwardingError {
    #[error("must be used as a decorator")]
    NotADecorator,
    #[error("{marker} must be used with a *args argument in the decorated function")]
    MarkerNotStar { marker: String },
    #[error("{marker} may only be used once as the type of *args in the decorated function")]
    DuplicateStar { marker: String },
    #[error(
        "{marker} must be used with a positional or *args argument in the callable type that the decorated function takes"
    )]
    InnerMarkerKind { marker: String },
    #[error(
        "{marker} may only be used once as the type of an argument to a callable type that the decorated function takes"
    )]
    DuplicateCallable { marker: String },
    #[error("decorated function must take *args with type {qualified}")]
    MissingStar { qualified: String },
    #[error("decorated function must take a callable that has an argument of type {qualified}")]
    MissingCallable { qualified: String },
}

/// Where the two marker slots sit in the decorated signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ForwardingSlots {
    /// Index of `*args: Marker` in the decorated function.
    star: usize,
    /// Index of the callable parameter taking the forwarded args.
    callable: usize,
    /// Index of the marker parameter inside that callable.
    callable_marker: usize,
}

fn is_marker(db: &dyn TypeDatabase, config: &PluginConfig, ty: TypeId) -> bool {
    instance_name(db, ty).is_some_and(|name| *name == *config.args_marker)
}

fn locate_slots(
    db: &dyn TypeDatabase,
    config: &PluginConfig,
    decorated: &CallableShape,
) -> Result<ForwardingSlots, ForwardingError> {
    let marker = || PluginConfig::short_name(&config.args_marker).to_string();
    let mut star = None;
    let mut callable = None;

    for (idx, param) in decorated.params.iter().enumerate() {
        if is_marker(db, config, param.type_id) {
            if param.kind != ParamKind::Star {
                return Err(ForwardingError::MarkerNotStar { marker: marker() });
            }
            if star.replace(idx).is_some() {
                return Err(ForwardingError::DuplicateStar { marker: marker() });
            }
            continue;
        }

        if param.kind != ParamKind::Positional {
            continue;
        }
        let Some(inner) = callable_shape(db, param.type_id) else {
            continue;
        };
        for (inner_idx, inner_param) in inner.params.iter().enumerate() {
            if !is_marker(db, config, inner_param.type_id) {
                continue;
            }
            if !matches!(inner_param.kind, ParamKind::Positional | ParamKind::Star) {
                return Err(ForwardingError::InnerMarkerKind { marker: marker() });
            }
            if callable.replace((idx, inner_idx)).is_some() {
                return Err(ForwardingError::DuplicateCallable { marker: marker() });
            }
        }
    }

    let star = star.ok_or_else(|| ForwardingError::MissingStar {
        qualified: config.args_marker.clone(),
    })?;
    let (callable, callable_marker) = callable.ok_or_else(|| ForwardingError::MissingCallable {
        qualified: config.args_marker.clone(),
    })?;
    Ok(ForwardingSlots {
        star,
        callable,
        callable_marker,
    })
}

/// Replace the parameter at `at` by one unnamed positional per type.
fn splice_positional(params: &[ParamInfo], at: usize, types: &[TypeId]) -> Vec<ParamInfo> {
    let mut spliced = Vec::with_capacity(params.len() + types.len());
    spliced.extend_from_slice(&params[..at]);
    spliced.extend(types.iter().map(|&ty| ParamInfo::unnamed(ty)));
    spliced.extend_from_slice(&params[at + 1..]);
    spliced
}

/// Expand `decorated` into one signature per arity `0..=max_arity`.
///
/// Fresh variables are bounded by `object` and numbered downward from the
/// lowest id already on the decorated signature or its inner callable, so
/// they never collide with either one's type parameters.
pub fn expand_forwarding_overloads(
    db: &dyn TypeDatabase,
    config: &PluginConfig,
    decorated: TypeId,
) -> Result<TypeId, ForwardingError> {
    let shape = callable_shape(db, decorated).ok_or(ForwardingError::NotADecorator)?;
    let slots = locate_slots(db, config, &shape)?;
    let inner = callable_shape(db, shape.params[slots.callable].type_id)
        .ok_or(ForwardingError::NotADecorator)?;

    let object = db.instance(&config.object, vec![]);
    let base_id = shape
        .type_params
        .iter()
        .chain(inner.type_params.iter())
        .map(|param| param.id.0)
        .min()
        .map_or(0, |lowest| lowest.min(0));

    let mut fresh: Vec<TypeParamInfo> = Vec::with_capacity(config.max_forwarded_arity);
    let mut fresh_types: Vec<TypeId> = Vec::with_capacity(config.max_forwarded_arity);
    let mut overloads = Vec::with_capacity(config.max_forwarded_arity + 1);

    for arity in 0..=config.max_forwarded_arity {
        if arity > 0 {
            let param = TypeParamInfo {
                name: db.intern_string(&format!("__T{arity}")),
                id: TypeVarId(base_id - arity as i32),
                upper_bound: object,
                values: Vec::new(),
            };
            fresh_types.push(db.type_var(param.as_type_var()));
            fresh.push(param);
        }

        let mut inner_shape = (*inner).clone();
        inner_shape.params = splice_positional(&inner.params, slots.callable_marker, &fresh_types);
        inner_shape.type_params.extend(fresh.iter().cloned());

        let mut params = shape.params.clone();
        params[slots.callable].type_id = db.callable(inner_shape);
        let mut outer_shape = (*shape).clone();
        outer_shape.params = splice_positional(&params, slots.star, &fresh_types);
        outer_shape.type_params.extend(fresh.iter().cloned());

        trace!(arity, "synthesized forwarding overload");
        overloads.push(db.callable(outer_shape));
    }

    Ok(db.overloaded(overloads))
}

pub fn takes_callable_and_args(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    let db = api.types();
    let result = match ctx.single_arg_type(0) {
        Some(decorated) if callable_shape(db, ctx.default_return_type).is_some() => {
            expand_forwarding_overloads(db, config, decorated)
        }
        _ => Err(ForwardingError::NotADecorator),
    };

    match result {
        Ok(overloads) => RuleOutcome::Refined(overloads),
        Err(err) => {
            debug!(%err, "rejected forwarding declaration");
            let message = format_message(
                diagnostic_messages::INVALID_USE_OF_TAKES_CALLABLE_AND_ARGS,
                &[&err.to_string()],
            );
            api.fail(&message, ctx.location);
            RuleOutcome::Degraded(ctx.default_return_type)
        }
    }
}

#[cfg(test)]
#[path = "../tests/forwarding_tests.rs"]
mod tests;
