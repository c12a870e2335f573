//! Packed generator parameters.
//!
//! A generator-producing async function declares a single return type that
//! carries three logical parameters:
//!
//! ```text
//! Union[YieldType[Y], SendType[S], R1, R2, ...]
//! ```
//!
//! `decompose` recovers `(Y, S, Union[R1, R2, ...])` from such a type and
//! `compose` builds one back. Rules that have a call site to report at use
//! `decode_reported`, which turns a `DecodeError` into one diagnostic and an
//! erroneous placeholder triple.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use atp_common::diagnostics::{diagnostic_messages, format_message};
use atp_common::Span;
use atp_solver::type_queries::{instance_parts, union_arms};
use atp_solver::{TypeDatabase, TypeId};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// The three logical parameters of a composite return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedParams {
    pub yield_type: TypeId,
    pub send_type: TypeId,
    pub return_type: TypeId,
}

impl PackedParams {
    #[must_use]
    pub const fn new(yield_type: TypeId, send_type: TypeId, return_type: TypeId) -> Self {
        Self {
            yield_type,
            send_type,
            return_type,
        }
    }

    /// Placeholder returned after an encoding error.
    #[must_use]
    pub const fn erroneous(composite: TypeId) -> Self {
        Self::new(TypeId::ANY_ERROR, TypeId::ANY_ERROR, composite)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("{marker} must take one argument")]
    MarkerArity { marker: String },
    #[error("{marker} specified multiple times")]
    DuplicateMarker { marker: String },
}

enum Arm {
    Yield(TypeId),
    Send(TypeId),
    Other(TypeId),
}

fn classify_arm(
    db: &dyn TypeDatabase,
    config: &PluginConfig,
    arm: TypeId,
) -> Result<Arm, DecodeError> {
    let Some(parts) = instance_parts(db, arm) else {
        return Ok(Arm::Other(arm));
    };
    let name = db.resolve_atom(parts.name);
    let is_yield = *name == *config.yield_marker;
    if !is_yield && *name != *config.send_marker {
        return Ok(Arm::Other(arm));
    }
    let &[inner] = &*parts.args else {
        return Err(DecodeError::MarkerArity {
            marker: PluginConfig::short_name(&name).to_string(),
        });
    };
    Ok(if is_yield {
        Arm::Yield(inner)
    } else {
        Arm::Send(inner)
    })
}

fn set_once(
    slot: &mut Option<TypeId>,
    value: TypeId,
    marker: &str,
) -> Result<(), DecodeError> {
    if slot.replace(value).is_some() {
        return Err(DecodeError::DuplicateMarker {
            marker: PluginConfig::short_name(marker).to_string(),
        });
    }
    Ok(())
}

/// Split a composite return type into its logical parameters.
///
/// Without any marker arm both yield and send are unannotated `Any` and the
/// whole type is the return type. With at least one marker, the missing one
/// is `None` and the remaining arms form the return type (`NoReturn` when
/// there are none).
pub fn decompose(
    db: &dyn TypeDatabase,
    config: &PluginConfig,
    composite: TypeId,
) -> Result<PackedParams, DecodeError> {
    let mut yield_type = None;
    let mut send_type = None;
    let mut others: SmallVec<[TypeId; 4]> = SmallVec::new();

    for arm in union_arms(db, composite) {
        match classify_arm(db, config, arm)? {
            Arm::Yield(ty) => set_once(&mut yield_type, ty, &config.yield_marker)?,
            Arm::Send(ty) => set_once(&mut send_type, ty, &config.send_marker)?,
            Arm::Other(ty) => others.push(ty),
        }
    }

    if yield_type.is_none() && send_type.is_none() {
        return Ok(PackedParams::new(
            TypeId::ANY_UNANNOTATED,
            TypeId::ANY_UNANNOTATED,
            composite,
        ));
    }

    let return_type = if others.is_empty() {
        TypeId::NO_RETURN
    } else {
        db.union(others.into_vec())
    };
    Ok(PackedParams::new(
        yield_type.unwrap_or(TypeId::NONE),
        send_type.unwrap_or(TypeId::NONE),
        return_type,
    ))
}

/// Pack logical parameters into a composite return type.
pub fn compose(db: &dyn TypeDatabase, config: &PluginConfig, params: PackedParams) -> TypeId {
    if params.yield_type == TypeId::ANY_UNANNOTATED && params.send_type == TypeId::ANY_UNANNOTATED
    {
        return params.return_type;
    }

    let mut arms = vec![
        db.instance(&config.yield_marker, vec![params.yield_type]),
        db.instance(&config.send_marker, vec![params.send_type]),
    ];
    if params.return_type != TypeId::NO_RETURN {
        arms.extend(union_arms(db, params.return_type));
    }
    db.union_declared(arms)
}

/// `decompose`, reporting an encoding error at `location` and substituting
/// `PackedParams::erroneous`. The flag is set when an error was reported.
pub fn decode_reported(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    composite: TypeId,
    location: Span,
) -> (PackedParams, bool) {
    match decompose(api.types(), config, composite) {
        Ok(params) => {
            trace!(?params, "decoded packed return type");
            (params, false)
        }
        Err(err) => {
            debug!(%err, "malformed packed return type");
            let message = format_message(
                diagnostic_messages::INVALID_ASYNC_GENERATOR_RETURN_TYPE,
                &[&err.to_string()],
            );
            api.fail(&message, location);
            (PackedParams::erroneous(composite), true)
        }
    }
}

#[cfg(test)]
#[path = "../tests/packed_tests.rs"]
mod tests;
