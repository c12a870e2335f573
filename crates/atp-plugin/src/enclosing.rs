//! Yield and send types of the generator enclosing a call.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::CallContext;
use crate::packed::decode_reported;
use atp_common::diagnostics::diagnostic_messages;
use atp_solver::TypeId;
use atp_solver::type_queries::{callable_shape, instance_args_if_named};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorTypes {
    pub yield_type: TypeId,
    pub send_type: TypeId,
}

impl GeneratorTypes {
    #[must_use]
    pub const fn new(yield_type: TypeId, send_type: TypeId) -> Self {
        Self {
            yield_type,
            send_type,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Decoded from the enclosing function's declared return type.
    Declared(GeneratorTypes),
    /// The enclosing function is not annotated in the expected shape;
    /// callers tolerate it silently.
    Untyped,
    /// An error was reported at the call site.
    Failed,
}

impl Resolution {
    #[must_use]
    pub const fn types(self) -> GeneratorTypes {
        match self {
            Self::Declared(types) => types,
            Self::Untyped => GeneratorTypes::new(TypeId::ANY_ARTIFACT, TypeId::ANY_ARTIFACT),
            Self::Failed => GeneratorTypes::new(TypeId::ANY_ERROR, TypeId::ANY_ERROR),
        }
    }

    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Resolve the yield/send types visible to `ctx` from its enclosing function.
///
/// The function must be an `async def` carrying the generator decoration;
/// its declared signature must return `Coroutine[_, _, Composite]`.
pub fn resolve_enclosing_generator_types(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> Resolution {
    let function = match ctx.enclosing_function {
        Some(function) if function.is_coroutine && function.is_decorated => function,
        other => {
            debug!(enclosing = ?other, "yield site outside a decorated async function");
            api.fail(
                diagnostic_messages::YIELD_OUTSIDE_ASYNC_GENERATOR,
                ctx.location,
            );
            return Resolution::Failed;
        }
    };

    let composite = function.signature.and_then(|signature| {
        let db = api.types();
        let shape = callable_shape(db, signature)?;
        let args = instance_args_if_named(db, shape.return_type, &config.coroutine)?;
        match *args {
            [_, _, composite] => Some(composite),
            _ => None,
        }
    });
    let Some(composite) = composite else {
        debug!("enclosing function has no coroutine-shaped signature");
        return Resolution::Untyped;
    };

    match decode_reported(api, config, composite, ctx.location) {
        (_, true) => Resolution::Failed,
        (params, false) => Resolution::Declared(GeneratorTypes::new(
            params.yield_type,
            params.send_type,
        )),
    }
}

#[cfg(test)]
#[path = "../tests/enclosing_tests.rs"]
mod tests;
