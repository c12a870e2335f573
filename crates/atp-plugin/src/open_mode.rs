//! `trio.open_file(path, mode, buffering)` and `trio.Path.open(mode, buffering)`.
//!
//! The stream class depends on the literal mode and buffering arguments,
//! mirroring what the runtime hands back.

use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::{ArgExpr, CallContext, MethodContext};
use crate::outcome::RuleOutcome;
use atp_solver::TypeId;
use tracing::debug;

const MODE_GROUP: usize = 1;
const BUFFERING_GROUP: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamKind {
    Text,
    Buffered,
    Raw,
    /// Binary with a buffering argument whose value is unknown.
    RawOrBuffered,
}

/// Pick the stream kind for a call whose groups follow
/// `(file, mode, buffering, ...)`. `None` when the mode is not a literal.
pub fn classify_open_call(config: &PluginConfig, ctx: &CallContext) -> Option<StreamKind> {
    if ctx.is_group_empty(MODE_GROUP) {
        return Some(StreamKind::Text);
    }
    let ArgExpr::StrLiteral(mode) = ctx.single_arg_expr(MODE_GROUP)? else {
        return None;
    };
    if !mode.contains(config.binary_mode_marker) {
        return Some(StreamKind::Text);
    }

    Some(match ctx.single_arg_expr(BUFFERING_GROUP) {
        Some(ArgExpr::IntLiteral(0)) => StreamKind::Raw,
        Some(ArgExpr::IntLiteral(_)) => StreamKind::Buffered,
        Some(_) => StreamKind::RawOrBuffered,
        None => StreamKind::Buffered,
    })
}

fn stream_type(api: &dyn CheckerApi, config: &PluginConfig, kind: StreamKind) -> TypeId {
    let stream = match kind {
        StreamKind::Text => api.named_generic_type(&config.text_stream, vec![]),
        StreamKind::Buffered => api.named_generic_type(&config.buffered_stream, vec![]),
        StreamKind::Raw => api.named_generic_type(&config.raw_stream, vec![]),
        StreamKind::RawOrBuffered => {
            let raw = api.named_generic_type(&config.raw_stream, vec![]);
            let buffered = api.named_generic_type(&config.buffered_stream, vec![]);
            api.types().union(vec![raw, buffered])
        }
    };
    api.named_generic_type(&config.awaitable, vec![stream])
}

pub fn open_file(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &CallContext,
) -> RuleOutcome {
    match classify_open_call(config, ctx) {
        Some(kind) => {
            debug!(?kind, "open mode resolved");
            RuleOutcome::Refined(stream_type(api, config, kind))
        }
        None => {
            debug!("open mode is not a literal");
            RuleOutcome::NoOpinion
        }
    }
}

/// Bound-method form: the receiver stands in for the file argument.
pub fn path_open(
    api: &mut dyn CheckerApi,
    config: &PluginConfig,
    ctx: &MethodContext,
) -> RuleOutcome {
    open_file(api, config, &ctx.call.shifted(1))
}

#[cfg(test)]
#[path = "../tests/open_mode_tests.rs"]
mod tests;
