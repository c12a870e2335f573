use crate::api::CheckerApi;
use crate::config::PluginConfig;
use crate::context::MethodContext;
use crate::outcome::RuleOutcome;
use atp_common::diagnostics::diagnostic_messages;
use atp_solver::type_queries::{instance_parts, is_none_type};

/// `TaskStatus[T].started()` may omit its argument only when `T` is `None`.
pub fn task_status_started(
    api: &mut dyn CheckerApi,
    _config: &PluginConfig,
    ctx: &MethodContext,
) -> RuleOutcome {
    if !ctx.call.is_group_empty(0) {
        return RuleOutcome::NoOpinion;
    }

    let db = api.types();
    let requires_argument = instance_parts(db, ctx.receiver_type)
        .and_then(|parts| parts.args.first().copied())
        .is_some_and(|value_type| !is_none_type(db, value_type));
    if requires_argument {
        api.fail(
            diagnostic_messages::TASK_STATUS_STARTED_REQUIRES_ARGUMENT,
            ctx.call.location,
        );
    }
    RuleOutcome::NoOpinion
}

#[cfg(test)]
#[path = "../tests/task_status_tests.rs"]
mod tests;
