//! Runs one fixture through the plugin.

use crate::fixture::{CallSite, Fixture};
use anyhow::{Result, bail};
use atp_common::diagnostics::Diagnostic;
use atp_plugin::{Plugin, RecordingChecker, RuleOutcome};
use atp_solver::{TypeFormatter, TypeInterner};
use serde::Serialize;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Refined,
    NoOpinion,
    Degraded,
}

impl From<RuleOutcome> for OutcomeKind {
    fn from(outcome: RuleOutcome) -> Self {
        match outcome {
            RuleOutcome::Refined(_) => Self::Refined,
            RuleOutcome::NoOpinion => Self::NoOpinion,
            RuleOutcome::Degraded(_) => Self::Degraded,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub callee: String,
    pub outcome: OutcomeKind,
    /// The type the host would use for the call.
    pub result_type: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub fn run_fixture(plugin: &Plugin, fixture: &Fixture) -> Result<RunReport> {
    let db = TypeInterner::new();
    let hierarchy = fixture.hierarchy(&db);
    let site = fixture.lower(&db, plugin.config())?;
    let mut checker = RecordingChecker::new(&db, fixture.file_name()).with_hierarchy(&hierarchy);

    let outcome = match &site {
        CallSite::Function { name, ctx } => plugin.check_function_call(&mut checker, name, ctx),
        CallSite::Method { name, ctx } => plugin.check_method_call(&mut checker, name, ctx),
    };
    let Some(outcome) = outcome else {
        bail!("no rule is registered for `{}`", site.name());
    };

    let result_type = outcome.into_type(site.default_return_type());
    let report = RunReport {
        callee: site.name().to_string(),
        outcome: outcome.into(),
        result_type: TypeFormatter::new(&db).format(result_type),
        diagnostics: checker.take_diagnostics(),
    };
    info!(
        callee = %report.callee,
        outcome = ?report.outcome,
        diagnostics = report.diagnostics.len(),
        "fixture checked"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
