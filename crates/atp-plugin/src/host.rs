//! An in-memory host: checks subtypes with the reference checker and keeps
//! every reported diagnostic.

use crate::api::{CheckerApi, SubtypeLabels};
use atp_common::diagnostics::{
    Diagnostic, code_for_message, diagnostic_codes, diagnostic_messages, format_message,
};
use atp_common::Span;
use atp_solver::{ClassHierarchy, TypeDatabase, TypeFormatter, TypeId, is_subtype_of};

pub struct RecordingChecker<'a> {
    db: &'a dyn TypeDatabase,
    hierarchy: Option<&'a ClassHierarchy>,
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RecordingChecker<'a> {
    pub fn new(db: &'a dyn TypeDatabase, file: impl Into<String>) -> Self {
        Self {
            db,
            hierarchy: None,
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: &'a ClassHierarchy) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    fn push(&mut self, location: Span, message: String, code: u32) {
        let (start, length) = if location.is_dummy() {
            (0, 0)
        } else {
            (location.start, location.len())
        };
        self.diagnostics
            .push(Diagnostic::error(self.file.clone(), start, length, message, code));
    }
}

impl CheckerApi for RecordingChecker<'_> {
    fn types(&self) -> &dyn TypeDatabase {
        self.db
    }

    fn check_subtype(
        &mut self,
        subtype: TypeId,
        supertype: TypeId,
        location: Span,
        labels: SubtypeLabels,
    ) -> bool {
        if is_subtype_of(self.db, self.hierarchy, subtype, supertype) {
            return true;
        }
        let mut formatter = TypeFormatter::new(self.db);
        let sub = formatter.format(subtype);
        let sup = formatter.format(supertype);
        let message = format_message(
            diagnostic_messages::INCOMPATIBLE_TYPES,
            &[labels.subtype, &sub, labels.supertype, &sup],
        );
        self.push(location, message, diagnostic_codes::INCOMPATIBLE_TYPES);
        false
    }

    fn fail(&mut self, message: &str, location: Span) {
        let code = code_for_message(message);
        self.push(location, message.to_string(), code);
    }
}

#[cfg(test)]
#[path = "../tests/host_tests.rs"]
mod tests;
