//! Diagnostic types and message lookup for the plugin rules.
//!
//! Every message a rule can emit is listed in `DIAGNOSTIC_MESSAGES` with a
//! stable code. Templates use `{0}`, `{1}`, ... placeholders filled in by
//! `format_message`.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A type-checking diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

// =============================================================================
// Message Data
// =============================================================================

pub mod diagnostic_codes {
    pub const INVALID_ASYNC_GENERATOR_RETURN_TYPE: u32 = 9001;
    pub const YIELD_OUTSIDE_ASYNC_GENERATOR: u32 = 9002;
    pub const INVALID_USE_OF_TAKES_CALLABLE_AND_ARGS: u32 = 9003;
    pub const TASK_STATUS_STARTED_REQUIRES_ARGUMENT: u32 = 9004;
    pub const INCOMPATIBLE_TYPES: u32 = 9005;
    pub const GENERIC_FAILURE: u32 = 9099;
}

pub mod diagnostic_messages {
    pub const INVALID_ASYNC_GENERATOR_RETURN_TYPE: &str =
        "invalid @async_generator return type: {0}";
    pub const YIELD_OUTSIDE_ASYNC_GENERATOR: &str =
        "async_generator.yield_() outside an @async_generator func";
    pub const INVALID_USE_OF_TAKES_CALLABLE_AND_ARGS: &str =
        "invalid use of @takes_callable_and_args: {0}";
    pub const TASK_STATUS_STARTED_REQUIRES_ARGUMENT: &str =
        "TaskStatus.started() requires an argument for types other than TaskStatus[None]";
    pub const INCOMPATIBLE_TYPES: &str = "Incompatible types ({0} \"{1}\", {2} \"{3}\")";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_ASYNC_GENERATOR_RETURN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_ASYNC_GENERATOR_RETURN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::YIELD_OUTSIDE_ASYNC_GENERATOR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::YIELD_OUTSIDE_ASYNC_GENERATOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_USE_OF_TAKES_CALLABLE_AND_ARGS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_USE_OF_TAKES_CALLABLE_AND_ARGS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TASK_STATUS_STARTED_REQUIRES_ARGUMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TASK_STATUS_STARTED_REQUIRES_ARGUMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INCOMPATIBLE_TYPES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCOMPATIBLE_TYPES,
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Recover the code for a fully rendered message.
///
/// Hosts report failures as plain strings; this maps them back onto the
/// table by matching the literal prefix of each template. Unknown messages
/// get `GENERIC_FAILURE`.
#[must_use]
pub fn code_for_message(message: &str) -> u32 {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| {
            let prefix = m.message.split('{').next().unwrap_or(m.message);
            !prefix.is_empty() && message.starts_with(prefix)
        })
        .map_or(diagnostic_codes::GENERIC_FAILURE, |m| m.code)
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod tests;
