use atp_common::diagnostics::{Diagnostic, DiagnosticCategory};
use colored::Colorize;

/// Renders diagnostics as `file:line:col - error ATP9001: message`, with a
/// source snippet when the fixture carried its source text.
pub struct Reporter<'a> {
    color: bool,
    source: Option<&'a str>,
}

impl<'a> Reporter<'a> {
    pub const fn new(color: bool, source: Option<&'a str>) -> Self {
        Self { color, source }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| self.format_diagnostic(diagnostic))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = match self.position_for(diagnostic.start) {
            Some((line, column)) => format!("{}:{line}:{column}", diagnostic.file),
            None => diagnostic.file.clone(),
        };
        let mut output = format!(
            "{location} - {} {}: {}",
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        );
        if let Some(snippet) = self.format_snippet(diagnostic.start, diagnostic.length) {
            output.push_str(&snippet);
        }
        output
    }

    /// 1-based line and column of a byte offset into the source.
    fn position_for(&self, offset: u32) -> Option<(usize, usize)> {
        let source = self.source?;
        let prefix = source.get(..offset as usize)?;
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map_or(0, |idx| idx + 1);
        let column = prefix[line_start..].chars().count() + 1;
        Some((line, column))
    }

    /// The source line followed by a `~` underline below the span.
    fn format_snippet(&self, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let source = self.source?;
        let (line_num, column) = self.position_for(start)?;
        let line_text = source.lines().nth(line_num - 1)?;

        let width = line_text.chars().count().saturating_sub(column - 1);
        let underline_len = (length as usize).clamp(1, width.max(1));
        let underline = format!("{}{}", " ".repeat(column - 1), "~".repeat(underline_len));
        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("ATP{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
