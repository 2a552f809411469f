//! Diagnostics — the single error-reporting channel of the pipeline.
//!
//! Lexer, parser, linker and validator all push into a per-document
//! diagnostic buffer; nothing in the core signals problems through
//! control flow. Ranges are 0-based; reporters convert for display.

use serde::Serialize;

use super::span::Span;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to the LSP severity number (1 = error .. 4 = hint).
    pub fn to_lsp(self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        }
    }
}

/// Diagnostic codes, grouped by the stage that emits them.
pub mod codes {
    /// Unterminated string / name / comment, bad escape, bad literal.
    pub const LEXER_ERROR: &str = "syntax-error";
    /// Unexpected token, missing terminator.
    pub const PARSER_ERROR: &str = "syntax-error";
    /// Validation errors (duplicates, bounds, self-specialization).
    pub const SEMANTIC_ERROR: &str = "semantic-error";
    /// Validation warnings.
    pub const VALIDATION_WARNING: &str = "validation-warning";
    /// Validation hints (untyped parts, empty abstract definitions).
    pub const VALIDATION_HINT: &str = "validation-hint";
}

/// One user-facing problem with a source range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: Span,
    pub code: Option<&'static str>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            range,
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>, range: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            range,
            code: None,
        }
    }

    pub fn hint(message: impl Into<String>, range: Span) -> Self {
        Self {
            severity: Severity::Hint,
            message: message.into(),
            range,
            code: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

/// Count errors in a diagnostic slice.
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Count warnings in a diagnostic slice.
pub fn warning_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count()
}
