//! Plain-text diagnostic rendering, 1-based positions.

use std::fmt::Write;

use crate::core::diagnostics::Severity;
use crate::model::Document;

/// Render `uri:line:col: severity: message` lines plus a closing summary.
pub fn render_text<'a>(documents: impl IntoIterator<Item = &'a Document>) -> String {
    let mut out = String::new();
    let mut errors = 0usize;
    let mut warnings = 0usize;

    for document in documents {
        let mut diagnostics: Vec<_> = document.diagnostics.iter().collect();
        diagnostics.sort_by_key(|d| (d.range.start.line, d.range.start.column));
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                _ => {}
            }
            let _ = writeln!(
                out,
                "{}:{}:{}: {}: {}",
                document.uri,
                diagnostic.range.start.line + 1,
                diagnostic.range.start.column + 1,
                diagnostic.severity.as_str(),
                diagnostic.message
            );
        }
    }

    let _ = writeln!(out, "{} error(s), {} warning(s)", errors, warnings);
    out
}
