//! Diagnostic JSON report.
//!
//! Shape:
//! `{ summary: { totalFiles, filesWithErrors, totalErrors, totalWarnings,
//! isValid }, files: [ { file, isValid, errorCount, warningCount,
//! diagnostics: [...] } ] }` — line/column 1-based.

use serde::Serialize;

use super::ReportError;
use crate::core::diagnostics::{Diagnostic, Severity};
use crate::model::Document;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub summary: Summary,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file: String,
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub diagnostics: Vec<DiagnosticJson>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticJson {
    pub severity: &'static str,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

fn severity_str(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
        Severity::Hint => "hint",
    }
}

impl DiagnosticJson {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: severity_str(diagnostic.severity),
            message: diagnostic.message.clone(),
            // 0-based internally, 1-based on the wire.
            line: diagnostic.range.start.line + 1,
            column: diagnostic.range.start.column + 1,
            end_line: diagnostic.range.end.line + 1,
            end_column: diagnostic.range.end.column + 1,
        }
    }
}

impl DiagnosticsReport {
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let files: Vec<FileReport> = documents
            .into_iter()
            .map(|document| {
                let error_count = document.error_count();
                let warning_count = document
                    .diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count();
                FileReport {
                    file: document.uri.clone(),
                    is_valid: error_count == 0,
                    error_count,
                    warning_count,
                    diagnostics: document
                        .diagnostics
                        .iter()
                        .map(DiagnosticJson::from_diagnostic)
                        .collect(),
                }
            })
            .collect();

        let total_errors: usize = files.iter().map(|f| f.error_count).sum();
        let total_warnings: usize = files.iter().map(|f| f.warning_count).sum();
        let files_with_errors = files.iter().filter(|f| !f.is_valid).count();

        Self {
            summary: Summary {
                total_files: files.len(),
                files_with_errors,
                total_errors,
                total_warnings,
                is_valid: total_errors == 0,
            },
            files,
        }
    }

    pub fn to_json_string(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ReportError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::analyze_named;

    #[test]
    fn test_report_shape() {
        let doc = analyze_named("bad.sysml", "part def P { part x [10..5]; }");
        let report = DiagnosticsReport::from_documents([&doc]);

        assert_eq!(report.summary.total_files, 1);
        assert_eq!(report.summary.files_with_errors, 1);
        assert!(!report.summary.is_valid);

        let value = report.to_value().unwrap();
        assert_eq!(value["files"][0]["file"], "bad.sysml");
        assert_eq!(value["files"][0]["isValid"], false);
        let diag = &value["files"][0]["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        // 1-based positions on the wire.
        assert!(diag["line"].as_u64().unwrap() >= 1);
        assert!(diag["column"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_valid_file_summary() {
        let doc = analyze_named("ok.sysml", "package P { part def A; }");
        let report = DiagnosticsReport::from_documents([&doc]);
        assert!(report.summary.is_valid);
        assert_eq!(report.summary.total_errors, 0);
    }
}
