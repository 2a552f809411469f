//! Reporters: thin adapters from the diagnostic buffer to the three
//! output contracts (human text, diagnostic JSON, SARIF 2.1.0). These are
//! the library halves of the CLI's `-f` flags; the CLI itself lives
//! elsewhere.

pub mod json;
pub mod sarif;
pub mod text;

use thiserror::Error;

pub use json::DiagnosticsReport;
pub use sarif::sarif_report;
pub use text::render_text;

/// Errors from report serialization.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
