pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, Severity};
pub use span::{Position, Span};
