//! sysmlc — a front-end compiler for SysML v2 and its KerML base.
//!
//! The pipeline, leaves first:
//!
//! ```text
//! source text → lexer → tokens → parser → AST
//!     → scope computation (exports + local scopes)
//!     → linking (qualified-name resolution)
//!     → validation → diagnostics
//! ```
//!
//! Documents advance monotonically through the build states
//! `Parsed → IndexedContent → ComputedScopes → Linked → Validated`; the
//! [`model::Model`] driver orchestrates per-document builds and the shared
//! cross-document export index.
//!
//! ```
//! let doc = sysmlc::analyze("package Vehicles { part def Vehicle; }");
//! assert!(doc.is_valid());
//! ```

pub mod ast;
pub mod core;
pub mod linker;
pub mod model;
pub mod parser;
pub mod report;
pub mod scope;
pub mod validate;

pub use ast::{Arena, NodeId, NodeKind, RefTarget};
pub use core::diagnostics::{Diagnostic, Severity};
pub use core::span::{Position, Span};
pub use model::{analyze, analyze_named, BuildState, Document, Model};
pub use parser::{parse_source, ParseOutcome};
pub use scope::{compute_scopes, ScopeIndex, ScopeProvider, SharedExports};
