//! Document store and build driver.
//!
//! Each document advances monotonically through the build states; a stage
//! never runs twice for the same build of the same document. Parsing a
//! batch fans out across threads; writes to the shared export index are
//! serialised in the driver. Removing a document between stages makes
//! later stage requests for it a no-op.

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::ast::{Arena, NodeId};
use crate::core::diagnostics::{error_count, Diagnostic};
use crate::linker::link_document;
use crate::parser::parse_source;
use crate::scope::{compute_exports, compute_local_scopes, ScopeIndex, SharedExports};
use crate::validate::validate_document;

/// Build pipeline states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildState {
    Parsed,
    IndexedContent,
    ComputedScopes,
    Linked,
    Validated,
}

impl BuildState {
    /// All states after `Parsed`, in pipeline order.
    const SEQUENCE: [BuildState; 4] = [
        BuildState::IndexedContent,
        BuildState::ComputedScopes,
        BuildState::Linked,
        BuildState::Validated,
    ];
}

/// Source dialect, decided by file extension. Both dialects share the
/// grammar; the tag is carried for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sysml,
    Kerml,
}

impl Dialect {
    pub fn from_uri(uri: &str) -> Self {
        if uri.ends_with(".kerml") {
            Dialect::Kerml
        } else {
            Dialect::Sysml
        }
    }
}

/// One source document and everything derived from it. The AST, scope
/// index and diagnostic buffer form a single ownership group whose
/// lifetime ends when the document leaves the model.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: String,
    pub text: String,
    pub dialect: Dialect,
    pub arena: Arena,
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
    pub scopes: ScopeIndex,
    pub state: BuildState,
}

impl Document {
    /// Lex and parse a document (the `Parsed` state).
    pub fn parse(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let uri = uri.into();
        let text = text.into();
        let outcome = parse_source(&text);
        tracing::debug!(
            uri = %uri,
            nodes = outcome.arena.len(),
            errors = error_count(&outcome.diagnostics),
            "parsed document"
        );
        Self {
            dialect: Dialect::from_uri(&uri),
            uri,
            text,
            arena: outcome.arena,
            root: outcome.root,
            diagnostics: outcome.diagnostics,
            scopes: ScopeIndex::new(),
            state: BuildState::Parsed,
        }
    }

    /// `true` iff the document has no error-severity diagnostics.
    pub fn is_valid(&self) -> bool {
        error_count(&self.diagnostics) == 0
    }

    pub fn error_count(&self) -> usize {
        error_count(&self.diagnostics)
    }
}

/// The in-memory multi-document model.
#[derive(Debug, Default)]
pub struct Model {
    documents: IndexMap<String, Document>,
    shared: SharedExports,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register one document. Replaces any previous content
    /// under the same uri.
    pub fn add_document(&mut self, uri: impl Into<String>, text: impl Into<String>) -> &Document {
        let document = Document::parse(uri, text);
        let uri = document.uri.clone();
        self.shared.remove_document(&uri);
        self.documents.insert(uri.clone(), document);
        self.documents.get(&uri).expect("document was just inserted")
    }

    /// Parse a batch in parallel; registration stays in input order so the
    /// shared index remains deterministic.
    pub fn add_documents(&mut self, batch: Vec<(String, String)>) {
        let parsed: Vec<Document> = batch
            .into_par_iter()
            .map(|(uri, text)| Document::parse(uri, text))
            .collect();
        for document in parsed {
            self.shared.remove_document(&document.uri);
            self.documents.insert(document.uri.clone(), document);
        }
    }

    /// Remove a document; its AST, scopes and diagnostics go with it, and
    /// its exports leave the shared index.
    pub fn remove_document(&mut self, uri: &str) -> Option<Document> {
        self.shared.remove_document(uri);
        self.documents.shift_remove(uri)
    }

    pub fn document(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn shared_exports(&self) -> &SharedExports {
        &self.shared
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Advance one document to (at least) the target state. A removed uri
    /// is a no-op. Already-reached states never rerun.
    pub fn build_to(&mut self, uri: &str, target: BuildState) {
        for stage in BuildState::SEQUENCE {
            if stage > target {
                break;
            }
            self.run_stage(uri, stage);
        }
    }

    /// Advance every document to `Validated`, stage by stage across the
    /// whole model so cross-document references see all exports.
    pub fn build_all(&mut self) {
        let uris: Vec<String> = self.documents.keys().cloned().collect();
        for stage in BuildState::SEQUENCE {
            for uri in &uris {
                self.run_stage(uri, stage);
            }
        }
    }

    fn run_stage(&mut self, uri: &str, stage: BuildState) {
        let Some(document) = self.documents.get_mut(uri) else {
            return;
        };
        if document.state >= stage {
            return;
        }

        match stage {
            BuildState::Parsed => {}
            BuildState::IndexedContent => {
                compute_exports(&document.arena, document.root, &mut document.scopes);
                self.shared.publish(&document.uri, &document.scopes);
            }
            BuildState::ComputedScopes => {
                compute_local_scopes(&document.arena, document.root, &mut document.scopes);
            }
            BuildState::Linked => {
                link_document(
                    &mut document.arena,
                    &document.scopes,
                    Some(&self.shared),
                    Some(uri),
                );
            }
            BuildState::Validated => {
                validate_document(&document.arena, document.root, &mut document.diagnostics);
            }
        }
        if let Some(document) = self.documents.get_mut(uri) {
            document.state = stage;
        }
    }
}

/// Run the full pipeline on a single in-memory document.
pub fn analyze(text: &str) -> Document {
    analyze_named("memory.sysml", text)
}

/// Run the full pipeline on a single named document.
pub fn analyze_named(uri: &str, text: &str) -> Document {
    let mut model = Model::new();
    model.add_document(uri, text);
    model.build_to(uri, BuildState::Validated);
    model
        .remove_document(uri)
        .expect("document was just added")
}
