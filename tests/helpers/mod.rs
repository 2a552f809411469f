//! Shared test helpers: pipeline runners and AST lookups.
#![allow(dead_code)]

use sysmlc::core::diagnostics::Severity;
use sysmlc::{analyze_named, Diagnostic, Document, NodeId, NodeKind};

/// Run the full pipeline on one in-memory document.
pub fn analyze_src(source: &str) -> Document {
    analyze_named("test.sysml", source)
}

/// Run the pipeline and assert the document came out clean.
pub fn analyze_ok(source: &str) -> Document {
    let document = analyze_src(source);
    assert!(
        document.is_valid(),
        "expected no errors, got: {:#?}",
        errors(&document)
    );
    document
}

pub fn errors(document: &Document) -> Vec<&Diagnostic> {
    document.diagnostics.iter().filter(|d| d.is_error()).collect()
}

pub fn warnings(document: &Document) -> Vec<&Diagnostic> {
    document
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect()
}

pub fn hints(document: &Document) -> Vec<&Diagnostic> {
    document
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Hint)
        .collect()
}

/// Find the first definition node with the given name.
pub fn find_definition(document: &Document, name: &str) -> NodeId {
    document
        .arena
        .ids()
        .find(|&id| {
            matches!(
                &document.arena.get(id).kind,
                NodeKind::Definition { name: Some(n), .. } if n == name
            )
        })
        .unwrap_or_else(|| panic!("no definition named '{}'", name))
}

/// Find the first usage node with the given name.
pub fn find_usage(document: &Document, name: &str) -> NodeId {
    document
        .arena
        .ids()
        .find(|&id| {
            matches!(
                &document.arena.get(id).kind,
                NodeKind::Usage { name: Some(n), .. } if n == name
            )
        })
        .unwrap_or_else(|| panic!("no usage named '{}'", name))
}

/// Find the first package node with the given name.
pub fn find_package(document: &Document, name: &str) -> NodeId {
    document
        .arena
        .ids()
        .find(|&id| {
            matches!(
                &document.arena.get(id).kind,
                NodeKind::Package { name: Some(n), .. } if n == name
            )
        })
        .unwrap_or_else(|| panic!("no package named '{}'", name))
}

/// The specialization targets of a definition, as resolved node ids
/// (unresolved references yield no entry).
pub fn resolved_specializations(document: &Document, def: NodeId) -> Vec<NodeId> {
    let NodeKind::Definition { specializations, .. } = &document.arena.get(def).kind else {
        panic!("not a definition");
    };
    specializations
        .iter()
        .filter_map(|&qn| document.arena.reference_target(qn))
        .filter(|t| t.document.is_none())
        .map(|t| t.node)
        .collect()
}
