//! Scope computation: the two per-document traversals.
//!
//! Exports walk the public membership tree accumulating a qualified-name
//! prefix; every exported element is listed both under its simple name and
//! its full `A::B::C` path. Local scopes record, for every container node,
//! the immediately-enclosed named elements regardless of visibility.
//! Both traversals are idempotent: recomputation clears previous results.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Arena, NodeId, NodeKind, Visibility};

/// The per-document scope index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeIndex {
    /// Publicly visible names: simple and fully-qualified entries. First
    /// insertion wins so resolution and the export table always agree.
    pub exports: IndexMap<String, NodeId>,
    /// Container node → immediately-enclosed named elements.
    pub local_scopes: HashMap<NodeId, IndexMap<String, NodeId>>,
    /// Canonical qualified name of every named element reachable through
    /// named containers (any visibility).
    pub qualified_names: HashMap<NodeId, String>,
}

impl ScopeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immediate named members of a container.
    pub fn local_scope(&self, container: NodeId) -> Option<&IndexMap<String, NodeId>> {
        self.local_scopes.get(&container)
    }

    pub fn qualified_name(&self, node: NodeId) -> Option<&str> {
        self.qualified_names.get(&node).map(String::as_str)
    }
}

/// Compute exports and canonical qualified names (the IndexedContent stage).
pub fn compute_exports(arena: &Arena, root: NodeId, index: &mut ScopeIndex) {
    index.exports.clear();
    index.qualified_names.clear();
    let mut prefix = Vec::new();
    if let Some(elements) = arena.body_elements(root) {
        export_members(arena, elements, &mut prefix, index, true);
    }
    tracing::debug!(exports = index.exports.len(), "computed exports");
}

fn export_members(
    arena: &Arena,
    members: &[NodeId],
    prefix: &mut Vec<String>,
    index: &mut ScopeIndex,
    exported: bool,
) {
    for &member in members {
        let visibility = arena.membership_visibility(member);
        match &arena.get(member).kind {
            NodeKind::OwningMembership { element, .. } => {
                let element = *element;
                let Some(name) = arena.element_name(element).map(str::to_string) else {
                    continue;
                };
                record_qualified_name(element, &name, prefix, index);

                // Private and protected memberships terminate export
                // descent; canonical names keep descending for in-document
                // lookups.
                let child_exported = exported && visibility == Visibility::Public;
                if child_exported {
                    export_entry(&name, prefix, element, index);
                }
                if arena.body_elements(element).is_some() {
                    prefix.push(name);
                    if let Some(body) = arena.body_elements(element) {
                        export_members(arena, body, prefix, index, child_exported);
                    }
                    prefix.pop();
                }
            }
            NodeKind::AliasMember { name, .. } => {
                record_qualified_name(member, name, prefix, index);
                if exported && visibility == Visibility::Public {
                    let name = name.clone();
                    export_entry(&name, prefix, member, index);
                }
            }
            // Imports contribute to lookup scopes, not to exports.
            _ => {}
        }
    }
}

fn record_qualified_name(
    element: NodeId,
    name: &str,
    prefix: &[String],
    index: &mut ScopeIndex,
) {
    let qualified = if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), name)
    };
    index.qualified_names.insert(element, qualified);
}

fn export_entry(name: &str, prefix: &[String], element: NodeId, index: &mut ScopeIndex) {
    index
        .exports
        .entry(name.to_string())
        .or_insert(element);
    if !prefix.is_empty() {
        let qualified = format!("{}::{}", prefix.join("::"), name);
        index.exports.entry(qualified).or_insert(element);
    }
}

/// Compute local scopes for every container (the ComputedScopes stage).
pub fn compute_local_scopes(arena: &Arena, root: NodeId, index: &mut ScopeIndex) {
    index.local_scopes.clear();
    index_container(arena, root, index);
}

fn index_container(arena: &Arena, container: NodeId, index: &mut ScopeIndex) {
    let Some(members) = arena.body_elements(container) else {
        return;
    };

    let mut scope = IndexMap::new();
    for &member in members {
        match &arena.get(member).kind {
            NodeKind::OwningMembership { element, .. } => {
                if let Some(name) = arena.element_name(*element) {
                    scope.entry(name.to_string()).or_insert(*element);
                }
            }
            NodeKind::AliasMember { name, .. } => {
                scope.entry(name.clone()).or_insert(member);
            }
            _ => {}
        }
    }
    index.local_scopes.insert(container, scope);

    // Recurse into every owned element that is itself a container.
    for &member in members {
        if let Some(element) = arena.membership_element(member) {
            if arena.body_elements(element).is_some() {
                index_container(arena, element, index);
            }
        }
    }
}

/// Run both traversals.
pub fn compute_scopes(arena: &Arena, root: NodeId) -> ScopeIndex {
    let mut index = ScopeIndex::new();
    compute_exports(arena, root, &mut index);
    compute_local_scopes(arena, root, &mut index);
    index
}
