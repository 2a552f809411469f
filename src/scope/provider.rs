//! Reference resolution.
//!
//! The effective scope of a lookup is built lazily per reference: the
//! container chain of the reference site (inner shadows outer; at each
//! level local names are consulted before that level's imports), the
//! document's exports, and finally the process-wide shared exports.
//! Qualified names resolve one segment per step; a failure at segment k
//! leaves the reference unresolved without aborting anything.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use super::compute::ScopeIndex;
use crate::ast::{Arena, NodeId, NodeKind, RefTarget, Visibility};

/// Process-wide aggregation of every known document's exports.
///
/// Writes are serialised by the build driver; lookups are first-wins in
/// document insertion order.
#[derive(Debug, Clone, Default)]
pub struct SharedExports {
    /// Exported name (simple or qualified) → (document uri, node).
    entries: IndexMap<String, (String, NodeId)>,
    /// Canonical qualified names per document, for child lookups.
    canonical: HashMap<String, HashMap<NodeId, String>>,
}

impl SharedExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish one document's exports, replacing its previous entries.
    pub fn publish(&mut self, uri: &str, index: &ScopeIndex) {
        self.remove_document(uri);
        for (name, node) in &index.exports {
            self.entries
                .entry(name.clone())
                .or_insert_with(|| (uri.to_string(), *node));
        }
        self.canonical
            .insert(uri.to_string(), index.qualified_names.clone());
    }

    /// Drop every entry originating from a document.
    pub fn remove_document(&mut self, uri: &str) {
        self.entries.retain(|_, (owner, _)| owner != uri);
        self.canonical.remove(uri);
    }

    pub fn lookup(&self, name: &str) -> Option<(&str, NodeId)> {
        self.entries
            .get(name)
            .map(|(uri, node)| (uri.as_str(), *node))
    }

    /// Canonical qualified name of a node in a published document.
    pub fn canonical_name(&self, uri: &str, node: NodeId) -> Option<&str> {
        self.canonical
            .get(uri)
            .and_then(|names| names.get(&node))
            .map(String::as_str)
    }

    /// Direct child of a foreign namespace: `parent::name` must itself be
    /// exported by the same document.
    pub fn lookup_child(&self, uri: &str, parent_qname: &str, name: &str) -> Option<NodeId> {
        let key = format!("{}::{}", parent_qname, name);
        match self.entries.get(&key) {
            Some((owner, node)) if owner == uri => Some(*node),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Internal resolution cursor: a target plus its canonical qualified name
/// when known (needed for foreign child lookups).
#[derive(Debug, Clone)]
struct Cursor {
    target: RefTarget,
    qname: Option<String>,
}

/// Resolves references for one document.
pub struct ScopeProvider<'a> {
    arena: &'a Arena,
    index: &'a ScopeIndex,
    shared: Option<&'a SharedExports>,
    /// This document's uri; shared-export hits on it become local targets.
    uri: Option<&'a str>,
}

impl<'a> ScopeProvider<'a> {
    pub fn new(
        arena: &'a Arena,
        index: &'a ScopeIndex,
        shared: Option<&'a SharedExports>,
        uri: Option<&'a str>,
    ) -> Self {
        Self {
            arena,
            index,
            shared,
            uri,
        }
    }

    /// Resolve a qualified name from a reference site. `context` is the
    /// referencing node (usually the `QualifiedName` itself); the container
    /// chain is walked from there.
    pub fn resolve(&self, context: NodeId, parts: &[String]) -> Option<RefTarget> {
        if parts.is_empty() {
            return None;
        }
        let mut visited = self.initial_visited(context);
        self.resolve_with_visited(context, parts, &mut visited)
    }

    fn resolve_with_visited(
        &self,
        context: NodeId,
        parts: &[String],
        visited: &mut HashSet<NodeId>,
    ) -> Option<RefTarget> {
        let mut cursor = self.resolve_first(context, &parts[0], visited)?;
        cursor = self.deref_alias(cursor, visited)?;

        for part in &parts[1..] {
            cursor = self.resolve_next(&cursor, part, context)?;
            cursor = self.deref_alias(cursor, visited)?;
        }
        Some(cursor.target)
    }

    /// When the reference sits inside an import or alias, that member must
    /// not be consulted while resolving its own path.
    fn initial_visited(&self, context: NodeId) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut current = Some(context);
        while let Some(node) = current {
            match &self.arena.get(node).kind {
                NodeKind::ImportMembership { .. } | NodeKind::AliasMember { .. } => {
                    visited.insert(node);
                }
                _ => {}
            }
            current = self.arena.get(node).parent;
        }
        visited
    }

    // =========================================================================
    // First segment
    // =========================================================================

    fn resolve_first(
        &self,
        context: NodeId,
        name: &str,
        visited: &mut HashSet<NodeId>,
    ) -> Option<Cursor> {
        // (a)+(c) container chain, inner scopes shadowing outer ones; at
        // each level the local names win over that level's imports.
        let mut chain = Vec::new();
        if self.arena.is_container(context) {
            chain.push(context);
        }
        chain.extend(
            self.arena
                .ancestors(context)
                .filter(|id| self.arena.is_container(*id)),
        );

        for container in &chain {
            if let Some(scope) = self.index.local_scope(*container) {
                if let Some(node) = scope.get(name) {
                    return Some(self.local_cursor(*node));
                }
            }
            if let Some(cursor) = self.lookup_imports(*container, name, visited) {
                return Some(cursor);
            }
        }
        // (b) document-wide exports.
        if let Some(node) = self.index.exports.get(name) {
            return Some(self.local_cursor(*node));
        }
        // (d) shared cross-document exports.
        if let Some(shared) = self.shared {
            if let Some((uri, node)) = shared.lookup(name) {
                return Some(self.foreign_cursor(uri, node));
            }
        }
        None
    }

    // =========================================================================
    // Subsequent segments: direct children of the resolved namespace
    // =========================================================================

    fn resolve_next(&self, cursor: &Cursor, name: &str, context: NodeId) -> Option<Cursor> {
        match &cursor.target.document {
            None => {
                let namespace = cursor.target.node;
                let scope = self.index.local_scope(namespace)?;
                let child = *scope.get(name)?;
                if self.child_visible(namespace, child, context) {
                    Some(self.local_cursor(child))
                } else {
                    None
                }
            }
            Some(uri) => {
                let shared = self.shared?;
                let parent_qname = cursor.qname.as_deref()?;
                let child = shared.lookup_child(uri, parent_qname, name)?;
                Some(Cursor {
                    target: RefTarget::foreign(uri.clone(), child),
                    qname: Some(format!("{}::{}", parent_qname, name)),
                })
            }
        }
    }

    /// Qualified access reaches public members from anywhere; private and
    /// protected members only from within their own container's body
    /// (protected also from containers nested inside it).
    fn child_visible(&self, parent: NodeId, child: NodeId, context: NodeId) -> bool {
        if self.member_visibility(child) == Visibility::Public {
            return true;
        }
        context == parent || self.arena.ancestors(context).any(|a| a == parent)
    }

    fn member_visibility(&self, element: NodeId) -> Visibility {
        if matches!(self.arena.get(element).kind, NodeKind::AliasMember { .. }) {
            return self.arena.membership_visibility(element);
        }
        match self.arena.get(element).parent {
            Some(parent) => self.arena.membership_visibility(parent),
            None => Visibility::Public,
        }
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn lookup_imports(
        &self,
        container: NodeId,
        name: &str,
        visited: &mut HashSet<NodeId>,
    ) -> Option<Cursor> {
        let members = self.arena.body_elements(container)?;
        for &member in members {
            let NodeKind::ImportMembership {
                is_all, import_ref, ..
            } = &self.arena.get(member).kind
            else {
                continue;
            };
            if visited.contains(&member) {
                continue;
            }
            visited.insert(member);
            let found = self.lookup_one_import(container, *import_ref, *is_all, name, visited);
            visited.remove(&member);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn lookup_one_import(
        &self,
        container: NodeId,
        import_ref: NodeId,
        is_all: bool,
        name: &str,
        visited: &mut HashSet<NodeId>,
    ) -> Option<Cursor> {
        let NodeKind::ImportRef {
            path,
            is_wildcard,
            is_recursive,
        } = &self.arena.get(import_ref).kind
        else {
            return None;
        };
        let (path, is_wildcard, is_recursive) = (*path, *is_wildcard, *is_recursive);
        let parts = self.arena.qualified_name_parts(path).to_vec();
        if parts.is_empty() {
            return None;
        }

        if !is_wildcard && !is_all {
            // `import X::Y` binds the single simple name `Y`.
            if parts.last().map(String::as_str) != Some(name) {
                return None;
            }
            let target = self.resolve_with_visited(container, &parts, visited)?;
            let qname = self.qname_of_target(&target);
            return Some(Cursor { target, qname });
        }

        // Wildcard (or `import all X`, which is `X::*` extended to hidden
        // members): resolve the base namespace, then search its children.
        let base = self.resolve_with_visited(container, &parts, visited)?;
        let base_cursor = Cursor {
            qname: self.qname_of_target(&base),
            target: base,
        };
        if is_recursive {
            self.find_descendant(&base_cursor, name, is_all)
        } else {
            self.find_direct_child(&base_cursor, name, is_all)
        }
    }

    fn find_direct_child(&self, base: &Cursor, name: &str, include_hidden: bool) -> Option<Cursor> {
        match &base.target.document {
            None => {
                let scope = self.index.local_scope(base.target.node)?;
                let child = *scope.get(name)?;
                if include_hidden || self.member_visibility(child) == Visibility::Public {
                    Some(self.local_cursor(child))
                } else {
                    None
                }
            }
            Some(uri) => {
                // Cross-document `all` degrades to public-only (exports).
                let shared = self.shared?;
                let parent_qname = base.qname.as_deref()?;
                let child = shared.lookup_child(uri, parent_qname, name)?;
                Some(Cursor {
                    target: RefTarget::foreign(uri.clone(), child),
                    qname: Some(format!("{}::{}", parent_qname, name)),
                })
            }
        }
    }

    /// `import X::**`: any transitively-reachable public descendant, bound
    /// under the simple tail of its qualified name.
    fn find_descendant(&self, base: &Cursor, name: &str, include_hidden: bool) -> Option<Cursor> {
        match &base.target.document {
            None => self.find_descendant_local(base.target.node, name, include_hidden),
            Some(uri) => {
                let shared = self.shared?;
                let prefix = format!("{}::", base.qname.as_deref()?);
                shared
                    .entries
                    .iter()
                    .find(|(qname, (owner, _))| {
                        owner == uri
                            && qname.starts_with(&prefix)
                            && qname.rsplit("::").next() == Some(name)
                    })
                    .map(|(qname, (owner, node))| Cursor {
                        target: RefTarget::foreign(owner.clone(), *node),
                        qname: Some(qname.clone()),
                    })
            }
        }
    }

    fn find_descendant_local(
        &self,
        namespace: NodeId,
        name: &str,
        include_hidden: bool,
    ) -> Option<Cursor> {
        let scope = self.index.local_scope(namespace)?;
        for (child_name, &child) in scope {
            let visible = include_hidden || self.member_visibility(child) == Visibility::Public;
            if !visible {
                continue;
            }
            if child_name == name {
                return Some(self.local_cursor(child));
            }
            if self.arena.body_elements(child).is_some() {
                if let Some(found) = self.find_descendant_local(child, name, include_hidden) {
                    return Some(found);
                }
            }
        }
        None
    }

    // =========================================================================
    // Aliases
    // =========================================================================

    /// Follow alias members to their targets; cycles resolve to nothing.
    fn deref_alias(&self, cursor: Cursor, visited: &mut HashSet<NodeId>) -> Option<Cursor> {
        if cursor.target.document.is_some() {
            // Foreign aliases cannot be chased without their arena; the
            // alias node itself stands in.
            return Some(cursor);
        }
        let node = cursor.target.node;
        let NodeKind::AliasMember { target, .. } = &self.arena.get(node).kind else {
            return Some(cursor);
        };
        if visited.contains(&node) {
            tracing::trace!(alias = node.index(), "alias cycle");
            return None;
        }
        visited.insert(node);
        let parts = self.arena.qualified_name_parts(*target).to_vec();
        let resolved = self.resolve_with_visited(node, &parts, visited);
        visited.remove(&node);

        let target = resolved?;
        let qname = self.qname_of_target(&target);
        self.deref_alias(Cursor { target, qname }, visited)
    }

    // =========================================================================
    // Cursor helpers
    // =========================================================================

    fn local_cursor(&self, node: NodeId) -> Cursor {
        Cursor {
            qname: self.index.qualified_name(node).map(str::to_string),
            target: RefTarget::local(node),
        }
    }

    fn foreign_cursor(&self, uri: &str, node: NodeId) -> Cursor {
        if Some(uri) == self.uri {
            return self.local_cursor(node);
        }
        let qname = self
            .shared
            .and_then(|s| s.canonical_name(uri, node))
            .map(str::to_string);
        Cursor {
            target: RefTarget::foreign(uri, node),
            qname,
        }
    }

    fn qname_of_target(&self, target: &RefTarget) -> Option<String> {
        match &target.document {
            None => self.index.qualified_name(target.node).map(str::to_string),
            Some(uri) => self
                .shared
                .and_then(|s| s.canonical_name(uri, target.node))
                .map(str::to_string),
        }
    }
}
