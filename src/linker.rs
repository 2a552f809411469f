//! Reference linking: after scope computation, every `QualifiedName` in a
//! reference position is resolved through the scope provider and its
//! target recorded on the node. Unresolved references stay unresolved; no
//! diagnostic is emitted here and later segments of a failed path are
//! simply left alone.

use crate::ast::{Arena, NodeId, NodeKind};
use crate::scope::{ScopeIndex, ScopeProvider, SharedExports};

/// Resolve all references in a document. Returns the number of references
/// that resolved.
pub fn link_document(
    arena: &mut Arena,
    index: &ScopeIndex,
    shared: Option<&SharedExports>,
    uri: Option<&str>,
) -> usize {
    let mut resolved = Vec::new();
    {
        let provider = ScopeProvider::new(arena, index, shared, uri);
        for id in arena.ids() {
            let NodeKind::QualifiedName { parts, target } = &arena.get(id).kind else {
                continue;
            };
            if target.is_some() || parts.is_empty() {
                continue;
            }
            let parts = parts.clone();
            if let Some(found) = provider.resolve(id, &parts) {
                resolved.push((id, found));
            }
        }
    }

    let count = resolved.len();
    for (id, target) in resolved {
        arena.set_reference_target(id, target);
    }
    tracing::debug!(resolved = count, "linked document");
    count
}

/// Re-resolve one reference on demand (post-link queries).
pub fn resolve_reference(
    arena: &Arena,
    index: &ScopeIndex,
    shared: Option<&SharedExports>,
    uri: Option<&str>,
    reference: NodeId,
) -> Option<crate::ast::RefTarget> {
    let parts = arena.qualified_name_parts(reference).to_vec();
    ScopeProvider::new(arena, index, shared, uri).resolve(reference, &parts)
}
