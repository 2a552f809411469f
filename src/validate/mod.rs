//! Semantic validation over the linked AST.
//!
//! Each check runs independently and appends to the shared diagnostic
//! buffer; no check aborts the rest. The registry is built once for the
//! process.

use once_cell::sync::Lazy;

use crate::ast::{Arena, DefKind, NodeId, NodeKind, UsageKind, ValueKind};
use crate::core::diagnostics::{codes, Diagnostic};

type Check = fn(&Arena, NodeId, &mut Vec<Diagnostic>);

/// The validator registry: name + check function, in execution order.
static REGISTRY: Lazy<Vec<(&'static str, Check)>> = Lazy::new(|| {
    vec![
        ("duplicate-names-root", check_root_duplicates as Check),
        ("duplicate-names-package", check_package_duplicates),
        ("self-specialization", check_self_specialization),
        ("empty-abstract-definition", check_empty_abstract),
        ("untyped-part-usage", check_untyped_parts),
        ("multiplicity-bounds", check_multiplicity_bounds),
        ("qualified-name-wellformed", check_qualified_names),
        ("computed-attribute", check_computed_attributes),
    ]
});

/// Run every registered check.
pub fn validate_document(arena: &Arena, root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for (name, check) in REGISTRY.iter() {
        let before = diagnostics.len();
        check(arena, root, diagnostics);
        tracing::trace!(check = name, emitted = diagnostics.len() - before);
    }
}

// =============================================================================
// Ownership helpers
// =============================================================================

/// Named owned members of a membership list: (name, anchor node).
fn named_members(arena: &Arena, members: &[NodeId]) -> Vec<(String, NodeId)> {
    let mut out = Vec::new();
    for &member in members {
        match &arena.get(member).kind {
            NodeKind::OwningMembership { element, .. } => {
                if let Some(name) = arena.element_name(*element) {
                    if !name.is_empty() {
                        out.push((name.to_string(), *element));
                    }
                }
            }
            NodeKind::AliasMember { name, .. } => {
                if !name.is_empty() {
                    out.push((name.clone(), member));
                }
            }
            _ => {}
        }
    }
    out
}

// =============================================================================
// Checks
// =============================================================================

/// Duplicate names among the root namespace's owned elements: one error
/// per offending element.
fn check_root_duplicates(arena: &Arena, root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    let Some(members) = arena.body_elements(root) else {
        return;
    };
    let named = named_members(arena, members);
    for (name, element) in &named {
        let occurrences = named.iter().filter(|(n, _)| n == name).count();
        if occurrences > 1 {
            diagnostics.push(
                Diagnostic::error(
                    format!("Duplicate element name: '{}'", name),
                    arena.get(*element).span,
                )
                .with_code(codes::SEMANTIC_ERROR),
            );
        }
    }
}

/// Duplicate names inside a package body: one error, anchored at the first
/// occurrence. The root/package reporting asymmetry is deliberate.
fn check_package_duplicates(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::Package { name, elements, .. } = &arena.get(id).kind else {
            continue;
        };
        let package_name = name.clone().unwrap_or_else(|| "<anonymous>".to_string());
        let named = named_members(arena, elements);

        let mut reported = Vec::new();
        for (index, (member_name, element)) in named.iter().enumerate() {
            if reported.contains(member_name) {
                continue;
            }
            let later = named[index + 1..].iter().any(|(n, _)| n == member_name);
            if later {
                reported.push(member_name.clone());
                diagnostics.push(
                    Diagnostic::error(
                        format!(
                            "Duplicate element name '{}' in package '{}'",
                            member_name, package_name
                        ),
                        arena.get(*element).span,
                    )
                    .with_code(codes::SEMANTIC_ERROR),
                );
            }
        }
    }
}

/// A definition must not specialize itself by simple name.
fn check_self_specialization(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::Definition {
            def_kind,
            name: Some(name),
            specializations,
            ..
        } = &arena.get(id).kind
        else {
            continue;
        };
        for &spec in specializations {
            let parts = arena.qualified_name_parts(spec);
            if parts.len() == 1 && parts[0] == *name {
                diagnostics.push(
                    Diagnostic::error(
                        format!(
                            "{} '{}' cannot specialize itself",
                            def_kind.display_name(),
                            name
                        ),
                        arena.get(spec).span,
                    )
                    .with_code(codes::SEMANTIC_ERROR),
                );
            }
        }
    }
}

/// An abstract part definition with no members is probably unfinished.
fn check_empty_abstract(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::Definition {
            def_kind: DefKind::Part,
            name: Some(name),
            is_abstract: true,
            body,
            ..
        } = &arena.get(id).kind
        else {
            continue;
        };
        let empty = body.as_ref().map(|b| b.is_empty()).unwrap_or(true);
        if empty {
            diagnostics.push(
                Diagnostic::hint(
                    format!("Abstract part definition '{}' has no members", name),
                    arena.get(id).span,
                )
                .with_code(codes::VALIDATION_HINT),
            );
        }
    }
}

/// A named part usage without an explicit type is worth flagging.
fn check_untyped_parts(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::Usage {
            usage_kind: UsageKind::Part,
            name: Some(name),
            feature_types,
            ..
        } = &arena.get(id).kind
        else {
            continue;
        };
        if !name.is_empty() && feature_types.is_empty() {
            diagnostics.push(
                Diagnostic::hint(
                    format!("Part '{}' has no explicit type", name),
                    arena.get(id).span,
                )
                .with_code(codes::VALIDATION_HINT),
            );
        }
    }
}

/// Parsed value of a multiplicity bound lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Unbounded,
    Finite(i64),
}

/// Parse a bound lexeme: `*`, or an integer in decimal, hex (`0x`),
/// binary (`0b`) or octal (`0o`) notation, optionally negated.
fn parse_bound(lexeme: &str) -> Option<Bound> {
    if lexeme == "*" {
        return Some(Bound::Unbounded);
    }
    let (negative, digits) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(oct) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8).ok()?
    } else {
        digits.parse().ok()?
    };
    Some(Bound::Finite(if negative { -value } else { value }))
}

/// Lower bound must be non-negative and not exceed a finite upper bound.
fn check_multiplicity_bounds(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::MultiplicityBounds { lower, upper } = &arena.get(id).kind else {
            continue;
        };
        let span = arena.get(id).span;

        let lower_value = match lower.as_deref().map(parse_bound) {
            Some(Some(bound)) => bound,
            Some(None) => continue,
            None => Bound::Finite(0),
        };
        let upper_value = match parse_bound(upper) {
            Some(bound) => bound,
            None => continue,
        };

        if let Bound::Finite(lo) = lower_value {
            if lo < 0 {
                diagnostics.push(
                    Diagnostic::error(format!("Lower bound ({}) cannot be negative", lo), span)
                        .with_code(codes::SEMANTIC_ERROR),
                );
                continue;
            }
            if let Bound::Finite(hi) = upper_value {
                if hi < 0 {
                    diagnostics.push(
                        Diagnostic::error(
                            format!("Upper bound ({}) cannot be negative", hi),
                            span,
                        )
                        .with_code(codes::SEMANTIC_ERROR),
                    );
                } else if lo > hi {
                    diagnostics.push(
                        Diagnostic::error(
                            format!(
                                "Lower bound ({}) cannot be greater than upper bound ({})",
                                lo, hi
                            ),
                            span,
                        )
                        .with_code(codes::SEMANTIC_ERROR),
                    );
                }
            }
        }
    }
}

/// Safety net: the parser never constructs empty qualified names.
fn check_qualified_names(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::QualifiedName { parts, .. } = &arena.get(id).kind else {
            continue;
        };
        if parts.is_empty() {
            diagnostics.push(
                Diagnostic::error(
                    "Qualified name must have at least one part",
                    arena.get(id).span,
                )
                .with_code(codes::SEMANTIC_ERROR),
            );
        }
    }
}

/// Safety net: `::=` without an expression is unreachable through the
/// grammar but must never pass silently.
fn check_computed_attributes(arena: &Arena, _root: NodeId, diagnostics: &mut Vec<Diagnostic>) {
    for id in arena.ids() {
        let NodeKind::Usage {
            usage_kind: UsageKind::Attribute,
            name,
            value: Some(value),
            ..
        } = &arena.get(id).kind
        else {
            continue;
        };
        if value.kind == ValueKind::Computed && value.expression.is_none() {
            let name = name.as_deref().unwrap_or("<anonymous>");
            diagnostics.push(
                Diagnostic::error(
                    format!("Computed attribute '{}' has no value expression", name),
                    arena.get(id).span,
                )
                .with_code(codes::SEMANTIC_ERROR),
            );
        }
    }
}
