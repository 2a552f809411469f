//! Definition declarations and the definition/usage split.
//!
//! `part def X` vs `part X` is decided by one token of lookahead after the
//! kind keyword; everything else about the two shapes is shared with
//! `usages.rs`.

use super::helpers::parse_identification;
use super::namespace::parse_body;
use super::usages::{self, UsageHead};
use crate::ast::{DefKind, NodeId, NodeKind, UsageKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Entry point from the dispatcher: prefix modifiers, kind keyword(s),
/// then a definition (`def` present) or a usage.
pub(super) fn parse_definition_or_usage(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let head = usages::parse_prefix_modifiers(p);

    match take_kind(p) {
        Some((Some(def_kind), _)) if p.at(TokenKind::DEF_KW) && !def_token_is_name(p) => {
            p.bump();
            parse_definition_decl(p, def_kind, head, start)
        }
        Some((None, usage_kind)) if p.at(TokenKind::DEF_KW) && !def_token_is_name(p) => {
            // `subject def` and friends have no definition form.
            p.error("this kind has no definition form");
            p.bump();
            usages::parse_usage_decl(p, usage_kind, head, start)
        }
        Some((_, usage_kind)) => usages::parse_usage_decl(p, usage_kind, head, start),
        None => {
            // Bare modifiers: `ref x;`, `in x : T;`, `end e;`.
            usages::parse_usage_decl(p, UsageKind::Reference, head, start)
        }
    }
}

/// `attribute def : String;` names an attribute `def`; a `def` marker is
/// only a marker when a typing or value clause does not follow directly.
fn def_token_is_name(p: &Parser) -> bool {
    matches!(
        p.nth(1),
        TokenKind::COLON
            | TokenKind::COLON_EQ
            | TokenKind::COLON_COLON_EQ
            | TokenKind::EQ
            | TokenKind::L_BRACKET
    )
}

/// Consume the kind keyword(s) and map them to definition and usage kinds.
/// Returns `None` when the current token does not introduce a kind.
fn take_kind(p: &mut Parser) -> Option<(Option<DefKind>, UsageKind)> {
    let single = |def: DefKind, usage: UsageKind| (Some(def), usage);
    let pair = match p.current_kind() {
        TokenKind::PART_KW => single(DefKind::Part, UsageKind::Part),
        TokenKind::ITEM_KW => single(DefKind::Item, UsageKind::Item),
        TokenKind::ATTRIBUTE_KW => single(DefKind::Attribute, UsageKind::Attribute),
        TokenKind::ENUM_KW | TokenKind::ENUMERATION_KW => {
            single(DefKind::Enumeration, UsageKind::Enumeration)
        }
        TokenKind::ACTION_KW => single(DefKind::Action, UsageKind::Action),
        TokenKind::STATE_KW => single(DefKind::State, UsageKind::State),
        TokenKind::CONSTRAINT_KW => single(DefKind::Constraint, UsageKind::Constraint),
        TokenKind::REQUIREMENT_KW => single(DefKind::Requirement, UsageKind::Requirement),
        TokenKind::PORT_KW => single(DefKind::Port, UsageKind::Port),
        TokenKind::CONNECTION_KW => single(DefKind::Connection, UsageKind::Connection),
        TokenKind::INTERFACE_KW => single(DefKind::Interface, UsageKind::Interface),
        TokenKind::FLOW_KW => single(DefKind::FlowConnection, UsageKind::Connection),
        TokenKind::ALLOCATION_KW => single(DefKind::Allocation, UsageKind::Allocation),
        TokenKind::CALC_KW => single(DefKind::Calculation, UsageKind::Calculation),
        TokenKind::CASE_KW => single(DefKind::Case, UsageKind::Case),
        TokenKind::VIEW_KW => single(DefKind::View, UsageKind::View),
        TokenKind::VIEWPOINT_KW => single(DefKind::Viewpoint, UsageKind::Viewpoint),
        TokenKind::RENDERING_KW => single(DefKind::Rendering, UsageKind::Rendering),
        TokenKind::METADATA_KW => single(DefKind::Metadata, UsageKind::Metadata),
        TokenKind::OCCURRENCE_KW => single(DefKind::Occurrence, UsageKind::Occurrence),
        TokenKind::CONCERN_KW => single(DefKind::Concern, UsageKind::Concern),

        TokenKind::ANALYSIS_KW => {
            p.bump();
            p.eat(TokenKind::CASE_KW);
            return Some((Some(DefKind::AnalysisCase), UsageKind::AnalysisCase));
        }
        TokenKind::VERIFICATION_KW => {
            p.bump();
            p.eat(TokenKind::CASE_KW);
            return Some((
                Some(DefKind::VerificationCase),
                UsageKind::VerificationCase,
            ));
        }
        TokenKind::USE_KW if p.nth(1) == TokenKind::CASE_KW => {
            p.bump();
            p.bump();
            return Some((Some(DefKind::UseCase), UsageKind::UseCase));
        }

        TokenKind::SUBJECT_KW => {
            p.bump();
            return Some((None, UsageKind::Subject));
        }
        TokenKind::ACTOR_KW => {
            p.bump();
            return Some((None, UsageKind::Actor));
        }
        TokenKind::RETURN_KW => {
            p.bump();
            return Some((None, UsageKind::Return));
        }
        TokenKind::REQUIRE_KW => {
            p.bump();
            p.eat(TokenKind::CONSTRAINT_KW);
            return Some((None, UsageKind::Constraint));
        }

        _ => return None,
    };
    p.bump();
    Some(pair)
}

/// Definition head after `def`: identification, specializations, disjoint
/// and conjugation clauses, then `;` or a type body.
pub(super) fn parse_definition_decl(
    p: &mut Parser,
    def_kind: DefKind,
    head: UsageHead,
    start: crate::core::span::Position,
) -> NodeId {
    let (short_name, name) = parse_identification(p);

    let mut specializations = Vec::new();
    let mut disjoint_from = Vec::new();
    let mut conjugates = None;
    let mut is_parallel = false;

    loop {
        match p.current_kind() {
            TokenKind::COLON_GT | TokenKind::SPECIALIZES_KW => {
                p.bump();
                super::helpers::parse_qualified_name_list(p, &mut specializations);
            }
            TokenKind::DISJOINT_KW => {
                p.bump();
                p.eat(TokenKind::FROM_KW);
                super::helpers::parse_qualified_name_list(p, &mut disjoint_from);
            }
            TokenKind::CONJUGATE_KW => {
                p.bump();
                conjugates = Some(super::helpers::parse_qualified_name(p));
            }
            TokenKind::PARALLEL_KW if def_kind == DefKind::State => {
                p.bump();
                is_parallel = true;
            }
            _ => break,
        }
    }

    let body = parse_body(p);

    let span = p.span_from(start);
    let id = p.alloc_adopting(
        NodeKind::Definition {
            def_kind,
            name,
            short_name,
            is_abstract: head.is_abstract,
            is_parallel,
            specializations,
            disjoint_from,
            conjugates,
            body,
        },
        span,
    );

    if def_kind == DefKind::Enumeration {
        promote_enum_variants(p, id);
    }
    id
}

/// Inside `enum def` bodies, bare `red;` members parse as shorthand
/// reference usages; retag them as enumeration usages.
fn promote_enum_variants(p: &mut Parser, def_id: NodeId) {
    let members: Vec<NodeId> = p
        .arena()
        .body_elements(def_id)
        .map(|m| m.to_vec())
        .unwrap_or_default();
    for member in members {
        let Some(element) = p.arena().membership_element(member) else {
            continue;
        };
        if let NodeKind::Usage { usage_kind, .. } = &mut p.arena_mut().get_mut(element).kind {
            if *usage_kind == UsageKind::Reference {
                *usage_kind = UsageKind::Enumeration;
            }
        }
    }
}
