//! Usage declarations: typing, multiplicity, relationship clauses, value
//! bindings, and shorthand feature members (`:>> port = 3000;`).

use super::expressions::parse_expression;
use super::helpers::{parse_identification, parse_qualified_name_list};
use super::namespace::parse_body;
use crate::ast::{Direction, NodeId, NodeKind, UsageKind, ValueBinding, ValueKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Prefix modifiers collected before the kind keyword.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct UsageHead {
    pub direction: Option<Direction>,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub is_derived: bool,
    pub is_end: bool,
    pub is_ref: bool,
    pub is_composite: bool,
    pub is_portion: bool,
    pub is_variant: bool,
}

/// Consume `[in|out|inout] [abstract readonly derived ref end composite
/// portion variant]*` in any order.
pub(super) fn parse_prefix_modifiers(p: &mut Parser) -> UsageHead {
    let mut head = UsageHead::default();
    loop {
        match p.current_kind() {
            // Direction keywords double as names (`in x` vs `part in;`);
            // only take them when a declaration continues afterwards.
            TokenKind::IN_KW | TokenKind::OUT_KW | TokenKind::INOUT_KW
                if p.nth(1).is_name() || super::KIND_KEYWORDS.contains(&p.nth(1)) =>
            {
                head.direction = Some(match p.current_kind() {
                    TokenKind::IN_KW => Direction::In,
                    TokenKind::OUT_KW => Direction::Out,
                    _ => Direction::Inout,
                });
                p.bump();
            }
            TokenKind::ABSTRACT_KW => {
                head.is_abstract = true;
                p.bump();
            }
            TokenKind::READONLY_KW => {
                head.is_readonly = true;
                p.bump();
            }
            TokenKind::DERIVED_KW => {
                head.is_derived = true;
                p.bump();
            }
            TokenKind::REF_KW => {
                head.is_ref = true;
                p.bump();
            }
            TokenKind::END_KW => {
                head.is_end = true;
                p.bump();
            }
            TokenKind::COMPOSITE_KW => {
                head.is_composite = true;
                p.bump();
            }
            TokenKind::PORTION_KW => {
                head.is_portion = true;
                p.bump();
            }
            TokenKind::VARIANT_KW => {
                head.is_variant = true;
                p.bump();
            }
            _ => break,
        }
    }
    head
}

/// Usage declaration after the kind keyword.
pub(super) fn parse_usage_decl(
    p: &mut Parser,
    usage_kind: UsageKind,
    head: UsageHead,
    start: crate::core::span::Position,
) -> NodeId {
    let (short_name, name) = parse_identification(p);
    parse_usage_tail(p, usage_kind, head, short_name, name, start)
}

/// Shorthand member without a kind keyword: `red;`, `x : T;`,
/// `:>> port = 3000;`, `:> base;`.
pub(super) fn parse_shorthand_member(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let head = UsageHead::default();

    let mut name = None;
    if !matches!(
        p.current_kind(),
        TokenKind::COLON_GT
            | TokenKind::COLON_GT_GT
            | TokenKind::REDEFINES_KW
            | TokenKind::SUBSETS_KW
            | TokenKind::REFERENCES_KW
    ) {
        name = super::helpers::take_name(p);
    }

    parse_usage_tail(p, UsageKind::Reference, head, None, name, start)
}

fn parse_usage_tail(
    p: &mut Parser,
    usage_kind: UsageKind,
    head: UsageHead,
    short_name: Option<String>,
    name: Option<String>,
    start: crate::core::span::Position,
) -> NodeId {
    let mut is_conjugated = false;
    let mut is_parallel = false;
    let mut feature_types = Vec::new();
    let mut multiplicity = None;
    let mut specializations = Vec::new();
    let mut subsets = Vec::new();
    let mut redefines = Vec::new();
    let mut references = Vec::new();
    let mut value = None;

    loop {
        match p.current_kind() {
            TokenKind::COLON => {
                p.bump();
                if p.eat(TokenKind::TILDE) {
                    is_conjugated = true;
                }
                if p.at_name_token() {
                    parse_qualified_name_list(p, &mut feature_types);
                } else {
                    p.error_expected(&[TokenKind::IDENT]);
                }
            }
            TokenKind::TYPED_KW => {
                p.bump();
                p.expect(TokenKind::BY_KW);
                if p.at_name_token() {
                    parse_qualified_name_list(p, &mut feature_types);
                }
            }
            TokenKind::L_BRACKET => {
                multiplicity = Some(parse_multiplicity(p));
            }
            TokenKind::COLON_GT | TokenKind::SUBSETS_KW => {
                p.bump();
                parse_qualified_name_list(p, &mut subsets);
            }
            TokenKind::COLON_GT_GT | TokenKind::REDEFINES_KW => {
                p.bump();
                parse_qualified_name_list(p, &mut redefines);
            }
            TokenKind::REFERENCES_KW => {
                p.bump();
                parse_qualified_name_list(p, &mut references);
            }
            TokenKind::SPECIALIZES_KW => {
                p.bump();
                parse_qualified_name_list(p, &mut specializations);
            }
            TokenKind::PARALLEL_KW if usage_kind == UsageKind::State => {
                p.bump();
                is_parallel = true;
            }
            TokenKind::EQ | TokenKind::COLON_EQ | TokenKind::COLON_COLON_EQ => {
                let kind = match p.current_kind() {
                    TokenKind::EQ => ValueKind::Bound,
                    TokenKind::COLON_EQ => ValueKind::Initial,
                    _ => ValueKind::Computed,
                };
                p.bump();
                let expression = Some(parse_expression(p));
                value = Some(ValueBinding { kind, expression });
                break;
            }
            _ => break,
        }
    }

    let body = parse_body(p);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Usage {
            usage_kind,
            name,
            short_name,
            direction: head.direction,
            is_abstract: head.is_abstract,
            is_readonly: head.is_readonly,
            is_derived: head.is_derived,
            is_end: head.is_end,
            is_ref: head.is_ref,
            is_composite: head.is_composite,
            is_portion: head.is_portion,
            is_variant: head.is_variant,
            is_parallel,
            is_conjugated,
            feature_types,
            multiplicity,
            specializations,
            subsets,
            redefines,
            references,
            value,
            body,
        },
        span,
    )
}

/// Multiplicity = '[' bound ('..' bound)? ']' — bounds kept as lexemes.
pub(super) fn parse_multiplicity(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // [

    let first = parse_bound(p);
    let second = if p.eat(TokenKind::DOT_DOT) {
        parse_bound(p)
    } else {
        None
    };
    p.expect(TokenKind::R_BRACKET);

    let (lower, upper) = match (first, second) {
        (Some(lo), Some(hi)) => (Some(lo), hi),
        (Some(only), None) => (None, only),
        (None, Some(hi)) => (None, hi),
        (None, None) => (None, "*".to_string()),
    };

    let span = p.span_from(start);
    p.alloc(NodeKind::MultiplicityBounds { lower, upper }, span)
}

/// One bound: `*` or an integer literal in any radix, optionally negated.
fn parse_bound(p: &mut Parser) -> Option<String> {
    if p.at(TokenKind::STAR) {
        p.bump();
        return Some("*".to_string());
    }
    let negative = p.eat(TokenKind::MINUS);
    if p.current_kind().is_integer_literal() {
        let text = p.bump_text();
        return Some(if negative {
            format!("-{}", text)
        } else {
            text.to_string()
        });
    }
    if negative || !p.at(TokenKind::R_BRACKET) {
        p.error_expected(&[TokenKind::DEC_INTEGER, TokenKind::STAR]);
        p.recover(&[TokenKind::R_BRACKET]);
    }
    None
}
