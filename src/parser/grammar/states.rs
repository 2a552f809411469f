//! State-machine members: transitions, successions, and the entry / exit /
//! do actions of state bodies.

use super::definitions::parse_definition_or_usage;
use super::expressions::parse_expression;
use super::helpers::parse_qualified_name;
use crate::ast::{NodeId, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Transition = 'transition' name? segments ';'
///
/// Segments (`first`, `accept`, `if`, `do`, `then`) are accepted in any
/// order, one of each; the node stores them by role.
pub(super) fn parse_transition(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // transition

    // A plain identifier here is the transition's name; segment keywords
    // are never demoted in this position.
    let name = if matches!(
        p.current_kind(),
        TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME
    ) {
        super::helpers::take_name(p)
    } else {
        None
    };

    let mut source = None;
    let mut accept = None;
    let mut guard = None;
    let mut effect = None;
    let mut target = None;

    loop {
        match p.current_kind() {
            TokenKind::FIRST_KW => {
                p.bump();
                source = Some(parse_qualified_name(p));
            }
            TokenKind::ACCEPT_KW => {
                p.bump();
                accept = Some(parse_qualified_name(p));
            }
            TokenKind::IF_KW => {
                p.bump();
                guard = Some(parse_expression(p));
            }
            TokenKind::DO_KW => {
                p.bump();
                p.eat(TokenKind::ACTION_KW);
                effect = Some(parse_qualified_name(p));
            }
            TokenKind::THEN_KW => {
                p.bump();
                target = Some(parse_qualified_name(p));
            }
            _ => break,
        }
    }
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Transition {
            name,
            source,
            accept,
            guard,
            effect,
            target,
        },
        span,
    )
}

/// Succession = ['succession' name?] 'first' step ('then' step)+ ';'
pub(super) fn parse_succession(p: &mut Parser) -> NodeId {
    let start = p.start_pos();

    let mut name = None;
    if p.eat(TokenKind::SUCCESSION_KW) {
        if matches!(
            p.current_kind(),
            TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME
        ) {
            name = super::helpers::take_name(p);
        }
    }

    let mut steps = Vec::new();
    if p.expect(TokenKind::FIRST_KW) && p.at_name_token() {
        steps.push(parse_qualified_name(p));
    }
    while p.eat(TokenKind::THEN_KW) {
        if p.at_name_token() {
            steps.push(parse_qualified_name(p));
        } else {
            p.error_expected(&[TokenKind::IDENT]);
            break;
        }
    }
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::Succession { name, steps }, span)
}

/// Entry/exit/do member of a state body:
/// `entry;` | `entry action a ...` | `entry a;`
pub(super) fn parse_state_action(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let kind = p.current_kind();
    p.bump(); // entry | exit | do

    let action = if p.at(TokenKind::SEMICOLON) {
        p.bump();
        None
    } else if p.at(TokenKind::ACTION_KW) || p.at(TokenKind::PERFORM_KW) {
        Some(parse_definition_or_usage_or_perform(p))
    } else if p.at_name_token() {
        let reference = parse_qualified_name(p);
        p.expect(TokenKind::SEMICOLON);
        Some(reference)
    } else {
        p.error_expected(&[TokenKind::ACTION_KW, TokenKind::IDENT, TokenKind::SEMICOLON]);
        p.recover(&[]);
        None
    };

    let span = p.span_from(start);
    let node = match kind {
        TokenKind::ENTRY_KW => NodeKind::EntryAction { action },
        TokenKind::EXIT_KW => NodeKind::ExitAction { action },
        _ => NodeKind::DoAction { action },
    };
    p.alloc_adopting(node, span)
}

fn parse_definition_or_usage_or_perform(p: &mut Parser) -> NodeId {
    if p.at(TokenKind::PERFORM_KW) {
        super::actions::parse_perform(p)
    } else {
        parse_definition_or_usage(p)
    }
}
