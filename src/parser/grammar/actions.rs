//! Action-body statements: accept, send, assign, assert, perform, and the
//! structured control actions (if / while / for).

use super::expressions::{at_expression_start, parse_expression};
use super::helpers::{parse_qualified_name, take_name};
use super::namespace::{parse_body, parse_namespace_element};
use crate::ast::{NodeId, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// AcceptAction = 'accept' (name ':')? payload? ('via' qn)? ';'
pub(super) fn parse_accept(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // accept

    let mut name = None;
    if p.at_name_token() && p.nth(1) == TokenKind::COLON {
        name = take_name(p);
        p.bump(); // :
    }

    let payload = if p.at_name_token() {
        Some(parse_qualified_name(p))
    } else {
        None
    };

    let via = if p.eat(TokenKind::VIA_KW) {
        Some(parse_qualified_name(p))
    } else {
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::AcceptAction { name, payload, via }, span)
}

/// SendAction = 'send' expr? ('via' qn)? ('to' qn)? ';'
pub(super) fn parse_send(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // send

    let payload = if at_expression_start(p) && !p.at(TokenKind::VIA_KW) && !p.at(TokenKind::TO_KW)
    {
        Some(parse_expression(p))
    } else {
        None
    };

    let mut via = None;
    let mut to = None;
    loop {
        if p.eat(TokenKind::VIA_KW) {
            via = Some(parse_qualified_name(p));
        } else if p.eat(TokenKind::TO_KW) {
            to = Some(parse_qualified_name(p));
        } else {
            break;
        }
    }
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::SendAction { payload, via, to }, span)
}

/// AssignAction = 'assign' target (':=' | '=') expr ';'
pub(super) fn parse_assign(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // assign

    let target = if p.at_name_token() {
        Some(parse_expression(p))
    } else {
        p.error_expected(&[TokenKind::IDENT]);
        None
    };

    let value = if p.eat(TokenKind::COLON_EQ) || p.eat(TokenKind::EQ) {
        Some(parse_expression(p))
    } else {
        p.error_expected(&[TokenKind::COLON_EQ]);
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::AssignAction { target, value }, span)
}

/// AssertAction = 'assert' ['constraint'] (expr | '{' expr '}') ';'
pub(super) fn parse_assert(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // assert
    p.eat(TokenKind::CONSTRAINT_KW);

    let constraint = if p.eat(TokenKind::L_BRACE) {
        let expr = parse_expression(p);
        p.expect(TokenKind::R_BRACE);
        Some(expr)
    } else if at_expression_start(p) {
        Some(parse_expression(p))
    } else {
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::AssertAction { constraint }, span)
}

/// PerformAction = 'perform' ['action'] qn? (';' | body)
pub(super) fn parse_perform(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // perform
    p.eat(TokenKind::ACTION_KW);

    let target = if p.at_name_token() {
        Some(parse_qualified_name(p))
    } else {
        None
    };
    let body = parse_body(p);

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::PerformAction { target, body }, span)
}

/// IfAction = 'if' expr '{' body '}' ('else' (if-action | '{' body '}'))?
pub(super) fn parse_if(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // if

    let condition = if at_expression_start(p) {
        Some(parse_expression(p))
    } else {
        p.error("expected condition expression");
        None
    };

    let then_body = parse_brace_body(p);

    let else_body = if p.eat(TokenKind::ELSE_KW) {
        if p.at(TokenKind::IF_KW) {
            let nested = parse_if(p);
            let nested_span = p.arena().get(nested).span;
            let member = p.alloc_adopting(
                NodeKind::OwningMembership {
                    visibility: None,
                    element: nested,
                },
                nested_span,
            );
            Some(vec![member])
        } else {
            Some(parse_brace_body(p))
        }
    } else {
        None
    };

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::IfAction {
            condition,
            then_body,
            else_body,
        },
        span,
    )
}

/// WhileAction = 'while' expr? '{' body '}' ('until' expr ';')?
pub(super) fn parse_while(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // while

    let condition = if !p.at(TokenKind::L_BRACE) && at_expression_start(p) {
        Some(parse_expression(p))
    } else {
        None
    };

    let body = parse_brace_body(p);

    let until = if p.eat(TokenKind::UNTIL_KW) {
        let expr = Some(parse_expression(p));
        p.expect(TokenKind::SEMICOLON);
        expr
    } else {
        p.eat(TokenKind::SEMICOLON);
        None
    };

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::WhileAction {
            condition,
            until,
            body,
        },
        span,
    )
}

/// ForAction = 'for' name 'in' expr '{' body '}'
pub(super) fn parse_for(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // for

    let var = take_name(p);
    if var.is_none() {
        p.error_expected(&[TokenKind::IDENT]);
    }

    let sequence = if p.expect(TokenKind::IN_KW) {
        Some(parse_expression(p))
    } else {
        None
    };

    let body = parse_brace_body(p);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::ForAction {
            var,
            sequence,
            body,
        },
        span,
    )
}

/// A mandatory `{ ... }` member list (control actions have no `;` form).
fn parse_brace_body(p: &mut Parser) -> Vec<NodeId> {
    let mut elements = Vec::new();
    if !p.expect(TokenKind::L_BRACE) {
        p.recover(&[TokenKind::L_BRACE]);
        if !p.eat(TokenKind::L_BRACE) {
            return elements;
        }
    }
    while !p.at(TokenKind::R_BRACE) && !p.at_eof() {
        let before = p.pos();
        if let Some(member) = parse_namespace_element(p) {
            elements.push(member);
        }
        if p.pos() == before && !p.at(TokenKind::R_BRACE) {
            p.bump();
        }
    }
    p.expect(TokenKind::R_BRACE);
    elements
}
