//! Connector-family statements: `connect ... to ...`, bindings, flows.
//!
//! Endpoints are qualified names optionally extended with feature chains
//! (`vehicle.engine.port`).

use super::helpers::{name_value, parse_qualified_name};
use crate::ast::{NodeId, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Connector = 'connect' endpoint 'to' endpoint ';'
pub(super) fn parse_connector(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // connect

    let source = parse_endpoint(p);
    let target = if p.expect(TokenKind::TO_KW) {
        parse_endpoint(p)
    } else {
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Connector {
            name: None,
            source,
            target,
        },
        span,
    )
}

/// Binding = ['binding' name?] 'bind' endpoint '=' endpoint ';'
pub(super) fn parse_binding(p: &mut Parser) -> NodeId {
    let start = p.start_pos();

    let mut name = None;
    if p.eat(TokenKind::BINDING_KW) {
        if matches!(
            p.current_kind(),
            TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME
        ) {
            name = super::helpers::take_name(p);
        }
    }
    // `binding a = b;` omits the bind keyword.
    p.eat(TokenKind::BIND_KW);

    let source = parse_endpoint(p);
    let target = if p.expect(TokenKind::EQ) {
        parse_endpoint(p)
    } else {
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Binding {
            name,
            source,
            target,
        },
        span,
    )
}

/// Flow = 'flow' [name] ['of' payload] ['from' endpoint] ['to' endpoint] ';'
pub(super) fn parse_flow(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // flow

    let mut name = None;
    if matches!(
        p.current_kind(),
        TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME
    ) && matches!(
        p.nth(1),
        TokenKind::OF_KW | TokenKind::FROM_KW | TokenKind::COLON
    ) {
        name = super::helpers::take_name(p);
        // Optional connection typing after the name.
        if p.eat(TokenKind::COLON) {
            parse_qualified_name(p);
        }
    }

    let payload = if p.eat(TokenKind::OF_KW) {
        Some(parse_qualified_name(p))
    } else {
        None
    };

    let source = if p.eat(TokenKind::FROM_KW) {
        parse_endpoint(p)
    } else if p.at_name_token() {
        // `flow a.x to b.y;`
        parse_endpoint(p)
    } else {
        None
    };

    let target = if p.eat(TokenKind::TO_KW) {
        parse_endpoint(p)
    } else {
        None
    };
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Flow {
            name,
            payload,
            source,
            target,
        },
        span,
    )
}

/// Endpoint = qualified-name ('.' name)*
fn parse_endpoint(p: &mut Parser) -> Option<NodeId> {
    if !p.at_name_token() {
        p.error_expected(&[TokenKind::IDENT]);
        return None;
    }
    let start = p.start_pos();
    let mut endpoint = parse_qualified_name(p);
    while p.at(TokenKind::DOT) && p.nth(1).is_name() {
        p.bump();
        let kind = p.current_kind();
        let text = p.bump_text();
        let member = name_value(kind, text);
        let span = p.span_from(start);
        endpoint = p.alloc_adopting(
            NodeKind::FeatureChain {
                target: endpoint,
                member,
            },
            span,
        );
    }
    Some(endpoint)
}
