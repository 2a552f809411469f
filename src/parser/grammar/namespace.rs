//! Root namespace, packages, imports, aliases, dependencies, and the
//! namespace-element dispatcher shared by every brace-delimited body.

use super::actions;
use super::annotations;
use super::connectors;
use super::definitions;
use super::helpers::{parse_identification, parse_qualified_name, parse_qualified_name_list, take_name};
use super::states;
use super::usages;
use super::{DECL_START, KIND_KEYWORDS, PREFIX_MODIFIERS};
use crate::ast::{NodeId, NodeKind, Visibility};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Parse a whole document into a `RootNamespace`.
pub fn parse_root(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut elements = Vec::new();

    while !p.at_eof() {
        if p.at(TokenKind::R_BRACE) {
            p.error("unexpected '}'");
            p.bump();
            continue;
        }
        let before = p.pos();
        if let Some(member) = parse_namespace_element(p) {
            elements.push(member);
        }
        if p.pos() == before {
            // Whatever it was, never loop without progress.
            p.bump();
        }
    }

    let span = p.span_from(start);
    p.alloc_adopting(NodeKind::RootNamespace { elements }, span)
}

/// One element of a namespace body, wrapped in its membership. Returns
/// `None` at a closing brace or after error recovery.
pub(super) fn parse_namespace_element(p: &mut Parser) -> Option<NodeId> {
    if p.at(TokenKind::LEXER_ERROR) {
        // The lexer already reported it; step over and move on.
        p.bump();
        return None;
    }
    if p.at(TokenKind::R_BRACE) || p.at_eof() {
        return None;
    }

    let start = p.start_pos();
    let visibility = parse_visibility(p);

    let element = match p.current_kind() {
        TokenKind::IMPORT_KW => return Some(parse_import(p, visibility, start)),
        TokenKind::ALIAS_KW => return Some(parse_alias(p, visibility, start)),

        TokenKind::PACKAGE_KW | TokenKind::NAMESPACE_KW => parse_package(p),
        TokenKind::STANDARD_KW
            if matches!(p.nth(1), TokenKind::LIBRARY_KW | TokenKind::PACKAGE_KW) =>
        {
            parse_package(p)
        }
        TokenKind::LIBRARY_KW if p.nth(1) == TokenKind::PACKAGE_KW => parse_package(p),

        TokenKind::DOC_KW => annotations::parse_documentation(p),
        TokenKind::COMMENT_KW => annotations::parse_comment(p),
        TokenKind::REP_KW => annotations::parse_textual_representation(p),
        TokenKind::HASH => annotations::parse_prefix_metadata(p),
        TokenKind::AT => annotations::parse_inline_metadata(p),

        TokenKind::DEPENDENCY_KW => parse_dependency(p),

        TokenKind::TRANSITION_KW => states::parse_transition(p),
        TokenKind::SUCCESSION_KW | TokenKind::FIRST_KW => states::parse_succession(p),
        TokenKind::ENTRY_KW | TokenKind::EXIT_KW | TokenKind::DO_KW => {
            states::parse_state_action(p)
        }

        TokenKind::ACCEPT_KW => actions::parse_accept(p),
        TokenKind::SEND_KW => actions::parse_send(p),
        TokenKind::ASSIGN_KW => actions::parse_assign(p),
        TokenKind::ASSERT_KW => actions::parse_assert(p),
        TokenKind::PERFORM_KW => actions::parse_perform(p),
        TokenKind::IF_KW => actions::parse_if(p),
        TokenKind::WHILE_KW => actions::parse_while(p),
        TokenKind::FOR_KW => actions::parse_for(p),

        TokenKind::CONNECT_KW => connectors::parse_connector(p),
        TokenKind::BIND_KW | TokenKind::BINDING_KW => connectors::parse_binding(p),
        TokenKind::FLOW_KW if p.nth(1) != TokenKind::DEF_KW => connectors::parse_flow(p),

        TokenKind::COLON_GT
        | TokenKind::COLON_GT_GT
        | TokenKind::REDEFINES_KW
        | TokenKind::SUBSETS_KW
        | TokenKind::REFERENCES_KW => usages::parse_shorthand_member(p),

        kind if kind == TokenKind::FLOW_KW
            || KIND_KEYWORDS.contains(&kind)
            || PREFIX_MODIFIERS.contains(&kind) =>
        {
            definitions::parse_definition_or_usage(p)
        }

        kind if kind.is_name() => usages::parse_shorthand_member(p),

        _ => {
            p.error_expected(DECL_START);
            p.recover(&[]);
            return None;
        }
    };

    let span = p.span_from(start);
    Some(p.alloc_adopting(
        NodeKind::OwningMembership {
            visibility,
            element,
        },
        span,
    ))
}

fn parse_visibility(p: &mut Parser) -> Option<Visibility> {
    let visibility = match p.current_kind() {
        TokenKind::PUBLIC_KW => Some(Visibility::Public),
        TokenKind::PRIVATE_KW => Some(Visibility::Private),
        TokenKind::PROTECTED_KW => Some(Visibility::Protected),
        _ => return None,
    };
    // A visibility keyword directly followed by a name-follower is itself a
    // name (`part private;` never reaches here; `private : T;` does).
    if matches!(
        p.nth(1),
        TokenKind::COLON
            | TokenKind::SEMICOLON
            | TokenKind::EQ
            | TokenKind::COLON_EQ
            | TokenKind::COLON_COLON_EQ
            | TokenKind::L_BRACKET
    ) {
        return None;
    }
    p.bump();
    visibility
}

/// Package = ['standard'] ['library'] ('package'|'namespace') identification (';' | '{' ... '}')
pub(super) fn parse_package(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let is_standard = p.eat(TokenKind::STANDARD_KW);
    let is_library = p.eat(TokenKind::LIBRARY_KW);

    if !p.eat(TokenKind::PACKAGE_KW) && !p.eat(TokenKind::NAMESPACE_KW) {
        p.expect(TokenKind::PACKAGE_KW);
    }

    let (short_name, name) = parse_identification(p);

    let mut elements = Vec::new();
    if p.eat(TokenKind::SEMICOLON) {
        // Empty package.
    } else if p.eat(TokenKind::L_BRACE) {
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
    } else {
        p.error_expected(&[TokenKind::SEMICOLON, TokenKind::L_BRACE]);
        p.recover(&[]);
    }

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Package {
            name,
            short_name,
            is_library,
            is_standard,
            elements,
        },
        span,
    )
}

/// A brace body or `;`: `None` for `;`, `Some(members)` for `{ ... }`.
pub(super) fn parse_body(p: &mut Parser) -> Option<Vec<NodeId>> {
    if p.eat(TokenKind::SEMICOLON) {
        return None;
    }
    if p.eat(TokenKind::L_BRACE) {
        let mut elements = Vec::new();
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
        return Some(elements);
    }
    p.error_expected(&[TokenKind::SEMICOLON, TokenKind::L_BRACE]);
    p.recover(&[]);
    p.eat(TokenKind::SEMICOLON);
    None
}

/// Import = 'import' ['all'] path ['::*' | '::**'] ';'
fn parse_import(p: &mut Parser, visibility: Option<Visibility>, start: crate::core::span::Position) -> NodeId {
    p.bump(); // import

    let is_all = p.at(TokenKind::ALL_KW) && p.nth(1).is_name();
    if is_all {
        p.bump();
    }

    let qn_start = p.start_pos();
    let mut parts = Vec::new();
    let mut is_wildcard = false;
    let mut is_recursive = false;

    match take_name(p) {
        Some(part) => parts.push(part),
        None => p.error_expected(&[TokenKind::IDENT]),
    }
    while p.at(TokenKind::COLON_COLON) {
        match p.nth(1) {
            TokenKind::STAR => {
                p.bump();
                p.bump();
                is_wildcard = true;
                break;
            }
            TokenKind::STAR_STAR => {
                p.bump();
                p.bump();
                is_wildcard = true;
                is_recursive = true;
                break;
            }
            kind if kind.is_name() => {
                p.bump();
                if let Some(part) = take_name(p) {
                    parts.push(part);
                }
            }
            _ => {
                p.bump();
                p.error_expected(&[TokenKind::IDENT, TokenKind::STAR]);
                break;
            }
        }
    }

    let qn_span = p.span_from(qn_start);
    let path = p.alloc(
        NodeKind::QualifiedName {
            parts,
            target: None,
        },
        qn_span,
    );
    let import_ref = p.alloc_adopting(
        NodeKind::ImportRef {
            path,
            is_wildcard,
            is_recursive,
        },
        qn_span,
    );

    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::ImportMembership {
            visibility,
            is_all,
            import_ref,
        },
        span,
    )
}

/// Alias = 'alias' name 'for' qualified-name ';'
fn parse_alias(p: &mut Parser, visibility: Option<Visibility>, start: crate::core::span::Position) -> NodeId {
    p.bump(); // alias

    let name = match take_name(p) {
        Some(name) => name,
        None => {
            p.error_expected(&[TokenKind::IDENT]);
            String::new()
        }
    };

    p.expect(TokenKind::FOR_KW);
    let target = parse_qualified_name(p);
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::AliasMember {
            visibility,
            name,
            target,
        },
        span,
    )
}

/// Dependency = 'dependency' [name 'from'] clients 'to' suppliers ';'
fn parse_dependency(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // dependency

    let mut name = None;
    if p.at_name_token() && p.nth(1) == TokenKind::FROM_KW {
        name = take_name(p);
        p.bump(); // from
    } else {
        p.eat(TokenKind::FROM_KW);
    }

    let mut clients = Vec::new();
    if p.at_name_token() {
        parse_qualified_name_list(p, &mut clients);
    } else {
        p.error_expected(&[TokenKind::IDENT]);
    }

    let mut suppliers = Vec::new();
    if p.expect(TokenKind::TO_KW) {
        parse_qualified_name_list(p, &mut suppliers);
    }
    p.expect(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Dependency {
            name,
            clients,
            suppliers,
        },
        span,
    )
}
