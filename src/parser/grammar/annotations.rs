//! Annotating members: documentation, comments, textual representations,
//! and metadata usages (`#Type` prefix and `@` inline forms).

use super::helpers::{clean_doc_text, parse_qualified_name, parse_qualified_name_list, take_name};
use super::namespace::parse_body;
use crate::ast::{NodeId, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Documentation = 'doc' name? DOC_COMMENT
pub(super) fn parse_documentation(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // doc
    let name = if p.at(TokenKind::DOC_COMMENT) {
        None
    } else {
        take_name(p)
    };

    let text = if p.at(TokenKind::DOC_COMMENT) {
        clean_doc_text(p.bump_text())
    } else {
        p.error_expected(&[TokenKind::DOC_COMMENT]);
        String::new()
    };
    p.eat(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc(NodeKind::Documentation { name, text }, span)
}

/// Comment = 'comment' name? ('about' qn-list)? ('locale'|'language' STRING)? DOC_COMMENT
pub(super) fn parse_comment(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // comment

    let name = if p.at(TokenKind::ABOUT_KW)
        || p.at(TokenKind::LOCALE_KW)
        || p.at(TokenKind::LANGUAGE_KW)
        || p.at(TokenKind::DOC_COMMENT)
    {
        None
    } else {
        take_name(p)
    };

    let mut about = Vec::new();
    if p.eat(TokenKind::ABOUT_KW) {
        parse_qualified_name_list(p, &mut about);
    }

    let mut language = None;
    if p.eat(TokenKind::LOCALE_KW) || p.eat(TokenKind::LANGUAGE_KW) {
        if p.at(TokenKind::STRING) {
            language = Some(strip_quotes(p.bump_text()));
        } else {
            p.error_expected(&[TokenKind::STRING]);
        }
    }

    let text = if p.at(TokenKind::DOC_COMMENT) {
        clean_doc_text(p.bump_text())
    } else {
        p.error_expected(&[TokenKind::DOC_COMMENT]);
        String::new()
    };
    p.eat(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::Comment {
            name,
            about,
            language,
            text,
        },
        span,
    )
}

/// TextualRepresentation = 'rep' name? 'language' STRING DOC_COMMENT?
pub(super) fn parse_textual_representation(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // rep

    let name = if p.at(TokenKind::LANGUAGE_KW) {
        None
    } else {
        take_name(p)
    };

    let mut language = None;
    if p.expect(TokenKind::LANGUAGE_KW) && p.at(TokenKind::STRING) {
        language = Some(strip_quotes(p.bump_text()));
    }

    let text = if p.at(TokenKind::DOC_COMMENT) {
        clean_doc_text(p.bump_text())
    } else {
        String::new()
    };
    p.eat(TokenKind::SEMICOLON);

    let span = p.span_from(start);
    p.alloc(
        NodeKind::TextualRepresentation {
            name,
            language,
            text,
        },
        span,
    )
}

/// Prefix metadata: `#` QualifiedName
pub(super) fn parse_prefix_metadata(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // #
    let metadata_type = parse_qualified_name(p);
    p.eat(TokenKind::SEMICOLON);
    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::MetadataUsage {
            name: None,
            metadata_type: Some(metadata_type),
            is_prefix: true,
            body: None,
        },
        span,
    )
}

/// Inline metadata: `@` (name ':')? QualifiedName? (';' | body)
pub(super) fn parse_inline_metadata(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    p.bump(); // @

    let mut name = None;
    if p.at_name_token() && p.nth(1) == TokenKind::COLON {
        name = take_name(p);
        p.bump(); // :
    }

    let metadata_type = if p.at_name_token() {
        Some(parse_qualified_name(p))
    } else {
        None
    };

    let body = if p.at(TokenKind::L_BRACE) || p.at(TokenKind::SEMICOLON) {
        parse_body(p)
    } else {
        None
    };

    let span = p.span_from(start);
    p.alloc_adopting(
        NodeKind::MetadataUsage {
            name,
            metadata_type,
            is_prefix: false,
            body,
        },
        span,
    )
}

fn strip_quotes(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}
