//! Shared parsing helpers: names, qualified names, doc text.

use crate::ast::{NodeId, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Tokens that may legally follow an element name in a declaration head.
/// Used to arbitrate whether a keyword in name position is the name itself
/// or the start of the next clause (`part def specializes X` declares an
/// anonymous definition; `attribute package : String` names the attribute
/// `package`).
const NAME_FOLLOWERS: &[TokenKind] = &[
    TokenKind::SEMICOLON,
    TokenKind::L_BRACE,
    TokenKind::COLON,
    TokenKind::COLON_GT,
    TokenKind::COLON_GT_GT,
    TokenKind::COLON_EQ,
    TokenKind::COLON_COLON_EQ,
    TokenKind::EQ,
    TokenKind::L_BRACKET,
    TokenKind::COMMA,
    TokenKind::SPECIALIZES_KW,
    TokenKind::SUBSETS_KW,
    TokenKind::REDEFINES_KW,
    TokenKind::REFERENCES_KW,
    TokenKind::DISJOINT_KW,
    TokenKind::CONJUGATE_KW,
    TokenKind::TYPED_KW,
    TokenKind::PARALLEL_KW,
];

/// The name value of a name token: unrestricted names lose their quotes
/// and escapes; identifiers and keywords are taken verbatim.
pub(super) fn name_value(kind: TokenKind, text: &str) -> String {
    if kind == TokenKind::UNRESTRICTED_NAME {
        let inner = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(text);
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some('\'') => out.push('\''),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                }
            } else {
                out.push(ch);
            }
        }
        out
    } else {
        text.to_string()
    }
}

/// Take any name token unconditionally (qualified-name parts, alias names).
pub(super) fn take_name(p: &mut Parser) -> Option<String> {
    if p.at_name_token() {
        let kind = p.current_kind();
        let text = p.bump_text();
        Some(name_value(kind, text))
    } else {
        None
    }
}

/// Take a declaration name, arbitrating keyword-vs-clause: identifiers and
/// unrestricted names are always names; a keyword is taken as the name only
/// when the next token can follow a name.
pub(super) fn take_element_name(p: &mut Parser) -> Option<String> {
    let kind = p.current_kind();
    if matches!(kind, TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME) {
        let text = p.bump_text();
        return Some(name_value(kind, text));
    }
    if kind.is_keyword() && NAME_FOLLOWERS.contains(&p.nth(1)) {
        let text = p.bump_text();
        return Some(name_value(kind, text));
    }
    None
}

/// Identification: optional short name `<n>` followed by an optional name.
pub(super) fn parse_identification(p: &mut Parser) -> (Option<String>, Option<String>) {
    let mut short_name = None;
    if p.at(TokenKind::LT) && p.nth(1).is_name() && p.nth(2) == TokenKind::GT {
        p.bump(); // <
        short_name = take_name(p);
        p.bump(); // >
    }
    let name = take_element_name(p);
    (short_name, name)
}

/// QualifiedName = name ('::' name)*
pub(super) fn parse_qualified_name(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut parts = Vec::new();

    match take_name(p) {
        Some(part) => parts.push(part),
        None => p.error_expected(&[TokenKind::IDENT]),
    }
    while p.at(TokenKind::COLON_COLON) && p.nth(1).is_name() {
        p.bump();
        if let Some(part) = take_name(p) {
            parts.push(part);
        }
    }

    let span = p.span_from(start);
    p.alloc(
        NodeKind::QualifiedName {
            parts,
            target: None,
        },
        span,
    )
}

/// Comma-separated qualified names.
pub(super) fn parse_qualified_name_list(p: &mut Parser, out: &mut Vec<NodeId>) {
    out.push(parse_qualified_name(p));
    while p.eat(TokenKind::COMMA) {
        if p.at_name_token() {
            out.push(parse_qualified_name(p));
        } else {
            p.error_expected(&[TokenKind::IDENT]);
            break;
        }
    }
}

/// Strip `/** ... */` delimiters and per-line ` * ` decoration.
pub(super) fn clean_doc_text(raw: &str) -> String {
    let inner = raw
        .strip_prefix("/**")
        .or_else(|| raw.strip_prefix("/*"))
        .unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            trimmed
                .strip_prefix("* ")
                .or_else(|| trimmed.strip_prefix('*'))
                .unwrap_or(trimmed)
        })
        .collect();
    lines.join("\n").trim().to_string()
}

/// Unescape a string literal's content (quotes already stripped).
pub(super) fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                // \u{XXXX}
                let mut rest = chars.clone();
                if rest.next() == Some('{') {
                    let hex: String = rest.by_ref().take_while(|c| *c != '}').collect();
                    if let Some(decoded) =
                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                    {
                        out.push(decoded);
                        chars = rest;
                        continue;
                    }
                }
                out.push('u');
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_value_unrestricted() {
        assert_eq!(
            name_value(TokenKind::UNRESTRICTED_NAME, "'fuel tank'"),
            "fuel tank"
        );
        assert_eq!(
            name_value(TokenKind::UNRESTRICTED_NAME, r"'it\'s'"),
            "it's"
        );
        assert_eq!(name_value(TokenKind::IDENT, "engine"), "engine");
    }

    #[test]
    fn test_clean_doc_text() {
        let raw = "/**\n * First line.\n * Second line.\n */";
        assert_eq!(clean_doc_text(raw), "First line.\nSecond line.");
        assert_eq!(clean_doc_text("/** inline */"), "inline");
    }

    #[test]
    fn test_unescape_string() {
        assert_eq!(unescape_string(r"a\nb"), "a\nb");
        assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_string(r"\u{48}i"), "Hi");
        assert_eq!(unescape_string(r"\q"), "\\q");
    }
}
