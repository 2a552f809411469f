//! Recursive-descent parser state for SysML v2 / KerML.
//!
//! The parser walks a trivia-filtered token slice with a single token of
//! lookahead, building the typed AST directly in the document arena.
//! Recovery never aborts the document: on an unexpected token it records a
//! diagnostic, skips to the next `;`, `}` or declaration keyword, and
//! guarantees at least one token of progress.

use super::grammar;
use super::lexer::{self, Token};
use super::messages;
use super::token_kind::TokenKind;
use crate::ast::{Arena, NodeId, NodeKind};
use crate::core::diagnostics::{codes, Diagnostic};
use crate::core::span::{Position, Span};

/// Expression nesting cap: keeps pathological inputs from exhausting the
/// stack while staying far above anything a real model produces.
const MAX_EXPR_DEPTH: u32 = 128;

/// Result of parsing one document.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub arena: Arena,
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// True when no lexer or parser error was recorded.
    pub fn ok(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.is_error())
    }
}

/// Parse a source string into an AST with container back-links assigned.
pub fn parse_source(input: &str) -> ParseOutcome {
    let (tokens, lex_diagnostics) = lexer::lex_significant(input);
    let mut parser = Parser::new(&tokens);
    let root = grammar::parse_root(&mut parser);
    let (arena, parse_diagnostics) = parser.finish();

    let mut diagnostics = lex_diagnostics;
    diagnostics.extend(parse_diagnostics);
    ParseOutcome {
        arena,
        root,
        diagnostics,
    }
}

/// The parser state.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    arena: Arena,
    diagnostics: Vec<Diagnostic>,
    /// End of the last consumed token; span ends come from here.
    last_end: Position,
    expr_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            arena: Arena::new(),
            diagnostics: Vec::new(),
            last_end: Position::zero(),
            expr_depth: 0,
        }
    }

    pub fn finish(self) -> (Arena, Vec<Diagnostic>) {
        (self.arena, self.diagnostics)
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::EOF)
    }

    pub fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the nth token ahead (0 = current).
    pub fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Accept identifiers, unrestricted names, and any keyword: the
    /// keyword-as-identifier arbitration point.
    pub fn at_name_token(&self) -> bool {
        self.current_kind().is_name()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.last_end = token.span.end;
            self.pos += 1;
        }
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            let found = self.found_description();
            self.error(messages::expectation_message(&[kind], &found));
            false
        }
    }

    /// Consume the current token and return its text.
    pub fn bump_text(&mut self) -> &'a str {
        let text = self.current_text();
        self.bump();
        text
    }

    // =========================================================================
    // Spans
    // =========================================================================

    /// Start position for the node about to be parsed.
    pub fn start_pos(&self) -> Position {
        self.current()
            .map(|t| t.span.start)
            .unwrap_or(self.last_end)
    }

    /// Span from a recorded start to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        if self.last_end.offset > start.offset {
            Span::new(start, self.last_end)
        } else {
            Span::empty(start)
        }
    }

    pub fn current_span(&self) -> Span {
        self.current()
            .map(|t| t.span)
            .unwrap_or(Span::empty(self.last_end))
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc(kind, span)
    }

    /// Allocate a node and set it as the parent of all its children.
    pub fn alloc_adopting(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = self.arena.alloc(kind, span);
        self.arena.adopt(id);
        id
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    // =========================================================================
    // Errors and recovery
    // =========================================================================

    fn found_description(&self) -> String {
        match self.current() {
            Some(t) if t.kind == TokenKind::IDENT => format!("'{}'", t.text),
            Some(t) => t.kind.describe().to_string(),
            None => "end of file".to_string(),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = messages::truncate(message.into());
        let range = self.current_span();
        self.diagnostics
            .push(Diagnostic::error(message, range).with_code(codes::PARSER_ERROR));
    }

    /// Record an expectation error listing the given alternatives.
    pub fn error_expected(&mut self, expected: &[TokenKind]) {
        let found = self.found_description();
        self.error(messages::expectation_message(expected, &found));
    }

    /// Record an error and skip to a synchronisation point: one of
    /// `recovery`, `;`, `}`, a top-level declaration keyword, or EOF.
    pub fn error_recover(&mut self, message: impl Into<String>, recovery: &[TokenKind]) {
        self.error(message);
        self.recover(recovery);
    }

    /// Skip to a synchronisation point. A universal sync point (`;`, `}`,
    /// or a declaration keyword) may belong to an enclosing construct and
    /// is always left for the caller to consume — `package Outer { package
    /// Inner }` must not eat Outer's closing brace while recovering from
    /// Inner's missing body. Callers' body loops guarantee progress when
    /// recovery stops without consuming anything.
    pub fn recover(&mut self, recovery: &[TokenKind]) {
        let mut consumed = false;
        while !self.at_eof() && !self.at_sync_point(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed
            && !self.at_eof()
            && !self.at_any(recovery)
            && !self.at_universal_sync_point()
        {
            self.bump();
        }
        tracing::trace!(pos = self.pos, "parser recovered");
    }

    fn at_universal_sync_point(&self) -> bool {
        let kind = self.current_kind();
        kind == TokenKind::SEMICOLON
            || kind == TokenKind::R_BRACE
            || grammar::DECL_START.contains(&kind)
    }

    fn at_sync_point(&self, recovery: &[TokenKind]) -> bool {
        self.at_universal_sync_point() || recovery.contains(&self.current_kind())
    }

    // =========================================================================
    // Expression depth guard
    // =========================================================================

    /// Enter one level of expression nesting; false when the cap is hit
    /// (an error has been recorded and the caller should bail out).
    pub fn enter_expr(&mut self) -> bool {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            self.error("expression too deeply nested");
            return false;
        }
        self.expr_depth += 1;
        true
    }

    pub fn exit_expr(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }
}
