//! Logos-based lexer for SysML v2 and KerML.
//!
//! The logos-generated tokenizer recognises the raw token shapes; the
//! `Lexer` wrapper attaches line/column/offset spans and turns the three
//! unterminated-input shapes (string, unrestricted name, block comment)
//! into `LEXER_ERROR` tokens plus a diagnostic anchored at the opening
//! character, resynchronising at the next whitespace or EOF.

use logos::Logos;

use super::token_kind::TokenKind;
use crate::core::diagnostics::{codes, Diagnostic};
use crate::core::span::{Position, Span};

/// A token with its kind, lexeme and span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
    source: &'a str,
    line: u32,
    column: u32,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
            source: input,
            line: 0,
            column: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far (complete once the iterator is drained).
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn position_at(&self, offset: usize) -> Position {
        Position::new(self.line, self.column, offset as u32)
    }

    /// Advance the line/column counters over an emitted lexeme.
    fn advance_over(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn emit(&mut self, kind: TokenKind, start_offset: usize, text: &'a str) -> Token<'a> {
        let start = self.position_at(start_offset);
        self.advance_over(text);
        let end = Position::new(self.line, self.column, (start_offset + text.len()) as u32);
        Token {
            kind,
            text,
            span: Span::new(start, end),
        }
    }

    /// Consume the rest of an unterminated quoted literal up to the next
    /// whitespace, returning the full errored lexeme.
    fn recover_quoted(&mut self, start_offset: usize, slice_len: usize) -> &'a str {
        let rest = self.inner.remainder();
        let n = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        self.inner.bump(n);
        let source = self.source;
        &source[start_offset..start_offset + slice_len + n]
    }

    /// Consume everything to EOF (unterminated block comment).
    fn recover_to_eof(&mut self, start_offset: usize, slice_len: usize) -> &'a str {
        let n = self.inner.remainder().len();
        self.inner.bump(n);
        let source = self.source;
        &source[start_offset..start_offset + slice_len + n]
    }

    fn lexer_error(&mut self, message: String, span: Span) {
        self.diagnostics
            .push(Diagnostic::error(message, span).with_code(codes::LEXER_ERROR));
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let slice = self.inner.slice();
        let start_offset = self.inner.span().start;

        match raw {
            // A lone '/' directly followed by '*' means the block-comment
            // regex failed to find a terminator: a terminated comment would
            // have out-matched the single-character '/' token.
            Ok(RawToken::Slash) if self.inner.remainder().starts_with('*') => {
                let text = self.recover_to_eof(start_offset, slice.len());
                let token = self.emit(TokenKind::LEXER_ERROR, start_offset, text);
                self.lexer_error("unterminated block comment".into(), token.span);
                Some(token)
            }
            Ok(raw) => {
                let kind = TokenKind::from(raw);
                Some(self.emit(kind, start_offset, slice))
            }
            Err(()) => {
                let (message, text) = match slice.as_bytes().first() {
                    Some(b'"') => (
                        "unterminated string literal".to_string(),
                        self.recover_quoted(start_offset, slice.len()),
                    ),
                    Some(b'\'') => (
                        "unterminated name".to_string(),
                        self.recover_quoted(start_offset, slice.len()),
                    ),
                    _ => (format!("unexpected character '{}'", slice), slice),
                };
                let token = self.emit(TokenKind::LEXER_ERROR, start_offset, text);
                self.lexer_error(message, token.span);
                Some(token)
            }
        }
    }
}

/// Tokenize a source string, returning every token (trivia included) and
/// the lexer diagnostics.
pub fn tokenize(input: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    for token in lexer.by_ref() {
        tokens.push(token);
    }
    (tokens, lexer.into_diagnostics())
}

/// Tokenize and drop trivia: the parser's input stream. Doc comments are
/// kept (the doc/comment/rep productions consume them).
pub fn lex_significant(input: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let (tokens, diagnostics) = tokenize(input);
    let significant = tokens
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect();
    (significant, diagnostics)
}

/// Logos token enum — maps 1:1 onto `TokenKind`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum RawToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Doc comments would also match the block-comment regex; the higher
    // priority makes '/**' win for equal-length matches.
    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", priority = 20)]
    DocComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"'([^'\\]|\\.)*'")]
    UnrestrictedName,

    #[regex(r"[0-9]+")]
    DecInteger,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInteger,

    #[regex(r"0[bB][01]+")]
    BinInteger,

    #[regex(r"0[oO][0-7]+")]
    OctInteger,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Real,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("::=")]
    ColonColonEq,

    #[token(":>>")]
    ColonGtGt,

    #[token(":>")]
    ColonGt,

    #[token("::")]
    ColonColon,

    #[token(":=")]
    ColonEq,

    #[token("..")]
    DotDot,

    #[token("===")]
    EqEqEq,

    #[token("!==")]
    BangEqEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("**")]
    StarStar,

    #[token("??")]
    QuestionQuestion,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("#")]
    Hash,
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("about")]
    AboutKw,
    #[token("abstract")]
    AbstractKw,
    #[token("accept")]
    AcceptKw,
    #[token("action")]
    ActionKw,
    #[token("actor")]
    ActorKw,
    #[token("alias")]
    AliasKw,
    #[token("all")]
    AllKw,
    #[token("allocation")]
    AllocationKw,
    #[token("analysis")]
    AnalysisKw,
    #[token("and")]
    AndKw,
    #[token("as")]
    AsKw,
    #[token("assert")]
    AssertKw,
    #[token("assign")]
    AssignKw,
    #[token("attribute")]
    AttributeKw,
    #[token("bind")]
    BindKw,
    #[token("binding")]
    BindingKw,
    #[token("by")]
    ByKw,
    #[token("calc")]
    CalcKw,
    #[token("case")]
    CaseKw,
    #[token("comment")]
    CommentKw,
    #[token("composite")]
    CompositeKw,
    #[token("concern")]
    ConcernKw,
    #[token("conjugate")]
    ConjugateKw,
    #[token("connect")]
    ConnectKw,
    #[token("connection")]
    ConnectionKw,
    #[token("constraint")]
    ConstraintKw,
    #[token("def")]
    DefKw,
    #[token("dependency")]
    DependencyKw,
    #[token("derived")]
    DerivedKw,
    #[token("disjoint")]
    DisjointKw,
    #[token("do")]
    DoKw,
    #[token("doc")]
    DocKw,
    #[token("else")]
    ElseKw,
    #[token("end")]
    EndKw,
    #[token("entry")]
    EntryKw,
    #[token("enum")]
    EnumKw,
    #[token("enumeration")]
    EnumerationKw,
    #[token("exit")]
    ExitKw,
    #[token("false")]
    FalseKw,
    #[token("feature")]
    FeatureKw,
    #[token("first")]
    FirstKw,
    #[token("flow")]
    FlowKw,
    #[token("for")]
    ForKw,
    #[token("from")]
    FromKw,
    #[token("hastype")]
    HastypeKw,
    #[token("if")]
    IfKw,
    #[token("implies")]
    ImpliesKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("inout")]
    InoutKw,
    #[token("interface")]
    InterfaceKw,
    #[token("istype")]
    IstypeKw,
    #[token("item")]
    ItemKw,
    #[token("language")]
    LanguageKw,
    #[token("library")]
    LibraryKw,
    #[token("locale")]
    LocaleKw,
    #[token("meta")]
    MetaKw,
    #[token("metadata")]
    MetadataKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("not")]
    NotKw,
    #[token("null")]
    NullKw,
    #[token("occurrence")]
    OccurrenceKw,
    #[token("of")]
    OfKw,
    #[token("or")]
    OrKw,
    #[token("out")]
    OutKw,
    #[token("package")]
    PackageKw,
    #[token("parallel")]
    ParallelKw,
    #[token("part")]
    PartKw,
    #[token("perform")]
    PerformKw,
    #[token("port")]
    PortKw,
    #[token("portion")]
    PortionKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("redefines")]
    RedefinesKw,
    #[token("redefinition")]
    RedefinitionKw,
    #[token("ref")]
    RefKw,
    #[token("references")]
    ReferencesKw,
    #[token("rendering")]
    RenderingKw,
    #[token("rep")]
    RepKw,
    #[token("require")]
    RequireKw,
    #[token("requirement")]
    RequirementKw,
    #[token("return")]
    ReturnKw,
    #[token("send")]
    SendKw,
    #[token("specialization")]
    SpecializationKw,
    #[token("specializes")]
    SpecializesKw,
    #[token("standard")]
    StandardKw,
    #[token("state")]
    StateKw,
    #[token("subclassification")]
    SubclassificationKw,
    #[token("subclassifier")]
    SubclassifierKw,
    #[token("subject")]
    SubjectKw,
    #[token("subset")]
    SubsetKw,
    #[token("subsets")]
    SubsetsKw,
    #[token("subtype")]
    SubtypeKw,
    #[token("succession")]
    SuccessionKw,
    #[token("then")]
    ThenKw,
    #[token("to")]
    ToKw,
    #[token("transition")]
    TransitionKw,
    #[token("true")]
    TrueKw,
    #[token("typed")]
    TypedKw,
    #[token("until")]
    UntilKw,
    #[token("use")]
    UseKw,
    #[token("variant")]
    VariantKw,
    #[token("verification")]
    VerificationKw,
    #[token("via")]
    ViaKw,
    #[token("view")]
    ViewKw,
    #[token("viewpoint")]
    ViewpointKw,
    #[token("while")]
    WhileKw,
    #[token("xor")]
    XorKw,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        use RawToken::*;
        match raw {
            Whitespace => TokenKind::WHITESPACE,
            LineComment => TokenKind::LINE_COMMENT,
            BlockComment => TokenKind::BLOCK_COMMENT,
            DocComment => TokenKind::DOC_COMMENT,

            Ident => TokenKind::IDENT,
            UnrestrictedName => TokenKind::UNRESTRICTED_NAME,
            DecInteger => TokenKind::DEC_INTEGER,
            HexInteger => TokenKind::HEX_INTEGER,
            BinInteger => TokenKind::BIN_INTEGER,
            OctInteger => TokenKind::OCT_INTEGER,
            Real => TokenKind::REAL,
            String => TokenKind::STRING,

            ColonColonEq => TokenKind::COLON_COLON_EQ,
            ColonGtGt => TokenKind::COLON_GT_GT,
            ColonGt => TokenKind::COLON_GT,
            ColonColon => TokenKind::COLON_COLON,
            ColonEq => TokenKind::COLON_EQ,
            DotDot => TokenKind::DOT_DOT,
            EqEqEq => TokenKind::EQ_EQ_EQ,
            BangEqEq => TokenKind::BANG_EQ_EQ,
            EqEq => TokenKind::EQ_EQ,
            BangEq => TokenKind::BANG_EQ,
            LtEq => TokenKind::LT_EQ,
            GtEq => TokenKind::GT_EQ,
            StarStar => TokenKind::STAR_STAR,
            QuestionQuestion => TokenKind::QUESTION_QUESTION,

            LBrace => TokenKind::L_BRACE,
            RBrace => TokenKind::R_BRACE,
            LBracket => TokenKind::L_BRACKET,
            RBracket => TokenKind::R_BRACKET,
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            Comma => TokenKind::COMMA,
            Semicolon => TokenKind::SEMICOLON,
            Colon => TokenKind::COLON,
            Eq => TokenKind::EQ,
            Hash => TokenKind::HASH,
            At => TokenKind::AT,
            Dot => TokenKind::DOT,
            Star => TokenKind::STAR,
            Slash => TokenKind::SLASH,
            Percent => TokenKind::PERCENT,
            Plus => TokenKind::PLUS,
            Minus => TokenKind::MINUS,
            Bang => TokenKind::BANG,
            Tilde => TokenKind::TILDE,
            Lt => TokenKind::LT,
            Gt => TokenKind::GT,
            Question => TokenKind::QUESTION,

            AboutKw => TokenKind::ABOUT_KW,
            AbstractKw => TokenKind::ABSTRACT_KW,
            AcceptKw => TokenKind::ACCEPT_KW,
            ActionKw => TokenKind::ACTION_KW,
            ActorKw => TokenKind::ACTOR_KW,
            AliasKw => TokenKind::ALIAS_KW,
            AllKw => TokenKind::ALL_KW,
            AllocationKw => TokenKind::ALLOCATION_KW,
            AnalysisKw => TokenKind::ANALYSIS_KW,
            AndKw => TokenKind::AND_KW,
            AsKw => TokenKind::AS_KW,
            AssertKw => TokenKind::ASSERT_KW,
            AssignKw => TokenKind::ASSIGN_KW,
            AttributeKw => TokenKind::ATTRIBUTE_KW,
            BindKw => TokenKind::BIND_KW,
            BindingKw => TokenKind::BINDING_KW,
            ByKw => TokenKind::BY_KW,
            CalcKw => TokenKind::CALC_KW,
            CaseKw => TokenKind::CASE_KW,
            CommentKw => TokenKind::COMMENT_KW,
            CompositeKw => TokenKind::COMPOSITE_KW,
            ConcernKw => TokenKind::CONCERN_KW,
            ConjugateKw => TokenKind::CONJUGATE_KW,
            ConnectKw => TokenKind::CONNECT_KW,
            ConnectionKw => TokenKind::CONNECTION_KW,
            ConstraintKw => TokenKind::CONSTRAINT_KW,
            DefKw => TokenKind::DEF_KW,
            DependencyKw => TokenKind::DEPENDENCY_KW,
            DerivedKw => TokenKind::DERIVED_KW,
            DisjointKw => TokenKind::DISJOINT_KW,
            DoKw => TokenKind::DO_KW,
            DocKw => TokenKind::DOC_KW,
            ElseKw => TokenKind::ELSE_KW,
            EndKw => TokenKind::END_KW,
            EntryKw => TokenKind::ENTRY_KW,
            EnumKw => TokenKind::ENUM_KW,
            EnumerationKw => TokenKind::ENUMERATION_KW,
            ExitKw => TokenKind::EXIT_KW,
            FalseKw => TokenKind::FALSE_KW,
            FeatureKw => TokenKind::FEATURE_KW,
            FirstKw => TokenKind::FIRST_KW,
            FlowKw => TokenKind::FLOW_KW,
            ForKw => TokenKind::FOR_KW,
            FromKw => TokenKind::FROM_KW,
            HastypeKw => TokenKind::HASTYPE_KW,
            IfKw => TokenKind::IF_KW,
            ImpliesKw => TokenKind::IMPLIES_KW,
            ImportKw => TokenKind::IMPORT_KW,
            InKw => TokenKind::IN_KW,
            InoutKw => TokenKind::INOUT_KW,
            InterfaceKw => TokenKind::INTERFACE_KW,
            IstypeKw => TokenKind::ISTYPE_KW,
            ItemKw => TokenKind::ITEM_KW,
            LanguageKw => TokenKind::LANGUAGE_KW,
            LibraryKw => TokenKind::LIBRARY_KW,
            LocaleKw => TokenKind::LOCALE_KW,
            MetaKw => TokenKind::META_KW,
            MetadataKw => TokenKind::METADATA_KW,
            NamespaceKw => TokenKind::NAMESPACE_KW,
            NotKw => TokenKind::NOT_KW,
            NullKw => TokenKind::NULL_KW,
            OccurrenceKw => TokenKind::OCCURRENCE_KW,
            OfKw => TokenKind::OF_KW,
            OrKw => TokenKind::OR_KW,
            OutKw => TokenKind::OUT_KW,
            PackageKw => TokenKind::PACKAGE_KW,
            ParallelKw => TokenKind::PARALLEL_KW,
            PartKw => TokenKind::PART_KW,
            PerformKw => TokenKind::PERFORM_KW,
            PortKw => TokenKind::PORT_KW,
            PortionKw => TokenKind::PORTION_KW,
            PrivateKw => TokenKind::PRIVATE_KW,
            ProtectedKw => TokenKind::PROTECTED_KW,
            PublicKw => TokenKind::PUBLIC_KW,
            ReadonlyKw => TokenKind::READONLY_KW,
            RedefinesKw => TokenKind::REDEFINES_KW,
            RedefinitionKw => TokenKind::REDEFINITION_KW,
            RefKw => TokenKind::REF_KW,
            ReferencesKw => TokenKind::REFERENCES_KW,
            RenderingKw => TokenKind::RENDERING_KW,
            RepKw => TokenKind::REP_KW,
            RequireKw => TokenKind::REQUIRE_KW,
            RequirementKw => TokenKind::REQUIREMENT_KW,
            ReturnKw => TokenKind::RETURN_KW,
            SendKw => TokenKind::SEND_KW,
            SpecializationKw => TokenKind::SPECIALIZATION_KW,
            SpecializesKw => TokenKind::SPECIALIZES_KW,
            StandardKw => TokenKind::STANDARD_KW,
            StateKw => TokenKind::STATE_KW,
            SubclassificationKw => TokenKind::SUBCLASSIFICATION_KW,
            SubclassifierKw => TokenKind::SUBCLASSIFIER_KW,
            SubjectKw => TokenKind::SUBJECT_KW,
            SubsetKw => TokenKind::SUBSET_KW,
            SubsetsKw => TokenKind::SUBSETS_KW,
            SubtypeKw => TokenKind::SUBTYPE_KW,
            SuccessionKw => TokenKind::SUCCESSION_KW,
            ThenKw => TokenKind::THEN_KW,
            ToKw => TokenKind::TO_KW,
            TransitionKw => TokenKind::TRANSITION_KW,
            TrueKw => TokenKind::TRUE_KW,
            TypedKw => TokenKind::TYPED_KW,
            UntilKw => TokenKind::UNTIL_KW,
            UseKw => TokenKind::USE_KW,
            VariantKw => TokenKind::VARIANT_KW,
            VerificationKw => TokenKind::VERIFICATION_KW,
            ViaKw => TokenKind::VIA_KW,
            ViewKw => TokenKind::VIEW_KW,
            ViewpointKw => TokenKind::VIEWPOINT_KW,
            WhileKw => TokenKind::WHILE_KW,
            XorKw => TokenKind::XOR_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, _) = tokenize(input);
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_package() {
        let (tokens, diags) = tokenize("package Test;");
        assert!(diags.is_empty());
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, TokenKind::PACKAGE_KW);
        assert_eq!(tokens[1].kind, TokenKind::WHITESPACE);
        assert_eq!(tokens[2].kind, TokenKind::IDENT);
        assert_eq!(tokens[3].kind, TokenKind::SEMICOLON);
    }

    #[test]
    fn test_lex_qualified_name() {
        assert_eq!(
            kinds("A::B::C"),
            vec![
                TokenKind::IDENT,
                TokenKind::COLON_COLON,
                TokenKind::IDENT,
                TokenKind::COLON_COLON,
                TokenKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_lex_specializes_arrow() {
        let k = kinds("part def A :> B;");
        assert!(k.contains(&TokenKind::PART_KW));
        assert!(k.contains(&TokenKind::DEF_KW));
        assert!(k.contains(&TokenKind::COLON_GT));
    }

    #[test]
    fn test_lex_value_binding_operators() {
        let k = kinds("x := y ::= z = w");
        assert!(k.contains(&TokenKind::COLON_EQ));
        assert!(k.contains(&TokenKind::COLON_COLON_EQ));
        assert!(k.contains(&TokenKind::EQ));
    }

    #[test]
    fn test_lex_integer_radixes() {
        assert_eq!(kinds("42")[0], TokenKind::DEC_INTEGER);
        assert_eq!(kinds("0xFF")[0], TokenKind::HEX_INTEGER);
        assert_eq!(kinds("0b1010")[0], TokenKind::BIN_INTEGER);
        assert_eq!(kinds("0o77")[0], TokenKind::OCT_INTEGER);
    }

    #[test]
    fn test_lex_reals() {
        assert_eq!(kinds("3.14")[0], TokenKind::REAL);
        assert_eq!(kinds("1.5e10")[0], TokenKind::REAL);
        assert_eq!(kinds("2e-4")[0], TokenKind::REAL);
        // '1..2' is a range, not a real
        assert_eq!(
            kinds("1..2"),
            vec![
                TokenKind::DEC_INTEGER,
                TokenKind::DOT_DOT,
                TokenKind::DEC_INTEGER
            ]
        );
    }

    #[test]
    fn test_lex_unrestricted_name() {
        let (tokens, diags) = tokenize("'fuel tank'");
        assert!(diags.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::UNRESTRICTED_NAME);
        assert_eq!(tokens[0].text, "'fuel tank'");
    }

    #[test]
    fn test_lex_doc_vs_block_comment() {
        assert_eq!(kinds("/** doc */")[0], TokenKind::DOC_COMMENT);
        assert_eq!(kinds("/* plain */")[0], TokenKind::BLOCK_COMMENT);
        assert_eq!(kinds("/**/")[0], TokenKind::BLOCK_COMMENT);
        assert_eq!(kinds("/* a **/")[0], TokenKind::BLOCK_COMMENT);
    }

    #[test]
    fn test_lex_wildcard_import() {
        let k = kinds("import Lib::*;");
        assert_eq!(
            k,
            vec![
                TokenKind::IMPORT_KW,
                TokenKind::WHITESPACE,
                TokenKind::IDENT,
                TokenKind::COLON_COLON,
                TokenKind::STAR,
                TokenKind::SEMICOLON,
            ]
        );
        let k = kinds("import Lib::**;");
        assert!(k.contains(&TokenKind::STAR_STAR));
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diags) = tokenize("attribute x = \"oops;\npart def P;");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unterminated string"));
        // Anchored at the opening quote.
        assert_eq!(diags[0].range.start.offset, 14);
        // Lexing resumes after the whitespace boundary.
        let k: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(k.contains(&TokenKind::LEXER_ERROR));
        assert!(k.contains(&TokenKind::PART_KW));
    }

    #[test]
    fn test_unterminated_block_comment_at_eof() {
        let (tokens, diags) = tokenize("part def P; /* dangling");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unterminated block comment"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::LEXER_ERROR));
    }

    #[test]
    fn test_unterminated_name() {
        let (_, diags) = tokenize("part 'half named");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unterminated name"));
    }

    #[test]
    fn test_spans_track_lines() {
        let (tokens, _) = tokenize("package P {\n  part def X;\n}");
        let part = tokens
            .iter()
            .find(|t| t.kind == TokenKind::PART_KW)
            .unwrap();
        assert_eq!(part.span.start.line, 1);
        assert_eq!(part.span.start.column, 2);
        let rbrace = tokens
            .iter()
            .find(|t| t.kind == TokenKind::R_BRACE)
            .unwrap();
        assert_eq!(rbrace.span.start.line, 2);
    }

    #[test]
    fn test_keyword_lexeme_matches_token() {
        let (tokens, _) = tokenize("package");
        assert_eq!(
            tokens[0].kind.keyword_lexeme(),
            Some(tokens[0].text),
            "keyword lexeme table out of sync with lexer"
        );
    }
}
