//! Token kinds for the SysML v2 / KerML lexer.
//!
//! A closed set: trivia, literals, punctuation and keywords. Every keyword
//! is also usable as an identifier; the parser decides which role a keyword
//! token plays at each call site (see `Parser::at_name_token`).

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (skipped before parsing)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    /// `/** ... */` — significant: consumed by doc/comment/rep productions.
    DOC_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    /// `'...'` — quotes retained in the lexeme.
    UNRESTRICTED_NAME,
    DEC_INTEGER,
    HEX_INTEGER,
    BIN_INTEGER,
    OCT_INTEGER,
    REAL,
    STRING,

    // =========================================================================
    // PUNCTUATION (multi-char first for readability; logos orders by length)
    // =========================================================================
    L_BRACE,           // {
    R_BRACE,           // }
    L_BRACKET,         // [
    R_BRACKET,         // ]
    L_PAREN,           // (
    R_PAREN,           // )
    COMMA,             // ,
    SEMICOLON,         // ;
    COLON,             // :
    COLON_COLON,       // ::
    COLON_GT,          // :>
    COLON_GT_GT,       // :>>
    COLON_EQ,          // :=
    COLON_COLON_EQ,    // ::=
    EQ,                // =
    HASH,              // #
    AT,                // @
    DOT,               // .
    DOT_DOT,           // ..
    STAR,              // *
    STAR_STAR,         // **
    SLASH,             // /
    PERCENT,           // %
    PLUS,              // +
    MINUS,             // -
    BANG,              // !
    TILDE,             // ~
    LT,                // <
    LT_EQ,             // <=
    GT,                // >
    GT_EQ,             // >=
    EQ_EQ,             // ==
    BANG_EQ,           // !=
    EQ_EQ_EQ,          // ===
    BANG_EQ_EQ,        // !==
    QUESTION,          // ?
    QUESTION_QUESTION, // ??

    // =========================================================================
    // KEYWORDS (alphabetical; the contiguous ABOUT_KW..=XOR_KW range is what
    // `is_keyword` tests — keep new keywords inside it)
    // =========================================================================
    ABOUT_KW,
    ABSTRACT_KW,
    ACCEPT_KW,
    ACTION_KW,
    ACTOR_KW,
    ALIAS_KW,
    ALL_KW,
    ALLOCATION_KW,
    ANALYSIS_KW,
    AND_KW,
    AS_KW,
    ASSERT_KW,
    ASSIGN_KW,
    ATTRIBUTE_KW,
    BIND_KW,
    BINDING_KW,
    BY_KW,
    CALC_KW,
    CASE_KW,
    COMMENT_KW,
    COMPOSITE_KW,
    CONCERN_KW,
    CONJUGATE_KW,
    CONNECT_KW,
    CONNECTION_KW,
    CONSTRAINT_KW,
    DEF_KW,
    DEPENDENCY_KW,
    DERIVED_KW,
    DISJOINT_KW,
    DO_KW,
    DOC_KW,
    ELSE_KW,
    END_KW,
    ENTRY_KW,
    ENUM_KW,
    ENUMERATION_KW,
    EXIT_KW,
    FALSE_KW,
    FEATURE_KW,
    FIRST_KW,
    FLOW_KW,
    FOR_KW,
    FROM_KW,
    HASTYPE_KW,
    IF_KW,
    IMPLIES_KW,
    IMPORT_KW,
    IN_KW,
    INOUT_KW,
    INTERFACE_KW,
    ISTYPE_KW,
    ITEM_KW,
    LANGUAGE_KW,
    LIBRARY_KW,
    LOCALE_KW,
    META_KW,
    METADATA_KW,
    NAMESPACE_KW,
    NOT_KW,
    NULL_KW,
    OCCURRENCE_KW,
    OF_KW,
    OR_KW,
    OUT_KW,
    PACKAGE_KW,
    PARALLEL_KW,
    PART_KW,
    PERFORM_KW,
    PORT_KW,
    PORTION_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    REDEFINES_KW,
    REDEFINITION_KW,
    REF_KW,
    REFERENCES_KW,
    RENDERING_KW,
    REP_KW,
    REQUIRE_KW,
    REQUIREMENT_KW,
    RETURN_KW,
    SEND_KW,
    SPECIALIZATION_KW,
    SPECIALIZES_KW,
    STANDARD_KW,
    STATE_KW,
    SUBCLASSIFICATION_KW,
    SUBCLASSIFIER_KW,
    SUBJECT_KW,
    SUBSET_KW,
    SUBSETS_KW,
    SUBTYPE_KW,
    SUCCESSION_KW,
    THEN_KW,
    TO_KW,
    TRANSITION_KW,
    TRUE_KW,
    TYPED_KW,
    UNTIL_KW,
    USE_KW,
    VARIANT_KW,
    VERIFICATION_KW,
    VIA_KW,
    VIEW_KW,
    VIEWPOINT_KW,
    WHILE_KW,
    XOR_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognised or unterminated input; diagnostics carry the detail.
    LEXER_ERROR,
    EOF,
}

impl TokenKind {
    /// Trivia is dropped before the token stream reaches the parser.
    /// Doc comments are not trivia: `doc`/`comment`/`rep` consume them.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::WHITESPACE | TokenKind::LINE_COMMENT | TokenKind::BLOCK_COMMENT
        )
    }

    /// Every keyword is usable as an identifier in name positions.
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (TokenKind::ABOUT_KW as u16) && (self as u16) <= (TokenKind::XOR_KW as u16)
    }

    /// Token kinds accepted wherever a name is expected: identifiers,
    /// unrestricted names, and any keyword (demoted to its lexeme).
    pub fn is_name(self) -> bool {
        matches!(self, TokenKind::IDENT | TokenKind::UNRESTRICTED_NAME) || self.is_keyword()
    }

    pub fn is_integer_literal(self) -> bool {
        matches!(
            self,
            TokenKind::DEC_INTEGER
                | TokenKind::HEX_INTEGER
                | TokenKind::BIN_INTEGER
                | TokenKind::OCT_INTEGER
        )
    }

    /// Human-readable name for expectation messages.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            WHITESPACE => "whitespace",
            LINE_COMMENT | BLOCK_COMMENT => "comment",
            DOC_COMMENT => "doc comment",
            IDENT => "identifier",
            UNRESTRICTED_NAME => "name",
            DEC_INTEGER | HEX_INTEGER | BIN_INTEGER | OCT_INTEGER => "integer",
            REAL => "number",
            STRING => "string",
            L_BRACE => "'{'",
            R_BRACE => "'}'",
            L_BRACKET => "'['",
            R_BRACKET => "']'",
            L_PAREN => "'('",
            R_PAREN => "')'",
            COMMA => "','",
            SEMICOLON => "';'",
            COLON => "':'",
            COLON_COLON => "'::'",
            COLON_GT => "':>'",
            COLON_GT_GT => "':>>'",
            COLON_EQ => "':='",
            COLON_COLON_EQ => "'::='",
            EQ => "'='",
            HASH => "'#'",
            AT => "'@'",
            DOT => "'.'",
            DOT_DOT => "'..'",
            STAR => "'*'",
            STAR_STAR => "'**'",
            SLASH => "'/'",
            PERCENT => "'%'",
            PLUS => "'+'",
            MINUS => "'-'",
            BANG => "'!'",
            TILDE => "'~'",
            LT => "'<'",
            LT_EQ => "'<='",
            GT => "'>'",
            GT_EQ => "'>='",
            EQ_EQ => "'=='",
            BANG_EQ => "'!='",
            EQ_EQ_EQ => "'==='",
            BANG_EQ_EQ => "'!=='",
            QUESTION => "'?'",
            QUESTION_QUESTION => "'??'",
            LEXER_ERROR => "invalid token",
            EOF => "end of file",
            kw if kw.is_keyword() => kw.keyword_lexeme().unwrap_or("keyword"),
            _ => "token",
        }
    }

    /// The source lexeme of a keyword kind, `None` for non-keywords.
    pub fn keyword_lexeme(self) -> Option<&'static str> {
        use TokenKind::*;
        let lexeme = match self {
            ABOUT_KW => "about",
            ABSTRACT_KW => "abstract",
            ACCEPT_KW => "accept",
            ACTION_KW => "action",
            ACTOR_KW => "actor",
            ALIAS_KW => "alias",
            ALL_KW => "all",
            ALLOCATION_KW => "allocation",
            ANALYSIS_KW => "analysis",
            AND_KW => "and",
            AS_KW => "as",
            ASSERT_KW => "assert",
            ASSIGN_KW => "assign",
            ATTRIBUTE_KW => "attribute",
            BIND_KW => "bind",
            BINDING_KW => "binding",
            BY_KW => "by",
            CALC_KW => "calc",
            CASE_KW => "case",
            COMMENT_KW => "comment",
            COMPOSITE_KW => "composite",
            CONCERN_KW => "concern",
            CONJUGATE_KW => "conjugate",
            CONNECT_KW => "connect",
            CONNECTION_KW => "connection",
            CONSTRAINT_KW => "constraint",
            DEF_KW => "def",
            DEPENDENCY_KW => "dependency",
            DERIVED_KW => "derived",
            DISJOINT_KW => "disjoint",
            DO_KW => "do",
            DOC_KW => "doc",
            ELSE_KW => "else",
            END_KW => "end",
            ENTRY_KW => "entry",
            ENUM_KW => "enum",
            ENUMERATION_KW => "enumeration",
            EXIT_KW => "exit",
            FALSE_KW => "false",
            FEATURE_KW => "feature",
            FIRST_KW => "first",
            FLOW_KW => "flow",
            FOR_KW => "for",
            FROM_KW => "from",
            HASTYPE_KW => "hastype",
            IF_KW => "if",
            IMPLIES_KW => "implies",
            IMPORT_KW => "import",
            IN_KW => "in",
            INOUT_KW => "inout",
            INTERFACE_KW => "interface",
            ISTYPE_KW => "istype",
            ITEM_KW => "item",
            LANGUAGE_KW => "language",
            LIBRARY_KW => "library",
            LOCALE_KW => "locale",
            META_KW => "meta",
            METADATA_KW => "metadata",
            NAMESPACE_KW => "namespace",
            NOT_KW => "not",
            NULL_KW => "null",
            OCCURRENCE_KW => "occurrence",
            OF_KW => "of",
            OR_KW => "or",
            OUT_KW => "out",
            PACKAGE_KW => "package",
            PARALLEL_KW => "parallel",
            PART_KW => "part",
            PERFORM_KW => "perform",
            PORT_KW => "port",
            PORTION_KW => "portion",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            PUBLIC_KW => "public",
            READONLY_KW => "readonly",
            REDEFINES_KW => "redefines",
            REDEFINITION_KW => "redefinition",
            REF_KW => "ref",
            REFERENCES_KW => "references",
            RENDERING_KW => "rendering",
            REP_KW => "rep",
            REQUIRE_KW => "require",
            REQUIREMENT_KW => "requirement",
            RETURN_KW => "return",
            SEND_KW => "send",
            SPECIALIZATION_KW => "specialization",
            SPECIALIZES_KW => "specializes",
            STANDARD_KW => "standard",
            STATE_KW => "state",
            SUBCLASSIFICATION_KW => "subclassification",
            SUBCLASSIFIER_KW => "subclassifier",
            SUBJECT_KW => "subject",
            SUBSET_KW => "subset",
            SUBSETS_KW => "subsets",
            SUBTYPE_KW => "subtype",
            SUCCESSION_KW => "succession",
            THEN_KW => "then",
            TO_KW => "to",
            TRANSITION_KW => "transition",
            TRUE_KW => "true",
            TYPED_KW => "typed",
            UNTIL_KW => "until",
            USE_KW => "use",
            VARIANT_KW => "variant",
            VERIFICATION_KW => "verification",
            VIA_KW => "via",
            VIEW_KW => "view",
            VIEWPOINT_KW => "viewpoint",
            WHILE_KW => "while",
            XOR_KW => "xor",
            _ => return None,
        };
        Some(lexeme)
    }
}
