//! Lexing and parsing for SysML v2 / KerML.
//!
//! `parse_source` is the front door: source text in, typed AST plus
//! diagnostics out. The submodules follow the pipeline: `token_kind` and
//! `lexer` produce the token stream, `parser` holds the recursive-descent
//! state, and `grammar/` carries one function per production.

pub mod grammar;
pub mod lexer;
pub mod messages;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token_kind;

pub use lexer::{lex_significant, tokenize, Lexer, Token};
pub use parser::{parse_source, ParseOutcome, Parser};
pub use token_kind::TokenKind;
