//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! ```text
//! conditional ?:  (right)
//!   implies       (right)
//!     or, xor     (left)
//!       and       (left)
//!         ??      (left)
//!           hastype istype as @ meta   (left)
//!             == != === !==            (left)
//!               < <= > >=              (left)
//!                 ..                   (non-assoc)
//!                   + -                (left)
//!                     * / %            (left)
//!                       **             (right)
//!                         unary + - ! not ~
//!                           postfix .name (args)
//!                             atoms
//! ```

use super::helpers::{name_value, parse_qualified_name, take_name, unescape_string};
use crate::ast::{
    BinaryOp, ClassificationOp, LiteralValue, NodeId, NodeKind, UnaryOp,
};
use crate::parser::parser::Parser;
use crate::parser::token_kind::TokenKind;

/// Tokens that can begin an expression.
pub(super) fn at_expression_start(p: &Parser) -> bool {
    matches!(
        p.current_kind(),
        TokenKind::DEC_INTEGER
            | TokenKind::HEX_INTEGER
            | TokenKind::BIN_INTEGER
            | TokenKind::OCT_INTEGER
            | TokenKind::REAL
            | TokenKind::STRING
            | TokenKind::TRUE_KW
            | TokenKind::FALSE_KW
            | TokenKind::NULL_KW
            | TokenKind::L_PAREN
            | TokenKind::PLUS
            | TokenKind::MINUS
            | TokenKind::BANG
            | TokenKind::NOT_KW
            | TokenKind::TILDE
            | TokenKind::ALL_KW
            | TokenKind::HASTYPE_KW
            | TokenKind::ISTYPE_KW
    ) || p.at_name_token()
}

/// Entry point: parse one expression, always yielding a node. On failure an
/// error is recorded and a null literal stands in (no token is consumed;
/// callers recover at their own sync points).
pub fn parse_expression(p: &mut Parser) -> NodeId {
    if !p.enter_expr() {
        return error_expr(p);
    }
    let expr = parse_conditional(p);
    p.exit_expr();
    expr
}

fn error_expr(p: &mut Parser) -> NodeId {
    let span = p.current_span();
    p.alloc(
        NodeKind::Literal {
            value: LiteralValue::Null,
        },
        span,
    )
}

/// `cond ? then : else`, right-associative.
fn parse_conditional(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let condition = parse_implies(p);

    if p.at(TokenKind::QUESTION) {
        p.bump();
        let then_branch = parse_expression(p);
        let else_branch = if p.expect(TokenKind::COLON) {
            Some(parse_expression(p))
        } else {
            None
        };
        let span = p.span_from(start);
        return p.alloc_adopting(
            NodeKind::Conditional {
                condition,
                then_branch,
                else_branch,
            },
            span,
        );
    }
    condition
}

/// `a implies b`, right-associative.
fn parse_implies(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let lhs = parse_or_xor(p);
    if p.eat(TokenKind::IMPLIES_KW) {
        let rhs = parse_implies(p);
        let span = p.span_from(start);
        return p.alloc_adopting(
            NodeKind::Binary {
                op: BinaryOp::Implies,
                lhs,
                rhs,
            },
            span,
        );
    }
    lhs
}

fn parse_or_xor(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_and(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::OR_KW => BinaryOp::Or,
            TokenKind::XOR_KW => BinaryOp::Xor,
            _ => break,
        };
        p.bump();
        let rhs = parse_and(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(NodeKind::Binary { op, lhs, rhs }, span);
    }
    lhs
}

fn parse_and(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_null_coalescing(p);
    while p.at(TokenKind::AND_KW) {
        p.bump();
        let rhs = parse_null_coalescing(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(
            NodeKind::Binary {
                op: BinaryOp::And,
                lhs,
                rhs,
            },
            span,
        );
    }
    lhs
}

fn parse_null_coalescing(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_classification(p);
    while p.at(TokenKind::QUESTION_QUESTION) {
        p.bump();
        let rhs = parse_classification(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(
            NodeKind::Binary {
                op: BinaryOp::NullCoalesce,
                lhs,
                rhs,
            },
            span,
        );
    }
    lhs
}

/// Classification: `x istype T`, `x as T`, `x @ T`, `x meta T`; the prefix
/// forms `hastype T` / `istype T` classify an implicit subject.
fn parse_classification(p: &mut Parser) -> NodeId {
    let start = p.start_pos();

    if matches!(
        p.current_kind(),
        TokenKind::HASTYPE_KW | TokenKind::ISTYPE_KW
    ) {
        let op = if p.current_kind() == TokenKind::HASTYPE_KW {
            ClassificationOp::HasType
        } else {
            ClassificationOp::IsType
        };
        p.bump();
        let type_ref = parse_qualified_name(p);
        let span = p.span_from(start);
        return p.alloc_adopting(
            NodeKind::Classification {
                op,
                operand: None,
                type_ref,
            },
            span,
        );
    }

    let mut lhs = parse_equality(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::HASTYPE_KW => ClassificationOp::HasType,
            TokenKind::ISTYPE_KW => ClassificationOp::IsType,
            TokenKind::AS_KW => ClassificationOp::Cast,
            TokenKind::AT => ClassificationOp::AtType,
            TokenKind::META_KW => ClassificationOp::Meta,
            _ => break,
        };
        p.bump();
        let type_ref = parse_qualified_name(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(
            NodeKind::Classification {
                op,
                operand: Some(lhs),
                type_ref,
            },
            span,
        );
    }
    lhs
}

fn parse_equality(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_relational(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::EQ_EQ => BinaryOp::Equal,
            TokenKind::BANG_EQ => BinaryOp::NotEqual,
            TokenKind::EQ_EQ_EQ => BinaryOp::Same,
            TokenKind::BANG_EQ_EQ => BinaryOp::NotSame,
            _ => break,
        };
        p.bump();
        let rhs = parse_relational(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(NodeKind::Binary { op, lhs, rhs }, span);
    }
    lhs
}

fn parse_relational(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_range(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::LT => BinaryOp::Less,
            TokenKind::LT_EQ => BinaryOp::LessEqual,
            TokenKind::GT => BinaryOp::Greater,
            TokenKind::GT_EQ => BinaryOp::GreaterEqual,
            _ => break,
        };
        p.bump();
        let rhs = parse_range(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(NodeKind::Binary { op, lhs, rhs }, span);
    }
    lhs
}

/// `a .. b`, non-associative.
fn parse_range(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let lower = parse_additive(p);
    if p.at(TokenKind::DOT_DOT) {
        p.bump();
        let upper = parse_additive(p);
        let span = p.span_from(start);
        return p.alloc_adopting(NodeKind::Range { lower, upper }, span);
    }
    lower
}

fn parse_additive(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_multiplicative(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::PLUS => BinaryOp::Add,
            TokenKind::MINUS => BinaryOp::Subtract,
            _ => break,
        };
        p.bump();
        let rhs = parse_multiplicative(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(NodeKind::Binary { op, lhs, rhs }, span);
    }
    lhs
}

fn parse_multiplicative(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut lhs = parse_power(p);
    loop {
        let op = match p.current_kind() {
            TokenKind::STAR => BinaryOp::Multiply,
            TokenKind::SLASH => BinaryOp::Divide,
            TokenKind::PERCENT => BinaryOp::Modulo,
            _ => break,
        };
        p.bump();
        let rhs = parse_power(p);
        let span = p.span_from(start);
        lhs = p.alloc_adopting(NodeKind::Binary { op, lhs, rhs }, span);
    }
    lhs
}

/// `a ** b`, right-associative by recursing on the right operand.
fn parse_power(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let lhs = parse_unary(p);
    if p.at(TokenKind::STAR_STAR) {
        p.bump();
        if !p.enter_expr() {
            return lhs;
        }
        let rhs = parse_power(p);
        p.exit_expr();
        let span = p.span_from(start);
        return p.alloc_adopting(
            NodeKind::Binary {
                op: BinaryOp::Power,
                lhs,
                rhs,
            },
            span,
        );
    }
    lhs
}

fn parse_unary(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let op = match p.current_kind() {
        TokenKind::PLUS => Some(UnaryOp::Plus),
        TokenKind::MINUS => Some(UnaryOp::Minus),
        TokenKind::BANG | TokenKind::NOT_KW => Some(UnaryOp::Not),
        TokenKind::TILDE => Some(UnaryOp::Complement),
        _ => None,
    };
    if let Some(op) = op {
        p.bump();
        if !p.enter_expr() {
            return error_expr(p);
        }
        let operand = parse_unary(p);
        p.exit_expr();
        let span = p.span_from(start);
        return p.alloc_adopting(NodeKind::Unary { op, operand }, span);
    }
    parse_postfix(p)
}

/// Postfix: feature chains `.name` and invocations `(args)`.
fn parse_postfix(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    let mut expr = parse_atom(p);
    loop {
        match p.current_kind() {
            TokenKind::DOT if p.nth(1).is_name() => {
                p.bump();
                let kind = p.current_kind();
                let text = p.bump_text();
                let member = name_value(kind, text);
                let span = p.span_from(start);
                expr = p.alloc_adopting(
                    NodeKind::FeatureChain {
                        target: expr,
                        member,
                    },
                    span,
                );
            }
            TokenKind::L_PAREN => {
                p.bump();
                let arguments = parse_argument_list(p);
                p.expect(TokenKind::R_PAREN);
                let span = p.span_from(start);
                expr = p.alloc_adopting(
                    NodeKind::Invocation {
                        callee: expr,
                        arguments,
                    },
                    span,
                );
            }
            _ => break,
        }
    }
    expr
}

/// Invocation arguments: positional expressions, or `name = expr` pairs.
fn parse_argument_list(p: &mut Parser) -> Vec<NodeId> {
    let mut arguments = Vec::new();
    if p.at(TokenKind::R_PAREN) {
        return arguments;
    }
    loop {
        arguments.push(parse_argument(p));
        if !p.eat(TokenKind::COMMA) {
            break;
        }
        if p.at(TokenKind::R_PAREN) {
            break;
        }
    }
    arguments
}

fn parse_argument(p: &mut Parser) -> NodeId {
    if p.at_name_token() && p.nth(1) == TokenKind::EQ {
        let start = p.start_pos();
        let name = take_name(p).unwrap_or_default();
        p.bump(); // =
        let value = parse_expression(p);
        let span = p.span_from(start);
        return p.alloc_adopting(NodeKind::NamedArgument { name, value }, span);
    }
    parse_expression(p)
}

fn parse_atom(p: &mut Parser) -> NodeId {
    let start = p.start_pos();
    match p.current_kind() {
        TokenKind::TRUE_KW | TokenKind::FALSE_KW => {
            let value = LiteralValue::Bool(p.current_kind() == TokenKind::TRUE_KW);
            p.bump();
            let span = p.span_from(start);
            p.alloc(NodeKind::Literal { value }, span)
        }
        TokenKind::NULL_KW => {
            p.bump();
            let span = p.span_from(start);
            p.alloc(
                NodeKind::Literal {
                    value: LiteralValue::Null,
                },
                span,
            )
        }
        TokenKind::DEC_INTEGER
        | TokenKind::HEX_INTEGER
        | TokenKind::BIN_INTEGER
        | TokenKind::OCT_INTEGER => {
            let kind = p.current_kind();
            let text = p.bump_text();
            let value = match parse_integer(kind, text) {
                Some(v) => LiteralValue::Integer(v),
                None => {
                    p.error(format!("integer literal '{}' out of range", text));
                    LiteralValue::Integer(i64::MAX)
                }
            };
            let span = p.span_from(start);
            p.alloc(NodeKind::Literal { value }, span)
        }
        TokenKind::REAL => {
            let text = p.bump_text();
            let value = LiteralValue::Real(text.parse().unwrap_or(f64::NAN));
            let span = p.span_from(start);
            p.alloc(NodeKind::Literal { value }, span)
        }
        TokenKind::STRING => {
            let text = p.bump_text();
            let inner = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text);
            let value = LiteralValue::String(unescape_string(inner));
            let span = p.span_from(start);
            p.alloc(NodeKind::Literal { value }, span)
        }
        TokenKind::L_PAREN => {
            p.bump();
            let inner = parse_expression(p);
            p.expect(TokenKind::R_PAREN);
            let span = p.span_from(start);
            p.alloc_adopting(NodeKind::Paren { inner }, span)
        }
        TokenKind::ALL_KW => {
            p.bump();
            let type_ref = parse_qualified_name(p);
            let span = p.span_from(start);
            p.alloc_adopting(NodeKind::Extent { type_ref }, span)
        }
        kind if kind.is_name() => parse_qualified_name(p),
        _ => {
            p.error_expected(&[
                TokenKind::IDENT,
                TokenKind::DEC_INTEGER,
                TokenKind::STRING,
                TokenKind::TRUE_KW,
                TokenKind::L_PAREN,
                TokenKind::MINUS,
                TokenKind::NOT_KW,
            ]);
            error_expr(p)
        }
    }
}

/// Parse an integer literal lexeme in any of the four radixes.
pub(crate) fn parse_integer(kind: TokenKind, text: &str) -> Option<i64> {
    match kind {
        TokenKind::DEC_INTEGER => text.parse().ok(),
        TokenKind::HEX_INTEGER => i64::from_str_radix(&text[2..], 16).ok(),
        TokenKind::BIN_INTEGER => i64::from_str_radix(&text[2..], 2).ok(),
        TokenKind::OCT_INTEGER => i64::from_str_radix(&text[2..], 8).ok(),
        _ => None,
    }
}
