// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The expression factory: `create_expression` turns a parse-tree node into
//! an [`Expression`]. Operator precedence is already encoded in the shape
//! of the tree the embedder's grammar produces (`spec.md` §4.5) — this
//! factory recognizes each shape by child count and child kind, the way
//! the source recognizes binary/unary/ternary/n-ary productions, rather
//! than re-deriving precedence itself.
//!
//! Tree shapes this factory understands (documented here since no real
//! grammar is vendored into this workspace, `SPEC_FULL.md` §E):
//!
//! - A bare terminal: a literal token, or (when `allow_column_expressions`)
//!   an `Identifier`/`QuotedIdentifier` (bare column) or `Star` (bare `*`).
//! - `RuleId::ColumnRef` with 1 child (`column` or `*`) or 2 children
//!   (`table.column` or `table.*`).
//! - `RuleId::SignedNumber`: an optional `Minus`/`Plus` child plus a
//!   `NumberLiteral` child — the sign is folded into literal narrowing
//!   before the narrowest holding type is chosen.
//! - `RuleId::Expr`/`RuleId::SimpleExpr` with exactly one child: a
//!   parenthesized sub-expression or grammar pass-through; recurse.
//! - Two children `[op, operand]`: a prefix unary operator
//!   (`+ - ~ NOT`).
//! - Three children `[Cast, operand, type_name]`: a `CAST` application.
//! - Three children `[left, op, right]` where `op` is an infix operator
//!   token (arithmetic, bitwise, shift, comparison, `AND`/`OR`, bare
//!   `IS`/`LIKE`/`IN`).
//! - `RuleId::BetweenExpr` with 3 children `[value, low, high]` or 4
//!   children `[value, Not, low, high]`.
//! - Four children `[left, Is, Not, right]`, `[left, Not, Like, right]`,
//!   or `[value, Not, In, list]`: the negated forms of the three above.
//! - `RuleId::ExprList`/`RuleId::InList`: a sequence of child expressions.

use std::time::{SystemTime, UNIX_EPOCH};

use sqlfront_cst::{navigator, CstNode, NodeKind, RuleId, TokenKind};
use sqlfront_ir::{
    AllColumnsReference, BinaryOperator, ColumnReference, Expression, ExpressionLimits,
    NullEvaluationContext, RawDateTime, UnaryOperator, Variant,
};

use crate::error::{expr_error_at, FactoryError, FactoryResult};

/// Entry point. `allow_column_expressions` gates `SingleColumnReference`/
/// `AllColumnsReference` construction: `false` in contexts the source
/// forbids column references (`INSERT ... VALUES`, `LIMIT`, `OFFSET`),
/// raising [`FactoryError::ColumnNotAllowedHere`] (`spec.md` §4.5).
pub fn create_expression<N: CstNode>(node: &N, allow_column_expressions: bool) -> FactoryResult<Expression> {
    match node.kind() {
        NodeKind::Terminal(tok) => create_literal_terminal(node, tok, allow_column_expressions),
        NodeKind::NonTerminal(rule) => match rule {
            RuleId::Expr | RuleId::SimpleExpr => create_operator_chain(node, rule, allow_column_expressions),
            RuleId::SignedNumber => create_signed_number(node),
            RuleId::LiteralValue => create_literal_value(node, allow_column_expressions),
            RuleId::ColumnRef => create_column_ref(node, allow_column_expressions),
            RuleId::ExprList | RuleId::InList => create_list(node, allow_column_expressions),
            RuleId::BetweenExpr => create_operator_chain(node, rule, allow_column_expressions),
            _ => Err(unsupported_shape(node)),
        },
    }
}

fn unsupported_shape<N: CstNode>(node: &N) -> FactoryError {
    FactoryError::UnsupportedExpressionShape {
        line: node.line(),
        column: node.column(),
    }
}

/// Canonicalizes an identifier to the catalog's uppercase form (`spec.md`
/// §4.6, §8 scenario 3): unlike a quoted string literal, a quoted
/// identifier's interior is uppercased too, matching the source.
pub(crate) fn normalize_identifier(name: &str) -> String {
    name.to_ascii_uppercase()
}

fn create_literal_terminal<N: CstNode>(
    node: &N,
    tok: TokenKind,
    allow_column_expressions: bool,
) -> FactoryResult<Expression> {
    match tok {
        TokenKind::StringLiteral => Ok(Expression::Constant(Variant::String(navigator::unquote_string(
            node.text(),
        )))),
        TokenKind::HexLiteral => create_hex_literal(node),
        TokenKind::NumberLiteral => narrow_numeric_literal(node.text(), false, node),
        TokenKind::Null => Ok(Expression::Constant(Variant::Null)),
        TokenKind::True => Ok(Expression::Constant(Variant::Bool(true))),
        TokenKind::False => Ok(Expression::Constant(Variant::Bool(false))),
        TokenKind::CurrentDate => Ok(Expression::Constant(Variant::DateTime(RawDateTime::date_only(
            now_days(),
        )))),
        TokenKind::CurrentTime => Ok(Expression::Constant(Variant::DateTime(RawDateTime::time_only(
            now_seconds_of_day(),
        )))),
        TokenKind::CurrentTimestamp => Ok(Expression::Constant(Variant::DateTime(RawDateTime {
            date: now_days(),
            time_of_day: now_seconds_of_day(),
            has_date: true,
            has_time: true,
        }))),
        TokenKind::Identifier | TokenKind::QuotedIdentifier => {
            if !allow_column_expressions {
                return Err(FactoryError::ColumnNotAllowedHere {
                    line: node.line(),
                    column: node.column(),
                });
            }
            let name = normalize_identifier(&navigator::extract_object_name(node)?);
            Ok(Expression::SingleColumnReference(ColumnReference::new("", name)))
        }
        TokenKind::Star => {
            if !allow_column_expressions {
                return Err(FactoryError::ColumnNotAllowedHere {
                    line: node.line(),
                    column: node.column(),
                });
            }
            Ok(Expression::AllColumnsReference(AllColumnsReference::new(None)))
        }
        _ => Err(unsupported_shape(node)),
    }
}

fn now_days() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    (secs / 86_400) as i32
}

fn now_seconds_of_day() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    (secs % 86_400) as u32
}

/// Strips the `x'...'`/`X'...'` delimiters from a hex-blob literal's raw
/// lexeme and validates/decodes the interior (`spec.md` §4.5, §8 negative
/// scenarios: odd length and non-hex digits are distinct errors).
fn create_hex_literal<N: CstNode>(node: &N) -> FactoryResult<Expression> {
    let text = node.text();
    let bad_format = || FactoryError::InvalidConstant {
        line: node.line(),
        column: node.column(),
        text: text.to_string(),
    };
    let after_x = text.strip_prefix('x').or_else(|| text.strip_prefix('X')).ok_or_else(bad_format)?;
    let interior = after_x
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(bad_format)?;
    if interior.len() % 2 != 0 {
        return Err(FactoryError::OddHexLiteral {
            line: node.line(),
            column: node.column(),
            text: text.to_string(),
        });
    }
    let mut bytes = Vec::with_capacity(interior.len() / 2);
    let chars: Vec<char> = interior.chars().collect();
    for pair in chars.chunks(2) {
        let s: String = pair.iter().collect();
        let byte = u8::from_str_radix(&s, 16).map_err(|_| FactoryError::InvalidHexDigit {
            line: node.line(),
            column: node.column(),
            text: text.to_string(),
        })?;
        bytes.push(byte);
    }
    Ok(Expression::Constant(Variant::Binary(bytes)))
}

/// Numeric literal narrowing (`spec.md` §4.5): tried as unsigned, then
/// signed, then double — never `f32`, to avoid precision loss. `negate`
/// flips the sign before the narrowest holding type is chosen, so `-200`
/// selects `Int16`, not a wrapped `UInt8`.
fn narrow_numeric_literal<N: CstNode>(text: &str, negate: bool, node: &N) -> FactoryResult<Expression> {
    let bad = || FactoryError::InvalidNumericLiteral {
        line: node.line(),
        column: node.column(),
        text: text.to_string(),
    };
    if text.contains('.') || text.contains('e') || text.contains('E') {
        let mut v: f64 = text.parse().map_err(|_| bad())?;
        if negate {
            v = -v;
        }
        return Ok(Expression::Constant(Variant::Double(v)));
    }
    let magnitude: u128 = text.parse().map_err(|_| bad())?;
    if negate {
        let signed = -(magnitude as i128);
        narrow_signed(signed).map(Expression::Constant).ok_or_else(bad)
    } else if let Some(v) = narrow_unsigned(magnitude) {
        Ok(Expression::Constant(v))
    } else {
        Ok(Expression::Constant(Variant::Double(magnitude as f64)))
    }
}

fn narrow_unsigned(magnitude: u128) -> Option<Variant> {
    if magnitude <= u8::MAX as u128 {
        Some(Variant::UInt8(magnitude as u8))
    } else if magnitude <= u16::MAX as u128 {
        Some(Variant::UInt16(magnitude as u16))
    } else if magnitude <= u32::MAX as u128 {
        Some(Variant::UInt32(magnitude as u32))
    } else if magnitude <= u64::MAX as u128 {
        Some(Variant::UInt64(magnitude as u64))
    } else {
        None
    }
}

fn narrow_signed(value: i128) -> Option<Variant> {
    if value >= i8::MIN as i128 && value <= i8::MAX as i128 {
        Some(Variant::Int8(value as i8))
    } else if value >= i16::MIN as i128 && value <= i16::MAX as i128 {
        Some(Variant::Int16(value as i16))
    } else if value >= i32::MIN as i128 && value <= i32::MAX as i128 {
        Some(Variant::Int32(value as i32))
    } else if value >= i64::MIN as i128 && value <= i64::MAX as i128 {
        Some(Variant::Int64(value as i64))
    } else {
        Some(Variant::Double(value as f64))
    }
}

fn create_signed_number<N: CstNode>(node: &N) -> FactoryResult<Expression> {
    let mut negate = false;
    let mut number: Option<N> = None;
    for child in node.children() {
        match child.terminal_type() {
            TokenKind::Minus => negate = true,
            TokenKind::Plus => {}
            TokenKind::NumberLiteral => number = Some(child),
            _ => {}
        }
    }
    match number {
        Some(n) => narrow_numeric_literal(n.text(), negate, &n),
        None => Err(unsupported_shape(node)),
    }
}

fn create_literal_value<N: CstNode>(node: &N, allow_column_expressions: bool) -> FactoryResult<Expression> {
    let children = node.children();
    match children.len() {
        1 => create_expression(&children[0], allow_column_expressions),
        0 => create_literal_terminal(node, node.terminal_type(), allow_column_expressions),
        _ => Err(unsupported_shape(node)),
    }
}

fn create_column_ref<N: CstNode>(node: &N, allow_column_expressions: bool) -> FactoryResult<Expression> {
    if !allow_column_expressions {
        return Err(FactoryError::ColumnNotAllowedHere {
            line: node.line(),
            column: node.column(),
        });
    }
    let children = node.children();
    match children.len() {
        1 => {
            let c = &children[0];
            if c.terminal_type() == TokenKind::Star {
                Ok(Expression::AllColumnsReference(AllColumnsReference::new(None)))
            } else {
                let name = normalize_identifier(&navigator::extract_object_name(c)?);
                Ok(Expression::SingleColumnReference(ColumnReference::new("", name)))
            }
        }
        2 => {
            let table = normalize_identifier(&navigator::extract_object_name(&children[0])?);
            let c = &children[1];
            if c.terminal_type() == TokenKind::Star {
                Ok(Expression::AllColumnsReference(AllColumnsReference::new(Some(table))))
            } else {
                let column = normalize_identifier(&navigator::extract_object_name(c)?);
                Ok(Expression::SingleColumnReference(ColumnReference::new(table, column)))
            }
        }
        _ => Err(unsupported_shape(node)),
    }
}

fn create_list<N: CstNode>(node: &N, allow_column_expressions: bool) -> FactoryResult<Expression> {
    let items = node
        .children()
        .iter()
        .map(|c| create_expression(c, allow_column_expressions))
        .collect::<FactoryResult<Vec<_>>>()?;
    Ok(Expression::List(items))
}

/// Builds the list of variant children for an `IN` predicate, rejecting an
/// empty list per `spec.md` §4.5/§4.3 (`EmptyInList`).
fn create_in_list<N: CstNode>(node: &N, allow_column_expressions: bool) -> FactoryResult<Vec<Expression>> {
    let items = node
        .children()
        .iter()
        .map(|c| create_expression(c, allow_column_expressions))
        .collect::<FactoryResult<Vec<_>>>()?;
    if items.is_empty() {
        return Err(FactoryError::EmptyInList {
            line: node.line(),
            column: node.column(),
        });
    }
    Ok(items)
}

fn unary_op_from_token(tok: TokenKind) -> Option<UnaryOperator> {
    match tok {
        TokenKind::Plus => Some(UnaryOperator::UnaryPlus),
        TokenKind::Minus => Some(UnaryOperator::UnaryMinus),
        TokenKind::Tilde => Some(UnaryOperator::BitwiseComplement),
        TokenKind::Not => Some(UnaryOperator::LogicalNot),
        _ => None,
    }
}

fn binary_op_from_token(tok: TokenKind) -> Option<BinaryOperator> {
    use BinaryOperator::*;
    match tok {
        TokenKind::And => Some(LogicalAnd),
        TokenKind::Or => Some(LogicalOr),
        TokenKind::Plus => Some(Add),
        TokenKind::Minus => Some(Subtract),
        TokenKind::Star => Some(Multiply),
        TokenKind::Slash => Some(Divide),
        TokenKind::Percent => Some(Modulo),
        TokenKind::Concat => Some(Concatenate),
        TokenKind::Pipe => Some(BitwiseOr),
        TokenKind::Ampersand => Some(BitwiseAnd),
        TokenKind::Caret => Some(BitwiseXor),
        TokenKind::LeftShift => Some(LeftShift),
        TokenKind::RightShift => Some(RightShift),
        TokenKind::Equal | TokenKind::EqualEqual => Some(Equal),
        TokenKind::NotEqual | TokenKind::LtGt => Some(NotEqual),
        TokenKind::Less => Some(Less),
        TokenKind::LessEqual => Some(LessOrEqual),
        TokenKind::Greater => Some(Greater),
        TokenKind::GreaterEqual => Some(GreaterOrEqual),
        _ => None,
    }
}

fn create_operator_chain<N: CstNode>(node: &N, rule: RuleId, allow_column_expressions: bool) -> FactoryResult<Expression> {
    let children = node.children();
    match children.len() {
        1 => create_expression(&children[0], allow_column_expressions),
        2 => create_unary_shape(node, &children, allow_column_expressions),
        3 => create_ternary_shape(node, rule, &children, allow_column_expressions),
        4 => create_quaternary_shape(node, rule, &children, allow_column_expressions),
        _ => Err(unsupported_shape(node)),
    }
}

fn create_unary_shape<N: CstNode>(node: &N, children: &[N], allow_column_expressions: bool) -> FactoryResult<Expression> {
    let (op_node, operand_node) = (&children[0], &children[1]);
    let op = unary_op_from_token(op_node.terminal_type()).ok_or_else(|| unsupported_shape(node))?;
    let operand = create_expression(operand_node, allow_column_expressions)?;
    Ok(Expression::Unary {
        op,
        operand: Box::new(operand),
    })
}

fn create_ternary_shape<N: CstNode>(
    node: &N,
    rule: RuleId,
    children: &[N],
    allow_column_expressions: bool,
) -> FactoryResult<Expression> {
    let (a, b, c) = (&children[0], &children[1], &children[2]);

    if a.terminal_type() == TokenKind::Cast {
        let operand = create_expression(b, allow_column_expressions)?;
        let target_name = navigator::extract_object_name(c)?;
        return Ok(Expression::Cast {
            operand: Box::new(operand),
            target: Box::new(Expression::Constant(Variant::String(target_name))),
        });
    }

    if rule == RuleId::BetweenExpr {
        return create_between(a, b, c, false, allow_column_expressions);
    }

    if b.kind().is_terminal() {
        let tok = b.terminal_type();
        if tok == TokenKind::In {
            let value = create_expression(a, allow_column_expressions)?;
            let list = create_in_list(c, allow_column_expressions)?;
            return Ok(Expression::In {
                not_in: false,
                value: Box::new(value),
                list,
            });
        }
        if tok == TokenKind::Is {
            let left = create_expression(a, allow_column_expressions)?;
            let right = create_expression(c, allow_column_expressions)?;
            return Ok(Expression::Is {
                is_not: false,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        if tok == TokenKind::Like {
            let value = create_expression(a, allow_column_expressions)?;
            let pattern = create_expression(c, allow_column_expressions)?;
            return Ok(Expression::Like {
                not_like: false,
                value: Box::new(value),
                pattern: Box::new(pattern),
            });
        }
        if let Some(op) = binary_op_from_token(tok) {
            let left = create_expression(a, allow_column_expressions)?;
            let right = create_expression(c, allow_column_expressions)?;
            return Ok(Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
    }

    Err(unsupported_shape(node))
}

fn create_quaternary_shape<N: CstNode>(
    node: &N,
    rule: RuleId,
    children: &[N],
    allow_column_expressions: bool,
) -> FactoryResult<Expression> {
    if rule == RuleId::BetweenExpr {
        let (value, not_tok, low, high) = (&children[0], &children[1], &children[2], &children[3]);
        if not_tok.terminal_type() != TokenKind::Not {
            return Err(unsupported_shape(node));
        }
        return create_between(value, low, high, true, allow_column_expressions);
    }

    let (a, b, c, d) = (&children[0], &children[1], &children[2], &children[3]);
    if b.terminal_type() == TokenKind::Is && c.terminal_type() == TokenKind::Not {
        let left = create_expression(a, allow_column_expressions)?;
        let right = create_expression(d, allow_column_expressions)?;
        return Ok(Expression::Is {
            is_not: true,
            left: Box::new(left),
            right: Box::new(right),
        });
    }
    if b.terminal_type() == TokenKind::Not && c.terminal_type() == TokenKind::Like {
        let value = create_expression(a, allow_column_expressions)?;
        let pattern = create_expression(d, allow_column_expressions)?;
        return Ok(Expression::Like {
            not_like: true,
            value: Box::new(value),
            pattern: Box::new(pattern),
        });
    }
    if b.terminal_type() == TokenKind::Not && c.terminal_type() == TokenKind::In {
        let value = create_expression(a, allow_column_expressions)?;
        let list = create_in_list(d, allow_column_expressions)?;
        return Ok(Expression::In {
            not_in: true,
            value: Box::new(value),
            list,
        });
    }
    Err(unsupported_shape(node))
}

/// Builds a `BETWEEN`, folding it to a `Bool` constant when `value`, `low`
/// and `high` are all constants (`spec.md` §4.5 "Constant folding").
fn create_between<N: CstNode>(
    value_node: &N,
    low_node: &N,
    high_node: &N,
    not_between: bool,
    allow_column_expressions: bool,
) -> FactoryResult<Expression> {
    let value = create_expression(value_node, allow_column_expressions)?;
    let low = create_expression(low_node, allow_column_expressions)?;
    let high = create_expression(high_node, allow_column_expressions)?;

    // A Null bound makes the BETWEEN's result depend on the caller's
    // `three_valued_between` setting (see `crates/ir/src/expr/eval.rs`),
    // which isn't known at lowering time; leave those unfolded so they are
    // evaluated later with the limits actually in effect.
    let all_constant_and_non_null = matches!(
        (&value, &low, &high),
        (Expression::Constant(v), Expression::Constant(l), Expression::Constant(h))
            if !v.is_null() && !l.is_null() && !h.is_null()
    );
    if all_constant_and_non_null {
        let folded = Expression::Between {
            not_between,
            value: Box::new(value),
            low: Box::new(low),
            high: Box::new(high),
        };
        let limits = ExpressionLimits::default();
        return folded
            .evaluate(&NullEvaluationContext, &limits)
            .map(Expression::Constant)
            .map_err(|e| expr_error_at(value_node.line(), value_node.column(), e));
    }

    Ok(Expression::Between {
        not_between,
        value: Box::new(value),
        low: Box::new(low),
        high: Box::new(high),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlfront_cst::testing::MockNode;
    use sqlfront_cst::TokenKind as Tok;
    use sqlfront_ir::Variant;

    fn col(name: &str) -> MockNode {
        MockNode::identifier(name, 1, 1)
    }

    #[test]
    fn bare_column_reference() {
        let node = col("C1");
        let e = create_expression(&node, true).unwrap();
        assert_eq!(
            e,
            Expression::SingleColumnReference(ColumnReference::new("", "C1"))
        );
    }

    #[test]
    fn column_reference_rejected_outside_allowed_context() {
        let node = col("C1");
        let err = create_expression(&node, false).unwrap_err();
        assert!(matches!(err, FactoryError::ColumnNotAllowedHere { .. }));
    }

    #[test]
    fn qualified_column_reference() {
        let node = MockNode::rule(RuleId::ColumnRef).push(MockNode::identifier("T", 1, 1)).push(MockNode::identifier("C", 1, 3));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(e, Expression::SingleColumnReference(ColumnReference::new("T", "C")));
    }

    #[test]
    fn bare_star_is_all_columns() {
        let node = MockNode::terminal(Tok::Star, "*", 1, 1);
        let e = create_expression(&node, true).unwrap();
        assert_eq!(e, Expression::AllColumnsReference(AllColumnsReference::new(None)));
    }

    #[test]
    fn qualified_star_is_all_columns() {
        let node = MockNode::rule(RuleId::ColumnRef)
            .push(MockNode::identifier("T", 1, 1))
            .push(MockNode::terminal(Tok::Star, "*", 1, 3));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(
            e,
            Expression::AllColumnsReference(AllColumnsReference::new(Some("T".to_string())))
        );
    }

    #[test]
    fn numeric_literal_chooses_narrowest_unsigned_kind() {
        let node = MockNode::number_literal("1", 1, 1);
        let e = create_expression(&node, true).unwrap();
        assert_eq!(e, Expression::Constant(Variant::UInt8(1)));
    }

    #[test]
    fn negated_signed_number_widens_and_flips_sign() {
        let node = MockNode::rule(RuleId::SignedNumber)
            .push(MockNode::terminal(Tok::Minus, "-", 1, 1))
            .push(MockNode::number_literal("200", 1, 2));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(e, Expression::Constant(Variant::Int16(-200)));
    }

    #[test]
    fn hex_literal_decodes_to_binary() {
        let node = MockNode::terminal(Tok::HexLiteral, "x'0123456789'", 1, 1);
        let e = create_expression(&node, true).unwrap();
        assert_eq!(
            e,
            Expression::Constant(Variant::Binary(vec![0x01, 0x23, 0x45, 0x67, 0x89]))
        );
    }

    #[test]
    fn odd_length_hex_literal_is_rejected() {
        let node = MockNode::terminal(Tok::HexLiteral, "x'abcdef1'", 1, 1);
        let err = create_expression(&node, true).unwrap_err();
        assert!(matches!(err, FactoryError::OddHexLiteral { .. }));
    }

    #[test]
    fn invalid_hex_digit_is_rejected() {
        let node = MockNode::terminal(Tok::HexLiteral, "x'abcdefgh'", 1, 1);
        let err = create_expression(&node, true).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidHexDigit { .. }));
    }

    #[test]
    fn is_not_null_predicate() {
        let node = MockNode::rule(RuleId::Expr)
            .push(col("C1"))
            .push(MockNode::terminal(Tok::Is, "IS", 1, 4))
            .push(MockNode::terminal(Tok::Not, "NOT", 1, 7))
            .push(MockNode::terminal(Tok::Null, "NULL", 1, 11));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(
            e,
            Expression::Is {
                is_not: true,
                left: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "C1"))),
                right: Box::new(Expression::Constant(Variant::Null)),
            }
        );
    }

    #[test]
    fn not_between_constant_folds() {
        // value, Not, low, high is the 4-child shape.
        let node = MockNode::rule(RuleId::BetweenExpr)
            .push(MockNode::number_literal("50", 1, 1))
            .push(MockNode::terminal(Tok::Not, "NOT", 1, 4))
            .push(MockNode::number_literal("10", 1, 8))
            .push(MockNode::number_literal("100", 1, 12));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(e, Expression::Constant(Variant::Bool(true)));
    }

    #[test]
    fn between_with_null_bound_is_left_unfolded() {
        // A Null bound's result depends on the evaluator's
        // `three_valued_between` setting, which isn't known at lowering
        // time, so this must stay a `Between` node rather than fold to a
        // baked-in `Bool` constant.
        let node = MockNode::rule(RuleId::BetweenExpr)
            .push(MockNode::number_literal("50", 1, 1))
            .push(MockNode::terminal(Tok::Null, "NULL", 1, 8))
            .push(MockNode::number_literal("100", 1, 12));
        let e = create_expression(&node, true).unwrap();
        assert!(matches!(e, Expression::Between { .. }));
    }

    #[test]
    fn empty_in_list_is_rejected() {
        let node = MockNode::rule(RuleId::Expr)
            .push(col("C1"))
            .push(MockNode::terminal(Tok::In, "IN", 1, 4))
            .push(MockNode::rule(RuleId::InList));
        let err = create_expression(&node, true).unwrap_err();
        assert!(matches!(err, FactoryError::EmptyInList { .. }));
    }

    #[test]
    fn cast_wraps_target_type_as_string_constant() {
        let node = MockNode::rule(RuleId::Expr)
            .push(MockNode::terminal(Tok::Cast, "CAST", 1, 1))
            .push(col("C1"))
            .push(MockNode::identifier("INT", 1, 10));
        let e = create_expression(&node, true).unwrap();
        assert_eq!(
            e,
            Expression::Cast {
                operand: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "C1"))),
                target: Box::new(Expression::Constant(Variant::String("INT".to_string()))),
            }
        );
    }
}
