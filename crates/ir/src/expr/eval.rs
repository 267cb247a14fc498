// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! `validate` and `evaluate`: the two operations that walk an expression
//! tree against an [`EvaluationContext`].

use super::context::EvaluationContext;
use super::like::like_match;
use super::{BinaryOperator, ColumnReference, Expression, ExpressionLimits, ExpressionType, UnaryOperator};
use crate::column_type::ColumnDataType;
use crate::variant::{Variant, ValueError};

/// Every failure `validate`/`evaluate`/`result_value_type` can raise.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ExprError {
    #[error("operand of '{operator}' must be {expected}")]
    InvalidOperandType {
        operator: &'static str,
        expected: &'static str,
    },
    #[error("column reference '{table}.{column}' has no resolved index")]
    UnresolvedReference { table: String, column: String },
    #[error("unknown cast target type '{0}'")]
    UnknownDataType(String),
    #[error("IN list must not be empty")]
    EmptyInList,
    #[error("expression nesting exceeds the configured depth limit")]
    ExpressionTooDeep,
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl Expression {
    pub fn validate(
        &self,
        ctx: &dyn EvaluationContext,
        limits: &ExpressionLimits,
    ) -> Result<(), ExprError> {
        self.validate_depth(ctx, limits, 0)
    }

    fn validate_depth(
        &self,
        ctx: &dyn EvaluationContext,
        limits: &ExpressionLimits,
        depth: u32,
    ) -> Result<(), ExprError> {
        if depth > limits.max_depth {
            return Err(ExprError::ExpressionTooDeep);
        }
        for child in self.children() {
            child.validate_depth(ctx, limits, depth + 1)?;
        }
        match self {
            Expression::Constant(_) | Expression::List(_) => Ok(()),
            Expression::SingleColumnReference(c) => validate_column_reference(c),
            Expression::AllColumnsReference(_) => Ok(()),
            Expression::Unary { op, operand } => validate_unary(*op, operand, ctx),
            Expression::Binary { op, left, right } => validate_binary(*op, left, right, ctx),
            Expression::Cast { target, .. } => cast_target_name(target).map(|_| ()),
            Expression::Like { value, pattern, .. } => {
                require_string_or_null(value, ctx, "LIKE")?;
                require_string_or_null(pattern, ctx, "LIKE")
            }
            Expression::Is { .. } => Ok(()),
            Expression::Between {
                value, low, high, ..
            } => validate_between(value, low, high, ctx),
            Expression::In { list, .. } => {
                if list.is_empty() {
                    Err(ExprError::EmptyInList)
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn evaluate(
        &self,
        ctx: &dyn EvaluationContext,
        limits: &ExpressionLimits,
    ) -> Result<Variant, ExprError> {
        self.evaluate_depth(ctx, limits, 0)
    }

    fn evaluate_depth(
        &self,
        ctx: &dyn EvaluationContext,
        limits: &ExpressionLimits,
        depth: u32,
    ) -> Result<Variant, ExprError> {
        if depth > limits.max_depth {
            return Err(ExprError::ExpressionTooDeep);
        }
        match self {
            Expression::Constant(v) => Ok(v.clone()),
            Expression::SingleColumnReference(c) => {
                let (t, col) = resolved_indices(c)?;
                ctx.value_at(t, col)
                    .ok_or_else(|| unresolved(c))
            }
            Expression::AllColumnsReference(_) => Err(ExprError::InvalidOperandType {
                operator: "*",
                expected: "a scalar context",
            }),
            Expression::List(items) => {
                let mut last = Variant::Null;
                for item in items {
                    last = item.evaluate_depth(ctx, limits, depth + 1)?;
                }
                Ok(last)
            }
            Expression::Unary { op, operand } => {
                let v = operand.evaluate_depth(ctx, limits, depth + 1)?;
                evaluate_unary(*op, &v)
            }
            Expression::Binary { op, left, right } => {
                if op.is_logical() {
                    evaluate_logical(*op, left, right, ctx, limits, depth)
                } else {
                    let l = left.evaluate_depth(ctx, limits, depth + 1)?;
                    let r = right.evaluate_depth(ctx, limits, depth + 1)?;
                    evaluate_binary(*op, &l, &r)
                }
            }
            Expression::Cast { operand, target } => {
                let v = operand.evaluate_depth(ctx, limits, depth + 1)?;
                let target_name = cast_target_name(target)?;
                evaluate_cast(&v, target_name)
            }
            Expression::Like {
                not_like,
                value,
                pattern,
            } => {
                let v = value.evaluate_depth(ctx, limits, depth + 1)?;
                let p = pattern.evaluate_depth(ctx, limits, depth + 1)?;
                if v.is_null() || p.is_null() {
                    return Ok(Variant::Null);
                }
                let (Variant::String(vs), Variant::String(ps)) = (&v, &p) else {
                    return Err(ExprError::InvalidOperandType {
                        operator: "LIKE",
                        expected: "string",
                    });
                };
                let matched = like_match(vs, ps);
                Ok(Variant::Bool(matched != *not_like))
            }
            Expression::Is { is_not, left, right } => {
                let l = left.evaluate_depth(ctx, limits, depth + 1)?;
                let r = right.evaluate_depth(ctx, limits, depth + 1)?;
                let eq = l.is(&r)?;
                Ok(Variant::Bool(eq != *is_not))
            }
            Expression::Between {
                not_between,
                value,
                low,
                high,
            } => evaluate_between(*not_between, value, low, high, ctx, limits, depth, limits.three_valued_between),
            Expression::In {
                not_in,
                value,
                list,
            } => {
                let v = value.evaluate_depth(ctx, limits, depth + 1)?;
                // A Null value never matches, regardless of `notIn`.
                if v.is_null() {
                    return Ok(Variant::Bool(false));
                }
                let mut matched = false;
                for item in list {
                    let iv = item.evaluate_depth(ctx, limits, depth + 1)?;
                    if v.compatible_equal(&iv)? {
                        matched = true;
                        break;
                    }
                }
                Ok(Variant::Bool(matched != *not_in))
            }
        }
    }

    /// Value-type inference: recursive over children per the rules in
    /// the variant/column-type module.
    pub fn result_value_type(&self, ctx: &dyn EvaluationContext) -> Result<ColumnDataType, ExprError> {
        match self {
            Expression::Constant(v) => Ok(crate::column_type::convert_variant_type_to_column_data_type(
                v.value_type(),
            )),
            Expression::SingleColumnReference(c) => {
                let (t, col) = resolved_indices(c)?;
                ctx.column_type_at(t, col).ok_or_else(|| unresolved(c))
            }
            Expression::AllColumnsReference(_) => Err(ExprError::InvalidOperandType {
                operator: "*",
                expected: "a scalar context",
            }),
            Expression::List(items) => match items.last() {
                Some(last) => last.result_value_type(ctx),
                None => Ok(ColumnDataType::Int32),
            },
            Expression::Unary { op, operand } => {
                if *op == UnaryOperator::LogicalNot {
                    Ok(ColumnDataType::Bool)
                } else {
                    operand.result_value_type(ctx)
                }
            }
            Expression::Binary { op, left, right } => {
                if op.is_comparison() || op.is_logical() {
                    Ok(ColumnDataType::Bool)
                } else {
                    let lt = left.result_value_type(ctx)?;
                    let rt = right.result_value_type(ctx)?;
                    if *op == BinaryOperator::Concatenate {
                        Ok(ColumnDataType::Text)
                    } else {
                        Ok(crate::column_type::get_numeric_result_type(lt, rt))
                    }
                }
            }
            Expression::Cast { target, .. } => {
                let target_name = cast_target_name(target)?;
                ColumnDataType::by_name(target_name)
                    .ok_or_else(|| ExprError::UnknownDataType(target_name.to_string()))
            }
            Expression::Like { .. }
            | Expression::Is { .. }
            | Expression::Between { .. }
            | Expression::In { .. } => Ok(ColumnDataType::Bool),
        }
    }

    pub fn column_data_type(&self, ctx: &dyn EvaluationContext) -> Result<ColumnDataType, ExprError> {
        self.result_value_type(ctx)
    }

    /// True when `result_value_type` is already DateTime, or this node is a
    /// string constant whose text parses as a DateTime.
    pub fn can_cast_as_datetime(&self, ctx: &dyn EvaluationContext) -> bool {
        match self {
            Expression::Constant(v) => v.can_cast_as_datetime(),
            _ => matches!(self.result_value_type(ctx), Ok(ColumnDataType::DateTime)),
        }
    }
}

fn unresolved(c: &ColumnReference) -> ExprError {
    ExprError::UnresolvedReference {
        table: c.table_name.clone(),
        column: c.column_name.clone(),
    }
}

fn resolved_indices(c: &ColumnReference) -> Result<(usize, usize), ExprError> {
    c.resolved.get().ok_or_else(|| unresolved(c))
}

fn validate_column_reference(c: &ColumnReference) -> Result<(), ExprError> {
    resolved_indices(c).map(|_| ())
}

fn validate_unary(
    op: UnaryOperator,
    operand: &Expression,
    ctx: &dyn EvaluationContext,
) -> Result<(), ExprError> {
    match op {
        UnaryOperator::LogicalNot => require_bool_or_null(operand, ctx, "NOT"),
        UnaryOperator::UnaryPlus | UnaryOperator::UnaryMinus => {
            require_numeric_or_null(operand, ctx, op.text())
        }
        UnaryOperator::BitwiseComplement => require_integer_or_null(operand, ctx, "~"),
    }
}

fn validate_binary(
    op: BinaryOperator,
    left: &Expression,
    right: &Expression,
    ctx: &dyn EvaluationContext,
) -> Result<(), ExprError> {
    if op.is_logical() {
        require_bool_or_null(left, ctx, op.text())?;
        require_bool_or_null(right, ctx, op.text())
    } else if op.is_bitwise_or_shift() {
        require_integer_or_null(left, ctx, op.text())?;
        require_integer_or_null(right, ctx, op.text())
    } else if op.is_comparison() {
        Ok(())
    } else if op == BinaryOperator::Concatenate {
        Ok(())
    } else {
        require_numeric_or_null(left, ctx, op.text())?;
        require_numeric_or_null(right, ctx, op.text())
    }
}

fn validate_between(
    value: &Expression,
    low: &Expression,
    high: &Expression,
    ctx: &dyn EvaluationContext,
) -> Result<(), ExprError> {
    let numeric = |e: &Expression| -> bool {
        e.result_value_type(ctx)
            .map(ColumnDataType::is_numeric_type)
            .unwrap_or(false)
    };
    let all_numeric = numeric(value) && numeric(low) && numeric(high);
    let all_datetime = value.can_cast_as_datetime(ctx) && low.can_cast_as_datetime(ctx) && high.can_cast_as_datetime(ctx);
    if all_numeric || all_datetime {
        Ok(())
    } else {
        Err(ExprError::InvalidOperandType {
            operator: "BETWEEN",
            expected: "all-numeric or all-DateTime-castable",
        })
    }
}

fn is_null_constant(e: &Expression) -> bool {
    matches!(e, Expression::Constant(Variant::Null))
}

fn require_bool_or_null(
    e: &Expression,
    ctx: &dyn EvaluationContext,
    operator: &'static str,
) -> Result<(), ExprError> {
    if is_null_constant(e) {
        return Ok(());
    }
    match e.result_value_type(ctx) {
        Ok(ColumnDataType::Bool) => Ok(()),
        _ => Err(ExprError::InvalidOperandType {
            operator,
            expected: "boolean",
        }),
    }
}

fn require_numeric_or_null(
    e: &Expression,
    ctx: &dyn EvaluationContext,
    operator: &'static str,
) -> Result<(), ExprError> {
    if is_null_constant(e) {
        return Ok(());
    }
    match e.result_value_type(ctx) {
        Ok(t) if t.is_numeric_type() => Ok(()),
        _ => Err(ExprError::InvalidOperandType {
            operator,
            expected: "numeric",
        }),
    }
}

fn require_integer_or_null(
    e: &Expression,
    ctx: &dyn EvaluationContext,
    operator: &'static str,
) -> Result<(), ExprError> {
    if is_null_constant(e) {
        return Ok(());
    }
    match e.result_value_type(ctx) {
        Ok(t) if t.is_integer_type() => Ok(()),
        _ => Err(ExprError::InvalidOperandType {
            operator,
            expected: "integer",
        }),
    }
}

fn require_string_or_null(
    e: &Expression,
    ctx: &dyn EvaluationContext,
    operator: &'static str,
) -> Result<(), ExprError> {
    if is_null_constant(e) {
        return Ok(());
    }
    match e.result_value_type(ctx) {
        Ok(t) if t.is_string_type() => Ok(()),
        _ => Err(ExprError::InvalidOperandType {
            operator,
            expected: "string",
        }),
    }
}

fn evaluate_unary(op: UnaryOperator, v: &Variant) -> Result<Variant, ExprError> {
    Ok(match op {
        UnaryOperator::LogicalNot => v.logical_not()?,
        UnaryOperator::UnaryPlus => v.unary_plus()?,
        UnaryOperator::UnaryMinus => v.unary_minus()?,
        UnaryOperator::BitwiseComplement => v.bitwise_complement()?,
    })
}

fn evaluate_binary(op: BinaryOperator, l: &Variant, r: &Variant) -> Result<Variant, ExprError> {
    use BinaryOperator::*;
    Ok(match op {
        Add => l.add(r)?,
        Subtract => l.subtract(r)?,
        Multiply => l.multiply(r)?,
        Divide => l.divide(r)?,
        Modulo => l.modulo(r)?,
        Concatenate => Variant::String(l.concatenate(r)),
        BitwiseOr => l.bitwise_or(r)?,
        BitwiseAnd => l.bitwise_and(r)?,
        BitwiseXor => l.bitwise_xor(r)?,
        LeftShift => l.left_shift(r)?,
        RightShift => l.right_shift(r)?,
        Equal => Variant::Bool(l.compatible_equal(r)?),
        NotEqual => Variant::Bool(!l.compatible_equal(r)?),
        Less => Variant::Bool(l.compatible_less(r)?),
        LessOrEqual => Variant::Bool(l.compatible_less(r)? || l.compatible_equal(r)?),
        Greater => Variant::Bool(l.compatible_greater(r)?),
        GreaterOrEqual => Variant::Bool(l.compatible_greater(r)? || l.compatible_equal(r)?),
        LogicalAnd | LogicalOr => unreachable!("handled by evaluate_logical"),
    })
}

fn evaluate_logical(
    op: BinaryOperator,
    left: &Expression,
    right: &Expression,
    ctx: &dyn EvaluationContext,
    limits: &ExpressionLimits,
    depth: u32,
) -> Result<Variant, ExprError> {
    let l = left.evaluate_depth(ctx, limits, depth + 1)?;
    match (op, &l) {
        (BinaryOperator::LogicalAnd, Variant::Bool(false)) => return Ok(Variant::Bool(false)),
        (BinaryOperator::LogicalOr, Variant::Bool(true)) => return Ok(Variant::Bool(true)),
        _ => {}
    }
    let r = right.evaluate_depth(ctx, limits, depth + 1)?;
    if l.is_null() || r.is_null() {
        return Ok(Variant::Null);
    }
    let (Variant::Bool(lb), Variant::Bool(rb)) = (&l, &r) else {
        return Err(ExprError::InvalidOperandType {
            operator: op.text(),
            expected: "boolean",
        });
    };
    Ok(Variant::Bool(match op {
        BinaryOperator::LogicalAnd => *lb && *rb,
        BinaryOperator::LogicalOr => *lb || *rb,
        _ => unreachable!(),
    }))
}

/// Extracts the string literal naming the cast target type. Per §3.3, the
/// right operand of a Cast must be a string constant.
fn cast_target_name(target: &Expression) -> Result<&str, ExprError> {
    match target {
        Expression::Constant(Variant::String(s)) => Ok(s.as_str()),
        _ => Err(ExprError::InvalidOperandType {
            operator: "CAST",
            expected: "a string literal naming the target type",
        }),
    }
}

fn evaluate_cast(v: &Variant, target_type_name: &str) -> Result<Variant, ExprError> {
    let target = ColumnDataType::by_name(target_type_name)
        .ok_or_else(|| ExprError::UnknownDataType(target_type_name.to_string()))?;
    Ok(v.cast_to(target)?)
}

#[allow(clippy::too_many_arguments)]
fn evaluate_between(
    not_between: bool,
    value: &Expression,
    low: &Expression,
    high: &Expression,
    ctx: &dyn EvaluationContext,
    limits: &ExpressionLimits,
    depth: u32,
    three_valued: bool,
) -> Result<Variant, ExprError> {
    let v = value.evaluate_depth(ctx, limits, depth + 1)?;
    let lo = low.evaluate_depth(ctx, limits, depth + 1)?;
    let hi = high.evaluate_depth(ctx, limits, depth + 1)?;
    if v.is_null() || lo.is_null() || hi.is_null() {
        return Ok(if three_valued {
            Variant::Null
        } else {
            Variant::Bool(false)
        });
    }
    let within = (v.compatible_greater(&lo)? || v.compatible_equal(&lo)?)
        && (v.compatible_less(&hi)? || v.compatible_equal(&hi)?);
    Ok(Variant::Bool(within != not_between))
}
