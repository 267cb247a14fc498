// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Binary (de)serialization: `<var-int discriminant><node-specific payload>`.
//! Not self-delimiting at the top level — callers frame it with their own
//! length prefix, same as the variant format it nests.

use super::{
    AllColumnsReference, BinaryOperator, ColumnReference, Expression, ExpressionType, UnaryOperator,
};
use crate::variant::{read_varint, write_varint, Variant, VariantDecodeError};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ExpressionDecodeError {
    #[error("truncated expression buffer")]
    UnexpectedEof,
    #[error("unknown expression discriminant {0}")]
    UnknownDiscriminant(u64),
    #[error("discriminant {0:?} is reserved and not constructible")]
    UnsupportedExpressionShape(ExpressionType),
    #[error("flag byte must be 0 or 1, found {0}")]
    InvalidFlag(u8),
    #[error(transparent)]
    Variant(#[from] VariantDecodeError),
}

impl Expression {
    /// Exact length of `write_expression(self, ..)`'s output, computed by
    /// actually serializing rather than estimating (the format has no
    /// fixed-size fast path to exploit).
    pub fn serialized_size(&self) -> usize {
        let mut buf = Vec::new();
        write_expression(self, &mut buf).expect("a validated tree serializes");
        buf.len()
    }

    /// Appends this node's binary encoding to `buf`. A thin method wrapper
    /// over [`write_expression`], kept alongside it for symmetry with
    /// `Variant::serialize`.
    pub fn serialize(&self, buf: &mut Vec<u8>) -> Result<(), ExpressionDecodeError> {
        write_expression(self, buf)
    }

    /// Decodes one expression from the front of `buf`, returning it with
    /// the number of bytes consumed. A thin method wrapper over
    /// [`read_expression`], kept alongside it for symmetry with
    /// `Variant::deserialize`.
    pub fn deserialize(buf: &[u8]) -> Result<(Expression, usize), ExpressionDecodeError> {
        read_expression(buf)
    }
}

pub fn write_expression(e: &Expression, buf: &mut Vec<u8>) -> Result<(), ExpressionDecodeError> {
    write_varint(buf, e.expression_type() as u64);
    match e {
        Expression::Constant(v) => v.serialize(buf)?,
        Expression::SingleColumnReference(c) => write_column_reference(c, buf),
        Expression::AllColumnsReference(a) => write_all_columns(a, buf),
        Expression::List(items) => {
            write_varint(buf, items.len() as u64);
            for item in items {
                write_expression(item, buf)?;
            }
        }
        Expression::Unary { operand, .. } => write_expression(operand, buf)?,
        Expression::Binary { left, right, .. } => {
            write_expression(left, buf)?;
            write_expression(right, buf)?;
        }
        Expression::Cast { operand, target } => {
            write_expression(operand, buf)?;
            write_expression(target, buf)?;
        }
        Expression::Like {
            not_like,
            value,
            pattern,
        } => {
            write_expression(value, buf)?;
            write_expression(pattern, buf)?;
            buf.push(*not_like as u8);
        }
        Expression::Is { is_not, left, right } => {
            write_expression(left, buf)?;
            write_expression(right, buf)?;
            buf.push(*is_not as u8);
        }
        Expression::Between {
            not_between,
            value,
            low,
            high,
        } => {
            write_expression(value, buf)?;
            write_expression(low, buf)?;
            write_expression(high, buf)?;
            buf.push(*not_between as u8);
        }
        Expression::In {
            not_in,
            value,
            list,
        } => {
            write_expression(value, buf)?;
            write_varint(buf, list.len() as u64);
            for item in list {
                write_expression(item, buf)?;
            }
            buf.push(*not_in as u8);
        }
    }
    Ok(())
}

fn write_column_reference(c: &ColumnReference, buf: &mut Vec<u8>) {
    write_varint(buf, c.table_name.len() as u64);
    buf.extend_from_slice(c.table_name.as_bytes());
    write_varint(buf, c.column_name.len() as u64);
    buf.extend_from_slice(c.column_name.as_bytes());
}

fn write_all_columns(a: &AllColumnsReference, buf: &mut Vec<u8>) {
    match &a.table_name {
        Some(name) => {
            buf.push(1);
            write_varint(buf, name.len() as u64);
            buf.extend_from_slice(name.as_bytes());
        }
        None => buf.push(0),
    }
}

pub fn read_expression(buf: &[u8]) -> Result<(Expression, usize), ExpressionDecodeError> {
    let (tag, mut offset) = read_varint(buf).map_err(|_| ExpressionDecodeError::UnexpectedEof)?;
    let kind = ExpressionType::from_tag(tag as u8)
        .ok_or(ExpressionDecodeError::UnknownDiscriminant(tag))?;
    if !kind.is_supported() {
        return Err(ExpressionDecodeError::UnsupportedExpressionShape(kind));
    }
    let rest = &buf[offset..];

    macro_rules! read_child {
        ($rest:expr, $offset:expr) => {{
            let (child, used) = read_expression($rest)?;
            $offset += used;
            child
        }};
    }

    let expr = match kind {
        ExpressionType::Constant => {
            let (v, used) = Variant::deserialize(rest)?;
            offset += used;
            Expression::Constant(v)
        }
        ExpressionType::SingleColumnReference => {
            let (table_name, used) = read_string(rest)?;
            offset += used;
            let (column_name, used2) = read_string(&buf[offset..])?;
            offset += used2;
            Expression::SingleColumnReference(ColumnReference::new(table_name, column_name))
        }
        ExpressionType::AllColumnsReference => {
            let has_table = *rest.first().ok_or(ExpressionDecodeError::UnexpectedEof)?;
            offset += 1;
            let table_name = if has_table == 1 {
                let (name, used) = read_string(&buf[offset..])?;
                offset += used;
                Some(name)
            } else {
                None
            };
            Expression::AllColumnsReference(AllColumnsReference::new(table_name))
        }
        ExpressionType::List => {
            let (count, used) = read_varint(rest)?;
            offset += used;
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(read_child!(&buf[offset..], offset));
            }
            Expression::List(items)
        }
        ExpressionType::LogicalNotOperator
        | ExpressionType::UnaryPlusOperator
        | ExpressionType::UnaryMinusOperator
        | ExpressionType::BitwiseComplementOperator => {
            let operand = read_child!(&buf[offset..], offset);
            let op = match kind {
                ExpressionType::LogicalNotOperator => UnaryOperator::LogicalNot,
                ExpressionType::UnaryPlusOperator => UnaryOperator::UnaryPlus,
                ExpressionType::UnaryMinusOperator => UnaryOperator::UnaryMinus,
                ExpressionType::BitwiseComplementOperator => UnaryOperator::BitwiseComplement,
                _ => unreachable!(),
            };
            Expression::Unary {
                op,
                operand: Box::new(operand),
            }
        }
        ExpressionType::CastOperator => {
            let operand = read_child!(&buf[offset..], offset);
            let target = read_child!(&buf[offset..], offset);
            Expression::Cast {
                operand: Box::new(operand),
                target: Box::new(target),
            }
        }
        ExpressionType::InPredicate => {
            let value = read_child!(&buf[offset..], offset);
            let (count, used) = read_varint(&buf[offset..])?;
            offset += used;
            let mut list = Vec::with_capacity(count as usize);
            for _ in 0..count {
                list.push(read_child!(&buf[offset..], offset));
            }
            let flag = read_flag(&buf[offset..])?;
            offset += 1;
            Expression::In {
                not_in: flag,
                value: Box::new(value),
                list,
            }
        }
        ExpressionType::IsPredicate => {
            let left = read_child!(&buf[offset..], offset);
            let right = read_child!(&buf[offset..], offset);
            let flag = read_flag(&buf[offset..])?;
            offset += 1;
            Expression::Is {
                is_not: flag,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        ExpressionType::BetweenPredicate => {
            let value = read_child!(&buf[offset..], offset);
            let low = read_child!(&buf[offset..], offset);
            let high = read_child!(&buf[offset..], offset);
            let flag = read_flag(&buf[offset..])?;
            offset += 1;
            Expression::Between {
                not_between: flag,
                value: Box::new(value),
                low: Box::new(low),
                high: Box::new(high),
            }
        }
        ExpressionType::LikePredicate => {
            let value = read_child!(&buf[offset..], offset);
            let pattern = read_child!(&buf[offset..], offset);
            let flag = read_flag(&buf[offset..])?;
            offset += 1;
            Expression::Like {
                not_like: flag,
                value: Box::new(value),
                pattern: Box::new(pattern),
            }
        }
        // Remaining supported tags are binary operators (arithmetic, bitwise
        // non-unary, shifts, logical and/or, comparisons, concatenate).
        _ => {
            let left = read_child!(&buf[offset..], offset);
            let right = read_child!(&buf[offset..], offset);
            let op = binary_operator_for(kind);
            Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
    };
    Ok((expr, offset))
}

fn binary_operator_for(kind: ExpressionType) -> BinaryOperator {
    use ExpressionType::*;
    match kind {
        LogicalAndOperator => BinaryOperator::LogicalAnd,
        LogicalOrOperator => BinaryOperator::LogicalOr,
        AddOperator => BinaryOperator::Add,
        SubtractOperator => BinaryOperator::Subtract,
        MultiplyOperator => BinaryOperator::Multiply,
        DivideOperator => BinaryOperator::Divide,
        ModuloOperator => BinaryOperator::Modulo,
        ConcatenateOperator => BinaryOperator::Concatenate,
        BitwiseOrOperator => BinaryOperator::BitwiseOr,
        BitwiseAndOperator => BinaryOperator::BitwiseAnd,
        BitwiseXorOperator => BinaryOperator::BitwiseXor,
        LeftShiftOperator => BinaryOperator::LeftShift,
        RightShiftOperator => BinaryOperator::RightShift,
        EqualPredicate => BinaryOperator::Equal,
        NotEqualPredicate => BinaryOperator::NotEqual,
        LessPredicate => BinaryOperator::Less,
        LessOrEqualPredicate => BinaryOperator::LessOrEqual,
        GreaterOrEqualPredicate => BinaryOperator::GreaterOrEqual,
        GreaterPredicate => BinaryOperator::Greater,
        other => unreachable!("{other:?} is not a binary-shaped discriminant"),
    }
}

fn read_string(buf: &[u8]) -> Result<(String, usize), ExpressionDecodeError> {
    let (len, n) = read_varint(buf)?;
    let len = len as usize;
    let bytes = buf
        .get(n..n + len)
        .ok_or(ExpressionDecodeError::UnexpectedEof)?;
    let s = std::str::from_utf8(bytes)
        .map_err(|_| ExpressionDecodeError::Variant(VariantDecodeError::InvalidUtf8))?
        .to_string();
    Ok((s, n + len))
}

fn read_flag(buf: &[u8]) -> Result<bool, ExpressionDecodeError> {
    let byte = *buf.first().ok_or(ExpressionDecodeError::UnexpectedEof)?;
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ExpressionDecodeError::InvalidFlag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::UnaryOperator;

    fn round_trip(e: &Expression) {
        let mut buf = Vec::new();
        write_expression(e, &mut buf).unwrap();
        let (decoded, used) = read_expression(&buf).unwrap();
        assert_eq!(used, buf.len());
        assert_eq!(&decoded, e);
    }

    #[test]
    fn constant_round_trips() {
        round_trip(&Expression::Constant(Variant::Int32(-7)));
        round_trip(&Expression::Constant(Variant::String("hi".into())));
    }

    #[test]
    fn method_wrappers_match_free_functions() {
        let e = Expression::Constant(Variant::Int32(-7));
        let mut buf = Vec::new();
        e.serialize(&mut buf).unwrap();
        let (decoded, used) = Expression::deserialize(&buf).unwrap();
        assert_eq!(used, buf.len());
        assert_eq!(decoded, e);
    }

    #[test]
    fn column_reference_round_trips() {
        round_trip(&Expression::SingleColumnReference(ColumnReference::new(
            "T", "C",
        )));
        round_trip(&Expression::SingleColumnReference(ColumnReference::new(
            "", "C",
        )));
    }

    #[test]
    fn all_columns_round_trips_with_and_without_table() {
        round_trip(&Expression::AllColumnsReference(AllColumnsReference::new(
            Some("T".to_string()),
        )));
        round_trip(&Expression::AllColumnsReference(AllColumnsReference::new(
            None,
        )));
    }

    #[test]
    fn nested_binary_round_trips() {
        let e = Expression::Binary {
            op: BinaryOperator::Add,
            left: Box::new(Expression::Constant(Variant::UInt8(1))),
            right: Box::new(Expression::Unary {
                op: UnaryOperator::UnaryMinus,
                operand: Box::new(Expression::Constant(Variant::Int32(2))),
            }),
        };
        round_trip(&e);
    }

    #[test]
    fn between_and_in_round_trip_with_flag() {
        round_trip(&Expression::Between {
            not_between: true,
            value: Box::new(Expression::Constant(Variant::Int32(5))),
            low: Box::new(Expression::Constant(Variant::Int32(1))),
            high: Box::new(Expression::Constant(Variant::Int32(10))),
        });
        round_trip(&Expression::In {
            not_in: false,
            value: Box::new(Expression::Constant(Variant::Int32(5))),
            list: vec![
                Expression::Constant(Variant::Int32(1)),
                Expression::Constant(Variant::Int32(5)),
            ],
        });
    }

    #[test]
    fn list_round_trips() {
        round_trip(&Expression::List(vec![
            Expression::Constant(Variant::Int32(1)),
            Expression::Constant(Variant::Int32(2)),
            Expression::Constant(Variant::Int32(3)),
        ]));
    }

    #[test]
    fn reserved_discriminant_is_rejected_on_decode() {
        let mut buf = Vec::new();
        write_varint(&mut buf, ExpressionType::Subquery as u64);
        let err = read_expression(&buf).unwrap_err();
        assert_eq!(
            err,
            ExpressionDecodeError::UnsupportedExpressionShape(ExpressionType::Subquery)
        );
    }

    #[test]
    fn unknown_discriminant_is_rejected_on_decode() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 200);
        let err = read_expression(&buf).unwrap_err();
        assert_eq!(err, ExpressionDecodeError::UnknownDiscriminant(200));
    }

    #[test]
    fn invalid_flag_byte_is_rejected() {
        let mut buf = Vec::new();
        write_varint(&mut buf, ExpressionType::LikePredicate as u64);
        write_expression(&Expression::Constant(Variant::String("a".into())), &mut buf).unwrap();
        write_expression(&Expression::Constant(Variant::String("%".into())), &mut buf).unwrap();
        buf.push(9);
        let err = read_expression(&buf).unwrap_err();
        assert_eq!(err, ExpressionDecodeError::InvalidFlag(9));
    }

    #[test]
    fn serialized_size_matches_actual_buffer_length() {
        let e = Expression::Between {
            not_between: true,
            value: Box::new(Expression::Constant(Variant::Int32(5))),
            low: Box::new(Expression::Constant(Variant::Int32(1))),
            high: Box::new(Expression::Constant(Variant::Int32(10))),
        };
        let mut buf = Vec::new();
        write_expression(&e, &mut buf).unwrap();
        assert_eq!(e.serialized_size(), buf.len());
    }

    #[test]
    fn cast_round_trips() {
        round_trip(&Expression::Cast {
            operand: Box::new(Expression::Constant(Variant::Int32(1))),
            target: Box::new(Expression::Constant(Variant::String("TEXT".into()))),
        });
    }
}
