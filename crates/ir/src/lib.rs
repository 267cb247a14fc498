// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlfront-ir
//!
//! Variant values, the column data type registry, the expression tree, and
//! the request record types for a SQL front end. This crate has no I/O and
//! no dependency on any particular parser: it consumes a parse tree only
//! through the narrow contract in `sqlfront-cst`, and is itself consumed by
//! `sqlfront-lowering`'s expression and request factories.

pub mod column_type;
pub mod expr;
pub mod request;
pub mod variant;

pub use column_type::{get_numeric_result_type, ColumnDataType};
pub use expr::{
    like_match, read_expression, write_expression, AllColumnsReference, BinaryOperator,
    ColumnReference, EvaluationContext, Expression, ExpressionDecodeError, ExpressionLimits,
    ExpressionType, ExprError, NullEvaluationContext, UnaryOperator,
};
pub use request::Request;
pub use variant::{RawDateTime, Variant, ValueError, VariantType};
