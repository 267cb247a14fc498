// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Factory errors. Every failure from `create_expression`/`create_request`
//! is fatal to the enclosing call (`spec.md` §7): there is no partial
//! result, no placeholder node, and no recovery path. This is a deliberate
//! divergence from the teacher `lowering` crate's `LoweringOutcome::{Success,
//! Partial, Failed}` graceful-degradation model, recorded in `DESIGN.md`.
//!
//! Every variant carries the `(line, column)` of the offending subtree's
//! first terminal and renders as `at (<line>, <column>): <reason>`,
//! matching `spec.md` §6.4.

use sqlfront_cst::{NavigatorError, SqlSyntaxError};
use sqlfront_ir::ExprError;

pub type FactoryResult<T> = Result<T, FactoryError>;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FactoryError {
    #[error("at ({line}, {column}): {message}")]
    SqlSyntax {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("at ({line}, {column}): {message}")]
    ParseNavigation {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("at ({line}, {column}): invalid constant literal '{text}'")]
    InvalidConstant { line: u32, column: u32, text: String },

    #[error("at ({line}, {column}): invalid numeric literal '{text}'")]
    InvalidNumericLiteral { line: u32, column: u32, text: String },

    #[error("at ({line}, {column}): hex literal '{text}' has an odd number of digits")]
    OddHexLiteral { line: u32, column: u32, text: String },

    #[error("at ({line}, {column}): hex literal '{text}' contains a non-hex digit")]
    InvalidHexDigit { line: u32, column: u32, text: String },

    #[error("at ({line}, {column}): unsupported statement shape")]
    UnsupportedStatement { line: u32, column: u32 },

    #[error("at ({line}, {column}): missing required clause '{clause}'")]
    MissingRequiredClause {
        line: u32,
        column: u32,
        clause: &'static str,
    },

    #[error("at ({line}, {column}): invalid attribute '{key}'")]
    InvalidAttribute { line: u32, column: u32, key: String },

    #[error("at ({line}, {column}): unsupported column constraint")]
    UnsupportedConstraint { line: u32, column: u32 },

    #[error("at ({line}, {column}): unknown data type '{name}'")]
    UnknownDataType { line: u32, column: u32, name: String },

    #[error("at ({line}, {column}): column references are not allowed in this context")]
    ColumnNotAllowedHere { line: u32, column: u32 },

    #[error("at ({line}, {column}): IN list must not be empty")]
    EmptyInList { line: u32, column: u32 },

    #[error("at ({line}, {column}): unsupported expression shape")]
    UnsupportedExpressionShape { line: u32, column: u32 },

    /// A failure from the expression tree's own `validate`/`evaluate`
    /// (used by BETWEEN constant folding, which evaluates the folded
    /// constant eagerly).
    #[error("at ({line}, {column}): {source}")]
    Expr {
        line: u32,
        column: u32,
        #[source]
        source: ExprError,
    },
}

impl FactoryError {
    pub fn position(&self) -> (u32, u32) {
        match self {
            FactoryError::SqlSyntax { line, column, .. }
            | FactoryError::ParseNavigation { line, column, .. }
            | FactoryError::InvalidConstant { line, column, .. }
            | FactoryError::InvalidNumericLiteral { line, column, .. }
            | FactoryError::OddHexLiteral { line, column, .. }
            | FactoryError::InvalidHexDigit { line, column, .. }
            | FactoryError::UnsupportedStatement { line, column }
            | FactoryError::MissingRequiredClause { line, column, .. }
            | FactoryError::InvalidAttribute { line, column, .. }
            | FactoryError::UnsupportedConstraint { line, column }
            | FactoryError::UnknownDataType { line, column, .. }
            | FactoryError::ColumnNotAllowedHere { line, column }
            | FactoryError::EmptyInList { line, column }
            | FactoryError::UnsupportedExpressionShape { line, column }
            | FactoryError::Expr { line, column, .. } => (*line, *column),
        }
    }
}

impl From<SqlSyntaxError> for FactoryError {
    fn from(e: SqlSyntaxError) -> Self {
        FactoryError::SqlSyntax {
            line: e.line,
            column: e.column,
            message: e.message,
        }
    }
}

impl From<NavigatorError> for FactoryError {
    fn from(e: NavigatorError) -> Self {
        FactoryError::ParseNavigation {
            line: e.line,
            column: e.column,
            message: e.message,
        }
    }
}

/// Attaches a position to an [`ExprError`] raised while constant-folding
/// (the only place the expression factory itself evaluates a tree).
pub fn expr_error_at(line: u32, column: u32, source: ExprError) -> FactoryError {
    FactoryError::Expr { line, column, source }
}
