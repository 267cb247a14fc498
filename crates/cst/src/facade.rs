// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! A thin wrapper that bundles a parsed tree with the syntax error (if
//! any) the underlying parser produced, so factories never need to know
//! the embedder's own parser error type.

use std::fmt::Write as _;

use thiserror::Error;

use crate::navigator;
use crate::node::CstNode;
use crate::rule::RuleId;

/// A SQL syntax error surfaced by the embedder's own parser, normalized
/// to the `(line, column, message)` shape every error in this front end
/// uses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("at ({line}, {column}): {message}")]
pub struct SqlSyntaxError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SqlSyntaxError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        SqlSyntaxError {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Bundles a parse tree's root with any syntax error the parser
/// encountered. An embedder builds one of these per translation unit;
/// `sqlfront-lowering` consumes it statement by statement.
pub struct ParserFacade<N> {
    root: N,
    error: Option<SqlSyntaxError>,
}

impl<N: CstNode> ParserFacade<N> {
    /// Wraps an already-parsed tree. `error` is `Some` when the
    /// underlying parser recovered from a syntax error and the tree may
    /// be partial.
    pub fn new(root: N, error: Option<SqlSyntaxError>) -> Self {
        ParserFacade { root, error }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn statement_count(&self) -> usize {
        navigator::statement_count(&self.root)
    }

    pub fn is_statement(&self, index: usize, rule: RuleId) -> bool {
        navigator::is_statement(&self.root, index, rule)
    }

    pub fn find_statement(&self, index: usize) -> Option<N> {
        navigator::find_statement(&self.root, index)
    }

    /// Replaces the carried error, for an embedder that wants to attach a
    /// parser diagnostic after the fact (e.g. from a recovery pass run
    /// after the tree was built).
    pub fn inject_error(&mut self, line: u32, column: u32, message: impl Into<String>) {
        self.error = Some(SqlSyntaxError::new(line, column, message));
    }

    pub fn error(&self) -> Option<&SqlSyntaxError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// An indented textual dump of the tree, for debugging and snapshot
    /// tests — mirrors the kind of `dump()` helper the teacher's own
    /// parse-tree types expose.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_into(&self.root, 0, &mut out);
        out
    }
}

fn dump_into<N: CstNode>(node: &N, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node.kind() {
        crate::node::NodeKind::NonTerminal(rule) => {
            let _ = writeln!(out, "{indent}{rule:?}");
        }
        crate::node::NodeKind::Terminal(token) => {
            let _ = writeln!(out, "{indent}{token:?} {:?}", node.text());
        }
    }
    for child in node.children() {
        dump_into(&child, depth + 1, out);
    }
}
