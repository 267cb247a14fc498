// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Free functions for walking a `CstNode` tree. These are the only way
//! `sqlfront-lowering`'s factories read a parse tree — no factory matches
//! on node kinds directly, keeping the grammar-shape knowledge in one
//! place.

use thiserror::Error;

use crate::node::{CstNode, NodeKind};
use crate::rule::{RuleId, TokenKind};

/// A navigation failure, always positioned at the node where the
/// expectation was violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("at ({line}, {column}): {message}")]
pub struct NavigatorError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl NavigatorError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        NavigatorError {
            line,
            column,
            message: message.into(),
        }
    }

    fn at<N: CstNode>(node: &N, message: impl Into<String>) -> Self {
        NavigatorError::new(node.line(), node.column(), message)
    }
}

/// Number of top-level statements under a root node (typically a
/// `SqlStmt`-list or translation-unit node).
pub fn statement_count<N: CstNode>(root: &N) -> usize {
    root.children().len()
}

/// The `index`-th top-level statement, or `None` if out of range.
pub fn find_statement<N: CstNode>(root: &N, index: usize) -> Option<N> {
    root.children().into_iter().nth(index)
}

/// Whether the `index`-th statement is a rule application of `rule`.
pub fn is_statement<N: CstNode>(root: &N, index: usize, rule: RuleId) -> bool {
    find_statement(root, index)
        .map(|n| n.non_terminal_type() == rule)
        .unwrap_or(false)
}

/// Depth-first search of `node`'s descendants for the first non-terminal
/// of kind `rule`.
///
/// Searches `node`'s children, not `node` itself — `node` is held by
/// reference and `N` need not be `Clone`, so a match at the root can't be
/// returned; check `node.non_terminal_type()` directly for that case.
pub fn find_non_terminal<N: CstNode>(node: &N, rule: RuleId) -> Option<N> {
    for child in node.children() {
        if child.non_terminal_type() == rule {
            return Some(child);
        }
        if let Some(found) = find_non_terminal(&child, rule) {
            return Some(found);
        }
    }
    None
}

/// Like [`find_non_terminal`] but restricted to `node`'s direct children.
pub fn find_non_terminal_child<N: CstNode>(node: &N, rule: RuleId) -> Option<N> {
    node.children()
        .into_iter()
        .find(|c| c.non_terminal_type() == rule)
}

/// Depth-first search of `node`'s subtree for the first terminal of kind
/// `token`.
pub fn find_terminal<N: CstNode>(node: &N, token: TokenKind) -> Option<N> {
    for child in node.children() {
        if child.terminal_type() == token {
            return Some(child);
        }
        if let Some(found) = find_terminal(&child, token) {
            return Some(found);
        }
    }
    None
}

/// Like [`find_terminal`] but restricted to `node`'s direct children.
pub fn find_terminal_child<N: CstNode>(node: &N, token: TokenKind) -> Option<N> {
    node.children()
        .into_iter()
        .find(|c| c.terminal_type() == token)
}

/// Whether any direct child of `node` is the terminal `token`.
pub fn has_terminal_child<N: CstNode>(node: &N, token: TokenKind) -> bool {
    find_terminal_child(node, token).is_some()
}

/// `(line, column)` of `node`, requiring it to be a terminal — mirrors
/// the source's position-capture helper, which only ever points at
/// tokens, never at rule spans.
pub fn capture_terminal_position<N: CstNode>(node: &N) -> Result<(u32, u32), NavigatorError> {
    match node.kind() {
        NodeKind::Terminal(_) => Ok((node.line(), node.column())),
        NodeKind::NonTerminal(_) => Err(NavigatorError::at(
            node,
            "expected a terminal node to capture a source position",
        )),
    }
}

/// Strip SQL single-quote (or double-quote) string delimiters and
/// collapse doubled quote-escapes (`''` -> `'`, `""` -> `"`) in the
/// interior. `text` is expected to already include the surrounding
/// quote characters, as produced by a `StringLiteral`/`QuotedIdentifier`
/// token's raw lexeme.
pub fn unquote_string(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return text.to_string();
    }
    let quote = bytes[0];
    if quote != b'\'' && quote != b'"' {
        return text.to_string();
    }
    if bytes[bytes.len() - 1] != quote {
        return text.to_string();
    }
    let interior = &text[1..text.len() - 1];
    let doubled = core::iter::repeat(quote as char).take(2).collect::<String>();
    let single = (quote as char).to_string();
    interior.replace(doubled.as_str(), single.as_str())
}

/// The name carried by an `AnyName`-shaped node: a single identifier or
/// quoted-identifier terminal child, unquoted if necessary. Returns an
/// error positioned at `node` if no such terminal is present.
pub fn any_name_text<N: CstNode>(node: &N) -> Result<String, NavigatorError> {
    if let Some(ident) = find_terminal_child(node, TokenKind::Identifier) {
        return Ok(ident.text().to_string());
    }
    if let Some(quoted) = find_terminal_child(node, TokenKind::QuotedIdentifier) {
        return Ok(unquote_string(quoted.text()));
    }
    Err(NavigatorError::at(
        node,
        "expected an identifier or quoted identifier",
    ))
}

/// Extracts an object name (table, database, user, index, ...) from a
/// node that wraps (directly or through a single `AnyName` child) an
/// identifier or quoted identifier.
pub fn extract_object_name<N: CstNode>(node: &N) -> Result<String, NavigatorError> {
    if node.terminal_type() == TokenKind::Identifier {
        return Ok(node.text().to_string());
    }
    if node.terminal_type() == TokenKind::QuotedIdentifier {
        return Ok(unquote_string(node.text()));
    }
    if let Some(any_name) = find_non_terminal_child(node, RuleId::AnyName) {
        return any_name_text(&any_name);
    }
    any_name_text(node)
}
