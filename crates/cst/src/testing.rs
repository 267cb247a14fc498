// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! An in-memory `CstNode` implementation and a small set of builder
//! helpers for constructing parse trees by hand in tests, without
//! depending on any real parser. Lives behind no feature flag — unit and
//! integration tests in this workspace (and in `sqlfront-lowering`) use
//! it directly.

use crate::node::{CstNode, NodeKind};
use crate::rule::{RuleId, TokenKind};

/// An owned, cloneable parse-tree node built by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockNode {
    kind: NodeKind,
    text: String,
    line: u32,
    column: u32,
    children: Vec<MockNode>,
}

impl MockNode {
    /// A terminal (token) node.
    pub fn terminal(token: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode {
            kind: NodeKind::Terminal(token),
            text: text.into(),
            line,
            column,
            children: Vec::new(),
        }
    }

    /// A non-terminal (rule) node with no children yet; use
    /// [`MockNode::with_children`] or [`MockNode::push`] to attach them.
    pub fn rule(rule: RuleId) -> Self {
        MockNode {
            kind: NodeKind::NonTerminal(rule),
            text: String::new(),
            line: 1,
            column: 1,
            children: Vec::new(),
        }
    }

    /// Builder-style: attach `children` and return `self`.
    pub fn with_children(mut self, children: impl IntoIterator<Item = MockNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Builder-style: attach a single child and return `self`.
    pub fn push(mut self, child: MockNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style: override the position derived from this node's
    /// first child (useful for a rule node that should report a specific
    /// source position).
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    // Convenience constructors for common leaf shapes a SQL statement is
    // built from, mirroring the shape the original engine's own parse
    // tree exposes for these tokens.

    pub fn identifier(text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode::terminal(TokenKind::Identifier, text, line, column)
    }

    pub fn quoted_identifier(text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode::terminal(TokenKind::QuotedIdentifier, text, line, column)
    }

    pub fn string_literal(text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode::terminal(TokenKind::StringLiteral, text, line, column)
    }

    pub fn number_literal(text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode::terminal(TokenKind::NumberLiteral, text, line, column)
    }

    /// An `AnyName` rule node wrapping a single identifier terminal.
    pub fn any_name(text: impl Into<String>, line: u32, column: u32) -> Self {
        MockNode::rule(RuleId::AnyName)
            .at(line, column)
            .push(MockNode::identifier(text, line, column))
    }
}

impl CstNode for MockNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}

/// A tiny builder for a translation unit: a `SqlStmt` list of statements,
/// as `statement_count`/`find_statement` expect at the root.
#[derive(Debug, Default)]
pub struct MockTreeBuilder {
    statements: Vec<MockNode>,
}

impl MockTreeBuilder {
    pub fn new() -> Self {
        MockTreeBuilder::default()
    }

    pub fn statement(mut self, stmt: MockNode) -> Self {
        self.statements.push(stmt);
        self
    }

    pub fn build(self) -> MockNode {
        MockNode::rule(RuleId::SqlStmt).with_children(self.statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator;

    #[test]
    fn builder_produces_expected_child_count() {
        let tree = MockTreeBuilder::new()
            .statement(MockNode::rule(RuleId::CommitStmt))
            .statement(MockNode::rule(RuleId::RollbackStmt))
            .build();
        assert_eq!(navigator::statement_count(&tree), 2);
        assert!(navigator::is_statement(&tree, 0, RuleId::CommitStmt));
        assert!(navigator::is_statement(&tree, 1, RuleId::RollbackStmt));
    }

    #[test]
    fn any_name_round_trips_through_navigator() {
        let node = MockNode::any_name("my_table", 3, 8);
        assert_eq!(navigator::any_name_text(&node).unwrap(), "my_table");
    }

    #[test]
    fn quoted_identifier_is_unquoted() {
        let quoted = MockNode::quoted_identifier("\"weird name\"", 1, 1);
        assert_eq!(
            navigator::extract_object_name(&quoted).unwrap(),
            "weird name"
        );
    }

    #[test]
    fn terminal_position_is_captured() {
        let node = MockNode::identifier("x", 5, 9);
        assert_eq!(navigator::capture_terminal_position(&node).unwrap(), (5, 9));
    }

    #[test]
    fn capturing_a_non_terminal_position_is_an_error() {
        let node = MockNode::rule(RuleId::SelectStmt);
        assert!(navigator::capture_terminal_position(&node).is_err());
    }
}
