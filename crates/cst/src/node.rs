// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The parse-tree node contract. A real parser's concrete syntax tree is
//! adapted to this trait once, at the boundary; everything above it in
//! this crate and in `sqlfront-lowering` talks only to `CstNode`.

use crate::rule::{RuleId, TokenKind};

/// Whether a node is a rule application (non-terminal) or a token
/// (terminal). Exactly one of `non_terminal`/`terminal` below is
/// meaningful for a given node; the other returns its `Invalid` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    NonTerminal(RuleId),
    Terminal(TokenKind),
}

impl NodeKind {
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeKind::Terminal(_))
    }

    pub fn is_non_terminal(self) -> bool {
        matches!(self, NodeKind::NonTerminal(_))
    }
}

/// A single parse-tree node. Implementors typically wrap a borrowed or
/// reference-counted handle into the parser's own tree; this crate never
/// mutates a node, only reads it.
pub trait CstNode {
    /// `NonTerminal(rule)` or `Terminal(token)`.
    fn kind(&self) -> NodeKind;

    /// Child nodes in source order. Empty for most terminals.
    fn children(&self) -> Vec<Self>
    where
        Self: Sized;

    /// The node's source text. For a terminal this is the token's lexeme;
    /// for a non-terminal it is typically the full span's text, but
    /// callers should not rely on that — prefer reading terminal children.
    fn text(&self) -> &str;

    /// 1-based source line of the node's first character.
    fn line(&self) -> u32;

    /// 1-based source column of the node's first character.
    fn column(&self) -> u32;

    /// Convenience: `RuleId::Invalid` if this node is a terminal.
    fn non_terminal_type(&self) -> RuleId {
        match self.kind() {
            NodeKind::NonTerminal(r) => r,
            NodeKind::Terminal(_) => RuleId::Invalid,
        }
    }

    /// Convenience: `TokenKind::Invalid` if this node is a non-terminal.
    fn terminal_type(&self) -> TokenKind {
        match self.kind() {
            NodeKind::Terminal(t) => t,
            NodeKind::NonTerminal(_) => TokenKind::Invalid,
        }
    }
}
