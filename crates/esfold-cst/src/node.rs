// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Concrete syntax tree nodes.

use esfold_ast::{Span, TokenKind};

use crate::rule::Rule;

/// What a CST node is: a token leaf or a grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CstKind {
    Token(TokenKind),
    Rule(Rule),
}

impl CstKind {
    pub fn name(self) -> &'static str {
        match self {
            CstKind::Token(kind) => kind.name(),
            CstKind::Rule(rule) => rule.as_str(),
        }
    }
}

impl std::fmt::Display for CstKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the concrete syntax tree, as produced by the grammar engine.
///
/// Tokens have no children and hold their exact source text in `value`.
/// Rule nodes hold their children in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    pub kind: CstKind,
    pub children: Vec<CstNode>,
    pub value: Option<String>,
    pub span: Span,
}

impl CstNode {
    pub fn token(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind: CstKind::Token(kind), children: Vec::new(), value: Some(text.into()), span }
    }

    /// A rule node spanning its children (empty span if it has none).
    pub fn rule(rule: Rule, children: Vec<CstNode>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::default(),
        };
        Self { kind: CstKind::Rule(rule), children, value: None, span }
    }

    pub fn rule_with_span(rule: Rule, children: Vec<CstNode>, span: Span) -> Self {
        Self { kind: CstKind::Rule(rule), children, value: None, span }
    }

    pub fn as_rule(&self) -> Option<Rule> {
        match self.kind {
            CstKind::Rule(rule) => Some(rule),
            CstKind::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<TokenKind> {
        match self.kind {
            CstKind::Token(kind) => Some(kind),
            CstKind::Rule(_) => None,
        }
    }

    pub fn is_rule(&self, rule: Rule) -> bool {
        self.kind == CstKind::Rule(rule)
    }

    pub fn is_token(&self, kind: TokenKind) -> bool {
        self.kind == CstKind::Token(kind)
    }

    /// Source text of a token; empty for rule nodes.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// First child that is the given production.
    pub fn child_rule(&self, rule: Rule) -> Option<&CstNode> {
        self.children.iter().find(|c| c.is_rule(rule))
    }

    /// First child that is the given token.
    pub fn child_token(&self, kind: TokenKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.is_token(kind))
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CstNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfold_ast::LineMap;

    #[test]
    fn rule_spans_its_children() {
        let map = LineMap::new("a + b");
        let node = CstNode::rule(
            Rule::AdditiveExpression,
            vec![
                CstNode::token(TokenKind::Identifier, "a", map.span(0, 1)),
                CstNode::token(TokenKind::Plus, "+", map.span(2, 3)),
                CstNode::token(TokenKind::Identifier, "b", map.span(4, 5)),
            ],
        );
        assert_eq!(node.span.start.offset, 0);
        assert_eq!(node.span.end.offset, 5);
        assert_eq!(node.as_rule(), Some(Rule::AdditiveExpression));
        assert!(node.child_token(TokenKind::Plus).is_some());
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn empty_rule_has_default_span() {
        let node = CstNode::rule(Rule::StatementList, Vec::new());
        assert!(node.span.is_empty());
        assert_eq!(node.text(), "");
    }
}
