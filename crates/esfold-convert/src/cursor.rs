// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Sequential access to a CST node's children.

use esfold_ast::{Token, TokenKind};
use esfold_cst::{CstNode, Rule};

use crate::error::{ConversionError, Result};
use crate::factory;

/// Walks the children of one CST node, the way a parser walks tokens.
///
/// Failures report `component` and a snapshot of the offending child.
pub(crate) struct Cursor<'cst> {
    node: &'cst CstNode,
    pos: usize,
    component: &'static str,
}

impl<'cst> Cursor<'cst> {
    pub fn new(node: &'cst CstNode, component: &'static str) -> Self {
        Self { node, pos: 0, component }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn current(&self) -> Option<&'cst CstNode> {
        self.node.children.get(self.pos)
    }

    pub fn peek(&self, n: usize) -> Option<&'cst CstNode> {
        self.node.children.get(self.pos + n)
    }

    /// Children not yet consumed.
    pub fn rest(&self) -> &'cst [CstNode] {
        self.node.children.get(self.pos..).unwrap_or(&[])
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.node.children.len()
    }

    pub fn advance(&mut self) -> Option<&'cst CstNode> {
        let node = self.current();
        if node.is_some() {
            self.pos += 1;
        }
        node
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current().map_or(false, |n| n.is_token(kind))
    }

    pub fn check_rule(&self, rule: Rule) -> bool {
        self.current().map_or(false, |n| n.is_rule(rule))
    }

    /// Consume the current child if it is the token `kind`.
    pub fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance().map(factory::token)
        } else {
            None
        }
    }

    /// Consume the current child if it spells the contextual word `word`.
    pub fn match_word(&mut self, word: &str) -> Option<Token> {
        match self.current() {
            Some(node) if node.as_token().map_or(false, |kind| kind.is_word(node.text(), word)) => {
                self.advance().map(factory::token)
            }
            _ => None,
        }
    }

    /// Consume the current child if it is the production `rule`.
    pub fn match_rule(&mut self, rule: Rule) -> Option<&'cst CstNode> {
        if self.check_rule(rule) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume `;` if present (absent under ASI).
    pub fn semicolon(&mut self) -> Option<Token> {
        self.match_token(TokenKind::Semicolon)
    }

    // =========================================================================
    // Expectations
    // =========================================================================

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.match_token(kind) {
            Some(token) => Ok(token),
            None => Err(self.error(kind.display_name())),
        }
    }

    pub fn expect_rule(&mut self, rule: Rule) -> Result<&'cst CstNode> {
        match self.match_rule(rule) {
            Some(node) => Ok(node),
            None => Err(self.error(rule.as_str())),
        }
    }

    /// Consume whatever child comes next.
    pub fn expect_node(&mut self, what: &str) -> Result<&'cst CstNode> {
        match self.advance() {
            Some(node) => Ok(node),
            None => Err(self.error(what)),
        }
    }

    /// Error unless every child has been consumed.
    pub fn finish(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("no further children"))
        }
    }

    /// A malformed-subtree error at the current position.
    pub fn error(&self, expected: &str) -> ConversionError {
        match self.current() {
            Some(found) => ConversionError::malformed(self.component, expected, found),
            None => ConversionError::missing(self.component, expected, self.node),
        }
    }
}

/// Split `open ... close` into its delimiter tokens and inner children.
pub(crate) fn delimited<'cst>(
    node: &'cst CstNode,
    open: TokenKind,
    close: TokenKind,
    component: &'static str,
) -> Result<(Token, &'cst [CstNode], Token)> {
    match node.children.as_slice() {
        [first, inner @ .., last] if first.is_token(open) && last.is_token(close) => {
            Ok((factory::token(first), inner, factory::token(last)))
        }
        [first, ..] if !first.is_token(open) => Err(ConversionError::malformed(component, open.display_name(), first)),
        [.., last] => Err(ConversionError::malformed(component, close.display_name(), last)),
        [] => Err(ConversionError::missing(component, open.display_name(), node)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_and_matches() {
        let node = esfold_cst::parse("(IfStatement if '(' (IdentifierReference a) ')' (EmptyStatement ;))").unwrap();
        let mut cursor = Cursor::new(&node, "IfStatement");
        assert_eq!(cursor.expect(TokenKind::If).unwrap().text, "if");
        assert!(cursor.match_token(TokenKind::Else).is_none());
        assert!(cursor.expect(TokenKind::LParen).is_ok());
        assert!(cursor.match_rule(Rule::IdentifierReference).is_some());
        assert!(cursor.check(TokenKind::RParen));
        assert!(cursor.peek(1).map_or(false, |n| n.is_rule(Rule::EmptyStatement)));
        cursor.advance();
        assert!(cursor.finish().is_err());
        cursor.advance();
        assert!(cursor.at_end());
        assert!(cursor.finish().is_ok());
    }

    #[test]
    fn delimited_splits_brackets() {
        let node = esfold_cst::parse("(ArrayLiteral [ a , b ])").unwrap();
        let (open, inner, close) = delimited(&node, TokenKind::LBracket, TokenKind::RBracket, "ArrayLiteral").unwrap();
        assert_eq!(open.text, "[");
        assert_eq!(inner.len(), 3);
        assert_eq!(close.text, "]");
        assert!(delimited(&node, TokenKind::LBrace, TokenKind::RBrace, "ObjectLiteral").is_err());
    }

    #[test]
    fn errors_name_the_component() {
        let node = esfold_cst::parse("(WhileStatement while x)").unwrap();
        let mut cursor = Cursor::new(&node, "WhileStatement");
        cursor.advance();
        let err = cursor.expect(TokenKind::LParen).unwrap_err();
        assert_eq!(err.to_string(), "malformed WhileStatement: expected '(', found x");

        cursor.advance();
        let err = cursor.expect_rule(Rule::Expression).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedSubtree { component: "WhileStatement", .. }));
        assert_eq!(err.span().start.offset, node.span.end.offset);
    }
}
