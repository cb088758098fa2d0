// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Textual CST notation.
//!
//! ```text
//! (AdditiveExpression (IdentifierReference a) + (IdentifierReference b))
//! ```
//!
//! A parenthesised group is a rule node headed by its production name.
//! Every other atom is a token whose kind is inferred from its text; quote
//! atoms containing spaces, parentheses or `'` with `'...'`, and force a
//! kind with `Kind:text` or `Kind:'text'`. JS parentheses are therefore
//! written `'('` and `')'`.
//!
//! Spans are synthesised by laying the tokens out in order, separated by
//! single spaces, so the span of `b` above is offset 4..5 on line 1.

use std::fmt;

use esfold_ast::{LineMap, Position, Span, TokenKind};

use crate::error::{NotationError, NotationErrorKind};
use crate::lexer::{self, Item};
use crate::node::{CstKind, CstNode};
use crate::rule::Rule;

/// Read one CST from its notation.
pub fn parse(notation: &str) -> Result<CstNode, NotationError> {
    let items = lexer::tokenize(notation)?;
    let mut reader = Reader { items: &items, pos: 0, source: String::new(), end: notation.len() };

    if items.is_empty() {
        return Err(NotationError::new(NotationErrorKind::Empty, 0));
    }
    let mut root = reader.node()?;
    if let Some((_, offset)) = items.get(reader.pos) {
        return Err(NotationError::new(NotationErrorKind::TrailingInput, *offset));
    }

    let map = LineMap::new(&reader.source);
    resolve_spans(&mut root, &map);
    Ok(root)
}

/// The source text a notation lays out: its tokens joined by single spaces.
pub fn layout(node: &CstNode) -> String {
    let mut out = String::new();
    collect_layout(node, &mut out);
    out
}

fn collect_layout(node: &CstNode, out: &mut String) {
    match node.kind {
        CstKind::Token(_) => {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(node.text());
        }
        CstKind::Rule(_) => node.children.iter().for_each(|c| collect_layout(c, out)),
    }
}

struct Reader<'a> {
    items: &'a [(Item, usize)],
    pos: usize,
    /// Synthesised source text, grown as tokens are read.
    source: String,
    end: usize,
}

impl<'a> Reader<'a> {
    fn next(&mut self) -> Option<&'a (Item, usize)> {
        let item = self.items.get(self.pos);
        self.pos += 1;
        item
    }

    fn node(&mut self) -> Result<CstNode, NotationError> {
        let (item, offset) = match self.next() {
            Some((item, offset)) => (item, *offset),
            None => return Err(NotationError::new(NotationErrorKind::Unclosed, self.end)),
        };
        match item {
            Item::Open => self.rule(offset),
            Item::Close => Err(NotationError::new(NotationErrorKind::UnexpectedClose, offset)),
            Item::Atom { kind, text } => self.token(kind.as_deref(), text, offset),
        }
    }

    fn rule(&mut self, open_offset: usize) -> Result<CstNode, NotationError> {
        let rule = match self.next() {
            Some((Item::Atom { kind: None, text }, offset)) => {
                Rule::from_name(text).ok_or_else(|| NotationError::unknown_rule(text, *offset))?
            }
            Some((_, offset)) => {
                return Err(NotationError::new(NotationErrorKind::MissingRuleName, *offset));
            }
            None => return Err(NotationError::new(NotationErrorKind::Unclosed, open_offset)),
        };

        let mut children = Vec::new();
        loop {
            match self.items.get(self.pos) {
                Some((Item::Close, _)) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => children.push(self.node()?),
                None => return Err(NotationError::new(NotationErrorKind::Unclosed, open_offset)),
            }
        }

        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::empty(offset_only(self.source.len())),
        };
        Ok(CstNode::rule_with_span(rule, children, span))
    }

    fn token(&mut self, forced: Option<&str>, text: &str, offset: usize) -> Result<CstNode, NotationError> {
        let kind = match forced {
            Some(name) => TokenKind::from_name(name).ok_or_else(|| NotationError::unknown_token_kind(name, offset))?,
            None => lexer::classify(text).ok_or_else(|| NotationError::not_a_token(text, offset))?,
        };

        if !self.source.is_empty() {
            self.source.push(' ');
        }
        let start = self.source.len();
        self.source.push_str(text);
        let span = Span::new(offset_only(start), offset_only(self.source.len()));
        Ok(CstNode::token(kind, text, span))
    }
}

fn offset_only(offset: usize) -> Position {
    Position::new(offset, 0, 0)
}

fn resolve_spans(node: &mut CstNode, map: &LineMap) {
    node.span = map.span(node.span.start.offset, node.span.end.offset);
    for child in &mut node.children {
        resolve_spans(child, map);
    }
}

impl CstNode {
    /// Notation for this subtree, cut off below `max_depth` and after
    /// roughly `max_len` characters.
    pub fn snapshot(&self, max_depth: usize, max_len: usize) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = write_node(&mut out, self, Some(max_depth));
        if out.chars().count() > max_len {
            out = out.chars().take(max_len).collect();
            out.push('…');
        }
        out
    }
}

fn write_node(out: &mut impl fmt::Write, node: &CstNode, depth: Option<usize>) -> fmt::Result {
    match node.kind {
        CstKind::Token(kind) => write_token(out, kind, node.text()),
        CstKind::Rule(rule) => {
            out.write_char('(')?;
            out.write_str(rule.as_str())?;
            if depth == Some(0) && !node.children.is_empty() {
                return out.write_str(" …)");
            }
            for child in &node.children {
                out.write_char(' ')?;
                write_node(out, child, depth.map(|d| d - 1))?;
            }
            out.write_char(')')
        }
    }
}

fn write_token(out: &mut impl fmt::Write, kind: TokenKind, text: &str) -> fmt::Result {
    if lexer::classify(text) == Some(kind) {
        return out.write_str(&lexer::quote_if_needed(text));
    }
    out.write_str(kind.name())?;
    out.write_char(':')?;
    let quoted = lexer::quote_if_needed(text);
    if quoted.starts_with('\'') {
        out.write_str(&quoted)
    } else {
        write!(out, "'{quoted}'")
    }
}

impl fmt::Display for CstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rules_and_tokens() {
        let node = parse("(AdditiveExpression (IdentifierReference a) + (IdentifierReference b))").unwrap();
        assert_eq!(node.as_rule(), Some(Rule::AdditiveExpression));
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[1].as_token(), Some(TokenKind::Plus));
        assert_eq!(node.children[2].children[0].text(), "b");
    }

    #[test]
    fn spans_follow_the_layout() {
        let node = parse("(AdditiveExpression (IdentifierReference a) + (IdentifierReference b))").unwrap();
        assert_eq!(layout(&node), "a + b");
        let b = &node.children[2];
        assert_eq!(b.span.start, Position::new(4, 1, 4));
        assert_eq!(b.span.end.offset, 5);
        assert_eq!(node.span.start.offset, 0);
        assert_eq!(node.span.end.offset, 5);
    }

    #[test]
    fn multiline_tokens_advance_lines() {
        let node = parse("(TemplateLiteral '`a\nb`')").unwrap();
        assert_eq!(node.children[0].as_token(), Some(TokenKind::NoSubstitutionTemplate));
        assert_eq!(node.span.end.line, 2);
    }

    #[test]
    fn forced_kinds() {
        let node = parse("(BindingIdentifier Identifier:'of')").unwrap();
        assert_eq!(node.children[0].as_token(), Some(TokenKind::Identifier));
        assert_eq!(node.children[0].text(), "of");
    }

    #[test]
    fn empty_rule_gets_an_empty_span() {
        let node = parse("(Script)").unwrap();
        assert!(node.children.is_empty());
        assert!(node.span.is_empty());
    }

    #[test]
    fn display_round_trips() {
        let text = "(Arguments '(' (ArgumentList 1 , Identifier:'of') ')')";
        let node = parse(text).unwrap();
        assert_eq!(node.to_string(), text);
        assert_eq!(parse(&node.to_string()).unwrap(), node);
    }

    #[test]
    fn snapshot_is_bounded() {
        let node = parse("(ExpressionStatement (AdditiveExpression (IdentifierReference a) + 1) ;)").unwrap();
        assert_eq!(node.snapshot(1, 200), "(ExpressionStatement (AdditiveExpression …) ;)");
        assert_eq!(node.snapshot(5, 10).chars().count(), 11);
    }

    #[test]
    fn reader_errors() {
        assert_eq!(parse("").unwrap_err().kind, NotationErrorKind::Empty);
        assert_eq!(parse("(Nope)").unwrap_err().kind, NotationErrorKind::UnknownRule { name: "Nope".into() });
        assert_eq!(parse("(Script").unwrap_err().kind, NotationErrorKind::Unclosed);
        assert_eq!(parse(")").unwrap_err().kind, NotationErrorKind::UnexpectedClose);
        assert_eq!(parse("(Script) x").unwrap_err().kind, NotationErrorKind::TrailingInput);
        assert_eq!(parse("(Script (a))").unwrap_err().kind, NotationErrorKind::UnknownRule { name: "a".into() });
        assert_eq!(parse("((Script))").unwrap_err().kind, NotationErrorKind::MissingRuleName);
        assert_eq!(
            parse("(Literal Bogus:'x')").unwrap_err().kind,
            NotationErrorKind::UnknownTokenKind { name: "Bogus".into() }
        );
        assert_eq!(
            parse("(Literal 'a b')").unwrap_err().kind,
            NotationErrorKind::NotAToken { text: "a b".into() }
        );
    }
}
