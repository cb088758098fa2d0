// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token association for comma-delimited lists.
//!
//! The grammar engine delivers lists flat, but a list production may sit
//! inside its parent next to a trailing comma (`f(a, b,)` is
//! `(Arguments '(' (ArgumentList a , b) , ')')`). Converters first splice
//! the list productions into one stream of [`Piece`]s, then fold the stream
//! into `Separated` items with [`SeparatedBuilder`].

use esfold_ast::{Separated, Token, TokenKind};
use esfold_cst::{CstNode, Rule};

use crate::context::ConversionContext;
use crate::error::{ConversionError, Result};
use crate::factory;

/// One element of a flattened list.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Piece<'cst> {
    /// A value-producing node.
    Value(&'cst CstNode),
    /// `...` followed by its argument, written inline rather than as a
    /// `SpreadElement` / rest production.
    Rest { ellipsis: &'cst CstNode, argument: &'cst CstNode },
    /// A `,` token.
    Separator(&'cst CstNode),
}

impl<'cst> Piece<'cst> {
    pub fn node(self) -> &'cst CstNode {
        match self {
            Piece::Value(node) | Piece::Separator(node) => node,
            Piece::Rest { ellipsis, .. } => ellipsis,
        }
    }
}

/// Splice the list productions in `nodes` into a flat stream.
///
/// `splice` names extra productions to open besides [`Rule::is_list`] ones
/// (`BindingElisionElement`, `Expression` inside a cover).
pub(crate) fn flatten<'cst>(nodes: &'cst [CstNode], splice: &[Rule]) -> Vec<Piece<'cst>> {
    let mut flat = Vec::new();
    splice_into(nodes, splice, &mut flat);

    let mut pieces = Vec::with_capacity(flat.len());
    let mut iter = flat.into_iter();
    while let Some(node) = iter.next() {
        if node.is_token(TokenKind::Comma) {
            pieces.push(Piece::Separator(node));
        } else if node.is_token(TokenKind::Ellipsis) {
            match iter.next() {
                Some(argument) => pieces.push(Piece::Rest { ellipsis: node, argument }),
                None => pieces.push(Piece::Value(node)),
            }
        } else {
            pieces.push(Piece::Value(node));
        }
    }
    pieces
}

fn splice_into<'cst>(nodes: &'cst [CstNode], splice: &[Rule], out: &mut Vec<&'cst CstNode>) {
    for node in nodes {
        match node.as_rule() {
            Some(rule) if rule.is_list() || splice.contains(&rule) => splice_into(&node.children, splice, out),
            _ => out.push(node),
        }
    }
}

/// Folds values and separators into `Separated` items.
///
/// A separator attaches to the value before it; a value may not directly
/// follow another value.
pub(crate) struct SeparatedBuilder<T> {
    items: Vec<Separated<T>>,
    pending: Option<T>,
}

impl<T> SeparatedBuilder<T> {
    pub fn new() -> Self {
        Self { items: Vec::new(), pending: None }
    }

    /// Add a value. Hands it back if the previous value was never closed by
    /// a separator.
    pub fn push(&mut self, value: T) -> std::result::Result<(), T> {
        if self.pending.is_some() {
            return Err(value);
        }
        self.pending = Some(value);
        Ok(())
    }

    /// Attach a separator to the pending value. Hands it back if there is
    /// no pending value (a hole, or a doubled comma).
    pub fn separator(&mut self, token: Token) -> std::result::Result<(), Token> {
        match self.pending.take() {
            Some(value) => {
                self.items.push(Separated::new(value, Some(token)));
                Ok(())
            }
            None => Err(token),
        }
    }

    pub fn finish(mut self) -> Vec<Separated<T>> {
        if let Some(value) = self.pending.take() {
            self.items.push(Separated::bare(value));
        }
        self.items
    }
}

impl<T> SeparatedBuilder<Option<T>> {
    /// A separator with no value before it: an elision. Only valid where
    /// [`separator`](Self::separator) just handed the token back.
    pub fn hole(&mut self, token: Token) {
        self.items.push(Separated::new(None, Some(token)));
    }
}

impl<'cst> ConversionContext<'cst> {
    /// Convert a flattened list where every value is required.
    pub(crate) fn separated<T>(
        &mut self,
        pieces: &[Piece<'cst>],
        component: &'static str,
        mut convert: impl FnMut(&mut Self, Piece<'cst>) -> Result<T>,
    ) -> Result<Vec<Separated<T>>> {
        let mut builder = SeparatedBuilder::new();
        for &piece in pieces {
            match piece {
                Piece::Separator(node) => {
                    if builder.separator(factory::token(node)).is_err() {
                        return Err(ConversionError::malformed(component, "a list element", node));
                    }
                }
                value => {
                    let converted = convert(self, value)?;
                    if builder.push(converted).is_err() {
                        return Err(ConversionError::malformed(component, "','", value.node()));
                    }
                }
            }
        }
        Ok(builder.finish())
    }

    /// Convert a flattened list that may contain holes (`[a, , b]`).
    ///
    /// A comma with no value before it becomes a `None` item carrying that
    /// comma.
    pub(crate) fn separated_with_holes<T>(
        &mut self,
        pieces: &[Piece<'cst>],
        component: &'static str,
        mut convert: impl FnMut(&mut Self, Piece<'cst>) -> Result<T>,
    ) -> Result<Vec<Separated<Option<T>>>> {
        let mut builder = SeparatedBuilder::new();
        for &piece in pieces {
            match piece {
                Piece::Separator(node) => {
                    let token = factory::token(node);
                    if let Err(token) = builder.separator(token) {
                        builder.hole(token);
                    }
                }
                value => {
                    let converted = convert(self, value)?;
                    if builder.push(Some(converted)).is_err() {
                        return Err(ConversionError::malformed(component, "','", value.node()));
                    }
                }
            }
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfold_ast::Span;

    fn comma() -> Token {
        Token::new(TokenKind::Comma, ",", Span::default())
    }

    #[test]
    fn separators_attach_to_the_previous_value() {
        let mut builder = SeparatedBuilder::new();
        builder.push(1).unwrap();
        builder.separator(comma()).unwrap();
        builder.push(2).unwrap();
        let items = builder.finish();
        assert_eq!(items.len(), 2);
        assert!(items[0].trailing_separator.is_some());
        assert!(items[1].trailing_separator.is_none());
    }

    #[test]
    fn trailing_separator_is_kept() {
        let mut builder = SeparatedBuilder::new();
        builder.push("a").unwrap();
        builder.separator(comma()).unwrap();
        let items = builder.finish();
        assert_eq!(items.len(), 1);
        assert!(items[0].trailing_separator.is_some());
    }

    #[test]
    fn adjacent_values_and_orphan_separators_are_rejected() {
        let mut builder = SeparatedBuilder::new();
        assert!(builder.separator(comma()).is_err());
        builder.push(1).unwrap();
        assert_eq!(builder.push(2), Err(2));
    }

    #[test]
    fn orphan_separator_becomes_a_hole() {
        let mut builder = SeparatedBuilder::<Option<i32>>::new();
        let token = builder.separator(comma()).unwrap_err();
        builder.hole(token);
        builder.push(Some(1)).unwrap();
        let items = builder.finish();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value, None);
        assert!(items[0].trailing_separator.is_some());
        assert_eq!(items[1].value, Some(1));
    }

    #[test]
    fn flatten_splices_lists_and_groups_rest() {
        let node = esfold_cst::parse("(Arguments '(' (ArgumentList a , ... b) , ')')").unwrap();
        let inner = &node.children[1..node.children.len() - 1];
        let pieces = flatten(inner, &[]);
        assert_eq!(pieces.len(), 4);
        assert!(matches!(pieces[0], Piece::Value(n) if n.text() == "a"));
        assert!(matches!(pieces[1], Piece::Separator(_)));
        assert!(matches!(pieces[2], Piece::Rest { argument, .. } if argument.text() == "b"));
        assert!(matches!(pieces[3], Piece::Separator(_)));
    }

    #[test]
    fn holes_carry_their_comma() {
        let node = esfold_cst::parse("(ArrayLiteral [ (ElementList a , (Elision ,) b) ])").unwrap();
        let pieces = flatten(&node.children[1..2], &[]);
        let mut cx = ConversionContext::default();
        let items = cx
            .separated_with_holes(&pieces, "ArrayLiteral", |_, piece| Ok(piece.node().text().to_string()))
            .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].value.as_deref(), Some("a"));
        assert!(items[1].value.is_none());
        assert!(items[1].trailing_separator.is_some());
        assert_eq!(items[2].value.as_deref(), Some("b"));
        assert!(items[2].trailing_separator.is_none());
    }
}
