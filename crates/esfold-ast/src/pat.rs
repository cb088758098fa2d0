// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Binding and assignment patterns.

use std::rc::Rc;

use crate::expr::{Expression, Identifier, PropertyKey};
use crate::separated::Separated;
use crate::token::Token;
use crate::Span;

/// A destructuring target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Pattern {
    Identifier(Identifier),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Rest(RestElement),
    Assignment(AssignmentPattern),
    /// Member expression target; only produced for assignment patterns.
    Expression(Rc<Expression>),
}

impl Pattern {
    pub fn loc(&self) -> Span {
        match self {
            Pattern::Identifier(p) => p.loc,
            Pattern::Object(p) => p.loc,
            Pattern::Array(p) => p.loc,
            Pattern::Rest(p) => p.loc,
            Pattern::Assignment(p) => p.loc,
            Pattern::Expression(e) => e.loc(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Pattern::Identifier(_) => "Identifier",
            Pattern::Object(_) => "ObjectPattern",
            Pattern::Array(_) => "ArrayPattern",
            Pattern::Rest(_) => "RestElement",
            Pattern::Assignment(_) => "AssignmentPattern",
            Pattern::Expression(e) => e.type_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ObjectPattern", rename_all = "camelCase")
)]
pub struct ObjectPattern {
    pub loc: Span,
    pub properties: Vec<Separated<ObjectPatternMember>>,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ObjectPatternMember {
    Property(AssignmentProperty),
    Rest(RestElement),
}

/// `key: pattern` or shorthand `key` / `key = default` inside an object pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Property", rename_all = "camelCase")
)]
pub struct AssignmentProperty {
    pub loc: Span,
    pub key: PropertyKey,
    pub value: Rc<Pattern>,
    pub shorthand: bool,
    pub computed: bool,
    pub colon_token: Option<Token>,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ArrayPattern", rename_all = "camelCase")
)]
pub struct ArrayPattern {
    pub loc: Span,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::separated::ser::holes"))]
    pub elements: Vec<Separated<Option<Rc<Pattern>>>>,
    pub l_bracket_token: Token,
    pub r_bracket_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "RestElement", rename_all = "camelCase")
)]
pub struct RestElement {
    pub loc: Span,
    pub argument: Rc<Pattern>,
    pub ellipsis_token: Token,
}

/// `target = default`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "AssignmentPattern", rename_all = "camelCase")
)]
pub struct AssignmentPattern {
    pub loc: Span,
    pub left: Rc<Pattern>,
    pub right: Rc<Expression>,
    pub eq_token: Token,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Rc<Pattern> {
        Rc::new(Pattern::Identifier(Identifier { loc: Span::default(), name: name.into() }))
    }

    fn punct(text: &str) -> Token {
        let kind = match text {
            "[" => crate::TokenKind::LBracket,
            "]" => crate::TokenKind::RBracket,
            _ => crate::TokenKind::Ellipsis,
        };
        Token::new(kind, text, Span::default())
    }

    #[test]
    fn patterns_report_their_estree_type() {
        let rest = Pattern::Rest(RestElement {
            loc: Span::default(),
            argument: ident("c"),
            ellipsis_token: punct("..."),
        });
        assert_eq!(rest.type_name(), "RestElement");
        let array = Pattern::Array(ArrayPattern {
            loc: Span::default(),
            elements: vec![
                Separated::bare(Some(ident("a"))),
                Separated::bare(None),
                Separated::bare(Some(ident("b"))),
                Separated::bare(Some(Rc::new(rest))),
            ],
            l_bracket_token: punct("["),
            r_bracket_token: punct("]"),
        });
        assert_eq!(array.type_name(), "ArrayPattern");
        assert_eq!(ident("a").type_name(), "Identifier");
    }
}
