// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Leaf node construction: tokens, names, literals and template chunks.
//!
//! Every node built here takes its `loc` from the CST node it came from.

use esfold_ast::{Identifier, Literal, LiteralValue, PrivateIdentifier, TemplateElement, Token, TokenKind};
use esfold_cst::{CstNode, Rule};

use crate::error::{ConversionError, Result};
use crate::literal;

/// Token for a leaf. Callers check the kind first; a rule node yields an
/// identifier-kind token carrying the node's span.
pub(crate) fn token(node: &CstNode) -> Token {
    let kind = node.as_token().unwrap_or(TokenKind::Identifier);
    Token::new(kind, node.text(), node.span)
}

/// Token of the given kind, or a malformed-subtree error.
pub(crate) fn expect_token(node: &CstNode, kind: TokenKind, component: &'static str) -> Result<Token> {
    if node.is_token(kind) {
        Ok(token(node))
    } else {
        Err(ConversionError::malformed(component, kind.display_name(), node))
    }
}

/// Productions that only wrap a name.
fn is_name_wrapper(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::IdentifierReference
            | Rule::BindingIdentifier
            | Rule::LabelIdentifier
            | Rule::AsyncArrowBindingIdentifier
            | Rule::ImportedBinding
            | Rule::ImportedDefaultBinding
            | Rule::ForBinding
            | Rule::LiteralPropertyName
            | Rule::AttributeKey
    )
}

/// An identifier from a name token (keywords included, for property names
/// and contextual words) or a single-child name production.
pub(crate) fn identifier(node: &CstNode, component: &'static str) -> Result<Identifier> {
    match node.as_token() {
        Some(kind) if kind.is_identifier_name() => match literal::identifier_name(node.text()) {
            Some(name) => Ok(Identifier { loc: node.span, name }),
            None => Err(ConversionError::malformed(component, "a valid identifier escape", node)),
        },
        Some(_) => Err(ConversionError::malformed(component, "an identifier", node)),
        None => match (node.as_rule(), node.children.as_slice()) {
            (Some(rule), [only]) if is_name_wrapper(rule) => identifier(only, component),
            _ => Err(ConversionError::malformed(component, "an identifier", node)),
        },
    }
}

/// `#name`, with the `#` dropped from `name`.
pub(crate) fn private_identifier(node: &CstNode, component: &'static str) -> Result<PrivateIdentifier> {
    match node.text().strip_prefix('#') {
        Some(name) if node.is_token(TokenKind::PrivateIdentifier) => {
            Ok(PrivateIdentifier { loc: node.span, name: name.to_string() })
        }
        _ => Err(ConversionError::malformed(component, "a private name", node)),
    }
}

/// A literal from its token (or a `Literal` production wrapping one).
pub(crate) fn literal(node: &CstNode, component: &'static str) -> Result<Literal> {
    if let (Some(Rule::Literal | Rule::ModuleSpecifier), [only]) = (node.as_rule(), node.children.as_slice()) {
        return literal(only, component);
    }

    let raw = node.text();
    let value = match node.as_token() {
        Some(TokenKind::Null) => Some(LiteralValue::Null),
        Some(TokenKind::True) => Some(LiteralValue::Boolean(true)),
        Some(TokenKind::False) => Some(LiteralValue::Boolean(false)),
        Some(TokenKind::NumericLiteral) => literal::numeric_value(raw),
        Some(TokenKind::StringLiteral) => literal::string_value(raw).map(LiteralValue::String),
        Some(TokenKind::RegularExpressionLiteral) => {
            literal::regex_parts(raw).map(|(pattern, flags)| LiteralValue::RegExp { pattern, flags })
        }
        _ => return Err(ConversionError::malformed(component, "a literal", node)),
    };

    match value {
        Some(value) => Ok(Literal { loc: node.span, value, raw: raw.to_string() }),
        None => Err(ConversionError::malformed(component, "a well-formed literal", node)),
    }
}

/// A string literal; module specifiers and attribute values.
pub(crate) fn string_literal(node: &CstNode, component: &'static str) -> Result<Literal> {
    let lit = literal(node, component)?;
    match lit.value {
        LiteralValue::String(_) => Ok(lit),
        _ => Err(ConversionError::malformed(component, "a string", node)),
    }
}

/// One template chunk. `raw` keeps the delimiters.
pub(crate) fn template_element(node: &CstNode, component: &'static str) -> Result<TemplateElement> {
    let tail = match node.as_token() {
        Some(TokenKind::NoSubstitutionTemplate | TokenKind::TemplateTail) => true,
        Some(TokenKind::TemplateHead | TokenKind::TemplateMiddle) => false,
        _ => return Err(ConversionError::malformed(component, "a template chunk", node)),
    };
    let raw = node.text();
    Ok(TemplateElement {
        loc: node.span,
        raw: raw.to_string(),
        cooked: literal::template_cooked(literal::template_inner(raw)),
        tail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cst(src: &str) -> CstNode {
        esfold_cst::parse(src).unwrap()
    }

    #[test]
    fn identifiers_unwrap_name_productions() {
        let node = cst("(BindingIdentifier (IdentifierReference value))");
        assert_eq!(identifier(&node, "test").unwrap().name, "value");
        let node = cst("(IdentifierReference async)");
        assert_eq!(identifier(&node, "test").unwrap().name, "async");
        let node = cst("(IdentifierReference a b)");
        assert!(identifier(&node, "test").is_err());
        assert!(identifier(&cst("'+'"), "test").is_err());
    }

    #[test]
    fn private_names_drop_the_hash() {
        let id = private_identifier(&cst("#secret"), "test").unwrap();
        assert_eq!(id.name, "secret");
        assert!(private_identifier(&cst("secret"), "test").is_err());
    }

    #[test]
    fn literals_cook_their_values() {
        assert_eq!(literal(&cst("(Literal 0x10)"), "test").unwrap().value, LiteralValue::Number(16.0));
        assert_eq!(literal(&cst("null"), "test").unwrap().value, LiteralValue::Null);
        let lit = literal(&cst("RegularExpressionLiteral:'/ab+/g'"), "test").unwrap();
        assert_eq!(lit.value, LiteralValue::RegExp { pattern: "ab+".into(), flags: "g".into() });
        assert_eq!(lit.raw, "/ab+/g");
        assert!(string_literal(&cst("1"), "test").is_err());
    }

    #[test]
    fn template_chunks_keep_raw_delimiters() {
        let head = template_element(&cst("TemplateHead:'`a${'"), "test").unwrap();
        assert_eq!(head.raw, "`a${");
        assert_eq!(head.cooked.as_deref(), Some("a"));
        assert!(!head.tail);
        let tail = template_element(&cst("TemplateTail:'}b`'"), "test").unwrap();
        assert!(tail.tail);
    }
}
