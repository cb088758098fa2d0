// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes: variables, functions and classes.

use std::rc::Rc;

use crate::expr::{Expression, Identifier, PropertyKey};
use crate::pat::Pattern;
use crate::separated::Separated;
use crate::stmt::{BlockStatement, Statement};
use crate::token::Token;
use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// `var`/`let`/`const` with one or more declarators.
///
/// Lexical declarations own their terminating semicolon; so do `var`
/// statements. Declarations in `for` heads carry none.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "VariableDeclaration", rename_all = "camelCase")
)]
pub struct VariableDeclaration {
    pub loc: Span,
    pub kind: VariableKind,
    pub declarations: Vec<Separated<VariableDeclarator>>,
    pub kind_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "VariableDeclarator", rename_all = "camelCase")
)]
pub struct VariableDeclarator {
    pub loc: Span,
    pub id: Rc<Pattern>,
    pub init: Option<Rc<Expression>>,
    pub eq_token: Option<Token>,
}

/// Whether a function or class appeared in declaration or expression position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Declaration,
    Expression,
}

/// The parameter list of a function, without its parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormalParameters {
    pub loc: Span,
    pub params: Vec<Separated<Rc<Pattern>>>,
}

/// A function, generator, async function or method value.
///
/// `form` decides the ESTree `type` (`FunctionDeclaration` or
/// `FunctionExpression`); method values are always expressions and have no
/// `function_token`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Function {
    #[cfg_attr(feature = "serde", serde(rename = "type", serialize_with = "serialize_function_form"))]
    pub form: Form,
    pub loc: Span,
    pub id: Option<Identifier>,
    pub params: Vec<Separated<Rc<Pattern>>>,
    pub body: BlockStatement,
    pub generator: bool,
    #[cfg_attr(feature = "serde", serde(rename = "async"))]
    pub is_async: bool,
    pub async_token: Option<Token>,
    pub function_token: Option<Token>,
    pub star_token: Option<Token>,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Class {
    #[cfg_attr(feature = "serde", serde(rename = "type", serialize_with = "serialize_class_form"))]
    pub form: Form,
    pub loc: Span,
    pub id: Option<Identifier>,
    pub super_class: Option<Rc<Expression>>,
    pub body: ClassBody,
    pub class_token: Token,
    pub extends_token: Option<Token>,
}

#[cfg(feature = "serde")]
fn serialize_function_form<S: serde::Serializer>(form: &Form, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(match form {
        Form::Declaration => "FunctionDeclaration",
        Form::Expression => "FunctionExpression",
    })
}

#[cfg(feature = "serde")]
fn serialize_class_form<S: serde::Serializer>(form: &Form, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(match form {
        Form::Declaration => "ClassDeclaration",
        Form::Expression => "ClassExpression",
    })
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ClassBody", rename_all = "camelCase")
)]
pub struct ClassBody {
    pub loc: Span,
    pub body: Vec<Rc<ClassElement>>,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ClassElement {
    Method(MethodDefinition),
    Property(PropertyDefinition),
    StaticBlock(StaticBlock),
}

impl ClassElement {
    pub fn loc(&self) -> Span {
        match self {
            ClassElement::Method(m) => m.loc,
            ClassElement::Property(p) => p.loc,
            ClassElement::StaticBlock(b) => b.loc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "MethodDefinition", rename_all = "camelCase")
)]
pub struct MethodDefinition {
    pub loc: Span,
    pub key: PropertyKey,
    pub value: Rc<Function>,
    pub kind: MethodKind,
    pub computed: bool,
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub is_static: bool,
    pub static_token: Option<Token>,
    /// `get` or `set`.
    pub accessor_token: Option<Token>,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

/// A class field, `static x = 1;`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "PropertyDefinition", rename_all = "camelCase")
)]
pub struct PropertyDefinition {
    pub loc: Span,
    pub key: PropertyKey,
    pub value: Option<Rc<Expression>>,
    pub computed: bool,
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub is_static: bool,
    pub static_token: Option<Token>,
    pub eq_token: Option<Token>,
    pub semicolon_token: Option<Token>,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "StaticBlock", rename_all = "camelCase")
)]
pub struct StaticBlock {
    pub loc: Span,
    pub body: Vec<Rc<Statement>>,
    pub static_token: Token,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}
