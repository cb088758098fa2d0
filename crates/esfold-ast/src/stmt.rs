// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use std::rc::Rc;

use crate::decl::{Class, Function, VariableDeclaration};
use crate::expr::{Expression, Identifier};
use crate::pat::Pattern;
use crate::token::Token;
use crate::Span;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Statement {
    Block(BlockStatement),
    Empty(EmptyStatement),
    Expression(ExpressionStatement),
    If(IfStatement),
    Labeled(LabeledStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    With(WithStatement),
    Switch(SwitchStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Try(TryStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    Debugger(DebuggerStatement),
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
}

impl Statement {
    pub fn loc(&self) -> Span {
        match self {
            Statement::Block(s) => s.loc,
            Statement::Empty(s) => s.loc,
            Statement::Expression(s) => s.loc,
            Statement::If(s) => s.loc,
            Statement::Labeled(s) => s.loc,
            Statement::Break(s) => s.loc,
            Statement::Continue(s) => s.loc,
            Statement::With(s) => s.loc,
            Statement::Switch(s) => s.loc,
            Statement::Return(s) => s.loc,
            Statement::Throw(s) => s.loc,
            Statement::Try(s) => s.loc,
            Statement::While(s) => s.loc,
            Statement::DoWhile(s) => s.loc,
            Statement::For(s) => s.loc,
            Statement::ForIn(s) => s.loc,
            Statement::ForOf(s) => s.loc,
            Statement::Debugger(s) => s.loc,
            Statement::VariableDeclaration(s) => s.loc,
            Statement::FunctionDeclaration(s) => s.loc,
            Statement::ClassDeclaration(s) => s.loc,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Statement::Block(_) => "BlockStatement",
            Statement::Empty(_) => "EmptyStatement",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::If(_) => "IfStatement",
            Statement::Labeled(_) => "LabeledStatement",
            Statement::Break(_) => "BreakStatement",
            Statement::Continue(_) => "ContinueStatement",
            Statement::With(_) => "WithStatement",
            Statement::Switch(_) => "SwitchStatement",
            Statement::Return(_) => "ReturnStatement",
            Statement::Throw(_) => "ThrowStatement",
            Statement::Try(_) => "TryStatement",
            Statement::While(_) => "WhileStatement",
            Statement::DoWhile(_) => "DoWhileStatement",
            Statement::For(_) => "ForStatement",
            Statement::ForIn(_) => "ForInStatement",
            Statement::ForOf(_) => "ForOfStatement",
            Statement::Debugger(_) => "DebuggerStatement",
            Statement::VariableDeclaration(_) => "VariableDeclaration",
            Statement::FunctionDeclaration(_) => "FunctionDeclaration",
            Statement::ClassDeclaration(_) => "ClassDeclaration",
        }
    }
}

/// `{ ... }`; also used for function bodies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "BlockStatement", rename_all = "camelCase")
)]
pub struct BlockStatement {
    pub loc: Span,
    pub body: Vec<Rc<Statement>>,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "EmptyStatement", rename_all = "camelCase")
)]
pub struct EmptyStatement {
    pub loc: Span,
    pub semicolon_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ExpressionStatement", rename_all = "camelCase")
)]
pub struct ExpressionStatement {
    pub loc: Span,
    pub expression: Rc<Expression>,
    /// Raw string contents (without quotes) for directive prologue entries.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub directive: Option<String>,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "IfStatement", rename_all = "camelCase")
)]
pub struct IfStatement {
    pub loc: Span,
    pub test: Rc<Expression>,
    pub consequent: Rc<Statement>,
    pub alternate: Option<Rc<Statement>>,
    pub if_token: Token,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
    pub else_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "LabeledStatement", rename_all = "camelCase")
)]
pub struct LabeledStatement {
    pub loc: Span,
    pub label: Identifier,
    pub body: Rc<Statement>,
    pub colon_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "BreakStatement", rename_all = "camelCase")
)]
pub struct BreakStatement {
    pub loc: Span,
    pub label: Option<Identifier>,
    pub break_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ContinueStatement", rename_all = "camelCase")
)]
pub struct ContinueStatement {
    pub loc: Span,
    pub label: Option<Identifier>,
    pub continue_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "WithStatement", rename_all = "camelCase")
)]
pub struct WithStatement {
    pub loc: Span,
    pub object: Rc<Expression>,
    pub body: Rc<Statement>,
    pub with_token: Token,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "SwitchStatement", rename_all = "camelCase")
)]
pub struct SwitchStatement {
    pub loc: Span,
    pub discriminant: Rc<Expression>,
    pub cases: Vec<Rc<SwitchCase>>,
    pub switch_token: Token,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

/// `case test:` or `default:` (`test` is `None`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "SwitchCase", rename_all = "camelCase")
)]
pub struct SwitchCase {
    pub loc: Span,
    pub test: Option<Rc<Expression>>,
    pub consequent: Vec<Rc<Statement>>,
    /// `case` or `default`.
    pub keyword_token: Token,
    pub colon_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ReturnStatement", rename_all = "camelCase")
)]
pub struct ReturnStatement {
    pub loc: Span,
    pub argument: Option<Rc<Expression>>,
    pub return_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ThrowStatement", rename_all = "camelCase")
)]
pub struct ThrowStatement {
    pub loc: Span,
    pub argument: Rc<Expression>,
    pub throw_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "TryStatement", rename_all = "camelCase")
)]
pub struct TryStatement {
    pub loc: Span,
    pub block: BlockStatement,
    pub handler: Option<Rc<CatchClause>>,
    pub finalizer: Option<BlockStatement>,
    pub try_token: Token,
    pub finally_token: Option<Token>,
}

/// `catch (param) { ... }`; `param` is `None` for optional catch binding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "CatchClause", rename_all = "camelCase")
)]
pub struct CatchClause {
    pub loc: Span,
    pub param: Option<Rc<Pattern>>,
    pub body: BlockStatement,
    pub catch_token: Token,
    pub l_paren_token: Option<Token>,
    pub r_paren_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "WhileStatement", rename_all = "camelCase")
)]
pub struct WhileStatement {
    pub loc: Span,
    pub test: Rc<Expression>,
    pub body: Rc<Statement>,
    pub while_token: Token,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "DoWhileStatement", rename_all = "camelCase")
)]
pub struct DoWhileStatement {
    pub loc: Span,
    pub body: Rc<Statement>,
    pub test: Rc<Expression>,
    pub do_token: Token,
    pub while_token: Token,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ForInit {
    VariableDeclaration(VariableDeclaration),
    Expression(Rc<Expression>),
}

/// `for (init; test; update) body`
///
/// `init_semicolon_token` is `None` when `init` is a `let`/`const`
/// declaration: that semicolon belongs to the declaration itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ForStatement", rename_all = "camelCase")
)]
pub struct ForStatement {
    pub loc: Span,
    pub init: Option<ForInit>,
    pub test: Option<Rc<Expression>>,
    pub update: Option<Rc<Expression>>,
    pub body: Rc<Statement>,
    pub for_token: Token,
    pub l_paren_token: Token,
    pub init_semicolon_token: Option<Token>,
    pub test_semicolon_token: Token,
    pub r_paren_token: Token,
}

/// Left side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ForTarget {
    VariableDeclaration(VariableDeclaration),
    Pattern(Rc<Pattern>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ForInStatement", rename_all = "camelCase")
)]
pub struct ForInStatement {
    pub loc: Span,
    pub left: ForTarget,
    pub right: Rc<Expression>,
    pub body: Rc<Statement>,
    pub for_token: Token,
    pub l_paren_token: Token,
    pub in_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ForOfStatement", rename_all = "camelCase")
)]
pub struct ForOfStatement {
    pub loc: Span,
    pub left: ForTarget,
    pub right: Rc<Expression>,
    pub body: Rc<Statement>,
    #[cfg_attr(feature = "serde", serde(rename = "await"))]
    pub is_await: bool,
    pub for_token: Token,
    pub await_token: Option<Token>,
    pub l_paren_token: Token,
    pub of_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "DebuggerStatement", rename_all = "camelCase")
)]
pub struct DebuggerStatement {
    pub loc: Span,
    pub debugger_token: Token,
    pub semicolon_token: Option<Token>,
}
