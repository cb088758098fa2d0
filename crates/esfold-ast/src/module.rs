// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Import and export declarations.

use std::rc::Rc;

use crate::decl::{Class, Function};
use crate::expr::{Expression, Identifier, Literal};
use crate::separated::Separated;
use crate::stmt::Statement;
use crate::token::Token;
use crate::Span;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ModuleDeclaration {
    Import(ImportDeclaration),
    ExportNamed(ExportNamedDeclaration),
    ExportDefault(ExportDefaultDeclaration),
    ExportAll(ExportAllDeclaration),
}

impl ModuleDeclaration {
    pub fn loc(&self) -> Span {
        match self {
            ModuleDeclaration::Import(d) => d.loc,
            ModuleDeclaration::ExportNamed(d) => d.loc,
            ModuleDeclaration::ExportDefault(d) => d.loc,
            ModuleDeclaration::ExportAll(d) => d.loc,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ModuleDeclaration::Import(_) => "ImportDeclaration",
            ModuleDeclaration::ExportNamed(_) => "ExportNamedDeclaration",
            ModuleDeclaration::ExportDefault(_) => "ExportDefaultDeclaration",
            ModuleDeclaration::ExportAll(_) => "ExportAllDeclaration",
        }
    }
}

/// An identifier or string literal naming an export (`export { a as "b c" }`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ModuleExportName {
    Identifier(Identifier),
    Literal(Literal),
}

impl ModuleExportName {
    pub fn loc(&self) -> Span {
        match self {
            ModuleExportName::Identifier(id) => id.loc,
            ModuleExportName::Literal(lit) => lit.loc,
        }
    }
}

/// `with { type: "json" }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct WithClause {
    pub loc: Span,
    pub attributes: Vec<Separated<ImportAttribute>>,
    pub with_token: Token,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ImportAttribute", rename_all = "camelCase")
)]
pub struct ImportAttribute {
    pub loc: Span,
    pub key: ModuleExportName,
    pub value: Literal,
    pub colon_token: Token,
}

/// `import a, { b as c } from "m";`
///
/// The default or namespace specifier carries the comma that separates it
/// from a following named block; the braces live on the declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ImportDeclaration", rename_all = "camelCase")
)]
pub struct ImportDeclaration {
    pub loc: Span,
    pub specifiers: Vec<Separated<ImportDeclarationSpecifier>>,
    pub source: Literal,
    pub with_clause: Option<WithClause>,
    pub import_token: Token,
    pub l_brace_token: Option<Token>,
    pub r_brace_token: Option<Token>,
    pub from_token: Option<Token>,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ImportDeclarationSpecifier {
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
    Named(ImportSpecifier),
}

impl ImportDeclarationSpecifier {
    pub fn local(&self) -> &Identifier {
        match self {
            ImportDeclarationSpecifier::Default(s) => &s.local,
            ImportDeclarationSpecifier::Namespace(s) => &s.local,
            ImportDeclarationSpecifier::Named(s) => &s.local,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ImportSpecifier", rename_all = "camelCase")
)]
pub struct ImportSpecifier {
    pub loc: Span,
    pub imported: ModuleExportName,
    pub local: Identifier,
    pub as_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "ImportDefaultSpecifier"))]
pub struct ImportDefaultSpecifier {
    pub loc: Span,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ImportNamespaceSpecifier", rename_all = "camelCase")
)]
pub struct ImportNamespaceSpecifier {
    pub loc: Span,
    pub local: Identifier,
    pub star_token: Token,
    pub as_token: Token,
}

/// `export <declaration>` or `export { a, b as c } (from "m")?;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ExportNamedDeclaration", rename_all = "camelCase")
)]
pub struct ExportNamedDeclaration {
    pub loc: Span,
    pub declaration: Option<Rc<Statement>>,
    pub specifiers: Vec<Separated<ExportSpecifier>>,
    pub source: Option<Literal>,
    pub with_clause: Option<WithClause>,
    pub export_token: Token,
    pub l_brace_token: Option<Token>,
    pub r_brace_token: Option<Token>,
    pub from_token: Option<Token>,
    pub semicolon_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ExportSpecifier", rename_all = "camelCase")
)]
pub struct ExportSpecifier {
    pub loc: Span,
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
    pub as_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ExportDefaultKind {
    Function(Function),
    Class(Class),
    Expression(Rc<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ExportDefaultDeclaration", rename_all = "camelCase")
)]
pub struct ExportDefaultDeclaration {
    pub loc: Span,
    pub declaration: ExportDefaultKind,
    pub export_token: Token,
    pub default_token: Token,
    /// Only for the expression form.
    pub semicolon_token: Option<Token>,
}

/// `export * (as name)? from "m";`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ExportAllDeclaration", rename_all = "camelCase")
)]
pub struct ExportAllDeclaration {
    pub loc: Span,
    pub exported: Option<ModuleExportName>,
    pub source: Literal,
    pub with_clause: Option<WithClause>,
    pub export_token: Token,
    pub star_token: Token,
    pub as_token: Option<Token>,
    pub from_token: Token,
    pub semicolon_token: Option<Token>,
}
