// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Program root and the node handles handed out by the converter.

use std::rc::Rc;

use crate::decl::{ClassElement, FormalParameters, VariableDeclarator};
use crate::expr::{Arguments, Expression, ObjectMember, PropertyKey, SpreadElement, TemplateElement};
use crate::module::{ExportSpecifier, ImportDeclarationSpecifier, ModuleDeclaration};
use crate::pat::{ObjectPatternMember, Pattern};
use crate::stmt::{CatchClause, Statement, SwitchCase};
use crate::token::Token;
use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum SourceType {
    Script,
    Module,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Program", rename_all = "camelCase")
)]
pub struct Program {
    pub loc: Span,
    pub source_type: SourceType,
    pub body: Vec<ProgramItem>,
}

/// A top-level item: module declarations only appear in modules.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ProgramItem {
    Statement(Rc<Statement>),
    ModuleDeclaration(Rc<ModuleDeclaration>),
}

impl ProgramItem {
    pub fn loc(&self) -> Span {
        match self {
            ProgramItem::Statement(s) => s.loc(),
            ProgramItem::ModuleDeclaration(d) => d.loc(),
        }
    }

    pub fn as_statement(&self) -> Option<&Rc<Statement>> {
        match self {
            ProgramItem::Statement(s) => Some(s),
            ProgramItem::ModuleDeclaration(_) => None,
        }
    }
}

/// A subtree whose reading as expression or pattern depends on position.
///
/// Cover grammars produce the `Expression` side first; the converter turns
/// it into a `Pattern` with a single fallible conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionOrPattern {
    Expression(Rc<Expression>),
    Pattern(Rc<Pattern>),
}

impl ExpressionOrPattern {
    pub fn loc(&self) -> Span {
        match self {
            ExpressionOrPattern::Expression(e) => e.loc(),
            ExpressionOrPattern::Pattern(p) => p.loc(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ExpressionOrPattern::Expression(e) => e.type_name(),
            ExpressionOrPattern::Pattern(p) => p.type_name(),
        }
    }
}

macro_rules! ast_nodes {
    ($($variant:ident($ty:ty) => $unwrap:ident,)*) => {
        /// Result of routing one CST node.
        ///
        /// Each variant is a shared handle so that converting the same CST
        /// node twice yields the same allocation (see [`AstNode::ptr_eq`]).
        #[derive(Debug, Clone)]
        pub enum AstNode {
            $($variant(Rc<$ty>),)*
        }

        impl AstNode {
            /// Whether both handles point at the same node.
            pub fn ptr_eq(&self, other: &AstNode) -> bool {
                match (self, other) {
                    $((AstNode::$variant(a), AstNode::$variant(b)) => Rc::ptr_eq(a, b),)*
                    _ => false,
                }
            }

            /// Variant name, for diagnostics.
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(AstNode::$variant(_) => stringify!($variant),)*
                }
            }

            $(
                pub fn $unwrap(self) -> Result<Rc<$ty>, AstNode> {
                    match self {
                        AstNode::$variant(node) => Ok(node),
                        other => Err(other),
                    }
                }
            )*
        }
    };
}

ast_nodes! {
    Program(Program) => into_program,
    Statement(Statement) => into_statement,
    ModuleDeclaration(ModuleDeclaration) => into_module_declaration,
    Expression(Expression) => into_expression,
    Pattern(Pattern) => into_pattern,
    Token(Token) => into_token,
    Arguments(Arguments) => into_arguments,
    Parameters(FormalParameters) => into_parameters,
    Spread(SpreadElement) => into_spread,
    ObjectMember(ObjectMember) => into_object_member,
    ObjectPatternMember(ObjectPatternMember) => into_object_pattern_member,
    PropertyKey(PropertyKey) => into_property_key,
    TemplateElement(TemplateElement) => into_template_element,
    ClassElement(ClassElement) => into_class_element,
    SwitchCase(SwitchCase) => into_switch_case,
    CatchClause(CatchClause) => into_catch_clause,
    VariableDeclarator(VariableDeclarator) => into_variable_declarator,
    ImportSpecifier(ImportDeclarationSpecifier) => into_import_specifier,
    ExportSpecifier(ExportSpecifier) => into_export_specifier,
}

impl AstNode {
    pub fn loc(&self) -> Span {
        match self {
            AstNode::Program(n) => n.loc,
            AstNode::Statement(n) => n.loc(),
            AstNode::ModuleDeclaration(n) => n.loc(),
            AstNode::Expression(n) => n.loc(),
            AstNode::Pattern(n) => n.loc(),
            AstNode::Token(n) => n.loc,
            AstNode::Arguments(n) => n.loc,
            AstNode::Parameters(n) => n.loc,
            AstNode::Spread(n) => n.loc,
            AstNode::ObjectMember(n) => n.loc(),
            AstNode::ObjectPatternMember(n) => match &**n {
                ObjectPatternMember::Property(p) => p.loc,
                ObjectPatternMember::Rest(r) => r.loc,
            },
            AstNode::PropertyKey(n) => n.loc(),
            AstNode::TemplateElement(n) => n.loc,
            AstNode::ClassElement(n) => n.loc(),
            AstNode::SwitchCase(n) => n.loc,
            AstNode::CatchClause(n) => n.loc,
            AstNode::VariableDeclarator(n) => n.loc,
            AstNode::ImportSpecifier(n) => match &**n {
                ImportDeclarationSpecifier::Default(s) => s.loc,
                ImportDeclarationSpecifier::Namespace(s) => s.loc,
                ImportDeclarationSpecifier::Named(s) => s.loc,
            },
            AstNode::ExportSpecifier(n) => n.loc,
        }
    }

    /// ESTree `type` where the node has one; otherwise the variant name.
    pub fn type_name(&self) -> &'static str {
        match self {
            AstNode::Program(_) => "Program",
            AstNode::Statement(n) => n.type_name(),
            AstNode::ModuleDeclaration(n) => n.type_name(),
            AstNode::Expression(n) => n.type_name(),
            AstNode::Pattern(n) => n.type_name(),
            AstNode::Spread(_) => "SpreadElement",
            AstNode::ObjectMember(n) => match &**n {
                ObjectMember::Spread(_) => "SpreadElement",
                _ => "Property",
            },
            AstNode::ObjectPatternMember(n) => match &**n {
                ObjectPatternMember::Rest(_) => "RestElement",
                ObjectPatternMember::Property(_) => "Property",
            },
            other => other.kind_name(),
        }
    }
}
