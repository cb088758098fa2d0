// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Fixture helpers shared by the integration tests.
#![allow(dead_code)]

use std::rc::Rc;

use esfold_ast::{Expression, ModuleDeclaration, Program, ProgramItem, Statement};
use esfold_convert::{ConversionContext, ConversionError, ConvertOptions};
use esfold_cst::CstNode;

pub fn cst(notation: &str) -> CstNode {
    esfold_cst::parse(notation).unwrap_or_else(|err| panic!("bad fixture {notation}: {err:?}"))
}

pub fn expression(notation: &str) -> Rc<Expression> {
    let node = cst(notation);
    let mut cx = ConversionContext::default();
    cx.convert(&node).unwrap().into_expression().unwrap()
}

pub fn expression_with(notation: &str, options: ConvertOptions) -> Rc<Expression> {
    let node = cst(notation);
    let mut cx = ConversionContext::new(options);
    cx.convert(&node).unwrap().into_expression().unwrap()
}

pub fn statement(notation: &str) -> Rc<Statement> {
    let node = cst(notation);
    let mut cx = ConversionContext::default();
    cx.convert(&node).unwrap().into_statement().unwrap()
}

/// Wrap statement fixtures in `Script > ScriptBody > StatementList`.
pub fn script(statements: &str) -> Rc<Program> {
    let node = cst(&format!("(Script (ScriptBody (StatementList {statements})))"));
    esfold_convert::convert_program(&node).unwrap()
}

/// Wrap item fixtures in `Module > ModuleBody > ModuleItemList`.
pub fn module(items: &str) -> Rc<Program> {
    let node = cst(&format!("(Module (ModuleBody (ModuleItemList {items})))"));
    esfold_convert::convert_program(&node).unwrap()
}

pub fn module_declaration(program: &Program, index: usize) -> &ModuleDeclaration {
    match &program.body[index] {
        ProgramItem::ModuleDeclaration(decl) => decl,
        other => panic!("expected a module declaration, got {other:?}"),
    }
}

pub fn conversion_error(notation: &str) -> ConversionError {
    let node = cst(notation);
    let mut cx = ConversionContext::default();
    match cx.convert(&node) {
        Ok(ast) => panic!("expected {notation} to fail, got {}", ast.type_name()),
        Err(err) => err,
    }
}
