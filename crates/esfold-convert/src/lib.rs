// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CST to AST conversion for ECMAScript.
//!
//! Takes the concrete syntax tree produced by the grammar engine and builds
//! an ESTree-shaped AST that keeps every punctuation and keyword token.
//! Conversion is driven by [`ConversionContext::convert`], which dispatches
//! on the CST production and memoizes results per node.

mod chain;
mod context;
mod cursor;
mod decl;
mod error;
mod expr;
mod factory;
mod hints;
pub mod literal;
mod module;
mod pattern;
mod router;
mod separated;
mod stmt;

use std::rc::Rc;

use esfold_ast::Program;
use esfold_cst::{CstNode, Rule};
use log::debug;

pub use context::{ConversionContext, ConvertOptions};
pub use error::{ConversionError, Result};
pub use pattern::{into_pattern, to_pattern, PatternMode};

/// Convert a `Script` or `Module` tree with default options.
pub fn convert_program(cst: &CstNode) -> Result<Rc<Program>> {
    convert_program_with(cst, ConvertOptions::default())
}

/// Convert a `Script` or `Module` tree.
pub fn convert_program_with(cst: &CstNode, options: ConvertOptions) -> Result<Rc<Program>> {
    if !matches!(cst.as_rule(), Some(Rule::Script | Rule::Module)) {
        return Err(ConversionError::malformed("Program", "a Script or Module", cst));
    }
    let mut cx = ConversionContext::new(options);
    let program = cx.convert(cst)?.into_program().map_err(|other| {
        ConversionError::malformed("Program", format!("a program (got {})", other.type_name()), cst)
    })?;
    debug!(
        "converted {} with {} top-level items ({} of {} CST nodes cached)",
        cst.name(),
        program.body.len(),
        cx.cached_nodes(),
        cst.node_count()
    );
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_program_roots() {
        let node = esfold_cst::parse("(ExpressionStatement a ;)").unwrap();
        let err = convert_program(&node).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedSubtree { component: "Program", .. }));
    }

    #[test]
    fn empty_script_and_module() {
        let script = convert_program(&esfold_cst::parse("(Script)").unwrap()).unwrap();
        assert!(script.body.is_empty());
        let module = convert_program(&esfold_cst::parse("(Module)").unwrap()).unwrap();
        assert_eq!(module.source_type, esfold_ast::SourceType::Module);
    }
}
