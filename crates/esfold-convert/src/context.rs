// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Per-conversion state: options, identity cache and the enclosing-node stack.

use std::collections::HashMap;

use esfold_ast::{AstNode, Span};
use esfold_cst::{CstNode, Rule};

use crate::error::{ConversionError, Result};

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum router recursion depth before [`NestingTooDeep`] is raised.
    ///
    /// [`NestingTooDeep`]: crate::ConversionError::NestingTooDeep
    pub max_depth: usize,
    /// Keep `ParenthesizedExpression` nodes instead of returning their contents.
    pub preserve_parens: bool,
    /// Mark directive prologue statements with their `directive`.
    pub directives: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { max_depth: 512, preserve_parens: true, directives: true }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_preserve_parens(mut self, preserve_parens: bool) -> Self {
        self.preserve_parens = preserve_parens;
        self
    }

    pub fn with_directives(mut self, directives: bool) -> Self {
        self.directives = directives;
        self
    }
}

/// State for one conversion run.
///
/// Owns the identity cache: converting the same CST node twice returns the
/// same [`AstNode`] handle. A context must not be shared across unrelated
/// parses; create one per top-level conversion.
pub struct ConversionContext<'cst> {
    pub(crate) options: ConvertOptions,
    /// Keyed by node address; the borrowed CST cannot move while we hold it.
    pub(crate) cache: HashMap<*const CstNode, AstNode>,
    /// Rule nodes currently being converted, outermost first.
    pub(crate) stack: Vec<&'cst CstNode>,
    /// Set just before routing a statement known to be a directive.
    pub(crate) pending_directive: Option<String>,
}

impl<'cst> ConversionContext<'cst> {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options, cache: HashMap::new(), stack: Vec::new(), pending_directive: None }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Number of CST nodes converted (or aliased) so far.
    pub fn cached_nodes(&self) -> usize {
        self.cache.len()
    }

    /// Current router recursion depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Fail when folding `levels` more nodes under the current one would
    /// pass `max_depth`. Flat operator chains and member/call links nest
    /// without recursing through the router, so they count here.
    pub(crate) fn check_fold_depth(&self, levels: usize, span: Span) -> Result<()> {
        if self.stack.len() + levels > self.options.max_depth {
            return Err(ConversionError::too_deep(self.options.max_depth, span));
        }
        Ok(())
    }

    /// Production enclosing the node currently being converted.
    pub(crate) fn parent_rule(&self) -> Option<Rule> {
        self.stack.iter().rev().nth(1).and_then(|node| node.as_rule())
    }
}

impl Default for ConversionContext<'_> {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.max_depth, 512);
        assert!(options.preserve_parens);
        assert!(options.directives);
    }

    #[test]
    fn option_builders() {
        let options = ConvertOptions::new().with_max_depth(8).with_preserve_parens(false).with_directives(false);
        assert_eq!(options, ConvertOptions { max_depth: 8, preserve_parens: false, directives: false });
    }

    #[test]
    fn fresh_context_is_empty() {
        let cx = ConversionContext::default();
        assert_eq!(cx.cached_nodes(), 0);
        assert_eq!(cx.depth(), 0);
        assert!(cx.parent_rule().is_none());
    }
}
