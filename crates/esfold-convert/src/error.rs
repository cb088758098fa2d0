// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversion error types.

use esfold_ast::Span;
use esfold_cst::CstNode;
use thiserror::Error;

/// How deep error snapshots of a CST subtree go.
const SNAPSHOT_DEPTH: usize = 3;
/// How long error snapshots get before they are cut off.
const SNAPSHOT_LEN: usize = 160;

/// A fatal CST to AST conversion error. No partial AST is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("no converter for `{kind}`{}", in_parent(.parent))]
    UnsupportedNode {
        kind: &'static str,
        /// Enclosing production, when known.
        parent: Option<&'static str>,
        span: Span,
    },

    #[error("malformed {component}: expected {expected}, found {found}")]
    MalformedSubtree {
        component: &'static str,
        expected: String,
        /// Bounded snapshot of the offending CST in notation form.
        found: String,
        span: Span,
    },

    #[error("{found} is not a valid {target} target")]
    PatternConversion {
        /// ESTree type of the offending expression.
        found: &'static str,
        target: &'static str,
        span: Span,
        hint: Option<&'static str>,
    },

    #[error("nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },
}

fn in_parent(parent: &Option<&'static str>) -> String {
    match parent {
        Some(parent) => format!(" inside `{parent}`"),
        None => String::new(),
    }
}

impl ConversionError {
    pub fn unsupported(node: &CstNode, parent: Option<&'static str>) -> Self {
        Self::UnsupportedNode { kind: node.name(), parent, span: node.span }
    }

    /// `node` (or its child at the failure point) did not have the expected shape.
    pub fn malformed(component: &'static str, expected: impl Into<String>, found: &CstNode) -> Self {
        Self::MalformedSubtree {
            component,
            expected: expected.into(),
            found: found.snapshot(SNAPSHOT_DEPTH, SNAPSHOT_LEN),
            span: found.span,
        }
    }

    /// A node ended before the expected child.
    pub fn missing(component: &'static str, expected: impl Into<String>, parent: &CstNode) -> Self {
        Self::MalformedSubtree {
            component,
            expected: expected.into(),
            found: format!("end of {}", parent.snapshot(SNAPSHOT_DEPTH, SNAPSHOT_LEN)),
            span: Span::empty(parent.span.end),
        }
    }

    /// `{ name = value }` left in an object literal that is read as a value.
    pub fn cover_initializer(name: &str, span: Span) -> Self {
        Self::MalformedSubtree {
            component: "ObjectLiteral",
            expected: "a property (`name = value` is only valid in a pattern)".into(),
            found: format!("(CoverInitializedName {name} (Initializer = ...))"),
            span,
        }
    }

    pub fn pattern(found: &'static str, target: &'static str, span: Span) -> Self {
        Self::PatternConversion { found, target, span, hint: crate::hints::for_pattern(found, target) }
    }

    pub fn too_deep(limit: usize, span: Span) -> Self {
        Self::NestingTooDeep { limit, span }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnsupportedNode { span, .. }
            | Self::MalformedSubtree { span, .. }
            | Self::PatternConversion { span, .. }
            | Self::NestingTooDeep { span, .. } => *span,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PatternConversion { hint, .. } => *hint,
            Self::NestingTooDeep { .. } => Some("split deeply nested expressions or raise ConvertOptions::max_depth"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_parent() {
        let node = esfold_cst::parse("(Elision ,)").unwrap();
        let err = ConversionError::unsupported(&node, Some("ArrayLiteral"));
        assert_eq!(err.to_string(), "no converter for `Elision` inside `ArrayLiteral`");
        let err = ConversionError::unsupported(&node, None);
        assert_eq!(err.to_string(), "no converter for `Elision`");
    }

    #[test]
    fn malformed_carries_a_snapshot() {
        let node = esfold_cst::parse("(ClassTail { })").unwrap();
        let err = ConversionError::malformed("ClassTail", "class body", &node);
        assert_eq!(err.to_string(), "malformed ClassTail: expected class body, found (ClassTail { })");
        assert_eq!(err.span(), node.span);
    }

    #[test]
    fn pattern_errors_have_hints() {
        let err = ConversionError::pattern("CallExpression", "binding", Span::default());
        assert_eq!(err.to_string(), "CallExpression is not a valid binding target");
        assert!(err.hint().is_some());
    }
}
