// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Memoized node identity and context isolation.

mod common;

use std::rc::Rc;

use common::cst;
use esfold_ast::Expression;
use esfold_convert::{ConversionContext, ConversionError};

#[test]
fn same_node_converts_to_the_same_handle() {
    let node = cst("(AdditiveExpression (MultiplicativeExpression b * c) + d)");
    let mut cx = ConversionContext::default();
    let first = cx.convert(&node).unwrap();
    let second = cx.convert(&node).unwrap();
    assert!(first.ptr_eq(&second));
    assert!(cx.cached_nodes() > 0);
}

#[test]
fn children_are_shared_with_their_parent() {
    let node = cst("(AdditiveExpression (MultiplicativeExpression b * c) + d)");
    let mut cx = ConversionContext::default();
    let sum = cx.convert(&node).unwrap().into_expression().unwrap();
    let product = cx.convert(&node.children[0]).unwrap().into_expression().unwrap();
    let Expression::Binary(sum) = &*sum else { panic!("expected a binary expression") };
    assert!(Rc::ptr_eq(&sum.left, &product));
}

#[test]
fn wrappers_alias_the_wrapped_node() {
    let node = cst("(AssignmentExpression (ConditionalExpression (LogicalORExpression (MemberExpression a . b))))");
    let mut cx = ConversionContext::default();
    let outer = cx.convert(&node).unwrap();
    let inner = cx.convert(&node.children[0].children[0].children[0]).unwrap();
    assert!(outer.ptr_eq(&inner));
    assert_eq!(outer.type_name(), "MemberExpression");
}

#[test]
fn separate_contexts_do_not_share_nodes() {
    let node = cst("(MemberExpression a . b)");
    let first = ConversionContext::default().convert(&node).unwrap();
    let second = ConversionContext::default().convert(&node).unwrap();
    assert!(!first.ptr_eq(&second));
    assert_eq!(first.into_expression().unwrap(), second.into_expression().unwrap());
}

#[test]
fn fragments_report_their_enclosing_production() {
    let node = cst("(ArrayLiteral [ (Initializer = 1) ])");
    let err = ConversionContext::default().convert(&node).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::UnsupportedNode { kind: "Initializer", parent: Some("ArrayLiteral"), .. }
    ));
    assert_eq!(err.to_string(), "no converter for `Initializer` inside `ArrayLiteral`");
}

#[test]
fn failed_conversions_leave_the_context_usable() {
    let bad = cst("(ArrayLiteral [ (Initializer = 1) ])");
    let good = cst("(MemberExpression a . b)");
    let mut cx = ConversionContext::default();
    assert!(cx.convert(&bad).is_err());
    assert_eq!(cx.depth(), 0);
    assert!(cx.convert(&good).is_ok());
}
