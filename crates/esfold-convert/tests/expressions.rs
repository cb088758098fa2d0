// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression trees: precedence folding, chains, templates and separators.

mod common;

use common::{expression, expression_with};
use esfold_ast::{
    BinaryOperator, Expression, ExpressionOrSpread, LiteralValue, LogicalOperator, MemberProperty,
};
use esfold_convert::ConvertOptions;

fn ident_name(expr: &Expression) -> &str {
    match expr {
        Expression::Identifier(id) => &id.name,
        other => panic!("expected an identifier, got {}", other.type_name()),
    }
}

fn number(expr: &Expression) -> f64 {
    match expr {
        Expression::Literal(lit) => match lit.value {
            LiteralValue::Number(n) => n,
            ref other => panic!("expected a number, got {other:?}"),
        },
        other => panic!("expected a literal, got {}", other.type_name()),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = expression("(AdditiveExpression a + (MultiplicativeExpression b * c))");
    let Expression::Binary(add) = &*expr else { panic!("expected a binary expression") };
    assert_eq!(add.operator, BinaryOperator::Add);
    assert_eq!(ident_name(&add.left), "a");
    let Expression::Binary(mul) = &*add.right else { panic!("expected a nested binary expression") };
    assert_eq!(mul.operator, BinaryOperator::Mul);
    assert_eq!(ident_name(&mul.left), "b");
    assert_eq!(ident_name(&mul.right), "c");
}

#[test]
fn equality_wraps_relational() {
    let expr = expression("(EqualityExpression (RelationalExpression a < b) == c)");
    let Expression::Binary(eq) = &*expr else { panic!("expected a binary expression") };
    assert_eq!(eq.operator, BinaryOperator::Eq);
    assert!(matches!(&*eq.left, Expression::Binary(lt) if lt.operator == BinaryOperator::Lt));
}

#[test]
fn logical_levels_become_logical_expressions() {
    let expr = expression("(LogicalORExpression a || (LogicalANDExpression b && c))");
    let Expression::Logical(or) = &*expr else { panic!("expected a logical expression") };
    assert_eq!(or.operator, LogicalOperator::Or);
    assert!(matches!(&*or.right, Expression::Logical(and) if and.operator == LogicalOperator::And));
}

#[test]
fn exponentiation_is_right_associative() {
    let expr = expression("(ExponentiationExpression a ** (ExponentiationExpression b ** c))");
    let Expression::Binary(outer) = &*expr else { panic!("expected a binary expression") };
    assert_eq!(outer.operator, BinaryOperator::Exp);
    assert_eq!(ident_name(&outer.left), "a");
    let Expression::Binary(inner) = &*outer.right else { panic!("expected b ** c on the right") };
    assert_eq!(inner.operator, BinaryOperator::Exp);
    assert_eq!(ident_name(&inner.left), "b");
}

#[test]
fn optional_flag_applies_to_the_first_link_only() {
    let expr = expression("(OptionalExpression a (OptionalChain ?. b . c))");
    let Expression::Chain(chain) = &*expr else { panic!("expected a chain expression") };
    let Expression::Member(outer) = &*chain.expression else { panic!("expected a member expression") };
    assert!(!outer.optional);
    assert!(matches!(&outer.property, MemberProperty::Identifier(id) if id.name == "c"));
    let Expression::Member(inner) = &*outer.object else { panic!("expected a nested member expression") };
    assert!(inner.optional);
    assert!(matches!(&inner.property, MemberProperty::Identifier(id) if id.name == "b"));
    assert_eq!(ident_name(&inner.object), "a");
}

#[test]
fn template_literal_quasis_and_expressions() {
    let expr = expression(
        "(TemplateLiteral (SubstitutionTemplate TemplateHead:'`a${' (AdditiveExpression 1 + 1) TemplateTail:'}b`'))",
    );
    let Expression::Template(template) = &*expr else { panic!("expected a template literal") };
    assert_eq!(template.quasis.len(), 2);
    assert_eq!(template.quasis[0].raw, "`a${");
    assert_eq!(template.quasis[0].cooked.as_deref(), Some("a"));
    assert!(!template.quasis[0].tail);
    assert_eq!(template.quasis[1].raw, "}b`");
    assert_eq!(template.quasis[1].cooked.as_deref(), Some("b"));
    assert!(template.quasis[1].tail);
    assert_eq!(template.expressions.len(), 1);
    assert!(matches!(&*template.expressions[0], Expression::Binary(b) if b.operator == BinaryOperator::Add));
}

#[test]
fn new_with_member_callee_and_arguments() {
    let expr = expression("(MemberExpression new (MemberExpression Foo . Bar) (Arguments '(' (ArgumentList 1 , 2) ')'))");
    let Expression::New(new) = &*expr else { panic!("expected a new expression") };
    let Expression::Member(callee) = &*new.callee else { panic!("expected a member callee") };
    assert_eq!(ident_name(&callee.object), "Foo");
    assert!(matches!(&callee.property, MemberProperty::Identifier(id) if id.name == "Bar"));
    assert_eq!(new.arguments.len(), 2);
    let values: Vec<f64> = new
        .arguments
        .iter()
        .map(|item| match &item.value {
            ExpressionOrSpread::Expression(e) => number(e),
            ExpressionOrSpread::Spread(_) => panic!("unexpected spread"),
        })
        .collect();
    assert_eq!(values, [1.0, 2.0]);
    assert!(new.l_paren_token.is_some());
}

#[test]
fn trailing_comma_in_arguments_is_kept() {
    let expr = expression("(CallExpression f (Arguments '(' (ArgumentList a , b) , ')'))");
    let Expression::Call(call) = &*expr else { panic!("expected a call") };
    assert_eq!(call.arguments.len(), 2);
    assert!(call.arguments[0].trailing_separator.is_some());
    assert!(call.arguments[1].trailing_separator.is_some());

    let expr = expression("(CallExpression f (Arguments '(' (ArgumentList a , b) ')'))");
    let Expression::Call(call) = &*expr else { panic!("expected a call") };
    assert!(call.arguments[1].trailing_separator.is_none());
}

#[test]
fn array_holes_keep_their_commas() {
    let expr = expression("(ArrayLiteral [ (ElementList a , (Elision ,) b) ])");
    let Expression::Array(array) = &*expr else { panic!("expected an array") };
    assert_eq!(array.elements.len(), 3);
    assert!(array.elements[1].value.is_none());
    assert!(array.elements[1].trailing_separator.is_some());
    assert!(array.elements[2].trailing_separator.is_none());
}

#[test]
fn parentheses_can_be_dropped() {
    let notation = "(CoverParenthesizedExpressionAndArrowParameterList '(' (AdditiveExpression a + b) ')')";
    assert!(matches!(&*expression(notation), Expression::Parenthesized(_)));
    let bare = expression_with(notation, ConvertOptions::default().with_preserve_parens(false));
    assert!(matches!(&*bare, Expression::Binary(_)));
}

#[test]
fn json_uses_estree_type_names() {
    let expr = expression("(AdditiveExpression a + (MultiplicativeExpression b * c))");
    let json = serde_json::to_value(&*expr).unwrap();
    assert_eq!(json["type"], "BinaryExpression");
    assert_eq!(json["operator"], "+");
    assert_eq!(json["left"]["type"], "Identifier");
    assert_eq!(json["right"]["type"], "BinaryExpression");
    assert_eq!(json["right"]["operator"], "*");
}

#[test]
fn json_list_items_read_as_plain_estree_nodes() {
    let call = expression("(CallExpression f (Arguments '(' (ArgumentList a , b) , ')'))");
    let json = serde_json::to_value(&*call).unwrap();
    assert_eq!(json["arguments"][0]["type"], "Identifier");
    assert_eq!(json["arguments"][0]["trailingSeparator"]["text"], ",");
    assert_eq!(json["arguments"][1]["name"], "b");
    assert_eq!(json["arguments"][1]["trailingSeparator"]["text"], ",");

    let array = expression("(ArrayLiteral [ (ElementList a , (Elision ,) b) ])");
    let json = serde_json::to_value(&*array).unwrap();
    assert_eq!(json["elements"][0]["type"], "Identifier");
    assert!(json["elements"][1].is_null());
    assert_eq!(json["elements"][2]["name"], "b");
    assert!(json["elements"][2].get("trailingSeparator").is_none());
}
