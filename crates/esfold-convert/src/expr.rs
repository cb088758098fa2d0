// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Operators, literals with structure, and object/array/template forms.

use std::rc::Rc;

use esfold_ast::{
    ArrayExpression, AssignmentExpression, AssignmentOperator, AstNode, AwaitExpression, BinaryExpression,
    BinaryOperator, ConditionalExpression, CoverInitializedName, Expression, ExpressionOrPattern, ExpressionOrSpread,
    LogicalExpression, LogicalOperator, ObjectExpression, ObjectMember, ParenthesizedExpression, Property,
    PropertyKey, PropertyKind, SequenceExpression, SpreadElement, TemplateLiteral, Token, TokenKind,
    UnaryExpression, UnaryOperator, UpdateExpression, UpdateOperator, YieldExpression,
};
use esfold_cst::{CstNode, Rule};
use log::debug;

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::pattern::{into_pattern, simple_target, PatternMode};
use crate::router;
use crate::separated::{flatten, Piece};

/// A property or class member key with the brackets of a computed key.
pub(crate) struct KeyParts {
    pub key: PropertyKey,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

impl KeyParts {
    fn plain(key: PropertyKey) -> Self {
        Self { key, l_bracket_token: None, r_bracket_token: None }
    }
}

impl<'cst> ConversionContext<'cst> {
    // =========================================================================
    // Operators
    // =========================================================================

    /// `a, b, c`
    pub(crate) fn sequence_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let pieces = flatten(&node.children, &[]);
        let expressions = self.separated(&pieces, "Expression", |cx, piece| match piece {
            Piece::Value(operand) => cx.expression(operand),
            other => Err(ConversionError::malformed("Expression", "an expression", other.node())),
        })?;
        if esfold_ast::separated::has_trailing_separator(&expressions) {
            return Err(ConversionError::malformed("Expression", "an expression after ','", node));
        }
        Ok(Expression::Sequence(SequenceExpression { loc: node.span, expressions }))
    }

    /// `target op value`. Plain `=` destructures; every other operator takes
    /// a name or member target only.
    pub(crate) fn assignment_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "AssignmentExpression");
        let target = cursor.expect_node("an assignment target")?;
        let op_node = cursor.expect_node("an assignment operator")?;
        let operator = match op_node.as_token().and_then(AssignmentOperator::from_token) {
            Some(op) => op,
            None => return Err(ConversionError::malformed("AssignmentExpression", "an assignment operator", op_node)),
        };
        let right = self.expression(cursor.expect_node("a value")?)?;
        cursor.finish()?;

        let left = match self.target(target, "an assignment target")? {
            left if operator.is_plain() => into_pattern(left, PatternMode::Assignment)?,
            ExpressionOrPattern::Expression(expr) => simple_target(&expr)?,
            other => return Err(ConversionError::pattern(other.type_name(), "assignment", other.loc())),
        };

        Ok(Expression::Assignment(AssignmentExpression {
            loc: node.span,
            operator,
            left,
            right,
            operator_token: factory::token(op_node),
        }))
    }

    /// `test ? consequent : alternate`
    pub(crate) fn conditional_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "ConditionalExpression");
        let test = self.expression(cursor.expect_node("a condition")?)?;
        let question_token = cursor.expect(TokenKind::Question)?;
        let consequent = self.expression(cursor.expect_node("an expression")?)?;
        let colon_token = cursor.expect(TokenKind::Colon)?;
        let alternate = self.expression(cursor.expect_node("an expression")?)?;
        cursor.finish()?;
        Ok(Expression::Conditional(ConditionalExpression {
            loc: node.span,
            test,
            consequent,
            alternate,
            question_token,
            colon_token,
        }))
    }

    /// A flat precedence level `[operand (op operand)*]`, folded left.
    ///
    /// `&&`, `||` and `??` become [`LogicalExpression`]s whatever level they
    /// arrive on.
    pub(crate) fn binary_chain(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let component = node.name();
        let children = node.children.as_slice();
        let (first, rest) = match children.split_first() {
            Some((first, rest)) if !rest.is_empty() && rest.len() % 2 == 0 => (first, rest),
            _ => return Err(ConversionError::malformed(component, "operand (operator operand)+", node)),
        };

        let mut left = self.expression(first)?;
        for (level, pair) in rest.chunks_exact(2).enumerate() {
            let (op_node, operand) = (&pair[0], &pair[1]);
            self.check_fold_depth(level, op_node.span)?;
            let right = self.expression(operand)?;
            let loc = first.span.to(operand.span);
            let operator_token = factory::token(op_node);
            let kind = op_node.as_token();
            left = Rc::new(if let Some(operator) = kind.and_then(LogicalOperator::from_token) {
                Expression::Logical(LogicalExpression { loc, operator, left, right, operator_token })
            } else if let Some(operator) = kind.and_then(BinaryOperator::from_token) {
                Expression::Binary(BinaryExpression { loc, operator, left, right, operator_token })
            } else {
                return Err(ConversionError::malformed(component, "a binary operator", op_node));
            });
        }
        Ok(left)
    }

    /// `a ** b ** c`, folded right whether the levels arrive nested or flat.
    pub(crate) fn exponentiation(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let children = node.children.as_slice();
        let (last, rest) = match children.split_last() {
            Some((last, rest)) if !rest.is_empty() && rest.len() % 2 == 0 => (last, rest),
            _ => return Err(ConversionError::malformed("ExponentiationExpression", "operand ('**' operand)+", node)),
        };

        let mut right = self.expression(last)?;
        for (level, pair) in rest.rchunks_exact(2).enumerate() {
            let (operand, op_node) = (&pair[0], &pair[1]);
            self.check_fold_depth(level, op_node.span)?;
            if !op_node.is_token(TokenKind::StarStar) {
                return Err(ConversionError::malformed("ExponentiationExpression", "'**'", op_node));
            }
            let left = self.expression(operand)?;
            right = Rc::new(Expression::Binary(BinaryExpression {
                loc: operand.span.to(last.span),
                operator: BinaryOperator::Exp,
                left,
                right,
                operator_token: factory::token(op_node),
            }));
        }
        Ok(right)
    }

    pub(crate) fn unary_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "UnaryExpression");
        let op_node = cursor.expect_node("a unary operator")?;
        let operator = match op_node.as_token().and_then(UnaryOperator::from_token) {
            Some(op) => op,
            None => return Err(ConversionError::malformed("UnaryExpression", "a unary operator", op_node)),
        };
        let argument = self.expression(cursor.expect_node("an operand")?)?;
        cursor.finish()?;
        Ok(Expression::Unary(UnaryExpression { loc: node.span, operator, argument, operator_token: factory::token(op_node) }))
    }

    /// `x++` or `--x`.
    pub(crate) fn update_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let update_op = |n: &CstNode| n.as_token().and_then(UpdateOperator::from_token);
        let found = match node.children.as_slice() {
            [first, second] => update_op(first)
                .map(|op| (true, op, first, second))
                .or_else(|| update_op(second).map(|op| (false, op, second, first))),
            _ => None,
        };
        let Some((prefix, operator, op_node, operand)) = found else {
            return Err(ConversionError::malformed("UpdateExpression", "an operand and '++' or '--'", node));
        };
        let argument = self.expression(operand)?;
        simple_target(&argument)?;
        Ok(Expression::Update(UpdateExpression {
            loc: node.span,
            operator,
            prefix,
            argument,
            operator_token: factory::token(op_node),
        }))
    }

    pub(crate) fn await_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "AwaitExpression");
        let await_token = cursor.expect(TokenKind::Await)?;
        let argument = self.expression(cursor.expect_node("an operand")?)?;
        cursor.finish()?;
        Ok(Expression::Await(AwaitExpression { loc: node.span, argument, await_token }))
    }

    /// `yield`, `yield value` or `yield* iterable`.
    pub(crate) fn yield_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "YieldExpression");
        let yield_token = cursor.expect(TokenKind::Yield)?;
        let star_token = cursor.match_token(TokenKind::Star);
        let argument = match cursor.advance() {
            Some(value) => Some(self.expression(value)?),
            None if star_token.is_some() => return Err(cursor.error("an expression after 'yield*'")),
            None => None,
        };
        cursor.finish()?;
        Ok(Expression::Yield(YieldExpression {
            loc: node.span,
            argument,
            delegate: star_token.is_some(),
            yield_token,
            star_token,
        }))
    }

    /// `( expression )`, once the cover has been read as an expression.
    pub(crate) fn parenthesized(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let component = node.name();
        let (l_paren_token, inner, r_paren_token) = delimited(node, TokenKind::LParen, TokenKind::RParen, component)?;
        let contents = match inner {
            [only] if !only.is_token(TokenKind::Comma) && !only.is_token(TokenKind::Ellipsis) => only,
            [] => return Err(ConversionError::missing(component, "an expression between the parentheses", node)),
            [_, extra, ..] => return Err(ConversionError::malformed(component, "')'", extra)),
            [other] => return Err(ConversionError::malformed(component, "an expression", other)),
        };
        debug!("{} at {}: parenthesized expression", component, node.span.start.offset);

        let expression = self.expression(contents)?;
        if !self.options.preserve_parens {
            return Ok(expression);
        }
        Ok(Rc::new(Expression::Parenthesized(ParenthesizedExpression {
            loc: node.span,
            expression,
            l_paren_token,
            r_paren_token,
        })))
    }

    // =========================================================================
    // Arrays and spreads
    // =========================================================================

    /// `[a, , ...b]`
    pub(crate) fn array_literal(&mut self, node: &'cst CstNode) -> Result<ArrayExpression> {
        let (l_bracket_token, inner, r_bracket_token) =
            delimited(node, TokenKind::LBracket, TokenKind::RBracket, "ArrayLiteral")?;
        let pieces = flatten(inner, &[]);
        let elements = self.separated_with_holes(&pieces, "ArrayLiteral", |cx, piece| cx.element(piece, "ArrayLiteral"))?;
        Ok(ArrayExpression { loc: node.span, elements, l_bracket_token, r_bracket_token })
    }

    /// An array element or call argument, spread or not.
    pub(crate) fn element(&mut self, piece: Piece<'cst>, component: &'static str) -> Result<ExpressionOrSpread> {
        match piece {
            Piece::Value(node) => match self.convert(node)? {
                AstNode::Expression(expr) => Ok(ExpressionOrSpread::Expression(expr)),
                AstNode::Spread(spread) => Ok(ExpressionOrSpread::Spread((*spread).clone())),
                other => Err(self.mismatch("an expression", node, &other)),
            },
            Piece::Rest { ellipsis, argument } => {
                Ok(ExpressionOrSpread::Spread(self.spread_parts(ellipsis, argument)?))
            }
            Piece::Separator(sep) => Err(ConversionError::malformed(component, "an element", sep)),
        }
    }

    /// `...value`
    pub(crate) fn spread_element(&mut self, node: &'cst CstNode) -> Result<SpreadElement> {
        match node.children.as_slice() {
            [ellipsis, argument] if ellipsis.is_token(TokenKind::Ellipsis) => self.spread_parts(ellipsis, argument),
            _ => Err(ConversionError::malformed("SpreadElement", "'...' and an expression", node)),
        }
    }

    fn spread_parts(&mut self, ellipsis: &'cst CstNode, argument: &'cst CstNode) -> Result<SpreadElement> {
        Ok(SpreadElement {
            loc: ellipsis.span.to(argument.span),
            argument: self.literal_member(argument)?,
            ellipsis_token: factory::token(ellipsis),
        })
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// `{ a, b: 1, [c]() {}, ...d }`
    pub(crate) fn object_literal(&mut self, node: &'cst CstNode) -> Result<ObjectExpression> {
        let (l_brace_token, inner, r_brace_token) = delimited(node, TokenKind::LBrace, TokenKind::RBrace, "ObjectLiteral")?;
        let pieces = flatten(inner, &[]);
        let properties = self.separated(&pieces, "ObjectLiteral", |cx, piece| match piece {
            Piece::Value(member) => cx.object_member(member),
            Piece::Rest { ellipsis, argument } => Ok(ObjectMember::Spread(cx.spread_parts(ellipsis, argument)?)),
            Piece::Separator(sep) => Err(ConversionError::malformed("ObjectLiteral", "a property", sep)),
        })?;
        Ok(ObjectExpression { loc: node.span, properties, l_brace_token, r_brace_token })
    }

    fn object_member(&mut self, node: &'cst CstNode) -> Result<ObjectMember> {
        match self.convert(node)? {
            AstNode::ObjectMember(member) => Ok((*member).clone()),
            AstNode::Spread(spread) => Ok(ObjectMember::Spread((*spread).clone())),
            AstNode::Expression(expr) => match &*expr {
                Expression::Identifier(id) => Ok(shorthand_property(node, id.clone(), expr.clone())),
                _ => Err(ConversionError::malformed("ObjectLiteral", "a property", node)),
            },
            other => Err(self.mismatch("a property", node, &other)),
        }
    }

    /// `a`, `a: value`, `...value`, a method, or a cover initializer.
    pub(crate) fn property_definition(&mut self, node: &'cst CstNode) -> Result<ObjectMember> {
        match node.children.as_slice() {
            [only] => self.object_member(only),
            [ellipsis, argument] if ellipsis.is_token(TokenKind::Ellipsis) => {
                Ok(ObjectMember::Spread(self.spread_parts(ellipsis, argument)?))
            }
            [key, colon, value] if colon.is_token(TokenKind::Colon) => {
                let key = self.property_key(key)?;
                let value = self.literal_member(value)?;
                Ok(ObjectMember::Property(Property {
                    loc: node.span,
                    computed: key.key.is_computed(),
                    key: key.key,
                    value,
                    kind: PropertyKind::Init,
                    method: false,
                    shorthand: false,
                    colon_token: Some(factory::token(colon)),
                    accessor_token: None,
                    l_bracket_token: key.l_bracket_token,
                    r_bracket_token: key.r_bracket_token,
                }))
            }
            _ if node.child_token(TokenKind::LParen).is_some() => self.method_property(node),
            _ => Err(ConversionError::malformed("PropertyDefinition", "a property definition", node)),
        }
    }

    /// `{ a = 1 }`, legal only once the literal becomes a pattern.
    pub(crate) fn cover_initialized_name(&mut self, node: &'cst CstNode) -> Result<ObjectMember> {
        let mut cursor = Cursor::new(node, "CoverInitializedName");
        let key = factory::identifier(cursor.expect_node("a name")?, "CoverInitializedName")?;
        let (eq_token, initializer) = match self.take_initializer(&mut cursor)? {
            Some(init) => init,
            None => return Err(cursor.error("an initializer")),
        };
        cursor.finish()?;
        Ok(ObjectMember::CoverInitializedName(CoverInitializedName { loc: node.span, key, eq_token, initializer }))
    }

    /// Key of a property, method or class member.
    pub(crate) fn property_key(&mut self, node: &'cst CstNode) -> Result<KeyParts> {
        if let Some(rule) = node.as_rule() {
            return match (rule, node.children.as_slice()) {
                (Rule::PropertyName | Rule::LiteralPropertyName | Rule::ClassElementName, [only]) => {
                    self.property_key(only)
                }
                (Rule::ComputedPropertyName, [open, value, close])
                    if open.is_token(TokenKind::LBracket) && close.is_token(TokenKind::RBracket) =>
                {
                    Ok(KeyParts {
                        key: PropertyKey::Computed(self.expression(value)?),
                        l_bracket_token: Some(factory::token(open)),
                        r_bracket_token: Some(factory::token(close)),
                    })
                }
                (Rule::IdentifierReference | Rule::BindingIdentifier, _) => {
                    Ok(KeyParts::plain(PropertyKey::Identifier(factory::identifier(node, "PropertyName")?)))
                }
                _ => Err(ConversionError::malformed("PropertyName", "a property name", node)),
            };
        }

        let key = match node.as_token() {
            Some(TokenKind::PrivateIdentifier) => {
                PropertyKey::PrivateIdentifier(factory::private_identifier(node, "ClassElementName")?)
            }
            Some(TokenKind::StringLiteral | TokenKind::NumericLiteral) => {
                PropertyKey::Literal(factory::literal(node, "LiteralPropertyName")?)
            }
            _ => PropertyKey::Identifier(factory::identifier(node, "LiteralPropertyName")?),
        };
        Ok(KeyParts::plain(key))
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// `` `a${b}c` `` or a substitution-free template.
    pub(crate) fn template_literal(&mut self, node: &'cst CstNode) -> Result<TemplateLiteral> {
        let node = router::unwrap(node);
        if node.is_token(TokenKind::NoSubstitutionTemplate) {
            return Ok(TemplateLiteral {
                loc: node.span,
                quasis: vec![factory::template_element(node, "TemplateLiteral")?],
                expressions: Vec::new(),
            });
        }
        if !node.is_rule(Rule::SubstitutionTemplate) {
            return Err(ConversionError::malformed("TemplateLiteral", "a template", node));
        }

        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        for piece in flatten(&node.children, &[Rule::TemplateSpans, Rule::TemplateMiddleList]) {
            let part = piece.node();
            let expect_chunk = quasis.len() == expressions.len();
            let is_chunk = part.as_token().map_or(false, TokenKind::is_template);
            match (expect_chunk, is_chunk) {
                (true, true) => {
                    let in_order = match part.as_token() {
                        Some(TokenKind::TemplateHead) => quasis.is_empty(),
                        Some(TokenKind::TemplateMiddle | TokenKind::TemplateTail) => {
                            quasis.last().map_or(false, |prev: &esfold_ast::TemplateElement| !prev.tail)
                        }
                        _ => false,
                    };
                    if !in_order {
                        return Err(ConversionError::malformed("SubstitutionTemplate", "a template chunk in order", part));
                    }
                    quasis.push(factory::template_element(part, "SubstitutionTemplate")?);
                }
                (false, false) => expressions.push(self.expression(part)?),
                (true, false) => return Err(ConversionError::malformed("SubstitutionTemplate", "a template chunk", part)),
                (false, true) => return Err(ConversionError::malformed("SubstitutionTemplate", "a substitution", part)),
            }
        }

        match quasis.last() {
            Some(tail) if tail.tail && quasis.len() == expressions.len() + 1 => {}
            _ => return Err(ConversionError::missing("SubstitutionTemplate", "a template tail", node)),
        }
        Ok(TemplateLiteral { loc: node.span, quasis, expressions })
    }
}

fn shorthand_property(node: &CstNode, key: esfold_ast::Identifier, value: Rc<Expression>) -> ObjectMember {
    ObjectMember::Property(Property {
        loc: node.span,
        key: PropertyKey::Identifier(key),
        value,
        kind: PropertyKind::Init,
        method: false,
        shorthand: true,
        computed: false,
        colon_token: None,
        accessor_token: None,
        l_bracket_token: None,
        r_bracket_token: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfold_ast::Pattern;

    fn convert(src: &str) -> Rc<Expression> {
        let node = esfold_cst::parse(src).unwrap();
        let mut cx = ConversionContext::default();
        cx.convert(&node).unwrap().into_expression().unwrap()
    }

    #[test]
    fn left_associative_levels_fold_left() {
        let expr = convert("(AdditiveExpression a - b - c)");
        let Expression::Binary(outer) = &*expr else { panic!("expected binary, got {expr:?}") };
        assert_eq!(outer.operator, BinaryOperator::Sub);
        assert!(matches!(&*outer.left, Expression::Binary(_)));
        assert!(matches!(&*outer.right, Expression::Identifier(id) if id.name == "c"));
        assert_eq!(outer.loc.start.offset, 0);
    }

    #[test]
    fn logical_operators_make_logical_nodes() {
        let expr = convert("(CoalesceExpression a ?? b)");
        assert!(matches!(&*expr, Expression::Logical(l) if l.operator == LogicalOperator::Coalesce));
    }

    #[test]
    fn exponentiation_folds_right_when_flat() {
        let expr = convert("(ExponentiationExpression a ** b ** c)");
        let Expression::Binary(outer) = &*expr else { panic!("expected binary") };
        assert!(matches!(&*outer.left, Expression::Identifier(id) if id.name == "a"));
        assert!(matches!(&*outer.right, Expression::Binary(inner) if inner.operator == BinaryOperator::Exp));
    }

    #[test]
    fn update_requires_a_simple_target() {
        let node = esfold_cst::parse("(UpdateExpression (CallExpression f (Arguments '(' ')')) ++)").unwrap();
        let err = ConversionContext::default().convert(&node).unwrap_err();
        assert!(matches!(err, ConversionError::PatternConversion { found: "CallExpression", .. }));

        let expr = convert("(UpdateExpression -- x)");
        assert!(matches!(&*expr, Expression::Update(u) if u.prefix && u.operator == UpdateOperator::Decrement));
    }

    #[test]
    fn compound_assignment_keeps_a_simple_target() {
        let expr = convert("(AssignmentExpression a += 1)");
        let Expression::Assignment(assign) = &*expr else { panic!("expected assignment") };
        assert_eq!(assign.operator, AssignmentOperator::AddAssign);
        assert!(matches!(&*assign.left, Pattern::Identifier(_)));
    }

    #[test]
    fn object_keys() {
        let expr = convert("(ObjectLiteral { (PropertyDefinition (PropertyName (LiteralPropertyName \"ab\")) : 1) , (PropertyDefinition (ComputedPropertyName [ k ]) : 2) })");
        let Expression::Object(object) = &*expr else { panic!("expected object") };
        assert_eq!(object.properties.len(), 2);
        let ObjectMember::Property(first) = &object.properties[0].value else { panic!() };
        assert!(matches!(&first.key, PropertyKey::Literal(_)));
        assert!(object.properties[0].trailing_separator.is_some());
        let ObjectMember::Property(second) = &object.properties[1].value else { panic!() };
        assert!(second.computed);
        assert!(second.l_bracket_token.is_some());
    }

    #[test]
    fn yield_star_needs_an_argument() {
        let expr = convert("(YieldExpression yield * g)");
        assert!(matches!(&*expr, Expression::Yield(y) if y.delegate));
        let node = esfold_cst::parse("(YieldExpression yield *)").unwrap();
        assert!(ConversionContext::default().convert(&node).is_err());
    }
}
