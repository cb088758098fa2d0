// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Patterns: binding productions and cover-grammar reinterpretation.
//!
//! Binding productions (`ObjectBindingPattern`, `SingleNameBinding`, ...)
//! convert straight to [`Pattern`]s. Cover grammars hand us an
//! [`Expression`] first; [`to_pattern`] is the one conversion from that
//! reading to a pattern, and it fails rather than guessing.

use std::rc::Rc;

use esfold_ast::{
    AssignmentPattern, AssignmentProperty, AstNode, Expression, ExpressionOrPattern, ExpressionOrSpread, ObjectMember,
    ObjectPattern, ObjectPatternMember, Pattern, PropertyKey, PropertyKind, RestElement, Separated, Token, TokenKind,
};
use esfold_cst::{CstNode, Rule};
use log::debug;

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::separated::{flatten, Piece};

/// Where a pattern appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    /// Declarations and parameters: only names can be bound.
    Binding,
    /// The left side of `=`, `for-in` and `for-of`: member expressions are
    /// valid targets too.
    Assignment,
}

impl PatternMode {
    fn target(self) -> &'static str {
        match self {
            PatternMode::Binding => "binding",
            PatternMode::Assignment => "assignment",
        }
    }
}

fn invalid(expr: &Expression, mode: PatternMode) -> ConversionError {
    ConversionError::pattern(expr.type_name(), mode.target(), expr.loc())
}

/// Reinterpret an expression as a pattern.
///
/// Total over identifiers, object and array literals, `=` assignments and
/// spreads (as rest elements), nested in any combination. Member
/// expressions (and parenthesised simple targets) are accepted in
/// [`PatternMode::Assignment`] only. Everything else is a
/// [`ConversionError::PatternConversion`].
pub fn to_pattern(expr: &Rc<Expression>, mode: PatternMode) -> Result<Rc<Pattern>> {
    let pattern = match &**expr {
        Expression::Identifier(id) => Pattern::Identifier(id.clone()),
        Expression::Object(object) => {
            let count = object.properties.len();
            let properties = object
                .properties
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let last = i + 1 == count && item.trailing_separator.is_none();
                    Ok(Separated::new(object_member(&item.value, mode, last)?, item.trailing_separator.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            Pattern::Object(ObjectPattern {
                loc: object.loc,
                properties,
                l_brace_token: object.l_brace_token.clone(),
                r_brace_token: object.r_brace_token.clone(),
            })
        }
        Expression::Array(array) => {
            let count = array.elements.len();
            let elements = array
                .elements
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let last = i + 1 == count && item.trailing_separator.is_none();
                    let element = match &item.value {
                        None => None,
                        Some(ExpressionOrSpread::Expression(e)) => Some(to_pattern(e, mode)?),
                        Some(ExpressionOrSpread::Spread(spread)) => {
                            if !last {
                                return Err(ConversionError::pattern("RestElement", mode.target(), spread.loc));
                            }
                            let argument = to_pattern(&spread.argument, mode)?;
                            if matches!(*argument, Pattern::Assignment(_)) {
                                return Err(ConversionError::pattern("RestElement", mode.target(), spread.loc));
                            }
                            Some(Rc::new(Pattern::Rest(RestElement {
                                loc: spread.loc,
                                argument,
                                ellipsis_token: spread.ellipsis_token.clone(),
                            })))
                        }
                    };
                    Ok(Separated::new(element, item.trailing_separator.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            Pattern::Array(esfold_ast::ArrayPattern {
                loc: array.loc,
                elements,
                l_bracket_token: array.l_bracket_token.clone(),
                r_bracket_token: array.r_bracket_token.clone(),
            })
        }
        Expression::Assignment(assign) if assign.operator.is_plain() => {
            if mode == PatternMode::Binding {
                check_binding(&assign.left)?;
            }
            Pattern::Assignment(AssignmentPattern {
                loc: assign.loc,
                left: assign.left.clone(),
                right: assign.right.clone(),
                eq_token: assign.operator_token.clone(),
            })
        }
        Expression::Member(_) | Expression::Parenthesized(_) if mode == PatternMode::Assignment => {
            return simple_target(expr);
        }
        other => return Err(invalid(other, mode)),
    };
    Ok(Rc::new(pattern))
}

/// Target of a compound assignment or update: a name or a member
/// expression, possibly parenthesised.
pub(crate) fn simple_target(expr: &Rc<Expression>) -> Result<Rc<Pattern>> {
    match &**expr {
        Expression::Identifier(id) => Ok(Rc::new(Pattern::Identifier(id.clone()))),
        Expression::Member(_) => Ok(Rc::new(Pattern::Expression(expr.clone()))),
        Expression::Parenthesized(paren) => simple_target(&paren.expression)
            .map_err(|_| ConversionError::pattern("ParenthesizedExpression", "assignment", paren.loc)),
        other => Err(invalid(other, PatternMode::Assignment)),
    }
}

/// Settle a position that may hold either reading as a pattern.
pub fn into_pattern(target: ExpressionOrPattern, mode: PatternMode) -> Result<Rc<Pattern>> {
    match target {
        ExpressionOrPattern::Pattern(pattern) => Ok(pattern),
        ExpressionOrPattern::Expression(expr) => to_pattern(&expr, mode),
    }
}

/// Fail if a literal read as a value still holds a `{ a = 1 }` cover
/// initializer, at any depth of nested object and array literals.
///
/// Literal members are converted without this check; the position that
/// consumes the outermost literal decides whether it is a value.
pub(crate) fn reject_cover_initializers(expr: &Expression) -> Result<()> {
    match expr {
        Expression::Object(object) => object.properties.iter().try_for_each(|item| match &item.value {
            ObjectMember::CoverInitializedName(cover) => {
                Err(ConversionError::cover_initializer(&cover.key.name, cover.loc))
            }
            ObjectMember::Property(prop) => reject_cover_initializers(&prop.value),
            ObjectMember::Spread(spread) => reject_cover_initializers(&spread.argument),
        }),
        Expression::Array(array) => {
            array.elements.iter().filter_map(|item| item.value.as_ref()).try_for_each(reject_in_element)
        }
        _ => Ok(()),
    }
}

pub(crate) fn reject_in_element(element: &ExpressionOrSpread) -> Result<()> {
    match element {
        ExpressionOrSpread::Expression(expr) => reject_cover_initializers(expr),
        ExpressionOrSpread::Spread(spread) => reject_cover_initializers(&spread.argument),
    }
}

fn object_member(member: &ObjectMember, mode: PatternMode, last: bool) -> Result<ObjectPatternMember> {
    Ok(match member {
        ObjectMember::Property(prop) => {
            if prop.method || prop.kind != PropertyKind::Init {
                return Err(ConversionError::pattern("Property", mode.target(), prop.loc));
            }
            ObjectPatternMember::Property(AssignmentProperty {
                loc: prop.loc,
                key: prop.key.clone(),
                value: to_pattern(&prop.value, mode)?,
                shorthand: prop.shorthand,
                computed: prop.computed,
                colon_token: prop.colon_token.clone(),
                l_bracket_token: prop.l_bracket_token.clone(),
                r_bracket_token: prop.r_bracket_token.clone(),
            })
        }
        ObjectMember::CoverInitializedName(cover) => {
            let name = Rc::new(Pattern::Identifier(cover.key.clone()));
            ObjectPatternMember::Property(AssignmentProperty {
                loc: cover.loc,
                key: PropertyKey::Identifier(cover.key.clone()),
                value: Rc::new(Pattern::Assignment(AssignmentPattern {
                    loc: cover.loc,
                    left: name,
                    right: cover.initializer.clone(),
                    eq_token: cover.eq_token.clone(),
                })),
                shorthand: true,
                computed: false,
                colon_token: None,
                l_bracket_token: None,
                r_bracket_token: None,
            })
        }
        ObjectMember::Spread(spread) => {
            if !last {
                return Err(ConversionError::pattern("RestElement", mode.target(), spread.loc));
            }
            let argument = match (&*spread.argument, mode) {
                (Expression::Identifier(id), _) => Rc::new(Pattern::Identifier(id.clone())),
                (_, PatternMode::Assignment) => simple_target(&spread.argument)?,
                (other, PatternMode::Binding) => return Err(invalid(other, mode)),
            };
            ObjectPatternMember::Rest(RestElement {
                loc: spread.loc,
                argument,
                ellipsis_token: spread.ellipsis_token.clone(),
            })
        }
    })
}

/// Reject member targets inside a pattern built in assignment mode.
fn check_binding(pattern: &Pattern) -> Result<()> {
    match pattern {
        Pattern::Identifier(_) => Ok(()),
        Pattern::Expression(expr) => Err(invalid(expr, PatternMode::Binding)),
        Pattern::Object(object) => object.properties.iter().try_for_each(|item| match &item.value {
            ObjectPatternMember::Property(prop) => check_binding(&prop.value),
            ObjectPatternMember::Rest(rest) => check_binding(&rest.argument),
        }),
        Pattern::Array(array) => array.elements.iter().filter_map(|item| item.value.as_deref()).try_for_each(check_binding),
        Pattern::Rest(rest) => check_binding(&rest.argument),
        Pattern::Assignment(assign) => check_binding(&assign.left),
    }
}

impl<'cst> ConversionContext<'cst> {
    // =========================================================================
    // Binding productions
    // =========================================================================

    /// `{ a, b: [c], ...rest }`
    pub(crate) fn object_binding_pattern(&mut self, node: &'cst CstNode) -> Result<Pattern> {
        let (l_brace_token, inner, r_brace_token) =
            delimited(node, TokenKind::LBrace, TokenKind::RBrace, "ObjectBindingPattern")?;
        let pieces = flatten(inner, &[]);
        let properties = self.separated(&pieces, "ObjectBindingPattern", |cx, piece| match piece {
            Piece::Value(member) => cx.object_pattern_member(member),
            Piece::Rest { ellipsis, argument } => {
                let argument = cx.binding(argument)?;
                Ok(ObjectPatternMember::Rest(RestElement {
                    loc: ellipsis.span.to(argument.loc()),
                    argument,
                    ellipsis_token: factory::token(ellipsis),
                }))
            }
            Piece::Separator(sep) => Err(ConversionError::malformed("ObjectBindingPattern", "a property", sep)),
        })?;
        Ok(Pattern::Object(ObjectPattern { loc: node.span, properties, l_brace_token, r_brace_token }))
    }

    fn object_pattern_member(&mut self, node: &'cst CstNode) -> Result<ObjectPatternMember> {
        match self.convert(node)? {
            AstNode::ObjectPatternMember(member) => Ok((*member).clone()),
            AstNode::Pattern(pattern) => shorthand(node, pattern),
            AstNode::Expression(expr) => shorthand(node, to_pattern(&expr, PatternMode::Binding)?),
            other => Err(ConversionError::malformed(
                "ObjectBindingPattern",
                format!("a binding property (got {})", other.type_name()),
                node,
            )),
        }
    }

    /// `[a, , b = 1, ...rest]`
    pub(crate) fn array_binding_pattern(&mut self, node: &'cst CstNode) -> Result<Pattern> {
        let (l_bracket_token, inner, r_bracket_token) =
            delimited(node, TokenKind::LBracket, TokenKind::RBracket, "ArrayBindingPattern")?;
        let pieces = flatten(inner, &[Rule::BindingElisionElement]);
        let elements = self.separated_with_holes(&pieces, "ArrayBindingPattern", |cx, piece| match piece {
            Piece::Value(element) => cx.binding(element),
            Piece::Rest { ellipsis, argument } => cx.rest_element(ellipsis, argument),
            Piece::Separator(sep) => Err(ConversionError::malformed("ArrayBindingPattern", "an element", sep)),
        })?;
        if let Some(last) = elements.last() {
            let rest_with_comma = last.trailing_separator.is_some()
                && last.value.as_deref().map_or(false, |p| matches!(p, Pattern::Rest(_)));
            if rest_with_comma {
                return Err(ConversionError::pattern("RestElement", "binding", node.span));
            }
        }
        Ok(Pattern::Array(esfold_ast::ArrayPattern { loc: node.span, elements, l_bracket_token, r_bracket_token }))
    }

    /// `BindingElement` / `SingleNameBinding` with an initializer.
    pub(crate) fn binding_with_default(&mut self, node: &'cst CstNode) -> Result<Pattern> {
        let mut cursor = Cursor::new(node, node.name());
        let left = self.binding(cursor.expect_node("a binding target")?)?;
        let (eq_token, right) = match self.take_initializer(&mut cursor)? {
            Some(init) => init,
            None => return Err(cursor.error("an initializer")),
        };
        cursor.finish()?;
        Ok(Pattern::Assignment(AssignmentPattern { loc: node.span, left, right, eq_token }))
    }

    /// `...target`
    pub(crate) fn binding_rest_element(&mut self, node: &'cst CstNode) -> Result<Pattern> {
        match node.children.as_slice() {
            [ellipsis, argument] if ellipsis.is_token(TokenKind::Ellipsis) => {
                let rest = self.rest_element(ellipsis, argument)?;
                Ok((*rest).clone())
            }
            _ => Err(ConversionError::malformed("BindingRestElement", "'...' and a binding", node)),
        }
    }

    fn rest_element(&mut self, ellipsis: &'cst CstNode, argument: &'cst CstNode) -> Result<Rc<Pattern>> {
        let argument = self.binding(argument)?;
        if matches!(*argument, Pattern::Assignment(_) | Pattern::Rest(_)) {
            return Err(ConversionError::pattern(argument.type_name(), "binding", argument.loc()));
        }
        Ok(Rc::new(Pattern::Rest(RestElement {
            loc: ellipsis.span.to(argument.loc()),
            argument,
            ellipsis_token: factory::token(ellipsis),
        })))
    }

    /// `name`, `name = init` or `key: element`.
    pub(crate) fn binding_property(&mut self, node: &'cst CstNode) -> Result<ObjectPatternMember> {
        let mut cursor = Cursor::new(node, "BindingProperty");
        let first = cursor.expect_node("a property")?;
        if cursor.at_end() {
            let value = self.binding(first)?;
            return shorthand(node, value);
        }

        let key = self.property_key(first)?;
        let colon_token = cursor.expect(TokenKind::Colon)?;
        let value = self.binding(cursor.expect_node("a binding element")?)?;
        cursor.finish()?;
        Ok(ObjectPatternMember::Property(AssignmentProperty {
            loc: node.span,
            computed: key.key.is_computed(),
            key: key.key,
            value,
            shorthand: false,
            colon_token: Some(colon_token),
            l_bracket_token: key.l_bracket_token,
            r_bracket_token: key.r_bracket_token,
        }))
    }

    /// `...name` in an object pattern.
    pub(crate) fn binding_rest_property(&mut self, node: &'cst CstNode) -> Result<ObjectPatternMember> {
        let mut cursor = Cursor::new(node, "BindingRestProperty");
        let ellipsis_token = cursor.expect(TokenKind::Ellipsis)?;
        let argument = self.binding(cursor.expect_node("a binding identifier")?)?;
        cursor.finish()?;
        if !matches!(*argument, Pattern::Identifier(_)) {
            return Err(ConversionError::pattern(argument.type_name(), "binding", argument.loc()));
        }
        Ok(ObjectPatternMember::Rest(RestElement { loc: node.span, argument, ellipsis_token }))
    }

    // =========================================================================
    // Cover grammars
    // =========================================================================

    /// `( ... )` of a cover production confirmed as an arrow parameter list.
    ///
    /// Each element was parsed as an expression and is converted to a
    /// pattern here. Content that is neither an element, a comma nor a rest
    /// element is a malformed subtree.
    pub(crate) fn cover_parameters(
        &mut self,
        node: &'cst CstNode,
    ) -> Result<(Token, Vec<Separated<Rc<Pattern>>>, Token)> {
        let component = node.name();
        let (l_paren, inner, r_paren) = delimited(node, TokenKind::LParen, TokenKind::RParen, component)?;
        let pieces = flatten(inner, &[Rule::Expression]);
        let params = self.separated(&pieces, component, |cx, piece| cx.parameter_piece(piece, component))?;
        check_rest_is_last(&params)?;
        debug!(
            "{} at {}: arrow parameters ({} params)",
            component,
            node.span.start.offset,
            params.len()
        );
        Ok((l_paren, params, r_paren))
    }

    /// One arrow parameter from a cover list.
    pub(crate) fn parameter_piece(&mut self, piece: Piece<'cst>, component: &'static str) -> Result<Rc<Pattern>> {
        match piece {
            Piece::Value(node) => match self.convert(node)? {
                AstNode::Pattern(pattern) => Ok(pattern),
                AstNode::Expression(expr) => to_pattern(&expr, PatternMode::Binding),
                AstNode::Spread(spread) => {
                    let argument = to_pattern(&spread.argument, PatternMode::Binding)?;
                    Ok(Rc::new(Pattern::Rest(RestElement {
                        loc: spread.loc,
                        argument,
                        ellipsis_token: spread.ellipsis_token.clone(),
                    })))
                }
                other => Err(ConversionError::malformed(
                    component,
                    format!("a parameter (got {})", other.type_name()),
                    node,
                )),
            },
            Piece::Rest { ellipsis, argument } => self.rest_element(ellipsis, argument),
            Piece::Separator(sep) => Err(ConversionError::malformed(component, "a parameter", sep)),
        }
    }
}

/// A rest parameter must be the last parameter, without a trailing comma.
pub(crate) fn check_rest_is_last(params: &[Separated<Rc<Pattern>>]) -> Result<()> {
    let count = params.len();
    for (i, item) in params.iter().enumerate() {
        let last = i + 1 == count && item.trailing_separator.is_none();
        if matches!(*item.value, Pattern::Rest(_)) && !last {
            return Err(ConversionError::pattern("RestElement", "binding", item.value.loc()));
        }
    }
    Ok(())
}

/// Shorthand object-pattern property from its value (`a` or `a = 1`).
fn shorthand(node: &CstNode, value: Rc<Pattern>) -> Result<ObjectPatternMember> {
    let key = match &*value {
        Pattern::Identifier(id) => id.clone(),
        Pattern::Assignment(assign) => match &*assign.left {
            Pattern::Identifier(id) => id.clone(),
            other => return Err(ConversionError::pattern(other.type_name(), "binding", other.loc())),
        },
        other => return Err(ConversionError::pattern(other.type_name(), "binding", other.loc())),
    };
    Ok(ObjectPatternMember::Property(AssignmentProperty {
        loc: node.span,
        key: PropertyKey::Identifier(key),
        value,
        shorthand: true,
        computed: false,
        colon_token: None,
        l_bracket_token: None,
        r_bracket_token: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfold_ast::{AssignmentOperator, AssignmentExpression, CallExpression, Identifier, Span};

    fn ident(name: &str) -> Rc<Expression> {
        Rc::new(Expression::Identifier(Identifier { loc: Span::default(), name: name.into() }))
    }

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, kind.fixed_text().unwrap_or(""), Span::default())
    }

    #[test]
    fn settled_patterns_pass_through_unchanged() {
        let pattern = to_pattern(&ident("a"), PatternMode::Binding).unwrap();
        let settled = into_pattern(ExpressionOrPattern::Pattern(pattern.clone()), PatternMode::Binding).unwrap();
        assert!(Rc::ptr_eq(&pattern, &settled));
        let converted = into_pattern(ExpressionOrPattern::Expression(ident("b")), PatternMode::Assignment).unwrap();
        assert!(matches!(&*converted, Pattern::Identifier(id) if id.name == "b"));
    }

    #[test]
    fn identifiers_convert_in_both_modes() {
        for mode in [PatternMode::Binding, PatternMode::Assignment] {
            let pattern = to_pattern(&ident("a"), mode).unwrap();
            assert!(matches!(&*pattern, Pattern::Identifier(id) if id.name == "a"));
        }
    }

    #[test]
    fn calls_are_never_patterns() {
        let call = Rc::new(Expression::Call(CallExpression {
            loc: Span::default(),
            callee: ident("f"),
            arguments: Vec::new(),
            optional: false,
            optional_token: None,
            l_paren_token: token(TokenKind::LParen),
            r_paren_token: token(TokenKind::RParen),
        }));
        let err = to_pattern(&call, PatternMode::Assignment).unwrap_err();
        assert!(matches!(err, ConversionError::PatternConversion { found: "CallExpression", .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn compound_assignment_is_not_a_default() {
        let assign = Rc::new(Expression::Assignment(AssignmentExpression {
            loc: Span::default(),
            operator: AssignmentOperator::AddAssign,
            left: Rc::new(Pattern::Identifier(Identifier { loc: Span::default(), name: "a".into() })),
            right: ident("b"),
            operator_token: token(TokenKind::PlusEq),
        }));
        let err = to_pattern(&assign, PatternMode::Binding).unwrap_err();
        assert!(matches!(err, ConversionError::PatternConversion { found: "AssignmentExpression", target: "binding", .. }));
    }

    #[test]
    fn member_targets_need_assignment_mode() {
        let mut cx = ConversionContext::default();
        let node = esfold_cst::parse("(MemberExpression (PrimaryExpression a) . b)").unwrap();
        let member = cx.expression(&node).unwrap();
        assert!(matches!(&*to_pattern(&member, PatternMode::Assignment).unwrap(), Pattern::Expression(_)));
        let err = to_pattern(&member, PatternMode::Binding).unwrap_err();
        assert!(matches!(err, ConversionError::PatternConversion { found: "MemberExpression", .. }));
    }
}
