// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Member, call and `new` chains, optional chains and meta properties.
//!
//! The grammar engine delivers a chain flat, `[head, suffix...]`. The head
//! becomes the accumulator and each suffix wraps it in a new node.

use std::rc::Rc;

use esfold_ast::{
    Arguments, CallExpression, ChainExpression, Expression, Identifier, ImportExpression, MemberExpression,
    MemberProperty, MetaProperty, NewExpression, Span, TaggedTemplateExpression, Token, TokenKind,
};
use esfold_cst::{CstNode, Rule};
use log::debug;

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::pattern::reject_in_element;
use crate::separated::flatten;

fn is_template(node: &CstNode) -> bool {
    node.is_rule(Rule::TemplateLiteral)
        || node.is_rule(Rule::SubstitutionTemplate)
        || node.is_token(TokenKind::NoSubstitutionTemplate)
}

impl<'cst> ConversionContext<'cst> {
    /// `a.b[c]`, or `new C(args)` followed by suffixes.
    pub(crate) fn member_expression(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let children = node.children.as_slice();
        let (head, links) = match children {
            [new, callee, args, rest @ ..] if new.is_token(TokenKind::New) && args.is_rule(Rule::Arguments) => {
                let callee = self.expression(callee)?;
                let arguments = self.arguments_of(args)?;
                let head = Rc::new(Expression::New(NewExpression {
                    loc: new.span.to(args.span),
                    callee,
                    arguments: arguments.arguments.clone(),
                    new_token: factory::token(new),
                    l_paren_token: Some(arguments.l_paren_token.clone()),
                    r_paren_token: Some(arguments.r_paren_token.clone()),
                }));
                (head, rest)
            }
            [first, ..] if first.is_token(TokenKind::New) => {
                return Err(ConversionError::malformed("MemberExpression", "'new' MemberExpression Arguments", node));
            }
            [head, rest @ ..] => (self.expression(head)?, rest),
            [] => return Err(ConversionError::missing("MemberExpression", "an expression", node)),
        };
        let links: Vec<&'cst CstNode> = links.iter().collect();
        self.apply_links("MemberExpression", &links, head, node.span)
    }

    /// `[head, suffix...]`: call chains, `super.x` and `super(...)`.
    pub(crate) fn chain_from_head(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let component = node.name();
        let Some((head, links)) = node.children.split_first() else {
            return Err(ConversionError::missing(component, "an expression", node));
        };
        let current = self.expression(head)?;
        let links: Vec<&'cst CstNode> = links.iter().collect();
        self.apply_links(component, &links, current, node.span)
    }

    /// `f(args)` in expression position. The same shape is an async arrow
    /// head when an `=>` follows; that reading is taken by the arrow
    /// converter, which never routes the cover here.
    pub(crate) fn cover_call(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        debug!("CoverCallExpressionAndAsyncArrowHead at {}: call expression", node.span.start.offset);
        self.chain_from_head(node)
    }

    /// `new C` without an argument list.
    pub(crate) fn new_without_arguments(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "NewExpression");
        let new_token = cursor.expect(TokenKind::New)?;
        let callee = self.expression(cursor.expect_node("a constructor")?)?;
        cursor.finish()?;
        Ok(Expression::New(NewExpression {
            loc: node.span,
            callee,
            arguments: Vec::new(),
            new_token,
            l_paren_token: None,
            r_paren_token: None,
        }))
    }

    /// Wrap `current` in one node per link.
    ///
    /// A `?.` marks exactly the next link optional; `?.name` uses the `?.`
    /// as its dot.
    fn apply_links(
        &mut self,
        component: &'static str,
        links: &[&'cst CstNode],
        mut current: Rc<Expression>,
        start: Span,
    ) -> Result<Rc<Expression>> {
        let mut optional: Option<Token> = None;
        let mut wraps = 0;
        let mut i = 0;
        while i < links.len() {
            let link = links[i];
            self.check_fold_depth(wraps, link.span)?;
            let next = links.get(i + 1).copied();
            i += 1;

            if link.is_token(TokenKind::QuestionDot) {
                if optional.is_some() {
                    return Err(ConversionError::malformed(component, "a member, call or index after '?.'", link));
                }
                let token = factory::token(link);
                match next {
                    Some(name) if is_member_name(name) => {
                        i += 1;
                        wraps += 1;
                        current = Rc::new(Expression::Member(MemberExpression {
                            loc: start.to(name.span),
                            object: current,
                            property: member_name(name, component)?,
                            computed: false,
                            optional: true,
                            dot_token: Some(token),
                            l_bracket_token: None,
                            r_bracket_token: None,
                        }));
                    }
                    _ => optional = Some(token),
                }
                continue;
            }

            if link.is_token(TokenKind::Dot) {
                let name = match next {
                    Some(name) if optional.is_none() && is_member_name(name) => name,
                    _ => return Err(ConversionError::malformed(component, "a property name after '.'", link)),
                };
                i += 1;
                wraps += 1;
                current = Rc::new(Expression::Member(MemberExpression {
                    loc: start.to(name.span),
                    object: current,
                    property: member_name(name, component)?,
                    computed: false,
                    optional: false,
                    dot_token: Some(factory::token(link)),
                    l_bracket_token: None,
                    r_bracket_token: None,
                }));
                continue;
            }

            if link.is_token(TokenKind::LBracket) {
                let (index, close) = match (next, links.get(i + 1).copied()) {
                    (Some(index), Some(close)) if close.is_token(TokenKind::RBracket) => (index, close),
                    _ => return Err(ConversionError::malformed(component, "'[' Expression ']'", link)),
                };
                i += 2;
                let dot_token = optional.take();
                wraps += 1;
                current = Rc::new(Expression::Member(MemberExpression {
                    loc: start.to(close.span),
                    object: current,
                    property: MemberProperty::Computed(self.expression(index)?),
                    computed: true,
                    optional: dot_token.is_some(),
                    dot_token,
                    l_bracket_token: Some(factory::token(link)),
                    r_bracket_token: Some(factory::token(close)),
                }));
                continue;
            }

            if link.is_rule(Rule::Arguments) {
                let arguments = self.arguments_of(link)?;
                let optional_token = optional.take();
                wraps += 1;
                current = Rc::new(Expression::Call(CallExpression {
                    loc: start.to(link.span),
                    callee: current,
                    arguments: arguments.arguments.clone(),
                    optional: optional_token.is_some(),
                    optional_token,
                    l_paren_token: arguments.l_paren_token.clone(),
                    r_paren_token: arguments.r_paren_token.clone(),
                }));
                continue;
            }

            if is_template(link) {
                if optional.is_some() {
                    return Err(ConversionError::malformed(component, "no template after '?.'", link));
                }
                wraps += 1;
                current = Rc::new(Expression::TaggedTemplate(TaggedTemplateExpression {
                    loc: start.to(link.span),
                    tag: current,
                    quasi: self.template_literal(link)?,
                }));
                continue;
            }

            return Err(ConversionError::malformed(component, "a member access, call or template", link));
        }

        if let Some(dangling) = optional {
            return Err(ConversionError::MalformedSubtree {
                component,
                expected: "a link after '?.'".into(),
                found: dangling.text,
                span: dangling.loc,
            });
        }
        Ok(current)
    }

    /// `a?.b.c`, wrapped in a [`ChainExpression`].
    pub(crate) fn optional_expression(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let Some((base, chains)) = node.children.split_first() else {
            return Err(ConversionError::missing("OptionalExpression", "an expression", node));
        };
        let mut current = self.expression(base)?;
        if base.is_rule(Rule::OptionalExpression) {
            if let Expression::Chain(chain) = &*current {
                current = chain.expression.clone();
            }
        }

        let mut links = Vec::new();
        for chain in chains {
            if !chain.is_rule(Rule::OptionalChain) {
                return Err(ConversionError::malformed("OptionalExpression", "OptionalChain", chain));
            }
            collect_chain(chain, &mut links);
        }
        if !links.first().map_or(false, |first| first.is_token(TokenKind::QuestionDot)) {
            return Err(ConversionError::missing("OptionalExpression", "'?.'", node));
        }

        let expression = self.apply_links("OptionalChain", &links, current, node.span)?;
        Ok(Expression::Chain(ChainExpression { loc: node.span, expression }))
    }

    /// `( args )`
    pub(crate) fn arguments(&mut self, node: &'cst CstNode) -> Result<Arguments> {
        let (l_paren_token, inner, r_paren_token) = delimited(node, TokenKind::LParen, TokenKind::RParen, "Arguments")?;
        let pieces = flatten(inner, &[]);
        let arguments = self.separated(&pieces, "Arguments", |cx, piece| {
            let argument = cx.element(piece, "Arguments")?;
            reject_in_element(&argument)?;
            Ok(argument)
        })?;
        Ok(Arguments { loc: node.span, l_paren_token, arguments, r_paren_token })
    }

    fn arguments_of(&mut self, node: &'cst CstNode) -> Result<Rc<Arguments>> {
        match self.convert(node)?.into_arguments() {
            Ok(arguments) => Ok(arguments),
            Err(other) => Err(self.mismatch("an argument list", node, &other)),
        }
    }

    /// `new.target` or `import.meta`.
    pub(crate) fn meta_property(&mut self, node: &'cst CstNode) -> Result<MetaProperty> {
        let (keyword, property) = match node.as_rule() {
            Some(Rule::NewTarget) => (TokenKind::New, "target"),
            _ => (TokenKind::Import, "meta"),
        };
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        let meta = cursor.expect(keyword)?;
        let dot_token = cursor.expect(TokenKind::Dot)?;
        let name = match cursor.match_word(property) {
            Some(name) => name,
            None => return Err(cursor.error(property)),
        };
        cursor.finish()?;
        Ok(MetaProperty {
            loc: node.span,
            meta: Identifier { loc: meta.loc, name: meta.text },
            property: Identifier { loc: name.loc, name: name.text },
            dot_token,
        })
    }

    /// `import(source)` or `import(source, options)`.
    pub(crate) fn import_call(&mut self, node: &'cst CstNode) -> Result<ImportExpression> {
        let mut cursor = Cursor::new(node, "ImportCall");
        let import_token = cursor.expect(TokenKind::Import)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let source = self.expression(cursor.expect_node("a module specifier expression")?)?;
        let source_separator = cursor.match_token(TokenKind::Comma);

        let mut options = None;
        let mut options_separator = None;
        if source_separator.is_some() && !cursor.check(TokenKind::RParen) {
            options = Some(self.expression(cursor.expect_node("import options")?)?);
            options_separator = cursor.match_token(TokenKind::Comma);
        }
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        cursor.finish()?;

        Ok(ImportExpression {
            loc: node.span,
            source,
            options,
            import_token,
            l_paren_token,
            source_separator,
            options_separator,
            r_paren_token,
        })
    }
}

fn is_member_name(node: &CstNode) -> bool {
    node.as_token().map_or(false, |kind| kind.is_identifier_name() || kind == TokenKind::PrivateIdentifier)
}

fn member_name(node: &CstNode, component: &'static str) -> Result<MemberProperty> {
    if node.is_token(TokenKind::PrivateIdentifier) {
        Ok(MemberProperty::PrivateIdentifier(factory::private_identifier(node, component)?))
    } else {
        Ok(MemberProperty::Identifier(factory::identifier(node, component)?))
    }
}

/// Links of an `OptionalChain`, with nested chains spliced in.
fn collect_chain<'cst>(chain: &'cst CstNode, out: &mut Vec<&'cst CstNode>) {
    for child in &chain.children {
        if child.is_rule(Rule::OptionalChain) {
            collect_chain(child, out);
        } else {
            out.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(src: &str) -> Rc<Expression> {
        let node = esfold_cst::parse(src).unwrap();
        ConversionContext::default().convert(&node).unwrap().into_expression().unwrap()
    }

    #[test]
    fn optional_flag_covers_one_link() {
        let expr = convert("(OptionalExpression a (OptionalChain ?. b '[' c ']'))");
        let Expression::Chain(chain) = &*expr else { panic!("expected chain, got {expr:?}") };
        let Expression::Member(outer) = &*chain.expression else { panic!("expected member") };
        assert!(outer.computed);
        assert!(!outer.optional);
        let Expression::Member(inner) = &*outer.object else { panic!("expected member") };
        assert!(inner.optional);
        assert_eq!(inner.dot_token.as_ref().map(|t| t.kind), Some(TokenKind::QuestionDot));
    }

    #[test]
    fn optional_call() {
        let expr = convert("(OptionalExpression f (OptionalChain ?. (Arguments '(' ')')))");
        let Expression::Chain(chain) = &*expr else { panic!("expected chain") };
        assert!(matches!(&*chain.expression, Expression::Call(call) if call.optional && call.optional_token.is_some()));
    }

    #[test]
    fn nested_optional_expressions_share_one_chain() {
        let expr = convert("(OptionalExpression (OptionalExpression a (OptionalChain ?. b)) (OptionalChain ?. c))");
        let Expression::Chain(chain) = &*expr else { panic!("expected chain") };
        let Expression::Member(outer) = &*chain.expression else { panic!("expected member") };
        assert!(matches!(&*outer.object, Expression::Member(_)));
    }

    #[test]
    fn tagged_templates_and_private_names() {
        let expr = convert("(MemberExpression this . #x NoSubstitutionTemplate:'`t`')");
        let Expression::TaggedTemplate(tagged) = &*expr else { panic!("expected tagged template") };
        assert!(matches!(
            &*tagged.tag,
            Expression::Member(m) if matches!(&m.property, MemberProperty::PrivateIdentifier(p) if p.name == "x")
        ));
        assert_eq!(tagged.quasi.quasis[0].cooked.as_deref(), Some("t"));
    }

    #[test]
    fn new_without_arguments_and_nested_new() {
        let expr = convert("(NewExpression new (NewExpression new C))");
        let Expression::New(outer) = &*expr else { panic!("expected new") };
        assert!(outer.l_paren_token.is_none());
        assert!(matches!(&*outer.callee, Expression::New(_)));
    }

    #[test]
    fn meta_properties() {
        let expr = convert("(ImportMeta import . meta)");
        assert!(matches!(&*expr, Expression::MetaProperty(m) if m.meta.name == "import" && m.property.name == "meta"));
        let node = esfold_cst::parse("(NewTarget new . meta)").unwrap();
        assert!(ConversionContext::default().convert(&node).is_err());
    }

    #[test]
    fn dynamic_import_with_options() {
        let expr = convert("(ImportCall import '(' \"./m.js\" , (ObjectLiteral { }) ')')");
        let Expression::Import(import) = &*expr else { panic!("expected import") };
        assert!(import.options.is_some());
        assert!(import.source_separator.is_some());
        assert!(import.options_separator.is_none());
    }
}
