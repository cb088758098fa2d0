// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declarations: variables, functions, arrows, methods and classes.

use std::rc::Rc;

use esfold_ast::{
    ArrowBody, ArrowFunctionExpression, AstNode, BlockStatement, Class, ClassBody, ClassElement, Expression, Form,
    FormalParameters, Function, MethodDefinition, MethodKind, ObjectMember, Pattern, Property, PropertyDefinition,
    PropertyKind, Separated, StaticBlock, Token, TokenKind, VariableDeclaration, VariableDeclarator, VariableKind,
};
use esfold_cst::{CstNode, Rule};
use log::debug;

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::error::{ConversionError, Result};
use crate::expr::KeyParts;
use crate::factory;
use crate::pattern::{check_rest_is_last, to_pattern, PatternMode};
use crate::router;
use crate::separated::{flatten, Piece};

type Parameters = Vec<Separated<Rc<Pattern>>>;

/// A method split into the pieces shared by object and class members.
pub(crate) struct MethodParts {
    pub key: KeyParts,
    pub kind: MethodKind,
    pub accessor_token: Option<Token>,
    pub function: Function,
}

impl<'cst> ConversionContext<'cst> {
    // =========================================================================
    // Variables
    // =========================================================================

    /// `= value`, either as an `Initializer` production or inline.
    pub(crate) fn take_initializer(&mut self, cursor: &mut Cursor<'cst>) -> Result<Option<(Token, Rc<Expression>)>> {
        if let Some(init) = cursor.match_rule(Rule::Initializer) {
            return match init.children.as_slice() {
                [eq, value] if eq.is_token(TokenKind::Eq) => Ok(Some((factory::token(eq), self.expression(value)?))),
                _ => Err(ConversionError::malformed("Initializer", "'=' and a value", init)),
            };
        }
        match cursor.match_token(TokenKind::Eq) {
            Some(eq_token) => {
                let value = self.expression(cursor.expect_node("an initializer")?)?;
                Ok(Some((eq_token, value)))
            }
            None => Ok(None),
        }
    }

    /// `var a = 1, b;` or `let`/`const`. The semicolon is optional (ASI).
    pub(crate) fn variable_declaration(&mut self, node: &'cst CstNode) -> Result<VariableDeclaration> {
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        let (kind, kind_token) = variable_kind(cursor.expect_node("'var', 'let' or 'const'")?, component)?;

        let rest = cursor.rest();
        let (list, semicolon_token) = match rest.split_last() {
            Some((last, list)) if last.is_token(TokenKind::Semicolon) => (list, Some(factory::token(last))),
            _ => (rest, None),
        };
        let declarations = self.declarators(list, node, component)?;
        Ok(VariableDeclaration { loc: node.span, kind, declarations, kind_token, semicolon_token })
    }

    /// A comma-separated declarator list; `parent` is reported when it is empty.
    pub(crate) fn declarators(
        &mut self,
        list: &'cst [CstNode],
        parent: &'cst CstNode,
        component: &'static str,
    ) -> Result<Vec<Separated<VariableDeclarator>>> {
        let pieces = flatten(list, &[]);
        let declarations = self.separated(&pieces, component, |cx, piece| match piece {
            Piece::Value(declarator) => cx.declarator(declarator),
            other => Err(ConversionError::malformed(component, "a declarator", other.node())),
        })?;
        if declarations.is_empty() {
            return Err(ConversionError::missing(component, "a declarator", parent));
        }
        Ok(declarations)
    }

    fn declarator(&mut self, node: &'cst CstNode) -> Result<VariableDeclarator> {
        match self.convert(node)? {
            AstNode::VariableDeclarator(declarator) => Ok((*declarator).clone()),
            AstNode::Pattern(id) => Ok(VariableDeclarator { loc: node.span, id, init: None, eq_token: None }),
            AstNode::Expression(expr) => Ok(VariableDeclarator {
                loc: node.span,
                id: to_pattern(&expr, PatternMode::Binding)?,
                init: None,
                eq_token: None,
            }),
            other => Err(self.mismatch("a declarator", node, &other)),
        }
    }

    /// `VariableDeclaration` / `LexicalBinding`: a binding and its initializer.
    pub(crate) fn variable_declarator(&mut self, node: &'cst CstNode) -> Result<VariableDeclarator> {
        let mut cursor = Cursor::new(node, node.name());
        let id = self.binding(cursor.expect_node("a binding")?)?;
        let init = self.take_initializer(&mut cursor)?;
        cursor.finish()?;
        let (eq_token, init) = match init {
            Some((eq, value)) => (Some(eq), Some(value)),
            None => (None, None),
        };
        Ok(VariableDeclarator { loc: node.span, id, init, eq_token })
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn function_declaration(&mut self, node: &'cst CstNode) -> Result<Function> {
        self.function(node, Form::Declaration)
    }

    pub(crate) fn function_expression(&mut self, node: &'cst CstNode) -> Result<Function> {
        self.function(node, Form::Expression)
    }

    /// `async? function *? name? ( params ) { body }`
    fn function(&mut self, node: &'cst CstNode, form: Form) -> Result<Function> {
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        let async_token = cursor.match_word("async");
        let function_token = cursor.expect(TokenKind::Function)?;
        let star_token = cursor.match_token(TokenKind::Star);
        let id = if cursor.check(TokenKind::LParen) {
            None
        } else {
            Some(factory::identifier(cursor.expect_node("a function name")?, component)?)
        };
        let (l_paren_token, params, r_paren_token) = self.function_params(&mut cursor)?;
        let body = self.function_body(&mut cursor)?;
        cursor.finish()?;

        Ok(Function {
            form,
            loc: node.span,
            id,
            params,
            body,
            generator: star_token.is_some(),
            is_async: async_token.is_some(),
            async_token,
            function_token: Some(function_token),
            star_token,
            l_paren_token,
            r_paren_token,
        })
    }

    /// `( FormalParameters? )`
    fn function_params(&mut self, cursor: &mut Cursor<'cst>) -> Result<(Token, Parameters, Token)> {
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let params = if cursor.check(TokenKind::RParen) {
            Vec::new()
        } else {
            let list = cursor.expect_node("parameters")?;
            self.parameter_list(list)?
        };
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        Ok((l_paren_token, params, r_paren_token))
    }

    fn parameter_list(&mut self, node: &'cst CstNode) -> Result<Parameters> {
        if node.is_rule(Rule::FormalParameterList) {
            return self.parameter_items(std::slice::from_ref(node), "FormalParameterList");
        }
        match self.convert(node)? {
            AstNode::Parameters(params) => Ok(params.params.clone()),
            AstNode::Pattern(param) => Ok(vec![Separated::bare(param)]),
            AstNode::Expression(expr) => Ok(vec![Separated::bare(to_pattern(&expr, PatternMode::Binding)?)]),
            other => Err(self.mismatch("parameters", node, &other)),
        }
    }

    fn parameter_items(&mut self, nodes: &'cst [CstNode], component: &'static str) -> Result<Parameters> {
        let pieces = flatten(nodes, &[]);
        let params = self.separated(&pieces, component, |cx, piece| cx.parameter_piece(piece, component))?;
        check_rest_is_last(&params)?;
        Ok(params)
    }

    /// `FormalParameters` / `PropertySetParameterList`, without parentheses.
    pub(crate) fn formal_parameters(&mut self, node: &'cst CstNode) -> Result<FormalParameters> {
        let params = self.parameter_items(&node.children, node.name())?;
        Ok(FormalParameters { loc: node.span, params })
    }

    /// `{ FunctionBody? }`, directive prologue included.
    fn function_body(&mut self, cursor: &mut Cursor<'cst>) -> Result<BlockStatement> {
        let l_brace_token = cursor.expect(TokenKind::LBrace)?;
        let body = if cursor.check(TokenKind::RBrace) {
            Vec::new()
        } else {
            let inner = cursor.expect_node("a function body")?;
            self.body_statements(std::slice::from_ref(inner))?
        };
        let r_brace_token = cursor.expect(TokenKind::RBrace)?;
        Ok(BlockStatement { loc: l_brace_token.loc.to(r_brace_token.loc), body, l_brace_token, r_brace_token })
    }

    // =========================================================================
    // Arrows
    // =========================================================================

    /// `ArrowParameters => ConciseBody`
    pub(crate) fn arrow_function(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "ArrowFunction");
        let head = cursor.expect_node("arrow parameters")?;
        let head = match (head.as_rule(), head.children.as_slice()) {
            (Some(Rule::ArrowParameters), [only]) => only,
            _ => head,
        };
        let (l_paren_token, params, r_paren_token) =
            if head.is_rule(Rule::CoverParenthesizedExpressionAndArrowParameterList) {
                let (l, params, r) = self.cover_parameters(head)?;
                (Some(l), params, Some(r))
            } else {
                (None, vec![Separated::bare(self.binding(head)?)], None)
            };
        let arrow_token = cursor.expect(TokenKind::Arrow)?;
        let body = self.arrow_body(cursor.expect_node("an arrow body")?)?;
        cursor.finish()?;

        Ok(Expression::ArrowFunction(ArrowFunctionExpression {
            loc: node.span,
            params,
            expression: matches!(body, ArrowBody::Expression(_)),
            body,
            is_async: false,
            async_token: None,
            l_paren_token,
            r_paren_token,
            arrow_token,
        }))
    }

    /// `async x => ...`, `async (a, b) => ...` via the call cover, or an
    /// `AsyncArrowHead`.
    pub(crate) fn async_arrow_function(&mut self, node: &'cst CstNode) -> Result<Expression> {
        let mut cursor = Cursor::new(node, "AsyncArrowFunction");
        let (async_token, l_paren_token, params, r_paren_token) = if let Some(async_token) = cursor.match_word("async") {
            let param = self.binding(cursor.expect_node("a parameter")?)?;
            (async_token, None, vec![Separated::bare(param)], None)
        } else if let Some(head) = cursor.match_rule(Rule::CoverCallExpressionAndAsyncArrowHead) {
            let (async_token, l, params, r) = self.async_arrow_head(head)?;
            (async_token, Some(l), params, Some(r))
        } else if let Some(head) = cursor.match_rule(Rule::AsyncArrowHead) {
            let mut head_cursor = Cursor::new(head, "AsyncArrowHead");
            let Some(async_token) = head_cursor.match_word("async") else {
                return Err(head_cursor.error("'async'"));
            };
            let (l, params, r) = self.function_params(&mut head_cursor)?;
            head_cursor.finish()?;
            (async_token, Some(l), params, Some(r))
        } else {
            return Err(cursor.error("an async arrow head"));
        };
        let arrow_token = cursor.expect(TokenKind::Arrow)?;
        let body = self.arrow_body(cursor.expect_node("an arrow body")?)?;
        cursor.finish()?;

        Ok(Expression::ArrowFunction(ArrowFunctionExpression {
            loc: node.span,
            params,
            expression: matches!(body, ArrowBody::Expression(_)),
            body,
            is_async: true,
            async_token: Some(async_token),
            l_paren_token,
            r_paren_token,
            arrow_token,
        }))
    }

    /// `async(a, b)` read as arrow parameters. The cover is never routed, so
    /// no call expression is built for it.
    fn async_arrow_head(&mut self, head: &'cst CstNode) -> Result<(Token, Token, Parameters, Token)> {
        let component = "CoverCallExpressionAndAsyncArrowHead";
        let (callee, args) = match head.children.as_slice() {
            [callee, args] if args.is_rule(Rule::Arguments) => (callee, args),
            _ => return Err(ConversionError::malformed(component, "'async' Arguments", head)),
        };
        let name = router::unwrap(callee);
        match factory::identifier(name, component) {
            Ok(id) if id.name == "async" => {}
            _ => return Err(ConversionError::malformed(component, "'async'", callee)),
        }
        debug!("{} at {}: async arrow head", component, head.span.start.offset);
        let (l_paren_token, params, r_paren_token) = self.cover_parameters(args)?;
        Ok((Token::new(TokenKind::Async, name.text(), name.span), l_paren_token, params, r_paren_token))
    }

    /// `{ statements }` or a single expression.
    fn arrow_body(&mut self, node: &'cst CstNode) -> Result<ArrowBody> {
        let braced = matches!(node.as_rule(), Some(Rule::ConciseBody | Rule::AsyncConciseBody))
            && node.children.first().map_or(false, |first| first.is_token(TokenKind::LBrace));
        if !braced {
            return Ok(ArrowBody::Expression(self.expression(node)?));
        }
        let (l_brace_token, inner, r_brace_token) = delimited(node, TokenKind::LBrace, TokenKind::RBrace, node.name())?;
        Ok(ArrowBody::Block(BlockStatement {
            loc: node.span,
            body: self.body_statements(inner)?,
            l_brace_token,
            r_brace_token,
        }))
    }

    // =========================================================================
    // Methods
    // =========================================================================

    /// `get? set? async? *? key ( params ) { body }`
    ///
    /// `get`, `set` and `async` are modifiers only when a key follows them;
    /// `get() {}` is a method named `get`.
    pub(crate) fn method_parts(&mut self, node: &'cst CstNode) -> Result<MethodParts> {
        let mut cursor = Cursor::new(node, node.name());
        let mut kind = MethodKind::Method;
        let mut accessor_token = None;
        let mut async_token = None;
        if !cursor.peek(1).map_or(true, |next| next.is_token(TokenKind::LParen)) {
            if let Some(token) = cursor.match_word("get") {
                kind = MethodKind::Get;
                accessor_token = Some(token);
            } else if let Some(token) = cursor.match_word("set") {
                kind = MethodKind::Set;
                accessor_token = Some(token);
            } else {
                async_token = cursor.match_word("async");
            }
        }
        let star_token = cursor.match_token(TokenKind::Star);
        let key = self.property_key(cursor.expect_node("a method name")?)?;
        let (l_paren_token, params, r_paren_token) = self.function_params(&mut cursor)?;
        let body = self.function_body(&mut cursor)?;
        cursor.finish()?;

        let function = Function {
            form: Form::Expression,
            loc: l_paren_token.loc.to(body.loc),
            id: None,
            params,
            body,
            generator: star_token.is_some(),
            is_async: async_token.is_some(),
            async_token,
            function_token: None,
            star_token,
            l_paren_token,
            r_paren_token,
        };
        Ok(MethodParts { key, kind, accessor_token, function })
    }

    /// A method or accessor in an object literal.
    pub(crate) fn method_property(&mut self, node: &'cst CstNode) -> Result<ObjectMember> {
        let parts = self.method_parts(node)?;
        let kind = match parts.kind {
            MethodKind::Get => PropertyKind::Get,
            MethodKind::Set => PropertyKind::Set,
            MethodKind::Method | MethodKind::Constructor => PropertyKind::Init,
        };
        Ok(ObjectMember::Property(Property {
            loc: node.span,
            computed: parts.key.key.is_computed(),
            key: parts.key.key,
            value: Rc::new(Expression::Function(parts.function)),
            kind,
            method: parts.kind == MethodKind::Method,
            shorthand: false,
            colon_token: None,
            accessor_token: parts.accessor_token,
            l_bracket_token: parts.key.l_bracket_token,
            r_bracket_token: parts.key.r_bracket_token,
        }))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn class_declaration(&mut self, node: &'cst CstNode) -> Result<Class> {
        self.class(node, Form::Declaration)
    }

    pub(crate) fn class_expression(&mut self, node: &'cst CstNode) -> Result<Class> {
        self.class(node, Form::Expression)
    }

    /// `class name? ClassTail`, where ClassTail is `extends? { body }`.
    fn class(&mut self, node: &'cst CstNode, form: Form) -> Result<Class> {
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        let class_token = cursor.expect(TokenKind::Class)?;
        let id = if cursor.check_rule(Rule::ClassTail) {
            None
        } else {
            Some(factory::identifier(cursor.expect_node("a class name")?, component)?)
        };
        let tail = cursor.expect_rule(Rule::ClassTail)?;
        cursor.finish()?;

        let mut tail_cursor = Cursor::new(tail, "ClassTail");
        let (extends_token, super_class) = match tail_cursor.match_rule(Rule::ClassHeritage) {
            Some(heritage) => match heritage.children.as_slice() {
                [extends, parent] if extends.is_token(TokenKind::Extends) => {
                    (Some(factory::token(extends)), Some(self.expression(parent)?))
                }
                _ => return Err(ConversionError::malformed("ClassHeritage", "'extends' and a superclass", heritage)),
            },
            None => (None, None),
        };
        let l_brace_token = tail_cursor.expect(TokenKind::LBrace)?;
        let elements = match tail_cursor.match_rule(Rule::ClassBody) {
            Some(body) => self.class_elements(body)?,
            None => Vec::new(),
        };
        let r_brace_token = tail_cursor.expect(TokenKind::RBrace)?;
        tail_cursor.finish()?;

        Ok(Class {
            form,
            loc: node.span,
            id,
            super_class,
            body: ClassBody {
                loc: l_brace_token.loc.to(r_brace_token.loc),
                body: elements,
                l_brace_token,
                r_brace_token,
            },
            class_token,
            extends_token,
        })
    }

    /// Members of a `ClassBody`. Stray `;` elements produce nothing.
    fn class_elements(&mut self, node: &'cst CstNode) -> Result<Vec<Rc<ClassElement>>> {
        let mut elements = Vec::new();
        for child in &node.children {
            if child.is_rule(Rule::ClassElementList) {
                elements.extend(self.class_elements(child)?);
                continue;
            }
            let empty = child.is_token(TokenKind::Semicolon)
                || (child.is_rule(Rule::ClassElement)
                    && matches!(child.children.as_slice(), [only] if only.is_token(TokenKind::Semicolon)));
            if empty {
                continue;
            }
            match self.convert(child)? {
                AstNode::ClassElement(element) => elements.push(element),
                other => return Err(self.mismatch("a class element", child, &other)),
            }
        }
        Ok(elements)
    }

    /// `static? MethodDefinition`, `static? FieldDefinition ;` or a static block.
    pub(crate) fn class_element(&mut self, node: &'cst CstNode) -> Result<ClassElement> {
        if node.is_rule(Rule::ClassStaticBlock) {
            return self.static_block(node);
        }
        let mut cursor = Cursor::new(node, "ClassElement");
        if let Some(block) = cursor.match_rule(Rule::ClassStaticBlock) {
            cursor.finish()?;
            return self.static_block(block);
        }

        let static_token = cursor.match_word("static");
        let is_static = static_token.is_some();
        let member = cursor.expect_node("a class member")?;
        match member.as_rule() {
            Some(Rule::FieldDefinition) => {
                let semicolon_token = cursor.semicolon();
                cursor.finish()?;
                let mut field = Cursor::new(member, "FieldDefinition");
                let key = self.property_key(field.expect_node("a field name")?)?;
                let init = self.take_initializer(&mut field)?;
                field.finish()?;
                let (eq_token, value) = match init {
                    Some((eq, value)) => (Some(eq), Some(value)),
                    None => (None, None),
                };
                Ok(ClassElement::Property(PropertyDefinition {
                    loc: node.span,
                    computed: key.key.is_computed(),
                    key: key.key,
                    value,
                    is_static,
                    static_token,
                    eq_token,
                    semicolon_token,
                    l_bracket_token: key.l_bracket_token,
                    r_bracket_token: key.r_bracket_token,
                }))
            }
            Some(Rule::MethodDefinition | Rule::GeneratorMethod | Rule::AsyncMethod | Rule::AsyncGeneratorMethod) => {
                cursor.finish()?;
                let parts = self.method_parts(router::unwrap(member))?;
                let key = parts.key.key;
                let is_constructor = parts.kind == MethodKind::Method
                    && !is_static
                    && !key.is_computed()
                    && key.static_name().as_deref() == Some("constructor");
                Ok(ClassElement::Method(MethodDefinition {
                    loc: node.span,
                    computed: key.is_computed(),
                    key,
                    value: Rc::new(parts.function),
                    kind: if is_constructor { MethodKind::Constructor } else { parts.kind },
                    is_static,
                    static_token,
                    accessor_token: parts.accessor_token,
                    l_bracket_token: parts.key.l_bracket_token,
                    r_bracket_token: parts.key.r_bracket_token,
                }))
            }
            _ => Err(ConversionError::malformed("ClassElement", "a method, field or static block", member)),
        }
    }

    /// `static { statements }`
    fn static_block(&mut self, node: &'cst CstNode) -> Result<ClassElement> {
        let mut cursor = Cursor::new(node, "ClassStaticBlock");
        let Some(static_token) = cursor.match_word("static") else {
            return Err(cursor.error("'static'"));
        };
        let l_brace_token = cursor.expect(TokenKind::LBrace)?;
        let body = match cursor.match_rule(Rule::ClassStaticBlockBody) {
            Some(inner) => self.statement_list(std::slice::from_ref(inner))?,
            None => Vec::new(),
        };
        let r_brace_token = cursor.expect(TokenKind::RBrace)?;
        cursor.finish()?;
        Ok(ClassElement::StaticBlock(StaticBlock { loc: node.span, body, static_token, l_brace_token, r_brace_token }))
    }
}

/// `var`, `let` or `const`, bare or inside `LetOrConst`.
pub(crate) fn variable_kind(node: &CstNode, component: &'static str) -> Result<(VariableKind, Token)> {
    let keyword = match (node.as_rule(), node.children.as_slice()) {
        (Some(Rule::LetOrConst), [only]) => only,
        _ => node,
    };
    let kind = match keyword.as_token() {
        Some(TokenKind::Var) => VariableKind::Var,
        Some(TokenKind::Const) => VariableKind::Const,
        Some(kind) if kind.is_word(keyword.text(), "let") => VariableKind::Let,
        _ => return Err(ConversionError::malformed(component, "'var', 'let' or 'const'", keyword)),
    };
    Ok((kind, factory::token(keyword)))
}
