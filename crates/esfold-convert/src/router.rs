// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The dispatch router: one CST node in, one AST node out.
//!
//! Every converter calls back into [`ConversionContext::convert`] for its
//! children, so the router is where identity caching, the depth limit and
//! wrapper pass-through happen.

use std::rc::Rc;

use esfold_ast::{AstNode, Expression, ExpressionOrPattern, Pattern, SourceType, Statement, TokenKind};
use esfold_cst::{CstKind, CstNode, Rule};
use log::trace;

use crate::context::ConversionContext;
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::pattern::{into_pattern, reject_cover_initializers, PatternMode};

/// Productions that are pure wrappers around a single child.
fn is_wrapper(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::StatementListItem
            | Rule::ModuleItem
            | Rule::Statement
            | Rule::Declaration
            | Rule::HoistableDeclaration
            | Rule::BreakableStatement
            | Rule::IterationStatement
            | Rule::BlockStatement
            | Rule::ForBinding
            | Rule::CatchParameter
            | Rule::LabelledItem
            | Rule::BindingPattern
            | Rule::FormalParameter
            | Rule::FunctionRestParameter
            | Rule::UniqueFormalParameters
            | Rule::ExpressionBody
            | Rule::ConciseBody
            | Rule::AsyncConciseBody
            | Rule::AsyncArrowBindingIdentifier
            | Rule::MethodDefinition
            | Rule::ShortCircuitExpression
            | Rule::LeftHandSideExpression
            | Rule::MetaProperty
            | Rule::PrimaryExpression
            | Rule::Literal
            | Rule::TemplateLiteral
            | Rule::ImportedBinding
            | Rule::ImportedDefaultBinding
            | Rule::ModuleSpecifier
    )
}

/// Productions that pass through when they hold one child and mean
/// something of their own otherwise (`a` vs `a + b`).
fn is_collapsible(rule: Rule) -> bool {
    rule.is_binary_level()
        || matches!(
            rule,
            Rule::Expression
                | Rule::AssignmentExpression
                | Rule::ConditionalExpression
                | Rule::ExponentiationExpression
                | Rule::UnaryExpression
                | Rule::UpdateExpression
                | Rule::MemberExpression
                | Rule::CallExpression
                | Rule::NewExpression
                | Rule::BindingElement
                | Rule::SingleNameBinding
        )
}

/// The only child of a node that adds nothing of its own.
pub(crate) fn pass_through(node: &CstNode) -> Option<&CstNode> {
    match (node.as_rule(), node.children.as_slice()) {
        (Some(rule), [only]) if is_wrapper(rule) || is_collapsible(rule) => Some(only),
        _ => None,
    }
}

/// Follow single-child wrappers down to the node that carries meaning.
pub(crate) fn unwrap(mut node: &CstNode) -> &CstNode {
    while let Some(inner) = pass_through(node) {
        node = inner;
    }
    node
}

fn key(node: &CstNode) -> *const CstNode {
    node
}

fn stmt(statement: Statement) -> AstNode {
    AstNode::Statement(Rc::new(statement))
}

fn expr(expression: Expression) -> AstNode {
    AstNode::Expression(Rc::new(expression))
}

fn pat(pattern: Pattern) -> AstNode {
    AstNode::Pattern(Rc::new(pattern))
}

impl<'cst> ConversionContext<'cst> {
    /// Convert one CST subtree.
    ///
    /// Converting the same node again within this context returns the same
    /// handle. Single-child wrappers (`Statement`, `PrimaryExpression`, a
    /// precedence level holding one operand, ...) produce no node of their
    /// own; they share the handle of the node they wrap.
    pub fn convert(&mut self, node: &'cst CstNode) -> Result<AstNode> {
        if let Some(hit) = self.cache.get(&key(node)) {
            trace!("cache hit for {} at {}..{}", node.name(), node.span.start.offset, node.span.end.offset);
            return Ok(hit.clone());
        }

        let mut chain = vec![node];
        let mut target = node;
        while let Some(inner) = pass_through(target) {
            if let Some(hit) = self.cache.get(&key(inner)).cloned() {
                for wrapper in chain {
                    self.cache.insert(key(wrapper), hit.clone());
                }
                return Ok(hit);
            }
            chain.push(inner);
            target = inner;
        }

        if self.stack.len() >= self.options.max_depth {
            return Err(ConversionError::too_deep(self.options.max_depth, target.span));
        }

        trace!("convert {} (depth {})", target.name(), self.stack.len());
        self.stack.push(target);
        let result = self.route(target);
        self.stack.pop();
        let converted = result?;

        for wrapper in chain {
            self.cache.insert(key(wrapper), converted.clone());
        }
        Ok(converted)
    }

    fn route(&mut self, node: &'cst CstNode) -> Result<AstNode> {
        let rule = match node.kind {
            CstKind::Token(kind) => return self.token_leaf(node, kind),
            CstKind::Rule(rule) => rule,
        };

        Ok(match rule {
            // Programs
            Rule::Script => AstNode::Program(Rc::new(self.program(node, SourceType::Script)?)),
            Rule::Module => AstNode::Program(Rc::new(self.program(node, SourceType::Module)?)),

            // Statements
            Rule::Block => stmt(Statement::Block(self.block(node)?)),
            Rule::EmptyStatement => stmt(self.empty_statement(node)?),
            Rule::ExpressionStatement => stmt(self.expression_statement(node)?),
            Rule::IfStatement => stmt(self.if_statement(node)?),
            Rule::DoWhileStatement => stmt(self.do_while_statement(node)?),
            Rule::WhileStatement => stmt(self.while_statement(node)?),
            Rule::ForStatement => stmt(self.for_statement(node)?),
            Rule::ForInOfStatement => stmt(self.for_in_of_statement(node)?),
            Rule::ContinueStatement => stmt(self.continue_statement(node)?),
            Rule::BreakStatement => stmt(self.break_statement(node)?),
            Rule::ReturnStatement => stmt(self.return_statement(node)?),
            Rule::WithStatement => stmt(self.with_statement(node)?),
            Rule::SwitchStatement => stmt(self.switch_statement(node)?),
            Rule::CaseClause | Rule::DefaultClause => AstNode::SwitchCase(Rc::new(self.switch_case(node)?)),
            Rule::LabelledStatement => stmt(self.labelled_statement(node)?),
            Rule::ThrowStatement => stmt(self.throw_statement(node)?),
            Rule::TryStatement => stmt(self.try_statement(node)?),
            Rule::Catch => AstNode::CatchClause(Rc::new(self.catch_clause(node)?)),
            Rule::DebuggerStatement => stmt(self.debugger_statement(node)?),

            // Declarations
            Rule::VariableStatement | Rule::LexicalDeclaration => {
                stmt(Statement::VariableDeclaration(self.variable_declaration(node)?))
            }
            Rule::VariableDeclaration | Rule::LexicalBinding => {
                AstNode::VariableDeclarator(Rc::new(self.variable_declarator(node)?))
            }
            Rule::FunctionDeclaration
            | Rule::GeneratorDeclaration
            | Rule::AsyncFunctionDeclaration
            | Rule::AsyncGeneratorDeclaration => stmt(Statement::FunctionDeclaration(self.function_declaration(node)?)),
            Rule::ClassDeclaration => stmt(Statement::ClassDeclaration(self.class_declaration(node)?)),

            // Patterns
            Rule::BindingIdentifier => pat(Pattern::Identifier(factory::identifier(node, "BindingIdentifier")?)),
            Rule::ObjectBindingPattern => pat(self.object_binding_pattern(node)?),
            Rule::ArrayBindingPattern => pat(self.array_binding_pattern(node)?),
            Rule::BindingElement | Rule::SingleNameBinding => pat(self.binding_with_default(node)?),
            Rule::BindingRestElement => pat(self.binding_rest_element(node)?),
            Rule::BindingProperty => AstNode::ObjectPatternMember(Rc::new(self.binding_property(node)?)),
            Rule::BindingRestProperty => AstNode::ObjectPatternMember(Rc::new(self.binding_rest_property(node)?)),

            // Functions and classes
            Rule::FunctionExpression
            | Rule::GeneratorExpression
            | Rule::AsyncFunctionExpression
            | Rule::AsyncGeneratorExpression => expr(Expression::Function(self.function_expression(node)?)),
            Rule::FormalParameters | Rule::PropertySetParameterList => {
                AstNode::Parameters(Rc::new(self.formal_parameters(node)?))
            }
            Rule::ArrowFunction => expr(self.arrow_function(node)?),
            Rule::AsyncArrowFunction => expr(self.async_arrow_function(node)?),
            Rule::GeneratorMethod | Rule::AsyncMethod | Rule::AsyncGeneratorMethod => {
                AstNode::ObjectMember(Rc::new(self.method_property(node)?))
            }
            Rule::ClassExpression => expr(Expression::Class(self.class_expression(node)?)),
            Rule::ClassElement | Rule::ClassStaticBlock => AstNode::ClassElement(Rc::new(self.class_element(node)?)),
            Rule::PropertyName | Rule::LiteralPropertyName | Rule::ComputedPropertyName | Rule::ClassElementName => {
                AstNode::PropertyKey(Rc::new(self.property_key(node)?.key))
            }

            // Expressions
            Rule::IdentifierReference => expr(Expression::Identifier(factory::identifier(node, "IdentifierReference")?)),
            Rule::Expression => expr(self.sequence_expression(node)?),
            Rule::AssignmentExpression => expr(self.assignment_expression(node)?),
            Rule::ConditionalExpression => expr(self.conditional_expression(node)?),
            Rule::LogicalORExpression
            | Rule::LogicalANDExpression
            | Rule::CoalesceExpression
            | Rule::BitwiseORExpression
            | Rule::BitwiseXORExpression
            | Rule::BitwiseANDExpression
            | Rule::EqualityExpression
            | Rule::RelationalExpression
            | Rule::ShiftExpression
            | Rule::AdditiveExpression
            | Rule::MultiplicativeExpression => return Ok(AstNode::Expression(self.binary_chain(node)?)),
            Rule::ExponentiationExpression => return Ok(AstNode::Expression(self.exponentiation(node)?)),
            Rule::UnaryExpression => expr(self.unary_expression(node)?),
            Rule::UpdateExpression => expr(self.update_expression(node)?),
            Rule::AwaitExpression => expr(self.await_expression(node)?),
            Rule::YieldExpression => expr(self.yield_expression(node)?),
            Rule::MemberExpression => return Ok(AstNode::Expression(self.member_expression(node)?)),
            Rule::NewExpression => expr(self.new_without_arguments(node)?),
            Rule::CallExpression | Rule::SuperProperty | Rule::SuperCall => {
                return Ok(AstNode::Expression(self.chain_from_head(node)?))
            }
            Rule::CoverCallExpressionAndAsyncArrowHead => return Ok(AstNode::Expression(self.cover_call(node)?)),
            Rule::NewTarget | Rule::ImportMeta => expr(Expression::MetaProperty(self.meta_property(node)?)),
            Rule::ImportCall => expr(Expression::Import(self.import_call(node)?)),
            Rule::Arguments => AstNode::Arguments(Rc::new(self.arguments(node)?)),
            Rule::OptionalExpression => expr(self.optional_expression(node)?),
            Rule::ArrayLiteral => expr(Expression::Array(self.array_literal(node)?)),
            Rule::SpreadElement => AstNode::Spread(Rc::new(self.spread_element(node)?)),
            Rule::ObjectLiteral => expr(Expression::Object(self.object_literal(node)?)),
            Rule::PropertyDefinition => AstNode::ObjectMember(Rc::new(self.property_definition(node)?)),
            Rule::CoverInitializedName => AstNode::ObjectMember(Rc::new(self.cover_initialized_name(node)?)),
            Rule::SubstitutionTemplate => expr(Expression::Template(self.template_literal(node)?)),
            Rule::CoverParenthesizedExpressionAndArrowParameterList | Rule::ParenthesizedExpression => {
                return Ok(AstNode::Expression(self.parenthesized(node)?))
            }

            // Modules
            Rule::ImportDeclaration => AstNode::ModuleDeclaration(Rc::new(self.import_declaration(node)?)),
            Rule::ExportDeclaration => AstNode::ModuleDeclaration(Rc::new(self.export_declaration(node)?)),
            Rule::ImportSpecifier | Rule::NameSpaceImport => {
                AstNode::ImportSpecifier(Rc::new(self.import_specifier(node)?))
            }
            Rule::ExportSpecifier => AstNode::ExportSpecifier(Rc::new(self.export_specifier(node)?)),

            // Wrappers that reach the router did not hold exactly one child.
            Rule::StatementListItem
            | Rule::ModuleItem
            | Rule::Statement
            | Rule::Declaration
            | Rule::HoistableDeclaration
            | Rule::BreakableStatement
            | Rule::IterationStatement
            | Rule::BlockStatement
            | Rule::ForBinding
            | Rule::CatchParameter
            | Rule::LabelledItem
            | Rule::BindingPattern
            | Rule::FormalParameter
            | Rule::FunctionRestParameter
            | Rule::UniqueFormalParameters
            | Rule::ExpressionBody
            | Rule::AsyncArrowBindingIdentifier
            | Rule::MethodDefinition
            | Rule::ShortCircuitExpression
            | Rule::LeftHandSideExpression
            | Rule::MetaProperty
            | Rule::PrimaryExpression
            | Rule::Literal
            | Rule::TemplateLiteral
            | Rule::ImportedBinding
            | Rule::ImportedDefaultBinding
            | Rule::ModuleSpecifier => {
                if rule == Rule::MethodDefinition && node.children.len() > 1 {
                    AstNode::ObjectMember(Rc::new(self.method_property(node)?))
                } else {
                    return Err(ConversionError::malformed(rule.as_str(), "exactly one child", node));
                }
            }

            // Fragments: only meaningful to the converter of their parent.
            Rule::ScriptBody
            | Rule::ModuleBody
            | Rule::ModuleItemList
            | Rule::StatementList
            | Rule::ForDeclaration
            | Rule::CaseBlock
            | Rule::CaseClauses
            | Rule::Finally
            | Rule::VariableDeclarationList
            | Rule::LetOrConst
            | Rule::BindingList
            | Rule::Initializer
            | Rule::BindingPropertyList
            | Rule::BindingElementList
            | Rule::BindingElisionElement
            | Rule::LabelIdentifier
            | Rule::FormalParameterList
            | Rule::FunctionBody
            | Rule::GeneratorBody
            | Rule::AsyncFunctionBody
            | Rule::AsyncGeneratorBody
            | Rule::FunctionStatementList
            | Rule::ArrowParameters
            | Rule::ConciseBody
            | Rule::AsyncConciseBody
            | Rule::AsyncArrowHead
            | Rule::ClassTail
            | Rule::ClassHeritage
            | Rule::ClassBody
            | Rule::ClassElementList
            | Rule::FieldDefinition
            | Rule::ClassStaticBlockBody
            | Rule::ClassStaticBlockStatementList
            | Rule::ArgumentList
            | Rule::OptionalChain
            | Rule::ElementList
            | Rule::Elision
            | Rule::PropertyDefinitionList
            | Rule::TemplateSpans
            | Rule::TemplateMiddleList
            | Rule::ImportClause
            | Rule::NamedImports
            | Rule::FromClause
            | Rule::ImportsList
            | Rule::WithClause
            | Rule::WithEntries
            | Rule::AttributeKey
            | Rule::ExportFromClause
            | Rule::NamedExports
            | Rule::ExportsList
            | Rule::ModuleExportName => {
                return Err(ConversionError::unsupported(node, self.parent_rule().map(Rule::as_str)));
            }
        })
    }

    /// Token leaves: names (contextual keywords included), literals and
    /// `this` read as expressions; all other tokens stay tokens.
    fn token_leaf(&mut self, node: &'cst CstNode, kind: TokenKind) -> Result<AstNode> {
        Ok(match kind {
            TokenKind::Identifier => expr(Expression::Identifier(factory::identifier(node, "Identifier")?)),
            kind if kind.is_contextual_keyword() => {
                expr(Expression::Identifier(factory::identifier(node, "Identifier")?))
            }
            TokenKind::PrivateIdentifier => {
                expr(Expression::PrivateIdentifier(factory::private_identifier(node, "PrivateIdentifier")?))
            }
            TokenKind::NumericLiteral
            | TokenKind::StringLiteral
            | TokenKind::RegularExpressionLiteral
            | TokenKind::Null
            | TokenKind::True
            | TokenKind::False => expr(Expression::Literal(factory::literal(node, "Literal")?)),
            TokenKind::This => expr(Expression::This(esfold_ast::ThisExpression { loc: node.span })),
            TokenKind::Super => expr(Expression::Super(esfold_ast::Super { loc: node.span })),
            TokenKind::NoSubstitutionTemplate => expr(Expression::Template(self.template_literal(node)?)),
            _ => AstNode::Token(Rc::new(factory::token(node))),
        })
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    /// Name of the production being converted, for error reports.
    pub(crate) fn component(&self) -> &'static str {
        self.stack.last().map_or("Program", |node| node.name())
    }

    pub(crate) fn mismatch(&self, expected: &str, node: &CstNode, got: &AstNode) -> ConversionError {
        ConversionError::malformed(self.component(), format!("{expected} (got {})", got.type_name()), node)
    }

    /// An expression read as a value.
    pub(crate) fn expression(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        let expr = self.literal_member(node)?;
        reject_cover_initializers(&expr)?;
        Ok(expr)
    }

    /// An expression nested in an object or array literal. Cover
    /// initializers are left for whoever consumes the literal.
    pub(crate) fn literal_member(&mut self, node: &'cst CstNode) -> Result<Rc<Expression>> {
        match self.convert(node)? {
            AstNode::Expression(e) => Ok(e),
            other => Err(self.mismatch("an expression", node, &other)),
        }
    }

    pub(crate) fn statement(&mut self, node: &'cst CstNode) -> Result<Rc<Statement>> {
        match self.convert(node)? {
            AstNode::Statement(s) => Ok(s),
            other => Err(self.mismatch("a statement", node, &other)),
        }
    }

    /// A binding target. Expressions arriving here (bare names, cover
    /// contents) are converted to patterns in binding mode.
    pub(crate) fn binding(&mut self, node: &'cst CstNode) -> Result<Rc<Pattern>> {
        let target = self.target(node, "a binding")?;
        into_pattern(target, PatternMode::Binding)
    }

    /// A position holding either a pattern or an expression that is still
    /// to be read as one (assignment and loop targets, cover contents).
    pub(crate) fn target(&mut self, node: &'cst CstNode, expected: &str) -> Result<ExpressionOrPattern> {
        match self.convert(node)? {
            AstNode::Pattern(p) => Ok(ExpressionOrPattern::Pattern(p)),
            AstNode::Expression(e) => Ok(ExpressionOrPattern::Expression(e)),
            other => Err(self.mismatch(expected, node, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cst(src: &str) -> CstNode {
        esfold_cst::parse(src).unwrap()
    }

    #[test]
    fn wrappers_share_the_wrapped_handle() {
        let node = cst("(Statement (ExpressionStatement (PrimaryExpression (IdentifierReference a)) ;))");
        let mut cx = ConversionContext::default();
        let outer = cx.convert(&node).unwrap();
        let inner = cx.convert(&node.children[0]).unwrap();
        assert!(outer.ptr_eq(&inner));
        assert_eq!(outer.type_name(), "ExpressionStatement");
    }

    #[test]
    fn fragments_are_unsupported_with_their_parent() {
        let node = cst("(Initializer = 1)");
        let mut cx = ConversionContext::default();
        let err = cx.convert(&node).unwrap_err();
        assert_eq!(err, ConversionError::UnsupportedNode { kind: "Initializer", parent: None, span: node.span });
    }

    #[test]
    fn unwrap_skips_single_child_levels() {
        let node = cst("(AssignmentExpression (ConditionalExpression (AdditiveExpression a + b)))");
        assert!(unwrap(&node).is_rule(Rule::AdditiveExpression));
        let leaf = cst("(PrimaryExpression this)");
        assert!(unwrap(&leaf).is_token(TokenKind::This));
    }

    #[test]
    fn punctuation_leaves_stay_tokens() {
        let node = cst("'=>'");
        let mut cx = ConversionContext::default();
        let token = cx.convert(&node).unwrap().into_token().unwrap();
        assert_eq!(token.kind, TokenKind::Arrow);
    }

    #[test]
    fn wrapper_with_two_children_is_malformed() {
        let node = cst("(Statement (EmptyStatement ;) (EmptyStatement ;))");
        let mut cx = ConversionContext::default();
        let err = cx.convert(&node).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedSubtree { component: "Statement", .. }));
    }
}
