// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Programs, statement lists and statements.

use std::rc::Rc;

use esfold_ast::{
    AstNode, BlockStatement, BreakStatement, CatchClause, ContinueStatement, DebuggerStatement, DoWhileStatement,
    EmptyStatement, ExpressionStatement, ForInStatement, ForInit, ForOfStatement, ForStatement, ForTarget,
    IfStatement, LabeledStatement, Program, ProgramItem, ReturnStatement, Separated, SourceType, Statement,
    SwitchCase, SwitchStatement, ThrowStatement, TokenKind, TryStatement, VariableDeclaration, VariableDeclarator,
    VariableKind, WhileStatement, WithStatement,
};
use esfold_cst::{CstNode, Rule};

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::decl::variable_kind;
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::pattern::{into_pattern, PatternMode};
use crate::router;

/// Productions that only group the items of a body.
fn is_item_container(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::ScriptBody
            | Rule::ModuleBody
            | Rule::ModuleItemList
            | Rule::StatementList
            | Rule::FunctionBody
            | Rule::GeneratorBody
            | Rule::AsyncFunctionBody
            | Rule::AsyncGeneratorBody
            | Rule::FunctionStatementList
            | Rule::ClassStaticBlockBody
            | Rule::ClassStaticBlockStatementList
    )
}

fn collect_items<'cst>(nodes: &'cst [CstNode], out: &mut Vec<&'cst CstNode>) {
    for node in nodes {
        match node.as_rule() {
            Some(rule) if is_item_container(rule) => collect_items(&node.children, out),
            _ => out.push(node),
        }
    }
}

/// The directive text of a prologue entry: an expression statement that is
/// a lone string literal, quotes stripped.
fn directive_of(item: &CstNode) -> Option<String> {
    let statement = router::unwrap(item);
    if !statement.is_rule(Rule::ExpressionStatement) {
        return None;
    }
    let literal = router::unwrap(statement.children.first()?);
    if !literal.is_token(TokenKind::StringLiteral) {
        return None;
    }
    let raw = literal.text();
    raw.get(1..raw.len().checked_sub(1)?).map(str::to_string)
}

impl<'cst> ConversionContext<'cst> {
    // =========================================================================
    // Programs and bodies
    // =========================================================================

    /// `Script` or `Module`.
    pub(crate) fn program(&mut self, node: &'cst CstNode, source_type: SourceType) -> Result<Program> {
        let component = node.name();
        let mut body = Vec::new();
        for item in self.items(&node.children, true)? {
            match item {
                AstNode::Statement(statement) => body.push(ProgramItem::Statement(statement)),
                AstNode::ModuleDeclaration(decl) if source_type == SourceType::Module => {
                    body.push(ProgramItem::ModuleDeclaration(decl))
                }
                other => {
                    return Err(ConversionError::MalformedSubtree {
                        component,
                        expected: "a statement".into(),
                        found: other.type_name().to_string(),
                        span: other.loc(),
                    })
                }
            }
        }
        Ok(Program { loc: node.span, source_type, body })
    }

    /// Statements of a function or arrow body, directive prologue included.
    pub(crate) fn body_statements(&mut self, nodes: &'cst [CstNode]) -> Result<Vec<Rc<Statement>>> {
        self.statements(nodes, true)
    }

    /// Statements of a block, case clause or static block.
    pub(crate) fn statement_list(&mut self, nodes: &'cst [CstNode]) -> Result<Vec<Rc<Statement>>> {
        self.statements(nodes, false)
    }

    fn statements(&mut self, nodes: &'cst [CstNode], prologue: bool) -> Result<Vec<Rc<Statement>>> {
        let mut items = Vec::new();
        collect_items(nodes, &mut items);
        let mut statements = Vec::with_capacity(items.len());
        for (node, converted) in items.iter().zip(self.items(nodes, prologue)?) {
            match converted {
                AstNode::Statement(statement) => statements.push(statement),
                other => return Err(self.mismatch("a statement", node, &other)),
            }
        }
        Ok(statements)
    }

    /// Convert body items in order. While `prologue` holds, leading string
    /// statements are marked as directives.
    fn items(&mut self, nodes: &'cst [CstNode], prologue: bool) -> Result<Vec<AstNode>> {
        let mut items = Vec::new();
        collect_items(nodes, &mut items);

        let mut in_prologue = prologue && self.options.directives;
        let mut converted = Vec::with_capacity(items.len());
        for item in items {
            if in_prologue {
                match directive_of(item) {
                    Some(directive) => self.pending_directive = Some(directive),
                    None => in_prologue = false,
                }
            }
            let result = self.convert(item);
            self.pending_directive = None;
            converted.push(result?);
        }
        Ok(converted)
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    /// `{ statements }`
    pub(crate) fn block(&mut self, node: &'cst CstNode) -> Result<BlockStatement> {
        let (l_brace_token, inner, r_brace_token) = delimited(node, TokenKind::LBrace, TokenKind::RBrace, "Block")?;
        Ok(BlockStatement { loc: node.span, body: self.statement_list(inner)?, l_brace_token, r_brace_token })
    }

    /// A `Block`, possibly behind wrappers, as a plain block statement.
    fn block_of(&mut self, node: &'cst CstNode, component: &'static str) -> Result<BlockStatement> {
        let inner = router::unwrap(node);
        if inner.is_rule(Rule::Block) {
            self.block(inner)
        } else {
            Err(ConversionError::malformed(component, "a block", node))
        }
    }

    pub(crate) fn empty_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "EmptyStatement");
        let semicolon_token = cursor.expect(TokenKind::Semicolon)?;
        cursor.finish()?;
        Ok(Statement::Empty(EmptyStatement { loc: node.span, semicolon_token }))
    }

    pub(crate) fn expression_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let directive = self.pending_directive.take();
        let mut cursor = Cursor::new(node, "ExpressionStatement");
        let expression = self.expression(cursor.expect_node("an expression")?)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Expression(ExpressionStatement { loc: node.span, expression, directive, semicolon_token }))
    }

    /// `if ( test ) consequent else alternate`
    pub(crate) fn if_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "IfStatement");
        let if_token = cursor.expect(TokenKind::If)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let test = self.expression(cursor.expect_node("a condition")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let consequent = self.statement(cursor.expect_node("a statement")?)?;
        let else_token = cursor.match_token(TokenKind::Else);
        let alternate = match else_token {
            Some(_) => Some(self.statement(cursor.expect_node("a statement after 'else'")?)?),
            None => None,
        };
        cursor.finish()?;
        Ok(Statement::If(IfStatement {
            loc: node.span,
            test,
            consequent,
            alternate,
            if_token,
            l_paren_token,
            r_paren_token,
            else_token,
        }))
    }

    /// `label: item`
    pub(crate) fn labelled_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "LabelledStatement");
        let label = factory::identifier(cursor.expect_node("a label")?, "LabelledStatement")?;
        let colon_token = cursor.expect(TokenKind::Colon)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        cursor.finish()?;
        Ok(Statement::Labeled(LabeledStatement { loc: node.span, label, body, colon_token }))
    }

    pub(crate) fn continue_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "ContinueStatement");
        let continue_token = cursor.expect(TokenKind::Continue)?;
        let label = self.jump_label(&mut cursor)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Continue(ContinueStatement { loc: node.span, label, continue_token, semicolon_token }))
    }

    pub(crate) fn break_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "BreakStatement");
        let break_token = cursor.expect(TokenKind::Break)?;
        let label = self.jump_label(&mut cursor)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Break(BreakStatement { loc: node.span, label, break_token, semicolon_token }))
    }

    fn jump_label(&mut self, cursor: &mut Cursor<'cst>) -> Result<Option<esfold_ast::Identifier>> {
        if cursor.at_end() || cursor.check(TokenKind::Semicolon) {
            return Ok(None);
        }
        let label = cursor.expect_node("a label")?;
        Ok(Some(factory::identifier(label, "LabelIdentifier")?))
    }

    pub(crate) fn return_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "ReturnStatement");
        let return_token = cursor.expect(TokenKind::Return)?;
        let argument = if cursor.at_end() || cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression(cursor.expect_node("an expression")?)?)
        };
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Return(ReturnStatement { loc: node.span, argument, return_token, semicolon_token }))
    }

    pub(crate) fn throw_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "ThrowStatement");
        let throw_token = cursor.expect(TokenKind::Throw)?;
        let argument = self.expression(cursor.expect_node("an expression")?)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Throw(ThrowStatement { loc: node.span, argument, throw_token, semicolon_token }))
    }

    /// `with ( object ) body`
    pub(crate) fn with_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "WithStatement");
        let with_token = cursor.expect(TokenKind::With)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let object = self.expression(cursor.expect_node("an expression")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        cursor.finish()?;
        Ok(Statement::With(WithStatement { loc: node.span, object, body, with_token, l_paren_token, r_paren_token }))
    }

    pub(crate) fn debugger_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "DebuggerStatement");
        let debugger_token = cursor.expect(TokenKind::Debugger)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::Debugger(DebuggerStatement { loc: node.span, debugger_token, semicolon_token }))
    }

    // =========================================================================
    // Switch and try
    // =========================================================================

    /// `switch ( discriminant ) CaseBlock`
    pub(crate) fn switch_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "SwitchStatement");
        let switch_token = cursor.expect(TokenKind::Switch)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let discriminant = self.expression(cursor.expect_node("an expression")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let case_block = cursor.expect_rule(Rule::CaseBlock)?;
        cursor.finish()?;

        let (l_brace_token, inner, r_brace_token) =
            delimited(case_block, TokenKind::LBrace, TokenKind::RBrace, "CaseBlock")?;
        let mut cases = Vec::new();
        for child in inner {
            let clauses = if child.is_rule(Rule::CaseClauses) { child.children.as_slice() } else { std::slice::from_ref(child) };
            for clause in clauses {
                match self.convert(clause)? {
                    AstNode::SwitchCase(case) => cases.push(case),
                    other => return Err(self.mismatch("a case clause", clause, &other)),
                }
            }
        }

        Ok(Statement::Switch(SwitchStatement {
            loc: node.span,
            discriminant,
            cases,
            switch_token,
            l_paren_token,
            r_paren_token,
            l_brace_token,
            r_brace_token,
        }))
    }

    /// `case test: statements` or `default: statements`; `test` tells them apart.
    pub(crate) fn switch_case(&mut self, node: &'cst CstNode) -> Result<SwitchCase> {
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        let (keyword_token, test) = if let Some(case) = cursor.match_token(TokenKind::Case) {
            (case, Some(self.expression(cursor.expect_node("a case test")?)?))
        } else {
            (cursor.expect(TokenKind::Default)?, None)
        };
        let colon_token = cursor.expect(TokenKind::Colon)?;
        let consequent = self.statement_list(cursor.rest())?;
        Ok(SwitchCase { loc: node.span, test, consequent, keyword_token, colon_token })
    }

    /// `try Block Catch? Finally?`, with at least one handler.
    pub(crate) fn try_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "TryStatement");
        let try_token = cursor.expect(TokenKind::Try)?;
        let block = self.block_of(cursor.expect_node("a block")?, "TryStatement")?;
        let handler = match cursor.match_rule(Rule::Catch) {
            Some(catch) => match self.convert(catch)? {
                AstNode::CatchClause(clause) => Some(clause),
                other => return Err(self.mismatch("a catch clause", catch, &other)),
            },
            None => None,
        };
        let (finally_token, finalizer) = match cursor.match_rule(Rule::Finally) {
            Some(finally) => {
                let mut finally_cursor = Cursor::new(finally, "Finally");
                let token = finally_cursor.expect(TokenKind::Finally)?;
                let body = self.block_of(finally_cursor.expect_node("a block")?, "Finally")?;
                finally_cursor.finish()?;
                (Some(token), Some(body))
            }
            None => (None, None),
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(cursor.error("'catch' or 'finally'"));
        }
        cursor.finish()?;
        Ok(Statement::Try(TryStatement { loc: node.span, block, handler, finalizer, try_token, finally_token }))
    }

    /// `catch ( param ) Block` or `catch Block`.
    pub(crate) fn catch_clause(&mut self, node: &'cst CstNode) -> Result<CatchClause> {
        let mut cursor = Cursor::new(node, "Catch");
        let catch_token = cursor.expect(TokenKind::Catch)?;
        let (l_paren_token, param, r_paren_token) = match cursor.match_token(TokenKind::LParen) {
            Some(l_paren) => {
                let param = self.binding(cursor.expect_node("a catch parameter")?)?;
                (Some(l_paren), Some(param), Some(cursor.expect(TokenKind::RParen)?))
            }
            None => (None, None, None),
        };
        let body = self.block_of(cursor.expect_node("a block")?, "Catch")?;
        cursor.finish()?;
        Ok(CatchClause { loc: node.span, param, body, catch_token, l_paren_token, r_paren_token })
    }

    // =========================================================================
    // Loops
    // =========================================================================

    /// `while ( test ) body`
    pub(crate) fn while_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "WhileStatement");
        let while_token = cursor.expect(TokenKind::While)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let test = self.expression(cursor.expect_node("a condition")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        cursor.finish()?;
        Ok(Statement::While(WhileStatement { loc: node.span, test, body, while_token, l_paren_token, r_paren_token }))
    }

    /// `do body while ( test ) ;`
    pub(crate) fn do_while_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "DoWhileStatement");
        let do_token = cursor.expect(TokenKind::Do)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        let while_token = cursor.expect(TokenKind::While)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;
        let test = self.expression(cursor.expect_node("a condition")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;
        Ok(Statement::DoWhile(DoWhileStatement {
            loc: node.span,
            body,
            test,
            do_token,
            while_token,
            l_paren_token,
            r_paren_token,
            semicolon_token,
        }))
    }

    /// `for ( init ; test ; update ) body`
    ///
    /// A `let`/`const` init carries its own `;`, so the for statement only
    /// sees one more; `var` and expression inits are followed by an explicit
    /// `;` at this level.
    pub(crate) fn for_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let mut cursor = Cursor::new(node, "ForStatement");
        let for_token = cursor.expect(TokenKind::For)?;
        let l_paren_token = cursor.expect(TokenKind::LParen)?;

        let (init, init_semicolon_token) = if let Some(lexical) = cursor.match_rule(Rule::LexicalDeclaration) {
            let decl = self.variable_declaration(lexical)?;
            if decl.semicolon_token.is_none() {
                return Err(ConversionError::missing("LexicalDeclaration", "';'", lexical));
            }
            (Some(ForInit::VariableDeclaration(decl)), None)
        } else if let Some(var) = cursor.match_token(TokenKind::Var) {
            let list = cursor.expect_node("a declarator list")?;
            let declarations = self.declarators(std::slice::from_ref(list), node, "ForStatement")?;
            let decl = VariableDeclaration {
                loc: var.loc.to(list.span),
                kind: VariableKind::Var,
                declarations,
                kind_token: var,
                semicolon_token: None,
            };
            (Some(ForInit::VariableDeclaration(decl)), Some(cursor.expect(TokenKind::Semicolon)?))
        } else if cursor.check(TokenKind::Semicolon) {
            (None, Some(cursor.expect(TokenKind::Semicolon)?))
        } else {
            let init = self.expression(cursor.expect_node("an initializer")?)?;
            (Some(ForInit::Expression(init)), Some(cursor.expect(TokenKind::Semicolon)?))
        };

        let test = if cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression(cursor.expect_node("a condition")?)?)
        };
        let test_semicolon_token = cursor.expect(TokenKind::Semicolon)?;
        let update = if cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(self.expression(cursor.expect_node("an update expression")?)?)
        };
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        cursor.finish()?;

        Ok(Statement::For(ForStatement {
            loc: node.span,
            init,
            test,
            update,
            body,
            for_token,
            l_paren_token,
            init_semicolon_token,
            test_semicolon_token,
            r_paren_token,
        }))
    }

    /// `for ( left in right )` and `for await? ( left of right )`.
    ///
    /// `left` is `var binding`, a `ForDeclaration`, or an assignment target.
    /// `var x = init in o` is accepted for `for-in` only.
    pub(crate) fn for_in_of_statement(&mut self, node: &'cst CstNode) -> Result<Statement> {
        let component = "ForInOfStatement";
        let mut cursor = Cursor::new(node, component);
        let for_token = cursor.expect(TokenKind::For)?;
        let await_token = cursor.match_token(TokenKind::Await);
        let l_paren_token = cursor.expect(TokenKind::LParen)?;

        let mut has_init = false;
        let left = if let Some(var) = cursor.match_token(TokenKind::Var) {
            let target = cursor.expect_node("a binding")?;
            let id = self.binding(target)?;
            let init = self.take_initializer(&mut cursor)?;
            has_init = init.is_some();
            let end = init.as_ref().map_or(target.span, |(_, value)| value.loc());
            let (eq_token, init) = match init {
                Some((eq, value)) => (Some(eq), Some(value)),
                None => (None, None),
            };
            ForTarget::VariableDeclaration(VariableDeclaration {
                loc: var.loc.to(end),
                kind: VariableKind::Var,
                declarations: vec![Separated::bare(VariableDeclarator { loc: target.span.to(end), id, init, eq_token })],
                kind_token: var,
                semicolon_token: None,
            })
        } else if let Some(decl) = cursor.match_rule(Rule::ForDeclaration) {
            ForTarget::VariableDeclaration(self.for_declaration(decl)?)
        } else {
            let target = cursor.expect_node("a loop target")?;
            let target = self.target(target, "a loop target")?;
            ForTarget::Pattern(into_pattern(target, PatternMode::Assignment)?)
        };

        if let Some(in_token) = cursor.match_token(TokenKind::In) {
            if let Some(token) = await_token {
                return Err(ConversionError::MalformedSubtree {
                    component,
                    expected: "'for await' with 'of'".into(),
                    found: token.text,
                    span: token.loc,
                });
            }
            let right = self.expression(cursor.expect_node("an object")?)?;
            let r_paren_token = cursor.expect(TokenKind::RParen)?;
            let body = self.statement(cursor.expect_node("a statement")?)?;
            cursor.finish()?;
            return Ok(Statement::ForIn(ForInStatement {
                loc: node.span,
                left,
                right,
                body,
                for_token,
                l_paren_token,
                in_token,
                r_paren_token,
            }));
        }

        let Some(of_token) = cursor.match_word("of") else {
            return Err(cursor.error("'in' or 'of'"));
        };
        if has_init {
            return Err(ConversionError::MalformedSubtree {
                component,
                expected: "no initializer in a for-of head".into(),
                found: of_token.text,
                span: of_token.loc,
            });
        }
        let right = self.expression(cursor.expect_node("an iterable")?)?;
        let r_paren_token = cursor.expect(TokenKind::RParen)?;
        let body = self.statement(cursor.expect_node("a statement")?)?;
        cursor.finish()?;
        Ok(Statement::ForOf(ForOfStatement {
            loc: node.span,
            left,
            right,
            body,
            is_await: await_token.is_some(),
            for_token,
            await_token,
            l_paren_token,
            of_token,
            r_paren_token,
        }))
    }

    /// `let x` / `const [a, b]` in a for-in/of head.
    fn for_declaration(&mut self, node: &'cst CstNode) -> Result<VariableDeclaration> {
        let mut cursor = Cursor::new(node, "ForDeclaration");
        let (kind, kind_token) = variable_kind(cursor.expect_node("'let' or 'const'")?, "ForDeclaration")?;
        let target = cursor.expect_node("a binding")?;
        let id = self.binding(target)?;
        cursor.finish()?;
        Ok(VariableDeclaration {
            loc: node.span,
            kind,
            declarations: vec![Separated::bare(VariableDeclarator { loc: target.span, id, init: None, eq_token: None })],
            kind_token,
            semicolon_token: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConvertOptions;

    fn statement(src: &str) -> Rc<Statement> {
        let node = esfold_cst::parse(src).unwrap();
        ConversionContext::default().convert(&node).unwrap().into_statement().unwrap()
    }

    #[test]
    fn lexical_for_init_owns_its_semicolon() {
        let stmt = statement(
            "(ForStatement for '(' (LexicalDeclaration (LetOrConst let) (BindingList (LexicalBinding (BindingIdentifier i) (Initializer = 0))) ;) \
             (RelationalExpression i < 3) ; (UpdateExpression i ++) ')' (EmptyStatement ;))",
        );
        let Statement::For(for_stmt) = &*stmt else { panic!("expected for, got {stmt:?}") };
        assert!(for_stmt.init_semicolon_token.is_none());
        assert!(for_stmt.test.is_some());
        assert!(for_stmt.update.is_some());
        let Some(ForInit::VariableDeclaration(decl)) = &for_stmt.init else { panic!("expected declaration init") };
        assert!(decl.semicolon_token.is_some());
    }

    #[test]
    fn var_and_empty_for_inits_use_the_outer_semicolon() {
        let stmt = statement("(ForStatement for '(' var (VariableDeclarationList (VariableDeclaration (BindingIdentifier i))) ; ; ')' (EmptyStatement ;))");
        let Statement::For(for_stmt) = &*stmt else { panic!("expected for") };
        assert!(for_stmt.init_semicolon_token.is_some());
        assert!(for_stmt.test.is_none() && for_stmt.update.is_none());

        let stmt = statement("(ForStatement for '(' ; ; ')' (EmptyStatement ;))");
        let Statement::For(for_stmt) = &*stmt else { panic!("expected for") };
        assert!(for_stmt.init.is_none());
        assert!(for_stmt.init_semicolon_token.is_some());
    }

    #[test]
    fn for_of_with_destructuring_target() {
        let stmt = statement(
            "(ForInOfStatement for await '(' (ArrayLiteral [ (ElementList a , b) ]) of xs ')' (EmptyStatement ;))",
        );
        let Statement::ForOf(for_of) = &*stmt else { panic!("expected for-of") };
        assert!(for_of.is_await);
        assert!(matches!(&for_of.left, ForTarget::Pattern(p) if p.type_name() == "ArrayPattern"));
    }

    #[test]
    fn annex_b_initializer_only_in_for_in() {
        let stmt = statement("(ForInOfStatement for '(' var (BindingIdentifier x) (Initializer = 1) in o ')' (EmptyStatement ;))");
        let Statement::ForIn(for_in) = &*stmt else { panic!("expected for-in") };
        let ForTarget::VariableDeclaration(decl) = &for_in.left else { panic!("expected declaration") };
        assert!(decl.declarations[0].value.init.is_some());

        let node = esfold_cst::parse("(ForInOfStatement for '(' var (BindingIdentifier x) (Initializer = 1) of o ')' (EmptyStatement ;))").unwrap();
        assert!(ConversionContext::default().convert(&node).is_err());
    }

    #[test]
    fn switch_cases_share_one_shape() {
        let stmt = statement(
            "(SwitchStatement switch '(' x ')' (CaseBlock { (CaseClauses (CaseClause case 1 : (StatementList (BreakStatement break ;)))) (DefaultClause default :) }))",
        );
        let Statement::Switch(switch) = &*stmt else { panic!("expected switch") };
        assert_eq!(switch.cases.len(), 2);
        assert!(switch.cases[0].test.is_some());
        assert_eq!(switch.cases[0].consequent.len(), 1);
        assert!(switch.cases[1].test.is_none());
    }

    #[test]
    fn try_needs_a_handler() {
        let stmt = statement("(TryStatement try (Block { }) (Catch catch (Block { })) (Finally finally (Block { })))");
        let Statement::Try(try_stmt) = &*stmt else { panic!("expected try") };
        assert!(try_stmt.handler.as_ref().map_or(false, |h| h.param.is_none()));
        assert!(try_stmt.finalizer.is_some());

        let node = esfold_cst::parse("(TryStatement try (Block { }))").unwrap();
        assert!(ConversionContext::default().convert(&node).is_err());
    }

    #[test]
    fn directives_only_in_the_prologue() {
        let src = "(Script (ScriptBody (StatementList \
                   (ExpressionStatement '\"use strict\"' ;) \
                   (ExpressionStatement x ;) \
                   (ExpressionStatement \"late\" ;))))";
        let node = esfold_cst::parse(src).unwrap();
        let program = ConversionContext::default().convert(&node).unwrap().into_program().unwrap();
        let directives: Vec<_> = program
            .body
            .iter()
            .map(|item| match item.as_statement().map(|s| &**s) {
                Some(Statement::Expression(e)) => e.directive.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(directives, vec![Some("use strict".to_string()), None, None]);

        let mut cx = ConversionContext::new(ConvertOptions::default().with_directives(false));
        let program = cx.convert(&node).unwrap().into_program().unwrap();
        assert!(matches!(program.body[0].as_statement().map(|s| &**s), Some(Statement::Expression(e)) if e.directive.is_none()));
    }
}
