// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Whole scripts: control flow, declarations and directive prologues.

mod common;

use common::{cst, script, statement};
use esfold_ast::{ClassElement, Expression, ForInit, ProgramItem, SourceType, Statement};
use esfold_convert::{convert_program, convert_program_with, ConversionError, ConvertOptions};

fn statements(items: &[ProgramItem]) -> Vec<&Statement> {
    items.iter().map(|item| &**item.as_statement().expect("script items are statements")).collect()
}

#[test]
fn script_with_control_flow() {
    let program = script(
        "(IfStatement if '(' a ')' (Block { (StatementList (ExpressionStatement b ;)) }) else (EmptyStatement ;)) \
         (LabelledStatement outer : (WhileStatement while '(' true ')' (BreakStatement break outer ;))) \
         (DebuggerStatement debugger)",
    );
    assert_eq!(program.source_type, SourceType::Script);
    let body = statements(&program.body);
    assert_eq!(body.len(), 3);

    let Statement::If(if_stmt) = body[0] else { panic!("expected if") };
    assert!(if_stmt.else_token.is_some());
    assert!(matches!(&*if_stmt.consequent, Statement::Block(block) if block.body.len() == 1));
    assert!(matches!(if_stmt.alternate.as_deref(), Some(Statement::Empty(_))));

    let Statement::Labeled(labeled) = body[1] else { panic!("expected a labeled statement") };
    assert_eq!(labeled.label.name, "outer");
    let Statement::While(while_stmt) = &*labeled.body else { panic!("expected while") };
    assert!(matches!(&*while_stmt.body, Statement::Break(b) if b.label.as_ref().map(|l| l.name.as_str()) == Some("outer")));

    let Statement::Debugger(debugger) = body[2] else { panic!("expected debugger") };
    assert!(debugger.semicolon_token.is_none());
}

#[test]
fn lexical_for_loop_in_a_script() {
    let program = script(
        "(ForStatement for '(' (LexicalDeclaration (LetOrConst let) (BindingList (LexicalBinding (BindingIdentifier i) (Initializer = 0))) ;) \
         (RelationalExpression i < n) ; (UpdateExpression i ++) ')' (Block { }))",
    );
    let body = statements(&program.body);
    let Statement::For(for_stmt) = body[0] else { panic!("expected for") };
    assert!(matches!(&for_stmt.init, Some(ForInit::VariableDeclaration(d)) if d.semicolon_token.is_some()));
    assert!(for_stmt.init_semicolon_token.is_none());
    assert!(matches!(for_stmt.test.as_deref(), Some(Expression::Binary(_))));
    assert!(matches!(for_stmt.update.as_deref(), Some(Expression::Update(u)) if !u.prefix));
}

#[test]
fn function_body_has_its_own_prologue() {
    let program = script(
        "(ExpressionStatement x ;) \
         (FunctionDeclaration function (BindingIdentifier f) '(' ')' { (FunctionBody (StatementList \
         (ExpressionStatement '\"use strict\"' ;) (ReturnStatement return ;))) })",
    );
    let body = statements(&program.body);
    let Statement::FunctionDeclaration(function) = body[1] else { panic!("expected a function declaration") };
    assert_eq!(function.id.as_ref().map(|id| id.name.as_str()), Some("f"));
    assert_eq!(function.body.body.len(), 2);
    assert!(matches!(&*function.body.body[0], Statement::Expression(e) if e.directive.as_deref() == Some("use strict")));
    assert!(matches!(&*function.body.body[1], Statement::Return(r) if r.argument.is_none()));
}

#[test]
fn catch_binding_may_destructure() {
    let stmt = statement(
        "(TryStatement try (Block { }) (Catch catch '(' (CatchParameter (ObjectBindingPattern { (BindingPropertyList (BindingProperty (SingleNameBinding (BindingIdentifier message)))) })) ')' (Block { })))",
    );
    let Statement::Try(try_stmt) = &*stmt else { panic!("expected try") };
    let handler = try_stmt.handler.as_ref().expect("catch clause");
    assert_eq!(handler.param.as_ref().map(|p| p.type_name()), Some("ObjectPattern"));
    assert!(try_stmt.finalizer.is_none());
}

#[test]
fn class_declaration_with_members() {
    let stmt = statement(
        "(ClassDeclaration class (BindingIdentifier Point) (ClassTail { (ClassBody (ClassElementList \
         (ClassElement (MethodDefinition (ClassElementName constructor) '(' ')' { })) \
         (ClassElement static (FieldDefinition (ClassElementName origin)) ;) \
         (ClassElement ;))) }))",
    );
    let Statement::ClassDeclaration(class) = &*stmt else { panic!("expected a class declaration") };
    assert_eq!(class.id.as_ref().map(|id| id.name.as_str()), Some("Point"));
    assert_eq!(class.body.body.len(), 2);
    assert!(matches!(&*class.body.body[1], ClassElement::Property(p) if p.is_static));
}

#[test]
fn module_items_are_rejected_in_scripts() {
    let node = cst(
        "(Script (ScriptBody (StatementList (ImportDeclaration import \"m\" ;))))",
    );
    let err = convert_program(&node).unwrap_err();
    assert!(matches!(err, ConversionError::MalformedSubtree { .. }), "got {err:?}");
}

#[test]
fn nesting_limit_is_reported() {
    let mut notation = String::from("a");
    for _ in 0..40 {
        notation = format!("(UnaryExpression - {notation})");
    }
    let node = cst(&format!("(Script (ScriptBody (StatementList (ExpressionStatement {notation} ;))))"));
    let err = convert_program_with(&node, ConvertOptions::default().with_max_depth(16)).unwrap_err();
    assert!(matches!(err, ConversionError::NestingTooDeep { limit: 16, .. }));
    assert!(convert_program_with(&node, ConvertOptions::default()).is_ok());
}

#[test]
fn flat_chains_count_toward_the_nesting_limit() {
    let operands = vec!["a"; 40].join(" + ");
    let sum = cst(&format!("(Script (ScriptBody (StatementList (ExpressionStatement (AdditiveExpression {operands}) ;))))"));
    let err = convert_program_with(&sum, ConvertOptions::default().with_max_depth(16)).unwrap_err();
    assert!(matches!(err, ConversionError::NestingTooDeep { limit: 16, .. }), "got {err:?}");
    assert!(convert_program_with(&sum, ConvertOptions::default()).is_ok());

    let links = vec![". b"; 40].join(" ");
    let member = cst(&format!("(Script (ScriptBody (StatementList (ExpressionStatement (MemberExpression a {links}) ;))))"));
    let err = convert_program_with(&member, ConvertOptions::default().with_max_depth(16)).unwrap_err();
    assert!(matches!(err, ConversionError::NestingTooDeep { limit: 16, .. }), "got {err:?}");
}

#[test]
fn program_json_shape() {
    let program = script("(ExpressionStatement '\"use strict\"' ;) (ExpressionStatement (AdditiveExpression a + 1) ;)");
    let json = serde_json::to_value(&*program).unwrap();
    assert_eq!(json["type"], "Program");
    assert_eq!(json["sourceType"], "script");
    assert_eq!(json["body"][0]["type"], "ExpressionStatement");
    assert_eq!(json["body"][0]["directive"], "use strict");
    assert_eq!(json["body"][1]["expression"]["type"], "BinaryExpression");
}
