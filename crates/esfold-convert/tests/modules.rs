// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Module programs: imports, exports and import attributes.

mod common;

use common::{module, module_declaration};
use esfold_ast::{
    ExportDefaultKind, ImportDeclarationSpecifier, LiteralValue, ModuleDeclaration, ModuleExportName, ProgramItem,
    SourceType,
};

#[test]
fn module_mixes_imports_exports_and_statements() {
    let program = module(
        "(ImportDeclaration import (ImportClause (ImportedDefaultBinding (BindingIdentifier React))) (FromClause from \"react\") ;) \
         (ExpressionStatement x ;) \
         (ExportDeclaration export default (FunctionDeclaration function '(' ')' { }))",
    );
    assert_eq!(program.source_type, SourceType::Module);
    assert_eq!(program.body.len(), 3);
    assert!(matches!(&program.body[1], ProgramItem::Statement(_)));

    let ModuleDeclaration::Import(import) = module_declaration(&program, 0) else { panic!("expected import") };
    assert!(matches!(&import.specifiers[0].value, ImportDeclarationSpecifier::Default(d) if d.local.name == "React"));
    assert!(matches!(&import.source.value, LiteralValue::String(s) if s == "react"));
    assert!(import.from_token.is_some());
    assert!(import.l_brace_token.is_none());

    let ModuleDeclaration::ExportDefault(export) = module_declaration(&program, 2) else { panic!("expected default export") };
    let ExportDefaultKind::Function(function) = &export.declaration else { panic!("expected a function") };
    assert!(function.id.is_none());
    assert!(export.semicolon_token.is_none());
}

#[test]
fn named_imports_keep_their_trailing_comma() {
    let program = module(
        "(ImportDeclaration import (ImportClause (NamedImports { (ImportsList (ImportSpecifier (ImportedBinding (BindingIdentifier a))) , \
         (ImportSpecifier (ModuleExportName \"b c\") as (ImportedBinding (BindingIdentifier d)))) , })) (FromClause from \"m\"))",
    );
    let ModuleDeclaration::Import(import) = module_declaration(&program, 0) else { panic!("expected import") };
    assert_eq!(import.specifiers.len(), 2);
    assert!(import.specifiers[1].trailing_separator.is_some());
    let ImportDeclarationSpecifier::Named(named) = &import.specifiers[1].value else { panic!("expected a named specifier") };
    assert!(matches!(&named.imported, ModuleExportName::Literal(lit) if lit.value == LiteralValue::String("b c".into())));
    assert_eq!(named.local.name, "d");
    assert!(import.semicolon_token.is_none());
}

#[test]
fn reexports_with_attributes() {
    let program = module(
        "(ExportDeclaration export (ExportFromClause (NamedExports { (ExportsList (ExportSpecifier default as (ModuleExportName config))) })) \
         (FromClause from \"./config.json\") (WithClause with { (WithEntries (AttributeKey type) : \"json\" ,) }) ;) \
         (ExportDeclaration export (ExportFromClause *) (FromClause from \"./util.js\") ;)",
    );
    let ModuleDeclaration::ExportNamed(named) = module_declaration(&program, 0) else { panic!("expected named export") };
    assert!(named.declaration.is_none());
    assert!(named.source.is_some());
    let specifier = &named.specifiers[0].value;
    assert!(matches!(&specifier.local, ModuleExportName::Identifier(id) if id.name == "default"));
    assert!(matches!(&specifier.exported, ModuleExportName::Identifier(id) if id.name == "config"));
    let with = named.with_clause.as_ref().expect("with clause");
    assert_eq!(with.attributes.len(), 1);
    assert!(with.attributes[0].trailing_separator.is_some());
    assert!(matches!(&with.attributes[0].value.value.value, LiteralValue::String(s) if s == "json"));

    let ModuleDeclaration::ExportAll(all) = module_declaration(&program, 1) else { panic!("expected export all") };
    assert!(all.exported.is_none());
    assert!(all.as_token.is_none());
}

#[test]
fn exported_declarations() {
    let program = module(
        "(ExportDeclaration export (LexicalDeclaration (LetOrConst const) (BindingList (LexicalBinding (BindingIdentifier v) (Initializer = 1))) ;)) \
         (ExportDeclaration export (ClassDeclaration class (BindingIdentifier C) (ClassTail { })))",
    );
    for index in 0..2 {
        let ModuleDeclaration::ExportNamed(named) = module_declaration(&program, index) else { panic!("expected named export") };
        assert!(named.declaration.is_some());
        assert!(named.specifiers.is_empty());
        assert!(named.semicolon_token.is_none());
    }
}

#[test]
fn module_json_shape() {
    let program = module(
        "(ImportDeclaration import (ImportClause (NameSpaceImport * as (ImportedBinding (BindingIdentifier ns)))) (FromClause from \"m\") ;)",
    );
    let json = serde_json::to_value(&*program).unwrap();
    assert_eq!(json["sourceType"], "module");
    assert_eq!(json["body"][0]["type"], "ImportDeclaration");
    let specifier = &json["body"][0]["specifiers"][0];
    assert_eq!(specifier["type"], "ImportNamespaceSpecifier");
    assert_eq!(specifier["local"]["name"], "ns");
    assert!(specifier.get("trailingSeparator").is_none());
}
