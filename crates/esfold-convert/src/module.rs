// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Import and export declarations.

use esfold_ast::{
    AstNode, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultKind, ExportNamedDeclaration,
    ExportSpecifier, ImportAttribute, ImportDeclaration, ImportDeclarationSpecifier, ImportDefaultSpecifier,
    ImportNamespaceSpecifier, ImportSpecifier, Literal, ModuleDeclaration, ModuleExportName, Separated, Token,
    TokenKind, WithClause,
};
use esfold_cst::{CstNode, Rule};

use crate::context::ConversionContext;
use crate::cursor::{delimited, Cursor};
use crate::error::{ConversionError, Result};
use crate::factory;
use crate::router;
use crate::separated::{flatten, Piece};

/// Braces of a named import or export block.
type Braces = (Option<Token>, Option<Token>);

/// An identifier or string naming an export.
fn module_export_name(node: &CstNode, component: &'static str) -> Result<ModuleExportName> {
    let inner = match (node.as_rule(), node.children.as_slice()) {
        (Some(Rule::ModuleExportName | Rule::AttributeKey), [only]) => only,
        _ => node,
    };
    if inner.is_token(TokenKind::StringLiteral) {
        Ok(ModuleExportName::Literal(factory::string_literal(inner, component)?))
    } else {
        Ok(ModuleExportName::Identifier(factory::identifier(inner, component)?))
    }
}

/// `from "module"`, as a `FromClause` or inline.
fn from_clause(cursor: &mut Cursor<'_>) -> Result<(Token, Literal)> {
    if let Some(clause) = cursor.match_rule(Rule::FromClause) {
        let mut inner = Cursor::new(clause, "FromClause");
        let Some(from_token) = inner.match_word("from") else {
            return Err(inner.error("'from'"));
        };
        let source = factory::string_literal(inner.expect_node("a module specifier")?, "FromClause")?;
        inner.finish()?;
        return Ok((from_token, source));
    }
    let Some(from_token) = cursor.match_word("from") else {
        return Err(cursor.error("'from'"));
    };
    let source = factory::string_literal(cursor.expect_node("a module specifier")?, "FromClause")?;
    Ok((from_token, source))
}

impl<'cst> ConversionContext<'cst> {
    // =========================================================================
    // Imports
    // =========================================================================

    /// `import clause from "m" with {...};` or `import "m";`
    pub(crate) fn import_declaration(&mut self, node: &'cst CstNode) -> Result<ModuleDeclaration> {
        let mut cursor = Cursor::new(node, "ImportDeclaration");
        let import_token = cursor.expect(TokenKind::Import)?;

        let mut specifiers = Vec::new();
        let mut braces = (None, None);
        let (from_token, source) = match cursor.match_rule(Rule::ImportClause) {
            Some(clause) => {
                self.import_clause(clause, &mut specifiers, &mut braces)?;
                let (from_token, source) = from_clause(&mut cursor)?;
                (Some(from_token), source)
            }
            None => {
                let source = factory::string_literal(cursor.expect_node("a module specifier")?, "ImportDeclaration")?;
                (None, source)
            }
        };
        let with_clause = self.optional_with_clause(&mut cursor)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;

        let (l_brace_token, r_brace_token) = braces;
        Ok(ModuleDeclaration::Import(ImportDeclaration {
            loc: node.span,
            specifiers,
            source,
            with_clause,
            import_token,
            l_brace_token,
            r_brace_token,
            from_token,
            semicolon_token,
        }))
    }

    /// `a`, `* as ns`, `{ b, c as d }`, or a default followed by one of the
    /// others. The default specifier carries the comma after it.
    fn import_clause(
        &mut self,
        clause: &'cst CstNode,
        specifiers: &mut Vec<Separated<ImportDeclarationSpecifier>>,
        braces: &mut Braces,
    ) -> Result<()> {
        for part in &clause.children {
            if part.is_token(TokenKind::Comma) {
                match specifiers.last_mut() {
                    Some(last) if last.trailing_separator.is_none() => last.trailing_separator = Some(factory::token(part)),
                    _ => return Err(ConversionError::malformed("ImportClause", "an import binding", part)),
                }
                continue;
            }
            match part.as_rule() {
                Some(Rule::ImportedDefaultBinding | Rule::ImportedBinding | Rule::BindingIdentifier) => {
                    let local = factory::identifier(part, "ImportClause")?;
                    specifiers.push(Separated::bare(ImportDeclarationSpecifier::Default(ImportDefaultSpecifier {
                        loc: part.span,
                        local,
                    })));
                }
                Some(Rule::NameSpaceImport) => specifiers.push(Separated::bare(self.import_specifier_of(part)?)),
                Some(Rule::NamedImports) => {
                    let (l_brace, inner, r_brace) =
                        delimited(part, TokenKind::LBrace, TokenKind::RBrace, "NamedImports")?;
                    let pieces = flatten(inner, &[]);
                    let named = self.separated(&pieces, "NamedImports", |cx, piece| match piece {
                        Piece::Value(specifier) => cx.import_specifier_of(specifier),
                        other => Err(ConversionError::malformed("NamedImports", "an import specifier", other.node())),
                    })?;
                    specifiers.extend(named);
                    *braces = (Some(l_brace), Some(r_brace));
                }
                _ => return Err(ConversionError::malformed("ImportClause", "an import binding", part)),
            }
        }
        Ok(())
    }

    fn import_specifier_of(&mut self, node: &'cst CstNode) -> Result<ImportDeclarationSpecifier> {
        match self.convert(node)? {
            AstNode::ImportSpecifier(specifier) => Ok((*specifier).clone()),
            other => Err(self.mismatch("an import specifier", node, &other)),
        }
    }

    /// `ImportSpecifier` (`a`, `a as b`, `"a b" as c`) or `NameSpaceImport`.
    pub(crate) fn import_specifier(&mut self, node: &'cst CstNode) -> Result<ImportDeclarationSpecifier> {
        let component = node.name();
        let mut cursor = Cursor::new(node, component);
        if node.is_rule(Rule::NameSpaceImport) {
            let star_token = cursor.expect(TokenKind::Star)?;
            let Some(as_token) = cursor.match_word("as") else {
                return Err(cursor.error("'as'"));
            };
            let local = factory::identifier(cursor.expect_node("a local name")?, component)?;
            cursor.finish()?;
            return Ok(ImportDeclarationSpecifier::Namespace(ImportNamespaceSpecifier {
                loc: node.span,
                local,
                star_token,
                as_token,
            }));
        }

        let first = cursor.expect_node("an imported name")?;
        if cursor.at_end() {
            let local = factory::identifier(first, component)?;
            return Ok(ImportDeclarationSpecifier::Named(ImportSpecifier {
                loc: node.span,
                imported: ModuleExportName::Identifier(local.clone()),
                local,
                as_token: None,
            }));
        }
        let imported = module_export_name(first, component)?;
        let Some(as_token) = cursor.match_word("as") else {
            return Err(cursor.error("'as'"));
        };
        let local = factory::identifier(cursor.expect_node("a local name")?, component)?;
        cursor.finish()?;
        Ok(ImportDeclarationSpecifier::Named(ImportSpecifier {
            loc: node.span,
            imported,
            local,
            as_token: Some(as_token),
        }))
    }

    // =========================================================================
    // Exports
    // =========================================================================

    /// Every `export` form.
    pub(crate) fn export_declaration(&mut self, node: &'cst CstNode) -> Result<ModuleDeclaration> {
        let mut cursor = Cursor::new(node, "ExportDeclaration");
        let export_token = cursor.expect(TokenKind::Export)?;

        if let Some(default_token) = cursor.match_token(TokenKind::Default) {
            let target = cursor.expect_node("a default export")?;
            let inner = router::unwrap(target);
            let declaration = match inner.as_rule() {
                Some(
                    Rule::FunctionDeclaration
                    | Rule::GeneratorDeclaration
                    | Rule::AsyncFunctionDeclaration
                    | Rule::AsyncGeneratorDeclaration,
                ) => ExportDefaultKind::Function(self.function_declaration(inner)?),
                Some(Rule::ClassDeclaration) => ExportDefaultKind::Class(self.class_declaration(inner)?),
                _ => ExportDefaultKind::Expression(self.expression(target)?),
            };
            let semicolon_token = cursor.semicolon();
            cursor.finish()?;
            return Ok(ModuleDeclaration::ExportDefault(ExportDefaultDeclaration {
                loc: node.span,
                declaration,
                export_token,
                default_token,
                semicolon_token,
            }));
        }

        if let Some(clause) = cursor.match_rule(Rule::ExportFromClause) {
            if let Some(named) = clause.child_rule(Rule::NamedExports) {
                if clause.children.len() != 1 {
                    return Err(ConversionError::malformed("ExportFromClause", "NamedExports", clause));
                }
                return self.named_exports(node, cursor, export_token, named);
            }
            return self.export_all(node, cursor, export_token, clause);
        }

        if let Some(named) = cursor.match_rule(Rule::NamedExports) {
            return self.named_exports(node, cursor, export_token, named);
        }

        let declaration = self.statement(cursor.expect_node("a declaration")?)?;
        cursor.finish()?;
        Ok(ModuleDeclaration::ExportNamed(ExportNamedDeclaration {
            loc: node.span,
            declaration: Some(declaration),
            specifiers: Vec::new(),
            source: None,
            with_clause: None,
            export_token,
            l_brace_token: None,
            r_brace_token: None,
            from_token: None,
            semicolon_token: None,
        }))
    }

    /// `export { a, b as c } (from "m")?;`
    fn named_exports(
        &mut self,
        node: &'cst CstNode,
        mut cursor: Cursor<'cst>,
        export_token: Token,
        named: &'cst CstNode,
    ) -> Result<ModuleDeclaration> {
        let (l_brace_token, inner, r_brace_token) =
            delimited(named, TokenKind::LBrace, TokenKind::RBrace, "NamedExports")?;
        let pieces = flatten(inner, &[]);
        let specifiers = self.separated(&pieces, "NamedExports", |cx, piece| match piece {
            Piece::Value(specifier) => match cx.convert(specifier)? {
                AstNode::ExportSpecifier(specifier) => Ok((*specifier).clone()),
                other => Err(cx.mismatch("an export specifier", specifier, &other)),
            },
            other => Err(ConversionError::malformed("NamedExports", "an export specifier", other.node())),
        })?;

        let (from_token, source) = if cursor.check_rule(Rule::FromClause) || cursor.current().map_or(false, is_from) {
            let (from_token, source) = from_clause(&mut cursor)?;
            (Some(from_token), Some(source))
        } else {
            (None, None)
        };
        let with_clause = self.optional_with_clause(&mut cursor)?;
        if with_clause.is_some() && source.is_none() {
            return Err(ConversionError::malformed("ExportDeclaration", "a 'from' clause before 'with'", node));
        }
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;

        Ok(ModuleDeclaration::ExportNamed(ExportNamedDeclaration {
            loc: node.span,
            declaration: None,
            specifiers,
            source,
            with_clause,
            export_token,
            l_brace_token: Some(l_brace_token),
            r_brace_token: Some(r_brace_token),
            from_token,
            semicolon_token,
        }))
    }

    /// `export * (as name)? from "m";`
    fn export_all(
        &mut self,
        node: &'cst CstNode,
        mut cursor: Cursor<'cst>,
        export_token: Token,
        clause: &'cst CstNode,
    ) -> Result<ModuleDeclaration> {
        let mut clause_cursor = Cursor::new(clause, "ExportFromClause");
        let star_token = clause_cursor.expect(TokenKind::Star)?;
        let as_token = clause_cursor.match_word("as");
        let exported = match as_token {
            Some(_) => Some(module_export_name(clause_cursor.expect_node("an export name")?, "ExportFromClause")?),
            None => None,
        };
        clause_cursor.finish()?;

        let (from_token, source) = from_clause(&mut cursor)?;
        let with_clause = self.optional_with_clause(&mut cursor)?;
        let semicolon_token = cursor.semicolon();
        cursor.finish()?;

        Ok(ModuleDeclaration::ExportAll(ExportAllDeclaration {
            loc: node.span,
            exported,
            source,
            with_clause,
            export_token,
            star_token,
            as_token,
            from_token,
            semicolon_token,
        }))
    }

    /// `a` or `a as b`; either side may be a string.
    pub(crate) fn export_specifier(&mut self, node: &'cst CstNode) -> Result<ExportSpecifier> {
        let mut cursor = Cursor::new(node, "ExportSpecifier");
        let local = module_export_name(cursor.expect_node("an export name")?, "ExportSpecifier")?;
        let (as_token, exported) = match cursor.match_word("as") {
            Some(as_token) => {
                let exported = module_export_name(cursor.expect_node("an exported name")?, "ExportSpecifier")?;
                (Some(as_token), exported)
            }
            None => (None, local.clone()),
        };
        cursor.finish()?;
        Ok(ExportSpecifier { loc: node.span, local, exported, as_token })
    }

    // =========================================================================
    // Import attributes
    // =========================================================================

    fn optional_with_clause(&mut self, cursor: &mut Cursor<'cst>) -> Result<Option<WithClause>> {
        match cursor.match_rule(Rule::WithClause) {
            Some(clause) => Ok(Some(self.with_clause(clause)?)),
            None => Ok(None),
        }
    }

    /// `with { key: "value", ... }`
    fn with_clause(&mut self, node: &'cst CstNode) -> Result<WithClause> {
        let component = "WithClause";
        let mut cursor = Cursor::new(node, component);
        let with_token = cursor.expect(TokenKind::With)?;
        let l_brace_token = cursor.expect(TokenKind::LBrace)?;
        let (entries, r_brace_token) = match cursor.rest().split_last() {
            Some((last, entries)) if last.is_token(TokenKind::RBrace) => (entries, factory::token(last)),
            _ => return Err(ConversionError::missing(component, "'}'", node)),
        };

        let pieces = flatten(entries, &[]);
        let mut parts = pieces.iter().map(|piece| piece.node()).peekable();
        let mut attributes = Vec::new();
        while let Some(key) = parts.next() {
            if key.is_token(TokenKind::Comma) {
                return Err(ConversionError::malformed(component, "an attribute key", key));
            }
            let colon_token = match parts.next() {
                Some(colon) => factory::expect_token(colon, TokenKind::Colon, component)?,
                None => return Err(ConversionError::missing(component, "':'", node)),
            };
            let Some(value) = parts.next() else {
                return Err(ConversionError::missing(component, "an attribute value", node));
            };
            let separator = parts.next_if(|part| part.is_token(TokenKind::Comma)).map(factory::token);
            let attribute = ImportAttribute {
                loc: key.span.to(value.span),
                key: module_export_name(key, component)?,
                value: factory::string_literal(value, component)?,
                colon_token,
            };
            attributes.push(Separated::new(attribute, separator));
        }

        Ok(WithClause { loc: node.span, attributes, with_token, l_brace_token, r_brace_token })
    }
}

fn is_from(node: &CstNode) -> bool {
    node.as_token().map_or(false, |kind| kind.is_word(node.text(), "from"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(src: &str) -> std::rc::Rc<ModuleDeclaration> {
        let node = esfold_cst::parse(src).unwrap();
        ConversionContext::default().convert(&node).unwrap().into_module_declaration().unwrap()
    }

    #[test]
    fn default_specifier_carries_the_comma() {
        let decl = declaration(
            "(ImportDeclaration import (ImportClause (ImportedDefaultBinding (BindingIdentifier a)) , \
             (NamedImports { (ImportsList (ImportSpecifier (ImportedBinding (BindingIdentifier b))) , \
             (ImportSpecifier (ModuleExportName c) as (ImportedBinding (BindingIdentifier d)))) , })) \
             (FromClause from \"m\") ;)",
        );
        let ModuleDeclaration::Import(import) = &*decl else { panic!("expected import") };
        assert_eq!(import.specifiers.len(), 3);
        assert!(matches!(import.specifiers[0].value, ImportDeclarationSpecifier::Default(_)));
        assert!(import.specifiers[0].trailing_separator.is_some());
        assert!(import.specifiers[2].trailing_separator.is_some());
        assert_eq!(import.specifiers[2].value.local().name, "d");
        assert!(import.l_brace_token.is_some());
    }

    #[test]
    fn namespace_import_with_attributes() {
        let decl = declaration(
            "(ImportDeclaration import (ImportClause (NameSpaceImport * as (ImportedBinding (BindingIdentifier ns)))) \
             (FromClause from \"./data.json\") (WithClause with { (WithEntries (AttributeKey type) : \"json\") }) ;)",
        );
        let ModuleDeclaration::Import(import) = &*decl else { panic!("expected import") };
        assert!(matches!(import.specifiers[0].value, ImportDeclarationSpecifier::Namespace(_)));
        let with = import.with_clause.as_ref().unwrap();
        assert_eq!(with.attributes.len(), 1);
        assert!(matches!(&with.attributes[0].value.key, ModuleExportName::Identifier(id) if id.name == "type"));
    }

    #[test]
    fn export_star_as_string_name() {
        let decl = declaration("(ExportDeclaration export (ExportFromClause * as (ModuleExportName \"a-b\")) (FromClause from \"m\") ;)");
        let ModuleDeclaration::ExportAll(all) = &*decl else { panic!("expected export all") };
        assert!(matches!(all.exported, Some(ModuleExportName::Literal(_))));
    }

    #[test]
    fn export_default_forms() {
        let decl = declaration("(ExportDeclaration export default (ClassDeclaration class (ClassTail { })))");
        assert!(matches!(&*decl, ModuleDeclaration::ExportDefault(d) if matches!(d.declaration, ExportDefaultKind::Class(_))));
        let decl = declaration("(ExportDeclaration export default (AdditiveExpression 1 + 2) ;)");
        assert!(matches!(&*decl, ModuleDeclaration::ExportDefault(d) if d.semicolon_token.is_some()));
    }

    #[test]
    fn local_exports_and_declarations() {
        let decl = declaration("(ExportDeclaration export (NamedExports { (ExportsList (ExportSpecifier a) , (ExportSpecifier b as c)) }) ;)");
        let ModuleDeclaration::ExportNamed(named) = &*decl else { panic!("expected named export") };
        assert!(named.source.is_none());
        assert_eq!(named.specifiers.len(), 2);
        assert!(named.specifiers[1].value.as_token.is_some());

        let decl = declaration("(ExportDeclaration export (VariableStatement var (VariableDeclarationList (VariableDeclaration (BindingIdentifier x))) ;))");
        assert!(matches!(&*decl, ModuleDeclaration::ExportNamed(d) if d.declaration.is_some()));
    }
}
