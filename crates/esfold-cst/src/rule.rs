// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Grammar production names.

macro_rules! rules {
    ($($(#[$group:meta])* $name:ident,)*) => {
        /// A production of the ECMAScript grammar that can head a CST node.
        ///
        /// Each production has exactly one spelling, the production name used by the
        /// ECMA-262 grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Rule {
            $($(#[$group])* $name,)*
        }

        impl Rule {
            pub const ALL: &'static [Rule] = &[$(Rule::$name,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Rule::$name => stringify!($name),)*
                }
            }

            pub fn from_name(name: &str) -> Option<Rule> {
                match name {
                    $(stringify!($name) => Some(Rule::$name),)*
                    _ => None,
                }
            }
        }
    };
}

rules! {
    // Scripts and modules
    Script,
    ScriptBody,
    Module,
    ModuleBody,
    ModuleItemList,
    ModuleItem,
    StatementList,
    StatementListItem,

    // Statements
    Statement,
    Declaration,
    HoistableDeclaration,
    BreakableStatement,
    IterationStatement,
    BlockStatement,
    Block,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    DoWhileStatement,
    WhileStatement,
    ForStatement,
    ForInOfStatement,
    ForDeclaration,
    ForBinding,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    CaseBlock,
    CaseClauses,
    CaseClause,
    DefaultClause,
    LabelledStatement,
    LabelledItem,
    ThrowStatement,
    TryStatement,
    Catch,
    CatchParameter,
    Finally,
    DebuggerStatement,

    // Variables and bindings
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    LexicalDeclaration,
    LetOrConst,
    BindingList,
    LexicalBinding,
    Initializer,
    BindingPattern,
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingPropertyList,
    BindingElementList,
    BindingElisionElement,
    BindingProperty,
    BindingElement,
    SingleNameBinding,
    BindingRestElement,
    BindingRestProperty,
    BindingIdentifier,
    IdentifierReference,
    LabelIdentifier,

    // Functions
    FunctionDeclaration,
    FunctionExpression,
    GeneratorDeclaration,
    GeneratorExpression,
    AsyncFunctionDeclaration,
    AsyncFunctionExpression,
    AsyncGeneratorDeclaration,
    AsyncGeneratorExpression,
    FormalParameters,
    UniqueFormalParameters,
    FormalParameterList,
    FormalParameter,
    FunctionRestParameter,
    PropertySetParameterList,
    FunctionBody,
    GeneratorBody,
    AsyncFunctionBody,
    AsyncGeneratorBody,
    FunctionStatementList,
    ArrowFunction,
    ArrowParameters,
    ConciseBody,
    ExpressionBody,
    AsyncArrowFunction,
    AsyncArrowBindingIdentifier,
    AsyncConciseBody,
    AsyncArrowHead,
    CoverCallExpressionAndAsyncArrowHead,
    CoverParenthesizedExpressionAndArrowParameterList,
    ParenthesizedExpression,

    // Methods and classes
    MethodDefinition,
    GeneratorMethod,
    AsyncMethod,
    AsyncGeneratorMethod,
    ClassDeclaration,
    ClassExpression,
    ClassTail,
    ClassHeritage,
    ClassBody,
    ClassElementList,
    ClassElement,
    FieldDefinition,
    ClassElementName,
    ClassStaticBlock,
    ClassStaticBlockBody,
    ClassStaticBlockStatementList,

    // Expressions
    Expression,
    AssignmentExpression,
    ConditionalExpression,
    ShortCircuitExpression,
    LogicalORExpression,
    LogicalANDExpression,
    CoalesceExpression,
    BitwiseORExpression,
    BitwiseXORExpression,
    BitwiseANDExpression,
    EqualityExpression,
    RelationalExpression,
    ShiftExpression,
    AdditiveExpression,
    MultiplicativeExpression,
    ExponentiationExpression,
    UnaryExpression,
    UpdateExpression,
    AwaitExpression,
    YieldExpression,
    LeftHandSideExpression,
    NewExpression,
    CallExpression,
    MemberExpression,
    SuperProperty,
    SuperCall,
    MetaProperty,
    NewTarget,
    ImportMeta,
    ImportCall,
    Arguments,
    ArgumentList,
    OptionalExpression,
    OptionalChain,
    PrimaryExpression,
    Literal,
    ArrayLiteral,
    ElementList,
    Elision,
    SpreadElement,
    ObjectLiteral,
    PropertyDefinitionList,
    PropertyDefinition,
    PropertyName,
    LiteralPropertyName,
    ComputedPropertyName,
    CoverInitializedName,
    TemplateLiteral,
    SubstitutionTemplate,
    TemplateSpans,
    TemplateMiddleList,

    // Modules
    ImportDeclaration,
    ImportClause,
    ImportedDefaultBinding,
    NameSpaceImport,
    NamedImports,
    FromClause,
    ImportsList,
    ImportSpecifier,
    ImportedBinding,
    ModuleSpecifier,
    WithClause,
    WithEntries,
    AttributeKey,
    ExportDeclaration,
    ExportFromClause,
    NamedExports,
    ExportsList,
    ExportSpecifier,
    ModuleExportName,
}

impl Rule {
    /// Binary precedence levels, delivered as flat `[operand (op operand)*]`.
    ///
    /// `ExponentiationExpression` is not included: it nests to the right.
    pub fn is_binary_level(self) -> bool {
        matches!(
            self,
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
                | Rule::MultiplicativeExpression
        )
    }

    /// Comma-delimited list productions that the grammar engine flattens.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Rule::ArgumentList
                | Rule::ElementList
                | Rule::Elision
                | Rule::PropertyDefinitionList
                | Rule::FormalParameterList
                | Rule::BindingList
                | Rule::VariableDeclarationList
                | Rule::BindingPropertyList
                | Rule::BindingElementList
                | Rule::ImportsList
                | Rule::ExportsList
                | Rule::WithEntries
        )
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_has_one_spelling() {
        for &rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.as_str()), Some(rule));
        }
        assert_eq!(Rule::from_name("LabeledStatement"), None);
        assert_eq!(Rule::from_name("LabelledStatement"), Some(Rule::LabelledStatement));
    }

    #[test]
    fn exponentiation_is_not_flat() {
        assert!(Rule::AdditiveExpression.is_binary_level());
        assert!(!Rule::ExponentiationExpression.is_binary_level());
        assert!(Rule::Elision.is_list());
    }
}
