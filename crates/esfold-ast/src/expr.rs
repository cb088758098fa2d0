// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use std::rc::Rc;

use crate::decl::{Class, Function};
use crate::pat::Pattern;
use crate::separated::Separated;
use crate::stmt::BlockStatement;
use crate::token::{Token, TokenKind};
use crate::Span;

/// An expression in the AST.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Expression {
    Identifier(Identifier),
    /// Only valid as the left operand of `in` (`#x in obj`).
    PrivateIdentifier(PrivateIdentifier),
    Literal(Literal),
    This(ThisExpression),
    Super(Super),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Function),
    ArrowFunction(ArrowFunctionExpression),
    Class(Class),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplateExpression),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Conditional(ConditionalExpression),
    Assignment(AssignmentExpression),
    Sequence(SequenceExpression),
    Member(MemberExpression),
    Call(CallExpression),
    New(NewExpression),
    Chain(ChainExpression),
    Yield(YieldExpression),
    Await(AwaitExpression),
    Import(ImportExpression),
    MetaProperty(MetaProperty),
    Parenthesized(ParenthesizedExpression),
}

impl Expression {
    pub fn loc(&self) -> Span {
        match self {
            Expression::Identifier(e) => e.loc,
            Expression::PrivateIdentifier(e) => e.loc,
            Expression::Literal(e) => e.loc,
            Expression::This(e) => e.loc,
            Expression::Super(e) => e.loc,
            Expression::Array(e) => e.loc,
            Expression::Object(e) => e.loc,
            Expression::Function(e) => e.loc,
            Expression::ArrowFunction(e) => e.loc,
            Expression::Class(e) => e.loc,
            Expression::Template(e) => e.loc,
            Expression::TaggedTemplate(e) => e.loc,
            Expression::Unary(e) => e.loc,
            Expression::Update(e) => e.loc,
            Expression::Binary(e) => e.loc,
            Expression::Logical(e) => e.loc,
            Expression::Conditional(e) => e.loc,
            Expression::Assignment(e) => e.loc,
            Expression::Sequence(e) => e.loc,
            Expression::Member(e) => e.loc,
            Expression::Call(e) => e.loc,
            Expression::New(e) => e.loc,
            Expression::Chain(e) => e.loc,
            Expression::Yield(e) => e.loc,
            Expression::Await(e) => e.loc,
            Expression::Import(e) => e.loc,
            Expression::MetaProperty(e) => e.loc,
            Expression::Parenthesized(e) => e.loc,
        }
    }

    /// The ESTree `type` of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::PrivateIdentifier(_) => "PrivateIdentifier",
            Expression::Literal(_) => "Literal",
            Expression::This(_) => "ThisExpression",
            Expression::Super(_) => "Super",
            Expression::Array(_) => "ArrayExpression",
            Expression::Object(_) => "ObjectExpression",
            Expression::Function(_) => "FunctionExpression",
            Expression::ArrowFunction(_) => "ArrowFunctionExpression",
            Expression::Class(_) => "ClassExpression",
            Expression::Template(_) => "TemplateLiteral",
            Expression::TaggedTemplate(_) => "TaggedTemplateExpression",
            Expression::Unary(_) => "UnaryExpression",
            Expression::Update(_) => "UpdateExpression",
            Expression::Binary(_) => "BinaryExpression",
            Expression::Logical(_) => "LogicalExpression",
            Expression::Conditional(_) => "ConditionalExpression",
            Expression::Assignment(_) => "AssignmentExpression",
            Expression::Sequence(_) => "SequenceExpression",
            Expression::Member(_) => "MemberExpression",
            Expression::Call(_) => "CallExpression",
            Expression::New(_) => "NewExpression",
            Expression::Chain(_) => "ChainExpression",
            Expression::Yield(_) => "YieldExpression",
            Expression::Await(_) => "AwaitExpression",
            Expression::Import(_) => "ImportExpression",
            Expression::MetaProperty(_) => "MetaProperty",
            Expression::Parenthesized(_) => "ParenthesizedExpression",
        }
    }
}

/// A name in binding, reference or label position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "Identifier"))]
pub struct Identifier {
    pub loc: Span,
    pub name: String,
}

/// `#name`; `name` excludes the `#`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "PrivateIdentifier"))]
pub struct PrivateIdentifier {
    pub loc: Span,
    pub name: String,
}

/// Null, boolean, number, string, BigInt or RegExp literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub loc: Span,
    pub value: LiteralValue,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Decimal digits without the `n` suffix.
    BigInt(String),
    RegExp { pattern: String, flags: String },
}

#[cfg(feature = "serde")]
impl serde::Serialize for Literal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Literal")?;
        map.serialize_entry("loc", &self.loc)?;
        match &self.value {
            LiteralValue::Null => map.serialize_entry("value", &())?,
            LiteralValue::Boolean(b) => map.serialize_entry("value", b)?,
            LiteralValue::Number(n) => map.serialize_entry("value", n)?,
            LiteralValue::String(s) => map.serialize_entry("value", s)?,
            LiteralValue::BigInt(digits) => {
                map.serialize_entry("value", &())?;
                map.serialize_entry("bigint", digits)?;
            }
            LiteralValue::RegExp { pattern, flags } => {
                #[derive(serde::Serialize)]
                struct Regex<'a> {
                    pattern: &'a str,
                    flags: &'a str,
                }
                map.serialize_entry("value", &())?;
                map.serialize_entry("regex", &Regex { pattern, flags })?;
            }
        }
        map.serialize_entry("raw", &self.raw)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "ThisExpression"))]
pub struct ThisExpression {
    pub loc: Span,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "Super"))]
pub struct Super {
    pub loc: Span,
}

/// An array element or call argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ExpressionOrSpread {
    Expression(Rc<Expression>),
    Spread(SpreadElement),
}

impl ExpressionOrSpread {
    pub fn loc(&self) -> Span {
        match self {
            ExpressionOrSpread::Expression(e) => e.loc(),
            ExpressionOrSpread::Spread(s) => s.loc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "SpreadElement", rename_all = "camelCase")
)]
pub struct SpreadElement {
    pub loc: Span,
    pub argument: Rc<Expression>,
    pub ellipsis_token: Token,
}

/// `[a, , ...b]`; holes are `None` carrying their comma.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ArrayExpression", rename_all = "camelCase")
)]
pub struct ArrayExpression {
    pub loc: Span,
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::separated::ser::holes"))]
    pub elements: Vec<Separated<Option<ExpressionOrSpread>>>,
    pub l_bracket_token: Token,
    pub r_bracket_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ObjectExpression", rename_all = "camelCase")
)]
pub struct ObjectExpression {
    pub loc: Span,
    pub properties: Vec<Separated<ObjectMember>>,
    pub l_brace_token: Token,
    pub r_brace_token: Token,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ObjectMember {
    Property(Property),
    Spread(SpreadElement),
    /// `{ x = 1 }`: only meaningful once the enclosing literal is
    /// reinterpreted as an object pattern.
    CoverInitializedName(CoverInitializedName),
}

impl ObjectMember {
    pub fn loc(&self) -> Span {
        match self {
            ObjectMember::Property(p) => p.loc,
            ObjectMember::Spread(s) => s.loc,
            ObjectMember::CoverInitializedName(c) => c.loc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// `key: value`, shorthand `key`, or a method/accessor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Property", rename_all = "camelCase")
)]
pub struct Property {
    pub loc: Span,
    pub key: PropertyKey,
    pub value: Rc<Expression>,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
    pub colon_token: Option<Token>,
    /// `get` or `set`.
    pub accessor_token: Option<Token>,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Property", rename_all = "camelCase")
)]
pub struct CoverInitializedName {
    pub loc: Span,
    pub key: Identifier,
    pub eq_token: Token,
    pub initializer: Rc<Expression>,
}

/// Property and class member keys. `Computed` holds the `[expr]` contents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum PropertyKey {
    Identifier(Identifier),
    PrivateIdentifier(PrivateIdentifier),
    Literal(Literal),
    Computed(Rc<Expression>),
}

impl PropertyKey {
    pub fn loc(&self) -> Span {
        match self {
            PropertyKey::Identifier(k) => k.loc,
            PropertyKey::PrivateIdentifier(k) => k.loc,
            PropertyKey::Literal(k) => k.loc,
            PropertyKey::Computed(k) => k.loc(),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    /// Static name of the key, if it has one (`constructor`, `"x"`, `1`).
    pub fn static_name(&self) -> Option<String> {
        match self {
            PropertyKey::Identifier(id) => Some(id.name.clone()),
            PropertyKey::Literal(lit) => match &lit.value {
                LiteralValue::String(s) => Some(s.clone()),
                LiteralValue::Number(n) => Some(n.to_string()),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ArrowBody {
    Block(BlockStatement),
    Expression(Rc<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ArrowFunctionExpression", rename_all = "camelCase")
)]
pub struct ArrowFunctionExpression {
    pub loc: Span,
    pub params: Vec<Separated<Rc<Pattern>>>,
    pub body: ArrowBody,
    #[cfg_attr(feature = "serde", serde(rename = "async"))]
    pub is_async: bool,
    /// `true` for a concise (expression) body.
    pub expression: bool,
    pub async_token: Option<Token>,
    pub l_paren_token: Option<Token>,
    pub r_paren_token: Option<Token>,
    pub arrow_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "TemplateLiteral", rename_all = "camelCase")
)]
pub struct TemplateLiteral {
    pub loc: Span,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Rc<Expression>>,
}

/// One static chunk of a template.
///
/// `raw` is the whole token text including its delimiters (`` `a${ ``);
/// `cooked` is `None` when the chunk contains an invalid escape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "TemplateElement"))]
pub struct TemplateElement {
    pub loc: Span,
    pub raw: String,
    pub cooked: Option<String>,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "TaggedTemplateExpression"))]
pub struct TaggedTemplateExpression {
    pub loc: Span,
    pub tag: Rc<Expression>,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "UnaryExpression", rename_all = "camelCase")
)]
pub struct UnaryExpression {
    pub loc: Span,
    pub operator: UnaryOperator,
    pub argument: Rc<Expression>,
    pub operator_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "UpdateExpression", rename_all = "camelCase")
)]
pub struct UpdateExpression {
    pub loc: Span,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Rc<Expression>,
    pub operator_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "BinaryExpression", rename_all = "camelCase")
)]
pub struct BinaryExpression {
    pub loc: Span,
    pub operator: BinaryOperator,
    pub left: Rc<Expression>,
    pub right: Rc<Expression>,
    pub operator_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "LogicalExpression", rename_all = "camelCase")
)]
pub struct LogicalExpression {
    pub loc: Span,
    pub operator: LogicalOperator,
    pub left: Rc<Expression>,
    pub right: Rc<Expression>,
    pub operator_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ConditionalExpression", rename_all = "camelCase")
)]
pub struct ConditionalExpression {
    pub loc: Span,
    pub test: Rc<Expression>,
    pub consequent: Rc<Expression>,
    pub alternate: Rc<Expression>,
    pub question_token: Token,
    pub colon_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "AssignmentExpression", rename_all = "camelCase")
)]
pub struct AssignmentExpression {
    pub loc: Span,
    pub operator: AssignmentOperator,
    pub left: Rc<Pattern>,
    pub right: Rc<Expression>,
    pub operator_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "SequenceExpression"))]
pub struct SequenceExpression {
    pub loc: Span,
    pub expressions: Vec<Separated<Rc<Expression>>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum MemberProperty {
    Identifier(Identifier),
    PrivateIdentifier(PrivateIdentifier),
    Computed(Rc<Expression>),
}

/// `a.b`, `a[b]`, `a.#b`, and their optional forms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "MemberExpression", rename_all = "camelCase")
)]
pub struct MemberExpression {
    pub loc: Span,
    pub object: Rc<Expression>,
    pub property: MemberProperty,
    pub computed: bool,
    pub optional: bool,
    /// `.` or `?.`
    pub dot_token: Option<Token>,
    pub l_bracket_token: Option<Token>,
    pub r_bracket_token: Option<Token>,
}

/// A parenthesised argument list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Arguments {
    pub loc: Span,
    pub l_paren_token: Token,
    pub arguments: Vec<Separated<ExpressionOrSpread>>,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "CallExpression", rename_all = "camelCase")
)]
pub struct CallExpression {
    pub loc: Span,
    pub callee: Rc<Expression>,
    pub arguments: Vec<Separated<ExpressionOrSpread>>,
    pub optional: bool,
    pub optional_token: Option<Token>,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "NewExpression", rename_all = "camelCase")
)]
pub struct NewExpression {
    pub loc: Span,
    pub callee: Rc<Expression>,
    pub arguments: Vec<Separated<ExpressionOrSpread>>,
    pub new_token: Token,
    pub l_paren_token: Option<Token>,
    pub r_paren_token: Option<Token>,
}

/// Boundary of an optional chain (`a?.b.c`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type", rename = "ChainExpression"))]
pub struct ChainExpression {
    pub loc: Span,
    pub expression: Rc<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "YieldExpression", rename_all = "camelCase")
)]
pub struct YieldExpression {
    pub loc: Span,
    pub argument: Option<Rc<Expression>>,
    pub delegate: bool,
    pub yield_token: Token,
    pub star_token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "AwaitExpression", rename_all = "camelCase")
)]
pub struct AwaitExpression {
    pub loc: Span,
    pub argument: Rc<Expression>,
    pub await_token: Token,
}

/// `import(source, options?)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ImportExpression", rename_all = "camelCase")
)]
pub struct ImportExpression {
    pub loc: Span,
    pub source: Rc<Expression>,
    pub options: Option<Rc<Expression>>,
    pub import_token: Token,
    pub l_paren_token: Token,
    pub source_separator: Option<Token>,
    pub options_separator: Option<Token>,
    pub r_paren_token: Token,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "MetaProperty", rename_all = "camelCase")
)]
pub struct MetaProperty {
    pub loc: Span,
    pub meta: Identifier,
    pub property: Identifier,
    pub dot_token: Token,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "ParenthesizedExpression", rename_all = "camelCase")
)]
pub struct ParenthesizedExpression {
    pub loc: Span,
    pub expression: Rc<Expression>,
    pub l_paren_token: Token,
    pub r_paren_token: Token,
}

macro_rules! operator_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal : $tok:ident,)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            /// The operator spelled by `kind`, if any.
            pub fn from_token(kind: TokenKind) -> Option<Self> {
                match kind {
                    $(TokenKind::$tok => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

operator_enum! {
    /// Binary (non-logical, non-assignment) operators.
    BinaryOperator {
        Eq => "==" : EqEq,
        NotEq => "!=" : NotEq,
        StrictEq => "===" : EqEqEq,
        StrictNotEq => "!==" : NotEqEq,
        Lt => "<" : Lt,
        LtEq => "<=" : LtEq,
        Gt => ">" : Gt,
        GtEq => ">=" : GtEq,
        Shl => "<<" : LtLt,
        Shr => ">>" : GtGt,
        UShr => ">>>" : GtGtGt,
        Add => "+" : Plus,
        Sub => "-" : Minus,
        Mul => "*" : Star,
        Div => "/" : Slash,
        Rem => "%" : Percent,
        Exp => "**" : StarStar,
        BitOr => "|" : Pipe,
        BitXor => "^" : Caret,
        BitAnd => "&" : Amp,
        In => "in" : In,
        Instanceof => "instanceof" : Instanceof,
    }
}

operator_enum! {
    /// Short-circuit operators.
    LogicalOperator {
        Or => "||" : PipePipe,
        And => "&&" : AmpAmp,
        Coalesce => "??" : QuestionQuestion,
    }
}

operator_enum! {
    AssignmentOperator {
        Assign => "=" : Eq,
        AddAssign => "+=" : PlusEq,
        SubAssign => "-=" : MinusEq,
        MulAssign => "*=" : StarEq,
        DivAssign => "/=" : SlashEq,
        RemAssign => "%=" : PercentEq,
        ExpAssign => "**=" : StarStarEq,
        ShlAssign => "<<=" : LtLtEq,
        ShrAssign => ">>=" : GtGtEq,
        UShrAssign => ">>>=" : GtGtGtEq,
        BitOrAssign => "|=" : PipeEq,
        BitXorAssign => "^=" : CaretEq,
        BitAndAssign => "&=" : AmpEq,
        AndAssign => "&&=" : AmpAmpEq,
        OrAssign => "||=" : PipePipeEq,
        CoalesceAssign => "??=" : QuestionQuestionEq,
    }
}

operator_enum! {
    UnaryOperator {
        Minus => "-" : Minus,
        Plus => "+" : Plus,
        Not => "!" : Bang,
        BitNot => "~" : Tilde,
        Typeof => "typeof" : Typeof,
        Void => "void" : Void,
        Delete => "delete" : Delete,
    }
}

operator_enum! {
    UpdateOperator {
        Increment => "++" : PlusPlus,
        Decrement => "--" : MinusMinus,
    }
}

impl AssignmentOperator {
    /// Plain `=` is the only operator that accepts a destructuring target.
    pub fn is_plain(self) -> bool {
        self == AssignmentOperator::Assign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_map_from_tokens() {
        assert_eq!(BinaryOperator::from_token(TokenKind::StarStar), Some(BinaryOperator::Exp));
        assert_eq!(BinaryOperator::from_token(TokenKind::AmpAmp), None);
        assert_eq!(LogicalOperator::from_token(TokenKind::QuestionQuestion), Some(LogicalOperator::Coalesce));
        assert_eq!(AssignmentOperator::from_token(TokenKind::PipePipeEq), Some(AssignmentOperator::OrAssign));
        assert_eq!(UnaryOperator::from_token(TokenKind::Typeof).map(|op| op.as_str()), Some("typeof"));
        assert_eq!(UpdateOperator::Decrement.to_string(), "--");
    }

    #[test]
    fn only_plain_assignment_destructures() {
        assert!(AssignmentOperator::Assign.is_plain());
        assert!(!AssignmentOperator::AddAssign.is_plain());
    }
}
