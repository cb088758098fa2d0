// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions.
//!
//! A [`Token`] is a concrete lexical unit kept on the AST purely for
//! source-faithful regeneration; ESTree consumers ignore these fields.

use crate::Span;

/// A keyword, punctuator or literal token preserved on an AST node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub loc: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, loc: Span) -> Self {
        Self { kind, text: text.into(), loc }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

macro_rules! token_kinds {
    (
        literals { $($lit:ident => $lit_desc:literal,)* }
        keywords { $($kw:ident => $kw_text:literal,)* }
        punctuators { $($p:ident => $p_text:literal,)* }
    ) => {
        /// The kind of token.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($lit,)*
            $($kw,)*
            $($p,)*
        }

        impl TokenKind {
            /// Every keyword kind, reserved and contextual.
            pub const KEYWORDS: &'static [TokenKind] = &[$(TokenKind::$kw,)*];

            /// Every punctuator kind.
            pub const PUNCTUATORS: &'static [TokenKind] = &[$(TokenKind::$p,)*];

            /// The variant name, e.g. `"Arrow"`; used by the CST notation.
            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$lit => stringify!($lit),)*
                    $(TokenKind::$kw => stringify!($kw),)*
                    $(TokenKind::$p => stringify!($p),)*
                }
            }

            /// Look a kind up by its variant name.
            pub fn from_name(name: &str) -> Option<TokenKind> {
                match name {
                    $(stringify!($lit) => Some(TokenKind::$lit),)*
                    $(stringify!($kw) => Some(TokenKind::$kw),)*
                    $(stringify!($p) => Some(TokenKind::$p),)*
                    _ => None,
                }
            }

            /// Source text of keywords and punctuators; `None` for literal kinds.
            pub fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $(TokenKind::$lit => None,)*
                    $(TokenKind::$kw => Some($kw_text),)*
                    $(TokenKind::$p => Some($p_text),)*
                }
            }

            pub fn is_keyword(self) -> bool {
                matches!(self, $(TokenKind::$kw)|*)
            }

            /// Returns a human-readable name for this token kind.
            pub fn display_name(self) -> &'static str {
                match self {
                    $(TokenKind::$lit => $lit_desc,)*
                    $(TokenKind::$kw => concat!("'", $kw_text, "'"),)*
                    $(TokenKind::$p => concat!("'", $p_text, "'"),)*
                }
            }
        }
    };
}

token_kinds! {
    literals {
        Identifier => "an identifier",
        PrivateIdentifier => "a private name",
        NumericLiteral => "a number",
        StringLiteral => "a string",
        RegularExpressionLiteral => "a regular expression",
        NoSubstitutionTemplate => "a template",
        TemplateHead => "a template head",
        TemplateMiddle => "a template middle",
        TemplateTail => "a template tail",
    }
    keywords {
        Await => "await",
        Break => "break",
        Case => "case",
        Catch => "catch",
        Class => "class",
        Const => "const",
        Continue => "continue",
        Debugger => "debugger",
        Default => "default",
        Delete => "delete",
        Do => "do",
        Else => "else",
        Enum => "enum",
        Export => "export",
        Extends => "extends",
        False => "false",
        Finally => "finally",
        For => "for",
        Function => "function",
        If => "if",
        Import => "import",
        In => "in",
        Instanceof => "instanceof",
        New => "new",
        Null => "null",
        Return => "return",
        Super => "super",
        Switch => "switch",
        This => "this",
        Throw => "throw",
        True => "true",
        Try => "try",
        Typeof => "typeof",
        Var => "var",
        Void => "void",
        While => "while",
        With => "with",
        Yield => "yield",
        // Contextual
        Let => "let",
        Static => "static",
        Async => "async",
        Of => "of",
        Get => "get",
        Set => "set",
        As => "as",
        From => "from",
        Target => "target",
        Meta => "meta",
    }
    punctuators {
        LBrace => "{",
        RBrace => "}",
        LParen => "(",
        RParen => ")",
        LBracket => "[",
        RBracket => "]",
        Dot => ".",
        Ellipsis => "...",
        Semicolon => ";",
        Comma => ",",
        Lt => "<",
        Gt => ">",
        LtEq => "<=",
        GtEq => ">=",
        EqEq => "==",
        NotEq => "!=",
        EqEqEq => "===",
        NotEqEq => "!==",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        StarStar => "**",
        PlusPlus => "++",
        MinusMinus => "--",
        LtLt => "<<",
        GtGt => ">>",
        GtGtGt => ">>>",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        Bang => "!",
        Tilde => "~",
        AmpAmp => "&&",
        PipePipe => "||",
        QuestionQuestion => "??",
        Question => "?",
        QuestionDot => "?.",
        Colon => ":",
        Eq => "=",
        PlusEq => "+=",
        MinusEq => "-=",
        StarEq => "*=",
        SlashEq => "/=",
        PercentEq => "%=",
        StarStarEq => "**=",
        LtLtEq => "<<=",
        GtGtEq => ">>=",
        GtGtGtEq => ">>>=",
        AmpEq => "&=",
        PipeEq => "|=",
        CaretEq => "^=",
        AmpAmpEq => "&&=",
        PipePipeEq => "||=",
        QuestionQuestionEq => "??=",
        Arrow => "=>",
    }
}

impl TokenKind {
    /// Tokens that may spell an `IdentifierName` (property names after `.`,
    /// export names, attribute keys).
    pub fn is_identifier_name(self) -> bool {
        self == TokenKind::Identifier || self.is_keyword()
    }

    /// Words that are keywords only in some positions and name an
    /// identifier everywhere else (`let`, `async`, `of`, ...).
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Static
                | TokenKind::Async
                | TokenKind::Of
                | TokenKind::Get
                | TokenKind::Set
                | TokenKind::As
                | TokenKind::From
                | TokenKind::Target
                | TokenKind::Meta
        )
    }

    /// Whether a token of this kind with `text` spells the contextual word
    /// `word`, either as its keyword kind or as a plain identifier.
    pub fn is_word(self, text: &str, word: &str) -> bool {
        (self == TokenKind::Identifier || self.is_contextual_keyword()) && text == word
    }

    pub fn is_template(self) -> bool {
        matches!(
            self,
            TokenKind::NoSubstitutionTemplate
                | TokenKind::TemplateHead
                | TokenKind::TemplateMiddle
                | TokenKind::TemplateTail
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TokenKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
