// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexing for the CST notation, using logos.
//!
//! Two passes, both logos-driven: [`tokenize`] splits notation text into
//! parens and atoms, and [`classify`] decides which ECMAScript token an
//! atom spells.

use esfold_ast::TokenKind;
use logos::Logos;

use crate::error::{NotationError, NotationErrorKind};

/// Raw notation token.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("(")]
    Open,
    #[token(")")]
    Close,

    // 'quoted atom'
    #[regex(r"'([^'\\]|\\[\s\S])*'")]
    Quoted,

    // Kind:'quoted atom'
    #[regex(r"[A-Za-z]+:'([^'\\]|\\[\s\S])*'")]
    KindQuoted,

    #[regex(r"[^\s()']+")]
    Bare,
}

/// One lexical item of the notation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    Open,
    Close,
    /// Atom text with an optional forced token kind name.
    Atom { kind: Option<String>, text: String },
}

/// Split notation text into items, recording each item's byte offset.
pub(crate) fn tokenize(source: &str) -> Result<Vec<(Item, usize)>, NotationError> {
    let mut items = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let item = match result {
            Ok(RawToken::Open) => Item::Open,
            Ok(RawToken::Close) => Item::Close,
            Ok(RawToken::Quoted) => Item::Atom { kind: None, text: unquote(slice) },
            Ok(RawToken::KindQuoted) => {
                let (kind, quoted) = slice.split_once(':').unwrap_or(("", slice));
                Item::Atom { kind: Some(kind.to_string()), text: unquote(quoted) }
            }
            Ok(RawToken::Bare) => split_kind(slice),
            Err(()) => {
                return Err(NotationError::new(NotationErrorKind::UnterminatedQuote, span.start));
            }
        };
        items.push((item, span.start));
    }

    Ok(items)
}

/// `Kind:text` forces a kind when `Kind` names a token kind; a leading `:`
/// is the colon punctuator itself.
fn split_kind(slice: &str) -> Item {
    if let Some((kind, text)) = slice.split_once(':') {
        if !kind.is_empty() && !text.is_empty() && TokenKind::from_name(kind).is_some() {
            return Item::Atom { kind: Some(kind.to_string()), text: text.to_string() };
        }
    }
    Item::Atom { kind: None, text: slice.to_string() }
}

/// Strip the notation quotes; `\'` and `\\` are the only notation escapes.
fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next @ ('\'' | '\\')) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Quote `text` for the notation if it cannot be written bare.
pub(crate) fn quote_if_needed(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text.chars().any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '\''))
        || text.contains(':') && text.len() > 1;
    if !needs_quotes {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// ECMAScript token shapes, for classifying atoms.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum AtomToken {
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    IdentifierName,

    #[regex(r"#[A-Za-z_$][A-Za-z0-9_$]*")]
    PrivateName,

    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"[0-9][0-9_]*n")]
    #[regex(r"([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9][0-9_]*)([eE][+-]?[0-9][0-9_]*)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[\s\S])*""#)]
    #[regex(r"'([^'\\\n]|\\[\s\S])*'")]
    String,

    #[regex(r"`([^`\\]|\\[\s\S])*`")]
    NoSubstitutionTemplate,

    #[regex(r"`([^`\\]|\\[\s\S])*\$\{")]
    TemplateHead,

    #[regex(r"\}([^`\\]|\\[\s\S])*\$\{")]
    TemplateMiddle,

    #[regex(r"\}([^`\\]|\\[\s\S])*`")]
    TemplateTail,

    #[regex(r"/([^/\\\[\n]|\\.|\[([^\]\\\n]|\\.)*\])+/[A-Za-z]*", priority = 10)]
    RegExp,

    #[regex(r"[{}\[\].;,<>=!+\-*/%&|^~?:()]+")]
    Punctuator,
}

/// Which ECMAScript token `text` spells, if it is exactly one token.
///
/// Keyword spellings (including contextual ones such as `of` and `async`)
/// classify as keywords; force `Identifier:of` where a plain name is meant.
pub fn classify(text: &str) -> Option<TokenKind> {
    let mut lexer = AtomToken::lexer(text);
    let token = lexer.next()?.ok()?;
    if lexer.span().end != text.len() {
        return None;
    }
    Some(match token {
        AtomToken::IdentifierName => TokenKind::KEYWORDS
            .iter()
            .copied()
            .find(|kw| kw.fixed_text() == Some(text))
            .unwrap_or(TokenKind::Identifier),
        AtomToken::PrivateName => TokenKind::PrivateIdentifier,
        AtomToken::Number => TokenKind::NumericLiteral,
        AtomToken::String => TokenKind::StringLiteral,
        AtomToken::NoSubstitutionTemplate => TokenKind::NoSubstitutionTemplate,
        AtomToken::TemplateHead => TokenKind::TemplateHead,
        AtomToken::TemplateMiddle => TokenKind::TemplateMiddle,
        AtomToken::TemplateTail => TokenKind::TemplateTail,
        AtomToken::RegExp => TokenKind::RegularExpressionLiteral,
        AtomToken::Punctuator => {
            return TokenKind::PUNCTUATORS.iter().copied().find(|p| p.fixed_text() == Some(text));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keywords_and_names() {
        assert_eq!(classify("const"), Some(TokenKind::Const));
        assert_eq!(classify("of"), Some(TokenKind::Of));
        assert_eq!(classify("foo$1"), Some(TokenKind::Identifier));
        assert_eq!(classify("#secret"), Some(TokenKind::PrivateIdentifier));
    }

    #[test]
    fn classify_literals() {
        assert_eq!(classify("0x1F"), Some(TokenKind::NumericLiteral));
        assert_eq!(classify("1_000n"), Some(TokenKind::NumericLiteral));
        assert_eq!(classify(".5e-3"), Some(TokenKind::NumericLiteral));
        assert_eq!(classify("\"a b\""), Some(TokenKind::StringLiteral));
        assert_eq!(classify("'x'"), Some(TokenKind::StringLiteral));
        assert_eq!(classify("/a[/]b/gi"), Some(TokenKind::RegularExpressionLiteral));
    }

    #[test]
    fn classify_templates() {
        assert_eq!(classify("`plain`"), Some(TokenKind::NoSubstitutionTemplate));
        assert_eq!(classify("`a${"), Some(TokenKind::TemplateHead));
        assert_eq!(classify("}b${"), Some(TokenKind::TemplateMiddle));
        assert_eq!(classify("}b`"), Some(TokenKind::TemplateTail));
        assert_eq!(classify("}"), Some(TokenKind::RBrace));
    }

    #[test]
    fn classify_punctuators() {
        assert_eq!(classify("?."), Some(TokenKind::QuestionDot));
        assert_eq!(classify(">>>="), Some(TokenKind::GtGtGtEq));
        assert_eq!(classify("/="), Some(TokenKind::SlashEq));
        assert_eq!(classify("("), Some(TokenKind::LParen));
        assert_eq!(classify("+-"), None);
        assert_eq!(classify("a b"), None);
    }

    #[test]
    fn tokenize_atoms() {
        let items = tokenize("(Literal Identifier:'of' '(' x:y ':')").unwrap();
        let atoms: Vec<_> = items.into_iter().map(|(item, _)| item).collect();
        assert_eq!(atoms[0], Item::Open);
        assert_eq!(atoms[1], Item::Atom { kind: None, text: "Literal".into() });
        assert_eq!(atoms[2], Item::Atom { kind: Some("Identifier".into()), text: "of".into() });
        assert_eq!(atoms[3], Item::Atom { kind: None, text: "(".into() });
        assert_eq!(atoms[4], Item::Atom { kind: None, text: "x:y".into() });
        assert_eq!(atoms[5], Item::Atom { kind: None, text: ":".into() });
        assert_eq!(atoms[6], Item::Close);
    }

    #[test]
    fn quoting_round_trips() {
        for text in ["a b", "'s'", "(", "back\\slash", "plain", "?."] {
            let quoted = quote_if_needed(text);
            let items = tokenize(&quoted).unwrap();
            assert_eq!(items[0].0, Item::Atom { kind: None, text: text.into() });
        }
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = tokenize("(Literal 'abc").unwrap_err();
        assert_eq!(err.kind, NotationErrorKind::UnterminatedQuote);
        assert_eq!(err.offset, 9);
    }
}
