// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Notation reader errors.

use thiserror::Error;

/// An error reading CST notation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} (at offset {offset})")]
pub struct NotationError {
    pub kind: NotationErrorKind,
    /// Byte offset into the notation text.
    pub offset: usize,
}

impl NotationError {
    pub fn new(kind: NotationErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn unknown_rule(name: &str, offset: usize) -> Self {
        Self::new(NotationErrorKind::UnknownRule { name: name.to_string() }, offset)
    }

    pub fn unknown_token_kind(name: &str, offset: usize) -> Self {
        Self::new(NotationErrorKind::UnknownTokenKind { name: name.to_string() }, offset)
    }

    pub fn not_a_token(text: &str, offset: usize) -> Self {
        Self::new(NotationErrorKind::NotAToken { text: text.to_string() }, offset)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationErrorKind {
    #[error("unterminated quoted atom")]
    UnterminatedQuote,

    #[error("unknown production `{name}`")]
    UnknownRule { name: String },

    #[error("unknown token kind `{name}`")]
    UnknownTokenKind { name: String },

    #[error("`{text}` is not exactly one ECMAScript token")]
    NotAToken { text: String },

    #[error("expected a production name after `(`")]
    MissingRuleName,

    #[error("`(` is never closed")]
    Unclosed,

    #[error("unexpected `)`")]
    UnexpectedClose,

    #[error("unexpected input after the root node")]
    TrailingInput,

    #[error("notation is empty")]
    Empty,
}
