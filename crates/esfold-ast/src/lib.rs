// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! ESTree abstract syntax tree with token provenance.
//!
//! Node shapes follow the ESTree vocabulary. Every node carries a `loc`, and
//! the punctuation and keywords that shaped it are kept as [`Token`]s so a
//! downstream generator can reproduce the source faithfully. Child links are
//! [`Rc`](std::rc::Rc) so identity is observable.
//!
//! With the `serde` feature enabled every node serialises to ESTree JSON.

pub mod span;
pub mod token;
pub mod separated;
pub mod expr;
pub mod pat;
pub mod stmt;
pub mod decl;
pub mod module;
pub mod node;

pub use span::{LineMap, Position, Span};
pub use token::{Token, TokenKind};
pub use separated::Separated;
pub use expr::*;
pub use pat::*;
pub use stmt::*;
pub use decl::*;
pub use module::*;
pub use node::{AstNode, ExpressionOrPattern, Program, ProgramItem, SourceType};
