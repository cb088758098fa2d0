// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Concrete syntax tree model for ECMAScript.
//!
//! The grammar engine hands the converter a [`CstNode`] tree whose interior
//! nodes are named by [`Rule`]. This crate also reads and writes a compact
//! textual notation for such trees, used by fixtures and error snapshots.

mod error;
mod lexer;
pub mod node;
pub mod notation;
pub mod rule;

pub use error::{NotationError, NotationErrorKind};
pub use lexer::classify;
pub use node::{CstKind, CstNode};
pub use notation::{layout, parse};
pub use rule::Rule;
