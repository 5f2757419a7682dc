// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token and syntax-tree types for the ycc front end.
//!
//! Shared between the lexer, the parser and whatever consumes the parsed
//! program (diagnostics, the CLI, an external code generator).

pub mod node;
pub mod span;
pub mod token;

pub use node::{BinOp, Node, NodeKind, Program};
pub use span::{LineMap, Span};
pub use token::{Token, TokenClass, TokenKind};
