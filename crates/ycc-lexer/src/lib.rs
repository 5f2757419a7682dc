// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the ycc language.
//!
//! Turns source text into a token vector terminated by a single `Eof`.

mod lexer;

pub use lexer::{tokenize, LexError, LexErrorKind, Lexer};
