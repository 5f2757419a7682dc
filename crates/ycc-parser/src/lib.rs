// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the ycc language.
//!
//! Transforms a token stream into a `Program`, assigning every local
//! variable a frame offset along the way.

mod hints;
pub mod locals;
mod parser;

pub use locals::{LocalTable, LocalVar, SLOT_SIZE};
pub use parser::{ParseError, ParseErrorKind, Parser, MAX_NESTING, MAX_OPERATORS};

use thiserror::Error;
use ycc_ast::{Program, Span};
use ycc_lexer::LexError;

/// Any failure between source text and a finished `Program`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn span(&self) -> Span {
        match self {
            FrontendError::Lex(e) => e.span,
            FrontendError::Parse(e) => e.span,
        }
    }
}

/// Lex and parse `source` in one go.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = ycc_lexer::tokenize(source)?;
    Ok(Parser::new(tokens).parse_program()?)
}
