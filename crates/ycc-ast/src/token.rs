// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
///
/// `text` borrows from the source buffer; tokens never own a copy of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }
}

/// Coarse classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Operators, punctuation and the `return` keyword.
    Reserved,
    Ident,
    Number,
    Eof,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),

    // Identifier; the name is the token's `text`
    Ident,

    // Keywords
    Return,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Delimiters
    LParen,
    RParen,
    Semi,

    // Special
    Eof,
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Int(_) => TokenClass::Number,
            TokenKind::Ident => TokenClass::Ident,
            TokenKind::Eof => TokenClass::Eof,
            _ => TokenClass::Reserved,
        }
    }

    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "a number",
            TokenKind::Ident => "a name",
            TokenKind::Return => "'return'",

            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",

            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semi => "';'",

            TokenKind::Eof => "end of input",
        }
    }
}
