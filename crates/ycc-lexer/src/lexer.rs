// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::Logos;
use thiserror::Error;
use tracing::debug;
use ycc_ast::{Span, Token, TokenKind};

/// Raw token type for logos; keywords and literal values are settled in
/// `convert_token`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\x0B\x0C]+")]
enum RawToken {
    // Two-character operators; logos prefers the longest match
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // Single-character operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semi,

    #[regex(r"[0-9]+")]
    DecInt,

    // Identifier or the `return` keyword
    #[regex(r"[a-z]+")]
    Word,
}

/// The lexer for ycc source code.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenize the entire source. Stops at the first unrecognized input.
    pub fn tokenize(&self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();
        let mut raw_lexer = RawToken::lexer(self.source);

        while let Some(result) = raw_lexer.next() {
            let span = raw_lexer.span();
            let slice = raw_lexer.slice();

            let kind = match result {
                Ok(raw) => self.convert_token(raw, slice, span.start, span.end)?,
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                    return Err(LexError::unexpected_char(ch, span.start));
                }
            };

            tokens.push(Token::new(kind, slice, Span::new(span.start, span.end)));
        }

        let end = self.source.len();
        tokens.push(Token::new(TokenKind::Eof, &self.source[end..], Span::new(end, end)));

        debug!(tokens = tokens.len(), bytes = end, "lexed source");
        Ok(tokens)
    }

    fn convert_token(
        &self,
        raw: RawToken,
        slice: &str,
        start: usize,
        end: usize,
    ) -> Result<TokenKind, LexError> {
        Ok(match raw {
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Semi => TokenKind::Semi,

            RawToken::DecInt => {
                let value = slice.parse::<i64>().map_err(|_| LexError::invalid_number(start, end))?;
                TokenKind::Int(value)
            }
            RawToken::Word if slice == "return" && !self.continues_name(end) => TokenKind::Return,
            RawToken::Word => TokenKind::Ident,
        })
    }

    /// Whether the byte at `pos` could continue a name, which keeps a
    /// leading `return` from being read as the keyword.
    fn continues_name(&self, pos: usize) -> bool {
        self.source
            .as_bytes()
            .get(pos)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).tokenize()
}

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar(char),
    InvalidNumber,
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        let hint = match ch {
            'A'..='Z' => Some("names use lowercase letters only"),
            '_' => Some("names cannot contain '_'"),
            '!' => Some("the only operator starting with '!' is '!='"),
            _ => None,
        };
        Self {
            kind: LexErrorKind::UnexpectedChar(ch),
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("Unexpected character '{}'", ch.escape_debug()),
            hint: hint.map(String::from),
        }
    }

    fn invalid_number(start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::InvalidNumber,
            span: Span::new(start, end),
            message: "Number literal is too large".to_string(),
            hint: Some(format!("integers must not exceed {}", i64::MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use ycc_ast::TokenClass;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn statement_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("a = 1 + foo * (2 - 3);"),
            vec![
                Ident, Eq, Int(1), Plus, Ident, Star, LParen, Int(2), Minus, Int(3), RParen, Semi,
                Eof,
            ]
        );
    }

    #[test]
    fn tokens_borrow_source_text() {
        let src = "  total =\t42;";
        let tokens = tokenize(src).unwrap();
        assert_eq!(tokens[0].text, "total");
        assert_eq!(tokens[0].span, Span::new(2, 7));
        assert_eq!(tokens[2].text, "42");
        assert_eq!(&src[tokens[2].span.start..tokens[2].span.end], "42");
    }

    #[test]
    fn two_char_operators_win() {
        use TokenKind::*;
        assert_eq!(kinds("a <= b;"), vec![Ident, LtEq, Ident, Semi, Eof]);
        assert_eq!(kinds("== != >= <"), vec![EqEq, BangEq, GtEq, Lt, Eof]);
        // `<` `=` separated by space stay apart
        assert_eq!(kinds("< ="), vec![Lt, Eq, Eof]);
        assert_eq!(kinds("a===b"), vec![Ident, EqEq, Eq, Ident, Eof]);
    }

    #[test]
    fn return_keyword_needs_boundary() {
        use TokenKind::*;
        assert_eq!(kinds("return 1;"), vec![Return, Int(1), Semi, Eof]);
        assert_eq!(kinds("return(1);"), vec![Return, LParen, Int(1), RParen, Semi, Eof]);
        assert_eq!(kinds("return"), vec![Return, Eof]);

        let tokens = tokenize("returnx = 1;").unwrap();
        assert_eq!(tokens[0].kind, Ident);
        assert_eq!(tokens[0].text, "returnx");

        // A digit right after the word also blocks the keyword
        assert_eq!(kinds("return1"), vec![Ident, Int(1), Eof]);
    }

    #[test]
    fn numbers_carry_values() {
        assert_eq!(kinds("0 007 9223372036854775807"), vec![
            TokenKind::Int(0),
            TokenKind::Int(7),
            TokenKind::Int(i64::MAX),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn overflowing_number_is_an_error() {
        let err = tokenize("x = 9223372036854775808;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.span, Span::new(4, 23));
    }

    #[test]
    fn unexpected_char_reports_position() {
        let err = tokenize("a = 1 @ 2;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
        assert_eq!(err.span, Span::new(6, 7));
        assert_eq!(err.to_string(), "Unexpected character '@'");
    }

    #[test]
    fn uppercase_and_underscore_are_rejected() {
        let err = tokenize("Abc;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('A'));
        assert!(err.hint.is_some());

        let err = tokenize("a_b;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('_'));
        assert_eq!(err.span.start, 1);
    }

    #[test]
    fn lone_bang_is_rejected() {
        let err = tokenize("a ! b").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('!'));
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn eof_sentinel_always_present() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].class(), TokenClass::Eof);
        assert_eq!(tokens[0].span, Span::new(0, 0));

        let tokens = tokenize(" \n\t\r ").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span, Span::new(5, 5));
    }

    /// Source text built only from characters the lexer accepts.
    #[derive(Debug, Clone)]
    struct Source(String);

    impl Arbitrary for Source {
        fn arbitrary(g: &mut Gen) -> Self {
            // Numbers end in a space so adjacent literals never merge into
            // something that overflows.
            const PIECES: &[&str] = &[
                "a", "xy", "foo", "return", "7 ", "42 ", "+", "-", "*", "/", "(", ")",
                ";", "=", "==", "!=", "<", "<=", ">", ">=", " ", "\n", "\t",
            ];
            let len = usize::arbitrary(g) % g.size();
            let text = (0..len).filter_map(|_| g.choose(PIECES)).copied().collect();
            Source(text)
        }
    }

    #[test]
    fn token_texts_rebuild_source() {
        fn prop(src: Source) -> bool {
            let tokens = match tokenize(&src.0) {
                Ok(tokens) => tokens,
                Err(_) => return false,
            };
            let rebuilt: String = tokens.iter().map(|t| t.text).collect();
            let expected: String = src.0.chars().filter(|c| !c.is_whitespace()).collect();
            rebuilt == expected && tokens.iter().all(|t| &src.0[t.span.start..t.span.end] == t.text)
        }
        quickcheck(prop as fn(Source) -> bool);
    }
}
