// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Recursive-descent parser, one function per precedence level.
//!
//! ```text
//! program    = statement*
//! statement  = expression ";" | "return" expression ";"
//! expression = assignment
//! assignment = equality ("=" assignment)?
//! equality   = relational (("==" | "!=") relational)*
//! relational = additive (("<" | "<=" | ">" | ">=") additive)?
//! additive   = multiplicative (("+" | "-") multiplicative)*
//! multiplicative = unary (("*" | "/") unary)*
//! unary      = ("+" | "-")? primary
//! primary    = number | identifier | "(" expression ")"
//! ```
//!
//! `relational` takes at most one comparison and `unary` at most one sign;
//! both stop there and leave the next token to the caller.
//!
//! Recursion is bounded: `(` and `=` may nest [`MAX_NESTING`] deep, and one
//! statement holds at most [`MAX_OPERATORS`] operators, which also bounds the
//! height of every tree handed out.

use thiserror::Error;
use tracing::debug;
use ycc_ast::{BinOp, Node, Program, Span, Token, TokenKind};

use crate::locals::LocalTable;

/// Deepest `(` or `=` nesting accepted inside one expression.
pub const MAX_NESTING: usize = 128;

/// Most operators accepted in one statement.
pub const MAX_OPERATORS: usize = 1024;

/// The parser for ycc source code.
pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    locals: LocalTable<'src>,
    /// Open `(` and `=` levels around the cursor.
    depth: usize,
    /// Operators seen in the current statement.
    operators: usize,
}

impl<'src> Parser<'src> {
    /// Create a parser over a lexed token vector. An `Eof` token is appended
    /// if the vector does not already end with one.
    pub fn new(mut tokens: Vec<Token<'src>>) -> Self {
        if !matches!(tokens.last(), Some(tok) if tok.kind == TokenKind::Eof) {
            let end = tokens.last().map_or(0, |tok| tok.span.end);
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        }
        Self {
            tokens,
            pos: 0,
            locals: LocalTable::new(),
            depth: 0,
            operators: 0,
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token<'src> {
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// True once the cursor sits on the `Eof` token.
    pub fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token<'src> {
        let idx = self.pos;
        if !self.at_end() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Advance past `kind` if it is next. Never fails.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance past an identifier if one is next.
    pub fn consume_ident(&mut self) -> Option<Token<'src>> {
        if self.check(&TokenKind::Ident) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    /// Advance past `kind`, or fail with the current token's span.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(kind.display_name(), self.current()))
        }
    }

    /// Advance past a number and return its value, or fail.
    pub fn expect_number(&mut self) -> Result<i64, ParseError> {
        match *self.current_kind() {
            TokenKind::Int(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(ParseError::expected_number(self.current())),
        }
    }

    // =========================================================================
    // Limits
    // =========================================================================

    /// Step one level deeper for a `(` or `=` found at `at`.
    fn enter(&mut self, at: Span) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::nested_too_deeply(at));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Count one operator found at `at` against the statement's budget.
    fn count_operator(&mut self, at: Span) -> Result<(), ParseError> {
        if self.operators >= MAX_OPERATORS {
            return Err(ParseError::too_many_operators(at));
        }
        self.operators += 1;
        Ok(())
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse statements until `Eof`. The first error ends the parse.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.at_end() {
            stmts.push(self.parse_stmt()?);
        }

        let frame_size = self.locals.frame_size();
        debug!(stmts = stmts.len(), locals = self.locals.len(), frame_size, "parsed program");
        Ok(Program { stmts, frame_size })
    }

    fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.current().span;
        self.operators = 0;

        if self.consume(&TokenKind::Return) {
            let expr = self.parse_expr()?;
            let end = self.expect(&TokenKind::Semi)?.span;
            return Ok(Node::ret(expr, start.to(end)));
        }

        let expr = self.parse_expr()?;
        self.expect(&TokenKind::Semi)?;
        Ok(expr)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Node, ParseError> {
        self.parse_assign()
    }

    fn parse_assign(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_equality()?;
        let at = self.current().span;
        if self.consume(&TokenKind::Eq) {
            self.count_operator(at)?;
            self.enter(at)?;
            let value = self.parse_assign();
            self.leave();
            return Ok(Node::assign(node, value?));
        }
        Ok(node)
    }

    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_relational()?;
        loop {
            let at = self.current().span;
            let op = if self.consume(&TokenKind::EqEq) {
                BinOp::Eq
            } else if self.consume(&TokenKind::BangEq) {
                BinOp::Ne
            } else {
                return Ok(node);
            };
            self.count_operator(at)?;
            let rhs = self.parse_relational()?;
            node = Node::binary(op, node, rhs);
        }
    }

    /// A single optional comparison; `a < b < c` stops before the second `<`.
    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_additive()?;
        let at = self.current().span;
        let op = if self.consume(&TokenKind::Lt) {
            BinOp::Lt
        } else if self.consume(&TokenKind::LtEq) {
            BinOp::Le
        } else if self.consume(&TokenKind::Gt) {
            BinOp::Gt
        } else if self.consume(&TokenKind::GtEq) {
            BinOp::Ge
        } else {
            return Ok(node);
        };
        self.count_operator(at)?;
        let rhs = self.parse_additive()?;
        Ok(Node::binary(op, node, rhs))
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_multiplicative()?;
        loop {
            let at = self.current().span;
            let op = if self.consume(&TokenKind::Plus) {
                BinOp::Add
            } else if self.consume(&TokenKind::Minus) {
                BinOp::Sub
            } else {
                return Ok(node);
            };
            self.count_operator(at)?;
            let rhs = self.parse_multiplicative()?;
            node = Node::binary(op, node, rhs);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_unary()?;
        loop {
            let at = self.current().span;
            let op = if self.consume(&TokenKind::Star) {
                BinOp::Mul
            } else if self.consume(&TokenKind::Slash) {
                BinOp::Div
            } else {
                return Ok(node);
            };
            self.count_operator(at)?;
            let rhs = self.parse_unary()?;
            node = Node::binary(op, node, rhs);
        }
    }

    /// `+x` is `x`; `-x` becomes `0 - x`. The operand is a primary.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let sign = self.current().span;
        if self.consume(&TokenKind::Plus) {
            return self.parse_primary();
        }
        if self.consume(&TokenKind::Minus) {
            self.count_operator(sign)?;
            let operand = self.parse_primary()?;
            return Ok(Node::binary(BinOp::Sub, Node::num(0, sign), operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let open = self.current().span;
        if self.consume(&TokenKind::LParen) {
            self.enter(open)?;
            let node = self.parse_expr();
            self.leave();
            let node = node?;
            self.expect(&TokenKind::RParen).map_err(|e| e.with_opened(open))?;
            return Ok(node);
        }

        if let Some(tok) = self.consume_ident() {
            let offset = self.locals.resolve(tok.text);
            return Ok(Node::local_var(offset, tok.span));
        }

        let span = self.current().span;
        let value = self.expect_number()?;
        Ok(Node::num(value, span))
    }
}

/// What the parser was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A mandatory symbol such as `)` or `;`.
    MissingToken,
    /// A number where the grammar has run out of alternatives.
    ExpectedNumber,
    /// `(` or `=` nested past [`MAX_NESTING`].
    NestedTooDeeply,
    /// A statement with more than [`MAX_OPERATORS`] operators.
    TooManyOperators,
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
    /// The `(` left open, for a missing `)`.
    pub opened: Option<Span>,
}

impl ParseError {
    fn expected(expected: &str, found: &Token<'_>) -> Self {
        Self {
            kind: ParseErrorKind::MissingToken,
            span: found.span,
            message: format_expected_message(expected, &found.kind),
            hint: crate::hints::for_expected(expected, &found.kind).map(String::from),
            opened: None,
        }
    }

    fn expected_number(found: &Token<'_>) -> Self {
        let expected = "a number";
        Self {
            kind: ParseErrorKind::ExpectedNumber,
            span: found.span,
            message: format_expected_message(expected, &found.kind),
            hint: crate::hints::for_expected(expected, &found.kind).map(String::from),
            opened: None,
        }
    }

    fn nested_too_deeply(at: Span) -> Self {
        Self {
            kind: ParseErrorKind::NestedTooDeeply,
            span: at,
            message: "Expression nested too deeply".to_string(),
            hint: Some("split the expression across several statements".to_string()),
            opened: None,
        }
    }

    fn too_many_operators(at: Span) -> Self {
        Self {
            kind: ParseErrorKind::TooManyOperators,
            span: at,
            message: "Statement has too many operators".to_string(),
            hint: Some("store partial results in variables".to_string()),
            opened: None,
        }
    }

    fn with_opened(mut self, open: Span) -> Self {
        self.opened = Some(open);
        self
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match (expected, found) {
        ("')'", TokenKind::Eof) => "Unclosed '(' - missing ')'".to_string(),
        ("';'", _) => format!("Expected ';' after statement, found {}", found.display_name()),
        ("a number", _) => format!("Expected a number, found {}", found.display_name()),
        _ => format!("Expected {}, found {}", expected, found.display_name()),
    }
}
