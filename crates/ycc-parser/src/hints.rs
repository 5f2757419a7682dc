// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.

use ycc_ast::TokenKind;

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", TokenKind::Semi) => Some("every '(' needs a matching ')'"),
        ("')'", _) => None,

        // A second comparison lands here because only one is allowed
        ("';'", TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq) => {
            Some("comparisons do not chain; group them like '(a < b) < c'")
        }
        ("';'", TokenKind::Eof) => Some("every statement ends with ';'"),
        ("';'", _) => Some("end the statement with ';'"),

        ("a number", TokenKind::Plus | TokenKind::Minus) => {
            Some("signs do not stack; use parentheses like '-(-1)'")
        }
        ("a number", TokenKind::Semi | TokenKind::RParen | TokenKind::Eof) => {
            Some("an operand is missing")
        }
        ("a number", TokenKind::Return) => Some("'return' can only start a statement"),
        ("a number", _) => Some("try a number, a variable, or '('"),

        _ => None,
    }
}
