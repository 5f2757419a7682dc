// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from front-end error types to `Diagnostic`.

use crate::{Diagnostic, ToDiagnostic};
use ycc_lexer::{LexError, LexErrorKind};
use ycc_parser::{FrontendError, ParseError, ParseErrorKind, MAX_NESTING, MAX_OPERATORS};

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = match self.kind {
            LexErrorKind::UnexpectedChar(_) => ("E0001", "unexpected character"),
            LexErrorKind::InvalidNumber => ("E0004", "does not fit in 64 bits"),
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, label);

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, note) = match self.kind {
            ParseErrorKind::MissingToken => ("E0101", None),
            ParseErrorKind::ExpectedNumber => ("E0102", None),
            ParseErrorKind::NestedTooDeeply => (
                "E0103",
                Some(format!("'(' and '=' nest at most {MAX_NESTING} levels deep")),
            ),
            ParseErrorKind::TooManyOperators => (
                "E0104",
                Some(format!("a statement holds at most {MAX_OPERATORS} operators")),
            ),
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, "here");

        if let Some(open) = self.opened {
            diag = diag.with_secondary(open, "unclosed '(' opened here");
        }
        if let Some(note) = note {
            diag = diag.with_note(note);
        }
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

impl ToDiagnostic for FrontendError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FrontendError::Lex(e) => e.to_diagnostic(),
            FrontendError::Parse(e) => e.to_diagnostic(),
        }
    }
}
