// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! ycc compiler diagnostics.
//!
//! Lexer and parser errors stay small; the `ToDiagnostic` trait turns them
//! into a `Diagnostic` that the terminal formatter and the JSON report both
//! render.

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;

use serde::Serialize;
use ycc_ast::Span;

pub use formatter::DiagnosticFormatter;

// ============================================================================
// Core Types
// ============================================================================

/// A compiler error with rich context for display.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

/// A labeled source span within a diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    pub span: Span,
    pub style: LabelStyle,
    pub message: Option<String>,
}

/// How a label should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Primary error location (`^` underline).
    Primary,
    /// Related location (`-` underline).
    Secondary,
}

/// An error code like E0101.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

// ============================================================================
// Builder API
// ============================================================================

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn with_label(mut self, span: Span, style: LabelStyle, msg: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            style,
            message: Some(msg.into()),
        });
        self
    }

    pub fn with_primary(self, span: Span, msg: impl Into<String>) -> Self {
        self.with_label(span, LabelStyle::Primary, msg)
    }

    pub fn with_secondary(self, span: Span, msg: impl Into<String>) -> Self {
        self.with_label(span, LabelStyle::Secondary, msg)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns the primary span (first primary label, or first label).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|l| l.style == LabelStyle::Primary)
            .or(self.labels.first())
            .map(|l| l.span)
    }
}

// ============================================================================
// Conversion Trait
// ============================================================================

/// Convert a compiler error into a rich diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_parts() {
        let diag = Diagnostic::error("Expected ';'")
            .with_code("E0101")
            .with_secondary(Span::new(0, 1), "statement starts here")
            .with_primary(Span::new(4, 5), "here")
            .with_note("statements end with ';'")
            .with_help("add ';'");

        assert_eq!(diag.code, Some(ErrorCode("E0101".into())));
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.primary_span(), Some(Span::new(4, 5)));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.as_deref(), Some("add ';'"));
    }

    #[test]
    fn primary_span_falls_back_to_first_label() {
        let diag = Diagnostic::error("e").with_secondary(Span::new(2, 3), "x");
        assert_eq!(diag.primary_span(), Some(Span::new(2, 3)));
        assert_eq!(Diagnostic::error("e").primary_span(), None);
    }
}
