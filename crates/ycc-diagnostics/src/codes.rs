// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes to titles and categories. Used by `ycc explain <code>`
//! and by the JSON report.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
#[derive(Debug)]
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    pub explanation: &'static str,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr, $explain:literal)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                explanation: $explain,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Lexical,
                    "Only lowercase names, decimal numbers, whitespace and the symbols \
                     + - * / ( ) ; = == != < <= > >= may appear in a program."),
                "E0004" => ("invalid number", Lexical,
                    "Integer literals must fit in a signed 64-bit integer."),

                // Parser errors (E01xx)
                "E0101" => ("expected token not found", Syntax,
                    "A mandatory ')' or ';' is missing. Comparisons do not chain, so a \
                     second comparison operator also ends up here."),
                "E0102" => ("expected a number", Syntax,
                    "An operand is missing. Operands are numbers, variables or a \
                     parenthesized expression; a sign applies to one operand only."),
                "E0103" => ("expression nested too deeply", Syntax,
                    "Parentheses and chained assignments may nest 128 levels deep. \
                     Break the expression up using variables."),
                "E0104" => ("too many operators in one statement", Syntax,
                    "A single statement may contain at most 1024 operators. Store \
                     partial results in variables and combine them later."),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// All entries, ordered by code.
    pub fn all(&self) -> Vec<&ErrorCodeInfo> {
        let mut all: Vec<_> = self.codes.values().collect();
        all.sort_by_key(|info| info.code);
        all
    }
}
