// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Byte spans into the source buffer and line/column lookup.

/// A half-open byte range `start..end` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Line-start table for turning byte offsets into 1-based line:col pairs.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Offset of the first byte of every line; always starts with 0.
    starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineMap { starts }
    }

    /// 1-based (line, column) of a byte offset. Offsets past the end land on
    /// the last line.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let idx = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        (idx + 1, offset - self.starts[idx] + 1)
    }

    /// Text of a 1-based line, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: usize) -> Option<&'a str> {
        let idx = line.checked_sub(1)?;
        let start = *self.starts.get(idx)?;
        let end = match self.starts.get(idx + 1) {
            Some(&next) => next - 1,
            None => source.len(),
        };
        source.get(start..end).map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_join() {
        let a = Span::new(2, 4);
        let b = Span::new(7, 9);
        assert_eq!(a.to(b), Span::new(2, 9));
        assert_eq!(b.to(a), Span::new(2, 9));
    }

    #[test]
    fn single_line_program() {
        let src = "a = 1;";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_col(0), (1, 1));
        assert_eq!(lm.line_col(4), (1, 5));
        assert_eq!(lm.line_text(src, 1), Some("a = 1;"));
        assert_eq!(lm.line_text(src, 2), None);
    }

    #[test]
    fn statements_on_separate_lines() {
        let src = "a = 1;\nb = 2;\nreturn a + b;";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_col(7), (2, 1));
        assert_eq!(lm.line_col(6), (1, 7)); // the newline itself
        assert_eq!(lm.line_col(21), (3, 8));
        assert_eq!(lm.line_text(src, 2), Some("b = 2;"));
        assert_eq!(lm.line_text(src, 3), Some("return a + b;"));
    }

    #[test]
    fn crlf_and_trailing_newline() {
        let src = "x;\r\ny;\r\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_text(src, 1), Some("x;"));
        assert_eq!(lm.line_text(src, 3), Some(""));
        assert_eq!(lm.line_col(src.len()), (3, 1));
    }

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.line_col(0), (1, 1));
        assert_eq!(lm.line_text("", 1), Some(""));
    }
}
