// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0101]: Expected ')', found ';'
//!   --> main.c:1:7
//!    |
//!  1 | (1 + 2;
//!    | -     ^
//!    | | unclosed '(' opened here
//!    |       | here
//!    |
//!    = help: every '(' needs a matching ')'
//! ```

use std::collections::BTreeMap;

use colored::Colorize;
use ycc_ast::LineMap;

use crate::{Diagnostic, LabelStyle};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine<'d> {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation<'d>>,
}

struct Annotation<'d> {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<&'d str>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let Some(primary) = diagnostic.primary_span() else {
            self.format_footer(&mut out, diagnostic, 2);
            return out;
        };

        let (line, col) = self.line_map.line_col(primary.start);
        let file = self.file_name.unwrap_or("<source>");
        out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

        let max_line = annotated.last().map_or(1, |a| a.line_num);
        let gutter = max_line.to_string().len().max(2);
        let blank = format!("{} {}\n", " ".repeat(gutter), "|".blue());

        out.push_str(&blank);
        let mut prev: Option<usize> = None;
        for annotated_line in &annotated {
            if prev.is_some_and(|p| annotated_line.line_num > p + 1) {
                out.push_str(&format!("{} {}\n", " ".repeat(gutter), "...".blue()));
            }
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter,
            ));
            self.format_annotations(&mut out, annotated_line, gutter);
            prev = Some(annotated_line.line_num);
        }

        if !diagnostic.notes.is_empty() || diagnostic.help.is_some() {
            out.push_str(&blank);
        }
        self.format_footer(&mut out, diagnostic, gutter);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = "error".red().bold();

        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter: usize) {
        let pad = " ".repeat(gutter);
        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", pad, "=".cyan(), "note".cyan().bold(), note));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", pad, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines<'d>(&self, diagnostic: &'d Diagnostic) -> Vec<AnnotatedLine<'d>> {
        let mut lines: BTreeMap<usize, AnnotatedLine<'d>> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.line_map.line_col(label.span.start);
            let (end_line, col_end) = self.line_map.line_col(label.span.end);
            let text = self.line_map.line_text(self.source, line_num).unwrap_or("");

            // Multi-line spans are cut at the end of their first line
            let col_end = if end_line == line_num { col_end } else { text.len() + 1 };

            lines
                .entry(line_num)
                .or_insert_with(|| AnnotatedLine {
                    line_num,
                    text: text.to_string(),
                    annotations: Vec::new(),
                })
                .annotations
                .push(Annotation {
                    col_start,
                    col_end: col_end.max(col_start + 1),
                    style: label.style,
                    message: label.message.as_deref(),
                });
        }

        lines.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, line: &AnnotatedLine<'_>, gutter: usize) {
        let mut sorted: Vec<&Annotation<'_>> = line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style == LabelStyle::Secondary, a.col_start));

        let width = sorted.iter().map(|a| a.col_end).max().unwrap_or(1);
        let mut underline = vec![' '; width];
        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in &mut underline[ann.col_start - 1..ann.col_end - 1] {
                *slot = ch;
            }
        }

        let underline: String = underline.into_iter().collect();
        let underline = underline.trim_end();
        let prefix = format!("{} {}", " ".repeat(gutter), "|".blue());
        let messages: Vec<_> = sorted
            .iter()
            .filter_map(|a| a.message.map(|m| (a.col_start, a.style, m)))
            .collect();

        match messages.as_slice() {
            [] => out.push_str(&format!("{} {}\n", prefix, color_underline(underline))),
            [(_, style, msg)] => out.push_str(&format!(
                "{} {} {}\n",
                prefix,
                color_underline(underline),
                style_message(*style, msg)
            )),
            _ => {
                out.push_str(&format!("{} {}\n", prefix, color_underline(underline)));
                for (col, style, msg) in messages.iter().rev() {
                    out.push_str(&format!(
                        "{} {}{} {}\n",
                        prefix,
                        " ".repeat(col - 1),
                        style_message(*style, "|"),
                        style_message(*style, msg),
                    ));
                }
            }
        }
    }
}

fn style_message(style: LabelStyle, msg: &str) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

/// Color runs of `^` red and runs of `-` blue.
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut run = String::new();
    let mut run_char = None;

    for ch in s.chars() {
        if Some(ch) != run_char && !run.is_empty() {
            result.push_str(&flush_run(&run, run_char));
            run.clear();
        }
        run.push(ch);
        run_char = Some(ch);
    }
    result.push_str(&flush_run(&run, run_char));
    result
}

fn flush_run(run: &str, ch: Option<char>) -> String {
    match ch {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}
