// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler phase inspection commands: lex, parse.

use colored::Colorize;
use serde::Serialize;
use std::process;
use ycc_ast::Token;
use ycc_diagnostics::{Diagnostic, ToDiagnostic};

use crate::{output, show_diagnostics, Format, Input};

/// One token in `ycc lex --format json` output.
#[derive(Serialize)]
struct JsonToken<'a> {
    class: String,
    kind: String,
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> From<&Token<'a>> for JsonToken<'a> {
    fn from(tok: &Token<'a>) -> Self {
        JsonToken {
            class: format!("{:?}", tok.class()),
            kind: format!("{:?}", tok.kind),
            text: tok.text,
            start: tok.span.start,
            end: tok.span.end,
        }
    }
}

fn load(input: &Input) -> (String, String) {
    match input.load() {
        Ok(loaded) => loaded,
        Err(msg) => {
            eprintln!("{}: {}", output::error_label(), msg);
            process::exit(1);
        }
    }
}

fn fail(diag: Diagnostic, source: &str, file: &str, phase: &str, format: Format) -> ! {
    show_diagnostics(std::slice::from_ref(&diag), source, file, phase, format);
    if format == Format::Human {
        eprintln!("\n{}", output::banner_fail(&capitalize(phase), 1));
    }
    process::exit(1);
}

fn capitalize(phase: &str) -> String {
    let mut chars = phase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}: serializing output: {}", output::error_label(), e);
            process::exit(1);
        }
    }
}

pub fn cmd_lex(input: &Input, format: Format) {
    let (file, source) = load(input);

    let tokens = match ycc_lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => fail(e.to_diagnostic(), &source, &file, "lex", format),
    };

    match format {
        Format::Human => {
            println!("{}\n", output::section(&format!("Tokens ({})", tokens.len())));
            for tok in &tokens {
                let class = format!("{:<8}", format!("{:?}", tok.class()));
                println!(
                    "{:4}:{:<3} {} {:?} {}",
                    tok.span.start,
                    tok.span.end,
                    class.dimmed(),
                    tok.kind,
                    tok.text.dimmed()
                );
            }
            println!("\n{}", output::banner_ok(&format!("Lex: {} tokens", tokens.len())));
        }
        Format::Json => {
            let json: Vec<JsonToken> = tokens.iter().map(JsonToken::from).collect();
            print_json(&json);
        }
    }
}

pub fn cmd_parse(input: &Input, format: Format) {
    let (file, source) = load(input);

    let tokens = match ycc_lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => fail(e.to_diagnostic(), &source, &file, "lex", format),
    };

    if format == Format::Human {
        println!("{}\n", output::section(&format!("Lexed {} tokens", tokens.len())));
    }

    let program = match ycc_parser::Parser::new(tokens).parse_program() {
        Ok(program) => program,
        Err(e) => fail(e.to_diagnostic(), &source, &file, "parse", format),
    };

    match format {
        Format::Human => {
            for (i, stmt) in program.stmts.iter().enumerate() {
                println!("{:3}: {}", i + 1, stmt);
            }
            println!("\nframe size: {}", program.frame_size);
            println!(
                "\n{}",
                output::banner_ok(&format!("Parse: {} statements", program.stmts.len()))
            );
        }
        Format::Json => print_json(&program),
    }
}
