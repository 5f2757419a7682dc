// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! ycc CLI - inspect the lexer and parser output for a program.

mod commands;
mod output;

use std::env;
use std::fs;
use std::process;

use tracing_subscriber::EnvFilter;
use ycc_diagnostics::json::{to_json_report, to_json_string};
use ycc_diagnostics::{Diagnostic, DiagnosticFormatter};

/// Output format for results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

/// Where the program text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(String),
    Inline(String),
}

impl Input {
    /// Display name and full text of the program.
    pub fn load(&self) -> Result<(String, String), String> {
        match self {
            Input::File(path) => fs::read_to_string(path)
                .map(|source| (path.clone(), source))
                .map_err(|e| format!("reading {}: {}", output::file_path(path), e)),
            Input::Inline(source) => Ok(("<inline>".to_string(), source.clone())),
        }
    }
}

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Options {
    command: String,
    positional: Vec<String>,
    eval: Option<String>,
    format: Format,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut eval = None;
    let mut format = Format::Human;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                format = match iter.next().map(String::as_str) {
                    Some("json") => Format::Json,
                    Some("human") => Format::Human,
                    Some(other) => {
                        return Err(format!(
                            "unknown format '{}' (expected 'human' or 'json')",
                            other
                        ))
                    }
                    None => return Err("--format needs a value".to_string()),
                };
            }
            "-e" | "--eval" => {
                let source = iter.next().ok_or_else(|| format!("{} needs a program", arg))?;
                eval = Some(source.clone());
            }
            _ => positional.push(arg.clone()),
        }
    }

    let command = if positional.is_empty() {
        // `ycc -e 'a = 1;'` parses by default
        if eval.is_some() { "parse".to_string() } else { "help".to_string() }
    } else {
        positional.remove(0)
    };

    Ok(Options {
        command,
        positional,
        eval,
        format,
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("YCC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    output::init();
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{}: {}", output::error_label(), msg);
            process::exit(2);
        }
    };
    tracing::debug!(command = %opts.command, format = ?opts.format, "starting");

    match opts.command.as_str() {
        "lex" => commands::phase::cmd_lex(&input_for(&opts, "lex"), opts.format),
        "parse" => commands::phase::cmd_parse(&input_for(&opts, "parse"), opts.format),
        "explain" => commands::explain::cmd_explain(opts.positional.first().map(String::as_str)),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("ycc {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("{}: unknown command: {}", output::error_label(), other);
            print_usage();
            process::exit(2);
        }
    }
}

/// The program for `lex`/`parse`: `--eval` text or the first file argument.
fn input_for(opts: &Options, command: &str) -> Input {
    if let Some(ref source) = opts.eval {
        return Input::Inline(source.clone());
    }
    match opts.positional.first() {
        Some(path) => Input::File(path.clone()),
        None => {
            eprintln!("Usage: ycc {} <file> | ycc {} -e '<program>'", command, command);
            process::exit(2);
        }
    }
}

fn print_usage() {
    println!("{} {}", output::title("ycc"), env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", output::section_header("Usage:"));
    println!("  ycc <command> [{}] [--format human|json]", output::arg("file | -e <program>"));
    println!();
    println!("{}", output::section_header("Commands:"));
    println!("  {}   Tokenize a program and print the tokens", output::command("lex"));
    println!("  {} Parse a program and print statements and frame size", output::command("parse"));
    println!("  {} Describe an error code, or list all codes", output::command("explain"));
    println!("  {}    Show this help", output::command("help"));
    println!("  {} Show version", output::command("version"));
    println!();
    println!("{}", output::section_header("Environment:"));
    println!("  {}  Log filter, e.g. YCC_LOG=debug", output::arg("YCC_LOG"));
    println!("  {} Disable colors", output::arg("NO_COLOR"));
}

/// Print diagnostics in the requested format.
pub fn show_diagnostics(
    diags: &[Diagnostic],
    source: &str,
    file: &str,
    phase: &str,
    format: Format,
) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(file);
            for diag in diags {
                eprint!("{}", formatter.format(diag));
            }
        }
        Format::Json => {
            let report = to_json_report(diags, source, file, phase);
            println!("{}", to_json_string(&report));
        }
    }
}
