// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for the `ycc` binary.
//! Each test runs the built binary on a small program and checks its
//! output and exit status.

use std::io::Write;
use std::process::{Command, Output};

fn ycc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ycc"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("YCC_LOG")
        .output()
        .expect("failed to run ycc")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Write `source` to a temp file that lives as long as the returned handle.
fn program_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".c")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(source.as_bytes()).expect("failed to write program");
    file
}

#[test]
fn parse_file_prints_statements_and_frame_size() {
    let file = program_file("a = 1;\nb = a * 2;\nreturn a + b;\n");
    let out = ycc(&["parse", file.path().to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("  1: (= (lvar 8) 1)"), "{text}");
    assert!(text.contains("  2: (= (lvar 16) (* (lvar 8) 2))"), "{text}");
    assert!(text.contains("  3: (return (+ (lvar 8) (lvar 16)))"), "{text}");
    assert!(text.contains("frame size: 16"), "{text}");
    assert!(text.contains("Parse: 3 statements OK"), "{text}");
}

#[test]
fn eval_parses_inline_program() {
    let out = ycc(&["-e", "1 - 2 - 3;"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("(- (- 1 2) 3)"), "{text}");
    assert!(text.contains("frame size: 0"), "{text}");
}

#[test]
fn lex_lists_tokens_and_eof() {
    let out = ycc(&["lex", "--eval", "x<=10;"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Tokens (5)"), "{text}");
    assert!(text.contains("Ident x"), "{text}");
    assert!(text.contains("LtEq <="), "{text}");
    assert!(text.contains("Int(10) 10"), "{text}");
    assert!(text.contains("Eof"), "{text}");
}

#[test]
fn lex_json_output() {
    let out = ycc(&["lex", "-e", "return 7;", "--format", "json"]);
    assert!(out.status.success());
    let tokens: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let tokens = tokens.as_array().unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["kind"], "Return");
    assert_eq!(tokens[1]["kind"], "Int(7)");
    assert_eq!(tokens[1]["start"], 7);
    assert_eq!(tokens[3]["kind"], "Eof");
}

#[test]
fn parse_json_output() {
    let out = ycc(&["parse", "-e", "a = 1; b = 2;", "--format", "json"]);
    assert!(out.status.success());
    let program: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(program["frame_size"], 16);
    assert_eq!(program["stmts"].as_array().unwrap().len(), 2);
}

#[test]
fn missing_semicolon_fails_with_diagnostic() {
    let file = program_file("a = 1\n");
    let path = file.path().to_str().unwrap().to_string();
    let out = ycc(&["parse", &path]);
    assert_eq!(out.status.code(), Some(1));

    let err = stderr(&out);
    assert!(err.contains("error[E0101]"), "{err}");
    assert!(err.contains(&format!("--> {}:2:1", path)), "{err}");
    assert!(err.contains("Parse FAILED: 1 error"), "{err}");
}

#[test]
fn chained_comparison_is_rejected() {
    let out = ycc(&["parse", "-e", "1 < 2 < 3;"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error[E0101]"), "{err}");
    assert!(err.contains("<inline>:1:7"), "{err}");
}

#[test]
fn unknown_character_is_a_lex_error() {
    let out = ycc(&["parse", "-e", "a = 1 @ 2;"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error[E0001]"), "{err}");
    assert!(err.contains("Lex FAILED: 1 error"), "{err}");
}

#[test]
fn errors_as_json_report() {
    let out = ycc(&["parse", "-e", "(1 + 2;", "--format", "json"]);
    assert_eq!(out.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["success"], false);
    assert_eq!(report["phase"], "parse");
    assert_eq!(report["error_count"], 1);
    assert_eq!(report["diagnostics"][0]["code"], "E0101");
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.c");
    let out = ycc(&["parse", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("reading"));
}

#[test]
fn explain_known_and_unknown_codes() {
    let out = ycc(&["explain", "e0102"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("E0102: expected a number"));

    let out = ycc(&["explain"]);
    assert!(out.status.success());
    let text = stdout(&out);
    for code in ["E0001", "E0004", "E0101", "E0102"] {
        assert!(text.contains(code), "{text}");
    }

    let out = ycc(&["explain", "E9999"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_command_exits_with_usage_error() {
    let out = ycc(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("unknown command"));
}

#[test]
fn deep_nesting_is_reported_not_fatal() {
    let source = format!("{}1{};", "(".repeat(5000), ")".repeat(5000));
    let file = program_file(&source);
    let out = ycc(&["parse", file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error[E0103]"), "{err}");
    assert!(err.contains("= note: '(' and '=' nest at most 128 levels deep"), "{err}");
}

#[test]
fn unclosed_paren_is_labelled() {
    let out = ycc(&["parse", "-e", "(1 + 2;"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("| unclosed '(' opened here"));
}
