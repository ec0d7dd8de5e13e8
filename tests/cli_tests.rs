//! CLI integration tests.
//!
//! Tests the varjson commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &str) -> (i32, String, String) {
    let binary = env!("CARGO_BIN_EXE_varjson");
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn varjson at {}: {}", binary, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

// ============================================================================
// fmt
// ============================================================================

#[test]
fn cli_fmt_compact() {
    let (code, stdout, _) = run(&["fmt"], "{ \"a\" : 1 ,\n \"b\" : [ true , null ] }");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"a":1,"b":[true,null]}"#);
}

#[test]
fn cli_fmt_pretty() {
    let (code, stdout, _) = run(&["fmt", "--pretty"], r#"{"a":[1]}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), "{\n\t\"a\" : [\n\t\t1\n\t]\n}");
}

#[test]
fn cli_fmt_is_lenient() {
    let (code, stdout, _) = run(&["fmt"], r#"junk {"a":tru,"b":12abc"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"a":true,"b":12}"#);
}

#[test]
fn cli_fmt_without_root_writes_empty_object() {
    let (code, stdout, _) = run(&["fmt"], "[1,2,3]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), "{}");
}

#[test]
fn cli_fmt_comments() {
    let input = "{\n  // note\n  \"a\": 1\n}";
    let (code, stdout, _) = run(&["fmt", "--comments"], input);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"a":1}"#);
}

#[test]
fn cli_fmt_deep_input_truncated() {
    let input = format!("{{\"a\":{}0{}}}", "[".repeat(5_000), "]".repeat(5_000));
    let (code, stdout, _) = run(&["fmt"], &input);
    assert_eq!(code, 0);
    assert!(stdout.trim_end().ends_with("null]]]}"), "got: {}", stdout);
}

// ============================================================================
// check
// ============================================================================

#[test]
fn cli_check_ok() {
    let (code, stdout, _) = run(&["check"], r#"{"a":[1,2.5,"x"],"b":{}}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), "ok");
}

#[test]
fn cli_check_reports_error() {
    let (code, stdout, _) = run(&["check"], r#"{"a":1,}"#);
    assert_eq!(code, 1);
    assert_eq!(stdout.trim_end(), "error 3 UnexpectedToken: unexpected token '}'");
}

#[test]
fn cli_check_missing_root() {
    let (code, stdout, _) = run(&["check"], "[]");
    assert_eq!(code, 1);
    assert!(stdout.starts_with("error 1 MissingRootObject"), "got: {}", stdout);
}

#[test]
fn cli_check_max_depth() {
    let input = r#"{"a":{"b":{}}}"#;
    let (code, _, _) = run(&["check", "--max-depth", "3"], input);
    assert_eq!(code, 0);

    let (code, stdout, _) = run(&["check", "--max-depth", "2"], input);
    assert_eq!(code, 1);
    assert!(stdout.starts_with("error 6 NestingTooDeep"), "got: {}", stdout);
}

#[test]
fn cli_check_comments_flag() {
    let input = "{\"a\":1 /* c */}";
    let (code, _, _) = run(&["check"], input);
    assert_eq!(code, 1);
    let (code, _, _) = run(&["check", "--comments"], input);
    assert_eq!(code, 0);
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn cli_version() {
    let (code, stdout, _) = run(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("varjson v"));
}

#[test]
fn cli_without_command_prints_hint() {
    let (code, stdout, _) = run(&[], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Use --help"));
}

#[test]
fn cli_verbose_logs_to_stderr() {
    let (code, stdout, stderr) = run(&["--verbose", "fmt"], r#"{"a":1}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"a":1}"#);
    assert!(stderr.contains("parsing"), "stderr: {}", stderr);
}

#[test]
fn cli_unknown_command_fails() {
    let (code, _, _) = run(&["frobnicate"], "");
    assert_ne!(code, 0);
}
