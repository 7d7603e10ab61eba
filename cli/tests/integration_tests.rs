use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_getopt-trace"))
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("failed to run getopt-trace")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write_config(dir: &TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("getopt.yaml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

#[test]
fn test_help_lists_subcommands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for subcommand in ["trace", "render", "check", "next"] {
        assert!(text.contains(subcommand), "missing {subcommand} in help");
    }
}

#[test]
fn test_render_rebuilds_tokens() {
    let output = run(&[
        "render", "--short", "ab:c::", "--", "-ab", "x", "-c", "file", "--", "-a",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-a\n-bx\n-c\nfile\n--\n-a\n");
}

#[test]
fn test_render_with_long_options() {
    let output = run(&[
        "render",
        "--short",
        "v",
        "--long",
        "verbose,output:",
        "--",
        "--verb",
        "--out",
        "a.txt",
        "input",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "--verbose\n--output=a.txt\ninput\n");
}

#[test]
fn test_trace_json() {
    let output = run(&["trace", "--short", "a", "--", "-a", "foo"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "option");
    assert_eq!(items[0]["name"]["short"], "a");
    assert_eq!(items[1]["type"], "plain");
    assert_eq!(items[1]["token"], "foo");
}

#[test]
fn test_trace_reports_unknown_option() {
    let output = run(&[
        "trace",
        "--short",
        "a",
        "--program-name",
        "test",
        "--",
        "-x",
    ]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("test: unknown option - -x"));
    let value = json(&output);
    assert_eq!(value["items"][0]["type"], "error");
    assert_eq!(value["items"][0]["error"], "unknown_option");
}

#[test]
fn test_trace_legacy_diagnostics() {
    let output = run(&[
        "trace",
        "--long",
        "foo",
        "--program-name",
        "test",
        "--legacy-diagnostics",
        "--",
        "--foo=bar",
    ]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("test: option doesn't take an argument - foo"));
}

#[test]
fn test_trace_table_format() {
    let output = run(&[
        "trace", "--short", "o:", "--format", "table", "--", "-o", "out", "--", "x",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("KIND"));
    assert!(lines[1].starts_with("short_required_argument"));
    assert!(lines[1].ends_with("out"));
    assert!(lines[2].starts_with("end_of_options"));
    assert!(lines[3].starts_with("plain"));
}

#[test]
fn test_trace_yaml_format() {
    let output = run(&["trace", "--short", "a", "--format", "yaml", "--", "-a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("type: option"));
}

#[test]
fn test_trace_permute_moves_plain_arguments_last() {
    let output = run(&[
        "render", "--short", "ab", "--permute", "--", "x", "-a", "y", "-b",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-a\n-b\nx\ny\n");
}

#[test]
fn test_next_parses_one_option() {
    let output = run(&["next", "--short", "a:", "--", "-a", "value", "rest"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["outcome"], "parsed");
    assert_eq!(value["option"]["value"], "value");
    assert_eq!(value["remaining"], serde_json::json!(["rest"]));
}

#[test]
fn test_next_permute() {
    let output = run(&[
        "next", "--short", "a", "--permute", "--", "foo", "-a", "bar",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["outcome"], "parsed");
    assert_eq!(value["remaining"], serde_json::json!(["foo", "bar"]));
}

#[test]
fn test_next_plain_leaves_arguments() {
    let output = run(&["next", "--short", "a", "--", "foo", "-a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["outcome"], "plain");
    assert_eq!(value["remaining"], serde_json::json!(["foo", "-a"]));
}

#[test]
fn test_next_error_outcome() {
    let output = run(&[
        "next",
        "--short",
        "a:",
        "--program-name",
        "test",
        "--",
        "-a",
    ]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("test: option requires an argument - -a"));
    let value = json(&output);
    assert_eq!(value["outcome"], "error");
    assert_eq!(value["error"]["error"], "argument_required");
}

#[test]
fn test_config_file_raises_errors() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "raise_on_error: true\n");
    let output = run(&[
        "next",
        "--short",
        "a",
        "--config",
        config.to_str().unwrap(),
        "--",
        "-x",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: unknown option - -x"));
}

#[test]
fn test_config_file_disables_abbreviation() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "abbreviation: false\nreport_diagnostics: false\n");
    let output = run(&[
        "next",
        "--long",
        "verbose",
        "--config",
        config.to_str().unwrap(),
        "--",
        "--verb",
    ]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty());
    let value = json(&output);
    assert_eq!(value["outcome"], "error");
    assert_eq!(value["error"]["error"], "unknown_option");
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");
    let output = run(&[
        "trace",
        "--config",
        missing.to_str().unwrap(),
        "--",
        "-a",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

#[test]
fn test_check_accepts_valid_specs() {
    let output = run(&["check", "--short", "ab:c::", "--long", "verbose,output:"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "Specification OK: 3 short option(s), 2 long option(s)."
    );
}

#[test]
fn test_check_reports_problems() {
    let output = run(&["check", "--short", "aa:", "--long", "foo:::"]);
    assert!(!output.status.success());
    let text = stderr(&output);
    assert!(text.contains("duplicate short option: -a"));
    assert!(text.contains("invalid arity suffix for long option: foo:::"));
    assert!(text.contains("error: 2 problem(s) in option specification"));
}

#[test]
fn test_invalid_long_spec_is_rejected() {
    let output = run(&["trace", "--long", "foo,foo", "--", "--foo"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid long options: duplicate long option: --foo"));
}

#[test]
fn test_render_permute_keeps_end_of_options() {
    let output = run(&[
        "render", "--short", "a", "--permute", "--", "x", "-a", "y", "--", "-a",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-a\n--\nx\ny\n-a\n");
}

#[test]
fn test_render_empty_short_value_as_separate_token() {
    let output = run(&["render", "--short", "o:", "--", "-o", "", "file"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "-o\n\nfile\n");
}
