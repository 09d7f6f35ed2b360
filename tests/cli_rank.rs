//! Integration tests for the `quickpick rank` command line.
//!
//! These run the built binary against a small fixture file, with colors
//! off and a config path that does not exist so user settings never leak in.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

static FIXTURE_DIR: OnceLock<PathBuf> = OnceLock::new();

const FRUITS: &str = "apple\tred\napply\tblue\nbanana\tyellow\n";

/// Get or create the test fixture directory (singleton)
fn get_fixture_dir() -> PathBuf {
    FIXTURE_DIR.get_or_init(create_fixture_dir).clone()
}

fn create_fixture_dir() -> PathBuf {
    let dir = std::env::temp_dir()
        .join("quickpick_test_fixtures")
        .join(format!("test_{}", std::process::id()));

    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create fixture dir");

    fs::write(dir.join("fruits.tsv"), FRUITS).unwrap();
    fs::write(
        dir.join("fruits.jsonl"),
        concat!(
            "{\"name\": \"apple\", \"color\": \"red\", \"stock\": 4}\n",
            "{\"name\": \"apply\", \"color\": \"blue\"}\n",
            "{\"name\": \"banana\", \"color\": \"yellow\", \"stock\": 12}\n",
        ),
    )
    .unwrap();

    dir
}

fn fixture(name: &str) -> String {
    get_fixture_dir().join(name).display().to_string()
}

fn missing_config() -> String {
    get_fixture_dir().join("no-such-config.json").display().to_string()
}

/// Run `quickpick rank` with colors off and no user config
fn run_rank(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quickpick"))
        .arg("rank")
        .args(args)
        .args(["--color", "never", "--config", &missing_config()])
        .output()
        .expect("Failed to run quickpick")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_rank_prints_coded_rows() {
    let output = run_rank(&["app", &fixture("fruits.tsv"), "--strategy", "char-count"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "A  apple  red\nB  apply  blue\n");
}

#[test]
fn test_rank_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_quickpick"))
        .args(["rank", "ban", "--color", "never", "--config", &missing_config()])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run quickpick");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(FRUITS.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "A  banana  yellow\n");
}

#[test]
fn test_rank_fast_select_prints_original_line() {
    let output = run_rank(&["app/b", &fixture("fruits.tsv")]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "apply\tblue\n");
}

#[test]
fn test_rank_column_filters() {
    let output = run_rank(&["ap|blu", &fixture("fruits.tsv")]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().next(), Some("A  apply  blue"));
}

#[test]
fn test_rank_limit() {
    let output = run_rank(&["a", &fixture("fruits.tsv"), "--limit", "1"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().count(), 1);
}

#[test]
fn test_rank_json_output() {
    let output = run_rank(&["app", &fixture("fruits.tsv"), "--json", "--strategy", "char-count"]);
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["code"], "A");
    assert_eq!(rows[0]["columns"][0]["id"], "col1");
    assert_eq!(rows[0]["columns"][0]["text"], "apple");
    assert_eq!(rows[1]["columns"][1]["text"], "blue");
}

#[test]
fn test_rank_json_lines_input() {
    let output = run_rank(&[
        "ban",
        &fixture("fruits.jsonl"),
        "--format",
        "json-lines",
        "--columns",
        "name,stock",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "A  banana  12\n");
}

#[test]
fn test_rank_json_lines_needs_columns() {
    let output = run_rank(&["ban", &fixture("fruits.jsonl"), "--format", "json-lines"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--columns"));
}

#[test]
fn test_rank_no_search_column_is_not_matched() {
    let output = run_rank(&["yel", &fixture("fruits.tsv"), "--no-search", "col2"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_rank_unknown_no_search_column() {
    let output = run_rank(&["a", &fixture("fruits.tsv"), "--no-search", "price"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("price"));
}

#[test]
fn test_rank_no_matches_exits_one() {
    let output = run_rank(&["qqq", &fixture("fruits.tsv")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_rank_rejects_oversized_code_width() {
    let output = run_rank(&["app", &fixture("fruits.tsv"), "--min-code-width", "100000"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--min-code-width"));
}

#[test]
fn test_rank_wide_codes_still_select() {
    let output = run_rank(&["app", &fixture("fruits.tsv"), "--min-code-width", "3", "--strategy", "char-count"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "AAA  apple  red\nAAB  apply  blue\n");

    let output = run_rank(&["app/aab", &fixture("fruits.tsv"), "--min-code-width", "3"]);
    assert_eq!(stdout_of(&output), "apply\tblue\n");
}

#[test]
fn test_rank_rejects_non_whitespace_separator() {
    let config = get_fixture_dir().join("dash-separator.json");
    fs::write(&config, r#"{ "column_separator": "-" }"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_quickpick"))
        .args(["rank", "e-r", &fixture("fruits.tsv"), "--color", "never"])
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run quickpick");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("column_separator"));
}
