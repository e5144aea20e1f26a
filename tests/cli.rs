//! Integration tests for the `approx-index` binary: output format and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp directory holding `old_file.dat` with the given content
fn fixture(content: &[u8]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("old_file.dat"), content).expect("Failed to write reference");
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_approx-index"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run approx-index")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_default_reference_exact_match() {
    let dir = fixture(b"AAAABBBBCCCCDDDDAAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n16\n");
}

#[test]
fn test_two_mismatches() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["AAAABBXXCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n");
}

#[test]
fn test_no_matches_is_success() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["WWWWXXXXYYYYZZZZ"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_bad_length_exits_1() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["AAAABBB"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("multiple of 4"));
}

#[test]
fn test_bad_length_checked_before_reference() {
    // No reference file at all: the query error still wins
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["ABCDE"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_reference_exits_8() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(8));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_explicit_reference_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("text.bin");
    fs::write(&path, b"xxxxAAAABBBBCCCCDDDD").unwrap();

    let output = run_in(
        dir.path(),
        &["--reference", path.to_str().unwrap(), "AAAABBBBCCCCDDDD"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "4\n");
}

#[test]
fn test_json_output() {
    let dir = fixture(b"AAAABBBBCCCCDDDDAAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--json", "AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["positions"], serde_json::json!([0, 16]));
    assert_eq!(value["query_len"], 16);
}

#[test]
fn test_hex_query() {
    let dir = fixture(b"\x00\x01\x02\x03\x04\x05\x06\x07");
    let output = run_in(dir.path(), &["--hex", "0001ff03"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n");
}

#[test]
fn test_min_query_len_enforced() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--min-query-len", "16", "AAAABBBB"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_windows_output() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--windows", "--color", "never", "AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), " 0:AAAA BBBB CCCC DDDD\n");
}

#[test]
fn test_stats_go_to_stderr() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--stats", "AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Index Statistics"));
}

#[test]
fn test_leading_dash_query() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["-AAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n");
}

#[test]
fn test_leading_dash_query_after_flags() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--json", "-q", "-AAABBBBCCCCDDD-"]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["positions"], serde_json::json!([0]));
}

#[test]
fn test_resource_exhaustion_exits_3() {
    let dir = fixture(b"AAAABBBBCCCCDDDD");
    let buckets = usize::MAX.to_string();
    let output = run_in(dir.path(), &["--buckets", &buckets, "AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of memory"));
}

#[test]
fn test_mmap_reference() {
    let dir = fixture(b"AAAABBBBCCCCDDDDAAAABBBBCCCCDDDD");
    let output = run_in(dir.path(), &["--mmap", "AAAABBBBCCCCDDDD"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0\n16\n");
}

#[test]
fn test_mmap_missing_reference_exits_8() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["--mmap", "AAAABBBBCCCCDDDD"]);
    assert_eq!(output.status.code(), Some(8));
}
