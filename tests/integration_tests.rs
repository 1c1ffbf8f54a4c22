//! Integration tests for the docpath CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn docpath() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("docpath"))
}

#[test]
fn test_get_scalar() {
    docpath()
        .args(["get", "tests/fixtures/doc_old.json", "meta/version"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_get_subtree_as_yaml() {
    docpath()
        .args(["get", "tests/fixtures/doc_old.json", "meta", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("author: Clerk"));
}

#[test]
fn test_get_missing_path_exit_2() {
    docpath()
        .args(["get", "tests/fixtures/doc_old.json", "meta/missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Path 'meta/missing' not found"));
}

#[test]
fn test_get_empty_path_strict() {
    docpath()
        .args(["--strict-paths", "get", "tests/fixtures/doc_old.json", "/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid path"));
}

#[test]
fn test_set_prints_new_document() {
    docpath()
        .args(["set", "tests/fixtures/doc_old.json", "meta/reviewer/name", r#""Scribe""#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""reviewer": {"#))
        .stdout(predicate::str::contains(r#""name": "Scribe""#));
}

#[test]
fn test_set_write_back_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.yaml");
    fs::copy("tests/fixtures/doc.yaml", &path).unwrap();

    docpath()
        .arg("set")
        .arg(&path)
        .args(["meta/version", "-3", "--write"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("version: -3"));
    assert!(written.contains("author: Clerk"));
}

#[test]
fn test_delete_missing_exit_2() {
    docpath()
        .args(["delete", "tests/fixtures/doc_old.json", "title/sub"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_delete_key() {
    docpath()
        .args(["delete", "tests/fixtures/doc_old.json", "seal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seal").not());
}

#[test]
fn test_merge_payload() {
    docpath()
        .args(["merge", "tests/fixtures/doc_old.json", "tests/fixtures/payload.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""synced": true"#))
        .stdout(predicate::str::contains(r#""source": "archive""#))
        .stdout(predicate::str::contains("author").not());
}

#[test]
fn test_merge_non_object_payload_leaves_document() {
    docpath()
        .args(["merge", "tests/fixtures/doc.yaml", "tests/fixtures/array_root.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("author: Clerk"));
}

#[test]
fn test_diff_identical_exit_0() {
    docpath()
        .args([
            "diff",
            "tests/fixtures/doc_old.json",
            "tests/fixtures/doc_reordered.json",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_diff_plain_exit_1() {
    docpath()
        .args([
            "diff",
            "tests/fixtures/doc_old.json",
            "tests/fixtures/doc_new.json",
            "-f",
            "plain",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("+ signed_by: \"Queen\""))
        .stdout(predicate::str::contains("- seal: true"))
        .stdout(predicate::str::contains("~ meta/version: 1 -> 2"))
        .stdout(predicate::str::contains("Summary: 1 added, 1 removed, 1 changed"));
}

#[test]
fn test_diff_quiet_hides_summary() {
    docpath()
        .args([
            "diff",
            "tests/fixtures/doc_old.json",
            "tests/fixtures/doc_new.json",
            "-f",
            "plain",
            "-q",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary").not());
}

#[test]
fn test_diff_json_output() {
    let output = docpath()
        .args([
            "diff",
            "tests/fixtures/doc_old.json",
            "tests/fixtures/doc_new.json",
            "-f",
            "json",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["added"]["signed_by"], "Queen");
    assert_eq!(value["removed"]["seal"], true);
    assert_eq!(value["changed"]["meta/version"]["old"], 1);
    assert_eq!(value["changed"]["meta/version"]["new"], 2);
}

#[test]
fn test_diff_across_formats() {
    docpath()
        .args(["diff", "tests/fixtures/doc.yaml", "tests/fixtures/doc.toml"])
        .assert()
        .code(0);
}

#[test]
fn test_diff_non_object_root_exit_2() {
    docpath()
        .args([
            "diff",
            "tests/fixtures/array_root.json",
            "tests/fixtures/doc_old.json",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected object"));
}

#[test]
fn test_file_not_found_exit_2() {
    docpath()
        .args(["get", "tests/fixtures/nonexistent.json", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_get_from_stdin() {
    docpath()
        .args(["get", "-", "a/b"])
        .write_stdin(r#"{"a": {"b": "piped"}}"#)
        .assert()
        .success()
        .stdout("\"piped\"\n");
}
