//! E2E CLI tests covering comment workflows:
//! - `gs comment add`, `gs comment rm`, `gs comments`
//! - persistence in the local storage file across invocations
//! - validation of empty bodies and unknown articles
//! - best-effort storage (corrupt file, quota, storage override)
//!
//! Each test runs `gs` as a subprocess in an isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const ARTICLE: &str = "edge-compute-patterns";

fn gs_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gs"));
    cmd.current_dir(dir);
    cmd.env("GRIDSPHERE_LOG", "error");
    cmd.env_remove("GRIDSPHERE_STORAGE");
    cmd.env_remove("FORMAT");
    cmd
}

fn add_comment(dir: &Path, body: &str, name: &str) -> Value {
    let output = gs_cmd(dir)
        .args(["comment", "add", ARTICLE, body, "--name", name, "--json"])
        .output()
        .expect("comment add should not crash");
    assert!(
        output.status.success(),
        "comment add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn list_comments(dir: &Path) -> Vec<Value> {
    let output = gs_cmd(dir)
        .args(["comments", ARTICLE, "--json"])
        .output()
        .expect("comments should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["comments"].as_array().expect("comments array").clone()
}

#[test]
fn added_comment_round_trips_through_storage() {
    let dir = TempDir::new().expect("tempdir");
    let added = add_comment(dir.path(), "  Great overview  ", " Ada ");
    assert_eq!(added["ok"], true);
    let comment = &added["comment"];
    assert_eq!(comment["name"], "Ada");
    assert_eq!(comment["text"], "Great overview");

    let listed = list_comments(dir.path());
    assert_eq!(listed.len(), 1);
    assert_eq!(&listed[0], comment);

    let raw = std::fs::read_to_string(dir.path().join(".gridsphere/local-storage.json"))
        .expect("storage file written");
    let stored: Value = serde_json::from_str(&raw).expect("storage is JSON");
    let thread = stored["comments:edge-compute-patterns"]
        .as_str()
        .expect("thread stored as string");
    let thread: Value = serde_json::from_str(thread).expect("thread is JSON");
    assert_eq!(thread[0]["id"], comment["id"]);
}

#[test]
fn newest_comment_is_listed_first() {
    let dir = TempDir::new().expect("tempdir");
    add_comment(dir.path(), "first", "Ada");
    add_comment(dir.path(), "second", "Grace");

    let texts: Vec<String> = list_comments(dir.path())
        .iter()
        .map(|c| c["text"].as_str().expect("text").to_string())
        .collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[test]
fn blank_name_is_anonymous() {
    let dir = TempDir::new().expect("tempdir");
    let added = add_comment(dir.path(), "hello", "");
    assert_eq!(added["comment"]["name"], "Anonymous");
}

#[test]
fn empty_body_is_rejected_and_nothing_is_stored() {
    let dir = TempDir::new().expect("tempdir");
    gs_cmd(dir.path())
        .args(["comment", "add", ARTICLE, "   ", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));
    assert!(list_comments(dir.path()).is_empty());
    assert!(!dir.path().join(".gridsphere/local-storage.json").exists());
}

#[test]
fn comment_on_unknown_article_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    gs_cmd(dir.path())
        .args(["comment", "add", "missing-id", "hello", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));

    gs_cmd(dir.path())
        .args(["comments", "missing-id", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn remove_deletes_only_the_named_comment() {
    let dir = TempDir::new().expect("tempdir");
    let keep = add_comment(dir.path(), "keep", "Ada");
    let drop = add_comment(dir.path(), "drop", "Ada");
    let drop_id = drop["comment"]["id"].as_str().expect("id");

    let output = gs_cmd(dir.path())
        .args(["comment", "rm", ARTICLE, drop_id, "--json"])
        .output()
        .expect("rm should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["removed"], true);

    let listed = list_comments(dir.path());
    assert_eq!(listed, vec![keep["comment"].clone()]);
}

#[test]
fn removing_last_comment_clears_the_storage_key() {
    let dir = TempDir::new().expect("tempdir");
    let only = add_comment(dir.path(), "short lived", "Ada");
    let id = only["comment"]["id"].as_str().expect("id");

    gs_cmd(dir.path())
        .args(["comment", "rm", ARTICLE, id, "--json"])
        .assert()
        .success();

    let raw = std::fs::read_to_string(dir.path().join(".gridsphere/local-storage.json"))
        .expect("storage file kept");
    let stored: Value = serde_json::from_str(&raw).expect("storage is JSON");
    assert!(stored.get("comments:edge-compute-patterns").is_none());
    assert!(list_comments(dir.path()).is_empty());
}

#[test]
fn removing_unknown_comment_is_a_no_op() {
    let dir = TempDir::new().expect("tempdir");
    add_comment(dir.path(), "stay", "Ada");

    let output = gs_cmd(dir.path())
        .args(["comment", "rm", ARTICLE, "no-such-id", "--json"])
        .output()
        .expect("rm should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["removed"], false);
    assert_eq!(list_comments(dir.path()).len(), 1);
}

#[test]
fn threads_are_per_article() {
    let dir = TempDir::new().expect("tempdir");
    add_comment(dir.path(), "only here", "Ada");

    let output = gs_cmd(dir.path())
        .args(["comments", "accessible-3d-ux", "--json"])
        .output()
        .expect("comments should not crash");
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["comments"], Value::Array(vec![]));
}

#[test]
fn article_page_shows_thread() {
    let dir = TempDir::new().expect("tempdir");
    add_comment(dir.path(), "visible on page", "Ada");
    gs_cmd(dir.path())
        .args(["article", ARTICLE, "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments (1)"))
        .stdout(predicate::str::contains("Ada: visible on page"));
}

#[test]
fn corrupt_storage_reads_as_empty_and_is_overwritten() {
    let dir = TempDir::new().expect("tempdir");
    let store = dir.path().join(".gridsphere");
    std::fs::create_dir_all(&store).expect("create dir");
    std::fs::write(store.join("local-storage.json"), "not json at all").expect("write");

    assert!(list_comments(dir.path()).is_empty());
    add_comment(dir.path(), "fresh start", "Ada");
    assert_eq!(list_comments(dir.path()).len(), 1);
}

#[test]
fn quota_exceeded_still_reports_comment_but_does_not_persist() {
    let dir = TempDir::new().expect("tempdir");
    let project = dir.path().join(".gridsphere");
    std::fs::create_dir_all(&project).expect("create dir");
    std::fs::write(project.join("config.toml"), "[storage]\nquota_bytes = 8\n").expect("write");

    let added = add_comment(dir.path(), "too large for the quota", "Ada");
    assert_eq!(added["ok"], true);
    assert!(list_comments(dir.path()).is_empty());
}

#[test]
fn storage_env_overrides_location() {
    let dir = TempDir::new().expect("tempdir");
    gs_cmd(dir.path())
        .env("GRIDSPHERE_STORAGE", "elsewhere.json")
        .args(["comment", "add", ARTICLE, "relocated", "--json"])
        .assert()
        .success();

    assert!(dir.path().join("elsewhere.json").exists());
    assert!(!dir.path().join(".gridsphere/local-storage.json").exists());
}
