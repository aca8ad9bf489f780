//! Integration tests for the `tick` CLI.
//!
//! Each test runs `tick` as a subprocess against a task file in a temp
//! directory and verifies stdout and/or the file contents.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `tick` binary.
fn tick_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tick");
    path
}

fn tick(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let file = dir.path().join("tasks.json");
    Command::new(tick_bin())
        .arg("-f")
        .arg(&file)
        .args(args)
        .output()
        .expect("failed to run tick")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn add_creates_the_task_file() {
    let dir = TempDir::new().unwrap();
    let output = tick(&dir, &["add", "Buy milk"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("added 'Buy milk' (Medium)"));

    let content = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(content.contains("\"Buy milk\""));
    assert!(content.contains("\"Pending\""));
}

#[test]
fn add_rejects_empty_text() {
    let dir = TempDir::new().unwrap();
    let output = tick(&dir, &["add", "   "]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("task cannot be empty"));
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn list_shows_sorted_display_order() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "Buy milk"]);
    tick(&dir, &["add", "Fix bug", "--priority", "high"]);

    let output = tick(&dir, &["list"]);
    let out = stdout(&output);
    let fix = out.find("Fix bug").expect("Fix bug missing");
    let milk = out.find("Buy milk").expect("Buy milk missing");
    assert!(fix < milk, "High priority should list first:\n{out}");
}

#[test]
fn done_and_fav_toggle_by_display_position() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "Buy milk"]);
    tick(&dir, &["add", "Fix bug", "--priority", "high"]);

    // position 1 is "Fix bug"
    let output = tick(&dir, &["done", "1"]);
    assert!(stdout(&output).contains("'Fix bug' is now Completed"));

    // favorite "Buy milk"; it moves to position 1
    let output = tick(&dir, &["fav", "2"]);
    assert!(stdout(&output).contains("'Buy milk' is now favorite"));

    let output = tick(&dir, &["list"]);
    let out = stdout(&output);
    let milk = out.find("Buy milk").unwrap();
    let fix = out.find("Fix bug").unwrap();
    assert!(milk < fix, "favorite should list first:\n{out}");
}

#[test]
fn favorites_only_listing() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "plain"]);
    tick(&dir, &["add", "starred"]);
    tick(&dir, &["fav", "2"]); // "starred" sorts after "plain"

    let output = tick(&dir, &["list", "--favorites"]);
    let out = stdout(&output);
    assert!(out.contains("starred"));
    assert!(!out.contains("plain"));
}

#[test]
fn edit_rewrites_text_and_priority() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "draft mail"]);
    let output = tick(&dir, &["edit", "1", "send mail", "--priority", "high"]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(content.contains("\"send mail\""));
    assert!(content.contains("\"High\""));
    assert!(!content.contains("draft mail"));
}

#[test]
fn delete_with_yes_removes_the_task() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "Buy milk"]);
    tick(&dir, &["add", "Fix bug", "--priority", "high"]);

    let output = tick(&dir, &["delete", "1", "--yes"]);
    assert!(stdout(&output).contains("deleted 'Fix bug'"));

    let content = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(content.contains("Buy milk"));
    assert!(!content.contains("Fix bug"));
}

#[test]
fn out_of_range_position_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let output = tick(&dir, &["done", "3"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("select a task"));
}

#[test]
fn json_listing_has_display_fields() {
    let dir = TempDir::new().unwrap();
    tick(&dir, &["add", "Fix bug", "--priority", "high"]);

    let output = tick(&dir, &["list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["text"], "Fix bug");
    assert_eq!(rows[0]["priority"], "High");
    assert_eq!(rows[0]["status"], "Pending");
    assert_eq!(rows[0]["favorite"], false);
    assert_eq!(rows[0]["position"], 1);
}

#[test]
fn corrupt_task_file_is_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tasks.json"), "{{{ not json").unwrap();
    let output = tick(&dir, &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no tasks"));
}
