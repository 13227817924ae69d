//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_chorely-cli"))
        .args(args)
        .env("CHORELY_DATA_DIR", dir)
        .env_remove("CHORELY_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn json(dir: &Path, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&ok(dir, args)).expect("valid JSON output")
}

#[test]
fn test_empty_board() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(json(dir.path(), &["board", "--json"]), serde_json::json!([]));
    assert!(dir.path().join("chores.json").exists());
    assert!(dir.path().join("people.json").exists());
    assert!(dir.path().join("history.json").exists());
}

#[test]
fn test_complete_chore_credits_points() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["person", "add", "Alice"]);
    ok(d, &["chore", "add", "Dishes", "--area", "Kitchen", "--points", "3", "--every", "daily"]);

    let out = ok(d, &["chore", "done", "Dishes", "--person", "Alice"]);
    assert!(out.contains("+3 points, now 3"), "{out}");

    let people = json(d, &["person", "list", "--json"]);
    assert_eq!(people[0]["name"], "Alice");
    assert_eq!(people[0]["points"], 3);

    let board = json(d, &["board", "--json"]);
    assert_eq!(board[0]["area"], "Kitchen");
    assert_eq!(board[0]["chores"][0]["urgency"]["state"], "due_soon");
}

#[test]
fn test_history_edit_moves_points() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["person", "add", "Alice"]);
    ok(d, &["person", "add", "Bob"]);
    ok(d, &["chore", "add", "Windows", "--points", "10"]);
    ok(d, &["chore", "done", "Windows", "--person", "Alice"]);

    ok(d, &["history", "edit", "0", "--person", "Bob", "--points", "4"]);

    let people = json(d, &["person", "list", "--json"]);
    assert_eq!(people[0]["points"], 0);
    assert_eq!(people[1]["points"], 4);

    let history = json(d, &["history", "list", "--person", "Bob", "--json"]);
    assert_eq!(history[0]["index"], 0);
    assert_eq!(history[0]["chore"], "Windows");

    let audit = ok(d, &["ledger", "audit"]);
    assert!(audit.contains("consistent"), "{audit}");

    ok(d, &["history", "rm", "0"]);
    let people = json(d, &["person", "list", "--json"]);
    assert_eq!(people[1]["points"], 0);
}

#[test]
fn test_duplicate_chore_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["chore", "add", "Dishes"]);
    let (_, stderr, code) = run_cli(d, &["chore", "add", "Dishes", "--area", "Kitchen"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"), "{stderr}");
}

#[test]
fn test_done_uses_selected_person() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["person", "add", "Alice"]);
    ok(d, &["chore", "add", "Vacuum"]);

    let (_, stderr, code) = run_cli(d, &["chore", "done", "Vacuum"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no person given"), "{stderr}");

    ok(d, &["person", "select", "Alice"]);
    assert_eq!(ok(d, &["config", "get", "default_person"]).trim(), "Alice");
    ok(d, &["chore", "done", "Vacuum"]);

    let (_, stderr, code) = run_cli(d, &["person", "rm", "Alice"]);
    assert_eq!(code, 1, "{stderr}");
}

#[test]
fn test_chore_edit_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["chore", "add", "Hoover", "--tags", "floor, weekly", "--step", "move chairs"]);
    ok(d, &["chore", "edit", "Hoover", "--rename", "Vacuum", "--days", "4"]);

    let shown = json(d, &["chore", "show", "Vacuum", "--json"]);
    assert_eq!(shown["chore"]["frequency_days"], 4);
    assert_eq!(shown["chore"]["tags"], serde_json::json!(["floor", "weekly"]));
    assert_eq!(shown["urgency"]["state"], "never_done");

    let (_, _, code) = run_cli(d, &["chore", "show", "Hoover"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_rejects_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    let (_, _, code) = run_cli(d, &["config", "set", "recent_limit", "lots"]);
    assert_eq!(code, 1);
    ok(d, &["config", "set", "recent_limit", "5"]);
    assert_eq!(ok(d, &["config", "get", "recent_limit"]).trim(), "5");
}

#[test]
fn test_broken_config_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["person", "add", "Alice"]);
    let broken = "recent_limit = \"many\"\nareas = [\"Garage\"]\n";
    std::fs::write(d.join("config.toml"), broken).unwrap();

    let (_, stderr, code) = run_cli(d, &["person", "select", "Alice"]);
    assert_eq!(code, 1, "{stderr}");
    assert_eq!(std::fs::read_to_string(d.join("config.toml")).unwrap(), broken);
}

#[test]
fn test_history_edit_rejects_out_of_range_points() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    ok(d, &["person", "add", "Alice"]);
    ok(d, &["chore", "add", "Dishes", "--points", "3"]);
    ok(d, &["chore", "done", "Dishes", "--person", "Alice"]);
    ok(d, &["chore", "done", "Dishes", "--person", "Alice"]);

    let (_, stderr, code) = run_cli(d, &["history", "edit", "0", "--points", "9223372036854775807"]);
    assert_eq!(code, 1, "{stderr}");
    assert!(stderr.contains("points"), "{stderr}");

    let (_, stderr, code) = run_cli(d, &["history", "edit", "0", "--person", ""]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid value for 'person'"), "{stderr}");

    let people = json(d, &["person", "list", "--json"]);
    assert_eq!(people[0]["points"], 6);
    assert!(ok(d, &["ledger", "audit"]).contains("consistent"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = ok(dir.path(), &["completions", "bash"]);
    assert!(out.contains("chorely-cli"));
}
