//! Basic CLI E2E tests.
//!
//! Each test points `FOCUSLOG_DATA_DIR` at its own temp dir and runs the
//! built binary.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(dir, args, "")
}

fn run_cli_with_input(dir: &TempDir, args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focuslog"))
        .args(args)
        .env("FOCUSLOG_DATA_DIR", dir.path())
        .env_remove("FOCUSLOG_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

#[test]
fn test_settings_defaults() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["settings", "list"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["workDuration"], 1500);
    assert_eq!(json["breakDuration"], 300);
    assert_eq!(json["notifications"], true);
    assert!(json["userId"].as_str().unwrap().starts_with("focuslog-"));
}

#[test]
fn test_settings_set_and_get() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["settings", "set", "work_duration", "3000"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(&dir, &["settings", "get", "workDuration"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3000");
}

#[test]
fn test_settings_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["settings", "set", "workDuration", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(&dir, &["settings", "set", "autoStartBreaks", "maybe"]);
    assert_ne!(code, 0);

    let (code, _, _) = run_cli(&dir, &["settings", "get", "volume"]);
    assert_ne!(code, 0);

    let (_, stdout, _) = run_cli(&dir, &["settings", "get", "workDuration"]);
    assert_eq!(stdout.trim(), "1500");
}

#[test]
fn test_settings_reset() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["settings", "set", "breakDuration", "600"]);
    let (code, _, _) = run_cli(&dir, &["settings", "reset"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(&dir, &["settings", "get", "breakDuration"]);
    assert_eq!(stdout.trim(), "300");
}

#[test]
fn test_owner_identity_is_stable() {
    let dir = TempDir::new().unwrap();
    let (_, first, _) = run_cli(&dir, &["settings", "get", "userId"]);
    let (_, second, _) = run_cli(&dir, &["settings", "get", "userId"]);
    assert_eq!(first, second);
    assert!(first.trim().starts_with("focuslog-"));
}

#[test]
fn test_stats_json_empty() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["stats", "--json", "--range", "week"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["totalWorkTime"], 0);
    assert_eq!(json["productivityScore"], 0);
    assert!(json["mostProductiveDay"].is_null());
}

#[test]
fn test_stats_rejects_unknown_range() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["stats", "--range", "decade"]);
    assert_ne!(code, 0);
}

#[test]
fn test_run_records_session() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli_with_input(
        &dir,
        &["run", "--json"],
        "note first draft\nstop\nquit\n",
    );
    assert_eq!(code, 0);

    let types: Vec<String> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(types.first().map(String::as_str), Some("SessionStarted"));
    assert!(types.iter().any(|t| t == "NoteUpdated"));
    assert!(types.iter().any(|t| t == "SessionStopped"));

    let (code, stdout, _) = run_cli(&dir, &["entries", "--json"]);
    assert_eq!(code, 0);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["type"], "work");
    assert_eq!(entries[0]["notes"], "first draft");
    assert!(entries[0]["endTime"].is_string());
}

#[test]
fn test_run_idle_quit_records_nothing() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli_with_input(&dir, &["run", "--idle", "--json"], "quit\n");
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(&dir, &["entries", "--json"]);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(entries.as_array().unwrap().is_empty());
}

#[test]
fn test_export_has_header() {
    let dir = TempDir::new().unwrap();
    run_cli_with_input(&dir, &["run", "--json"], "stop\n");

    let (code, stdout, _) = run_cli(&dir, &["export"]);
    assert_eq!(code, 0);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Start Time,End Time,Duration (minutes),Type,Notes")
    );
    let row = lines.next().unwrap();
    assert!(row.ends_with(",0,work,"), "unexpected row: {row}");
}

#[test]
fn test_export_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("sessions.csv");
    let (code, _, _) = run_cli(&dir, &["export", "--output", out.to_str().unwrap()]);
    assert_eq!(code, 0);

    let content = std::fs::read_to_string(out).unwrap();
    assert!(content.starts_with("Date,Start Time"));
}

#[test]
fn test_clear_keeps_settings() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["settings", "set", "workDuration", "600"]);
    run_cli_with_input(&dir, &["run", "--json"], "stop\n");

    let (code, stdout, _) = run_cli(&dir, &["clear", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1 entries removed"));

    let (_, stdout, _) = run_cli(&dir, &["entries", "--json"]);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(entries.as_array().unwrap().is_empty());

    let (_, stdout, _) = run_cli(&dir, &["settings", "get", "workDuration"]);
    assert_eq!(stdout.trim(), "600");
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("focuslog"));
}
