use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("checklist-{nanos}-{file_name}"))
}

fn run_one_shot(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let config_path = temp_path("cli-smoke-config.json");
    Command::new(exe)
        .args(args)
        .env("CHECKLIST_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run command")
}

#[test]
fn add_command_succeeds() {
    let output = run_one_shot(&["add", "demo task"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: demo task (#0)"));
}

#[test]
fn add_command_rejects_missing_label() {
    let output = run_one_shot(&["add"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn add_command_json_output() {
    let output = run_one_shot(&["add", "demo task", "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let added: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(added["position"], 0);
    assert_eq!(added["label"], "demo task");
}

#[test]
fn done_command_on_fresh_session_exits_nonzero() {
    // Every one-shot invocation is its own session with an empty store.
    let output = run_one_shot(&["done", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: index_out_of_range"));
}

#[test]
fn progress_command_json_reports_empty_session() {
    let output = run_one_shot(&["progress", "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["added"], 0);
    assert_eq!(report["completed"], 0);
    assert_eq!(report["progress"], 0.0);
}

#[test]
fn unknown_subcommand_exits_nonzero() {
    let output = run_one_shot(&["bogus"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
