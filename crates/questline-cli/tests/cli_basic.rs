//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with an isolated HOME so no
//! test touches the real data directory. Gateway-backed commands are not
//! exercised here; they need a live API key.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against an isolated home directory.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "questline-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("QUESTLINE_ENV", "dev")
        .env_remove("QUESTLINE_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

#[test]
fn profile_show_works_on_a_fresh_install() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["profile", "show"]);
    assert!(stdout.contains("level 1"));
    assert!(stdout.contains("XP: 0"));
}

#[test]
fn profile_set_persists_across_invocations() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["profile", "set", "--nickname", "Robin"]);
    let stdout = run_ok(home.path(), &["profile", "show"]);
    assert!(stdout.contains("Robin"));
}

#[test]
fn daily_list_shows_the_quest_board() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["daily", "list"]);
    assert!(stdout.contains("micro-quest"));
    assert!(stdout.contains("(0/1)"));
}

#[test]
fn quest_list_is_empty_on_a_fresh_install() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["quest", "list"]);
    assert!(stdout.contains("No goals yet"));
}

#[test]
fn quest_new_without_api_key_fails_cleanly() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["quest", "new", "Write a novel"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("API key"));
    // And no half-committed goal is left behind.
    let stdout = run_ok(home.path(), &["quest", "list"]);
    assert!(stdout.contains("No goals yet"));
}

#[test]
fn timer_status_without_active_quest() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["timer", "status"]);
    assert!(stdout.contains("No active quest"));
}

#[test]
fn shop_list_shows_items_and_balance() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["shop", "list"]);
    assert!(stdout.contains("Streak Freeze"));
    assert!(stdout.contains("Rare Seed Pack"));
    assert!(stdout.contains("Balance: 0 XP"));
}

#[test]
fn shop_buy_without_xp_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["shop", "buy", "streak-freeze"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Insufficient XP"));
}

#[test]
fn friends_add_cheer_and_daily_guard() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["friends", "add", "Sana"]);
    let stdout = run_ok(home.path(), &["friends", "list"]);
    assert!(stdout.contains("Sana"));

    let stdout = run_ok(home.path(), &["friends", "cheer", "Sana"]);
    assert!(stdout.contains("+2 XP"));

    let (_, stderr, code) = run_cli(home.path(), &["friends", "cheer", "Sana"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Already cheered"));
}

#[test]
fn reflect_without_api_key_uses_the_fallback_line() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_ok(home.path(), &["reflect", "Slow start, strong finish"]);
    assert!(stdout.contains("Coach:"));

    // The reflection reward applied once.
    let stdout = run_ok(home.path(), &["profile", "show"]);
    assert!(stdout.contains("XP: 20"));
}

#[test]
fn config_set_and_show_round_trip() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["config", "set", "--model", "my-model"]);
    let stdout = run_ok(home.path(), &["config", "show"]);
    assert!(stdout.contains("my-model"));
}

#[test]
fn data_reset_requires_confirmation() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["data", "reset"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));

    let stdout = run_ok(home.path(), &["data", "reset", "--yes"]);
    assert!(stdout.contains("cleared"));
}

#[test]
fn data_export_and_import_round_trip() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["profile", "set", "--nickname", "Kim"]);

    let backup = home.path().join("backup.json");
    run_ok(home.path(), &["data", "export", backup.to_str().unwrap()]);
    run_ok(home.path(), &["profile", "set", "--nickname", "Else"]);
    run_ok(home.path(), &["data", "import", backup.to_str().unwrap()]);

    let stdout = run_ok(home.path(), &["profile", "show"]);
    assert!(stdout.contains("Kim"));
}

#[test]
fn data_import_rejects_a_bad_file() {
    let home = tempfile::tempdir().unwrap();
    let bad = home.path().join("bad.json");
    std::fs::write(&bad, "[not json").unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["data", "import", bad.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("read") || stderr.contains("import") || stderr.contains("Invalid"));
}
