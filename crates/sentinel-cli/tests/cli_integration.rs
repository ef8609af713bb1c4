//! Integration tests for sentinel-cli
//!
//! These tests drive the binary end-to-end against a throwaway database per
//! test. Tests run serially to avoid database lock conflicts.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the sentinel binary wired to a test database
fn sentinel(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sentinel").unwrap();
    cmd.env("SENTINEL_DB_PATH", temp_dir.path().join("sentinel.db"));
    cmd
}

fn register(temp_dir: &TempDir, username: &str, password: &str, role: &str) {
    sentinel(temp_dir)
        .args([
            "account", "register", "--username", username, "--password", password, "--confirm",
            password, "--role", role,
        ])
        .assert()
        .success();
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
#[serial]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    sentinel(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel"))
        .stdout(predicate::str::contains("COMMAND").or(predicate::str::contains("Commands")));
}

#[test]
#[serial]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    sentinel(&temp_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel"));
}

// =============================================================================
// Account Command Tests
// =============================================================================

#[test]
#[serial]
fn test_account_register_success() {
    let temp_dir = TempDir::new().unwrap();
    sentinel(&temp_dir)
        .args([
            "account", "register", "--username", "alice", "--password", "Secret123!",
            "--confirm", "Secret123!", "--role", "analyst",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account 'alice' created"));
}

#[test]
#[serial]
fn test_account_register_duplicate_username() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "analyst");

    sentinel(&temp_dir)
        .args([
            "account", "register", "--username", "alice", "--password", "Other456!",
            "--confirm", "Other456!",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
#[serial]
fn test_account_register_password_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    sentinel(&temp_dir)
        .args([
            "account", "register", "--username", "alice", "--password", "Secret123!",
            "--confirm", "Different1!",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));
}

#[test]
#[serial]
fn test_account_register_rejects_unknown_role() {
    let temp_dir = TempDir::new().unwrap();
    sentinel(&temp_dir)
        .args([
            "account", "register", "--username", "alice", "--password", "Secret123!",
            "--confirm", "Secret123!", "--role", "superuser",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid role"));
}

#[test]
#[serial]
fn test_account_login_success_shows_role() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "analyst");

    sentinel(&temp_dir)
        .args(["account", "login", "--username", "alice", "--password", "Secret123!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful"))
        .stdout(predicate::str::contains("analyst"));
}

#[test]
#[serial]
fn test_account_login_failures_share_one_message() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "user");

    // Wrong password and unknown username must be indistinguishable
    sentinel(&temp_dir)
        .args(["account", "login", "--username", "alice", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    sentinel(&temp_dir)
        .args(["account", "login", "--username", "nobody", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"))
        .stderr(predicate::str::contains("not found").not());
}

#[test]
#[serial]
fn test_account_passwd_flow() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "carol", "original-pw", "user");

    // Wrong current password is rejected
    sentinel(&temp_dir)
        .args([
            "account", "passwd", "--username", "carol", "--current", "guessed",
            "--new", "replacement-pw",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    // Correct current password goes through
    sentinel(&temp_dir)
        .args([
            "account", "passwd", "--username", "carol", "--current", "original-pw",
            "--new", "replacement-pw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password updated"));

    // Old password no longer logs in, the new one does
    sentinel(&temp_dir)
        .args(["account", "login", "--username", "carol", "--password", "original-pw"])
        .assert()
        .failure();
    sentinel(&temp_dir)
        .args(["account", "login", "--username", "carol", "--password", "replacement-pw"])
        .assert()
        .success();
}

#[test]
#[serial]
fn test_account_import() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "existing", "Secret123!", "user");

    let hash = sentinel_core::auth::hash_password("Imported1!").unwrap();
    let seed = temp_dir.path().join("seed.txt");
    std::fs::write(
        &seed,
        format!(
            "# seed file\nalice,{hash},analyst\nmalformed-line\nexisting,{hash}\nbob,{hash}\n"
        ),
    )
    .unwrap();

    sentinel(&temp_dir)
        .args(["account", "import"])
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 2 skipped"));

    // Imported hashes are live credentials
    sentinel(&temp_dir)
        .args(["account", "login", "--username", "alice", "--password", "Imported1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("analyst"));
}

// =============================================================================
// Incident Command Tests (session-guarded)
// =============================================================================

#[test]
#[serial]
fn test_incident_commands_require_valid_credentials() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "analyst");

    // Bad credentials never reach the incident store
    sentinel(&temp_dir)
        .args([
            "incident", "add", "--username", "alice", "--password", "wrong",
            "--severity", "High", "--category", "Phishing", "--description", "blocked",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    sentinel(&temp_dir)
        .args(["incident", "list", "--username", "alice", "--password", "Secret123!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked").not());
}

#[test]
#[serial]
fn test_incident_report_and_list() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "analyst");

    sentinel(&temp_dir)
        .args([
            "incident", "add", "--username", "alice", "--password", "Secret123!",
            "--severity", "High", "--category", "Phishing",
            "--description", "Suspicious email detected",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("reported"));

    sentinel(&temp_dir)
        .args(["incident", "list", "--username", "alice", "--password", "Secret123!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phishing"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("Open"));

    // Severity filter
    sentinel(&temp_dir)
        .args([
            "incident", "list", "--username", "alice", "--password", "Secret123!",
            "--severity", "Low",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No items found"));

    // Stats
    sentinel(&temp_dir)
        .args(["incident", "stats", "--username", "alice", "--password", "Secret123!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phishing"));
}

#[test]
#[serial]
fn test_incident_status_unknown_id() {
    let temp_dir = TempDir::new().unwrap();
    register(&temp_dir, "alice", "Secret123!", "analyst");

    sentinel(&temp_dir)
        .args([
            "incident", "status", "--username", "alice", "--password", "Secret123!",
            "no-such-id", "Resolved",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No incident with id"));
}
