use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomoguard(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomoguard").unwrap();
    cmd.env("POMOGUARD_HOME", home.path())
        .env_remove("POMOGUARD_DB")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(home.path().join("test.db"));
    cmd
}

fn json_out(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--output").arg("json").output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_session_start_and_complete() {
    let home = TempDir::new().unwrap();

    let started = json_out(pomoguard(&home).args(["session", "start", "work", "--preset", "p1"]));
    assert_eq!(started["kind"], "work");
    assert_eq!(started["duration_minutes"], 25);
    assert_eq!(started["completed"], false);

    let id = started["id"].as_i64().unwrap();
    let done = json_out(pomoguard(&home).args(["session", "complete", &id.to_string()]));
    assert_eq!(done["completed"], true);
    assert!(!done["end_time"].is_null());
}

#[test]
fn test_invalid_session_kind() {
    let home = TempDir::new().unwrap();

    pomoguard(&home)
        .args(["session", "start", "lunch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid session kind"));
}

#[test]
fn test_complete_unknown_session_fails() {
    let home = TempDir::new().unwrap();

    pomoguard(&home)
        .args(["session", "complete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cycle_with_unknown_session_is_schema_violation() {
    let home = TempDir::new().unwrap();

    pomoguard(&home)
        .args(["cycle", "record", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema violation"));
}

#[test]
fn test_limit_upsert() {
    let home = TempDir::new().unwrap();

    pomoguard(&home)
        .args(["limit", "set", "example.com", "30"])
        .assert()
        .success();
    let shown = json_out(pomoguard(&home).args(["limit", "set", "example.com", "45"]));
    assert_eq!(shown["limit"]["daily_limit_minutes"], 45);
    assert_eq!(shown["remaining_minutes"], 45);

    let listed = json_out(pomoguard(&home).args(["limit", "list"]));
    assert_eq!(listed["count"], 1);
}

#[test]
fn test_visit_and_site_stats() {
    let home = TempDir::new().unwrap();

    let visit = json_out(pomoguard(&home).args(["visit", "start", "example.com"]));
    let id = visit["id"].as_i64().unwrap();

    let ended = json_out(pomoguard(&home).args(["visit", "end", &id.to_string()]));
    assert!(ended["duration_seconds"].as_i64().unwrap() >= 0);

    pomoguard(&home)
        .args(["visit", "blocked", "example.com"])
        .assert()
        .success();

    let stats = json_out(pomoguard(&home).args(["stats", "site", "example.com"]));
    assert_eq!(stats["visit_count"], 2);
    assert_eq!(stats["blocked_count"], 1);
}

#[test]
fn test_empty_stats() {
    let home = TempDir::new().unwrap();

    let daily = json_out(pomoguard(&home).args(["stats", "daily"]));
    assert!(daily.is_null());

    let weekly = json_out(pomoguard(&home).args(["stats", "weekly"]));
    assert_eq!(weekly["count"], 0);

    let site = json_out(pomoguard(&home).args(["stats", "site", "nowhere.example"]));
    assert_eq!(site["visit_count"], 0);
    assert!(site["total_duration_seconds"].is_null());
}

#[test]
fn test_export_writes_sqlite_file() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("backup.db");

    pomoguard(&home)
        .args(["limit", "set", "example.com", "30"])
        .assert()
        .success();
    pomoguard(&home)
        .arg("export")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let bytes = std::fs::read(&target).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}
