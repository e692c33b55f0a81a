use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_demo_runs_to_completion() {
    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.args(["--workers", "6", "--capacity", "2", "--max-query-ms", "5"])
        .env("RUST_LOG", "info");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("completed 6 queries using"))
        .stderr(predicate::str::contains("create db connection: 1"))
        .stderr(predicate::str::contains("close db connection"));
}

#[test]
fn test_demo_reads_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workers = 3\ncapacity = 1\nmax_query_ms = 1").unwrap();

    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.arg("--config").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("completed 3 queries using"));
}

#[test]
fn test_flags_override_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workers = 3\nmax_query_ms = 1").unwrap();

    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.arg("--config")
        .arg(file.path())
        .args(["--workers", "4"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("completed 4 queries using"));
}

#[test]
fn test_zero_capacity_fails() {
    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.args(["--capacity", "0", "--workers", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to create connection pool"))
        .stderr(predicate::str::contains("capacity must be at least 1"));
}

#[test]
fn test_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.args(["--config", "/nonexistent/respool.toml"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_demo_logs_releases() {
    let mut cmd = Command::cargo_bin("respool").unwrap();
    cmd.args(["--workers", "4", "--capacity", "1", "--max-query-ms", "1"])
        .env("RUST_LOG", "debug");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("db: resource returned to idle buffer"));
}
