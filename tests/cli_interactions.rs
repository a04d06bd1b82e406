//! CLI options interaction tests
//!
//! These tests validate that CLI options parse, combine, and fail correctly
//! without requiring any live probing to succeed.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("conncheck").unwrap();
    // Keep test runs hermetic: ignore any .env or NO_COLOR in the outer environment
    cmd.env_remove("NO_COLOR")
        .env_remove("PROBE_TIMEOUT_SECONDS")
        .env_remove("PROBE_RETRY_COUNT")
        .env_remove("PROBE_RETRY_DELAY_MS")
        .env_remove("PROBE_CONCURRENCY")
        .env_remove("PROBE_LOG_DIR");
    cmd
}

/// Helper function to create a config directory with one valid record
fn create_config_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("servers.conf"),
        "appName: test\nserverID: 1\nserverIP: 127.0.0.1\nserverPort: 65000\n",
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_missing_config_dir_argument_is_usage_error() {
    create_test_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_all_flags() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIG_DIR"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--retries"))
        .stdout(predicate::str::contains("--retry-delay"))
        .stdout(predicate::str::contains("--concurrency"))
        .stdout(predicate::str::contains("--log-dir"))
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--debug"));
}

#[test]
fn test_version_flag() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("conncheck"));
}

#[test]
fn test_conflicting_color_flags_rejected() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--color")
        .arg("--no-color")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Cannot specify both"));
}

#[test]
fn test_zero_timeout_rejected() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--timeout")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeout must be greater than 0"));
}

#[test]
fn test_oversized_timeout_rejected() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--timeout")
        .arg("301")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));
}

#[test]
fn test_non_numeric_timeout_rejected() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--timeout")
        .arg("soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_excessive_retries_rejected_by_validation() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--retries")
        .arg("101")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Retry count cannot exceed"));
}

#[test]
fn test_excessive_concurrency_rejected_by_validation() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--concurrency")
        .arg("2000")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Concurrency limit cannot exceed"));
}

#[test]
fn test_invalid_env_value_names_the_variable() {
    let config_dir = create_config_dir();

    create_test_cmd()
        .arg(config_dir.path())
        .env("PROBE_RETRY_COUNT", "many")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PROBE_RETRY_COUNT"));
}

#[test]
fn test_env_value_applies_when_flag_absent() {
    let config_dir = create_config_dir();
    let log_dir = TempDir::new().unwrap();

    // An out-of-range env value must be caught by validation even though
    // the corresponding flag was never passed
    create_test_cmd()
        .arg(config_dir.path())
        .arg("--log-dir")
        .arg(log_dir.path())
        .env("PROBE_TIMEOUT_SECONDS", "999")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Timeout cannot exceed"));
}

#[test]
fn test_missing_directory_reports_config_error() {
    create_test_cmd()
        .arg("/definitely/not/a/real/config/dir")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("cannot read directory"));
}

#[test]
fn test_empty_directory_reports_config_error() {
    let empty_dir = TempDir::new().unwrap();

    create_test_cmd()
        .arg(empty_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no valid server records found"));
}

#[test]
fn test_unwritable_log_dir_is_fatal() {
    let config_dir = create_config_dir();
    let log_parent = TempDir::new().unwrap();

    create_test_cmd()
        .arg(config_dir.path())
        .arg("--log-dir")
        .arg(log_parent.path().join("missing").join("nested"))
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("failed to create log file"));
}
