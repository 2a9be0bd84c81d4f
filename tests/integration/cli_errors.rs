use predicates::prelude::*;

const BIN: &str = "linear-activity-report";

#[test]
fn invalid_month_is_rejected() {
  test_support::cmd_bin(BIN)
    .env("LINEAR_API_KEY", "lin_api_test")
    .args(["--month", "2026/01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid month format: 2026/01. Use YYYY-MM or MM-YYYY"));
}

#[test]
fn missing_api_key_is_reported() {
  test_support::cmd_bin(BIN)
    .args(["--month", "2026-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("LINEAR_API_KEY is not set"));
}

#[test]
fn blank_api_key_is_reported() {
  test_support::cmd_bin(BIN)
    .env("LINEAR_API_KEY", "   ")
    .args(["--month", "2026-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("LINEAR_API_KEY is not set"));
}

#[test]
fn path_traversal_in_output_dir_is_rejected() {
  test_support::cmd_bin(BIN)
    .env("LINEAR_API_KEY", "lin_api_test")
    .args(["--month", "2026-01", "--out", "../outside"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("path traversal"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
  test_support::cmd_bin(BIN).arg("--since").arg("2026-01-01").assert().failure().code(2);
}
