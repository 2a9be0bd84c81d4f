use predicates::prelude::*;

const BIN: &str = "linear-activity-report";
const NOW: &str = "2026-02-03T10:00:00Z";

#[test]
fn declining_the_default_month_cancels() {
  let td = test_support::tempdir();
  let out = td.path().to_string_lossy().to_string();

  test_support::cmd_with_tracker_fixture(BIN, "tracker_viewer.json")
    .args(["--out", &out, "--tz", "utc", "--now-override", NOW])
    .write_stdin("n\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Generate report for 01. January 2026? (Y/n): "))
    .stdout(predicate::str::contains("Report generation cancelled."))
    .stdout(predicate::str::contains("Fetching").not());

  assert!(std::fs::read_dir(td.path()).unwrap().next().is_none());
}

#[test]
fn empty_answer_accepts_the_default_month() {
  let td = test_support::tempdir();
  let out = td.path().to_string_lossy().to_string();

  test_support::cmd_with_tracker_fixture(BIN, "tracker_viewer.json")
    .args(["--out", &out, "--tz", "utc", "--now-override", NOW])
    .write_stdin("\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("✓ Found 4 ticket(s)"));

  assert!(td.path().join("01. January").is_dir());
}

#[test]
fn yes_flag_skips_the_prompt() {
  let td = test_support::tempdir();
  let out = td.path().to_string_lossy().to_string();

  test_support::cmd_with_tracker_fixture(BIN, "tracker_viewer.json")
    .args(["--yes", "--out", &out, "--tz", "utc", "--now-override", NOW])
    .assert()
    .success()
    .stdout(predicate::str::contains("(Y/n)").not())
    .stdout(predicate::str::contains("Fetching tickets for 01. January 2026..."));
}

#[test]
fn explicit_month_never_prompts() {
  let td = test_support::tempdir();
  let out = td.path().to_string_lossy().to_string();

  test_support::cmd_with_tracker_fixture(BIN, "tracker_viewer.json")
    .args(["--month", "2026-01", "--out", &out, "--tz", "utc", "--now-override", NOW])
    .write_stdin("n\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Report generation cancelled.").not());
}
