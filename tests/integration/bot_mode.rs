use predicates::prelude::*;

#[test]
fn assignee_email_switches_to_assignee_query() {
  let td = test_support::tempdir();
  let out = td.path().to_string_lossy().to_string();

  test_support::cmd_with_tracker_fixture("linear-activity-report", "tracker_bot.json")
    .env("LINEAR_ASSIGNEE_EMAIL", "  bot@example.com ")
    .args(["-m", "03-2026", "-o", &out, "--tz", "utc", "--now-override", "2026-04-01T09:05:00Z"])
    .assert()
    .success()
    .stdout(predicate::str::contains("✓ Found 2 ticket(s)"));

  let dir = td.path().join("03. March").join("2026-04-01 09:05");
  let technical = std::fs::read_to_string(dir.join("20260401_090500_000_technical.txt")).unwrap();

  let ops3 = technical.find("[OPS-3] Triage alert storm").expect("commented ticket");
  let ops1 = technical.find("[OPS-1] Rotate deploy keys").expect("started ticket");
  assert!(ops3 < ops1, "tickets are ordered by updatedAt");

  // updated-only and other assignees are excluded
  assert!(!technical.contains("OPS-2"));
  assert!(!technical.contains("OPS-9"));
  assert!(technical.contains("By activity: assigned: 2, updated: 2"));
  assert!(technical.contains("  Assignee: Release Bot (bot@example.com)"));
}
