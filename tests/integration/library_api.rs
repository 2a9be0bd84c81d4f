use linear_activity_report::model::ReportData;
use linear_activity_report::month::format_month_display;
use linear_activity_report::tracker::fixture::TrackerFixture;
use linear_activity_report::{
  build_report_summary, fetch_user_tickets_for_month, generate_non_technical_report, generate_technical_report,
};
use serial_test::serial;
use test_support::TRACKER_FIXTURE_ENV;

#[test]
#[serial]
fn fetch_through_public_api_uses_fixture_backend() {
  let doc = test_support::read_fixture_text("tracker_viewer.json");
  let _env = test_support::with_env(&[(TRACKER_FIXTURE_ENV, doc.as_str())]);

  let tickets = fetch_user_tickets_for_month("lin_api_unused", 2026, 1, None).unwrap();
  let ids: Vec<&str> = tickets.iter().map(|t| t.display_id()).collect();
  assert_eq!(ids, vec!["ENG-5", "ENG-3", "E2E-1", "ENG-6"]);

  let bot = fetch_user_tickets_for_month("lin_api_unused", 2026, 1, Some("bot@example.com")).unwrap();
  assert!(bot.is_empty(), "viewer fixture has no assignee-query issues");
}

#[test]
#[serial]
fn viewer_failure_surfaces_through_public_api() {
  let _env = test_support::with_env(&[(TRACKER_FIXTURE_ENV, "{}")]);

  let err = fetch_user_tickets_for_month("lin_api_unused", 2026, 1, None).unwrap_err();
  assert!(format!("{err:#}").contains("Failed to fetch current user from Linear"));
}

#[test]
fn fixture_documents_parse_into_tracker_fixture() {
  let fx: TrackerFixture = test_support::read_fixture_json("tracker_bot.json");
  assert_eq!(fx.page_size, Some(2));
  assert_eq!(fx.issues.len(), 4);
  assert!(fx.viewer.is_none());
}

#[test]
#[serial]
fn e2e_ticket_renders_in_both_views() {
  let doc = test_support::read_fixture_text("tracker_viewer.json");
  let _env = test_support::with_env(&[(TRACKER_FIXTURE_ENV, doc.as_str())]);

  let tickets: Vec<_> = fetch_user_tickets_for_month("k", 2026, 1, None)
    .unwrap()
    .into_iter()
    .filter(|t| t.display_id() == "E2E-1")
    .collect();
  let summary = build_report_summary(&tickets);
  let data = ReportData { month: format_month_display(1), year: 2026, tickets, summary };

  let technical = generate_technical_report(&data);
  assert!(technical.starts_with("TECHNICAL SUMMARY - 01. January 2026\n"));
  assert!(technical.contains("[E2E-1] E2E Test Ticket"));

  let plain = generate_non_technical_report(&data);
  assert!(plain.starts_with("WORK SUMMARY - 01. January 2026\n"));
  assert!(plain.contains("• E2E Test Ticket"));
}
