use std::collections::HashSet;

use linear_activity_report::aggregate::aggregate_tickets;
use linear_activity_report::build_report_summary;
use linear_activity_report::month::resolve;
use linear_activity_report::tracker::fixture::{FixtureTrackerApi, TrackerFixture};
use linear_activity_report::tracker::raw::{RawIssue, RawViewer};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Clone)]
struct IssueShape {
  id: u8,
  updated_month: u32,
  updated_day: u32,
  mine: bool,
  started_day: Option<u32>,
}

fn issue_shape() -> impl Strategy<Value = IssueShape> {
  (0u8..12, 1u32..=3, 1u32..=28, any::<bool>(), proptest::option::of(1u32..=28)).prop_map(
    |(id, updated_month, updated_day, mine, started_day)| IssueShape { id, updated_month, updated_day, mine, started_day },
  )
}

fn raw(shape: &IssueShape) -> RawIssue {
  let mut v = json!({
    "id": format!("issue-{}", shape.id),
    "title": format!("Issue {}", shape.id),
    "updatedAt": format!("2026-{:02}-{:02}T12:00:00.000Z", shape.updated_month, shape.updated_day),
    "creator": { "id": if shape.mine { "me" } else { "someone" } },
    "state": { "name": if shape.mine { "Done" } else { "Todo" }, "type": "completed" }
  });
  if let Some(d) = shape.started_day {
    v["startedAt"] = json!(format!("2026-02-{d:02}T08:00:00.000Z"));
  }
  serde_json::from_value(v).unwrap()
}

fn fixture(page_size: usize, groups: [Vec<IssueShape>; 3]) -> TrackerFixture {
  let [assigned, created, delegated] = groups;
  TrackerFixture {
    page_size: Some(page_size),
    viewer: Some(RawViewer { id: "me".into(), name: None, email: None }),
    assigned_issues: assigned.iter().map(raw).collect(),
    created_issues: created.iter().map(raw).collect(),
    delegated_issues: delegated.iter().map(raw).collect(),
    ..Default::default()
  }
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn aggregated_ids_are_distinct_and_sorted(
    page_size in 1usize..4,
    a in proptest::collection::vec(issue_shape(), 0..8),
    c in proptest::collection::vec(issue_shape(), 0..8),
    d in proptest::collection::vec(issue_shape(), 0..8),
  ) {
    let api = FixtureTrackerApi::new(fixture(page_size, [a, c, d]));
    let range = resolve(2026, 2);
    let tickets = aggregate_tickets(&api, &range, None).unwrap();

    let ids: HashSet<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
    prop_assert_eq!(ids.len(), tickets.len());

    for pair in tickets.windows(2) {
      prop_assert!(pair[0].updated_at_millis() <= pair[1].updated_at_millis());
    }
  }

  #[test]
  fn summary_counts_add_up(
    a in proptest::collection::vec(issue_shape(), 0..8),
    c in proptest::collection::vec(issue_shape(), 0..8),
  ) {
    let api = FixtureTrackerApi::new(fixture(2, [a, c, vec![]]));
    let tickets = aggregate_tickets(&api, &resolve(2026, 2), None).unwrap();
    let summary = build_report_summary(&tickets);

    prop_assert_eq!(summary.total_tickets, tickets.len());
    prop_assert_eq!(summary.by_status.values().sum::<usize>(), tickets.len());
    let activities: usize = tickets.iter().map(|t| t.activities.len()).sum();
    prop_assert_eq!(summary.by_activity_type.values().sum::<usize>(), activities);
  }
}
