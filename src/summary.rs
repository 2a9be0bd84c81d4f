// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fold a ticket list into the report's aggregate counts
// role: aggregation/summary
// inputs: &[Ticket]
// outputs: ReportSummary (totals, per-status counts, per-activity-type counts)
// invariants:
// - sum(by_status) == total_tickets
// - sum(by_activity_type) == total number of activity entries (may exceed total_tickets)
// - Maps are BTreeMap so iteration order is alphabetical and stable
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{ReportSummary, Ticket};

pub fn build_report_summary(tickets: &[Ticket]) -> ReportSummary {
  let mut summary = ReportSummary { total_tickets: tickets.len(), ..Default::default() };

  for t in tickets {
    *summary.by_status.entry(t.state.name.clone()).or_insert(0) += 1;

    // Duplicate activity entries are counted as-is
    for a in &t.activities {
      *summary.by_activity_type.entry(a.kind.as_str().to_string()).or_insert(0) += 1;
    }
  }

  summary
}
