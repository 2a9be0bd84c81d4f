// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Aggregate the tickets a user worked on during a month (assignee-email mode or viewer mode)
// role: aggregation/core
// inputs: TrackerApi backend, MonthRange, optional assignee email
// outputs: Vec<Ticket> with distinct ids, sorted ascending by updatedAt
// side_effects: Outbound tracker queries only
// invariants:
// - Commented-issue ids are fully resolved before any issue is judged
// - Viewer groups drain in parallel into private Vecs; the merge into the id map is sequential
// - Worked-on: creator is the user, OR started within the range, OR the user commented within the range
// errors: Viewer resolution failure and any page failure abort the whole aggregation (no retries)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::model::Ticket;
use crate::month::{self, MonthRange};
use crate::tracker::api::{drain_pages, CommentFilter, IssueFilter, IssueGroup, TrackerApi};
use crate::tracker::make_default_api;
use crate::tracker::raw::RawIssue;

/// Fetch every ticket the user worked on in `month` of `year`.
///
/// With `assignee_email` (trimmed, non-empty) the issues assigned to that address are
/// considered, which is what a bot/integration key needs. Otherwise the key's own user
/// (the viewer) is resolved and its assigned, created and delegated issues are merged.
pub fn fetch_user_tickets_for_month(
  api_key: &str,
  year: i32,
  month: u32,
  assignee_email: Option<&str>,
) -> Result<Vec<Ticket>> {
  let api = make_default_api(api_key)?;
  let range = month::resolve(year, month);

  aggregate_tickets(api.as_ref(), &range, assignee_email)
}

/// Backend-agnostic aggregation; see [`fetch_user_tickets_for_month`].
pub fn aggregate_tickets(api: &dyn TrackerApi, range: &MonthRange, assignee_email: Option<&str>) -> Result<Vec<Ticket>> {
  let email = assignee_email.map(str::trim).filter(|e| !e.is_empty());

  let merged = match email {
    Some(email) => {
      info!(year = range.year, month = range.month, "aggregating tickets assigned to an explicit email");
      collect_assignee_tickets(api, range, email)?
    }
    None => {
      info!(year = range.year, month = range.month, "aggregating tickets for the authenticated viewer");
      collect_viewer_tickets(api, range)?
    }
  };

  let mut tickets: Vec<Ticket> = merged.into_values().collect();
  tickets.sort_by_key(|t| t.updated_at_millis());

  info!(count = tickets.len(), "aggregated tickets");
  Ok(tickets)
}

/// Did `user_id` actually work on `issue` during `range`?
///
/// A bare update inside the range does not count: the tracker's update filter also
/// matches automated or third-party touches.
pub fn worked_on(issue: &RawIssue, user_id: &str, range: &MonthRange, commented: &HashSet<String>) -> bool {
  if issue.creator_id() == Some(user_id) {
    return true;
  }

  if issue.started_at().is_some_and(|t| range.contains(t)) {
    return true;
  }

  commented.contains(&issue.id)
}

/// Ids of issues `email` commented on during `range`.
pub fn commented_issue_ids(api: &dyn TrackerApi, email: &str, range: &MonthRange) -> Result<HashSet<String>> {
  let filter = CommentFilter { user_email: email.to_string(), range: *range };
  let mut ids = HashSet::new();

  let pages = drain_pages(
    |after| api.comments(&filter, after),
    |comment| {
      if let Some(issue) = comment.issue {
        ids.insert(issue.id);
      }
    },
  )?;

  debug!(pages, issues = ids.len(), "resolved commented issues");
  Ok(ids)
}

fn collect_assignee_tickets(api: &dyn TrackerApi, range: &MonthRange, email: &str) -> Result<BTreeMap<String, Ticket>> {
  // Phase 1: comment set must be complete before any issue is judged
  let commented = commented_issue_ids(api, email, range)?;

  // Phase 2: drain the assignee query, capturing the assignee's id from the first issue that has one
  let filter = IssueFilter { assignee_email: email.to_string(), range: *range };
  let mut user_id: Option<String> = None;
  let mut merged: BTreeMap<String, Ticket> = BTreeMap::new();

  let pages = drain_pages(
    |after| api.issues(&filter, after),
    |issue| {
      if user_id.is_none() {
        user_id = issue.assignee_id().map(str::to_string);
      }

      let effective = user_id.as_deref().or(issue.assignee_id()).unwrap_or("");
      if !worked_on(&issue, effective, range, &commented) {
        return;
      }

      let ticket = issue.to_ticket(issue.assignee_id());
      merged.insert(ticket.id.clone(), ticket);
    },
  )?;

  debug!(pages, kept = merged.len(), "drained assignee issues");
  Ok(merged)
}

fn collect_viewer_tickets(api: &dyn TrackerApi, range: &MonthRange) -> Result<BTreeMap<String, Ticket>> {
  // Phase 1: identity
  let viewer = api.viewer().context("Failed to fetch current user from Linear")?;

  // Phase 2: comment set (empty when the viewer exposes no email)
  let commented = match viewer.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
    Some(email) => commented_issue_ids(api, email, range)?,
    None => HashSet::new(),
  };

  // Phase 3: fan out over the groups, each into its own Vec
  let per_group: Vec<Vec<Ticket>> = IssueGroup::ALL
    .as_slice()
    .par_iter()
    .map(|group| collect_group(api, *group, &viewer.id, range, &commented))
    .collect::<Result<Vec<_>>>()?;

  // Phase 4: single-threaded merge keyed by id
  let mut merged: BTreeMap<String, Ticket> = BTreeMap::new();
  for ticket in per_group.into_iter().flatten() {
    merged.insert(ticket.id.clone(), ticket);
  }

  Ok(merged)
}

fn collect_group(
  api: &dyn TrackerApi,
  group: IssueGroup,
  viewer_id: &str,
  range: &MonthRange,
  commented: &HashSet<String>,
) -> Result<Vec<Ticket>> {
  let mut kept = Vec::new();

  let pages = drain_pages(
    |after| api.viewer_issues(group, after),
    |issue| {
      let in_month = issue.updated_at().is_some_and(|t| range.contains(t))
        || issue.started_at().is_some_and(|t| range.contains(t));

      if in_month && worked_on(&issue, viewer_id, range, commented) {
        kept.push(issue.to_ticket(Some(viewer_id)));
      }
    },
  )?;

  debug!(group = group.field(), pages, kept = kept.len(), "drained viewer issue group");
  Ok(kept)
}
