// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: In-memory TrackerApi backed by a JSON document; used by tests and by the CLI when LAR_TEST_TRACKER_JSON is set
// role: tracker/fixture
// inputs: TrackerFixture JSON (viewer, comments, issues, per-group issue lists, page size, optional failure)
// outputs: Paginated pages with numeric offset cursors, filtered the way the server filters
// invariants:
// - comments() keeps comments whose author email matches and createdAt is in range
// - issues() keeps issues whose assignee email matches and startedAt or updatedAt is in range
// - viewer_issues() returns the group list unfiltered (dates are checked client-side)
// errors: fail_with makes every call fail with that message; a missing viewer fails viewer()
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::tracker::api::{CommentFilter, IssueFilter, IssueGroup, Page, TrackerApi, PAGE_SIZE};
use crate::tracker::raw::{RawComment, RawIssue, RawViewer};

/// Environment variable carrying a TrackerFixture JSON document.
pub const FIXTURE_ENV: &str = "LAR_TEST_TRACKER_JSON";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerFixture {
  #[serde(default)]
  pub page_size: Option<usize>,
  #[serde(default)]
  pub viewer: Option<RawViewer>,
  #[serde(default)]
  pub comments: Vec<RawComment>,
  /// Searched by the assignee-email query.
  #[serde(default)]
  pub issues: Vec<RawIssue>,
  #[serde(default)]
  pub assigned_issues: Vec<RawIssue>,
  #[serde(default)]
  pub created_issues: Vec<RawIssue>,
  #[serde(default)]
  pub delegated_issues: Vec<RawIssue>,
  /// Simulated transport failure for every call.
  #[serde(default)]
  pub fail_with: Option<String>,
}

pub struct FixtureTrackerApi {
  fixture: TrackerFixture,
}

impl FixtureTrackerApi {
  pub fn new(fixture: TrackerFixture) -> Self {
    Self { fixture }
  }

  pub fn from_json(json: &str) -> Result<Self> {
    let fixture: TrackerFixture = serde_json::from_str(json).context("parsing tracker fixture JSON")?;
    Ok(Self::new(fixture))
  }

  fn check_failure(&self) -> Result<()> {
    match &self.fixture.fail_with {
      Some(msg) => bail!("{msg}"),
      None => Ok(()),
    }
  }

  fn page_of<T: Clone>(&self, items: Vec<T>, after: Option<&str>) -> Result<Page<T>> {
    let size = self.fixture.page_size.unwrap_or(PAGE_SIZE).max(1);
    let start: usize = match after {
      Some(c) => c.parse().map_err(|_| anyhow!("invalid fixture cursor `{c}`"))?,
      None => 0,
    };
    let start = start.min(items.len());
    let end = (start + size).min(items.len());

    Ok(Page::new(items[start..end].to_vec(), end < items.len(), Some(end.to_string())))
  }
}

impl TrackerApi for FixtureTrackerApi {
  fn viewer(&self) -> Result<RawViewer> {
    self.check_failure()?;
    self.fixture.viewer.clone().ok_or_else(|| anyhow!("viewer query returned no user"))
  }

  fn comments(&self, filter: &CommentFilter, after: Option<&str>) -> Result<Page<RawComment>> {
    self.check_failure()?;
    let matching: Vec<RawComment> = self
      .fixture
      .comments
      .iter()
      .filter(|c| c.author_email() == Some(filter.user_email.as_str()))
      .filter(|c| c.created_at().is_some_and(|t| filter.range.contains(t)))
      .cloned()
      .collect();

    self.page_of(matching, after)
  }

  fn issues(&self, filter: &IssueFilter, after: Option<&str>) -> Result<Page<RawIssue>> {
    self.check_failure()?;
    let matching: Vec<RawIssue> = self
      .fixture
      .issues
      .iter()
      .filter(|i| i.assignee_email() == Some(filter.assignee_email.as_str()))
      .filter(|i| {
        i.started_at().is_some_and(|t| filter.range.contains(t))
          || i.updated_at().is_some_and(|t| filter.range.contains(t))
      })
      .cloned()
      .collect();

    self.page_of(matching, after)
  }

  fn viewer_issues(&self, group: IssueGroup, after: Option<&str>) -> Result<Page<RawIssue>> {
    self.check_failure()?;
    let list = match group {
      IssueGroup::Assigned => &self.fixture.assigned_issues,
      IssueGroup::Created => &self.fixture.created_issues,
      IssueGroup::Delegated => &self.fixture.delegated_issues,
    };

    self.page_of(list.clone(), after)
  }
}
