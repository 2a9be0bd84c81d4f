// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Trait seam for the issue tracker plus explicit-cursor pagination primitives
// role: tracker/api
// inputs: Query filters (comment author + range, assignee + range), issue groups, opaque cursors
// outputs: Page<T> values; drain_pages visits every node of a query in server order
// invariants:
// - Page N+1 is requested only after page N has been returned and visited
// - A page claiming more results without a cursor is an error (never loops)
// - A page with no wire-level nodes ends the drain regardless of has_next_page
// - A page whose nodes were all dropped as malformed still advances the cursor
// errors: Any page failure aborts the drain and is returned unmodified
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};

use crate::month::MonthRange;
use crate::tracker::raw::{RawComment, RawIssue, RawViewer};

/// Nodes per request.
pub const PAGE_SIZE: usize = 50;

/// One page of a cursor-paginated connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub nodes: Vec<T>,
  /// Nodes the server sent, counting any the decoder dropped.
  pub raw_len: usize,
  pub has_next_page: bool,
  pub end_cursor: Option<String>,
}

impl<T> Page<T> {
  pub fn new(nodes: Vec<T>, has_next_page: bool, end_cursor: Option<String>) -> Self {
    let raw_len = nodes.len();
    Self { nodes, raw_len, has_next_page, end_cursor }
  }

  pub fn last(nodes: Vec<T>) -> Self {
    Self::new(nodes, false, None)
  }

  /// Cursor for the following page, `None` when this is the last one.
  pub fn next_cursor(&self) -> Result<Option<String>> {
    if !self.has_next_page {
      return Ok(None);
    }

    match &self.end_cursor {
      Some(c) => Ok(Some(c.clone())),
      None => bail!("tracker reported another page but returned no cursor"),
    }
  }
}

/// Comments authored by `user_email` and created within `range`.
#[derive(Debug, Clone)]
pub struct CommentFilter {
  pub user_email: String,
  pub range: MonthRange,
}

/// Issues assigned to `assignee_email` that were started or updated within `range`.
#[derive(Debug, Clone)]
pub struct IssueFilter {
  pub assignee_email: String,
  pub range: MonthRange,
}

/// Relationship-scoped issue lists of the authenticated principal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IssueGroup {
  Assigned,
  Created,
  Delegated,
}

impl IssueGroup {
  pub const ALL: [IssueGroup; 3] = [IssueGroup::Assigned, IssueGroup::Created, IssueGroup::Delegated];

  /// Connection field on the viewer object.
  pub fn field(&self) -> &'static str {
    match self {
      IssueGroup::Assigned => "assignedIssues",
      IssueGroup::Created => "createdIssues",
      IssueGroup::Delegated => "delegatedIssues",
    }
  }
}

pub trait TrackerApi: Send + Sync {
  /// The principal the credential belongs to.
  fn viewer(&self) -> Result<RawViewer>;
  fn comments(&self, filter: &CommentFilter, after: Option<&str>) -> Result<Page<RawComment>>;
  fn issues(&self, filter: &IssueFilter, after: Option<&str>) -> Result<Page<RawIssue>>;
  fn viewer_issues(&self, group: IssueGroup, after: Option<&str>) -> Result<Page<RawIssue>>;
}

/// Fetch pages strictly one after another, handing each node to `visit`.
///
/// Returns the number of pages requested.
pub fn drain_pages<T, F, V>(mut fetch: F, mut visit: V) -> Result<usize>
where
  F: FnMut(Option<&str>) -> Result<Page<T>>,
  V: FnMut(T),
{
  let mut cursor: Option<String> = None;
  let mut pages = 0usize;

  loop {
    let page = fetch(cursor.as_deref())?;
    pages += 1;

    if page.raw_len == 0 {
      break;
    }

    let next = page.next_cursor()?;

    for node in page.nodes {
      visit(node);
    }

    match next {
      Some(c) => cursor = Some(c),
      None => break,
    }
  }

  Ok(pages)
}
