// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Linear GraphQL client implementing TrackerApi over HTTPS (ureq)
// role: tracker/http
// inputs: API key; query filters; opaque pagination cursors
// outputs: Page<RawIssue>/Page<RawComment>/RawViewer decoded from GraphQL responses
// side_effects: Network calls to api.linear.app (or an injected endpoint)
// invariants:
// - One request per page; the client never prefetches
// - Nodes that fail schema validation are skipped with a warning; the page still succeeds
// - Page::raw_len counts skipped nodes too, so pagination never stops on a malformed page
// errors: HTTP status, transport, decode and GraphQL `errors` all surface as fatal errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::ext::serde_json::JsonFetch;
use crate::tracker::api::{CommentFilter, IssueFilter, IssueGroup, Page, TrackerApi, PAGE_SIZE};
use crate::tracker::raw::{RawComment, RawIssue, RawViewer};

pub const LINEAR_GRAPHQL_URL: &str = "https://api.linear.app/graphql";

const ISSUE_FIELDS: &str = r#"
fragment IssueFields on Issue {
  id
  identifier
  title
  description
  createdAt
  updatedAt
  startedAt
  completedAt
  assignee { id name email }
  creator { id name }
  state { name type }
  labels { nodes { id name } }
}"#;

const VIEWER_QUERY: &str = "query Viewer { viewer { id name email } }";

const COMMENTS_QUERY: &str = r#"
query Comments($first: Int!, $after: String, $filter: CommentFilter) {
  comments(first: $first, after: $after, filter: $filter) {
    nodes { issue { id } user { id email } createdAt }
    pageInfo { hasNextPage endCursor }
  }
}"#;

const ISSUES_QUERY: &str = r#"
query Issues($first: Int!, $after: String, $filter: IssueFilter) {
  issues(first: $first, after: $after, filter: $filter) {
    nodes { ...IssueFields }
    pageInfo { hasNextPage endCursor }
  }
}"#;

fn viewer_issues_query(group: IssueGroup) -> String {
  format!(
    "query ViewerIssues($first: Int!, $after: String) {{\n  viewer {{\n    {}(first: $first, after: $after) {{\n      nodes {{ ...IssueFields }}\n      pageInfo {{ hasNextPage endCursor }}\n    }}\n  }}\n}}{}",
    group.field(),
    ISSUE_FIELDS
  )
}

pub struct LinearHttpApi {
  agent: ureq::Agent,
  endpoint: String,
  api_key: String,
}

impl LinearHttpApi {
  pub fn new(api_key: &str) -> Self {
    Self::with_endpoint(LINEAR_GRAPHQL_URL, api_key)
  }

  pub fn with_endpoint(endpoint: &str, api_key: &str) -> Self {
    Self {
      agent: ureq::AgentBuilder::new().build(),
      endpoint: endpoint.to_string(),
      api_key: api_key.trim().to_string(),
    }
  }

  fn post_graphql(&self, operation: &str, query: &str, variables: Value) -> Result<Value> {
    let body = json!({ "query": query, "variables": variables });

    let resp = match self
      .agent
      .post(&self.endpoint)
      .set("Content-Type", "application/json")
      .set("User-Agent", "linear-activity-report")
      .set("Authorization", &self.api_key)
      .send_json(body)
    {
      Ok(r) => r,
      Err(ureq::Error::Status(code, r)) => {
        let text = r.into_string().unwrap_or_default();
        bail!("{operation}: Linear API returned HTTP {code}: {}", text.trim())
      }
      Err(e) => return Err(e).with_context(|| format!("{operation}: request to Linear API failed")),
    };

    let parsed: Value = resp
      .into_json()
      .with_context(|| format!("{operation}: decoding Linear API response"))?;

    if let Some(errors) = parsed.get("errors").and_then(|e| e.as_array()) {
      if !errors.is_empty() {
        let messages: Vec<String> = errors
          .iter()
          .map(|e| e.fetch("message").to::<String>().unwrap_or_else(|| e.to_string()))
          .collect();
        bail!("{operation}: Linear GraphQL error: {}", messages.join("; "));
      }
    }

    debug!(operation, "graphql request completed");
    Ok(parsed)
  }
}

fn range_predicate(filter_range: &crate::month::MonthRange) -> Value {
  json!({ "gte": filter_range.start_iso(), "lte": filter_range.end_iso() })
}

fn comment_filter_json(filter: &CommentFilter) -> Value {
  json!({
    "user": { "email": { "eq": filter.user_email } },
    "createdAt": range_predicate(&filter.range),
  })
}

fn issue_filter_json(filter: &IssueFilter) -> Value {
  let range = range_predicate(&filter.range);
  json!({
    "assignee": { "email": { "eq": filter.assignee_email } },
    "or": [
      { "startedAt": range },
      { "updatedAt": range },
    ],
  })
}

/// Decode one connection object (`{ nodes, pageInfo }`) into a typed page.
fn parse_connection<T>(response: &Value, path: &str) -> Result<Page<T>>
where
  T: DeserializeOwned,
{
  let nodes_path = format!("{path}.nodes");
  let raw_nodes: Vec<Value> = response.fetch(&nodes_path).required()?;
  let raw_len = raw_nodes.len();

  let mut nodes = Vec::with_capacity(raw_nodes.len());
  for node in raw_nodes {
    match serde_json::from_value::<T>(node) {
      Ok(n) => nodes.push(n),
      Err(e) => warn!(connection = path, error = %e, "skipping malformed record"),
    }
  }

  let has_next_page = response
    .fetch(&format!("{path}.pageInfo.hasNextPage"))
    .to_or_default::<bool>();
  let end_cursor = response.fetch(&format!("{path}.pageInfo.endCursor")).to::<String>();

  Ok(Page { nodes, raw_len, has_next_page, end_cursor })
}

impl TrackerApi for LinearHttpApi {
  fn viewer(&self) -> Result<RawViewer> {
    let resp = self.post_graphql("viewer", VIEWER_QUERY, json!({}))?;
    resp.fetch("data.viewer").required()
  }

  fn comments(&self, filter: &CommentFilter, after: Option<&str>) -> Result<Page<RawComment>> {
    let vars = json!({ "first": PAGE_SIZE, "after": after, "filter": comment_filter_json(filter) });
    let resp = self.post_graphql("comments", COMMENTS_QUERY, vars)?;
    parse_connection(&resp, "data.comments")
  }

  fn issues(&self, filter: &IssueFilter, after: Option<&str>) -> Result<Page<RawIssue>> {
    let query = format!("{ISSUES_QUERY}{ISSUE_FIELDS}");
    let vars = json!({ "first": PAGE_SIZE, "after": after, "filter": issue_filter_json(filter) });
    let resp = self.post_graphql("issues", &query, vars)?;
    parse_connection(&resp, "data.issues")
  }

  fn viewer_issues(&self, group: IssueGroup, after: Option<&str>) -> Result<Page<RawIssue>> {
    let vars = json!({ "first": PAGE_SIZE, "after": after });
    let resp = self.post_graphql(group.field(), &viewer_issues_query(group), vars)?;
    parse_connection(&resp, &format!("data.viewer.{}", group.field()))
  }
}
