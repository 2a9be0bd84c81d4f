// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the issue-tracker collaborator (trait seam, raw schema, HTTP and fixture backends)
// role: tracker/namespace
// inputs: API key; env LAR_TEST_TRACKER_JSON selects the fixture backend
// outputs: Box<dyn TrackerApi> for the aggregator
// invariants: Backends hold no state shared across runs
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod fixture;
pub mod http;
pub mod raw;

use anyhow::Result;
use tracing::debug;

use crate::tracker::api::TrackerApi;
use crate::tracker::fixture::{FixtureTrackerApi, FIXTURE_ENV};
use crate::tracker::http::LinearHttpApi;

pub fn make_http_api(api_key: &str) -> Box<dyn TrackerApi> {
  Box::new(LinearHttpApi::new(api_key))
}

/// HTTP backend, unless a fixture document is present in the environment.
pub fn make_default_api(api_key: &str) -> Result<Box<dyn TrackerApi>> {
  if let Ok(json) = std::env::var(FIXTURE_ENV) {
    debug!(env = FIXTURE_ENV, "using fixture tracker backend");
    return Ok(Box::new(FixtureTrackerApi::from_json(&json)?));
  }

  Ok(make_http_api(api_key))
}
