// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path navigation over GraphQL responses (serde_json::Value) with optional or required typed extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to / to_or_default / required)
// invariants: No panics; missing paths yield None; required() names the dotted path in its error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// A located (or missing) JSON value plus the dotted path used to reach it.
pub struct JsonFetched<'a> {
  path: String,
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Deserialize as `T`; `None` when missing, `null`, or of the wrong shape.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self
      .inner
      .filter(|v| !v.is_null())
      .and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Deserialize as `T`, failing with the dotted path when absent or malformed.
  pub fn required<T>(&self) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let v = self
      .inner
      .filter(|v| !v.is_null())
      .ok_or_else(|| anyhow!("response is missing `{}`", self.path))?;

    serde_json::from_value::<T>(v.clone()).map_err(|e| anyhow!("response field `{}` is malformed: {e}", self.path))
  }

  /// Borrow the raw value, if present.
  pub fn value(&self) -> Option<&'a serde_json::Value> {
    self.inner
  }
}

/// Fetch nested values via dotted paths like "data.viewer.assignedIssues".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { path: String::new(), inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => {
          return JsonFetched { path: path.to_string(), inner: None };
        }
      }
    }

    JsonFetched { path: path.to_string(), inner: Some(cur) }
  }
}
