// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Scrub credentials from messages before they reach the terminal
// role: utilities/redaction
// inputs: Arbitrary error text
// outputs: The same text with token-like substrings replaced by [REDACTED]
// invariants: Patterns apply in a fixed order; matching is case-insensitive
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::Regex;

pub const REDACTED: &str = "[REDACTED]";

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
  [
    r"(?i)lin_api_[a-z0-9]+",
    r"(?i)ghp_[a-z0-9]+",
    r"(?i)gho_[a-z0-9]+",
    // long hex strings (raw tokens)
    r"(?i)[a-f0-9]{32,}",
  ]
  .iter()
  .map(|p| Regex::new(p).unwrap())
  .collect()
});

pub fn sanitize_error_message(message: &str) -> String {
  let mut out = message.to_string();

  for re in SECRET_PATTERNS.iter() {
    out = re.replace_all(&out, REDACTED).into_owned();
  }

  out
}
