// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render ReportData into the technical and the plain-language text reports
// role: rendering/text
// inputs: &ReportData (display month, year, sorted tickets, summary)
// outputs: One complete String per report; no I/O
// invariants:
// - Deterministic for identical input (summary maps are BTreeMap)
// - Truncation counts characters and never splits a code point
// - Technical descriptions: newlines collapsed, 200 chars, `...` when longer
// - Plain-language descriptions: markup stripped, newlines collapsed, 150 chars, `...` when longer
// - Plain-language view never shows identifiers, status types or raw markup
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ReportData, Ticket};

const SEPARATOR_WIDTH: usize = 50;
const TECHNICAL_DESCRIPTION_LIMIT: usize = 200;
const PLAIN_DESCRIPTION_LIMIT: usize = 150;
const ELLIPSIS: &str = "...";

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// First `limit` characters of `s`, plus `...` when anything was cut.
fn truncate_chars(s: &str, limit: usize) -> String {
  match s.char_indices().nth(limit) {
    Some((cut, _)) => format!("{}{ELLIPSIS}", &s[..cut]),
    None => s.to_string(),
  }
}

fn collapse_newlines(s: &str) -> String {
  s.replace('\n', " ")
}

/// Strip lightweight markdown: heading markers, bold, italic and inline code.
pub fn strip_markup(s: &str) -> String {
  // Order matters: bold before italic so `**x**` is not read as two italics
  let s = RE_HEADING.replace_all(s, "");
  let s = RE_BOLD.replace_all(&s, "$1");
  let s = RE_ITALIC.replace_all(&s, "$1");
  let s = RE_CODE.replace_all(&s, "$1");

  collapse_newlines(&s)
}

fn join_counts(counts: &BTreeMap<String, usize>) -> String {
  counts.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>().join(", ")
}

fn separator() -> String {
  "=".repeat(SEPARATOR_WIDTH)
}

fn technical_block(t: &Ticket) -> String {
  let mut lines = vec![
    format!("[{}] {}", t.display_id(), t.title),
    format!("  Status: {} ({})", t.state.name, t.state.kind),
  ];

  if let Some(desc) = t.description.as_deref().filter(|d| !d.is_empty()) {
    lines.push(format!(
      "  Description: {}",
      truncate_chars(&collapse_newlines(desc), TECHNICAL_DESCRIPTION_LIMIT)
    ));
  }

  if !t.labels.is_empty() {
    let names: Vec<&str> = t.labels.iter().map(|l| l.name.as_str()).collect();
    lines.push(format!("  Labels: {}", names.join(", ")));
  }

  if let Some(a) = t.assignee.as_ref().filter(|a| !a.name.is_empty()) {
    if a.email.is_empty() {
      lines.push(format!("  Assignee: {}", a.name));
    } else {
      lines.push(format!("  Assignee: {} ({})", a.name, a.email));
    }
  }

  lines.push(format!("  Updated: {}", t.updated_at));
  lines.push(String::new());

  lines.join("\n")
}

fn plain_block(t: &Ticket) -> String {
  let mut lines = vec![format!("• {}", t.title)];

  if let Some(desc) = t.description.as_deref() {
    // Ellipsis follows the stripped length, not the raw description length.
    let plain = strip_markup(desc);
    if !plain.is_empty() {
      lines.push(format!("  {}", truncate_chars(&plain, PLAIN_DESCRIPTION_LIMIT)));
    }
  }

  lines.push(format!("  Status: {}", t.state.name));
  lines.push(String::new());

  lines.join("\n")
}

pub fn generate_technical_report(data: &ReportData) -> String {
  let mut lines = vec![
    format!("TECHNICAL SUMMARY - {} {}", data.month, data.year),
    separator(),
    String::new(),
    format!("Total tickets: {}", data.summary.total_tickets),
    format!("By status: {}", join_counts(&data.summary.by_status)),
    format!("By activity: {}", join_counts(&data.summary.by_activity_type)),
    String::new(),
    "--- TICKETS ---".to_string(),
    String::new(),
  ];

  lines.extend(data.tickets.iter().map(technical_block));

  lines.join("\n")
}

pub fn generate_non_technical_report(data: &ReportData) -> String {
  let mut lines = vec![
    format!("WORK SUMMARY - {} {}", data.month, data.year),
    separator(),
    String::new(),
    format!("Completed {} items this month.", data.summary.total_tickets),
    String::new(),
    "--- KEY DELIVERABLES ---".to_string(),
    String::new(),
  ];

  lines.extend(data.tickets.iter().map(plain_block));

  lines.join("\n")
}
