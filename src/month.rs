// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Calendar-month helpers: UTC range resolution, month-string parsing, display labels
// role: time/month
// inputs: (year, month) pairs; YYYY-MM or MM-YYYY strings; a "today" date
// outputs: MonthRange with inclusive UTC bounds; display labels such as "01. January"
// invariants:
// - start is 00:00:00.000 UTC on day 1; end is 23:59:59.999 UTC on the last calendar day
// - end is derived from the first instant of the following month (no day-count table)
// - contains() is inclusive on both bounds
// errors: parse_month rejects anything but YYYY-MM / MM-YYYY with month 01..12
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Duration, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MONTH_NAMES: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonthRange {
  pub year: i32,
  pub month: u32,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl MonthRange {
  pub fn contains(&self, instant: DateTime<Utc>) -> bool {
    instant >= self.start && instant <= self.end
  }

  /// Lower bound as sent to the tracker (`2026-01-01T00:00:00.000Z`).
  pub fn start_iso(&self) -> String {
    self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
  }

  /// Upper bound as sent to the tracker (`2026-01-31T23:59:59.999Z`).
  pub fn end_iso(&self) -> String {
    self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
  }
}

fn first_instant(year: i32, month: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, 1, 0, 0, 0)
    .single()
    .expect("month is validated before range resolution")
}

/// Resolve the inclusive UTC range covering `month` of `year`.
///
/// The last instant is one millisecond before the first instant of the following month,
/// which lands on day 28/29/30/31 as the calendar dictates.
///
/// # Panics
/// When `month` is outside `1..=12`; callers validate with [`parse_month`] first.
pub fn resolve(year: i32, month: u32) -> MonthRange {
  let start = first_instant(year, month);
  let (next_y, next_m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
  let end = first_instant(next_y, next_m) - Duration::milliseconds(1);

  MonthRange { year, month, start, end }
}

/// Parse `YYYY-MM` or `MM-YYYY` into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
  static RE_ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").unwrap());
  static RE_ALT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])-(\d{4})$").unwrap());

  let s = input.trim();

  if let Some(c) = RE_ISO.captures(s) {
    return Ok((c[1].parse()?, c[2].parse()?));
  }

  if let Some(c) = RE_ALT.captures(s) {
    return Ok((c[2].parse()?, c[1].parse()?));
  }

  bail!("Invalid month format: {input}. Use YYYY-MM or MM-YYYY")
}

/// The calendar month before the one containing `today`.
pub fn previous_month<D: Datelike>(today: &D) -> (i32, u32) {
  if today.month() == 1 {
    (today.year() - 1, 12)
  } else {
    (today.year(), today.month() - 1)
  }
}

/// Display label used in report headers and directory names: "02. February".
pub fn format_month_display(month: u32) -> String {
  let name = month
    .checked_sub(1)
    .and_then(|i| MONTH_NAMES.get(i as usize))
    .copied()
    .unwrap_or("Unknown");

  format!("{month:02}. {name}")
}
