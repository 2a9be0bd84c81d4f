// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for "now" resolution, timezone-aware wall-clock formatting, and man page rendering
// role: utilities/helpers
// inputs: Optional now-override string; DateTime<Utc>; tz label (local|utc|IANA); clap CommandFactory
// outputs: Effective instant, wall-clock NaiveDateTime/format strings, man page text
// invariants:
// - Unknown tz labels fall back to UTC (never an error)
// - effective_now is the only place that reads the system clock
// errors: parse_now rejects override strings that are neither RFC 3339 nor naive ISO date-times
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;

/// Parse the hidden `--now-override` value.
///
/// Accepts RFC 3339 (`2026-02-03T10:00:00Z`) or a naive `2026-02-03T10:00:00`, which is read as UTC.
pub fn parse_now(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
    return Ok(None);
  };

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(Some(dt.with_timezone(&Utc)));
  }

  for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
      return Ok(Some(Utc.from_utc_datetime(&naive)));
    }
  }

  bail!("Invalid --now-override value: {raw}")
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Wall-clock reading of `instant` in `tz` (`local`, `utc`, or an IANA name).
pub fn wall_clock(instant: DateTime<Utc>, tz: &str) -> NaiveDateTime {
  if tz.eq_ignore_ascii_case("local") {
    return instant.with_timezone(&Local).naive_local();
  }

  if tz.eq_ignore_ascii_case("utc") {
    return instant.naive_utc();
  }

  match tz.parse::<Tz>() {
    Ok(zone) => instant.with_timezone(&zone).naive_local(),
    Err(_) => instant.naive_utc(),
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
