// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and its normalization into an EffectiveConfig
// role: cli/config
// inputs: argv, env LINEAR_API_KEY and LINEAR_ASSIGNEE_EMAIL
// outputs: EffectiveConfig (resolved month, output dir, credentials, tz, now)
// invariants:
// - month is either parsed from --month or defaulted to the previous month (from_default = true)
// - the API key is trimmed and non-empty; blank assignee emails normalize to None
// errors: invalid month, missing API key, path traversal in --out
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use crate::month::{parse_month, previous_month};
use crate::output::{validate_output_dir, DEFAULT_OUTPUT_DIR};
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "linear-activity-report",
    version,
    about = "Generate monthly work summary reports from Linear tickets",
    long_about = "Generate monthly work summary reports from Linear tickets. Fetches tickets you worked on \
                  (started, created, or commented) and writes a technical and a non-technical summary.",
    after_help = "Environment:\n  LINEAR_API_KEY           Required. Get from Linear Settings -> API\n  \
                  LINEAR_ASSIGNEE_EMAIL    Optional. Required when using a bot/integration API key"
)]
pub struct Cli {
  /// Month to report on, YYYY-MM or MM-YYYY (default: previous month, with confirmation)
  #[arg(short, long, value_name = "YYYY-MM|MM-YYYY")]
  pub month: Option<String>,

  /// Output directory for reports
  #[arg(short, long, alias = "output", default_value = DEFAULT_OUTPUT_DIR)]
  pub out: String,

  /// Skip the confirmation prompt when using the default (previous) month
  #[arg(short, long)]
  pub yes: bool,

  /// Report on issues assigned to this email instead of the key's own user (bot/integration keys)
  #[arg(long, env = "LINEAR_ASSIGNEE_EMAIL")]
  pub assignee_email: Option<String>,

  /// Linear API key
  #[arg(long, env = "LINEAR_API_KEY", hide = true, hide_env_values = true)]
  pub api_key: Option<String>,

  /// Timezone for the run timestamp in output paths (local, utc, or an IANA name)
  #[arg(long, default_value = "local")]
  pub tz: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub year: i32,
  pub month: u32,
  /// Month was not given and fell back to the previous month.
  pub from_default: bool,
  pub skip_confirmation: bool,
  pub out: PathBuf,
  pub api_key: String,
  pub assignee_email: Option<String>,
  pub tz: String,
  pub now: DateTime<Utc>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let now = util::effective_now(util::parse_now(cli.now_override.as_deref())?);

  // Validate month selection
  let (year, month, from_default) = match cli.month.as_deref() {
    Some(raw) => {
      let (y, m) = parse_month(raw)?;
      (y, m, false)
    }
    None => {
      let (y, m) = previous_month(&util::wall_clock(now, &cli.tz));
      (y, m, true)
    }
  };

  validate_output_dir(&cli.out)?;

  let api_key = cli.api_key.as_deref().map(str::trim).unwrap_or_default();
  if api_key.is_empty() {
    bail!("LINEAR_API_KEY is not set. Export it or add it to your environment (Linear Settings -> API).");
  }

  let assignee_email = cli
    .assignee_email
    .as_deref()
    .map(str::trim)
    .filter(|e| !e.is_empty())
    .map(str::to_string);

  Ok(EffectiveConfig {
    year,
    month,
    from_default,
    skip_confirmation: cli.yes,
    out: PathBuf::from(&cli.out),
    api_key: api_key.to_string(),
    assignee_email,
    tz: cli.tz,
    now,
  })
}
