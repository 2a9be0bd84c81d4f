// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report run: confirm, fetch, summarize, render, write
// role: orchestration/run
// inputs: EffectiveConfig; stdin for the default-month confirmation
// outputs: Progress lines and saved paths on stdout; two report files
// side_effects: Outbound tracker queries; directory creation and file writes
// invariants:
// - Confirmation is asked only when the month was defaulted and --yes was not given
// - An empty ticket list writes nothing
// - Errors shown to the user are wrapped and passed through sanitize_error_message
// errors: "Failed to fetch Linear tickets: ..." and "Failed to write reports: ..."
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use tracing::info;

use crate::aggregate::fetch_user_tickets_for_month;
use crate::cli::EffectiveConfig;
use crate::model::ReportData;
use crate::month::format_month_display;
use crate::output::{build_output_paths, write_reports, OutputPaths};
use crate::redact::sanitize_error_message;
use crate::render::{generate_non_technical_report, generate_technical_report};
use crate::summary::build_report_summary;

pub fn confirmation_question(year: i32, month: u32) -> String {
  format!("Generate report for {} {year}?", format_month_display(month))
}

/// Ask `question (Y/n): ` and read one line. Empty, `y` and `yes` confirm; anything else declines.
pub fn prompt_confirmation<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<bool> {
  write!(output, "{question} (Y/n): ")?;
  output.flush()?;

  let mut answer = String::new();
  input.read_line(&mut answer)?;

  Ok(matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes"))
}

fn user_error(prefix: &str, err: anyhow::Error) -> anyhow::Error {
  anyhow!("{prefix}: {}", sanitize_error_message(&format!("{err:#}")))
}

/// Fetch, render and write both reports. `None` when the month had no tickets.
pub fn run_report_generation(cfg: &EffectiveConfig) -> Result<Option<OutputPaths>> {
  let label = format_month_display(cfg.month);

  // Phase 1: fetch
  println!("Fetching tickets for {label} {}...", cfg.year);
  let tickets = fetch_user_tickets_for_month(&cfg.api_key, cfg.year, cfg.month, cfg.assignee_email.as_deref())
    .map_err(|e| user_error("Failed to fetch Linear tickets", e))?;

  if tickets.is_empty() {
    println!("No tickets found for this month.");
    return Ok(None);
  }

  println!("✓ Found {} ticket(s)", tickets.len());
  println!("Generating reports...");

  // Phase 2: summarize + render
  let summary = build_report_summary(&tickets);
  let data = ReportData { month: label, year: cfg.year, tickets, summary };
  let technical = generate_technical_report(&data);
  let non_technical = generate_non_technical_report(&data);

  // Phase 3: write
  let paths = build_output_paths(cfg.month, &cfg.out, cfg.now, &cfg.tz);
  write_reports(&paths, &technical, &non_technical).map_err(|e| user_error("Failed to write reports", e))?;

  info!(tickets = data.tickets.len(), dir = %paths.output_dir.display(), "reports written");
  println!("✓ Reports saved to:");
  println!("  {}", paths.technical_path.display());
  println!("  {}", paths.non_technical_path.display());

  Ok(Some(paths))
}

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  // Guard: a defaulted month needs an explicit yes
  if cfg.from_default && !cfg.skip_confirmation {
    let question = confirmation_question(cfg.year, cfg.month);
    let stdin = std::io::stdin();
    let confirmed = prompt_confirmation(&question, &mut stdin.lock(), &mut std::io::stdout())?;

    if !confirmed {
      println!("Report generation cancelled.");
      return Ok(());
    }
  }

  run_report_generation(cfg)?;
  Ok(())
}
