// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Lay out and write the two report files for one run
// role: output/files
// inputs: Month number, output directory, run instant, tz label; rendered report text
// outputs: <out>/<MM. Month>/<YYYY-MM-DD HH:MM>/<YYYYMMDD_HHMMSS_mmm>_{technical,non_technical}.txt
// side_effects: Creates directories and writes files
// invariants:
// - Both files of a run share one directory and one timestamp prefix
// - Output directories containing `..` are rejected before anything is written
// errors: IO errors bubble with the offending path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::month::format_month_display;
use crate::util::wall_clock;

pub const DEFAULT_OUTPUT_DIR: &str = "./generated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
  pub output_dir: PathBuf,
  pub month_dir: String,
  pub timestamp_dir: String,
  pub technical_path: PathBuf,
  pub non_technical_path: PathBuf,
}

pub fn build_output_paths(month: u32, out_dir: &Path, now: DateTime<Utc>, tz: &str) -> OutputPaths {
  let wall = wall_clock(now, tz);
  let month_dir = format_month_display(month);
  let timestamp_dir = wall.format("%Y-%m-%d %H:%M").to_string();
  let stamp = wall.format("%Y%m%d_%H%M%S_%3f").to_string();

  let base = out_dir.join(&month_dir).join(&timestamp_dir);

  OutputPaths {
    output_dir: out_dir.to_path_buf(),
    month_dir,
    timestamp_dir,
    technical_path: base.join(format!("{stamp}_technical.txt")),
    non_technical_path: base.join(format!("{stamp}_non_technical.txt")),
  }
}

/// Reject path traversal in a user-supplied output directory.
pub fn validate_output_dir(dir: &str) -> Result<()> {
  if dir.replace('\\', "/").contains("..") {
    bail!("Output directory cannot contain \"..\" (path traversal)");
  }

  Ok(())
}

pub fn write_report_file(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }

  std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
  debug!(path = %path.display(), bytes = content.len(), "wrote report");

  Ok(())
}

pub fn write_reports(paths: &OutputPaths, technical: &str, non_technical: &str) -> Result<()> {
  write_report_file(&paths.technical_path, technical)?;
  write_report_file(&paths.non_technical_path, non_technical)?;

  Ok(())
}
