use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use linear_activity_report::cli::{normalize, Cli};
use linear_activity_report::{run, util};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  // stdout carries user-facing output only
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: confirm, fetch, render, write
  run::run(&cfg)
}
