use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use calc_cli::cli::Cli;
use calc_cli::{commands, logging, render};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;
    debug!(format = ?cli.format, "starting");

    let report = commands::run(&cli.command)?;

    // ─── output ──────────────────────────────────────────────────────────────

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::render(&report, cli.format, &mut out)?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}
