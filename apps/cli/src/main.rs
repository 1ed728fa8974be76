//! Worldbuilder command line entry point.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so `--json` output stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting worldbuilder");

    let rt = tokio::runtime::Runtime::new()?;
    let ok = rt.block_on(commands::run(cli))?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
