//! Tilde CLI - continuous build runner
//!
//! Usage: tilde <COMMAND>
//!
//! Commands:
//!   watch   Re-run a command whenever watched files change
//!   run     Process a queue of commands; `~ <cmd>` entries start watching

use anyhow::Result;
use clap::Parser;

use tilde::presentation::cli::Cli;

mod commands;
mod ui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = commands::session::cmd_session(&cli)?;
    std::process::exit(code);
}

/// `TILDE_LOG` wins; otherwise `-v` raises the level from the default of warn.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TILDE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
