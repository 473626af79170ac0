//! TSSC installer CLI
//!
//! Resolves the installation topology of the installer's charts.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}: {}", "hint".yellow().bold(), hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("failed to set up logging: {e}")))?;
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Topology(args) => commands::run_topology(&args),
        Commands::Integrations { json } => commands::run_integrations(json),
    }
}
