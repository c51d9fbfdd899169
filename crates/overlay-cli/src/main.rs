//! Overlay CLI
//!
//! Validate override manifests and inspect how they resolve.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use overlay_core::logging;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(logging::default_directive(cli.verbose))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} page and component overrides", "overlay".green().bold());
            println!();
            println!("Run {} for available commands.", "overlay --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Check { args } => commands::run_check(&args),
        Commands::Resolve { args, path, json } => commands::run_resolve(&args, &path, json),
        Commands::Render { args, path, query } => commands::run_render(&args, &path, &query),
        Commands::Slots { args } => commands::run_slots(&args),
    }
}
