//! docnav CLI - Documentation sidebar resolver.
//!
//! Provides commands for:
//! - `resolve`: Print the resolved sidebar of a page as JSON
//! - `check`: Resolve the sidebar of every page and report failures

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs};
use error::CliError;
use output::Output;

/// docnav - Documentation sidebar resolver.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable debug logging (sidebar lookups and expansion).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the sidebar of a page and print it as JSON.
    Resolve(ResolveArgs),
    /// Resolve the sidebar of every page in every locale.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::from)
        .and_then(|rt| match cli.command {
            Commands::Resolve(args) => rt.block_on(args.execute()),
            Commands::Check(args) => rt.block_on(args.execute()),
        });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
