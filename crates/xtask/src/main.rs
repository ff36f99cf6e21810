//! Development tasks for the skill engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Aggregate, CheckCatalog};
use tracing_subscriber::EnvFilter;

/// Development tasks for the skill engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for skill content", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Aggregate a set of skills and print the resulting bundle
    Aggregate(Aggregate),

    /// Aggregate every skill of a catalog on its own and report failures
    CheckCatalog(CheckCatalog),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Aggregate(cmd) => cmd.execute(),
        Command::CheckCatalog(cmd) => cmd.execute(),
    }
}
