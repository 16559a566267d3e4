//! pocketgen CLI - PocketBase type generator
//!
//! Commands:
//! - `pocketgen generate` - Generate TypeScript or Go code for collections
//! - `pocketgen inspect` - Print collections and their interpreted properties

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod output;
mod prompt;

use cli::{Cli, Commands};
use config::FileConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.quiet);

    let config = FileConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Generate(args) => {
            commands::generate(args, &config)?;
        }
        Commands::Inspect(args) => {
            commands::inspect(args, &config)?;
        }
    }

    Ok(())
}

/// Log to stderr, keeping stdout for generated code.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
