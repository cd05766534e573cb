//! secret-hoard CLI - reconcile secrets with AWS Secrets Manager
//!
//! This is the main entry point for the secret-hoard command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Upload(ref args) => commands::upload::run(args, &cli.global()).await,
        Commands::Download(ref args) => commands::download::run(args, &cli.global()).await,
        Commands::List(ref args) => commands::list::run(args, &cli.global()).await,
        Commands::Delete(ref args) => commands::delete::run(args, &cli.global()).await,
        Commands::Purge(ref args) => commands::purge::run(args, &cli.global()).await,
        Commands::Columns(ref args) => commands::columns::run(args, &cli.global()),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
