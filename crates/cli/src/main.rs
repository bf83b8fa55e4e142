//! news-classifier CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref(), cli.log_json)?;

    match cli.command {
        Commands::Classify(args) => commands::classify::execute(args, cli.config).await,
        Commands::Similar(args) => commands::similar::execute(args, cli.config).await,
        Commands::Config(args) => commands::config::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args, cli.config).await,
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
/// `RUST_LOG` wins over `--log-level`.
fn init_logging(level: Option<&str>, json: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.unwrap_or("info"))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
