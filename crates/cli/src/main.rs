//! # CI Metrics Loader CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Manual load/export of one metrics document
//! - Storage-event triggered loads
//! - Document inspection

mod cli;
mod commands;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_load, run_trigger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "CI Metrics Loader starting"
    );

    let result = match &cli.command {
        Commands::Load(args) => run_load(args).await,
        Commands::Trigger(args) => run_trigger(args).await,
        Commands::Info(args) => run_info(args).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
        force_level: cli.quiet,
    })
}
