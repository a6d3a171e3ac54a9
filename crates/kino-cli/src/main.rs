//! Kino CLI - Bitrate Estimation Inspector
//!
//! Features:
//! - Lookahead (future info) estimates per variant
//! - Download history (past info) estimates per variant
//! - Combined estimates with history fallback

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;
mod scenario;

/// Kino CLI - Bitrate estimation toolkit
#[derive(Parser)]
#[command(name = "kino-cli")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Inspect ABR bitrate estimates for recorded scenarios", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Estimator configuration file, overriding the scenario's own
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate from each variant's upcoming segments
    Future {
        /// Path to scenario JSON
        scenario: PathBuf,
    },

    /// Estimate from the download history
    Past {
        /// Path to scenario JSON
        scenario: PathBuf,
    },

    /// Estimate from upcoming segments, falling back to history
    Combined {
        /// Path to scenario JSON
        scenario: PathBuf,

        /// Prefer history when lookahead is below a variant's nominal bitrate
        #[arg(long)]
        lower_bound: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();
    kino_abr::init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Future { scenario } => {
            commands::future(&scenario, config, &cli.format).await?;
        }
        Commands::Past { scenario } => {
            commands::past(&scenario, config, &cli.format).await?;
        }
        Commands::Combined { scenario, lower_bound } => {
            commands::combined(&scenario, config, lower_bound, &cli.format).await?;
        }
    }

    Ok(())
}
