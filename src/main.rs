// src/main.rs

//! feedhook CLI
//!
//! Polls configured RSS feeds and runs a command once per matching item.

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;

use feedhook::config::load_settings;
use feedhook::error::Result;
use feedhook::pipeline;
use feedhook::services::{FeedFetcher, ProcessRunner};
use feedhook::storage::SqliteLedger;

/// feedhook - RSS feed to command dispatcher
#[derive(Parser, Debug)]
#[command(name = "feedhook", version, about = "Runs a command once per matching feed item")]
struct Cli {
    /// Path to the JSON settings file
    #[arg(short, long, default_value = "settings.json")]
    settings: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all feeds once and dispatch matching items
    Run,

    /// Load and validate the settings file, then exit
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Process started ({})", Utc::now().to_rfc3339());

    match cli.command {
        Command::Run => {
            let loaded = load_settings(&cli.settings)?;
            let ledger = SqliteLedger::open(&loaded.settings.db_path)?;
            let fetcher = FeedFetcher::new()?;
            let runner = ProcessRunner;

            pipeline::run(&loaded.settings, &fetcher, &ledger, &runner).await?;
        }
        Command::Validate => {
            let loaded = load_settings(&cli.settings)?;
            info!(
                "Settings OK: {} feeds, sha256 {}",
                loaded.settings.feeds.len(),
                loaded.hash
            );
        }
    }

    info!("Finished successfully ({})", Utc::now().to_rfc3339());
    Ok(())
}
