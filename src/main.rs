//! fundwatch - Personal Fund Holdings Tracker
//!
//! CLI entry point: loads configuration, wires the Eastmoney client and the
//! file-backed store into the orchestrator, and dispatches subcommands.

mod adapters;
mod application;
mod config;
mod domain;
mod ports;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::cli::{render, CliApp, Command};
use crate::adapters::eastmoney::{EastmoneyClient, EastmoneyConfig};
use crate::adapters::storage::JsonFileStore;
use crate::application::{BatchOutcome, PortfolioOrchestrator};
use crate::config::{load_config, Config};
use crate::ports::clock::SystemClock;

type Tracker = PortfolioOrchestrator<EastmoneyClient, JsonFileStore, SystemClock>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config = load_config(&app.config).context("Failed to load configuration")?;
    init_logging(&config, app.verbose, app.debug);

    let tracker = build_tracker(&config).context("Failed to set up tracker")?;

    match app.command {
        Command::Lookup(cmd) => {
            let quote = tracker.lookup(&cmd.code).await?;
            render::print_quote(&quote);
        }
        Command::Add(cmd) => {
            let holdings = tracker.add(&cmd.code, cmd.amount).await?;
            println!("Added {} ({} funds tracked)", cmd.code, holdings.len());
        }
        Command::Remove(cmd) => {
            let holdings = tracker.remove(&cmd.code)?;
            println!("Removed {} ({} funds tracked)", cmd.code, holdings.len());
        }
        Command::Amount(cmd) => {
            tracker.set_amount(&cmd.code, cmd.amount)?;
            println!("Amount for {} set to {}", cmd.code, cmd.amount);
        }
        Command::Refresh(cmd) => match cmd.code {
            Some(code) => {
                tracker.refresh_one(&code, cmd.force).await?;
                println!("Refreshed {code}");
            }
            None => {
                let BatchOutcome {
                    attempted, failed, ..
                } = tracker.refresh_all(cmd.force).await?;
                if attempted == 0 {
                    println!("No funds to refresh");
                } else if failed > 0 {
                    println!("Refreshed {attempted} funds ({failed} kept stale quotes)");
                } else {
                    println!("Refreshed {attempted} funds");
                }
            }
        },
        Command::List => {
            let holdings = tracker.list()?;
            let stats = tracker.stats()?;
            render::print_holdings(&holdings, &stats);
        }
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()))
    };

    fmt().with_env_filter(filter).init();
}

fn build_tracker(config: &Config) -> Result<Tracker> {
    let provider = EastmoneyClient::with_config(EastmoneyConfig {
        api_base_url: config.provider.api_url.clone(),
        timeout: Duration::from_secs(config.provider.timeout_secs),
        max_retries: config.provider.max_retries,
    })
    .context("Failed to create Eastmoney client")?;

    let store = JsonFileStore::new(config.storage.expanded_data_dir())
        .context("Failed to open data directory")?;

    Ok(PortfolioOrchestrator::new(
        provider,
        Arc::new(store),
        SystemClock,
        config.refresh.cooldown_minutes,
    ))
}
