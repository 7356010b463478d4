//! CLI Command Definitions
//!
//! Subcommands map one-to-one onto the tracker's exposed operations.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// fundwatch - personal fund holdings tracker
#[derive(Parser, Debug)]
#[command(
    name = "fundwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Personal fund holdings tracker",
    long_about = "Tracks a personal set of fund holdings, refreshes quotes from the \
                  Eastmoney fund API, and accrues each day's profit into a running total."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Preview a fund's current quote without adding it
    Lookup(LookupCmd),

    /// Add a fund to the portfolio
    Add(AddCmd),

    /// Remove a fund from the portfolio
    Remove(RemoveCmd),

    /// Change the invested amount of a fund
    Amount(AmountCmd),

    /// Refresh quotes for one fund or the whole portfolio
    Refresh(RefreshCmd),

    /// Show holdings and portfolio totals
    List,
}

/// Preview a fund quote
#[derive(Parser, Debug)]
pub struct LookupCmd {
    /// Six-digit fund code
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Add a fund
#[derive(Parser, Debug)]
pub struct AddCmd {
    /// Six-digit fund code
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Invested amount (must be positive)
    #[arg(value_name = "AMOUNT")]
    pub amount: Decimal,
}

/// Remove a fund
#[derive(Parser, Debug)]
pub struct RemoveCmd {
    /// Six-digit fund code
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Edit the invested amount
#[derive(Parser, Debug)]
pub struct AmountCmd {
    /// Six-digit fund code
    #[arg(value_name = "CODE")]
    pub code: String,

    /// New invested amount (must be positive)
    #[arg(value_name = "AMOUNT")]
    pub amount: Decimal,
}

/// Refresh quotes
#[derive(Parser, Debug)]
pub struct RefreshCmd {
    /// Refresh only this fund; omit to refresh the whole portfolio
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,

    /// Bypass the refresh cooldown
    #[arg(short, long)]
    pub force: bool,
}
