//! fundwatch - Personal Fund Holdings Tracker Library
//!
//! Tracks a user's fund holdings, refreshes quotes from the Eastmoney fund
//! API, and folds each day's unrealized profit into a persisted running
//! total exactly once when the market date advances.
//!
//! # Modules
//!
//! - `domain`: Core business logic (Holding, accrual, aggregation, RefreshGate)
//! - `ports`: Trait abstractions (QuoteProvider, KeyValueStore, Clock)
//! - `adapters`: External implementations (Eastmoney API, file store, CLI)
//! - `application`: HoldingsStore and the portfolio orchestrator
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
