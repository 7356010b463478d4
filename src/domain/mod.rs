//! Domain Layer - Core business logic for the fund tracker
//!
//! Pure types and state transitions with no I/O. All external interactions
//! happen through the ports layer.
//!
//! - `holding`: the persisted fund record and its derived profit figures
//! - `accrual`: exactly-once day-rollover of unrealized profit
//! - `stats`: portfolio-level aggregation, recomputed on every call
//! - `refresh_gate`: the shared refresh cooldown

pub mod accrual;
pub mod holding;
pub mod refresh_gate;
pub mod stats;

pub use accrual::apply_quote;
pub use holding::Holding;
pub use refresh_gate::{RefreshGate, DEFAULT_COOLDOWN_MINUTES};
pub use stats::{aggregate, PortfolioStats};
