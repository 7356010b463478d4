//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The upstream quote provider (fund detail + latest net value)
//! - The key/value persistence adapter
//! - Wall-clock time (injected so cooldown logic is testable)

pub mod clock;
pub mod mocks;
pub mod quote_provider;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use quote_provider::{FundQuote, QuoteError, QuoteProvider};
pub use storage::{KeyValueStore, StoreError, HOLDINGS_KEY, LAST_REFRESH_KEY};
