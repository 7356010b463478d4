//! Adapters Layer - External System Implementations
//!
//! Implementations of the port traits:
//! - Eastmoney: mobile fund API client (quote provider)
//! - Storage: JSON-file key/value store (persistence adapter)
//! - CLI: command-line interface

pub mod cli;
pub mod eastmoney;
pub mod storage;

pub use cli::CliApp;
pub use eastmoney::{EastmoneyClient, EastmoneyConfig};
pub use storage::JsonFileStore;
