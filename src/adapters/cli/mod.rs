//! Command-line interface.

pub mod commands;
pub mod render;

pub use commands::{AddCmd, AmountCmd, CliApp, Command, LookupCmd, RefreshCmd, RemoveCmd};
