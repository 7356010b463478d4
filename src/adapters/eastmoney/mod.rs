//! Eastmoney mobile fund API adapter.

pub mod client;
pub mod types;

pub use client::{EastmoneyClient, EastmoneyConfig};
