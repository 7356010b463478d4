//! Quote provider port
//!
//! Abstracts the upstream fund-quote source. A quote snapshot carries the
//! descriptive metadata plus the latest unit net value, daily change and
//! the provider's as-of date string. Every field except the code is
//! optional: an absent field must never clear the stored value on the
//! holding it is applied to.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quote provider error type
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("no data for fund {0}")]
    NoData(String),
}

/// One quote snapshot for a fund, as delivered by the provider.
///
/// The as-of date is an opaque token at trading-day granularity. It is
/// compared verbatim to decide whether a new market day has started; no
/// parsing or timezone normalization happens anywhere downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundQuote {
    pub code: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub fund_type: Option<String>,
    pub company: Option<String>,
    pub manager: Option<String>,
    /// Latest unit net value.
    pub nav: Option<Decimal>,
    /// Daily change in percent, signed.
    pub change: Option<Decimal>,
    /// Provider's as-of date string for `nav`/`change`.
    pub as_of_date: Option<String>,
}

impl FundQuote {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }
}

/// Quote provider port trait
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote snapshot for one fund code.
    async fn fetch_quote(&self, code: &str) -> Result<FundQuote, QuoteError>;
}
