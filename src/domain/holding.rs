//! The persisted fund holding record.
//!
//! Serialized JSON keeps the original camelCase field names (including the
//! `type` key), so an existing `my_funds` payload loads unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ports::quote_provider::FundQuote;

/// One tracked fund position.
///
/// `accumulated_profit` is the running total of all *previous* days'
/// unrealized profits, each folded in exactly once by accrual. Today's
/// unrealized profit is never stored: it is always recomputed from the
/// current `amount` and `change` (see [`Holding::today_profit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Unique fund code, stable across the collection.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(rename = "type", default)]
    pub fund_type: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    /// Latest known unit net value, `None` when the provider had no data.
    #[serde(default)]
    pub nav: Option<Decimal>,
    /// Latest known daily change in percent, signed.
    #[serde(default)]
    pub change: Option<Decimal>,
    /// As-of date string for the current `nav`/`change`.
    #[serde(default)]
    pub update_time: Option<String>,
    /// As-of date active when accrual last ran; the day-rollover key.
    /// After any successful accrual this equals `update_time`.
    #[serde(default)]
    pub last_update_date: Option<String>,
    /// Invested principal. User-editable, never touched by refreshes.
    pub amount: Decimal,
    /// Realized-to-date profit carried over from prior trading days.
    #[serde(default)]
    pub accumulated_profit: Decimal,
    /// Creation timestamp, immutable.
    pub added_at: DateTime<Utc>,
}

impl Holding {
    /// Create a holding from its first quote snapshot.
    ///
    /// Starts with zero accumulated profit and stamps `last_update_date`
    /// from the quote so the first subsequent refresh does not roll over.
    pub fn from_quote(quote: &FundQuote, amount: Decimal, added_at: DateTime<Utc>) -> Self {
        Self {
            code: quote.code.clone(),
            name: quote.name.clone().unwrap_or_else(|| quote.code.clone()),
            full_name: quote.full_name.clone(),
            fund_type: quote.fund_type.clone(),
            company: quote.company.clone(),
            manager: quote.manager.clone(),
            nav: quote.nav,
            change: quote.change,
            update_time: quote.as_of_date.clone(),
            last_update_date: quote.as_of_date.clone(),
            amount,
            accumulated_profit: Decimal::ZERO,
            added_at,
        }
    }

    /// Today's unrealized profit: `amount * change / 100`.
    ///
    /// Derived on every read, never persisted.
    pub fn today_profit(&self) -> Decimal {
        self.amount * self.change.unwrap_or_default() / dec!(100)
    }

    /// All-time profit of this holding: accumulated plus today's unrealized.
    pub fn hold_profit(&self) -> Decimal {
        self.accumulated_profit + self.today_profit()
    }

    /// `hold_profit` as a percentage of the invested amount, zero when
    /// nothing is invested.
    pub fn hold_profit_rate(&self) -> Decimal {
        if self.amount > Decimal::ZERO {
            self.hold_profit() / self.amount * dec!(100)
        } else {
            Decimal::ZERO
        }
    }
}
