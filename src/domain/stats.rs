//! Portfolio-level aggregation.
//!
//! No aggregate state is ever stored; every figure here is recomputed from
//! the current holdings on each call.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::domain::holding::Holding;

/// Derived portfolio totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Sum of invested principal over all holdings.
    pub total_amount: Decimal,
    /// Sum of today's unrealized profits, from current live quotes.
    pub today_profit: Decimal,
    /// `today_profit / total_amount * 100`, zero for an empty portfolio.
    pub today_profit_rate: Decimal,
    /// All-time realized gains plus today's still-unrealized gain.
    pub total_profit: Decimal,
}

/// Aggregate the current holdings into portfolio totals.
pub fn aggregate(holdings: &[Holding]) -> PortfolioStats {
    let mut total_amount = Decimal::ZERO;
    let mut today_profit = Decimal::ZERO;
    let mut accumulated = Decimal::ZERO;

    for holding in holdings {
        total_amount += holding.amount;
        today_profit += holding.today_profit();
        accumulated += holding.accumulated_profit;
    }

    let today_profit_rate = if total_amount > Decimal::ZERO {
        today_profit / total_amount * dec!(100)
    } else {
        Decimal::ZERO
    };

    PortfolioStats {
        total_amount,
        today_profit,
        today_profit_rate,
        total_profit: accumulated + today_profit,
    }
}
