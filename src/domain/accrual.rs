//! Day-rollover accrual.
//!
//! Applying a quote folds the holding's prior day's unrealized profit into
//! its accumulated total exactly once: only when the provider's as-of date
//! string actually changes. The date is an opaque token compared verbatim;
//! re-applying a same-day quote is a no-op for the accumulated total.

use crate::domain::holding::Holding;
use crate::ports::quote_provider::FundQuote;

/// Apply a fresh quote to a holding, accruing first, then merging the
/// quote's fields.
///
/// The rolled profit uses the *pre-update* `amount` and `change`: it is the
/// unrealized profit that was on display throughout the previous trading
/// day. Fields absent in the quote keep their previous values; the invested
/// `amount` is never touched.
pub fn apply_quote(holding: &Holding, quote: &FundQuote) -> Holding {
    // Provider may omit the date; fall back to the stored as-of date so a
    // partial quote never looks like a day change.
    let new_date = quote
        .as_of_date
        .clone()
        .or_else(|| holding.update_time.clone());

    let mut updated = holding.clone();

    if rollover_due(holding.last_update_date.as_deref(), new_date.as_deref()) {
        updated.accumulated_profit += holding.today_profit();
    }

    if let Some(name) = &quote.name {
        updated.name = name.clone();
    }
    if quote.full_name.is_some() {
        updated.full_name = quote.full_name.clone();
    }
    if quote.fund_type.is_some() {
        updated.fund_type = quote.fund_type.clone();
    }
    if quote.company.is_some() {
        updated.company = quote.company.clone();
    }
    if quote.manager.is_some() {
        updated.manager = quote.manager.clone();
    }
    if quote.nav.is_some() {
        updated.nav = quote.nav;
    }
    if quote.change.is_some() {
        updated.change = quote.change;
    }

    updated.update_time = new_date.clone();
    updated.last_update_date = new_date;

    updated
}

/// A rollover is due only when a previous date is known and the new one
/// differs. First-ever quotes and same-day re-fetches accrue nothing.
fn rollover_due(last: Option<&str>, new: Option<&str>) -> bool {
    match (last, new) {
        (Some(last), Some(new)) => !last.is_empty() && last != new,
        _ => false,
    }
}
