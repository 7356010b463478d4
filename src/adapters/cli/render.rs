//! Plain-text rendering of holdings, quotes and portfolio totals.

use rust_decimal::Decimal;

use crate::domain::holding::Holding;
use crate::domain::stats::PortfolioStats;
use crate::ports::quote_provider::FundQuote;

/// `+12.34` / `-12.34`, two decimal places.
pub fn signed(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded >= Decimal::ZERO {
        format!("+{rounded:.2}")
    } else {
        format!("{rounded:.2}")
    }
}

fn opt_decimal(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "--".to_string(),
    }
}

fn opt_str(value: Option<&str>) -> &str {
    value.unwrap_or("--")
}

pub fn print_quote(quote: &FundQuote) {
    println!("{}  {}", quote.code, opt_str(quote.name.as_deref()));
    if let Some(full_name) = &quote.full_name {
        println!("  full name: {full_name}");
    }
    println!("  type:      {}", opt_str(quote.fund_type.as_deref()));
    println!("  company:   {}", opt_str(quote.company.as_deref()));
    println!("  manager:   {}", opt_str(quote.manager.as_deref()));
    println!("  nav:       {}", opt_decimal(quote.nav));
    println!(
        "  change:    {}%  ({})",
        quote.change.map(signed).unwrap_or_else(|| "--".to_string()),
        opt_str(quote.as_of_date.as_deref())
    );
}

pub fn print_holdings(holdings: &[Holding], stats: &PortfolioStats) {
    if holdings.is_empty() {
        println!("No funds tracked yet. Add one with: fundwatch add <CODE> <AMOUNT>");
        return;
    }

    println!(
        "{:<8} {:<18} {:>10} {:>8} {:>10} {:>10} {:>9}",
        "code", "name", "amount", "change", "today", "profit", "rate"
    );
    for h in holdings {
        println!(
            "{:<8} {:<18} {:>10.2} {:>8} {:>10} {:>10} {:>8}%",
            h.code,
            h.name,
            h.amount,
            h.change
                .map(|c| format!("{}%", signed(c)))
                .unwrap_or_else(|| "--".to_string()),
            signed(h.today_profit()),
            signed(h.hold_profit()),
            signed(h.hold_profit_rate()),
        );
    }

    println!();
    println!("total amount: {:.2}", stats.total_amount);
    println!(
        "today:        {} ({}%)",
        signed(stats.today_profit),
        signed(stats.today_profit_rate)
    );
    println!("total profit: {}", signed(stats.total_profit));
}
