//! Wire types for the Eastmoney mobile fund API.
//!
//! Numeric values arrive as strings and use `--` (or blank) as a no-data
//! sentinel; both map to `None` here so downstream code never sees the
//! sentinel.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ports::quote_provider::FundQuote;

/// `FundMNDetailInformation` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    #[serde(rename = "Datas", default)]
    pub datas: Option<FundDetail>,
}

/// Descriptive fund metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundDetail {
    #[serde(rename = "FCODE", default)]
    pub fcode: Option<String>,
    #[serde(rename = "SHORTNAME", default)]
    pub short_name: Option<String>,
    #[serde(rename = "FULLNAME", default)]
    pub full_name: Option<String>,
    #[serde(rename = "FTYPE", default)]
    pub fund_type: Option<String>,
    #[serde(rename = "JJGS", default)]
    pub company: Option<String>,
    #[serde(rename = "JJJL", default)]
    pub manager: Option<String>,
}

/// `FundMNHisNetList` response envelope; queried with page size 1, so the
/// first record is the latest net value.
#[derive(Debug, Clone, Deserialize)]
pub struct NavListResponse {
    #[serde(rename = "Datas", default)]
    pub datas: Vec<NavRecord>,
}

/// One net-value record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavRecord {
    /// Unit net value.
    #[serde(rename = "DWJZ", default)]
    pub unit_nav: Option<String>,
    /// Daily change in percent.
    #[serde(rename = "JZZZL", default)]
    pub change_pct: Option<String>,
    /// As-of date, `YYYY-MM-DD`.
    #[serde(rename = "FSRQ", default)]
    pub as_of_date: Option<String>,
}

/// Parse a provider numeric string, mapping sentinels to `None`.
pub fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "--" {
        return None;
    }
    raw.parse().ok()
}

/// Assemble a quote snapshot from the two responses.
pub fn build_quote(code: &str, detail: &FundDetail, nav: Option<&NavRecord>) -> FundQuote {
    FundQuote {
        code: code.to_string(),
        name: detail.short_name.clone(),
        full_name: detail.full_name.clone(),
        fund_type: detail.fund_type.clone(),
        company: detail.company.clone(),
        manager: detail.manager.clone(),
        nav: nav.and_then(|n| parse_decimal(n.unit_nav.as_deref())),
        change: nav.and_then(|n| parse_decimal(n.change_pct.as_deref())),
        as_of_date: nav.and_then(|n| n.as_of_date.clone()),
    }
}
