//! Eastmoney API Client
//!
//! HTTP client for the Eastmoney mobile fund API. A quote snapshot needs
//! two endpoints: `FundMNDetailInformation` for the descriptive metadata
//! and `FundMNHisNetList` (page size 1) for the latest unit net value,
//! daily change and as-of date. Both requests run concurrently.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::ports::quote_provider::{FundQuote, QuoteError, QuoteProvider};

use super::types::{build_quote, DetailResponse, NavListResponse};

/// Eastmoney API client configuration
#[derive(Debug, Clone)]
pub struct EastmoneyConfig {
    /// Base URL for the mobile fund API
    pub api_base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retry attempts per request
    pub max_retries: u32,
}

impl Default for EastmoneyConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://fundmobapi.eastmoney.com/FundMNewApi".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

/// Eastmoney fund quote client
#[derive(Debug, Clone)]
pub struct EastmoneyClient {
    config: EastmoneyConfig,
    http: Client,
}

impl EastmoneyClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, QuoteError> {
        Self::with_config(EastmoneyConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: EastmoneyConfig) -> Result<Self, QuoteError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Fetch the descriptive metadata for a fund
    pub async fn fetch_detail(&self, code: &str) -> Result<DetailResponse, QuoteError> {
        self.get_json("FundMNDetailInformation", &[("FCODE", code)])
            .await
    }

    /// Fetch the latest net-value record for a fund
    pub async fn fetch_latest_nav(&self, code: &str) -> Result<NavListResponse, QuoteError> {
        self.get_json(
            "FundMNHisNetList",
            &[("FCODE", code), ("pageIndex", "1"), ("pagesize", "1")],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, QuoteError> {
        let url = format!("{}/{}", self.config.api_base_url, endpoint);
        let mut last_error = QuoteError::Network("no attempts made".to_string());

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(endpoint, attempt, "retrying request");
                tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
            }

            let response = match self.http.get(&url).query(query).send().await {
                Ok(response) => response,
                Err(e) => {
                    last_error = QuoteError::Network(e.to_string());
                    continue;
                }
            };

            let status = response.status();
            if status.is_server_error() {
                last_error = QuoteError::Status(status.as_u16());
                continue;
            }
            if !status.is_success() {
                return Err(QuoteError::Status(status.as_u16()));
            }

            return response
                .json::<T>()
                .await
                .map_err(|e| QuoteError::Parse(e.to_string()));
        }

        Err(last_error)
    }
}

#[async_trait]
impl QuoteProvider for EastmoneyClient {
    async fn fetch_quote(&self, code: &str) -> Result<FundQuote, QuoteError> {
        let (detail, nav) = tokio::join!(self.fetch_detail(code), self.fetch_latest_nav(code));
        let detail = detail?;
        let nav = nav?;

        let detail = detail
            .datas
            .filter(|d| d.fcode.is_some())
            .ok_or_else(|| QuoteError::NoData(code.to_string()))?;

        Ok(build_quote(code, &detail, nav.datas.first()))
    }
}
