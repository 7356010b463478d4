//! Portfolio Orchestrator
//!
//! Coordinates the user-facing operations end-to-end: add, remove, edit,
//! single and batch refresh, and stats. Refreshes flow through the shared
//! cooldown gate, apply accrual per holding, and persist the whole
//! collection in one write.
//!
//! Failure policy is deliberately asymmetric: a single-holding refresh
//! surfaces its fetch error and persists nothing, while the batch catches
//! each holding's failure independently and carries the stale holding
//! over unchanged, so one bad quote never blocks the rest of the
//! portfolio.

use std::sync::Arc;

use futures::future;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::application::holdings_store::HoldingsStore;
use crate::domain::accrual::apply_quote;
use crate::domain::holding::Holding;
use crate::domain::refresh_gate::RefreshGate;
use crate::domain::stats::{aggregate, PortfolioStats};
use crate::ports::clock::Clock;
use crate::ports::quote_provider::{FundQuote, QuoteError, QuoteProvider};
use crate::ports::storage::{KeyValueStore, StoreError};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("fund {0} is not in the portfolio")]
    NotFound(String),

    #[error("refresh available in {0} minute(s)")]
    RateLimited(i64),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("quote fetch failed: {0}")]
    Fetch(#[from] QuoteError),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Result of a whole-portfolio refresh. `attempted` counts every holding
/// in the batch, including the ones whose fetch failed and passed through
/// unchanged.
#[derive(Debug)]
pub struct BatchOutcome {
    pub holdings: Vec<Holding>,
    pub attempted: usize,
    pub failed: usize,
}

pub struct PortfolioOrchestrator<P, S, C> {
    provider: P,
    holdings: HoldingsStore<S>,
    gate: RefreshGate<S, C>,
    clock: C,
}

impl<P, S, C> PortfolioOrchestrator<P, S, C>
where
    P: QuoteProvider,
    S: KeyValueStore,
    C: Clock + Clone,
{
    pub fn new(provider: P, store: Arc<S>, clock: C, cooldown_minutes: i64) -> Self {
        Self {
            provider,
            holdings: HoldingsStore::new(store.clone()),
            gate: RefreshGate::new(store, clock.clone(), cooldown_minutes),
            clock,
        }
    }

    /// Current holdings in display order.
    pub fn list(&self) -> Result<Vec<Holding>, TrackerError> {
        Ok(self.holdings.load()?)
    }

    /// Current portfolio totals, recomputed from the stored holdings.
    pub fn stats(&self) -> Result<PortfolioStats, TrackerError> {
        Ok(aggregate(&self.holdings.load()?))
    }

    /// Fetch a quote snapshot for preview, without touching the portfolio.
    pub async fn lookup(&self, code: &str) -> Result<FundQuote, TrackerError> {
        validate_code(code)?;
        Ok(self.provider.fetch_quote(code).await?)
    }

    /// Add a fund with its invested amount. The initial quote seeds the
    /// holding; accumulated profit starts at zero and the first refresh
    /// afterwards rolls nothing over.
    pub async fn add(&self, code: &str, amount: Decimal) -> Result<Vec<Holding>, TrackerError> {
        validate_code(code)?;
        validate_amount(amount)?;

        let mut all = self.holdings.load()?;
        if all.iter().any(|h| h.code == code) {
            return Err(TrackerError::InvalidInput(format!(
                "fund {code} is already in the portfolio"
            )));
        }

        let quote = self.provider.fetch_quote(code).await?;
        let holding = Holding::from_quote(&quote, amount, self.clock.now());

        tracing::info!(code, name = %holding.name, %amount, "adding fund");
        all.insert(0, holding);
        self.holdings.save(&all)?;
        Ok(all)
    }

    /// Remove a fund by code. Unknown codes are a silent no-op and leave
    /// the persisted collection untouched.
    pub fn remove(&self, code: &str) -> Result<Vec<Holding>, TrackerError> {
        let mut all = self.holdings.load()?;
        let before = all.len();
        all.retain(|h| h.code != code);

        if all.len() != before {
            tracing::info!(code, "removing fund");
            self.holdings.save(&all)?;
        }
        Ok(all)
    }

    /// Change the invested amount for a fund. Unknown codes are a silent
    /// no-op; the amount itself never changes through refreshes.
    pub fn set_amount(&self, code: &str, amount: Decimal) -> Result<Vec<Holding>, TrackerError> {
        validate_amount(amount)?;

        let mut all = self.holdings.load()?;
        if let Some(holding) = all.iter_mut().find(|h| h.code == code) {
            holding.amount = amount;
            self.holdings.save(&all)?;
        }
        Ok(all)
    }

    /// Refresh one holding. A fetch failure surfaces to the caller and
    /// persists nothing; on success the whole collection is written and
    /// the cooldown stamped.
    pub async fn refresh_one(&self, code: &str, force: bool) -> Result<Vec<Holding>, TrackerError> {
        let mut all = self.holdings.load()?;
        let idx = all
            .iter()
            .position(|h| h.code == code)
            .ok_or_else(|| TrackerError::NotFound(code.to_string()))?;

        self.check_gate(force)?;

        let quote = self.provider.fetch_quote(code).await?;
        all[idx] = apply_quote(&all[idx], &quote);

        self.holdings.save(&all)?;
        self.gate.record()?;
        tracing::info!(code, "fund refreshed");
        Ok(all)
    }

    /// Refresh every holding concurrently. Per-holding fetch failures are
    /// logged and that holding passes through unchanged; the batch always
    /// persists the resulting mix and reports the attempted count.
    pub async fn refresh_all(&self, force: bool) -> Result<BatchOutcome, TrackerError> {
        let all = self.holdings.load()?;
        if all.is_empty() {
            return Ok(BatchOutcome {
                holdings: all,
                attempted: 0,
                failed: 0,
            });
        }

        self.check_gate(force)?;

        let fetches = all.iter().map(|h| self.provider.fetch_quote(&h.code));
        let results = future::join_all(fetches).await;

        let mut failed = 0;
        let updated: Vec<Holding> = all
            .iter()
            .zip(results)
            .map(|(holding, result)| match result {
                Ok(quote) => apply_quote(holding, &quote),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(code = %holding.code, error = %e, "quote fetch failed, keeping stale holding");
                    holding.clone()
                }
            })
            .collect();

        self.holdings.save(&updated)?;
        self.gate.record()?;

        let attempted = updated.len();
        tracing::info!(attempted, failed, "portfolio refresh complete");
        Ok(BatchOutcome {
            holdings: updated,
            attempted,
            failed,
        })
    }

    fn check_gate(&self, force: bool) -> Result<(), TrackerError> {
        if !force && !self.gate.can_refresh() {
            return Err(TrackerError::RateLimited(self.gate.remaining_minutes()));
        }
        Ok(())
    }
}

fn validate_code(code: &str) -> Result<(), TrackerError> {
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrackerError::InvalidInput(format!(
            "fund code must be six digits, got '{code}'"
        )));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<(), TrackerError> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::InvalidInput(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{ManualClock, MemoryStore, MockQuoteProvider};
    use crate::ports::storage::HOLDINGS_KEY;
    use rust_decimal_macros::dec;

    fn quote(code: &str, change: &str, date: &str) -> FundQuote {
        FundQuote {
            name: Some(format!("fund-{code}")),
            nav: Some(dec!(1.0)),
            change: Some(change.parse().unwrap()),
            as_of_date: Some(date.to_string()),
            ..FundQuote::new(code)
        }
    }

    fn orchestrator(
        provider: MockQuoteProvider,
    ) -> (
        PortfolioOrchestrator<MockQuoteProvider, MemoryStore, ManualClock>,
        MemoryStore,
        ManualClock,
    ) {
        let store = MemoryStore::new();
        let clock = ManualClock::fixed();
        let orch = PortfolioOrchestrator::new(provider, Arc::new(store.clone()), clock.clone(), 30);
        (orch, store, clock)
    }

    #[tokio::test]
    async fn test_add_validates_and_persists() {
        let provider = MockQuoteProvider::new().with_quote("110011", quote("110011", "1.2", "2024-01-02"));
        let (orch, store, _) = orchestrator(provider);

        assert!(matches!(
            orch.add("abc", dec!(100)).await,
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            orch.add("110011", dec!(0)).await,
            Err(TrackerError::InvalidInput(_))
        ));

        let all = orch.add("110011", dec!(100)).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].accumulated_profit, Decimal::ZERO);
        assert_eq!(all[0].last_update_date.as_deref(), Some("2024-01-02"));
        assert!(store.raw(HOLDINGS_KEY).is_some());

        // duplicates rejected before any fetch side effect
        assert!(matches!(
            orch.add("110011", dec!(100)).await,
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_new_holdings_go_to_the_front() {
        let provider = MockQuoteProvider::new()
            .with_quote("110011", quote("110011", "1.0", "2024-01-02"))
            .with_quote("161725", quote("161725", "2.0", "2024-01-02"));
        let (orch, _, _) = orchestrator(provider);

        orch.add("110011", dec!(100)).await.unwrap();
        let all = orch.add("161725", dec!(200)).await.unwrap();
        assert_eq!(all[0].code, "161725");
        assert_eq!(all[1].code, "110011");
    }

    #[tokio::test]
    async fn test_remove_unknown_code_is_a_silent_noop() {
        let provider = MockQuoteProvider::new().with_quote("110011", quote("110011", "1.0", "2024-01-02"));
        let (orch, store, _) = orchestrator(provider);
        orch.add("110011", dec!(100)).await.unwrap();
        let persisted = store.raw(HOLDINGS_KEY).unwrap();

        let all = orch.remove("999999").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(store.raw(HOLDINGS_KEY).unwrap(), persisted);

        let all = orch.remove("110011").unwrap();
        assert!(all.is_empty());
        assert_eq!(store.raw(HOLDINGS_KEY).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_set_amount_edits_known_and_ignores_unknown() {
        let provider = MockQuoteProvider::new().with_quote("110011", quote("110011", "1.0", "2024-01-02"));
        let (orch, store, _) = orchestrator(provider);
        orch.add("110011", dec!(100)).await.unwrap();
        let persisted = store.raw(HOLDINGS_KEY).unwrap();

        assert!(matches!(
            orch.set_amount("110011", dec!(-5)),
            Err(TrackerError::InvalidInput(_))
        ));

        let all = orch.set_amount("999999", dec!(50)).unwrap();
        assert_eq!(all[0].amount, dec!(100));
        assert_eq!(store.raw(HOLDINGS_KEY).unwrap(), persisted);

        let all = orch.set_amount("110011", dec!(250)).unwrap();
        assert_eq!(all[0].amount, dec!(250));
    }

    #[tokio::test]
    async fn test_refresh_one_unknown_code() {
        let provider = MockQuoteProvider::new();
        let (orch, _, _) = orchestrator(provider);

        assert!(matches!(
            orch.refresh_one("110011", false).await,
            Err(TrackerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_one_failure_persists_nothing() {
        let provider = MockQuoteProvider::new().with_quote("110011", quote("110011", "1.0", "2024-01-02"));
        let (orch, store, _) = orchestrator(provider.clone());
        orch.add("110011", dec!(100)).await.unwrap();
        let persisted = store.raw(HOLDINGS_KEY).unwrap();

        let failing = MockQuoteProvider::new().with_failure("110011", "timeout");
        let orch2 = PortfolioOrchestrator::new(
            failing,
            Arc::new(store.clone()),
            ManualClock::fixed(),
            30,
        );

        assert!(matches!(
            orch2.refresh_one("110011", true).await,
            Err(TrackerError::Fetch(_))
        ));
        assert_eq!(store.raw(HOLDINGS_KEY).unwrap(), persisted);
    }

    #[tokio::test]
    async fn test_rate_limit_is_shared_between_single_and_batch() {
        let provider = MockQuoteProvider::new().with_quote("110011", quote("110011", "1.0", "2024-01-02"));
        let (orch, _, clock) = orchestrator(provider);
        orch.add("110011", dec!(100)).await.unwrap();

        orch.refresh_one("110011", false).await.unwrap();

        // the single refresh just stamped the shared gate
        let err = orch.refresh_all(false).await.unwrap_err();
        match err {
            TrackerError::RateLimited(minutes) => {
                assert!(minutes > 0 && minutes <= 30);
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }

        // force bypasses the gate
        assert!(orch.refresh_all(true).await.is_ok());

        clock.advance(chrono::Duration::minutes(30));
        assert!(orch.refresh_one("110011", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_all_empty_portfolio_is_a_noop() {
        let provider = MockQuoteProvider::new();
        let (orch, store, _) = orchestrator(provider);

        let outcome = orch.refresh_all(false).await.unwrap();
        assert_eq!(outcome.attempted, 0);
        // no gate stamp for an empty batch
        assert!(store.raw(crate::ports::storage::LAST_REFRESH_KEY).is_none());
    }

    #[tokio::test]
    async fn test_batch_tolerates_partial_failure() {
        let provider = MockQuoteProvider::new()
            .with_quote("000001", quote("000001", "1.0", "2024-01-02"))
            .with_quote("000002", quote("000002", "1.0", "2024-01-02"))
            .with_quote("000003", quote("000003", "1.0", "2024-01-02"));
        let (orch, store, _) = orchestrator(provider.clone());
        orch.add("000003", dec!(300)).await.unwrap();
        orch.add("000002", dec!(200)).await.unwrap();
        orch.add("000001", dec!(100)).await.unwrap();

        // next trading day for 1 and 3; the middle holding's fetch dies
        provider.set_quote("000001", quote("000001", "2.0", "2024-01-03"));
        provider.set_quote("000003", quote("000003", "-1.0", "2024-01-03"));
        let provider = provider.with_failure("000002", "connection reset");
        let orch = PortfolioOrchestrator::new(
            provider,
            Arc::new(store.clone()),
            ManualClock::fixed(),
            30,
        );

        let before = orch.list().unwrap();
        let outcome = orch.refresh_all(true).await.unwrap();

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.holdings[0].last_update_date.as_deref(), Some("2024-01-03"));
        assert_eq!(outcome.holdings[2].last_update_date.as_deref(), Some("2024-01-03"));
        // the failed holding is carried over byte-for-byte
        assert_eq!(outcome.holdings[1], before[1]);

        // the whole mix was persisted
        assert_eq!(orch.list().unwrap(), outcome.holdings);
    }

    #[tokio::test]
    async fn test_batch_applies_accrual_per_holding() {
        let provider = MockQuoteProvider::new().with_quote("000001", quote("000001", "2.0", "2024-01-02"));
        let (orch, _, _) = orchestrator(provider.clone());
        orch.add("000001", dec!(1000)).await.unwrap();

        provider.set_quote("000001", quote("000001", "-1.0", "2024-01-03"));
        let outcome = orch.refresh_all(true).await.unwrap();

        assert_eq!(outcome.holdings[0].accumulated_profit, dec!(20.0));
        assert_eq!(outcome.holdings[0].change, Some(dec!(-1.0)));
    }

    #[tokio::test]
    async fn test_stats_reflect_current_collection() {
        let provider = MockQuoteProvider::new()
            .with_quote("000001", quote("000001", "2", "2024-01-02"))
            .with_quote("000002", quote("000002", "-1", "2024-01-02"));
        let (orch, _, _) = orchestrator(provider);
        orch.add("000002", dec!(2000)).await.unwrap();
        orch.add("000001", dec!(1000)).await.unwrap();

        let stats = orch.stats().unwrap();
        assert_eq!(stats.total_amount, dec!(3000));
        assert_eq!(stats.today_profit, Decimal::ZERO);
        assert_eq!(stats.total_profit, Decimal::ZERO);
    }
}
