use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::clock::Clock;
use super::quote_provider::{FundQuote, QuoteError, QuoteProvider};
use super::storage::{KeyValueStore, StoreError};

/// Mock quote provider that records calls and allows controlled responses
#[derive(Debug, Default, Clone)]
pub struct MockQuoteProvider {
    calls: Arc<Mutex<Vec<String>>>,
    quotes: Arc<Mutex<HashMap<String, FundQuote>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the quote returned for a given code
    pub fn with_quote(self, code: &str, quote: FundQuote) -> Self {
        self.quotes.lock().unwrap().insert(code.to_string(), quote);
        self
    }

    /// Builder method to make fetches for a given code fail
    pub fn with_failure(self, code: &str, reason: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(code.to_string(), reason.to_string());
        self
    }

    /// Replace the quote for a code after construction
    pub fn set_quote(&self, code: &str, quote: FundQuote) {
        self.quotes.lock().unwrap().insert(code.to_string(), quote);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn fetch_quote(&self, code: &str) -> Result<FundQuote, QuoteError> {
        self.calls.lock().unwrap().push(code.to_string());

        if let Some(reason) = self.failures.lock().unwrap().get(code) {
            return Err(QuoteError::Network(reason.clone()));
        }

        self.quotes
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or_else(|| QuoteError::NoData(code.to_string()))
    }
}

/// In-memory key/value store for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to pre-seed a key
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Peek at the raw stored value for a key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "write failure injected".to_string(),
            });
        }
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Manually advanced clock for time-travel tests. Clones share the same
/// underlying instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Start at an arbitrary fixed instant
    pub fn fixed() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
