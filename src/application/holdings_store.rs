//! Whole-collection holdings persistence.
//!
//! The collection is serialized as one JSON document under a single key;
//! there are no partial writes. A payload that fails to parse is logged
//! and treated as an empty portfolio rather than an error, so a corrupted
//! store never bricks the tracker.

use std::sync::Arc;

use crate::domain::holding::Holding;
use crate::ports::storage::{KeyValueStore, StoreError, HOLDINGS_KEY};

pub struct HoldingsStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> HoldingsStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the ordered holdings collection; empty when nothing was ever
    /// persisted or the payload is corrupt.
    pub fn load(&self) -> Result<Vec<Holding>, StoreError> {
        let Some(raw) = self.store.get(HOLDINGS_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(holdings) => Ok(holdings),
            Err(e) => {
                tracing::warn!(error = %e, "holdings payload is corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the persisted collection with a single serialized write.
    pub fn save(&self, holdings: &[Holding]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(holdings).map_err(|e| StoreError::Write {
            key: HOLDINGS_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(HOLDINGS_KEY, &raw)
    }
}
