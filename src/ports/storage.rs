//! Persistence adapter port
//!
//! A minimal string-keyed store, mirroring the browser-storage contract the
//! tracker was designed against: `get` returns the raw serialized value if
//! present, `set` overwrites it whole. Callers always read-modify-write the
//! entire holdings collection; there are no partial writes.

use thiserror::Error;

/// Key under which the serialized holdings collection lives.
pub const HOLDINGS_KEY: &str = "my_funds";

/// Key under which the last refresh timestamp (epoch millis, decimal string)
/// lives.
pub const LAST_REFRESH_KEY: &str = "last_refresh_time";

/// Persistence errors. Writes are best-effort and never retried; a failure
/// surfaces to the caller as-is.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Key/value persistence port trait
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for a key, `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
