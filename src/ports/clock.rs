//! Clock port
//!
//! The refresh cooldown compares wall-clock time against a persisted stamp.
//! Injecting the clock keeps that logic deterministic under test.

use chrono::{DateTime, Utc};

/// Clock port trait
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
