//! Refresh cooldown gate.
//!
//! One global cooldown window shared by the single-holding and
//! whole-portfolio refresh paths. Refreshing anything starts the same
//! window that blocks everything else; this throttles the upstream quote
//! source rather than rate-limiting per holding. The last refresh stamp is
//! persisted (epoch milliseconds as a decimal string) so the window
//! survives restarts, and the clock is injected so tests can time-travel.

use std::sync::Arc;

use chrono::Duration;

use crate::ports::clock::Clock;
use crate::ports::storage::{KeyValueStore, StoreError, LAST_REFRESH_KEY};

/// Default cooldown between refresh operations.
pub const DEFAULT_COOLDOWN_MINUTES: i64 = 30;

/// Clock-backed cooldown gate over the shared persistence adapter.
pub struct RefreshGate<S, C> {
    store: Arc<S>,
    clock: C,
    cooldown: Duration,
}

impl<S: KeyValueStore, C: Clock> RefreshGate<S, C> {
    pub fn new(store: Arc<S>, clock: C, cooldown_minutes: i64) -> Self {
        Self {
            store,
            clock,
            cooldown: Duration::minutes(cooldown_minutes),
        }
    }

    /// Whether the cooldown window has elapsed since the last recorded
    /// refresh. Always true when no refresh was ever recorded or the stamp
    /// is unreadable.
    pub fn can_refresh(&self) -> bool {
        match self.last_refresh_millis() {
            Some(last) => self.clock.now().timestamp_millis() - last >= self.cooldown.num_milliseconds(),
            None => true,
        }
    }

    /// Time left until the next refresh is allowed, zero once elapsed.
    pub fn remaining(&self) -> Duration {
        let Some(last) = self.last_refresh_millis() else {
            return Duration::zero();
        };
        let elapsed = self.clock.now().timestamp_millis() - last;
        let left = self.cooldown.num_milliseconds() - elapsed;
        if left > 0 {
            Duration::milliseconds(left)
        } else {
            Duration::zero()
        }
    }

    /// Remaining wait rounded up to whole minutes, for user display.
    pub fn remaining_minutes(&self) -> i64 {
        let millis = self.remaining().num_milliseconds();
        (millis + 59_999) / 60_000
    }

    /// Stamp the current time as the last refresh.
    pub fn record(&self) -> Result<(), StoreError> {
        let now = self.clock.now().timestamp_millis();
        self.store.set(LAST_REFRESH_KEY, &now.to_string())
    }

    fn last_refresh_millis(&self) -> Option<i64> {
        self.store
            .get(LAST_REFRESH_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{ManualClock, MemoryStore};

    fn gate() -> (RefreshGate<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::fixed();
        let gate = RefreshGate::new(
            Arc::new(MemoryStore::new()),
            clock.clone(),
            DEFAULT_COOLDOWN_MINUTES,
        );
        (gate, clock)
    }

    #[test]
    fn test_unrecorded_gate_is_open() {
        let (gate, _clock) = gate();
        assert!(gate.can_refresh());
        assert_eq!(gate.remaining(), Duration::zero());
        assert_eq!(gate.remaining_minutes(), 0);
    }

    #[test]
    fn test_gate_closes_after_record_and_reopens_after_window() {
        let (gate, clock) = gate();
        gate.record().unwrap();

        assert!(!gate.can_refresh());
        let remaining = gate.remaining();
        assert!(remaining > Duration::zero());
        assert!(remaining <= Duration::minutes(30));
        assert_eq!(gate.remaining_minutes(), 30);

        clock.advance(Duration::minutes(29));
        assert!(!gate.can_refresh());
        assert_eq!(gate.remaining_minutes(), 1);

        clock.advance(Duration::minutes(1));
        assert!(gate.can_refresh());
        assert_eq!(gate.remaining(), Duration::zero());
        assert_eq!(gate.remaining_minutes(), 0);
    }

    #[test]
    fn test_remaining_minutes_rounds_up() {
        let (gate, clock) = gate();
        gate.record().unwrap();

        clock.advance(Duration::minutes(29) + Duration::seconds(30));
        assert_eq!(gate.remaining_minutes(), 1);
    }

    #[test]
    fn test_garbage_stamp_opens_the_gate() {
        let clock = ManualClock::fixed();
        let store = MemoryStore::new().with_entry(LAST_REFRESH_KEY, "not-a-number");
        let gate = RefreshGate::new(Arc::new(store), clock, DEFAULT_COOLDOWN_MINUTES);

        assert!(gate.can_refresh());
        assert_eq!(gate.remaining_minutes(), 0);
    }
}
