//! Time sources.
//!
//! Lock expiry and protect telemetry read time through the [`Clock`] trait so
//! tests can pin time with a [`FrozenClock`].

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FrozenClock {
    at: Mutex<DateTime<Utc>>,
}

impl FrozenClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at: Mutex::new(at) }
    }

    /// Pin the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.at.lock().unwrap_or_else(|poison| poison.into_inner()) = at;
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut at = self.at.lock().unwrap_or_else(|poison| poison.into_inner());
        *at += by;
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        *self.at.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    #[test]
    fn frozen_clock_does_not_move_on_its_own() {
        let clock = FrozenClock::new(at(100));
        assert_eq!(clock.now(), at(100));
        assert_eq!(clock.now(), at(100));
    }

    #[test]
    fn frozen_clock_set_and_advance() {
        let clock = FrozenClock::new(at(100));
        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), at(105));

        clock.set(at(42));
        assert_eq!(clock.now(), at(42));
    }

    #[test]
    fn system_clock_is_close_to_utc_now() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
        assert!(now - before < Duration::minutes(1));
    }
}
