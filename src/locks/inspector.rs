//! Expiry and ownership predicates.

use super::types::{Held, Lock};
use crate::clock::Clock;
use std::sync::Arc;

/// Decides whether a stored lock is stale and who holds it.
pub trait LockInspector: Send + Sync {
    /// True once the clock has moved strictly past the lock's deadline.
    fn has_expired(&self, lock: &Held) -> bool;

    /// True if `lock` is held by exactly `actor`.
    fn was_locked_by(&self, lock: &Lock, actor: &str) -> bool;
}

/// Inspector backed by a [`Clock`].
#[derive(Clone)]
pub struct DefaultLockInspector {
    clock: Arc<dyn Clock>,
}

impl DefaultLockInspector {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl LockInspector for DefaultLockInspector {
    fn has_expired(&self, lock: &Held) -> bool {
        self.clock.now() > lock.until()
    }

    fn was_locked_by(&self, lock: &Lock, actor: &str) -> bool {
        lock.actor() == Some(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrozenClock;
    use crate::test_support::at;

    fn inspector_at(secs: i64) -> DefaultLockInspector {
        DefaultLockInspector::new(Arc::new(FrozenClock::new(at(secs))))
    }

    fn held_until(secs: i64) -> Held {
        Held::new("alice", at(secs)).unwrap()
    }

    #[test]
    fn lock_is_valid_exactly_at_its_deadline() {
        assert!(!inspector_at(100).has_expired(&held_until(100)));
    }

    #[test]
    fn lock_expires_one_second_after_deadline() {
        assert!(inspector_at(101).has_expired(&held_until(100)));
    }

    #[test]
    fn lock_before_deadline_is_not_expired() {
        assert!(!inspector_at(99).has_expired(&held_until(100)));
    }

    #[test]
    fn was_locked_by_matches_exact_actor() {
        let inspector = inspector_at(100);
        let lock = Lock::Held(held_until(200));

        assert!(inspector.was_locked_by(&lock, "alice"));
        assert!(!inspector.was_locked_by(&lock, "bob"));
        assert!(!inspector.was_locked_by(&lock, "Alice"));
        assert!(!inspector.was_locked_by(&lock, ""));
    }

    #[test]
    fn absent_lock_is_held_by_nobody() {
        let inspector = inspector_at(100);
        assert!(!inspector.was_locked_by(&Lock::Absent, "alice"));
        assert!(!inspector.was_locked_by(&Lock::Absent, ""));
    }
}
