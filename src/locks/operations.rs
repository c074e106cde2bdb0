//! Lock acquisition, release, and the blocking protect loop.

use super::events::{LockAttempt, LockFailed, LockGained, ProtectHooks, ProtectOutcome};
use super::guard::LockGuard;
use super::inspector::{DefaultLockInspector, LockInspector};
use super::types::{Held, Lock, LockInfo, lock_key};
use crate::clock::{Clock, SystemClock};
use crate::delay::{Delay, ThreadDelay};
use crate::error::Result;
use crate::store::{LockStore, Swap};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Acquires and releases locks held in a [`LockStore`].
///
/// The protector keeps no lock state of its own; the store is the single
/// source of truth and may be shared with other processes.
#[derive(Clone)]
pub struct Protector {
    store: Arc<dyn LockStore>,
    inspector: Arc<dyn LockInspector>,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
    custom_inspector: bool,
    max_attempts: u32,
    attempt_interval_seconds: u64,
}

impl Protector {
    /// Create a protector using the system clock and real sleeps.
    pub fn new(store: Arc<dyn LockStore>, max_attempts: u32, attempt_interval_seconds: u64) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            store,
            inspector: Arc::new(DefaultLockInspector::new(clock.clone())),
            clock,
            delay: Arc::new(ThreadDelay),
            custom_inspector: false,
            max_attempts,
            attempt_interval_seconds,
        }
    }

    /// Use `clock` for telemetry and, unless a custom inspector was set, for
    /// the default inspector.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        if !self.custom_inspector {
            self.inspector = Arc::new(DefaultLockInspector::new(clock.clone()));
        }
        self.clock = clock;
        self
    }

    /// Replace the inspector. Later [`Protector::with_clock`] calls keep it.
    pub fn with_inspector(mut self, inspector: Arc<dyn LockInspector>) -> Self {
        self.inspector = inspector;
        self.custom_inspector = true;
        self
    }

    /// Replace the wait between attempts.
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn attempt_interval_seconds(&self) -> u64 {
        self.attempt_interval_seconds
    }

    pub fn store(&self) -> &Arc<dyn LockStore> {
        &self.store
    }

    /// Try once to gain `new_lock`.
    ///
    /// A free or expired slot is written and then re-read, so a competing
    /// writer that got in between is noticed and the attempt fails. A live
    /// lock is only granted back to its own actor, without a write.
    pub fn gain_lock(&self, new_lock: &Held) -> Result<bool> {
        let key = new_lock.key();
        let wanted = Lock::Held(new_lock.clone());
        let mut written = false;

        loop {
            let existing = self.store.read(key)?;
            let claimable = match &existing {
                Lock::Absent => true,
                Lock::Held(held) => self.inspector.has_expired(held),
            };

            if !claimable {
                return Ok(self.inspector.was_locked_by(&existing, new_lock.actor()));
            }

            // Our own write already past its deadline; re-writing it would never settle.
            if written && existing == wanted {
                return Ok(true);
            }

            debug!(key, actor = new_lock.actor(), "claiming free or expired lock");
            match self.store.compare_and_swap(key, &existing, &wanted)? {
                Swap::Swapped => written = true,
                Swap::Conflict => {}
                Swap::Unsupported => {
                    self.store.write(key, &wanted)?;
                    written = true;
                }
            }
        }
    }

    /// Clear the lock at `id` regardless of who holds it.
    ///
    /// Only call after this actor's own successful gain.
    pub fn release_lock(&self, id: Option<&str>) -> Result<()> {
        self.store.write(lock_key(id), &Lock::Absent)
    }

    /// Block until `actor` gains the lock at `id` or attempts run out.
    ///
    /// On success the gained hook runs while the lock is held, then the lock
    /// is released. Exactly one of the gained or failed hooks is called
    /// unless a store fault is returned.
    pub fn protect(
        &self,
        id: Option<&str>,
        actor: &str,
        until: DateTime<Utc>,
        mut hooks: ProtectHooks<'_>,
    ) -> Result<ProtectOutcome> {
        let lock = Held::build(id.map(str::to_string), actor.to_string(), until)?;
        let outcome = self.retry(&lock, &mut |attempt: &LockAttempt| hooks.attempt(attempt))?;

        match &outcome {
            ProtectOutcome::Gained(gained) => {
                let guard = LockGuard::new(self.store.clone(), lock.key());
                hooks.gained(gained);
                guard.release()?;
            }
            ProtectOutcome::Failed(failed) => hooks.failed(failed),
        }

        Ok(outcome)
    }

    /// Run `critical_section` while holding the lock at `id`.
    ///
    /// Returns `Ok(None)` if the lock could not be gained. The lock is
    /// released even if `critical_section` panics.
    pub fn run_exclusive<T>(
        &self,
        id: Option<&str>,
        actor: &str,
        until: DateTime<Utc>,
        critical_section: impl FnOnce() -> T,
    ) -> Result<Option<T>> {
        let Some(guard) = self.acquire(id, actor, until)? else {
            return Ok(None);
        };

        let value = critical_section();
        guard.release()?;
        Ok(Some(value))
    }

    /// Retry until the lock is gained and hand back a guard that releases it.
    pub fn acquire(
        &self,
        id: Option<&str>,
        actor: &str,
        until: DateTime<Utc>,
    ) -> Result<Option<LockGuard>> {
        let lock = Held::build(id.map(str::to_string), actor.to_string(), until)?;

        match self.retry(&lock, &mut |_: &LockAttempt| {})? {
            ProtectOutcome::Gained(_) => Ok(Some(LockGuard::new(self.store.clone(), lock.key()))),
            ProtectOutcome::Failed(_) => Ok(None),
        }
    }

    /// Report what the store currently holds at `id`.
    pub fn inspect(&self, id: Option<&str>) -> Result<LockInfo> {
        let key = lock_key(id);
        let lock = self.store.read(key)?;
        let is_expired = lock
            .as_held()
            .is_some_and(|held| self.inspector.has_expired(held));

        Ok(LockInfo {
            key: key.to_string(),
            lock,
            is_expired,
        })
    }

    /// Remove the entry at `id` from the store entirely.
    pub fn clear_lock(&self, id: Option<&str>) -> Result<()> {
        let key = lock_key(id);
        self.store.delete(key)?;
        info!(key, "lock cleared");
        Ok(())
    }

    fn retry(
        &self,
        lock: &Held,
        on_attempt: &mut dyn FnMut(&LockAttempt),
    ) -> Result<ProtectOutcome> {
        let start = self.clock.now();
        let mut attempt = 0;

        while attempt < self.max_attempts {
            attempt += 1;

            if self.gain_lock(lock)? {
                let gained = LockGained {
                    attempts_made: attempt,
                    max_attempts: self.max_attempts,
                    time_taken: self.seconds_since(start),
                };
                info!(key = lock.key(), actor = lock.actor(), "{}", gained);
                return Ok(ProtectOutcome::Gained(gained));
            }

            if attempt == self.max_attempts {
                break;
            }

            let event = LockAttempt {
                attempts_made: attempt,
                max_attempts: self.max_attempts,
                time_taken: self.seconds_since(start),
                seconds_until_next_attempt: self.attempt_interval_seconds,
            };
            debug!(key = lock.key(), actor = lock.actor(), "{}", event);
            on_attempt(&event);
            self.delay.delay(self.attempt_interval_seconds);
        }

        let failed = LockFailed {
            attempts_made: attempt,
            time_taken: self.seconds_since(start),
        };
        warn!(key = lock.key(), actor = lock.actor(), "{}", failed);
        Ok(ProtectOutcome::Failed(failed))
    }

    fn seconds_since(&self, start: DateTime<Utc>) -> i64 {
        self.clock.now().timestamp() - start.timestamp()
    }
}

impl std::fmt::Debug for Protector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protector")
            .field("max_attempts", &self.max_attempts)
            .field("attempt_interval_seconds", &self.attempt_interval_seconds)
            .finish_non_exhaustive()
    }
}
