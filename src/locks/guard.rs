//! RAII lock guard implementation.

use super::types::Lock;
use crate::error::Result;
use crate::store::LockStore;
use std::sync::Arc;
use tracing::warn;

/// RAII guard for a gained lock.
///
/// When dropped, the lock is released by writing an absent lock to its key.
/// If that write fails, a warning is logged but no panic occurs.
pub struct LockGuard {
    store: Arc<dyn LockStore>,

    /// Store key of the held lock.
    key: String,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    pub(super) fn new(store: Arc<dyn LockStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            released: false,
        }
    }

    /// Store key of the held lock.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Manually release the lock.
    ///
    /// Use this instead of dropping when the release error matters.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.store.write(&self.key, &Lock::Absent)
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("key", &self.key)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.store.write(&self.key, &Lock::Absent)
        {
            warn!(key = %self.key, error = %e, "failed to release lock");
        }
    }
}
