//! Durable homes for lock values.
//!
//! A [`LockStore`] maps a key to a [`Lock`]. Stores that keep a single lock
//! use [`crate::locks::DEFAULT_LOCK_KEY`] as their only key.
//!
//! Reads followed by writes are not assumed to be atomic. Stores that can
//! swap atomically advertise it through [`LockStore::compare_and_swap`].

mod filesystem;
mod memory;

pub use filesystem::FilesystemLockStore;
pub use memory::InMemoryLockStore;

use crate::error::Result;
use crate::locks::Lock;

/// Result of a native compare-and-swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
    /// The stored value matched and was replaced.
    Swapped,
    /// The stored value differed; nothing was written.
    Conflict,
    /// The store has no atomic swap.
    Unsupported,
}

/// Keyed storage for locks.
pub trait LockStore: Send + Sync {
    /// Read the lock at `key`. A missing entry reads as [`Lock::Absent`].
    fn read(&self, key: &str) -> Result<Lock>;

    /// Overwrite the entry at `key`. Writing [`Lock::Absent`] clears it.
    fn write(&self, key: &str, lock: &Lock) -> Result<()>;

    /// Remove the entry at `key`. Removing a missing entry is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Replace `expected` with `new` atomically.
    fn compare_and_swap(&self, _key: &str, _expected: &Lock, _new: &Lock) -> Result<Swap> {
        Ok(Swap::Unsupported)
    }
}
