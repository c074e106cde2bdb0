//! Process-local lock store.

use super::{LockStore, Swap};
use crate::error::Result;
use crate::locks::{DEFAULT_LOCK_KEY, Lock};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Lock store backed by a concurrent map. Supports atomic swaps.
#[derive(Debug, Default)]
pub struct InMemoryLockStore {
    locks: DashMap<String, Lock>,
}

impl InMemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `lock` at the default key.
    pub fn with_lock(lock: Lock) -> Self {
        let store = Self::new();
        store.put(DEFAULT_LOCK_KEY, lock);
        store
    }

    /// Number of keys currently holding a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn put(&self, key: &str, lock: Lock) {
        match lock {
            Lock::Absent => {
                self.locks.remove(key);
            }
            held => {
                self.locks.insert(key.to_string(), held);
            }
        }
    }
}

impl LockStore for InMemoryLockStore {
    fn read(&self, key: &str) -> Result<Lock> {
        Ok(self
            .locks
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn write(&self, key: &str, lock: &Lock) -> Result<()> {
        self.put(key, lock.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.locks.remove(key);
        Ok(())
    }

    fn compare_and_swap(&self, key: &str, expected: &Lock, new: &Lock) -> Result<Swap> {
        let swap = match self.locks.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                if entry.get() != expected {
                    Swap::Conflict
                } else if new.is_absent() {
                    entry.remove();
                    Swap::Swapped
                } else {
                    entry.insert(new.clone());
                    Swap::Swapped
                }
            }
            Entry::Vacant(entry) => {
                if !expected.is_absent() {
                    Swap::Conflict
                } else {
                    if !new.is_absent() {
                        entry.insert(new.clone());
                    }
                    Swap::Swapped
                }
            }
        };
        Ok(swap)
    }
}
