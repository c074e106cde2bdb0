//! Config struct definition and defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backing store for locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// One file per lock under `lock_dir` (default).
    #[default]
    Filesystem,
    /// Process-local map; locks vanish with the process.
    Memory,
}

/// Settings for a [`crate::Protector`] and its store.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// How many times `protect` tries before giving up.
    pub max_attempts: u32,

    /// Seconds to wait between attempts.
    pub attempt_interval_seconds: u64,

    /// Seconds a lock stays valid when the deadline is derived from config.
    pub lease_seconds: u64,

    /// Which store to build.
    pub store: StoreKind,

    /// Directory holding lock files (filesystem store only).
    pub lock_dir: PathBuf,
}

pub(crate) const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub(crate) const DEFAULT_ATTEMPT_INTERVAL_SECONDS: u64 = 1;
pub(crate) const DEFAULT_LEASE_SECONDS: u64 = 60;
pub(crate) const DEFAULT_LOCK_DIR: &str = ".locks";

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_interval_seconds: DEFAULT_ATTEMPT_INTERVAL_SECONDS,
            lease_seconds: DEFAULT_LEASE_SECONDS,
            store: StoreKind::default(),
            lock_dir: PathBuf::from(DEFAULT_LOCK_DIR),
        }
    }
}
