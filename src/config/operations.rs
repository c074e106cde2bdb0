//! Config loading, validation, and wiring.

use super::model::{GuardConfig, StoreKind};
use crate::clock::Clock;
use crate::error::{LatchError, Result};
use crate::locks::Protector;
use crate::store::{FilesystemLockStore, InMemoryLockStore, LockStore};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;
use std::sync::Arc;

impl GuardConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(GuardConfig)` - Successfully loaded and validated config
    /// * `Err(LatchError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LatchError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GuardConfig = serde_yaml::from_str(yaml)
            .map_err(|e| LatchError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| LatchError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// - `max_attempts` must be positive
    /// - `lease_seconds` must be positive
    /// - `lock_dir` must be non-empty for the filesystem store
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(LatchError::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.lease_seconds == 0 {
            return Err(LatchError::Config(
                "lease_seconds must be greater than 0".to_string(),
            ));
        }

        if self.store == StoreKind::Filesystem && self.lock_dir.as_os_str().is_empty() {
            return Err(LatchError::Config(
                "lock_dir must not be empty for the filesystem store".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the configured store.
    pub fn build_store(&self) -> Arc<dyn LockStore> {
        match self.store {
            StoreKind::Filesystem => Arc::new(FilesystemLockStore::new(&self.lock_dir)),
            StoreKind::Memory => Arc::new(InMemoryLockStore::new()),
        }
    }

    /// Build a protector over `store` with this config's retry policy.
    pub fn protector(&self, store: Arc<dyn LockStore>) -> Protector {
        Protector::new(store, self.max_attempts, self.attempt_interval_seconds)
    }

    /// Deadline one lease from the clock's current time.
    pub fn deadline(&self, clock: &dyn Clock) -> DateTime<Utc> {
        let lease = i64::try_from(self.lease_seconds).unwrap_or(i64::MAX);
        let lease = Duration::try_seconds(lease).unwrap_or(Duration::MAX);
        clock
            .now()
            .checked_add_signed(lease)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
