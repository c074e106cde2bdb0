//! Lock values and inspection results.

use crate::error::{LatchError, Result};
use chrono::{DateTime, Utc};

/// Key used for locks that carry no explicit id.
///
/// Reserved: a [`Held`] with this explicit id is rejected, so a named lock can
/// never share a slot with the implicit one.
pub const DEFAULT_LOCK_KEY: &str = "default";

/// Resolve an optional lock id to the store key it lives under.
pub fn lock_key(id: Option<&str>) -> &str {
    id.unwrap_or(DEFAULT_LOCK_KEY)
}

/// The state of a single lock slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lock {
    /// Nobody holds the lock.
    #[default]
    Absent,
    /// An actor holds the lock until a deadline.
    Held(Held),
}

impl Lock {
    pub fn is_absent(&self) -> bool {
        matches!(self, Lock::Absent)
    }

    pub fn as_held(&self) -> Option<&Held> {
        match self {
            Lock::Absent => None,
            Lock::Held(held) => Some(held),
        }
    }

    /// The holding actor, if any.
    pub fn actor(&self) -> Option<&str> {
        self.as_held().map(Held::actor)
    }
}

impl From<Held> for Lock {
    fn from(held: Held) -> Self {
        Lock::Held(held)
    }
}

/// A lock held by `actor` until `until` (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Held {
    id: Option<String>,
    actor: String,
    until: DateTime<Utc>,
}

impl Held {
    /// Create a lock on the implicit default key.
    pub fn new(actor: impl Into<String>, until: DateTime<Utc>) -> Result<Self> {
        Self::build(None, actor.into(), until)
    }

    /// Create a lock on an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        actor: impl Into<String>,
        until: DateTime<Utc>,
    ) -> Result<Self> {
        Self::build(Some(id.into()), actor.into(), until)
    }

    pub(crate) fn build(id: Option<String>, actor: String, until: DateTime<Utc>) -> Result<Self> {
        if actor.is_empty() {
            return Err(LatchError::InvalidLock(
                "actor must not be empty".to_string(),
            ));
        }
        if id.as_deref() == Some(DEFAULT_LOCK_KEY) {
            return Err(LatchError::InvalidLock(format!(
                "lock id '{}' is reserved for the implicit lock",
                DEFAULT_LOCK_KEY
            )));
        }
        Ok(Self { id, actor, until })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn until(&self) -> DateTime<Utc> {
        self.until
    }

    /// The store key this lock is written under.
    pub fn key(&self) -> &str {
        lock_key(self.id())
    }
}

/// Snapshot of a lock slot as seen by [`crate::Protector::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    /// The store key.
    pub key: String,

    /// The stored lock.
    pub lock: Lock,

    /// Whether the stored lock is past its deadline.
    pub is_expired: bool,
}

impl LockInfo {
    /// Whether some actor currently holds a live lock.
    pub fn is_held(&self) -> bool {
        !self.lock.is_absent() && !self.is_expired
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lock {
            Lock::Absent => write!(f, "{} (free)", self.key),
            Lock::Held(held) => write!(
                f,
                "{} (actor: {}, until: {}{})",
                self.key,
                held.actor(),
                held.until().to_rfc3339(),
                if self.is_expired { ", EXPIRED" } else { "" }
            ),
        }
    }
}
