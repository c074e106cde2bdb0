//! Latch: advisory actor-based named locks over pluggable durable stores.
//!
//! A lock records which actor holds a named resource and until when. Locks
//! are re-entrant for the same actor and expire on their own, so a crashed
//! holder cannot block others forever.
//!
//! ```no_run
//! use latch::{FilesystemLockStore, ProtectHooks, Protector, default_actor};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FilesystemLockStore::new("/var/lock/reports"));
//! let protector = Protector::new(store, 5, 1);
//! let until = chrono::Utc::now() + chrono::Duration::minutes(5);
//!
//! protector.protect(
//!     Some("nightly-report"),
//!     &default_actor(),
//!     until,
//!     ProtectHooks::new()
//!         .on_lock_gained(|gained| println!("{}", gained))
//!         .on_lock_failed(|failed| eprintln!("{}", failed)),
//! )?;
//! # Ok::<(), latch::LatchError>(())
//! ```

pub mod actor;
pub mod clock;
pub mod config;
pub mod delay;
pub mod error;
pub mod fs;
pub mod locks;
pub mod serialiser;
pub mod store;

#[cfg(test)]
mod test_support;

pub use actor::default_actor;
pub use clock::{Clock, FrozenClock, SystemClock};
pub use config::{GuardConfig, StoreKind};
pub use delay::{Delay, NoDelay, ThreadDelay};
pub use error::{LatchError, Result};
pub use locks::{
    DEFAULT_LOCK_KEY, DefaultLockInspector, Held, Lock, LockAttempt, LockFailed, LockGained,
    LockGuard, LockInfo, LockInspector, ProtectHooks, ProtectOutcome, Protector,
};
pub use serialiser::{JsonLockSerialiser, LockSerialiser};
pub use store::{FilesystemLockStore, InMemoryLockStore, LockStore, Swap};
