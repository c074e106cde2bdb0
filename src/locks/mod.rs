//! Locking subsystem for latch.
//!
//! A lock records which actor holds a named resource and until when. The
//! lock lives in a [`crate::store::LockStore`]; the [`Protector`] decides
//! whether a requested lock may be granted.
//!
//! # Acquisition
//!
//! - A free or expired slot is written with the new lock, then re-read. The
//!   attempt succeeds only if the re-read shows the requesting actor, so a
//!   competing writer that slipped in between wins and this attempt fails.
//! - A live lock held by the same actor is granted again without a write.
//! - A live lock held by another actor is refused.
//!
//! Stores offering an atomic compare-and-swap use it for the write.
//!
//! # Expiry
//!
//! A lock is valid up to and including its deadline and expired strictly
//! after it. An expired lock may be taken by anyone.
//!
//! # RAII Guards
//!
//! [`Protector::acquire`] hands back a [`LockGuard`] that releases the lock
//! when dropped. If release fails during drop, a warning is logged but the
//! program does not crash.

mod events;
mod guard;
mod inspector;
mod operations;
mod types;


// Re-export public API
pub use events::{LockAttempt, LockFailed, LockGained, ProtectHooks, ProtectOutcome};
pub use guard::LockGuard;
pub use inspector::{DefaultLockInspector, LockInspector};
pub use operations::Protector;
pub use types::{DEFAULT_LOCK_KEY, Held, Lock, LockInfo, lock_key};
