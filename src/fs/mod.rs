//! Filesystem utilities for latch.

pub mod atomic;

pub use atomic::atomic_write;
