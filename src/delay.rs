//! Waiting between lock attempts.

use std::time::Duration;

/// Blocks the calling thread between attempts.
pub trait Delay: Send + Sync {
    fn delay(&self, seconds: u64);
}

/// Real `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&self, seconds: u64) {
        std::thread::sleep(Duration::from_secs(seconds));
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay(&self, _seconds: u64) {}
}

impl<F> Delay for F
where
    F: Fn(u64) + Send + Sync,
{
    fn delay(&self, seconds: u64) {
        self(seconds)
    }
}
