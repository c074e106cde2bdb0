//! Telemetry emitted by [`crate::Protector::protect`].

/// A failed attempt that will be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockAttempt {
    pub attempts_made: u32,
    pub max_attempts: u32,
    /// Whole seconds since `protect` began.
    pub time_taken: i64,
    pub seconds_until_next_attempt: u64,
}

/// The lock was gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockGained {
    pub attempts_made: u32,
    pub max_attempts: u32,
    /// Whole seconds since `protect` began.
    pub time_taken: i64,
}

/// Every attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFailed {
    pub attempts_made: u32,
    /// Whole seconds since `protect` began.
    pub time_taken: i64,
}

impl std::fmt::Display for LockAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attempt {}/{} failed after {}s, retrying in {}s",
            self.attempts_made, self.max_attempts, self.time_taken, self.seconds_until_next_attempt
        )
    }
}

impl std::fmt::Display for LockGained {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lock gained on attempt {}/{} after {}s",
            self.attempts_made, self.max_attempts, self.time_taken
        )
    }
}

impl std::fmt::Display for LockFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lock not gained after {} attempts ({}s)",
            self.attempts_made, self.time_taken
        )
    }
}

/// How a `protect` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectOutcome {
    Gained(LockGained),
    Failed(LockFailed),
}

impl ProtectOutcome {
    pub fn is_gained(&self) -> bool {
        matches!(self, ProtectOutcome::Gained(_))
    }
}

type Hook<'a, E> = Option<Box<dyn FnMut(&E) + 'a>>;

/// Optional callbacks for `protect`. Omitted hooks are no-ops.
#[derive(Default)]
pub struct ProtectHooks<'a> {
    pub(crate) on_lock_gained: Hook<'a, LockGained>,
    pub(crate) on_lock_failed: Hook<'a, LockFailed>,
    pub(crate) on_attempt: Hook<'a, LockAttempt>,
}

impl<'a> ProtectHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs while the lock is held, before release.
    pub fn on_lock_gained(mut self, hook: impl FnMut(&LockGained) + 'a) -> Self {
        self.on_lock_gained = Some(Box::new(hook));
        self
    }

    pub fn on_lock_failed(mut self, hook: impl FnMut(&LockFailed) + 'a) -> Self {
        self.on_lock_failed = Some(Box::new(hook));
        self
    }

    pub fn on_attempt(mut self, hook: impl FnMut(&LockAttempt) + 'a) -> Self {
        self.on_attempt = Some(Box::new(hook));
        self
    }

    pub(crate) fn gained(&mut self, event: &LockGained) {
        if let Some(hook) = self.on_lock_gained.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn failed(&mut self, event: &LockFailed) {
        if let Some(hook) = self.on_lock_failed.as_mut() {
            hook(event);
        }
    }

    pub(crate) fn attempt(&mut self, event: &LockAttempt) {
        if let Some(hook) = self.on_attempt.as_mut() {
            hook(event);
        }
    }
}

impl std::fmt::Debug for ProtectHooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectHooks")
            .field("on_lock_gained", &self.on_lock_gained.is_some())
            .field("on_lock_failed", &self.on_lock_failed.is_some())
            .field("on_attempt", &self.on_attempt.is_some())
            .finish()
    }
}
