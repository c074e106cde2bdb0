use crate::clock::FrozenClock;
use crate::delay::Delay;
use crate::locks::{LockAttempt, LockFailed, LockGained, ProtectHooks};
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::sync::{Arc, Mutex};

/// The instant `secs` seconds after the Unix epoch.
pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

/// Delay that moves a frozen clock forward instead of sleeping.
pub(crate) struct AdvancingDelay {
    clock: Arc<FrozenClock>,
    waits: Mutex<Vec<u64>>,
}

impl AdvancingDelay {
    pub(crate) fn new(clock: Arc<FrozenClock>) -> Arc<Self> {
        Arc::new(Self {
            clock,
            waits: Mutex::new(Vec::new()),
        })
    }

    /// Every wait requested so far, in seconds.
    pub(crate) fn waits(&self) -> Vec<u64> {
        self.waits.lock().unwrap().clone()
    }
}

impl Delay for AdvancingDelay {
    fn delay(&self, seconds: u64) {
        self.waits.lock().unwrap().push(seconds);
        self.clock.advance(Duration::seconds(seconds as i64));
    }
}

/// One telemetry event seen by a protect call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Recorded {
    Attempt(LockAttempt),
    Gained(LockGained),
    Failed(LockFailed),
}

/// Collects protect telemetry in emission order.
#[derive(Default)]
pub(crate) struct Recorder {
    events: RefCell<Vec<Recorded>>,
}

impl Recorder {
    pub(crate) fn hooks(&self) -> ProtectHooks<'_> {
        ProtectHooks::new()
            .on_attempt(|e| self.events.borrow_mut().push(Recorded::Attempt(*e)))
            .on_lock_gained(|e| self.events.borrow_mut().push(Recorded::Gained(*e)))
            .on_lock_failed(|e| self.events.borrow_mut().push(Recorded::Failed(*e)))
    }

    pub(crate) fn events(&self) -> Vec<Recorded> {
        self.events.borrow().clone()
    }

    pub(crate) fn attempts(&self) -> Vec<LockAttempt> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Attempt(a) => Some(a),
                _ => None,
            })
            .collect()
    }
}
