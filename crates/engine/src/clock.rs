//! Time source abstraction.
//!
//! The engine reads wall-clock time through a `Clock` so cache expiry,
//! trending windows, and event timestamps can be driven deterministically
//! in tests.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in unix-epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Share it with the engine through an `Rc` and advance it from the test:
///
/// ```ignore
/// let clock = Rc::new(ManualClock::new(0));
/// let mut engine = PersonalizationEngine::with_clock(store, clock.clone());
/// clock.advance(6 * 60 * 1000);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
