//! Time source for debounce deadlines and notice expiry.
//!
//! Production code reads the monotonic clock. Tests drive a [`ManualClock`]
//! forward explicitly, so debounce behavior is checked without sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Longest delay a deadline can be set in the future. Larger delays are clamped.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

pub trait Clock {
    fn now(&self) -> Instant;

    /// `now() + delay`, clamped to [`MAX_DELAY`] so it never overflows.
    fn deadline_after(&self, delay: Duration) -> Instant {
        let now = self.now();
        now.checked_add(delay.min(MAX_DELAY)).unwrap_or(now)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
