//! Monotonic time sources for the countdown.
//!
//! The state machine only ever sees plain microsecond readings, which keeps it
//! deterministic under test. [`MonotonicClock`] backs real programs and
//! [`ManualClock`] lets tests and scripted runs move time explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of monotonic microsecond timestamps with an arbitrary epoch.
///
/// Readings must never decrease within a run.
pub trait Clock: Send + Sync {
    /// Current reading in microseconds.
    fn now_micros(&self) -> u64;
}

/// Wall-clock source backed by [`Instant`], with its epoch at construction.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
    // High-water mark; readings are clamped to it.
    last: AtomicU64,
}

impl MonotonicClock {
    /// Creates a clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last: AtomicU64::new(0),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        let elapsed = u64::try_from(self.epoch.elapsed().as_micros()).unwrap_or(u64::MAX);
        let previous = self.last.fetch_max(elapsed, Ordering::AcqRel);
        previous.max(elapsed)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the
/// widget owns another.
///
/// ```rust
/// use bubbletea_countdown::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new(1_000);
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(2));
/// assert_eq!(clock.now_micros(), 3_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start` microseconds.
    pub fn new(start: u64) -> Self {
        Self {
            micros: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        let _ = self
            .micros
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(now.saturating_add(by))
            });
    }

    /// Moves the clock to `micros`. Earlier readings are ignored so the clock
    /// stays monotonic.
    pub fn set(&self, micros: u64) {
        self.micros.fetch_max(micros, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.micros.load(Ordering::Acquire)
    }
}
