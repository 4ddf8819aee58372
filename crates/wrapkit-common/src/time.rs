//! ---
//! wk_section: "01-shared-primitives"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Shared primitives and utilities for the wrapper crates."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Time sources used by the timing wrapper.
///
/// A clock yields monotonic readings against an arbitrary fixed origin; only
/// differences between readings are meaningful.
pub trait Clock {
    /// Take a reading of the clock.
    fn now(&self) -> Duration;
}

static PROCESS_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Default clock backed by [`Instant`], anchored to a lazily-captured
/// process epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        PROCESS_EPOCH.elapsed()
    }
}

/// Hand-driven clock for deterministic timing tests.
///
/// Clones share the same reading, so a test can hold one clone and advance it
/// while a wrapper owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    reading: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current reading.
    pub fn set(&self, reading: Duration) {
        *self.reading.lock() = reading;
    }

    /// Move the reading forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut reading = self.reading.lock();
        *reading = reading.saturating_add(delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.reading.lock()
    }
}
