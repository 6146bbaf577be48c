//! Wall-clock sources used to stamp timer transitions.

use std::sync::{Mutex, PoisonError};

use time::OffsetDateTime;

/// Source of the current server time, in real-valued seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current instant in seconds since the Unix epoch.
    fn now(&self) -> f64;
}

/// Clock backed by the host's system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        nanos as f64 / 1_000_000_000.0
    }
}

/// Clock whose time only moves when told to. Used by tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    /// Clock frozen at `start` until moved.
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: f64) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move the clock forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
