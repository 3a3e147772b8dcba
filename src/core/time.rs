//! Where "now" comes from
//!
//! The engine takes `now` as an argument. The store asks a `TimeSource`,
//! which is the wall clock in production and a manually driven clock in
//! tests.

use chrono::{DateTime, Duration};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::core::types::{self, Timestamp};

pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        types::now()
    }
}

/// Deterministic clock: time only moves when told to
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    current_ms: Arc<AtomicI64>,
}

impl ManualTimeSource {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current_ms: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: Duration) {
        debug_assert!(duration >= Duration::zero(), "cannot go back in time");
        self.current_ms
            .fetch_add(duration.num_milliseconds(), Ordering::SeqCst);
    }

    /// Set the current time (use with caution)
    pub fn set(&self, time: Timestamp) {
        self.current_ms
            .store(time.timestamp_millis(), Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        let ms = self.current_ms.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
