//! Wall-clock sources for the timers.
//!
//! Every timer in this crate works from epoch milliseconds handed to it by a
//! [`Clock`], so tests can move time by hand with [`ManualClock`].

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;

/// A source of wall-clock timestamps in milliseconds since the Unix epoch.
pub trait Clock: Debug + Send + Sync + 'static {
    fn now_millis(&self) -> i64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }

    /// Moves the clock backwards, simulating a system clock correction.
    pub fn rewind(&self, by: Duration) {
        self.millis
            .fetch_sub(by.as_millis() as i64, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Whole seconds elapsed between two timestamps, clamped at zero when the
/// clock has moved backwards.
pub(crate) fn elapsed_whole_seconds(since_millis: i64, now_millis: i64) -> u64 {
    (now_millis.saturating_sub(since_millis)).max(0) as u64 / 1000
}
