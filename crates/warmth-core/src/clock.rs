//! Time source abstraction.
//!
//! Every timestamp that reaches an anchor passes through here and is
//! normalised to millisecond precision, so values survive a round trip
//! through storage unchanged.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// A source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        truncate_to_millis(Utc::now())
    }
}

/// Manually driven clock for tests and simulations.
///
/// Unlike the wall clock it can be moved backwards with [`ManualClock::set`],
/// which is how clock-skew paths are exercised.
#[derive(Debug)]
pub struct ManualClock {
    current_ms: AtomicI64,
}

impl ManualClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            current_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Move time forward by `by`. Returns the new instant.
    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let ms = by.num_milliseconds();
        let new_ms = self.current_ms.fetch_add(ms, Ordering::SeqCst) + ms;
        from_millis(new_ms)
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.current_ms.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        from_millis(self.current_ms.load(Ordering::SeqCst))
    }
}

/// Drop sub-millisecond precision.
pub fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    from_millis(t.timestamp_millis())
}

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}
