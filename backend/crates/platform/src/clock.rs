//! Clock abstraction
//!
//! Time-dependent rules read "now" through [`Clock`] so tests can move time
//! deterministically instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Clock that only moves when told to.
///
/// Millisecond resolution, matching the persisted timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now_ms: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Start at a fixed, readable instant (2024-01-01T00:00:00Z)
    pub fn at_epoch_2024() -> Self {
        Self::new(DateTime::from_timestamp_millis(1_704_067_200_000).unwrap_or_default())
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now_ms.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.now_ms.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_epoch_2024();
        let start = clock.now();
        clock.advance(Duration::from_millis(1999));
        assert_eq!((clock.now() - start).num_milliseconds(), 1999);
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::at_epoch_2024();
        let later = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_arc_clock_delegates() {
        let clock = Arc::new(ManualClock::at_epoch_2024());
        let shared: Arc<ManualClock> = clock.clone();
        clock.advance(Duration::from_secs(5));
        assert_eq!(shared.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now();
        assert!(now.timestamp() > 1_700_000_000);
    }
}
