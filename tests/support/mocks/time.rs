// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, TimeZone, Utc};
use inkpost_core::application::ports::time::Clock;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

/// Moves one second forward on every read so creation order is observable.
/// The local hour is set explicitly.
pub struct StepClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
    hour: AtomicU32,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
            hour: AtomicU32::new(12),
        }
    }

    pub fn base(&self) -> DateTime<Utc> {
        self.base
    }

    pub fn set_hour(&self, hour: u32) {
        self.hour.store(hour, Ordering::SeqCst);
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }

    fn local_hour(&self) -> u32 {
        self.hour.load(Ordering::SeqCst)
    }
}
