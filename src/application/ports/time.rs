// src/application/ports/time.rs
use chrono::{DateTime, Local, Timelike, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Wall-clock hour in the server's local zone.
    fn local_hour(&self) -> u32 {
        self.now().with_timezone(&Local).hour()
    }
}
