//! Unit tests for the task lifecycle module.


use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub(crate) struct TestClock {
    now: RwLock<DateTime<Utc>>,
}

impl TestClock {
    pub(crate) const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub(crate) fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("clock lock") = now;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock")
    }
}

/// Builds a UTC instant from calendar parts.
pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid UTC instant")
}
