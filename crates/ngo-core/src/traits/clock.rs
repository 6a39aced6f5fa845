//! Clock port - the source of "now" for every date comparison

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

/// Wall-clock time in the NGO's local timezone
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// System clock reading local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and simulations
#[derive(Debug)]
pub struct ManualClock {
    // Seconds since the Unix epoch, read as naive local time
    secs: AtomicI64,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            secs: AtomicI64::new(now.and_utc().timestamp()),
        }
    }

    /// Jump to `now`
    pub fn set(&self, now: NaiveDateTime) {
        self.secs.store(now.and_utc().timestamp(), Ordering::SeqCst);
    }

    /// Move forward (or back, for negative durations)
    pub fn advance(&self, by: Duration) {
        self.secs.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        DateTime::from_timestamp(self.secs.load(Ordering::SeqCst), 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let start = NaiveDate::from_ymd_opt(2026, 6, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.today(), start.date());

        clock.advance(Duration::days(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 6, 3).unwrap());

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
