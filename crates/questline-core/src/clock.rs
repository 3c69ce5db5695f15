//! Injected time source.
//!
//! All day-boundary logic (streaks, daily quest resets) and timer math go
//! through a `Clock` so tests can pin "now" and "today" without touching the
//! system clock. Calendar-day comparisons use `NaiveDate` arithmetic, never
//! formatted date strings.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant and the current calendar day.
pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day as the user perceives it.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation used by the CLI.
///
/// `today()` uses the local timezone so a streak day rolls over at local
/// midnight, not UTC midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned clock for tests. Mutate `instant` to simulate the passage of time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Advance the pinned instant by whole seconds.
    pub fn advance_secs(&mut self, secs: i64) {
        self.instant += chrono::Duration::seconds(secs);
    }

    /// Advance the pinned instant by whole days.
    pub fn advance_days(&mut self, days: i64) {
        self.instant += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
