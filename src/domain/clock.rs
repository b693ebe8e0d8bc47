use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Source of "now" for the ledger.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day of `now`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Noon (UTC) on the given day.
    pub fn on(date: NaiveDate) -> Self {
        Self((date.and_time(NaiveTime::MIN) + Duration::hours(12)).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
