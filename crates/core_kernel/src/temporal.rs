//! Time sources
//!
//! Policy expiry and audit timestamps depend on "now". Services take a
//! [`Clock`] so tests can pin the current instant instead of racing the
//! wall clock.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt;

/// Source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Midnight UTC at the start of the given calendar day
    pub fn at_date(date: NaiveDate) -> Self {
        Self(start_of_day_utc(date))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Midnight UTC at the start of `date`
///
/// Calendar dates without a time component (policy expiry dates) are
/// compared against instants as this moment.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}
