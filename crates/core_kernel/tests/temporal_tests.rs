//! Tests for clocks and date helpers

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{start_of_day_utc, Clock, FixedClock, SystemClock};

#[test]
fn test_fixed_clock_returns_pinned_instant() {
    let instant = Utc.with_ymd_and_hms(2025, 4, 10, 16, 20, 0).unwrap();
    let clock = FixedClock::new(instant);
    assert_eq!(clock.now(), instant);
}

#[test]
fn test_start_of_day_is_midnight_utc() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let start = start_of_day_utc(date);
    assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());
}

#[test]
fn test_system_clock_advances() {
    let clock = SystemClock;
    let first = clock.now();
    let second = clock.now();
    assert!(second >= first);
}

#[test]
fn test_clock_usable_as_trait_object() {
    let clock: Box<dyn Clock> = Box::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ));
    assert_eq!(clock.now().date_naive(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
}
