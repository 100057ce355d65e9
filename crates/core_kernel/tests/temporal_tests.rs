//! Integration tests for calendar math

use chrono::NaiveDate;
use core_kernel::temporal::{
    add_months, clamped_day_in_month, last_day_of_month, month_start, DateRange, MonthRange,
};
use core_kernel::TemporalError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_start_normalizes_any_day() {
    assert_eq!(month_start(date(2024, 6, 17)), date(2024, 6, 1));
    assert_eq!(month_start(date(2024, 6, 1)), date(2024, 6, 1));
}

#[test]
fn add_months_clamps_day() {
    // Jan 31 + 1 month clamps to Feb 29 in a leap year
    assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(add_months(date(2024, 11, 1), 2), date(2025, 1, 1));
}

#[test]
fn month_range_spans_inclusive_bounds() {
    let range = MonthRange::new(date(2024, 1, 5), date(2024, 12, 20)).unwrap();
    assert_eq!(range.months(), 12);
    assert_eq!(range.iter().count(), 12);
    assert!(range.contains_month(date(2024, 7, 31)));
    assert!(!range.contains_month(date(2025, 1, 1)));
}

#[test]
fn month_range_rejects_inversion() {
    let err = MonthRange::new(date(2024, 4, 1), date(2024, 3, 31)).unwrap_err();
    assert!(matches!(err, TemporalError::InvalidRange { .. }));
}

#[test]
fn cutoff_day_clamps_in_february() {
    // day 27 exists in every month, but a larger configured day must clamp
    assert_eq!(clamped_day_in_month(date(2023, 2, 1), 27), date(2023, 2, 27));
    assert_eq!(clamped_day_in_month(date(2023, 2, 1), 31), date(2023, 2, 28));
    assert_eq!(clamped_day_in_month(date(2024, 2, 1), 31), date(2024, 2, 29));
}

#[test]
fn last_day_of_month_handles_leap_years() {
    assert_eq!(last_day_of_month(date(2024, 2, 1)), date(2024, 2, 29));
    assert_eq!(last_day_of_month(date(2023, 2, 1)), date(2023, 2, 28));
}

#[test]
fn date_range_contains_bounds() {
    let range = DateRange::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
    assert!(range.contains(date(2024, 1, 1)));
    assert!(range.contains(date(2024, 3, 31)));
    assert!(!range.contains(date(2023, 12, 31)));
}
