//! Calendar math for amortization periods
//!
//! Amortization runs on whole calendar months: a period's nominal date is
//! the first of its month, and booking cutoffs are a fixed day-of-month
//! clamped to short months. This module provides the month arithmetic the
//! schedule and ledger layers are built on.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid date component: {0}")]
    InvalidDate(String),
}

/// Returns the first day of the given date's month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("first of month is always a valid date")
}

/// Adds whole months to a date, clamping the day to the target month's end
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("month addition out of range")
}

/// Returns the last day of the given date's month
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    add_months(month_start(date), 1)
        .pred_opt()
        .expect("day before first of month is always valid")
}

/// Returns the given day-of-month within the date's month, clamped to the
/// month's last day (e.g. day 30 in February resolves to February's end)
pub fn clamped_day_in_month(date: NaiveDate, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), day)
        .unwrap_or_else(|| last_day_of_month(date))
}

/// An inclusive range of calendar months
///
/// Both bounds are normalized to the first of their month. A range of
/// 2024-01..=2024-03 spans three months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthRange {
    /// Creates a month range; fails if the end month precedes the start month
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        let start = month_start(start);
        let end = month_start(end);
        if end < start {
            return Err(TemporalError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// First month of the range (first of month)
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last month of the range (first of month)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of months in the range, inclusive of both bounds
    pub fn months(&self) -> u32 {
        let years = self.end.year() - self.start.year();
        let months = self.end.month() as i32 - self.start.month() as i32;
        (years * 12 + months + 1) as u32
    }

    /// Iterates the first-of-month date of every month in the range
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.months()).map(|i| add_months(self.start, i))
    }

    /// Returns true if the given date falls inside the range's months
    pub fn contains_month(&self, date: NaiveDate) -> bool {
        let m = month_start(date);
        m >= self.start && m <= self.end
    }
}

/// An inclusive range of calendar days, used for period lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_range_count() {
        let range = MonthRange::new(date(2024, 1, 15), date(2024, 3, 2)).unwrap();
        assert_eq!(range.months(), 3);
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 3, 1));
    }

    #[test]
    fn test_month_range_single_month() {
        let range = MonthRange::new(date(2024, 5, 1), date(2024, 5, 31)).unwrap();
        assert_eq!(range.months(), 1);
    }

    #[test]
    fn test_month_range_across_years() {
        let range = MonthRange::new(date(2023, 11, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(range.months(), 4);
    }

    #[test]
    fn test_month_range_inverted_fails() {
        let result = MonthRange::new(date(2024, 3, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidRange { .. })));
    }

    #[test]
    fn test_month_range_iter() {
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 3, 1)).unwrap();
        let months: Vec<_> = range.iter().collect();
        assert_eq!(
            months,
            vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_clamped_day_regular_month() {
        assert_eq!(clamped_day_in_month(date(2024, 1, 1), 27), date(2024, 1, 27));
    }

    #[test]
    fn test_clamped_day_short_month() {
        // 2023-02 has 28 days; day 30 clamps to month end
        assert_eq!(clamped_day_in_month(date(2023, 2, 1), 30), date(2023, 2, 28));
        // leap year February still has day 27
        assert_eq!(clamped_day_in_month(date(2024, 2, 10), 27), date(2024, 2, 27));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 2, 5)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2024, 12, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 6, 30)).unwrap();
        assert!(range.contains(date(2024, 3, 15)));
        assert!(!range.contains(date(2024, 7, 1)));
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
    }
}
