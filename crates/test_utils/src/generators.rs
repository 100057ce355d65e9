//! Property-based test data generators

use chrono::NaiveDate;
use core_kernel::temporal::add_months;
use core_kernel::{Currency, Money, MonthRange};
use proptest::prelude::*;

/// Strategy for positive ledger amounts (0.01 .. 10,000,000.00)
pub fn positive_amount() -> impl Strategy<Value = Money> {
    (1i64..1_000_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::CNY))
}

/// Strategy for month ranges of 1..=120 months starting in 2020-2029
pub fn month_range() -> impl Strategy<Value = MonthRange> {
    (2020i32..2030i32, 1u32..=12u32, 1u32..=120u32).prop_map(|(year, month, len)| {
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let end = add_months(start, len - 1);
        MonthRange::new(start, end).unwrap()
    })
}

/// Strategy for days within a given year
pub fn any_day_in(year: i32) -> impl Strategy<Value = NaiveDate> {
    (1u32..=12u32, 1u32..=28u32)
        .prop_map(move |(month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}
