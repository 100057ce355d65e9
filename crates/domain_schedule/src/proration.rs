//! Period proration
//!
//! Splits a contract's total amount into equal monthly slices. The
//! per-period amount is the total divided by the month count, truncated to
//! two decimals; the last period absorbs the entire rounding remainder so
//! the slices always sum back to the total exactly.

use core_kernel::{Money, MonthRange};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ScheduleError;

/// Prorates a total amount across every month of the range
///
/// Returns one amount per month, in range order. The amounts sum to
/// `total` exactly; only the final amount can differ from the others.
pub fn prorate(total: Money, range: &MonthRange) -> Result<Vec<Money>, ScheduleError> {
    if !total.is_positive() {
        return Err(ScheduleError::validation(
            "total amount must be positive for proration",
        ));
    }

    let periods = range.months();
    let per_period = Money::new(
        (total.amount() / Decimal::from(periods))
            .round_dp_with_strategy(2, RoundingStrategy::ToZero),
        total.currency(),
    );
    let last = total - per_period.multiply(Decimal::from(periods - 1));

    let mut amounts = Vec::with_capacity(periods as usize);
    for _ in 0..periods - 1 {
        amounts.push(per_period);
    }
    amounts.push(last);
    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn range(start: (i32, u32), end: (i32, u32)) -> MonthRange {
        MonthRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_even_split() {
        let amounts = prorate(
            Money::new(dec!(2400.00), Currency::CNY),
            &range((2024, 1), (2024, 3)),
        )
        .unwrap();

        assert_eq!(amounts.len(), 3);
        assert!(amounts.iter().all(|m| m.amount() == dec!(800.00)));
    }

    #[test]
    fn test_remainder_goes_to_last_period() {
        let amounts = prorate(
            Money::new(dec!(1000.00), Currency::CNY),
            &range((2024, 1), (2024, 3)),
        )
        .unwrap();

        assert_eq!(amounts[0].amount(), dec!(333.33));
        assert_eq!(amounts[1].amount(), dec!(333.33));
        assert_eq!(amounts[2].amount(), dec!(333.34));
    }

    #[test]
    fn test_single_period_takes_everything() {
        let amounts = prorate(
            Money::new(dec!(777.77), Currency::CNY),
            &range((2024, 5), (2024, 5)),
        )
        .unwrap();

        assert_eq!(amounts, vec![Money::new(dec!(777.77), Currency::CNY)]);
    }

    #[test]
    fn test_non_positive_total_rejected() {
        let err = prorate(
            Money::zero(Currency::CNY),
            &range((2024, 1), (2024, 2)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "VALIDATION_ERROR");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        #[test]
        fn proration_sums_to_total_exactly(
            minor in 1i64..1_000_000_000i64,
            months in 1u32..240u32
        ) {
            let total = Money::from_minor(minor, Currency::CNY);
            prop_assume!(total.is_positive());

            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let end = core_kernel::temporal::add_months(start, months - 1);
            let range = MonthRange::new(start, end).unwrap();

            let amounts = prorate(total, &range).unwrap();
            prop_assert_eq!(amounts.len() as u32, months);

            let sum: Decimal = amounts.iter().map(|m| m.amount()).sum();
            prop_assert_eq!(sum, total.amount());

            // every period except the last carries the same amount
            if amounts.len() > 1 {
                let head = amounts[0].amount();
                prop_assert!(amounts[..amounts.len() - 1]
                    .iter()
                    .all(|m| m.amount() == head));
            }
        }
    }
}
