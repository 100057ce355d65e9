//! Comprehensive tests for domain_schedule

use chrono::NaiveDate;
use core_kernel::{ContractId, Currency, Money, MonthRange};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_schedule::booking::BookingDateResolver;
use domain_schedule::generator::{ScheduleGenerateRequest, ScheduleGenerator};
use domain_schedule::period::{AmortizationPeriod, PeriodStatus};
use domain_schedule::proration::prorate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cny(amount: Decimal) -> Money {
    Money::new(amount, Currency::CNY)
}

// ============================================================================
// Proration Tests
// ============================================================================

mod proration_tests {
    use super::*;

    #[test]
    fn test_even_2400_over_three_months() {
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 3, 1)).unwrap();
        let amounts = prorate(cny(dec!(2400.00)), &range).unwrap();

        assert_eq!(
            amounts,
            vec![cny(dec!(800.00)), cny(dec!(800.00)), cny(dec!(800.00))]
        );
    }

    #[test]
    fn test_floor_division_with_remainder() {
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 7, 1)).unwrap();
        let amounts = prorate(cny(dec!(100.00)), &range).unwrap();

        // 100 / 7 floors to 14.28; the last period absorbs the remainder
        assert!(amounts[..6].iter().all(|m| m.amount() == dec!(14.28)));
        assert_eq!(amounts[6].amount(), dec!(14.32));

        let sum: Decimal = amounts.iter().map(|m| m.amount()).sum();
        assert_eq!(sum, dec!(100.00));
    }

    #[test]
    fn test_currency_carried_verbatim() {
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();
        let amounts = prorate(Money::new(dec!(99.99), Currency::USD), &range).unwrap();
        assert!(amounts.iter().all(|m| m.currency() == Currency::USD));
    }
}

// ============================================================================
// Booking-Date Resolver Tests
// ============================================================================

mod booking_tests {
    use super::*;

    #[test]
    fn test_late_reference_pulls_booking_forward() {
        let resolver = BookingDateResolver::default();
        assert_eq!(
            resolver.resolve(date(2024, 1, 1), Some(date(2024, 2, 15))),
            date(2024, 2, 27)
        );
    }

    #[test]
    fn test_same_month_reference_books_in_period_month() {
        let resolver = BookingDateResolver::default();
        assert_eq!(
            resolver.resolve(date(2024, 1, 1), Some(date(2024, 1, 10))),
            date(2024, 1, 27)
        );
    }

    #[test]
    fn test_reference_day_within_month_is_irrelevant() {
        // only the months are compared, never the days
        let resolver = BookingDateResolver::default();
        assert_eq!(
            resolver.resolve(date(2024, 1, 1), Some(date(2024, 1, 31))),
            date(2024, 1, 27)
        );
    }

    #[test]
    fn test_rule_identical_for_payment_reference() {
        // the same resolver serves accrual approval and payment dates
        let resolver = BookingDateResolver::default();
        let accrual = resolver.resolve(date(2024, 1, 1), Some(date(2024, 3, 5)));
        let payment = resolver.resolve(date(2024, 1, 1), Some(date(2024, 3, 5)));
        assert_eq!(accrual, payment);
        assert_eq!(accrual, date(2024, 3, 27));
    }
}

// ============================================================================
// Schedule Generator Tests
// ============================================================================

mod generator_tests {
    use super::*;

    #[test]
    fn test_generated_periods_sum_to_total() {
        let generator = ScheduleGenerator::default();
        let request = ScheduleGenerateRequest {
            total_amount: cny(dec!(5000.00)),
            start_month: date(2024, 1, 1),
            end_month: date(2024, 6, 1),
            approval_date: Some(date(2024, 1, 2)),
        };

        let periods = generator.generate(ContractId::new(), &request).unwrap();
        assert_eq!(periods.len(), 6);

        let sum: Decimal = periods.iter().map(|p| p.amount.amount()).sum();
        assert_eq!(sum, dec!(5000.00));
        assert!(periods.iter().all(|p| !p.posted));
        assert!(periods
            .iter()
            .all(|p| p.status == PeriodStatus::Pending && p.paid_amount.is_zero()));
    }

    #[test]
    fn test_period_months_are_month_firsts() {
        let generator = ScheduleGenerator::default();
        let request = ScheduleGenerateRequest {
            total_amount: cny(dec!(300.00)),
            start_month: date(2024, 1, 17),
            end_month: date(2024, 3, 9),
            approval_date: None,
        };

        let periods = generator.generate(ContractId::new(), &request).unwrap();
        let months: Vec<_> = periods.iter().map(|p| p.period_month).collect();
        assert_eq!(
            months,
            vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_schedule_numbers_are_sequential() {
        let generator = ScheduleGenerator::default();
        let request = ScheduleGenerateRequest {
            total_amount: cny(dec!(300.00)),
            start_month: date(2024, 11, 1),
            end_month: date(2025, 1, 1),
            approval_date: None,
        };

        let periods = generator.generate(ContractId::new(), &request).unwrap();
        let numbers: Vec<_> = periods.iter().map(|p| p.schedule_no.as_str()).collect();
        assert_eq!(numbers, vec!["AMT202411001", "AMT202412002", "AMT202501003"]);
    }
}

// ============================================================================
// Period Lifecycle Tests
// ============================================================================

mod period_tests {
    use super::*;

    #[test]
    fn test_multiple_payment_facts_accumulate() {
        let mut period = AmortizationPeriod::new(
            ContractId::new(),
            "AMT202401001",
            date(2024, 1, 1),
            date(2024, 1, 27),
            cny(dec!(800.00)),
        );

        period.record_payment(cny(dec!(200.00)));
        period.record_payment(cny(dec!(200.00)));
        assert_eq!(period.status, PeriodStatus::Pending);
        assert_eq!(period.remaining(), cny(dec!(400.00)));

        period.record_payment(cny(dec!(400.00)));
        assert_eq!(period.status, PeriodStatus::Paid);
    }

    #[test]
    fn test_serde_round_trip() {
        let period = AmortizationPeriod::new(
            ContractId::new(),
            "AMT202401001",
            date(2024, 1, 1),
            date(2024, 1, 27),
            cny(dec!(800.00)),
        );

        let json = serde_json::to_string(&period).unwrap();
        let back: AmortizationPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
