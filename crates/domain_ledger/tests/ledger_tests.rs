//! Comprehensive tests for domain_ledger

use chrono::{NaiveDate, Utc};
use core_kernel::{ContractId, Currency, Money, MonthRange, PeriodId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_ledger::account::{AccountKind, ChartOfAccounts};
use domain_ledger::journal::{accrual_batch_no, BatchId, JournalBatch, JournalLine};
use domain_ledger::ordering::sort_and_number;
use domain_ledger::payment_fact::PaymentFact;
use domain_ledger::verify::{check_balance, verify_batch};
use domain_ledger::LedgerError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cny(amount: Decimal) -> Money {
    Money::new(amount, Currency::CNY)
}

// ============================================================================
// Batch Identifier Tests
// ============================================================================

mod batch_id_tests {
    use super::*;

    #[test]
    fn test_accrual_batch_no_format() {
        let contract = ContractId::new();
        let range = MonthRange::new(date(2024, 1, 15), date(2024, 3, 20)).unwrap();

        let no = accrual_batch_no(contract, &range);
        assert_eq!(no, format!("{}_2024-01-01_2024-03-01", contract));
    }

    #[test]
    fn test_repeated_calls_yield_identical_strings() {
        // the batch number is a pure function of contract id and range;
        // every line of one generation act shares one identical string
        let contract = ContractId::new();
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 6, 1)).unwrap();

        let numbers: Vec<String> = (0..10).map(|_| accrual_batch_no(contract, &range)).collect();
        assert!(numbers.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_different_ranges_yield_different_ids() {
        let contract = ContractId::new();
        let r1 = MonthRange::new(date(2024, 1, 1), date(2024, 3, 1)).unwrap();
        let r2 = MonthRange::new(date(2024, 1, 1), date(2024, 4, 1)).unwrap();
        assert_ne!(accrual_batch_no(contract, &r1), accrual_batch_no(contract, &r2));
    }
}

// ============================================================================
// Journal Line Tests
// ============================================================================

mod journal_tests {
    use super::*;

    #[test]
    fn test_exactly_one_side_nonzero() {
        let debit = JournalLine::debit(AccountKind::Expense, date(2024, 1, 27), cny(dec!(800)));
        assert!(debit.debit.is_positive() && debit.credit.is_zero());

        let credit = JournalLine::credit(AccountKind::Payable, date(2024, 1, 27), cny(dec!(800)));
        assert!(credit.credit.is_positive() && credit.debit.is_zero());
    }

    #[test]
    fn test_period_ids_deduplicated() {
        let period = PeriodId::new();
        let mut batch = JournalBatch::new(BatchId::Payment(1), ContractId::new());
        batch.push(
            JournalLine::debit(AccountKind::Payable, date(2024, 1, 27), cny(dec!(800)))
                .with_period(period),
        );
        batch.push(
            JournalLine::credit(AccountKind::Prepaid, date(2024, 1, 27), cny(dec!(800)))
                .with_period(period),
        );

        assert_eq!(batch.period_ids(), vec![period]);
    }

    #[test]
    fn test_batch_serde_round_trip() {
        let mut batch = JournalBatch::new(
            BatchId::Accrual("CTR-x_2024-01-01_2024-03-01".into()),
            ContractId::new(),
        );
        batch.push(
            JournalLine::debit(AccountKind::Expense, date(2024, 1, 27), cny(dec!(800)))
                .with_memo("Amortization expense - 2024-01"),
        );

        let json = serde_json::to_string(&batch).unwrap();
        let back: JournalBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, batch);
    }
}

// ============================================================================
// Ordering Tests
// ============================================================================

mod ordering_tests {
    use super::*;

    #[test]
    fn test_full_ordering_contract() {
        // lines emitted out of order come back sorted by booking month,
        // then Payable > Prepaid > Expense > Cash within a month
        let now = Utc::now();
        let lines = vec![
            JournalLine::credit(AccountKind::Cash, date(2024, 1, 27), cny(dec!(2400))),
            JournalLine::credit(AccountKind::Prepaid, date(2024, 2, 27), cny(dec!(800))),
            JournalLine::debit(AccountKind::Payable, date(2024, 2, 27), cny(dec!(800))),
            JournalLine::debit(AccountKind::Prepaid, date(2024, 1, 27), cny(dec!(1600))),
            JournalLine::debit(AccountKind::Payable, date(2024, 1, 27), cny(dec!(800))),
        ];

        let sorted = sort_and_number(3, now, lines);
        let shape: Vec<(AccountKind, NaiveDate)> =
            sorted.iter().map(|l| (l.account, l.booking_date)).collect();

        assert_eq!(
            shape,
            vec![
                (AccountKind::Payable, date(2024, 1, 27)),
                (AccountKind::Prepaid, date(2024, 1, 27)),
                (AccountKind::Cash, date(2024, 1, 27)),
                (AccountKind::Payable, date(2024, 2, 27)),
                (AccountKind::Prepaid, date(2024, 2, 27)),
            ]
        );
        assert_eq!(sorted.last().unwrap().entry_order, 5);
    }
}

// ============================================================================
// Balance Verifier Tests
// ============================================================================

mod verifier_tests {
    use super::*;

    #[test]
    fn test_zero_sum_across_account_kinds() {
        let lines = vec![
            JournalLine::debit(AccountKind::Payable, date(2024, 1, 27), cny(dec!(800))),
            JournalLine::debit(AccountKind::Prepaid, date(2024, 1, 27), cny(dec!(1600))),
            JournalLine::credit(AccountKind::Cash, date(2024, 1, 27), cny(dec!(2400))),
        ];

        let check = check_balance(&lines);
        assert!(check.balanced);
        assert_eq!(check.total_debit, dec!(2400));
        assert_eq!(check.total_credit, dec!(2400));
    }

    #[test]
    fn test_one_cent_imbalance_is_rejected() {
        let mut batch = JournalBatch::new(BatchId::Payment(9), ContractId::new());
        batch.push(JournalLine::debit(
            AccountKind::Expense,
            date(2024, 1, 27),
            cny(dec!(100.00)),
        ));
        batch.push(JournalLine::credit(
            AccountKind::Cash,
            date(2024, 1, 27),
            cny(dec!(100.01)),
        ));

        assert!(matches!(
            verify_batch(&batch),
            Err(LedgerError::Unbalanced { .. })
        ));
    }
}

// ============================================================================
// Payment Fact & Chart Tests
// ============================================================================

mod fact_tests {
    use super::*;

    #[test]
    fn test_payment_fact_serde() {
        let fact = PaymentFact::new(ContractId::new(), dec!(801.00), Currency::CNY, date(2024, 1, 27))
            .reviewed_on(date(2024, 1, 27))
            .for_periods(vec![PeriodId::new()]);

        let json = serde_json::to_string(&fact).unwrap();
        let back: PaymentFact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fact);
    }

    #[test]
    fn test_chart_lookup_by_code() {
        let chart = ChartOfAccounts::standard();
        for kind in AccountKind::all() {
            let code = chart.code(kind).to_string();
            assert!(chart.is_valid_code(&code));
            assert_eq!(chart.name_for_code(&code), kind.to_string());
        }
    }
}
