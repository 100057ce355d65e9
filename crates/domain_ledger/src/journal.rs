//! Journal lines and batches
//!
//! A journal line is one side of a double entry: exactly one of its debit
//! and credit amounts is non-zero. Lines are only ever persisted as part
//! of a batch - the full output of one accrual-generation or
//! payment-allocation call - and a batch must balance internally before it
//! may be stored. Batches are immutable once persisted; corrections are
//! new batches.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ContractId, JournalLineId, Money, MonthRange, PeriodId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AccountKind;

/// Identifier of a journal batch
///
/// Accrual batches use the canonical string
/// `{contractId}_{rangeStart}_{rangeEnd}`; payment batches use an opaque
/// incrementing number issued by the journal store. These are the only
/// persisted cross-reference keys between a batch and its originating
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchId {
    Accrual(String),
    Payment(u64),
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchId::Accrual(no) => write!(f, "{}", no),
            BatchId::Payment(no) => write!(f, "PMT-{:06}", no),
        }
    }
}

/// Canonical accrual batch number for a contract and payable range
///
/// This is a pure function of its inputs: repeated calls during one
/// generation act are guaranteed to return an identical string, so every
/// line of the batch shares the same number.
pub fn accrual_batch_no(contract_id: ContractId, range: &MonthRange) -> String {
    format!(
        "{}_{}_{}",
        contract_id,
        range.start().format("%Y-%m-%d"),
        range.end().format("%Y-%m-%d")
    )
}

/// A single debit or credit posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique line identifier
    pub id: JournalLineId,
    /// Account this line posts against
    pub account: AccountKind,
    /// Ledger booking date
    pub booking_date: NaiveDate,
    /// Debit amount; zero when the line is a credit
    pub debit: Money,
    /// Credit amount; zero when the line is a debit
    pub credit: Money,
    /// Short human-readable memo
    pub memo: String,
    /// Amortization period this line settles, when period-specific
    pub period_id: Option<PeriodId>,
    /// Position within the batch after ordering; assigned at batch
    /// finalization
    pub entry_order: u32,
}

impl JournalLine {
    /// Creates a debit line
    pub fn debit(account: AccountKind, booking_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: JournalLineId::new_v7(),
            account,
            booking_date,
            debit: amount,
            credit: Money::zero(amount.currency()),
            memo: String::new(),
            period_id: None,
            entry_order: 0,
        }
    }

    /// Creates a credit line
    pub fn credit(account: AccountKind, booking_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: JournalLineId::new_v7(),
            account,
            booking_date,
            debit: Money::zero(amount.currency()),
            credit: amount,
            memo: String::new(),
            period_id: None,
            entry_order: 0,
        }
    }

    /// Sets the memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Links the line to the amortization period it settles
    pub fn with_period(mut self, period_id: PeriodId) -> Self {
        self.period_id = Some(period_id);
        self
    }

    /// The non-zero side of the line
    pub fn amount(&self) -> Money {
        if self.debit.is_zero() {
            self.credit
        } else {
            self.debit
        }
    }

    /// Returns true if this is a debit line
    pub fn is_debit(&self) -> bool {
        !self.debit.is_zero()
    }
}

/// The full set of journal lines produced by one generation act
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalBatch {
    pub id: BatchId,
    pub contract_id: ContractId,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<JournalLine>,
}

impl JournalBatch {
    pub fn new(id: BatchId, contract_id: ContractId) -> Self {
        Self {
            id,
            contract_id,
            created_at: Utc::now(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: JournalLine) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all debit amounts (raw decimal; currencies are uniform
    /// within a batch by construction)
    pub fn total_debit(&self) -> rust_decimal::Decimal {
        self.lines.iter().map(|l| l.debit.amount()).sum()
    }

    /// Sum of all credit amounts
    pub fn total_credit(&self) -> rust_decimal::Decimal {
        self.lines.iter().map(|l| l.credit.amount()).sum()
    }

    /// Ids of all periods referenced by lines of this batch
    pub fn period_ids(&self) -> Vec<PeriodId> {
        let mut ids: Vec<PeriodId> = self.lines.iter().filter_map(|l| l.period_id).collect();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cny(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::CNY)
    }

    #[test]
    fn test_debit_line_has_zero_credit() {
        let line = JournalLine::debit(AccountKind::Expense, date(2024, 1, 27), cny(dec!(800)));
        assert!(line.is_debit());
        assert!(line.credit.is_zero());
        assert_eq!(line.amount(), cny(dec!(800)));
    }

    #[test]
    fn test_credit_line_has_zero_debit() {
        let line = JournalLine::credit(AccountKind::Cash, date(2024, 1, 27), cny(dec!(800)));
        assert!(!line.is_debit());
        assert!(line.debit.is_zero());
    }

    #[test]
    fn test_builder_style_annotations() {
        let period = PeriodId::new();
        let line = JournalLine::debit(AccountKind::Payable, date(2024, 1, 27), cny(dec!(800)))
            .with_memo("period:2024-01")
            .with_period(period);

        assert_eq!(line.memo, "period:2024-01");
        assert_eq!(line.period_id, Some(period));
    }

    #[test]
    fn test_accrual_batch_no_is_deterministic() {
        let contract = ContractId::new();
        let range = MonthRange::new(date(2024, 1, 1), date(2024, 3, 1)).unwrap();

        let first = accrual_batch_no(contract, &range);
        let second = accrual_batch_no(contract, &range);
        assert_eq!(first, second);
        assert!(first.ends_with("_2024-01-01_2024-03-01"));
        assert!(first.starts_with(&contract.to_string()));
    }

    #[test]
    fn test_batch_totals() {
        let mut batch = JournalBatch::new(BatchId::Payment(1), ContractId::new());
        batch.push(JournalLine::debit(
            AccountKind::Payable,
            date(2024, 1, 27),
            cny(dec!(800)),
        ));
        batch.push(JournalLine::credit(
            AccountKind::Cash,
            date(2024, 1, 27),
            cny(dec!(800)),
        ));

        assert_eq!(batch.total_debit(), dec!(800));
        assert_eq!(batch.total_credit(), dec!(800));
    }

    #[test]
    fn test_payment_batch_display() {
        assert_eq!(BatchId::Payment(42).to_string(), "PMT-000042");
    }
}
