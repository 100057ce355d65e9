//! Amortization period entity
//!
//! An amortization period is one month's slice of a contract's total
//! amount. Periods are created in bulk by the schedule generator, consumed
//! by accrual generation (`posted`), and paid down across one or more
//! payment allocations (`paid_amount` / `status`).

use chrono::NaiveDate;
use core_kernel::temporal::clamped_day_in_month;
use core_kernel::{ContractId, Money, PeriodId};
use serde::{Deserialize, Serialize};

/// Payment status of a single amortization period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    /// Not yet fully covered by payments
    Pending,
    /// Cumulative payments cover the full period amount
    Paid,
}

/// One month's amortization slice of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// Unique period identifier
    pub id: PeriodId,
    /// Owning contract
    pub contract_id: ContractId,
    /// Human-readable schedule number (e.g. `AMT202401001`)
    pub schedule_no: String,
    /// Nominal period month, always the first of the month
    pub period_month: NaiveDate,
    /// Ledger booking date stamped at schedule-generation time
    pub booking_date: NaiveDate,
    /// Period amount, fixed at creation
    pub amount: Money,
    /// Cumulative amount paid against this period
    pub paid_amount: Money,
    /// True once an accrual journal entry has consumed this period
    pub posted: bool,
    /// Payment status derived from `paid_amount`
    pub status: PeriodStatus,
}

impl AmortizationPeriod {
    /// Creates a fresh, unpaid, unposted period
    pub fn new(
        contract_id: ContractId,
        schedule_no: impl Into<String>,
        period_month: NaiveDate,
        booking_date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: PeriodId::new_v7(),
            contract_id,
            schedule_no: schedule_no.into(),
            period_month,
            booking_date,
            amount,
            paid_amount: Money::zero(amount.currency()),
            posted: false,
            status: PeriodStatus::Pending,
        }
    }

    /// Remaining unpaid balance (amount − cumulative paid)
    pub fn remaining(&self) -> Money {
        self.amount - self.paid_amount
    }

    /// Returns true once cumulative payments cover the full amount
    pub fn is_fully_paid(&self) -> bool {
        !self.remaining().is_positive()
    }

    /// Ledger cutoff date for this period: the configured booking day
    /// within the period's month, clamped to short months
    pub fn cutoff_date(&self, booking_day: u32) -> NaiveDate {
        clamped_day_in_month(self.period_month, booking_day)
    }

    /// Applies a payment amount to this period
    ///
    /// Accumulates `paid_amount` and flips the status to `Paid` once the
    /// period is fully covered. Returns true if the status or paid amount
    /// changed. Non-positive amounts are ignored.
    pub fn record_payment(&mut self, payment: Money) -> bool {
        if !payment.is_positive() {
            return false;
        }
        self.paid_amount = self.paid_amount + payment;
        if self.is_fully_paid() {
            self.status = PeriodStatus::Paid;
        }
        true
    }
}
