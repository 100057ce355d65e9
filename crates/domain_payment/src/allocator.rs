//! Payment allocation
//!
//! Consumes one payment fact and the amortization periods it was directed
//! at, partitions the periods into past/current vs. future relative to
//! the payment date, and emits the balanced journal lines: payable
//! settlements for what was accrued, prepaid carry for cash paid ahead,
//! and expense lines for over/under differences. Payable debits always
//! use a period's remaining unpaid balance, never its original amount, so
//! a period can be settled across several payment facts without
//! double-debiting.

use core_kernel::{ContractId, Money, PeriodId};
use domain_ledger::{
    sort_and_number, AccountKind, BatchId, JournalBatch, JournalLine, PaymentFact,
};
use domain_schedule::{AmortizationPeriod, BookingDateResolver, PeriodStatus};
use tracing::info;

use crate::error::PaymentError;

/// Planned update to one period's cumulative paid amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodApplication {
    pub period_id: PeriodId,
    /// Cash applied to this period by this allocation
    pub applied: Money,
    /// Cumulative paid amount after applying
    pub new_paid_total: Money,
    /// Status after applying
    pub new_status: PeriodStatus,
}

/// Result of one allocation: the ordered batch plus the period updates
/// the service must apply
#[derive(Debug, Clone)]
pub struct Allocation {
    pub batch: JournalBatch,
    pub applications: Vec<PeriodApplication>,
}

/// Allocates payments across selected amortization periods
#[derive(Debug, Default)]
pub struct PaymentAllocator {
    resolver: BookingDateResolver,
}

impl PaymentAllocator {
    pub fn new(resolver: BookingDateResolver) -> Self {
        Self { resolver }
    }

    /// Produces the journal batch and period updates for one payment
    ///
    /// `periods` are the resolved selected rows; order is irrelevant, the
    /// allocator sorts them chronologically. The returned batch's lines
    /// are sorted by the allocation ordering key and numbered - callers
    /// depend on that order.
    pub fn allocate(
        &self,
        batch_no: u64,
        contract_id: ContractId,
        periods: &[AmortizationPeriod],
        payment: &PaymentFact,
    ) -> Result<Allocation, PaymentError> {
        let currency = payment.currency.ok_or_else(|| {
            PaymentError::validation("payment currency is required")
        })?;
        let paid = Money::new(payment.amount, currency);
        if !paid.is_positive() {
            return Err(PaymentError::validation("payment amount must be positive"));
        }

        let mut selected: Vec<AmortizationPeriod> = periods
            .iter()
            .filter(|p| p.remaining().is_positive())
            .cloned()
            .collect();
        selected.sort_by_key(|p| p.period_month);

        let payment_date = payment.payment_date;
        let (current, future): (Vec<_>, Vec<_>) = selected
            .iter()
            .cloned()
            .partition(|p| self.resolver.cutoff(p.period_month) <= payment_date);

        let mut lines = Vec::new();
        let mut current_total = Money::zero(currency);

        for period in &current {
            let remaining = period.remaining();
            current_total = current_total.checked_add(&remaining)?;
            let booking = self.resolver.resolve(period.period_month, Some(payment_date));
            lines.push(
                JournalLine::debit(AccountKind::Payable, booking, remaining)
                    .with_memo(format!(
                        "Payable settlement - {}",
                        period.period_month.format("%Y-%m")
                    ))
                    .with_period(period.id),
            );
        }

        let available = paid.checked_sub(&current_total)?;

        if future.is_empty() {
            if available.is_positive() {
                lines.push(
                    JournalLine::debit(AccountKind::Expense, payment_date, available)
                        .with_memo("Overpayment adjustment"),
                );
            } else if available.is_negative() {
                lines.push(
                    JournalLine::credit(AccountKind::Expense, payment_date, available.abs())
                        .with_memo("Payment shortfall"),
                );
            }
        } else {
            self.allocate_future(&mut lines, &future, available, payment_date, currency)?;
        }

        lines.push(
            JournalLine::credit(AccountKind::Cash, payment_date, paid).with_memo("Payment"),
        );

        let mut batch = JournalBatch::new(BatchId::Payment(batch_no), contract_id);
        batch.lines = sort_and_number(batch_no, batch.created_at, lines);

        let applications = plan_applications(&selected, paid)?;

        info!(
            contract = %contract_id,
            batch = %batch.id,
            lines = batch.len(),
            periods = applications.len(),
            "allocated payment"
        );
        Ok(Allocation {
            batch,
            applications,
        })
    }

    /// Future periods: payable debit at each period's own cutoff, funded
    /// by drawing the available-for-future balance down as Prepaid
    /// credits; a period the balance cannot cover splits into a partial
    /// Prepaid credit plus an Expense credit, and a surplus left after
    /// the last period closes with a Prepaid credit / Expense debit pair
    fn allocate_future(
        &self,
        lines: &mut Vec<JournalLine>,
        future: &[AmortizationPeriod],
        available: Money,
        payment_date: chrono::NaiveDate,
        currency: core_kernel::Currency,
    ) -> Result<(), PaymentError> {
        if available.is_positive() {
            lines.push(
                JournalLine::debit(AccountKind::Prepaid, payment_date, available)
                    .with_memo("Prepaid carry-forward"),
            );
        } else if available.is_negative() {
            lines.push(
                JournalLine::credit(AccountKind::Expense, payment_date, available.abs())
                    .with_memo("Payment shortfall"),
            );
        }

        let mut balance = if available.is_positive() {
            available
        } else {
            Money::zero(currency)
        };
        let mut last_cutoff = payment_date;

        for period in future {
            let remaining = period.remaining();
            let cutoff = self.resolver.cutoff(period.period_month);
            last_cutoff = cutoff;
            let label = period.period_month.format("%Y-%m");

            lines.push(
                JournalLine::debit(AccountKind::Payable, cutoff, remaining)
                    .with_memo(format!("Amortization payable - {}", label))
                    .with_period(period.id),
            );

            let covered = balance.min(&remaining)?;
            if covered.is_positive() {
                lines.push(
                    JournalLine::credit(AccountKind::Prepaid, cutoff, covered)
                        .with_memo(format!("Prepaid draw-down - {}", label))
                        .with_period(period.id),
                );
            }

            let shortfall = remaining.checked_sub(&covered)?;
            if shortfall.is_positive() {
                lines.push(
                    JournalLine::credit(AccountKind::Expense, cutoff, shortfall)
                        .with_memo(format!("Prepaid shortfall - {}", label))
                        .with_period(period.id),
                );
            }

            balance = balance.checked_sub(&covered)?;
        }

        if balance.is_positive() {
            lines.push(
                JournalLine::debit(AccountKind::Expense, last_cutoff, balance)
                    .with_memo("Prepaid surplus close-out"),
            );
            lines.push(
                JournalLine::credit(AccountKind::Prepaid, last_cutoff, balance)
                    .with_memo("Prepaid surplus close-out"),
            );
        }
        Ok(())
    }
}

/// Applies the cash across periods in chronological order, never
/// exceeding a period's remaining balance
fn plan_applications(
    selected: &[AmortizationPeriod],
    paid: Money,
) -> Result<Vec<PeriodApplication>, PaymentError> {
    let mut cash = paid;
    let mut applications = Vec::new();

    for period in selected {
        if !cash.is_positive() {
            break;
        }
        let remaining = period.remaining();
        let applied = cash.min(&remaining)?;
        if !applied.is_positive() {
            continue;
        }

        let new_paid_total = period.paid_amount.checked_add(&applied)?;
        let new_status = if new_paid_total.amount() >= period.amount.amount() {
            PeriodStatus::Paid
        } else {
            PeriodStatus::Pending
        };
        applications.push(PeriodApplication {
            period_id: period.id,
            applied,
            new_paid_total,
            new_status,
        });
        cash = cash.checked_sub(&applied)?;
    }
    Ok(applications)
}
