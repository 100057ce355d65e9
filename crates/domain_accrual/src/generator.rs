//! Accrual-time journal-entry generation
//!
//! Emits the balanced debit/credit lines for a classified scenario. Every
//! line of one generation act carries the same accrual batch number
//! (`{contractId}_{rangeStart}_{rangeEnd}`), so the whole act can be
//! queried and displayed together.

use chrono::NaiveDate;
use core_kernel::{ContractId, Money, MonthRange};
use domain_ledger::{accrual_batch_no, AccountKind, BatchId, JournalBatch, JournalLine, PaymentFact};
use domain_schedule::{AmortizationPeriod, BookingDateResolver};
use tracing::info;

use crate::classifier::Scenario;
use crate::error::AccrualError;

/// Generates accrual journal batches from classified scenarios
#[derive(Debug, Default)]
pub struct AccrualEntryGenerator {
    resolver: BookingDateResolver,
}

impl AccrualEntryGenerator {
    pub fn new(resolver: BookingDateResolver) -> Self {
        Self { resolver }
    }

    /// Emits the batch for one generation act
    pub fn generate(
        &self,
        contract_id: ContractId,
        range: &MonthRange,
        approval_date: Option<NaiveDate>,
        payment: Option<&PaymentFact>,
        periods: &[AmortizationPeriod],
        scenario: &Scenario,
    ) -> Result<JournalBatch, AccrualError> {
        let batch_no = accrual_batch_no(contract_id, range);
        let mut batch = JournalBatch::new(BatchId::Accrual(batch_no), contract_id);

        match scenario {
            Scenario::NoPayment => self.emit_unpaid(&mut batch, periods, approval_date),
            Scenario::ExactPayment => {
                self.emit_settled(&mut batch, periods, payment_money(payment)?, None)?
            }
            Scenario::Overpayment { excess } => self.emit_settled(
                &mut batch,
                periods,
                payment_money(payment)?,
                Some(Adjustment::Overpaid(*excess)),
            )?,
            Scenario::Underpayment { shortfall } => self.emit_settled(
                &mut batch,
                periods,
                payment_money(payment)?,
                Some(Adjustment::Underpaid(*shortfall)),
            )?,
            Scenario::Prepayment {
                current,
                future,
                carried_forward,
            } => self.emit_prepayment(
                &mut batch,
                current,
                future,
                *carried_forward,
                payment_money(payment)?,
            )?,
        }

        for (i, line) in batch.lines.iter_mut().enumerate() {
            line.entry_order = i as u32 + 1;
        }

        info!(
            contract = %contract_id,
            batch = %batch.id,
            scenario = scenario.tag(),
            lines = batch.len(),
            "generated accrual entries"
        );
        Ok(batch)
    }

    /// No payment: plain expense/payable accrual per period, booked via
    /// the approval-date rule
    fn emit_unpaid(
        &self,
        batch: &mut JournalBatch,
        periods: &[AmortizationPeriod],
        approval_date: Option<NaiveDate>,
    ) {
        for period in periods {
            let booking = self.resolver.resolve(period.period_month, approval_date);
            let label = period.period_month.format("%Y-%m");
            batch.push(
                JournalLine::debit(AccountKind::Expense, booking, period.amount)
                    .with_memo(format!("Amortization expense - {}", label))
                    .with_period(period.id),
            );
            batch.push(
                JournalLine::credit(AccountKind::Payable, booking, period.amount)
                    .with_memo(format!("Amortization payable - {}", label))
                    .with_period(period.id),
            );
        }
    }

    /// Exact, over-, and underpayment without future periods: payable
    /// debits per period, an expense adjustment for the difference, and
    /// one cash credit for the actual payment, all booked on the review
    /// completion date
    fn emit_settled(
        &self,
        batch: &mut JournalBatch,
        periods: &[AmortizationPeriod],
        payment: PaidAmounts,
        adjustment: Option<Adjustment>,
    ) -> Result<(), AccrualError> {
        let booking = payment.review_date;

        for period in periods {
            batch.push(
                JournalLine::debit(AccountKind::Payable, booking, period.amount)
                    .with_memo(format!(
                        "Payable settlement - {}",
                        period.period_month.format("%Y-%m")
                    ))
                    .with_period(period.id),
            );
        }

        match adjustment {
            Some(Adjustment::Overpaid(excess)) => batch.push(
                JournalLine::debit(AccountKind::Expense, booking, excess)
                    .with_memo("Overpayment adjustment"),
            ),
            Some(Adjustment::Underpaid(shortfall)) => batch.push(
                JournalLine::credit(AccountKind::Expense, booking, shortfall)
                    .with_memo("Payment shortfall"),
            ),
            None => {}
        }

        batch.push(
            JournalLine::credit(AccountKind::Cash, booking, payment.amount).with_memo("Payment"),
        );
        Ok(())
    }

    /// Prepayment: current periods settle as payables on the review date;
    /// the payment remainder is carried as Prepaid and drawn down against
    /// each future period at that period's own cutoff, with shortfalls
    /// posting to Expense and any final surplus closed out to zero-sum
    fn emit_prepayment(
        &self,
        batch: &mut JournalBatch,
        current: &[AmortizationPeriod],
        future: &[AmortizationPeriod],
        carried_forward: Money,
        payment: PaidAmounts,
    ) -> Result<(), AccrualError> {
        let booking = payment.review_date;
        let currency = payment.amount.currency();

        for period in current {
            batch.push(
                JournalLine::debit(AccountKind::Payable, booking, period.amount)
                    .with_memo(format!(
                        "Payable settlement - {}",
                        period.period_month.format("%Y-%m")
                    ))
                    .with_period(period.id),
            );
        }

        if carried_forward.is_positive() {
            batch.push(
                JournalLine::debit(AccountKind::Prepaid, booking, carried_forward)
                    .with_memo("Prepaid carry-forward"),
            );
        } else if carried_forward.is_negative() {
            // payment does not even cover the current periods
            batch.push(
                JournalLine::credit(AccountKind::Expense, booking, carried_forward.abs())
                    .with_memo("Payment shortfall"),
            );
        }

        batch.push(
            JournalLine::credit(AccountKind::Cash, booking, payment.amount).with_memo("Payment"),
        );

        // draw the prepaid balance down, period by period in order
        let mut balance = if carried_forward.is_positive() {
            carried_forward
        } else {
            Money::zero(currency)
        };
        let mut last_cutoff = booking;

        for period in future {
            let cutoff = self.resolver.cutoff(period.period_month);
            last_cutoff = cutoff;
            let label = period.period_month.format("%Y-%m");

            batch.push(
                JournalLine::debit(AccountKind::Payable, cutoff, period.amount)
                    .with_memo(format!("Amortization payable - {}", label))
                    .with_period(period.id),
            );

            let covered = balance.min(&period.amount)?;
            if covered.is_positive() {
                batch.push(
                    JournalLine::credit(AccountKind::Prepaid, cutoff, covered)
                        .with_memo(format!("Prepaid draw-down - {}", label))
                        .with_period(period.id),
                );
            }

            let shortfall = period.amount.checked_sub(&covered)?;
            if shortfall.is_positive() {
                batch.push(
                    JournalLine::credit(AccountKind::Expense, cutoff, shortfall)
                        .with_memo(format!("Prepaid shortfall - {}", label))
                        .with_period(period.id),
                );
            }

            balance = balance.checked_sub(&covered)?;
        }

        if balance.is_positive() {
            batch.push(
                JournalLine::debit(AccountKind::Expense, last_cutoff, balance)
                    .with_memo("Prepaid surplus close-out"),
            );
            batch.push(
                JournalLine::credit(AccountKind::Prepaid, last_cutoff, balance)
                    .with_memo("Prepaid surplus close-out"),
            );
        }

        Ok(())
    }
}

/// Expense adjustment for settled scenarios without future periods
#[derive(Debug, Clone, Copy)]
enum Adjustment {
    Overpaid(Money),
    Underpaid(Money),
}

/// Payment amount and review date extracted from a validated fact
#[derive(Debug, Clone, Copy)]
struct PaidAmounts {
    amount: Money,
    review_date: NaiveDate,
}

fn payment_money(payment: Option<&PaymentFact>) -> Result<PaidAmounts, AccrualError> {
    let payment = payment.ok_or_else(|| {
        AccrualError::validation("payment fact is required for paid scenarios")
    })?;
    let currency = payment.currency.ok_or_else(|| {
        AccrualError::validation("payment currency is required for paid scenarios")
    })?;
    let review_date = payment.review_completion_date.ok_or_else(|| {
        AccrualError::validation("review completion date is required for paid scenarios")
    })?;
    Ok(PaidAmounts {
        amount: Money::new(payment.amount, currency),
        review_date,
    })
}
