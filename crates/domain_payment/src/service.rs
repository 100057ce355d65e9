//! Payment allocation service
//!
//! Orchestrates one payment execution: resolve the selected periods,
//! allocate the payment into a verified journal batch, persist it, then
//! apply the cash to each consumed period's cumulative paid amount and
//! record an audit entry for every period whose state changed.

use core_kernel::{ContractId, PeriodId};
use domain_ledger::{verify_batch, JournalBatch, JournalStore, PaymentFact};
use domain_schedule::{AuditLog, AuditRecord, BookingDateResolver, ContractStore, PeriodStore};
use tracing::info;

use crate::allocator::PaymentAllocator;
use crate::error::PaymentError;

/// Drives payment allocation against the collaborator ports
pub struct PaymentAllocationService<P, C, J, A> {
    periods: P,
    contracts: C,
    journal: J,
    audit: A,
    allocator: PaymentAllocator,
}

impl<P, C, J, A> PaymentAllocationService<P, C, J, A>
where
    P: PeriodStore,
    C: ContractStore,
    J: JournalStore,
    A: AuditLog,
{
    pub fn new(periods: P, contracts: C, journal: J, audit: A, resolver: BookingDateResolver) -> Self {
        Self {
            periods,
            contracts,
            journal,
            audit,
            allocator: PaymentAllocator::new(resolver),
        }
    }

    /// Allocates one payment across the selected periods
    ///
    /// Fails with `NotFound` when the contract or any selected period id
    /// is unknown, `Validation` on an unusable payment fact, and
    /// `Imbalance` when the allocation does not close to zero (nothing is
    /// persisted in that case).
    pub fn allocate_payment(
        &self,
        contract_id: ContractId,
        selected_period_ids: &[PeriodId],
        payment: &PaymentFact,
    ) -> Result<JournalBatch, PaymentError> {
        if selected_period_ids.is_empty() {
            return Err(PaymentError::validation(
                "at least one amortization period must be selected",
            ));
        }
        if payment.currency.is_none() {
            return Err(PaymentError::validation("payment currency is required"));
        }
        if !payment.has_payment() {
            return Err(PaymentError::validation("payment amount must be positive"));
        }

        self.contracts.load_contract(contract_id)?;
        let periods = self.periods.load_by_ids(selected_period_ids)?;

        let batch_no = self.journal.next_payment_no()?;
        let allocation = self
            .allocator
            .allocate(batch_no, contract_id, &periods, payment)?;

        verify_batch(&allocation.batch)?;
        self.journal.persist_batch(&allocation.batch)?;

        for application in &allocation.applications {
            let updated = self.periods.record_paid_amount(
                application.period_id,
                application.applied,
                payment.payment_date,
            )?;
            self.audit.append(AuditRecord::new(
                application.period_id,
                payment.operator_or_system(),
                application.applied,
                payment.payment_date,
                updated.status,
                format!("payment applied: {}", allocation.batch.id),
            ))?;
        }

        info!(
            contract = %contract_id,
            batch = %allocation.batch.id,
            updated_periods = allocation.applications.len(),
            "payment allocation committed"
        );
        Ok(allocation.batch)
    }
}
