//! In-memory port adapters
//!
//! Thread-safe, clonable adapters backed by `std::sync::Mutex`. Handles
//! share state through an inner `Arc`, so a clone given to a service and
//! a clone kept by a test observe the same rows. Real deployments replace
//! these with database-backed adapters; the engine only sees the port
//! traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use core_kernel::ports::PortError;
use core_kernel::{ContractId, DateRange, Money, PeriodId};
use domain_ledger::{JournalBatch, JournalStore};
use domain_schedule::{
    AmortizationPeriod, AuditLog, AuditRecord, ContractStore, ContractSummary, PeriodStore,
};

/// In-memory amortization period store
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriodStore {
    periods: Arc<Mutex<HashMap<PeriodId, AmortizationPeriod>>>,
}

impl InMemoryPeriodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with pre-built periods
    pub fn seed(&self, periods: impl IntoIterator<Item = AmortizationPeriod>) {
        let mut map = self.periods.lock().expect("period store poisoned");
        for period in periods {
            map.insert(period.id, period);
        }
    }

    /// Snapshot of one period, for assertions
    pub fn get(&self, id: PeriodId) -> Option<AmortizationPeriod> {
        self.periods
            .lock()
            .expect("period store poisoned")
            .get(&id)
            .cloned()
    }

    fn sorted_for_contract(&self, contract_id: ContractId) -> Vec<AmortizationPeriod> {
        let map = self.periods.lock().expect("period store poisoned");
        let mut rows: Vec<_> = map
            .values()
            .filter(|p| p.contract_id == contract_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.period_month);
        rows
    }
}

impl core_kernel::DomainPort for InMemoryPeriodStore {}

impl PeriodStore for InMemoryPeriodStore {
    fn load_periods(
        &self,
        contract_id: ContractId,
        range: &DateRange,
    ) -> Result<Vec<AmortizationPeriod>, PortError> {
        Ok(self
            .sorted_for_contract(contract_id)
            .into_iter()
            .filter(|p| range.contains(p.period_month))
            .collect())
    }

    fn load_by_ids(&self, ids: &[PeriodId]) -> Result<Vec<AmortizationPeriod>, PortError> {
        let map = self.periods.lock().expect("period store poisoned");
        ids.iter()
            .map(|id| {
                map.get(id)
                    .cloned()
                    .ok_or_else(|| PortError::not_found("AmortizationPeriod", id))
            })
            .collect()
    }

    fn save_periods(&self, periods: &[AmortizationPeriod]) -> Result<(), PortError> {
        let mut map = self.periods.lock().expect("period store poisoned");
        for period in periods {
            map.insert(period.id, period.clone());
        }
        Ok(())
    }

    fn mark_posted(&self, ids: &[PeriodId]) -> Result<(), PortError> {
        let mut map = self.periods.lock().expect("period store poisoned");
        for id in ids {
            let period = map
                .get_mut(id)
                .ok_or_else(|| PortError::not_found("AmortizationPeriod", id))?;
            period.posted = true;
        }
        Ok(())
    }

    fn record_paid_amount(
        &self,
        period_id: PeriodId,
        delta: Money,
        _payment_date: NaiveDate,
    ) -> Result<AmortizationPeriod, PortError> {
        let mut map = self.periods.lock().expect("period store poisoned");
        let period = map
            .get_mut(&period_id)
            .ok_or_else(|| PortError::not_found("AmortizationPeriod", period_id))?;

        let remaining = period.remaining();
        if delta.amount() > remaining.amount() {
            return Err(PortError::conflict(format!(
                "paid amount {} would exceed remaining balance {}",
                delta, remaining
            )));
        }
        period.record_payment(delta);
        Ok(period.clone())
    }

    fn latest_scheduled_month(
        &self,
        contract_id: ContractId,
    ) -> Result<Option<NaiveDate>, PortError> {
        Ok(self
            .sorted_for_contract(contract_id)
            .last()
            .map(|p| p.period_month))
    }

    fn latest_posted_month(
        &self,
        contract_id: ContractId,
    ) -> Result<Option<NaiveDate>, PortError> {
        Ok(self
            .sorted_for_contract(contract_id)
            .iter()
            .filter(|p| p.posted)
            .map(|p| p.period_month)
            .max())
    }
}

/// In-memory contract store
#[derive(Debug, Clone, Default)]
pub struct InMemoryContractStore {
    contracts: Arc<Mutex<HashMap<ContractId, ContractSummary>>>,
    finish_calls: Arc<AtomicU64>,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, contract: ContractSummary) {
        self.contracts
            .lock()
            .expect("contract store poisoned")
            .insert(contract.id, contract);
    }

    pub fn get(&self, id: ContractId) -> Option<ContractSummary> {
        self.contracts
            .lock()
            .expect("contract store poisoned")
            .get(&id)
            .cloned()
    }

    /// Number of times `mark_finished` actually ran, for idempotency
    /// assertions
    pub fn finish_calls(&self) -> u64 {
        self.finish_calls.load(Ordering::SeqCst)
    }
}

impl core_kernel::DomainPort for InMemoryContractStore {}

impl ContractStore for InMemoryContractStore {
    fn load_contract(&self, contract_id: ContractId) -> Result<ContractSummary, PortError> {
        self.contracts
            .lock()
            .expect("contract store poisoned")
            .get(&contract_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Contract", contract_id))
    }

    fn mark_finished(&self, contract_id: ContractId) -> Result<(), PortError> {
        let mut map = self.contracts.lock().expect("contract store poisoned");
        let contract = map
            .get_mut(&contract_id)
            .ok_or_else(|| PortError::not_found("Contract", contract_id))?;
        contract.finished = true;
        self.finish_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory journal batch store with an atomic payment-number sequence
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournalStore {
    batches: Arc<Mutex<Vec<JournalBatch>>>,
    payment_seq: Arc<AtomicU64>,
}

impl InMemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().expect("journal store poisoned").len()
    }
}

impl core_kernel::DomainPort for InMemoryJournalStore {}

impl JournalStore for InMemoryJournalStore {
    fn persist_batch(&self, batch: &JournalBatch) -> Result<(), PortError> {
        self.batches
            .lock()
            .expect("journal store poisoned")
            .push(batch.clone());
        Ok(())
    }

    fn next_payment_no(&self) -> Result<u64, PortError> {
        Ok(self.payment_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn load_batches(&self, contract_id: ContractId) -> Result<Vec<JournalBatch>, PortError> {
        Ok(self
            .batches
            .lock()
            .expect("journal store poisoned")
            .iter()
            .filter(|b| b.contract_id == contract_id)
            .cloned()
            .collect())
    }
}

/// In-memory append-only audit log
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit log poisoned").clone()
    }
}

impl core_kernel::DomainPort for InMemoryAuditLog {}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, record: AuditRecord) -> Result<(), PortError> {
        self.records
            .lock()
            .expect("audit log poisoned")
            .push(record);
        Ok(())
    }
}
