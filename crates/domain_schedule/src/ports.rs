//! Schedule domain ports
//!
//! Collaborator traits for period storage, contract lookup, and the
//! append-only audit trail. The accrual and payment services drive these
//! ports; adapters decide where the data actually lives.

use chrono::NaiveDate;
use core_kernel::ports::{DomainPort, PortError};
use core_kernel::{AuditRecordId, ContractId, DateRange, Money, PeriodId};
use serde::{Deserialize, Serialize};

use crate::period::{AmortizationPeriod, PeriodStatus};

/// Minimal contract projection the engine needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub id: ContractId,
    /// Month (first of month) of the contract's last scheduled period
    pub latest_scheduled_month: Option<NaiveDate>,
    /// True once every scheduled period has produced accrual entries
    pub finished: bool,
}

/// Append-only record of a period's payment-state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditRecordId,
    pub period_id: PeriodId,
    /// Operator that triggered the change, or `SYSTEM`
    pub operator: String,
    /// Amount applied by the change
    pub amount: Money,
    /// Business date of the change (payment date)
    pub date: NaiveDate,
    pub new_status: PeriodStatus,
    pub remark: String,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

impl AuditRecord {
    pub fn new(
        period_id: PeriodId,
        operator: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        new_status: PeriodStatus,
        remark: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditRecordId::new_v7(),
            period_id,
            operator: operator.into(),
            amount,
            date,
            new_status,
            remark: remark.into(),
            recorded_at: chrono::Utc::now(),
        }
    }
}

/// Storage port for amortization periods
pub trait PeriodStore: DomainPort {
    /// Loads a contract's periods whose period month falls inside the
    /// range, ordered by period month ascending
    fn load_periods(
        &self,
        contract_id: ContractId,
        range: &DateRange,
    ) -> Result<Vec<AmortizationPeriod>, PortError>;

    /// Resolves period ids to rows; fails with NotFound on the first
    /// unknown id
    fn load_by_ids(&self, ids: &[PeriodId]) -> Result<Vec<AmortizationPeriod>, PortError>;

    /// Persists freshly generated rows
    fn save_periods(&self, periods: &[AmortizationPeriod]) -> Result<(), PortError>;

    /// Flags the given periods as consumed by an accrual batch
    fn mark_posted(&self, ids: &[PeriodId]) -> Result<(), PortError>;

    /// Applies a payment delta to a period's cumulative paid amount,
    /// returning the updated row
    fn record_paid_amount(
        &self,
        period_id: PeriodId,
        delta: Money,
        payment_date: NaiveDate,
    ) -> Result<AmortizationPeriod, PortError>;

    /// Month of the contract's last scheduled period, if any
    fn latest_scheduled_month(
        &self,
        contract_id: ContractId,
    ) -> Result<Option<NaiveDate>, PortError>;

    /// Month of the contract's last already-posted period, if any
    fn latest_posted_month(&self, contract_id: ContractId)
        -> Result<Option<NaiveDate>, PortError>;
}

/// Lookup and status port for contracts
pub trait ContractStore: DomainPort {
    fn load_contract(&self, contract_id: ContractId) -> Result<ContractSummary, PortError>;

    /// Marks the contract finished; must be idempotent
    fn mark_finished(&self, contract_id: ContractId) -> Result<(), PortError>;
}

/// Append-only audit trail port
pub trait AuditLog: DomainPort {
    fn append(&self, record: AuditRecord) -> Result<(), PortError>;
}
