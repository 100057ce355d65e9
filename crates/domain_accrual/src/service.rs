//! Accrual generation service
//!
//! Orchestrates one accrual-generation act: validate the request, load
//! the periods in range, classify the scenario, emit the batch, verify
//! it balances, persist it, and flag the consumed periods as posted.
//! Either every effect commits or none does - validation and balance
//! failures surface before any mutation reaches a store.

use chrono::NaiveDate;
use core_kernel::temporal::month_start;
use core_kernel::{ContractId, DateRange, MonthRange};
use domain_ledger::{verify_batch, JournalBatch, JournalStore, PaymentFact};
use domain_schedule::{BookingDateResolver, ContractStore, PeriodStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::ScenarioClassifier;
use crate::error::AccrualError;
use crate::generator::AccrualEntryGenerator;

/// Request to generate accrual entries for a payable range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualGenerateRequest {
    /// First payable month (any day within the month)
    pub payable_start: NaiveDate,
    /// Last payable month, inclusive
    pub payable_end: NaiveDate,
    /// Accrual approval date; required
    pub approval_date: Option<NaiveDate>,
    /// Payment facts when cash has already moved; absent for plain accrual
    pub payment: Option<PaymentFact>,
}

/// Drives accrual-entry generation against the collaborator ports
pub struct AccrualService<P, C, J> {
    periods: P,
    contracts: C,
    journal: J,
    classifier: ScenarioClassifier,
    generator: AccrualEntryGenerator,
}

impl<P, C, J> AccrualService<P, C, J>
where
    P: PeriodStore,
    C: ContractStore,
    J: JournalStore,
{
    pub fn new(periods: P, contracts: C, journal: J, resolver: BookingDateResolver) -> Self {
        Self {
            periods,
            contracts,
            journal,
            classifier: ScenarioClassifier::new(resolver),
            generator: AccrualEntryGenerator::new(resolver),
        }
    }

    /// Generates, verifies, and persists one accrual batch
    ///
    /// Fails with `Validation` on missing/contradictory input, `NotFound`
    /// when the range holds no periods, and `Imbalance` when the generated
    /// batch does not close to zero (in which case nothing is persisted).
    pub fn generate_accrual_entries(
        &self,
        contract_id: ContractId,
        request: &AccrualGenerateRequest,
    ) -> Result<JournalBatch, AccrualError> {
        validate_request(request)?;

        let range = MonthRange::new(request.payable_start, request.payable_end)
            .expect("range order checked during validation");
        let lookup = DateRange::new(range.start(), range.end())
            .expect("month range bounds are ordered");

        let periods = self.periods.load_periods(contract_id, &lookup)?;
        if periods.is_empty() {
            return Err(AccrualError::not_found(
                "no amortization periods found in the requested range",
            ));
        }

        self.ensure_chronological(contract_id, &range)?;

        let scenario = self
            .classifier
            .classify(&periods, request.payment.as_ref())?;
        let batch = self.generator.generate(
            contract_id,
            &range,
            request.approval_date,
            request.payment.as_ref(),
            &periods,
            &scenario,
        )?;

        verify_batch(&batch)?;

        self.journal.persist_batch(&batch)?;
        let ids: Vec<_> = periods.iter().map(|p| p.id).collect();
        self.periods.mark_posted(&ids)?;

        // Secondary side effect: never allowed to fail the posting itself
        if let Err(e) = self.update_finished_status(contract_id, range.end()) {
            warn!(
                contract = %contract_id,
                error = %e,
                "contract finished-status update failed; journal posting unaffected"
            );
        }

        Ok(batch)
    }

    /// Ranges must be posted in chronological order: a request may not
    /// start before the contract's latest already-posted month
    fn ensure_chronological(
        &self,
        contract_id: ContractId,
        range: &MonthRange,
    ) -> Result<(), AccrualError> {
        if let Some(latest_posted) = self.periods.latest_posted_month(contract_id)? {
            if range.start() < month_start(latest_posted) {
                return Err(AccrualError::validation(
                    "select unposted payable ranges in chronological order",
                ));
            }
        }
        Ok(())
    }

    /// Marks the contract finished once the posted range reaches its last
    /// scheduled month; idempotent
    fn update_finished_status(
        &self,
        contract_id: ContractId,
        range_end: NaiveDate,
    ) -> Result<(), AccrualError> {
        let Some(latest) = self.periods.latest_scheduled_month(contract_id)? else {
            debug!(contract = %contract_id, "no scheduled periods; skipping finished check");
            return Ok(());
        };

        if month_start(latest) != month_start(range_end) {
            debug!(contract = %contract_id, "accruals not yet complete; contract stays open");
            return Ok(());
        }

        let contract = self.contracts.load_contract(contract_id)?;
        if contract.finished {
            debug!(contract = %contract_id, "contract already finished; nothing to update");
            return Ok(());
        }

        self.contracts.mark_finished(contract_id)?;
        info!(contract = %contract_id, "contract marked finished");
        Ok(())
    }
}

fn validate_request(request: &AccrualGenerateRequest) -> Result<(), AccrualError> {
    if request.payable_start > request.payable_end {
        return Err(AccrualError::validation(
            "payable range start must not be after the end",
        ));
    }
    if request.approval_date.is_none() {
        return Err(AccrualError::validation(
            "amortization approval date is required",
        ));
    }

    if let Some(payment) = request.payment.as_ref().filter(|p| p.has_payment()) {
        if payment.application_date.is_none() {
            return Err(AccrualError::validation(
                "payment application date is required",
            ));
        }
        if payment.review_completion_date.is_none() {
            return Err(AccrualError::validation(
                "review completion date is required",
            ));
        }
        if payment.currency.is_none() {
            return Err(AccrualError::validation("payment currency is required"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_request() -> AccrualGenerateRequest {
        AccrualGenerateRequest {
            payable_start: date(2024, 1, 1),
            payable_end: date(2024, 3, 1),
            approval_date: Some(date(2024, 1, 5)),
            payment: None,
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut request = base_request();
        request.payable_start = date(2024, 4, 1);
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err.kind(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("payable range"));
    }

    #[test]
    fn test_missing_approval_rejected() {
        let mut request = base_request();
        request.approval_date = None;
        let err = validate_request(&request).unwrap_err();
        assert!(err.to_string().contains("approval date"));
    }

    #[test]
    fn test_paid_request_requires_dates_and_currency() {
        let mut request = base_request();
        let fact = PaymentFact::new(
            ContractId::new(),
            dec!(800.00),
            Currency::CNY,
            date(2024, 1, 27),
        );
        // application and review dates absent
        request.payment = Some(fact);
        let err = validate_request(&request).unwrap_err();
        assert!(err.to_string().contains("application date"));
    }

    #[test]
    fn test_zero_payment_skips_paid_validation() {
        let mut request = base_request();
        request.payment = Some(PaymentFact::new(
            ContractId::new(),
            dec!(0),
            Currency::CNY,
            date(2024, 1, 27),
        ));
        assert!(validate_request(&request).is_ok());
    }
}
