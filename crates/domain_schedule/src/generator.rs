//! Amortization schedule generation
//!
//! Bulk-creates a contract's amortization periods from a total amount and
//! an inclusive month range, stamping each row with its prorated amount
//! and resolved ledger booking date.

use chrono::NaiveDate;
use core_kernel::{ContractId, Money, MonthRange};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::booking::BookingDateResolver;
use crate::error::ScheduleError;
use crate::period::AmortizationPeriod;
use crate::proration::prorate;

/// Request to generate a contract's amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGenerateRequest {
    /// Total contract amount to amortize
    pub total_amount: Money,
    /// First amortization month (any day within the month)
    pub start_month: NaiveDate,
    /// Last amortization month, inclusive
    pub end_month: NaiveDate,
    /// Accrual approval date; late approval shifts early bookings forward
    pub approval_date: Option<NaiveDate>,
}

/// Generates amortization periods for a contract
#[derive(Debug, Default)]
pub struct ScheduleGenerator {
    resolver: BookingDateResolver,
}

impl ScheduleGenerator {
    pub fn new(resolver: BookingDateResolver) -> Self {
        Self { resolver }
    }

    /// Builds the full ordered period list for a contract
    ///
    /// Fails with `InvalidRange` when the end month precedes the start
    /// month; all other inputs are taken as-is (the currency is copied
    /// verbatim from the total amount).
    pub fn generate(
        &self,
        contract_id: ContractId,
        request: &ScheduleGenerateRequest,
    ) -> Result<Vec<AmortizationPeriod>, ScheduleError> {
        let range = MonthRange::new(request.start_month, request.end_month).map_err(|_| {
            ScheduleError::InvalidRange {
                start: request.start_month.to_string(),
                end: request.end_month.to_string(),
            }
        })?;

        let amounts = prorate(request.total_amount, &range)?;

        let periods: Vec<AmortizationPeriod> = range
            .iter()
            .zip(amounts)
            .enumerate()
            .map(|(seq, (month, amount))| {
                let booking_date = self.resolver.resolve(month, request.approval_date);
                AmortizationPeriod::new(
                    contract_id,
                    schedule_no(month, seq as u32 + 1),
                    month,
                    booking_date,
                    amount,
                )
            })
            .collect();

        info!(
            contract = %contract_id,
            periods = periods.len(),
            "generated amortization schedule"
        );
        Ok(periods)
    }
}

/// Schedule number for one period row, e.g. `AMT202401001`
fn schedule_no(month: NaiveDate, seq: u32) -> String {
    format!("AMT{}{:03}", month.format("%Y%m"), seq)
}
