//! Payment-plan generation
//!
//! A payment plan is the contract's expected cash-out schedule, distinct
//! from the amortization schedule. Four methods are supported: equal
//! monthly installments, milestone-based tranches, quarterly, and
//! semi-annual. Division remainders always land on the last row so the
//! plan sums back to the contract total.

use chrono::NaiveDate;
use core_kernel::temporal::add_months;
use core_kernel::{ContractId, Money, PlanItemId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Supported payment-plan methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanMethod {
    EqualInstallment,
    MilestoneBased,
    Quarterly,
    SemiAnnual,
}

/// Status of a payment-plan row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanItemStatus {
    Pending,
    Paid,
    Cancelled,
}

/// One expected payment of a contract's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlanItem {
    pub id: PlanItemId,
    pub contract_id: ContractId,
    /// Plan row number, e.g. `PAY-001`
    pub schedule_no: String,
    pub payment_date: NaiveDate,
    /// Human-readable payment condition
    pub condition: String,
    /// Milestone label for milestone-based plans
    pub milestone: String,
    pub amount: Money,
    pub status: PlanItemStatus,
}

/// Request to generate a contract's payment plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanGenerateRequest {
    pub method: PlanMethod,
    pub total_amount: Money,
    pub contract_start: NaiveDate,
    pub contract_end: NaiveDate,
    /// Defaults to the contract start when absent
    pub first_payment_date: Option<NaiveDate>,
    /// Explicit installment count for equal-installment and milestone
    /// plans; derived from the contract duration when absent
    pub periods: Option<u32>,
}

const MILESTONES: [(&str, &str); 5] = [
    ("Contract signing", "0.20"),
    ("Project kickoff", "0.30"),
    ("Stage acceptance", "0.30"),
    ("Project completion", "0.15"),
    ("Warranty release", "0.05"),
];

/// Generates the payment plan rows for a contract
pub fn generate_plan(
    contract_id: ContractId,
    request: &PlanGenerateRequest,
) -> Result<Vec<PaymentPlanItem>, ScheduleError> {
    validate(request)?;

    match request.method {
        PlanMethod::EqualInstallment => monthly_stride(contract_id, request, 1, "installment"),
        PlanMethod::Quarterly => monthly_stride(contract_id, request, 3, "quarterly payment"),
        PlanMethod::SemiAnnual => monthly_stride(contract_id, request, 6, "semi-annual payment"),
        PlanMethod::MilestoneBased => milestone_based(contract_id, request),
    }
}

/// Installment count for a stride: the explicit request count for monthly
/// plans, otherwise derived from the contract's whole-month span.
fn stride_count(request: &PlanGenerateRequest, stride_months: u32) -> u32 {
    let contract_months = months_between(request.contract_start, request.contract_end).max(1);
    match (request.periods, stride_months) {
        (Some(n), 1) if n > 0 => n,
        _ => contract_months.div_ceil(stride_months).max(1),
    }
}

fn validate(request: &PlanGenerateRequest) -> Result<(), ScheduleError> {
    if request.contract_end < request.contract_start {
        return Err(ScheduleError::validation(
            "contract end date must not precede the start date",
        ));
    }
    if let Some(first) = request.first_payment_date {
        if first < request.contract_start {
            return Err(ScheduleError::validation(
                "first payment date must not precede the contract start date",
            ));
        }
    }
    if !request.total_amount.is_positive() {
        return Err(ScheduleError::validation(
            "total amount must be positive for plan generation",
        ));
    }
    Ok(())
}

/// Equal installments at a fixed month stride (1 = monthly, 3 = quarterly,
/// 6 = semi-annual); the last row absorbs the rounding remainder.
fn monthly_stride(
    contract_id: ContractId,
    request: &PlanGenerateRequest,
    stride_months: u32,
    label: &str,
) -> Result<Vec<PaymentPlanItem>, ScheduleError> {
    let count = stride_count(request, stride_months);

    let total = request.total_amount;
    let per = Money::new(
        (total.amount() / Decimal::from(count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        total.currency(),
    );
    let last = total - per.multiply(Decimal::from(count - 1));

    let mut payment_date = request.first_payment_date.unwrap_or(request.contract_start);
    let mut items = Vec::with_capacity(count as usize);
    for seq in 1..=count {
        let amount = if seq == count { last } else { per };
        items.push(plan_item(
            contract_id,
            seq,
            payment_date,
            format!("{} {} of {}", label, seq, count),
            format!("{} #{}", label, seq),
            amount,
        ));
        payment_date = add_months(payment_date, stride_months);
    }
    Ok(items)
}

/// Milestone tranches (20/30/30/15/5%); the final scheduled milestone
/// takes whatever remains after the earlier rounded tranches.
fn milestone_based(
    contract_id: ContractId,
    request: &PlanGenerateRequest,
) -> Result<Vec<PaymentPlanItem>, ScheduleError> {
    let total = request.total_amount;
    let scheduled = request
        .periods
        .map(|n| (n as usize).clamp(1, MILESTONES.len()))
        .unwrap_or(MILESTONES.len());
    let contract_days = (request.contract_end - request.contract_start).num_days().max(1);
    let interval_days = contract_days / scheduled as i64;

    let mut payment_date = request.first_payment_date.unwrap_or(request.contract_start);
    let mut accumulated = Money::zero(total.currency());
    let mut items = Vec::with_capacity(scheduled);

    for (i, (milestone, percentage)) in MILESTONES.iter().take(scheduled).enumerate() {
        let amount = if i == scheduled - 1 {
            total - accumulated
        } else {
            let ratio: Decimal = percentage.parse().expect("milestone ratio is a literal");
            let tranche = Money::new(
                (total.amount() * ratio)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                total.currency(),
            );
            accumulated = accumulated + tranche;
            tranche
        };

        items.push(plan_item(
            contract_id,
            i as u32 + 1,
            payment_date,
            "milestone payment".to_string(),
            (*milestone).to_string(),
            amount,
        ));
        payment_date = payment_date + chrono::Duration::days(interval_days);
    }
    Ok(items)
}

fn plan_item(
    contract_id: ContractId,
    seq: u32,
    payment_date: NaiveDate,
    condition: String,
    milestone: String,
    amount: Money,
) -> PaymentPlanItem {
    PaymentPlanItem {
        id: PlanItemId::new_v7(),
        contract_id,
        schedule_no: format!("PAY-{:03}", seq),
        payment_date,
        condition,
        milestone,
        amount,
        status: PlanItemStatus::Pending,
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    use chrono::Datelike;
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}
