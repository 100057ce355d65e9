//! Accrual scenario classification
//!
//! Given the selected amortization periods and an optional payment fact,
//! exactly one scenario applies. The fork point for every branch is the
//! cutoff comparison: a period is "current" iff its ledger cutoff date is
//! on or before the review completion date (inclusive left boundary); any
//! period whose cutoff falls after the review date routes the whole
//! payment through the prepayment branch.

use core_kernel::Money;
use domain_ledger::PaymentFact;
use domain_schedule::{AmortizationPeriod, BookingDateResolver};
use serde::{Deserialize, Serialize};

use crate::error::AccrualError;

/// The mutually exclusive accrual-vs-payment scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// No payment: plain expense/payable accrual per period
    NoPayment,
    /// Payment equals the selected periods' total, no future periods
    ExactPayment,
    /// Payment exceeds the total, no future periods
    Overpayment { excess: Money },
    /// Payment falls short of the total, no future periods
    Underpayment { shortfall: Money },
    /// At least one selected period lies after the review date
    Prepayment {
        current: Vec<AmortizationPeriod>,
        future: Vec<AmortizationPeriod>,
        /// Payment minus the current periods' total; negative when the
        /// payment does not even cover the current periods
        carried_forward: Money,
    },
}

impl Scenario {
    /// Short tag for logging
    pub fn tag(&self) -> &'static str {
        match self {
            Scenario::NoPayment => "no-payment",
            Scenario::ExactPayment => "exact-payment",
            Scenario::Overpayment { .. } => "overpayment",
            Scenario::Underpayment { .. } => "underpayment",
            Scenario::Prepayment { .. } => "prepayment",
        }
    }
}

/// Classifies period selections against a payment fact
#[derive(Debug, Default)]
pub struct ScenarioClassifier {
    resolver: BookingDateResolver,
}

impl ScenarioClassifier {
    pub fn new(resolver: BookingDateResolver) -> Self {
        Self { resolver }
    }

    /// Determines which scenario applies
    ///
    /// Callers must have validated the request first (§ validation in the
    /// accrual service); a paying fact without a review completion date or
    /// currency is rejected here as a defense.
    pub fn classify(
        &self,
        periods: &[AmortizationPeriod],
        payment: Option<&PaymentFact>,
    ) -> Result<Scenario, AccrualError> {
        let Some(payment) = payment.filter(|p| p.has_payment()) else {
            return Ok(Scenario::NoPayment);
        };

        let review_date = payment.review_completion_date.ok_or_else(|| {
            AccrualError::validation("review completion date is required for paid scenarios")
        })?;
        let currency = payment.currency.ok_or_else(|| {
            AccrualError::validation("payment currency is required for paid scenarios")
        })?;
        let paid = Money::new(payment.amount, currency);

        // inclusive left boundary: cutoff on the review date is current
        let (current, future): (Vec<_>, Vec<_>) = periods
            .iter()
            .cloned()
            .partition(|p| self.resolver.cutoff(p.period_month) <= review_date);

        if future.is_empty() {
            let total = sum_amounts(&current, paid)?;
            let difference = paid.checked_sub(&total)?;
            return Ok(if difference.is_zero() {
                Scenario::ExactPayment
            } else if difference.is_positive() {
                Scenario::Overpayment { excess: difference }
            } else {
                Scenario::Underpayment {
                    shortfall: difference.abs(),
                }
            });
        }

        let current_total = sum_amounts(&current, paid)?;
        let carried_forward = paid.checked_sub(&current_total)?;
        Ok(Scenario::Prepayment {
            current,
            future,
            carried_forward,
        })
    }
}

fn sum_amounts(periods: &[AmortizationPeriod], zero_like: Money) -> Result<Money, AccrualError> {
    let mut total = Money::zero(zero_like.currency());
    for period in periods {
        total = total.checked_add(&period.amount)?;
    }
    Ok(total)
}
