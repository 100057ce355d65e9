//! Payment facts
//!
//! A payment fact captures one payment-execution request: the cash amount,
//! its dates, and the amortization periods it was directed at. Facts are
//! built once per request and never mutated.

use chrono::NaiveDate;
use core_kernel::{ContractId, Currency, PeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An actual (or predetermined) payment against a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFact {
    pub contract_id: ContractId,
    /// Cash amount paid; zero means "no payment"
    pub amount: Decimal,
    /// Payment currency; required whenever the amount is positive
    pub currency: Option<Currency>,
    /// Date the cash moved
    pub payment_date: NaiveDate,
    /// Date the payment application was filed
    pub application_date: Option<NaiveDate>,
    /// Date the payment review was approved
    pub review_completion_date: Option<NaiveDate>,
    /// Operator executing the payment; defaults to SYSTEM when absent
    pub operator: Option<String>,
    /// Amortization periods this payment was directed at
    pub selected_period_ids: Vec<PeriodId>,
}

impl PaymentFact {
    /// Creates a fact for a concrete cash payment
    pub fn new(
        contract_id: ContractId,
        amount: Decimal,
        currency: Currency,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            contract_id,
            amount,
            currency: Some(currency),
            payment_date,
            application_date: None,
            review_completion_date: None,
            operator: None,
            selected_period_ids: Vec::new(),
        }
    }

    /// Sets the application date
    pub fn applied_on(mut self, date: NaiveDate) -> Self {
        self.application_date = Some(date);
        self
    }

    /// Sets the review completion date
    pub fn reviewed_on(mut self, date: NaiveDate) -> Self {
        self.review_completion_date = Some(date);
        self
    }

    /// Sets the executing operator
    pub fn by_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Selects the periods the payment is directed at
    pub fn for_periods(mut self, ids: Vec<PeriodId>) -> Self {
        self.selected_period_ids = ids;
        self
    }

    /// Returns true when the fact carries an actual positive payment
    pub fn has_payment(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// The operator, defaulting to SYSTEM
    pub fn operator_or_system(&self) -> &str {
        self.operator.as_deref().unwrap_or("SYSTEM")
    }
}
