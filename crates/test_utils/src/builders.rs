//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::NaiveDate;
use core_kernel::{ContractId, Currency, Money, PeriodId};
use domain_ledger::PaymentFact;
use domain_schedule::{AmortizationPeriod, ContractSummary};
use rust_decimal::Decimal;

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for amortization periods
pub struct TestPeriodBuilder {
    contract_id: ContractId,
    schedule_no: String,
    period_month: NaiveDate,
    booking_date: NaiveDate,
    amount: Money,
    paid_amount: Option<Money>,
    posted: bool,
}

impl Default for TestPeriodBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPeriodBuilder {
    pub fn new() -> Self {
        Self {
            contract_id: ContractId::new_v7(),
            schedule_no: "AMT202401001".to_string(),
            period_month: TemporalFixtures::jan_2024(),
            booking_date: TemporalFixtures::jan_cutoff(),
            amount: MoneyFixtures::cny_800(),
            paid_amount: None,
            posted: false,
        }
    }

    pub fn for_contract(mut self, contract_id: ContractId) -> Self {
        self.contract_id = contract_id;
        self
    }

    pub fn with_schedule_no(mut self, schedule_no: impl Into<String>) -> Self {
        self.schedule_no = schedule_no.into();
        self
    }

    /// Sets the period month and aligns the booking date to its 27th
    pub fn in_month(mut self, month: NaiveDate) -> Self {
        self.period_month = core_kernel::temporal::month_start(month);
        self.booking_date = core_kernel::temporal::clamped_day_in_month(month, 27);
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn partially_paid(mut self, paid: Money) -> Self {
        self.paid_amount = Some(paid);
        self
    }

    pub fn posted(mut self) -> Self {
        self.posted = true;
        self
    }

    pub fn build(self) -> AmortizationPeriod {
        let mut period = AmortizationPeriod::new(
            self.contract_id,
            self.schedule_no,
            self.period_month,
            self.booking_date,
            self.amount,
        );
        if let Some(paid) = self.paid_amount {
            period.record_payment(paid);
        }
        period.posted = self.posted;
        period
    }
}

/// Builder for payment facts
pub struct TestPaymentFactBuilder {
    contract_id: ContractId,
    amount: Decimal,
    currency: Option<Currency>,
    payment_date: NaiveDate,
    application_date: Option<NaiveDate>,
    review_completion_date: Option<NaiveDate>,
    selected: Vec<PeriodId>,
}

impl Default for TestPaymentFactBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPaymentFactBuilder {
    pub fn new() -> Self {
        Self {
            contract_id: ContractId::new_v7(),
            amount: MoneyFixtures::cny_800().amount(),
            currency: Some(Currency::CNY),
            payment_date: TemporalFixtures::jan_cutoff(),
            application_date: Some(TemporalFixtures::jan_2024()),
            review_completion_date: Some(TemporalFixtures::jan_cutoff()),
            selected: Vec::new(),
        }
    }

    pub fn for_contract(mut self, contract_id: ContractId) -> Self {
        self.contract_id = contract_id;
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn without_currency(mut self) -> Self {
        self.currency = None;
        self
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.payment_date = date;
        self
    }

    pub fn reviewed_on(mut self, date: NaiveDate) -> Self {
        self.review_completion_date = Some(date);
        self
    }

    pub fn without_review_date(mut self) -> Self {
        self.review_completion_date = None;
        self
    }

    pub fn without_application_date(mut self) -> Self {
        self.application_date = None;
        self
    }

    pub fn selecting(mut self, ids: Vec<PeriodId>) -> Self {
        self.selected = ids;
        self
    }

    pub fn build(self) -> PaymentFact {
        PaymentFact {
            contract_id: self.contract_id,
            amount: self.amount,
            currency: self.currency,
            payment_date: self.payment_date,
            application_date: self.application_date,
            review_completion_date: self.review_completion_date,
            operator: Some(crate::fixtures::StringFixtures::operator().to_string()),
            selected_period_ids: self.selected,
        }
    }
}

/// Builder for contract summaries
pub struct TestContractBuilder {
    id: ContractId,
    latest_scheduled_month: Option<NaiveDate>,
    finished: bool,
}

impl Default for TestContractBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContractBuilder {
    pub fn new() -> Self {
        Self {
            id: ContractId::new_v7(),
            latest_scheduled_month: Some(TemporalFixtures::mar_2024()),
            finished: false,
        }
    }

    pub fn with_id(mut self, id: ContractId) -> Self {
        self.id = id;
        self
    }

    pub fn ending_in(mut self, month: NaiveDate) -> Self {
        self.latest_scheduled_month = Some(month);
        self
    }

    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    pub fn build(self) -> ContractSummary {
        ContractSummary {
            id: self.id,
            latest_scheduled_month: self.latest_scheduled_month,
            finished: self.finished,
        }
    }
}

/// Builds the canonical Jan-Mar 2024 schedule (800.00/month) used by the
/// end-to-end scenario tests
pub fn standard_three_month_schedule(contract_id: ContractId) -> Vec<AmortizationPeriod> {
    [
        TemporalFixtures::jan_2024(),
        TemporalFixtures::feb_2024(),
        TemporalFixtures::mar_2024(),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, month)| {
        TestPeriodBuilder::new()
            .for_contract(contract_id)
            .with_schedule_no(format!("AMT2024{:02}{:03}", i + 1, i + 1))
            .in_month(month)
            .build()
    })
    .collect()
}
