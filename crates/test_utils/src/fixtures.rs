//! Pre-built test data for common entities

use chrono::NaiveDate;
use core_kernel::{ContractId, Currency, Money, PeriodId};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal_macros::dec;

/// Common monetary fixtures
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The canonical per-period amount of the scenario tests
    pub fn cny_800() -> Money {
        Money::new(dec!(800.00), Currency::CNY)
    }

    /// The canonical contract total of the scenario tests
    pub fn cny_2400() -> Money {
        Money::new(dec!(2400.00), Currency::CNY)
    }

    pub fn cny(minor_units: i64) -> Money {
        Money::from_minor(minor_units, Currency::CNY)
    }
}

/// Common date fixtures around the Jan-Mar 2024 contract
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn jan_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    pub fn feb_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    pub fn mar_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    pub fn jan_cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 27).unwrap()
    }

    pub fn feb_cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 27).unwrap()
    }

    pub fn mar_cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 27).unwrap()
    }

    pub fn approval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }
}

/// Identifier fixtures
pub struct IdFixtures;

impl IdFixtures {
    pub fn contract_id() -> ContractId {
        ContractId::new_v7()
    }

    pub fn period_id() -> PeriodId {
        PeriodId::new_v7()
    }
}

/// String fixtures
pub struct StringFixtures;

impl StringFixtures {
    /// A plausible vendor name for contract fixtures
    pub fn vendor_name() -> String {
        CompanyName().fake()
    }

    pub fn operator() -> &'static str {
        "finance-ops"
    }
}
