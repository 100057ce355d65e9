//! Engine settings
//!
//! The booking day and the GL account codes are deployment configuration,
//! not logic. Defaults match the company standard (booking day 27, codes
//! 6001/2202/1122/1002); the environment can override any of them with
//! `LEDGER_`-prefixed variables (e.g. `LEDGER_BOOKING_DAY=25`).

use serde::Deserialize;

use crate::account::{AccountKind, ChartOfAccounts};
use crate::error::LedgerError;

/// Configurable constants of the reconciliation engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Day-of-month every journal line books against (clamped to short
    /// months)
    pub booking_day: u32,
    /// GL code of the expense account
    pub expense_account: String,
    /// GL code of the payable account
    pub payable_account: String,
    /// GL code of the prepaid account
    pub prepaid_account: String,
    /// GL code of the cash account
    pub cash_account: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let chart = ChartOfAccounts::standard();
        Self {
            booking_day: 27,
            expense_account: chart.code(AccountKind::Expense).to_string(),
            payable_account: chart.code(AccountKind::Payable).to_string(),
            prepaid_account: chart.code(AccountKind::Prepaid).to_string(),
            cash_account: chart.code(AccountKind::Cash).to_string(),
        }
    }
}

impl EngineSettings {
    /// Loads settings from `LEDGER_`-prefixed environment variables,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Result<Self, LedgerError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("booking_day", defaults.booking_day as i64)
            .and_then(|b| b.set_default("expense_account", defaults.expense_account.clone()))
            .and_then(|b| b.set_default("payable_account", defaults.payable_account.clone()))
            .and_then(|b| b.set_default("prepaid_account", defaults.prepaid_account.clone()))
            .and_then(|b| b.set_default("cash_account", defaults.cash_account.clone()))
            .map_err(|e| LedgerError::Configuration(e.to_string()))?
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()
            .map_err(|e| LedgerError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| LedgerError::Configuration(e.to_string()))
    }

    /// Builds the chart of accounts implied by these settings
    pub fn chart(&self) -> ChartOfAccounts {
        ChartOfAccounts::new([
            (AccountKind::Expense, self.expense_account.as_str(), "Expense"),
            (AccountKind::Payable, self.payable_account.as_str(), "Payable"),
            (AccountKind::Prepaid, self.prepaid_account.as_str(), "Prepaid"),
            (AccountKind::Cash, self.cash_account.as_str(), "Cash"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_company_standard() {
        let settings = EngineSettings::default();
        assert_eq!(settings.booking_day, 27);
        assert_eq!(settings.expense_account, "6001");
        assert_eq!(settings.payable_account, "2202");
        assert_eq!(settings.prepaid_account, "1122");
        assert_eq!(settings.cash_account, "1002");
    }

    #[test]
    fn test_chart_reflects_settings() {
        let mut settings = EngineSettings::default();
        settings.payable_account = "2100".to_string();
        let chart = settings.chart();
        assert_eq!(chart.code(AccountKind::Payable), "2100");
        assert_eq!(chart.code(AccountKind::Cash), "1002");
    }
}
