//! Ledger domain errors

use core_kernel::MoneyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A batch's debit and credit totals disagree
    #[error("Unbalanced batch: debits={debits}, credits={credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },

    /// A journal line was constructed with an invalid amount
    #[error("Invalid journal line: {0}")]
    InvalidLine(String),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LedgerError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Unbalanced { .. } => "IMBALANCE_ERROR",
            LedgerError::InvalidLine(_) => "INVALID_LINE",
            LedgerError::Money(_) => "MONEY_ERROR",
            LedgerError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}
