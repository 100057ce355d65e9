//! Payment domain errors

use core_kernel::{MoneyError, PortError};
use domain_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during payment allocation
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Missing or contradictory request input; surfaced before any
    /// mutation occurs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown contract or amortization period id
    #[error("Not found: {0}")]
    NotFound(String),

    /// The allocated batch failed balance verification; the batch was
    /// logged and discarded
    #[error("Imbalance: {0}")]
    Imbalance(#[from] LedgerError),

    /// A collaborator call failed
    #[error("Port error: {0}")]
    Port(PortError),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PaymentError::NotFound(message.into())
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PaymentError::Validation(_) => "VALIDATION_ERROR",
            PaymentError::NotFound(_) => "NOT_FOUND_ERROR",
            PaymentError::Imbalance(_) => "IMBALANCE_ERROR",
            PaymentError::Port(_) => "PORT_ERROR",
            PaymentError::Money(_) => "MONEY_ERROR",
        }
    }
}

impl From<PortError> for PaymentError {
    fn from(error: PortError) -> Self {
        if error.is_not_found() {
            PaymentError::NotFound(error.to_string())
        } else {
            PaymentError::Port(error)
        }
    }
}
