//! Accrual domain errors

use core_kernel::{MoneyError, PortError};
use domain_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during accrual-entry generation
#[derive(Debug, Error)]
pub enum AccrualError {
    /// Missing or contradictory request input; surfaced before any
    /// mutation occurs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown contract, or no periods in the requested range
    #[error("Not found: {0}")]
    NotFound(String),

    /// The generated batch failed balance verification; the batch was
    /// logged and discarded
    #[error("Imbalance: {0}")]
    Imbalance(#[from] LedgerError),

    /// A collaborator call failed
    #[error("Port error: {0}")]
    Port(#[from] PortError),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl AccrualError {
    pub fn validation(message: impl Into<String>) -> Self {
        AccrualError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AccrualError::NotFound(message.into())
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AccrualError::Validation(_) => "VALIDATION_ERROR",
            AccrualError::NotFound(_) => "NOT_FOUND_ERROR",
            AccrualError::Imbalance(_) => "IMBALANCE_ERROR",
            AccrualError::Port(_) => "PORT_ERROR",
            AccrualError::Money(_) => "MONEY_ERROR",
        }
    }
}
