//! Schedule domain errors

use core_kernel::{MoneyError, TemporalError};
use thiserror::Error;

/// Errors that can occur in the schedule domain
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The requested month range is inverted
    #[error("Invalid range: end {end} precedes start {start}")]
    InvalidRange { start: String, end: String },

    /// A required field was missing from a request
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested payment plan method is not supported
    #[error("Unsupported payment plan method: {0}")]
    UnsupportedMethod(String),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Calendar math failed
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}

impl ScheduleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ScheduleError::Validation(message.into())
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::InvalidRange { .. } => "INVALID_RANGE",
            ScheduleError::Validation(_) => "VALIDATION_ERROR",
            ScheduleError::UnsupportedMethod(_) => "UNSUPPORTED_METHOD",
            ScheduleError::Money(_) => "MONEY_ERROR",
            ScheduleError::Temporal(_) => "TEMPORAL_ERROR",
        }
    }
}
