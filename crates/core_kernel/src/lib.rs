//! Core Kernel - Foundational types and utilities for the contract ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Calendar math for monthly amortization periods
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{
    AuditRecordId, ContractId, JournalLineId, PaymentId, PeriodId, PlanItemId,
};
pub use money::{Currency, Money, MoneyError};
pub use ports::{DomainPort, PortError};
pub use temporal::{DateRange, MonthRange, TemporalError};
