//! Schedule Domain - Amortization and Payment-Plan Generation
//!
//! This crate turns a contract's total amount and date range into its
//! monthly amortization schedule, and resolves the ledger booking date of
//! every period against the company's fixed monthly cutoff day.
//!
//! # Proration
//!
//! The per-period amount is the total divided by the month count,
//! truncated to two decimals; the last period absorbs the full rounding
//! remainder so the schedule always sums back to the contract total.
//!
//! # Booking dates
//!
//! A period normally books at its own month's cutoff (day 27, clamped to
//! short months). When the reference date - accrual approval or payment -
//! lands in a later month, the booking shifts forward to the reference
//! month's cutoff.

pub mod booking;
pub mod error;
pub mod generator;
pub mod period;
pub mod plan;
pub mod ports;
pub mod proration;

pub use booking::{BookingDateResolver, DEFAULT_BOOKING_DAY};
pub use error::ScheduleError;
pub use generator::{ScheduleGenerateRequest, ScheduleGenerator};
pub use period::{AmortizationPeriod, PeriodStatus};
pub use plan::{generate_plan, PaymentPlanItem, PlanGenerateRequest, PlanItemStatus, PlanMethod};
pub use ports::{AuditLog, AuditRecord, ContractStore, ContractSummary, PeriodStore};
