//! Accrual Domain - Scenario Classification and Entry Generation
//!
//! This crate implements the accrual half of the reconciliation engine:
//! given a contract's amortization periods and an optional payment fact,
//! it classifies which of the mutually exclusive scenarios applies and
//! emits the balanced journal batch for it.
//!
//! # Scenarios
//!
//! - **NoPayment** - expense/payable accrual per period
//! - **ExactPayment / Overpayment / Underpayment** - payable settlement
//!   with an expense adjustment for the difference
//! - **Prepayment** - any selected period past the review cutoff routes
//!   the payment remainder through Prepaid, drawn down period by period
//!
//! The classification is a tagged union, so generation is exhaustive by
//! construction: adding a scenario without a generator arm fails to
//! compile.

pub mod classifier;
pub mod error;
pub mod generator;
pub mod service;

pub use classifier::{Scenario, ScenarioClassifier};
pub use error::AccrualError;
pub use generator::AccrualEntryGenerator;
pub use service::{AccrualGenerateRequest, AccrualService};
