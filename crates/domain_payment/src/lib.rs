//! Payment Domain - Payment-Driven Journal Allocation
//!
//! This crate reconciles actual cash payments against accrued
//! amortization periods. One allocation call partitions the selected
//! periods around the payment date, settles past/current payables from
//! their remaining balances, carries any remainder as Prepaid, draws it
//! down against future periods in chronological order, and returns the
//! batch in the strict output order report layers depend on.

pub mod allocator;
pub mod error;
pub mod service;

pub use allocator::{Allocation, PaymentAllocator, PeriodApplication};
pub use error::PaymentError;
pub use service::PaymentAllocationService;
