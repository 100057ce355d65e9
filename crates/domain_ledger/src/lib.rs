//! Ledger Domain - Journal Lines, Batches, and Balance Verification
//!
//! This crate implements the double-entry surface of the contract ledger.
//! Generators in the accrual and payment domains emit journal lines
//! against four account kinds (Expense, Payable, Prepaid, Cash); this
//! crate owns the line/batch types, the GL account mapping, the
//! allocation ordering contract, and the zero-sum balance verifier.
//!
//! # Double-entry invariant
//!
//! Every batch - the full output of one accrual-generation or
//! payment-allocation call - must balance internally: the sum of debit
//! amounts equals the sum of credit amounts. An unbalanced batch is a
//! defect signal and is never persisted.

pub mod account;
pub mod error;
pub mod journal;
pub mod ordering;
pub mod payment_fact;
pub mod ports;
pub mod settings;
pub mod verify;

pub use account::{AccountKind, ChartOfAccounts, GlAccount};
pub use error::LedgerError;
pub use journal::{accrual_batch_no, BatchId, JournalBatch, JournalLine};
pub use ordering::{sort_and_number, OrderKey};
pub use payment_fact::PaymentFact;
pub use ports::JournalStore;
pub use settings::EngineSettings;
pub use verify::{check_balance, verify_batch, BalanceCheck};
