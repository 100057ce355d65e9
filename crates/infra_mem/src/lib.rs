//! In-Memory Infrastructure Adapters
//!
//! Synchronous, thread-safe implementations of the schedule and ledger
//! ports. Persistence proper is a collaborator concern; these adapters
//! keep the ports exercisable end-to-end in tests and embeddings without
//! a database.

pub mod stores;

pub use stores::{
    InMemoryAuditLog, InMemoryContractStore, InMemoryJournalStore, InMemoryPeriodStore,
};
