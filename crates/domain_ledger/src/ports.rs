//! Ledger domain ports

use core_kernel::ports::{DomainPort, PortError};
use core_kernel::ContractId;

use crate::journal::JournalBatch;

/// Persistence port for journal batches
pub trait JournalStore: DomainPort {
    /// Persists a verified batch; batches are immutable once stored
    fn persist_batch(&self, batch: &JournalBatch) -> Result<(), PortError>;

    /// Issues the next opaque payment batch number
    fn next_payment_no(&self) -> Result<u64, PortError>;

    /// Loads a contract's batches in persistence order
    fn load_batches(&self, contract_id: ContractId) -> Result<Vec<JournalBatch>, PortError>;
}
