//! Balance verification
//!
//! Every generated batch must close to zero: the sum of its debit amounts
//! must equal the sum of its credit amounts. A non-zero difference after
//! allocation indicates a defect in the generators; the full batch is
//! logged before the batch is refused, and an unbalanced batch is never
//! persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::LedgerError;
use crate::journal::{JournalBatch, JournalLine};

/// Result of checking a batch's debit/credit totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Debit total minus credit total
    pub difference: Decimal,
    pub balanced: bool,
}

/// Computes debit and credit totals over a set of lines
pub fn check_balance(lines: &[JournalLine]) -> BalanceCheck {
    let total_debit: Decimal = lines.iter().map(|l| l.debit.amount()).sum();
    let total_credit: Decimal = lines.iter().map(|l| l.credit.amount()).sum();
    let difference = total_debit - total_credit;

    BalanceCheck {
        total_debit,
        total_credit,
        difference,
        balanced: difference.is_zero(),
    }
}

/// Verifies a batch balances, logging the full batch contents on failure
pub fn verify_batch(batch: &JournalBatch) -> Result<BalanceCheck, LedgerError> {
    let check = check_balance(&batch.lines);
    if !check.balanced {
        let dump = serde_json::to_string(batch)
            .unwrap_or_else(|e| format!("<batch serialization failed: {}>", e));
        error!(
            batch = %batch.id,
            total_debit = %check.total_debit,
            total_credit = %check.total_credit,
            contents = %dump,
            "unbalanced journal batch rejected"
        );
        return Err(LedgerError::Unbalanced {
            debits: check.total_debit,
            credits: check.total_credit,
        });
    }
    Ok(check)
}
