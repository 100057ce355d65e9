//! Allocation output ordering
//!
//! Payment-allocation batches are returned in a strict total order that
//! report and UI layers depend on: batch sequence first, then booking
//! month, then the batch creation timestamp, then account-kind priority
//! (Payable before Prepaid before Expense before Cash). The timestamp
//! component is the batch creation instant, captured once per allocation
//! call, so the ordering within a batch is deterministic.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::journal::JournalLine;

/// Strict-total ordering key for allocation output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderKey {
    /// Generation sequence: the payment batch number
    pub batch_seq: u64,
    /// Booking month as (year, month)
    pub booking_month: (i32, u32),
    /// Batch creation instant
    pub created_at: DateTime<Utc>,
    /// Account-kind priority within the month
    pub account_priority: u8,
}

impl OrderKey {
    pub fn new(batch_seq: u64, booking_date: NaiveDate, created_at: DateTime<Utc>, priority: u8) -> Self {
        Self {
            batch_seq,
            booking_month: (booking_date.year(), booking_date.month()),
            created_at,
            account_priority: priority,
        }
    }

    /// Key for a concrete line within a batch
    pub fn for_line(batch_seq: u64, created_at: DateTime<Utc>, line: &JournalLine) -> Self {
        Self::new(
            batch_seq,
            line.booking_date,
            created_at,
            line.account.priority(),
        )
    }
}

/// Sorts allocation output by its ordering key and assigns `entry_order`
/// from the sorted position (1-based)
pub fn sort_and_number(
    batch_seq: u64,
    created_at: DateTime<Utc>,
    mut lines: Vec<JournalLine>,
) -> Vec<JournalLine> {
    lines.sort_by_key(|line| OrderKey::for_line(batch_seq, created_at, line));
    for (i, line) in lines.iter_mut().enumerate() {
        line.entry_order = i as u32 + 1;
    }
    lines
}
