//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use domain_ledger::{check_balance, AccountKind, JournalBatch, JournalLine};
use rust_decimal::Decimal;

/// Asserts that a batch's debit and credit totals agree
///
/// # Panics
///
/// Panics with both totals and the full line listing when the batch does
/// not balance.
pub fn assert_batch_balanced(batch: &JournalBatch) {
    let check = check_balance(&batch.lines);
    assert!(
        check.balanced,
        "batch {} does not balance: debits={}, credits={}\nlines: {:#?}",
        batch.id, check.total_debit, check.total_credit, batch.lines
    );
}

/// Finds the single line posting the given debit amount against an account
///
/// # Panics
///
/// Panics when no line or more than one line matches.
pub fn expect_debit(batch: &JournalBatch, account: AccountKind, amount: Decimal) -> &JournalLine {
    expect_line(batch, account, amount, true)
}

/// Finds the single line posting the given credit amount against an account
pub fn expect_credit(batch: &JournalBatch, account: AccountKind, amount: Decimal) -> &JournalLine {
    expect_line(batch, account, amount, false)
}

fn expect_line(
    batch: &JournalBatch,
    account: AccountKind,
    amount: Decimal,
    debit: bool,
) -> &JournalLine {
    let side = if debit { "debit" } else { "credit" };
    let matches: Vec<&JournalLine> = batch
        .lines
        .iter()
        .filter(|l| {
            l.account == account
                && l.is_debit() == debit
                && l.amount().amount() == amount
        })
        .collect();

    assert!(
        matches.len() == 1,
        "expected exactly one {} {} line of {}, found {}\nlines: {:#?}",
        account,
        side,
        amount,
        matches.len(),
        batch.lines
    );
    matches[0]
}

/// Counts the lines posting against an account
pub fn count_lines(batch: &JournalBatch, account: AccountKind) -> usize {
    batch.lines.iter().filter(|l| l.account == account).count()
}
