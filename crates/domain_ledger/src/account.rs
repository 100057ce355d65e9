//! GL account kinds and the code/name mapping
//!
//! The engine posts against four ledger accounts. Their GL codes and
//! display names are configuration data, not logic: the chart is an
//! injectable lookup table so deployments (and tests) can rebind codes
//! without touching the generators.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The four account kinds journal lines can post against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Expense recognized for a period (or rounding/timing differences)
    Expense,
    /// Money owed for an accrued period, not yet paid
    Payable,
    /// Cash paid ahead of the period it will be expensed against
    Prepaid,
    /// Demand-deposit cash account
    Cash,
}

impl AccountKind {
    /// Sort priority within one booking month of an allocation batch:
    /// Payable lines first, then Prepaid, Expense, and Cash last
    pub fn priority(&self) -> u8 {
        match self {
            AccountKind::Payable => 0,
            AccountKind::Prepaid => 1,
            AccountKind::Expense => 2,
            AccountKind::Cash => 3,
        }
    }

    pub fn all() -> [AccountKind; 4] {
        [
            AccountKind::Expense,
            AccountKind::Payable,
            AccountKind::Prepaid,
            AccountKind::Cash,
        ]
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Expense => "Expense",
            AccountKind::Payable => "Payable",
            AccountKind::Prepaid => "Prepaid",
            AccountKind::Cash => "Cash",
        };
        write!(f, "{}", name)
    }
}

/// A GL account: code plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    pub code: String,
    pub name: String,
}

/// Injectable mapping from account kind to GL account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountKind, GlAccount>,
}

/// Company-standard chart: 6001 Expense, 2202 Payable, 1122 Prepaid,
/// 1002 Cash
static STANDARD_CHART: Lazy<ChartOfAccounts> = Lazy::new(|| {
    ChartOfAccounts::new([
        (AccountKind::Expense, "6001", "Expense"),
        (AccountKind::Payable, "2202", "Payable"),
        (AccountKind::Prepaid, "1122", "Prepaid"),
        (AccountKind::Cash, "1002", "Cash"),
    ])
});

impl ChartOfAccounts {
    pub fn new<I, C, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (AccountKind, C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let accounts = entries
            .into_iter()
            .map(|(kind, code, name)| {
                (
                    kind,
                    GlAccount {
                        code: code.into(),
                        name: name.into(),
                    },
                )
            })
            .collect();
        Self { accounts }
    }

    /// The company-standard chart
    pub fn standard() -> &'static ChartOfAccounts {
        &STANDARD_CHART
    }

    /// GL account for a kind; every kind is present by construction
    pub fn account(&self, kind: AccountKind) -> &GlAccount {
        self.accounts
            .get(&kind)
            .expect("chart of accounts covers every account kind")
    }

    /// GL code for a kind
    pub fn code(&self, kind: AccountKind) -> &str {
        &self.account(kind).code
    }

    /// Display name for a GL code, falling back to the code itself when
    /// unmapped
    pub fn name_for_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.accounts
            .values()
            .find(|a| a.code == code)
            .map(|a| a.name.as_str())
            .unwrap_or(code)
    }

    /// Returns true if the code belongs to the chart
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.accounts.values().any(|a| a.code == code)
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        STANDARD_CHART.clone()
    }
}
