use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// account kind tag, queried instead of runtime type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// bounded transactional cash account
    Checking,
    /// interest-bearing reserve account
    Savings,
    /// asset declining linearly toward its sell price
    DepreciatingAsset,
    /// recurring expense or revenue line
    Recurring,
    /// amortizing liability
    Loan,
}

/// direction of a recurring account's obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurringCategory {
    Expense,
    Revenue,
}

impl FromStr for RecurringCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "EXPENSE" => Ok(RecurringCategory::Expense),
            "REVENUE" => Ok(RecurringCategory::Revenue),
            other => Err(format!("unknown recurring category: {other}")),
        }
    }
}

/// timebase of a recurring or loan payment schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timebase {
    Weeks,
    Months,
}

impl FromStr for Timebase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "w" => Ok(Timebase::Weeks),
            "m" => Ok(Timebase::Months),
            other => Err(format!("unknown timebase: {other}")),
        }
    }
}

/// outcome of a single credit or debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOutcome {
    Accepted,
    Declined,
}

impl TransactionOutcome {
    pub fn is_declined(&self) -> bool {
        matches!(self, TransactionOutcome::Declined)
    }
}

/// which leg of a two-leg transfer declined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureLeg {
    /// both legs applied
    None,
    /// source credit declined, destination untouched
    Source,
    /// destination debit declined after the source credit already applied
    Destination,
}
