mod asset;
mod chart;
mod checking;
mod loan;
mod recurring;
mod savings;

pub use asset::DepreciatingAsset;
pub use chart::ChartOfAccounts;
pub use checking::CheckingAccount;
pub use loan::SimpleLoan;
pub use recurring::RecurringAccount;
pub use savings::SavingsAccount;

use chrono::NaiveDate;

use crate::decimal::Money;
use crate::types::{AccountKind, TransactionOutcome};

/// Contract every account variant satisfies.
///
/// Balances are signed amounts owed by the account to the system: a `debit`
/// grows what the account owes, a `credit` shrinks it. Variants restrict or
/// invert the two operations to express their own rules.
pub trait Account {
    /// kind tag, queried instead of runtime type inspection
    fn kind(&self) -> AccountKind;

    fn name(&self) -> &str;

    fn balance(&self) -> Money;

    /// move `amount` out of the account
    fn credit(&mut self, amount: Money) -> TransactionOutcome;

    /// move `amount` into the account
    fn debit(&mut self, amount: Money) -> TransactionOutcome;

    /// Per-day state update. The engine calls this exactly once per simulated
    /// day; calling it twice for the same day double-accrues.
    fn accrue(&mut self, _day: NaiveDate) {}

    fn reset_balance(&mut self);

    fn rename(&mut self, name: String);
}

/// shared identity + balance state embedded by every variant
#[derive(Debug, Clone)]
pub(crate) struct AccountCore {
    name: String,
    balance: Money,
}

impl AccountCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: Money::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// unchecked credit
    pub fn credit(&mut self, amount: Money) {
        self.balance -= amount;
    }

    /// unchecked debit
    pub fn debit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// declined unless a strictly positive balance remains after the credit
    pub fn bounded_credit(&mut self, amount: Money) -> TransactionOutcome {
        if self.balance - amount > Money::ZERO {
            self.balance -= amount;
            TransactionOutcome::Accepted
        } else {
            TransactionOutcome::Declined
        }
    }

    pub fn reset(&mut self) {
        self.balance = Money::ZERO;
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}

/// sealed union over the account variants
#[derive(Debug, Clone)]
pub enum AnyAccount {
    Checking(CheckingAccount),
    Savings(SavingsAccount),
    Asset(DepreciatingAsset),
    Recurring(RecurringAccount),
    Loan(SimpleLoan),
}

impl AnyAccount {
    fn as_dyn(&self) -> &dyn Account {
        match self {
            AnyAccount::Checking(a) => a,
            AnyAccount::Savings(a) => a,
            AnyAccount::Asset(a) => a,
            AnyAccount::Recurring(a) => a,
            AnyAccount::Loan(a) => a,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn Account {
        match self {
            AnyAccount::Checking(a) => a,
            AnyAccount::Savings(a) => a,
            AnyAccount::Asset(a) => a,
            AnyAccount::Recurring(a) => a,
            AnyAccount::Loan(a) => a,
        }
    }

    pub fn as_loan(&self) -> Option<&SimpleLoan> {
        match self {
            AnyAccount::Loan(loan) => Some(loan),
            _ => None,
        }
    }

    pub fn as_loan_mut(&mut self) -> Option<&mut SimpleLoan> {
        match self {
            AnyAccount::Loan(loan) => Some(loan),
            _ => None,
        }
    }

    pub fn as_recurring(&self) -> Option<&RecurringAccount> {
        match self {
            AnyAccount::Recurring(recurring) => Some(recurring),
            _ => None,
        }
    }

    pub fn as_recurring_mut(&mut self) -> Option<&mut RecurringAccount> {
        match self {
            AnyAccount::Recurring(recurring) => Some(recurring),
            _ => None,
        }
    }
}

impl Account for AnyAccount {
    fn kind(&self) -> AccountKind {
        self.as_dyn().kind()
    }

    fn name(&self) -> &str {
        self.as_dyn().name()
    }

    fn balance(&self) -> Money {
        self.as_dyn().balance()
    }

    fn credit(&mut self, amount: Money) -> TransactionOutcome {
        self.as_dyn_mut().credit(amount)
    }

    fn debit(&mut self, amount: Money) -> TransactionOutcome {
        self.as_dyn_mut().debit(amount)
    }

    fn accrue(&mut self, day: NaiveDate) {
        self.as_dyn_mut().accrue(day)
    }

    fn reset_balance(&mut self) {
        self.as_dyn_mut().reset_balance()
    }

    fn rename(&mut self, name: String) {
        self.as_dyn_mut().rename(name)
    }
}

impl From<CheckingAccount> for AnyAccount {
    fn from(account: CheckingAccount) -> Self {
        AnyAccount::Checking(account)
    }
}

impl From<SavingsAccount> for AnyAccount {
    fn from(account: SavingsAccount) -> Self {
        AnyAccount::Savings(account)
    }
}

impl From<DepreciatingAsset> for AnyAccount {
    fn from(account: DepreciatingAsset) -> Self {
        AnyAccount::Asset(account)
    }
}

impl From<RecurringAccount> for AnyAccount {
    fn from(account: RecurringAccount) -> Self {
        AnyAccount::Recurring(account)
    }
}

impl From<SimpleLoan> for AnyAccount {
    fn from(account: SimpleLoan) -> Self {
        AnyAccount::Loan(account)
    }
}
