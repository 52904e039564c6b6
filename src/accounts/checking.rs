use crate::accounts::{Account, AccountCore};
use crate::decimal::Money;
use crate::types::{AccountKind, TransactionOutcome};

/// Bounded transactional cash account.
///
/// A credit that would not leave a strictly positive balance is declined and
/// leaves the balance untouched, so the account can never be overdrawn.
#[derive(Debug, Clone)]
pub struct CheckingAccount {
    core: AccountCore,
}

impl CheckingAccount {
    /// create with an opening deposit
    pub fn new(name: impl Into<String>, initial: Money) -> Self {
        let mut core = AccountCore::new(name);
        core.debit(initial);
        Self { core }
    }
}

impl Account for CheckingAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn balance(&self) -> Money {
        self.core.balance()
    }

    fn credit(&mut self, amount: Money) -> TransactionOutcome {
        self.core.bounded_credit(amount)
    }

    fn debit(&mut self, amount: Money) -> TransactionOutcome {
        self.core.debit(amount);
        TransactionOutcome::Accepted
    }

    fn reset_balance(&mut self) {
        self.core.reset();
    }

    fn rename(&mut self, name: String) {
        self.core.rename(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_opening_deposit() {
        let account = CheckingAccount::new("CHGF", Money::from_major(1000));
        assert_eq!(account.balance(), Money::from_major(1000));
        assert_eq!(account.name(), "CHGF");
    }

    #[test]
    fn test_credit_within_balance_accepted() {
        let mut account = CheckingAccount::new("CHGF", Money::from_major(1000));
        assert_eq!(account.credit(Money::from_major(400)), TransactionOutcome::Accepted);
        assert_eq!(account.balance(), Money::from_major(600));
    }

    #[test]
    fn test_overdraw_declined_and_balance_unchanged() {
        let mut account = CheckingAccount::new("CHGF", Money::from_major(1000));
        assert_eq!(account.credit(Money::from_major(1500)), TransactionOutcome::Declined);
        assert_eq!(account.balance(), Money::from_major(1000));
        // draining to exactly zero is also declined
        assert_eq!(account.credit(Money::from_major(1000)), TransactionOutcome::Declined);
        assert_eq!(account.balance(), Money::from_major(1000));
    }

    #[test]
    fn test_accrue_is_a_no_op() {
        let mut account = CheckingAccount::new("CHGF", Money::from_major(1000));
        account.accrue(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(account.balance(), Money::from_major(1000));
    }

    #[test]
    fn test_reset_and_rename() {
        let mut account = CheckingAccount::new("CHGF", Money::from_major(1000));
        account.reset_balance();
        assert_eq!(account.balance(), Money::ZERO);
        account.rename("BUFFER".to_string());
        assert_eq!(account.name(), "BUFFER");
    }
}
