use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountCore};
use crate::decimal::{Money, Rate};
use crate::types::{AccountKind, TransactionOutcome};

/// Interest-bearing reserve account.
///
/// Starts at zero and compounds daily: each accrual debits the balance by
/// `daily rate x current balance`. Credits are bounded like a checking
/// account, so the balance cannot be driven negative.
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    core: AccountCore,
    rate: Rate,
}

impl SavingsAccount {
    /// create with an annual percentage rate (e.g. 4.5 for 4.5%/yr)
    pub fn new(name: impl Into<String>, annual_percent: Decimal) -> Self {
        Self {
            core: AccountCore::new(name),
            rate: Rate::from_percent(annual_percent).daily_rate(),
        }
    }
}

impl Account for SavingsAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Savings
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

    fn accrue(&mut self, _day: NaiveDate) {
        let interest = self.core.balance() * self.rate;
        self.core.debit(interest);
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
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_starts_at_zero() {
        let account = SavingsAccount::new("FGIF", dec!(3.65));
        assert_eq!(account.balance(), Money::ZERO);
    }

    #[test]
    fn test_daily_compounding() {
        // 3.65%/yr is exactly 0.01%/day
        let mut account = SavingsAccount::new("FGIF", dec!(3.65));
        account.debit(Money::from_major(10_000));

        account.accrue(day());
        assert_eq!(account.balance(), Money::from_str_exact("10001").unwrap());

        account.accrue(day());
        assert_eq!(account.balance(), Money::from_str_exact("10002.0001").unwrap());
    }

    #[test]
    fn test_credit_is_bounded() {
        let mut account = SavingsAccount::new("FGIF", dec!(3.65));
        account.debit(Money::from_major(500));
        assert_eq!(account.credit(Money::from_major(500)), TransactionOutcome::Declined);
        assert_eq!(account.credit(Money::from_major(200)), TransactionOutcome::Accepted);
        assert_eq!(account.balance(), Money::from_major(300));
    }
}
