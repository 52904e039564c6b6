use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountCore};
use crate::calendar::TimeStep;
use crate::decimal::Money;
use crate::types::{AccountKind, RecurringCategory, TransactionOutcome};

/// Recurring expense or revenue line.
///
/// The balance is the currently due, unsettled amount. Accrual raises it by
/// the recurring amount on each due date and advances the due date by the
/// configured step; once the end date is reached, any open balance lapses to
/// zero. Both `debit` and `credit` settle the obligation downward - settling
/// money against the line always shrinks what is outstanding.
#[derive(Debug, Clone)]
pub struct RecurringAccount {
    core: AccountCore,
    category: RecurringCategory,
    amount: Money,
    step: TimeStep,
    next_due_date: NaiveDate,
    last_due_date: Option<NaiveDate>,
    end_date: NaiveDate,
}

impl RecurringAccount {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        category: RecurringCategory,
        next_due_date: NaiveDate,
        step: TimeStep,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            core: AccountCore::new(name),
            category,
            amount,
            step,
            next_due_date,
            last_due_date: None,
            end_date,
        }
    }

    pub fn category(&self) -> RecurringCategory {
        self.category
    }

    pub fn recurring_amount(&self) -> Money {
        self.amount
    }

    pub fn next_due_date(&self) -> NaiveDate {
        self.next_due_date
    }

    pub fn last_due_date(&self) -> Option<NaiveDate> {
        self.last_due_date
    }

    /// scale the recurring amount, e.g. for an annual raise
    pub fn adjust_recurring_amount(&mut self, factor: Decimal) {
        self.amount = self.amount * factor;
    }
}

impl Account for RecurringAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Recurring
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn balance(&self) -> Money {
        self.core.balance()
    }

    fn credit(&mut self, amount: Money) -> TransactionOutcome {
        self.core.credit(amount);
        TransactionOutcome::Accepted
    }

    /// inverted: settling a payment against the line shrinks the obligation
    fn debit(&mut self, amount: Money) -> TransactionOutcome {
        self.core.credit(amount);
        TransactionOutcome::Accepted
    }

    fn accrue(&mut self, day: NaiveDate) {
        if day < self.end_date {
            if day == self.next_due_date {
                self.core.debit(self.amount);
                self.last_due_date = Some(day);
                self.next_due_date = self.step.advance(day);
            }
        } else if !self.core.balance().is_zero() {
            // the recurring obligation has lapsed
            self.core.reset();
        }
    }

    fn reset_balance(&mut self) {
        self.core.reset();
    }

    fn rename(&mut self, name: String) {
        self.core.rename(name);
    }
}
