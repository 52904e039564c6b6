use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountCore};
use crate::decimal::{Money, Rate};
use crate::types::{AccountKind, Timebase, TransactionOutcome};

/// Amortizing liability with simple daily interest.
///
/// The signed balance is the outstanding principal. Interest accrues into
/// `interest_due` without capitalizing; payments retire interest first and
/// amortize the remainder against principal. `payoff` (principal plus unpaid
/// interest) only moves down between accruals, and once it reaches zero the
/// loan is paid and declines all further payments.
#[derive(Debug, Clone)]
pub struct SimpleLoan {
    core: AccountCore,
    payment: Money,
    rate: Rate,
    timebase: Timebase,
    frequency: u32,
    next_due_date: NaiveDate,
    interest_due: Money,
    cumulative_interest: Money,
    amount_due: Money,
}

impl SimpleLoan {
    pub fn new(
        name: impl Into<String>,
        payment: Money,
        annual_percent: Decimal,
        principal: Money,
        first_due_date: NaiveDate,
        frequency: u32,
        timebase: Timebase,
    ) -> Self {
        let mut core = AccountCore::new(name);
        core.debit(principal);
        Self {
            core,
            payment,
            rate: Rate::from_percent(annual_percent).daily_rate(),
            timebase,
            frequency,
            next_due_date: first_due_date,
            interest_due: Money::ZERO,
            cumulative_interest: Money::ZERO,
            amount_due: Money::ZERO,
        }
    }

    /// outstanding principal plus unapplied accrued interest
    pub fn payoff(&self) -> Money {
        self.core.balance() + self.interest_due
    }

    pub fn is_paid(&self) -> bool {
        self.payoff() <= Money::ZERO
    }

    pub fn is_payment_due(&self) -> bool {
        self.amount_due > Money::ZERO
    }

    /// installment currently owed
    pub fn amount_due(&self) -> Money {
        self.amount_due
    }

    /// accrued interest not yet retired by a payment
    pub fn interest_due(&self) -> Money {
        self.interest_due
    }

    /// total interest ever applied
    pub fn cumulative_interest(&self) -> Money {
        self.cumulative_interest
    }

    pub fn next_due_date(&self) -> NaiveDate {
        self.next_due_date
    }

    fn accrue_interest_due(&mut self) {
        self.interest_due += self.core.balance() * self.rate;
    }

    fn update_amount_due(&mut self) {
        let payoff = self.payoff();
        self.amount_due = if payoff <= self.payment { payoff } else { self.payment };
    }

    // Weekly schedules honor the configured frequency; anything else steps by
    // exactly one month, whatever the frequency says.
    fn advance_due_date(&mut self) {
        self.next_due_date = match self.timebase {
            Timebase::Weeks => self.next_due_date + Days::new(7 * u64::from(self.frequency)),
            Timebase::Months => self.next_due_date + Months::new(1),
        };
    }

    fn apply_partial_payment(&mut self, payment: Money) {
        self.amount_due -= payment;
        if self.interest_due > payment && self.interest_due > Money::ZERO {
            // the whole payment is absorbed as interest
            self.cumulative_interest += payment;
            self.interest_due -= payment;
        } else {
            self.core.debit(self.interest_due - payment);
            self.cumulative_interest += self.interest_due;
            self.interest_due = Money::ZERO;
        }
    }

    fn apply_full_payment(&mut self, payment: Money) {
        self.core.debit(self.interest_due - payment);
        self.cumulative_interest += self.interest_due;
        self.interest_due = Money::ZERO;
        self.amount_due = Money::ZERO;
    }
}

impl Account for SimpleLoan {
    fn kind(&self) -> AccountKind {
        AccountKind::Loan
    }

    fn name(&self) -> &str {
        self.core.name()
    }

    fn balance(&self) -> Money {
        self.core.balance()
    }

    /// Additions to principal are not allowed: a credit only zeroes an
    /// accidentally negative balance and is otherwise declined.
    fn credit(&mut self, _amount: Money) -> TransactionOutcome {
        if self.core.balance() < Money::ZERO {
            self.core.reset();
            TransactionOutcome::Accepted
        } else {
            TransactionOutcome::Declined
        }
    }

    /// apply a payment
    fn debit(&mut self, amount: Money) -> TransactionOutcome {
        if self.is_paid() {
            return TransactionOutcome::Declined;
        }

        if amount < self.amount_due {
            self.apply_partial_payment(amount);
        } else {
            self.apply_full_payment(amount);
        }

        TransactionOutcome::Accepted
    }

    fn accrue(&mut self, day: NaiveDate) {
        self.accrue_interest_due();

        if day >= self.next_due_date {
            self.update_amount_due();
            self.advance_due_date();
        }
    }

    fn reset_balance(&mut self) {
        self.core.reset();
    }

    fn rename(&mut self, name: String) {
        self.core.rename(name);
    }
}
