use chrono::{Datelike, NaiveDate};
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::accounts::{Account, ChartOfAccounts};
use crate::calendar::date_range;
use crate::decimal::Money;
use crate::errors::{Result, SimError};
use crate::transaction::transfer;
use crate::types::{FailureLeg, RecurringCategory};

/// name of the buffer account day-to-day flows settle through
pub const BUFFER_ACCOUNT: &str = "CHGF";
/// name of the reserve account absorbing buffer excess and shortfalls
pub const RESERVE_ACCOUNT: &str = "FGIF";
/// revenue account receiving the annual raise
const EMPLOYER_ACCOUNT: &str = "CA_EMPLOYER";

/// one-off transfer between two named accounts on a fixed date
#[derive(Debug, Clone)]
pub struct ScheduledPayment {
    pub date: NaiveDate,
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// one-off expense charged against the buffer account on a fixed date
#[derive(Debug, Clone)]
pub struct ScheduledExpense {
    pub date: NaiveDate,
    pub amount: Money,
}

/// one simulated day: aggregate income/expense plus every end-of-day balance
#[derive(Debug, Clone)]
pub struct SimRow {
    pub day: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub balances: Vec<Money>,
}

/// result table, one row per simulated day
#[derive(Debug, Clone, Default)]
pub struct SimTable {
    /// account names, aligned with `SimRow::balances`
    pub columns: Vec<String>,
    pub rows: Vec<SimRow>,
}

/// Daily cash-flow simulation over a fixed calendar range.
///
/// Each day runs, in order: accrual on every account (chart order), revenue
/// sweep into the buffer, expense and loan settlement out of the buffer with
/// reserve fallback, one-off scheduled payments and expenses, buffer/reserve
/// rebalancing, and a recorded row of end-of-day balances. A shortfall
/// neither account can absorb halts the run with the rows recorded so far
/// left intact.
pub struct DailySim {
    chart: ChartOfAccounts,
    start: NaiveDate,
    end: NaiveDate,
    fast_payoff: bool,
    buffer_ceiling: Money,
    scheduled_payments: Vec<ScheduledPayment>,
    scheduled_expenses: Vec<ScheduledExpense>,
    results: SimTable,
}

impl DailySim {
    pub fn new(
        chart: ChartOfAccounts,
        start: NaiveDate,
        end: NaiveDate,
        fast_payoff: bool,
        buffer_ceiling: Money,
    ) -> Self {
        Self {
            chart,
            start,
            end,
            fast_payoff,
            buffer_ceiling,
            scheduled_payments: Vec::new(),
            scheduled_expenses: Vec::new(),
            results: SimTable::default(),
        }
    }

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    pub fn results(&self) -> &SimTable {
        &self.results
    }

    /// register a one-off payment between two named accounts
    pub fn schedule_payment(&mut self, from: &str, to: &str, amount: Money, date: NaiveDate) {
        self.scheduled_payments.push(ScheduledPayment {
            date,
            from: from.to_string(),
            to: to.to_string(),
            amount,
        });
    }

    /// register a one-off expense against the buffer account
    pub fn schedule_expense(&mut self, amount: Money, date: NaiveDate) {
        self.scheduled_expenses.push(ScheduledExpense { date, amount });
    }

    /// total interest applied across all loan accounts
    pub fn cumulative_interest(&self) -> Money {
        self.chart
            .iter()
            .filter_map(|a| a.as_loan())
            .fold(Money::ZERO, |acc, loan| acc + loan.cumulative_interest())
    }

    /// run the full simulation, populating the result table
    pub fn simulate(&mut self) -> Result<()> {
        self.results = SimTable {
            columns: self.chart.names(),
            rows: Vec::new(),
        };

        info!(start = %self.start, end = %self.end, accounts = self.chart.len(), "starting simulation");

        let days: Vec<NaiveDate> = date_range(self.start, self.end).collect();
        for day in days {
            self.accrue_accounts(day);
            let income = self.collect_income(day)?;
            let mut expense = self.settle_expenses(day)?;
            expense += self.execute_scheduled_payments(day)?;
            expense += self.execute_scheduled_expenses(day)?;
            self.rebalance(day)?;
            self.record(day, income, expense);
        }

        info!(days = self.results.rows.len(), "simulation complete");
        Ok(())
    }

    fn accrue_accounts(&mut self, day: NaiveDate) {
        for account in self.chart.iter_mut() {
            account.accrue(day);
        }
    }

    /// sweep every due revenue balance into the buffer account
    fn collect_income(&mut self, day: NaiveDate) -> Result<Money> {
        let mut income = Money::ZERO;

        // one-off policy rule: a 5% raise every April 1st after 2026
        if day.month() == 4 && day.day() == 1 && day.year() > 2026 {
            if let Some(employer) = self
                .chart
                .get_mut(EMPLOYER_ACCOUNT)
                .and_then(|a| a.as_recurring_mut())
            {
                employer.adjust_recurring_amount(dec!(1.05));
                debug!(account = EMPLOYER_ACCOUNT, %day, "applied annual raise");
            }
        }

        for name in self.chart.recurring_names(RecurringCategory::Revenue) {
            let balance = self.chart.require(&name)?.balance();
            if balance > Money::ZERO {
                income += balance;
                let (revenue, buffer) = self.chart.pair_mut(&name, BUFFER_ACCOUNT)?;
                transfer(revenue, buffer, balance);
            }
        }

        Ok(income)
    }

    /// settle due expense balances and loan installments out of the buffer
    fn settle_expenses(&mut self, day: NaiveDate) -> Result<Money> {
        let mut expense = Money::ZERO;

        for name in self.chart.recurring_names(RecurringCategory::Expense) {
            let balance = self.chart.require(&name)?.balance();
            if balance <= Money::ZERO {
                continue;
            }
            expense += balance;

            let (buffer, account) = self.chart.pair_mut(BUFFER_ACCOUNT, &name)?;
            let (outcome, leg) = transfer(buffer, account, balance);
            if outcome.is_declined() {
                let reserve_balance = self.chart.require(RESERVE_ACCOUNT)?.balance();
                if reserve_balance >= balance {
                    warn!(account = %name, %day, amount = %balance, "covering expense from reserve");
                    let (reserve, account) = self.chart.pair_mut(RESERVE_ACCOUNT, &name)?;
                    let _ = transfer(reserve, account, balance);
                } else {
                    return Err(SimError::UnresolvableShortfall {
                        account: name,
                        day,
                        required: balance,
                        buffer_balance: self.chart.require(BUFFER_ACCOUNT)?.balance(),
                        leg,
                    });
                }
            }
        }

        expense += self.settle_loans(day)?;

        Ok(expense)
    }

    /// pay due loan installments; optionally retire the first open loan
    fn settle_loans(&mut self, day: NaiveDate) -> Result<Money> {
        let mut expense = Money::ZERO;

        let open_loans: Vec<String> = self
            .chart
            .iter()
            .filter_map(|a| a.as_loan())
            .filter(|loan| !loan.is_paid())
            .map(|loan| loan.name().to_string())
            .collect();

        // fast payoff retires at most one loan per day, the first open one
        let mut payoff_spent = false;
        for name in open_loans {
            if self.fast_payoff && !payoff_spent {
                let payoff = self.loan_payoff(&name);
                let reserve_balance = self.chart.require(RESERVE_ACCOUNT)?.balance();
                if payoff > Money::ZERO && payoff < reserve_balance {
                    info!(loan = %name, %day, amount = %payoff, "retiring loan early from reserve");
                    let (reserve, loan) = self.chart.pair_mut(RESERVE_ACCOUNT, &name)?;
                    transfer(reserve, loan, payoff);
                }
            }
            payoff_spent = true;

            let amount_due = self.loan_amount_due(&name);
            if amount_due > Money::ZERO {
                expense += amount_due;
                let (buffer, loan) = self.chart.pair_mut(BUFFER_ACCOUNT, &name)?;
                let (outcome, leg) = transfer(buffer, loan, amount_due);
                if outcome.is_declined() {
                    // no reserve fallback for scheduled installments
                    return Err(SimError::UnresolvableShortfall {
                        account: name,
                        day,
                        required: amount_due,
                        buffer_balance: self.chart.require(BUFFER_ACCOUNT)?.balance(),
                        leg,
                    });
                }
            }
        }

        Ok(expense)
    }

    /// execute and consume scheduled payments falling due today
    fn execute_scheduled_payments(&mut self, day: NaiveDate) -> Result<Money> {
        let mut total = Money::ZERO;

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled_payments)
            .into_iter()
            .partition(|payment| payment.date == day);
        self.scheduled_payments = pending;

        for payment in due {
            debug!(from = %payment.from, to = %payment.to, amount = %payment.amount, %day, "executing scheduled payment");
            let (source, destination) = self.chart.pair_mut(&payment.from, &payment.to)?;
            transfer(source, destination, payment.amount);
            total += payment.amount;
        }

        Ok(total)
    }

    /// execute and consume scheduled expenses falling due today
    fn execute_scheduled_expenses(&mut self, day: NaiveDate) -> Result<Money> {
        let mut total = Money::ZERO;

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled_expenses)
            .into_iter()
            .partition(|item| item.date == day);
        self.scheduled_expenses = pending;

        for item in due {
            let outcome = self.chart.require_mut(BUFFER_ACCOUNT)?.credit(item.amount);
            if outcome.is_declined() {
                let buffer_balance = self.chart.require(BUFFER_ACCOUNT)?.balance();
                let reserve_balance = self.chart.require(RESERVE_ACCOUNT)?.balance();
                if item.amount > reserve_balance + buffer_balance {
                    return Err(SimError::UnresolvableShortfall {
                        account: BUFFER_ACCOUNT.to_string(),
                        day,
                        required: item.amount,
                        buffer_balance,
                        leg: FailureLeg::Source,
                    });
                }
                if item.amount >= reserve_balance {
                    // drain the reserve, charge the remainder to the buffer
                    let remainder = item.amount - reserve_balance;
                    self.chart.require_mut(RESERVE_ACCOUNT)?.reset_balance();
                    if remainder > Money::ZERO {
                        let _ = self.chart.require_mut(BUFFER_ACCOUNT)?.credit(remainder);
                    }
                } else {
                    let _ = self.chart.require_mut(RESERVE_ACCOUNT)?.credit(item.amount);
                }
                warn!(amount = %item.amount, %day, "scheduled expense covered from reserve");
            }
            total += item.amount;
        }

        Ok(total)
    }

    /// sweep buffer excess into the reserve; top the buffer back up to its floor
    fn rebalance(&mut self, day: NaiveDate) -> Result<()> {
        let buffer_floor = Money::from_major(1000);
        let buffer_balance = self.chart.require(BUFFER_ACCOUNT)?.balance();

        if buffer_balance > self.buffer_ceiling {
            let excess = buffer_balance - self.buffer_ceiling;
            let (buffer, reserve) = self.chart.pair_mut(BUFFER_ACCOUNT, RESERVE_ACCOUNT)?;
            transfer(buffer, reserve, excess);
            debug!(%excess, %day, "swept buffer excess into reserve");
        } else if buffer_balance < buffer_floor {
            let required = buffer_floor - buffer_balance;
            let reserve_balance = self.chart.require(RESERVE_ACCOUNT)?.balance();
            if reserve_balance > required {
                let (reserve, buffer) = self.chart.pair_mut(RESERVE_ACCOUNT, BUFFER_ACCOUNT)?;
                transfer(reserve, buffer, required);
            } else if reserve_balance > Money::ZERO {
                // the pull is capped at the reserve's full balance; a bounded
                // credit declines at that amount, so empty the reserve directly
                self.chart.require_mut(RESERVE_ACCOUNT)?.reset_balance();
                self.chart.require_mut(BUFFER_ACCOUNT)?.debit(reserve_balance);
                debug!(pulled = %reserve_balance, %day, "reserve drained to cover buffer floor");
            }
        }

        Ok(())
    }

    fn record(&mut self, day: NaiveDate, income: Money, expense: Money) {
        let balances = self
            .chart
            .iter()
            .map(|account| account.balance().round_dp(2))
            .collect();
        self.results.rows.push(SimRow {
            day,
            income: income.round_dp(2),
            expense: expense.round_dp(2),
            balances,
        });
    }

    fn loan_payoff(&self, name: &str) -> Money {
        self.chart
            .get(name)
            .and_then(|a| a.as_loan())
            .map(|loan| loan.payoff())
            .unwrap_or(Money::ZERO)
    }

    fn loan_amount_due(&self, name: &str) -> Money {
        self.chart
            .get(name)
            .and_then(|a| a.as_loan())
            .map(|loan| loan.amount_due())
            .unwrap_or(Money::ZERO)
    }
}
