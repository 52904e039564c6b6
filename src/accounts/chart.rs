use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::accounts::{
    Account, AnyAccount, CheckingAccount, RecurringAccount, SavingsAccount, SimpleLoan,
};
use crate::calendar::{parse_mdy, TimeStep};
use crate::decimal::Money;
use crate::errors::{Result, SimError};
use crate::types::{AccountKind, RecurringCategory, Timebase};

/// Order-preserving register of accounts keyed by unique name.
///
/// Iteration order is registration order, which fixes the accrual order and
/// the column order of the result table.
#[derive(Debug, Default)]
pub struct ChartOfAccounts {
    accounts: Vec<AnyAccount>,
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// register an account, replacing any existing account of the same name
    pub fn register(&mut self, account: impl Into<AnyAccount>) {
        let account = account.into();
        match self.index_of(account.name()) {
            Some(i) => self.accounts[i] = account,
            None => self.accounts.push(account),
        }
    }

    /// remove an account by name
    pub fn unregister(&mut self, name: &str) -> Option<AnyAccount> {
        self.index_of(name).map(|i| self.accounts.remove(i))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AnyAccount> {
        self.index_of(name).map(|i| &self.accounts[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnyAccount> {
        match self.index_of(name) {
            Some(i) => Some(&mut self.accounts[i]),
            None => None,
        }
    }

    /// lookup that surfaces a missing account as an error
    pub fn require(&self, name: &str) -> Result<&AnyAccount> {
        self.get(name).ok_or_else(|| SimError::MissingAccount {
            name: name.to_string(),
        })
    }

    pub fn require_mut(&mut self, name: &str) -> Result<&mut AnyAccount> {
        self.get_mut(name).ok_or_else(|| SimError::MissingAccount {
            name: name.to_string(),
        })
    }

    /// disjoint mutable borrows of two distinct accounts, for a transfer
    pub fn pair_mut(&mut self, first: &str, second: &str) -> Result<(&mut AnyAccount, &mut AnyAccount)> {
        let i = self.index_of(first).ok_or_else(|| SimError::MissingAccount {
            name: first.to_string(),
        })?;
        let j = self.index_of(second).ok_or_else(|| SimError::MissingAccount {
            name: second.to_string(),
        })?;
        if i == j {
            return Err(SimError::SameAccount {
                name: first.to_string(),
            });
        }

        if i < j {
            let (left, right) = self.accounts.split_at_mut(j);
            Ok((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.accounts.split_at_mut(i);
            Ok((&mut right[0], &mut left[j]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnyAccount> {
        self.accounts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AnyAccount> {
        self.accounts.iter_mut()
    }

    /// account names in registration order
    pub fn names(&self) -> Vec<String> {
        self.accounts.iter().map(|a| a.name().to_string()).collect()
    }

    /// names of recurring accounts of the given category, in chart order
    pub fn recurring_names(&self, category: RecurringCategory) -> Vec<String> {
        self.accounts
            .iter()
            .filter_map(|a| a.as_recurring().filter(|r| r.category() == category))
            .map(|r| r.name().to_string())
            .collect()
    }

    /// names of loan accounts, in chart order
    pub fn loan_names(&self) -> Vec<String> {
        self.accounts
            .iter()
            .filter(|a| a.kind() == AccountKind::Loan)
            .map(|a| a.name().to_string())
            .collect()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.name() == name)
    }

    /// build a chart from a delimited account listing
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut chart = ChartOfAccounts::new();

        for record in reader.deserialize() {
            let record: RawAccountRecord = record?;
            let kind = record.kind.trim().to_string();
            match kind.as_str() {
                "EXPENSE" | "REVENUE" => chart.register(record.into_recurring()?),
                "CASH" => chart.register(record.into_checking()?),
                "SAVINGS" => chart.register(record.into_savings()?),
                "SIMPLE LOAN" => chart.register(record.into_loan()?),
                _ => {
                    warn!(name = %record.name, %kind, "skipping unknown account type");
                }
            }
        }

        Ok(chart)
    }
}

/// one row of the chart-of-accounts listing
#[derive(Debug, Deserialize)]
struct RawAccountRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Balance")]
    balance: Option<String>,
    #[serde(rename = "Rate")]
    rate: Option<String>,
    #[serde(rename = "AmountDue")]
    amount_due: Option<String>,
    #[serde(rename = "NextDate")]
    next_date: Option<String>,
    #[serde(rename = "Timebase")]
    timebase: Option<String>,
    #[serde(rename = "Frequency")]
    frequency: Option<u32>,
    #[serde(rename = "EndDate")]
    end_date: Option<String>,
}

impl RawAccountRecord {
    fn into_recurring(self) -> Result<RecurringAccount> {
        let category = RecurringCategory::from_str(&self.kind)
            .map_err(|message| self.invalid(message))?;
        let amount = parse_dollars(&self.name, self.field("AmountDue", &self.amount_due)?)?;
        let next_due = parse_mdy(self.field("NextDate", &self.next_date)?)?;
        let end_date = parse_mdy(self.field("EndDate", &self.end_date)?)?;
        let step = self.time_step()?;
        Ok(RecurringAccount::new(self.name, amount, category, next_due, step, end_date))
    }

    fn into_checking(self) -> Result<CheckingAccount> {
        let balance = parse_dollars(&self.name, self.field("Balance", &self.balance)?)?;
        Ok(CheckingAccount::new(self.name, balance))
    }

    fn into_savings(self) -> Result<SavingsAccount> {
        let rate = self.field("Rate", &self.rate)?;
        let rate = rate.trim().parse().map_err(|_| SimError::InvalidAmount {
            value: rate.to_string(),
        })?;
        Ok(SavingsAccount::new(self.name, rate))
    }

    fn into_loan(self) -> Result<SimpleLoan> {
        let payment = parse_dollars(&self.name, self.field("AmountDue", &self.amount_due)?)?;
        let principal = parse_dollars(&self.name, self.field("Balance", &self.balance)?)?;
        let rate_field = self.field("Rate", &self.rate)?;
        let rate = rate_field.trim().parse().map_err(|_| SimError::InvalidAmount {
            value: rate_field.to_string(),
        })?;
        let first_due = parse_mdy(self.field("NextDate", &self.next_date)?)?;
        let frequency = self.frequency()?;
        let timebase = self.timebase()?;
        Ok(SimpleLoan::new(self.name, payment, rate, principal, first_due, frequency, timebase))
    }

    fn time_step(&self) -> Result<TimeStep> {
        Ok(TimeStep::new(self.timebase()?, self.frequency()?))
    }

    fn timebase(&self) -> Result<Timebase> {
        let raw = self.field("Timebase", &self.timebase)?;
        Timebase::from_str(raw).map_err(|message| self.invalid(message))
    }

    fn frequency(&self) -> Result<u32> {
        self.frequency.ok_or_else(|| self.invalid("missing Frequency".to_string()))
    }

    fn field<'a>(&self, label: &str, value: &'a Option<String>) -> Result<&'a str> {
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(self.invalid(format!("missing {label}"))),
        }
    }

    fn invalid(&self, message: String) -> SimError {
        SimError::InvalidRecord {
            name: self.name.clone(),
            message,
        }
    }
}

/// parse a `$1,234.56`-style dollar string
fn parse_dollars(name: &str, value: &str) -> Result<Money> {
    let cleaned = value.trim().trim_start_matches('$').replace(',', "");
    Money::from_str_exact(&cleaned).map_err(|_| SimError::InvalidRecord {
        name: name.to_string(),
        message: format!("invalid dollar amount: {value}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write as _;

    const CHART_CSV: &str = "\
Name,Type,Balance,Rate,AmountDue,NextDate,Timebase,Frequency,EndDate
CHGF,CASH,\"$2,500.00\",,,,,,
FGIF,SAVINGS,,3.65,,,,,
RENT,EXPENSE,,,\"$1,500.00\",02/01/2026,m,1,01/01/2036
CA_EMPLOYER,REVENUE,,,$2000.00,01/15/2026,w,2,01/01/2036
CAR,SIMPLE LOAN,\"$12,000.00\",6.0,$350.00,02/15/2026,m,1,
PIANO,UNKNOWN,$500.00,,,,,,
";

    fn chart_from_fixture() -> ChartOfAccounts {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CHART_CSV.as_bytes()).unwrap();
        ChartOfAccounts::from_csv_path(file.path()).unwrap()
    }

    #[test]
    fn test_builds_each_account_type() {
        let chart = chart_from_fixture();
        // unknown type skipped
        assert_eq!(chart.len(), 5);
        assert!(chart.get("PIANO").is_none());

        assert_eq!(chart.require("CHGF").unwrap().balance(), Money::from_major(2500));
        assert_eq!(chart.require("FGIF").unwrap().kind(), AccountKind::Savings);

        let rent = chart.get("RENT").unwrap().as_recurring().unwrap();
        assert_eq!(rent.category(), RecurringCategory::Expense);
        assert_eq!(rent.recurring_amount(), Money::from_major(1500));
        assert_eq!(rent.next_due_date(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

        let car = chart.get("CAR").unwrap().as_loan().unwrap();
        assert_eq!(car.balance(), Money::from_major(12_000));
        assert_eq!(car.amount_due(), Money::ZERO);
    }

    #[test]
    fn test_preserves_registration_order() {
        let chart = chart_from_fixture();
        assert_eq!(chart.names(), vec!["CHGF", "FGIF", "RENT", "CA_EMPLOYER", "CAR"]);
    }

    #[test]
    fn test_kind_filters() {
        let chart = chart_from_fixture();
        assert_eq!(chart.recurring_names(RecurringCategory::Expense), vec!["RENT"]);
        assert_eq!(chart.recurring_names(RecurringCategory::Revenue), vec!["CA_EMPLOYER"]);
        assert_eq!(chart.loan_names(), vec!["CAR"]);
    }

    #[test]
    fn test_register_replaces_same_name_in_place() {
        let mut chart = chart_from_fixture();
        chart.register(CheckingAccount::new("CHGF", Money::from_major(9)));
        assert_eq!(chart.len(), 5);
        assert_eq!(chart.get("CHGF").unwrap().balance(), Money::from_major(9));
        assert_eq!(chart.names()[0], "CHGF");
    }

    #[test]
    fn test_unregister() {
        let mut chart = chart_from_fixture();
        assert!(chart.unregister("RENT").is_some());
        assert!(chart.get("RENT").is_none());
        assert!(chart.unregister("RENT").is_none());
    }

    #[test]
    fn test_pair_mut_borrows_both_endpoints() {
        let mut chart = chart_from_fixture();
        let (buffer, reserve) = chart.pair_mut("CHGF", "FGIF").unwrap();
        buffer.credit(Money::from_major(100));
        reserve.debit(Money::from_major(100));
        assert_eq!(chart.get("CHGF").unwrap().balance(), Money::from_major(2400));
        assert_eq!(chart.get("FGIF").unwrap().balance(), Money::from_major(100));

        // reversed order works too
        let (reserve, buffer) = chart.pair_mut("FGIF", "CHGF").unwrap();
        assert_eq!(reserve.name(), "FGIF");
        assert_eq!(buffer.name(), "CHGF");

        assert!(matches!(
            chart.pair_mut("CHGF", "CHGF"),
            Err(SimError::SameAccount { .. })
        ));
        assert!(matches!(
            chart.pair_mut("CHGF", "NOPE"),
            Err(SimError::MissingAccount { .. })
        ));
    }

    #[test]
    fn test_dollar_string_parsing() {
        assert_eq!(parse_dollars("X", "$1,234.56").unwrap(), Money::from_str_exact("1234.56").unwrap());
        assert_eq!(parse_dollars("X", " 42 ").unwrap(), Money::from_major(42));
        assert!(parse_dollars("X", "twelve").is_err());
    }
}
