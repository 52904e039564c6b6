use std::path::Path;

use crate::accounts::Account;
use crate::decimal::Money;
use crate::errors::Result;
use crate::simulation::{DailySim, SimTable, RESERVE_ACCOUNT};

/// format an amount as dollars and cents, e.g. `$1,234.56`
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp(2).as_decimal();
    let negative = rounded.is_sign_negative();
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// write the result table as CSV: Date, Income, Expense, one column per account
pub fn write_results_csv(table: &SimTable, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["Date".to_string(), "Income".to_string(), "Expense".to_string()];
    header.extend(table.columns.iter().cloned());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![
            row.day.format("%m/%d/%Y").to_string(),
            row.income.to_string(),
            row.expense.to_string(),
        ];
        record.extend(row.balances.iter().map(|b| b.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// print the end-of-run console summary
pub fn print_summary(sim: &DailySim) {
    println!(
        "Cumulative Interest: {}",
        format_currency(sim.cumulative_interest())
    );

    let reserve_balance = sim
        .chart()
        .get(RESERVE_ACCOUNT)
        .map(|account| account.balance())
        .unwrap_or(Money::ZERO);
    println!(
        "{RESERVE_ACCOUNT} Final Balance: {}",
        format_currency(reserve_balance)
    );
}
