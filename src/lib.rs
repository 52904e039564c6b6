pub mod accounts;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod report;
pub mod simulation;
pub mod transaction;
pub mod types;

// re-export key types
pub use accounts::{
    Account, AnyAccount, ChartOfAccounts, CheckingAccount, DepreciatingAsset, RecurringAccount,
    SavingsAccount, SimpleLoan,
};
pub use calendar::{date_range, parse_mdy, TimeStep};
pub use config::Settings;
pub use decimal::{Money, Rate};
pub use errors::{Result, SimError};
pub use simulation::{
    DailySim, ScheduledExpense, ScheduledPayment, SimRow, SimTable, BUFFER_ACCOUNT,
    RESERVE_ACCOUNT,
};
pub use transaction::transfer;
pub use types::{
    AccountKind, FailureLeg, RecurringCategory, Timebase, TransactionOutcome,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
