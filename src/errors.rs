use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::FailureLeg;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("missing account: {name}")]
    MissingAccount {
        name: String,
    },

    #[error("transfer endpoints must differ: {name}")]
    SameAccount {
        name: String,
    },

    #[error("unresolvable shortfall: {account} on {day} requires {required}, buffer balance {buffer_balance}, declined leg {leg:?}")]
    UnresolvableShortfall {
        account: String,
        day: NaiveDate,
        required: Money,
        buffer_balance: Money,
        leg: FailureLeg,
    },

    #[error("invalid account record {name}: {message}")]
    InvalidRecord {
        name: String,
        message: String,
    },

    #[error("invalid date: {value}")]
    InvalidDate {
        value: String,
    },

    #[error("invalid amount: {value}")]
    InvalidAmount {
        value: String,
    },

    #[error("invalid settings: {message}")]
    Config {
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
