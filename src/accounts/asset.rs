use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::{Account, AccountCore};
use crate::decimal::Money;
use crate::types::{AccountKind, TransactionOutcome};

/// Asset depreciating linearly from its purchase price toward a sell price.
///
/// The per-accrual step is `(sell_price - purchase_price) / time_years`, a
/// negative amount applied through `debit`. Accrual stops once the balance is
/// at or below the sell price, so the floor is never crossed by accrual.
#[derive(Debug, Clone)]
pub struct DepreciatingAsset {
    core: AccountCore,
    sell_price: Money,
    depreciation_step: Money,
}

impl DepreciatingAsset {
    pub fn new(
        name: impl Into<String>,
        purchase_price: Money,
        sell_price: Money,
        time_years: Decimal,
    ) -> Self {
        let mut core = AccountCore::new(name);
        core.debit(purchase_price);
        Self {
            core,
            sell_price,
            depreciation_step: (sell_price - purchase_price) / time_years,
        }
    }

    pub fn sell_price(&self) -> Money {
        self.sell_price
    }
}

impl Account for DepreciatingAsset {
    fn kind(&self) -> AccountKind {
        AccountKind::DepreciatingAsset
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
        if self.core.balance() > self.sell_price {
            self.core.debit(self.depreciation_step);
        }
    }

    fn reset_balance(&mut self) {
        self.core.reset();
    }

    fn rename(&mut self, name: String) {
        self.core.rename(name);
    }
}
