use crate::accounts::Account;
use crate::decimal::Money;
use crate::types::{FailureLeg, TransactionOutcome};

/// Move `amount` from `source` to `destination` using each account's own
/// credit/debit rules.
///
/// The source is credited first; if that leg declines, the destination is
/// never touched. If the destination's debit declines afterwards, the
/// source's credit is NOT rolled back - callers relying on this contract see
/// the partial application, reported through `FailureLeg::Destination`.
pub fn transfer(
    source: &mut dyn Account,
    destination: &mut dyn Account,
    amount: Money,
) -> (TransactionOutcome, FailureLeg) {
    if source.credit(amount).is_declined() {
        return (TransactionOutcome::Declined, FailureLeg::Source);
    }
    if destination.debit(amount).is_declined() {
        return (TransactionOutcome::Declined, FailureLeg::Destination);
    }
    (TransactionOutcome::Accepted, FailureLeg::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{CheckingAccount, SimpleLoan};
    use crate::types::Timebase;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_both_legs_applied() {
        let mut source = CheckingAccount::new("A", Money::from_major(1000));
        let mut destination = CheckingAccount::new("B", Money::from_major(50));

        let (outcome, leg) = transfer(&mut source, &mut destination, Money::from_major(300));

        assert_eq!(outcome, TransactionOutcome::Accepted);
        assert_eq!(leg, FailureLeg::None);
        assert_eq!(source.balance(), Money::from_major(700));
        assert_eq!(destination.balance(), Money::from_major(350));
    }

    #[test]
    fn test_source_decline_leaves_destination_untouched() {
        let mut source = CheckingAccount::new("A", Money::from_major(100));
        let mut destination = CheckingAccount::new("B", Money::from_major(50));

        let (outcome, leg) = transfer(&mut source, &mut destination, Money::from_major(500));

        assert_eq!(outcome, TransactionOutcome::Declined);
        assert_eq!(leg, FailureLeg::Source);
        assert_eq!(source.balance(), Money::from_major(100));
        assert_eq!(destination.balance(), Money::from_major(50));
    }

    #[test]
    fn test_destination_decline_is_not_rolled_back() {
        let mut source = CheckingAccount::new("A", Money::from_major(1000));
        // a paid-off loan declines every payment
        let mut paid_loan = SimpleLoan::new(
            "LOAN",
            Money::from_major(100),
            dec!(0),
            Money::ZERO,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            1,
            Timebase::Months,
        );
        assert!(paid_loan.is_paid());

        let (outcome, leg) = transfer(&mut source, &mut paid_loan, Money::from_major(100));

        assert_eq!(outcome, TransactionOutcome::Declined);
        assert_eq!(leg, FailureLeg::Destination);
        // the source leg already applied and stays applied
        assert_eq!(source.balance(), Money::from_major(900));
        assert_eq!(paid_loan.balance(), Money::ZERO);
    }
}
