//! Pull-payment balances.
//!
//! Payments are credited to a payee's withdrawable balance instead of being
//! pushed out during the mint, so a failing payee can never block minting.

use std::collections::HashMap;

use mintgate_types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mapping payee → withdrawable balance.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentLedger {
    balances: HashMap<Address, Decimal>,
}

impl PaymentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase `payee`'s balance and return the new balance, or `None`
    /// (balance unchanged) if it would overflow.
    pub fn credit(&mut self, payee: Address, amount: Decimal) -> Option<Decimal> {
        let balance = self.balance(&payee).checked_add(amount)?;
        self.balances.insert(payee, balance);
        Some(balance)
    }

    /// Put back a balance removed by [`PaymentLedger::take`].
    pub(crate) fn restore(&mut self, payee: Address, amount: Decimal) {
        if !amount.is_zero() {
            self.balances.insert(payee, amount);
        }
    }

    /// Remove and return `payee`'s whole balance. The entry is zero afterwards.
    pub fn take(&mut self, payee: &Address) -> Decimal {
        self.balances.remove(payee).unwrap_or(Decimal::ZERO)
    }

    /// Undo a credit recorded by the aborting transaction.
    pub(crate) fn revert_credit(&mut self, payee: &Address, amount: Decimal) {
        if let Some(balance) = self.balances.get_mut(payee) {
            *balance -= amount;
            if balance.is_zero() {
                self.balances.remove(payee);
            }
        }
    }

    /// Withdrawable balance of `payee`.
    #[must_use]
    pub fn balance(&self, payee: &Address) -> Decimal {
        self.balances.get(payee).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sum of every balance, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balances
            .values()
            .fold(Decimal::ZERO, |acc, balance| acc.saturating_add(*balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payee(b: u8) -> Address {
        Address([b; 32])
    }

    #[test]
    fn credit_accumulates() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::new(123, 2)).unwrap();
        assert_eq!(pl.credit(payee(1), Decimal::new(246, 2)), Some(Decimal::new(369, 2)));
        assert_eq!(pl.balance(&payee(1)), Decimal::new(369, 2));
    }

    #[test]
    fn take_zeroes_entry() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::new(5, 0)).unwrap();
        assert_eq!(pl.take(&payee(1)), Decimal::new(5, 0));
        assert_eq!(pl.balance(&payee(1)), Decimal::ZERO);
        assert_eq!(pl.take(&payee(1)), Decimal::ZERO);
    }

    #[test]
    fn total_sums_all_payees() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::new(5, 0)).unwrap();
        pl.credit(payee(2), Decimal::new(7, 0)).unwrap();
        assert_eq!(pl.total(), Decimal::new(12, 0));
    }

    #[test]
    fn overflowing_credit_leaves_balance() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::MAX).unwrap();
        assert_eq!(pl.credit(payee(1), Decimal::ONE), None);
        assert_eq!(pl.balance(&payee(1)), Decimal::MAX);
    }

    #[test]
    fn restore_after_take() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::new(5, 0)).unwrap();
        let taken = pl.take(&payee(1));
        pl.restore(payee(1), taken);
        assert_eq!(pl.balance(&payee(1)), Decimal::new(5, 0));
    }

    #[test]
    fn revert_credit_restores_balance() {
        let mut pl = PaymentLedger::new();
        pl.credit(payee(1), Decimal::new(5, 0)).unwrap();
        pl.credit(payee(1), Decimal::new(2, 0)).unwrap();
        pl.revert_credit(&payee(1), Decimal::new(2, 0));
        assert_eq!(pl.balance(&payee(1)), Decimal::new(5, 0));
        pl.revert_credit(&payee(1), Decimal::new(5, 0));
        assert_eq!(pl.total(), Decimal::ZERO);
    }
}
