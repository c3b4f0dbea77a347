//! Outbound value transfer used by escrow withdrawals.

use std::collections::HashMap;

use mintgate_types::{Address, MintgateError, Result};
use rust_decimal::Decimal;

/// Sends value out of the escrow.
///
/// Called only after the payee's ledger entry has been zeroed, so an
/// implementation that calls back into the minter finds nothing left to
/// withdraw.
pub trait ValueTransfer {
    fn transfer(&mut self, to: &Address, amount: Decimal) -> Result<()>;
}

/// In-memory wallet balances. Used by simulations and tests.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    balances: HashMap<Address, Decimal>,
    /// Accounts whose transfers are refused.
    rejecting: Vec<Address>,
}

impl InMemoryWallet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transfer to `account` fail.
    pub fn reject(&mut self, account: Address) {
        self.rejecting.push(account);
    }

    #[must_use]
    pub fn balance(&self, account: &Address) -> Decimal {
        self.balances.get(account).copied().unwrap_or(Decimal::ZERO)
    }
}

impl ValueTransfer for InMemoryWallet {
    fn transfer(&mut self, to: &Address, amount: Decimal) -> Result<()> {
        if self.rejecting.contains(to) {
            return Err(MintgateError::TransferFailed {
                payee: *to,
                reason: "recipient rejects transfers".into(),
            });
        }
        *self.balances.entry(*to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_credits_recipient() {
        let mut wallet = InMemoryWallet::new();
        let to = Address([1u8; 32]);
        wallet.transfer(&to, Decimal::new(5, 0)).unwrap();
        wallet.transfer(&to, Decimal::new(2, 0)).unwrap();
        assert_eq!(wallet.balance(&to), Decimal::new(7, 0));
    }

    #[test]
    fn rejecting_account_fails() {
        let mut wallet = InMemoryWallet::new();
        let to = Address([1u8; 32]);
        wallet.reject(to);
        let err = wallet.transfer(&to, Decimal::ONE).unwrap_err();
        assert!(matches!(err, MintgateError::TransferFailed { .. }));
        assert_eq!(wallet.balance(&to), Decimal::ZERO);
    }
}
