//! Escrow conservation invariant checker.
//!
//! Invariant, checked before every withdrawal and whenever a snapshot is
//! loaded:
//! ```text
//! Σ(payee balances) == Σ(credited) - Σ(withdrawn)
//! ```
//!
//! i.e. the ledger always accounts for exactly the value held but not yet
//! withdrawn. A violation means value was created or lost.

use mintgate_types::{MintgateError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cumulative credited/withdrawn totals since deployment.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EscrowConservation {
    credited: Decimal,
    withdrawn: Decimal,
}

impl EscrowConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the lifetime credited total. `None` (total unchanged)
    /// if it would overflow.
    pub fn record_credit(&mut self, amount: Decimal) -> Option<Decimal> {
        self.credited = self.credited.checked_add(amount)?;
        Some(self.credited)
    }

    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawn += amount;
    }

    pub(crate) fn revert_credit(&mut self, amount: Decimal) {
        self.credited -= amount;
    }

    /// Value that should currently be held: credited - withdrawn.
    #[must_use]
    pub fn expected_held(&self) -> Decimal {
        self.credited.saturating_sub(self.withdrawn)
    }

    #[must_use]
    pub fn total_credited(&self) -> Decimal {
        self.credited
    }

    #[must_use]
    pub fn total_withdrawn(&self) -> Decimal {
        self.withdrawn
    }

    /// Verify that the sum of all balances matches the expected held value.
    ///
    /// # Errors
    /// Returns [`MintgateError::Internal`] if they differ.
    pub fn verify(&self, actual_held: Decimal) -> Result<()> {
        let expected = self.credited.checked_sub(self.withdrawn);
        if expected != Some(actual_held) {
            return Err(MintgateError::Internal(format!(
                "escrow conservation violated: balances {actual_held} != expected {} \
                 (credited={}, withdrawn={})",
                self.expected_held(),
                self.credited,
                self.withdrawn
            )));
        }
        Ok(())
    }
}
