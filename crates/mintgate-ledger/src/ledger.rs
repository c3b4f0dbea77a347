//! The consumption ledger and payment escrow of one minter.
//!
//! [`MintLedger`] is the single source of truth for:
//! - spent voucher nonces ([`NonceRegistry`])
//! - per-leaf cumulative allowlist consumption ([`LeafConsumption`])
//! - withdrawable payee balances ([`PaymentLedger`])
//!
//! All request mutations go through [`MintLedger::transaction`]. The ledger
//! only grows; the sole exception is a payee's balance, which a withdrawal
//! zeroes.

use mintgate_types::{Address, LeafKey, MintgateError, Nonce, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::escrow_conservation::EscrowConservation;
use crate::leaf_consumption::LeafConsumption;
use crate::nonce_registry::NonceRegistry;
use crate::payment_ledger::PaymentLedger;
use crate::transaction::LedgerTxn;
use crate::transfer::ValueTransfer;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MintLedger {
    pub(crate) nonces: NonceRegistry,
    pub(crate) quotas: LeafConsumption,
    pub(crate) payments: PaymentLedger,
    pub(crate) conservation: EscrowConservation,
}

impl MintLedger {
    /// Empty ledger, as at deployment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an all-or-nothing transaction for one request.
    pub fn transaction(&mut self) -> LedgerTxn<'_> {
        LedgerTxn::new(self)
    }

    // ── Read-only queries ───────────────────────────────────────────

    #[must_use]
    pub fn is_nonce_consumed(&self, nonce: &Nonce) -> bool {
        self.nonces.is_consumed(nonce)
    }

    /// Units minted so far against a leaf.
    #[must_use]
    pub fn consumed(&self, key: &LeafKey) -> u64 {
        self.quotas.consumed(key)
    }

    /// Withdrawable balance of `payee`.
    #[must_use]
    pub fn payments(&self, payee: &Address) -> Decimal {
        self.payments.balance(payee)
    }

    /// Value credited but not yet withdrawn, summed over all payees.
    #[must_use]
    pub fn total_held(&self) -> Decimal {
        self.payments.total()
    }

    #[must_use]
    pub fn conservation(&self) -> &EscrowConservation {
        &self.conservation
    }

    /// Check `Σ balances == credited - withdrawn`.
    pub fn verify_conservation(&self) -> Result<()> {
        self.conservation.verify(self.payments.total())
    }

    // ── Escrow withdrawal ───────────────────────────────────────────

    /// Pay out `payee`'s whole balance through `sink`.
    ///
    /// The entry is zeroed **before** `sink` is invoked, so a sink that
    /// re-enters finds a zero balance. If the transfer fails the balance is
    /// restored and the error returned. A zero balance is a successful no-op
    /// that never touches `sink`. Nothing is paid out of a ledger whose
    /// balances do not match its conservation totals.
    ///
    /// Role checks are the caller's responsibility.
    pub fn withdraw(&mut self, payee: Address, sink: &mut dyn ValueTransfer) -> Result<Decimal> {
        self.verify_conservation()?;
        let amount = self.payments.take(&payee);
        if amount.is_zero() {
            tracing::debug!(%payee, "Withdrawal of zero balance");
            return Ok(Decimal::ZERO);
        }

        if let Err(err) = sink.transfer(&payee, amount) {
            self.payments.restore(payee, amount);
            tracing::warn!(%payee, %amount, error = %err, "Withdrawal transfer failed, balance restored");
            return Err(match err {
                e @ MintgateError::TransferFailed { .. } => e,
                other => MintgateError::TransferFailed {
                    payee,
                    reason: other.to_string(),
                },
            });
        }

        self.conservation.record_withdrawal(amount);
        tracing::info!(%payee, %amount, "Payments withdrawn");
        Ok(amount)
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Serialize the whole ledger.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a ledger written by [`MintLedger::to_json`]. Rejects snapshots
    /// whose balances do not match their conservation totals.
    pub fn from_json(json: &str) -> Result<Self> {
        let ledger: Self = serde_json::from_str(json)?;
        ledger.verify_conservation()?;
        Ok(ledger)
    }
}
