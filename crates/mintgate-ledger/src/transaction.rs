//! All-or-nothing request execution.
//!
//! A [`LedgerTxn`] journals every mutation a request makes. Committing makes
//! them final; dropping the transaction without committing undoes them in
//! reverse order. Every early `?` return in a minter therefore leaves the
//! ledger exactly as it was.
//!
//! Within one request the order is fixed:
//! ```text
//! validate → consume (nonce | quota) → credit payment → mint → commit
//! ```

use mintgate_types::{Address, LeafKey, MintgateError, Nonce, PaymentTerms, Result};
use rust_decimal::Decimal;

use crate::ledger::MintLedger;

#[derive(Debug)]
enum JournalEntry {
    Nonce(Nonce),
    Quota { key: LeafKey, quantity: u64 },
    Credit { payee: Address, amount: Decimal },
}

/// An open request against a [`MintLedger`].
#[derive(Debug)]
pub struct LedgerTxn<'a> {
    ledger: &'a mut MintLedger,
    journal: Vec<JournalEntry>,
    committed: bool,
}

impl<'a> LedgerTxn<'a> {
    pub(crate) fn new(ledger: &'a mut MintLedger) -> Self {
        Self {
            ledger,
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Mark `nonce` consumed.
    ///
    /// # Errors
    /// [`MintgateError::NonceConsumed`] if it already was.
    pub fn consume_nonce(&mut self, nonce: Nonce) -> Result<()> {
        self.ledger.nonces.consume(nonce)?;
        self.journal.push(JournalEntry::Nonce(nonce));
        Ok(())
    }

    /// Add `requested` to the leaf's running total, bounded by `cap`.
    ///
    /// # Errors
    /// [`MintgateError::QuotaExceeded`] if the total would pass `cap`.
    pub fn consume_quota(&mut self, key: LeafKey, requested: u64, cap: u64) -> Result<u64> {
        let total = self.ledger.quotas.consume(key, requested, cap)?;
        self.journal.push(JournalEntry::Quota {
            key,
            quantity: requested,
        });
        Ok(total)
    }

    /// Check that `attached` is exactly `price × quantity` and credit it to
    /// the payee. Without payment terms the attached value must be zero.
    ///
    /// Returns the credited amount.
    ///
    /// # Errors
    /// [`MintgateError::WrongPaymentAmount`] on any mismatch,
    /// [`MintgateError::PaymentOverflow`] if the price, the payee's balance or
    /// the escrow's lifetime total would overflow.
    pub fn collect_payment(
        &mut self,
        terms: Option<&PaymentTerms>,
        quantity: u64,
        attached: Decimal,
    ) -> Result<Decimal> {
        let required = match terms {
            Some(terms) => terms
                .price
                .checked_mul(Decimal::from(quantity))
                .ok_or(MintgateError::PaymentOverflow { quantity })?,
            None => Decimal::ZERO,
        };
        if attached != required {
            return Err(MintgateError::WrongPaymentAmount {
                expected: required,
                attached,
            });
        }
        if let Some(terms) = terms {
            if !attached.is_zero() {
                self.credit(terms.payee, attached)
                    .ok_or(MintgateError::PaymentOverflow { quantity })?;
            }
        }
        Ok(attached)
    }

    /// `None` if either total would overflow; nothing is changed then.
    fn credit(&mut self, payee: Address, amount: Decimal) -> Option<()> {
        self.ledger.conservation.record_credit(amount)?;
        if self.ledger.payments.credit(payee, amount).is_none() {
            self.ledger.conservation.revert_credit(amount);
            return None;
        }
        self.journal.push(JournalEntry::Credit { payee, amount });
        Some(())
    }

    /// Make every journaled mutation final.
    pub fn commit(mut self) {
        self.committed = true;
        self.journal.clear();
    }

    fn rollback(&mut self) {
        let undone = self.journal.len();
        while let Some(entry) = self.journal.pop() {
            match entry {
                JournalEntry::Nonce(nonce) => self.ledger.nonces.revert(&nonce),
                JournalEntry::Quota { key, quantity } => self.ledger.quotas.revert(&key, quantity),
                JournalEntry::Credit { payee, amount } => {
                    self.ledger.payments.revert_credit(&payee, amount);
                    self.ledger.conservation.revert_credit(amount);
                }
            }
        }
        if undone > 0 {
            tracing::debug!(undone, "Ledger transaction rolled back");
        }
    }
}

impl Drop for LedgerTxn<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
