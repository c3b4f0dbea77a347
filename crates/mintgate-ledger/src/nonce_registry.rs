//! Consumed-nonce registry: prevents voucher replay.
//!
//! Like a blockchain nullifier set: each nonce can authorize one mint, ever.
//! Presenting a consumed nonce a second time returns
//! [`MintgateError::NonceConsumed`], whatever the other voucher fields say.
//!
//! The set is shared by every trusted signer. Two signers that pick the same
//! nonce simply make the later voucher fail; nothing is overwritten.
//!
//! Unlike a settlement cache the set is never bounded or evicted: an evicted
//! nonce would become replayable.

use std::collections::HashSet;

use mintgate_types::{MintgateError, Nonce, Result};
use serde::{Deserialize, Serialize};

/// Monotonically growing set of spent nonces.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NonceRegistry {
    consumed: HashSet<Nonce>,
}

impl NonceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail if `nonce` was already consumed. Does not record anything.
    pub fn check(&self, nonce: &Nonce) -> Result<()> {
        if self.consumed.contains(nonce) {
            return Err(MintgateError::NonceConsumed(*nonce));
        }
        Ok(())
    }

    /// Record `nonce` as consumed.
    ///
    /// # Errors
    /// Returns [`MintgateError::NonceConsumed`] if it already was.
    pub fn consume(&mut self, nonce: Nonce) -> Result<()> {
        if !self.consumed.insert(nonce) {
            return Err(MintgateError::NonceConsumed(nonce));
        }
        Ok(())
    }

    /// Undo a consumption recorded by the aborting transaction.
    pub(crate) fn revert(&mut self, nonce: &Nonce) {
        self.consumed.remove(nonce);
    }

    pub fn is_consumed(&self, nonce: &Nonce) -> bool {
        self.consumed.contains(nonce)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
