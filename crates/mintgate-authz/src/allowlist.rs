//! Allowlist authorization module.
//!
//! Admits an [`AllowlistClaim`] when its leaf is included under the
//! deployment's Merkle root and the leaf's running total, plus the requested
//! quantity, stays within the cap the leaf carries.

use mintgate_ledger::LedgerTxn;
use mintgate_types::{AllowlistClaim, Authorization, Hash32, MintgateError, Result};

use crate::merkle;

#[derive(Debug, Clone, Copy)]
pub struct AllowlistAuthorizer {
    root: Hash32,
}

impl AllowlistAuthorizer {
    #[must_use]
    pub fn new(root: Hash32) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> Hash32 {
        self.root
    }

    /// Check that the claimed leaf is committed under the root.
    ///
    /// # Errors
    /// [`MintgateError::InvalidProof`] if the proof is too deep or folds to
    /// another root.
    pub fn verify_inclusion(&self, claim: &AllowlistClaim) -> Result<()> {
        if !merkle::verify_proof(&self.root, claim.leaf.leaf_hash(), &claim.proof) {
            return Err(MintgateError::InvalidProof);
        }
        Ok(())
    }

    /// Verify inclusion, then charge `claim.quantity` to the leaf's bucket.
    pub fn authorize(&self, claim: &AllowlistClaim, txn: &mut LedgerTxn<'_>) -> Result<Authorization> {
        self.verify_inclusion(claim)?;

        let leaf = &claim.leaf;
        let key = leaf.leaf_key();
        let total = txn.consume_quota(key, claim.quantity, leaf.quantity_cap)?;

        tracing::debug!(
            address = %leaf.address,
            leaf_key = %key,
            quantity = claim.quantity,
            consumed = total,
            cap = leaf.quantity_cap,
            "Allowlist claim authorized"
        );

        Ok(Authorization {
            recipient: leaf.address,
            item_id: None,
            quantity: claim.quantity,
        })
    }
}
