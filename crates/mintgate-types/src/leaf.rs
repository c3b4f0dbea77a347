//! Allowlist leaves and the claims made against them.
//!
//! A leaf `{address, quantity_cap, salt}` is committed off-chain into a
//! Merkle root. Two hashes are derived from it:
//!
//! - [`AllowlistLeaf::leaf_hash`] covers all three fields and is what the
//!   inclusion proof starts from.
//! - [`AllowlistLeaf::leaf_key`] covers only `(address, salt)` and names the
//!   consumption bucket. The cap is a claim checked against the proof, never
//!   a ledger key, so one address can hold several independent buckets by
//!   using several salts.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{LEAF_KEY_TAG, LEAF_PREFIX};
use crate::{Address, Hash32, LeafKey, Salt};

/// One allowlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowlistLeaf {
    pub address: Address,
    pub quantity_cap: u64,
    pub salt: Salt,
}

impl AllowlistLeaf {
    #[must_use]
    pub fn new(address: Address, quantity_cap: u64, salt: Salt) -> Self {
        Self {
            address,
            quantity_cap,
            salt,
        }
    }

    /// Canonical leaf encoding: `H(0x00 || address || cap_be64 || salt)`.
    #[must_use]
    pub fn leaf_hash(&self) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update([LEAF_PREFIX]);
        hasher.update(self.address.as_bytes());
        hasher.update(self.quantity_cap.to_be_bytes());
        hasher.update(self.salt.as_bytes());
        Hash32(hasher.finalize().into())
    }

    /// Consumption bucket of this leaf.
    #[must_use]
    pub fn leaf_key(&self) -> LeafKey {
        leaf_key(&self.address, &self.salt)
    }
}

/// `H(LEAF_KEY_TAG || address || salt)`.
#[must_use]
pub fn leaf_key(address: &Address, salt: &Salt) -> LeafKey {
    let mut hasher = Sha256::new();
    hasher.update(LEAF_KEY_TAG);
    hasher.update(address.as_bytes());
    hasher.update(salt.as_bytes());
    LeafKey(hasher.finalize().into())
}

/// A request to mint against an allowlist leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistClaim {
    /// The leaf as claimed by the caller. Verified against the root.
    pub leaf: AllowlistLeaf,
    /// Units requested by this call.
    pub quantity: u64,
    /// Sibling hashes from the leaf up to the root.
    pub proof: Vec<Hash32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_hash_covers_every_field() {
        let leaf = AllowlistLeaf::new(Address([1u8; 32]), 3, Salt::from_u64(7));
        let base = leaf.leaf_hash();

        let mut other = leaf;
        other.address = Address([2u8; 32]);
        assert_ne!(base, other.leaf_hash());

        let mut other = leaf;
        other.quantity_cap = 4;
        assert_ne!(base, other.leaf_hash());

        let mut other = leaf;
        other.salt = Salt::from_u64(8);
        assert_ne!(base, other.leaf_hash());
    }

    #[test]
    fn leaf_key_ignores_cap() {
        let a = AllowlistLeaf::new(Address([1u8; 32]), 1, Salt::from_u64(123));
        let b = AllowlistLeaf::new(Address([1u8; 32]), 2, Salt::from_u64(123));
        assert_eq!(a.leaf_key(), b.leaf_key());
    }

    #[test]
    fn leaf_key_separates_salts() {
        let a = AllowlistLeaf::new(Address([1u8; 32]), 1, Salt::from_u64(123));
        let b = AllowlistLeaf::new(Address([1u8; 32]), 1, Salt::from_u64(456));
        assert_ne!(a.leaf_key(), b.leaf_key());
    }

    #[test]
    fn leaf_key_and_leaf_hash_never_collide() {
        let leaf = AllowlistLeaf::new(Address([1u8; 32]), 0, Salt::from_u64(0));
        assert_ne!(leaf.leaf_hash().0, leaf.leaf_key().0);
    }
}
