//! # Vouchers: single-use signed mint authorizations
//!
//! A trusted signer issues a [`MintVoucher`] off-chain and signs its
//! domain-bound digest with ed25519. The voucher is redeemed exactly once:
//! its [`Nonce`] is consumed on the first successful mint.
//!
//! ## Digest
//!
//! ```text
//! domainSeparator = H(DOMAIN_TAG || len(name) || name || len(version) || version
//!                     || chainId || verifyingContract)
//! structHash      = H(VOUCHER_TAG || recipient || itemId || quantity || nonce)
//! digest          = H(0x19 0x01 || domainSeparator || structHash)
//! ```
//!
//! Binding `chainId` and `verifyingContract` means a voucher signed for one
//! deployment is rejected by every other deployment.

use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{DIGEST_PREFIX, DOMAIN_TAG, VOUCHER_TAG};
use crate::{Address, Hash32, ItemId, Nonce};

/// The signing domain of one minter deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    /// Hash of the domain fields. Computed once per minter.
    #[must_use]
    pub fn separator(&self) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update((self.name.len() as u64).to_be_bytes());
        hasher.update(self.name.as_bytes());
        hasher.update((self.version.len() as u64).to_be_bytes());
        hasher.update(self.version.as_bytes());
        hasher.update(self.chain_id.to_be_bytes());
        hasher.update(self.verifying_contract.as_bytes());
        Hash32(hasher.finalize().into())
    }
}

/// The fields a trusted signer authorizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintVoucher {
    /// Who receives the minted units.
    pub recipient: Address,
    /// Which item is minted.
    pub item_id: ItemId,
    /// How many units.
    pub quantity: u64,
    /// Single-use, high-entropy nonce.
    pub nonce: Nonce,
}

impl MintVoucher {
    /// Hash of the voucher fields, independent of the domain.
    #[must_use]
    pub fn struct_hash(&self) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(VOUCHER_TAG);
        hasher.update(self.recipient.as_bytes());
        hasher.update(self.item_id.0.to_be_bytes());
        hasher.update(self.quantity.to_be_bytes());
        hasher.update(self.nonce.as_bytes());
        Hash32(hasher.finalize().into())
    }

    /// The domain-bound digest that is actually signed.
    #[must_use]
    pub fn digest(&self, domain_separator: &Hash32) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update(DIGEST_PREFIX);
        hasher.update(domain_separator.as_bytes());
        hasher.update(self.struct_hash().as_bytes());
        Hash32(hasher.finalize().into())
    }

    /// Sign this voucher for `domain`. This is the issuer side; the minter
    /// only ever verifies.
    #[must_use]
    pub fn sign(self, domain: &Domain, key: &SigningKey) -> SignedVoucher {
        let digest = self.digest(&domain.separator());
        let signature = key.sign(digest.as_bytes());
        SignedVoucher {
            voucher: self,
            signer: Address(key.verifying_key().to_bytes()),
            signature: signature.to_bytes().to_vec(),
        }
    }
}

/// A voucher together with its claimed signer and ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVoucher {
    pub voucher: MintVoucher,
    /// The signer's ed25519 public key.
    pub signer: Address,
    /// 64-byte ed25519 signature over [`MintVoucher::digest`].
    pub signature: Vec<u8>,
}
