//! Deterministic keys and principals for tests. **Never use in production.**

use ed25519_dalek::SigningKey;

use crate::{Address, Domain};

/// An ed25519 key derived from a single seed byte.
#[must_use]
pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

/// The address of [`signing_key`]`(seed)`.
#[must_use]
pub fn signer_address(seed: u8) -> Address {
    Address(signing_key(seed).verifying_key().to_bytes())
}

/// A plain principal that never signs anything.
#[must_use]
pub fn address(seed: u8) -> Address {
    let mut bytes = [0u8; 32];
    bytes[0] = 0xa0;
    bytes[31] = seed;
    Address(bytes)
}

/// A signing domain on a local test chain.
#[must_use]
pub fn domain(verifying_contract: Address) -> Domain {
    Domain {
        name: "VoucherMinter".into(),
        version: "1".into(),
        chain_id: 31337,
        verifying_contract,
    }
}
