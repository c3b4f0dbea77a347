//! System-wide constants for Mintgate.
//!
//! The tags below are part of the wire format: vouchers signed and trees
//! built off-chain must use the same values.

/// Domain-separation tag of the voucher domain separator.
pub const DOMAIN_TAG: &[u8] = b"mintgate:domain:v1:";

/// Domain-separation tag of the voucher struct hash.
pub const VOUCHER_TAG: &[u8] = b"mintgate:voucher:v1:";

/// Two-byte prefix of the final voucher digest.
pub const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// Prefix byte of an allowlist leaf hash.
pub const LEAF_PREFIX: u8 = 0x00;

/// Prefix byte of an inner Merkle node.
pub const NODE_PREFIX: u8 = 0x01;

/// Domain-separation tag of an allowlist consumption key.
pub const LEAF_KEY_TAG: &[u8] = b"mintgate:leaf_key:v1:";

/// Longest inclusion proof accepted. A tree this deep holds 2^64 leaves.
pub const MAX_PROOF_DEPTH: usize = 64;

/// How the two children of a Merkle node are ordered before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingOrdering {
    /// Numerically smaller hash first. Proofs then need no position bits.
    Sorted,
}

/// The one ordering used by both tree construction and proof verification.
pub const SIBLING_ORDERING: SiblingOrdering = SiblingOrdering::Sorted;

/// Voucher domain version used when a config omits it.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Mintgate";
