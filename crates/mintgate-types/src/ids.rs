//! Identifiers used throughout Mintgate.
//!
//! Every 32-byte value (principals, nonces, salts, digests) is a distinct
//! newtype so a nonce can never be passed where a leaf key is expected.
//! They serialize as lowercase hex strings, which keeps them usable as
//! JSON map keys in ledger snapshots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::MintgateError;

macro_rules! bytes32_newtype {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// First four bytes, hex encoded. For log lines.
            #[must_use]
            pub fn short(&self) -> String {
                hex::encode(&self.0[..4])
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", $prefix, hex::encode(&self.0[..8]))
            }
        }

        impl FromStr for $name {
            type Err = MintgateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(raw, &mut bytes).map_err(|e| {
                    MintgateError::Serialization(format!(
                        "{} must be 32 hex-encoded bytes: {e}",
                        stringify!($name)
                    ))
                })?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

bytes32_newtype!(
    /// A principal: a recipient, a caller, a payee, or a contract.
    ///
    /// For voucher signers this is the raw ed25519 public key.
    Address,
    "addr"
);

bytes32_newtype!(
    /// Single-use voucher nonce. High entropy, never sequential.
    Nonce,
    "nonce"
);

bytes32_newtype!(
    /// Disambiguates several allowlist leaves owned by the same address.
    Salt,
    "salt"
);

bytes32_newtype!(
    /// Consumption bucket of an allowlist leaf: `H(address, salt)`.
    LeafKey,
    "leaf"
);

bytes32_newtype!(
    /// A SHA-256 output: digests, leaf hashes, Merkle nodes and roots.
    Hash32,
    "h"
);

impl Nonce {
    /// Draw a fresh nonce from the OS RNG.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; 32]>())
    }
}

impl Salt {
    /// Salt holding `value` as a big-endian 256-bit integer.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<Address> for Salt {
    fn from(address: Address) -> Self {
        Self(address.0)
    }
}

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Identifier of the item (token id) a voucher mints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Unique identifier of an emitted mint event. UUIDv7, so event ids sort by
/// emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.0)
    }
}
