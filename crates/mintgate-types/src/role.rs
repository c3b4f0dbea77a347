//! Roles checked at privileged entry points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability a principal can hold.
///
/// Roles are flat: holding one never implies another. `Admin` is the
/// administrator of every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes roles.
    Admin,
    /// May sign vouchers.
    TrustedSigner,
    /// May withdraw escrowed payments.
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::TrustedSigner => write!(f, "TRUSTED_SIGNER"),
            Self::Manager => write!(f, "MANAGER"),
        }
    }
}
