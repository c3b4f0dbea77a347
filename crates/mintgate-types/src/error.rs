//! Error types for Mintgate.
//!
//! All errors use the `MG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors (vouchers, allowlist proofs, quotas)
//! - 2xx: Payment / escrow errors
//! - 3xx: Access control errors
//! - 4xx: Asset ledger errors
//! - 9xx: General / internal errors
//!
//! Every variant is a distinct, machine-checkable reason. A failed request
//! leaves no ledger mutation behind.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, LeafKey, Nonce, Role};

/// Central error enum for all Mintgate operations.
#[derive(Debug, Error)]
pub enum MintgateError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The voucher signature did not verify, or its signer is not trusted.
    #[error("MG_ERR_100: Invalid voucher signature")]
    InvalidSignature,

    /// The voucher nonce has already authorized a mint.
    #[error("MG_ERR_101: Nonce consumed: {0}")]
    NonceConsumed(Nonce),

    /// The inclusion proof does not lead to the committed root.
    #[error("MG_ERR_102: Invalid merkle proof")]
    InvalidProof,

    /// The leaf's cumulative consumption would exceed its cap.
    #[error(
        "MG_ERR_103: Quota exceeded for {leaf_key}: consumed {consumed} + requested {requested} > cap {cap}"
    )]
    QuotaExceeded {
        leaf_key: LeafKey,
        consumed: u64,
        requested: u64,
        cap: u64,
    },

    // =================================================================
    // Payment Errors (2xx)
    // =================================================================
    /// The attached value is not exactly `price × quantity`.
    #[error("MG_ERR_200: Wrong payment amount: expected {expected}, attached {attached}")]
    WrongPaymentAmount { expected: Decimal, attached: Decimal },

    /// Sending withdrawn value to the payee failed. The balance is restored.
    #[error("MG_ERR_201: Transfer to {payee} failed: {reason}")]
    TransferFailed { payee: Address, reason: String },

    /// `price × quantity` does not fit in a `Decimal`.
    #[error("MG_ERR_202: Payment overflow for quantity {quantity}")]
    PaymentOverflow { quantity: u64 },

    // =================================================================
    // Access Control Errors (3xx)
    // =================================================================
    /// The caller lacks the role required by a privileged entry point.
    #[error("MG_ERR_300: Unauthorized: {principal} lacks role {role}")]
    Unauthorized { principal: Address, role: Role },

    // =================================================================
    // Asset Ledger Errors (4xx)
    // =================================================================
    /// The asset ledger refused the mint.
    #[error("MG_ERR_400: Mint rejected by asset ledger: {reason}")]
    MintRejected { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("MG_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("MG_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("MG_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl MintgateError {
    /// The `MG_ERR_` code of this error, e.g. `"MG_ERR_101"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "MG_ERR_100",
            Self::NonceConsumed(_) => "MG_ERR_101",
            Self::InvalidProof => "MG_ERR_102",
            Self::QuotaExceeded { .. } => "MG_ERR_103",
            Self::WrongPaymentAmount { .. } => "MG_ERR_200",
            Self::TransferFailed { .. } => "MG_ERR_201",
            Self::PaymentOverflow { .. } => "MG_ERR_202",
            Self::Unauthorized { .. } => "MG_ERR_300",
            Self::MintRejected { .. } => "MG_ERR_400",
            Self::Internal(_) => "MG_ERR_900",
            Self::Serialization(_) => "MG_ERR_901",
            Self::Configuration(_) => "MG_ERR_902",
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MintgateError>;

// Conversion from serde_json::Error
impl From<serde_json::Error> for MintgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
