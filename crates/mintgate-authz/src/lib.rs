//! # mintgate-authz
//!
//! **Admission control for a token mint.** Two public entry points, each
//! fronting an external asset ledger:
//!
//! - [`VoucherMinter`]: redeems single-use vouchers signed by a trusted signer
//! - [`AllowlistMinter`]: redeems Merkle-proven allowlist leaves against a
//!   per-leaf cumulative quota
//!
//! ## Request Flow
//!
//! ```text
//! mint(caller, credential, attached)
//!   → authorizer (signature + nonce | proof + quota)
//!   → collect_payment (attached == price × quantity)
//!   → AssetLedger::mint
//!   → commit, MintEvent
//! ```
//!
//! Any failure along the way leaves the ledger untouched.

pub mod allowlist;
pub mod allowlist_minter;
pub mod asset_ledger;
pub mod merkle;
pub mod minter_core;
pub mod voucher;
pub mod voucher_minter;

pub use allowlist::AllowlistAuthorizer;
pub use allowlist_minter::AllowlistMinter;
pub use asset_ledger::{AssetLedger, InMemoryAssetLedger};
pub use merkle::MerkleTree;
pub use minter_core::MinterCore;
pub use voucher::VoucherAuthorizer;
pub use voucher_minter::VoucherMinter;
