//! # mintgate-types
//!
//! Shared types, errors, and configuration for **Mintgate**, the admission
//! control layer in front of a token mint.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`Nonce`], [`Salt`], [`LeafKey`], [`Hash32`], [`ItemId`], [`EventId`]
//! - **Voucher model**: [`MintVoucher`], [`SignedVoucher`], [`Domain`]
//! - **Allowlist model**: [`AllowlistLeaf`], [`AllowlistClaim`]
//! - **Access model**: [`Role`]
//! - **Events**: [`MintEvent`], [`AuthScheme`], [`Authorization`]
//! - **Configuration**: [`VoucherMinterConfig`], [`AllowlistMinterConfig`], [`PaymentTerms`]
//! - **Errors**: [`MintgateError`] with `MG_ERR_` prefix codes
//! - **Constants**: domain tags and limits

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod leaf;
pub mod role;
pub mod voucher;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures;

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use leaf::*;
pub use role::*;
pub use voucher::*;

// Constants are accessed via `mintgate_types::constants::FOO`
// (not re-exported to avoid name collisions).
