//! Deployment configuration for the two minters.
//!
//! Everything here is fixed at deployment and immutable afterwards: the
//! contract address, the asset ledger, the price, the payee, the voucher
//! domain and the allowlist root.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, Address, Domain, Hash32, MintgateError, Result};

fn default_domain_version() -> String {
    constants::DEFAULT_DOMAIN_VERSION.to_string()
}

/// Voucher signing domain, minus the contract address (supplied by the
/// minter config so it cannot disagree with the deployment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    #[serde(default = "default_domain_version")]
    pub version: String,
    pub chain_id: u64,
}

/// Fixed per-unit price and the principal credited with every payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub price: Decimal,
    pub payee: Address,
}

impl PaymentTerms {
    fn validate(&self) -> Result<()> {
        if self.price.is_sign_negative() {
            return Err(MintgateError::Configuration(format!(
                "price must not be negative, got {}",
                self.price
            )));
        }
        Ok(())
    }
}

/// Configuration of a voucher minter deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherMinterConfig {
    /// This minter's own address. Also the domain's verifying contract.
    pub contract: Address,
    /// The asset ledger this minter mints into.
    pub asset_ledger: Address,
    pub domain: DomainConfig,
    /// `None` deploys a free minter: attached value must be zero.
    #[serde(default)]
    pub payment: Option<PaymentTerms>,
}

impl VoucherMinterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.name.is_empty() {
            return Err(MintgateError::Configuration(
                "domain name must not be empty".into(),
            ));
        }
        if self.domain.version.is_empty() {
            return Err(MintgateError::Configuration(
                "domain version must not be empty".into(),
            ));
        }
        if let Some(terms) = &self.payment {
            terms.validate()?;
        }
        Ok(())
    }

    /// The full signing domain of this deployment.
    #[must_use]
    pub fn signing_domain(&self) -> Domain {
        Domain {
            name: self.domain.name.clone(),
            version: self.domain.version.clone(),
            chain_id: self.domain.chain_id,
            verifying_contract: self.contract,
        }
    }
}

/// Configuration of an allowlist minter deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistMinterConfig {
    pub contract: Address,
    pub asset_ledger: Address,
    pub payment: PaymentTerms,
    /// Root of the allowlist tree. Immutable.
    pub merkle_root: Hash32,
}

impl AllowlistMinterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.payment.validate()
    }
}
