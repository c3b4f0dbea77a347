//! Allowlist-gated minter.
//!
//! A caller presents a leaf `{address, quantity_cap, salt}` plus its inclusion
//! proof and pays `price × quantity`. Units always go to the leaf's address,
//! never to the caller.

use mintgate_ledger::{AccessControl, MintLedger, ValueTransfer};
use mintgate_types::{
    leaf_key, Address, AllowlistClaim, AllowlistMinterConfig, AuthScheme, Hash32, LeafKey,
    MintEvent, Result, Role, Salt,
};
use rust_decimal::Decimal;

use crate::allowlist::AllowlistAuthorizer;
use crate::asset_ledger::AssetLedger;
use crate::minter_core::MinterCore;

pub struct AllowlistMinter<A> {
    config: AllowlistMinterConfig,
    authorizer: AllowlistAuthorizer,
    core: MinterCore,
    assets: A,
}

impl<A: AssetLedger> AllowlistMinter<A> {
    /// Deploy with `admin` as administrator and the configured payee as
    /// manager.
    pub fn deploy(config: AllowlistMinterConfig, admin: Address, assets: A) -> Result<Self> {
        config.validate()?;
        let core = MinterCore::deploy(admin, Some(config.payment.payee))?;
        tracing::info!(
            contract = %config.contract,
            asset_ledger = %config.asset_ledger,
            merkle_root = %config.merkle_root,
            price = %config.payment.price,
            %admin,
            "Allowlist minter deployed"
        );
        Ok(Self::assemble(config, core, assets))
    }

    pub fn resume(
        config: AllowlistMinterConfig,
        access: AccessControl,
        ledger: MintLedger,
        assets: A,
    ) -> Result<Self> {
        config.validate()?;
        ledger.verify_conservation()?;
        Ok(Self::assemble(config, MinterCore::resume(access, ledger), assets))
    }

    fn assemble(config: AllowlistMinterConfig, core: MinterCore, assets: A) -> Self {
        let authorizer = AllowlistAuthorizer::new(config.merkle_root);
        Self {
            config,
            authorizer,
            core,
            assets,
        }
    }

    /// Mint `claim.quantity` units to the claimed leaf's address.
    pub fn mint(&mut self, caller: &Address, claim: &AllowlistClaim, attached: Decimal) -> Result<MintEvent> {
        match self.execute(claim, attached) {
            Ok(event) => {
                tracing::info!(
                    event_id = %event.id,
                    %caller,
                    recipient = %event.recipient,
                    quantity = event.quantity,
                    paid = %event.paid,
                    "Allowlist mint committed"
                );
                Ok(event)
            }
            Err(err) => {
                tracing::warn!(
                    code = err.code(),
                    %caller,
                    address = %claim.leaf.address,
                    quantity = claim.quantity,
                    error = %err,
                    "Allowlist mint rejected"
                );
                Err(err)
            }
        }
    }

    fn execute(&mut self, claim: &AllowlistClaim, attached: Decimal) -> Result<MintEvent> {
        let mut txn = self.core.ledger.transaction();
        let authorization = self.authorizer.authorize(claim, &mut txn)?;
        let paid = txn.collect_payment(Some(&self.config.payment), authorization.quantity, attached)?;
        self.assets.mint(
            &self.config.contract,
            &authorization.recipient,
            authorization.item_id,
            authorization.quantity,
        )?;
        txn.commit();

        let event = MintEvent::new(AuthScheme::Allowlist, &authorization, paid);
        self.core.record(event.clone());
        Ok(event)
    }

    // ── Administration ──────────────────────────────────────────────

    pub fn grant_role(&mut self, caller: &Address, role: Role, account: Address) -> Result<bool> {
        self.core.grant_role(caller, role, account)
    }

    pub fn revoke_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<bool> {
        self.core.revoke_role(caller, role, account)
    }

    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.core.renounce_role(caller, role)
    }

    pub fn withdraw(&mut self, caller: &Address, payee: Address, sink: &mut dyn ValueTransfer) -> Result<Decimal> {
        self.core.withdraw(caller, payee, sink)
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Consumption bucket of `(address, salt)`.
    #[must_use]
    pub fn leaf_key(&self, address: &Address, salt: &Salt) -> LeafKey {
        leaf_key(address, salt)
    }

    /// Units minted so far against `key`.
    #[must_use]
    pub fn consumed(&self, key: &LeafKey) -> u64 {
        self.core.ledger().consumed(key)
    }

    #[must_use]
    pub fn payments(&self, payee: &Address) -> Decimal {
        self.core.payments(payee)
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.config.payment.price
    }

    #[must_use]
    pub fn payee(&self) -> Address {
        self.config.payment.payee
    }

    #[must_use]
    pub fn merkle_root(&self) -> Hash32 {
        self.authorizer.root()
    }

    #[must_use]
    pub fn config(&self) -> &AllowlistMinterConfig {
        &self.config
    }

    #[must_use]
    pub fn asset_ledger(&self) -> Address {
        self.config.asset_ledger
    }

    #[must_use]
    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    #[must_use]
    pub fn core(&self) -> &MinterCore {
        &self.core
    }

    #[must_use]
    pub fn events(&self) -> &[MintEvent] {
        self.core.events()
    }
}
