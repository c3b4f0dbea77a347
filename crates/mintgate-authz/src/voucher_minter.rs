//! Voucher-gated minter.
//!
//! Anyone may submit a voucher signed by a trusted signer. The voucher names
//! the recipient, item and quantity; the submitter only pays. Each nonce
//! admits exactly one mint, across all signers.

use mintgate_ledger::{AccessControl, MintLedger, ValueTransfer};
use mintgate_types::{
    Address, AuthScheme, Hash32, MintEvent, Nonce, Result, Role, SignedVoucher,
    VoucherMinterConfig,
};
use rust_decimal::Decimal;

use crate::asset_ledger::AssetLedger;
use crate::minter_core::MinterCore;
use crate::voucher::VoucherAuthorizer;

pub struct VoucherMinter<A> {
    config: VoucherMinterConfig,
    authorizer: VoucherAuthorizer,
    core: MinterCore,
    assets: A,
}

impl<A: AssetLedger> VoucherMinter<A> {
    /// Deploy with `admin` as the only administrator. The payee of the
    /// payment terms, if any, becomes a manager.
    ///
    /// # Errors
    /// `Configuration` if `config` does not validate.
    pub fn deploy(config: VoucherMinterConfig, admin: Address, assets: A) -> Result<Self> {
        config.validate()?;
        let manager = config.payment.as_ref().map(|terms| terms.payee);
        let core = MinterCore::deploy(admin, manager)?;
        tracing::info!(
            contract = %config.contract,
            asset_ledger = %config.asset_ledger,
            domain = %config.domain.name,
            chain_id = config.domain.chain_id,
            %admin,
            "Voucher minter deployed"
        );
        Ok(Self::assemble(config, core, assets))
    }

    /// Rebuild a minter from persisted roles and ledger.
    pub fn resume(
        config: VoucherMinterConfig,
        access: AccessControl,
        ledger: MintLedger,
        assets: A,
    ) -> Result<Self> {
        config.validate()?;
        ledger.verify_conservation()?;
        Ok(Self::assemble(config, MinterCore::resume(access, ledger), assets))
    }

    fn assemble(config: VoucherMinterConfig, core: MinterCore, assets: A) -> Self {
        let authorizer = VoucherAuthorizer::new(config.signing_domain());
        Self {
            config,
            authorizer,
            core,
            assets,
        }
    }

    /// Redeem `signed`, attaching `attached` in payment.
    ///
    /// Either every effect (nonce consumed, payment credited, units minted)
    /// happens, or none does.
    pub fn mint(&mut self, caller: &Address, signed: &SignedVoucher, attached: Decimal) -> Result<MintEvent> {
        match self.execute(signed, attached) {
            Ok(event) => {
                tracing::info!(
                    event_id = %event.id,
                    %caller,
                    recipient = %event.recipient,
                    item = ?event.item_id,
                    quantity = event.quantity,
                    paid = %event.paid,
                    nonce = %signed.voucher.nonce,
                    "Voucher mint committed"
                );
                Ok(event)
            }
            Err(err) => {
                tracing::warn!(
                    code = err.code(),
                    %caller,
                    nonce = %signed.voucher.nonce,
                    error = %err,
                    "Voucher mint rejected"
                );
                Err(err)
            }
        }
    }

    fn execute(&mut self, signed: &SignedVoucher, attached: Decimal) -> Result<MintEvent> {
        let mut txn = self.core.ledger.transaction();
        let authorization = self.authorizer.authorize(signed, &self.core.access, &mut txn)?;
        let paid = txn.collect_payment(self.config.payment.as_ref(), authorization.quantity, attached)?;
        self.assets.mint(
            &self.config.contract,
            &authorization.recipient,
            authorization.item_id,
            authorization.quantity,
        )?;
        txn.commit();

        let event = MintEvent::new(AuthScheme::Voucher, &authorization, paid);
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

    #[must_use]
    pub fn is_nonce_consumed(&self, nonce: &Nonce) -> bool {
        self.core.ledger().is_nonce_consumed(nonce)
    }

    #[must_use]
    pub fn is_trusted_signer(&self, signer: &Address) -> bool {
        self.core.access().has_role(Role::TrustedSigner, signer)
    }

    #[must_use]
    pub fn payments(&self, payee: &Address) -> Decimal {
        self.core.payments(payee)
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.config.payment.as_ref().map_or(Decimal::ZERO, |terms| terms.price)
    }

    #[must_use]
    pub fn domain_separator(&self) -> Hash32 {
        self.authorizer.domain_separator()
    }

    #[must_use]
    pub fn authorizer(&self) -> &VoucherAuthorizer {
        &self.authorizer
    }

    #[must_use]
    pub fn config(&self) -> &VoucherMinterConfig {
        &self.config
    }

    /// Address of the asset ledger this minter mints into.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_ledger::InMemoryAssetLedger;
    use mintgate_types::fixtures::{address, signer_address, signing_key};
    use mintgate_types::{DomainConfig, ItemId, MintVoucher, MintgateError, PaymentTerms};

    const ADMIN: u8 = 1;
    const OPERATOR: u8 = 2;
    const CONTRACT: u8 = 100;
    const PAYEE: u8 = 20;
    const USER: u8 = 50;

    fn config(payment: Option<PaymentTerms>) -> VoucherMinterConfig {
        VoucherMinterConfig {
            contract: address(CONTRACT),
            asset_ledger: address(101),
            domain: DomainConfig {
                name: "VoucherMinter".into(),
                version: "1".into(),
                chain_id: 31337,
            },
            payment,
        }
    }

    fn deploy(payment: Option<PaymentTerms>) -> VoucherMinter<InMemoryAssetLedger> {
        let mut assets = InMemoryAssetLedger::new();
        assets.grant_minter(address(CONTRACT));
        let mut minter = VoucherMinter::deploy(config(payment), address(ADMIN), assets).unwrap();
        minter
            .grant_role(&address(ADMIN), Role::TrustedSigner, signer_address(OPERATOR))
            .unwrap();
        minter
    }

    fn voucher(quantity: u64) -> SignedVoucher {
        MintVoucher {
            recipient: address(USER),
            item_id: ItemId(123),
            quantity,
            nonce: Nonce::random(),
        }
        .sign(&config(None).signing_domain(), &signing_key(OPERATOR))
    }

    #[test]
    fn free_mint_then_replay() {
        let mut minter = deploy(None);
        let signed = voucher(19);

        let event = minter.mint(&address(USER), &signed, Decimal::ZERO).unwrap();
        assert_eq!(event.scheme, AuthScheme::Voucher);
        assert_eq!(minter.assets().balance_of(&address(USER), Some(ItemId(123))), 19);
        assert!(minter.is_nonce_consumed(&signed.voucher.nonce));

        let err = minter.mint(&address(USER), &signed, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, MintgateError::NonceConsumed(_)));
        assert_eq!(minter.events().len(), 1);
    }

    #[test]
    fn paid_mint_credits_payee() {
        let terms = PaymentTerms {
            price: Decimal::new(5, 1),
            payee: address(PAYEE),
        };
        let mut minter = deploy(Some(terms));
        assert!(minter.core().access().has_role(Role::Manager, &address(PAYEE)));

        let err = minter.mint(&address(USER), &voucher(4), Decimal::ONE).unwrap_err();
        assert!(matches!(err, MintgateError::WrongPaymentAmount { .. }));

        minter.mint(&address(USER), &voucher(4), Decimal::TWO).unwrap();
        assert_eq!(minter.payments(&address(PAYEE)), Decimal::TWO);
        assert_eq!(minter.price(), Decimal::new(5, 1));
    }

    #[test]
    fn domain_separator_binds_contract() {
        let minter = deploy(None);
        assert_eq!(minter.domain_separator(), config(None).signing_domain().separator());
        assert_eq!(minter.authorizer().domain().verifying_contract, address(CONTRACT));
    }

    #[test]
    fn resume_keeps_consumed_nonces() {
        let mut minter = deploy(None);
        let signed = voucher(1);
        minter.mint(&address(USER), &signed, Decimal::ZERO).unwrap();

        let ledger = MintLedger::from_json(&minter.core().ledger().to_json().unwrap()).unwrap();
        let access = minter.core().access().clone();
        let mut assets = InMemoryAssetLedger::new();
        assets.grant_minter(address(CONTRACT));
        let mut resumed = VoucherMinter::resume(config(None), access, ledger, assets).unwrap();

        let err = resumed.mint(&address(USER), &signed, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, MintgateError::NonceConsumed(_)));
        assert!(resumed.is_trusted_signer(&signer_address(OPERATOR)));
    }

    #[test]
    fn invalid_config_refused() {
        let mut bad = config(None);
        bad.domain.name.clear();
        let result = VoucherMinter::deploy(bad, address(ADMIN), InMemoryAssetLedger::new());
        assert!(matches!(result, Err(MintgateError::Configuration(_))));
    }
}
