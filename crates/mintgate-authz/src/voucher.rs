//! Voucher authorization module.
//!
//! Admits a [`SignedVoucher`] when:
//! 1. the ed25519 signature over the domain-bound digest verifies against the
//!    claimed signer key, **and** that key holds [`Role::TrustedSigner`]
//!    (otherwise `InvalidSignature`)
//! 2. the nonce has never been consumed (otherwise `NonceConsumed`)
//!
//! On success the nonce is consumed inside the caller's transaction.

use ed25519_dalek::{Signature, VerifyingKey};
use mintgate_ledger::{AccessControl, LedgerTxn};
use mintgate_types::{
    Address, Authorization, Domain, Hash32, MintgateError, Result, Role, SignedVoucher,
};

/// Verifies vouchers for one signing domain.
#[derive(Debug, Clone)]
pub struct VoucherAuthorizer {
    domain: Domain,
    separator: Hash32,
}

impl VoucherAuthorizer {
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        let separator = domain.separator();
        Self { domain, separator }
    }

    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[must_use]
    pub fn domain_separator(&self) -> Hash32 {
        self.separator
    }

    /// Return the voucher's signer if its signature is valid for this domain
    /// and the signer is trusted.
    ///
    /// # Errors
    /// [`MintgateError::InvalidSignature`] in every other case.
    pub fn verify_signer(&self, signed: &SignedVoucher, access: &AccessControl) -> Result<Address> {
        let digest = signed.voucher.digest(&self.separator);
        if !verify_signature(&digest, &signed.signer, &signed.signature) {
            return Err(MintgateError::InvalidSignature);
        }
        if !access.has_role(Role::TrustedSigner, &signed.signer) {
            return Err(MintgateError::InvalidSignature);
        }
        Ok(signed.signer)
    }

    /// Verify the voucher and consume its nonce.
    pub fn authorize(
        &self,
        signed: &SignedVoucher,
        access: &AccessControl,
        txn: &mut LedgerTxn<'_>,
    ) -> Result<Authorization> {
        let signer = self.verify_signer(signed, access)?;
        let voucher = &signed.voucher;
        txn.consume_nonce(voucher.nonce)?;

        tracing::debug!(
            signer = %signer,
            recipient = %voucher.recipient,
            item = %voucher.item_id,
            quantity = voucher.quantity,
            nonce = %voucher.nonce,
            "Voucher authorized"
        );

        Ok(Authorization {
            recipient: voucher.recipient,
            item_id: Some(voucher.item_id),
            quantity: voucher.quantity,
        })
    }
}

/// Strict ed25519 verification of `signature` over `digest` by `signer`.
fn verify_signature(digest: &Hash32, signer: &Address, signature: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(signer.as_bytes()) else {
        return false;
    };
    let Ok(bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    key.verify_strict(digest.as_bytes(), &Signature::from_bytes(&bytes))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintgate_ledger::MintLedger;
    use mintgate_types::fixtures::{address, domain, signer_address, signing_key};
    use mintgate_types::{ItemId, MintVoucher, Nonce};

    const ADMIN: u8 = 1;
    const OPERATOR: u8 = 2;
    const STRANGER: u8 = 3;

    fn setup() -> (VoucherAuthorizer, AccessControl, MintLedger) {
        let admin = address(ADMIN);
        let mut access = AccessControl::with_admin(admin);
        access
            .grant_role(&admin, Role::TrustedSigner, signer_address(OPERATOR))
            .unwrap();
        let authorizer = VoucherAuthorizer::new(domain(address(100)));
        (authorizer, access, MintLedger::new())
    }

    fn voucher(nonce: Nonce) -> MintVoucher {
        MintVoucher {
            recipient: address(50),
            item_id: ItemId(123),
            quantity: 19,
            nonce,
        }
    }

    #[test]
    fn trusted_signer_authorizes() {
        let (authz, access, mut ledger) = setup();
        let signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(OPERATOR));

        let mut txn = ledger.transaction();
        let auth = authz.authorize(&signed, &access, &mut txn).unwrap();
        txn.commit();

        assert_eq!(auth.recipient, address(50));
        assert_eq!(auth.item_id, Some(ItemId(123)));
        assert_eq!(auth.quantity, 19);
        assert!(ledger.is_nonce_consumed(&signed.voucher.nonce));
    }

    #[test]
    fn replay_fails_nonce_consumed() {
        let (authz, access, mut ledger) = setup();
        let signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(OPERATOR));

        let mut txn = ledger.transaction();
        authz.authorize(&signed, &access, &mut txn).unwrap();
        txn.commit();

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::NonceConsumed(_)));
    }

    #[test]
    fn untrusted_signer_rejected() {
        let (authz, access, mut ledger) = setup();
        let signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(STRANGER));

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
        drop(txn);
        assert!(!ledger.is_nonce_consumed(&signed.voucher.nonce));
    }

    #[test]
    fn tampered_quantity_rejected() {
        let (authz, access, mut ledger) = setup();
        let mut signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(OPERATOR));
        signed.voucher.quantity = 1_000;

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn claimed_signer_swap_rejected() {
        // A stranger's signature presented under the trusted operator's key.
        let (authz, access, mut ledger) = setup();
        let mut signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(STRANGER));
        signed.signer = signer_address(OPERATOR);

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn other_deployment_domain_rejected() {
        let (authz, access, mut ledger) = setup();
        let other = domain(address(101));
        let signed = voucher(Nonce::random()).sign(&other, &signing_key(OPERATOR));

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn other_chain_rejected() {
        let (authz, access, mut ledger) = setup();
        let mut other = authz.domain().clone();
        other.chain_id = 1;
        let signed = voucher(Nonce::random()).sign(&other, &signing_key(OPERATOR));

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn malformed_signature_rejected() {
        let (authz, access, mut ledger) = setup();
        let mut signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(OPERATOR));
        signed.signature.truncate(63);

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn signature_checked_before_nonce() {
        // A forged voucher reusing a consumed nonce reports the signature.
        let (authz, access, mut ledger) = setup();
        let nonce = Nonce::random();
        let signed = voucher(nonce).sign(authz.domain(), &signing_key(OPERATOR));
        let mut txn = ledger.transaction();
        authz.authorize(&signed, &access, &mut txn).unwrap();
        txn.commit();

        let forged = voucher(nonce).sign(authz.domain(), &signing_key(STRANGER));
        let mut txn = ledger.transaction();
        let err = authz.authorize(&forged, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }

    #[test]
    fn revoked_signer_rejected() {
        let (authz, mut access, mut ledger) = setup();
        access
            .revoke_role(&address(ADMIN), Role::TrustedSigner, &signer_address(OPERATOR))
            .unwrap();
        let signed = voucher(Nonce::random()).sign(authz.domain(), &signing_key(OPERATOR));

        let mut txn = ledger.transaction();
        let err = authz.authorize(&signed, &access, &mut txn).unwrap_err();
        assert!(matches!(err, MintgateError::InvalidSignature));
    }
}
