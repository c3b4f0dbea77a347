//! State and administration shared by both minters.

use mintgate_ledger::{AccessControl, MintLedger, ValueTransfer};
use mintgate_types::{Address, MintEvent, Result, Role};
use rust_decimal::Decimal;

/// Roles, the consumption/escrow ledger and the event log of one minter.
#[derive(Debug, Clone)]
pub struct MinterCore {
    pub(crate) access: AccessControl,
    pub(crate) ledger: MintLedger,
    events: Vec<MintEvent>,
}

impl MinterCore {
    /// Fresh deployment: `admin` holds `Admin`, `manager` (if any) is granted
    /// `Manager` by the admin.
    pub(crate) fn deploy(admin: Address, manager: Option<Address>) -> Result<Self> {
        let mut access = AccessControl::with_admin(admin);
        if let Some(manager) = manager {
            access.grant_role(&admin, Role::Manager, manager)?;
        }
        Ok(Self::resume(access, MintLedger::new()))
    }

    /// Continue from previously persisted roles and ledger.
    pub(crate) fn resume(access: AccessControl, ledger: MintLedger) -> Self {
        Self {
            access,
            ledger,
            events: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, event: MintEvent) {
        self.events.push(event);
    }

    pub fn grant_role(&mut self, caller: &Address, role: Role, account: Address) -> Result<bool> {
        self.access.grant_role(caller, role, account)
    }

    pub fn revoke_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<bool> {
        self.access.revoke_role(caller, role, account)
    }

    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.access.renounce_role(caller, role)
    }

    /// Pay `payee`'s escrowed balance out through `sink`.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` holds `Manager`; `TransferFailed` if the
    /// sink refuses, in which case the balance is kept.
    pub fn withdraw(
        &mut self,
        caller: &Address,
        payee: Address,
        sink: &mut dyn ValueTransfer,
    ) -> Result<Decimal> {
        if let Err(err) = self.access.require(Role::Manager, caller) {
            tracing::warn!(code = err.code(), %caller, %payee, "Withdrawal rejected");
            return Err(err);
        }
        self.ledger.withdraw(payee, sink)
    }

    #[must_use]
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    #[must_use]
    pub fn ledger(&self) -> &MintLedger {
        &self.ledger
    }

    #[must_use]
    pub fn payments(&self, payee: &Address) -> Decimal {
        self.ledger.payments(payee)
    }

    /// Mint events in commit order.
    #[must_use]
    pub fn events(&self) -> &[MintEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintgate_ledger::InMemoryWallet;
    use mintgate_types::MintgateError;

    const ADMIN: Address = Address([1u8; 32]);
    const PAYEE: Address = Address([2u8; 32]);

    #[test]
    fn deployment_roles() {
        let core = MinterCore::deploy(ADMIN, Some(PAYEE)).unwrap();
        assert!(core.access().has_role(Role::Admin, &ADMIN));
        assert!(core.access().has_role(Role::Manager, &PAYEE));
        assert!(!core.access().has_role(Role::Manager, &ADMIN));
    }

    #[test]
    fn withdraw_requires_manager() {
        let mut core = MinterCore::deploy(ADMIN, Some(PAYEE)).unwrap();
        let mut wallet = InMemoryWallet::new();
        let err = core.withdraw(&ADMIN, PAYEE, &mut wallet).unwrap_err();
        assert!(matches!(err, MintgateError::Unauthorized { role: Role::Manager, .. }));

        assert_eq!(core.withdraw(&PAYEE, PAYEE, &mut wallet).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn renounced_manager_cannot_withdraw() {
        let mut core = MinterCore::deploy(ADMIN, Some(PAYEE)).unwrap();
        assert!(core.renounce_role(&PAYEE, Role::Manager));
        let mut wallet = InMemoryWallet::new();
        assert!(core.withdraw(&PAYEE, PAYEE, &mut wallet).is_err());
    }
}
