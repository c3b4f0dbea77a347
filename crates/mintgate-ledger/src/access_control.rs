//! Capability-set access control.
//!
//! Each role maps to the set of principals holding it. Privileged entry
//! points call [`AccessControl::require`] before doing anything else.
//! `Admin` administers every role; there is no inheritance between roles.

use std::collections::{BTreeSet, HashMap};

use mintgate_types::{Address, MintgateError, Result, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AccessControl {
    members: HashMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    /// Empty role table with `admin` holding [`Role::Admin`].
    #[must_use]
    pub fn with_admin(admin: Address) -> Self {
        let mut access = Self::default();
        access.insert(Role::Admin, admin);
        access
    }

    #[must_use]
    pub fn has_role(&self, role: Role, principal: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(principal))
    }

    /// # Errors
    /// Returns [`MintgateError::Unauthorized`] if `principal` lacks `role`.
    pub fn require(&self, role: Role, principal: &Address) -> Result<()> {
        if self.has_role(role, principal) {
            Ok(())
        } else {
            Err(MintgateError::Unauthorized {
                principal: *principal,
                role,
            })
        }
    }

    /// Grant `role` to `account`. Returns `false` if it was already held.
    pub fn grant_role(&mut self, caller: &Address, role: Role, account: Address) -> Result<bool> {
        self.require(Role::Admin, caller)?;
        let granted = self.insert(role, account);
        if granted {
            tracing::info!(%role, %account, %caller, "Role granted");
        }
        Ok(granted)
    }

    /// Revoke `role` from `account`. Returns `false` if it was not held.
    pub fn revoke_role(&mut self, caller: &Address, role: Role, account: &Address) -> Result<bool> {
        self.require(Role::Admin, caller)?;
        let revoked = self.remove(role, account);
        if revoked {
            tracing::info!(%role, %account, %caller, "Role revoked");
        }
        Ok(revoked)
    }

    /// Drop a role the caller holds itself.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.remove(role, caller)
    }

    /// Holders of `role`, in address order.
    #[must_use]
    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    fn remove(&mut self, role: Role, account: &Address) -> bool {
        self.members
            .get_mut(&role)
            .is_some_and(|set| set.remove(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 32])
    }

    #[test]
    fn admin_can_grant_and_revoke() {
        let admin = addr(1);
        let mut access = AccessControl::with_admin(admin);
        assert!(access.grant_role(&admin, Role::TrustedSigner, addr(2)).unwrap());
        assert!(access.has_role(Role::TrustedSigner, &addr(2)));
        assert!(access.revoke_role(&admin, Role::TrustedSigner, &addr(2)).unwrap());
        assert!(!access.has_role(Role::TrustedSigner, &addr(2)));
    }

    #[test]
    fn regrant_and_double_revoke_are_noops() {
        let admin = addr(1);
        let mut access = AccessControl::with_admin(admin);
        assert!(access.grant_role(&admin, Role::Manager, addr(2)).unwrap());
        assert!(!access.grant_role(&admin, Role::Manager, addr(2)).unwrap());
        assert!(access.revoke_role(&admin, Role::Manager, &addr(2)).unwrap());
        assert!(!access.revoke_role(&admin, Role::Manager, &addr(2)).unwrap());
    }

    #[test]
    fn non_admin_cannot_grant() {
        let mut access = AccessControl::with_admin(addr(1));
        let err = access
            .grant_role(&addr(9), Role::TrustedSigner, addr(9))
            .unwrap_err();
        assert!(matches!(
            err,
            MintgateError::Unauthorized {
                role: Role::Admin,
                ..
            }
        ));
        assert!(!access.has_role(Role::TrustedSigner, &addr(9)));
    }

    #[test]
    fn roles_do_not_imply_each_other() {
        let admin = addr(1);
        let access = AccessControl::with_admin(admin);
        assert!(!access.has_role(Role::TrustedSigner, &admin));
        assert!(!access.has_role(Role::Manager, &admin));
    }

    #[test]
    fn renounce_drops_own_role() {
        let admin = addr(1);
        let mut access = AccessControl::with_admin(admin);
        access.grant_role(&admin, Role::TrustedSigner, addr(2)).unwrap();
        assert!(access.renounce_role(&addr(2), Role::TrustedSigner));
        assert!(access.members(Role::TrustedSigner).is_empty());
    }

    #[test]
    fn members_sorted() {
        let admin = addr(1);
        let mut access = AccessControl::with_admin(admin);
        access.grant_role(&admin, Role::TrustedSigner, addr(5)).unwrap();
        access.grant_role(&admin, Role::TrustedSigner, addr(3)).unwrap();
        assert_eq!(access.members(Role::TrustedSigner), vec![addr(3), addr(5)]);
    }
}
