//! The minting gateway: the external asset ledger a minter mints into.
//!
//! Minters only ever call [`AssetLedger::mint`], passing their own contract
//! address as the minter. The asset ledger decides whether that address may
//! mint; a refusal aborts the whole request.

use std::collections::{HashMap, HashSet};

use mintgate_types::{Address, ItemId, MintgateError, Result};

/// Anything a minter can mint into.
pub trait AssetLedger {
    /// Create `quantity` units of `item` for `recipient`.
    ///
    /// `item` is `None` when the ledger assigns the item itself (sequential
    /// collections).
    ///
    /// # Errors
    /// [`MintgateError::MintRejected`] if `minter` is not permitted or the
    /// ledger cannot record the units.
    fn mint(&mut self, minter: &Address, recipient: &Address, item: Option<ItemId>, quantity: u64) -> Result<()>;
}

/// A reference asset ledger with a minter allowlist and per-item balances.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssetLedger {
    minters: HashSet<Address>,
    balances: HashMap<(Address, Option<ItemId>), u64>,
    supply: HashMap<Option<ItemId>, u64>,
}

impl InMemoryAssetLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit `minter` to mint.
    pub fn grant_minter(&mut self, minter: Address) {
        self.minters.insert(minter);
    }

    pub fn revoke_minter(&mut self, minter: &Address) {
        self.minters.remove(minter);
    }

    #[must_use]
    pub fn is_minter(&self, minter: &Address) -> bool {
        self.minters.contains(minter)
    }

    #[must_use]
    pub fn balance_of(&self, holder: &Address, item: Option<ItemId>) -> u64 {
        self.balances.get(&(*holder, item)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_supply(&self, item: Option<ItemId>) -> u64 {
        self.supply.get(&item).copied().unwrap_or(0)
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn mint(&mut self, minter: &Address, recipient: &Address, item: Option<ItemId>, quantity: u64) -> Result<()> {
        if !self.minters.contains(minter) {
            return Err(MintgateError::MintRejected {
                reason: format!("{minter} is not a minter"),
            });
        }

        let balance = self.balance_of(recipient, item);
        let supply = self.total_supply(item);
        let (Some(new_balance), Some(new_supply)) =
            (balance.checked_add(quantity), supply.checked_add(quantity))
        else {
            return Err(MintgateError::MintRejected {
                reason: "supply overflow".into(),
            });
        };

        self.balances.insert((*recipient, item), new_balance);
        self.supply.insert(item, new_supply);
        Ok(())
    }
}
