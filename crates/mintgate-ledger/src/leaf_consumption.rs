//! Per-leaf cumulative consumption: enforces allowlist quotas.
//!
//! Invariant, for every leaf key `k` and the cap `C` proven for it:
//! ```text
//! consumed[k] ≤ C
//! ```
//! A request is admitted only if `consumed[k] + requested ≤ C`. The check is
//! cumulative, so a request that is small enough on its own still fails once
//! earlier mints have used up the budget.

use std::collections::HashMap;

use mintgate_types::{LeafKey, MintgateError, Result};
use serde::{Deserialize, Serialize};

/// Mapping leaf key → units minted so far.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LeafConsumption {
    consumed: HashMap<LeafKey, u64>,
}

impl LeafConsumption {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units already minted against `key`. Zero for unseen leaves.
    #[must_use]
    pub fn consumed(&self, key: &LeafKey) -> u64 {
        self.consumed.get(key).copied().unwrap_or(0)
    }

    /// The total `key` would reach after minting `requested`, if within `cap`.
    ///
    /// # Errors
    /// Returns [`MintgateError::QuotaExceeded`] if the total would exceed `cap`
    /// (or overflow).
    pub fn check(&self, key: &LeafKey, requested: u64, cap: u64) -> Result<u64> {
        let consumed = self.consumed(key);
        match consumed.checked_add(requested) {
            Some(total) if total <= cap => Ok(total),
            _ => Err(MintgateError::QuotaExceeded {
                leaf_key: *key,
                consumed,
                requested,
                cap,
            }),
        }
    }

    /// Add `requested` to the leaf's running total. Returns the new total.
    pub fn consume(&mut self, key: LeafKey, requested: u64, cap: u64) -> Result<u64> {
        let total = self.check(&key, requested, cap)?;
        if requested > 0 {
            self.consumed.insert(key, total);
        }
        Ok(total)
    }

    /// Undo a consumption recorded by the aborting transaction.
    pub(crate) fn revert(&mut self, key: &LeafKey, quantity: u64) {
        if let Some(total) = self.consumed.get_mut(key) {
            *total = total.saturating_sub(quantity);
            if *total == 0 {
                self.consumed.remove(key);
            }
        }
    }

    /// Number of leaves that have minted at least once.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
