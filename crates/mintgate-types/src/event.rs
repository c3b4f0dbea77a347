//! Authorization results and the events emitted for off-chain indexing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, EventId, ItemId};

/// Which credential scheme admitted a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthScheme {
    /// A signed single-use voucher.
    Voucher,
    /// An allowlist leaf with a quantity budget.
    Allowlist,
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Voucher => write!(f, "VOUCHER"),
            Self::Allowlist => write!(f, "ALLOWLIST"),
        }
    }
}

/// What an authorization module admitted: who receives how many units of
/// which item. Returned only after consumption has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    pub recipient: Address,
    /// `None` for allowlist mints, where the asset ledger picks the item.
    pub item_id: Option<ItemId>,
    pub quantity: u64,
}

/// Emitted once per committed mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEvent {
    pub id: EventId,
    pub scheme: AuthScheme,
    pub recipient: Address,
    pub item_id: Option<ItemId>,
    pub quantity: u64,
    /// Value credited to the escrow for this mint.
    pub paid: Decimal,
    pub minted_at: DateTime<Utc>,
}

impl MintEvent {
    #[must_use]
    pub fn new(scheme: AuthScheme, authorization: &Authorization, paid: Decimal) -> Self {
        Self {
            id: EventId::new(),
            scheme,
            recipient: authorization.recipient,
            item_id: authorization.item_id,
            quantity: authorization.quantity,
            paid,
            minted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_display() {
        assert_eq!(AuthScheme::Voucher.to_string(), "VOUCHER");
        assert_eq!(AuthScheme::Allowlist.to_string(), "ALLOWLIST");
    }

    #[test]
    fn event_copies_authorization() {
        let auth = Authorization {
            recipient: Address([4u8; 32]),
            item_id: Some(ItemId(123)),
            quantity: 19,
        };
        let event = MintEvent::new(AuthScheme::Voucher, &auth, Decimal::ZERO);
        assert_eq!(event.recipient, auth.recipient);
        assert_eq!(event.item_id, Some(ItemId(123)));
        assert_eq!(event.quantity, 19);
    }

    #[test]
    fn event_serde_roundtrip() {
        let auth = Authorization {
            recipient: Address([4u8; 32]),
            item_id: None,
            quantity: 2,
        };
        let event = MintEvent::new(AuthScheme::Allowlist, &auth, Decimal::new(246, 2));
        let json = serde_json::to_string(&event).unwrap();
        let back: MintEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
