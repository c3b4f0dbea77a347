//! # mintgate-ledger
//!
//! **Consumption and escrow state**: everything a minter remembers between
//! requests.
//!
//! ## Architecture
//!
//! 1. **NonceRegistry**: spent voucher nonces, shared by all signers
//! 2. **LeafConsumption**: cumulative units minted per allowlist leaf key
//! 3. **PaymentLedger**: withdrawable balance per payee
//! 4. **EscrowConservation**: `Σ balances == credited - withdrawn`
//! 5. **MintLedger / LedgerTxn**: the above, mutated only inside an
//!    all-or-nothing transaction
//! 6. **AccessControl**: role → principals, checked at privileged entry points
//!
//! ## Request Flow
//!
//! ```text
//! MintLedger.transaction() → consume_nonce | consume_quota → collect_payment
//!     → (asset mint) → commit()      // any error before commit: full rollback
//! ```

pub mod access_control;
pub mod escrow_conservation;
pub mod leaf_consumption;
pub mod ledger;
pub mod nonce_registry;
pub mod payment_ledger;
pub mod transaction;
pub mod transfer;

pub use access_control::AccessControl;
pub use escrow_conservation::EscrowConservation;
pub use leaf_consumption::LeafConsumption;
pub use ledger::MintLedger;
pub use nonce_registry::NonceRegistry;
pub use payment_ledger::PaymentLedger;
pub use transaction::LedgerTxn;
pub use transfer::{InMemoryWallet, ValueTransfer};
