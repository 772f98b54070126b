//! Constant-Product Pool Engine
//!
//! This library implements a two-asset constant-product market maker: swap
//! pricing, liquidity share mint/burn math, and the reserve/invariant
//! bookkeeping that ties them together. Asset transfers, claim-token supply,
//! and event delivery are consumed through the collaborator traits in
//! `ledger` and `events`, so the engine can be hosted inside any larger
//! ledger or service.

pub mod swap;
pub mod liquidity;
pub mod state;
pub mod errors;
pub mod utils;
pub mod ledger;
pub mod events;
pub mod pool;
// Re-export types for convenience
pub use swap::swap_output;
pub use liquidity::{initial_liquidity, liquidity_for_deposit, amounts_for_liquidity};
pub use state::{DepositResult, WithdrawResult};
pub use errors::ErrorCode;
pub use ledger::{AssetLedger, ClaimLedger, InMemoryAssetLedger, InMemoryClaimLedger};
pub use events::{EventSink, InMemoryEventSink, PoolEvent};
pub use pool::Pool;
pub use utils::*;
