use crate::error::Error;
use crate::types::{AccountId, Direction, OrderKey, PairAsset};

/// Net result of a venue swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    /// Amount of the input asset the venue actually took.
    pub amount_paid: u64,
    /// Amount of the output asset credited to the engine.
    pub amount_received: u64,
}

/// Custody collaborator: moves asset balances between the initiator and the
/// engine's escrow. A failure aborts the lifecycle operation that issued the
/// transfer; no order state is persisted in that case.
pub trait Custody: Sync {
    fn transfer_in(
        &self,
        key: &OrderKey,
        asset: PairAsset,
        from: &AccountId,
        amount: u64,
    ) -> Result<(), Error>;

    fn transfer_out(
        &self,
        key: &OrderKey,
        asset: PairAsset,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), Error>;
}

/// Venue collaborator: executes a directional swap of `amount_in` of the
/// direction's input asset and reports the net balance changes. Called only
/// from the execution/catch-up path, under the order's per-key lock, so the
/// engine never issues overlapping swaps for one key.
pub trait VenueAdapter: Sync {
    fn swap(
        &self,
        key: &OrderKey,
        direction: Direction,
        amount_in: u64,
    ) -> Result<SwapReceipt, Error>;
}
