// Pool events
//
// Emitted after every successful state change for off-chain indexers.
// Quantities are the literal values before and after the change.
// treasury_value_before is the value read by the sync that priced the
// operation; treasury_value_after is the vault holding once the transfer
// lands, which the next sync records.

use anchor_lang::prelude::*;

use crate::state::ShareMovement;

#[event]
pub struct PoolActivatedEvent {
    pub pool: Pubkey,
    pub activator: Pubkey,
    pub initial_tokens: u64,
    pub initial_pool_shares: u128,
    pub synced_index: u64,
}

#[event]
pub struct SyncEvent {
    pub pool: Pubkey,
    pub previous_index: u64,
    pub current_index: u64,
    pub previous_treasury_value: u64,
    pub current_treasury_value: u64,
}

#[event]
pub struct DepositEvent {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub shares_minted: u128,
    pub tokens_deposited: u64,
    pub treasury_value_before: u64,
    pub treasury_value_after: u64,
}

#[event]
pub struct WithdrawEvent {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub shares_burned: u128,
    pub tokens_withdrawn: u64,
    pub fee_retained: u64,
    pub treasury_value_before: u64,
    pub treasury_value_after: u64,
}

#[event]
pub struct KeeperWithdrawEvent {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub keeper: Pubkey,
    pub recipient: Pubkey,
    pub shares_burned: u128,
    pub tokens_withdrawn: u64,
    pub fee_retained: u64,
    pub treasury_value_before: u64,
    pub treasury_value_after: u64,
}

#[event]
pub struct SharesMintedEvent {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub shares_to_mint: u128,
    pub donor_shares_before: u128,
    pub donor_shares_after: u128,
    pub total_pool_shares_before: u128,
    pub total_pool_shares_after: u128,
}

#[event]
pub struct SharesBurnedEvent {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub shares_to_burn: u128,
    pub donor_shares_before: u128,
    pub donor_shares_after: u128,
    pub total_pool_shares_before: u128,
    pub total_pool_shares_after: u128,
}

#[event]
pub struct AddKeepersEvent {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub added_keepers: Vec<Pubkey>,
    pub keeper_count_before: u8,
    pub keeper_count_after: u8,
}

#[event]
pub struct RemoveKeepersEvent {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub removed_keepers: Vec<Pubkey>,
    pub keeper_count_before: u8,
    pub keeper_count_after: u8,
}

impl SharesMintedEvent {
    pub fn new(pool: Pubkey, recipient: Pubkey, shares: u128, movement: &ShareMovement) -> Self {
        SharesMintedEvent {
            pool,
            recipient,
            shares_to_mint: shares,
            donor_shares_before: movement.donor_shares_before,
            donor_shares_after: movement.donor_shares_after,
            total_pool_shares_before: movement.total_shares_before,
            total_pool_shares_after: movement.total_shares_after,
        }
    }
}

impl SharesBurnedEvent {
    pub fn new(pool: Pubkey, recipient: Pubkey, shares: u128, movement: &ShareMovement) -> Self {
        SharesBurnedEvent {
            pool,
            recipient,
            shares_to_burn: shares,
            donor_shares_before: movement.donor_shares_before,
            donor_shares_after: movement.donor_shares_after,
            total_pool_shares_before: movement.total_shares_before,
            total_pool_shares_after: movement.total_shares_after,
        }
    }
}
