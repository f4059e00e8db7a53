// Read-only queries
//
// Answers are returned as instruction return data, so clients read them with
// a simulated transaction. Pool state is loaded read-only and never mutated.
// A donor without an account reads as zero shares and no keepers.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [
            POOL_SEED,
            pool_state.dao.as_ref(),
            pool_state.approved_mint.as_ref(),
        ],
        bump = pool_state.pool_bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,
}

impl<'info> PoolView<'info> {
    pub fn total_shares(&self) -> u128 {
        self.pool_state.total_shares
    }

    pub fn share_price(&self) -> SharePrice {
        self.pool_state.share_price()
    }

    pub fn last_synced_index(&self) -> u64 {
        self.pool_state.synced_index
    }
}

#[derive(Accounts)]
pub struct DonorView<'info> {
    #[account(
        seeds = [
            POOL_SEED,
            pool_state.dao.as_ref(),
            pool_state.approved_mint.as_ref(),
        ],
        bump = pool_state.pool_bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// CHECK: Donor identity, only used to derive the donor account
    pub donor: UncheckedAccount<'info>,

    #[account(
        seeds = [DONOR_SEED, pool_state.key().as_ref(), donor.key().as_ref()],
        bump,
    )]
    pub donor_account: Option<Account<'info, DonorAccount>>,
}

impl<'info> DonorView<'info> {
    pub fn shares_of(&self) -> u128 {
        self.donor_account
            .as_ref()
            .map(|account| account.shares)
            .unwrap_or(0)
    }

    pub fn balance_of(&self) -> Result<u64> {
        self.pool_state.balance_of(self.shares_of())
    }

    pub fn is_authorized(&self, keeper: &Pubkey) -> bool {
        self.donor_account
            .as_ref()
            .map(|account| account.is_authorized(keeper))
            .unwrap_or(false)
    }
}
