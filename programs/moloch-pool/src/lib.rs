// Moloch Pool Program
//
// Pooled donation vault beside a Moloch-style DAO. Donors deposit the approved
// token and receive shares priced against the treasury value; the pool
// re-reads that value only when synced to a proposal index the DAO has
// already processed. Donors may delegate withdrawals to keepers.
//
// Instructions:
// - initialize_pool: Create pool state and vault for a DAO / token pair
// - activate: Seed initial tokens and shares (one-way)
// - sync_to: Advance the checkpoint and re-read the treasury value
// - deposit / withdraw: Mint or burn shares at the freshly synced price
// - keeper_withdraw: Burn a donor's shares and pay a chosen recipient
// - add_keepers / remove_keepers: Manage delegated withdrawal rights
// - total_shares, shares_of, balance_of, share_price, last_synced_index,
//   is_authorized: Read-only queries returned as return data

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod oracle;
pub mod state;

use instructions::*;
pub use state::SharePrice;

declare_id!("22giZwAFyjhCPns5uybbdnY5yH46BGQs5ogVMXdaVJxk");

#[program]
pub mod moloch_pool {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>, withdrawal_fee_bps: u16) -> Result<()> {
        ctx.accounts.initialize_pool(withdrawal_fee_bps, &ctx.bumps)
    }

    pub fn activate(
        ctx: Context<Activate>,
        initial_tokens: u64,
        initial_pool_shares: u128,
    ) -> Result<()> {
        ctx.accounts
            .activate(initial_tokens, initial_pool_shares, &ctx.bumps)
    }

    pub fn sync_to(ctx: Context<SyncTo>, target_index: u64) -> Result<()> {
        ctx.accounts.sync_to(target_index)
    }

    // Returns shares minted
    pub fn deposit(ctx: Context<DepositTokens>, token_amount: u64, target_index: u64) -> Result<u128> {
        ctx.accounts.deposit(token_amount, target_index, &ctx.bumps)
    }

    // Returns tokens paid to the donor
    pub fn withdraw(ctx: Context<WithdrawShares>, shares_to_burn: u128, target_index: u64) -> Result<u64> {
        ctx.accounts.withdraw(shares_to_burn, target_index)
    }

    // Returns tokens paid to the recipient
    pub fn keeper_withdraw(
        ctx: Context<KeeperWithdrawShares>,
        shares_to_burn: u128,
        target_index: u64,
    ) -> Result<u64> {
        ctx.accounts.keeper_withdraw(shares_to_burn, target_index)
    }

    pub fn add_keepers(ctx: Context<AddKeepers>, keepers: Vec<Pubkey>) -> Result<()> {
        ctx.accounts.add_keepers(keepers, &ctx.bumps)
    }

    pub fn remove_keepers(ctx: Context<RemoveKeepers>, keepers: Vec<Pubkey>) -> Result<()> {
        ctx.accounts.remove_keepers(keepers)
    }

    pub fn total_shares(ctx: Context<PoolView>) -> Result<u128> {
        Ok(ctx.accounts.total_shares())
    }

    pub fn share_price(ctx: Context<PoolView>) -> Result<SharePrice> {
        Ok(ctx.accounts.share_price())
    }

    pub fn last_synced_index(ctx: Context<PoolView>) -> Result<u64> {
        Ok(ctx.accounts.last_synced_index())
    }

    pub fn shares_of(ctx: Context<DonorView>) -> Result<u128> {
        Ok(ctx.accounts.shares_of())
    }

    pub fn balance_of(ctx: Context<DonorView>) -> Result<u64> {
        ctx.accounts.balance_of()
    }

    pub fn is_authorized(ctx: Context<DonorView>, keeper: Pubkey) -> Result<bool> {
        Ok(ctx.accounts.is_authorized(&keeper))
    }
}
