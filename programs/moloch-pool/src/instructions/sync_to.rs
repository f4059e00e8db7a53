// Sync Instruction
//
// Moves the pool checkpoint forward to a caller-declared proposal index and
// re-reads the treasury value. Deposit, withdraw and keeper_withdraw run the
// same step first through `sync_pool`.

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{constants::*, errors::*, events::*, oracle, state::*};

#[derive(Accounts)]
pub struct SyncTo<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [
            POOL_SEED,
            pool_state.dao.as_ref(),
            pool_state.approved_mint.as_ref(),
        ],
        bump = pool_state.pool_bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// CHECK: Validated by the treasury oracle
    pub dao_state: UncheckedAccount<'info>,

    #[account(address = pool_state.vault @ PoolError::OracleUnavailable)]
    pub vault: Box<Account<'info, TokenAccount>>,
}

impl<'info> SyncTo<'info> {
    pub fn sync_to(&mut self, target_index: u64) -> Result<()> {
        let pool_key = self.pool_state.key();

        sync_pool(
            pool_key,
            &mut self.pool_state,
            &self.dao_state.to_account_info(),
            &self.vault.to_account_info(),
            target_index,
        )?;

        Ok(())
    }
}

// Oracle read + checkpoint update, shared by every price-sensitive instruction
pub fn sync_pool<'info>(
    pool_key: Pubkey,
    pool: &mut PoolState,
    dao_state: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    target_index: u64,
) -> Result<SyncOutcome> {
    pool.assert_active()?;
    pool.assert_sync_target(target_index)?;

    let reading = oracle::read_treasury(pool, dao_state, vault)?;
    let outcome = pool.sync_to(target_index, reading)?;

    emit!(SyncEvent {
        pool: pool_key,
        previous_index: outcome.previous_index,
        current_index: outcome.current_index,
        previous_treasury_value: outcome.previous_value,
        current_treasury_value: outcome.current_value,
    });

    msg!(
        "Synced to index {}: treasury {} -> {}",
        outcome.current_index,
        outcome.previous_value,
        outcome.current_value
    );

    Ok(outcome)
}
