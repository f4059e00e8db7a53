// Initialize Pool Instruction
//
// Creates the pool for one approved token beside one DAO, plus the vault
// token account owned by the pool authority PDA.
// The pool starts Uninitialized; `activate` seeds shares and tokens.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, oracle::parse_processed_index, state::*};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    pub approved_mint: Box<Account<'info, Mint>>,

    /// CHECK: External DAO state. Owner and layout are validated by the oracle on every read
    pub dao_state: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        space = ANCHOR_DISCRIMINATOR + PoolState::INIT_SPACE,
        seeds = [
            POOL_SEED,
            dao_state.key().as_ref(),
            approved_mint.key().as_ref(),
        ],
        bump
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    /// CHECK: PDA signer for vault operations
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool_state.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = approved_mint,
        associated_token::authority = pool_authority,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializePool<'info> {
    pub fn initialize_pool(
        &mut self,
        withdrawal_fee_bps: u16,
        bumps: &InitializePoolBumps,
    ) -> Result<()> {
        require!(
            withdrawal_fee_bps <= MAX_WITHDRAWAL_FEE_BPS,
            PoolError::FeeTooHigh
        );

        // The DAO account must already expose a readable header
        let processed_index = {
            let data = self
                .dao_state
                .try_borrow_data()
                .map_err(|_| error!(PoolError::OracleUnavailable))?;
            parse_processed_index(&data).ok_or(PoolError::OracleUnavailable)?
        };

        self.pool_state.set_inner(PoolState {
            authority: self.authority.key(),
            approved_mint: self.approved_mint.key(),
            dao: self.dao_state.key(),
            dao_program: *self.dao_state.owner,
            vault: self.vault.key(),
            status: PoolStatus::Uninitialized,
            total_shares: 0,
            treasury_value: 0,
            synced_index: 0,
            withdrawal_fee_bps,
            pool_bump: bumps.pool_state,
            authority_bump: bumps.pool_authority,
        });

        msg!(
            "Pool initialized: mint {} / dao {}",
            self.approved_mint.key(),
            self.dao_state.key()
        );
        msg!(
            "DAO processed index: {}, withdrawal fee: {} bps",
            processed_index,
            withdrawal_fee_bps
        );

        Ok(())
    }
}
