// Activate Instruction
//
// One-way Uninitialized -> Active transition.
// The pool authority seeds the vault with the initial tokens and receives the
// initial shares, so sum(donor.shares) == total_shares from the first moment.
// The checkpoint starts at the DAO's current processed index.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, oracle, state::*};

#[derive(Accounts)]
pub struct Activate<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [
            POOL_SEED,
            pool_state.dao.as_ref(),
            pool_state.approved_mint.as_ref(),
        ],
        bump = pool_state.pool_bump,
        has_one = authority @ PoolError::UnauthorizedAuthority,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = ANCHOR_DISCRIMINATOR + DonorAccount::INIT_SPACE,
        seeds = [DONOR_SEED, pool_state.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub donor_account: Box<Account<'info, DonorAccount>>,

    /// CHECK: Validated by the treasury oracle
    pub dao_state: UncheckedAccount<'info>,

    #[account(
        mut,
        token::authority = authority,
        constraint = authority_token_account.mint == pool_state.approved_mint @ PoolError::InvalidTokenMint,
    )]
    pub authority_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.vault @ PoolError::OracleUnavailable,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Activate<'info> {
    pub fn activate(
        &mut self,
        initial_tokens: u64,
        initial_pool_shares: u128,
        bumps: &ActivateBumps,
    ) -> Result<()> {
        let pool_key = self.pool_state.key();
        let activator = self.authority.key();

        let processed_index =
            oracle::current_processed_index(&self.pool_state, &self.dao_state.to_account_info())?;

        if !self.donor_account.is_initialized() {
            self.donor_account
                .initialize(pool_key, activator, bumps.donor_account);
        }

        let movement = self.pool_state.activate(
            &mut self.donor_account,
            initial_tokens,
            initial_pool_shares,
            processed_index,
        )?;

        transfer_tokens(
            initial_tokens,
            &self.token_program.to_account_info(),
            &self.authority_token_account.to_account_info(),
            &self.vault.to_account_info(),
            &self.authority.to_account_info(),
        )?;

        emit!(SharesMintedEvent::new(
            pool_key,
            activator,
            initial_pool_shares,
            &movement
        ));
        emit!(PoolActivatedEvent {
            pool: pool_key,
            activator,
            initial_tokens,
            initial_pool_shares,
            synced_index: processed_index,
        });

        msg!(
            "Pool activated: {} tokens -> {} shares at index {}",
            initial_tokens,
            initial_pool_shares,
            processed_index
        );

        Ok(())
    }
}
