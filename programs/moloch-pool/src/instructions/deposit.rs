// Deposit Instruction
//
// Syncs to the declared index, then mints shares at the fresh price:
// shares = token_amount * total_shares / treasury_value (floored)
// The donor account is created on first deposit.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, instructions::sync_pool, state::*};

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

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

    #[account(
        init_if_needed,
        payer = donor,
        space = ANCHOR_DISCRIMINATOR + DonorAccount::INIT_SPACE,
        seeds = [DONOR_SEED, pool_state.key().as_ref(), donor.key().as_ref()],
        bump
    )]
    pub donor_account: Box<Account<'info, DonorAccount>>,

    /// CHECK: Validated by the treasury oracle
    pub dao_state: UncheckedAccount<'info>,

    #[account(
        mut,
        token::authority = donor,
        constraint = donor_token_account.mint == pool_state.approved_mint @ PoolError::InvalidTokenMint,
    )]
    pub donor_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.vault @ PoolError::OracleUnavailable,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> DepositTokens<'info> {
    pub fn deposit(
        &mut self,
        token_amount: u64,
        target_index: u64,
        bumps: &DepositTokensBumps,
    ) -> Result<u128> {
        let pool_key = self.pool_state.key();
        let donor = self.donor.key();

        let synced = sync_pool(
            pool_key,
            &mut self.pool_state,
            &self.dao_state.to_account_info(),
            &self.vault.to_account_info(),
            target_index,
        )?;

        if !self.donor_account.is_initialized() {
            self.donor_account
                .initialize(pool_key, donor, bumps.donor_account);
        }

        let (shares_minted, movement) = self
            .pool_state
            .deposit(&mut self.donor_account, token_amount)?;

        let treasury_value_before = synced.current_value;
        let treasury_value_after = synced.value_after_inflow(token_amount)?;

        transfer_tokens(
            token_amount,
            &self.token_program.to_account_info(),
            &self.donor_token_account.to_account_info(),
            &self.vault.to_account_info(),
            &self.donor.to_account_info(),
        )?;

        emit!(SharesMintedEvent::new(pool_key, donor, shares_minted, &movement));
        emit!(DepositEvent {
            pool: pool_key,
            donor,
            shares_minted,
            tokens_deposited: token_amount,
            treasury_value_before,
            treasury_value_after,
        });

        msg!("Deposited: {} tokens -> {} shares", token_amount, shares_minted);

        Ok(shares_minted)
    }
}
