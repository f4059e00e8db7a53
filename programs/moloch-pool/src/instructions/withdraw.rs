// Withdraw Instruction
//
// Syncs to the declared index, burns the donor's shares and pays
// floor(shares * treasury_value / total_shares), minus the withdrawal fee,
// to the donor's own token account.
// The donor account PDA is derived from the signer, so only the donor can
// burn its shares here. Delegated withdrawals go through keeper_withdraw.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, helpers::*, instructions::sync_pool, state::*};

#[derive(Accounts)]
pub struct WithdrawShares<'info> {
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

    /// CHECK: PDA signer
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool_state.key().as_ref()],
        bump = pool_state.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [DONOR_SEED, pool_state.key().as_ref(), donor.key().as_ref()],
        bump = donor_account.bump,
    )]
    pub donor_account: Box<Account<'info, DonorAccount>>,

    /// CHECK: Validated by the treasury oracle
    pub dao_state: UncheckedAccount<'info>,

    #[account(address = pool_state.approved_mint @ PoolError::InvalidTokenMint)]
    pub approved_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = donor,
        associated_token::mint = approved_mint,
        associated_token::authority = donor,
    )]
    pub donor_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.vault @ PoolError::OracleUnavailable,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> WithdrawShares<'info> {
    pub fn withdraw(&mut self, shares_to_burn: u128, target_index: u64) -> Result<u64> {
        let pool_key = self.pool_state.key();
        let donor = self.donor.key();

        let synced = sync_pool(
            pool_key,
            &mut self.pool_state,
            &self.dao_state.to_account_info(),
            &self.vault.to_account_info(),
            target_index,
        )?;

        let (tokens_withdrawn, fee_retained, movement) = self
            .pool_state
            .withdraw(&mut self.donor_account, shares_to_burn)?;

        require!(
            self.vault.amount >= tokens_withdrawn,
            PoolError::InsufficientPoolLiquidity
        );

        let treasury_value_before = synced.current_value;
        let treasury_value_after = synced.value_after_outflow(tokens_withdrawn)?;

        if tokens_withdrawn > 0 {
            let authority_seeds = &[
                POOL_AUTHORITY_SEED,
                pool_key.as_ref(),
                &[self.pool_state.authority_bump],
            ];

            transfer_from_vault(
                tokens_withdrawn,
                &self.token_program.to_account_info(),
                &self.vault.to_account_info(),
                &self.donor_token_account.to_account_info(),
                &self.pool_authority.to_account_info(),
                authority_seeds,
            )?;
        }

        emit!(SharesBurnedEvent::new(pool_key, donor, shares_to_burn, &movement));
        emit!(WithdrawEvent {
            pool: pool_key,
            donor,
            shares_burned: shares_to_burn,
            tokens_withdrawn,
            fee_retained,
            treasury_value_before,
            treasury_value_after,
        });

        msg!("Withdrawn: {} shares -> {} tokens", shares_to_burn, tokens_withdrawn);

        Ok(tokens_withdrawn)
    }
}
