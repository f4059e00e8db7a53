// Keeper Withdraw Instruction
//
// A keeper burns shares on behalf of a donor and sends the proceeds to any
// token account of the approved mint (custodial or automated payouts).
//
// SECURITY CHECKS
// 1. Donor account PDA is derived from the donor key, so the keeper can only
//    touch the shares of the donor it names
// 2. The signer must be in that donor's keeper set at execution time
// 3. Burn is bounded by the donor's own shares, never the keeper's

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, helpers::*, instructions::sync_pool, state::*};

#[derive(Accounts)]
pub struct KeeperWithdrawShares<'info> {
    pub keeper: Signer<'info>,

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

    /// CHECK: Donor identity, only used to derive the donor account
    pub donor: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [DONOR_SEED, pool_state.key().as_ref(), donor.key().as_ref()],
        bump = donor_account.bump,
    )]
    pub donor_account: Box<Account<'info, DonorAccount>>,

    /// CHECK: Validated by the treasury oracle
    pub dao_state: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = recipient_token_account.mint == pool_state.approved_mint @ PoolError::InvalidTokenMint,
    )]
    pub recipient_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = pool_state.vault @ PoolError::OracleUnavailable,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> KeeperWithdrawShares<'info> {
    pub fn keeper_withdraw(&mut self, shares_to_burn: u128, target_index: u64) -> Result<u64> {
        let pool_key = self.pool_state.key();
        let donor = self.donor.key();
        let keeper = self.keeper.key();

        let synced = sync_pool(
            pool_key,
            &mut self.pool_state,
            &self.dao_state.to_account_info(),
            &self.vault.to_account_info(),
            target_index,
        )?;

        require!(
            self.donor_account.is_authorized(&keeper),
            PoolError::UnauthorizedKeeper
        );

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
                &self.recipient_token_account.to_account_info(),
                &self.pool_authority.to_account_info(),
                authority_seeds,
            )?;
        }

        let recipient = self.recipient_token_account.owner;

        emit!(SharesBurnedEvent::new(pool_key, donor, shares_to_burn, &movement));
        emit!(KeeperWithdrawEvent {
            pool: pool_key,
            donor,
            keeper,
            recipient,
            shares_burned: shares_to_burn,
            tokens_withdrawn,
            fee_retained,
            treasury_value_before,
            treasury_value_after,
        });

        msg!(
            "Keeper {} withdrew {} shares of {} -> {} tokens to {}",
            keeper,
            shares_to_burn,
            donor,
            tokens_withdrawn,
            recipient
        );

        Ok(tokens_withdrawn)
    }
}
