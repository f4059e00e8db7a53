// Remove Keepers Instruction
//
// Donor revokes keepers. Takes effect for every later instruction;
// keepers that were never authorized are skipped.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct RemoveKeepers<'info> {
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
        mut,
        seeds = [DONOR_SEED, pool_state.key().as_ref(), donor.key().as_ref()],
        bump = donor_account.bump,
    )]
    pub donor_account: Box<Account<'info, DonorAccount>>,
}

impl<'info> RemoveKeepers<'info> {
    pub fn remove_keepers(&mut self, keepers: Vec<Pubkey>) -> Result<()> {
        self.pool_state.assert_active()?;
        require!(!keepers.is_empty(), PoolError::EmptyKeeperSet);

        let keeper_count_before = self.donor_account.keeper_count;
        let removed_keepers: Vec<Pubkey> = keepers
            .into_iter()
            .filter(|keeper| self.donor_account.remove_keeper(keeper))
            .collect();

        msg!(
            "Donor {} removed {} keepers",
            self.donor.key(),
            removed_keepers.len()
        );

        emit!(RemoveKeepersEvent {
            pool: self.pool_state.key(),
            donor: self.donor.key(),
            removed_keepers,
            keeper_count_before,
            keeper_count_after: self.donor_account.keeper_count,
        });

        Ok(())
    }
}
