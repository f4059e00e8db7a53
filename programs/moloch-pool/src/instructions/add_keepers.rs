// Add Keepers Instruction
//
// Donor grants withdrawal rights to keeper addresses.
// Already-authorized keepers are skipped; the event lists only new entries.

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(Accounts)]
pub struct AddKeepers<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

    // Writable so keeper changes serialize with every other pool mutation
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

    pub system_program: Program<'info, System>,
}

impl<'info> AddKeepers<'info> {
    pub fn add_keepers(&mut self, keepers: Vec<Pubkey>, bumps: &AddKeepersBumps) -> Result<()> {
        self.pool_state.assert_active()?;
        require!(!keepers.is_empty(), PoolError::EmptyKeeperSet);

        let pool_key = self.pool_state.key();
        let donor = self.donor.key();

        if !self.donor_account.is_initialized() {
            self.donor_account
                .initialize(pool_key, donor, bumps.donor_account);
        }

        let keeper_count_before = self.donor_account.keeper_count;
        let mut added_keepers = Vec::with_capacity(keepers.len());

        for keeper in keepers {
            if self.donor_account.add_keeper(keeper)? {
                added_keepers.push(keeper);
            }
        }

        msg!("Donor {} added {} keepers", donor, added_keepers.len());

        emit!(AddKeepersEvent {
            pool: pool_key,
            donor,
            added_keepers,
            keeper_count_before,
            keeper_count_after: self.donor_account.keeper_count,
        });

        Ok(())
    }
}
