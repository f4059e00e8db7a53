use anchor_lang::prelude::*;

use crate::{constants::MAX_KEEPERS, errors::*};

// Donor account
// Share balance plus the keepers the donor has delegated withdrawals to.
// Kept after a full withdrawal (shares == 0) so history stays queryable.
#[account]
#[derive(InitSpace)]
pub struct DonorAccount {
    pub pool: Pubkey,
    pub donor: Pubkey,
    pub shares: u128,

    // Number of occupied slots at the front of `keepers`
    pub keeper_count: u8,

    // Unused slots hold Pubkey::default()
    pub keepers: [Pubkey; MAX_KEEPERS],

    pub bump: u8,
}

impl DonorAccount {
    // init_if_needed leaves a zeroed account behind on first use
    pub fn is_initialized(&self) -> bool {
        self.donor != Pubkey::default()
    }

    pub fn initialize(&mut self, pool: Pubkey, donor: Pubkey, bump: u8) {
        self.pool = pool;
        self.donor = donor;
        self.shares = 0;
        self.keeper_count = 0;
        self.keepers = [Pubkey::default(); MAX_KEEPERS];
        self.bump = bump;
    }

    pub fn active_keepers(&self) -> &[Pubkey] {
        &self.keepers[..self.keeper_count as usize]
    }

    pub fn is_authorized(&self, keeper: &Pubkey) -> bool {
        self.active_keepers().iter().any(|k| k == keeper)
    }

    // Returns false if the keeper was already present
    pub fn add_keeper(&mut self, keeper: Pubkey) -> Result<bool> {
        require!(
            keeper != self.donor && keeper != Pubkey::default(),
            PoolError::InvalidKeeper
        );

        if self.is_authorized(&keeper) {
            return Ok(false);
        }

        let slot = self.keeper_count as usize;
        require!(slot < MAX_KEEPERS, PoolError::MaxKeepersReached);

        self.keepers[slot] = keeper;
        self.keeper_count += 1;
        Ok(true)
    }

    // Returns false if the keeper was not present
    pub fn remove_keeper(&mut self, keeper: &Pubkey) -> bool {
        let Some(index) = self.active_keepers().iter().position(|k| k == keeper) else {
            return false;
        };

        // Swap the last active keeper into the freed slot
        let last = self.keeper_count as usize - 1;
        self.keepers[index] = self.keepers[last];
        self.keepers[last] = Pubkey::default();
        self.keeper_count -= 1;
        true
    }
}
