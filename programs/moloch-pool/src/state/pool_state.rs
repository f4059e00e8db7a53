// Pool State
//
// Global ledger counters plus the sync checkpoint. Share balances of
// individual donors live in DonorAccount; mint_shares / burn_shares keep both
// sides in step so that sum(donor.shares) == total_shares.

use anchor_lang::prelude::*;
#[allow(unused_imports)]
use anchor_lang::prelude::borsh;

use crate::{errors::*, helpers::*, oracle::TreasuryReading, state::DonorAccount};

#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace,
)]
pub enum PoolStatus {
    // Created, waiting for the initial tokens and shares
    #[default]
    Uninitialized,
    // Accepting deposits and withdrawals
    Active,
}

// Share price as an exact ratio: treasury_value / total_shares
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct SharePrice {
    pub treasury_value: u64,
    pub total_shares: u128,
}

impl SharePrice {
    pub fn tokens_for(&self, shares: u128) -> Result<u64> {
        calculate_withdrawal(shares, self.treasury_value, self.total_shares)
    }

    // A fully drained pool restarts at one share per token
    pub fn shares_for(&self, tokens: u64) -> Result<u128> {
        if self.total_shares == 0 {
            return Ok(tokens as u128);
        }
        calculate_shares_to_mint(tokens, self.treasury_value, self.total_shares)
    }
}

// Before/after pair recorded by a sync
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    pub previous_index: u64,
    pub current_index: u64,
    pub previous_value: u64,
    pub current_value: u64,
}

impl SyncOutcome {
    // Vault holding once `amount` lands in the vault
    pub fn value_after_inflow(&self, amount: u64) -> Result<u64> {
        self.current_value
            .checked_add(amount)
            .ok_or_else(|| error!(PoolError::Overflow))
    }

    // Vault holding once `amount` leaves the vault
    pub fn value_after_outflow(&self, amount: u64) -> Result<u64> {
        self.current_value
            .checked_sub(amount)
            .ok_or_else(|| error!(PoolError::InsufficientPoolLiquidity))
    }
}

// Before/after pair recorded by a mint or burn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareMovement {
    pub donor_shares_before: u128,
    pub donor_shares_after: u128,
    pub total_shares_before: u128,
    pub total_shares_after: u128,
}

#[account]
#[derive(InitSpace)]
pub struct PoolState {
    // Pool creator, the only signer allowed to activate
    pub authority: Pubkey,

    // The single token accepted by the pool
    pub approved_mint: Pubkey,

    // DAO state account observed for the processed proposal index
    pub dao: Pubkey,

    // Program that must own the DAO state account
    pub dao_program: Pubkey,

    // Token account holding pooled tokens, owned by the pool authority PDA
    pub vault: Pubkey,

    pub status: PoolStatus,

    // Sum of all donor shares
    pub total_shares: u128,

    // Treasury value read by the last sync (or seeded by activate)
    pub treasury_value: u64,

    // Proposal index of the last sync; never decreases
    pub synced_index: u64,

    // Retained on every withdrawal (e.g. 30 = 0.30%)
    pub withdrawal_fee_bps: u16,

    pub pool_bump: u8,
    pub authority_bump: u8,
}

impl PoolState {
    pub fn is_active(&self) -> bool {
        self.status == PoolStatus::Active
    }

    pub fn assert_active(&self) -> Result<()> {
        require!(self.is_active(), PoolError::NotActivated);
        Ok(())
    }

    pub fn share_price(&self) -> SharePrice {
        SharePrice {
            treasury_value: self.treasury_value,
            total_shares: self.total_shares,
        }
    }

    // Value of a share balance, floored
    pub fn balance_of(&self, shares: u128) -> Result<u64> {
        if shares == 0 {
            return Ok(0);
        }
        self.share_price().tokens_for(shares)
    }

    // Uninitialized -> Active, crediting the initial shares to the activator
    pub fn activate(
        &mut self,
        activator: &mut DonorAccount,
        initial_tokens: u64,
        initial_pool_shares: u128,
        processed_index: u64,
    ) -> Result<ShareMovement> {
        require!(!self.is_active(), PoolError::AlreadyActivated);
        require!(initial_tokens > 0, PoolError::ZeroAmount);
        require!(initial_pool_shares > 0, PoolError::ZeroAmount);

        self.status = PoolStatus::Active;
        self.treasury_value = initial_tokens;
        self.synced_index = processed_index;

        self.mint_shares(activator, initial_pool_shares)
    }

    // Checked before the oracle is consulted
    pub fn assert_sync_target(&self, target_index: u64) -> Result<()> {
        require!(
            target_index >= self.synced_index,
            PoolError::StaleOrRegressiveSync
        );
        Ok(())
    }

    // Advance the checkpoint to target_index using a fresh treasury reading.
    // The only place treasury_value changes after activation.
    pub fn sync_to(&mut self, target_index: u64, reading: TreasuryReading) -> Result<SyncOutcome> {
        self.assert_sync_target(target_index)?;
        require!(
            target_index <= reading.processed_index,
            PoolError::TargetNotYetProcessed
        );

        let outcome = SyncOutcome {
            previous_index: self.synced_index,
            current_index: target_index,
            previous_value: self.treasury_value,
            current_value: reading.treasury_value,
        };

        self.treasury_value = reading.treasury_value;
        self.synced_index = target_index;

        Ok(outcome)
    }

    pub fn mint_shares(&mut self, donor: &mut DonorAccount, shares: u128) -> Result<ShareMovement> {
        let donor_shares_after = donor
            .shares
            .checked_add(shares)
            .ok_or(PoolError::Overflow)?;
        let total_shares_after = self
            .total_shares
            .checked_add(shares)
            .ok_or(PoolError::Overflow)?;

        let movement = ShareMovement {
            donor_shares_before: donor.shares,
            donor_shares_after,
            total_shares_before: self.total_shares,
            total_shares_after,
        };

        donor.shares = donor_shares_after;
        self.total_shares = total_shares_after;

        Ok(movement)
    }

    pub fn burn_shares(&mut self, donor: &mut DonorAccount, shares: u128) -> Result<ShareMovement> {
        require!(shares <= donor.shares, PoolError::InsufficientShares);

        let donor_shares_after = donor.shares - shares;
        let total_shares_after = self
            .total_shares
            .checked_sub(shares)
            .ok_or(PoolError::InsufficientShares)?;

        let movement = ShareMovement {
            donor_shares_before: donor.shares,
            donor_shares_after,
            total_shares_before: self.total_shares,
            total_shares_after,
        };

        donor.shares = donor_shares_after;
        self.total_shares = total_shares_after;

        Ok(movement)
    }

    // Mint shares for a deposit at the synced price
    pub fn deposit(
        &mut self,
        donor: &mut DonorAccount,
        token_amount: u64,
    ) -> Result<(u128, ShareMovement)> {
        self.assert_active()?;
        require!(token_amount > 0, PoolError::ZeroAmount);

        let shares_to_mint = self.share_price().shares_for(token_amount)?;
        // Depositing less than one share's worth would donate the tokens
        require!(shares_to_mint > 0, PoolError::ZeroAmount);

        let movement = self.mint_shares(donor, shares_to_mint)?;

        Ok((shares_to_mint, movement))
    }

    // Burn shares at the synced price
    // Returns (tokens paid out, fee retained, movement)
    pub fn withdraw(
        &mut self,
        donor: &mut DonorAccount,
        shares_to_burn: u128,
    ) -> Result<(u64, u64, ShareMovement)> {
        self.assert_active()?;
        require!(shares_to_burn > 0, PoolError::ZeroAmount);
        require!(shares_to_burn <= donor.shares, PoolError::InsufficientShares);

        let gross = self.share_price().tokens_for(shares_to_burn)?;
        let fee = calculate_fee(gross, self.withdrawal_fee_bps)?;
        let payout = gross.checked_sub(fee).ok_or(PoolError::Overflow)?;

        let movement = self.burn_shares(donor, shares_to_burn)?;

        Ok((payout, fee, movement))
    }
}
