// Moloch Pool Helper Functions
//
// Share-price math and token CPI helpers shared by the instructions.
// Every division floors, so rounding always favours the pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Transfer};

use crate::{constants::*, errors::*};

// SHARE MATH

// Shares minted for a deposit at the current price
// Formula: shares = token_amount * total_shares / treasury_value
pub fn calculate_shares_to_mint(
    token_amount: u64,
    treasury_value: u64,
    total_shares: u128,
) -> Result<u128> {
    let shares = (token_amount as u128)
        .checked_mul(total_shares)
        .ok_or(PoolError::Overflow)?
        .checked_div(treasury_value as u128)
        .ok_or(PoolError::DivisionByZero)?;

    Ok(shares)
}

// Tokens owed for burning shares at the current price
// Formula: tokens = shares * treasury_value / total_shares
pub fn calculate_withdrawal(
    shares_to_burn: u128,
    treasury_value: u64,
    total_shares: u128,
) -> Result<u64> {
    let tokens = shares_to_burn
        .checked_mul(treasury_value as u128)
        .ok_or(PoolError::Overflow)?
        .checked_div(total_shares)
        .ok_or(PoolError::DivisionByZero)?;

    // tokens <= treasury_value whenever shares_to_burn <= total_shares
    u64::try_from(tokens).map_err(|_| error!(PoolError::Overflow))
}

// Withdrawal fee retained in the vault
pub fn calculate_fee(gross_amount: u64, fee_basis_points: u16) -> Result<u64> {
    let fee = (gross_amount as u128)
        .checked_mul(fee_basis_points as u128)
        .ok_or(PoolError::Overflow)?
        .checked_div(BASIS_POINTS as u128)
        .ok_or(PoolError::DivisionByZero)?;

    Ok(fee as u64)
}

// CPI HELPERS

// Move tokens from a user-owned token account into the vault
pub fn transfer_tokens<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
) -> Result<()> {
    transfer(
        CpiContext::new(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
        ),
        amount,
    )
}

// Pay out of the vault, signed by the pool authority PDA
pub fn transfer_from_vault<'info>(
    amount: u64,
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    authority_seeds: &[&[u8]],
) -> Result<()> {
    let signer_seeds = &[authority_seeds];

    transfer(
        CpiContext::new_with_signer(
            token_program.clone(),
            Transfer {
                from: from.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
            signer_seeds,
        ),
        amount,
    )
}
