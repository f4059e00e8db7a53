// Treasury Oracle Adapter
//
// Reads the two values the pool tracks from accounts it does not control:
// - treasury value: approved-token balance of the pool vault
// - processed index: DAO's processed proposal counter
//
// Nothing is cached. Every failure collapses into OracleUnavailable so the
// calling instruction aborts before touching the ledger.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount};
use bytemuck::{Pod, Zeroable};

use crate::{constants::*, errors::*, state::PoolState};

// Leading bytes of the DAO state account
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct DaoHeader {
    pub discriminator: [u8; 8],
    pub processed_proposal_index: u64,
}

// One fresh read of the treasury
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasuryReading {
    pub treasury_value: u64,
    pub processed_index: u64,
}

pub fn parse_processed_index(data: &[u8]) -> Option<u64> {
    let header_bytes = data.get(..DAO_HEADER_LEN)?;
    let header: DaoHeader = bytemuck::try_pod_read_unaligned(header_bytes).ok()?;
    Some(u64::from_le(header.processed_proposal_index))
}

pub fn current_processed_index(pool: &PoolState, dao_state: &AccountInfo) -> Result<u64> {
    require_keys_eq!(dao_state.key(), pool.dao, PoolError::OracleUnavailable);
    require_keys_eq!(*dao_state.owner, pool.dao_program, PoolError::OracleUnavailable);

    let data = dao_state
        .try_borrow_data()
        .map_err(|_| error!(PoolError::OracleUnavailable))?;

    parse_processed_index(&data).ok_or_else(|| error!(PoolError::OracleUnavailable))
}

pub fn current_treasury_value(pool: &PoolState, vault: &AccountInfo) -> Result<u64> {
    require_keys_eq!(vault.key(), pool.vault, PoolError::OracleUnavailable);
    require_keys_eq!(*vault.owner, token::ID, PoolError::OracleUnavailable);

    let data = vault
        .try_borrow_data()
        .map_err(|_| error!(PoolError::OracleUnavailable))?;
    let vault_account = TokenAccount::try_deserialize(&mut &data[..])
        .map_err(|_| error!(PoolError::OracleUnavailable))?;

    require_keys_eq!(vault_account.mint, pool.approved_mint, PoolError::OracleUnavailable);

    Ok(vault_account.amount)
}

pub fn read_treasury(
    pool: &PoolState,
    dao_state: &AccountInfo,
    vault: &AccountInfo,
) -> Result<TreasuryReading> {
    let processed_index = current_processed_index(pool, dao_state)?;
    let treasury_value = current_treasury_value(pool, vault)?;

    Ok(TreasuryReading {
        treasury_value,
        processed_index,
    })
}
