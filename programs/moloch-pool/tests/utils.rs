// Test utilities for the Moloch Pool program

#![allow(dead_code)]

use anchor_lang::AccountDeserialize;
use borsh::BorshDeserialize;
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use litesvm_token::{CreateAssociatedTokenAccount, CreateMint, MintTo};
use moloch_pool::{
    errors::PoolError,
    state::{DonorAccount, PoolState},
};
use sha2::{Digest, Sha256};
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;

// Program ID matching declare_id!
pub const POOL_PROGRAM_ID: Pubkey = Pubkey::new_from_array(moloch_pool::ID.to_bytes());

// Standard program IDs
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
use solana_system_interface::program::ID as system_program;

// Stand-in owner for the DAO state account
pub const DAO_PROGRAM_ID: Pubkey = Pubkey::new_from_array([7u8; 32]);
pub const DAO_DISCRIMINATOR: [u8; 8] = *b"molochdo";

// PDA Seeds (must match constants.rs)
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const DONOR_SEED: &[u8] = b"donor";

pub const DECIMALS: u8 = 6;

// ======================== HELPERS ========================

// First 8 bytes of sha256("global:method_name")
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{}", method).as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

// Setup LiteSVM with the pool program (built with `cargo build-sbf`)
pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let program_bytes = include_bytes!("../../../target/deploy/moloch_pool.so");
    let _ = svm.add_program(POOL_PROGRAM_ID, program_bytes);
    svm
}

pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

// Write the DAO state account: [discriminator; 8][processed_index: u64 LE]
pub fn set_dao_state(svm: &mut LiteSVM, dao: &Pubkey, owner: &Pubkey, processed_index: u64) {
    let mut data = DAO_DISCRIMINATOR.to_vec();
    data.extend_from_slice(&processed_index.to_le_bytes());
    // Trailing DAO fields the pool never reads
    data.extend_from_slice(&[0u8; 32]);

    svm.set_account(
        *dao,
        Account {
            lamports: LAMPORTS_PER_SOL,
            data,
            owner: *owner,
            executable: false,
            rent_epoch: 0,
        },
    )
    .expect("DAO account should be writable");
}

pub fn derive_pool_pda(dao: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, dao.as_ref(), mint.as_ref()], &POOL_PROGRAM_ID)
}

pub fn derive_pool_authority_pda(pool_state: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool_state.as_ref()], &POOL_PROGRAM_ID)
}

pub fn derive_donor_pda(pool_state: &Pubkey, donor: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DONOR_SEED, pool_state.as_ref(), donor.as_ref()],
        &POOL_PROGRAM_ID,
    )
}

pub fn to_anchor_key(key: &Pubkey) -> anchor_lang::prelude::Pubkey {
    anchor_lang::prelude::Pubkey::new_from_array(key.to_bytes())
}

pub fn send(
    svm: &mut LiteSVM,
    instructions: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
) -> Result<TransactionMetadata, FailedTransactionMetadata> {
    // Identical transactions would otherwise be rejected as already processed
    svm.expire_blockhash();
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        signers,
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}

pub fn assert_pool_error<T: std::fmt::Debug>(
    result: Result<T, FailedTransactionMetadata>,
    expected: PoolError,
) {
    let code = u32::from(expected);
    match result {
        Ok(meta) => panic!("Expected error {} but transaction succeeded: {:?}", code, meta),
        Err(failed) => {
            let err = format!("{:?}", failed.err);
            assert!(
                err.contains(&format!("Custom({})", code)),
                "Expected custom error {}, got {}\nLogs: {:#?}",
                code,
                err,
                failed.meta.logs
            );
        }
    }
}

// Return data may come back with trailing zero bytes trimmed
pub fn return_bytes(meta: &TransactionMetadata, len: usize) -> Vec<u8> {
    let mut data = meta.return_data.data.clone();
    if data.len() < len {
        data.resize(len, 0);
    }
    data
}

pub fn return_value<T: BorshDeserialize>(meta: &TransactionMetadata) -> T {
    let data = return_bytes(meta, 32);
    T::deserialize(&mut data.as_slice()).expect("Return data should decode")
}

// SPL token account amount lives at bytes 64..72
pub fn token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm
        .get_account(token_account)
        .expect("Token account should exist");
    u64::from_le_bytes(account.data[64..72].try_into().unwrap())
}

pub fn fetch_pool(svm: &LiteSVM, pool_state: &Pubkey) -> PoolState {
    let account = svm.get_account(pool_state).expect("Pool should exist");
    PoolState::try_deserialize(&mut account.data.as_slice()).expect("Pool should decode")
}

pub fn fetch_donor(svm: &LiteSVM, donor_account: &Pubkey) -> Option<DonorAccount> {
    let account = svm.get_account(donor_account)?;
    if account.data.is_empty() {
        return None;
    }
    DonorAccount::try_deserialize(&mut account.data.as_slice()).ok()
}

pub fn donor_shares(scenario: &PoolScenario, donor: &Pubkey) -> u128 {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);
    fetch_donor(&scenario.svm, &donor_account)
        .map(|account| account.shares)
        .unwrap_or(0)
}

// ======================== INSTRUCTION BUILDERS ========================

pub fn build_initialize_pool_ix(
    authority: &Pubkey,
    mint: &Pubkey,
    dao: &Pubkey,
    withdrawal_fee_bps: u16,
) -> Instruction {
    let (pool_state, _) = derive_pool_pda(dao, mint);
    let (pool_authority, _) = derive_pool_authority_pda(&pool_state);
    let vault = get_associated_token_address(&pool_authority, mint);

    let mut data = anchor_discriminator("initialize_pool").to_vec();
    data.extend_from_slice(&withdrawal_fee_bps.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*dao, false),
            AccountMeta::new(pool_state, false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_activate_ix(
    scenario: &PoolScenario,
    activator: &Pubkey,
    initial_tokens: u64,
    initial_pool_shares: u128,
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, activator);
    let activator_ata = get_associated_token_address(activator, &scenario.mint);

    let mut data = anchor_discriminator("activate").to_vec();
    data.extend_from_slice(&initial_tokens.to_le_bytes());
    data.extend_from_slice(&initial_pool_shares.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*activator, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new(donor_account, false),
            AccountMeta::new_readonly(scenario.dao, false),
            AccountMeta::new(activator_ata, false),
            AccountMeta::new(scenario.vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_sync_ix(scenario: &PoolScenario, caller: &Pubkey, target_index: u64) -> Instruction {
    build_sync_ix_with_dao(scenario, caller, &scenario.dao, target_index)
}

pub fn build_sync_ix_with_dao(
    scenario: &PoolScenario,
    caller: &Pubkey,
    dao: &Pubkey,
    target_index: u64,
) -> Instruction {
    let mut data = anchor_discriminator("sync_to").to_vec();
    data.extend_from_slice(&target_index.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*caller, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new_readonly(*dao, false),
            AccountMeta::new_readonly(scenario.vault, false),
        ],
        data,
    }
}

pub fn build_deposit_ix(
    scenario: &PoolScenario,
    donor: &Pubkey,
    token_amount: u64,
    target_index: u64,
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);
    let donor_ata = get_associated_token_address(donor, &scenario.mint);

    let mut data = anchor_discriminator("deposit").to_vec();
    data.extend_from_slice(&token_amount.to_le_bytes());
    data.extend_from_slice(&target_index.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*donor, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new(donor_account, false),
            AccountMeta::new_readonly(scenario.dao, false),
            AccountMeta::new(donor_ata, false),
            AccountMeta::new(scenario.vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_withdraw_ix(
    scenario: &PoolScenario,
    donor: &Pubkey,
    shares_to_burn: u128,
    target_index: u64,
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);
    let donor_ata = get_associated_token_address(donor, &scenario.mint);

    let mut data = anchor_discriminator("withdraw").to_vec();
    data.extend_from_slice(&shares_to_burn.to_le_bytes());
    data.extend_from_slice(&target_index.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*donor, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new_readonly(scenario.pool_authority, false),
            AccountMeta::new(donor_account, false),
            AccountMeta::new_readonly(scenario.dao, false),
            AccountMeta::new_readonly(scenario.mint, false),
            AccountMeta::new(donor_ata, false),
            AccountMeta::new(scenario.vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    }
}

pub fn build_keeper_withdraw_ix(
    scenario: &PoolScenario,
    keeper: &Pubkey,
    donor: &Pubkey,
    recipient_token_account: &Pubkey,
    shares_to_burn: u128,
    target_index: u64,
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);

    let mut data = anchor_discriminator("keeper_withdraw").to_vec();
    data.extend_from_slice(&shares_to_burn.to_le_bytes());
    data.extend_from_slice(&target_index.to_le_bytes());

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*keeper, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new_readonly(scenario.pool_authority, false),
            AccountMeta::new_readonly(*donor, false),
            AccountMeta::new(donor_account, false),
            AccountMeta::new_readonly(scenario.dao, false),
            AccountMeta::new(*recipient_token_account, false),
            AccountMeta::new(scenario.vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

fn keeper_list_data(method: &str, keepers: &[Pubkey]) -> Vec<u8> {
    let mut data = anchor_discriminator(method).to_vec();
    data.extend_from_slice(&(keepers.len() as u32).to_le_bytes());
    for keeper in keepers {
        data.extend_from_slice(keeper.as_ref());
    }
    data
}

pub fn build_add_keepers_ix(scenario: &PoolScenario, donor: &Pubkey, keepers: &[Pubkey]) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*donor, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new(donor_account, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: keeper_list_data("add_keepers", keepers),
    }
}

pub fn build_remove_keepers_ix(
    scenario: &PoolScenario,
    donor: &Pubkey,
    keepers: &[Pubkey],
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*donor, true),
            AccountMeta::new(scenario.pool_state, false),
            AccountMeta::new(donor_account, false),
        ],
        data: keeper_list_data("remove_keepers", keepers),
    }
}

// total_shares / share_price / last_synced_index
pub fn build_pool_view_ix(scenario: &PoolScenario, method: &str) -> Instruction {
    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(scenario.pool_state, false)],
        data: anchor_discriminator(method).to_vec(),
    }
}

// shares_of / balance_of / is_authorized
// A missing donor account is passed as the program id (Anchor's `None`)
pub fn build_donor_view_ix(
    scenario: &PoolScenario,
    method: &str,
    donor: &Pubkey,
    keeper: Option<&Pubkey>,
) -> Instruction {
    let (donor_account, _) = derive_donor_pda(&scenario.pool_state, donor);
    let donor_account = if scenario.svm.get_account(&donor_account).is_some() {
        donor_account
    } else {
        POOL_PROGRAM_ID
    };

    let mut data = anchor_discriminator(method).to_vec();
    if let Some(keeper) = keeper {
        data.extend_from_slice(keeper.as_ref());
    }

    Instruction {
        program_id: POOL_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(scenario.pool_state, false),
            AccountMeta::new_readonly(*donor, false),
            AccountMeta::new_readonly(donor_account, false),
        ],
        data,
    }
}

// ======================== SCENARIOS ========================

pub struct PoolScenario {
    pub svm: LiteSVM,
    pub authority: Keypair,
    pub mint: Pubkey,
    pub dao: Pubkey,
    pub pool_state: Pubkey,
    pub pool_authority: Pubkey,
    pub vault: Pubkey,
}

impl PoolScenario {
    pub fn set_processed_index(&mut self, processed_index: u64) {
        let dao = self.dao;
        set_dao_state(&mut self.svm, &dao, &DAO_PROGRAM_ID, processed_index);
    }

    // Out-of-band treasury growth: tokens land in the vault without a deposit
    pub fn grow_treasury(&mut self, amount: u64) {
        MintTo::new(&mut self.svm, &self.authority, &self.mint, &self.vault, amount)
            .owner(&self.authority)
            .send()
            .expect("Failed to mint into vault");
    }

    // New funded keypair holding `tokens` of the approved mint in its ATA
    pub fn fund_donor(&mut self, tokens: u64) -> (Keypair, Pubkey) {
        let donor = create_funded_account(&mut self.svm, 10 * LAMPORTS_PER_SOL);
        let ata = self.create_token_account(&donor.pubkey());

        if tokens > 0 {
            MintTo::new(&mut self.svm, &self.authority, &self.mint, &ata, tokens)
                .owner(&self.authority)
                .send()
                .expect("Failed to mint to donor");
        }

        (donor, ata)
    }

    pub fn create_token_account(&mut self, owner: &Pubkey) -> Pubkey {
        CreateAssociatedTokenAccount::new(&mut self.svm, &self.authority, &self.mint)
            .owner(owner)
            .send()
            .expect("Failed to create ATA")
    }
}

// Pool created against a DAO at `processed_index`, not yet activated.
// The authority holds 1_000_000 tokens.
pub fn setup_pool(withdrawal_fee_bps: u16, processed_index: u64) -> PoolScenario {
    let mut svm = setup_svm();
    let authority = create_funded_account(&mut svm, 100 * LAMPORTS_PER_SOL);

    let mint = CreateMint::new(&mut svm, &authority)
        .authority(&authority.pubkey())
        .decimals(DECIMALS)
        .send()
        .expect("Failed to create mint");

    let dao = Pubkey::new_unique();
    set_dao_state(&mut svm, &dao, &DAO_PROGRAM_ID, processed_index);

    let ix = build_initialize_pool_ix(&authority.pubkey(), &mint, &dao, withdrawal_fee_bps);
    send(&mut svm, &[ix], &authority, &[&authority]).expect("Pool initialization failed");

    let (pool_state, _) = derive_pool_pda(&dao, &mint);
    let (pool_authority, _) = derive_pool_authority_pda(&pool_state);
    let vault = get_associated_token_address(&pool_authority, &mint);

    let mut scenario = PoolScenario {
        svm,
        authority,
        mint,
        dao,
        pool_state,
        pool_authority,
        vault,
    };

    let authority_key = scenario.authority.pubkey();
    let authority_ata = scenario.create_token_account(&authority_key);
    MintTo::new(
        &mut scenario.svm,
        &scenario.authority,
        &scenario.mint,
        &authority_ata,
        1_000_000,
    )
    .owner(&scenario.authority)
    .send()
    .expect("Failed to mint to authority");

    scenario
}

// Pool activated by its authority with `initial_tokens` / `initial_pool_shares`
pub fn setup_active_pool(initial_tokens: u64, initial_pool_shares: u128) -> PoolScenario {
    let mut scenario = setup_pool(0, 0);
    activate(&mut scenario, initial_tokens, initial_pool_shares);
    scenario
}

pub fn activate(scenario: &mut PoolScenario, initial_tokens: u64, initial_pool_shares: u128) {
    let authority = scenario.authority.insecure_clone();
    let ix = build_activate_ix(
        scenario,
        &authority.pubkey(),
        initial_tokens,
        initial_pool_shares,
    );
    send(&mut scenario.svm, &[ix], &authority, &[&authority]).expect("Activation failed");
}
