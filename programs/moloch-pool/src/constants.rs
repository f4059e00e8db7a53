// Moloch Pool Program Constants

pub const ANCHOR_DISCRIMINATOR: usize = 8;

// Seeds for PDA derivation: ["pool", dao, approved_mint]
pub const POOL_SEED: &[u8] = b"pool";

// Seeds for PDA derivation: ["pool_authority", pool_state]
// Owns the vault token account
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";

// Seeds for PDA derivation: ["donor", pool_state, donor]
pub const DONOR_SEED: &[u8] = b"donor";

// Keeper slots per donor account
pub const MAX_KEEPERS: usize = 10;

pub const BASIS_POINTS: u64 = 10_000;
pub const MAX_WITHDRAWAL_FEE_BPS: u16 = 500; // 5% max

// DAO state account header: [discriminator; 8][processed_proposal_index: u64 LE]
pub const DAO_HEADER_LEN: usize = 16;
