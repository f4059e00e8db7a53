use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    // Lifecycle errors
    #[msg("Pool has not been activated")]
    NotActivated,

    #[msg("Pool is already activated")]
    AlreadyActivated,

    #[msg("Only the pool authority can perform this action")]
    UnauthorizedAuthority,

    // Sync errors
    #[msg("Target index is behind the last synced proposal index")]
    StaleOrRegressiveSync,

    #[msg("Target index has not been processed by the DAO yet")]
    TargetNotYetProcessed,

    #[msg("Treasury state could not be read")]
    OracleUnavailable,

    // Ledger errors
    #[msg("Donor does not own enough shares")]
    InsufficientShares,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Vault does not hold enough tokens for this withdrawal")]
    InsufficientPoolLiquidity,

    #[msg("Token account mint does not match the approved token")]
    InvalidTokenMint,

    #[msg("Withdrawal fee exceeds maximum allowed (500 = 5%)")]
    FeeTooHigh,

    // Delegation errors
    #[msg("Signer is not an authorized keeper for this donor")]
    UnauthorizedKeeper,

    #[msg("Keeper address is not allowed")]
    InvalidKeeper,

    #[msg("Keeper list cannot be empty")]
    EmptyKeeperSet,

    #[msg("Maximum number of keepers reached")]
    MaxKeepersReached,

    // Arithmetic errors
    #[msg("Arithmetic overflow occurred")]
    Overflow,

    #[msg("Division by zero attempted")]
    DivisionByZero,
}
