// Instructions module
// - initialize_pool
// - activate
// - sync_to
// - deposit
// - withdraw
// - keeper_withdraw
// - add_keepers / remove_keepers
// - views (total_shares, shares_of, balance_of, share_price, last_synced_index, is_authorized)

pub mod activate;
pub mod add_keepers;
pub mod deposit;
pub mod initialize_pool;
pub mod keeper_withdraw;
pub mod remove_keepers;
pub mod sync_to;
pub mod views;
pub mod withdraw;

pub use activate::*;
pub use add_keepers::*;
pub use deposit::*;
pub use initialize_pool::*;
pub use keeper_withdraw::*;
pub use remove_keepers::*;
pub use sync_to::*;
pub use views::*;
pub use withdraw::*;
