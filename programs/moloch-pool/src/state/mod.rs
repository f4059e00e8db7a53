pub mod donor_account;
pub mod pool_state;

pub use donor_account::*;
pub use pool_state::*;
