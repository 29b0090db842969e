//! Wallet domain
//!
//! - [`gate`] — derived locked/unlocked state for wallet actions
//! - [`ledger`] — transaction posting with the balance invariant

pub mod gate;
pub mod ledger;

pub use gate::wallet_locked;
pub use ledger::{post_in_tx, post_transaction};
