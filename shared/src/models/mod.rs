//! Data models
//!
//! Shared between onepass-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Entity IDs are prefixed strings ("VG-001", "TX-...", "VIS-...") as in the
//! hub spreadsheet; money is an `i64` in minor currency units.

pub mod access_log;
pub mod member;
pub mod sync;
pub mod system_config;
pub mod transaction;
pub mod visitor;
pub mod withdrawal;

// Re-exports
pub use access_log::*;
pub use member::*;
pub use sync::*;
pub use system_config::*;
pub use transaction::*;
pub use visitor::*;
pub use withdrawal::*;
