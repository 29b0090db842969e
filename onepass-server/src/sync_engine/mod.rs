//! Sync / Merge Engine
//!
//! Reconciles externally-shaped source tables into the canonical member
//! store. Column identity comes from header aliases, never position, and
//! financial fields survive every merge pass.
//!
//! - [`source`] — header resolution and row parsing
//! - [`merge`] — snapshot-then-swap commit
//! - [`conflict`] — non-mutating preview and explicit resolution
//! - [`fetch`] — reqwest client for the external spreadsheet web app

pub mod conflict;
pub mod fetch;
pub mod merge;
pub mod source;

pub use conflict::{detect_conflicts, resolve};
pub use fetch::SheetClient;
pub use merge::merge_sources;
