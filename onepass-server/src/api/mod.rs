//! API route modules
//!
//! One module per resource, each exposing `router() -> Router<ServerState>`:
//!
//! - [`health`] — liveness probe
//! - [`auth`] — login, me, logout
//! - [`members`] — member store, wallet view, history
//! - [`visitors`] — visitor passes
//! - [`scan`] — access evaluation entry points
//! - [`wallet`] — transaction posting and withdrawals
//! - [`sync`] — spreadsheet reconciliation
//! - [`system_config`] — mutable business rules
//! - [`access_logs`] — audit trail queries
//! - [`assistant`] — LLM pass-through

pub mod access_logs;
pub mod assistant;
pub mod auth;
pub mod health;
pub mod members;
pub mod scan;
pub mod sync;
pub mod system_config;
pub mod visitors;
pub mod wallet;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
