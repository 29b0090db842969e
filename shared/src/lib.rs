//! Shared types for OnePass
//!
//! Common types used by the server and any API client: entity models,
//! request/response DTOs, and small utility functions.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
