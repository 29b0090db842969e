//! OnePass Server — membership and access-control backend
//!
//! # Module structure
//!
//! ```text
//! onepass-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── auth/          # JWT, passwords, middleware
//! ├── access/        # allow/deny evaluation + late-fine side effect
//! ├── sync_engine/   # spreadsheet reconciliation and conflicts
//! ├── wallet/        # gate rule and ledger posting
//! ├── services/      # LLM assistant pass-through
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod access;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod sync_engine;
pub mod utils;
pub mod wallet;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
