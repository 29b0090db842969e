//! Authentication
//!
//! JWT token service, argon2 password hashing, and the axum middleware that
//! guards the API surface.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::{maintenance_guard, require_admin, require_auth};
