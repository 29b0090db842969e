//! Authentication routes
//!
//! - `/api/auth/login`: public (skipped by the auth middleware)
//! - `/api/auth/me`, `/api/auth/logout`: require a valid token

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
