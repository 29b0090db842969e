//! Wallet API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // Member-facing: request a withdrawal, list own withdrawals.
    let member_routes = Router::new()
        .route(
            "/withdrawals",
            get(handler::list_withdrawals).post(handler::request_withdrawal),
        );

    // Admin: manual transaction posting and withdrawal processing.
    let admin_routes = Router::new()
        .route("/transactions", post(handler::post_transaction))
        .route(
            "/withdrawals/{id}/process",
            post(handler::process_withdrawal),
        )
        .layer(middleware::from_fn(require_admin));

    Router::new().nest("/api/wallet", member_routes.merge(admin_routes))
}
