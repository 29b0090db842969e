//! Sync API module — spreadsheet reconciliation, admin only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/sync",
        Router::new()
            .route("/merge", post(handler::merge))
            .route("/preview", post(handler::preview))
            .route("/resolve", post(handler::resolve))
            .route("/push", post(handler::push))
            .route("/status", get(handler::status))
            .layer(middleware::from_fn(require_admin)),
    )
}
