//! System config API module — the mutable business-rule singleton.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read = Router::new().route("/", get(handler::get_config));
    let manage = Router::new()
        .route("/", put(handler::update_config))
        .layer(middleware::from_fn(require_admin));
    Router::new().nest("/api/config", read.merge(manage))
}
