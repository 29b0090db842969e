//! Assistant API module

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let member_routes = Router::new().route("/insights", post(handler::insights));
    let admin_routes = Router::new()
        .route("/analyst", post(handler::analyst))
        .layer(middleware::from_fn(require_admin));
    Router::new().nest("/api/assistant", member_routes.merge(admin_routes))
}
