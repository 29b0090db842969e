//! Member API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // Reads and self-service actions: any authenticated caller. Handlers
    // enforce self-or-admin where the target is another member's data.
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/wallet", get(handler::wallet_state))
        .route("/{id}/history", get(handler::history))
        .route("/{id}/dashboard-view", post(handler::dashboard_view));

    // Store mutations: admin only.
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/bulk", post(handler::bulk_update))
        .route("/{id}/photo", put(handler::set_photo))
        .layer(middleware::from_fn(require_admin));

    Router::new().nest("/api/members", read_routes.merge(manage_routes))
}
