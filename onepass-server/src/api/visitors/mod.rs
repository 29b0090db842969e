//! Visitor API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/visitors",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/{id}/checkout", post(handler::checkout)),
    )
}
