//! Scan API module
//!
//! Access-evaluation entry points: the reception desk scan and the hardware
//! collaborator event, both funnelling into the same evaluator.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/scan",
        Router::new()
            .route("/", post(handler::scan))
            .route("/hardware", post(handler::hardware_event)),
    )
}
