use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

pub async fn health(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Value>>> {
    // A cheap query doubles as a database liveness probe.
    let members = crate::db::repository::member::count(state.pool()).await?;
    Ok(ok(json!({
        "status": "ok",
        "members": members,
        "timestamp": shared::util::now_millis(),
    })))
}
