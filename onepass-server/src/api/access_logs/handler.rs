//! Access log handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::core::ServerState;
use crate::db::repository::access_log;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::{AccessLogEntry, AccessLogQuery};

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<AccessLogQuery>,
) -> AppResult<Json<AppResponse<Vec<AccessLogEntry>>>> {
    let entries = access_log::query(state.pool(), &q).await?;
    Ok(ok(entries))
}
