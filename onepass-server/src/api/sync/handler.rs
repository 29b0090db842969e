//! Sync handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{member, system_config};
use crate::sync_engine;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::models::{
    ConflictResolution, ExternalMemberRow, MergeReport, SourceTable, SyncConflict,
};

pub async fn merge(
    State(state): State<ServerState>,
    Json(sources): Json<Vec<SourceTable>>,
) -> AppResult<Json<AppResponse<MergeReport>>> {
    if sources.is_empty() {
        return Err(AppError::validation("No source tables supplied"));
    }
    let report = sync_engine::merge_sources(state.pool(), &sources).await?;
    Ok(ok(report))
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// External rows to compare. When absent, rows are pulled from the
    /// configured sheet endpoint.
    #[serde(default)]
    pub rows: Option<Vec<ExternalMemberRow>>,
}

pub async fn preview(
    State(state): State<ServerState>,
    Json(req): Json<PreviewRequest>,
) -> AppResult<Json<AppResponse<Vec<SyncConflict>>>> {
    let rows = match req.rows {
        Some(rows) => rows,
        None => {
            let config = system_config::get(state.pool()).await?;
            let endpoint = config
                .sync_endpoint
                .ok_or_else(|| AppError::business_rule("No sync endpoint configured"))?;
            state
                .sheet
                .fetch_members(&endpoint, config.sync_token.as_deref())
                .await?
        }
    };
    let conflicts = sync_engine::detect_conflicts(state.pool(), &rows).await?;
    Ok(ok(conflicts))
}

pub async fn resolve(
    State(state): State<ServerState>,
    Json(resolutions): Json<Vec<ConflictResolution>>,
) -> AppResult<Json<AppResponse<usize>>> {
    let applied = sync_engine::resolve(state.pool(), &resolutions).await?;
    Ok(ok_with_message(
        applied,
        format!("{applied} conflict(s) resolved"),
    ))
}

pub async fn push(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<usize>>> {
    let config = system_config::get(state.pool()).await?;
    let endpoint = config
        .sync_endpoint
        .ok_or_else(|| AppError::business_rule("No sync endpoint configured"))?;
    let members = member::find_all(state.pool()).await?;
    let acknowledged = state
        .sheet
        .push_members(&endpoint, config.sync_token.as_deref(), &members)
        .await?;
    system_config::set_last_synced(state.pool(), shared::util::now_millis()).await?;
    tracing::info!(pushed = members.len(), acknowledged, "Member table pushed to sheet");
    Ok(ok(acknowledged))
}

#[derive(Debug, Serialize)]
pub struct SyncStatus {
    pub endpoint_configured: bool,
    pub last_synced_at: Option<i64>,
    pub member_count: i64,
}

pub async fn status(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<SyncStatus>>> {
    let config = system_config::get(state.pool()).await?;
    let member_count = member::count(state.pool()).await?;
    Ok(ok(SyncStatus {
        endpoint_configured: config.sync_endpoint.is_some(),
        last_synced_at: config.last_synced_at,
        member_count,
    }))
}
