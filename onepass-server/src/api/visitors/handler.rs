//! Visitor handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::visitor;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{Visitor, VisitorCreate, VisitorStatus};

/// Default pass validity: 4 hours.
const DEFAULT_VALID_MINUTES: i64 = 240;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Visitor>>>> {
    let visitors = visitor::find_all(state.pool()).await?;
    Ok(ok(visitors))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<VisitorCreate>,
) -> AppResult<Json<AppResponse<Visitor>>> {
    data.validate()?;
    let valid_minutes = data.valid_minutes.unwrap_or(DEFAULT_VALID_MINUTES);
    if valid_minutes <= 0 {
        return Err(AppError::validation("valid_minutes must be positive"));
    }

    let now = shared::util::now_millis();
    let v = Visitor {
        id: shared::util::prefixed_id("VIS"),
        host_id: data.host_id.trim().to_string(),
        name: data.name.trim().to_string(),
        purpose: data.purpose.unwrap_or_default(),
        status: VisitorStatus::CheckedIn,
        checked_in_at: now,
        expires_at: now + valid_minutes * 60_000,
    };
    let created = visitor::create(state.pool(), &v).await?;
    tracing::info!(
        visitor_id = %created.id,
        host_id = %created.host_id,
        expires_at = created.expires_at,
        "Visitor checked in"
    );
    Ok(ok(created))
}

pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Visitor>>> {
    let v = visitor::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Visitor {id}")))?;
    if v.status != VisitorStatus::CheckedIn {
        return Err(AppError::business_rule(format!(
            "Visitor pass is already {}",
            v.status
        )));
    }
    visitor::set_status(state.pool(), &id, VisitorStatus::CheckedOut).await?;
    let updated = visitor::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Visitor {id}")))?;
    tracing::info!(visitor_id = %id, "Visitor checked out");
    Ok(ok(updated))
}
