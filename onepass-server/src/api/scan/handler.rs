//! Scan handlers

use axum::{Json, extract::State};

use crate::access;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};
use shared::client::{ScanRequest, ScanResult};
use shared::models::DeviceEvent;

pub async fn scan(
    State(state): State<ServerState>,
    Json(req): Json<ScanRequest>,
) -> AppResult<Json<AppResponse<ScanResult>>> {
    let result =
        access::evaluate(state.pool(), &req.id, "scan", req.device_id.as_deref()).await?;
    let message = result.message.clone();
    Ok(ok_with_message(result, message))
}

/// Hardware collaborator events take the same path as a desk scan; only the
/// recorded action and device id differ.
pub async fn hardware_event(
    State(state): State<ServerState>,
    Json(event): Json<DeviceEvent>,
) -> AppResult<Json<AppResponse<ScanResult>>> {
    tracing::debug!(
        device_id = %event.device_id,
        actor_id = %event.actor_id,
        event_type = %event.event_type,
        "Hardware event received"
    );
    let result = access::evaluate(
        state.pool(),
        &event.actor_id,
        &event.event_type,
        Some(&event.device_id),
    )
    .await?;
    let message = result.message.clone();
    Ok(ok_with_message(result, message))
}
