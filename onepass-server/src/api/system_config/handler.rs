//! System config handlers

use axum::{Extension, Json, extract::State};
use chrono::NaiveTime;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::system_config;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{SystemConfig, SystemConfigUpdate};

pub async fn get_config(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<SystemConfig>>> {
    let config = system_config::get(state.pool()).await?;
    Ok(ok(config))
}

pub async fn update_config(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<SystemConfigUpdate>,
) -> AppResult<Json<AppResponse<SystemConfig>>> {
    if let Some(t) = data.resumption_time.as_deref() {
        if NaiveTime::parse_from_str(t, "%H:%M").is_err() {
            return Err(AppError::validation(format!(
                "resumption_time must be HH:MM, got {t:?}"
            )));
        }
    }
    if let Some(fine) = data.late_fine_amount {
        if fine < 0 {
            return Err(AppError::validation("late_fine_amount must not be negative"));
        }
    }
    if let Some(threshold) = data.auto_suspend_threshold {
        if threshold < 0 {
            return Err(AppError::validation(
                "auto_suspend_threshold must not be negative",
            ));
        }
    }
    if let Some(minutes) = data.wallet_unlock_minutes {
        if minutes <= 0 {
            return Err(AppError::validation("wallet_unlock_minutes must be positive"));
        }
    }

    let updated = system_config::update(state.pool(), data).await?;
    tracing::info!(admin_id = %user.id, "System config updated");
    Ok(ok(updated))
}
