//! Authentication handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::member;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};
use shared::client::{LoginRequest, LoginResponse};
use shared::models::Member;

/// Fixed delay before answering, so lookup misses and password mismatches
/// take the same time.
const AUTH_FIXED_DELAY_MS: u64 = 500;

pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let id = req.id.trim().to_string();
    let found = member::find_by_id(state.pool(), &id).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error on every failure path so identifiers cannot be enumerated.
    let member = match found {
        Some(m) => m,
        None => {
            tracing::warn!(member_id = %id, "Login failed - unknown identifier");
            return Err(AppError::invalid_credentials());
        }
    };

    let Some(stored_hash) = member.password_hash.as_deref() else {
        // No interactive credentials on record (imported members scan only).
        tracing::warn!(member_id = %id, "Login failed - no stored credentials");
        return Err(AppError::invalid_credentials());
    };

    if !password::verify_password(&req.password, stored_hash)? {
        tracing::warn!(member_id = %id, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&member.id, &member.name, member.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        member_id = %member.id,
        role = %member.role,
        "Member logged in"
    );

    Ok(ok(LoginResponse { token, member }))
}

pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Member>>> {
    let member = member::find_by_id(state.pool(), &user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", user.id)))?;
    Ok(ok(member))
}

pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<()>>> {
    // Stateless tokens: logout is client-side disposal, logged for the trail.
    tracing::info!(member_id = %user.id, "Member logged out");
    Ok(ok_with_message((), "Logged out"))
}
