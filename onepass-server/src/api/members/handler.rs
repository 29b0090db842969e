//! Member handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{ledger, member, system_config};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::wallet::gate;
use shared::client::WalletState;
use shared::models::{BulkUpdate, Member, MemberCreate, MemberUpdate, Transaction};

/// Self-or-admin guard for routes addressing one member's data.
fn authorize_target(user: &CurrentUser, target_id: &str) -> AppResult<()> {
    if user.id == target_id || user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Not your record"))
    }
}

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Member>>>> {
    let members = member::find_all(state.pool()).await?;
    Ok(ok(members))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Member>>> {
    let member = member::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {id}")))?;
    Ok(ok(member))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<MemberCreate>,
) -> AppResult<Json<AppResponse<Member>>> {
    data.validate()?;
    let password_hash = match data.password.as_deref() {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };
    let created = member::create(state.pool(), data, password_hash).await?;
    tracing::info!(member_id = %created.id, "Member created");
    Ok(ok(created))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<MemberUpdate>,
) -> AppResult<Json<AppResponse<Member>>> {
    data.validate()?;
    let updated = member::update(state.pool(), &id, data).await?;
    Ok(ok(updated))
}

pub async fn bulk_update(
    State(state): State<ServerState>,
    Json(data): Json<BulkUpdate>,
) -> AppResult<Json<AppResponse<u64>>> {
    let affected = member::bulk_update(state.pool(), &data).await?;
    tracing::info!(affected, "Bulk member update applied");
    Ok(ok(affected))
}

#[derive(Debug, Deserialize)]
pub struct PhotoUpdate {
    pub photo_url: String,
}

pub async fn set_photo(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<PhotoUpdate>,
) -> AppResult<Json<AppResponse<()>>> {
    if data.photo_url.trim().is_empty() {
        return Err(AppError::validation("photo_url must not be empty"));
    }
    if !member::set_photo(state.pool(), &id, data.photo_url.trim()).await? {
        return Err(AppError::not_found(format!("Member {id}")));
    }
    Ok(ok(()))
}

/// Wallet-gate acknowledgement: stamps `last_dashboard_view = now`.
pub async fn dashboard_view(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<i64>>> {
    authorize_target(&user, &id)?;
    let now = shared::util::now_millis();
    if !member::record_dashboard_view(state.pool(), &id, now).await? {
        return Err(AppError::not_found(format!("Member {id}")));
    }
    Ok(ok(now))
}

pub async fn wallet_state(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<WalletState>>> {
    authorize_target(&user, &id)?;
    let m = member::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {id}")))?;
    let config = system_config::get(state.pool()).await?;
    let now = shared::util::now_millis();
    Ok(ok(WalletState {
        balance: m.wallet_balance,
        outstanding_fines: m.outstanding_fines,
        reward_points: m.reward_points,
        locked: gate::member_wallet_locked(&m, now, config.wallet_unlock_minutes),
    }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    100
}

pub async fn history(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Query(q): Query<HistoryQuery>,
) -> AppResult<Json<AppResponse<Vec<Transaction>>>> {
    authorize_target(&user, &id)?;
    let entries = ledger::find_by_member(state.pool(), &id, q.limit.clamp(1, 500)).await?;
    Ok(ok(entries))
}
