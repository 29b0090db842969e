//! System Config Repository
//!
//! Reads and writes the singleton business-rule row.

use super::{RepoError, RepoResult};
use shared::models::{SystemConfig, SystemConfigUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const CONFIG_SELECT: &str = "SELECT resumption_time, late_fine_amount, auto_suspend_threshold, wallet_unlock_minutes, maintenance_mode, sync_endpoint, sync_token, last_synced_at FROM system_config WHERE id = 1";

pub async fn get<'e, E: SqliteExecutor<'e>>(ex: E) -> RepoResult<SystemConfig> {
    sqlx::query_as::<_, SystemConfig>(CONFIG_SELECT)
        .fetch_optional(ex)
        .await?
        .ok_or_else(|| RepoError::Database("system_config row missing".into()))
}

pub async fn update(pool: &SqlitePool, data: SystemConfigUpdate) -> RepoResult<SystemConfig> {
    sqlx::query(
        "UPDATE system_config SET resumption_time = COALESCE(?1, resumption_time), late_fine_amount = COALESCE(?2, late_fine_amount), auto_suspend_threshold = COALESCE(?3, auto_suspend_threshold), wallet_unlock_minutes = COALESCE(?4, wallet_unlock_minutes), maintenance_mode = COALESCE(?5, maintenance_mode), sync_endpoint = COALESCE(?6, sync_endpoint), sync_token = COALESCE(?7, sync_token) WHERE id = 1",
    )
    .bind(data.resumption_time)
    .bind(data.late_fine_amount)
    .bind(data.auto_suspend_threshold)
    .bind(data.wallet_unlock_minutes)
    .bind(data.maintenance_mode)
    .bind(data.sync_endpoint)
    .bind(data.sync_token)
    .execute(pool)
    .await?;
    get(pool).await
}

pub async fn set_last_synced(pool: &SqlitePool, at: i64) -> RepoResult<()> {
    sqlx::query("UPDATE system_config SET last_synced_at = ? WHERE id = 1")
        .bind(at)
        .execute(pool)
        .await?;
    Ok(())
}
