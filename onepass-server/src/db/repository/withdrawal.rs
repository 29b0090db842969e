//! Withdrawal Repository

use super::{RepoError, RepoResult};
use shared::models::{Withdrawal, WithdrawalStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const WITHDRAWAL_SELECT: &str = "SELECT id, member_id, amount, status, requested_at, processed_at, processed_by FROM withdrawal";

pub async fn find_all(pool: &SqlitePool, member_id: Option<&str>) -> RepoResult<Vec<Withdrawal>> {
    let rows = match member_id {
        Some(mid) => {
            let sql = format!("{WITHDRAWAL_SELECT} WHERE member_id = ? ORDER BY requested_at DESC");
            sqlx::query_as::<_, Withdrawal>(&sql)
                .bind(mid)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{WITHDRAWAL_SELECT} ORDER BY requested_at DESC");
            sqlx::query_as::<_, Withdrawal>(&sql).fetch_all(pool).await?
        }
    };
    Ok(rows)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
) -> RepoResult<Option<Withdrawal>> {
    let sql = format!("{WITHDRAWAL_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Withdrawal>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, w: &Withdrawal) -> RepoResult<Withdrawal> {
    sqlx::query(
        "INSERT INTO withdrawal (id, member_id, amount, status, requested_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&w.id)
    .bind(&w.member_id)
    .bind(w.amount)
    .bind(w.status)
    .bind(w.requested_at)
    .execute(pool)
    .await?;
    find_by_id(pool, &w.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create withdrawal".into()))
}

/// Move a Pending withdrawal to its terminal status. Returns false when the
/// record was already processed (guards double approval).
pub async fn mark_processed<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    status: WithdrawalStatus,
    processed_by: &str,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE withdrawal SET status = ?, processed_at = ?, processed_by = ? WHERE id = ? AND status = ?",
    )
    .bind(status)
    .bind(now)
    .bind(processed_by)
    .bind(id)
    .bind(WithdrawalStatus::Pending)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}
