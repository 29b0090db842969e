//! Visitor Repository

use super::{RepoError, RepoResult};
use shared::models::{Visitor, VisitorStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const VISITOR_SELECT: &str =
    "SELECT id, host_id, name, purpose, status, checked_in_at, expires_at FROM visitor";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Visitor>> {
    let sql = format!("{VISITOR_SELECT} ORDER BY checked_in_at DESC");
    let rows = sqlx::query_as::<_, Visitor>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: &str) -> RepoResult<Option<Visitor>> {
    let sql = format!("{VISITOR_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Visitor>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, v: &Visitor) -> RepoResult<Visitor> {
    sqlx::query(
        "INSERT INTO visitor (id, host_id, name, purpose, status, checked_in_at, expires_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&v.id)
    .bind(&v.host_id)
    .bind(&v.name)
    .bind(&v.purpose)
    .bind(v.status)
    .bind(v.checked_in_at)
    .bind(v.expires_at)
    .execute(pool)
    .await?;
    find_by_id(pool, &v.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create visitor".into()))
}

pub async fn set_status<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    status: VisitorStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE visitor SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
