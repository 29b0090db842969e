//! Access Log Repository
//!
//! Append-only, created by the access evaluator.

use super::RepoResult;
use shared::models::{AccessLogEntry, AccessLogQuery, AccessOutcome, ActorKind};
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn append<'e, E: SqliteExecutor<'e>>(
    ex: E,
    actor_id: &str,
    actor_kind: ActorKind,
    action: &str,
    outcome: AccessOutcome,
    note: &str,
    device_id: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO access_log (actor_id, actor_kind, action, outcome, note, device_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(actor_id)
    .bind(actor_kind)
    .bind(action)
    .bind(outcome)
    .bind(note)
    .bind(device_id)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn query(pool: &SqlitePool, q: &AccessLogQuery) -> RepoResult<Vec<AccessLogEntry>> {
    let mut sql = String::from(
        "SELECT id, actor_id, actor_kind, action, outcome, note, device_id, created_at FROM access_log WHERE 1=1",
    );
    if q.from.is_some() {
        sql.push_str(" AND created_at >= ?");
    }
    if q.to.is_some() {
        sql.push_str(" AND created_at <= ?");
    }
    if q.outcome.is_some() {
        sql.push_str(" AND outcome = ?");
    }
    if q.actor_id.is_some() {
        sql.push_str(" AND actor_id = ?");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");

    let mut query = sqlx::query_as::<_, AccessLogEntry>(&sql);
    if let Some(from) = q.from {
        query = query.bind(from);
    }
    if let Some(to) = q.to {
        query = query.bind(to);
    }
    if let Some(outcome) = q.outcome {
        query = query.bind(outcome);
    }
    if let Some(actor_id) = &q.actor_id {
        query = query.bind(actor_id);
    }
    let rows = query
        .bind(q.limit.clamp(1, 500))
        .bind(q.offset.max(0))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_for_actor<'e, E: SqliteExecutor<'e>>(ex: E, actor_id: &str) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_log WHERE actor_id = ?")
        .bind(actor_id)
        .fetch_one(ex)
        .await?;
    Ok(n)
}
