//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{BulkUpdate, Member, MemberStatus, MemberUpdate, Role};
use sqlx::{SqliteExecutor, SqlitePool};

const MEMBER_SELECT: &str = "SELECT id, organization_id, name, role, status, photo_url, wallet_balance, outstanding_fines, reward_points, last_dashboard_view, session_progress, password_hash, created_at, updated_at FROM member";

/// Fields preserved across merge passes, keyed by member id. Sources only
/// refresh identity, role, and status; everything the service owns locally
/// (money, credentials, the dashboard-view stamp, organization assignment,
/// session progress) rides the snapshot so a re-sync does not erase it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FinancialSnapshot {
    pub id: String,
    pub organization_id: String,
    pub wallet_balance: i64,
    pub outstanding_fines: i64,
    pub reward_points: i64,
    pub last_dashboard_view: Option<i64>,
    pub session_progress: i64,
    pub password_hash: Option<String>,
    pub created_at: i64,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} ORDER BY created_at ASC, id ASC");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: &str) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    data: shared::models::MemberCreate,
    password_hash: Option<String>,
) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = data.id.trim().to_string();
    let result = sqlx::query(
        "INSERT INTO member (id, organization_id, name, role, status, photo_url, password_hash, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(&id)
    .bind(data.organization_id.unwrap_or_default())
    .bind(data.name.trim())
    .bind(data.role.unwrap_or(Role::Member))
    .bind(data.status.unwrap_or(MemberStatus::Active))
    .bind(data.photo_url.unwrap_or_default())
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) => return Err(e.into()),
    }

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: MemberUpdate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET name = COALESCE(?1, name), organization_id = COALESCE(?2, organization_id), role = COALESCE(?3, role), status = COALESCE(?4, status), photo_url = COALESCE(?5, photo_url), session_progress = COALESCE(?6, session_progress), updated_at = ?7 WHERE id = ?8",
    )
    .bind(data.name)
    .bind(data.organization_id)
    .bind(data.role)
    .bind(data.status)
    .bind(data.photo_url)
    .bind(data.session_progress)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

/// Bulk role/status update. Only identity fields move; financial fields are
/// out of reach by construction.
pub async fn bulk_update(pool: &SqlitePool, data: &BulkUpdate) -> RepoResult<u64> {
    if data.ids.is_empty() || (data.role.is_none() && data.status.is_none()) {
        return Ok(0);
    }
    let now = shared::util::now_millis();
    let placeholders = vec!["?"; data.ids.len()].join(", ");
    let sql = format!(
        "UPDATE member SET role = COALESCE(?, role), status = COALESCE(?, status), updated_at = ? WHERE id IN ({placeholders})"
    );
    let mut query = sqlx::query(&sql).bind(data.role).bind(data.status).bind(now);
    for id in &data.ids {
        query = query.bind(id);
    }
    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn set_photo(pool: &SqlitePool, id: &str, photo_url: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET photo_url = ?, updated_at = ? WHERE id = ?")
        .bind(photo_url)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Stamp the dashboard acknowledgement time (wallet gate input).
pub async fn record_dashboard_view(pool: &SqlitePool, id: &str, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE member SET last_dashboard_view = ?, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_status<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    status: MemberStatus,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE member SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}

/// Mark late and add the fine to outstanding fines in one statement.
/// The ledger entry and wallet movement happen via transaction posting in
/// the same database transaction.
pub async fn mark_late_with_fine<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    fine_amount: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE member SET status = ?, outstanding_fines = outstanding_fines + ?, updated_at = ? WHERE id = ?",
    )
    .bind(MemberStatus::Late)
    .bind(fine_amount)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(())
}

/// Adjust the cached wallet balance. Only the ledger posting path calls this;
/// everything else treats the balance as read-only.
pub async fn adjust_wallet<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    delta: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE member SET wallet_balance = wallet_balance + ?, updated_at = ? WHERE id = ?")
        .bind(delta)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn set_outstanding_fines<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: &str,
    value: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE member SET outstanding_fines = ?, updated_at = ? WHERE id = ?")
        .bind(value.max(0))
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}

/// Snapshot locally-owned fields for every member (pre-merge).
pub async fn financial_snapshot<'e, E: SqliteExecutor<'e>>(
    ex: E,
) -> RepoResult<Vec<FinancialSnapshot>> {
    let rows = sqlx::query_as::<_, FinancialSnapshot>(
        "SELECT id, organization_id, wallet_balance, outstanding_fines, reward_points, last_dashboard_view, session_progress, password_hash, created_at FROM member",
    )
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Full-row insert, used by the merge's replace step.
pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, m: &Member) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO member (id, organization_id, name, role, status, photo_url, wallet_balance, outstanding_fines, reward_points, last_dashboard_view, session_progress, password_hash, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    )
    .bind(&m.id)
    .bind(&m.organization_id)
    .bind(&m.name)
    .bind(m.role)
    .bind(m.status)
    .bind(&m.photo_url)
    .bind(m.wallet_balance)
    .bind(m.outstanding_fines)
    .bind(m.reward_points)
    .bind(m.last_dashboard_view)
    .bind(m.session_progress)
    .bind(&m.password_hash)
    .bind(m.created_at)
    .bind(m.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Clear the canonical table (inside the merge transaction only).
pub async fn delete_all<'e, E: SqliteExecutor<'e>>(ex: E) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM member").execute(ex).await?;
    Ok(result.rows_affected())
}

pub async fn count<'e, E: SqliteExecutor<'e>>(ex: E) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
        .fetch_one(ex)
        .await?;
    Ok(n)
}
