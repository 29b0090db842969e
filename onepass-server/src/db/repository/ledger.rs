//! Ledger Repository
//!
//! Append-only. Rows are never updated or deleted; they outlive members
//! dropped by a merge pass.

use super::RepoResult;
use shared::models::Transaction;
use sqlx::SqliteExecutor;

pub async fn append<'e, E: SqliteExecutor<'e>>(ex: E, tx: &Transaction) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO ledger (id, member_id, tx_type, amount, description, reference, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&tx.id)
    .bind(&tx.member_id)
    .bind(tx.tx_type)
    .bind(tx.amount)
    .bind(&tx.description)
    .bind(&tx.reference)
    .bind(tx.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn find_by_member<'e, E: SqliteExecutor<'e>>(
    ex: E,
    member_id: &str,
    limit: i64,
) -> RepoResult<Vec<Transaction>> {
    let rows = sqlx::query_as::<_, Transaction>(
        "SELECT id, member_id, tx_type, amount, description, reference, created_at FROM ledger WHERE member_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(member_id)
    .bind(limit)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Sum of all signed amounts for one member. The posting path keeps the
/// cached member balance equal to this at all times.
pub async fn sum_for_member<'e, E: SqliteExecutor<'e>>(ex: E, member_id: &str) -> RepoResult<i64> {
    let sum: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM ledger WHERE member_id = ?")
        .bind(member_id)
        .fetch_one(ex)
        .await?;
    Ok(sum)
}

pub async fn count_by_member<'e, E: SqliteExecutor<'e>>(
    ex: E,
    member_id: &str,
) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ledger WHERE member_id = ?")
        .bind(member_id)
        .fetch_one(ex)
        .await?;
    Ok(n)
}
