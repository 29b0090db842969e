//! Transaction Posting
//!
//! Append-only creation of ledger entries, system-generated (late fines) or
//! admin-initiated. The member's cached `wallet_balance` is a materialized
//! running total updated in the same database transaction as every append,
//! with the invariant `wallet_balance == sum(ledger.amount)` checked before
//! commit.

use sqlx::{Sqlite, SqlitePool, Transaction as DbTx};

use crate::db::repository::{ledger, member};
use crate::utils::{AppError, AppResult};
use shared::models::{Transaction, TransactionCreate, TxType};

/// Post a transaction in its own database transaction.
pub async fn post_transaction(pool: &SqlitePool, data: TransactionCreate) -> AppResult<Transaction> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let posted = post_in_tx(&mut tx, data).await?;
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(posted)
}

/// Post a transaction inside a caller-owned database transaction. Used by
/// the access evaluator (late fine), withdrawal approval, and sync conflict
/// resolution so their side effects commit atomically.
pub async fn post_in_tx(
    tx: &mut DbTx<'_, Sqlite>,
    data: TransactionCreate,
) -> AppResult<Transaction> {
    let member = member::find_by_id(&mut **tx, &data.member_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", data.member_id)))?;

    check_sign(data.tx_type, data.amount)?;

    // A debit may not overdraw; fines may (debt is carried as a negative
    // balance plus outstanding_fines).
    if data.tx_type == TxType::Debit && member.wallet_balance + data.amount < 0 {
        return Err(AppError::business_rule(format!(
            "Insufficient balance: have {}, debit {}",
            member.wallet_balance, -data.amount
        )));
    }

    let now = shared::util::now_millis();
    let entry = Transaction {
        id: shared::util::prefixed_id("TX"),
        member_id: data.member_id.clone(),
        tx_type: data.tx_type,
        amount: data.amount,
        description: data.description,
        reference: data.reference,
        created_at: now,
    };

    ledger::append(&mut **tx, &entry).await?;
    member::adjust_wallet(&mut **tx, &data.member_id, data.amount, now).await?;

    // Invariant: cached balance equals the ledger sum. A mismatch here means
    // some write path moved money without going through posting; abort the
    // whole transaction rather than persist a drifted balance.
    let ledger_sum = ledger::sum_for_member(&mut **tx, &data.member_id).await?;
    let cached = member::find_by_id(&mut **tx, &data.member_id)
        .await?
        .map(|m| m.wallet_balance)
        .unwrap_or_default();
    if ledger_sum != cached {
        tracing::error!(
            member_id = %data.member_id,
            ledger_sum,
            cached,
            "Wallet balance diverged from ledger sum"
        );
        return Err(AppError::internal(format!(
            "Ledger invariant violated for member {}",
            data.member_id
        )));
    }

    tracing::info!(
        member_id = %entry.member_id,
        tx_id = %entry.id,
        tx_type = %entry.tx_type,
        amount = entry.amount,
        "Transaction posted"
    );

    Ok(entry)
}

fn check_sign(tx_type: TxType, amount: i64) -> AppResult<()> {
    if amount == 0 {
        return Err(AppError::validation("Amount must not be zero"));
    }
    if tx_type.is_positive() && amount < 0 {
        return Err(AppError::validation(format!(
            "{tx_type} amount must be positive"
        )));
    }
    if !tx_type.is_positive() && amount > 0 {
        return Err(AppError::validation(format!(
            "{tx_type} amount must be negative"
        )));
    }
    Ok(())
}
