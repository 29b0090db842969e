//! Wallet handlers
//!
//! Manual transaction posting (admin) and the withdrawal flow. Approving a
//! withdrawal posts a Debit in the same database transaction as the status
//! flip, so the record and the money never disagree.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{member, system_config, withdrawal};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::wallet::{self, gate};
use shared::models::{
    Transaction, TransactionCreate, TxType, Withdrawal, WithdrawalDecision, WithdrawalRequest,
    WithdrawalStatus,
};

pub async fn post_transaction(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(data): Json<TransactionCreate>,
) -> AppResult<Json<AppResponse<Transaction>>> {
    let posted = wallet::post_transaction(state.pool(), data).await?;
    tracing::info!(
        admin_id = %user.id,
        tx_id = %posted.id,
        "Manual transaction posted"
    );
    Ok(ok(posted))
}

pub async fn request_withdrawal(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<WithdrawalRequest>,
) -> AppResult<Json<AppResponse<Withdrawal>>> {
    req.validate()?;

    let m = member::find_by_id(state.pool(), &user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", user.id)))?;

    let config = system_config::get(state.pool()).await?;
    let now = shared::util::now_millis();
    if gate::member_wallet_locked(&m, now, config.wallet_unlock_minutes) {
        return Err(AppError::business_rule(
            "Wallet is locked. Clear outstanding fines and acknowledge your dashboard first.",
        ));
    }
    if req.amount > m.wallet_balance {
        return Err(AppError::business_rule(format!(
            "Insufficient balance: have {}, requested {}",
            m.wallet_balance, req.amount
        )));
    }

    let w = Withdrawal {
        id: shared::util::prefixed_id("WD"),
        member_id: user.id.clone(),
        amount: req.amount,
        status: WithdrawalStatus::Pending,
        requested_at: now,
        processed_at: None,
        processed_by: None,
    };
    let created = withdrawal::create(state.pool(), &w).await?;
    tracing::info!(
        member_id = %user.id,
        withdrawal_id = %created.id,
        amount = created.amount,
        "Withdrawal requested"
    );
    Ok(ok(created))
}

pub async fn process_withdrawal(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(decision): Json<WithdrawalDecision>,
) -> AppResult<Json<AppResponse<Withdrawal>>> {
    let now = shared::util::now_millis();
    let mut tx = state
        .pool()
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let w = withdrawal::find_by_id(&mut *tx, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Withdrawal {id}")))?;

    let status = if decision.approve {
        WithdrawalStatus::Approved
    } else {
        WithdrawalStatus::Rejected
    };

    if !withdrawal::mark_processed(&mut *tx, &id, status, &user.id, now).await? {
        return Err(AppError::business_rule(format!(
            "Withdrawal {id} is already processed"
        )));
    }

    if decision.approve {
        wallet::post_in_tx(
            &mut tx,
            TransactionCreate {
                member_id: w.member_id.clone(),
                tx_type: TxType::Debit,
                amount: -w.amount,
                description: "Withdrawal payout".to_string(),
                reference: Some(w.id.clone()),
            },
        )
        .await?;
    }

    let updated = withdrawal::find_by_id(&mut *tx, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Withdrawal {id}")))?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        withdrawal_id = %id,
        member_id = %w.member_id,
        approved = decision.approve,
        processed_by = %user.id,
        "Withdrawal processed"
    );
    Ok(ok(updated))
}

pub async fn list_withdrawals(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<Withdrawal>>>> {
    // Admins see everything, members only their own.
    let filter = if user.is_admin() {
        None
    } else {
        Some(user.id.as_str())
    };
    let rows = withdrawal::find_all(state.pool(), filter).await?;
    Ok(ok(rows))
}
