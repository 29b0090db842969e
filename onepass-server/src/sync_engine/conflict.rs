//! Conflict Preview and Resolution
//!
//! Preview compares external financial rows against the local store without
//! touching it. Resolution applies an explicit per-conflict choice: taking
//! the sheet's wallet value posts an adjustment transaction for the delta so
//! the ledger invariant keeps holding; taking the sheet's fines value is a
//! direct set. "local" is always a no-op.

use sqlx::SqlitePool;

use crate::db::repository::member;
use crate::utils::{AppError, AppResult};
use crate::wallet;
use shared::models::{
    ConflictChoice, ConflictResolution, ExternalMemberRow, SyncConflict, TransactionCreate, TxType,
};

pub async fn detect_conflicts(
    pool: &SqlitePool,
    external: &[ExternalMemberRow],
) -> AppResult<Vec<SyncConflict>> {
    let mut conflicts = Vec::new();
    for row in external {
        let Some(local) = member::find_by_id(pool, &row.id).await? else {
            continue;
        };
        if local.wallet_balance != row.wallet_balance {
            conflicts.push(SyncConflict {
                member_id: row.id.clone(),
                name: local.name.clone(),
                field: "wallet_balance".to_string(),
                local_value: local.wallet_balance.into(),
                sheet_value: row.wallet_balance.into(),
            });
        }
        if local.outstanding_fines != row.outstanding_fines {
            conflicts.push(SyncConflict {
                member_id: row.id.clone(),
                name: local.name.clone(),
                field: "outstanding_fines".to_string(),
                local_value: local.outstanding_fines.into(),
                sheet_value: row.outstanding_fines.into(),
            });
        }
    }
    Ok(conflicts)
}

/// Apply resolutions; returns how many actually changed local state.
pub async fn resolve(pool: &SqlitePool, resolutions: &[ConflictResolution]) -> AppResult<usize> {
    let mut applied = 0;
    for r in resolutions {
        if r.choice == ConflictChoice::Local {
            continue;
        }
        let target = r
            .value
            .as_i64()
            .ok_or_else(|| AppError::validation(format!("Non-integer value for {}", r.field)))?;
        match r.field.as_str() {
            "wallet_balance" => {
                let local = member::find_by_id(pool, &r.member_id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Member {}", r.member_id)))?;
                let delta = target - local.wallet_balance;
                if delta == 0 {
                    continue;
                }
                let tx_type = if delta > 0 { TxType::Credit } else { TxType::Debit };
                wallet::post_transaction(
                    pool,
                    TransactionCreate {
                        member_id: r.member_id.clone(),
                        tx_type,
                        amount: delta,
                        description: "Sync adjustment".to_string(),
                        reference: None,
                    },
                )
                .await?;
                applied += 1;
            }
            "outstanding_fines" => {
                let now = shared::util::now_millis();
                member::set_outstanding_fines(pool, &r.member_id, target, now).await?;
                applied += 1;
            }
            other => {
                return Err(AppError::validation(format!(
                    "Unresolvable conflict field: {other}"
                )));
            }
        }
        tracing::info!(
            member_id = %r.member_id,
            field = %r.field,
            value = target,
            "Sync conflict resolved from sheet"
        );
    }
    Ok(applied)
}
