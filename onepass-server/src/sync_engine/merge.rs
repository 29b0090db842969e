//! Merge Commit
//!
//! Snapshot-then-swap: snapshot every member's locally-owned fields, compile
//! the admitted import rows into full member records (inheriting the snapshot
//! or zeroed), then replace the member table. Sources refresh identity, role,
//! and status only. The whole pass is one SQLite
//! transaction, so concurrent readers see pre- or post-merge state only.
//! Ledger rows of members who disappear from the import are retained as
//! archived history.

use std::collections::{HashMap, HashSet};

use sqlx::SqlitePool;

use super::source::{parse_source, ImportRow};
use crate::db::repository::member::{self, FinancialSnapshot};
use crate::db::repository::system_config;
use crate::utils::{AppError, AppResult};
use shared::models::{Member, MergeReport, SourceTable};

pub async fn merge_sources(pool: &SqlitePool, sources: &[SourceTable]) -> AppResult<MergeReport> {
    let now = shared::util::now_millis();
    let mut report = MergeReport::default();

    // Admission: first occurrence of an id wins across all sources.
    let mut seen: HashSet<String> = HashSet::new();
    let mut admitted: Vec<ImportRow> = Vec::new();
    for table in sources {
        let Some(rows) = parse_source(table) else {
            tracing::warn!(source = %table.name, "Source skipped: id or name column unresolved");
            report.skipped_sources.push(table.name.clone());
            continue;
        };
        for row in rows {
            if seen.insert(row.id.clone()) {
                admitted.push(row);
            } else {
                report.duplicates_dropped += 1;
            }
        }
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let snapshot: HashMap<String, FinancialSnapshot> = member::financial_snapshot(&mut *tx)
        .await?
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();

    let compiled: Vec<Member> = admitted
        .into_iter()
        .map(|row| {
            let prior = snapshot.get(&row.id);
            if prior.is_some() {
                report.retained_financials += 1;
            } else {
                report.new_members += 1;
            }
            Member {
                id: row.id,
                organization_id: prior.map(|p| p.organization_id.clone()).unwrap_or_default(),
                name: row.name,
                role: row.role,
                status: row.status,
                photo_url: row.photo_url,
                wallet_balance: prior.map(|p| p.wallet_balance).unwrap_or(0),
                outstanding_fines: prior.map(|p| p.outstanding_fines).unwrap_or(0),
                reward_points: prior.map(|p| p.reward_points).unwrap_or(0),
                last_dashboard_view: prior.and_then(|p| p.last_dashboard_view),
                session_progress: prior.map(|p| p.session_progress).unwrap_or(0),
                password_hash: prior.and_then(|p| p.password_hash.clone()),
                created_at: prior.map(|p| p.created_at).unwrap_or(now),
                updated_at: now,
            }
        })
        .collect();

    report.imported = compiled.len();
    report.dropped_members = snapshot.keys().filter(|id| !seen.contains(*id)).count();

    member::delete_all(&mut *tx).await?;
    for m in &compiled {
        member::insert_row(&mut *tx, m).await?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    system_config::set_last_synced(pool, now).await?;

    tracing::info!(
        imported = report.imported,
        new_members = report.new_members,
        retained = report.retained_financials,
        duplicates = report.duplicates_dropped,
        dropped = report.dropped_members,
        skipped = report.skipped_sources.len(),
        "Merge committed"
    );

    Ok(report)
}
