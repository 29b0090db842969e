//! Access Evaluator
//!
//! Given a presented identifier, decide allow/deny and apply side effects:
//! the one-shot late fine, auto-suspension, and the access log entry. All
//! member-path side effects commit in a single database transaction.
//!
//! Lookup order is member store first, then visitor store. The source
//! product flip-flopped on this; member-first is the documented choice here
//! and is covered by tests.

use sqlx::SqlitePool;

use crate::db::repository::{access_log, member, system_config, visitor};
use crate::utils::{AppError, AppResult, time};
use crate::wallet::post_in_tx;
use shared::client::ScanResult;
use shared::models::{
    AccessOutcome, ActorKind, MemberStatus, TransactionCreate, TxType, VisitorStatus,
};

/// Evaluate one presented identifier.
///
/// `action` names the entry point ("scan" from the desk, the event type for
/// hardware events) and lands in the access log.
pub async fn evaluate(
    pool: &SqlitePool,
    identifier: &str,
    action: &str,
    device_id: Option<&str>,
) -> AppResult<ScanResult> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(AppError::validation("Identifier must not be empty"));
    }

    let rules = system_config::get(pool).await?;
    let now = shared::util::now_millis();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Member path
    if let Some(m) = member::find_by_id(&mut *tx, identifier).await? {
        let result = match m.status {
            MemberStatus::Blocked | MemberStatus::Suspended => {
                let message = format!("Access denied: account is {}.", m.status);
                access_log::append(
                    &mut *tx,
                    identifier,
                    ActorKind::Member,
                    action,
                    AccessOutcome::Denied,
                    m.status.as_str(),
                    device_id,
                    now,
                )
                .await?;
                ScanResult {
                    allowed: false,
                    message,
                    member: Some(m),
                    visitor: None,
                }
            }
            _ => {
                let resumption = time::parse_resumption(&rules.resumption_time);
                let is_late_arrival =
                    time::is_past_resumption(now, resumption) && m.status != MemberStatus::Late;

                let (message, note) = if is_late_arrival {
                    // At most once per late window: the status guard above
                    // stops every later scan on the same late day.
                    member::mark_late_with_fine(&mut *tx, identifier, rules.late_fine_amount, now)
                        .await?;
                    post_in_tx(
                        &mut tx,
                        TransactionCreate {
                            member_id: identifier.to_string(),
                            tx_type: TxType::Fine,
                            amount: -rules.late_fine_amount,
                            description: "Late Arrival Fine".to_string(),
                            reference: None,
                        },
                    )
                    .await?;

                    let new_fines = m.outstanding_fines + rules.late_fine_amount;
                    if rules.auto_suspend_threshold > 0
                        && new_fines >= rules.auto_suspend_threshold
                    {
                        // Debt crossed the line: suspension takes effect on
                        // the next scan, this one stays granted.
                        member::set_status(&mut *tx, identifier, MemberStatus::Suspended, now)
                            .await?;
                        tracing::warn!(
                            member_id = %identifier,
                            outstanding_fines = new_fines,
                            threshold = rules.auto_suspend_threshold,
                            "Member auto-suspended over debt threshold"
                        );
                    }

                    (
                        format!(
                            "LATE ARRIVAL. Fine of {} auto-applied to wallet.",
                            rules.late_fine_amount
                        ),
                        "Late Entry",
                    )
                } else if m.status == MemberStatus::Late {
                    ("Passport verified. Access Granted.".to_string(), "Late Entry")
                } else {
                    ("Passport verified. Access Granted.".to_string(), "On Time")
                };

                access_log::append(
                    &mut *tx,
                    identifier,
                    ActorKind::Member,
                    action,
                    AccessOutcome::Granted,
                    note,
                    device_id,
                    now,
                )
                .await?;

                // Return post-side-effect state
                let refreshed = member::find_by_id(&mut *tx, identifier).await?;
                ScanResult {
                    allowed: true,
                    message,
                    member: refreshed,
                    visitor: None,
                }
            }
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        return Ok(result);
    }

    // Visitor path
    if let Some(v) = visitor::find_by_id(&mut *tx, identifier).await? {
        let expired_by_clock = now > v.expires_at;
        let allowed = v.status == VisitorStatus::CheckedIn && !expired_by_clock;

        if v.status == VisitorStatus::CheckedIn && expired_by_clock {
            visitor::set_status(&mut *tx, identifier, VisitorStatus::Expired).await?;
        }

        let (outcome, message, note) = if allowed {
            (
                AccessOutcome::Granted,
                "Visitor Pass Valid.".to_string(),
                "Visitor",
            )
        } else {
            (
                AccessOutcome::Denied,
                "Visitor Pass Expired or Already Checked Out.".to_string(),
                "Visitor Pass Invalid",
            )
        };

        access_log::append(
            &mut *tx,
            identifier,
            ActorKind::Visitor,
            action,
            outcome,
            note,
            device_id,
            now,
        )
        .await?;

        let refreshed = visitor::find_by_id(&mut *tx, identifier).await?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        return Ok(ScanResult {
            allowed,
            message,
            member: None,
            visitor: refreshed,
        });
    }

    // Unknown identifier: denied, and distinguishable from a policy denial
    // by the absence of both member and visitor in the result.
    access_log::append(
        &mut *tx,
        identifier,
        ActorKind::Unknown,
        action,
        AccessOutcome::Denied,
        "Identity Unknown",
        device_id,
        now,
    )
    .await?;
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(ScanResult {
        allowed: false,
        message: "Identity Unknown. Protocol Denied.".to_string(),
        member: None,
        visitor: None,
    })
}
