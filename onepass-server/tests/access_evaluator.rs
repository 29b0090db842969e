//! Access evaluator integration tests.
//!
//! Lateness is steered by moving the resumption cutoff to the edges of the
//! day ("00:00" = everyone is late, "23:59" = nobody is), so the wall clock
//! never needs mocking.

mod common;

use common::{seed_member, set_resumption, set_rules, test_db};
use onepass_server::access;
use onepass_server::db::repository::{access_log, ledger, member, visitor};
use shared::models::{
    AccessLogQuery, AccessOutcome, MemberStatus, SystemConfigUpdate, TxType, Visitor,
    VisitorStatus,
};

#[tokio::test]
async fn late_fine_applied_exactly_once() {
    let db = test_db().await;
    set_resumption(&db.pool, "00:00").await;
    seed_member(&db.pool, "VG001", "Ada Obi").await;

    let first = access::evaluate(&db.pool, "VG001", "scan", None)
        .await
        .expect("first scan");
    assert!(first.allowed);
    assert!(first.message.contains("LATE ARRIVAL"));
    let m = first.member.expect("member in result");
    assert_eq!(m.status, MemberStatus::Late);
    assert_eq!(m.outstanding_fines, 5000);
    assert_eq!(m.wallet_balance, -5000);

    // Second scan in the same late window: still allowed, no second fine.
    let second = access::evaluate(&db.pool, "VG001", "scan", None)
        .await
        .expect("second scan");
    assert!(second.allowed);
    assert!(second.message.contains("Access Granted"));
    let m = second.member.expect("member in result");
    assert_eq!(m.outstanding_fines, 5000);
    assert_eq!(m.wallet_balance, -5000);

    let entries = ledger::find_by_member(&db.pool, "VG001", 10)
        .await
        .expect("ledger");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tx_type, TxType::Fine);
    assert_eq!(entries[0].amount, -5000);
    assert_eq!(entries[0].description, "Late Arrival Fine");
}

#[tokio::test]
async fn on_time_scan_has_no_side_effects() {
    let db = test_db().await;
    set_resumption(&db.pool, "23:59").await;
    seed_member(&db.pool, "VG002", "Bola Ade").await;

    let result = access::evaluate(&db.pool, "VG002", "scan", None)
        .await
        .expect("scan");
    assert!(result.allowed);
    assert!(result.message.contains("Access Granted"));
    let m = result.member.expect("member in result");
    assert_eq!(m.status, MemberStatus::Active);
    assert_eq!(m.outstanding_fines, 0);
    assert_eq!(m.wallet_balance, 0);
}

#[tokio::test]
async fn blocked_and_suspended_members_denied() {
    let db = test_db().await;
    set_resumption(&db.pool, "23:59").await;
    seed_member(&db.pool, "VG003", "Chi Eze").await;
    seed_member(&db.pool, "VG004", "Dan Uche").await;
    let now = shared::util::now_millis();
    member::set_status(&db.pool, "VG003", MemberStatus::Blocked, now)
        .await
        .expect("block");
    member::set_status(&db.pool, "VG004", MemberStatus::Suspended, now)
        .await
        .expect("suspend");

    let blocked = access::evaluate(&db.pool, "VG003", "scan", None)
        .await
        .expect("scan blocked");
    assert!(!blocked.allowed);
    assert!(blocked.member.is_some());

    let suspended = access::evaluate(&db.pool, "VG004", "scan", None)
        .await
        .expect("scan suspended");
    assert!(!suspended.allowed);

    // Denied members accrue no fines.
    let m = member::find_by_id(&db.pool, "VG003").await.expect("find").expect("exists");
    assert_eq!(m.outstanding_fines, 0);
}

#[tokio::test]
async fn unknown_identifier_is_distinct_denial() {
    let db = test_db().await;

    let result = access::evaluate(&db.pool, "NOBODY", "scan", None)
        .await
        .expect("scan");
    assert!(!result.allowed);
    assert_eq!(result.message, "Identity Unknown. Protocol Denied.");
    assert!(result.member.is_none());
    assert!(result.visitor.is_none());
}

#[tokio::test]
async fn empty_identifier_rejected() {
    let db = test_db().await;
    assert!(access::evaluate(&db.pool, "   ", "scan", None).await.is_err());
}

async fn seed_visitor(pool: &sqlx::SqlitePool, id: &str, expires_at: i64) {
    let now = shared::util::now_millis();
    visitor::create(
        pool,
        &Visitor {
            id: id.to_string(),
            host_id: "VG001".to_string(),
            name: "Guest".to_string(),
            purpose: "Meeting".to_string(),
            status: VisitorStatus::CheckedIn,
            checked_in_at: now,
            expires_at,
        },
    )
    .await
    .expect("seed visitor");
}

#[tokio::test]
async fn visitor_pass_validity() {
    let db = test_db().await;
    let now = shared::util::now_millis();
    seed_visitor(&db.pool, "VIS-AAA", now + 60 * 60_000).await;
    seed_visitor(&db.pool, "VIS-BBB", now - 1).await;

    let valid = access::evaluate(&db.pool, "VIS-AAA", "scan", None)
        .await
        .expect("valid scan");
    assert!(valid.allowed);
    assert_eq!(valid.message, "Visitor Pass Valid.");
    assert!(valid.visitor.is_some());

    let expired = access::evaluate(&db.pool, "VIS-BBB", "scan", None)
        .await
        .expect("expired scan");
    assert!(!expired.allowed);
    assert_eq!(
        expired.message,
        "Visitor Pass Expired or Already Checked Out."
    );
    // Clock expiry is persisted on the record.
    let v = visitor::find_by_id(&db.pool, "VIS-BBB")
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(v.status, VisitorStatus::Expired);
}

#[tokio::test]
async fn checked_out_visitor_denied() {
    let db = test_db().await;
    let now = shared::util::now_millis();
    seed_visitor(&db.pool, "VIS-CCC", now + 60 * 60_000).await;
    visitor::set_status(&db.pool, "VIS-CCC", VisitorStatus::CheckedOut)
        .await
        .expect("checkout");

    let result = access::evaluate(&db.pool, "VIS-CCC", "scan", None)
        .await
        .expect("scan");
    assert!(!result.allowed);
}

#[tokio::test]
async fn every_evaluation_appends_one_log_row() {
    let db = test_db().await;
    set_resumption(&db.pool, "23:59").await;
    seed_member(&db.pool, "VG005", "Efe Ojo").await;
    let now = shared::util::now_millis();
    seed_visitor(&db.pool, "VIS-DDD", now + 60 * 60_000).await;

    access::evaluate(&db.pool, "VG005", "scan", Some("GATE-1")).await.expect("member scan");
    access::evaluate(&db.pool, "VIS-DDD", "scan", None).await.expect("visitor scan");
    access::evaluate(&db.pool, "NOBODY", "scan", None).await.expect("unknown scan");

    let all = access_log::query(&db.pool, &AccessLogQuery::default())
        .await
        .expect("query logs");
    assert_eq!(all.len(), 3);

    let denied = access_log::query(
        &db.pool,
        &AccessLogQuery {
            outcome: Some(AccessOutcome::Denied),
            ..Default::default()
        },
    )
    .await
    .expect("query denied");
    assert_eq!(denied.len(), 1);
    assert_eq!(denied[0].actor_id, "NOBODY");

    let gate = access_log::query(
        &db.pool,
        &AccessLogQuery {
            actor_id: Some("VG005".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("query actor");
    assert_eq!(gate.len(), 1);
    assert_eq!(gate[0].device_id.as_deref(), Some("GATE-1"));
}

#[tokio::test]
async fn auto_suspend_takes_effect_on_next_scan() {
    let db = test_db().await;
    set_rules(
        &db.pool,
        SystemConfigUpdate {
            resumption_time: Some("00:00".to_string()),
            auto_suspend_threshold: Some(5000),
            ..Default::default()
        },
    )
    .await;
    seed_member(&db.pool, "VG006", "Femi Ayo").await;

    // The fine pushes fines to the threshold; this scan is still granted.
    let first = access::evaluate(&db.pool, "VG006", "scan", None)
        .await
        .expect("first scan");
    assert!(first.allowed);
    let m = first.member.expect("member in result");
    assert_eq!(m.status, MemberStatus::Suspended);

    let second = access::evaluate(&db.pool, "VG006", "scan", None)
        .await
        .expect("second scan");
    assert!(!second.allowed);
}
