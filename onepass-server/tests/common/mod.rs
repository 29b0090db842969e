//! Shared test fixtures: temp-file SQLite database plus seed helpers.
//!
//! WAL-mode SQLite wants a real file, so each fixture owns a tempdir that
//! lives as long as the pool.
#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

use onepass_server::db::DbService;
use onepass_server::db::repository::{member, system_config};
use shared::models::{Member, MemberCreate, SystemConfigUpdate};

pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("onepass-test.db");
    let db = DbService::new(path.to_str().expect("utf8 path"))
        .await
        .expect("open test database");
    TestDb {
        pool: db.pool,
        _dir: dir,
    }
}

pub async fn seed_member(pool: &SqlitePool, id: &str, name: &str) -> Member {
    member::create(
        pool,
        MemberCreate {
            id: id.to_string(),
            name: name.to_string(),
            organization_id: None,
            role: None,
            status: None,
            photo_url: None,
            password: None,
        },
        None,
    )
    .await
    .expect("seed member")
}

/// Point the late cutoff far enough in a direction that the wall clock
/// cannot cross it mid-test.
pub async fn set_resumption(pool: &SqlitePool, cutoff: &str) {
    system_config::update(
        pool,
        SystemConfigUpdate {
            resumption_time: Some(cutoff.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update resumption time");
}

pub async fn set_rules(pool: &SqlitePool, update: SystemConfigUpdate) {
    system_config::update(pool, update)
        .await
        .expect("update system config");
}
