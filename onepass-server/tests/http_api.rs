//! HTTP surface tests: login semantics, token gating, role gating, and the
//! maintenance-mode lockout, exercised through the real router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use onepass_server::auth::password;
use onepass_server::db::repository::member;
use onepass_server::{Config, Server, ServerState};
use shared::models::{MemberCreate, Role};

struct TestApp {
    router: Router,
    state: ServerState,
    _dir: TempDir,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("onepass-http-test.db");
    let config = Config::with_database_path(path.to_str().expect("utf8 path"));
    let state = ServerState::initialize(&config).await.expect("state");
    TestApp {
        router: Server::build_router(state.clone()),
        state,
        _dir: dir,
    }
}

async fn seed_login_member(state: &ServerState, id: &str, name: &str, role: Role, pass: &str) {
    let hash = password::hash_password(pass).expect("hash");
    member::create(
        state.pool(),
        MemberCreate {
            id: id.to_string(),
            name: name.to_string(),
            organization_id: None,
            role: Some(role),
            status: None,
            photo_url: None,
            password: None,
        },
        Some(hash),
    )
    .await
    .expect("seed member");
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(router: &Router, id: &str, pass: &str) -> String {
    let (status, body) = send_json(
        router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"id": id, "password": pass})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn login_success_and_me() {
    let app = test_app().await;
    seed_login_member(&app.state, "VG001", "Ada Obi", Role::Member, "secret-pass").await;

    let token = login(&app.router, "VG001", "secret-pass").await;

    let (status, body) =
        send_json(&app.router, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "VG001");
    // The hash never leaves the server.
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let app = test_app().await;
    seed_login_member(&app.state, "VG002", "Bola Ade", Role::Member, "right-pass").await;
    // Imported member without interactive credentials.
    member::create(
        app.state.pool(),
        MemberCreate {
            id: "VG003".to_string(),
            name: "Chi Eze".to_string(),
            organization_id: None,
            role: None,
            status: None,
            photo_url: None,
            password: None,
        },
        None,
    )
    .await
    .expect("seed");

    for (id, pass) in [
        ("VG002", "wrong-pass"),
        ("VG003", "anything"),
        ("NOBODY", "anything"),
    ] {
        let (status, body) = send_json(
            &app.router,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"id": id, "password": pass})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid identifier or password");
    }
}

#[tokio::test]
async fn api_requires_token() {
    let app = test_app().await;
    let (status, body) = send_json(&app.router, "GET", "/api/members", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, _) = send_json(&app.router, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_routes_reject_members() {
    let app = test_app().await;
    seed_login_member(&app.state, "VG004", "Dan Uche", Role::Member, "member-pass").await;
    seed_login_member(&app.state, "ADM01", "Efe Ojo", Role::Admin, "admin-pass").await;

    let member_token = login(&app.router, "VG004", "member-pass").await;
    let admin_token = login(&app.router, "ADM01", "admin-pass").await;

    let payload = json!({"id": "VG900", "name": "New Member"});
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/members",
        Some(&member_token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/api/members",
        Some(&admin_token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn maintenance_mode_gates_mutations() {
    let app = test_app().await;
    seed_login_member(&app.state, "ADM02", "Femi Ayo", Role::Admin, "admin-pass").await;
    let token = login(&app.router, "ADM02", "admin-pass").await;

    let (status, _) = send_json(
        &app.router,
        "PUT",
        "/api/config",
        Some(&token),
        Some(json!({"maintenance_mode": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Mutations blocked, reads fine.
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/visitors",
        Some(&token),
        Some(json!({"name": "Guest", "host_id": "ADM02"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "E0007");

    let (status, _) = send_json(&app.router, "GET", "/api/members", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Config stays reachable so the flag can be lifted again.
    let (status, _) = send_json(
        &app.router,
        "PUT",
        "/api/config",
        Some(&token),
        Some(json!({"maintenance_mode": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/api/visitors",
        Some(&token),
        Some(json!({"name": "Guest", "host_id": "ADM02"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn locked_wallet_rejects_withdrawal_request() {
    let app = test_app().await;
    seed_login_member(&app.state, "VG006", "Jide Aba", Role::Member, "member-pass").await;
    let token = login(&app.router, "VG006", "member-pass").await;

    // Never acknowledged the dashboard, so the gate is closed.
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/wallet/withdrawals",
        Some(&token),
        Some(json!({"amount": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("Wallet is locked")
    );

    // Rejection left no withdrawal row behind.
    let (status, body) =
        send_json(&app.router, "GET", "/api/wallet/withdrawals", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("list").len(), 0);

    // Acknowledging opens the gate; the next rejection is about balance,
    // not the lock.
    let (status, _) = send_json(
        &app.router,
        "POST",
        "/api/members/VG006/dashboard-view",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/wallet/withdrawals",
        Some(&token),
        Some(json!({"amount": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("Insufficient balance")
    );
}

#[tokio::test]
async fn unreachable_sheet_endpoint_reports_why() {
    let app = test_app().await;
    seed_login_member(&app.state, "ADM05", "Kola Edo", Role::Admin, "admin-pass").await;
    let token = login(&app.router, "ADM05", "admin-pass").await;

    // Nothing listens on the discard port.
    let (status, _) = send_json(
        &app.router,
        "PUT",
        "/api/config",
        Some(&token),
        Some(json!({"sync_endpoint": "http://127.0.0.1:9/"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/sync/preview",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "E9003");
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("Sheet endpoint unreachable")
    );
}

#[tokio::test]
async fn hardware_event_matches_desk_scan() {
    let app = test_app().await;
    seed_login_member(&app.state, "ADM04", "Hal Ede", Role::Admin, "admin-pass").await;
    seed_login_member(&app.state, "VG005", "Ify Nwa", Role::Member, "member-pass").await;
    let token = login(&app.router, "ADM04", "admin-pass").await;

    // Push the cutoff out of reach so both evaluations are on-time.
    let (status, _) = send_json(
        &app.router,
        "PUT",
        "/api/config",
        Some(&token),
        Some(json!({"resumption_time": "23:59"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, desk) = send_json(
        &app.router,
        "POST",
        "/api/scan",
        Some(&token),
        Some(json!({"id": "VG005"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, hardware) = send_json(
        &app.router,
        "POST",
        "/api/scan/hardware",
        Some(&token),
        Some(json!({
            "device_id": "TURNSTILE-1",
            "organization_id": "ORG-1",
            "actor_type": "member",
            "actor_id": "VG005",
            "event_type": "entry",
            "timestamp": shared::util::now_millis(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same evaluation either way in.
    assert_eq!(desk["data"]["allowed"], true);
    assert_eq!(hardware["data"]["allowed"], desk["data"]["allowed"]);
    assert_eq!(hardware["data"]["message"], desk["data"]["message"]);

    // Both evaluations were logged; the device event kept its device id.
    let logs = onepass_server::db::repository::access_log::query(
        app.state.pool(),
        &shared::models::AccessLogQuery {
            actor_id: Some("VG005".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("logs");
    assert_eq!(logs.len(), 2);
    assert!(logs
        .iter()
        .any(|l| l.device_id.as_deref() == Some("TURNSTILE-1") && l.action == "entry"));
}

#[tokio::test]
async fn scan_endpoint_runs_evaluation() {
    let app = test_app().await;
    seed_login_member(&app.state, "ADM03", "Gina Obi", Role::Admin, "admin-pass").await;
    let token = login(&app.router, "ADM03", "admin-pass").await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/scan",
        Some(&token),
        Some(json!({"id": "NOBODY"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allowed"], false);
    assert_eq!(body["data"]["message"], "Identity Unknown. Protocol Denied.");
}
