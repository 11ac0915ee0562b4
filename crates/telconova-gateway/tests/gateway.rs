// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway tests covering both backend modes through `from_config`.

use serde_json::json;
use telconova_config::TelconovaConfig;
use telconova_core::types::{
    AssignmentRequest, LoginCredentials, ReportHistoryQuery, TechnicianFilter, WorkOrderFilter,
    WorkOrderStatus,
};
use telconova_core::DispatchError;
use telconova_gateway::Gateway;
use tracing_test::traced_test;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote_config(base_url: String, token_dir: &std::path::Path) -> TelconovaConfig {
    let mut config = TelconovaConfig::default();
    config.api.base_url = base_url;
    config.api.use_mock = false;
    config.session.token_dir = Some(token_dir.display().to_string());
    config
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-gateway-secret",
            "tokenType": "Bearer",
            "email": "test@example.com"
        })))
        .mount(server)
        .await;
}

fn remote_login() -> LoginCredentials {
    LoginCredentials {
        email: "test@example.com".into(),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn default_config_uses_the_mock() {
    let gateway = Gateway::from_config(&TelconovaConfig::default()).unwrap();

    let login = gateway
        .login(LoginCredentials {
            email: "supervisor_test@telconova.com".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.role, "supervisor");

    let technicians = gateway
        .technicians(TechnicianFilter::default())
        .await
        .unwrap();
    assert!(!technicians.is_empty());

    let order = gateway.assign_automatically("WO-1001").await.unwrap();
    assert_eq!(order.status, WorkOrderStatus::Assigned);

    let history = gateway
        .report_history(ReportHistoryQuery::default())
        .await
        .unwrap();
    assert_eq!(history.pagination.page, 1);

    gateway.logout().await.unwrap();
}

#[tokio::test]
async fn mock_rejects_the_remote_test_user() {
    let gateway = Gateway::from_config(&TelconovaConfig::default()).unwrap();
    let err = gateway.login(remote_login()).await.unwrap_err();
    assert!(matches!(err, DispatchError::Unauthorized(_)));
}

#[tokio::test]
async fn remote_session_survives_a_new_gateway() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .and(header("authorization", "Bearer jwt-gateway-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = remote_config(server.uri(), dir.path());
    {
        let gateway = Gateway::from_config(&config).unwrap();
        let login = gateway.login(remote_login()).await.unwrap();
        assert_eq!(login.token, "jwt-gateway-secret");
    }

    let restarted = Gateway::from_config(&config).unwrap();
    let orders = restarted
        .work_orders(WorkOrderFilter::default())
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn remote_logout_drops_authorization() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/assignments/manual"))
        .respond_with(ResponseTemplate::new(403).set_body_raw("Sin sesión", "text/plain"))
        .mount(&server)
        .await;

    let gateway = Gateway::from_config(&remote_config(server.uri(), dir.path())).unwrap();
    gateway.login(remote_login()).await.unwrap();
    gateway.logout().await.unwrap();

    let err = gateway
        .assign_manually(AssignmentRequest::manual("WO-1", "2"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Sin sesión");

    let requests = server.received_requests().await.unwrap();
    let assignment = requests
        .iter()
        .find(|r| r.url.path() == "/assignments/manual")
        .unwrap();
    assert!(!assignment.headers.contains_key("authorization"));

    // A new gateway over the same directory starts logged out.
    let restarted = Gateway::from_config(&remote_config(server.uri(), dir.path())).unwrap();
    restarted
        .assign_manually(AssignmentRequest::manual("WO-1", "2"))
        .await
        .unwrap_err();
    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .filter(|r| r.url.path() == "/assignments/manual")
            .all(|r| !r.headers.contains_key("authorization"))
    );
}

#[tokio::test]
async fn token_file_with_trailing_newline_still_logs_in() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;
    std::fs::write(dir.path().join("auth_token"), "stale-token\n").unwrap();

    let gateway = Gateway::from_config(&remote_config(server.uri(), dir.path())).unwrap();
    let login = gateway.login(remote_login()).await.unwrap();
    assert_eq!(login.token, "jwt-gateway-secret");

    let requests = server.received_requests().await.unwrap();
    let sent = requests[0].headers.get("authorization").unwrap();
    assert_eq!(sent.to_str().unwrap(), "Bearer stale-token");
}

#[tokio::test]
#[traced_test]
async fn token_never_reaches_the_logs() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_login(&server).await;

    let gateway = Gateway::from_config(&remote_config(server.uri(), dir.path())).unwrap();
    gateway.login(remote_login()).await.unwrap();

    assert!(logs_contain("dispatch backend selected"));
    assert!(logs_contain("auth token stored"));
    assert!(!logs_contain("jwt-gateway-secret"));
}
