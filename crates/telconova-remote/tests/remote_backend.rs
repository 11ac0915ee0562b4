// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for `RemoteBackend` against a wiremock server.

use std::sync::Arc;

use serde_json::json;
use telconova_config::model::ApiConfig;
use telconova_core::types::{
    Availability, LoginCredentials, RegisterCredentials, ReportHistoryQuery, TechnicianFilter,
    WorkOrderFilter, WorkOrderStatus,
};
use telconova_core::{DispatchBackend, DispatchError};
use telconova_remote::normalize::GENERIC_ERROR_MESSAGE;
use telconova_remote::RemoteBackend;
use telconova_session::{FileStore, MemoryStore, TokenStore};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer, tokens: Arc<TokenStore>) -> RemoteBackend {
    let config = ApiConfig {
        base_url: server.uri(),
        use_mock: false,
        timeout_secs: Some(5),
    };
    RemoteBackend::new(&config, tokens).unwrap()
}

fn memory_tokens() -> Arc<TokenStore> {
    Arc::new(TokenStore::hydrate(Arc::new(MemoryStore::new())))
}

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "test@example.com".into(),
        password: "secret".into(),
    }
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "test@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "tokenType": "Bearer",
            "email": "test@example.com"
        })))
        .mount(server)
        .await;
}

fn report_json(encoded: bool) -> serde_json::Value {
    let filtros = json!({
        "startDate": "2026-01-01",
        "endDate": "2026-01-31",
        "serviceType": "installation",
        "zone": "Norte"
    });
    let metricas = json!([{
        "technicianId": "1",
        "technicianName": "Ana Ruiz",
        "zone": "Norte",
        "specialty": "Fibra",
        "totalOrders": 4,
        "completedOrders": 3,
        "inProgressOrders": 1,
        "avgResolutionTime": 2.5
    }]);
    let resumen = json!({
        "totalOrders": 4,
        "totalCompleted": 3,
        "totalInProgress": 1,
        "avgResolutionTime": 2.5
    });
    let (filtros, metricas, resumen) = if encoded {
        (
            json!(filtros.to_string()),
            json!(metricas.to_string()),
            json!(resumen.to_string()),
        )
    } else {
        (filtros, metricas, resumen)
    };
    json!({
        "idReporte": 12,
        "nombreReporte": "Enero Norte",
        "filtros": filtros,
        "metricas": metricas,
        "resumen": resumen,
        "creadoEn": "2026-02-01T10:00:00Z",
        "creadoPor": 3,
        "creadoPorNombre": "Supervisor"
    })
}

#[tokio::test]
async fn login_stores_token_and_reshapes_response() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-123").await;

    let tokens = memory_tokens();
    let backend = backend_for(&server, tokens.clone());
    let resp = backend.login(credentials()).await.unwrap();

    assert_eq!(resp.message, "Login successful");
    assert_eq!(resp.token, "jwt-123");
    assert_eq!(resp.user.id, "test@example.com");
    assert_eq!(resp.user.username, "test@example.com");
    assert_eq!(resp.user.role, "supervisor");
    assert_eq!(tokens.authorization_header().as_deref(), Some("Bearer jwt-123"));
}

#[tokio::test]
async fn login_token_survives_restart() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-persisted").await;
    let dir = tempfile::tempdir().unwrap();

    {
        let tokens = Arc::new(TokenStore::hydrate(Arc::new(FileStore::new(dir.path()))));
        let backend = backend_for(&server, tokens);
        backend.login(credentials()).await.unwrap();
    }

    // A fresh process reads the same directory and resumes the session.
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .and(header("authorization", "Bearer jwt-persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(TokenStore::hydrate(Arc::new(FileStore::new(dir.path()))));
    assert!(tokens.is_authenticated());
    let backend = backend_for(&server, tokens);
    let orders = backend.work_orders(WorkOrderFilter::default()).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn logout_removes_token_and_authorization_header() {
    let server = MockServer::start().await;
    mount_login(&server, "jwt-gone").await;
    Mock::given(method("GET"))
        .and(path("/api/technicians/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(TokenStore::hydrate(Arc::new(FileStore::new(dir.path()))));
    let backend = backend_for(&server, tokens.clone());

    backend.login(credentials()).await.unwrap();
    backend.logout().await.unwrap();
    assert!(!tokens.is_authenticated());

    backend
        .technicians(TechnicianFilter::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let listing = requests
        .iter()
        .find(|r| r.url.path() == "/api/technicians/all")
        .unwrap();
    assert!(!listing.headers.contains_key("authorization"));

    // Nothing is left on disk for the next run either.
    let restarted = TokenStore::hydrate(Arc::new(FileStore::new(dir.path())));
    assert!(!restarted.is_authenticated());
}

#[tokio::test]
async fn rejected_login_keeps_previous_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Credenciales inválidas"})),
        )
        .mount(&server)
        .await;

    let tokens = memory_tokens();
    let backend = backend_for(&server, tokens.clone());
    let err = backend.login(credentials()).await.unwrap_err();

    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert_eq!(err.status(), Some(401));
    assert!(!tokens.is_authenticated());
}

#[tokio::test]
async fn technicians_are_translated_and_filtered_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/technicians/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"idTecnico": 1, "nameTecnico": "John  Doe", "zoneTecnico": "North",
             "workloadTecnico": "2", "specialtyTecnico": "Fibra"},
            {"idTecnico": 2, "nameTecnico": "Eva Sol", "zoneTecnico": "South",
             "workloadTecnico": "1", "specialtyTecnico": "Fibra"},
            {"idTecnico": 3, "nameTecnico": "Max Paz", "zoneTecnico": "North",
             "workloadTecnico": "8", "specialtyTecnico": "Cobre"}
        ])))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let north = backend
        .technicians(TechnicianFilter {
            zone: Some("North".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(north.len(), 2);
    assert_eq!(north[0].id, "1");
    assert_eq!(north[0].email, "john.doe@telconova.com");
    assert_eq!(north[0].availability, Availability::Available);
    assert_eq!(north[1].id, "3");
    assert_eq!(north[1].availability, Availability::Busy);
    assert_eq!(north[1].current_load, 8);
}

#[tokio::test]
async fn single_technician_uses_the_same_translation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/technicians/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idTecnico": 7, "nameTecnico": "Lia Mar", "zoneTecnico": "Este",
            "workloadTecnico": 6, "specialtyTecnico": "Redes"
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let tech = backend.technician("7").await.unwrap();
    assert_eq!(tech.email, "lia.mar@telconova.com");
    assert_eq!(tech.phone, "+1234567890");
    assert_eq!(tech.availability, Availability::Busy);
}

#[tokio::test]
async fn work_order_filters_become_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .and(query_param("status", "pending"))
        .and(query_param("zona", "Norte"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "WO-1",
            "zona": "Norte",
            "servicio": "installation",
            "descripcion": "Instalar fibra",
            "status": "pending",
            "prioridad": "alta",
            "creadoEn": "2026-01-10T08:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let orders = backend
        .work_orders(WorkOrderFilter {
            status: Some(WorkOrderStatus::Pending),
            zone: Some("Norte".into()),
        })
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "WO-1");
    assert!(orders[0].assigned_to.is_none());
}

#[tokio::test]
async fn automatic_assignment_posts_order_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assignments/automatic"))
        .and(body_json(json!({"idOrden": "WO-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "WO-2",
            "zona": "Sur",
            "servicio": "repair",
            "descripcion": "Reparar",
            "status": "assigned",
            "assignedTo": "4",
            "creadoEn": "2026-01-10T08:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let order = backend.assign_automatically("WO-2").await.unwrap();
    assert_eq!(order.status, WorkOrderStatus::Assigned);
    assert_eq!(order.assigned_to.as_deref(), Some("4"));
}

#[tokio::test]
async fn plain_acknowledgements_are_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Usuario registrado", "text/plain"))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let resp = backend
        .register(RegisterCredentials {
            name: "Nuevo".into(),
            role: "supervisor".into(),
            email: "nuevo@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(resp.message, "Usuario registrado");
}

#[tokio::test]
async fn encoded_and_structured_reports_decode_identically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/history/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": report_json(true)})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/history/13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": report_json(false)})))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let encoded = backend.report_detail("12").await.unwrap();
    let structured = backend.report_detail("13").await.unwrap();

    assert_eq!(encoded.filters, structured.filters);
    assert_eq!(encoded.metrics, structured.metrics);
    assert_eq!(encoded.summary, structured.summary);
    assert_eq!(encoded.id, "12");
    assert_eq!(encoded.created_by, "3");
    assert_eq!(encoded.summary.total_completed, 3);
}

#[tokio::test]
async fn report_history_decodes_every_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/history"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("sortBy", "creadoEn"))
        .and(query_param("sortOrder", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "reports": [report_json(true), report_json(false)],
                "pagination": {"page": 2, "limit": 5, "total": 7, "totalPages": 2}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let page = backend
        .report_history(ReportHistoryQuery {
            page: 2,
            limit: 5,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.reports.len(), 2);
    assert_eq!(page.reports[0].metrics, page.reports[1].metrics);
    assert_eq!(page.pagination.total, 7);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn malformed_encoded_report_is_a_decode_error() {
    let server = MockServer::start().await;
    let mut report = report_json(true);
    report["resumen"] = json!("{\"totalOrders\":");
    Mock::given(method("GET"))
        .and(path("/reports/history/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": report})))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let err = backend.report_detail("12").await.unwrap_err();
    assert!(matches!(err, DispatchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn json_failure_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/all"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Zone not found"})),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let err = backend
        .work_orders(WorkOrderFilter {
            zone: Some("Atlantis".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Zone not found");
}

#[tokio::test]
async fn empty_text_failure_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications/send"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("", "text/plain"))
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    let err = backend
        .send_notification(telconova_core::types::NotificationRequest {
            order_id: "WO-1".into(),
            technician_id: "1".into(),
            channels: vec![telconova_core::types::NotificationChannel::Email],
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn delete_report_escapes_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/reports/history/R%201"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, memory_tokens());
    backend.delete_report("R 1").await.unwrap();
}
