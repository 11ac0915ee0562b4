// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote HTTP backend for the TelcoNova dispatch gateway.
//!
//! This crate implements [`DispatchBackend`] against the dispatch REST API:
//! [`client`] carries requests, [`normalize`] turns failures into one
//! message, and [`translate`] reshapes backend records into domain records.

pub mod client;
pub mod normalize;
pub mod translate;
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use telconova_config::model::ApiConfig;
use telconova_core::types::{
    AssignmentRequest, LoginCredentials, LoginResponse, MessageResponse, NotificationRequest,
    RegisterCredentials, ReportHistoryQuery, ReportPage, SaveReportRequest, SavedReport,
    Technician, TechnicianFilter, TechnicianRegistration, WorkOrder, WorkOrderFilter,
};
use telconova_core::{DispatchBackend, DispatchError};
use telconova_session::TokenStore;
use tracing::{debug, info};

use crate::client::{segment, ApiClient};
use crate::wire::{
    AutomaticAssignmentBody, DataEnvelope, LoginWireResponse, WireReport, WireReportPage,
    WireTechnician,
};

/// Backend that forwards every operation to the remote dispatch API.
///
/// Holds the shared [`TokenStore`]: login stores the issued token and logout
/// clears it, so every later request carries (or omits) the bearer header.
#[derive(Debug)]
pub struct RemoteBackend {
    client: ApiClient,
}

impl RemoteBackend {
    /// Creates a remote backend from the `[api]` configuration section.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> Result<Self, DispatchError> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let client = ApiClient::new(config.base_url.clone(), timeout, tokens)?;

        info!(base_url = %client.base_url(), "remote dispatch backend initialized");

        Ok(Self { client })
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.client.tokens()
    }
}

#[async_trait]
impl DispatchBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, DispatchError> {
        let wire: LoginWireResponse = self
            .client
            .post_json("/api/auth/login", &credentials)
            .await?;
        self.client.tokens().set_token(&wire.token)?;
        info!(email = %wire.email, "logged in");
        Ok(translate::login_response(wire))
    }

    async fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> Result<MessageResponse, DispatchError> {
        let ack = self
            .client
            .post_message("/auth/register", &credentials)
            .await?;
        Ok(translate::message_envelope(ack))
    }

    async fn logout(&self) -> Result<(), DispatchError> {
        // Sessions are stateless on the server; dropping the token is enough.
        self.client.tokens().clear_token()?;
        info!("logged out");
        Ok(())
    }

    async fn technicians(
        &self,
        filter: TechnicianFilter,
    ) -> Result<Vec<Technician>, DispatchError> {
        let wire: Vec<WireTechnician> = self
            .client
            .get_json("/api/technicians/all", &[])
            .await?;
        let fetched = wire.len();
        let technicians = translate::technicians_from_wire(wire, &filter);
        debug!(fetched, matched = technicians.len(), "technicians filtered");
        Ok(technicians)
    }

    async fn technician(&self, id: &str) -> Result<Technician, DispatchError> {
        let wire: WireTechnician = self
            .client
            .get_json(&format!("/technicians/{}", segment(id)), &[])
            .await?;
        Ok(translate::technician_from_wire(wire))
    }

    async fn work_orders(&self, filter: WorkOrderFilter) -> Result<Vec<WorkOrder>, DispatchError> {
        self.client
            .get_json("/api/orders/all", &filter.query_pairs())
            .await
    }

    async fn work_order(&self, id: &str) -> Result<WorkOrder, DispatchError> {
        self.client
            .get_json(&format!("/api/orders/{}", segment(id)), &[])
            .await
    }

    async fn assign_manually(
        &self,
        request: AssignmentRequest,
    ) -> Result<WorkOrder, DispatchError> {
        self.client.post_json("/assignments/manual", &request).await
    }

    async fn assign_automatically(&self, order_id: &str) -> Result<WorkOrder, DispatchError> {
        self.client
            .post_json("/assignments/automatic", &AutomaticAssignmentBody { order_id })
            .await
    }

    async fn send_notification(&self, request: NotificationRequest) -> Result<(), DispatchError> {
        self.client.post_unit("/notifications/send", &request).await
    }

    async fn register_technician(
        &self,
        registration: TechnicianRegistration,
    ) -> Result<MessageResponse, DispatchError> {
        let ack = self
            .client
            .post_message("/technicians/create", &registration)
            .await?;
        Ok(translate::message_envelope(ack))
    }

    async fn save_report(&self, request: SaveReportRequest) -> Result<SavedReport, DispatchError> {
        let envelope: DataEnvelope<WireReport> =
            self.client.post_json("/reports/save", &request).await?;
        translate::report_from_wire(envelope.data)
    }

    async fn report_history(&self, query: ReportHistoryQuery) -> Result<ReportPage, DispatchError> {
        let envelope: DataEnvelope<WireReportPage> = self
            .client
            .get_json("/reports/history", &query.query_pairs())
            .await?;
        translate::report_page_from_wire(envelope.data)
    }

    async fn report_detail(&self, id: &str) -> Result<SavedReport, DispatchError> {
        let envelope: DataEnvelope<WireReport> = self
            .client
            .get_json(&format!("/reports/history/{}", segment(id)), &[])
            .await?;
        translate::report_from_wire(envelope.data)
    }

    async fn delete_report(&self, id: &str) -> Result<(), DispatchError> {
        self.client
            .delete_unit(&format!("/reports/history/{}", segment(id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telconova_session::MemoryStore;

    fn tokens() -> Arc<TokenStore> {
        Arc::new(TokenStore::hydrate(Arc::new(MemoryStore::new())))
    }

    #[test]
    fn builds_from_default_config() {
        let backend = RemoteBackend::new(&ApiConfig::default(), tokens()).unwrap();
        assert_eq!(backend.name(), "remote");
    }

    #[test]
    fn honours_configured_timeout() {
        let config = ApiConfig {
            timeout_secs: Some(5),
            ..ApiConfig::default()
        };
        assert!(RemoteBackend::new(&config, tokens()).is_ok());
    }

    #[tokio::test]
    async fn logout_clears_token_without_network() {
        // Unroutable base URL: any request would fail.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..ApiConfig::default()
        };
        let backend = RemoteBackend::new(&config, tokens()).unwrap();
        backend.tokens().set_token("jwt").unwrap();

        backend.logout().await.unwrap();
        assert!(!backend.tokens().is_authenticated());
    }
}
