// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root of the TelcoNova dispatch gateway.
//!
//! [`Gateway`] exposes one method per business action and forwards each to
//! the single [`DispatchBackend`] chosen when it was built. Whether that is
//! the in-memory mock or the remote HTTP API is decided once, from config.

pub mod hints;

use std::sync::Arc;

use telconova_config::model::ApiConfig;
use telconova_config::TelconovaConfig;
use telconova_core::types::{
    AssignmentRequest, LoginCredentials, LoginResponse, MessageResponse, NotificationRequest,
    RegisterCredentials, ReportHistoryQuery, ReportPage, SaveReportRequest, SavedReport,
    Technician, TechnicianFilter, TechnicianRegistration, WorkOrder, WorkOrderFilter,
};
use telconova_core::{BackendMode, DispatchBackend, DispatchError};
use telconova_mock::MockBackend;
use telconova_remote::RemoteBackend;
use telconova_session::{FileStore, TokenStore};
use tracing::{debug, info};

pub use hints::{credential_hints, CredentialHint, CredentialHints};

/// Backend mode implied by the `[api]` section.
pub fn select_mode(api: &ApiConfig) -> BackendMode {
    if api.use_mock {
        BackendMode::Mock
    } else {
        BackendMode::Remote
    }
}

/// The data-access facade every caller goes through.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn DispatchBackend>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Gateway {
    /// Wraps an already-built backend.
    pub fn new(backend: Arc<dyn DispatchBackend>) -> Self {
        Self { backend }
    }

    /// Builds the gateway from configuration.
    ///
    /// Remote mode persists its token under `session.token_dir`, so a session
    /// started by one run is resumed by the next.
    pub fn from_config(config: &TelconovaConfig) -> Result<Self, DispatchError> {
        let mode = select_mode(&config.api);
        let backend: Arc<dyn DispatchBackend> = match mode {
            BackendMode::Mock => Arc::new(MockBackend::new()),
            BackendMode::Remote => {
                let token_dir = config.session.resolved_token_dir();
                debug!(token_dir = %token_dir.display(), "hydrating session");
                let tokens = Arc::new(TokenStore::hydrate(Arc::new(FileStore::new(token_dir))));
                Arc::new(RemoteBackend::new(&config.api, tokens)?)
            }
        };

        info!(%mode, "dispatch backend selected");
        Ok(Self::new(backend))
    }

    pub async fn login(
        &self,
        credentials: LoginCredentials,
    ) -> Result<LoginResponse, DispatchError> {
        debug!(email = %credentials.email, "login");
        self.backend.login(credentials).await
    }

    pub async fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> Result<MessageResponse, DispatchError> {
        self.backend.register(credentials).await
    }

    pub async fn logout(&self) -> Result<(), DispatchError> {
        self.backend.logout().await
    }

    /// Lists technicians, optionally filtered by zone, specialty or availability.
    pub async fn technicians(
        &self,
        filter: TechnicianFilter,
    ) -> Result<Vec<Technician>, DispatchError> {
        self.backend.technicians(filter).await
    }

    pub async fn technician(&self, id: &str) -> Result<Technician, DispatchError> {
        self.backend.technician(id).await
    }

    pub async fn work_orders(
        &self,
        filter: WorkOrderFilter,
    ) -> Result<Vec<WorkOrder>, DispatchError> {
        self.backend.work_orders(filter).await
    }

    pub async fn work_order(&self, id: &str) -> Result<WorkOrder, DispatchError> {
        self.backend.work_order(id).await
    }

    pub async fn assign_manually(
        &self,
        request: AssignmentRequest,
    ) -> Result<WorkOrder, DispatchError> {
        debug!(order = %request.order_id, technician = ?request.technician_id, "manual assignment");
        self.backend.assign_manually(request).await
    }

    pub async fn assign_automatically(&self, order_id: &str) -> Result<WorkOrder, DispatchError> {
        debug!(order = %order_id, "automatic assignment");
        self.backend.assign_automatically(order_id).await
    }

    pub async fn send_notification(
        &self,
        request: NotificationRequest,
    ) -> Result<(), DispatchError> {
        self.backend.send_notification(request).await
    }

    pub async fn register_technician(
        &self,
        registration: TechnicianRegistration,
    ) -> Result<MessageResponse, DispatchError> {
        self.backend.register_technician(registration).await
    }

    pub async fn save_report(
        &self,
        request: SaveReportRequest,
    ) -> Result<SavedReport, DispatchError> {
        self.backend.save_report(request).await
    }

    /// One page of saved reports. Defaults: page 1, 10 per page, newest first.
    pub async fn report_history(
        &self,
        query: ReportHistoryQuery,
    ) -> Result<ReportPage, DispatchError> {
        self.backend.report_history(query).await
    }

    pub async fn report_detail(&self, id: &str) -> Result<SavedReport, DispatchError> {
        self.backend.report_detail(id).await
    }

    pub async fn delete_report(&self, id: &str) -> Result<(), DispatchError> {
        self.backend.delete_report(id).await
    }
}
