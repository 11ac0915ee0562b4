// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait covering every dispatch operation.

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::types::{
    AssignmentRequest, LoginCredentials, LoginResponse, MessageResponse, NotificationRequest,
    RegisterCredentials, ReportHistoryQuery, ReportPage, SaveReportRequest, SavedReport,
    Technician, TechnicianFilter, TechnicianRegistration, WorkOrder, WorkOrderFilter,
};

/// The operation surface shared by the remote HTTP backend and the mock.
///
/// The gateway holds exactly one implementation, chosen at composition time,
/// so callers never branch on which backend is active.
#[async_trait]
pub trait DispatchBackend: Send + Sync + 'static {
    /// Short name used in logs ("remote", "mock").
    fn name(&self) -> &str;

    /// Authenticates and starts a session.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, DispatchError>;

    /// Registers a new user account.
    async fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> Result<MessageResponse, DispatchError>;

    /// Ends the current session.
    async fn logout(&self) -> Result<(), DispatchError>;

    /// Lists technicians matching `filter`, in backend order.
    async fn technicians(
        &self,
        filter: TechnicianFilter,
    ) -> Result<Vec<Technician>, DispatchError>;

    async fn technician(&self, id: &str) -> Result<Technician, DispatchError>;

    async fn work_orders(&self, filter: WorkOrderFilter) -> Result<Vec<WorkOrder>, DispatchError>;

    async fn work_order(&self, id: &str) -> Result<WorkOrder, DispatchError>;

    /// Assigns an order to the technician named in the request.
    async fn assign_manually(
        &self,
        request: AssignmentRequest,
    ) -> Result<WorkOrder, DispatchError>;

    /// Lets the backend pick a technician for the order.
    async fn assign_automatically(&self, order_id: &str) -> Result<WorkOrder, DispatchError>;

    async fn send_notification(&self, request: NotificationRequest) -> Result<(), DispatchError>;

    async fn register_technician(
        &self,
        registration: TechnicianRegistration,
    ) -> Result<MessageResponse, DispatchError>;

    async fn save_report(&self, request: SaveReportRequest) -> Result<SavedReport, DispatchError>;

    async fn report_history(&self, query: ReportHistoryQuery) -> Result<ReportPage, DispatchError>;

    async fn report_detail(&self, id: &str) -> Result<SavedReport, DispatchError>;

    async fn delete_report(&self, id: &str) -> Result<(), DispatchError>;
}
