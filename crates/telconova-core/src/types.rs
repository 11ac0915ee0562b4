// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records exchanged between the gateway and its callers.
//!
//! Field names follow the frontend conventions; where a record is passed
//! through to the remote backend unchanged, serde renames carry the backend's
//! Spanish wire names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which backend a gateway was composed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendMode {
    /// In-memory stand-in used for local development and demos.
    Mock,
    /// The configured HTTP backend.
    Remote,
}

// --- Auth ---

/// Email/password pair submitted on login.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Fields submitted when registering a new account.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub name: String,
    pub role: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Identity of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// Result of a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserIdentity,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("message", &self.message)
            .field("token", &"[redacted]")
            .field("user", &self.user)
            .finish()
    }
}

/// `{message}` envelope for plain acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// --- Technicians ---

/// Whether a technician can take more work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

/// Loads above this many orders mark a technician busy.
pub const BUSY_THRESHOLD: u32 = 5;

impl Availability {
    /// Availability derived from load. `Offline` is never produced here.
    pub fn for_load(load: u32) -> Self {
        if load > BUSY_THRESHOLD {
            Self::Busy
        } else {
            Self::Available
        }
    }
}

/// Domain appended to generated technician emails.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "telconova.com";

/// Builds `first.last@telconova.com` from a display name.
///
/// The name is lowercased and every run of whitespace becomes one `.`.
pub fn placeholder_email(name: &str) -> String {
    let mut local = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                local.push('.');
            }
            in_whitespace = true;
        } else {
            local.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    format!("{local}@{PLACEHOLDER_EMAIL_DOMAIN}")
}

/// A technician in the shape callers consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub zone: String,
    pub specialty: String,
    pub availability: Availability,
    pub current_load: u32,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Equality filters applied to technician listings. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianFilter {
    pub zone: Option<String>,
    pub specialty: Option<String>,
    pub availability: Option<Availability>,
}

impl TechnicianFilter {
    pub fn matches(&self, technician: &Technician) -> bool {
        if self.zone.as_ref().is_some_and(|z| *z != technician.zone) {
            return false;
        }
        if self
            .specialty
            .as_ref()
            .is_some_and(|s| *s != technician.specialty)
        {
            return false;
        }
        if self
            .availability
            .is_some_and(|a| a != technician.availability)
        {
            return false;
        }
        true
    }
}

/// Payload for creating a technician. Workload travels as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRegistration {
    #[serde(rename = "nameTecnico")]
    pub name: String,
    #[serde(rename = "zoneTecnico")]
    pub zone: String,
    #[serde(rename = "workloadTecnico")]
    pub workload: String,
    #[serde(rename = "specialtyTecnico")]
    pub specialty: String,
}

// --- Work orders ---

/// Lifecycle state of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

/// Work order priority as the backend encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "alta")]
    #[strum(serialize = "alta")]
    High,
    #[serde(rename = "media")]
    #[strum(serialize = "media")]
    Medium,
    #[serde(rename = "baja")]
    #[strum(serialize = "baja")]
    Low,
}

/// A field-service work order. Read-only to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    #[serde(rename = "nombreCliente", default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "zona")]
    pub zone: String,
    #[serde(rename = "prioridad", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "servicio")]
    pub service: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub status: WorkOrderStatus,
    #[serde(rename = "assignedTo", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(rename = "asignadoEn", default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<String>,
    #[serde(rename = "asignadoPor", default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    #[serde(rename = "creadoEn")]
    pub created_at: String,
}

/// Server-side filters for work order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub zone: Option<String>,
}

impl WorkOrderFilter {
    /// Query parameters in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(zone) = &self.zone {
            pairs.push(("zona", zone.clone()));
        }
        pairs
    }

    pub fn matches(&self, order: &WorkOrder) -> bool {
        self.status.is_none_or(|s| s == order.status)
            && self.zone.as_ref().is_none_or(|z| *z == order.zone)
    }
}

/// Request to assign a work order.
///
/// Either `technician_id` or `automatic = Some(true)` selects the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    #[serde(rename = "idOrden")]
    pub order_id: String,
    #[serde(rename = "idTecnico", default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    #[serde(rename = "automatico", default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<bool>,
}

impl AssignmentRequest {
    pub fn manual(order_id: impl Into<String>, technician_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            technician_id: Some(technician_id.into()),
            automatic: None,
        }
    }
}

// --- Notifications ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Sms,
}

/// Request to notify a technician about an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    #[serde(rename = "idOrden")]
    pub order_id: String,
    #[serde(rename = "idTecnico")]
    pub technician_id: String,
    #[serde(rename = "canales")]
    pub channels: Vec<NotificationChannel>,
}

// --- Reports ---

/// Filter set a report was generated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    pub start_date: String,
    pub end_date: String,
    pub service_type: String,
    pub zone: String,
}

/// Per-technician row of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianMetrics {
    pub technician_id: String,
    pub technician_name: String,
    pub zone: String,
    pub specialty: String,
    pub total_orders: u32,
    pub completed_orders: u32,
    pub in_progress_orders: u32,
    pub avg_resolution_time: f64,
}

/// Aggregate totals of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_orders: u32,
    pub total_completed: u32,
    pub total_in_progress: u32,
    pub avg_resolution_time: f64,
}

/// A persisted report with structured sub-fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReport {
    #[serde(rename = "idReporte")]
    pub id: String,
    #[serde(rename = "nombreReporte")]
    pub name: String,
    #[serde(rename = "filtros")]
    pub filters: ReportFilters,
    #[serde(rename = "metricas")]
    pub metrics: Vec<TechnicianMetrics>,
    #[serde(rename = "resumen")]
    pub summary: ReportSummary,
    #[serde(rename = "creadoEn")]
    pub created_at: String,
    #[serde(rename = "creadoPor")]
    pub created_by: String,
    #[serde(rename = "creadoPorNombre", default, skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
}

/// Payload for saving a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReportRequest {
    #[serde(rename = "nombreReporte")]
    pub name: String,
    #[serde(rename = "filtros")]
    pub filters: ReportFilters,
    #[serde(rename = "metricas")]
    pub metrics: Vec<TechnicianMetrics>,
    #[serde(rename = "resumen")]
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Paging and ordering for the report history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHistoryQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ReportHistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: "creadoEn".to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

impl ReportHistoryQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortOrder", self.sort_order.to_string()),
        ]
    }
}

/// Paging metadata returned with the report history.
///
/// Every field defaults so partial metadata from the backend still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of saved reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub reports: Vec<SavedReport>,
    pub pagination: Pagination,
}
