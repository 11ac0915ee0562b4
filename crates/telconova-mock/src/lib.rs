// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory mock backend for the TelcoNova dispatch gateway.
//!
//! `MockBackend` implements [`DispatchBackend`] over seeded fixtures so the
//! gateway can be exercised without a running dispatch API. State lives for
//! the life of the backend and is never persisted.

pub mod fixtures;

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use telconova_core::types::{
    placeholder_email, AssignmentRequest, Availability, LoginCredentials, LoginResponse, MessageResponse,
    NotificationRequest, Pagination, RegisterCredentials, ReportHistoryQuery, ReportPage,
    SaveReportRequest, SavedReport, SortOrder, Technician, TechnicianFilter,
    TechnicianRegistration, UserIdentity, WorkOrder, WorkOrderFilter, WorkOrderStatus,
};
use telconova_core::{DispatchBackend, DispatchError};

use crate::fixtures::MockUser;

/// The user a mock session belongs to.
#[derive(Debug, Clone)]
struct Session {
    user_id: String,
    name: String,
}

#[derive(Debug)]
struct MockState {
    users: Vec<MockUser>,
    session: Option<Session>,
    technicians: Vec<Technician>,
    orders: Vec<WorkOrder>,
    notifications: Vec<NotificationRequest>,
    reports: Vec<SavedReport>,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            users: fixtures::users(),
            session: None,
            technicians: fixtures::technicians(),
            orders: fixtures::work_orders(),
            notifications: Vec::new(),
            reports: fixtures::reports(),
        }
    }

    fn technician_index(&self, id: &str) -> Result<usize, DispatchError> {
        self.technicians
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("technician", id))
    }

    fn order_index(&self, id: &str) -> Result<usize, DispatchError> {
        self.orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| not_found("work order", id))
    }

    /// Assigns `order_idx` to `tech_idx`, moving load off any previous assignee.
    fn assign(&mut self, order_idx: usize, tech_idx: usize) -> WorkOrder {
        let technician_id = self.technicians[tech_idx].id.clone();
        let previous = self.orders[order_idx].assigned_to.clone();

        if let Some(prev) = previous
            && prev != technician_id
            && let Some(prev_tech) = self.technicians.iter_mut().find(|t| t.id == prev)
        {
            prev_tech.current_load = prev_tech.current_load.saturating_sub(1);
            refresh_availability(prev_tech);
        }

        let already_assigned = self.orders[order_idx].assigned_to.as_deref()
            == Some(technician_id.as_str());
        if !already_assigned {
            let tech = &mut self.technicians[tech_idx];
            tech.current_load = tech.current_load.saturating_add(1);
            refresh_availability(tech);
        }

        let assigned_by = self
            .session
            .as_ref()
            .map_or_else(|| fixtures::DEMO_USER_ID.to_string(), |s| s.user_id.clone());

        let order = &mut self.orders[order_idx];
        order.status = WorkOrderStatus::Assigned;
        order.assigned_to = Some(technician_id);
        order.assigned_at = Some(now());
        order.assigned_by = Some(assigned_by);
        order.clone()
    }
}

/// Mock dispatch backend with seeded technicians, orders and reports.
///
/// Accepts the demo supervisor (`supervisor_test@telconova.com` /
/// `password123`) plus any account registered through it.
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a mock backend loaded with the standard fixtures.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::seeded())),
        }
    }

    /// Whether a mock session is active.
    pub async fn is_logged_in(&self) -> bool {
        self.state.lock().await.session.is_some()
    }

    /// Notifications accepted so far, oldest first.
    pub async fn sent_notifications(&self) -> Vec<NotificationRequest> {
        self.state.lock().await.notifications.clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend").finish_non_exhaustive()
    }
}

fn not_found(entity: &'static str, id: &str) -> DispatchError {
    DispatchError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Recomputes availability from load; offline technicians stay offline.
fn refresh_availability(tech: &mut Technician) {
    if tech.availability != Availability::Offline {
        tech.availability = Availability::for_load(tech.current_load);
    }
}

fn require(value: &str, field: &str) -> Result<(), DispatchError> {
    if value.trim().is_empty() {
        return Err(DispatchError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Picks the least-loaded available technician, preferring `zone`.
///
/// Ties keep fixture order. Returns `None` when nobody can take the order.
fn pick_technician(technicians: &[Technician], zone: &str) -> Option<usize> {
    let least_loaded = |same_zone: bool| {
        technicians
            .iter()
            .enumerate()
            .filter(|(_, t)| t.availability == Availability::Available)
            .filter(|(_, t)| !same_zone || t.zone == zone)
            .min_by_key(|(_, t)| t.current_load)
            .map(|(i, _)| i)
    };
    least_loaded(true).or_else(|| least_loaded(false))
}

fn compare_reports(a: &SavedReport, b: &SavedReport, sort_by: &str) -> Ordering {
    match sort_by {
        "nombreReporte" => a.name.cmp(&b.name),
        _ => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl DispatchBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, DispatchError> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
            .cloned()
            .ok_or_else(|| DispatchError::Unauthorized("Credenciales inválidas".into()))?;

        state.session = Some(Session {
            user_id: user.id.clone(),
            name: user.name.clone(),
        });
        info!(email = %user.email, "mock login");

        Ok(LoginResponse {
            message: "Login successful".into(),
            token: format!("mock-token-{}", uuid::Uuid::new_v4()),
            user: UserIdentity {
                id: user.id,
                username: user.email,
                role: user.role,
            },
        })
    }

    async fn register(
        &self,
        credentials: RegisterCredentials,
    ) -> Result<MessageResponse, DispatchError> {
        require(&credentials.name, "name")?;
        require(&credentials.email, "email")?;
        require(&credentials.password, "password")?;

        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == credentials.email) {
            return Err(DispatchError::InvalidRequest(
                "El usuario ya está registrado".into(),
            ));
        }
        let id = (state.users.len() + 1).to_string();
        let role = if credentials.role.trim().is_empty() {
            fixtures::DEMO_ROLE.to_string()
        } else {
            credentials.role
        };
        state.users.push(MockUser {
            id,
            name: credentials.name,
            email: credentials.email,
            password: credentials.password,
            role,
        });

        Ok(MessageResponse::new("Usuario registrado exitosamente"))
    }

    async fn logout(&self) -> Result<(), DispatchError> {
        self.state.lock().await.session = None;
        info!("mock logout");
        Ok(())
    }

    async fn technicians(
        &self,
        filter: TechnicianFilter,
    ) -> Result<Vec<Technician>, DispatchError> {
        let state = self.state.lock().await;
        Ok(state
            .technicians
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn technician(&self, id: &str) -> Result<Technician, DispatchError> {
        let state = self.state.lock().await;
        let idx = state.technician_index(id)?;
        Ok(state.technicians[idx].clone())
    }

    async fn work_orders(&self, filter: WorkOrderFilter) -> Result<Vec<WorkOrder>, DispatchError> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn work_order(&self, id: &str) -> Result<WorkOrder, DispatchError> {
        let state = self.state.lock().await;
        let idx = state.order_index(id)?;
        Ok(state.orders[idx].clone())
    }

    async fn assign_manually(
        &self,
        request: AssignmentRequest,
    ) -> Result<WorkOrder, DispatchError> {
        let Some(technician_id) = request.technician_id else {
            if request.automatic == Some(true) {
                return self.assign_automatically(&request.order_id).await;
            }
            return Err(DispatchError::InvalidRequest(
                "a technician is required for manual assignment".into(),
            ));
        };

        let mut state = self.state.lock().await;
        let order_idx = state.order_index(&request.order_id)?;
        let tech_idx = state.technician_index(&technician_id)?;

        if state.orders[order_idx].status == WorkOrderStatus::Completed {
            return Err(DispatchError::InvalidRequest(format!(
                "work order {} is already completed",
                request.order_id
            )));
        }
        if state.technicians[tech_idx].availability == Availability::Offline {
            return Err(DispatchError::InvalidRequest(format!(
                "technician {technician_id} is offline"
            )));
        }

        let order = state.assign(order_idx, tech_idx);
        debug!(order = %order.id, technician = %technician_id, "mock manual assignment");
        Ok(order)
    }

    async fn assign_automatically(&self, order_id: &str) -> Result<WorkOrder, DispatchError> {
        let mut state = self.state.lock().await;
        let order_idx = state.order_index(order_id)?;

        if state.orders[order_idx].status == WorkOrderStatus::Completed {
            return Err(DispatchError::InvalidRequest(format!(
                "work order {order_id} is already completed"
            )));
        }

        let zone = state.orders[order_idx].zone.clone();
        let tech_idx = pick_technician(&state.technicians, &zone).ok_or_else(|| {
            DispatchError::InvalidRequest("No hay técnicos disponibles".into())
        })?;

        let order = state.assign(order_idx, tech_idx);
        debug!(order = %order.id, technician = ?order.assigned_to, "mock automatic assignment");
        Ok(order)
    }

    async fn send_notification(&self, request: NotificationRequest) -> Result<(), DispatchError> {
        if request.channels.is_empty() {
            return Err(DispatchError::InvalidRequest(
                "at least one notification channel is required".into(),
            ));
        }

        let mut state = self.state.lock().await;
        state.order_index(&request.order_id)?;
        state.technician_index(&request.technician_id)?;

        debug!(
            order = %request.order_id,
            technician = %request.technician_id,
            channels = request.channels.len(),
            "mock notification recorded"
        );
        state.notifications.push(request);
        Ok(())
    }

    async fn register_technician(
        &self,
        registration: TechnicianRegistration,
    ) -> Result<MessageResponse, DispatchError> {
        require(&registration.name, "name")?;
        require(&registration.zone, "zone")?;
        require(&registration.specialty, "specialty")?;
        let load: u32 = registration.workload.trim().parse().map_err(|_| {
            DispatchError::InvalidRequest(format!(
                "workload must be a non-negative integer, got {:?}",
                registration.workload
            ))
        })?;

        let mut state = self.state.lock().await;
        let next_id = state
            .technicians
            .iter()
            .filter_map(|t| t.id.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let id = next_id.to_string();

        state.technicians.push(Technician {
            email: placeholder_email(&registration.name),
            phone: fixtures::phone_for(&id),
            id,
            name: registration.name,
            zone: registration.zone,
            specialty: registration.specialty,
            availability: Availability::for_load(load),
            current_load: load,
            certifications: Vec::new(),
        });

        Ok(MessageResponse::new("Técnico registrado exitosamente"))
    }

    async fn save_report(&self, request: SaveReportRequest) -> Result<SavedReport, DispatchError> {
        require(&request.name, "report name")?;

        let mut state = self.state.lock().await;
        let (created_by, created_by_name) = match &state.session {
            Some(session) => (session.user_id.clone(), session.name.clone()),
            None => (fixtures::DEMO_USER_ID.to_string(), "Supervisor de Prueba".to_string()),
        };

        let report = SavedReport {
            id: format!("RPT-{}", uuid::Uuid::new_v4()),
            name: request.name,
            filters: request.filters,
            metrics: request.metrics,
            summary: request.summary,
            created_at: now(),
            created_by,
            created_by_name: Some(created_by_name),
        };
        state.reports.push(report.clone());
        Ok(report)
    }

    async fn report_history(&self, query: ReportHistoryQuery) -> Result<ReportPage, DispatchError> {
        if query.page == 0 || query.limit == 0 {
            return Err(DispatchError::InvalidRequest(
                "page and limit must be at least 1".into(),
            ));
        }
        if query.sort_by != "creadoEn" && query.sort_by != "nombreReporte" {
            return Err(DispatchError::InvalidRequest(format!(
                "cannot sort reports by {:?}",
                query.sort_by
            )));
        }

        let state = self.state.lock().await;
        let mut reports = state.reports.clone();
        reports.sort_by(|a, b| compare_reports(a, b, &query.sort_by));
        if query.sort_order == SortOrder::Desc {
            reports.reverse();
        }

        let total = reports.len() as u64;
        let limit = u64::from(query.limit);
        let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX);
        let start = usize::try_from(u64::from(query.page - 1) * limit).unwrap_or(usize::MAX);

        let reports = reports
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect();

        Ok(ReportPage {
            reports,
            pagination: Pagination {
                page: query.page,
                limit: query.limit,
                total,
                total_pages,
            },
        })
    }

    async fn report_detail(&self, id: &str) -> Result<SavedReport, DispatchError> {
        let state = self.state.lock().await;
        state
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found("report", id))
    }

    async fn delete_report(&self, id: &str) -> Result<(), DispatchError> {
        let mut state = self.state.lock().await;
        let before = state.reports.len();
        state.reports.retain(|r| r.id != id);
        if state.reports.len() == before {
            return Err(not_found("report", id));
        }
        Ok(())
    }
}
