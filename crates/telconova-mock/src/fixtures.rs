// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seed data the mock backend starts with.

use telconova_core::types::{
    Availability, Priority, ReportFilters, ReportSummary, SavedReport, Technician,
    TechnicianMetrics, WorkOrder, WorkOrderStatus,
};

/// Demo supervisor account accepted by the mock login.
pub const DEMO_EMAIL: &str = "supervisor_test@telconova.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_USER_ID: &str = "1";
pub const DEMO_ROLE: &str = "supervisor";

/// A registered account held by the mock.
#[derive(Clone)]
pub struct MockUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for MockUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

pub fn users() -> Vec<MockUser> {
    vec![MockUser {
        id: DEMO_USER_ID.into(),
        name: "Supervisor de Prueba".into(),
        email: DEMO_EMAIL.into(),
        password: DEMO_PASSWORD.into(),
        role: DEMO_ROLE.into(),
    }]
}

/// Phone number the seeded data uses for technician `id`.
pub fn phone_for(id: &str) -> String {
    format!("+57300000000{id}")
}

fn technician(
    id: &str,
    name: &str,
    email: &str,
    zone: &str,
    specialty: &str,
    load: u32,
    certifications: &[&str],
) -> Technician {
    Technician {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        phone: phone_for(id),
        zone: zone.into(),
        specialty: specialty.into(),
        availability: Availability::for_load(load),
        current_load: load,
        certifications: certifications.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn technicians() -> Vec<Technician> {
    let mut techs = vec![
        technician("1", "Carlos Pérez", "carlos.perez@telconova.com", "Norte", "Fibra óptica", 2, &["FO-101"]),
        technician("2", "María Gómez", "maria.gomez@telconova.com", "Norte", "Redes", 6, &["NET-201", "FO-101"]),
        technician("3", "Andrés López", "andres.lopez@telconova.com", "Sur", "Fibra óptica", 1, &[]),
        technician("4", "Laura Torres", "laura.torres@telconova.com", "Centro", "Televisión", 3, &["TV-110"]),
        technician("5", "Jorge Ramírez", "jorge.ramirez@telconova.com", "Sur", "Redes", 0, &[]),
    ];
    techs[4].availability = Availability::Offline;
    techs
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    customer: &str,
    address: &str,
    zone: &str,
    priority: Priority,
    service: &str,
    description: &str,
    created_at: &str,
) -> WorkOrder {
    WorkOrder {
        id: id.into(),
        customer_name: Some(customer.into()),
        address: Some(address.into()),
        zone: zone.into(),
        priority: Some(priority),
        service: service.into(),
        description: description.into(),
        status: WorkOrderStatus::Pending,
        assigned_to: None,
        assigned_at: None,
        assigned_by: None,
        created_at: created_at.into(),
    }
}

pub fn work_orders() -> Vec<WorkOrder> {
    let mut orders = vec![
        order("WO-1001", "Ana Martínez", "Calle 10 #20-30", "Norte", Priority::High, "instalacion", "Instalación de fibra óptica residencial", "2026-01-05T08:30:00Z"),
        order("WO-1002", "Pedro Castillo", "Carrera 45 #12-08", "Sur", Priority::Medium, "reparacion", "Sin señal de internet desde ayer", "2026-01-05T09:15:00Z"),
        order("WO-1003", "Lucía Herrera", "Avenida 3 #55-10", "Centro", Priority::Low, "mantenimiento", "Revisión preventiva del decodificador", "2026-01-06T14:00:00Z"),
        order("WO-1004", "Diego Rojas", "Calle 80 #15-22", "Norte", Priority::High, "reparacion", "Corte de cable en acometida", "2026-01-07T07:45:00Z"),
        order("WO-1005", "Sofía Vargas", "Transversal 9 #4-60", "Sur", Priority::Medium, "instalacion", "Traslado de servicio a nuevo domicilio", "2026-01-07T11:20:00Z"),
    ];

    let done = &mut orders[2];
    done.status = WorkOrderStatus::Completed;
    done.assigned_to = Some("4".into());
    done.assigned_at = Some("2026-01-06T15:00:00Z".into());
    done.assigned_by = Some(DEMO_USER_ID.into());

    orders
}

pub fn reports() -> Vec<SavedReport> {
    vec![SavedReport {
        id: "RPT-0001".into(),
        name: "Desempeño enero - Norte".into(),
        filters: ReportFilters {
            start_date: "2025-01-01".into(),
            end_date: "2025-01-31".into(),
            service_type: "todos".into(),
            zone: "Norte".into(),
        },
        metrics: vec![
            TechnicianMetrics {
                technician_id: "1".into(),
                technician_name: "Carlos Pérez".into(),
                zone: "Norte".into(),
                specialty: "Fibra óptica".into(),
                total_orders: 12,
                completed_orders: 10,
                in_progress_orders: 2,
                avg_resolution_time: 3.5,
            },
            TechnicianMetrics {
                technician_id: "2".into(),
                technician_name: "María Gómez".into(),
                zone: "Norte".into(),
                specialty: "Redes".into(),
                total_orders: 15,
                completed_orders: 11,
                in_progress_orders: 4,
                avg_resolution_time: 4.25,
            },
        ],
        summary: ReportSummary {
            total_orders: 27,
            total_completed: 21,
            total_in_progress: 6,
            avg_resolution_time: 3.9,
        },
        created_at: "2025-02-01T10:00:00Z".into(),
        created_by: DEMO_USER_ID.into(),
        created_by_name: Some("Supervisor de Prueba".into()),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_availability_matches_load() {
        for tech in technicians() {
            if tech.availability != Availability::Offline {
                assert_eq!(tech.availability, Availability::for_load(tech.current_load));
            }
        }
    }

    #[test]
    fn fixture_ids_are_unique() {
        let techs = technicians();
        let mut ids: Vec<_> = techs.iter().map(|t| &t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), techs.len());

        let orders = work_orders();
        let mut ids: Vec<_> = orders.iter().map(|o| &o.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), orders.len());
    }

    #[test]
    fn demo_user_debug_hides_password() {
        let rendered = format!("{:?}", users()[0]);
        assert!(!rendered.contains(DEMO_PASSWORD));
    }
}
