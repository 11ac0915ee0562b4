// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure mappings from wire records to domain records.
//!
//! Nothing here touches the network, so every rule can be tested directly.

use telconova_core::types::{
    placeholder_email, Availability, LoginResponse, MessageResponse, ReportPage, SavedReport, Technician,
    TechnicianFilter, UserIdentity,
};
use telconova_core::DispatchError;

use crate::wire::{LoginWireResponse, WireReport, WireReportPage, WireTechnician};

/// Phone number reported for every technician; the backend has none.
pub const PLACEHOLDER_PHONE: &str = "+1234567890";

/// Role reported for remote logins; the backend does not return one.
pub const DEFAULT_ROLE: &str = "supervisor";

pub const LOGIN_MESSAGE: &str = "Login successful";

/// Parses the leading decimal digits of a workload string.
///
/// Mirrors lenient integer parsing: surrounding junk after the digits is
/// ignored, and anything without leading digits (including negatives) is 0.
pub fn parse_workload(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}


pub fn technician_from_wire(wire: WireTechnician) -> Technician {
    let current_load = parse_workload(&wire.workload);
    let email = match wire.email {
        Some(email) if !email.is_empty() => email,
        _ => placeholder_email(&wire.name),
    };

    Technician {
        id: wire.id,
        email,
        phone: PLACEHOLDER_PHONE.to_string(),
        availability: Availability::for_load(current_load),
        current_load,
        name: wire.name,
        zone: wire.zone,
        specialty: wire.specialty,
        certifications: Vec::new(),
    }
}

/// Translates a fetched technician set and applies `filter`, keeping order.
pub fn technicians_from_wire(
    wire: Vec<WireTechnician>,
    filter: &TechnicianFilter,
) -> Vec<Technician> {
    wire.into_iter()
        .map(technician_from_wire)
        .filter(|t| filter.matches(t))
        .collect()
}

/// Decodes any string-encoded sub-fields of a report.
pub fn report_from_wire(wire: WireReport) -> Result<SavedReport, DispatchError> {
    Ok(SavedReport {
        filters: wire.filters.decode("filtros")?,
        metrics: wire.metrics.decode("metricas")?,
        summary: wire.summary.decode("resumen")?,
        id: wire.id,
        name: wire.name,
        created_at: wire.created_at,
        created_by: wire.created_by,
        created_by_name: wire.created_by_name,
    })
}

pub fn report_page_from_wire(wire: WireReportPage) -> Result<ReportPage, DispatchError> {
    let reports = wire
        .reports
        .into_iter()
        .map(report_from_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ReportPage {
        reports,
        pagination: wire.pagination,
    })
}

/// Reshapes the login body: the echoed email doubles as user id and name.
pub fn login_response(wire: LoginWireResponse) -> LoginResponse {
    LoginResponse {
        message: LOGIN_MESSAGE.to_string(),
        token: wire.token,
        user: UserIdentity {
            id: wire.email.clone(),
            username: wire.email,
            role: DEFAULT_ROLE.to_string(),
        },
    }
}

pub fn message_envelope(ack: String) -> MessageResponse {
    MessageResponse { message: ack }
}
