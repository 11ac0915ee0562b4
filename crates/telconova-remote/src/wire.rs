// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-format types for the remote dispatch API.
//!
//! Only records whose shape differs from the domain types live here;
//! everything else is sent and received as the `telconova-core` type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use telconova_core::types::{Pagination, ReportFilters, ReportSummary, TechnicianMetrics};
use telconova_core::DispatchError;

/// Accepts a JSON string or number and keeps its textual form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// --- Technicians ---

/// A technician as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTechnician {
    #[serde(rename = "idTecnico", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nameTecnico")]
    pub name: String,
    #[serde(rename = "zoneTecnico")]
    pub zone: String,
    #[serde(rename = "workloadTecnico", default, deserialize_with = "string_or_number")]
    pub workload: String,
    #[serde(rename = "specialtyTecnico")]
    pub specialty: String,
    #[serde(rename = "emailTecnico", default)]
    pub email: Option<String>,
}

// --- Auth ---

/// Body returned by `POST /api/auth/login`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginWireResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub email: String,
}

impl std::fmt::Debug for LoginWireResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginWireResponse")
            .field("token", &"[redacted]")
            .field("token_type", &self.token_type)
            .field("email", &self.email)
            .finish()
    }
}

// --- Assignments ---

/// Body for `POST /assignments/automatic`.
#[derive(Debug, Clone, Serialize)]
pub struct AutomaticAssignmentBody<'a> {
    #[serde(rename = "idOrden")]
    pub order_id: &'a str,
}

// --- Reports ---

/// A report sub-field that may arrive either structured or as JSON text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Encoded<T> {
    Text(String),
    Structured(T),
}

impl<T: DeserializeOwned> Encoded<T> {
    /// Returns the structured value, parsing the text form if needed.
    pub fn decode(self, field: &str) -> Result<T, DispatchError> {
        match self {
            Encoded::Structured(value) => Ok(value),
            Encoded::Text(text) => {
                serde_json::from_str(&text).map_err(|e| DispatchError::decode(field, e))
            }
        }
    }
}

/// A saved report as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReport {
    #[serde(rename = "idReporte", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nombreReporte")]
    pub name: String,
    #[serde(rename = "filtros")]
    pub filters: Encoded<ReportFilters>,
    #[serde(rename = "metricas")]
    pub metrics: Encoded<Vec<TechnicianMetrics>>,
    #[serde(rename = "resumen")]
    pub summary: Encoded<ReportSummary>,
    #[serde(rename = "creadoEn")]
    pub created_at: String,
    #[serde(rename = "creadoPor", deserialize_with = "string_or_number")]
    pub created_by: String,
    #[serde(rename = "creadoPorNombre", default)]
    pub created_by_name: Option<String>,
}

/// `{data: T}` envelope used by the report endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Payload of `GET /reports/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReportPage {
    pub reports: Vec<WireReport>,
    #[serde(default)]
    pub pagination: Pagination,
}
