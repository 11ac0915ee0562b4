// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns failed HTTP responses into a single message-bearing error.
//!
//! The backend answers some failures with a JSON `{message}` body and others
//! with plain text, so both shapes collapse into [`DispatchError::Api`].

use reqwest::header::CONTENT_TYPE;
use telconova_core::DispatchError;

/// Message used when a failure carries nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "Error en la solicitud";

/// Builds the normalized error for a non-success response.
///
/// - JSON content type: the body's `message` field, or the generic message if
///   the body does not parse or has no non-empty string `message`.
/// - Anything else: the raw body text, or the generic message if empty.
pub fn normalize_error(status: u16, content_type: Option<&str>, body: &str) -> DispatchError {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));

    let message = if is_json {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    } else if body.is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        body.to_string()
    };

    DispatchError::Api { status, message }
}

/// Consumes a failed response and normalizes it.
pub async fn error_from_response(response: reqwest::Response) -> DispatchError {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    // An unreadable body is treated like an empty one.
    let body = response.text().await.unwrap_or_default();
    normalize_error(status, content_type.as_deref(), &body)
}
