// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the TelcoNova dispatch gateway.

use thiserror::Error;

/// The error type returned by every backend operation and core component.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Configuration errors (invalid base URL, unusable header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable token storage errors (unreadable directory, write failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Connection-level failure before any HTTP status was received.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-success HTTP status. Displays the normalized message verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A payload could not be decoded into the expected shape.
    #[error("malformed payload: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credentials were rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request was structurally valid but cannot be carried out.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Builds a [`DispatchError::Decode`] from a serde failure.
    pub fn decode(what: &str, err: serde_json::Error) -> Self {
        Self::Decode {
            message: format!("{what}: {err}"),
            source: Some(Box::new(err)),
        }
    }

    /// HTTP status carried by the error, when it came from the remote API.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
